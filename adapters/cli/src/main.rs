#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Grid Siege skirmish to completion.
//!
//! The adapter owns everything the engine deliberately does not: argument
//! parsing, the outer tick loop and its cadence, and text presentation.

mod render;

use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use grid_siege_core::{GameOutcome, Position};
use grid_siege_engine::{compute_phases, game_is_over, run_tick, TickContext};
use grid_siege_system_analytics::Analytics;
use grid_siege_world::{build_world, initialize_actors, IdAllocator};

/// Deterministic grid skirmish simulation.
#[derive(Debug, Parser)]
#[command(name = "grid-siege")]
struct Args {
    /// Number of cell columns in the world.
    #[arg(long, default_value_t = 12)]
    columns: i32,

    /// Number of cell rows in the world.
    #[arg(long, default_value_t = 7)]
    rows: i32,

    /// Seed driving the engine's uniform random choices.
    #[arg(long, default_value_t = 0x5eed_cafe)]
    seed: u64,

    /// Delay between ticks in milliseconds.
    #[arg(long, default_value_t = 250)]
    tick_delay_ms: u64,

    /// Upper bound on simulated ticks before the run stops.
    #[arg(long, default_value_t = 400)]
    max_ticks: u64,

    /// Suppress per-tick frames and print only the closing summary.
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    anyhow::ensure!(
        args.columns > 0 && args.rows > 0,
        "the world needs at least one column and one row"
    );

    let size = Position::new(args.columns - 1, args.rows - 1);
    let world = build_world(size);
    let mut ids = IdAllocator::new();
    let registry =
        initialize_actors(&world, &mut ids).context("seeding the initial battlefield")?;
    let phases = compute_phases(&world, &registry);
    let mut context = TickContext::new(args.seed, ids);
    let mut analytics = Analytics::new();

    let mut world = world;
    let mut registry = registry;
    let mut tick = 0;
    let mut outcome = game_is_over(&world, &registry);

    while outcome == GameOutcome::Ongoing && tick < args.max_ticks {
        let (next_world, next_registry) = run_tick(world, registry, &phases, &mut context);
        world = next_world;
        registry = next_registry;
        tick += 1;

        let metrics = analytics.record(tick, &registry);
        if !args.quiet {
            println!("{}", render::frame(&world, &registry, &metrics));
        }

        outcome = game_is_over(&world, &registry);
        if outcome == GameOutcome::Ongoing && args.tick_delay_ms > 0 {
            thread::sleep(Duration::from_millis(args.tick_delay_ms));
        }
    }

    println!("{}", render::summary(outcome, tick, analytics.last_report()));
    Ok(())
}
