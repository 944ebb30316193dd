//! Text presentation of the battlefield.

use grid_siege_core::{ActorKind, GameOutcome, Position};
use grid_siege_system_analytics::TickMetrics;
use grid_siege_world::{ActorRegistry, World};

/// Renders one frame: a status line followed by the character grid.
pub(crate) fn frame(world: &World, registry: &ActorRegistry, metrics: &TickMetrics) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "tick {:>4} | enemies {:>2} | towers {} | spawners {} | hostile hp {:>3} | defence hp {:>3}\n",
        metrics.tick,
        metrics.enemies,
        metrics.towers,
        metrics.spawners,
        metrics.hostile_health,
        metrics.defence_health,
    ));

    let size = world.size();
    for y in 0..=size.y() {
        for x in 0..=size.x() {
            out.push(glyph(registry, Position::new(x, y)));
        }
        out.push('\n');
    }
    out
}

/// Renders the closing line once the loop stops ticking.
pub(crate) fn summary(outcome: GameOutcome, ticks: u64, last: Option<&TickMetrics>) -> String {
    let verdict = match outcome {
        GameOutcome::TowerVictory => "towers hold the field",
        GameOutcome::EnemyVictory => "the heart has fallen",
        GameOutcome::Ongoing => "tick limit reached with the siege unresolved",
    };

    match last {
        Some(metrics) => format!(
            "{verdict} after {ticks} ticks (enemies {}, towers {}, defence hp {})",
            metrics.enemies, metrics.towers, metrics.defence_health,
        ),
        None => format!("{verdict} after {ticks} ticks"),
    }
}

/// Character shown for a cell; co-occupants render by precedence, mobile
/// units first so motion stays visible over the goal they swarm.
fn glyph(registry: &ActorRegistry, position: Position) -> char {
    let mut best: Option<(usize, char)> = None;
    for actor in registry.iter() {
        if actor.position() != position {
            continue;
        }
        let ranked = rank(actor.kind());
        best = match best {
            Some(current) if current.0 <= ranked.0 => Some(current),
            _ => Some(ranked),
        };
    }
    best.map_or('.', |(_, glyph)| glyph)
}

fn rank(kind: ActorKind) -> (usize, char) {
    match kind {
        ActorKind::Enemy => (0, 'e'),
        ActorKind::Tower => (1, 'T'),
        ActorKind::Spawner => (2, 'S'),
        ActorKind::Goal => (3, 'G'),
        ActorKind::Wall => (4, '#'),
        ActorKind::Unknown => (5, '?'),
    }
}
