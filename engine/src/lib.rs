#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Phase engine for Grid Siege.
//!
//! One tick advances four phases in a fixed order: move → attack → spawn
//! → heal. Each phase collects one optional [`Proposal`] per actor
//! against the phase's input snapshot, then resolves the full proposal
//! sequence into the next world/registry pair. Movement commits before
//! combat so attacks use post-move adjacency; spawning follows combat so
//! a dying spawn source still emits this tick; healing runs last so
//! regeneration reflects the tick's final damage.

use grid_siege_core::{ActorKind, GameOutcome, PhaseKind};
use grid_siege_world::{ActorRegistry, IdAllocator, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

mod behavior;
mod resolve;

pub use behavior::Proposal;

/// Mutable per-session state threaded explicitly through every tick: the
/// seeded random source behind uniform target selection and the
/// monotonic actor id allocator.
#[derive(Clone, Debug)]
pub struct TickContext {
    rng: ChaCha8Rng,
    ids: IdAllocator,
}

impl TickContext {
    /// Creates a context from a seed and the allocator that already
    /// handed out the seeded layout's ids.
    #[must_use]
    pub fn new(seed: u64, ids: IdAllocator) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            ids,
        }
    }

    pub(crate) fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub(crate) fn ids(&mut self) -> &mut IdAllocator {
        &mut self.ids
    }
}

/// Named simulation stage; resolution is dispatched on the kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Phase {
    kind: PhaseKind,
}

impl Phase {
    const fn new(kind: PhaseKind) -> Self {
        Self { kind }
    }

    /// Kind of the phase.
    #[must_use]
    pub const fn kind(&self) -> PhaseKind {
        self.kind
    }

    fn execute(
        self,
        world: World,
        registry: ActorRegistry,
        context: &mut TickContext,
    ) -> (World, ActorRegistry) {
        let proposals = behavior::collect_proposals(self.kind, &world, &registry, context);
        resolve::resolve(self.kind, world, registry, &proposals)
    }
}

/// Produces the fixed ordered phase sequence.
///
/// The parameters are unused beyond signature compatibility; the phase
/// list is structurally fixed.
#[must_use]
pub fn compute_phases(_world: &World, _registry: &ActorRegistry) -> Vec<Phase> {
    vec![
        Phase::new(PhaseKind::Move),
        Phase::new(PhaseKind::Attack),
        Phase::new(PhaseKind::Spawn),
        Phase::new(PhaseKind::Heal),
    ]
}

/// Advances the simulation by one tick: folds the registry through every
/// phase in order, producing a fresh world/registry pair.
#[must_use]
pub fn run_tick(
    world: World,
    registry: ActorRegistry,
    phases: &[Phase],
    context: &mut TickContext,
) -> (World, ActorRegistry) {
    let mut state = (world, registry);
    for phase in phases {
        let (world, registry) = state;
        state = phase.execute(world, registry, context);
    }
    state
}

/// Terminal-state check over the registry.
///
/// Towers win as soon as no enemy and no spawner remains, regardless of
/// what else is on the field; enemies win when no goal remains.
#[must_use]
pub fn game_is_over(_world: &World, registry: &ActorRegistry) -> GameOutcome {
    let hostiles_remain = registry
        .iter()
        .any(|actor| matches!(actor.kind(), ActorKind::Enemy | ActorKind::Spawner));
    if !hostiles_remain {
        return GameOutcome::TowerVictory;
    }

    let goal_remains = registry.iter().any(|actor| actor.kind() == ActorKind::Goal);
    if !goal_remains {
        return GameOutcome::EnemyVictory;
    }

    GameOutcome::Ongoing
}
