//! Phase resolvers: fold collected proposals into the next world and
//! registry pair.
//!
//! Proposals apply in insertion order reversed: the last registry entry
//! resolves first. The ordering is arbitrary but deterministic, and
//! replays depend on it; change it only together with the tests that pin
//! it down.

use grid_siege_core::{Health, PhaseKind};
use grid_siege_world::{query, ActorRegistry, World};

use crate::behavior::Proposal;

pub(crate) fn resolve(
    phase: PhaseKind,
    world: World,
    registry: ActorRegistry,
    proposals: &[Proposal],
) -> (World, ActorRegistry) {
    match phase {
        PhaseKind::Move => resolve_move(world, registry, proposals),
        PhaseKind::Attack => resolve_attack(world, registry, proposals),
        PhaseKind::Spawn => resolve_spawn(world, registry, proposals),
        PhaseKind::Heal => resolve_heal(world, registry, proposals),
    }
}

/// In-bounds moves replace the proposing actor; out-of-bounds moves are
/// silently dropped and the actor keeps its pre-phase state.
fn resolve_move(
    world: World,
    registry: ActorRegistry,
    proposals: &[Proposal],
) -> (World, ActorRegistry) {
    let mut registry = registry;
    for proposal in proposals.iter().rev() {
        let Proposal::Move(actor) = proposal else {
            continue;
        };
        if query::is_in_world(&world, actor.position()) {
            registry = registry.replaced(actor.clone());
        }
    }
    (world, registry)
}

/// Strikes apply sequentially against the progressively updated registry,
/// so removals take effect immediately and attacks compose within the
/// phase. Targets already gone are skipped.
fn resolve_attack(
    world: World,
    registry: ActorRegistry,
    proposals: &[Proposal],
) -> (World, ActorRegistry) {
    let mut registry = registry;
    for proposal in proposals.iter().rev() {
        let Proposal::Attack(strikes) = proposal else {
            continue;
        };
        for strike in strikes {
            let Some(target) = query::actor(&registry, strike.target()) else {
                continue;
            };
            if target.health().get() <= strike.amount() {
                registry = registry.without(strike.target());
            } else {
                let remaining = Health::new(target.health().get() - strike.amount());
                let survivor = target.with_health(remaining);
                registry = registry.replaced(survivor);
            }
        }
    }
    (world, registry)
}

/// Every spawn appends to the snapshot captured at phase entry, not to
/// the running fold result; when several sources spawn at once only the
/// proposal resolved last (the earliest registry entry) persists.
fn resolve_spawn(
    world: World,
    registry: ActorRegistry,
    proposals: &[Proposal],
) -> (World, ActorRegistry) {
    let snapshot = registry;
    let mut result = snapshot.clone();
    for proposal in proposals.iter().rev() {
        let Proposal::Spawn(actor) = proposal else {
            continue;
        };
        result = snapshot.appended(actor.clone());
    }
    (world, result)
}

/// Heals clamp at the target's maximum; missing targets are no-ops.
fn resolve_heal(
    world: World,
    registry: ActorRegistry,
    proposals: &[Proposal],
) -> (World, ActorRegistry) {
    let mut registry = registry;
    for proposal in proposals.iter().rev() {
        let Proposal::Heal(strikes) = proposal else {
            continue;
        };
        for strike in strikes {
            let Some(target) = query::actor(&registry, strike.target()) else {
                continue;
            };
            let restored = Health::new(target.health().get().saturating_add(strike.amount()));
            let healed = target.with_health(restored);
            registry = registry.replaced(healed);
        }
    }
    (world, registry)
}
