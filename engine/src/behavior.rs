//! Proposal collection: evaluates each actor's per-phase rule against the
//! phase's input snapshot.
//!
//! Every actor sees the same snapshot, so no behaviour can observe
//! another actor's not-yet-resolved proposal for the running phase.

use grid_siege_core::{PhaseKind, Strike};
use grid_siege_system_pathfinding::find_path;
use grid_siege_world::units::instantiate;
use grid_siege_world::{query, Actor, ActorRegistry, AttackRule, MoveRule, World};
use rand::Rng;

use crate::TickContext;

/// An actor's declared intent for the current phase, not yet applied.
#[derive(Clone, Debug, PartialEq)]
pub enum Proposal {
    /// Full replacement actor carrying the proposed position.
    Move(Actor),
    /// Damage applications against one or more targets.
    Attack(Vec<Strike>),
    /// New actor to insert into the registry.
    Spawn(Actor),
    /// Heal applications against one or more targets.
    Heal(Vec<Strike>),
}

/// Collects one optional proposal per actor, in registry order.
pub(crate) fn collect_proposals(
    phase: PhaseKind,
    world: &World,
    registry: &ActorRegistry,
    context: &mut TickContext,
) -> Vec<Proposal> {
    let mut proposals = Vec::new();
    for actor in registry.iter() {
        if let Some(proposal) = proposal_for(actor, phase, world, registry, context) {
            proposals.push(proposal);
        }
    }
    proposals
}

fn proposal_for(
    actor: &Actor,
    phase: PhaseKind,
    world: &World,
    registry: &ActorRegistry,
    context: &mut TickContext,
) -> Option<Proposal> {
    match phase {
        PhaseKind::Move => move_proposal(actor, world, registry),
        PhaseKind::Attack => attack_proposal(actor, registry, context),
        PhaseKind::Spawn => spawn_proposal(actor, context),
        PhaseKind::Heal => heal_proposal(actor),
    }
}

/// Plans one step toward the nearest goal.
///
/// The actor holds position when no goal exists, when no route exists,
/// and when it already stands beside the goal; reaching the goal's own
/// cell would put it outside its strike neighbourhood.
fn move_proposal(actor: &Actor, world: &World, registry: &ActorRegistry) -> Option<Proposal> {
    let MoveRule::SeekNearestGoal = actor.capabilities().movement()?;
    let goal = query::nearest_goal(registry, actor)?;

    let route = find_path(actor.position(), goal.position(), world.graph(), registry);
    let next = route.get(1).copied()?;
    if next == goal.position() {
        return None;
    }

    Some(Proposal::Move(actor.with_position(next)))
}

fn attack_proposal(
    actor: &Actor,
    registry: &ActorRegistry,
    context: &mut TickContext,
) -> Option<Proposal> {
    let strikes = match actor.capabilities().attack()? {
        AttackRule::Adjacent { target, damage } => {
            let candidates: Vec<&Actor> = query::adjacent_to(registry, actor)
                .into_iter()
                .filter(|candidate| candidate.kind() == target)
                .collect();
            let chosen = pick_uniform(&candidates, context)?;
            vec![Strike::new(chosen.id(), damage)]
        }
        AttackRule::Ranged {
            target,
            radius,
            damage,
        } => {
            let candidates: Vec<&Actor> = query::within_radius(registry, actor, radius)
                .into_iter()
                .filter(|candidate| candidate.kind() == target)
                .collect();
            let chosen = pick_uniform(&candidates, context)?;
            vec![Strike::new(chosen.id(), damage)]
        }
        AttackRule::Burst {
            target,
            radius,
            damage,
        } => {
            let strikes: Vec<Strike> = query::within_radius(registry, actor, radius)
                .into_iter()
                .filter(|candidate| candidate.kind() == target)
                .map(|candidate| Strike::new(candidate.id(), damage))
                .collect();
            if strikes.is_empty() {
                return None;
            }
            strikes
        }
        AttackRule::Expend { amount } => vec![Strike::new(actor.id(), amount)],
    };

    Some(Proposal::Attack(strikes))
}

fn spawn_proposal(actor: &Actor, context: &mut TickContext) -> Option<Proposal> {
    let rule = actor.capabilities().spawn()?;
    if rule.interval() == 0 || actor.health().get() % rule.interval() != 0 {
        return None;
    }

    let id = context.ids().allocate();
    Some(Proposal::Spawn(instantiate(
        rule.unit(),
        id,
        actor.position(),
    )))
}

fn heal_proposal(actor: &Actor) -> Option<Proposal> {
    let rule = actor.capabilities().heal()?;
    Some(Proposal::Heal(vec![Strike::new(actor.id(), rule.amount())]))
}

fn pick_uniform<'a>(candidates: &[&'a Actor], context: &mut TickContext) -> Option<&'a Actor> {
    if candidates.is_empty() {
        return None;
    }
    let index = context.rng().gen_range(0..candidates.len());
    Some(candidates[index])
}
