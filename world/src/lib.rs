#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! World model for Grid Siege: the grid graph, the actor registry, and the
//! pure queries the simulation runs against both.
//!
//! The world is built once per session and stays structurally read-only;
//! actors are value-like records collected in an ordered registry that is
//! replaced wholesale on every mutation. All read access goes through the
//! [`query`] module so systems observe one consistent snapshot.

use grid_siege_core::{ActorId, ActorKind, Health, Position};
use thiserror::Error;

use crate::graph::Graph;
use crate::units::{instantiate, Archetype};

pub mod graph;
pub mod units;

/// Smallest world size that can host the seeded battlefield layout.
const MIN_LAYOUT_SIZE: Position = Position::new(7, 4);

/// The playing field: a grid graph plus its inclusive bounds.
#[derive(Clone, Debug)]
pub struct World {
    graph: Graph,
    size: Position,
}

impl World {
    /// Movement graph covering every cell of the world.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Largest coordinate on each axis; cells span `[0, size]` inclusively.
    #[must_use]
    pub const fn size(&self) -> Position {
        self.size
    }
}

/// One-time world construction for the session.
#[must_use]
pub fn build_world(size: Position) -> World {
    World {
        graph: Graph::build(size),
        size,
    }
}

/// Movement rule an actor may carry for the move phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveRule {
    /// Advance one step along a route to the nearest goal, holding
    /// position when no goal exists, no route exists, or the actor
    /// already stands beside the goal.
    SeekNearestGoal,
}

/// Attack rule an actor may carry for the attack phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AttackRule {
    /// Strike one uniformly random occupant of the given kind among the
    /// eight surrounding cells.
    Adjacent {
        /// Kind of actor the strike may select.
        target: ActorKind,
        /// Damage dealt by the strike.
        damage: u32,
    },
    /// Strike one uniformly random actor of the given kind within the
    /// Euclidean radius.
    Ranged {
        /// Kind of actor the strike may select.
        target: ActorKind,
        /// Selection radius measured in cells.
        radius: f64,
        /// Damage dealt by the strike.
        damage: u32,
    },
    /// Strike every actor of the given kind within the Euclidean radius.
    Burst {
        /// Kind of actor the strikes select.
        target: ActorKind,
        /// Selection radius measured in cells.
        radius: f64,
        /// Damage dealt to each struck actor.
        damage: u32,
    },
    /// Strike the actor itself; spawn sources decay through this rule.
    Expend {
        /// Health expended per tick.
        amount: u32,
    },
}

/// Spawn rule a spawn source carries for the spawn phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpawnRule {
    interval: u32,
    unit: Archetype,
}

impl SpawnRule {
    /// Creates a spawn rule emitting `unit` whenever the carrier's health
    /// is divisible by `interval`.
    #[must_use]
    pub const fn new(interval: u32, unit: Archetype) -> Self {
        Self { interval, unit }
    }

    /// Health divisor that gates spawning.
    #[must_use]
    pub const fn interval(&self) -> u32 {
        self.interval
    }

    /// Archetype the rule emits.
    #[must_use]
    pub const fn unit(&self) -> Archetype {
        self.unit
    }
}

/// Heal rule an actor may carry for the heal phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HealRule {
    amount: u32,
}

impl HealRule {
    /// Creates a fixed self-heal rule.
    #[must_use]
    pub const fn new(amount: u32) -> Self {
        Self { amount }
    }

    /// Health restored per tick, clamped at the carrier's maximum.
    #[must_use]
    pub const fn amount(&self) -> u32 {
        self.amount
    }
}

/// Sparse per-phase rule set carried by an actor.
///
/// The phase engine dispatches on phase identity: an actor without a rule
/// for the running phase simply produces no proposal.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Capabilities {
    movement: Option<MoveRule>,
    attack: Option<AttackRule>,
    spawn: Option<SpawnRule>,
    heal: Option<HealRule>,
}

impl Capabilities {
    /// Assembles a capability set from its optional per-phase rules.
    #[must_use]
    pub const fn new(
        movement: Option<MoveRule>,
        attack: Option<AttackRule>,
        spawn: Option<SpawnRule>,
        heal: Option<HealRule>,
    ) -> Self {
        Self {
            movement,
            attack,
            spawn,
            heal,
        }
    }

    /// Rule evaluated during the move phase, if any.
    #[must_use]
    pub const fn movement(&self) -> Option<MoveRule> {
        self.movement
    }

    /// Rule evaluated during the attack phase, if any.
    #[must_use]
    pub const fn attack(&self) -> Option<AttackRule> {
        self.attack
    }

    /// Rule evaluated during the spawn phase, if any.
    #[must_use]
    pub const fn spawn(&self) -> Option<SpawnRule> {
        self.spawn
    }

    /// Rule evaluated during the heal phase, if any.
    #[must_use]
    pub const fn heal(&self) -> Option<HealRule> {
        self.heal
    }
}

/// Value-like record describing one occupant of the field.
///
/// Every mutation produces a new record; the registry holding actors is
/// itself replaced wholesale on every change. Several actors may legally
/// occupy the same position.
#[derive(Clone, Debug, PartialEq)]
pub struct Actor {
    id: ActorId,
    position: Position,
    kind: ActorKind,
    name: &'static str,
    health: Health,
    max_health: Health,
    capabilities: Capabilities,
}

impl Actor {
    /// Creates a new actor at full health.
    #[must_use]
    pub const fn new(
        id: ActorId,
        position: Position,
        kind: ActorKind,
        name: &'static str,
        max_health: Health,
        capabilities: Capabilities,
    ) -> Self {
        Self {
            id,
            position,
            kind,
            name,
            health: max_health,
            max_health,
            capabilities,
        }
    }

    /// Unique identifier of the actor.
    #[must_use]
    pub const fn id(&self) -> ActorId {
        self.id
    }

    /// Cell the actor currently occupies.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Classification of the actor.
    #[must_use]
    pub const fn kind(&self) -> ActorKind {
        self.kind
    }

    /// Display name of the actor's template.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Current health of the actor.
    #[must_use]
    pub const fn health(&self) -> Health {
        self.health
    }

    /// Upper bound the actor's health never exceeds.
    #[must_use]
    pub const fn max_health(&self) -> Health {
        self.max_health
    }

    /// Per-phase rule set of the actor.
    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Returns a copy of the actor relocated to the provided position.
    #[must_use]
    pub fn with_position(&self, position: Position) -> Actor {
        let mut actor = self.clone();
        actor.position = position;
        actor
    }

    /// Returns a copy of the actor with the provided health, clamped to
    /// the actor's maximum so the `health ≤ max_health` invariant holds.
    #[must_use]
    pub fn with_health(&self, health: Health) -> Actor {
        let mut actor = self.clone();
        actor.health = Health::new(health.get().min(self.max_health.get()));
        actor
    }
}

/// Ordered collection of actors; insertion order is the registry order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActorRegistry {
    actors: Vec<Actor>,
}

impl ActorRegistry {
    /// Creates a registry from actors already in insertion order.
    #[must_use]
    pub fn from_actors(actors: Vec<Actor>) -> Self {
        Self { actors }
    }

    /// Iterator over the actors in registry order.
    pub fn iter(&self) -> std::slice::Iter<'_, Actor> {
        self.actors.iter()
    }

    /// Number of actors currently registered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Reports whether the registry holds no actors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Returns a new registry with the same-id actor substituted in place.
    ///
    /// Caller contract: the id is present. An absent id leaves the
    /// returned registry identical and trips a debug assertion.
    #[must_use]
    pub fn replaced(&self, actor: Actor) -> ActorRegistry {
        let mut actors = self.actors.clone();
        match actors.iter().position(|entry| entry.id == actor.id) {
            Some(index) => actors[index] = actor,
            None => debug_assert!(false, "replaced called with unknown actor id"),
        }
        Self { actors }
    }

    /// Returns a new registry without the actor carrying the provided id.
    #[must_use]
    pub fn without(&self, id: ActorId) -> ActorRegistry {
        let actors = self
            .actors
            .iter()
            .filter(|actor| actor.id != id)
            .cloned()
            .collect();
        Self { actors }
    }

    /// Returns a new registry with the actor appended at the back.
    #[must_use]
    pub fn appended(&self, actor: Actor) -> ActorRegistry {
        let mut actors = self.actors.clone();
        actors.push(actor);
        Self { actors }
    }
}

/// Monotonic actor id allocator threaded explicitly through construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    /// Creates an allocator starting at id zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    /// Hands out the next unique id.
    pub fn allocate(&mut self) -> ActorId {
        let id = ActorId::new(self.next);
        self.next += 1;
        id
    }
}

/// Reasons the seeded battlefield cannot be placed into a world.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// The world is too small for the rampart line, the breach, and the
    /// flanking towers.
    #[error(
        "world size ({width}, {height}) is below the seeded layout minimum ({min_width}, {min_height})",
        width = .size.x(),
        height = .size.y(),
        min_width = .minimum.x(),
        min_height = .minimum.y()
    )]
    WorldTooSmall {
        /// Size of the rejected world.
        size: Position,
        /// Smallest size the layout accepts.
        minimum: Position,
    },
}

/// Seeds the fixed initial placement: the heart on the east edge, the
/// hive on the west edge, a rampart line with a single breach, flanking
/// towers, and a vanguard of enemies.
pub fn initialize_actors(
    world: &World,
    ids: &mut IdAllocator,
) -> Result<ActorRegistry, LayoutError> {
    let size = world.size();
    if size.x() < MIN_LAYOUT_SIZE.x() || size.y() < MIN_LAYOUT_SIZE.y() {
        return Err(LayoutError::WorldTooSmall {
            size,
            minimum: MIN_LAYOUT_SIZE,
        });
    }

    let mid = size.y() / 2;
    let mut actors = Vec::new();

    actors.push(instantiate(
        Archetype::Heart,
        ids.allocate(),
        Position::new(size.x(), mid),
    ));
    actors.push(instantiate(
        Archetype::Hive,
        ids.allocate(),
        Position::new(0, mid),
    ));

    // Rampart line two columns before the heart, breached at mid height.
    let rampart_column = size.x() - 2;
    for y in 0..=size.y() {
        if y == mid {
            continue;
        }
        actors.push(instantiate(
            Archetype::Rampart,
            ids.allocate(),
            Position::new(rampart_column, y),
        ));
    }

    actors.push(instantiate(
        Archetype::Watchtower,
        ids.allocate(),
        Position::new(size.x() - 1, mid - 1),
    ));
    actors.push(instantiate(
        Archetype::Watchtower,
        ids.allocate(),
        Position::new(size.x() - 1, mid + 1),
    ));
    actors.push(instantiate(
        Archetype::Mortar,
        ids.allocate(),
        Position::new(size.x() - 3, mid - 1),
    ));

    actors.push(instantiate(
        Archetype::Raider,
        ids.allocate(),
        Position::new(1, mid - 1),
    ));
    actors.push(instantiate(
        Archetype::Brute,
        ids.allocate(),
        Position::new(1, mid + 1),
    ));

    Ok(ActorRegistry::from_actors(actors))
}

/// Query functions that provide read-only access to world and registry.
pub mod query {
    use grid_siege_core::{ActorId, ActorKind, Position};

    use super::{Actor, ActorRegistry, World};

    /// Reports whether the position lies within the world's inclusive
    /// bounds `[0, size]` on both axes.
    #[must_use]
    pub fn is_in_world(world: &World, position: Position) -> bool {
        position.x() >= 0
            && position.x() <= world.size().x()
            && position.y() >= 0
            && position.y() <= world.size().y()
    }

    /// First actor carrying the provided id, if any.
    ///
    /// Absence is an expected outcome: strike targets removed earlier in
    /// the same phase resolve to `None` and are skipped.
    #[must_use]
    pub fn actor(registry: &ActorRegistry, id: ActorId) -> Option<&Actor> {
        registry.iter().find(|actor| actor.id() == id)
    }

    /// All actors of the provided kind, in registry order.
    #[must_use]
    pub fn of_kind(registry: &ActorRegistry, kind: ActorKind) -> Vec<&Actor> {
        registry.iter().filter(|actor| actor.kind() == kind).collect()
    }

    /// Actors within the Euclidean radius of the origin actor, excluding
    /// the origin itself, in registry order.
    #[must_use]
    pub fn within_radius<'a>(
        registry: &'a ActorRegistry,
        origin: &Actor,
        radius: f64,
    ) -> Vec<&'a Actor> {
        registry
            .iter()
            .filter(|actor| actor.id() != origin.id())
            .filter(|actor| actor.position().distance(origin.position()) <= radius)
            .collect()
    }

    /// Occupants of the eight cells surrounding the origin actor's cell,
    /// diagonals included.
    ///
    /// This neighbourhood drives local interactions and is deliberately
    /// wider than the 4-connected movement graph.
    #[must_use]
    pub fn adjacent_to<'a>(registry: &'a ActorRegistry, origin: &Actor) -> Vec<&'a Actor> {
        registry
            .iter()
            .filter(|actor| actor.id() != origin.id())
            .filter(|actor| actor.position().chebyshev_distance(origin.position()) == 1)
            .collect()
    }

    /// Nearest goal-kind actor to the origin; equidistant candidates
    /// resolve to the first encountered in registry order.
    #[must_use]
    pub fn nearest_goal<'a>(registry: &'a ActorRegistry, origin: &Actor) -> Option<&'a Actor> {
        let mut best: Option<(&Actor, f64)> = None;
        for candidate in registry.iter() {
            if candidate.kind() != ActorKind::Goal {
                continue;
            }
            let distance = candidate.position().distance(origin.position());
            let closer = match best {
                None => true,
                Some((_, best_distance)) => distance < best_distance,
            };
            if closer {
                best = Some((candidate, distance));
            }
        }
        best.map(|(actor, _)| actor)
    }

    /// Reports whether enemies may traverse the cell: true when every
    /// occupant is an enemy or a goal, and trivially true for empty cells.
    #[must_use]
    pub fn is_walkable(registry: &ActorRegistry, position: Position) -> bool {
        registry
            .iter()
            .filter(|actor| actor.position() == position)
            .all(|actor| matches!(actor.kind(), ActorKind::Enemy | ActorKind::Goal))
    }
}

#[cfg(test)]
mod tests {
    use super::{
        build_world, initialize_actors, query, units::Archetype, units::instantiate,
        ActorRegistry, IdAllocator, LayoutError,
    };
    use grid_siege_core::{ActorId, ActorKind, Health, Position};

    fn actor_at(archetype: Archetype, id: u32, x: i32, y: i32) -> super::Actor {
        instantiate(archetype, ActorId::new(id), Position::new(x, y))
    }

    #[test]
    fn world_bounds_are_inclusive() {
        let world = build_world(Position::new(4, 3));

        assert!(query::is_in_world(&world, Position::new(0, 0)));
        assert!(query::is_in_world(&world, Position::new(4, 3)));
        assert!(query::is_in_world(&world, Position::new(2, 1)));

        assert!(!query::is_in_world(&world, Position::new(-1, 0)));
        assert!(!query::is_in_world(&world, Position::new(0, -1)));
        assert!(!query::is_in_world(&world, Position::new(5, 0)));
        assert!(!query::is_in_world(&world, Position::new(0, 4)));
    }

    #[test]
    fn replaced_preserves_registry_order() {
        let registry = ActorRegistry::from_actors(vec![
            actor_at(Archetype::Raider, 0, 1, 1),
            actor_at(Archetype::Raider, 1, 2, 2),
            actor_at(Archetype::Raider, 2, 3, 3),
        ]);

        let moved = actor_at(Archetype::Raider, 1, 5, 5);
        let updated = registry.replaced(moved);

        let ids: Vec<u32> = updated.iter().map(|actor| actor.id().get()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        let relocated = query::actor(&updated, ActorId::new(1)).expect("actor present");
        assert_eq!(relocated.position(), Position::new(5, 5));
    }

    #[test]
    fn without_drops_exactly_one_id() {
        let registry = ActorRegistry::from_actors(vec![
            actor_at(Archetype::Raider, 0, 1, 1),
            actor_at(Archetype::Raider, 1, 2, 2),
        ]);

        let updated = registry.without(ActorId::new(0));
        assert_eq!(updated.len(), 1);
        assert!(query::actor(&updated, ActorId::new(0)).is_none());
        assert!(query::actor(&updated, ActorId::new(1)).is_some());
    }

    #[test]
    fn appended_keeps_insertion_order() {
        let registry = ActorRegistry::from_actors(vec![actor_at(Archetype::Raider, 0, 1, 1)]);
        let updated = registry.appended(actor_at(Archetype::Brute, 1, 2, 2));

        let ids: Vec<u32> = updated.iter().map(|actor| actor.id().get()).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn with_health_clamps_to_the_maximum() {
        let raider = actor_at(Archetype::Raider, 0, 1, 1);
        let overhealed = raider.with_health(Health::new(1_000));
        assert_eq!(overhealed.health(), raider.max_health());

        let wounded = raider.with_health(Health::new(3));
        assert_eq!(wounded.health(), Health::new(3));
    }

    #[test]
    fn within_radius_excludes_self_and_respects_the_boundary() {
        let origin = actor_at(Archetype::Watchtower, 0, 0, 0);
        let registry = ActorRegistry::from_actors(vec![
            origin.clone(),
            actor_at(Archetype::Raider, 1, 2, 0),
            actor_at(Archetype::Raider, 2, 2, 1),
            actor_at(Archetype::Raider, 3, 3, 0),
        ]);

        let nearby = query::within_radius(&registry, &origin, 2.0);
        let ids: Vec<u32> = nearby.iter().map(|actor| actor.id().get()).collect();
        assert_eq!(ids, vec![1], "radius 2 includes (2,0) but not (2,1) or (3,0)");
    }

    #[test]
    fn adjacency_includes_diagonals_and_excludes_the_own_cell() {
        let origin = actor_at(Archetype::Heart, 0, 2, 2);
        let registry = ActorRegistry::from_actors(vec![
            origin.clone(),
            actor_at(Archetype::Raider, 1, 3, 3),
            actor_at(Archetype::Raider, 2, 2, 1),
            actor_at(Archetype::Raider, 3, 2, 2),
            actor_at(Archetype::Raider, 4, 4, 2),
        ]);

        let neighbours = query::adjacent_to(&registry, &origin);
        let ids: Vec<u32> = neighbours.iter().map(|actor| actor.id().get()).collect();
        assert_eq!(ids, vec![1, 2], "co-occupants and distant actors excluded");
    }

    #[test]
    fn nearest_goal_breaks_ties_by_registry_order() {
        let seeker = actor_at(Archetype::Raider, 0, 2, 2);
        let registry = ActorRegistry::from_actors(vec![
            seeker.clone(),
            actor_at(Archetype::Heart, 1, 4, 2),
            actor_at(Archetype::Heart, 2, 0, 2),
            actor_at(Archetype::Heart, 3, 2, 3),
        ]);

        let nearest = query::nearest_goal(&registry, &seeker).expect("a goal exists");
        assert_eq!(nearest.id(), ActorId::new(3));

        let tied = ActorRegistry::from_actors(vec![
            seeker.clone(),
            actor_at(Archetype::Heart, 5, 4, 2),
            actor_at(Archetype::Heart, 6, 0, 2),
        ]);
        let first = query::nearest_goal(&tied, &seeker).expect("a goal exists");
        assert_eq!(first.id(), ActorId::new(5), "equidistant goals keep scan order");
    }

    #[test]
    fn nearest_goal_is_absent_without_goals() {
        let seeker = actor_at(Archetype::Raider, 0, 2, 2);
        let registry = ActorRegistry::from_actors(vec![seeker.clone()]);
        assert!(query::nearest_goal(&registry, &seeker).is_none());
    }

    #[test]
    fn walkability_admits_enemies_and_goals_only() {
        let cell = Position::new(3, 3);
        let empty = ActorRegistry::default();
        assert!(query::is_walkable(&empty, cell));

        let friendly = ActorRegistry::from_actors(vec![
            actor_at(Archetype::Raider, 0, 3, 3),
            actor_at(Archetype::Heart, 1, 3, 3),
        ]);
        assert!(query::is_walkable(&friendly, cell));

        let blocked = ActorRegistry::from_actors(vec![actor_at(Archetype::Rampart, 0, 3, 3)]);
        assert!(!query::is_walkable(&blocked, cell));

        let mixed = ActorRegistry::from_actors(vec![
            actor_at(Archetype::Raider, 0, 3, 3),
            actor_at(Archetype::Watchtower, 1, 3, 3),
        ]);
        assert!(!query::is_walkable(&mixed, cell));
    }

    #[test]
    fn seeded_layout_places_both_objectives_and_the_breach() {
        let world = build_world(Position::new(11, 6));
        let mut ids = IdAllocator::new();
        let registry = initialize_actors(&world, &mut ids).expect("layout fits");

        let goals = query::of_kind(&registry, ActorKind::Goal);
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].position(), Position::new(11, 3));

        let spawners = query::of_kind(&registry, ActorKind::Spawner);
        assert_eq!(spawners.len(), 1);
        assert_eq!(spawners[0].position(), Position::new(0, 3));

        let walls = query::of_kind(&registry, ActorKind::Wall);
        assert_eq!(walls.len(), 6, "rampart line minus the breach");
        assert!(walls.iter().all(|wall| wall.position().x() == 9));
        assert!(query::is_walkable(&registry, Position::new(9, 3)));

        assert_eq!(query::of_kind(&registry, ActorKind::Tower).len(), 3);
        assert_eq!(query::of_kind(&registry, ActorKind::Enemy).len(), 2);
    }

    #[test]
    fn seeded_layout_ids_are_unique_and_monotonic() {
        let world = build_world(Position::new(11, 6));
        let mut ids = IdAllocator::new();
        let registry = initialize_actors(&world, &mut ids).expect("layout fits");

        let allocated: Vec<u32> = registry.iter().map(|actor| actor.id().get()).collect();
        let expected: Vec<u32> = (0..allocated.len() as u32).collect();
        assert_eq!(allocated, expected);

        let next = ids.allocate();
        assert_eq!(next.get(), allocated.len() as u32);
    }

    #[test]
    fn undersized_worlds_are_rejected() {
        let world = build_world(Position::new(3, 2));
        let mut ids = IdAllocator::new();
        let error = initialize_actors(&world, &mut ids).expect_err("layout cannot fit");
        assert_eq!(
            error,
            LayoutError::WorldTooSmall {
                size: Position::new(3, 2),
                minimum: Position::new(7, 4),
            }
        );
    }
}
