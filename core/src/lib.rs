#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Grid Siege engine.
//!
//! This crate defines the value types that connect the world model, the
//! pathfinding system, the phase engine, and adapters: grid coordinates,
//! actor identity and classification, health, attack/heal strikes, the
//! fixed phase vocabulary, and the terminal game outcome.

use serde::{Deserialize, Serialize};

/// Location of a single grid cell expressed as signed integer coordinates.
///
/// Coordinates are signed so that positions one step outside the world
/// remain representable; the world's containment test is what decides
/// whether such a position is legal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a new position from its coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate of the position.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical coordinate of the position.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the position shifted by the provided deltas.
    #[must_use]
    pub const fn translated(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Computes the Euclidean distance between two positions.
    #[must_use]
    pub fn distance(self, other: Position) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        (dx * dx + dy * dy).sqrt()
    }

    /// Computes the Chebyshev distance between two positions.
    ///
    /// Two distinct positions are 8-neighbourhood adjacent exactly when
    /// this distance equals one.
    #[must_use]
    pub fn chebyshev_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

/// Unique identifier assigned to an actor.
///
/// Identifiers are allocated monotonically by the world's id allocator and
/// are never reused within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(u32);

impl ActorId {
    /// Creates a new actor identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Classification of an actor within the skirmish.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    /// Mobile hostile unit advancing toward the goal.
    Enemy,
    /// Stationary defender.
    Tower,
    /// Source that periodically emits new enemies.
    Spawner,
    /// Objective the enemies try to destroy.
    Goal,
    /// Inert obstacle.
    Wall,
    /// Unclassified occupant; blocks movement like a wall.
    Unknown,
}

/// Amount of vitality an actor currently holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Health(u32);

impl Health {
    /// Creates a new health value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric health value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Single attack or heal application: a target and an amount.
///
/// Attack proposals and heal proposals both carry sequences of strikes; a
/// proposal naming several targets expresses splash effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Strike {
    target: ActorId,
    amount: u32,
}

impl Strike {
    /// Creates a new strike against the provided target.
    #[must_use]
    pub const fn new(target: ActorId, amount: u32) -> Self {
        Self { target, amount }
    }

    /// Actor the strike applies to.
    #[must_use]
    pub const fn target(&self) -> ActorId {
        self.target
    }

    /// Damage dealt or health restored by the strike.
    #[must_use]
    pub const fn amount(&self) -> u32 {
        self.amount
    }
}

/// Names of the four simulation phases.
///
/// The engine's `compute_phases` fixes the execution order to
/// move → attack → spawn → heal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseKind {
    /// Actors reposition along their planned routes.
    Move,
    /// Actors deal damage to their chosen targets.
    Attack,
    /// Spawn sources emit new actors.
    Spawn,
    /// Actors regenerate health.
    Heal,
}

impl PhaseKind {
    /// Canonical lowercase name of the phase.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::Attack => "attack",
            Self::Spawn => "spawn",
            Self::Heal => "heal",
        }
    }
}

/// Terminal condition of the skirmish as observed from a registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Both sides still field actors; the simulation continues.
    Ongoing,
    /// No enemy and no spawner remains on the field.
    TowerVictory,
    /// No goal remains on the field.
    EnemyVictory,
}
