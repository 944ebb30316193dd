//! Archetype templates for every unit fielded by the skirmish.
//!
//! Archetypes are data: fixed stats plus the subset of per-phase rules the
//! unit carries. The phase engine interprets the rules; this module only
//! declares them and stamps out actors.

use grid_siege_core::{ActorId, ActorKind, Health, Position};

use crate::{Actor, AttackRule, Capabilities, HealRule, MoveRule, SpawnRule};

/// Identifier of a unit template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Archetype {
    /// Light hostile unit that advances on the goal.
    Raider,
    /// Heavy hostile unit with self-regeneration.
    Brute,
    /// Single-target defender with a medium firing radius.
    Watchtower,
    /// Splash defender that strikes every hostile in a short radius.
    Mortar,
    /// Spawn source that emits raiders while it lasts.
    Hive,
    /// The objective the enemies besiege.
    Heart,
    /// Inert obstacle segment.
    Rampart,
}

impl Archetype {
    /// Display name of the archetype.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Raider => "raider",
            Self::Brute => "brute",
            Self::Watchtower => "watchtower",
            Self::Mortar => "mortar",
            Self::Hive => "hive",
            Self::Heart => "heart",
            Self::Rampart => "rampart",
        }
    }

    /// Kind the archetype registers as.
    #[must_use]
    pub const fn kind(self) -> ActorKind {
        match self {
            Self::Raider | Self::Brute => ActorKind::Enemy,
            Self::Watchtower | Self::Mortar => ActorKind::Tower,
            Self::Hive => ActorKind::Spawner,
            Self::Heart => ActorKind::Goal,
            Self::Rampart => ActorKind::Wall,
        }
    }

    /// Maximum health the archetype starts with.
    #[must_use]
    pub const fn max_health(self) -> Health {
        match self {
            Self::Raider => Health::new(12),
            Self::Brute => Health::new(30),
            Self::Watchtower => Health::new(20),
            Self::Mortar => Health::new(16),
            Self::Hive => Health::new(60),
            Self::Heart => Health::new(40),
            Self::Rampart => Health::new(50),
        }
    }

    /// Per-phase rule subset the archetype carries.
    #[must_use]
    pub const fn capabilities(self) -> Capabilities {
        match self {
            Self::Raider => Capabilities::new(
                Some(MoveRule::SeekNearestGoal),
                Some(AttackRule::Adjacent {
                    target: ActorKind::Goal,
                    damage: 2,
                }),
                None,
                None,
            ),
            Self::Brute => Capabilities::new(
                Some(MoveRule::SeekNearestGoal),
                Some(AttackRule::Adjacent {
                    target: ActorKind::Goal,
                    damage: 5,
                }),
                None,
                Some(HealRule::new(1)),
            ),
            Self::Watchtower => Capabilities::new(
                None,
                Some(AttackRule::Ranged {
                    target: ActorKind::Enemy,
                    radius: 3.0,
                    damage: 3,
                }),
                None,
                None,
            ),
            Self::Mortar => Capabilities::new(
                None,
                Some(AttackRule::Burst {
                    target: ActorKind::Enemy,
                    radius: 2.0,
                    damage: 1,
                }),
                None,
                None,
            ),
            Self::Hive => Capabilities::new(
                None,
                Some(AttackRule::Expend { amount: 1 }),
                Some(SpawnRule::new(6, Archetype::Raider)),
                None,
            ),
            Self::Heart => Capabilities::new(None, None, None, Some(HealRule::new(1))),
            Self::Rampart => Capabilities::new(None, None, None, None),
        }
    }
}

/// Stamps out a fresh actor of the provided archetype at full health.
#[must_use]
pub fn instantiate(archetype: Archetype, id: ActorId, position: Position) -> Actor {
    Actor::new(
        id,
        position,
        archetype.kind(),
        archetype.name(),
        archetype.max_health(),
        archetype.capabilities(),
    )
}
