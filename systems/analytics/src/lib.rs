#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic battle analytics derived from registry snapshots.

use grid_siege_core::ActorKind;
use grid_siege_world::ActorRegistry;

/// Aggregated battlefield measurements for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickMetrics {
    /// Tick the metrics were captured after.
    pub tick: u64,
    /// Number of enemy actors on the field.
    pub enemies: usize,
    /// Number of tower actors on the field.
    pub towers: usize,
    /// Number of spawn sources on the field.
    pub spawners: usize,
    /// Number of goal actors on the field.
    pub goals: usize,
    /// Number of wall actors on the field.
    pub walls: usize,
    /// Summed health of the hostile side (enemies and spawners).
    pub hostile_health: u32,
    /// Summed health of the defending side (towers, goals, and walls).
    pub defence_health: u32,
}

/// Pure recorder that measures registries and keeps the published history.
#[derive(Clone, Debug, Default)]
pub struct Analytics {
    history: Vec<TickMetrics>,
}

impl Analytics {
    /// Creates a recorder with an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Measures the registry and appends the report to the history.
    pub fn record(&mut self, tick: u64, registry: &ActorRegistry) -> TickMetrics {
        let metrics = measure(tick, registry);
        self.history.push(metrics);
        metrics
    }

    /// Latest report recorded, if any.
    #[must_use]
    pub fn last_report(&self) -> Option<&TickMetrics> {
        self.history.last()
    }

    /// Every report recorded so far, in tick order.
    #[must_use]
    pub fn history(&self) -> &[TickMetrics] {
        &self.history
    }
}

/// Measures a registry snapshot without recording it.
#[must_use]
pub fn measure(tick: u64, registry: &ActorRegistry) -> TickMetrics {
    let mut metrics = TickMetrics {
        tick,
        enemies: 0,
        towers: 0,
        spawners: 0,
        goals: 0,
        walls: 0,
        hostile_health: 0,
        defence_health: 0,
    };

    for actor in registry.iter() {
        let health = actor.health().get();
        match actor.kind() {
            ActorKind::Enemy => {
                metrics.enemies += 1;
                metrics.hostile_health += health;
            }
            ActorKind::Spawner => {
                metrics.spawners += 1;
                metrics.hostile_health += health;
            }
            ActorKind::Tower => {
                metrics.towers += 1;
                metrics.defence_health += health;
            }
            ActorKind::Goal => {
                metrics.goals += 1;
                metrics.defence_health += health;
            }
            ActorKind::Wall | ActorKind::Unknown => {
                metrics.walls += 1;
                metrics.defence_health += health;
            }
        }
    }

    metrics
}

#[cfg(test)]
mod tests {
    use super::{measure, Analytics, TickMetrics};
    use grid_siege_core::{ActorId, Position};
    use grid_siege_world::units::{instantiate, Archetype};
    use grid_siege_world::ActorRegistry;

    fn sample_registry() -> ActorRegistry {
        ActorRegistry::from_actors(vec![
            instantiate(Archetype::Raider, ActorId::new(0), Position::new(1, 1)),
            instantiate(Archetype::Raider, ActorId::new(1), Position::new(2, 1)),
            instantiate(Archetype::Hive, ActorId::new(2), Position::new(0, 1)),
            instantiate(Archetype::Watchtower, ActorId::new(3), Position::new(4, 1)),
            instantiate(Archetype::Heart, ActorId::new(4), Position::new(5, 1)),
            instantiate(Archetype::Rampart, ActorId::new(5), Position::new(3, 0)),
        ])
    }

    #[test]
    fn measurements_match_a_hand_counted_registry() {
        let metrics = measure(9, &sample_registry());

        assert_eq!(
            metrics,
            TickMetrics {
                tick: 9,
                enemies: 2,
                towers: 1,
                spawners: 1,
                goals: 1,
                walls: 1,
                hostile_health: 12 + 12 + 60,
                defence_health: 20 + 40 + 50,
            }
        );
    }

    #[test]
    fn the_recorder_keeps_reports_in_tick_order() {
        let mut analytics = Analytics::new();
        assert!(analytics.last_report().is_none());

        let registry = sample_registry();
        let first = analytics.record(1, &registry);
        let second = analytics.record(2, &registry.without(ActorId::new(0)));

        assert_eq!(analytics.history(), &[first, second]);
        assert_eq!(analytics.last_report(), Some(&second));
        assert_eq!(second.enemies, 1);
    }

    #[test]
    fn an_empty_registry_measures_to_zero() {
        let metrics = measure(0, &ActorRegistry::default());
        assert_eq!(metrics.enemies, 0);
        assert_eq!(metrics.hostile_health, 0);
        assert_eq!(metrics.defence_health, 0);
    }
}
