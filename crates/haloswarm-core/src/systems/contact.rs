//! Contact damage from enemies touching the player.
//!
//! Overlap detection belongs to the host physics engine, which reports
//! contacts as they begin and end. While at least one enemy is touching, the
//! system hits the unit every `collision_delay` seconds with the contact
//! damage of every touching enemy. The first hit of a fresh contact lands
//! immediately.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{FrameContext, FrameSystem, MAX_CATCH_UP_PER_FRAME};
use crate::error::{ensure_finite, ConfigError};
use crate::event::Event;
use crate::stats::drain_cooldown;
use crate::unit::Unit;

/// Host-assigned identifier of an enemy.
///
/// # Ordering
///
/// Contacts are applied in ascending ID order, which keeps the event order
/// reproducible.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EnemyId(u64);

impl EnemyId {
    /// Wraps a raw host identifier.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EnemyId({})", self.0)
    }
}

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EnemyId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// Applies periodic contact damage from touching enemies.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerCollisionSystem {
    delay: f32,
    elapsed: f32,
    contacts: BTreeMap<EnemyId, f32>,
}

impl PlayerCollisionSystem {
    /// Creates the system with `delay` seconds between hits.
    ///
    /// # Errors
    ///
    /// Rejects `delay <= 0` and non-finite values.
    pub fn new(delay: f32) -> Result<Self, ConfigError> {
        let delay = ensure_finite("collisionDelay", delay)?;
        if delay <= 0.0 {
            return Err(ConfigError::NonPositiveCollisionDelay(delay));
        }
        Ok(Self {
            delay,
            elapsed: delay,
            contacts: BTreeMap::new(),
        })
    }

    /// Records that `enemy` started touching the player.
    ///
    /// Reporting an enemy already in contact updates its damage.
    pub fn begin_contact(&mut self, enemy: EnemyId, damage: f32) {
        if damage.is_finite() && damage >= 0.0 {
            self.contacts.insert(enemy, damage);
        }
    }

    /// Records that `enemy` stopped touching the player (or died).
    pub fn end_contact(&mut self, enemy: EnemyId) {
        self.contacts.remove(&enemy);
    }

    /// Drops every contact.
    pub fn clear(&mut self) {
        self.contacts.clear();
    }

    /// Number of enemies currently touching.
    #[must_use]
    pub fn contact_count(&self) -> usize {
        self.contacts.len()
    }

    /// Seconds between hits.
    #[must_use]
    pub const fn delay(&self) -> f32 {
        self.delay
    }
}

impl FrameSystem for PlayerCollisionSystem {
    fn name(&self) -> &str {
        "player_collision"
    }

    fn tick(&mut self, ctx: &FrameContext, unit: &mut Unit) -> Vec<Event> {
        let mut events = vec![];
        if !ctx.delta.is_finite() || ctx.delta < 0.0 {
            return events;
        }
        if self.contacts.is_empty() {
            // Bank at most one hit so a new contact lands at once.
            self.elapsed = (self.elapsed + ctx.delta).min(self.delay);
            return events;
        }

        self.elapsed += ctx.delta;
        let rounds = drain_cooldown(&mut self.elapsed, self.delay, MAX_CATCH_UP_PER_FRAME);
        for _ in 0..rounds {
            for (&enemy, &damage) in &self.contacts {
                debug!(%enemy, damage, frame = ctx.frame, "contact hit");
                events.extend(unit.apply_damage(damage));
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::spawn_idle_unit;

    fn ctx(delta: f32) -> FrameContext {
        FrameContext { frame: 0, delta }
    }

    #[test]
    fn new_rejects_non_positive_delay() {
        assert_eq!(
            PlayerCollisionSystem::new(0.0),
            Err(ConfigError::NonPositiveCollisionDelay(0.0))
        );
    }

    #[test]
    fn no_contacts_no_damage() {
        let mut system = PlayerCollisionSystem::new(0.5).unwrap();
        let mut unit = spawn_idle_unit();
        assert!(system.tick(&ctx(2.0), &mut unit).is_empty());
        assert_eq!(unit.health().current(), unit.health().max());
    }

    #[test]
    fn first_contact_hits_immediately_then_waits() {
        let mut system = PlayerCollisionSystem::new(0.5).unwrap();
        let mut unit = spawn_idle_unit();
        system.begin_contact(EnemyId::new(1), 10.0);

        let events = system.tick(&ctx(0.016), &mut unit);
        assert_eq!(
            events,
            vec![Event::Damaged {
                amount: 10.0,
                remaining: 90.0
            }]
        );

        // Still cooling down.
        assert!(system.tick(&ctx(0.3), &mut unit).is_empty());
        assert_eq!(system.tick(&ctx(0.2), &mut unit).len(), 1);
        assert_eq!(unit.health().current(), 80.0);
    }

    #[test]
    fn every_touching_enemy_hits_in_id_order() {
        let mut system = PlayerCollisionSystem::new(1.0).unwrap();
        let mut unit = spawn_idle_unit();
        system.begin_contact(EnemyId::new(7), 5.0);
        system.begin_contact(EnemyId::new(2), 3.0);

        let events = system.tick(&ctx(0.1), &mut unit);
        assert_eq!(
            events,
            vec![
                Event::Damaged {
                    amount: 3.0,
                    remaining: 97.0
                },
                Event::Damaged {
                    amount: 5.0,
                    remaining: 92.0
                },
            ]
        );
    }

    #[test]
    fn ended_contact_stops_damage() {
        let mut system = PlayerCollisionSystem::new(0.5).unwrap();
        let mut unit = spawn_idle_unit();
        system.begin_contact(EnemyId::new(1), 10.0);
        system.tick(&ctx(0.1), &mut unit);
        system.end_contact(EnemyId::new(1));
        assert_eq!(system.contact_count(), 0);

        assert!(system.tick(&ctx(5.0), &mut unit).is_empty());
        assert_eq!(unit.health().current(), 90.0);
    }

    #[test]
    fn lethal_contact_reports_depletion() {
        let mut system = PlayerCollisionSystem::new(0.5).unwrap();
        let mut unit = spawn_idle_unit();
        system.begin_contact(EnemyId::new(1), 500.0);
        let events = system.tick(&ctx(0.1), &mut unit);
        assert!(events.iter().any(Event::is_depleted));
    }

    #[test]
    fn contact_damage_restarts_regeneration() {
        let mut system = PlayerCollisionSystem::new(0.5).unwrap();
        let mut unit = spawn_idle_unit();
        unit.tick(2.0);
        system.begin_contact(EnemyId::new(1), 1.0);
        system.tick(&ctx(0.1), &mut unit);
        assert_eq!(unit.regeneration().elapsed(), 0.0);
    }

    #[test]
    fn invalid_delta_does_not_poison_the_cooldown() {
        let mut system = PlayerCollisionSystem::new(0.5).unwrap();
        let mut unit = spawn_idle_unit();
        system.begin_contact(EnemyId::new(1), 10.0);
        system.tick(&ctx(0.1), &mut unit);
        assert_eq!(unit.health().current(), 90.0);

        assert!(system.tick(&ctx(f32::NAN), &mut unit).is_empty());
        assert!(system.tick(&ctx(-5.0), &mut unit).is_empty());
        assert!(system.tick(&ctx(f32::INFINITY), &mut unit).is_empty());

        // The cooldown resumes where it was: 0.1 + 0.45 passes the delay.
        assert_eq!(system.tick(&ctx(0.45), &mut unit).len(), 1);
        assert_eq!(unit.health().current(), 80.0);
    }

    #[test]
    fn long_stall_hits_a_bounded_number_of_times() {
        let mut system = PlayerCollisionSystem::new(0.001).unwrap();
        let mut unit = spawn_idle_unit();
        system.begin_contact(EnemyId::new(1), 0.5);
        let events = system.tick(&ctx(100_000.0), &mut unit);
        assert_eq!(events.len(), MAX_CATCH_UP_PER_FRAME as usize);
        assert!((unit.health().current() - 96.0).abs() < 1e-4);
    }

    #[test]
    fn enemy_id_formats() {
        assert_eq!(format!("{:?}", EnemyId::new(4)), "EnemyId(4)");
        assert_eq!(EnemyId::from(9).to_string(), "9");
    }
}
