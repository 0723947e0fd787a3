//! Delayed health regeneration.
//!
//! Regeneration waits `delay` seconds after the last damage (Idle), then heals
//! at `rate` hit points per second (Healing) until health is full or the next
//! hit resets the timer. Only the part of a frame that lies past the delay
//! heals, so the result does not depend on how time is sliced into frames.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ConfigError};
use crate::stats::Health;

/// Logical regeneration phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegenState {
    /// Waiting for the delay to elapse since the last damage.
    Idle,
    /// Delay elapsed; each tick heals.
    Healing,
}

/// Time-gated healing applied to a [`Health`] passed in on each tick.
///
/// # Example
///
/// ```
/// use haloswarm_core::stats::{Health, Regeneration};
///
/// let mut health = Health::new(100.0).unwrap();
/// let mut regen = Regeneration::new(3.0, 10.0).unwrap();
///
/// health.apply_damage(40.0);
/// regen.notify_damaged();
///
/// // Three seconds of waiting, one second of healing.
/// assert_eq!(regen.tick(4.0, &mut health), 10.0);
/// assert_eq!(health.current(), 70.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Regeneration {
    delay: f32,
    rate: f32,
    elapsed: f32,
}

impl Regeneration {
    /// Creates regeneration in the Idle state.
    ///
    /// # Errors
    ///
    /// Rejects negative or non-finite `delay` and `rate`.
    pub fn new(delay: f32, rate: f32) -> Result<Self, ConfigError> {
        let delay = ensure_finite("regenerationDelay", delay)?;
        if delay < 0.0 {
            return Err(ConfigError::NegativeRegenerationDelay(delay));
        }
        let rate = ensure_finite("regenerationRate", rate)?;
        if rate < 0.0 {
            return Err(ConfigError::NegativeRegenerationRate(rate));
        }
        Ok(Self {
            delay,
            rate,
            elapsed: 0.0,
        })
    }

    /// Seconds of no damage required before healing starts.
    #[must_use]
    pub const fn delay(&self) -> f32 {
        self.delay
    }

    /// Hit points restored per second while healing.
    #[must_use]
    pub const fn rate(&self) -> f32 {
        self.rate
    }

    /// Seconds accumulated since the last damage, held at the delay once
    /// healing.
    #[must_use]
    pub const fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Current phase.
    #[must_use]
    pub fn state(&self) -> RegenState {
        if self.elapsed >= self.delay {
            RegenState::Healing
        } else {
            RegenState::Idle
        }
    }

    /// Advances the timer by `delta` seconds and heals `health`.
    ///
    /// Returns the hit points actually restored this tick. Depleted health is
    /// never revived. Non-positive or non-finite deltas are a no-op.
    pub fn tick(&mut self, delta: f32, health: &mut Health) -> f32 {
        if !delta.is_finite() || delta <= 0.0 {
            return 0.0;
        }
        let before = self.elapsed;
        self.elapsed += delta;
        if self.elapsed < self.delay {
            return 0.0;
        }

        let healing_time = self.elapsed - before.max(self.delay);
        // Past the delay only the state matters; keep the timer small so
        // f32 steps stay fine-grained over long sessions.
        self.elapsed = self.delay;
        if health.is_depleted() || health.is_full() {
            return 0.0;
        }
        health.heal(self.rate * healing_time)
    }

    /// Resets the timer after damage, returning to Idle.
    pub fn notify_damaged(&mut self) {
        self.elapsed = 0.0;
    }

    /// Raises the heal rate by `amount` HP/s.
    ///
    /// # Errors
    ///
    /// Rejects non-finite amounts and results below zero.
    pub fn increase_rate(&mut self, amount: f32) -> Result<(), ConfigError> {
        let rate = self.rate + ensure_finite("regenerationRate", amount)?;
        if rate < 0.0 {
            return Err(ConfigError::NegativeRegenerationRate(rate));
        }
        self.rate = rate;
        Ok(())
    }

    /// Shortens the delay by `seconds`, flooring at zero.
    ///
    /// # Errors
    ///
    /// Rejects non-finite values.
    pub fn reduce_delay(&mut self, seconds: f32) -> Result<(), ConfigError> {
        let seconds = ensure_finite("regenerationDelay", seconds)?;
        self.delay = (self.delay - seconds).max(0.0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn damaged(max: f32, damage: f32) -> Health {
        let mut health = Health::new(max).unwrap();
        health.apply_damage(damage);
        health
    }

    #[test]
    fn new_rejects_negative_values() {
        assert_eq!(
            Regeneration::new(-1.0, 5.0),
            Err(ConfigError::NegativeRegenerationDelay(-1.0))
        );
        assert_eq!(
            Regeneration::new(1.0, -5.0),
            Err(ConfigError::NegativeRegenerationRate(-5.0))
        );
    }

    #[test]
    fn no_healing_before_delay() {
        let mut health = damaged(100.0, 40.0);
        let mut regen = Regeneration::new(3.0, 10.0).unwrap();

        assert_eq!(regen.tick(1.0, &mut health), 0.0);
        assert_eq!(regen.tick(1.5, &mut health), 0.0);
        assert_eq!(regen.state(), RegenState::Idle);
        assert_eq!(health.current(), 60.0);
    }

    #[test]
    fn delay_plus_one_second_heals_one_second_worth() {
        let mut health = damaged(100.0, 40.0);
        let mut regen = Regeneration::new(3.0, 10.0).unwrap();

        let healed = regen.tick(4.0, &mut health);
        assert!((healed - 10.0).abs() < 1e-4);
        assert!((health.current() - 70.0).abs() < 1e-4);
        assert_eq!(regen.state(), RegenState::Healing);
    }

    #[test]
    fn healing_is_independent_of_frame_slicing() {
        let mut coarse_health = damaged(100.0, 50.0);
        let mut coarse = Regeneration::new(2.0, 5.0).unwrap();
        coarse.tick(5.0, &mut coarse_health);

        let mut fine_health = damaged(100.0, 50.0);
        let mut fine = Regeneration::new(2.0, 5.0).unwrap();
        for _ in 0..50 {
            fine.tick(0.1, &mut fine_health);
        }

        assert!((coarse_health.current() - 65.0).abs() < 1e-3);
        assert!((fine_health.current() - coarse_health.current()).abs() < 1e-3);
    }

    #[test]
    fn long_undamaged_stretch_keeps_frame_precision() {
        let mut health = Health::new(100.0).unwrap();
        let mut regen = Regeneration::new(3.0, 10.0).unwrap();
        regen.tick(100_000.0, &mut health);
        assert_eq!(regen.state(), RegenState::Healing);
        assert_eq!(regen.elapsed(), 3.0);

        // Hit without notifying, as if the timer had never been reset.
        health.apply_damage(50.0);
        let healed: f32 = (0..100).map(|_| regen.tick(0.016, &mut health)).sum();
        assert!((healed - 16.0).abs() < 1e-2);
        assert!((health.current() - 66.0).abs() < 1e-2);
    }

    #[test]
    fn damage_notification_returns_to_idle() {
        let mut health = damaged(100.0, 40.0);
        let mut regen = Regeneration::new(2.0, 10.0).unwrap();
        regen.tick(2.5, &mut health);
        assert_eq!(regen.state(), RegenState::Healing);

        regen.notify_damaged();
        assert_eq!(regen.state(), RegenState::Idle);
        assert_eq!(regen.elapsed(), 0.0);

        let before = health.current();
        assert_eq!(regen.tick(1.9, &mut health), 0.0);
        assert_eq!(health.current(), before);
    }

    #[test]
    fn full_health_is_left_alone() {
        let mut health = Health::new(100.0).unwrap();
        let mut regen = Regeneration::new(0.0, 10.0).unwrap();
        assert_eq!(regen.tick(1.0, &mut health), 0.0);
        assert_eq!(health.current(), 100.0);
    }

    #[test]
    fn depleted_health_is_not_revived() {
        let mut health = damaged(10.0, 10.0);
        let mut regen = Regeneration::new(0.0, 10.0).unwrap();
        assert_eq!(regen.tick(5.0, &mut health), 0.0);
        assert!(health.is_depleted());
    }

    #[test]
    fn zero_delay_heals_from_first_tick() {
        let mut health = damaged(100.0, 20.0);
        let mut regen = Regeneration::new(0.0, 4.0).unwrap();
        let healed = regen.tick(0.5, &mut health);
        assert!((healed - 2.0).abs() < 1e-5);
    }

    #[test]
    fn invalid_delta_is_ignored() {
        let mut health = damaged(100.0, 20.0);
        let mut regen = Regeneration::new(0.0, 4.0).unwrap();
        assert_eq!(regen.tick(-1.0, &mut health), 0.0);
        assert_eq!(regen.tick(f32::NAN, &mut health), 0.0);
        assert_eq!(regen.elapsed(), 0.0);
    }

    #[test]
    fn upgrades_adjust_rate_and_delay() {
        let mut regen = Regeneration::new(3.0, 10.0).unwrap();
        regen.increase_rate(5.0).unwrap();
        regen.reduce_delay(5.0).unwrap();
        assert_eq!(regen.rate(), 15.0);
        assert_eq!(regen.delay(), 0.0);
        assert_eq!(
            regen.increase_rate(-20.0),
            Err(ConfigError::NegativeRegenerationRate(-5.0))
        );
    }
}
