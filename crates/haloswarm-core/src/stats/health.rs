//! Hit points with clamped damage and healing.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ensure_finite, ConfigError};

/// Current and maximum hit points of a unit.
///
/// # Invariants
///
/// - `max > 0`
/// - `0 <= current <= max` after every mutation
///
/// # Example
///
/// ```
/// use haloswarm_core::stats::Health;
///
/// let mut health = Health::new(100.0).unwrap();
/// health.apply_damage(40.0);
/// assert_eq!(health.current(), 60.0);
///
/// assert_eq!(health.heal(75.0), 40.0);
/// assert_eq!(health.current(), 100.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Health {
    current: f32,
    max: f32,
}

impl Health {
    /// Creates full health with the given maximum.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositiveMaxHp`] when `max <= 0`, or
    /// [`ConfigError::NonFinite`] when it is not a finite number.
    pub fn new(max: f32) -> Result<Self, ConfigError> {
        let max = ensure_finite("maxHp", max)?;
        if max <= 0.0 {
            return Err(ConfigError::NonPositiveMaxHp(max));
        }
        Ok(Self { current: max, max })
    }

    /// Current hit points.
    #[must_use]
    pub const fn current(&self) -> f32 {
        self.current
    }

    /// Maximum hit points.
    #[must_use]
    pub const fn max(&self) -> f32 {
        self.max
    }

    /// Returns `true` once current health has reached zero.
    #[must_use]
    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    /// Returns `true` when current health equals the maximum.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// Current health as a fraction of the maximum, in `0.0..=1.0`.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        self.current / self.max
    }

    /// Removes `amount` hit points, flooring at zero.
    ///
    /// Returns `true` only for the call that takes health from above zero to
    /// zero. Further damage on depleted health returns `false`.
    ///
    /// Negative or non-finite amounts are ignored.
    pub fn apply_damage(&mut self, amount: f32) -> bool {
        if !amount.is_finite() || amount < 0.0 {
            warn!(amount, "ignoring invalid damage amount");
            return false;
        }
        let was_alive = !self.is_depleted();
        self.current = (self.current - amount).max(0.0);
        was_alive && self.is_depleted()
    }

    /// Adds up to `amount` hit points, capped at the maximum.
    ///
    /// Returns the amount actually restored. Negative or non-finite amounts
    /// are ignored and restore nothing.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if !amount.is_finite() || amount < 0.0 {
            warn!(amount, "ignoring invalid heal amount");
            return 0.0;
        }
        let before = self.current;
        self.current = (self.current + amount).min(self.max);
        self.current - before
    }

    /// Raises the maximum by `amount` and grants the same amount of current
    /// health, so a max-HP upgrade is usable immediately.
    ///
    /// # Errors
    ///
    /// Rejects non-finite amounts, and amounts that would leave the maximum
    /// at or below zero.
    pub fn increase_max(&mut self, amount: f32) -> Result<(), ConfigError> {
        let amount = ensure_finite("maxHp", amount)?;
        let max = self.max + amount;
        if max <= 0.0 {
            return Err(ConfigError::NonPositiveMaxHp(max));
        }
        self.max = max;
        self.current = (self.current + amount).clamp(0.0, self.max);
        Ok(())
    }
}
