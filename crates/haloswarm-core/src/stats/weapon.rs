//! Weapon strike cooldown.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ConfigError};

/// Cooldown-gated melee weapon.
///
/// A strike is allowed once `strike_delay` seconds have accumulated. A
/// successful strike subtracts the delay instead of zeroing the accumulator,
/// so time overshooting the delay counts toward the next strike.
///
/// # Example
///
/// ```
/// use haloswarm_core::stats::Weapon;
///
/// let mut weapon = Weapon::new(1.0, 25.0).unwrap();
/// weapon.tick(0.6);
/// assert_eq!(weapon.try_strike(), None);
///
/// weapon.tick(0.5);
/// assert_eq!(weapon.try_strike(), Some(25.0));
/// assert!((weapon.elapsed() - 0.1).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    strike_delay: f32,
    damage: f32,
    elapsed: f32,
}

impl Weapon {
    /// Creates a weapon whose first strike is available after one full delay.
    ///
    /// # Errors
    ///
    /// Rejects `strike_delay <= 0`, `damage < 0`, and non-finite values.
    pub fn new(strike_delay: f32, damage: f32) -> Result<Self, ConfigError> {
        let strike_delay = ensure_finite("strikeDelay", strike_delay)?;
        if strike_delay <= 0.0 {
            return Err(ConfigError::NonPositiveStrikeDelay(strike_delay));
        }
        let damage = ensure_finite("damage", damage)?;
        if damage < 0.0 {
            return Err(ConfigError::NegativeDamage(damage));
        }
        Ok(Self {
            strike_delay,
            damage,
            elapsed: 0.0,
        })
    }

    /// Seconds between strikes.
    #[must_use]
    pub const fn strike_delay(&self) -> f32 {
        self.strike_delay
    }

    /// Damage dealt per strike.
    #[must_use]
    pub const fn damage(&self) -> f32 {
        self.damage
    }

    /// Seconds accumulated since the last strike, including any overshoot.
    #[must_use]
    pub const fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Returns `true` if [`try_strike`](Self::try_strike) would succeed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.elapsed >= self.strike_delay
    }

    /// Seconds until the next strike is allowed; zero when ready.
    #[must_use]
    pub fn cooldown_remaining(&self) -> f32 {
        (self.strike_delay - self.elapsed).max(0.0)
    }

    /// Advances the cooldown by `delta` seconds.
    pub fn tick(&mut self, delta: f32) {
        if delta.is_finite() && delta > 0.0 {
            self.elapsed += delta;
        }
    }

    /// Consumes one strike if the cooldown has elapsed.
    ///
    /// Returns the damage to apply, or `None` with no state change while
    /// cooling down.
    pub fn try_strike(&mut self) -> Option<f32> {
        if !self.is_ready() {
            return None;
        }
        self.elapsed -= self.strike_delay;
        Some(self.damage)
    }

    /// Consumes every banked strike, but at most `limit`.
    ///
    /// Returns the number of strikes fired. When more than `limit` strikes
    /// are banked (a long stall, a resumed app) the surplus is dropped and
    /// only the partial cooldown is kept.
    pub fn drain_strikes(&mut self, limit: u32) -> u32 {
        drain_cooldown(&mut self.elapsed, self.strike_delay, limit)
    }

    /// Adds `amount` to the damage per strike.
    ///
    /// # Errors
    ///
    /// Rejects non-finite amounts and results below zero.
    pub fn increase_damage(&mut self, amount: f32) -> Result<(), ConfigError> {
        let damage = self.damage + ensure_finite("damage", amount)?;
        if damage < 0.0 {
            return Err(ConfigError::NegativeDamage(damage));
        }
        self.damage = damage;
        Ok(())
    }

    /// Multiplies the strike delay by `factor` (e.g. `0.9` strikes 10% faster).
    ///
    /// # Errors
    ///
    /// Rejects non-finite factors and results at or below zero.
    pub fn scale_strike_delay(&mut self, factor: f32) -> Result<(), ConfigError> {
        let strike_delay = self.strike_delay * ensure_finite("strikeDelay", factor)?;
        if strike_delay <= 0.0 {
            return Err(ConfigError::NonPositiveStrikeDelay(strike_delay));
        }
        self.strike_delay = strike_delay;
        Ok(())
    }
}

/// Takes up to `limit` whole `delay` periods out of `elapsed`.
///
/// Repeated subtraction stops making progress once `elapsed` dwarfs `delay`
/// in f32, so an oversized backlog is reduced with `%` instead.
pub(crate) fn drain_cooldown(elapsed: &mut f32, delay: f32, limit: u32) -> u32 {
    if elapsed.is_nan() || *elapsed < delay {
        return 0;
    }
    #[allow(clippy::cast_precision_loss)]
    let cap = limit as f32;
    if (*elapsed / delay).floor() > cap {
        *elapsed %= delay;
        return limit;
    }
    let mut fired = 0;
    while fired < limit && *elapsed >= delay {
        *elapsed -= delay;
        fired += 1;
    }
    fired
}
