//! Experience accumulation and level progression.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ensure_finite, ConfigError};

/// Level index and experience toward the next level.
///
/// `thresholds[i]` is the experience needed to go from level `i` to level
/// `i + 1`, scaled by `multiplier`. Levels start at 0 and stop at
/// `thresholds.len()`; experience granted at the final level still
/// accumulates but triggers nothing.
///
/// # Example
///
/// ```
/// use haloswarm_core::stats::Level;
///
/// let mut level = Level::new(vec![10.0, 20.0, 40.0], 1.5).unwrap();
/// assert_eq!(level.required_experience(), Some(15.0));
///
/// // 15 for level 1, 30 for level 2, 5 left over.
/// assert_eq!(level.add_experience(50.0), 2);
/// assert_eq!(level.level(), 2);
/// assert_eq!(level.experience(), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    level: usize,
    experience: f32,
    thresholds: Vec<f32>,
    multiplier: f32,
}

impl Level {
    /// Creates a level tracker at level 0 with no experience.
    ///
    /// # Errors
    ///
    /// Rejects an empty threshold list, any threshold `<= 0`, a multiplier
    /// `<= 0`, and non-finite values.
    pub fn new(thresholds: Vec<f32>, multiplier: f32) -> Result<Self, ConfigError> {
        if thresholds.is_empty() {
            return Err(ConfigError::EmptyXpThresholds);
        }
        for (index, &value) in thresholds.iter().enumerate() {
            ensure_finite("requiredXP", value)?;
            if value <= 0.0 {
                return Err(ConfigError::NonPositiveXpThreshold { index, value });
            }
        }
        let multiplier = ensure_finite("xpMultiplier", multiplier)?;
        if multiplier <= 0.0 {
            return Err(ConfigError::NonPositiveXpMultiplier(multiplier));
        }

        Ok(Self {
            level: 0,
            experience: 0.0,
            thresholds,
            multiplier,
        })
    }

    /// Current level index.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Experience accumulated toward the next level.
    #[must_use]
    pub const fn experience(&self) -> f32 {
        self.experience
    }

    /// Highest reachable level.
    #[must_use]
    pub fn max_level(&self) -> usize {
        self.thresholds.len()
    }

    /// Returns `true` once no further level-ups are possible.
    #[must_use]
    pub fn is_max_level(&self) -> bool {
        self.level >= self.thresholds.len()
    }

    /// Effective experience needed for the next level, or `None` at the
    /// final level.
    #[must_use]
    pub fn required_experience(&self) -> Option<f32> {
        self.thresholds
            .get(self.level)
            .map(|threshold| threshold * self.multiplier)
    }

    /// Progress toward the next level in `0.0..=1.0`; `1.0` at the final level.
    #[must_use]
    pub fn progress(&self) -> f32 {
        match self.required_experience() {
            Some(required) => (self.experience / required).clamp(0.0, 1.0),
            None => 1.0,
        }
    }

    /// Grants experience and returns the number of level-ups it caused.
    ///
    /// Surplus experience carries into the next level, so one grant can
    /// cross several thresholds. Negative or non-finite grants are ignored.
    pub fn add_experience(&mut self, amount: f32) -> usize {
        if !amount.is_finite() || amount < 0.0 {
            warn!(amount, "ignoring invalid experience grant");
            return 0;
        }
        self.experience += amount;

        let mut level_ups = 0;
        while let Some(required) = self.required_experience() {
            if self.experience < required {
                break;
            }
            self.experience -= required;
            self.level += 1;
            level_ups += 1;
            debug!(level = self.level, carried = self.experience, "level up");
        }
        level_ups
    }
}
