//! Error types for configuration loading and validation.
//!
//! Malformed configuration is content error, not a runtime condition: every
//! rule below is checked once when stat models, units, or the game are built,
//! and construction is rejected instead of silently clamping.

use thiserror::Error;

/// A configuration value that cannot produce a valid stat model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Maximum health must be strictly positive.
    #[error("max hp must be positive, got {0}")]
    NonPositiveMaxHp(f32),

    /// Regeneration delay must not be negative.
    #[error("regeneration delay must not be negative, got {0}")]
    NegativeRegenerationDelay(f32),

    /// Regeneration rate must not be negative.
    #[error("regeneration rate must not be negative, got {0}")]
    NegativeRegenerationRate(f32),

    /// The experience threshold sequence is empty.
    #[error("required xp sequence is empty")]
    EmptyXpThresholds,

    /// One experience threshold is zero or negative.
    #[error("required xp at level {index} must be positive, got {value}")]
    NonPositiveXpThreshold {
        /// Position of the offending threshold.
        index: usize,
        /// The rejected value.
        value: f32,
    },

    /// The experience multiplier must be strictly positive.
    #[error("xp multiplier must be positive, got {0}")]
    NonPositiveXpMultiplier(f32),

    /// Movement speed must not be negative.
    #[error("speed must not be negative, got {0}")]
    NegativeSpeed(f32),

    /// Weapon strike delay must be strictly positive.
    #[error("strike delay must be positive, got {0}")]
    NonPositiveStrikeDelay(f32),

    /// Weapon damage must not be negative.
    #[error("damage must not be negative, got {0}")]
    NegativeDamage(f32),

    /// Contact-damage interval must be strictly positive.
    #[error("collision delay must be positive, got {0}")]
    NonPositiveCollisionDelay(f32),

    /// Gold multiplier must not be negative.
    #[error("gold multiplier must not be negative, got {0}")]
    NegativeGoldMultiplier(f32),

    /// A numeric field is NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NonFinite {
        /// Name of the offending field, as it appears in the settings file.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
}

/// Failure while reading a settings document.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The document is not valid JSON for [`GameSettings`](crate::config::GameSettings).
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed but holds invalid values.
    #[error("invalid settings: {0}")]
    Invalid(#[from] ConfigError),
}

/// Returns `Err(NonFinite)` when `value` is NaN or infinite.
pub(crate) fn ensure_finite(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}
