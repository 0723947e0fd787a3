//! Game settings loaded from the JSON data asset.
//!
//! Field names follow the asset's camelCase keys. Launcher and upgrade
//! blocks belong to host-side systems and are carried through as opaque JSON.
//!
//! # Example
//!
//! ```
//! use haloswarm_core::config::GameSettings;
//!
//! let json = r#"{
//!     "player": {
//!         "maxHp": 100,
//!         "regenerationDelay": 3,
//!         "requiredXP": [10, 20, 40],
//!         "xpMultiplier": 1.0,
//!         "speed": 120,
//!         "strikeDelay": 1.0,
//!         "damage": 5,
//!         "goldMultiplier": 1.0
//!     }
//! }"#;
//!
//! let settings = GameSettings::from_json(json).unwrap();
//! assert_eq!(settings.player.max_hp, 100.0);
//! assert_eq!(settings.player.regeneration_rate, 10.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ConfigError, SettingsError};

/// Default heal rate in HP per second when the asset omits it.
pub const DEFAULT_REGENERATION_RATE: f32 = 10.0;

/// Default seconds between contact-damage hits when the asset omits it.
pub const DEFAULT_COLLISION_DELAY: f32 = 1.0;

/// Root of the settings document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    /// Player unit configuration.
    pub player: PlayerSettings,
    /// Upgrade tables consumed by the host upgrader.
    #[serde(default)]
    pub upgrades: serde_json::Value,
}

impl GameSettings {
    /// Parses and validates a settings document.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Parse`] for malformed JSON and
    /// [`SettingsError::Invalid`] when a value fails validation.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks every rule the stat models enforce on construction.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.player.validate()
    }
}

/// Configuration record for the player unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSettings {
    /// Maximum hit points.
    pub max_hp: f32,
    /// Seconds without damage before regeneration starts.
    pub regeneration_delay: f32,
    /// Hit points restored per second once regenerating.
    #[serde(default = "default_regeneration_rate")]
    pub regeneration_rate: f32,
    /// Experience needed for each level, in order.
    #[serde(rename = "requiredXP")]
    pub required_xp: Vec<f32>,
    /// Scale applied to every experience threshold.
    pub xp_multiplier: f32,
    /// Movement speed in world units per second.
    pub speed: f32,
    /// Seconds between weapon strikes.
    pub strike_delay: f32,
    /// Damage per weapon strike.
    pub damage: f32,
    /// Scale applied to collected gold.
    pub gold_multiplier: f32,
    /// Seconds between contact-damage hits from touching enemies.
    #[serde(default = "default_collision_delay")]
    pub collision_delay: f32,
    /// Halo launcher block, owned by the host launcher.
    #[serde(default)]
    pub halo_launcher: serde_json::Value,
    /// Horizontal/vertical launcher block, owned by the host launcher.
    #[serde(default)]
    pub xy_launchers: serde_json::Value,
}

fn default_regeneration_rate() -> f32 {
    DEFAULT_REGENERATION_RATE
}

fn default_collision_delay() -> f32 {
    DEFAULT_COLLISION_DELAY
}

impl PlayerSettings {
    /// Checks the fields the stat models do not own.
    ///
    /// Health, level, regeneration and weapon rules are checked by their
    /// constructors; this covers speed, gold multiplier and collision delay,
    /// then delegates the rest so a settings file can be vetted without
    /// building a unit.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let speed = ensure_finite("speed", self.speed)?;
        if speed < 0.0 {
            return Err(ConfigError::NegativeSpeed(speed));
        }
        let gold = ensure_finite("goldMultiplier", self.gold_multiplier)?;
        if gold < 0.0 {
            return Err(ConfigError::NegativeGoldMultiplier(gold));
        }
        let collision = ensure_finite("collisionDelay", self.collision_delay)?;
        if collision <= 0.0 {
            return Err(ConfigError::NonPositiveCollisionDelay(collision));
        }

        crate::stats::Health::new(self.max_hp)?;
        crate::stats::Level::new(self.required_xp.clone(), self.xp_multiplier)?;
        crate::stats::Regeneration::new(self.regeneration_delay, self.regeneration_rate)?;
        crate::stats::Weapon::new(self.strike_delay, self.damage)?;
        Ok(())
    }
}
