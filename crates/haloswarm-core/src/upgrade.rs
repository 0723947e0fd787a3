//! Stat upgrades chosen by the player on level-up.
//!
//! The host upgrader decides which upgrades to offer and when; applying one
//! is a single call to [`Unit::apply_upgrade`](crate::unit::Unit::apply_upgrade).
//! Upgrades deserialize from the settings `upgrades` block:
//!
//! ```
//! use haloswarm_core::upgrade::StatUpgrade;
//!
//! let upgrade: StatUpgrade =
//!     serde_json::from_str(r#"{ "kind": "strikeDelay", "factor": 0.9 }"#).unwrap();
//! assert_eq!(upgrade, StatUpgrade::StrikeDelay { factor: 0.9 });
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single stat change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StatUpgrade {
    /// Raise maximum health (current health rises by the same amount).
    MaxHp {
        /// Hit points added to the maximum.
        amount: f32,
    },
    /// Heal faster once regenerating.
    RegenerationRate {
        /// HP/s added to the rate.
        amount: f32,
    },
    /// Start regenerating sooner after damage.
    RegenerationDelay {
        /// Seconds removed from the delay.
        seconds: f32,
    },
    /// Hit harder.
    WeaponDamage {
        /// Damage added per strike.
        amount: f32,
    },
    /// Strike more often.
    StrikeDelay {
        /// Multiplier on the strike delay.
        factor: f32,
    },
    /// Move faster.
    Speed {
        /// Units per second added to the speed.
        amount: f32,
    },
    /// Earn more gold.
    GoldMultiplier {
        /// Added to the gold multiplier.
        amount: f32,
    },
}

impl fmt::Display for StatUpgrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaxHp { amount } => write!(f, "max hp +{amount}"),
            Self::RegenerationRate { amount } => write!(f, "regeneration +{amount}/s"),
            Self::RegenerationDelay { seconds } => write!(f, "regeneration delay -{seconds}s"),
            Self::WeaponDamage { amount } => write!(f, "damage +{amount}"),
            Self::StrikeDelay { factor } => write!(f, "strike delay x{factor}"),
            Self::Speed { amount } => write!(f, "speed +{amount}"),
            Self::GoldMultiplier { amount } => write!(f, "gold multiplier +{amount}"),
        }
    }
}
