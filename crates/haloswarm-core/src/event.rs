//! Gameplay events emitted by the unit and frame systems.
//!
//! The core never calls into UI, audio, or death handling directly. Instead
//! every operation that changes something a collaborator may care about
//! returns the [`Event`]s it produced, and [`Game::frame`](crate::game::Game::frame)
//! gathers them into its [`FrameReport`](crate::game::FrameReport) in the
//! order they happened.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Something that happened to the unit during a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// The unit took damage.
    Damaged {
        /// Damage requested by the source.
        amount: f32,
        /// Health left afterwards.
        remaining: f32,
    },
    /// Health reached zero. Emitted once, on the depleting hit.
    Depleted,
    /// Regeneration restored health.
    Healed {
        /// Hit points restored.
        amount: f32,
    },
    /// The unit reached a new level.
    LevelUp {
        /// The level just reached.
        level: usize,
    },
    /// The weapon struck; the host applies `damage` to enemies in reach.
    Strike {
        /// Damage carried by the strike.
        damage: f32,
    },
}

impl Event {
    /// Returns `true` for events a death handler must react to.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        matches!(self, Self::Depleted)
    }

    /// Returns the level for `LevelUp` events.
    #[must_use]
    pub const fn as_level_up(&self) -> Option<usize> {
        match self {
            Self::LevelUp { level } => Some(*level),
            _ => None,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Damaged { amount, remaining } => {
                write!(f, "damaged {amount} ({remaining} left)")
            }
            Self::Depleted => write!(f, "depleted"),
            Self::Healed { amount } => write!(f, "healed {amount}"),
            Self::LevelUp { level } => write!(f, "level up to {level}"),
            Self::Strike { damage } => write!(f, "strike for {damage}"),
        }
    }
}
