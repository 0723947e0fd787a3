//! # Haloswarm Core
//!
//! Frame-driven unit simulation for Haloswarm.
//!
//! This crate holds the gameplay state that lives outside the host engine:
//! the player unit, its stat models, and the fixed per-frame update order.
//! Rendering, physics overlap tests, input devices, UI and asset loading stay
//! with the host, which talks to the core through small traits and event
//! lists.
//!
//! ## Architecture
//!
//! - **Stats**: Health, level, regeneration, weapon cooldown
//! - **Unit**: Input binding, movement, stat ticking, lifecycle
//! - **Systems**: Contact damage, weapon strikes, host subsystems
//! - **Game**: Construction from settings and the per-frame fan-out
//!
//! ## Usage
//!
//! ```rust,ignore
//! use haloswarm_core::{Game, GameSettings, Pauser};
//!
//! let settings = GameSettings::from_json(&std::fs::read_to_string("settings.json")?)?;
//! let mut game = Game::new(&settings, Box::new(keyboard))?;
//! let pauser = Pauser::new();
//!
//! // once per host frame
//! let report = game.frame(&pauser, delta_seconds);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod event;
pub mod game;
pub mod input;
pub mod pause;
pub mod stats;
pub mod systems;
pub mod unit;
pub mod upgrade;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use config::{GameSettings, PlayerSettings};
pub use error::{ConfigError, SettingsError};
pub use event::Event;
pub use game::{FrameOutcome, FrameReport, Game};
pub use input::InputSource;
pub use pause::Pauser;
pub use unit::{Unit, UnitState};
pub use upgrade::StatUpgrade;
