//! Test helper functions for building settings, units and games.

use glam::Vec2;

use crate::config::{GameSettings, PlayerSettings};
use crate::game::{FrameReport, Game};
use crate::input::{ConstantInput, InputSource};
use crate::pause::Pauser;
use crate::unit::Unit;

/// Standard player settings used across tests.
///
/// - 100 max HP, regeneration after 3 s at 10 HP/s
/// - thresholds `[10, 20, 40]`, multiplier 1
/// - speed 100, strike every 1 s for 5 damage
/// - gold multiplier 1, contact hits every 0.5 s
pub fn player_settings() -> PlayerSettings {
    PlayerSettings {
        max_hp: 100.0,
        regeneration_delay: 3.0,
        regeneration_rate: 10.0,
        required_xp: vec![10.0, 20.0, 40.0],
        xp_multiplier: 1.0,
        speed: 100.0,
        strike_delay: 1.0,
        damage: 5.0,
        gold_multiplier: 1.0,
        collision_delay: 0.5,
        halo_launcher: serde_json::Value::Null,
        xy_launchers: serde_json::Value::Null,
    }
}

/// [`player_settings`] wrapped in a settings document.
pub fn game_settings() -> GameSettings {
    GameSettings {
        player: player_settings(),
        upgrades: serde_json::Value::Null,
    }
}

/// A unit that never moves.
pub fn spawn_idle_unit() -> Unit {
    Unit::new(Box::new(ConstantInput(Vec2::ZERO)), &player_settings())
        .expect("test settings are valid")
}

/// A game driven by `input`.
pub fn new_game(input: impl InputSource + 'static) -> Game {
    Game::new(&game_settings(), Box::new(input)).expect("test settings are valid")
}

/// Runs `frames` unpaused frames of `delta` seconds and returns every report.
pub fn run_frames(game: &mut Game, frames: usize, delta: f32) -> Vec<FrameReport> {
    let pauser = Pauser::new();
    (0..frames).map(|_| game.frame(&pauser, delta)).collect()
}
