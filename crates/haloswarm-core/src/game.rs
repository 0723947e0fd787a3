//! Game bootstrapper with the fixed per-frame update order.
//!
//! [`Game`] is built once from [`GameSettings`] and then driven by the host's
//! per-frame callback through [`Game::frame`]:
//!
//! 1. **PAUSE CHECK**: A paused frame returns at once; nothing ticks. The
//!    same holds for an invalid `delta`, a terminal unit, or a unit frozen
//!    with [`Unit::pause`]
//! 2. **UNIT**: Movement, weapon cooldown, regeneration
//! 3. **CONTACT**: Contact damage from touching enemies
//! 4. **STRIKE**: Weapon strikes that came off cooldown
//! 5. **HOST SYSTEMS**: Enemy manager, launchers, ... in registration order
//! 6. **CAMERA**: The camera follows the unit
//!
//! # Determinism
//!
//! Given the same settings, input script, contacts and deltas, two games
//! produce identical unit state and identical event sequences.
//!
//! # Example
//!
//! ```
//! use haloswarm_core::config::GameSettings;
//! use haloswarm_core::game::{FrameOutcome, Game};
//! use haloswarm_core::input::ConstantInput;
//! use haloswarm_core::pause::Pauser;
//! use glam::Vec2;
//!
//! # let json = r#"{ "player": { "maxHp": 100, "regenerationDelay": 3,
//! #   "requiredXP": [10], "xpMultiplier": 1, "speed": 60, "strikeDelay": 1,
//! #   "damage": 5, "goldMultiplier": 1 } }"#;
//! let settings = GameSettings::from_json(json).unwrap();
//! let mut game = Game::new(&settings, Box::new(ConstantInput(Vec2::X))).unwrap();
//! let mut pauser = Pauser::new();
//!
//! let report = game.frame(&pauser, 0.5);
//! assert_eq!(report.outcome, FrameOutcome::Ran);
//! assert_eq!(game.camera().x, 30.0);
//!
//! pauser.pause();
//! assert_eq!(game.frame(&pauser, 0.5).outcome, FrameOutcome::Paused);
//! assert_eq!(game.unit().position().x, 30.0);
//! ```

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::{info, trace, warn};

use crate::config::GameSettings;
use crate::error::ConfigError;
use crate::event::Event;
use crate::input::InputSource;
use crate::pause::Pauser;
use crate::systems::{FrameContext, FrameSystem, PlayerCollisionSystem, WeaponStrikeSystem};
use crate::unit::{Unit, UnitState};

/// What happened to a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameOutcome {
    /// The full update ran.
    Ran,
    /// Skipped because the game or the unit is paused.
    Paused,
    /// Skipped because `delta` was NaN, infinite, zero or negative.
    Skipped,
    /// Skipped because the unit is terminal.
    Terminal,
}

/// Result of one [`Game::frame`] call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    /// Whether the frame ran.
    pub outcome: FrameOutcome,
    /// Events in the order they happened. Empty for skipped frames.
    pub events: Vec<Event>,
}

impl FrameReport {
    fn skipped(outcome: FrameOutcome) -> Self {
        Self {
            outcome,
            events: vec![],
        }
    }

    /// Returns `true` if the unit's health ran out this frame.
    #[must_use]
    pub fn depleted(&self) -> bool {
        self.events.iter().any(Event::is_depleted)
    }

    /// Levels reached this frame, in order.
    pub fn level_ups(&self) -> impl Iterator<Item = usize> + '_ {
        self.events.iter().filter_map(Event::as_level_up)
    }
}

/// The composed game: unit, subsystems, and camera.
pub struct Game {
    unit: Unit,
    collision: PlayerCollisionSystem,
    strike: WeaponStrikeSystem,
    systems: Vec<Box<dyn FrameSystem>>,
    camera: Vec3,
    frame: u64,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("unit", &self.unit)
            .field("collision", &self.collision)
            .field("strike", &self.strike)
            .field("systems", &format!("[{} systems]", self.systems.len()))
            .field("camera", &self.camera)
            .field("frame", &self.frame)
            .finish()
    }
}

impl Game {
    /// Builds the unit and built-in systems from `settings`, binding `input`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] in `settings`.
    pub fn new(settings: &GameSettings, input: Box<dyn InputSource>) -> Result<Self, ConfigError> {
        let unit = Unit::new(input, &settings.player)?;
        let collision = PlayerCollisionSystem::new(settings.player.collision_delay)?;
        info!(
            max_hp = settings.player.max_hp,
            levels = settings.player.required_xp.len(),
            "game constructed"
        );
        Ok(Self {
            camera: unit.position(),
            unit,
            collision,
            strike: WeaponStrikeSystem::new(),
            systems: vec![],
            frame: 0,
        })
    }

    /// Appends a host system; systems run in the order they were added.
    pub fn add_system(&mut self, system: Box<dyn FrameSystem>) {
        info!(system = system.name(), order = self.systems.len(), "system registered");
        self.systems.push(system);
    }

    /// Runs one frame of `delta` seconds unless `pause` is set.
    ///
    /// Skipped frames change no state and do not advance the frame counter.
    pub fn frame(&mut self, pause: &Pauser, delta: f32) -> FrameReport {
        if pause.is_paused() {
            trace!(frame = self.frame, "frame skipped: paused");
            return FrameReport::skipped(FrameOutcome::Paused);
        }
        if !delta.is_finite() || delta <= 0.0 {
            warn!(frame = self.frame, delta, "frame skipped: invalid delta");
            return FrameReport::skipped(FrameOutcome::Skipped);
        }
        match self.unit.state() {
            UnitState::Active => {}
            UnitState::Paused => return FrameReport::skipped(FrameOutcome::Paused),
            UnitState::Terminal => return FrameReport::skipped(FrameOutcome::Terminal),
        }

        let ctx = FrameContext {
            frame: self.frame,
            delta,
        };

        let mut events = self.unit.tick(delta);
        events.extend(self.collision.tick(&ctx, &mut self.unit));
        events.extend(self.strike.tick(&ctx, &mut self.unit));
        for system in &mut self.systems {
            events.extend(system.tick(&ctx, &mut self.unit));
        }

        self.camera = self.unit.position();
        self.frame += 1;

        FrameReport {
            outcome: FrameOutcome::Ran,
            events,
        }
    }

    /// The player unit.
    #[must_use]
    pub const fn unit(&self) -> &Unit {
        &self.unit
    }

    /// Mutable player unit, for host-driven events (pickups, upgrades, death).
    pub fn unit_mut(&mut self) -> &mut Unit {
        &mut self.unit
    }

    /// Contact-damage system, for the host to report enemy contacts.
    pub fn contacts_mut(&mut self) -> &mut PlayerCollisionSystem {
        &mut self.collision
    }

    /// Weapon-strike system.
    #[must_use]
    pub const fn strikes(&self) -> &WeaponStrikeSystem {
        &self.strike
    }

    /// Camera position; tracks the unit after every running frame.
    #[must_use]
    pub const fn camera(&self) -> Vec3 {
        self.camera
    }

    /// Number of frames that have run (paused and terminal frames excluded).
    #[must_use]
    pub const fn frames_run(&self) -> u64 {
        self.frame
    }

    /// Number of registered host systems.
    #[must_use]
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ConstantInput;
    use crate::systems::EnemyId;
    use crate::tests::game_settings;
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn game(axis: Vec2) -> Game {
        Game::new(&game_settings(), Box::new(ConstantInput(axis))).unwrap()
    }

    /// Records the frame index and unit x it observed.
    struct Recorder {
        seen: Rc<RefCell<Vec<(u64, f32)>>>,
    }

    impl FrameSystem for Recorder {
        fn name(&self) -> &str {
            "recorder"
        }

        fn tick(&mut self, ctx: &FrameContext, unit: &mut Unit) -> Vec<Event> {
            self.seen.borrow_mut().push((ctx.frame, unit.position().x));
            vec![]
        }
    }

    #[test]
    fn new_rejects_invalid_settings() {
        let mut settings = game_settings();
        settings.player.collision_delay = -1.0;
        let err = Game::new(&settings, Box::new(ConstantInput(Vec2::ZERO))).unwrap_err();
        assert_eq!(err, ConfigError::NonPositiveCollisionDelay(-1.0));
    }

    #[test]
    fn camera_follows_unit() {
        let mut game = game(Vec2::new(0.0, 1.0));
        game.frame(&Pauser::new(), 0.5);
        assert_eq!(game.camera(), game.unit().position());
        assert!(game.camera().y > 0.0);
    }

    #[test]
    fn host_systems_see_unit_after_it_moved() {
        let seen = Rc::new(RefCell::new(vec![]));
        let mut game = game(Vec2::X);
        game.add_system(Box::new(Recorder {
            seen: Rc::clone(&seen),
        }));
        assert_eq!(game.system_count(), 1);

        game.frame(&Pauser::new(), 0.1);
        game.frame(&Pauser::new(), 0.1);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, 0);
        assert_eq!(seen[1].0, 1);
        assert!((seen[0].1 - 10.0).abs() < 1e-4);
        assert!((seen[1].1 - 20.0).abs() < 1e-4);
    }

    #[test]
    fn paused_frames_change_nothing() {
        let seen = Rc::new(RefCell::new(vec![]));
        let mut game = game(Vec2::X);
        game.add_system(Box::new(Recorder {
            seen: Rc::clone(&seen),
        }));
        game.contacts_mut().begin_contact(EnemyId::new(1), 5.0);
        game.frame(&Pauser::new(), 0.1);

        let before = game.unit().snapshot();
        let mut pauser = Pauser::new();
        pauser.pause();
        for _ in 0..100 {
            let report = game.frame(&pauser, 0.1);
            assert_eq!(report.outcome, FrameOutcome::Paused);
            assert!(report.events.is_empty());
        }
        assert_eq!(game.unit().snapshot(), before);
        assert_eq!(game.frames_run(), 1);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn terminal_unit_stops_the_loop() {
        let mut game = game(Vec2::X);
        game.unit_mut().terminate();
        let report = game.frame(&Pauser::new(), 0.1);
        assert_eq!(report.outcome, FrameOutcome::Terminal);
        assert_eq!(game.frames_run(), 0);
    }

    #[test]
    fn invalid_delta_skips_the_frame() {
        let mut game = game(Vec2::X);
        game.contacts_mut().begin_contact(EnemyId::new(1), 10.0);
        let pauser = Pauser::new();
        game.frame(&pauser, 0.1);
        let before = game.unit().snapshot();

        for delta in [f32::NAN, -1.0, 0.0, f32::INFINITY] {
            let report = game.frame(&pauser, delta);
            assert_eq!(report.outcome, FrameOutcome::Skipped);
            assert!(report.events.is_empty());
        }
        assert_eq!(game.unit().snapshot(), before);
        assert_eq!(game.frames_run(), 1);

        // Contact damage keeps its rhythm afterwards (delay 0.5).
        let hits: usize = (0..7)
            .map(|_| {
                game.frame(&pauser, 0.1)
                    .events
                    .iter()
                    .filter(|e| matches!(e, Event::Damaged { .. }))
                    .count()
            })
            .sum();
        assert_eq!(hits, 1);
    }

    #[test]
    fn paused_unit_freezes_the_whole_frame() {
        let mut game = game(Vec2::X);
        game.contacts_mut().begin_contact(EnemyId::new(1), 10.0);
        game.unit_mut().pause();
        let before = game.unit().snapshot();

        let pauser = Pauser::new();
        for _ in 0..20 {
            let report = game.frame(&pauser, 0.1);
            assert_eq!(report.outcome, FrameOutcome::Paused);
            assert!(report.events.is_empty());
        }
        assert_eq!(game.unit().snapshot(), before);
        assert_eq!(game.frames_run(), 0);

        game.unit_mut().resume();
        assert_eq!(game.frame(&pauser, 0.1).outcome, FrameOutcome::Ran);
        assert_eq!(game.unit().health().current(), 90.0);
    }

    #[test]
    fn strikes_are_reported_per_frame() {
        // strike delay 1.0
        let mut game = game(Vec2::ZERO);
        let pauser = Pauser::new();
        let mut strikes = 0;
        for _ in 0..25 {
            let report = game.frame(&pauser, 0.1);
            strikes += report
                .events
                .iter()
                .filter(|e| matches!(e, Event::Strike { .. }))
                .count();
        }
        assert_eq!(strikes, 2);
        assert_eq!(game.strikes().strikes(), 2);
    }

    #[test]
    fn report_helpers() {
        let report = FrameReport {
            outcome: FrameOutcome::Ran,
            events: vec![
                Event::LevelUp { level: 1 },
                Event::Depleted,
                Event::LevelUp { level: 2 },
            ],
        };
        assert!(report.depleted());
        assert_eq!(report.level_ups().collect::<Vec<_>>(), vec![1, 2]);
    }
}
