//! The player unit: input, movement, and stat ticking.
//!
//! A [`Unit`] exclusively owns one of each stat model and a bound
//! [`InputSource`]. It only exists fully built: [`Unit::new`] validates the
//! settings record and constructs everything at once, so there is no
//! half-initialized state to guard against and no re-initialization.
//!
//! # Tick order
//!
//! [`Unit::tick`] always runs the same sequence:
//!
//! 1. Sample the input axis
//! 2. Move by `axis * delta * speed` (x/y only)
//! 3. Advance the weapon cooldown
//! 4. Advance regeneration (which may heal)
//!
//! # Example
//!
//! ```
//! use haloswarm_core::input::ConstantInput;
//! use haloswarm_core::unit::Unit;
//! # use haloswarm_core::config::PlayerSettings;
//! use glam::{Vec2, Vec3};
//!
//! # let settings = PlayerSettings {
//! #     max_hp: 100.0, regeneration_delay: 3.0, regeneration_rate: 10.0,
//! #     required_xp: vec![10.0], xp_multiplier: 1.0, speed: 2.0,
//! #     strike_delay: 1.0, damage: 5.0, gold_multiplier: 1.0,
//! #     collision_delay: 1.0, halo_launcher: Default::default(),
//! #     xy_launchers: Default::default(),
//! # };
//! let mut unit = Unit::new(Box::new(ConstantInput(Vec2::X)), &settings).unwrap();
//! unit.tick(0.5);
//! assert_eq!(unit.position(), Vec3::new(1.0, 0.0, 0.0));
//! ```

use std::fmt;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::config::PlayerSettings;
use crate::error::{ensure_finite, ConfigError};
use crate::event::Event;
use crate::input::InputSource;
use crate::stats::{Health, Level, Regeneration, Weapon};
use crate::upgrade::StatUpgrade;

// =============================================================================
// Lifecycle
// =============================================================================

/// Lifecycle of a unit.
///
/// ```text
/// Active --pause--> Paused --resume--> Active
///   |                  |
///   +---terminate------+----> Terminal (permanent)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitState {
    /// Ticking normally.
    Active,
    /// Frozen; ticks are ignored until resumed.
    Paused,
    /// Finished (usually after death); never ticks again.
    Terminal,
}

impl fmt::Display for UnitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Paused => write!(f, "Paused"),
            Self::Terminal => write!(f, "Terminal"),
        }
    }
}

// =============================================================================
// Unit
// =============================================================================

/// The player unit.
pub struct Unit {
    input: Box<dyn InputSource>,
    position: Vec3,
    speed: f32,
    health: Health,
    level: Level,
    regeneration: Regeneration,
    weapon: Weapon,
    gold: u32,
    gold_multiplier: f32,
    state: UnitState,
}

impl fmt::Debug for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unit")
            .field("position", &self.position)
            .field("speed", &self.speed)
            .field("health", &self.health)
            .field("level", &self.level)
            .field("regeneration", &self.regeneration)
            .field("weapon", &self.weapon)
            .field("gold", &self.gold)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Unit {
    /// Builds a unit at the origin from its settings record.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] in `settings`.
    pub fn new(input: Box<dyn InputSource>, settings: &PlayerSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            input,
            position: Vec3::ZERO,
            speed: settings.speed,
            health: Health::new(settings.max_hp)?,
            level: Level::new(settings.required_xp.clone(), settings.xp_multiplier)?,
            regeneration: Regeneration::new(
                settings.regeneration_delay,
                settings.regeneration_rate,
            )?,
            weapon: Weapon::new(settings.strike_delay, settings.damage)?,
            gold: 0,
            gold_multiplier: settings.gold_multiplier,
            state: UnitState::Active,
        })
    }

    /// Places the unit at `position`, e.g. the scene's spawn point.
    #[must_use]
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    // -------------------------------------------------------------------------
    // Frame update
    // -------------------------------------------------------------------------

    /// Advances the unit by `delta` seconds.
    ///
    /// Does nothing unless the unit is [`UnitState::Active`]. Returns a
    /// `Healed` event when regeneration restored health.
    pub fn tick(&mut self, delta: f32) -> Vec<Event> {
        let mut events = vec![];
        if self.state != UnitState::Active || !delta.is_finite() || delta <= 0.0 {
            return events;
        }

        let movement: Vec2 = self.input.axis() * (delta * self.speed);
        self.position.x += movement.x;
        self.position.y += movement.y;

        self.weapon.tick(delta);
        let healed = self.regeneration.tick(delta, &mut self.health);
        if healed > 0.0 {
            events.push(Event::Healed { amount: healed });
        }

        trace!(
            delta,
            x = self.position.x,
            y = self.position.y,
            hp = self.health.current(),
            "unit tick"
        );
        events
    }

    // -------------------------------------------------------------------------
    // Gameplay operations
    // -------------------------------------------------------------------------

    /// Damages the unit and restarts the regeneration delay.
    ///
    /// Emits `Damaged`, followed by `Depleted` on the hit that empties health.
    /// Damage to a terminal unit is ignored.
    pub fn apply_damage(&mut self, amount: f32) -> Vec<Event> {
        if self.state == UnitState::Terminal || !amount.is_finite() || amount < 0.0 {
            return vec![];
        }
        let depleted = self.health.apply_damage(amount);
        self.regeneration.notify_damaged();

        let mut events = vec![Event::Damaged {
            amount,
            remaining: self.health.current(),
        }];
        if depleted {
            info!(amount, "unit health depleted");
            events.push(Event::Depleted);
        }
        events
    }

    /// Grants experience, emitting one `LevelUp` per level gained.
    pub fn add_experience(&mut self, amount: f32) -> Vec<Event> {
        let before = self.level.level();
        let gained = self.level.add_experience(amount);
        (before + 1..=before + gained)
            .map(|level| Event::LevelUp { level })
            .collect()
    }

    /// Adds `base` gold scaled by the gold multiplier, rounded to the nearest
    /// coin. Returns the gold actually gained.
    pub fn collect_gold(&mut self, base: u32) -> u32 {
        // Float-to-int `as` saturates: negatives and NaN give 0, huge products u32::MAX.
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            clippy::cast_precision_loss
        )]
        let gained = (base as f32 * self.gold_multiplier).round() as u32;
        self.gold = self.gold.saturating_add(gained);
        gained
    }

    /// Applies a stat upgrade.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the upgrade would push a stat outside
    /// its valid range; the unit is left unchanged.
    pub fn apply_upgrade(&mut self, upgrade: StatUpgrade) -> Result<(), ConfigError> {
        match upgrade {
            StatUpgrade::MaxHp { amount } => self.health.increase_max(amount)?,
            StatUpgrade::RegenerationRate { amount } => self.regeneration.increase_rate(amount)?,
            StatUpgrade::RegenerationDelay { seconds } => {
                self.regeneration.reduce_delay(seconds)?;
            }
            StatUpgrade::WeaponDamage { amount } => self.weapon.increase_damage(amount)?,
            StatUpgrade::StrikeDelay { factor } => self.weapon.scale_strike_delay(factor)?,
            StatUpgrade::Speed { amount } => {
                let speed = self.speed + ensure_finite("speed", amount)?;
                if speed < 0.0 {
                    return Err(ConfigError::NegativeSpeed(speed));
                }
                self.speed = speed;
            }
            StatUpgrade::GoldMultiplier { amount } => {
                let multiplier = self.gold_multiplier + ensure_finite("goldMultiplier", amount)?;
                if multiplier < 0.0 {
                    return Err(ConfigError::NegativeGoldMultiplier(multiplier));
                }
                self.gold_multiplier = multiplier;
            }
        }
        debug!(%upgrade, "upgrade applied");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> UnitState {
        self.state
    }

    /// Freezes an active unit. Has no effect in other states.
    pub fn pause(&mut self) {
        if self.state == UnitState::Active {
            self.state = UnitState::Paused;
            info!("unit paused");
        }
    }

    /// Unfreezes a paused unit. Has no effect in other states.
    pub fn resume(&mut self) {
        if self.state == UnitState::Paused {
            self.state = UnitState::Active;
            info!("unit resumed");
        }
    }

    /// Stops the unit permanently.
    pub fn terminate(&mut self) {
        if self.state != UnitState::Terminal {
            self.state = UnitState::Terminal;
            info!("unit terminated");
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// World position; only x and y change with movement.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Moves the unit directly, e.g. when the host teleports it.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Movement speed in units per second.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Health stat.
    #[must_use]
    pub const fn health(&self) -> &Health {
        &self.health
    }

    /// Level stat.
    #[must_use]
    pub const fn level(&self) -> &Level {
        &self.level
    }

    /// Regeneration stat.
    #[must_use]
    pub const fn regeneration(&self) -> &Regeneration {
        &self.regeneration
    }

    /// Weapon stat.
    #[must_use]
    pub const fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    /// Mutable weapon, for systems that consume strikes.
    pub fn weapon_mut(&mut self) -> &mut Weapon {
        &mut self.weapon
    }

    /// Gold collected so far.
    #[must_use]
    pub const fn gold(&self) -> u32 {
        self.gold
    }

    /// Current gold multiplier.
    #[must_use]
    pub const fn gold_multiplier(&self) -> f32 {
        self.gold_multiplier
    }

    /// Serializable copy of everything except the input binding.
    #[must_use]
    pub fn snapshot(&self) -> UnitSnapshot {
        UnitSnapshot {
            position: self.position,
            speed: self.speed,
            health: self.health.clone(),
            level: self.level.clone(),
            regeneration: self.regeneration.clone(),
            weapon: self.weapon.clone(),
            gold: self.gold,
            gold_multiplier: self.gold_multiplier,
            state: self.state,
        }
    }
}

/// Point-in-time copy of a unit's state, for comparisons and telemetry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitSnapshot {
    /// World position.
    pub position: Vec3,
    /// Movement speed.
    pub speed: f32,
    /// Health stat.
    pub health: Health,
    /// Level stat.
    pub level: Level,
    /// Regeneration stat.
    pub regeneration: Regeneration,
    /// Weapon stat.
    pub weapon: Weapon,
    /// Gold collected.
    pub gold: u32,
    /// Gold multiplier.
    pub gold_multiplier: f32,
    /// Lifecycle state.
    pub state: UnitState,
}
