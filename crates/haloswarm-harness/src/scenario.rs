//! Scenario files: a scripted session for the headless runner.
//!
//! A scenario fixes the frame count, the frame delta, the input script, and
//! a list of host actions keyed by frame index (damage, pickups, contacts,
//! pauses, upgrades). Actions for a frame are applied in file order before
//! that frame runs.

use glam::Vec2;
use haloswarm_core::input::{InputSource, ScriptedInput};
use haloswarm_core::upgrade::StatUpgrade;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// A complete scripted session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    /// Number of host frames to run, paused ones included.
    pub frames: u64,
    /// Seconds per frame.
    pub dt: f32,
    /// Where movement comes from.
    #[serde(default)]
    pub input: InputScript,
    /// Host actions, applied before the frame they name.
    #[serde(default)]
    pub actions: Vec<TimedAction>,
    /// Terminate the unit as soon as its health runs out.
    #[serde(default = "default_true")]
    pub stop_on_death: bool,
}

fn default_true() -> bool {
    true
}

/// Input for the session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum InputScript {
    /// Stand still.
    #[default]
    Still,
    /// One axis per frame, holding the last.
    Path {
        /// Per-frame axes as `[x, y]`.
        axes: Vec<Vec2>,
    },
    /// Seeded random direction changes.
    RandomWalk {
        /// RNG seed.
        seed: u64,
        /// Frames between direction changes.
        #[serde(rename = "turnEvery")]
        turn_every: u32,
    },
}

impl InputScript {
    /// Builds the input source for this script.
    pub fn build(&self) -> Box<dyn InputSource> {
        match self {
            Self::Still => Box::new(ScriptedInput::new(vec![])),
            Self::Path { axes } => Box::new(ScriptedInput::new(axes.clone())),
            Self::RandomWalk { seed, turn_every } => {
                Box::new(RandomWalk::new(*seed, *turn_every))
            }
        }
    }
}

/// An action tagged with the frame it happens on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedAction {
    /// Host frame index (counting paused frames).
    pub frame: u64,
    /// What happens.
    #[serde(flatten)]
    pub action: Action,
}

/// Something the host does to the game between frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Action {
    /// A projectile or hazard hit.
    Damage {
        /// Hit points lost.
        amount: f32,
    },
    /// A kill was scored.
    Experience {
        /// Experience granted.
        amount: f32,
    },
    /// A coin was picked up.
    Gold {
        /// Base value before the gold multiplier.
        amount: u32,
    },
    /// An enemy started touching the player.
    BeginContact {
        /// Host enemy id.
        enemy: u64,
        /// Damage per contact hit.
        damage: f32,
    },
    /// An enemy stopped touching the player.
    EndContact {
        /// Host enemy id.
        enemy: u64,
    },
    /// A menu opened.
    Pause,
    /// A menu closed.
    Resume,
    /// The player picked an upgrade.
    Upgrade {
        /// The chosen upgrade.
        upgrade: StatUpgrade,
    },
}

/// Wanders in a random unit direction, changing course every few frames.
#[derive(Debug, Clone)]
pub struct RandomWalk {
    rng: ChaCha8Rng,
    heading: Vec2,
    turn_every: u32,
    frame: u32,
}

impl RandomWalk {
    /// Creates a walk; identical seeds give identical paths.
    pub fn new(seed: u64, turn_every: u32) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            heading: Vec2::ZERO,
            turn_every: turn_every.max(1),
            frame: 0,
        }
    }
}

impl InputSource for RandomWalk {
    fn axis(&mut self) -> Vec2 {
        if self.frame % self.turn_every == 0 {
            let angle: f32 = self.rng.gen_range(0.0..std::f32::consts::TAU);
            // One in four turns stops instead.
            self.heading = if self.rng.gen_bool(0.25) {
                Vec2::ZERO
            } else {
                Vec2::from_angle(angle)
            };
        }
        self.frame = self.frame.wrapping_add(1);
        self.heading
    }
}
