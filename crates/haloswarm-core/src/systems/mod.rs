//! Per-frame subsystems that run after the unit has ticked.
//!
//! Subsystem managers (contact damage, weapon strikes, and host-side
//! collaborators such as the enemy manager or projectile launchers) share one
//! trait, [`FrameSystem`]. The [`Game`](crate::game::Game) runs them strictly
//! after the unit and in a fixed order, so every system sees the unit state
//! for the current frame.
//!
//! # In-repo systems
//!
//! - [`PlayerCollisionSystem`]: Contact damage from touching enemies
//! - [`WeaponStrikeSystem`]: Consumes weapon strikes as they come off cooldown
//!
//! # Example
//!
//! ```
//! use haloswarm_core::event::Event;
//! use haloswarm_core::systems::{FrameContext, FrameSystem};
//! use haloswarm_core::unit::Unit;
//!
//! /// Grants a trickle of experience every frame.
//! struct Trickle;
//!
//! impl FrameSystem for Trickle {
//!     fn name(&self) -> &str {
//!         "trickle"
//!     }
//!
//!     fn tick(&mut self, ctx: &FrameContext, unit: &mut Unit) -> Vec<Event> {
//!         unit.add_experience(ctx.delta)
//!     }
//! }
//! ```

mod contact;
mod strike;

pub use contact::{EnemyId, PlayerCollisionSystem};
pub use strike::WeaponStrikeSystem;

use crate::event::Event;
use crate::unit::Unit;

/// Most weapon strikes, or contact-hit rounds, a single frame may fire.
///
/// A long host frame (a stall, an app resumed from background) would
/// otherwise bank an unbounded backlog; anything past this is dropped.
pub const MAX_CATCH_UP_PER_FRAME: u32 = 8;

/// Timing for the frame being processed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Index of this frame, counting only frames that ran.
    pub frame: u64,
    /// Seconds since the previous frame.
    pub delta: f32,
}

/// A subsystem ticked once per running frame, after the unit.
///
/// # Invariants
///
/// - Systems run in registration order every frame
/// - Systems never run on paused frames or once the unit is terminal
pub trait FrameSystem {
    /// Stable name for logs.
    fn name(&self) -> &str;

    /// Advances the system by one frame, returning the events it caused.
    fn tick(&mut self, ctx: &FrameContext, unit: &mut Unit) -> Vec<Event>;
}
