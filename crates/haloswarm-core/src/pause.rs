//! Global pause state.
//!
//! The pause flag is an ordinary value owned by the host (opened menus,
//! upgrade choices, focus loss) and passed into every
//! [`Game::frame`](crate::game::Game::frame) call. It is read once per frame;
//! a paused frame skips the whole update fan-out.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Pause flag with nesting by reason count.
///
/// Every `pause` must be matched by a `resume`, so an upgrade dialog opened
/// on top of the pause menu does not unpause the game when it closes.
///
/// # Example
///
/// ```
/// use haloswarm_core::pause::Pauser;
///
/// let mut pauser = Pauser::new();
/// pauser.pause();
/// pauser.pause();
/// pauser.resume();
/// assert!(pauser.is_paused());
///
/// pauser.resume();
/// assert!(!pauser.is_paused());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pauser {
    depth: u32,
}

impl Pauser {
    /// Creates an unpaused state.
    #[must_use]
    pub const fn new() -> Self {
        Self { depth: 0 }
    }

    /// Returns `true` while any pause is outstanding.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.depth > 0
    }

    /// Adds one pause.
    pub fn pause(&mut self) {
        self.depth = self.depth.saturating_add(1);
        debug!(depth = self.depth, "pause");
    }

    /// Removes one pause; extra resumes are ignored.
    pub fn resume(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        debug!(depth = self.depth, "resume");
    }
}
