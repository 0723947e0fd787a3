//! Movement input sources.
//!
//! A unit reads one 2-D axis per frame from an [`InputSource`]. Device
//! handling belongs to the host; the sources here turn already-sampled device
//! state into an axis:
//!
//! - [`ConstantInput`]: Fixed axis, for tests and bots
//! - [`ScriptedInput`]: Per-frame axis script, for replays and the harness
//! - [`KeyboardInput`]: Four held direction keys
//! - [`MultiInput`]: Priority combination of several sources
//!
//! The host keeps a handle to sources it feeds (such as the keyboard) by
//! sharing them through `Rc<RefCell<_>>`, which is itself an input source.

use std::cell::RefCell;
use std::rc::Rc;

use bitflags::bitflags;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Produces a movement axis each frame, components typically in `[-1, 1]`.
pub trait InputSource {
    /// Samples the axis for the current frame.
    fn axis(&mut self) -> Vec2;
}

impl<T: InputSource + ?Sized> InputSource for Box<T> {
    fn axis(&mut self) -> Vec2 {
        (**self).axis()
    }
}

impl<T: InputSource + ?Sized> InputSource for Rc<RefCell<T>> {
    fn axis(&mut self) -> Vec2 {
        self.borrow_mut().axis()
    }
}

// =============================================================================
// Constant
// =============================================================================

/// Always reports the same axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstantInput(pub Vec2);

impl InputSource for ConstantInput {
    fn axis(&mut self) -> Vec2 {
        self.0
    }
}

// =============================================================================
// Scripted
// =============================================================================

/// Replays a fixed list of axes, one per frame, then holds the last one.
///
/// An empty script always reports zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptedInput {
    frames: Vec<Vec2>,
    cursor: usize,
}

impl ScriptedInput {
    /// Creates a script from per-frame axes.
    #[must_use]
    pub fn new(frames: Vec<Vec2>) -> Self {
        Self { frames, cursor: 0 }
    }

    /// Number of frames already replayed.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.cursor
    }
}

impl InputSource for ScriptedInput {
    fn axis(&mut self) -> Vec2 {
        let Some(last) = self.frames.len().checked_sub(1) else {
            return Vec2::ZERO;
        };
        let axis = self.frames[self.cursor.min(last)];
        self.cursor += 1;
        axis
    }
}

// =============================================================================
// Keyboard
// =============================================================================

bitflags! {
    /// Direction keys currently held.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Keys: u8 {
        /// Up (W or arrow up)
        const UP = 1 << 0;
        /// Down (S or arrow down)
        const DOWN = 1 << 1;
        /// Left (A or arrow left)
        const LEFT = 1 << 2;
        /// Right (D or arrow right)
        const RIGHT = 1 << 3;
    }
}

/// Axis from four held direction keys.
///
/// Opposite keys cancel. Diagonals are normalized so moving diagonally is
/// not faster than moving straight.
///
/// # Example
///
/// ```
/// use haloswarm_core::input::{InputSource, KeyboardInput, Keys};
/// use glam::Vec2;
///
/// let mut keyboard = KeyboardInput::new();
/// keyboard.press(Keys::UP);
/// assert_eq!(keyboard.axis(), Vec2::Y);
///
/// keyboard.press(Keys::DOWN);
/// assert_eq!(keyboard.axis(), Vec2::ZERO);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardInput {
    held: Keys,
}

impl KeyboardInput {
    /// Creates a keyboard with nothing held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks keys as held.
    pub fn press(&mut self, keys: Keys) {
        self.held.insert(keys);
    }

    /// Marks keys as released.
    pub fn release(&mut self, keys: Keys) {
        self.held.remove(keys);
    }

    /// Keys currently held.
    #[must_use]
    pub const fn held(&self) -> Keys {
        self.held
    }
}

impl InputSource for KeyboardInput {
    fn axis(&mut self) -> Vec2 {
        let mut axis = Vec2::ZERO;
        if self.held.contains(Keys::UP) {
            axis.y += 1.0;
        }
        if self.held.contains(Keys::DOWN) {
            axis.y -= 1.0;
        }
        if self.held.contains(Keys::RIGHT) {
            axis.x += 1.0;
        }
        if self.held.contains(Keys::LEFT) {
            axis.x -= 1.0;
        }
        axis.normalize_or_zero()
    }
}

// =============================================================================
// Multi
// =============================================================================

/// Combines sources by priority: the first non-zero axis wins.
///
/// Every source is sampled each frame so scripted sources stay in step.
#[derive(Default)]
pub struct MultiInput {
    sources: Vec<Box<dyn InputSource>>,
}

impl MultiInput {
    /// Creates a combination, highest priority first.
    #[must_use]
    pub fn new(sources: Vec<Box<dyn InputSource>>) -> Self {
        Self { sources }
    }

    /// Appends a lower-priority source.
    pub fn push(&mut self, source: Box<dyn InputSource>) {
        self.sources.push(source);
    }

    /// Number of combined sources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns `true` if no sources are combined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl std::fmt::Debug for MultiInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiInput")
            .field("sources", &format!("[{} sources]", self.sources.len()))
            .finish()
    }
}

impl InputSource for MultiInput {
    fn axis(&mut self) -> Vec2 {
        let mut chosen = Vec2::ZERO;
        for source in &mut self.sources {
            let axis = source.axis();
            if chosen == Vec2::ZERO {
                chosen = axis;
            }
        }
        chosen
    }
}
