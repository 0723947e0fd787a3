//! Stat models owned by a [`Unit`](crate::unit::Unit).
//!
//! Each stat is a small self-contained state machine driven by elapsed time
//! or gameplay events:
//!
//! - [`Health`]: Clamped hit points
//! - [`Level`]: Experience thresholds and level index
//! - [`Regeneration`]: Delayed healing after damage
//! - [`Weapon`]: Strike cooldown and damage
//!
//! Stats never hold references to each other. Where one stat acts on another
//! (regeneration healing health), the target is passed in by the owner.

mod health;
mod level;
mod regeneration;
mod weapon;

pub use health::Health;
pub use level::Level;
pub use regeneration::{RegenState, Regeneration};
pub use weapon::Weapon;

pub(crate) use weapon::drain_cooldown;
