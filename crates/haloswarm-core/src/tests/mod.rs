//! Test module for determinism and integration tests.
//!
//! - `determinism.rs`: Identical inputs give identical state and events
//! - `integration.rs`: Whole-game scenarios through `Game::frame`
//! - `helpers.rs`: Settings fixtures and unit factories

mod helpers;

// Re-export for convenience
pub use helpers::*;
