//! Weapon strikes.
//!
//! The unit's weapon swings on its own as soon as the cooldown allows. The
//! host owns the weapon's hit area and applies the damage carried by each
//! `Strike` event to the enemies inside it.

use tracing::debug;

use super::{FrameContext, FrameSystem, MAX_CATCH_UP_PER_FRAME};
use crate::event::Event;
use crate::unit::Unit;

/// Fires the unit's weapon whenever it is off cooldown.
///
/// Overshoot from a long frame can bank more than one strike; they are
/// emitted together, up to [`MAX_CATCH_UP_PER_FRAME`] per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeaponStrikeSystem {
    strikes: u64,
}

impl WeaponStrikeSystem {
    /// Creates the system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total strikes fired so far.
    #[must_use]
    pub const fn strikes(&self) -> u64 {
        self.strikes
    }
}

impl FrameSystem for WeaponStrikeSystem {
    fn name(&self) -> &str {
        "weapon_strike"
    }

    fn tick(&mut self, ctx: &FrameContext, unit: &mut Unit) -> Vec<Event> {
        let fired = unit.weapon_mut().drain_strikes(MAX_CATCH_UP_PER_FRAME);
        if fired == 0 {
            return vec![];
        }
        let damage = unit.weapon().damage();
        self.strikes += u64::from(fired);
        debug!(damage, fired, frame = ctx.frame, "weapon strike");
        (0..fired).map(|_| Event::Strike { damage }).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::spawn_idle_unit;

    fn ctx() -> FrameContext {
        FrameContext {
            frame: 0,
            delta: 0.0,
        }
    }

    #[test]
    fn name_is_stable() {
        assert_eq!(WeaponStrikeSystem::new().name(), "weapon_strike");
    }

    #[test]
    fn cooling_weapon_does_not_strike() {
        let mut system = WeaponStrikeSystem::new();
        let mut unit = spawn_idle_unit();
        unit.tick(0.6);
        assert!(system.tick(&ctx(), &mut unit).is_empty());
        assert_eq!(system.strikes(), 0);
    }

    #[test]
    fn ready_weapon_strikes_and_keeps_overshoot() {
        // strike delay 1.0, damage 5
        let mut system = WeaponStrikeSystem::new();
        let mut unit = spawn_idle_unit();
        unit.tick(0.6);
        unit.tick(0.5);

        let events = system.tick(&ctx(), &mut unit);
        assert_eq!(events, vec![Event::Strike { damage: 5.0 }]);
        assert!((unit.weapon().elapsed() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn banked_strikes_fire_together() {
        let mut system = WeaponStrikeSystem::new();
        let mut unit = spawn_idle_unit();
        unit.tick(2.5);
        assert_eq!(system.tick(&ctx(), &mut unit).len(), 2);
        assert_eq!(system.strikes(), 2);
    }

    #[test]
    fn long_stall_is_capped() {
        let mut system = WeaponStrikeSystem::new();
        let mut unit = spawn_idle_unit();
        unit.tick(100_000.0);
        let events = system.tick(&ctx(), &mut unit);
        assert_eq!(events.len(), MAX_CATCH_UP_PER_FRAME as usize);
        assert!(!unit.weapon().is_ready());
        assert!(system.tick(&ctx(), &mut unit).is_empty());
    }
}
