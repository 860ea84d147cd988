//! Adversary decision state
//!
//! Two phases only:
//! - `Descend`: above the level (y < 0), drops straight down, ignores the player
//! - `Chase`: normal pursuit, the only steady state
//!
//! Slowdown is not a state. It is a countdown multiplier applied inside Chase.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DecisionState {
    #[default]
    Descend,
    Chase,
}

impl DecisionState {
    /// Label written to the session log.
    pub fn label(self) -> &'static str {
        match self {
            DecisionState::Descend => "DESCEND",
            DecisionState::Chase => "CHASE",
        }
    }

    /// Decided purely by the adversary's vertical position.
    pub fn for_position(y: i32) -> Self {
        if y < 0 {
            DecisionState::Descend
        } else {
            DecisionState::Chase
        }
    }
}

/// Externally triggered speed reduction.
///
/// Rules:
/// - `trigger(n)` (re)starts the window at `n` ticks; a shorter trigger never
///   cuts an active window short.
/// - The multiplier is read before `tick()` in the same adversary tick, so a
///   window of `n` covers exactly `n` ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SlowdownModifier {
    remaining: u32,
}

impl SlowdownModifier {
    pub fn trigger(&mut self, ticks: u32) {
        self.remaining = self.remaining.max(ticks);
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// `slow_multiplier` while active, otherwise 1.0.
    pub fn multiplier(&self, slow_multiplier: f32) -> f32 {
        if self.is_active() {
            slow_multiplier
        } else {
            1.0
        }
    }

    /// End-of-tick countdown.
    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn clear(&mut self) {
        self.remaining = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_position() {
        assert_eq!(DecisionState::for_position(-200), DecisionState::Descend);
        assert_eq!(DecisionState::for_position(-1), DecisionState::Descend);
        assert_eq!(DecisionState::for_position(0), DecisionState::Chase);
        assert_eq!(DecisionState::Chase.label(), "CHASE");
    }

    #[test]
    fn test_slowdown_covers_exactly_180_ticks() {
        let mut slow = SlowdownModifier::default();
        slow.trigger(180);

        for tick in 1..=180 {
            assert_eq!(slow.multiplier(0.5), 0.5, "tick {tick} should be slowed");
            slow.tick();
        }
        // Tick 181
        assert_eq!(slow.multiplier(0.5), 1.0);
        assert!(!slow.is_active());
    }

    #[test]
    fn test_retrigger_extends_but_never_shortens() {
        let mut slow = SlowdownModifier::default();
        slow.trigger(100);
        for _ in 0..50 {
            slow.tick();
        }
        slow.trigger(30);
        assert_eq!(slow.remaining(), 50);
        slow.trigger(180);
        assert_eq!(slow.remaining(), 180);
    }

    #[test]
    fn test_tick_saturates() {
        let mut slow = SlowdownModifier::default();
        slow.tick();
        assert_eq!(slow.remaining(), 0);
        assert_eq!(slow.multiplier(0.5), 1.0);
    }
}
