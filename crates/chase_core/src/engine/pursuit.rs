//! Pursuit Decision Engine
//!
//! Turns the adversary's observation history of the player into a per-tick
//! movement intent. The brain is explicit state owned by one adversary; the
//! decision itself is a free function over that state.
//!
//! Per tick:
//! 1. Predict from history. Trust the prediction only when confidence is
//!    strictly above the gate, otherwise target the player's live center.
//!    Low-confidence predictions are discarded, never blended.
//! 2. `horizontal_delta = target_x - adversary_center_x`
//! 3. Jump if the target is above the vertical lead, or if the look-ahead
//!    probe hits any platform. The probe does not check the jump clears it.
//! 4. Speed bonus from the zone bias at the adversary's center x.

use serde::{Deserialize, Serialize};

use crate::engine::config::PursuitConfig;
use crate::engine::kinematics_history::HistoryBuffer;
use crate::engine::motion_prediction::{predict_with, PredictionResult};
use crate::engine::types::Rect;
use crate::engine::zone_bias::ZoneBias;

/// Adversary-owned observation state.
#[derive(Debug, Clone)]
pub struct AdversaryBrain {
    history: HistoryBuffer,
    last_prediction: Option<PredictionResult>,
    zone_bias: ZoneBias,
    cfg: PursuitConfig,
}

impl Default for AdversaryBrain {
    fn default() -> Self {
        Self::new(PursuitConfig::default(), ZoneBias::default())
    }
}

impl AdversaryBrain {
    pub fn new(cfg: PursuitConfig, zone_bias: ZoneBias) -> Self {
        Self {
            history: HistoryBuffer::new(cfg.history_capacity),
            last_prediction: None,
            zone_bias,
            cfg,
        }
    }

    /// Record the player's post-update center and velocity for this tick.
    pub fn observe(&mut self, player_rect: &Rect, player_velocity: (f32, f32)) {
        let (cx, cy) = player_rect.center();
        self.history.observe(cx, cy, player_velocity.0, player_velocity.1);
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// Prediction computed by the most recent [`decide`] call.
    pub fn last_prediction(&self) -> Option<&PredictionResult> {
        self.last_prediction.as_ref()
    }

    pub fn zone_bias(&self) -> &ZoneBias {
        &self.zone_bias
    }

    pub fn config(&self) -> &PursuitConfig {
        &self.cfg
    }

    /// Forget everything observed (respawn / level reload). Zone bias stays.
    pub fn reset(&mut self) {
        self.history.clear();
        self.last_prediction = None;
    }
}

/// Movement intent for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PursuitIntent {
    pub horizontal_delta: f32,
    pub should_jump: bool,
    pub speed_bonus: f32,
    /// Where the adversary is heading this tick
    pub target: (f32, f32),
    /// True when the target came from the predictor
    pub used_prediction: bool,
}

/// Decide this tick's movement.
///
/// `player_velocity` is accepted for parity with the observation step; the
/// decision itself only reads velocity through the history.
pub fn decide(
    brain: &mut AdversaryBrain,
    adversary_rect: &Rect,
    player_rect: &Rect,
    _player_velocity: (f32, f32),
    platforms: &[Rect],
) -> PursuitIntent {
    let cfg = &brain.cfg;
    brain.last_prediction = predict_with(&brain.history, cfg.lookahead_ticks, cfg);

    let (target, used_prediction) = match brain.last_prediction {
        Some(p) if p.confidence > cfg.confidence_gate => ((p.predicted_x, p.predicted_y), true),
        _ => (player_rect.center(), false),
    };

    let (adv_cx, _) = adversary_rect.center();
    let horizontal_delta = target.0 - adv_cx;

    let wants_height = target.1 < adversary_rect.top() as f32 - cfg.vertical_lead;
    let blocked_ahead = obstacle_ahead(adversary_rect, horizontal_delta, cfg.probe_offset, platforms);
    let should_jump = wants_height || blocked_ahead;

    let speed_bonus = brain.zone_bias.bonus(adv_cx);

    log::debug!(
        "pursuit: target=({:.1}, {:.1}) predicted={} dx={:.1} jump={} (lead={}, probe={}) bonus={:.2}",
        target.0,
        target.1,
        used_prediction,
        horizontal_delta,
        should_jump,
        wants_height,
        blocked_ahead,
        speed_bonus
    );

    PursuitIntent { horizontal_delta, should_jump, speed_bonus, target, used_prediction }
}

/// Look-ahead probe: the adversary's own box shifted `offset` toward the
/// target. `delta <= 0` probes to the left.
pub fn obstacle_ahead(adversary_rect: &Rect, delta: f32, offset: i32, platforms: &[Rect]) -> bool {
    let shift = if delta > 0.0 { offset } else { -offset };
    let probe = adversary_rect.translated(shift, 0);
    platforms.iter().any(|p| probe.intersects(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::ZoneConfig;

    fn brain() -> AdversaryBrain {
        AdversaryBrain::default()
    }

    #[test]
    fn test_no_history_targets_live_center() {
        let mut b = brain();
        let adv = Rect::new(1000, 616, 64, 64);
        let player = Rect::new(400, 600, 80, 80);

        let intent = decide(&mut b, &adv, &player, (0.0, 0.0), &[]);
        assert!(!intent.used_prediction);
        assert!(b.last_prediction().is_none());
        assert_eq!(intent.target, (440.0, 640.0));
        assert_eq!(intent.horizontal_delta, 440.0 - 1032.0);
        assert!(!intent.should_jump);
        assert_eq!(intent.speed_bonus, 0.0);
    }

    #[test]
    fn test_stationary_player_prediction() {
        // Center (500, 500), still for a full second
        let player = Rect::new(460, 460, 80, 80);
        let mut b = brain();
        for _ in 0..60 {
            b.observe(&player, (0.0, 0.0));
        }

        for lookahead in [0, 1, 20, 500] {
            let p = predict_with(b.history(), lookahead, b.config()).unwrap();
            assert_eq!((p.predicted_x, p.predicted_y), (500.0, 500.0));
            assert_eq!(p.confidence, 1.0);
        }

        let adv = Rect::new(900, 436, 64, 64);
        let intent = decide(&mut b, &adv, &player, (0.0, 0.0), &[]);
        assert!(intent.used_prediction);
        assert_eq!(intent.target, (500.0, 500.0));
    }

    #[test]
    fn test_steady_runner_is_led() {
        let mut b = brain();
        for i in 0..10 {
            let player = Rect::new(100 + i * 5, 600, 80, 80);
            b.observe(&player, (5.0, 0.0));
        }
        let player = Rect::new(145, 600, 80, 80);
        let adv = Rect::new(1000, 616, 64, 64);
        let intent = decide(&mut b, &adv, &player, (5.0, 0.0), &[]);

        assert!(intent.used_prediction);
        // Last center x = 185, + 5 * 20 ticks
        assert_eq!(intent.target.0, 285.0);
    }

    #[test]
    fn test_erratic_runner_falls_back_to_live_position() {
        let mut b = brain();
        let player = Rect::new(300, 600, 80, 80);
        for i in 0..10 {
            let vx = if i % 2 == 0 { 7.0 } else { -7.0 };
            b.observe(&player, (vx, 0.0));
        }
        let adv = Rect::new(1000, 616, 64, 64);
        let intent = decide(&mut b, &adv, &player, (0.0, 0.0), &[]);

        let confidence = b.last_prediction().unwrap().confidence;
        assert!(confidence <= 0.6);
        assert!(!intent.used_prediction);
        assert_eq!(intent.target, player.center());
    }

    #[test]
    fn test_obstacle_probe_triggers_jump_without_vertical_lead() {
        let b = &mut brain();
        let adv = Rect::new(1000, 616, 64, 64);
        // Target level with the adversary, to the right
        let player = Rect::new(1400, 616, 64, 64);
        assert_eq!(player.center().1, adv.center().1);

        let wall = Rect::new(1080, 500, 40, 180);
        let intent = decide(b, &adv, &player, (0.0, 0.0), &[wall]);
        assert!(intent.horizontal_delta > 0.0);
        assert!(intent.should_jump);

        // Same layout without the wall: no reason to jump
        let intent = decide(b, &adv, &player, (0.0, 0.0), &[]);
        assert!(!intent.should_jump);
    }

    #[test]
    fn test_probe_direction_follows_delta() {
        let adv = Rect::new(1000, 616, 64, 64);
        let left_wall = Rect::new(940, 500, 40, 180);
        assert!(obstacle_ahead(&adv, -50.0, 40, &[left_wall]));
        assert!(!obstacle_ahead(&adv, 50.0, 40, &[left_wall]));
        // Zero delta probes left too
        assert!(obstacle_ahead(&adv, 0.0, 40, &[left_wall]));
    }

    #[test]
    fn test_vertical_lead_triggers_jump() {
        let mut b = brain();
        let adv = Rect::new(1000, 616, 64, 64);
        // Center y = 540, adversary top - 40 = 576
        let high = Rect::new(1200, 500, 80, 80);
        assert!(decide(&mut b, &adv, &high, (0.0, 0.0), &[]).should_jump);
        // Center y = 600: not high enough
        let low = Rect::new(1200, 560, 80, 80);
        assert!(!decide(&mut b, &adv, &low, (0.0, 0.0), &[]).should_jump);
    }

    #[test]
    fn test_zone_bonus_applies_at_adversary_center() {
        let cfg = ZoneConfig::default();
        let bias = ZoneBias::from_positions([[1000.0, 600.0]], &cfg, 3200.0);
        let mut b = AdversaryBrain::new(PursuitConfig::default(), bias);
        let player = Rect::new(0, 600, 80, 80);

        // Zone 3 center = 1120
        let near = Rect::new(1300, 616, 64, 64);
        assert_eq!(decide(&mut b, &near, &player, (0.0, 0.0), &[]).speed_bonus, 0.2);
        let far = Rect::new(2600, 616, 64, 64);
        assert_eq!(decide(&mut b, &far, &player, (0.0, 0.0), &[]).speed_bonus, 0.0);
    }

    #[test]
    fn test_reset_keeps_bias() {
        let bias = ZoneBias::from_positions([[10.0, 0.0]], &ZoneConfig::default(), 3200.0);
        let mut b = AdversaryBrain::new(PursuitConfig::default(), bias);
        b.observe(&Rect::new(0, 0, 10, 10), (1.0, 0.0));
        b.reset();
        assert!(b.history().is_empty());
        assert!(b.zone_bias().has_statistics());
    }
}
