//! Threat/Telemetry Aggregator
//!
//! Derives the UI panel state each tick and appends structured samples to the
//! session record:
//! - threat level + player center every `sample_every_ticks` ticks
//! - an `ai_decisions` entry whenever the adversary's state changes

use serde::{Deserialize, Serialize};

use crate::engine::actors::{Adversary, Player};
use crate::engine::decision_state::DecisionState;
use crate::engine::threat_model::{evaluate, ThreatReport};
use crate::models::SessionRecord;

/// Read-only view for a UI panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub state: DecisionState,
    pub distance: f32,
    pub threat_level: u8,
    pub decision_reason: String,
    /// Multiplier the adversary actually moved with on the last tick
    pub speed_multiplier: f32,
    /// Confidence of the last prediction (0 when none)
    pub confidence: f32,
    /// "Adaptive" with session statistics, "Learning" without
    pub intelligence: String,
}

impl TelemetrySnapshot {
    pub fn capture(adversary: &Adversary, player: &Player) -> Self {
        let ThreatReport { distance, threat_level, decision_reason } =
            evaluate(adversary.rect(), player.rect());
        let brain = &adversary.brain;
        Self {
            state: adversary.state,
            distance,
            threat_level,
            decision_reason,
            speed_multiplier: adversary.effective_multiplier,
            confidence: brain.last_prediction().map_or(0.0, |p| p.confidence),
            intelligence: intelligence_label(brain.zone_bias().has_statistics()).to_string(),
        }
    }
}

pub fn intelligence_label(has_statistics: bool) -> &'static str {
    if has_statistics {
        "Adaptive"
    } else {
        "Learning"
    }
}

/// Per-run sampling cadence and state-transition tracking.
#[derive(Debug, Clone)]
pub struct TelemetryRecorder {
    sample_every: u32,
    counter: u32,
    last_state: Option<DecisionState>,
}

impl TelemetryRecorder {
    pub fn new(sample_every_ticks: u32) -> Self {
        Self { sample_every: sample_every_ticks.max(1), counter: 0, last_state: None }
    }

    /// Call once per tick, after all movement and collision checks.
    ///
    /// The first observed state is the baseline and is not logged.
    pub fn record(
        &mut self,
        time_secs: f32,
        state: DecisionState,
        threat: &ThreatReport,
        player_center: (f32, f32),
        session: &mut SessionRecord,
    ) {
        self.counter += 1;
        if self.counter >= self.sample_every {
            self.counter = 0;
            session.log_sample(time_secs, threat.threat_level, player_center);
        }

        match self.last_state {
            None => self.last_state = Some(state),
            Some(prev) if prev != state => {
                log::debug!("adversary state {} -> {} at {:.2}s", prev.label(), state.label(), time_secs);
                session.log_decision(time_secs, state.label());
                self.last_state = Some(state);
            }
            Some(_) => {}
        }
    }

    /// Restart the sampling cadence (new level).
    pub fn reset(&mut self) {
        self.counter = 0;
        self.last_state = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::PursuitConfig;
    use crate::engine::zone_bias::ZoneBias;

    fn report(level: u8) -> ThreatReport {
        ThreatReport { distance: 0.0, threat_level: level, decision_reason: String::new() }
    }

    #[test]
    fn test_samples_every_n_ticks() {
        let mut rec = TelemetryRecorder::new(15);
        let mut session = SessionRecord::new("Student", 1);
        for tick in 1..=45u32 {
            rec.record(tick as f32 / 60.0, DecisionState::Chase, &report(40), (10.0, 20.0), &mut session);
        }
        assert_eq!(session.threat_history.len(), 3);
        assert_eq!(session.player_positions.len(), 3);
        assert_eq!(session.threat_history[0], (0.25, 40.0));
        assert_eq!(session.player_positions[2], [10.0, 20.0]);
    }

    #[test]
    fn test_logs_only_transitions() {
        let mut rec = TelemetryRecorder::new(15);
        let mut session = SessionRecord::new("Student", 1);
        let states = [
            DecisionState::Descend,
            DecisionState::Descend,
            DecisionState::Chase,
            DecisionState::Chase,
            DecisionState::Descend,
        ];
        for (i, s) in states.into_iter().enumerate() {
            rec.record(i as f32, s, &report(10), (0.0, 0.0), &mut session);
        }
        let logged: Vec<&str> = session.ai_decisions.iter().map(|d| d.state.as_str()).collect();
        assert_eq!(logged, vec!["CHASE", "DESCEND"]);
        assert_eq!(session.ai_decisions[0].time, 2.0);
    }

    #[test]
    fn test_snapshot_intelligence_label() {
        let player = Player::new(100, 600);
        let adv = Adversary::new(2600, -200, PursuitConfig::default(), ZoneBias::default());
        let snap = TelemetrySnapshot::capture(&adv, &player);
        assert_eq!(snap.intelligence, "Learning");
        assert_eq!(snap.state, DecisionState::Descend);
        assert_eq!(snap.threat_level, 10);
        assert_eq!(snap.confidence, 0.0);
    }
}
