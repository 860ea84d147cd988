/// threat_model.rs
/// Threat evaluation for the UI panel and the session log
///
/// Pure function of the Euclidean distance between the two actor centers.
/// One-way observation: nothing here feeds back into the pursuit decision.
///
/// Bands:
/// - distance > 400 → 10
/// - distance > 250 → 40
/// - distance > 150 → 70
/// - otherwise      → 100
use serde::{Deserialize, Serialize};

use crate::engine::physics_constants::threat;
use crate::engine::types::Rect;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatReport {
    pub distance: f32,
    /// One of 10 / 40 / 70 / 100
    pub threat_level: u8,
    pub decision_reason: String,
}

/// Band lookup for a center-to-center distance.
pub fn threat_band(distance: f32) -> (u8, &'static str) {
    if distance > threat::FAR {
        (threat::LEVEL_FAR, "Adversary too far - passive patrol")
    } else if distance > threat::MID {
        (threat::LEVEL_MID, "Analyzing movement - pursuit")
    } else if distance > threat::NEAR {
        (threat::LEVEL_NEAR, "Player located - computing trajectory")
    } else {
        (threat::LEVEL_CONTACT, "DANGER - adversary attacking!")
    }
}

pub fn evaluate(adversary: &Rect, player: &Rect) -> ThreatReport {
    let distance = adversary.center_distance(player);
    let (threat_level, reason) = threat_band(distance);
    ThreatReport { distance, threat_level, decision_reason: reason.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges_are_exclusive() {
        assert_eq!(threat_band(1000.0).0, 10);
        assert_eq!(threat_band(400.1).0, 10);
        assert_eq!(threat_band(400.0).0, 40);
        assert_eq!(threat_band(250.0).0, 70);
        assert_eq!(threat_band(150.0).0, 100);
        assert_eq!(threat_band(0.0).0, 100);
    }

    #[test]
    fn test_evaluate_uses_centers() {
        // Centers (132, 132) and (432, 532): 300 / 400 / 500 triangle
        let adv = Rect::new(100, 100, 64, 64);
        let player = Rect::new(392, 492, 80, 80);
        let report = evaluate(&adv, &player);
        assert_eq!(report.distance, 500.0);
        assert_eq!(report.threat_level, 10);
        assert!(report.decision_reason.contains("passive"));
    }

    #[test]
    fn test_overlapping_actors_are_maximum_threat() {
        let r = Rect::new(500, 600, 64, 64);
        let report = evaluate(&r, &r);
        assert_eq!(report.distance, 0.0);
        assert_eq!(report.threat_level, 100);
    }
}
