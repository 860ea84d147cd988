//! Session summary
//!
//! Aggregates a list of session records into the numbers the offline tool
//! prints: score distribution and trend, per-session pacing, outcome counts,
//! average position and the zone histogram the adversary's bias is built from.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::config::ZoneConfig;
use crate::engine::items::ItemCounts;
use crate::engine::zone_bias::ZoneBias;
use crate::models::{EventKind, SessionRecord};

/// 세션별 지표
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionMetrics {
    pub score: u32,
    /// Last recorded event or threat sample, in seconds
    pub duration_secs: f32,
    /// Points per minute (0 when the session has no timeline)
    pub efficiency: f32,
    pub average_threat: f32,
    pub outcome: String,
}

impl SessionMetrics {
    pub fn from_record(record: &SessionRecord) -> Self {
        let duration_secs = record.duration_secs();
        let efficiency = if duration_secs > 0.0 {
            record.final_score as f32 / (duration_secs / 60.0)
        } else {
            0.0
        };
        Self {
            score: record.final_score,
            duration_secs,
            efficiency,
            average_threat: record.average_threat(),
            outcome: record.outcome.label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionSummary {
    pub total_sessions: usize,
    pub average_score: f64,
    pub median_score: f64,
    pub min_score: u32,
    pub max_score: u32,
    /// Population standard deviation
    pub score_std_dev: f64,
    /// Percent change of the last score over the one before it.
    /// `None` with fewer than two sessions; 0 when the previous score is 0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_trend: Option<f64>,
    /// Mean points per minute over all sessions
    pub average_efficiency: f32,
    /// In file order
    pub sessions: Vec<SessionMetrics>,
    /// Outcome label → count (unfinished records count under "")
    pub outcomes: BTreeMap<String, u32>,
    /// Mean of every recorded player center
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_position: Option<[f32; 2]>,
    pub zone_distribution: BTreeMap<i64, u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_zone: Option<i64>,
    /// Collect events per item kind
    pub items_collected: ItemCounts,
    /// Mean of the per-session average threat (sessions with samples only)
    pub average_threat: f32,
}

impl SessionSummary {
    pub fn is_empty(&self) -> bool {
        self.total_sessions == 0
    }

    /// Share of sessions that ended with `label`, in percent.
    pub fn outcome_percentage(&self, label: &str) -> f32 {
        if self.total_sessions == 0 {
            return 0.0;
        }
        let count = self.outcomes.get(label).copied().unwrap_or(0);
        count as f32 * 100.0 / self.total_sessions as f32
    }
}

pub fn summarize_sessions(
    records: &[SessionRecord],
    zone_cfg: &ZoneConfig,
    level_width: f32,
) -> SessionSummary {
    let mut summary = SessionSummary { total_sessions: records.len(), ..Default::default() };
    if records.is_empty() {
        return summary;
    }

    let scores: Vec<u32> = records.iter().map(|r| r.final_score).collect();
    let (mean, median, std_dev) = score_distribution(&scores);
    summary.average_score = mean;
    summary.median_score = median;
    summary.score_std_dev = std_dev;
    summary.min_score = scores.iter().copied().min().unwrap_or(0);
    summary.max_score = scores.iter().copied().max().unwrap_or(0);
    summary.score_trend = score_trend(&scores);

    summary.sessions = records.iter().map(SessionMetrics::from_record).collect();
    summary.average_efficiency =
        summary.sessions.iter().map(|m| m.efficiency).sum::<f32>() / summary.sessions.len() as f32;

    for record in records {
        *summary.outcomes.entry(record.outcome.label()).or_insert(0) += 1;
        for event in &record.events {
            if let (EventKind::Collect, Some(kind)) = (&event.kind, event.item) {
                summary.items_collected.add(kind);
            }
        }
    }

    let (mut sum_x, mut sum_y, mut n) = (0.0f64, 0.0f64, 0usize);
    for [x, y] in records.iter().flat_map(|r| r.player_positions.iter().copied()) {
        sum_x += x as f64;
        sum_y += y as f64;
        n += 1;
    }
    if n > 0 {
        summary.avg_position = Some([(sum_x / n as f64) as f32, (sum_y / n as f64) as f32]);
    }

    let bias = ZoneBias::from_positions(
        records.iter().flat_map(|r| r.player_positions.iter().copied()),
        zone_cfg,
        level_width,
    );
    summary.zone_distribution = bias.zone_counts().clone();
    summary.top_zone = bias.top_zone();

    let threats: Vec<f32> = records
        .iter()
        .filter(|r| !r.threat_history.is_empty())
        .map(SessionRecord::average_threat)
        .collect();
    if !threats.is_empty() {
        summary.average_threat = threats.iter().sum::<f32>() / threats.len() as f32;
    }

    summary
}

/// (mean, median, population stddev) of a non-empty score list.
fn score_distribution(scores: &[u32]) -> (f64, f64, f64) {
    let n = scores.len() as f64;
    let mean = scores.iter().map(|&s| s as f64).sum::<f64>() / n;
    let variance = scores.iter().map(|&s| (s as f64 - mean).powi(2)).sum::<f64>() / n;

    let mut sorted = scores.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
    } else {
        sorted[mid] as f64
    };

    (mean, median, variance.sqrt())
}

fn score_trend(scores: &[u32]) -> Option<f64> {
    let [.., prev, last] = scores else {
        return None;
    };
    if *prev == 0 {
        return Some(0.0);
    }
    Some((*last as f64 - *prev as f64) / *prev as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::items::ItemKind;
    use crate::models::{parse_sessions, Outcome};

    #[test]
    fn test_empty_input() {
        let s = summarize_sessions(&[], &ZoneConfig::default(), 3200.0);
        assert!(s.is_empty());
        assert_eq!(s.top_zone, None);
        assert_eq!(s.score_trend, None);
        assert!(s.sessions.is_empty());
        assert_eq!(s.outcome_percentage("CAUGHT"), 0.0);
    }

    #[test]
    fn test_summary_over_mixed_records() {
        let json = r#"[
            {"final_score": 100, "outcome": "CAUGHT",
             "player_positions": [[100.0, 600.0], [300.0, 600.0]],
             "threat_history": [[0.0, 10.0], [1.0, 70.0]],
             "events": [{"time": 1.0, "type": "COLLECT", "item": "book"}]},
            {"final_score": 300, "outcome": "ESCAPED",
             "player_positions": [[700.0, 400.0]],
             "events": [{"time": 2.0, "type": "COLLECT", "item": "book"},
                        {"time": 3.0, "type": "CAUGHT"}]},
            {"final_score": 200, "outcome": "CAUGHT"}
        ]"#;
        let records = parse_sessions(json).unwrap();
        let s = summarize_sessions(&records, &ZoneConfig::default(), 3200.0);

        assert_eq!(s.total_sessions, 3);
        assert_eq!(s.average_score, 200.0);
        assert_eq!(s.max_score, 300);
        assert_eq!(s.outcomes.get("CAUGHT"), Some(&2));
        assert_eq!(s.outcomes.get(&Outcome::Escaped.label()), Some(&1));
        let [ax, ay] = s.avg_position.unwrap();
        assert!((ax - 366.666_7).abs() < 1e-3);
        assert!((ay - 533.333_3).abs() < 1e-3);
        assert_eq!(s.top_zone, Some(0));
        assert_eq!(s.zone_distribution.get(&0), Some(&2));
        assert_eq!(s.zone_distribution.get(&2), Some(&1));
        assert_eq!(s.items_collected.get(ItemKind::Book), 2);
        assert_eq!(s.average_threat, 40.0);
        assert!((s.outcome_percentage("CAUGHT") - 66.666_67).abs() < 1e-3);

        assert_eq!(s.median_score, 200.0);
        assert_eq!(s.min_score, 100);
        // sqrt(((100-200)^2 + (300-200)^2 + 0) / 3)
        assert!((s.score_std_dev - 81.649_66).abs() < 1e-3);
        assert!((s.score_trend.unwrap() + 33.333_33).abs() < 1e-3);

        assert_eq!(s.sessions.len(), 3);
        assert_eq!(s.sessions[0].duration_secs, 1.0);
        assert!((s.sessions[0].efficiency - 6000.0).abs() < 0.1);
        assert_eq!(s.sessions[0].average_threat, 40.0);
        assert_eq!(s.sessions[1].duration_secs, 3.0);
        assert!((s.sessions[1].efficiency - 6000.0).abs() < 0.1);
        assert_eq!(s.sessions[1].outcome, "ESCAPED");
        assert_eq!(s.sessions[2].duration_secs, 0.0);
        assert_eq!(s.sessions[2].efficiency, 0.0);
        assert!((s.average_efficiency - 4000.0).abs() < 0.1);
    }

    #[test]
    fn test_score_distribution_even_count() {
        let (mean, median, std_dev) = score_distribution(&[40, 10, 30, 20]);
        assert_eq!(mean, 25.0);
        assert_eq!(median, 25.0);
        assert!((std_dev - 11.180_34).abs() < 1e-4);
    }

    #[test]
    fn test_score_trend() {
        assert_eq!(score_trend(&[50]), None);
        assert_eq!(score_trend(&[10, 100, 150]), Some(50.0));
        assert_eq!(score_trend(&[0, 150]), Some(0.0));
        assert_eq!(score_trend(&[200, 100]), Some(-50.0));
    }

    #[test]
    fn test_summary_json_shape() {
        let records = vec![SessionRecord::new("Student", 1)];
        let s = summarize_sessions(&records, &ZoneConfig::default(), 3200.0);
        let v = serde_json::to_value(&s).unwrap();
        assert_eq!(v["total_sessions"], 1);
        assert!(v.get("top_zone").is_none());
        assert_eq!(v["outcomes"][""], 1);
    }
}
