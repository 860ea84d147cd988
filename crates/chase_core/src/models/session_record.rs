//! Session record: the append-only log of one run.
//!
//! Shape matches the JSON the offline tooling reads and writes. Every field
//! defaults, so partial records from older tooling still load.

use serde::{Deserialize, Serialize};

use crate::engine::items::ItemKind;
use crate::error::{CoreError, Result};

/// Terminal result of a run (or level).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Outcome {
    /// Not finalized yet (serialized as an empty string)
    #[default]
    InProgress,
    Caught,
    Escaped,
    Timeout,
    Quit,
    LevelComplete(u32),
    /// Anything another tool wrote that we do not model
    Other(String),
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    pub fn label(&self) -> String {
        match self {
            Outcome::InProgress => String::new(),
            Outcome::Caught => "CAUGHT".to_string(),
            Outcome::Escaped => "ESCAPED".to_string(),
            Outcome::Timeout => "TIMEOUT".to_string(),
            Outcome::Quit => "QUIT".to_string(),
            Outcome::LevelComplete(n) => format!("LEVEL_{}_COMPLETE", n),
            Outcome::Other(s) => s.clone(),
        }
    }
}

impl From<String> for Outcome {
    fn from(s: String) -> Self {
        match s.as_str() {
            "" => Outcome::InProgress,
            "CAUGHT" => Outcome::Caught,
            "ESCAPED" => Outcome::Escaped,
            "TIMEOUT" => Outcome::Timeout,
            "QUIT" => Outcome::Quit,
            other => other
                .strip_prefix("LEVEL_")
                .and_then(|rest| rest.strip_suffix("_COMPLETE"))
                .and_then(|n| n.parse().ok())
                .map(Outcome::LevelComplete)
                .unwrap_or(Outcome::Other(s)),
        }
    }
}

impl From<Outcome> for String {
    fn from(o: Outcome) -> Self {
        o.label()
    }
}

/// Structured event kinds appended during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    Collect,
    Caught,
    Timeout,
    Other(String),
}

impl From<String> for EventKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "COLLECT" => EventKind::Collect,
            "CAUGHT" => EventKind::Caught,
            "TIMEOUT" => EventKind::Timeout,
            _ => EventKind::Other(s),
        }
    }
}

impl From<EventKind> for String {
    fn from(k: EventKind) -> Self {
        match k {
            EventKind::Collect => "COLLECT".to_string(),
            EventKind::Caught => "CAUGHT".to_string(),
            EventKind::Timeout => "TIMEOUT".to_string(),
            EventKind::Other(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEvent {
    /// Elapsed simulation time (seconds)
    pub time: f32,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<ItemKind>,
}

/// Adversary decision-state transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionEntry {
    pub time: f32,
    /// Free-form label; older data uses PATROL / CHASE / ATTACK
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionRecord {
    pub player_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub level_reached: u32,
    pub events: Vec<SessionEvent>,
    /// (time, threat level)
    pub threat_history: Vec<(f32, f32)>,
    pub ai_decisions: Vec<DecisionEntry>,
    /// Player centers, one per telemetry sample
    pub player_positions: Vec<[f32; 2]>,
    pub final_score: u32,
    pub outcome: Outcome,
}

impl SessionRecord {
    pub fn new(player_name: impl Into<String>, level: u32) -> Self {
        Self { player_name: player_name.into(), level_reached: level, ..Default::default() }
    }

    pub fn log_collect(&mut self, time: f32, item: ItemKind) {
        self.events.push(SessionEvent { time, kind: EventKind::Collect, item: Some(item) });
    }

    pub fn log_event(&mut self, time: f32, kind: EventKind) {
        self.events.push(SessionEvent { time, kind, item: None });
    }

    pub fn log_decision(&mut self, time: f32, state: &str) {
        self.ai_decisions.push(DecisionEntry { time, state: state.to_string() });
    }

    pub fn log_sample(&mut self, time: f32, threat_level: u8, player_center: (f32, f32)) {
        self.threat_history.push((time, threat_level as f32));
        self.player_positions.push([player_center.0, player_center.1]);
    }

    /// Stamp the terminal outcome. Later calls are ignored once finalized.
    pub fn finalize(&mut self, outcome: Outcome, final_score: u32, level_reached: u32) {
        if self.is_finalized() {
            return;
        }
        self.outcome = outcome;
        self.final_score = final_score;
        self.level_reached = level_reached;
    }

    pub fn is_finalized(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Duration covered by the record (last event / sample time).
    pub fn duration_secs(&self) -> f32 {
        let last_event = self.events.iter().map(|e| e.time).fold(0.0, f32::max);
        let last_sample = self.threat_history.iter().map(|t| t.0).fold(0.0, f32::max);
        last_event.max(last_sample)
    }

    pub fn average_threat(&self) -> f32 {
        if self.threat_history.is_empty() {
            return 0.0;
        }
        self.threat_history.iter().map(|t| t.1).sum::<f32>() / self.threat_history.len() as f32
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

/// Parse a sessions document: a JSON list of records, or a single record.
pub fn parse_sessions(json: &str) -> Result<Vec<SessionRecord>> {
    if json.trim().is_empty() {
        return Err(CoreError::InvalidSessionData("empty sessions document".into()));
    }
    // Try the typed shapes first so real serde errors surface for bad JSON.
    let value: serde_json::Value = serde_json::from_str(json)?;
    match value {
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            match serde_json::from_value::<OneOrMany<SessionRecord>>(value)? {
                OneOrMany::Many(v) => Ok(v),
                OneOrMany::One(r) => Ok(vec![r]),
            }
        }
        other => Err(CoreError::InvalidSessionData(format!(
            "expected a list of session records, found {}",
            json_kind(&other)
        ))),
    }
}

/// Only the positions; tolerant of every other field being foreign.
#[derive(Deserialize)]
struct PositionsOnly {
    #[serde(default)]
    player_positions: Vec<[f32; 2]>,
}

/// Extract `player_positions` per record, ignoring everything else.
pub fn parse_player_positions(json: &str) -> Result<Vec<Vec<[f32; 2]>>> {
    if json.trim().is_empty() {
        return Err(CoreError::InvalidSessionData("empty sessions document".into()));
    }
    let parsed: OneOrMany<PositionsOnly> = serde_json::from_str(json)?;
    let records = match parsed {
        OneOrMany::Many(v) => v,
        OneOrMany::One(r) => vec![r],
    };
    Ok(records.into_iter().map(|r| r.player_positions).collect())
}

fn json_kind(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_labels_roundtrip() {
        for o in [
            Outcome::InProgress,
            Outcome::Caught,
            Outcome::Escaped,
            Outcome::Timeout,
            Outcome::Quit,
            Outcome::LevelComplete(3),
        ] {
            assert_eq!(Outcome::from(o.label()), o);
        }
        assert_eq!(Outcome::from("WHATEVER".to_string()), Outcome::Other("WHATEVER".into()));
        assert_eq!(Outcome::LevelComplete(2).label(), "LEVEL_2_COMPLETE");
    }

    #[test]
    fn test_parse_list_and_single_record() {
        let list = r#"[{"final_score": 10, "outcome": "CAUGHT"}, {"final_score": 20}]"#;
        let records = parse_sessions(list).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].outcome, Outcome::Caught);
        assert_eq!(records[1].outcome, Outcome::InProgress);

        let single = r#"{"player_positions": [[1.0, 2.0]], "outcome": "LEVEL_1_COMPLETE"}"#;
        let records = parse_sessions(single).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].player_positions, vec![[1.0, 2.0]]);
        assert_eq!(records[0].outcome, Outcome::LevelComplete(1));
    }

    #[test]
    fn test_parse_legacy_fields() {
        let json = r#"[{
            "player_name": "ProPlayer",
            "timestamp": "2026-01-01T10:00:00",
            "events": [{"time": 12.5, "type": "COLLECT", "item": "coffee"}],
            "threat_history": [[0.0, 12.3], [2.0, 80.0]],
            "ai_decisions": [{"time": 3.0, "state": "ATTACK"}],
            "final_score": 310,
            "outcome": "TIMEOUT"
        }]"#;
        let records = parse_sessions(json).unwrap();
        let r = &records[0];
        assert_eq!(r.events[0].item, Some(ItemKind::Coffee));
        assert_eq!(r.ai_decisions[0].state, "ATTACK");
        assert!((r.average_threat() - 46.15).abs() < 1e-3);
        assert_eq!(r.duration_secs(), 12.5);
    }

    #[test]
    fn test_parse_rejects_bad_documents() {
        assert!(matches!(parse_sessions(""), Err(CoreError::InvalidSessionData(_))));
        assert!(matches!(parse_sessions("42"), Err(CoreError::InvalidSessionData(_))));
        assert!(matches!(parse_sessions("[{"), Err(CoreError::Json(_))));
    }

    #[test]
    fn test_positions_only_ignores_foreign_fields() {
        let json = r#"[{"player_positions": [[5.0, 6.0]], "events": [{"odd": true}]}, {}]"#;
        let positions = parse_player_positions(json).unwrap();
        assert_eq!(positions, vec![vec![[5.0, 6.0]], vec![]]);
    }

    #[test]
    fn test_finalize_is_sticky() {
        let mut r = SessionRecord::new("Student", 1);
        r.finalize(Outcome::Caught, 40, 1);
        r.finalize(Outcome::Escaped, 99, 4);
        assert_eq!(r.outcome, Outcome::Caught);
        assert_eq!(r.final_score, 40);
    }

    #[test]
    fn test_serialized_shape() {
        let mut r = SessionRecord::new("Student", 2);
        r.log_collect(1.5, ItemKind::Mind);
        r.log_sample(0.25, 70, (140.0, 640.0));
        r.log_decision(0.5, "CHASE");
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["events"][0]["type"], "COLLECT");
        assert_eq!(v["events"][0]["item"], "mind");
        assert_eq!(v["player_positions"][0][0], 140.0);
        assert_eq!(v["outcome"], "");
        assert!(v.get("timestamp").is_none());
    }
}
