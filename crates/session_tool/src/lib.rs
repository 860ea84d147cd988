//! Session Tool Library
//!
//! Offline side of the chase game:
//! - sessions file I/O (JSON list of session records)
//! - analysis → zone statistics
//! - deterministic synthetic session generator
//! - headless scripted runs of the core

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chase_core::engine::actors::PlayerInput;
use chase_core::engine::config::ZoneConfig;
use chase_core::engine::physics_constants::level;
use chase_core::engine::zone_bias::load_zone_bias_from_json;
use chase_core::models::{parse_sessions, DecisionEntry, EventKind, SessionEvent};
use chase_core::{
    summarize_sessions, ChaseSim, EngineConfig, ItemKind, Outcome, SessionRecord,
    SessionSummary, ZoneBias,
};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// 세션 파일 로드
///
/// An empty file is an empty list; a missing file is an error.
pub fn load_sessions_file(path: &Path) -> Result<Vec<SessionRecord>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read sessions file: {}", path.display()))?;
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    parse_sessions(&json).with_context(|| format!("Invalid sessions file: {}", path.display()))
}

/// Pretty-printed JSON list, parent directories created as needed.
pub fn write_sessions(path: &Path, records: &[SessionRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    let json = serde_json::to_string_pretty(records).context("Failed to serialize sessions")?;
    fs::write(path, json).with_context(|| format!("Failed to write sessions file: {}", path.display()))
}

/// Append one record; a missing file starts a new list.
///
/// Returns the number of records now in the file.
pub fn append_session(path: &Path, record: SessionRecord) -> Result<usize> {
    let mut records = if path.exists() { load_sessions_file(path)? } else { Vec::new() };
    records.push(record);
    write_sessions(path, &records)?;
    Ok(records.len())
}

pub fn analyze_file(path: &Path, zone_cfg: &ZoneConfig) -> Result<SessionSummary> {
    let records = load_sessions_file(path)?;
    Ok(summarize_sessions(&records, zone_cfg, level::WIDTH as f32))
}

/// Zone bias for a new run.
///
/// Only `player_positions` is read, so records with fields this version
/// cannot type still contribute. A missing or unreadable file gives an
/// empty bias.
pub fn zone_bias_from_file(path: Option<&Path>, zone_cfg: &ZoneConfig) -> ZoneBias {
    let width = level::WIDTH as f32;
    let Some(path) = path else {
        return ZoneBias::empty(zone_cfg, width);
    };
    match fs::read_to_string(path) {
        Ok(json) => load_zone_bias_from_json(&json, zone_cfg, width),
        Err(err) => {
            tracing::warn!(error = %err, path = %path.display(), "ignoring session statistics");
            ZoneBias::empty(zone_cfg, width)
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    EngineConfig::from_json_str(&json).with_context(|| format!("Invalid config: {}", path.display()))
}

/// Timestamp format used in session records.
pub fn session_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%d_%H%M%S").to_string()
}

// ============================================================
// Synthetic data
// ============================================================

const OUTCOMES: [&str; 3] = ["ESCAPED", "CAUGHT", "TIMEOUT"];
const LEGACY_STATES: [&str; 3] = ["PATROL", "CHASE", "ATTACK"];

/// Generate `count` plausible sessions. Same seed and base time → same output.
///
/// Player positions cluster around one hot spot per session so the zone
/// histogram has a clear favourite.
pub fn generate_sessions(count: usize, seed: u64, base_time: DateTime<Utc>) -> Vec<SessionRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count).map(|i| generate_session(&mut rng, i, base_time)).collect()
}

fn generate_session(rng: &mut ChaCha8Rng, index: usize, base_time: DateTime<Utc>) -> SessionRecord {
    let duration: u32 = rng.gen_range(30..=120);
    let mut record = SessionRecord::new("ProPlayer", rng.gen_range(1..=level::LEVEL_COUNT));
    record.timestamp = Some(session_timestamp(base_time - Duration::hours(index as i64)));
    record.final_score = rng.gen_range(50..=500);

    for _ in 0..rng.gen_range(3..=8) {
        let item = ItemKind::ALL[rng.gen_range(0..ItemKind::COUNT)];
        record.events.push(SessionEvent {
            time: rng.gen_range(5.0..duration as f32),
            kind: EventKind::Collect,
            item: Some(item),
        });
    }
    record.events.sort_by(|a, b| a.time.total_cmp(&b.time));

    let hot_spot = rng.gen_range(0.0..level::WIDTH as f32);
    for t in (0..duration).step_by(2) {
        record.threat_history.push((t as f32, rng.gen_range(10.0..90.0)));
        let x = if rng.gen_bool(0.6) {
            (hot_spot + rng.gen_range(-150.0..150.0)).clamp(0.0, level::WIDTH as f32 - 1.0)
        } else {
            rng.gen_range(0.0..level::WIDTH as f32)
        };
        record.player_positions.push([x, rng.gen_range(300.0..640.0)]);
    }

    for _ in 0..rng.gen_range(2..=5) {
        record.ai_decisions.push(DecisionEntry {
            time: rng.gen_range(0.0..duration as f32),
            state: LEGACY_STATES[rng.gen_range(0..LEGACY_STATES.len())].to_string(),
        });
    }
    record.ai_decisions.sort_by(|a, b| a.time.total_cmp(&b.time));

    record.outcome = Outcome::from(OUTCOMES[rng.gen_range(0..OUTCOMES.len())].to_string());
    record
}

// ============================================================
// Headless runs
// ============================================================

/// Scripted input: hold right, tap jump every `jump_every` ticks.
#[derive(Debug, Clone, Copy)]
pub struct Script {
    pub jump_every: u32,
}

impl Default for Script {
    fn default() -> Self {
        Self { jump_every: 40 }
    }
}

impl Script {
    pub fn input(&self, tick: u32) -> PlayerInput {
        let jump = self.jump_every > 0 && tick % self.jump_every == 0;
        PlayerInput { right: true, jump, left: false }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub level: u32,
    pub ticks: u32,
    pub outcome: Outcome,
    pub score: u32,
    pub lives_left: u32,
    pub max_threat: u8,
    pub average_threat: f32,
    pub items_collected: u32,
}

/// Run one campus level headless for at most `max_ticks` ticks.
///
/// An unfinished run is finalized as `Quit`.
pub fn run_scripted(
    level_number: u32,
    max_ticks: u32,
    cfg: EngineConfig,
    bias: ZoneBias,
    script: Script,
) -> Result<(RunSummary, SessionRecord)> {
    let mut sim = ChaseSim::for_level(level_number, cfg, bias)
        .with_context(|| format!("Failed to start level {}", level_number))?;

    let mut ticks = 0;
    let mut max_threat = 0u8;
    let mut threat_sum = 0.0f64;
    for t in 1..=max_ticks {
        let report = sim.tick(script.input(t));
        ticks = t;
        max_threat = max_threat.max(report.threat.threat_level);
        threat_sum += report.threat.threat_level as f64;
        if report.is_terminal() {
            break;
        }
    }
    sim.quit();

    let player = sim.player();
    let summary = RunSummary {
        level: level_number,
        ticks,
        outcome: sim.session().outcome.clone(),
        score: player.score,
        lives_left: sim.lives(),
        max_threat,
        average_threat: if ticks > 0 { (threat_sum / ticks as f64) as f32 } else { 0.0 },
        items_collected: player.items.total(),
    };
    tracing::info!(
        level = summary.level,
        ticks = summary.ticks,
        outcome = %summary.outcome.label(),
        "scripted run finished"
    );
    Ok((summary, sim.into_session()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a = generate_sessions(5, 7, base_time());
        let b = generate_sessions(5, 7, base_time());
        assert_eq!(a, b);
        assert_ne!(a, generate_sessions(5, 8, base_time()));

        assert_eq!(a.len(), 5);
        assert_eq!(a[0].timestamp.as_deref(), Some("20260301_120000"));
        assert_eq!(a[1].timestamp.as_deref(), Some("20260301_110000"));
        for r in &a {
            assert!((50..=500).contains(&r.final_score));
            assert!(r.outcome.is_terminal());
            assert!(!r.player_positions.is_empty());
            assert!(r.player_positions.iter().all(|p| p[0] >= 0.0 && p[0] < 3200.0));
        }
    }

    #[test]
    fn test_write_then_analyze() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("data").join("sessions.json");
        let records = generate_sessions(10, 42, base_time());
        write_sessions(&path, &records)?;

        let summary = analyze_file(&path, &ZoneConfig::default())?;
        assert_eq!(summary.total_sessions, 10);
        assert!(summary.top_zone.is_some());
        assert!(summary.max_score >= 50);
        assert!(summary.min_score <= summary.max_score);
        assert_eq!(summary.sessions.len(), 10);
        assert!(summary.sessions.iter().all(|m| m.duration_secs > 0.0 && m.efficiency > 0.0));
        assert!(summary.score_trend.is_some());
        Ok(())
    }

    #[test]
    fn test_append_creates_and_grows() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("sessions.json");
        assert_eq!(append_session(&path, SessionRecord::new("A", 1))?, 1);
        assert_eq!(append_session(&path, SessionRecord::new("B", 2))?, 2);

        let records = load_sessions_file(&path)?;
        assert_eq!(records[1].player_name, "B");
        Ok(())
    }

    #[test]
    fn test_empty_and_broken_files() -> Result<()> {
        let empty = NamedTempFile::new()?;
        assert!(load_sessions_file(empty.path())?.is_empty());

        let mut broken = NamedTempFile::new()?;
        broken.write_all(b"{not json")?;
        assert!(load_sessions_file(broken.path()).is_err());

        let bias = zone_bias_from_file(Some(broken.path()), &ZoneConfig::default());
        assert!(!bias.has_statistics());
        assert!(!zone_bias_from_file(None, &ZoneConfig::default()).has_statistics());

        let missing = tempdir()?.path().join("nope.json");
        assert!(!zone_bias_from_file(Some(&missing), &ZoneConfig::default()).has_statistics());
        Ok(())
    }

    #[test]
    fn test_zone_bias_survives_loosely_typed_records() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(
            br#"[{"player_positions": [[1000, 600], [1010, 600]], "final_score": 12.5, "outcome": null}]"#,
        )?;
        assert!(load_sessions_file(file.path()).is_err());

        let bias = zone_bias_from_file(Some(file.path()), &ZoneConfig::default());
        assert_eq!(bias.top_zone(), Some(3));
        Ok(())
    }

    #[test]
    fn test_load_config_overrides() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(br#"{"session": {"lives": 5}}"#)?;
        let cfg = load_config(Some(file.path()))?;
        assert_eq!(cfg.session.lives, 5);
        assert_eq!(load_config(None)?.session.lives, 3);
        Ok(())
    }

    #[test]
    fn test_scripted_run_produces_finalized_record() -> Result<()> {
        let (summary, record) =
            run_scripted(1, 300, EngineConfig::default(), ZoneBias::default(), Script::default())?;
        assert!(summary.ticks > 0 && summary.ticks <= 300);
        assert!(record.is_finalized());
        assert_eq!(record.outcome, summary.outcome);
        assert_eq!(record.level_reached, 1);
        assert!(summary.max_threat >= 10);
        Ok(())
    }

    #[test]
    fn test_script_input() {
        let s = Script { jump_every: 10 };
        assert!(s.input(10).jump);
        assert!(!s.input(11).jump);
        assert!(s.input(11).right);
        assert!(!Script { jump_every: 0 }.input(0).jump);
    }
}
