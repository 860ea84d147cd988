//! Zone bias and run-rule configuration

use serde::{Deserialize, Serialize};

use crate::engine::physics_constants::{session, zone};

/// Zone bias parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    /// 레벨 가로를 나누는 구역 수 (기본: 10)
    pub zone_count: u32,
    /// 선호 구역 중심으로부터의 반경 (기본: 500.0)
    pub radius: f32,
    /// 반경 안에서의 속도 보너스 (기본: 0.2)
    pub bonus: f32,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self { zone_count: zone::ZONE_COUNT, radius: zone::RADIUS, bonus: zone::BONUS }
    }
}

impl ZoneConfig {
    /// Fixed zone width for a level of the given width.
    pub fn zone_width(&self, level_width: f32) -> f32 {
        level_width / self.zone_count.max(1) as f32
    }
}

/// Run rules (lives, timer, telemetry cadence, pickup durations)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub lives: u32,
    /// Round length per life (seconds)
    pub round_seconds: f32,
    pub sample_every_ticks: u32,
    pub slowdown_ticks: u32,
    pub coffee_ticks: u32,
    pub coffee_speed_mult: f32,
    pub player_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            lives: session::LIVES,
            round_seconds: session::ROUND_SECONDS,
            sample_every_ticks: session::SAMPLE_EVERY_TICKS,
            slowdown_ticks: session::SLOWDOWN_TICKS,
            coffee_ticks: session::COFFEE_TICKS,
            coffee_speed_mult: session::COFFEE_SPEED_MULT,
            player_name: "Student".to_string(),
        }
    }
}
