//! # Engine Configuration Module
//!
//! All tuning constants for the chase core in one serde tree.
//!
//! ## 사용법
//! ```rust
//! use chase_core::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let relaxed = EngineConfig::relaxed();
//! assert!(relaxed.physics.adversary.base_speed < config.physics.adversary.base_speed);
//! ```

mod physics_config;
mod pursuit_config;
mod session_config;

pub use physics_config::{AdversaryPhysicsConfig, PhysicsConfig, PlayerPhysicsConfig};
pub use pursuit_config::PursuitConfig;
pub use session_config::{SessionConfig, ZoneConfig};

use serde::{Deserialize, Serialize};

use crate::engine::physics_constants::predictor;
use crate::error::{CoreError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Player + adversary physics
    pub physics: PhysicsConfig,
    /// Predictor and decision heuristics
    pub pursuit: PursuitConfig,
    /// Session-statistics zone bias
    pub zone: ZoneConfig,
    /// Lives, timer, telemetry cadence
    pub session: SessionConfig,
}

impl EngineConfig {
    /// 느린 추격자, 보수적인 예측
    pub fn relaxed() -> Self {
        let mut cfg = Self::default();
        cfg.physics.adversary.base_speed = 2.6;
        cfg.pursuit.confidence_gate = 0.8;
        cfg.session.round_seconds = 150.0;
        cfg
    }

    /// 빠른 추격자, 예측을 더 신뢰
    pub fn relentless() -> Self {
        let mut cfg = Self::default();
        cfg.physics.adversary.base_speed = 3.8;
        cfg.pursuit.confidence_gate = 0.4;
        cfg.pursuit.lookahead_ticks = 30;
        cfg.zone.bonus = 0.3;
        cfg
    }

    /// Parse a (partial) JSON override; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let p = &self.pursuit;
        if p.history_capacity == 0 {
            return Err(CoreError::InvalidConfig("history_capacity must be > 0".into()));
        }
        if p.history_capacity > predictor::MAX_HISTORY_CAPACITY {
            return Err(CoreError::InvalidConfig(format!(
                "history_capacity must be <= {}",
                predictor::MAX_HISTORY_CAPACITY
            )));
        }
        if p.min_samples == 0 || p.velocity_window == 0 {
            return Err(CoreError::InvalidConfig(
                "min_samples and velocity_window must be > 0".into(),
            ));
        }
        if p.confidence_sensitivity <= 0.0 {
            return Err(CoreError::InvalidConfig("confidence_sensitivity must be > 0".into()));
        }
        if self.zone.zone_count == 0 {
            return Err(CoreError::InvalidConfig("zone_count must be > 0".into()));
        }
        if self.session.sample_every_ticks == 0 {
            return Err(CoreError::InvalidConfig("sample_every_ticks must be > 0".into()));
        }
        if self.session.round_seconds <= 0.0 {
            return Err(CoreError::InvalidConfig("round_seconds must be > 0".into()));
        }
        Ok(())
    }
}
