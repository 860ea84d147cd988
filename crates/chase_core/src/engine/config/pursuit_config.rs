//! Predictor and pursuit decision configuration

use serde::{Deserialize, Serialize};

use crate::engine::physics_constants::{predictor, pursuit};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PursuitConfig {
    // === History ===
    /// Rolling kinematics window (기본: 60 = 1초)
    pub history_capacity: usize,

    // === Predictor ===
    /// 예측에 필요한 최소 샘플 수 (기본: 5)
    pub min_samples: usize,
    /// 평균 속도 계산 윈도우 (기본: 10)
    pub velocity_window: usize,
    /// vx 표준편차 민감도 K (기본: 5.0)
    pub confidence_sensitivity: f32,
    /// 예측 시간 (ticks) (기본: 20)
    pub lookahead_ticks: u32,
    /// 이 값 초과일 때만 예측 위치 사용 (기본: 0.6)
    pub confidence_gate: f32,

    // === Heuristics ===
    /// 목표가 이만큼 위에 있으면 점프 (기본: 40.0)
    pub vertical_lead: f32,
    /// 장애물 탐지 프로브 오프셋 (기본: 40)
    pub probe_offset: i32,
}

impl Default for PursuitConfig {
    fn default() -> Self {
        Self {
            history_capacity: predictor::HISTORY_CAPACITY,
            min_samples: predictor::MIN_SAMPLES,
            velocity_window: predictor::WINDOW,
            confidence_sensitivity: predictor::CONFIDENCE_SENSITIVITY,
            lookahead_ticks: predictor::LOOKAHEAD_TICKS,
            confidence_gate: predictor::CONFIDENCE_GATE,
            vertical_lead: pursuit::VERTICAL_LEAD,
            probe_offset: pursuit::PROBE_OFFSET,
        }
    }
}
