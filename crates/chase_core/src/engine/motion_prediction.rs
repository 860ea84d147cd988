//! Motion Predictor
//!
//! Linear extrapolation of a tracked actor's future center from its
//! kinematics history.
//!
//! - 최근 min(10, len) 샘플의 평균 속도로 외삽
//! - confidence = 속도 안정성 (vx 표준편차 기반), 예측 정확도가 아님

use serde::{Deserialize, Serialize};

use crate::engine::config::PursuitConfig;
use crate::engine::kinematics_history::HistoryBuffer;

/// Derived every tick, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_x: f32,
    pub predicted_y: f32,
    /// 0.0 (erratic velocity) ..= 1.0 (perfectly steady)
    pub confidence: f32,
}

/// Predict `lookahead_ticks` ahead with the default predictor constants.
///
/// # Returns
/// - `Some(result)` with at least 5 samples of history
/// - `None` otherwise; callers fall back to the live position
pub fn predict(history: &HistoryBuffer, lookahead_ticks: u32) -> Option<PredictionResult> {
    predict_with(history, lookahead_ticks, &PursuitConfig::default())
}

/// Predict with explicit window / sensitivity parameters.
pub fn predict_with(
    history: &HistoryBuffer,
    lookahead_ticks: u32,
    cfg: &PursuitConfig,
) -> Option<PredictionResult> {
    if history.len() < cfg.min_samples {
        return None;
    }
    let last = *history.last()?;

    let window: Vec<(f32, f32)> =
        history.recent(cfg.velocity_window.max(1)).map(|s| (s.vx, s.vy)).collect();
    let n = window.len() as f32;

    // Accumulate relative to the first sample so a constant velocity yields
    // an exact mean and exactly zero variance.
    let (ref_vx, ref_vy) = window[0];
    let dev_vx = window.iter().map(|v| v.0 - ref_vx).sum::<f32>() / n;
    let dev_vy = window.iter().map(|v| v.1 - ref_vy).sum::<f32>() / n;
    let mean_vx = ref_vx + dev_vx;
    let mean_vy = ref_vy + dev_vy;

    // Population stddev of vx
    let var_vx = window.iter().map(|v| (v.0 - ref_vx - dev_vx).powi(2)).sum::<f32>() / n;
    let std_vx = var_vx.sqrt();

    let t = lookahead_ticks as f32;
    Some(PredictionResult {
        predicted_x: last.x + mean_vx * t,
        predicted_y: last.y + mean_vy * t,
        confidence: confidence_from_stddev(std_vx, cfg.confidence_sensitivity),
    })
}

/// `clamp(1 - std / k, 0, 1)`
#[inline]
pub fn confidence_from_stddev(std_vx: f32, sensitivity: f32) -> f32 {
    if sensitivity <= 0.0 {
        return 0.0;
    }
    (1.0 - std_vx / sensitivity).clamp(0.0, 1.0)
}
