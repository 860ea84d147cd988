//! # chase_core - Predictive Chase Simulation Core
//!
//! Runtime core of a 2D side-scrolling chase game: a pursuing adversary that
//! predicts and intercepts the player across platform levels.
//!
//! ## Features
//! - Fixed-rate, single-threaded, fully deterministic tick loop
//! - Linear motion prediction from a rolling kinematics window
//! - Zone bias mined from historical session records
//! - Axis-separated rectangle collision against static platforms
//! - Threat telemetry and an append-only session record

// Game engine APIs often require many parameters for physics, state, etc.
#![allow(clippy::too_many_arguments)]
// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]

pub mod analysis;
pub mod engine;
pub mod error;
pub mod models;

pub use analysis::{summarize_sessions, SessionMetrics, SessionSummary};
pub use engine::chase_sim::{ChaseSim, LifeLoss, RunState, TickReport};
pub use engine::config::EngineConfig;
pub use engine::decision_state::{DecisionState, SlowdownModifier};
pub use engine::kinematics_history::{HistoryBuffer, KinematicSample};
pub use engine::motion_prediction::{predict, PredictionResult};
pub use engine::pursuit::{decide, AdversaryBrain, PursuitIntent};
pub use engine::threat_model::{evaluate, ThreatReport};
pub use engine::types::Rect;
pub use engine::zone_bias::{load_zone_bias, ZoneBias};
pub use error::{CoreError, Result};
pub use models::{ItemKind, Outcome, SessionRecord};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
