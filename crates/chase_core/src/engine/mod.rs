//! Chase engine
//!
//! Leaf-to-root: kinematics history → motion prediction → zone bias →
//! pursuit decision → actor physics → threat telemetry, driven by
//! [`chase_sim::ChaseSim`] once per tick.

pub mod actor_physics;
pub mod actors;
pub mod chase_sim;
pub mod config;
pub mod decision_state;
pub mod items;
pub mod kinematics_history;
pub mod level;
pub mod motion_prediction;
pub mod physics_constants;
pub mod pursuit;
pub mod telemetry;
pub mod threat_model;
pub mod timestep;
pub mod types;
pub mod zone_bias;

pub use actor_physics::{ActorBody, Facing};
pub use actors::{Adversary, Player, PlayerInput};
pub use chase_sim::{ChaseSim, LifeLoss, RunState, TickReport};
pub use config::EngineConfig;
pub use decision_state::{DecisionState, SlowdownModifier};
pub use items::{Collectible, ItemCounts, ItemEffect, ItemKind};
pub use kinematics_history::{HistoryBuffer, KinematicSample};
pub use level::{Level, Platform, SurfaceKind};
pub use motion_prediction::{predict, PredictionResult};
pub use pursuit::{decide, AdversaryBrain, PursuitIntent};
pub use telemetry::{TelemetryRecorder, TelemetrySnapshot};
pub use threat_model::{evaluate, ThreatReport};
pub use types::Rect;
pub use zone_bias::{load_zone_bias, ZoneBias};
