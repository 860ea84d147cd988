//! # Analysis Module
//!
//! Offline statistics over recorded sessions.
//!
//! ## Submodules
//!
//! - `session_stats` - score/outcome summary, per-session pacing, zone histogram

pub mod session_stats;

pub use session_stats::{summarize_sessions, SessionMetrics, SessionSummary};
