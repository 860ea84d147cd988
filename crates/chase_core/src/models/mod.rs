pub mod session_record;

pub use crate::engine::items::ItemKind;
pub use session_record::{
    parse_player_positions, parse_sessions, DecisionEntry, EventKind, Outcome, SessionEvent,
    SessionRecord,
};
