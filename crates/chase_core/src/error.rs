use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid session data: {0}")]
    InvalidSessionData(String),

    #[error("Unknown level: {level}")]
    UnknownLevel { level: u32 },

    #[error("Invalid run state: {0}")]
    InvalidState(String),
}

impl CoreError {
    /// Errors the caller may paper over with defaults (the core degrades instead of failing).
    pub fn is_recoverable(&self) -> bool {
        match self {
            CoreError::Json(_) => true,
            CoreError::InvalidSessionData(_) => true,
            CoreError::InvalidConfig(_) => false,
            CoreError::UnknownLevel { .. } => false,
            CoreError::InvalidState(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
