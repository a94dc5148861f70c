use thiserror::Error;

use crate::brewery::{ControllerKind, EntityKind};

/// Standard Result type for the logs module
pub type Result<T> = std::result::Result<T, LogError>;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("Invalid log file name: {0}")]
    InvalidFilename(String),

    #[error("Log file not found: {0}")]
    FileNotFound(String),

    #[error("Unknown chart type: {0}")]
    UnknownChartType(String),

    #[error("Invalid chart id: {0}")]
    InvalidChartId(String),

    #[error("{kind} {id} not found")]
    EntityNotFound { kind: EntityKind, id: u32 },

    #[error("{kind} {id} has no controller logic")]
    MissingLogic { kind: EntityKind, id: u32 },

    #[error("No {kind} controller registered for logic '{logic}'")]
    ControllerNotFound { kind: ControllerKind, logic: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LogError {
    /// True for every failure that means "nothing to serve here".
    pub fn is_not_found(&self) -> bool {
        !matches!(self, LogError::Io(_))
    }
}
