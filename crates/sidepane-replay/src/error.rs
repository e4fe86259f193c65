use std::path::PathBuf;

use sidepane_runtime::{PolicyConfigError, StorageError};
use sidepane_web::WorkspaceError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReplayError>;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store error: {0}")]
    Storage(#[from] StorageError),

    #[error("policy error: {0}")]
    Policy(#[from] PolicyConfigError),

    #[error("workspace error: {0}")]
    Workspace(#[from] WorkspaceError),

    #[error("script not found: {path}")]
    MissingScript { path: PathBuf },

    #[error("invalid script event #{index}: {message}")]
    InvalidEvent { index: usize, message: String },

    #[error("logging setup failed: {message}")]
    Logging { message: String },
}

impl ReplayError {
    /// Process exit code: 2 for bad input, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Json(_)
            | Self::Policy(_)
            | Self::Workspace(_)
            | Self::MissingScript { .. }
            | Self::InvalidEvent { .. } => 2,
            Self::Io(_) | Self::Storage(_) | Self::Logging { .. } => 1,
        }
    }

    #[must_use]
    pub fn invalid_event(index: usize, message: impl Into<String>) -> Self {
        Self::InvalidEvent {
            index,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ReplayError;

    #[test]
    fn input_errors_exit_with_two() {
        let error = ReplayError::invalid_event(3, "unmounted");
        assert_eq!(error.exit_code(), 2);
        assert_eq!(error.to_string(), "invalid script event #3: unmounted");
    }

    #[test]
    fn io_errors_exit_with_one() {
        let error = ReplayError::from(std::io::Error::other("disk"));
        assert_eq!(error.exit_code(), 1);
    }
}
