use chrono::Local;
use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use thiserror::Error;

static ERROR_SEQUENCE: AtomicU32 = AtomicU32::new(0);

/// Token correlating a user-facing error line with its log entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErrorId(String);

impl ErrorId {
    /// Builds an id from the current local time plus a per-process sequence
    /// number, e.g. `20261016_142501_0003`.
    pub fn generate() -> Self {
        let seq = ERROR_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Self(format!("{}_{:04}", Local::now().format("%Y%m%d_%H%M%S"), seq))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ErrorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Error, Debug)]
pub enum GreeterError {
    #[error("Failed to create log directory {}: {source}", .path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("Application error [{error_id}]: {message}")]
    Application { message: String, error_id: ErrorId },

    #[error("Unexpected error [{error_id}]: {source:#}")]
    Unexpected {
        source: anyhow::Error,
        error_id: ErrorId,
    },

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl GreeterError {
    pub fn application(message: impl Into<String>) -> Self {
        Self::Application {
            message: message.into(),
            error_id: ErrorId::generate(),
        }
    }

    pub fn unexpected(source: impl Into<anyhow::Error>) -> Self {
        Self::Unexpected {
            source: source.into(),
            error_id: ErrorId::generate(),
        }
    }

    pub fn error_id(&self) -> Option<&ErrorId> {
        match self {
            Self::Application { error_id, .. } | Self::Unexpected { error_id, .. } => {
                Some(error_id)
            }
            Self::FileSystem { .. } | Self::InvalidConfig { .. } | Self::Interrupted => None,
        }
    }

    /// Message safe to show on the console. Internal details stay in the log.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::FileSystem { path, .. } => {
                format!("Cannot create log directory '{}'", path.display())
            }
            Self::InvalidConfig { field, reason } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            Self::Application { error_id, .. } => {
                format!("Error: the greeting could not be completed. Error ID: {}", error_id)
            }
            Self::Unexpected { error_id, .. } => {
                format!("An unexpected error occurred. Error ID: {}", error_id)
            }
            Self::Interrupted => "Application interrupted by user.".to_string(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Interrupted => 130,
            _ => 1,
        }
    }
}

impl From<std::io::Error> for GreeterError {
    fn from(err: std::io::Error) -> Self {
        Self::unexpected(err)
    }
}

pub type Result<T> = std::result::Result<T, GreeterError>;
