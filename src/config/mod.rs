#[cfg(feature = "cli")]
pub mod cli;

use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

pub const DEFAULT_LOG_DIRECTORY: &str = "logs";
pub const DEFAULT_RETENTION_DAYS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    pub log_directory: PathBuf,
    pub retention_days: u32,
    pub verbose: bool,
}

impl LogConfig {
    pub fn new(log_directory: impl Into<PathBuf>, retention_days: u32, verbose: bool) -> Self {
        Self {
            log_directory: log_directory.into(),
            retention_days,
            verbose,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_DIRECTORY, DEFAULT_RETENTION_DAYS, false)
    }
}

impl Validate for LogConfig {
    fn validate(&self) -> Result<()> {
        validate_path("log_directory", &self.log_directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_config() {
        let config = LogConfig::default();
        assert_eq!(config.log_directory, PathBuf::from("logs"));
        assert_eq!(config.retention_days, 30);
        assert!(!config.verbose);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_log_directory_is_rejected() {
        let config = LogConfig::new("", 7, false);
        assert!(config.validate().is_err());
    }
}
