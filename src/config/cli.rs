use super::LogConfig;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "greeter")]
#[command(about = "A simple greeting application with daily log files and layered error handling")]
#[command(after_help = "Examples:\n  greeter              Run with default settings\n  greeter --verbose    Run with verbose logging\n  greeter -v           Short form of verbose")]
pub struct CliConfig {
    #[arg(short, long, help = "Enable verbose logging (DEBUG level)")]
    pub verbose: bool,
}

impl CliConfig {
    /// Log settings for this run; directory and retention are fixed defaults.
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            verbose: self.verbose,
            ..LogConfig::default()
        }
    }
}
