pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::LogConfig;
pub use crate::core::{app::Application, greeting::HelloGreeter, Greeter, RunOutcome, RunState};
pub use utils::error::{ErrorId, GreeterError, Result};
pub use utils::logger::LogManager;
