pub mod app;
pub mod greeting;

pub use crate::domain::model::{RunOutcome, RunState};
pub use crate::domain::ports::Greeter;
pub use crate::utils::error::Result;
