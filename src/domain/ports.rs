use crate::utils::error::Result;
use async_trait::async_trait;

/// Produces the greeting text. Business-rule failures are reported as
/// `GreeterError::Application`; anything else counts as unexpected.
#[async_trait]
pub trait Greeter: Send + Sync {
    async fn greet(&self) -> Result<String>;
}
