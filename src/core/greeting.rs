use crate::core::{Greeter, Result};
use crate::utils::error::GreeterError;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct HelloGreeter {
    audience: String,
}

impl HelloGreeter {
    pub fn new(audience: impl Into<String>) -> Self {
        Self {
            audience: audience.into(),
        }
    }
}

impl Default for HelloGreeter {
    fn default() -> Self {
        Self::new("world")
    }
}

#[async_trait]
impl Greeter for HelloGreeter {
    async fn greet(&self) -> Result<String> {
        if self.audience.trim().is_empty() {
            return Err(GreeterError::application("Cannot greet an empty audience"));
        }
        tracing::debug!("Building greeting for audience '{}'", self.audience);
        Ok(format!("Hello, {}!", self.audience))
    }
}
