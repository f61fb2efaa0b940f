use async_trait::async_trait;
use crate::application::errors::AssistantError;

/// Assistant trait - abstraction for the remote assistant backend
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Get the backend name (for logs)
    fn name(&self) -> &str;

    /// Send one user message and wait for the assistant's reply
    async fn reply(&self, message: &str) -> Result<String, AssistantError>;
}
