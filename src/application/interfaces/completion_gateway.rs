use async_trait::async_trait;

use crate::domain::{ClassifiedPrompt, DomainError};

/// Sends a classified prompt to a completion provider and returns its text.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details. The request is a two-message exchange: the prompt's system role
/// followed by its task instruction as the user message.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Returns the first choice's text, or an empty string when the provider
    /// produced no content.
    ///
    /// Fails with [`DomainError::Upstream`] when the provider call itself
    /// fails; the error carries the provider's status code (500 when unknown).
    async fn complete(&self, prompt: &ClassifiedPrompt) -> Result<String, DomainError>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}
