use async_trait::async_trait;

use crate::domain::DomainError;

/// Client-side call to the backend's generate endpoint.
///
/// Every fault is folded into the returned `Result`: an unreachable backend
/// becomes [`DomainError::Transport`], a non-success HTTP status becomes
/// [`DomainError::Upstream`] carrying the backend's error message.
#[async_trait]
pub trait RequestOrchestrator: Send + Sync {
    async fn send(&self, topic: &str) -> Result<String, DomainError>;
}
