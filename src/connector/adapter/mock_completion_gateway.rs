use async_trait::async_trait;

use crate::application::CompletionGateway;
use crate::domain::{ClassifiedPrompt, DomainError};

/// Offline gateway that answers with the classified instruction itself.
///
/// Output is deterministic: `[<category>] <task instruction>`, so the whole
/// request path can be exercised without provider credentials.
pub struct MockCompletionGateway;

impl MockCompletionGateway {
    pub fn new() -> Self {
        Self
    }

    pub fn reply_for(prompt: &ClassifiedPrompt) -> String {
        format!("[{}] {}", prompt.category(), prompt.task_instruction())
    }
}

impl Default for MockCompletionGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionGateway for MockCompletionGateway {
    async fn complete(&self, prompt: &ClassifiedPrompt) -> Result<String, DomainError> {
        Ok(Self::reply_for(prompt))
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
