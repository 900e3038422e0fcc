use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, warn};

use crate::application::{CompletionGateway, PromptClassifier};
use crate::domain::{DomainError, DEFAULT_UPSTREAM_STATUS};

/// Message returned to callers that send no usable topic.
pub const NO_TOPIC_MESSAGE: &str = "No topic provided";

/// What to do when the provider answers successfully but with no text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyCompletionPolicy {
    /// Relay the empty string as a successful result.
    #[default]
    Accept,
    /// Report an upstream failure instead.
    Reject,
}

/// Validates a topic, classifies it, and asks the gateway for a completion.
pub struct GenerateResponseUseCase {
    classifier: PromptClassifier,
    gateway: Arc<dyn CompletionGateway>,
    empty_completion: EmptyCompletionPolicy,
}

impl GenerateResponseUseCase {
    pub fn new(gateway: Arc<dyn CompletionGateway>) -> Self {
        Self {
            classifier: PromptClassifier::new(),
            gateway,
            empty_completion: EmptyCompletionPolicy::default(),
        }
    }

    pub fn with_classifier(mut self, classifier: PromptClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_empty_completion_policy(mut self, policy: EmptyCompletionPolicy) -> Self {
        self.empty_completion = policy;
        self
    }

    pub fn empty_completion_policy(&self) -> EmptyCompletionPolicy {
        self.empty_completion
    }

    /// `topic` is `None` when the request carried no topic field at all.
    pub async fn execute(&self, topic: Option<&str>) -> Result<String, DomainError> {
        let topic = match topic {
            Some(t) if !t.trim().is_empty() => t,
            _ => return Err(DomainError::validation(NO_TOPIC_MESSAGE)),
        };

        info!("Received request for topic: {}", topic);

        let prompt = self.classifier.classify(topic);
        info!(
            "Classified as {} (temperature {:.1})",
            prompt.category(),
            prompt.temperature()
        );

        let start_time = Instant::now();
        let text = match self.gateway.complete(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                error!("Completion via {} failed: {}", self.gateway.model_name(), e);
                return Err(e);
            }
        };

        if text.is_empty() {
            match self.empty_completion {
                EmptyCompletionPolicy::Accept => {
                    warn!("Provider returned an empty completion; relaying it as-is");
                }
                EmptyCompletionPolicy::Reject => {
                    warn!("Provider returned an empty completion; rejecting");
                    return Err(DomainError::upstream(
                        Some(DEFAULT_UPSTREAM_STATUS),
                        "Provider returned an empty completion",
                    ));
                }
            }
        }

        info!(
            "Provider responded successfully in {:.2}s",
            start_time.elapsed().as_secs_f64()
        );

        Ok(text)
    }
}
