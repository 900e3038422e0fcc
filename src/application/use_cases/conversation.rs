use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::{HistoryStore, RequestOrchestrator};
use crate::domain::{DomainError, Message, Phase, StudySession, View};

/// Prefix of the reply shown when the backend cannot be reached.
pub const CONNECTION_ERROR_TEXT: &str = "⚠️ Connection Error: Is the backend waking up?";

/// Result of one `submit` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank topic; nothing changed.
    Ignored,
    /// The backend answered and the exchange was recorded in history.
    Answered,
    /// The exchange failed; a synthesized assistant reply explains why.
    Failed,
}

/// The active transcript plus the view and request phase that govern it.
///
/// Every user message appended by `submit` is followed by exactly one
/// assistant message, whatever the outcome, and the phase always returns to
/// [`Phase::Idle`]. `submit` takes `&mut self`, so one exchange is in flight
/// per state at a time.
pub struct ConversationState {
    transcript: Vec<Message>,
    view: View,
    phase: Phase,
    pending_input: String,
    history: HistoryStore,
    orchestrator: Arc<dyn RequestOrchestrator>,
}

impl ConversationState {
    pub fn new(orchestrator: Arc<dyn RequestOrchestrator>, history: HistoryStore) -> Self {
        Self {
            transcript: Vec::new(),
            view: View::Home,
            phase: Phase::Idle,
            pending_input: String::new(),
            history,
            orchestrator,
        }
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::AwaitingResponse
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn set_pending_input(&mut self, input: impl Into<String>) {
        self.pending_input = input.into();
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryStore {
        &mut self.history
    }

    /// Opens an empty chat from the home view.
    pub fn start_chat(&mut self) {
        self.view = View::ChatActive;
    }

    /// Submits the pending input, clearing it when it is accepted.
    pub async fn submit_pending(&mut self) -> SubmitOutcome {
        if self.pending_input.trim().is_empty() {
            return SubmitOutcome::Ignored;
        }
        let topic = std::mem::take(&mut self.pending_input);
        self.submit(&topic).await
    }

    /// Runs one full exchange for `topic`. Pending input is left untouched,
    /// which is what quick-start presets rely on.
    pub async fn submit(&mut self, topic: &str) -> SubmitOutcome {
        if !self.begin_exchange(topic) {
            return SubmitOutcome::Ignored;
        }
        let result = self.orchestrator.send(topic).await;
        self.finish_exchange(topic, result)
    }

    /// First half of `submit`: appends the user message and enters
    /// [`Phase::AwaitingResponse`]. Returns `false` for a blank topic.
    pub fn begin_exchange(&mut self, topic: &str) -> bool {
        if topic.trim().is_empty() {
            return false;
        }
        self.view = View::ChatActive;
        self.transcript.push(Message::user(topic));
        self.phase = Phase::AwaitingResponse;
        true
    }

    /// Second half of `submit`: appends the assistant reply for `result`,
    /// records successful exchanges, and returns to [`Phase::Idle`].
    pub fn finish_exchange(
        &mut self,
        topic: &str,
        result: Result<String, DomainError>,
    ) -> SubmitOutcome {
        let outcome = match result {
            Ok(text) => {
                self.transcript.push(Message::assistant(text.as_str()));
                if let Err(e) = self.history.record(topic, text) {
                    warn!("Failed to persist study session: {}", e);
                }
                SubmitOutcome::Answered
            }
            Err(e) => {
                warn!("Exchange failed: {}", e);
                self.transcript.push(Message::assistant(failure_reply(&e)));
                SubmitOutcome::Failed
            }
        };
        self.phase = Phase::Idle;
        outcome
    }

    /// Replaces the whole transcript with the session's topic and reply.
    pub fn load_session(&mut self, session: &StudySession) {
        debug!("Loading study session {}", session.id());
        self.transcript = session.to_transcript();
        self.view = View::ChatActive;
    }

    pub fn load_session_by_id(&mut self, id: &str) -> Result<(), DomainError> {
        let session = self
            .history
            .get(id)
            .cloned()
            .ok_or_else(|| DomainError::not_found(format!("Study session not found: {}", id)))?;
        self.load_session(&session);
        Ok(())
    }

    /// Back to the home view with an empty transcript and no pending input.
    pub fn reset(&mut self) {
        self.transcript.clear();
        self.pending_input.clear();
        self.view = View::Home;
    }
}

/// User-facing reply for a failed exchange, embedding the raw error text.
pub fn failure_reply(error: &DomainError) -> String {
    match error {
        DomainError::Transport(cause) => format!("{CONNECTION_ERROR_TEXT} ({cause})"),
        DomainError::Upstream { status, message } => {
            format!("⚠️ Request failed ({status}): {message}")
        }
        other => format!("⚠️ {other}"),
    }
}
