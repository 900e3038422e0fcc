use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::KeyValueStore;
use crate::domain::{DomainError, StudySession};

/// Slot under which the serialized history list lives.
pub const HISTORY_STORAGE_KEY: &str = "study_vault";

/// Newest-first list of completed exchanges, mirrored to durable storage.
///
/// Every mutation rewrites the whole list to the store before returning.
/// When that write fails the in-memory list still reflects the mutation and
/// the error is returned to the caller.
pub struct HistoryStore {
    sessions: Vec<StudySession>,
    storage: Arc<dyn KeyValueStore>,
}

impl HistoryStore {
    /// Loads the persisted list. An absent, unreadable or malformed slot
    /// yields an empty history; loading never fails.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let sessions = match storage.read(HISTORY_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<StudySession>>(&raw) {
                Ok(sessions) => sessions,
                Err(e) => {
                    warn!("Discarding malformed history ({}); starting empty", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Could not read history ({}); starting empty", e);
                Vec::new()
            }
        };

        debug!("Loaded {} study sessions", sessions.len());

        Self { sessions, storage }
    }

    pub fn sessions(&self) -> &[StudySession] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&StudySession> {
        self.sessions.iter().find(|s| s.id() == id)
    }

    /// Prepends a new session for a completed exchange and persists the list.
    pub fn record(
        &mut self,
        topic: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<StudySession, DomainError> {
        let session = StudySession::new(topic, content);
        self.sessions.insert(0, session.clone());
        self.persist()?;
        Ok(session)
    }

    /// Removes the session with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: &str) -> Result<bool, DomainError> {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id() != id);
        if self.sessions.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Empties the history immediately. There is no undo.
    pub fn clear_all(&mut self) -> Result<(), DomainError> {
        self.sessions.clear();
        self.persist()
    }

    fn persist(&self) -> Result<(), DomainError> {
        let payload = serde_json::to_string(&self.sessions)?;
        self.storage.write(HISTORY_STORAGE_KEY, &payload)
    }
}
