use anyhow::Result;

use crate::application::HistoryStore;
use crate::DomainError;

use super::super::Container;
use super::{format_timestamp, resolve_session};

pub struct HistoryController<'a> {
    container: &'a Container,
}

impl<'a> HistoryController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub fn list(&self) -> Result<String> {
        Ok(format_history(&self.container.history_store()))
    }

    pub fn show(&self, id_or_index: &str) -> Result<String> {
        let history = self.container.history_store();
        let session = resolve_session(&history, id_or_index)
            .ok_or_else(|| DomainError::not_found(format!("Study session not found: {}", id_or_index)))?;

        Ok(format!(
            "{}\n{}\n\n{}",
            session.topic(),
            format_timestamp(session.timestamp()),
            session.content()
        ))
    }

    pub fn delete(&self, id_or_index: &str) -> Result<String> {
        let mut history = self.container.history_store();
        let id = resolve_session(&history, id_or_index)
            .map(|s| s.id().to_string())
            .ok_or_else(|| DomainError::not_found(format!("Study session not found: {}", id_or_index)))?;

        history.remove(&id)?;
        Ok("Study session deleted.".to_string())
    }

    /// Clearing is two-step: without `confirmed` nothing is deleted.
    pub fn clear(&self, confirmed: bool) -> Result<String> {
        let mut history = self.container.history_store();
        if history.is_empty() {
            return Ok("Memory bank is already empty.".to_string());
        }
        if !confirmed {
            return Ok(format!(
                "This permanently deletes {} study sessions. Re-run with --yes to confirm.",
                history.len()
            ));
        }

        let count = history.len();
        history.clear_all()?;
        Ok(format!("Cleared {} study sessions.", count))
    }
}

pub(crate) fn format_history(history: &HistoryStore) -> String {
    if history.is_empty() {
        return "Memory bank is empty.".to_string();
    }

    let mut output = format!("Memory Bank ({} sessions):\n\n", history.len());
    for (i, session) in history.sessions().iter().enumerate() {
        output.push_str(&format!(
            "{:>3}. {}\n     {}  {}\n",
            i + 1,
            session.topic(),
            format_timestamp(session.timestamp()),
            session.id()
        ));
    }
    output
}
