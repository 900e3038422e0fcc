pub mod chat_controller;
pub mod history_controller;

pub use chat_controller::ChatController;
pub use history_controller::HistoryController;

use crate::application::HistoryStore;
use crate::domain::StudySession;

/// Finds a session by id or by its 1-based position in the newest-first list.
pub(crate) fn resolve_session<'h>(
    history: &'h HistoryStore,
    id_or_index: &str,
) -> Option<&'h StudySession> {
    if let Some(session) = history.get(id_or_index) {
        return Some(session);
    }
    id_or_index
        .parse::<usize>()
        .ok()
        .filter(|n| *n >= 1)
        .and_then(|n| history.sessions().get(n - 1))
}

pub(crate) fn format_timestamp(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|t| {
            t.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "unknown time".to_string())
}
