use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Message, Role};

/// A completed exchange persisted in history: one topic and its reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySession {
    id: String,
    topic: String,
    content: String,
    /// Creation time in epoch milliseconds.
    timestamp: i64,
}

impl StudySession {
    pub fn new(topic: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            topic: topic.into(),
            content: content.into(),
            timestamp: current_timestamp_millis(),
        }
    }

    /// Reconstitutes from persisted data.
    pub fn reconstitute(id: String, topic: String, content: String, timestamp: i64) -> Self {
        Self {
            id,
            topic,
            content,
            timestamp,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// The two-message transcript a session replays into.
    ///
    /// Ids are synthetic and derived from the session id, so replayed
    /// messages never collide with live ones.
    pub fn to_transcript(&self) -> Vec<Message> {
        vec![
            Message::reconstitute(format!("{}:topic", self.id), Role::User, &self.topic),
            Message::reconstitute(format!("{}:content", self.id), Role::Assistant, &self.content),
        ]
    }
}

fn current_timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}
