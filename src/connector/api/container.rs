use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::application::{ConversationState, HistoryStore, KeyValueStore, RequestOrchestrator};
use crate::connector::adapter::{FileKeyValueStore, HttpRequestOrchestrator};

pub struct ContainerConfig {
    /// Directory holding the durable history slot.
    pub data_dir: String,
    /// Base URL of the backend serving `/api/generate`.
    pub backend_url: String,
}

/// Wires the client side: durable storage and the backend orchestrator.
pub struct Container {
    storage: Arc<dyn KeyValueStore>,
    orchestrator: Arc<dyn RequestOrchestrator>,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        debug!("Using history storage in {}", config.data_dir);
        let storage = Arc::new(FileKeyValueStore::new(&config.data_dir)?);

        debug!("Using backend at {}", config.backend_url);
        let orchestrator = Arc::new(HttpRequestOrchestrator::new(config.backend_url.clone()));

        Ok(Self::with_parts(storage, orchestrator))
    }

    /// Builds a container from already-constructed parts.
    pub fn with_parts(
        storage: Arc<dyn KeyValueStore>,
        orchestrator: Arc<dyn RequestOrchestrator>,
    ) -> Self {
        Self {
            storage,
            orchestrator,
        }
    }

    pub fn history_store(&self) -> HistoryStore {
        HistoryStore::load(self.storage.clone())
    }

    pub fn conversation(&self) -> ConversationState {
        ConversationState::new(self.orchestrator.clone(), self.history_store())
    }
}
