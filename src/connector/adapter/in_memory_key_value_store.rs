use std::collections::HashMap;
use std::sync::Mutex;

use crate::application::KeyValueStore;
use crate::domain::DomainError;

/// Process-local [`KeyValueStore`]; contents vanish with the value.
pub struct InMemoryKeyValueStore {
    slots: Mutex<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>, DomainError> {
        let slots = self
            .slots
            .lock()
            .map_err(|e| DomainError::internal(format!("key-value lock poisoned: {e}")))?;
        Ok(slots.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|e| DomainError::internal(format!("key-value lock poisoned: {e}")))?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
