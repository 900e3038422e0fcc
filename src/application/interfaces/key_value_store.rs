use crate::domain::DomainError;

/// A durable string slot store, the client's equivalent of browser local storage.
///
/// Writes are synchronous: once `write` returns `Ok`, the value survives a
/// process restart.
pub trait KeyValueStore: Send + Sync {
    /// Returns `None` when nothing has been written under `key`.
    fn read(&self, key: &str) -> Result<Option<String>, DomainError>;

    fn write(&self, key: &str, value: &str) -> Result<(), DomainError>;
}
