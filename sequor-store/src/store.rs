use async_trait::async_trait;
use serde_json::Value as JsonValue;

/// The persisted document: a flat key -> value mapping.
pub type VarMap = serde_json::Map<String, JsonValue>;

/// Durable key/value state threading extracted values across an ordered run.
///
/// `update` merges: given keys overwrite (last write wins), all other keys
/// are preserved. Implementations are single-writer by contract; execution
/// is strictly sequential, so every write may be a full load-modify-store
/// cycle without locking. Parallel runs would need a mutex or transactional
/// update on top of this trait.
#[async_trait]
pub trait VariableStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<JsonValue>, StoreError>;

    async fn update(&self, vars: VarMap) -> Result<(), StoreError>;

    /// Full copy of the current document, for inspection and reporting.
    async fn snapshot(&self) -> Result<VarMap, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode store document: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("store document is not a flat object (found {found})")]
    NotAnObject { found: &'static str },
    #[error("store lock poisoned")]
    Poisoned,
}
