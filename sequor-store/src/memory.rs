use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::store::{StoreError, VarMap, VariableStore};

/// In-memory store with the same merge contract as [`crate::FileStore`].
/// Used for ephemeral runs and tests; nothing survives the process.
#[derive(Default)]
pub struct MemoryStore {
    vars: Mutex<VarMap>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(vars: VarMap) -> Self {
        Self {
            vars: Mutex::new(vars),
        }
    }
}

#[async_trait]
impl VariableStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<JsonValue>, StoreError> {
        let map = self.vars.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(map.get(key).cloned())
    }

    async fn update(&self, vars: VarMap) -> Result<(), StoreError> {
        let mut map = self.vars.lock().map_err(|_| StoreError::Poisoned)?;
        for (k, v) in vars {
            map.insert(k, v);
        }
        Ok(())
    }

    async fn snapshot(&self) -> Result<VarMap, StoreError> {
        let map = self.vars.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(map.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(pairs: &[(&str, JsonValue)]) -> VarMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[tokio::test]
    async fn update_merges_and_preserves_other_keys() {
        let store = MemoryStore::new();
        store.update(map(&[("a", json!(1)), ("b", json!(2))])).await.unwrap();
        store.update(map(&[("b", json!(3)), ("c", json!("x"))])).await.unwrap();

        assert_eq!(store.get("a").await.unwrap(), Some(json!(1)));
        assert_eq!(store.get("b").await.unwrap(), Some(json!(3)));
        assert_eq!(store.get("c").await.unwrap(), Some(json!("x")));
        assert_eq!(store.get("d").await.unwrap(), None);
    }
}
