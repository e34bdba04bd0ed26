use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::store::{StoreError, VarMap, VariableStore};

/// File-backed store: one pretty-printed JSON object, force-overwritten on
/// every update so the file stays human-inspectable between runs.
///
/// A missing or empty file reads as an empty document; the store file is
/// created on first update and survives after the run ends.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<VarMap, StoreError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(VarMap::new()),
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(VarMap::new());
        }
        match serde_json::from_str::<JsonValue>(&text)? {
            JsonValue::Object(map) => Ok(map),
            other => Err(StoreError::NotAnObject {
                found: json_type(&other),
            }),
        }
    }

    fn persist(&self, map: &VarMap) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(map)?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}

#[async_trait]
impl VariableStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<JsonValue>, StoreError> {
        Ok(self.load()?.get(key).cloned())
    }

    async fn update(&self, vars: VarMap) -> Result<(), StoreError> {
        // Whole-document load-then-overwrite; safe only under the trait's
        // single-writer contract.
        let mut map = self.load()?;
        for (k, v) in vars {
            map.insert(k, v);
        }
        self.persist(&map)
    }

    async fn snapshot(&self) -> Result<VarMap, StoreError> {
        self.load()
    }
}

fn json_type(v: &JsonValue) -> &'static str {
    match v {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
