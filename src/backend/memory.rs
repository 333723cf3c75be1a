use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::backend::Backend;
use crate::error::BackendError;

/// In-memory backend.
///
/// Holds records in a plain map and never touches storage; lets the
/// manager run in tests and anywhere persistence is not wanted.
pub struct MemoryBackend {
    records: RwLock<HashMap<String, u32>>,
}

impl MemoryBackend {
    /// Create a new empty backend
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn read_all(&self) -> Result<BTreeMap<String, u32>, BackendError> {
        let records = self
            .records
            .read()
            .map_err(|_| BackendError::LockPoisoned("read"))?;
        Ok(records.iter().map(|(k, v)| (k.clone(), *v)).collect())
    }

    async fn upsert(&self, name: &str, quantity: u32) -> Result<(), BackendError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| BackendError::LockPoisoned("write"))?;
        records.insert(name.to_string(), quantity);
        Ok(())
    }

    async fn delete(&self, name: &str) -> Result<(), BackendError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| BackendError::LockPoisoned("write"))?;
        records.remove(name);
        Ok(())
    }
}
