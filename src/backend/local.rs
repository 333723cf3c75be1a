use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::backend::Backend;
use crate::error::BackendError;

/// Default blob file name; plays the role of the fixed storage key.
pub const DEFAULT_STORE_FILE: &str = "inventory.json";

/// Local backend: the full mapping as a single JSON blob on disk.
///
/// Every mutation reads the blob, applies the change and rewrites the
/// whole file. At this scale a whole-blob write per change is cheaper
/// than maintaining a per-record format.
pub struct LocalBackend {
    path: PathBuf,
}

impl LocalBackend {
    /// Create a backend storing its blob at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a backend using the default file name in the current directory
    pub fn new_default() -> Self {
        Self::new(DEFAULT_STORE_FILE)
    }

    /// Path of the blob file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_blob(&self) -> Result<BTreeMap<String, u32>, BackendError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            // No blob yet means nothing stored, not an error
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_blob(&self, records: &BTreeMap<String, u32>) -> Result<(), BackendError> {
        let bytes = serde_json::to_vec(records)?;
        fs::write(&self.path, bytes).await?;
        debug!(path = %self.path.display(), records = records.len(), "wrote inventory blob");
        Ok(())
    }
}

#[async_trait]
impl Backend for LocalBackend {
    async fn read_all(&self) -> Result<BTreeMap<String, u32>, BackendError> {
        self.read_blob().await
    }

    async fn upsert(&self, name: &str, quantity: u32) -> Result<(), BackendError> {
        let mut records = self.read_blob().await?;
        records.insert(name.to_string(), quantity);
        self.write_blob(&records).await
    }

    async fn delete(&self, name: &str) -> Result<(), BackendError> {
        let mut records = self.read_blob().await?;
        if records.remove(name).is_some() {
            self.write_blob(&records).await?;
        }
        Ok(())
    }
}
