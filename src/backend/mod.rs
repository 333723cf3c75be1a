mod local;
mod memory;
mod remote;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::BackendError;

pub use local::{DEFAULT_STORE_FILE, LocalBackend};
pub use memory::MemoryBackend;
pub use remote::RemoteBackend;

/// Persistence contract required by the inventory manager.
///
/// One record per item: the key is the item name, the value its quantity.
/// Backends do no validation of their own; whole-collection reads suffice
/// at this scale.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Read the full stored mapping; empty when nothing is stored
    async fn read_all(&self) -> Result<BTreeMap<String, u32>, BackendError>;

    /// Create or overwrite the record for `name`
    async fn upsert(&self, name: &str, quantity: u32) -> Result<(), BackendError>;

    /// Remove the record for `name`; succeeds when absent
    async fn delete(&self, name: &str) -> Result<(), BackendError>;
}

#[async_trait]
impl<B: Backend + ?Sized> Backend for Arc<B> {
    async fn read_all(&self) -> Result<BTreeMap<String, u32>, BackendError> {
        (**self).read_all().await
    }

    async fn upsert(&self, name: &str, quantity: u32) -> Result<(), BackendError> {
        (**self).upsert(name, quantity).await
    }

    async fn delete(&self, name: &str) -> Result<(), BackendError> {
        (**self).delete(name).await
    }
}
