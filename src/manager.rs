use tracing::{debug, info};

use crate::backend::Backend;
use crate::error::BackendError;
use crate::inventory::Inventory;

/// Maintains the authoritative in-memory inventory and keeps it
/// synchronized with a persistence backend.
///
/// Mutations persist the computed record first and update the cached
/// state only after the backend accepted the change, so a failed call
/// leaves the cache at the pre-operation value and returns the error.
/// Full backend reads happen only in [`load`](Self::load) and
/// [`refresh`](Self::refresh).
pub struct InventoryManager<B: Backend> {
    inventory: Inventory,
    backend: B,
}

impl<B: Backend> InventoryManager<B> {
    /// Create a manager with an empty cache; call `load` to populate it
    pub fn new(backend: B) -> Self {
        Self {
            inventory: Inventory::new(),
            backend,
        }
    }

    /// Replace the in-memory state wholesale with the stored mapping.
    /// An empty or unset backend yields an empty inventory, not an error.
    pub async fn load(&mut self) -> Result<(), BackendError> {
        let records = self.backend.read_all().await?;
        self.inventory = Inventory::from_map(records);
        info!(items = self.inventory.len(), "loaded inventory from backend");
        Ok(())
    }

    /// Explicit full reload, identical to the startup read
    pub async fn refresh(&mut self) -> Result<(), BackendError> {
        self.load().await
    }

    /// Add one unit of `name`, creating the item at quantity 1 if it is
    /// new. Empty and whitespace-only names are ignored.
    pub async fn add_item(&mut self, name: &str) -> Result<(), BackendError> {
        let name = name.trim();
        if name.is_empty() {
            debug!("ignoring add of empty item name");
            return Ok(());
        }

        let quantity = self.inventory.quantity(name).saturating_add(1);
        self.backend.upsert(name, quantity).await?;
        self.inventory.set_quantity(name, quantity);
        debug!(item = name, quantity, "added one unit");
        Ok(())
    }

    /// Remove one unit of `name`; at quantity 1 the item disappears from
    /// the list and its record is deleted. Unknown names are ignored.
    pub async fn remove_item(&mut self, name: &str) -> Result<(), BackendError> {
        let quantity = self.inventory.quantity(name);
        if quantity == 0 {
            return Ok(());
        }

        if quantity == 1 {
            self.backend.delete(name).await?;
        } else {
            self.backend.upsert(name, quantity - 1).await?;
        }
        self.inventory.set_quantity(name, quantity - 1);
        debug!(item = name, quantity = quantity - 1, "removed one unit");
        Ok(())
    }

    /// Ordered (name, quantity) pairs for display
    pub fn items(&self) -> Vec<(String, u32)> {
        self.inventory
            .items()
            .map(|(name, q)| (name.to_string(), q))
            .collect()
    }

    /// Quantity for `name`; 0 when absent
    pub fn quantity(&self, name: &str) -> u32 {
        self.inventory.quantity(name)
    }

    /// The cached inventory state
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::backend::MemoryBackend;

    fn manager() -> InventoryManager<MemoryBackend> {
        InventoryManager::new(MemoryBackend::new())
    }

    #[tokio::test]
    async fn test_add_remove_lifecycle() {
        let mut mgr = manager();

        mgr.add_item("banana").await.unwrap();
        assert_eq!(mgr.quantity("banana"), 1);

        mgr.add_item("banana").await.unwrap();
        assert_eq!(mgr.quantity("banana"), 2);

        mgr.remove_item("banana").await.unwrap();
        assert_eq!(mgr.quantity("banana"), 1);

        mgr.remove_item("banana").await.unwrap();
        assert_eq!(mgr.quantity("banana"), 0);
        assert!(mgr.items().is_empty());
    }

    #[tokio::test]
    async fn test_remove_nonexistent_is_noop() {
        let mut mgr = manager();
        mgr.remove_item("nonexistent").await.unwrap();
        assert!(mgr.items().is_empty());
    }

    #[tokio::test]
    async fn test_whitespace_name_is_ignored() {
        let mut mgr = manager();
        mgr.add_item("   ").await.unwrap();
        mgr.add_item("").await.unwrap();
        assert!(mgr.items().is_empty());
        assert!(mgr.inventory().is_empty());
    }

    #[tokio::test]
    async fn test_name_is_trimmed_before_use() {
        let mut mgr = manager();
        mgr.add_item("  banana ").await.unwrap();
        assert_eq!(mgr.quantity("banana"), 1);
    }

    #[tokio::test]
    async fn test_names_are_case_sensitive_keys() {
        let mut mgr = manager();
        mgr.add_item("Apple").await.unwrap();
        mgr.add_item("apple").await.unwrap();
        mgr.add_item("apple").await.unwrap();

        assert_eq!(mgr.quantity("Apple"), 1);
        assert_eq!(mgr.quantity("apple"), 2);
        assert_eq!(mgr.items().len(), 2);
    }

    #[tokio::test]
    async fn test_present_quantities_stay_positive() {
        let mut mgr = manager();
        let actions = [
            ("add", "milk"),
            ("add", "milk"),
            ("remove", "milk"),
            ("add", "eggs"),
            ("remove", "milk"),
            ("remove", "milk"),
            ("add", "milk"),
        ];
        for (action, name) in actions {
            match action {
                "add" => mgr.add_item(name).await.unwrap(),
                _ => mgr.remove_item(name).await.unwrap(),
            }
            for (_, quantity) in mgr.items() {
                assert!(quantity >= 1);
            }
        }
    }

    #[tokio::test]
    async fn test_load_returns_last_persisted_mapping() {
        let backend = Arc::new(MemoryBackend::new());
        let mut mgr = InventoryManager::new(Arc::clone(&backend));

        mgr.add_item("banana").await.unwrap();
        mgr.add_item("banana").await.unwrap();
        mgr.add_item("apple").await.unwrap();
        mgr.remove_item("apple").await.unwrap();

        // A fresh manager over the same backend converges on the same state
        let mut reloaded = InventoryManager::new(backend);
        reloaded.load().await.unwrap();
        assert_eq!(reloaded.items(), vec![("banana".to_string(), 2)]);
    }

    #[tokio::test]
    async fn test_refresh_picks_up_external_writes() {
        let backend = Arc::new(MemoryBackend::new());
        let mut mgr = InventoryManager::new(Arc::clone(&backend));
        mgr.load().await.unwrap();

        backend.upsert("oats", 4).await.unwrap();
        assert_eq!(mgr.quantity("oats"), 0);

        mgr.refresh().await.unwrap();
        assert_eq!(mgr.quantity("oats"), 4);
    }

    #[tokio::test]
    async fn test_add_at_max_quantity_saturates() {
        let backend = Arc::new(MemoryBackend::new());
        backend.upsert("bulk", u32::MAX).await.unwrap();

        let mut mgr = InventoryManager::new(backend);
        mgr.load().await.unwrap();
        mgr.add_item("bulk").await.unwrap();

        // The count pins at the maximum instead of wrapping to 0, which
        // would delete the item
        assert_eq!(mgr.quantity("bulk"), u32::MAX);
        assert!(mgr.inventory().contains("bulk"));
    }

    #[tokio::test]
    async fn test_local_backend_round_trip() {
        use crate::backend::{DEFAULT_STORE_FILE, LocalBackend};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_STORE_FILE);

        let mut mgr = InventoryManager::new(LocalBackend::new(&path));
        mgr.load().await.unwrap();
        mgr.add_item("banana").await.unwrap();
        mgr.add_item("banana").await.unwrap();
        mgr.remove_item("banana").await.unwrap();

        let mut reloaded = InventoryManager::new(LocalBackend::new(&path));
        reloaded.load().await.unwrap();
        assert_eq!(reloaded.items(), vec![("banana".to_string(), 1)]);
    }

    #[tokio::test]
    async fn test_failed_persist_leaves_cache_untouched() {
        struct FailingBackend;

        #[async_trait::async_trait]
        impl Backend for FailingBackend {
            async fn read_all(
                &self,
            ) -> Result<std::collections::BTreeMap<String, u32>, BackendError> {
                Err(BackendError::LockPoisoned("read"))
            }

            async fn upsert(&self, _name: &str, _quantity: u32) -> Result<(), BackendError> {
                Err(BackendError::LockPoisoned("write"))
            }

            async fn delete(&self, _name: &str) -> Result<(), BackendError> {
                Err(BackendError::LockPoisoned("write"))
            }
        }

        let mut mgr = InventoryManager::new(FailingBackend);
        assert!(mgr.add_item("banana").await.is_err());
        assert!(mgr.inventory().is_empty());
    }
}
