//! Inventory state synchronization over pluggable persistence backends.
//!
//! The crate keeps an in-memory map of named items to quantities in step
//! with a persistent store: adding an item creates it at quantity 1 or
//! increments it, removing one decrements it and deletes the record when
//! the count reaches 0. The [`Backend`] contract has a local variant (the
//! full mapping as one JSON blob on disk), a remote variant (one document
//! per item in a hosted collection) and an in-memory variant for tests.
//! [`AddItemDialog`] carries the transient state of the "add new item"
//! input. The visual layer is the embedding application's concern.

pub mod backend;
pub mod config;
pub mod dialog;
pub mod error;
pub mod inventory;
pub mod logging;
pub mod manager;

pub use backend::{Backend, LocalBackend, MemoryBackend, RemoteBackend};
pub use config::{BackendConfig, Config, ConfigError, LogConfig, RemoteConfig};
pub use dialog::AddItemDialog;
pub use error::BackendError;
pub use inventory::Inventory;
pub use manager::InventoryManager;
