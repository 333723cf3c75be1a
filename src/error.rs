use thiserror::Error;

/// Errors surfaced by a persistence backend.
///
/// The crate never swallows these: every fallible operation returns them
/// to the caller, and there is no retry or fallback layer.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Filesystem I/O failed (local variant)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored mapping could not be (de)serialized
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The in-memory store's lock was poisoned
    #[error("store lock poisoned during {0}")]
    LockPoisoned(&'static str),

    /// HTTP transport failure (remote variant)
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote store answered with a non-success status
    #[error("remote store returned {status}: {message}")]
    Remote { status: u16, message: String },
}
