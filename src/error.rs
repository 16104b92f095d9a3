use std::fmt;
use std::io;
use std::path::Path;

/// Error type for document store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing file exists but is not a `{ collection: [record, ...] }` document.
    /// The store stays unloaded, so every later call reports the same error
    /// until the file is fixed or removed.
    CorruptData { path: String, message: String },
    /// The backing file could not be read or written.
    Io { path: String, message: String },
    /// No record with this id exists in the collection.
    NotFound { collection: String, id: String },
    /// A record could not be converted to or from a typed view.
    Serde(String),
    /// A thread panicked while holding the store lock.
    LockPoisoned(&'static str),
}

impl StoreError {
    pub(crate) fn io(path: &Path, err: io::Error) -> Self {
        StoreError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn corrupt(path: &Path, err: serde_json::Error) -> Self {
        StoreError::CorruptData {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    pub fn not_found(collection: &str, id: &str) -> Self {
        StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::CorruptData { path, message } => {
                write!(f, "corrupt data file {}: {}", path, message)
            }
            StoreError::Io { path, message } => write!(f, "i/o failure on {}: {}", path, message),
            StoreError::NotFound { collection, id } => {
                write!(f, "record not found: {}:{}", collection, id)
            }
            StoreError::Serde(msg) => write!(f, "record serialization error: {}", msg),
            StoreError::LockPoisoned(operation) => {
                write!(f, "store lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err.to_string())
    }
}
