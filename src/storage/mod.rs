//! Where the [`Session`] lives between runs.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::Session;
use std::{io, path::PathBuf};

/// The key the session snapshot is stored under unless told otherwise.
pub const DEFAULT_KEY: &str = "auth-storage";

/// Something which can load and save a [`Session`] snapshot.
pub trait SessionStorage {
    /// Read the last saved snapshot, returning `None` if nothing has been
    /// saved yet.
    fn load(&self) -> Result<Option<Session>, StorageError>;

    /// Replace the saved snapshot.
    fn save(&self, session: &Session) -> Result<(), StorageError>;
}

impl<S: SessionStorage + ?Sized> SessionStorage for Box<S> {
    fn load(&self) -> Result<Option<Session>, StorageError> { (**self).load() }

    fn save(&self, session: &Session) -> Result<(), StorageError> {
        (**self).save(session)
    }
}

/// Possible errors when reading or writing a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Unable to access \"{}\"", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        inner: io::Error,
    },
    #[error("The session snapshot is malformed")]
    Serialization(
        #[source]
        #[from]
        serde_json::Error,
    ),
}

pub(crate) fn encode(session: &Session) -> Result<String, StorageError> {
    serde_json::to_string_pretty(session).map_err(StorageError::from)
}

pub(crate) fn decode(raw: &str) -> Result<Option<Session>, StorageError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }

    serde_json::from_str(raw)
        .map(Some)
        .map_err(StorageError::from)
}
