use super::{SessionStorage, StorageError};
use crate::Session;
use std::{cell::RefCell, rc::Rc};

/// An in-memory [`SessionStorage`].
///
/// Clones share the same slot, so a test can keep one handle around to look
/// at what the store saved. The snapshot is kept as JSON text to go through
/// the same encoding as [`crate::storage::FileStorage`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self { MemoryStorage::default() }

    /// Start with `raw` already "on disk".
    pub fn with_contents<S: Into<String>>(raw: S) -> Self {
        MemoryStorage {
            slot: Rc::new(RefCell::new(Some(raw.into()))),
        }
    }

    /// The raw JSON most recently saved, if any.
    pub fn contents(&self) -> Option<String> { self.slot.borrow().clone() }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Session>, StorageError> {
        match self.slot.borrow().as_deref() {
            Some(raw) => super::decode(raw),
            None => Ok(None),
        }
    }

    fn save(&self, session: &Session) -> Result<(), StorageError> {
        let raw = super::encode(session)?;
        *self.slot.borrow_mut() = Some(raw);
        Ok(())
    }
}
