//! Persistence port for the cart.
//!
//! Two layers:
//! - [`KeyValueStore`] - string-keyed, string-valued storage, the shape of a
//!   browser origin's local storage. Backends implement this.
//! - [`CartPersistence`] - `load`/`save` of a whole [`CartState`]. The
//!   [`CartStore`](super::CartStore) only talks to this.
//!
//! [`LocalCartStorage`] bridges the two by keeping the cart as a JSON array
//! under [`CART_STORAGE_KEY`].

use std::collections::HashMap;

use thiserror::Error;

use super::CartState;

/// Storage key holding the serialized cart.
pub const CART_STORAGE_KEY: &str = "silverSaintsCart";

/// Errors raised by a storage backend or while decoding stored data.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The stored value could not be decoded (or the state encoded).
    #[error("malformed cart data: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The backend failed to read or write.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// String-keyed, string-valued storage.
///
/// Methods take `&mut self` for writes: the cart has exactly one writer, and
/// the borrow checker enforces it.
pub trait KeyValueStore {
    /// Read the value under `key`, or `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set_item(&mut self, key: &str, value: String) -> Result<(), StorageError>;

    /// Remove `key`. Succeeds if the key was already absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Loads and saves whole cart states.
pub trait CartPersistence {
    /// Load the persisted cart. A missing entry is an empty cart.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Malformed`] if the stored value does not decode,
    /// or a backend error if it cannot be read.
    fn load(&self) -> Result<CartState, StorageError>;

    /// Replace the persisted cart with `state`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn save(&mut self, state: &CartState) -> Result<(), StorageError>;
}

/// In-memory [`KeyValueStore`], for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if no keys are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.items.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.items.remove(key);
        Ok(())
    }
}

/// [`CartPersistence`] over any [`KeyValueStore`], keyed by
/// [`CART_STORAGE_KEY`].
#[derive(Debug, Clone, Default)]
pub struct LocalCartStorage<K> {
    backend: K,
}

impl<K: KeyValueStore> LocalCartStorage<K> {
    /// Wrap a key/value backend.
    #[must_use]
    pub const fn new(backend: K) -> Self {
        Self { backend }
    }

    /// Get a reference to the underlying backend.
    #[must_use]
    pub const fn backend(&self) -> &K {
        &self.backend
    }

    /// Get a mutable reference to the underlying backend.
    pub const fn backend_mut(&mut self) -> &mut K {
        &mut self.backend
    }

    /// Consume the adapter and return the backend.
    #[must_use]
    pub fn into_inner(self) -> K {
        self.backend
    }
}

impl<K: KeyValueStore> CartPersistence for LocalCartStorage<K> {
    fn load(&self) -> Result<CartState, StorageError> {
        match self.backend.get_item(CART_STORAGE_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(CartState::new()),
        }
    }

    fn save(&mut self, state: &CartState) -> Result<(), StorageError> {
        let raw = serde_json::to_string(state)?;
        self.backend.set_item(CART_STORAGE_KEY, raw)
    }
}
