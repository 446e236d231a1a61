//! Client-side key/value storage for issued tokens.
//!
//! `set` overwrites unconditionally; there is no versioning or compare-and-swap.

pub mod file;

pub use self::file::FileStore;

use std::collections::HashMap;
use std::io;
use std::sync::{Mutex, MutexGuard};

pub trait TokenStore {
    /// # Errors
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> io::Result<Option<String>>;

    /// # Errors
    /// Returns an error if the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> io::Result<()>;

    /// # Errors
    /// Returns an error if the backing store cannot be written.
    fn clear(&self, key: &str) -> io::Result<()>;
}

/// Process-local store, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().map_or(0, |entries| entries.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> io::Result<MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| io::Error::other("memory store lock poisoned"))
    }
}

impl TokenStore for MemoryStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) -> io::Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

impl<S: TokenStore + ?Sized> TokenStore for &S {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        (**self).set(key, value)
    }

    fn clear(&self, key: &str) -> io::Result<()> {
        (**self).clear(key)
    }
}
