use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

use crate::*;

/// Key-value persistence capability, backed by `localStorage` in the browser.
pub trait Storage {
    fn get(&self, key: &str) -> core::result::Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> core::result::Result<(), StorageError>;
}

/// Storage that remembers nothing, for environments without persistence.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NullStorage;

impl Storage for NullStorage {
    fn get(&self, _key: &str) -> core::result::Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&mut self, _key: &str, _value: &str) -> core::result::Result<(), StorageError> {
        Ok(())
    }
}

/// In-process storage, mostly useful for tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    pub fn entry(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> core::result::Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> core::result::Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<T: Storage + ?Sized> Storage for &mut T {
    fn get(&self, key: &str) -> core::result::Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> core::result::Result<(), StorageError> {
        (**self).set(key, value)
    }
}
