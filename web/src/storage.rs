use gloo::storage::{LocalStorage, Storage as _};
use serde::{Serialize, de::DeserializeOwned};
use twinflip_core::{Storage, StorageError};

/// Key a value is persisted under in `localStorage`.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

pub(crate) trait LocalOrDefault: Sized {
    fn local_or_default() -> Self;
    fn local_save(&self);
}

impl<T> LocalOrDefault for T
where
    T: StorageKey + Default + Serialize + DeserializeOwned,
{
    fn local_or_default() -> Self {
        LocalStorage::get(T::KEY).unwrap_or_else(|err| {
            log::debug!("no usable {} in local storage: {}", T::KEY, err);
            T::default()
        })
    }

    fn local_save(&self) {
        if let Err(err) = LocalStorage::set(T::KEY, self) {
            log::error!("Could not save {} to local storage: {}", T::KEY, err);
        }
    }
}

/// `window.localStorage` as the engine's storage capability.
///
/// Unlike gloo's helpers this never panics when storage is disabled, it reports
/// [`StorageError::Unavailable`] and lets the score store carry on in memory.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct BrowserStorage;

impl BrowserStorage {
    fn raw() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)
    }
}

impl Storage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::raw()?.get_item(key).map_err(|err| {
            log::warn!("localStorage read of {} failed: {:?}", key, err);
            StorageError::Unavailable
        })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::raw()?.set_item(key, value).map_err(|err| {
            log::warn!("localStorage write of {} failed: {:?}", key, err);
            StorageError::Unavailable
        })
    }
}
