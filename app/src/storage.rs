//! Browser `localStorage` backing for the session token.

use forms::{StoreError, TOKEN_STORAGE_KEY, TokenStore};
use leptos::logging;
use web_sys::Storage;

/// Persists the session token in `window.localStorage`.
///
/// The storage handle is looked up on every call so the store stays `Send`
/// and `Sync`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageTokenStore;

fn local_storage() -> Result<Storage, StoreError> {
    let window =
        web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".to_owned()))?;
    window
        .local_storage()
        .map_err(|err| StoreError::Unavailable(format!("{err:?}")))?
        .ok_or_else(|| StoreError::Unavailable("localStorage is disabled".to_owned()))
}

impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> Option<String> {
        match local_storage() {
            Ok(storage) => storage.get_item(TOKEN_STORAGE_KEY).ok().flatten(),
            Err(err) => {
                logging::warn!("Session token not restored: {err}");
                None
            }
        }
    }

    fn save(&self, token: &str) -> Result<(), StoreError> {
        local_storage()?
            .set_item(TOKEN_STORAGE_KEY, token)
            .map_err(|err| StoreError::Write(format!("{err:?}")))
    }

    fn clear(&self) -> Result<(), StoreError> {
        local_storage()?
            .remove_item(TOKEN_STORAGE_KEY)
            .map_err(|err| StoreError::Write(format!("{err:?}")))
    }
}
