//! The signed-in session: a bearer token shared by every submission client.
//!
//! The token lives in memory behind an `Arc<RwLock<..>>` and is mirrored into
//! a [`TokenStore`] so it survives page reloads. Writer (login) and reader
//! (the client) always go through the same [`Session`], under one storage key.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

use crate::error::StoreError;

/// Storage key the token is persisted under.
pub const TOKEN_STORAGE_KEY: &str = "authToken";

/// Durable storage for the session token.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;

    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backing storage refuses the write.
    fn save(&self, token: &str) -> Result<(), StoreError>;

    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backing storage refuses the removal.
    fn clear(&self) -> Result<(), StoreError>;
}

/// Process-local token storage, used by tests and non-browser builds.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, token: &str) -> Result<(), StoreError> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Shared handle on the current bearer token.
#[derive(Clone)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
    store: Arc<dyn TokenStore>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Builds a session over `store`, restoring any token it already holds.
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        let token = store.load();
        if token.is_some() {
            info!("Restored session token from storage");
        }
        Self {
            token: Arc::new(RwLock::new(token)),
            store,
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::default()))
    }

    /// Starts a session with `token`.
    ///
    /// The in-memory token is always updated; a storage failure only means the
    /// session will not survive a reload, so it is logged and reported.
    ///
    /// # Errors
    ///
    /// Returns the [`StoreError`] raised while persisting the token.
    pub fn acquire(&self, token: impl Into<String>) -> Result<(), StoreError> {
        let token = token.into();
        let persisted = self.store.save(&token);
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);

        if let Err(err) = &persisted {
            warn!(error = %err, "Session token could not be persisted");
        }
        persisted
    }

    /// Ends the session on logout or expiry.
    ///
    /// # Errors
    ///
    /// Returns the [`StoreError`] raised while removing the persisted token.
    pub fn clear(&self) -> Result<(), StoreError> {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
        let cleared = self.store.clear();

        if let Err(err) = &cleared {
            warn!(error = %err, "Persisted session token could not be removed");
        }
        cleared
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}
