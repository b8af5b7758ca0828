//! The injected session context.
//!
//! A [`SessionHandle`] is created once per process and cloned into every
//! service that needs the bearer token. `begin` starts a session after login;
//! `end` destroys it on logout or when the backend answers 401.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use aula_core::entities::User;

use crate::error::AuthError;
use crate::session::Session;
use crate::store::SessionStore;

#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    current: Arc<Mutex<Option<Session>>>,
    store: Option<SessionStore>,
}

impl SessionHandle {
    /// A handle that lives only in memory.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// A handle backed by `store`, resuming any session it already holds.
    #[must_use]
    pub fn persistent(store: SessionStore) -> Self {
        let resumed = store.load();
        if let Some(session) = &resumed {
            tracing::debug!(user_id = session.user.id, "resumed stored session");
        }
        Self {
            current: Arc::new(Mutex::new(resumed)),
            store: Some(store),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Session>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a session, persisting it when a store is attached.
    ///
    /// # Errors
    ///
    /// Returns the store's error. The in-memory session is still set.
    pub fn begin(&self, session: Session) -> Result<(), AuthError> {
        let persisted = self.store.as_ref().map_or(Ok(()), |s| s.save(&session));
        *self.lock() = Some(session);
        persisted
    }

    /// Destroy the session in memory and on disk.
    ///
    /// # Errors
    ///
    /// Returns the store's error. The in-memory session is cleared regardless.
    pub fn end(&self) -> Result<(), AuthError> {
        self.lock().take();
        self.store.as_ref().map_or(Ok(()), SessionStore::clear)
    }

    /// Swap the cached profile, keeping the token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` without an active session, or
    /// the store's error.
    pub fn replace_user(&self, user: User) -> Result<(), AuthError> {
        {
            let mut guard = self.lock();
            let session = guard.as_mut().ok_or(AuthError::NotAuthenticated)?;
            session.user = user.clone();
        }
        self.store.as_ref().map_or(Ok(()), |s| s.save_user(&user))
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.lock().as_ref().map(|s| s.token.clone())
    }

    #[must_use]
    pub fn bearer(&self) -> Option<String> {
        self.lock().as_ref().map(Session::bearer)
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.lock().as_ref().map(|s| s.user.clone())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.lock().is_some()
    }

    /// The signed-in user or `AuthError::NotAuthenticated`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` without an active session.
    pub fn require_user(&self) -> Result<User, AuthError> {
        self.user().ok_or(AuthError::NotAuthenticated)
    }

    #[must_use]
    pub const fn store(&self) -> Option<&SessionStore> {
        self.store.as_ref()
    }
}
