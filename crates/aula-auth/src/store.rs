//! File-backed persistence for the signed-in session.
//!
//! The store keeps two entries in one directory: `token` holds the raw bearer
//! token and `user` holds the cached profile as JSON. Both files are written
//! with `0600` permissions and the directory with `0700`.

use std::fs;
use std::path::{Path, PathBuf};

use aula_core::entities::User;

use crate::error::AuthError;
use crate::session::Session;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    /// Persist both entries.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` if the directory or a file cannot be
    /// written, and `AuthError::Encode` if the user cannot be serialized.
    pub fn save(&self, session: &Session) -> Result<(), AuthError> {
        let user = serde_json::to_string(&session.user)?;
        self.ensure_dir()?;
        write_private(&self.entry(TOKEN_KEY), &session.token)?;
        write_private(&self.entry(USER_KEY), &user)
    }

    /// Replace only the cached user, keeping the token.
    ///
    /// # Errors
    ///
    /// Same as [`Self::save`].
    pub fn save_user(&self, user: &User) -> Result<(), AuthError> {
        let user = serde_json::to_string(user)?;
        self.ensure_dir()?;
        write_private(&self.entry(USER_KEY), &user)
    }

    /// Load a previously saved session.
    ///
    /// Returns `None` when either entry is missing, the token is blank, or
    /// the cached user no longer parses.
    #[must_use]
    pub fn load(&self) -> Option<Session> {
        let token = fs::read_to_string(self.entry(TOKEN_KEY))
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())?;
        let raw_user = fs::read_to_string(self.entry(USER_KEY)).ok()?;
        match serde_json::from_str::<User>(&raw_user) {
            Ok(user) => Some(Session { token, user }),
            Err(error) => {
                tracing::warn!(%error, dir = %self.dir.display(), "cached user is unreadable; ignoring session");
                None
            }
        }
    }

    /// Remove both entries. Missing files are not an error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Store` if an existing entry cannot be removed.
    pub fn clear(&self) -> Result<(), AuthError> {
        for key in [TOKEN_KEY, USER_KEY] {
            let path = self.entry(key);
            if path.exists() {
                fs::remove_file(&path).map_err(|e| {
                    AuthError::Store(format!("failed to delete {}: {e}", path.display()))
                })?;
            }
        }
        Ok(())
    }

    fn ensure_dir(&self) -> Result<(), AuthError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| AuthError::Store(format!("mkdir {}: {e}", self.dir.display())))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(&self.dir, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", self.dir.display());
            }
        }
        Ok(())
    }
}

fn write_private(path: &Path, contents: &str) -> Result<(), AuthError> {
    fs::write(path, contents)
        .map_err(|e| AuthError::Store(format!("write {}: {e}", path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .map_err(|e| AuthError::Store(format!("chmod {}: {e}", path.display())))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aula_core::enums::Role;
    use pretty_assertions::assert_eq;

    fn user() -> User {
        serde_json::from_value(serde_json::json!({
            "id": 7,
            "firstName": "Carla",
            "lastName": "Muñoz",
            "email": "carla@colegio.cl",
            "role": "profesional"
        }))
        .expect("user")
    }

    #[test]
    fn save_load_clear_cycle() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = SessionStore::new(tmp.path().join("aula"));

        assert!(store.load().is_none());
        store.save(&Session::new("tok-123", user())).expect("save");

        let loaded = store.load().expect("session present");
        assert_eq!(loaded.token, "tok-123");
        assert_eq!(loaded.user.role, Role::Profesional);

        store.clear().expect("clear");
        assert!(store.load().is_none());
        assert!(!store.dir().join(TOKEN_KEY).exists());
    }

    #[cfg(unix)]
    #[test]
    fn entries_are_private() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = SessionStore::new(tmp.path());
        store.save(&Session::new("tok", user())).expect("save");

        for key in [TOKEN_KEY, USER_KEY] {
            let mode = fs::metadata(store.dir().join(key))
                .expect("metadata")
                .permissions()
                .mode()
                & 0o777;
            assert_eq!(mode, 0o600, "{key} should be 0600");
        }
    }

    #[test]
    fn blank_token_is_ignored() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = SessionStore::new(tmp.path());
        store.save(&Session::new("tok", user())).expect("save");
        fs::write(tmp.path().join(TOKEN_KEY), "  \n").expect("write");
        assert!(store.load().is_none());
    }

    #[test]
    fn corrupt_user_is_ignored() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = SessionStore::new(tmp.path());
        store.save(&Session::new("tok", user())).expect("save");
        fs::write(tmp.path().join(USER_KEY), "{not json").expect("write");
        assert!(store.load().is_none());
    }

    #[test]
    fn clear_without_entries_is_ok() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        assert!(SessionStore::new(tmp.path().join("missing")).clear().is_ok());
    }
}
