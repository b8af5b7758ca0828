//! Where the signed-in session is persisted.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Directory holding the `token` and `user` entries. Empty means
    /// `~/.aula`.
    #[serde(default)]
    pub dir: String,
}

impl SessionConfig {
    /// The directory to use, or `None` when it is unset and no home
    /// directory can be determined.
    #[must_use]
    pub fn resolved_dir(&self) -> Option<PathBuf> {
        if self.dir.trim().is_empty() {
            dirs::home_dir().map(|home| home.join(".aula"))
        } else {
            Some(PathBuf::from(self.dir.trim()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dir_wins() {
        let config = SessionConfig {
            dir: "/tmp/aula-session".into(),
        };
        assert_eq!(config.resolved_dir(), Some(PathBuf::from("/tmp/aula-session")));
    }

    #[test]
    fn empty_dir_falls_back_to_home() {
        let resolved = SessionConfig::default().resolved_dir();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(resolved, Some(home.join(".aula")));
        }
    }
}
