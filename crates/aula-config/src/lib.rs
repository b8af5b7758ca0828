//! # aula-config
//!
//! Layered configuration loading for Aula using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`AULA_*` prefix, `__` as separator)
//! 2. Project-level `.aula/config.toml`
//! 3. User-level `~/.config/aula/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `AULA_API__BASE_URL` -> `api.base_url`,
//! `AULA_SESSION__DIR` -> `session.dir`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use aula_config::AulaConfig;
//!
//! let config = AulaConfig::load_with_dotenv().expect("config");
//! println!("API: {}", config.api.base_url);
//! ```

mod api;
mod error;
mod general;
mod session;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use session::SessionConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AulaConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl AulaConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does NOT read `.env`; use [`Self::load_with_dotenv`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed and
    /// [`ConfigError::InvalidValue`] when a value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration after reading `.env` from the current directory
    /// or the nearest workspace root.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".aula/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("AULA_").split("__"))
    }

    /// Check cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        if self.general.default_limit == 0 {
            return Err(ConfigError::invalid(
                "general.default_limit",
                "must be greater than zero",
            ));
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("aula").join("config.toml"))
    }

    /// Silently does nothing if no `.env` is found.
    fn load_dotenv() {
        if dotenvy::dotenv().is_ok() {
            return;
        }
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_is_valid() {
        let config = AulaConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.general.default_limit, 20);
        assert!(config.session.dir.is_empty());
    }

    #[test]
    fn zero_limit_is_rejected() {
        let mut config = AulaConfig::default();
        config.general.default_limit = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "general.default_limit"
        ));
    }
}
