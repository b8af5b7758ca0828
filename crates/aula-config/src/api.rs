//! Backend API connection settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_base_url() -> String {
    "http://localhost:3001/api".to_string()
}

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Join `path` onto the base URL with exactly one slash between them.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(ConfigError::invalid("api.base_url", "must not be empty"));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::invalid(
                "api.base_url",
                format!("expected an http(s) URL, got '{base}'"),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid("api.timeout_secs", "must be greater than zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_correct() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "http://localhost:3001/api");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn url_joins_with_single_slash() {
        let config = ApiConfig {
            base_url: "https://aula.example.cl/api/".into(),
            ..ApiConfig::default()
        };
        assert_eq!(config.url("/interventions/3"), "https://aula.example.cl/api/interventions/3");
        assert_eq!(config.url("auth/login"), "https://aula.example.cl/api/auth/login");
    }

    #[test]
    fn rejects_empty_url_and_zero_timeout() {
        let empty = ApiConfig {
            base_url: "  ".into(),
            ..ApiConfig::default()
        };
        assert!(matches!(
            empty.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "api.base_url"
        ));

        let zero = ApiConfig {
            timeout_secs: 0,
            ..ApiConfig::default()
        };
        assert!(matches!(
            zero.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "api.timeout_secs"
        ));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let config = ApiConfig {
            base_url: "ftp://aula".into(),
            ..ApiConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
