//! Environment variables and project TOML layered through figment.
//!
//! Uses `figment::Jail` so env and cwd changes stay sandboxed.

use aula_config::{AulaConfig, ConfigError};
use figment::Jail;
use pretty_assertions::assert_eq;

#[test]
fn env_overrides_nested_keys() {
    Jail::expect_with(|jail| {
        jail.set_env("AULA_API__BASE_URL", "https://aula.example.cl/api");
        jail.set_env("AULA_API__TIMEOUT_SECS", "30");
        jail.set_env("AULA_SESSION__DIR", "/var/lib/aula");
        jail.set_env("AULA_GENERAL__DEFAULT_LIMIT", "50");

        let config = AulaConfig::load().expect("config loads");
        assert_eq!(config.api.base_url, "https://aula.example.cl/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.session.dir, "/var/lib/aula");
        assert_eq!(config.general.default_limit, 50);
        Ok(())
    });
}

#[test]
fn project_toml_is_layered_under_env() {
    Jail::expect_with(|jail| {
        std::fs::create_dir(jail.directory().join(".aula")).expect("create .aula");
        jail.create_file(
            ".aula/config.toml",
            r#"
[api]
base_url = "http://colegio.local:8080/api"
timeout_secs = 5

[general]
default_limit = 10
"#,
        )?;
        jail.set_env("AULA_API__TIMEOUT_SECS", "15");

        let config = AulaConfig::load().expect("config loads");
        assert_eq!(config.api.base_url, "http://colegio.local:8080/api");
        assert_eq!(config.api.timeout_secs, 15);
        assert_eq!(config.general.default_limit, 10);
        Ok(())
    });
}

#[test]
fn invalid_values_fail_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("AULA_API__TIMEOUT_SECS", "0");
        let err = AulaConfig::load().expect_err("zero timeout is invalid");
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "api.timeout_secs"));
        Ok(())
    });
}

#[test]
fn malformed_value_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.set_env("AULA_API__TIMEOUT_SECS", "soon");
        let err = AulaConfig::load().expect_err("non-numeric timeout");
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}
