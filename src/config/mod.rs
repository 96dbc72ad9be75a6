//! # Configuration Management
//!
//! Settings are layered with the `config` crate: built-in defaults, then an
//! optional YAML file, then `GWVALIDATE__`-prefixed environment variables
//! (`GWVALIDATE__CHECK__DEFAULT_NAMESPACE=team-a`). The result is checked
//! with the `validator` derive before use.

pub mod settings;

pub use settings::{CheckConfig, ObservabilityConfig, OutputFormat, Settings};

use crate::errors::Result;
use config::{Config, Environment, File};
use std::path::Path;
use tracing::debug;

/// File read from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "gwvalidate.yaml";

/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "GWVALIDATE";

/// Load settings from `path` (or [`DEFAULT_CONFIG_FILE`] when present) and
/// the process environment.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    build_settings(path, environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).prefix_separator("__").separator("__").try_parsing(true)
}

fn build_settings(path: Option<&Path>, environment: Environment) -> Result<Settings> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let settings: Settings = Config::builder()
        .add_source(Config::try_from(&Settings::default())?)
        .add_source(file)
        .add_source(environment)
        .build()?
        .try_deserialize()?;

    settings.validate()?;
    debug!(?settings, "loaded settings");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GwValidateError;
    use std::io::Write;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let source: config::Map<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        environment().source(Some(source))
    }

    fn config_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_sources() {
        let settings = build_settings(None, env(&[])).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = config_file("check:\n  default_namespace: team-a\n  output: json\n");
        let settings = build_settings(Some(file.path()), env(&[])).unwrap();
        assert_eq!(settings.check.default_namespace, "team-a");
        assert_eq!(settings.check.output, OutputFormat::Json);
        assert_eq!(settings.observability.log_level, "warn");
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = config_file("observability:\n  log_level: info\n");
        let settings = build_settings(
            Some(file.path()),
            env(&[
                ("GWVALIDATE__OBSERVABILITY__LOG_LEVEL", "debug"),
                ("GWVALIDATE__OBSERVABILITY__JSON_LOGGING", "true"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.observability.log_level, "debug");
        assert!(settings.observability.json_logging);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = build_settings(Some(&dir.path().join("absent.yaml")), env(&[])).unwrap_err();
        assert!(matches!(err, GwValidateError::Config { .. }));
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let file = config_file("check:\n  default_namespace: \"\"\n");
        let err = build_settings(Some(file.path()), env(&[])).unwrap_err();
        assert!(err.to_string().contains("Invalid settings"));
    }
}
