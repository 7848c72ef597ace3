use crate::error::ConfigError;
use config::{Environment, File, FileFormat};
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{LoggingSettings, ServiceSettings, Settings, StatisticsSettings};

/// Prefix of the environment variables that override file settings,
/// e.g. `FUNDLENS__SERVICE__QUEUE_CAPACITY=16`.
pub const ENV_PREFIX: &str = "FUNDLENS";

/// Loads the application configuration.
///
/// Reads `path` when given, otherwise an optional `fundlens.toml` in the
/// working directory, then applies `FUNDLENS__*` environment overrides and
/// validates the result.
pub fn load_config(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name("fundlens").required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    tracing::debug!(?settings, "Configuration loaded.");
    Ok(settings)
}

/// Parses settings from TOML text, without environment overrides.
pub fn load_config_from_str(toml: &str) -> Result<Settings, ConfigError> {
    let settings = config::Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?
        .try_deserialize::<Settings>()?;
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn empty_document_takes_defaults() {
        let settings = load_config_from_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.service.queue_capacity, 64);
        assert_eq!(settings.service.worker_name, "compute-worker");
        assert_eq!(settings.logging.filter, "info");
        assert_eq!(settings.statistics.consistency_window, 0);
    }

    #[test]
    fn sections_override_defaults() {
        let settings = load_config_from_str(
            r#"
            [statistics]
            consistency_window = 21

            [service]
            queue_capacity = 8

            [logging]
            filter = "analytics=debug"
            directory = "logs"
            "#,
        )
        .unwrap();
        assert_eq!(settings.statistics.consistency_window, 21);
        assert_eq!(settings.service.queue_capacity, 8);
        assert_eq!(settings.service.worker_name, "compute-worker");
        assert_eq!(settings.logging.directory, Some(PathBuf::from("logs")));
    }

    #[test]
    fn zero_queue_capacity_is_rejected() {
        let err = load_config_from_str("[service]\nqueue_capacity = 0").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert_eq!(
            err.to_string(),
            "Invalid FundLens settings: service.queue_capacity must be greater than 0"
        );
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load_config(Some(Path::new("does-not-exist.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::LoadError(_)));
        assert!(err.to_string().starts_with("Failed to read FundLens settings"));
    }
}
