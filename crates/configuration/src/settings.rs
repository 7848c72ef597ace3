use crate::error::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub statistics: StatisticsSettings,
    #[serde(default)]
    pub service: ServiceSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Parameters of the aggregation passes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StatisticsSettings {
    /// Trailing window, in periods, of the consistency hit-rate inside each
    /// bucket. 0 means the window spans the whole bucket.
    #[serde(default)]
    pub consistency_window: usize,
}

/// Parameters of the background compute worker.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceSettings {
    /// How many requests may wait for the worker before callers are held back.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Name given to the worker thread, visible in logs and debuggers.
    #[serde(default = "default_worker_name")]
    pub worker_name: String,
}

/// Parameters for the tracing subscriber installed by the binary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingSettings {
    /// Default `EnvFilter` directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// When set, logs are also written to a daily-rolling file in this directory.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

fn default_queue_capacity() -> usize {
    64
}

fn default_worker_name() -> String {
    "compute-worker".to_string()
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
            worker_name: default_worker_name(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            directory: None,
        }
    }
}

impl Settings {
    /// Rejects values that would leave the application unable to run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service.queue_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "service.queue_capacity must be greater than 0".to_string(),
            ));
        }
        if self.service.worker_name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "service.worker_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
