use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// The settings file or a `FUNDLENS__*` variable could not be read or parsed.
    #[error("Failed to read FundLens settings: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Invalid FundLens settings: {0}")]
    ValidationError(String),
}
