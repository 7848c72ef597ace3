use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unknown benchmark identifier: {0}")]
    UnknownBenchmark(String),
}
