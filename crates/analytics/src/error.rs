use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Cannot read '{0}' before any measurement has been added")]
    EmptyState(&'static str),
}
