use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("The compute worker is not running or dropped the request.")]
    WorkerUnavailable,

    #[error("The compute worker failed while handling '{operation}': {message}")]
    WorkerFault {
        operation: &'static str,
        message: String,
    },

    #[error("Analytics error: {0}")]
    Analytics(#[from] analytics::AnalyticsError),

    #[error("Expected a '{expected}' response but the worker answered '{actual}'.")]
    UnexpectedResponse {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Failed to start the compute worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}
