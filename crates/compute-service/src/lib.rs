//! # FundLens Compute Service
//!
//! Runs the analytics passes on one dedicated worker thread and exposes them
//! to async callers as `aggregate`, `aggregateBenchmark` and `buildMatrix`.
//! Histories can span years of daily rows across many funds; keeping the
//! passes off the caller's thread keeps interactive code responsive.
//!
//! A process-wide instance is started lazily by [`global`] and reused until
//! the process exits. Failures inside the worker, including panics, come back
//! to the caller as a `ServiceError`; the worker keeps running.

use configuration::Settings;
use tokio::sync::OnceCell;

pub mod error;
pub mod service;
pub mod tracker;
pub mod worker;

pub use error::ServiceError;
pub use service::ComputeService;
pub use tracker::RequestTracker;
pub use worker::{AnalyticsHandler, ComputeHandler};

static GLOBAL: OnceCell<ComputeService> = OnceCell::const_new();

/// Returns the process-wide service, starting it with `settings` on first use.
///
/// Later calls return the running instance and ignore `settings`.
pub async fn init_global(settings: &Settings) -> Result<&'static ComputeService, ServiceError> {
    GLOBAL
        .get_or_try_init(|| async { ComputeService::spawn(settings) })
        .await
}

/// Returns the process-wide service, starting it with default settings if
/// nothing has initialized it yet.
pub async fn global() -> Result<&'static ComputeService, ServiceError> {
    match GLOBAL.get() {
        Some(service) => Ok(service),
        None => init_global(&Settings::default()).await,
    }
}
