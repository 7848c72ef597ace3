//! # FundLens Events
//!
//! This crate defines the plain-data messages exchanged with the compute
//! worker. Requests name one of the three delegated operations
//! (`aggregate`, `aggregateBenchmark`, `buildMatrix`) and carry only owned
//! data, so they can cross a thread, process or network boundary unchanged.
//! NaN and infinite results are encoded as strings so JSON keeps them intact.

// Declare the modules that make up this crate.
pub mod error;
pub mod messages;

// Re-export the core types to provide a clean public API.
pub use error::EventsError;
pub use messages::{
    AggregateBenchmarkRequest, AggregateRequest, BuildMatrixRequest, ComputeRequest,
    ComputeResponse, RequestId,
};
