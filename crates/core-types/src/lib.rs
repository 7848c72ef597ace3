//! # FundLens Core Types
//!
//! The foundational data structures shared by every other crate: the raw,
//! already-fetched observation rows and the benchmark identifiers that select
//! how a benchmark series is read.
//!
//! This is a Layer 0 crate. It performs no I/O and depends on no other
//! workspace crate.

pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{Benchmark, BenchmarkKind};
pub use error::CoreError;
pub use structs::{BenchmarkQuote, BenchmarkSeries, FundObservation};
