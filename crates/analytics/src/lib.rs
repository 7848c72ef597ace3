//! # FundLens Analytics Engine
//!
//! This crate turns raw daily fund and benchmark histories into derived
//! series of return, risk, relative performance, sharpe ratio, consistency
//! and correlation.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It performs no I/O and
//!   depends only on `core-types` (Layer 0).
//! - **Single Pass:** Every aggregation walks its input once, oldest row first,
//!   feeding small streaming calculators. Calculator state is created fresh for
//!   each pass and owned by exactly one bucket, so passes never share state.
//!
//! ## Public API
//!
//! - `StatisticsAggregator`: fund vs. benchmark statistics at daily, monthly,
//!   yearly and whole-series granularity.
//! - `BenchmarkAggregator`: return and risk of a single benchmark history.
//! - `CorrelationMatrixBuilder`: pairwise correlation of several aligned series.
//! - `StatisticsResult`, `BenchmarkStatistics`: the result structures.
//! - `float`: serde support keeping NaN and infinite results intact in JSON.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

pub mod aggregator;
pub mod benchmark;
pub mod calculators;
pub mod conversion;
pub mod error;
pub mod float;
pub mod formulas;
pub mod matrix;
pub mod report;
pub mod variance;

#[cfg(test)]
mod test_helpers;

/// Trading days in a year, used to annualize daily figures.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

// Re-export the key components to create a clean, public-facing API.
pub use aggregator::StatisticsAggregator;
pub use benchmark::BenchmarkAggregator;
pub use conversion::QuoteConverter;
pub use error::AnalyticsError;
pub use matrix::CorrelationMatrixBuilder;
pub use report::{
    BenchmarkDailySeries, BenchmarkSnapshot, BenchmarkStatistics, DailySeries, ReturnBounds,
    Snapshot, StatisticsResult,
};
pub use variance::RunningVariance;
