use crate::error::EventsError;
use analytics::{BenchmarkStatistics, StatisticsResult};
use chrono::NaiveDate;
use core_types::{Benchmark, BenchmarkQuote, BenchmarkSeries, FundObservation};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one delegated call, increasing in issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRequest {
    pub rows: Vec<FundObservation>,
    pub benchmark: Benchmark,
    #[serde(default)]
    pub starting_from: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateBenchmarkRequest {
    pub quotes: Vec<BenchmarkQuote>,
    pub benchmark: Benchmark,
    #[serde(default)]
    pub starting_from: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildMatrixRequest {
    pub funds: Vec<Vec<FundObservation>>,
    #[serde(default)]
    pub benchmarks: Vec<BenchmarkSeries>,
}

/// A call into the compute worker, addressed by operation name.
///
/// Serialized as `{ "operation": "...", "payload": { ... } }`, for example:
/// `{
///   "operation": "aggregate",
///   "payload": { "rows": [...], "benchmark": "cdi", "starting_from": null }
/// }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", content = "payload")]
pub enum ComputeRequest {
    #[serde(rename = "aggregate")]
    Aggregate(AggregateRequest),
    #[serde(rename = "aggregateBenchmark")]
    AggregateBenchmark(AggregateBenchmarkRequest),
    #[serde(rename = "buildMatrix")]
    BuildMatrix(BuildMatrixRequest),
}

impl ComputeRequest {
    /// The operation name this request addresses.
    pub fn operation(&self) -> &'static str {
        match self {
            ComputeRequest::Aggregate(_) => "aggregate",
            ComputeRequest::AggregateBenchmark(_) => "aggregateBenchmark",
            ComputeRequest::BuildMatrix(_) => "buildMatrix",
        }
    }

    pub fn from_json(json: &str) -> Result<Self, EventsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, EventsError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// The successful result of a `ComputeRequest`, one variant per operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", content = "result")]
pub enum ComputeResponse {
    #[serde(rename = "aggregate")]
    Statistics(StatisticsResult),
    #[serde(rename = "aggregateBenchmark")]
    BenchmarkStatistics(BenchmarkStatistics),
    #[serde(rename = "buildMatrix")]
    Matrix(#[serde(with = "analytics::float::matrix")] Vec<Vec<f64>>),
}

impl ComputeResponse {
    pub fn operation(&self) -> &'static str {
        match self {
            ComputeResponse::Statistics(_) => "aggregate",
            ComputeResponse::BenchmarkStatistics(_) => "aggregateBenchmark",
            ComputeResponse::Matrix(_) => "buildMatrix",
        }
    }

    pub fn to_json(&self) -> Result<String, EventsError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, EventsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
