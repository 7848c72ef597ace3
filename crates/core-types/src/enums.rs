use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a benchmark's raw values must be read before they can be compounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BenchmarkKind {
    /// Raw values are already a per-period rate, expressed in percent.
    Rate,
    /// Raw values are price or index levels; the return is the change between levels.
    PriceIndex,
}

/// The reference instruments a fund can be compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Benchmark {
    Cdi,
    Selic,
    Bovespa,
    Dollar,
    Euro,
}

impl Benchmark {
    pub const ALL: [Benchmark; 5] = [
        Benchmark::Cdi,
        Benchmark::Selic,
        Benchmark::Bovespa,
        Benchmark::Dollar,
        Benchmark::Euro,
    ];

    /// Returns the conversion family this benchmark belongs to.
    pub fn kind(&self) -> BenchmarkKind {
        match self {
            Benchmark::Cdi | Benchmark::Selic => BenchmarkKind::Rate,
            Benchmark::Bovespa | Benchmark::Dollar | Benchmark::Euro => BenchmarkKind::PriceIndex,
        }
    }

    /// The lowercase identifier used in rows, requests and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Benchmark::Cdi => "cdi",
            Benchmark::Selic => "selic",
            Benchmark::Bovespa => "bovespa",
            Benchmark::Dollar => "dollar",
            Benchmark::Euro => "euro",
        }
    }
}

impl fmt::Display for Benchmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Benchmark {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Benchmark::ALL
            .into_iter()
            .find(|b| b.as_str() == needle)
            .ok_or_else(|| CoreError::UnknownBenchmark(s.to_string()))
    }
}
