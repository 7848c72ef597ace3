use crate::enums::Benchmark;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One daily row of a fund's history, as delivered by the data API.
///
/// Histories arrive most recent first. Field values are taken as-is; a
/// malformed row produces NaN downstream rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundObservation {
    pub date: NaiveDate,
    /// The fund's return for this single period, as a fraction.
    pub investment_return: f64,
    pub accumulated_networth: f64,
    pub accumulated_quotaholders: f64,
    /// Same-day period returns of each benchmark, as fractions.
    #[serde(default)]
    pub benchmark_returns: BTreeMap<Benchmark, f64>,
}

impl FundObservation {
    /// The benchmark's return for this row, or NaN when the row does not carry it.
    pub fn benchmark_return(&self, benchmark: Benchmark) -> f64 {
        self.benchmark_returns
            .get(&benchmark)
            .copied()
            .unwrap_or(f64::NAN)
    }

    /// Calendar-year bucket key, `YYYY`.
    pub fn year_key(&self) -> String {
        format!("{:04}", self.date.year())
    }

    /// Calendar-month bucket key, `YYYYMM`.
    pub fn month_key(&self) -> String {
        format!("{:04}{:02}", self.date.year(), self.date.month())
    }
}

/// One raw value of a benchmark: a rate in percent or a quote level,
/// depending on the benchmark's kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkQuote {
    pub date: NaiveDate,
    pub value: f64,
}

/// A benchmark's raw history, most recent first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSeries {
    pub benchmark: Benchmark,
    pub quotes: Vec<BenchmarkQuote>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str) -> FundObservation {
        FundObservation {
            date: date.parse().unwrap(),
            investment_return: 0.01,
            accumulated_networth: 1_000.0,
            accumulated_quotaholders: 10.0,
            benchmark_returns: BTreeMap::from([(Benchmark::Cdi, 0.0003)]),
        }
    }

    #[test]
    fn bucket_keys_are_zero_padded() {
        let r = row("2021-03-09");
        assert_eq!(r.year_key(), "2021");
        assert_eq!(r.month_key(), "202103");
    }

    #[test]
    fn missing_benchmark_reads_as_nan() {
        let r = row("2021-03-09");
        assert_eq!(r.benchmark_return(Benchmark::Cdi), 0.0003);
        assert!(r.benchmark_return(Benchmark::Euro).is_nan());
    }

    #[test]
    fn deserializes_api_row() {
        let json = r#"{
            "date": "2020-01-02",
            "investment_return": 0.002,
            "accumulated_networth": 5000.0,
            "accumulated_quotaholders": 42,
            "benchmark_returns": { "cdi": 0.00017, "bovespa": -0.01 }
        }"#;
        let r: FundObservation = serde_json::from_str(json).unwrap();
        assert_eq!(r.date, NaiveDate::from_ymd_opt(2020, 1, 2).unwrap());
        assert_eq!(r.benchmark_return(Benchmark::Bovespa), -0.01);
    }
}
