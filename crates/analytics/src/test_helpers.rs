use chrono::NaiveDate;
use core_types::{Benchmark, BenchmarkQuote, FundObservation};
use std::collections::BTreeMap;

pub fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// A fund row carrying a CDI return.
pub fn fund_row(day: &str, r: f64, cdi: f64, networth: f64, quotaholders: f64) -> FundObservation {
    FundObservation {
        date: date(day),
        investment_return: r,
        accumulated_networth: networth,
        accumulated_quotaholders: quotaholders,
        benchmark_returns: BTreeMap::from([(Benchmark::Cdi, cdi)]),
    }
}

pub fn quote(day: &str, value: f64) -> BenchmarkQuote {
    BenchmarkQuote {
        date: date(day),
        value,
    }
}
