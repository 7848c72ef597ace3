use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Every statistic the aggregator produces for one point in time.
///
/// The same shape is used for one daily entry and for the final value of a
/// bucket. The all-zero default doubles as the `starting_from` placeholder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(with = "crate::float")]
    pub investment_return: f64,
    #[serde(with = "crate::float")]
    pub benchmark_investment_return: f64,
    #[serde(with = "crate::float")]
    pub relative_investment_return: f64,
    #[serde(with = "crate::float")]
    pub risk: f64,
    #[serde(with = "crate::float")]
    pub benchmark_risk: f64,
    #[serde(with = "crate::float")]
    pub sharpe: f64,
    #[serde(with = "crate::float")]
    pub consistency: f64,
    #[serde(with = "crate::float")]
    pub networth: f64,
    #[serde(with = "crate::float")]
    pub quotaholders: f64,
    #[serde(with = "crate::float")]
    pub correlation: f64,
}

/// Running extremes of the two return curves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnBounds {
    #[serde(with = "crate::float")]
    pub investment_return: f64,
    #[serde(with = "crate::float")]
    pub benchmark_investment_return: f64,
}

/// One entry per emitted row, oldest first, as parallel vectors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    pub date: Vec<NaiveDate>,
    #[serde(with = "crate::float::vec")]
    pub investment_return: Vec<f64>,
    #[serde(with = "crate::float::vec")]
    pub benchmark_investment_return: Vec<f64>,
    #[serde(with = "crate::float::vec")]
    pub relative_investment_return: Vec<f64>,
    #[serde(with = "crate::float::vec")]
    pub risk: Vec<f64>,
    #[serde(with = "crate::float::vec")]
    pub benchmark_risk: Vec<f64>,
    #[serde(with = "crate::float::vec")]
    pub sharpe: Vec<f64>,
    #[serde(with = "crate::float::vec")]
    pub consistency: Vec<f64>,
    #[serde(with = "crate::float::vec")]
    pub networth: Vec<f64>,
    #[serde(with = "crate::float::vec")]
    pub quotaholders: Vec<f64>,
    #[serde(with = "crate::float::vec")]
    pub correlation: Vec<f64>,
    pub min: ReturnBounds,
    pub max: ReturnBounds,
}

impl DailySeries {
    pub fn push(&mut self, date: NaiveDate, s: &Snapshot) {
        if self.date.is_empty() {
            self.min = ReturnBounds {
                investment_return: s.investment_return,
                benchmark_investment_return: s.benchmark_investment_return,
            };
            self.max = self.min;
        } else {
            self.min.investment_return = self.min.investment_return.min(s.investment_return);
            self.min.benchmark_investment_return = self
                .min
                .benchmark_investment_return
                .min(s.benchmark_investment_return);
            self.max.investment_return = self.max.investment_return.max(s.investment_return);
            self.max.benchmark_investment_return = self
                .max
                .benchmark_investment_return
                .max(s.benchmark_investment_return);
        }

        self.date.push(date);
        self.investment_return.push(s.investment_return);
        self.benchmark_investment_return.push(s.benchmark_investment_return);
        self.relative_investment_return.push(s.relative_investment_return);
        self.risk.push(s.risk);
        self.benchmark_risk.push(s.benchmark_risk);
        self.sharpe.push(s.sharpe);
        self.consistency.push(s.consistency);
        self.networth.push(s.networth);
        self.quotaholders.push(s.quotaholders);
        self.correlation.push(s.correlation);
    }

    pub fn len(&self) -> usize {
        self.date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_empty()
    }

    /// Reassembles the entry at `index` from the parallel vectors.
    pub fn snapshot_at(&self, index: usize) -> Option<Snapshot> {
        if index >= self.len() {
            return None;
        }
        Some(Snapshot {
            investment_return: self.investment_return[index],
            benchmark_investment_return: self.benchmark_investment_return[index],
            relative_investment_return: self.relative_investment_return[index],
            risk: self.risk[index],
            benchmark_risk: self.benchmark_risk[index],
            sharpe: self.sharpe[index],
            consistency: self.consistency[index],
            networth: self.networth[index],
            quotaholders: self.quotaholders[index],
            correlation: self.correlation[index],
        })
    }
}

/// The full output of one fund aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsResult {
    pub daily: DailySeries,
    /// Whole-series values as of the last row.
    pub accumulated: Snapshot,
    /// Whole-series values as of the last row of each year, keyed `YYYY`.
    pub accumulated_by_year: BTreeMap<String, Snapshot>,
    /// Values computed within each month only, keyed `YYYYMM`.
    pub by_month: BTreeMap<String, Snapshot>,
    /// Values computed within each year only, keyed `YYYY`.
    pub by_year: BTreeMap<String, Snapshot>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSnapshot {
    #[serde(with = "crate::float")]
    pub investment_return: f64,
    #[serde(with = "crate::float")]
    pub risk: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkDailySeries {
    pub date: Vec<NaiveDate>,
    #[serde(with = "crate::float::vec")]
    pub investment_return: Vec<f64>,
    #[serde(with = "crate::float::vec")]
    pub risk: Vec<f64>,
    #[serde(with = "crate::float")]
    pub min: f64,
    #[serde(with = "crate::float")]
    pub max: f64,
}

impl BenchmarkDailySeries {
    pub fn push(&mut self, date: NaiveDate, s: &BenchmarkSnapshot) {
        if self.date.is_empty() {
            self.min = s.investment_return;
            self.max = s.investment_return;
        } else {
            self.min = self.min.min(s.investment_return);
            self.max = self.max.max(s.investment_return);
        }
        self.date.push(date);
        self.investment_return.push(s.investment_return);
        self.risk.push(s.risk);
    }

    pub fn len(&self) -> usize {
        self.date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_empty()
    }
}

/// The output of a benchmark-only aggregation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkStatistics {
    pub daily: BenchmarkDailySeries,
    pub accumulated: BenchmarkSnapshot,
}
