use crate::calculators::{Consistency, Correlation, InvestmentReturn, Networth, Quotaholders, Risk};
use crate::error::AnalyticsError;
use crate::formulas::{relative_investment_return, sharpe};
use crate::report::{Snapshot, StatisticsResult};
use chrono::NaiveDate;
use core_types::{Benchmark, FundObservation};
use std::collections::HashMap;

/// The calculators owned by one granularity bucket.
///
/// A bucket is the whole series, one calendar month or one calendar year.
/// `entries` counts the rows the bucket has seen and is the period length
/// used to annualize its returns.
#[derive(Debug, Clone)]
struct CalculatorSet {
    investment_return: InvestmentReturn,
    benchmark_investment_return: InvestmentReturn,
    risk: Risk,
    benchmark_risk: Risk,
    consistency: Consistency,
    networth: Networth,
    quotaholders: Quotaholders,
    correlation: Correlation,
    entries: usize,
}

impl CalculatorSet {
    fn new(consistency_window: usize) -> Self {
        Self {
            investment_return: InvestmentReturn::new(),
            benchmark_investment_return: InvestmentReturn::new(),
            risk: Risk::new(),
            benchmark_risk: Risk::new(),
            consistency: Consistency::new(consistency_window),
            networth: Networth::new(),
            quotaholders: Quotaholders::new(),
            correlation: Correlation::new(),
            entries: 0,
        }
    }

    fn add(&mut self, row: &FundObservation, benchmark: Benchmark) -> Result<Snapshot, AnalyticsError> {
        let period_return = row.investment_return;
        let benchmark_period_return = row.benchmark_return(benchmark);
        self.entries += 1;

        let investment_return = self.investment_return.add(period_return);
        let benchmark_investment_return = self.benchmark_investment_return.add(benchmark_period_return);
        let risk = self.risk.add(period_return)?;
        let benchmark_risk = self.benchmark_risk.add(benchmark_period_return)?;

        Ok(Snapshot {
            investment_return,
            benchmark_investment_return,
            relative_investment_return: relative_investment_return(
                investment_return,
                benchmark_investment_return,
            ),
            risk,
            benchmark_risk,
            sharpe: sharpe(risk, investment_return, benchmark_investment_return, self.entries),
            consistency: self.consistency.add(period_return, benchmark_period_return),
            networth: self.networth.add(row.accumulated_networth),
            quotaholders: self.quotaholders.add(row.accumulated_quotaholders),
            correlation: self.correlation.add(period_return, benchmark_period_return),
        })
    }
}

/// Computes a fund's statistics against one benchmark in a single pass,
/// simultaneously for the whole series, each month and each year.
#[derive(Debug, Clone, Default)]
pub struct StatisticsAggregator {
    consistency_window: usize,
}

impl StatisticsAggregator {
    /// `consistency_window` bounds the consistency hit-rate window inside every
    /// bucket; 0 lets it cover the whole bucket.
    pub fn new(consistency_window: usize) -> Self {
        Self { consistency_window }
    }

    /// Aggregates a fund history ordered most recent first.
    ///
    /// With `starting_from`, rows before that date are ignored and the first
    /// row on or after it is emitted as an all-zero baseline without being fed
    /// to any calculator.
    pub fn aggregate(
        &self,
        rows: &[FundObservation],
        benchmark: Benchmark,
        starting_from: Option<NaiveDate>,
    ) -> Result<StatisticsResult, AnalyticsError> {
        let mut result = StatisticsResult::default();
        let mut accumulated = CalculatorSet::new(self.consistency_window);
        let mut months: HashMap<String, CalculatorSet> = HashMap::new();
        let mut years: HashMap<String, CalculatorSet> = HashMap::new();
        let mut baseline_pending = starting_from.is_some();

        for row in rows.iter().rev() {
            if let Some(from) = starting_from {
                if row.date < from {
                    continue;
                }
                if baseline_pending {
                    baseline_pending = false;
                    result.daily.push(row.date, &Snapshot::default());
                    continue;
                }
            }

            let year = row.year_key();
            let month = row.month_key();

            let whole = accumulated.add(row, benchmark)?;
            let monthly = months
                .entry(month.clone())
                .or_insert_with(|| CalculatorSet::new(self.consistency_window))
                .add(row, benchmark)?;
            let yearly = years
                .entry(year.clone())
                .or_insert_with(|| CalculatorSet::new(self.consistency_window))
                .add(row, benchmark)?;

            result.daily.push(row.date, &whole);
            result.accumulated = whole;
            result.accumulated_by_year.insert(year.clone(), whole);
            result.by_month.insert(month, monthly);
            result.by_year.insert(year, yearly);
        }

        tracing::debug!(
            %benchmark,
            rows = rows.len(),
            emitted = result.daily.len(),
            months = months.len(),
            years = years.len(),
            "Fund aggregation pass complete."
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use crate::test_helpers::{date, fund_row};

    /// Three months across two years, most recent first.
    fn history() -> Vec<FundObservation> {
        let mut rows = vec![
            fund_row("2020-12-29", 0.010, 0.001, 1_000.0, 10.0),
            fund_row("2020-12-30", -0.004, 0.001, 1_050.0, 12.0),
            fund_row("2020-12-31", 0.002, 0.001, 1_020.0, 11.0),
            fund_row("2021-01-04", 0.003, 0.002, 1_100.0, 15.0),
            fund_row("2021-01-05", 0.001, 0.002, 1_130.0, 15.0),
            fund_row("2021-02-01", -0.002, 0.002, 1_090.0, 14.0),
            fund_row("2021-02-02", 0.006, 0.002, 1_200.0, 20.0),
        ];
        rows.reverse();
        rows
    }

    #[test]
    fn daily_series_is_ascending_and_complete() {
        let result = StatisticsAggregator::new(0)
            .aggregate(&history(), Benchmark::Cdi, None)
            .unwrap();
        assert_eq!(result.daily.len(), 7);
        assert_eq!(result.daily.date.first(), Some(&date("2020-12-29")));
        assert_eq!(result.daily.date.last(), Some(&date("2021-02-02")));
        assert!(result.daily.date.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn accumulated_compounds_whole_series() {
        let result = StatisticsAggregator::new(0)
            .aggregate(&history(), Benchmark::Cdi, None)
            .unwrap();
        let expected = [0.010, -0.004, 0.002, 0.003, 0.001, -0.002, 0.006]
            .iter()
            .fold(1.0, |acc, r| acc * (1.0 + r))
            - 1.0;
        assert_abs_diff_eq!(result.accumulated.investment_return, expected, epsilon = 1e-9);
        assert_abs_diff_eq!(result.accumulated.networth, 200.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.accumulated.quotaholders, 10.0, epsilon = 1e-9);
        assert_eq!(result.daily.snapshot_at(6), Some(result.accumulated));
    }

    #[test]
    fn buckets_restart_per_month_and_year() {
        let result = StatisticsAggregator::new(0)
            .aggregate(&history(), Benchmark::Cdi, None)
            .unwrap();

        let keys: Vec<_> = result.by_month.keys().cloned().collect();
        assert_eq!(keys, ["202012", "202101", "202102"]);
        assert_eq!(result.by_year.len(), 2);

        let february = result.by_month["202102"];
        assert_abs_diff_eq!(february.investment_return, 0.998 * 1.006 - 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(february.networth, 110.0, epsilon = 1e-9);
        assert_abs_diff_eq!(february.benchmark_investment_return, 1.002 * 1.002 - 1.0, epsilon = 1e-9);

        let y2021 = result.by_year["2021"];
        assert_abs_diff_eq!(
            y2021.investment_return,
            1.003 * 1.001 * 0.998 * 1.006 - 1.0,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(y2021.networth, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn accumulated_by_year_keeps_whole_series_state() {
        let result = StatisticsAggregator::new(0)
            .aggregate(&history(), Benchmark::Cdi, None)
            .unwrap();
        let end_2020 = result.accumulated_by_year["2020"];
        assert_eq!(Some(end_2020), result.daily.snapshot_at(2));
        assert_eq!(result.accumulated_by_year["2021"], result.accumulated);
        // The 2021 bucket restarts; the accumulated view does not.
        assert!(result.by_year["2021"].networth != result.accumulated_by_year["2021"].networth);
    }

    #[test]
    fn consistency_counts_periods_beating_benchmark() {
        let result = StatisticsAggregator::new(0)
            .aggregate(&history(), Benchmark::Cdi, None)
            .unwrap();
        // December: 0.010 and 0.002 beat 0.001, -0.004 does not.
        assert_abs_diff_eq!(result.by_month["202012"].consistency, 2.0 / 3.0, epsilon = 1e-9);
        // Whole series: 4 of 7 periods.
        assert_abs_diff_eq!(result.accumulated.consistency, 4.0 / 7.0, epsilon = 1e-9);
    }

    #[test]
    fn windowed_consistency_only_sees_recent_periods() {
        let result = StatisticsAggregator::new(2)
            .aggregate(&history(), Benchmark::Cdi, None)
            .unwrap();
        // Last two periods: -0.002 (miss) and 0.006 (hit).
        assert_abs_diff_eq!(result.accumulated.consistency, 0.5, epsilon = 1e-9);
    }

    #[test]
    fn starting_from_emits_zero_baseline() {
        let result = StatisticsAggregator::new(0)
            .aggregate(&history(), Benchmark::Cdi, Some(date("2021-01-01")))
            .unwrap();
        assert_eq!(result.daily.date.first(), Some(&date("2021-01-04")));
        assert_eq!(result.daily.len(), 4);
        assert_eq!(result.daily.snapshot_at(0), Some(Snapshot::default()));

        // The baseline row is not compounded in.
        assert_abs_diff_eq!(
            result.accumulated.investment_return,
            1.001 * 0.998 * 1.006 - 1.0,
            epsilon = 1e-9
        );
        assert!(!result.by_month.contains_key("202012"));
        assert_abs_diff_eq!(result.daily.min.investment_return, 1.001 * 0.998 - 1.0, epsilon = 1e-9);
    }

    #[test]
    fn starting_from_after_last_row_yields_nothing() {
        let result = StatisticsAggregator::new(0)
            .aggregate(&history(), Benchmark::Cdi, Some(date("2022-01-01")))
            .unwrap();
        assert!(result.daily.is_empty());
        assert_eq!(result.accumulated, Snapshot::default());
    }

    #[test]
    fn min_max_track_the_return_curves() {
        let result = StatisticsAggregator::new(0)
            .aggregate(&history(), Benchmark::Cdi, None)
            .unwrap();
        let lowest = result
            .daily
            .investment_return
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);
        let highest = result
            .daily
            .investment_return
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(result.daily.min.investment_return, lowest);
        assert_eq!(result.daily.max.investment_return, highest);
        assert!(result.daily.max.benchmark_investment_return >= result.daily.min.benchmark_investment_return);
    }

    #[test]
    fn repeated_passes_are_identical() {
        let aggregator = StatisticsAggregator::new(5);
        let first = aggregator.aggregate(&history(), Benchmark::Cdi, None).unwrap();
        let second = aggregator.aggregate(&history(), Benchmark::Cdi, None).unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn empty_history_is_not_an_error() {
        let result = StatisticsAggregator::new(0)
            .aggregate(&[], Benchmark::Cdi, None)
            .unwrap();
        assert_eq!(result, StatisticsResult::default());
    }

    #[test]
    fn missing_benchmark_propagates_nan() {
        let result = StatisticsAggregator::new(0)
            .aggregate(&history(), Benchmark::Bovespa, None)
            .unwrap();
        assert!(result.accumulated.benchmark_investment_return.is_nan());
        assert!(result.accumulated.investment_return.is_finite());
    }
}
