use crate::calculators::{InvestmentReturn, Risk};
use crate::conversion::QuoteConverter;
use crate::error::AnalyticsError;
use crate::report::{BenchmarkSnapshot, BenchmarkStatistics};
use chrono::NaiveDate;
use core_types::{Benchmark, BenchmarkQuote};

/// Whole-series return and risk of a single benchmark history.
#[derive(Debug, Clone, Copy, Default)]
pub struct BenchmarkAggregator;

impl BenchmarkAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Aggregates raw quotes ordered most recent first.
    ///
    /// `starting_from` behaves as in the fund aggregator. The baseline row
    /// still primes the quote converter so the next price change is measured
    /// from it.
    pub fn aggregate(
        &self,
        quotes: &[BenchmarkQuote],
        benchmark: Benchmark,
        starting_from: Option<NaiveDate>,
    ) -> Result<BenchmarkStatistics, AnalyticsError> {
        let mut result = BenchmarkStatistics::default();
        let mut converter = QuoteConverter::new(benchmark.kind());
        let mut investment_return = InvestmentReturn::new();
        let mut risk = Risk::new();
        let mut baseline_pending = starting_from.is_some();

        for quote in quotes.iter().rev() {
            if let Some(from) = starting_from {
                if quote.date < from {
                    continue;
                }
                if baseline_pending {
                    baseline_pending = false;
                    converter.convert(quote.value);
                    result.daily.push(quote.date, &BenchmarkSnapshot::default());
                    continue;
                }
            }

            let period_return = converter.convert(quote.value);
            let snapshot = BenchmarkSnapshot {
                investment_return: investment_return.add(period_return),
                risk: risk.add(period_return)?,
            };
            result.daily.push(quote.date, &snapshot);
            result.accumulated = snapshot;
        }

        tracing::debug!(
            %benchmark,
            quotes = quotes.len(),
            emitted = result.daily.len(),
            "Benchmark aggregation pass complete."
        );

        Ok(result)
    }
}
