use crate::calculators::Correlation;
use crate::conversion::QuoteConverter;
use chrono::NaiveDate;
use core_types::{BenchmarkSeries, FundObservation};

#[derive(Debug, Clone, Copy, PartialEq)]
struct DatedValue {
    date: NaiveDate,
    value: f64,
}

/// Pairwise correlation of benchmark and fund return series.
///
/// Series are ordered benchmarks first, then funds. All of them are walked
/// backward together on one descending date backbone; a series missing a
/// backbone date contributes its nearest older value. The walk stops once
/// any series runs out.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrelationMatrixBuilder;

impl CorrelationMatrixBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Returns a symmetric `N x N` matrix with a unit diagonal.
    ///
    /// Only pairs with `j <= i` are computed; the upper triangle is filled in
    /// as their mirror, so the result is the full square form.
    pub fn build_matrix(
        &self,
        funds: &[Vec<FundObservation>],
        benchmarks: &[BenchmarkSeries],
    ) -> Vec<Vec<f64>> {
        let mut series: Vec<Vec<DatedValue>> = Vec::with_capacity(funds.len() + benchmarks.len());

        for b in benchmarks {
            let mut converter = QuoteConverter::new(b.benchmark.kind());
            series.push(
                b.quotes
                    .iter()
                    .rev()
                    .map(|q| DatedValue {
                        date: q.date,
                        value: converter.convert(q.value),
                    })
                    .collect(),
            );
        }
        for rows in funds {
            series.push(
                rows.iter()
                    .rev()
                    .map(|r| DatedValue {
                        date: r.date,
                        value: r.investment_return,
                    })
                    .collect(),
            );
        }

        let aligned = align(&series);
        let n = aligned.len();
        let mut matrix = vec![vec![0.0; n]; n];

        for i in 0..n {
            for j in 0..=i {
                let value = if i == j {
                    1.0
                } else {
                    let mut correlation = Correlation::new();
                    aligned[i]
                        .iter()
                        .zip(&aligned[j])
                        .fold(0.0, |_, (&x, &y)| correlation.add(x, y))
                };
                matrix[i][j] = value;
                matrix[j][i] = value;
            }
        }

        tracing::debug!(
            series = n,
            aligned_rows = aligned.first().map_or(0, Vec::len),
            "Correlation matrix built."
        );

        matrix
    }
}

/// Collects one value per series for every backbone date, most recent first.
///
/// Each series must be ordered oldest first. Every step anchors on the latest
/// date still pointed at, moves any cursor past it back to the nearest value
/// not later than it, collects one value per series and steps every cursor
/// back once. A series without a value on the anchor date contributes its
/// nearest older one. Stops as soon as any series runs out, so every column
/// has the length of the shortest series.
fn align(series: &[Vec<DatedValue>]) -> Vec<Vec<f64>> {
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); series.len()];
    let mut cursors: Vec<isize> = series.iter().map(|s| s.len() as isize - 1).collect();

    while !series.is_empty() && cursors.iter().all(|&c| c >= 0) {
        let Some(anchor) = series
            .iter()
            .zip(&cursors)
            .map(|(s, &c)| s[c as usize].date)
            .max()
        else {
            break;
        };

        for (s, cursor) in series.iter().zip(cursors.iter_mut()) {
            while *cursor >= 0 && s[*cursor as usize].date > anchor {
                *cursor -= 1;
            }
        }

        for ((s, cursor), column) in series.iter().zip(cursors.iter_mut()).zip(columns.iter_mut()) {
            column.push(s[*cursor as usize].value);
            *cursor -= 1;
        }
    }

    columns
}
