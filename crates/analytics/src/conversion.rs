use core_types::BenchmarkKind;

/// Turns a benchmark's raw values into single-period returns.
///
/// Rates are already per period and only need rescaling from percent. Price
/// levels become the relative change against the previous level; the first
/// level has nothing to compare with and yields 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuoteConverter {
    kind: BenchmarkKind,
    previous: Option<f64>,
}

impl QuoteConverter {
    pub fn new(kind: BenchmarkKind) -> Self {
        Self {
            kind,
            previous: None,
        }
    }

    /// Values must be fed oldest first.
    pub fn convert(&mut self, value: f64) -> f64 {
        let converted = match self.kind {
            BenchmarkKind::Rate => value / 100.0,
            BenchmarkKind::PriceIndex => match self.previous {
                Some(previous) => (value - previous) / previous,
                None => 0.0,
            },
        };
        self.previous = Some(value);
        converted
    }
}
