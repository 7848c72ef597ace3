/// Change of an accumulated quantity since the first value seen.
///
/// The baseline is fixed on the first call; later calls report
/// `input - baseline`, not the day-over-day change.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BaselineDelta {
    baseline: Option<f64>,
}

/// Fund net worth added since the start of the bucket.
pub type Networth = BaselineDelta;

/// Quotaholders gained since the start of the bucket.
pub type Quotaholders = BaselineDelta;

impl BaselineDelta {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn add(&mut self, value: f64) -> f64 {
        match self.baseline {
            Some(baseline) => value - baseline,
            None => {
                self.baseline = Some(value);
                0.0
            }
        }
    }
}
