use crate::TRADING_DAYS_PER_YEAR;
use crate::error::AnalyticsError;
use crate::variance::RunningVariance;

/// Annualized volatility of single-period returns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Risk {
    variance: RunningVariance,
}

impl Risk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds in `x` and returns `stdev * sqrt(252)`.
    pub fn add(&mut self, x: f64) -> Result<f64, AnalyticsError> {
        self.variance.add_measurement(x);
        self.value()
    }

    pub fn value(&self) -> Result<f64, AnalyticsError> {
        Ok(self.variance.get()? * TRADING_DAYS_PER_YEAR.sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn tracks_scaled_running_stdev_after_every_call() {
        let mut risk = Risk::new();
        let mut reference = RunningVariance::new();
        for x in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            reference.add_measurement(x);
            let annualized = risk.add(x).unwrap();
            assert_abs_diff_eq!(annualized, reference.get().unwrap() * 252f64.sqrt(), epsilon = 1e-9);
        }
        assert_abs_diff_eq!(risk.value().unwrap(), 2.0 * 252f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn value_before_any_add_is_empty_state() {
        assert!(matches!(
            Risk::new().value(),
            Err(AnalyticsError::EmptyState(_))
        ));
    }
}
