use crate::error::AnalyticsError;

/// Online population variance using Welford's algorithm.
///
/// Keeps the sample count, the running mean and the sum of squared deviations
/// from that mean. Every update is O(1) and avoids the cancellation error of
/// the naive sum-of-squares formula.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunningVariance {
    n: usize,
    mean: f64,
    m2: f64,
}

impl RunningVariance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_measurement(&mut self, x: f64) {
        self.n += 1;
        let delta = x - self.mean;
        self.mean += delta / self.n as f64;
        self.m2 += delta * (x - self.mean);
    }

    /// Takes a previously added measurement back out of the estimate.
    ///
    /// Removing the last remaining sample resets the estimator to empty.
    pub fn remove_measurement(&mut self, x: f64) -> Result<(), AnalyticsError> {
        if self.n == 0 {
            return Err(AnalyticsError::EmptyState("variance"));
        }
        if self.n == 1 {
            *self = Self::default();
            return Ok(());
        }
        let delta = x - self.mean;
        self.n -= 1;
        self.mean -= delta / self.n as f64;
        self.m2 -= delta * (x - self.mean);
        Ok(())
    }

    /// Swaps one previously added measurement for another without changing the count.
    pub fn replace(&mut self, old: f64, new: f64) -> Result<(), AnalyticsError> {
        if self.n == 0 {
            return Err(AnalyticsError::EmptyState("variance"));
        }
        let old_mean = self.mean;
        let shift = new - old;
        self.mean += shift / self.n as f64;
        self.m2 += shift * (new - self.mean + old - old_mean);
        Ok(())
    }

    /// Population standard deviation, `sqrt(S / n)`.
    pub fn get(&self) -> Result<f64, AnalyticsError> {
        if self.n == 0 {
            return Err(AnalyticsError::EmptyState("variance"));
        }
        // Removals can leave a tiny negative residue.
        Ok((self.m2.max(0.0) / self.n as f64).sqrt())
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn population_stdev_of_textbook_sample() {
        let mut v = RunningVariance::new();
        for x in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            v.add_measurement(x);
        }
        assert_eq!(v.count(), 8);
        assert_abs_diff_eq!(v.mean(), 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v.get().unwrap(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn get_on_empty_is_an_error() {
        let v = RunningVariance::new();
        assert_eq!(v.get(), Err(AnalyticsError::EmptyState("variance")));
    }

    #[test]
    fn single_sample_has_zero_spread() {
        let mut v = RunningVariance::new();
        v.add_measurement(3.5);
        assert_abs_diff_eq!(v.get().unwrap(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn large_offset_does_not_cancel() {
        let mut v = RunningVariance::new();
        for x in [1e9 + 4.0, 1e9 + 7.0, 1e9 + 13.0, 1e9 + 16.0] {
            v.add_measurement(x);
        }
        // Same spread as [4, 7, 13, 16]: variance 22.5.
        assert_abs_diff_eq!(v.get().unwrap(), 22.5f64.sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn remove_undoes_add() {
        let mut v = RunningVariance::new();
        for x in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            v.add_measurement(x);
        }
        v.add_measurement(100.0);
        v.remove_measurement(100.0).unwrap();
        assert_eq!(v.count(), 8);
        assert_abs_diff_eq!(v.get().unwrap(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn removing_last_sample_resets() {
        let mut v = RunningVariance::new();
        v.add_measurement(1.0);
        v.remove_measurement(1.0).unwrap();
        assert_eq!(v, RunningVariance::new());
        assert!(v.remove_measurement(1.0).is_err());
    }

    #[test]
    fn replace_matches_fresh_computation() {
        let mut sliding = RunningVariance::new();
        for x in [1.0, 2.0, 3.0] {
            sliding.add_measurement(x);
        }
        sliding.replace(1.0, 10.0).unwrap();

        let mut fresh = RunningVariance::new();
        for x in [10.0, 2.0, 3.0] {
            fresh.add_measurement(x);
        }
        assert_abs_diff_eq!(sliding.mean(), fresh.mean(), epsilon = 1e-9);
        assert_abs_diff_eq!(sliding.get().unwrap(), fresh.get().unwrap(), epsilon = 1e-9);
    }
}
