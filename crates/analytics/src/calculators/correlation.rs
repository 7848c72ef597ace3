/// Online Pearson correlation from running sums.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Correlation {
    n: usize,
    sum_x: f64,
    sum_y: f64,
    sum_x2: f64,
    sum_y2: f64,
    sum_xy: f64,
}

impl Correlation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, x: f64, y: f64) -> f64 {
        self.n += 1;
        self.sum_x += x;
        self.sum_y += y;
        self.sum_x2 += x * x;
        self.sum_y2 += y * y;
        self.sum_xy += x * y;
        self.value()
    }

    /// Current coefficient; 0 when either side has no variance yet.
    pub fn value(&self) -> f64 {
        let n = self.n as f64;
        let num = self.sum_xy - self.sum_x * self.sum_y / n;
        let den = ((self.sum_x2 - self.sum_x * self.sum_x / n)
            * (self.sum_y2 - self.sum_y * self.sum_y / n))
            .sqrt();
        if den == 0.0 || den.is_nan() {
            return 0.0;
        }
        num / den
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn identical_series_correlate_fully() {
        let mut c = Correlation::new();
        for x in [0.01, -0.02, 0.005, 0.03] {
            c.add(x, x);
        }
        assert_abs_diff_eq!(c.value(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn mirrored_linear_series_anticorrelate() {
        let mut c = Correlation::new();
        for i in 0..20 {
            let x = i as f64;
            c.add(x, 10.0 - 2.0 * x);
        }
        assert_abs_diff_eq!(c.value(), -1.0, epsilon = 1e-9);
    }

    #[test]
    fn constant_side_yields_zero() {
        let mut c = Correlation::new();
        for x in [1.0, 2.0, 3.0] {
            c.add(x, 7.0);
        }
        assert_eq!(c.value(), 0.0);
    }

    #[test]
    fn empty_and_single_sample_yield_zero() {
        let mut c = Correlation::new();
        assert_eq!(c.value(), 0.0);
        assert_eq!(c.add(1.0, 2.0), 0.0);
    }
}
