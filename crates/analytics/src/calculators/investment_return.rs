/// Geometric compounding of single-period returns.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InvestmentReturn {
    accumulated: f64,
}

impl InvestmentReturn {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chains `x` onto the running return: `(1 + r)(1 + x) - 1`.
    #[inline]
    pub fn add(&mut self, x: f64) -> f64 {
        self.accumulated = (1.0 + self.accumulated) * (1.0 + x) - 1.0;
        self.accumulated
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.accumulated
    }
}
