//! Stateless formulas derived from the calculators' outputs.

use crate::TRADING_DAYS_PER_YEAR;

/// Fund return expressed as a multiple of the benchmark's return.
#[inline]
pub fn relative_investment_return(investment_return: f64, benchmark_return: f64) -> f64 {
    investment_return / benchmark_return
}

/// Excess annualized return over the benchmark per unit of risk.
///
/// Both returns are averaged over `period_length` observations and scaled to
/// a trading year. A zero risk yields 0.
pub fn sharpe(risk: f64, investment_return: f64, benchmark_return: f64, period_length: usize) -> f64 {
    if risk == 0.0 {
        return 0.0;
    }
    let periods = period_length as f64;
    let annualized = (investment_return / periods) * TRADING_DAYS_PER_YEAR;
    let annualized_benchmark = (benchmark_return / periods) * TRADING_DAYS_PER_YEAR;
    (annualized - annualized_benchmark) / risk
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn relative_is_a_plain_ratio() {
        assert_abs_diff_eq!(relative_investment_return(0.12, 0.10), 1.2, epsilon = 1e-9);
        assert!(relative_investment_return(0.1, 0.0).is_infinite());
    }

    #[test]
    fn sharpe_is_zero_without_risk() {
        assert_eq!(sharpe(0.0, 0.5, 0.1, 10), 0.0);
    }

    #[test]
    fn sharpe_annualizes_both_returns() {
        // 252 periods: annualized returns equal the raw ones.
        assert_abs_diff_eq!(sharpe(0.2, 0.15, 0.05, 252), 0.5, epsilon = 1e-9);
        // Half a year of data doubles the annualized spread.
        assert_abs_diff_eq!(sharpe(0.2, 0.15, 0.05, 126), 1.0, epsilon = 1e-9);
    }
}
