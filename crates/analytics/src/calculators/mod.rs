//! Small stateful accumulators, each owned by exactly one granularity bucket.
//!
//! Every calculator exposes a single `add` that folds in the next chronological
//! observation and returns the updated statistic.

pub mod consistency;
pub mod correlation;
pub mod delta;
pub mod investment_return;
pub mod risk;

pub use consistency::Consistency;
pub use correlation::Correlation;
pub use delta::{BaselineDelta, Networth, Quotaholders};
pub use investment_return::InvestmentReturn;
pub use risk::Risk;
