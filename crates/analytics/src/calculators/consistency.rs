use std::collections::VecDeque;

/// Hit-rate of periods where the fund met or beat its benchmark, over a
/// trailing window.
///
/// A `period` of 0 keeps every observation (the window never evicts).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Consistency {
    period: usize,
    window: VecDeque<bool>,
    hits: usize,
}

impl Consistency {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            window: VecDeque::with_capacity(period),
            hits: 0,
        }
    }

    /// Records one period and returns `hits / window length`.
    pub fn add(&mut self, investment_return: f64, benchmark_return: f64) -> f64 {
        let hit = investment_return >= benchmark_return;
        self.window.push_back(hit);
        if hit {
            self.hits += 1;
        }
        if self.period > 0 && self.window.len() > self.period {
            if let Some(true) = self.window.pop_front() {
                self.hits -= 1;
            }
        }
        self.value()
    }

    #[inline]
    pub fn value(&self) -> f64 {
        if self.window.is_empty() {
            return 0.0;
        }
        self.hits as f64 / self.window.len() as f64
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.window.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }
}
