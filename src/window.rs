//! Incremental window accumulator shared by the batch and online paths.
//!
//! Only finite values ever enter the running sum. NaNs and infinities are
//! counted instead, so `inf - inf` can never poison the sum when an infinite
//! value leaves the window.
//!
//! The finite values also feed a pair of monotonic deques tracking the window
//! minimum and maximum. The mean is clamped into `[min, max]`, so rounding in
//! the running sum can never push it outside the values it averages, and a
//! window of one repeated value yields exactly that value.

use crate::options::NaPolicy;
use log::trace;
use std::collections::VecDeque;

// How many removals before the sum is recomputed from the window contents.
#[cfg(not(test))]
pub(crate) const RESUM_INTERVAL: usize = 4096;
#[cfg(test)]
pub(crate) const RESUM_INTERVAL: usize = 8;

#[derive(Debug, Clone, Default)]
pub(crate) struct WindowSum {
    sum: f64,
    finite: usize,
    nan: usize,
    pos_inf: usize,
    neg_inf: usize,
    removed: usize,
    // Non-increasing from the front; front is the window maximum.
    maxq: VecDeque<f64>,
    // Non-decreasing from the front; front is the window minimum.
    minq: VecDeque<f64>,
}

impl WindowSum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, v: f64) {
        if v.is_nan() {
            self.nan += 1;
        } else if v == f64::INFINITY {
            self.pos_inf += 1;
        } else if v == f64::NEG_INFINITY {
            self.neg_inf += 1;
        } else {
            self.sum += v;
            self.finite += 1;
            // Strict comparisons keep duplicates, so removal by value stays in step.
            while self.maxq.back().map_or(false, |b| *b < v) {
                self.maxq.pop_back();
            }
            self.maxq.push_back(v);
            while self.minq.back().map_or(false, |b| *b > v) {
                self.minq.pop_back();
            }
            self.minq.push_back(v);
        }
    }

    /// `v` must be a value previously passed to `add` and still in the window.
    pub fn remove(&mut self, v: f64) {
        if v.is_nan() {
            self.nan -= 1;
        } else if v == f64::INFINITY {
            self.pos_inf -= 1;
        } else if v == f64::NEG_INFINITY {
            self.neg_inf -= 1;
        } else {
            if self.maxq.front() == Some(&v) {
                self.maxq.pop_front();
            }
            if self.minq.front() == Some(&v) {
                self.minq.pop_front();
            }
            self.finite -= 1;
            if self.finite == 0 {
                self.sum = 0.0;
            } else {
                self.sum -= v;
            }
        }
        self.removed += 1;
    }

    pub fn needs_resum(&self) -> bool {
        self.removed >= RESUM_INTERVAL
    }

    /// Rebuild the sum from scratch. `values` must be exactly the current window.
    pub fn resum<'a, I>(&mut self, values: I)
    where
        I: IntoIterator<Item = &'a f64>,
    {
        let drifted = self.sum;
        self.sum = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(0.0, |acc, v| acc + v);
        self.removed = 0;
        trace!("window resum: {:?} -> {:?}", drifted, self.sum);
    }

    pub fn len(&self) -> usize {
        self.finite + self.nan + self.pos_inf + self.neg_inf
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn mean(&self, na: NaPolicy) -> f64 {
        if na == NaPolicy::Propagate && self.nan > 0 {
            return f64::NAN;
        }
        match (self.pos_inf > 0, self.neg_inf > 0) {
            (true, true) => f64::NAN,
            (true, false) => f64::INFINITY,
            (false, true) => f64::NEG_INFINITY,
            (false, false) => {
                match (self.minq.front(), self.maxq.front()) {
                    (Some(lo), Some(hi)) if self.finite > 0 => {
                        (self.sum / self.finite as f64).max(*lo).min(*hi)
                    }
                    _ => f64::NAN,
                }
            }
        }
    }
}
