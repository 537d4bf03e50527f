//! Online running mean, fed one value at a time.

use crate::options::NaPolicy;
use crate::window::WindowSum;
use crate::RunMeanError;
use std::collections::VecDeque;

/// Online form of the trailing running mean, fed one value at a time.
///
/// Until `width` values have been pushed the mean is taken over what has been
/// seen so far, matching the shrinking start of the batch computation.
#[derive(Debug, Clone)]
pub struct RollingMean {
    width: usize,
    na: NaPolicy,
    acc: WindowSum,
    values: VecDeque<f64>,
}

impl RollingMean {
    pub fn new(width: usize, na: NaPolicy) -> Result<Self, RunMeanError> {
        if width == 0 {
            return Err(RunMeanError::InvalidWidth(0));
        }
        Ok(RollingMean {
            width,
            na,
            acc: WindowSum::new(),
            // Don't trust width for the allocation, it may be far larger than the stream.
            values: VecDeque::with_capacity(width.min(1024)),
        })
    }

    /// Add `x` to the window and return the new mean.
    pub fn push(&mut self, x: f64) -> f64 {
        if self.values.len() == self.width {
            if let Some(old) = self.values.pop_front() {
                self.acc.remove(old);
            }
        }
        self.acc.add(x);
        self.values.push_back(x);
        if self.acc.needs_resum() {
            self.acc.resum(self.values.iter());
        }
        self.mean()
    }

    /// NaN while empty.
    pub fn mean(&self) -> f64 {
        self.acc.mean(self.na)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        debug_assert_eq!(self.values.len(), self.acc.len());
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.values.len() == self.width
    }

    pub fn clear(&mut self) {
        self.acc.clear();
        self.values.clear();
    }
}
