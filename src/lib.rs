//! Windowed running mean (moving average) over `f64` sequences.
//!
//! The output always has the same length as the input. How the first (and,
//! for centered windows, last) positions are filled is chosen through
//! [`RunMeanOptions`]; by default a trailing window shrinks at the start of
//! the sequence so every position is defined.
//!
//! ```
//! let out = runmean::runmean(&[1.0, 2.0, 3.0, 4.0, 5.0], 3).unwrap();
//! assert_eq!(out, vec![1.0, 1.5, 2.0, 3.0, 4.0]);
//! ```

mod error;
pub mod external;
#[cfg(feature = "ocl_support")]
mod oclc;
mod options;
mod rolling;
mod window;

pub use crate::error::RunMeanError;
pub use crate::options::{Align, Backend, Boundary, NaPolicy, RunMeanOptions};
pub use crate::rolling::RollingMean;

use crate::window::WindowSum;
use log::{debug, warn};
use std::convert::TryFrom;

// Below this many elements the GPU round trip costs more than it saves.
#[cfg(all(feature = "ocl_support", not(test)))]
const OCL_MIN_LEN: usize = 4096;
#[cfg(all(feature = "ocl_support", test))]
const OCL_MIN_LEN: usize = 8;

/// Running mean of `a` over `width` elements using the default options:
/// trailing window, shrinking at the start, NaN propagating.
pub fn runmean(a: &[f64], width: usize) -> Result<Vec<f64>, RunMeanError> {
    runmean_with(a, width, &RunMeanOptions::default())
}

/// Running mean of `a` over `width` elements.
///
/// `width` larger than `a.len()` is accepted: every window is then clipped,
/// so the result is governed entirely by `opts.boundary`. Empty input gives
/// empty output.
pub fn runmean_with(
    a: &[f64],
    width: usize,
    opts: &RunMeanOptions,
) -> Result<Vec<f64>, RunMeanError> {
    if width == 0 {
        return Err(RunMeanError::InvalidWidth(0));
    }
    debug!("runmean: n={} width={} {:?}", a.len(), width, opts);

    RunMean::new(width, *opts).apply(a)
}

/// A validated width and option set, ready to be applied to sequences.
pub(crate) struct RunMean {
    width: usize,
    opts: RunMeanOptions,
}

impl RunMean {
    pub fn new(width: usize, opts: RunMeanOptions) -> Self {
        debug_assert!(width >= 1);
        RunMean { width, opts }
    }

    /// Build from the integer width a foreign caller hands us.
    pub fn from_raw_width(width: i32, opts: RunMeanOptions) -> Result<Self, RunMeanError> {
        match usize::try_from(width) {
            Ok(w) if w >= 1 => Ok(Self::new(w, opts)),
            _ => Err(RunMeanError::InvalidWidth(i64::from(width))),
        }
    }

    pub fn apply(&self, a: &[f64]) -> Result<Vec<f64>, RunMeanError> {
        if a.is_empty() {
            return Ok(Vec::new());
        }
        match self.opts.backend {
            Backend::Cpu => Ok(self.do_runmean_cpu(a)),
            Backend::OpenCl => self.do_runmean_ocl(a),
        }
    }

    pub(crate) fn do_runmean_cpu(&self, a: &[f64]) -> Vec<f64> {
        let n = a.len();
        let (left, right) = self.opts.align.extents(self.width);
        let mut acc = WindowSum::new();
        let mut out = Vec::with_capacity(n);

        // The window is always a[lo..hi]. Both ends only ever move forward.
        let mut lo = 0;
        let mut hi = 0;
        for i in 0..n {
            let want_lo = i.saturating_sub(left);
            let want_hi = i.saturating_add(right).saturating_add(1).min(n);

            // Drop before adding, so a width of 1 reproduces the input exactly.
            while lo < want_lo {
                acc.remove(a[lo]);
                lo += 1;
            }
            while hi < want_hi {
                acc.add(a[hi]);
                hi += 1;
            }
            if acc.needs_resum() {
                acc.resum(&a[lo..hi]);
            }

            if hi - lo == self.width || self.opts.boundary == Boundary::Shrink {
                out.push(acc.mean(self.opts.na));
            } else {
                out.push(f64::NAN);
            }
        }
        out
    }

    #[cfg(feature = "ocl_support")]
    pub(crate) fn do_runmean_ocl(&self, a: &[f64]) -> Result<Vec<f64>, RunMeanError> {
        if a.len() < OCL_MIN_LEN {
            // Not worth submitting to the GPU, just burn CPU time instead.
            return Ok(self.do_runmean_cpu(a));
        }
        let (left, right) = self.opts.align.extents(self.width);
        oclc::runmean_ocl(a, self.width, left, right, &self.opts).map_err(|e| {
            warn!("runmean: opencl backend failed: {}", e);
            e
        })
    }

    #[cfg(not(feature = "ocl_support"))]
    pub(crate) fn do_runmean_ocl(&self, a: &[f64]) -> Result<Vec<f64>, RunMeanError> {
        warn!("runmean: built without ocl_support, using the cpu backend");
        Ok(self.do_runmean_cpu(a))
    }
}
