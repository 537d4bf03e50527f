//! Per-call configuration for the running mean.

use crate::RunMeanError;

/// Where the window sits relative to the output position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// Window ends at the output position.
    Trailing,
    /// Window straddles the output position. Even widths lean left.
    Centered,
}

impl Align {
    /// How many elements the window reaches (left, right) of the output position.
    pub fn extents(self, width: usize) -> (usize, usize) {
        debug_assert!(width >= 1);
        match self {
            Align::Trailing => (width - 1, 0),
            Align::Centered => {
                let left = width / 2;
                (left, width - 1 - left)
            }
        }
    }

    pub(crate) fn from_code(code: i32) -> Result<Self, RunMeanError> {
        match code {
            0 => Ok(Align::Trailing),
            1 => Ok(Align::Centered),
            _ => Err(RunMeanError::InvalidOption { name: "align", code }),
        }
    }
}

/// What to emit where the window is clipped by either end of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Average whatever elements remain.
    Shrink,
    /// Emit NaN unless the window holds exactly `width` elements.
    Nan,
}

impl Boundary {
    pub(crate) fn from_code(code: i32) -> Result<Self, RunMeanError> {
        match code {
            0 => Ok(Boundary::Shrink),
            1 => Ok(Boundary::Nan),
            _ => Err(RunMeanError::InvalidOption { name: "boundary", code }),
        }
    }
}

/// Treatment of NaN (missing) values inside a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NaPolicy {
    /// Any NaN in the window makes the mean NaN.
    Propagate,
    /// Skip NaNs; a window of only NaNs still yields NaN.
    Omit,
}

impl NaPolicy {
    pub(crate) fn from_code(code: i32) -> Result<Self, RunMeanError> {
        match code {
            0 => Ok(NaPolicy::Propagate),
            1 => Ok(NaPolicy::Omit),
            _ => Err(RunMeanError::InvalidOption { name: "na", code }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Cpu,
    /// Only honoured with the `ocl_support` feature, otherwise falls back to `Cpu`.
    OpenCl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunMeanOptions {
    pub align: Align,
    pub boundary: Boundary,
    pub na: NaPolicy,
    pub backend: Backend,
}

impl Default for RunMeanOptions {
    fn default() -> Self {
        RunMeanOptions {
            align: Align::Trailing,
            boundary: Boundary::Shrink,
            na: NaPolicy::Propagate,
            backend: Backend::Cpu,
        }
    }
}

impl RunMeanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn na(mut self, na: NaPolicy) -> Self {
        self.na = na;
        self
    }

    pub fn backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }
}
