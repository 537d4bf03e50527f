//! C-callable entry points.
//!
//! The caller owns both buffers. `out` must have room for `n` doubles and is
//! only written once the whole result has been computed, so a failed call
//! leaves it untouched. Every function returns `0` on success or the
//! [`RunMeanError::status_code`] of the failure.

use crate::options::{Align, Boundary, NaPolicy, RunMeanOptions};
use crate::{RunMean, RunMeanError};
use log::warn;
use std::os::raw::c_int;

pub const RUNMEAN_OK: c_int = 0;

/// Running mean with the default options (trailing, shrinking, NaN propagating).
///
/// # Safety
///
/// When `n > 0`, `a` must point to `n` readable doubles and `out` to `n`
/// writable doubles that do not overlap `a`.
#[no_mangle]
pub unsafe extern "C" fn runmean_f64(
    a: *const f64,
    n: usize,
    width: c_int,
    out: *mut f64,
) -> c_int {
    status(runmean_raw(a, n, width, RunMeanOptions::default(), out))
}

/// Running mean with explicit options.
///
/// `align`: 0 trailing, 1 centered. `boundary`: 0 shrink, 1 NaN.
/// `na`: 0 propagate, 1 omit.
///
/// # Safety
///
/// Same requirements as [`runmean_f64`].
#[no_mangle]
pub unsafe extern "C" fn runmean_f64_ex(
    a: *const f64,
    n: usize,
    width: c_int,
    align: c_int,
    boundary: c_int,
    na: c_int,
    out: *mut f64,
) -> c_int {
    match options_from_codes(align, boundary, na) {
        Ok(opts) => status(runmean_raw(a, n, width, opts, out)),
        Err(e) => status(Err(e)),
    }
}

fn options_from_codes(
    align: c_int,
    boundary: c_int,
    na: c_int,
) -> Result<RunMeanOptions, RunMeanError> {
    Ok(RunMeanOptions::new()
        .align(Align::from_code(align)?)
        .boundary(Boundary::from_code(boundary)?)
        .na(NaPolicy::from_code(na)?))
}

unsafe fn runmean_raw(
    a: *const f64,
    n: usize,
    width: c_int,
    opts: RunMeanOptions,
    out: *mut f64,
) -> Result<(), RunMeanError> {
    let rm = RunMean::from_raw_width(width, opts)?;
    if n == 0 {
        return Ok(());
    }
    if a.is_null() {
        return Err(RunMeanError::NullPointer("input"));
    }
    if out.is_null() {
        return Err(RunMeanError::NullPointer("output"));
    }

    let data = std::slice::from_raw_parts(a, n);
    let result = rm.apply(data)?;
    debug_assert_eq!(result.len(), n);
    std::ptr::copy_nonoverlapping(result.as_ptr(), out, n);
    Ok(())
}

fn status(r: Result<(), RunMeanError>) -> c_int {
    match r {
        Ok(()) => RUNMEAN_OK,
        Err(e) => {
            warn!("{}", e);
            e.status_code()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{runmean_f64, runmean_f64_ex, RUNMEAN_OK};
    use std::ptr;

    #[test]
    fn external_runmean_basic() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let mut out = [0.0f64; 5];
        let rc = unsafe { runmean_f64(a.as_ptr(), a.len(), 3, out.as_mut_ptr()) };
        assert_eq!(rc, RUNMEAN_OK);
        assert_eq!(out, [1.0, 1.5, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn external_runmean_ex() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let mut out = [0.0f64; 5];
        let rc = unsafe { runmean_f64_ex(a.as_ptr(), a.len(), 3, 1, 0, 0, out.as_mut_ptr()) };
        assert_eq!(rc, RUNMEAN_OK);
        assert_eq!(out, [1.5, 2.0, 3.0, 4.0, 4.5]);

        let rc = unsafe { runmean_f64_ex(a.as_ptr(), a.len(), 3, 0, 1, 0, out.as_mut_ptr()) };
        assert_eq!(rc, RUNMEAN_OK);
        assert!(out[0].is_nan() && out[1].is_nan());
        assert_eq!(&out[2..], &[2.0, 3.0, 4.0]);
    }

    #[test]
    fn external_runmean_rejects_bad_width() {
        let a = [1.0, 2.0];
        let mut out = [-1.0f64; 2];
        for w in &[0, -1, std::os::raw::c_int::MIN] {
            let rc = unsafe { runmean_f64(a.as_ptr(), a.len(), *w, out.as_mut_ptr()) };
            assert_eq!(rc, 1);
        }
        // Nothing is written on failure.
        assert_eq!(out, [-1.0, -1.0]);
    }

    #[test]
    fn external_runmean_rejects_bad_option() {
        let a = [1.0, 2.0];
        let mut out = [-1.0f64; 2];
        let rc = unsafe { runmean_f64_ex(a.as_ptr(), a.len(), 1, 2, 0, 0, out.as_mut_ptr()) };
        assert_eq!(rc, 1);
        let rc = unsafe { runmean_f64_ex(a.as_ptr(), a.len(), 1, 0, 0, -4, out.as_mut_ptr()) };
        assert_eq!(rc, 1);
        assert_eq!(out, [-1.0, -1.0]);
    }

    #[test]
    fn external_runmean_null_pointers() {
        let a = [1.0, 2.0];
        let mut out = [0.0f64; 2];
        let rc = unsafe { runmean_f64(ptr::null(), 2, 1, out.as_mut_ptr()) };
        assert_eq!(rc, 2);
        let rc = unsafe { runmean_f64(a.as_ptr(), 2, 1, ptr::null_mut()) };
        assert_eq!(rc, 2);

        // An empty input may come with null buffers.
        let rc = unsafe { runmean_f64(ptr::null(), 0, 4, ptr::null_mut()) };
        assert_eq!(rc, RUNMEAN_OK);
        // But the width is still checked.
        let rc = unsafe { runmean_f64(ptr::null(), 0, 0, ptr::null_mut()) };
        assert_eq!(rc, 1);
    }
}
