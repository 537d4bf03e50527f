use crate::options::{Boundary, NaPolicy, RunMeanOptions};
use crate::RunMeanError;
use log::debug;
use ocl::{flags, ProQue};

pub const SRC: &str = r#"
// Begin OCL C.
#pragma OPENCL EXTENSION cl_khr_fp64 : enable

__kernel void f64runmean(
    __global const double *input_buffer,
    __global double *res_buffer,
    unsigned long n,
    unsigned long left,
    unsigned long right,
    unsigned long width,
    int shrink,
    int omit_nan)
{
    // One work item per output. Each one sums its own window directly, so
    // there is no running sum here to drift.
    size_t i = get_global_id(0);
    if (i >= n) {
        return;
    }

    unsigned long lo = i >= left ? i - left : 0;
    unsigned long hi = (n - 1 - i) > right ? i + right : n - 1;

    if (!shrink && (hi - lo + 1) != width) {
        res_buffer[i] = NAN;
        return;
    }

    double acc = 0.0;
    unsigned long finite = 0;
    unsigned long nans = 0;
    unsigned long pos_inf = 0;
    unsigned long neg_inf = 0;
    double vmin = INFINITY;
    double vmax = -INFINITY;
    for (unsigned long j = lo; j <= hi; j++) {
        double v = input_buffer[j];
        if (isnan(v)) {
            nans++;
        } else if (isinf(v)) {
            if (v > 0.0) {
                pos_inf++;
            } else {
                neg_inf++;
            }
        } else {
            acc = acc + v;
            finite++;
            vmin = fmin(vmin, v);
            vmax = fmax(vmax, v);
        }
    }

    double res;
    if (!omit_nan && nans > 0) {
        res = NAN;
    } else if (pos_inf > 0 && neg_inf > 0) {
        res = NAN;
    } else if (pos_inf > 0) {
        res = INFINITY;
    } else if (neg_inf > 0) {
        res = -INFINITY;
    } else if (finite == 0) {
        res = NAN;
    } else {
        // Keep the mean inside the values it averages, matching the cpu path.
        res = fmin(fmax(acc / (double)finite, vmin), vmax);
    }
    res_buffer[i] = res;
}
// End OCL C
"#;

fn ocl_err(e: ocl::Error) -> RunMeanError {
    RunMeanError::OpenCl(e.to_string())
}

pub(crate) fn runmean_ocl(
    a: &[f64],
    width: usize,
    left: usize,
    right: usize,
    opts: &RunMeanOptions,
) -> Result<Vec<f64>, RunMeanError> {
    debug_assert!(!a.is_empty());
    debug!("runmean_ocl: submitting {} work items", a.len());

    // One global work item per output element.
    let pro_que = ProQue::builder().src(SRC).dims(a.len()).build().map_err(ocl_err)?;

    let input_buffer = pro_que
        .buffer_builder::<f64>()
        .len(a.len())
        .flags(flags::MemFlags::new().read_only())
        .copy_host_slice(a)
        .build()
        .map_err(ocl_err)?;

    let res_buffer = pro_que.create_buffer::<f64>().map_err(ocl_err)?;

    let kernel = pro_que
        .kernel_builder("f64runmean")
        .arg(&input_buffer)
        .arg(&res_buffer)
        .arg(a.len() as u64)
        .arg(left as u64)
        .arg(right as u64)
        .arg(width as u64)
        .arg((opts.boundary == Boundary::Shrink) as i32)
        .arg((opts.na == NaPolicy::Omit) as i32)
        .build()
        .map_err(ocl_err)?;

    unsafe {
        kernel.enq().map_err(ocl_err)?;
    }

    let mut res: Vec<f64> = vec![0.0f64; res_buffer.len()];
    res_buffer.read(&mut res).enq().map_err(ocl_err)?;
    Ok(res)
}

#[cfg(test)]
mod tests {
    use crate::{runmean_with, Align, Backend, Boundary, NaPolicy, RunMeanOptions};

    #[test]
    fn runmean_ocl_matches_cpu() {
        let mut a: Vec<f64> = (0u32..257).map(|v| f64::from(v).sin() * 3.0).collect();
        a[17] = f64::NAN;
        a[100] = f64::INFINITY;

        for align in &[Align::Trailing, Align::Centered] {
            for boundary in &[Boundary::Shrink, Boundary::Nan] {
                for na in &[NaPolicy::Propagate, NaPolicy::Omit] {
                    let cpu = RunMeanOptions::new().align(*align).boundary(*boundary).na(*na);
                    let gpu = cpu.backend(Backend::OpenCl);
                    let c = runmean_with(&a, 5, &cpu).unwrap();
                    let g = runmean_with(&a, 5, &gpu).unwrap();
                    assert_eq!(c.len(), g.len());
                    for (x, y) in c.iter().zip(g.iter()) {
                        assert!(
                            (x.is_nan() && y.is_nan()) || x == y || (x - y).abs() < 1e-9,
                            "{} != {}",
                            x,
                            y
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn runmean_ocl_constant_fixed_point() {
        let a = vec![0.1f64; 64];
        let opts = RunMeanOptions::new().backend(Backend::OpenCl);
        for width in &[1, 3, 7, 64, 100] {
            assert_eq!(runmean_with(&a, *width, &opts).unwrap(), a);
        }
    }
}
