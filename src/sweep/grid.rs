//! Sample-point generation for one swept axis.
//!
//! Samples are computed as `start + i * step` rather than by repeated
//! addition, so long sweeps do not accumulate rounding drift.

use crate::error::AppError;

/// Upper bound on the number of samples a single sweep may produce.
pub const MAX_SAMPLES: usize = 10_000_000;

/// Points `start, start + step, ...` strictly below `stop`.
pub fn arange(start: f64, stop: f64, step: f64) -> Result<Vec<f64>, AppError> {
    if !(start.is_finite() && stop.is_finite() && step.is_finite()) {
        return Err(AppError::invalid_sweep(format!(
            "Invalid sweep: start={start}, stop={stop}, step={step} (must all be finite)."
        )));
    }
    if step <= 0.0 || start + step == start {
        return Err(AppError::invalid_sweep(format!(
            "Invalid sweep step {step} at start {start} (must be > 0 and advance the sample)."
        )));
    }
    if stop <= start {
        return Err(AppError::invalid_sweep(format!(
            "Invalid sweep bounds: start={start}, stop={stop} (must have stop > start)."
        )));
    }

    let count = ((stop - start) / step).ceil();
    if !count.is_finite() || count > MAX_SAMPLES as f64 {
        return Err(AppError::invalid_sweep(format!(
            "Sweep would produce {count} samples (limit {MAX_SAMPLES})."
        )));
    }

    let count = count as usize;
    let mut out: Vec<f64> = Vec::with_capacity(count);
    for i in 0..count {
        let x = start + step * i as f64;
        if x >= stop {
            break;
        }
        if out.last().is_some_and(|&prev| x <= prev) {
            return Err(AppError::invalid_sweep(format!(
                "Sweep step {step} is below the float resolution near {x}."
            )));
        }
        out.push(x);
    }
    Ok(out)
}
