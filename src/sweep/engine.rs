//! Evaluate a model along one swept axis.
//!
//! Given:
//! - a model (with its calibration constants)
//! - a base `ParameterSet`
//! - an `OperatingPoint` (gravity / shear rate held fixed)
//! - a `SweepSpec`
//!
//! we evaluate the model once per sample point and return the ordered curve.
//! Samples are independent, so they are evaluated in parallel and collected in
//! sweep order.

use log::debug;
use rayon::prelude::*;

use crate::domain::{OperatingPoint, ParameterSet, ShearStressCurve, SweepAxis, SweepSpec};
use crate::error::AppError;
use crate::models::Model;

/// Place `value` on `axis`, returning the parameter set and operating point a
/// model should be evaluated at.
///
/// Parameter axes (radius, angle) derive a new validated `ParameterSet`;
/// the others override the operating point.
pub fn apply_axis(
    axis: SweepAxis,
    value: f64,
    params: &ParameterSet,
    op: &OperatingPoint,
) -> Result<(ParameterSet, OperatingPoint), AppError> {
    if !value.is_finite() {
        return Err(AppError::invalid_sweep(format!(
            "Non-finite {} sample {value}.",
            axis.name()
        )));
    }
    match axis {
        SweepAxis::Gravity => Ok((*params, OperatingPoint { gravity: value, ..*op })),
        SweepAxis::ShearRate => Ok((*params, OperatingPoint { shear_rate: value, ..*op })),
        SweepAxis::Radius | SweepAxis::Angle => {
            let field = axis
                .parameter_field()
                .ok_or_else(|| AppError::invalid_sweep("Axis has no parameter field."))?;
            Ok((params.with_field(field, value)?, *op))
        }
    }
}

/// Evaluate `model` at every sample of `spec`, in ascending order.
pub fn sweep(
    model: &Model,
    params: &ParameterSet,
    op: &OperatingPoint,
    spec: &SweepSpec,
) -> Result<ShearStressCurve, AppError> {
    model.validate()?;
    let xs = spec.samples()?;
    debug!(
        "sweep {} over {} [{}, {}) step {} ({} samples)",
        model.display_name(),
        spec.axis.name(),
        spec.start,
        spec.stop,
        spec.step,
        xs.len()
    );

    let ys = xs
        .par_iter()
        .map(|&x| {
            let (p, o) = apply_axis(spec.axis, x, params, op)?;
            let tau = model.evaluate(&p, &o);
            if tau.is_finite() {
                Ok(tau)
            } else {
                Err(AppError::invalid_parameter(format!(
                    "{} produced a non-finite stress at {} = {x}.",
                    model.display_name(),
                    spec.axis.name()
                )))
            }
        })
        .collect::<Result<Vec<f64>, AppError>>()?;

    ShearStressCurve::new(model.display_name(), spec.axis, xs, ys)
}

/// Sweep several models over the same sample points (side-by-side comparison).
pub fn sweep_models(
    models: &[Model],
    params: &ParameterSet,
    op: &OperatingPoint,
    spec: &SweepSpec,
) -> Result<Vec<ShearStressCurve>, AppError> {
    models.iter().map(|m| sweep(m, params, op, spec)).collect()
}
