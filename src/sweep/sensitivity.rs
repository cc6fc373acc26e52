//! One-way sensitivity analysis.
//!
//! For a chosen `ParameterSet` field we derive one parameter set per
//! multiplier (that field scaled, everything else unchanged), sweep the model
//! over the same axis for each, and tag every curve with its multiplier.
//!
//! A compact summary of the run is the log-log elasticity
//!
//! ```text
//! ε = d ln τ̄ / d ln k
//! ```
//!
//! where `τ̄` is the mean stress of the curve produced by multiplier `k`.
//! It is estimated by least squares over all multipliers.

use log::{info, warn};
use nalgebra::{DMatrix, DVector};
use rayon::prelude::*;

use crate::domain::{
    BaselineMode, OperatingPoint, ParameterField, ParameterSet, SensitivityCurve,
    SensitivityPlan, SensitivityResult, SweepSpec,
};
use crate::error::AppError;
use crate::math::solve_least_squares;
use crate::models::Model;
use crate::sweep::engine::sweep;

/// Run a one-way sensitivity study on the field named `field_name`.
pub fn run_one_way_sensitivity(
    model: &Model,
    base_params: &ParameterSet,
    field_name: &str,
    plan: &SensitivityPlan,
    op: &OperatingPoint,
    spec: &SweepSpec,
) -> Result<SensitivityResult, AppError> {
    let field: ParameterField = field_name.parse()?;
    run_for_field(model, base_params, field, plan, op, spec)
}

/// Same as [`run_one_way_sensitivity`] with an already-resolved field.
pub fn run_for_field(
    model: &Model,
    base_params: &ParameterSet,
    field: ParameterField,
    plan: &SensitivityPlan,
    op: &OperatingPoint,
    spec: &SweepSpec,
) -> Result<SensitivityResult, AppError> {
    if plan.multipliers.is_empty() {
        return Err(AppError::invalid_parameter("Sensitivity plan has no multipliers."));
    }
    if let Some(k) = plan.multipliers.iter().find(|k| !k.is_finite()) {
        return Err(AppError::invalid_parameter(format!(
            "Sensitivity multiplier {k} is not finite."
        )));
    }
    if spec.axis.parameter_field() == Some(field) {
        warn!(
            "sweeping {} overrides {field}; every multiplier will produce the same curve",
            spec.axis.name()
        );
    }

    info!(
        "one-way sensitivity: {} on {field} x {:?} ({:?} baseline)",
        model.display_name(),
        plan.multipliers,
        plan.baseline
    );

    // Derive every parameter set before sweeping so a bad multiplier fails fast.
    let derived = plan
        .multipliers
        .iter()
        .map(|&k| base_params.scaled(field, k).map(|p| (k, p)))
        .collect::<Result<Vec<_>, AppError>>()?;

    let curves = derived
        .par_iter()
        .map(|(k, p)| {
            sweep(model, p, op, spec).map(|curve| SensitivityCurve {
                multiplier: *k,
                curve,
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    let baseline = match plan.baseline {
        BaselineMode::Separate => Some(sweep(model, base_params, op, spec)?),
        BaselineMode::InList => None,
    };

    Ok(SensitivityResult {
        field,
        baseline_mode: plan.baseline,
        curves,
        baseline,
    })
}

/// Log-log slope of mean curve stress against multiplier.
///
/// Returns `None` when fewer than two distinct positive multipliers have a
/// positive mean stress.
pub fn elasticity(result: &SensitivityResult) -> Option<f64> {
    let mut pts: Vec<(f64, f64)> = result
        .curves
        .iter()
        .filter_map(|c| Some((c.multiplier, c.curve.mean_stress()?)))
        .collect();
    if let Some(base) = &result.baseline {
        if let Some(mean) = base.mean_stress() {
            pts.push((1.0, mean));
        }
    }

    let pts: Vec<(f64, f64)> = pts
        .into_iter()
        .filter(|&(k, tau)| k > 0.0 && tau > 0.0)
        .map(|(k, tau)| (k.ln(), tau.ln()))
        .collect();

    let first = pts.first()?.0;
    if pts.iter().all(|(x, _)| *x == first) {
        return None;
    }

    let n = pts.len();
    let mut x = DMatrix::<f64>::zeros(n, 2);
    let mut y = DVector::<f64>::zeros(n);
    for (i, &(lk, lt)) in pts.iter().enumerate() {
        x[(i, 0)] = 1.0;
        x[(i, 1)] = lk;
        y[i] = lt;
    }

    let beta = solve_least_squares(&x, &y)?;
    Some(beta[1])
}
