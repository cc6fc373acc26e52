//! Closed-form wall shear stress for the supported fluid models.
//!
//! Every model is driven by the axial pressure/gravity term
//!
//! ```text
//! B(g) = ΔP/l − g·ρ·sin θ        [Pa/m]
//! ```
//!
//! and reports a stress magnitude in Pa. The evaluators are small pure
//! functions so that the sweep engine can stay generic over the model.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::{OperatingPoint, ParameterSet};
use crate::error::AppError;

/// Model selector used on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    PowerLaw,
    Newtonian,
    Bingham,
    YieldOffset,
}

/// A constitutive model together with its calibration constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Model {
    /// Ostwald–de Waele shear-thinning fluid.
    PowerLaw,
    /// Linearized reference stress divided by an empirical normalization.
    Newtonian { normalization: f64 },
    /// Piecewise yield-threshold model; depends on the local shear rate.
    BinghamPlastic,
    /// Newtonian reference stress offset by the yield stress.
    YieldOffset { normalization: f64 },
}

impl Model {
    pub fn from_kind(kind: ModelKind, normalization: f64) -> Self {
        match kind {
            ModelKind::PowerLaw => Model::PowerLaw,
            ModelKind::Newtonian => Model::Newtonian { normalization },
            ModelKind::Bingham => Model::BinghamPlastic,
            ModelKind::YieldOffset => Model::YieldOffset { normalization },
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Model::PowerLaw => "Power Law (Shear Thinning)",
            Model::Newtonian { .. } => "Newtonian",
            Model::BinghamPlastic => "Bingham Plastic",
            Model::YieldOffset { .. } => "Bingham (Yield Offset)",
        }
    }

    /// Reject calibration constants that would make every sample meaningless.
    pub fn validate(&self) -> Result<(), AppError> {
        match *self {
            Model::Newtonian { normalization } | Model::YieldOffset { normalization } => {
                if !(normalization.is_finite() && normalization > 0.0) {
                    return Err(AppError::invalid_parameter(format!(
                        "{} normalization constant must be finite and > 0, got {normalization}.",
                        self.display_name()
                    )));
                }
                Ok(())
            }
            Model::PowerLaw | Model::BinghamPlastic => Ok(()),
        }
    }

    pub fn evaluate(&self, params: &ParameterSet, op: &OperatingPoint) -> f64 {
        match *self {
            Model::PowerLaw => evaluate_power_law(params, op.gravity),
            Model::Newtonian { normalization } => {
                evaluate_newtonian(params, op.gravity, normalization)
            }
            Model::BinghamPlastic => evaluate_bingham_plastic(params, op.shear_rate, op.gravity),
            Model::YieldOffset { normalization } => {
                evaluate_yield_offset(params, op.gravity, normalization)
            }
        }
    }
}

/// `ΔP/l − g·ρ·sin θ`.
pub fn axial_term(params: &ParameterSet, gravity: f64) -> f64 {
    params.pressure_drop() / params.vessel_length()
        - gravity * params.density() * params.orientation_angle().sin()
}

/// Power-law wall shear stress: `m · |B(g)|^n · (r/2)`.
pub fn evaluate_power_law(params: &ParameterSet, gravity: f64) -> f64 {
    let b = axial_term(params, gravity).abs();
    params.consistency_index() * b.powf(params.flow_index()) * (params.vessel_radius() / 2.0)
}

/// Newtonian reference stress: `|B(g)| · (r/2) / K`.
pub fn evaluate_newtonian(params: &ParameterSet, gravity: f64, normalization: f64) -> f64 {
    axial_term(params, gravity).abs() * (params.vessel_radius() / 2.0) / normalization
}

/// Newtonian reference stress plus the yield stress.
pub fn evaluate_yield_offset(params: &ParameterSet, gravity: f64, normalization: f64) -> f64 {
    evaluate_newtonian(params, gravity, normalization) + params.yield_stress()
}

/// Hydrostatic wall contribution `g·ρ·sin θ·r` in Pa.
pub fn gravity_contribution(params: &ParameterSet, gravity: f64) -> f64 {
    gravity * params.density() * params.orientation_angle().sin() * params.vessel_radius()
}

/// Shear rate (1/s) at which the Bingham model switches branches for a given
/// gravity sample: `(τ_y + G) / μ`.
pub fn bingham_threshold(params: &ParameterSet, gravity: f64) -> f64 {
    (params.yield_stress() + gravity_contribution(params, gravity)) / params.dynamic_viscosity()
}

pub(crate) fn bingham_below_yield(params: &ParameterSet, shear_rate: f64, gravity: f64) -> f64 {
    params.dynamic_viscosity() * shear_rate + gravity_contribution(params, gravity)
}

pub(crate) fn bingham_above_yield(params: &ParameterSet, shear_rate: f64, gravity: f64) -> f64 {
    let mu = params.dynamic_viscosity();
    let ty = params.yield_stress();
    ty + mu * (shear_rate - ty / mu) + gravity_contribution(params, gravity)
}

/// Bingham-plastic wall shear stress magnitude.
///
/// The branch boundary depends on the gravity sample and is recomputed on
/// every call.
pub fn evaluate_bingham_plastic(params: &ParameterSet, shear_rate: f64, gravity: f64) -> f64 {
    let tau = if shear_rate <= bingham_threshold(params, gravity) {
        bingham_below_yield(params, shear_rate, gravity)
    } else {
        bingham_above_yield(params, shear_rate, gravity)
    };
    tau.abs()
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    use super::*;
    use crate::domain::ParameterField;

    fn reference_params() -> ParameterSet {
        ParameterSet::new(
            0.01615, 0.708, 1060.0, 10_000.0, 0.0035, 0.0015, 0.03, -FRAC_PI_4, 0.0144,
        )
        .unwrap()
    }

    /// Parameters whose axial term vanishes exactly at g = 1.
    fn zero_crossing_params() -> ParameterSet {
        ParameterSet::new(0.01615, 0.708, 1000.0, 1000.0, 0.0035, 0.0015, 1.0, FRAC_PI_2, 0.0144)
            .unwrap()
    }

    fn close(a: f64, b: f64, rel: f64) -> bool {
        (a - b).abs() <= rel * b.abs().max(1e-300)
    }

    #[test]
    fn power_law_reference_value_at_zero_gravity() {
        let tau = evaluate_power_law(&reference_params(), 0.0);
        assert!(close(tau, 0.09849902728956417, 1e-12), "tau={tau}");
    }

    #[test]
    fn power_law_reference_value_at_earth_gravity() {
        let tau = evaluate_power_law(&reference_params(), 9.8);
        assert!(close(tau, 0.10003088006611686, 1e-12), "tau={tau}");
    }

    #[test]
    fn newtonian_reference_value() {
        let tau = evaluate_newtonian(&reference_params(), 0.0, 280.0);
        assert!(close(tau, 0.8928571428571429, 1e-12), "tau={tau}");
    }

    #[test]
    fn zero_crossing_gives_exact_zero() {
        let p = zero_crossing_params();
        assert_eq!(axial_term(&p, 1.0), 0.0);
        let pl = evaluate_power_law(&p, 1.0);
        let nw = evaluate_newtonian(&p, 1.0, 500.0);
        assert_eq!(pl, 0.0);
        assert_eq!(nw, 0.0);
    }

    #[test]
    fn newtonian_does_not_change_sign_across_crossing() {
        let p = zero_crossing_params();
        for g in [0.5, 0.999, 1.0, 1.001, 1.5] {
            assert!(evaluate_newtonian(&p, g, 500.0) >= 0.0);
            assert!(evaluate_power_law(&p, g) >= 0.0);
        }
        // Symmetric about the crossing because only |B| enters.
        let below = evaluate_newtonian(&p, 0.5, 500.0);
        let above = evaluate_newtonian(&p, 1.5, 500.0);
        assert!(close(below, above, 1e-12));
    }

    #[test]
    fn newtonian_scales_inversely_with_normalization() {
        let p = reference_params();
        let a = evaluate_newtonian(&p, 3.3, 280.0);
        let b = evaluate_newtonian(&p, 3.3, 500.0);
        assert!(close(a * 280.0 / 500.0, b, 1e-12));
    }

    #[test]
    fn yield_offset_adds_yield_stress() {
        let p = reference_params();
        let nw = evaluate_newtonian(&p, 6.6, 500.0);
        let yo = evaluate_yield_offset(&p, 6.6, 500.0);
        assert!(close(yo - nw, 0.0144, 1e-9));
    }

    #[test]
    fn bingham_branches_agree_at_threshold() {
        let p = reference_params();
        let gamma = p.yield_stress() / p.dynamic_viscosity();
        let low = bingham_below_yield(&p, gamma, 0.0);
        let high = bingham_above_yield(&p, gamma, 0.0);
        assert!((low - high).abs() < 1e-9, "low={low} high={high}");
    }

    #[test]
    fn bingham_threshold_tracks_gravity() {
        let p = reference_params()
            .with_field(ParameterField::OrientationAngle, FRAC_PI_4)
            .unwrap();
        let t0 = bingham_threshold(&p, 0.0);
        let t1 = bingham_threshold(&p, 9.8);
        assert!(close(t0, p.yield_stress() / p.dynamic_viscosity(), 1e-12));
        assert!(t1 > t0);

        // Continuity holds at the gravity-dependent boundary too.
        for g in [0.0, 3.3, 9.8] {
            let gamma = bingham_threshold(&p, g);
            let low = bingham_below_yield(&p, gamma, g);
            let high = bingham_above_yield(&p, gamma, g);
            assert!((low - high).abs() < 1e-9);
        }
    }

    #[test]
    fn bingham_is_a_magnitude() {
        // Downward tilt makes the hydrostatic term negative.
        let p = reference_params();
        for gamma in [0.0, 1.0, 10.0, 1000.0] {
            for g in [0.0, 9.8, 39.2] {
                let tau = evaluate_bingham_plastic(&p, gamma, g);
                assert!(tau.is_finite() && tau >= 0.0, "gamma={gamma} g={g} tau={tau}");
            }
        }
    }

    #[test]
    fn model_validation_rejects_bad_normalization() {
        assert!(Model::Newtonian { normalization: 0.0 }.validate().is_err());
        assert!(Model::YieldOffset { normalization: f64::NAN }.validate().is_err());
        assert!(Model::Newtonian { normalization: 280.0 }.validate().is_ok());
        assert!(Model::PowerLaw.validate().is_ok());
    }

    #[test]
    fn evaluate_dispatches_on_operating_point() {
        let p = reference_params();
        let op = OperatingPoint { gravity: 3.3, shear_rate: 50.0 };
        assert_eq!(Model::PowerLaw.evaluate(&p, &op), evaluate_power_law(&p, 3.3));
        assert_eq!(
            Model::BinghamPlastic.evaluate(&p, &op),
            evaluate_bingham_plastic(&p, 50.0, 3.3)
        );
        assert_eq!(
            Model::from_kind(ModelKind::Newtonian, 280.0),
            Model::Newtonian { normalization: 280.0 }
        );
    }
}
