//! Shared domain types.
//!
//! These types are intentionally plain and serializable so they can be:
//!
//! - produced by the sweep engine
//! - tabulated / plotted by the reporting collaborators
//! - exported to JSON/CSV and reloaded later for plotting

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::parameters::{ParameterField, ParameterSet};
use crate::error::AppError;

/// Independent variable swept along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SweepAxis {
    /// Gravitational acceleration (or its component), m/s².
    Gravity,
    /// Vessel radius, m (overrides `ParameterSet::vessel_radius`).
    Radius,
    /// Vessel orientation angle, rad (overrides `ParameterSet::orientation_angle`).
    Angle,
    /// Local shear rate, 1/s (only the Bingham model depends on it).
    ShearRate,
}

impl SweepAxis {
    pub fn name(self) -> &'static str {
        match self {
            SweepAxis::Gravity => "gravity",
            SweepAxis::Radius => "radius",
            SweepAxis::Angle => "angle",
            SweepAxis::ShearRate => "shear_rate",
        }
    }

    /// Axis title for charts and tables.
    pub fn label(self) -> &'static str {
        match self {
            SweepAxis::Gravity => "Acceleration due to Gravity (m/s^2)",
            SweepAxis::Radius => "Vessel Radius (m)",
            SweepAxis::Angle => "Angle (rad)",
            SweepAxis::ShearRate => "Shear Rate (1/s)",
        }
    }

    /// The `ParameterSet` field this axis overrides, if any.
    pub fn parameter_field(self) -> Option<ParameterField> {
        match self {
            SweepAxis::Radius => Some(ParameterField::VesselRadius),
            SweepAxis::Angle => Some(ParameterField::OrientationAngle),
            SweepAxis::Gravity | SweepAxis::ShearRate => None,
        }
    }
}

/// Values of the non-parameter independent variables held fixed during a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingPoint {
    /// Gravitational acceleration, m/s².
    pub gravity: f64,
    /// Local shear rate, 1/s.
    pub shear_rate: f64,
}

impl Default for OperatingPoint {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            shear_rate: 100.0,
        }
    }
}

/// One swept axis: samples `start + i * step` strictly below `stop`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepSpec {
    pub axis: SweepAxis,
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl SweepSpec {
    pub fn new(axis: SweepAxis, start: f64, stop: f64, step: f64) -> Self {
        Self {
            axis,
            start,
            stop,
            step,
        }
    }

    /// Ordered sample points of this sweep.
    pub fn samples(&self) -> Result<Vec<f64>, AppError> {
        crate::sweep::grid::arange(self.start, self.stop, self.step)
    }
}

/// The core output artifact: stress versus one independent variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShearStressCurve {
    model_name: String,
    axis: SweepAxis,
    independent_values: Vec<f64>,
    dependent_values: Vec<f64>,
}

impl ShearStressCurve {
    pub fn new(
        model_name: impl Into<String>,
        axis: SweepAxis,
        independent_values: Vec<f64>,
        dependent_values: Vec<f64>,
    ) -> Result<Self, AppError> {
        let curve = Self {
            model_name: model_name.into(),
            axis,
            independent_values,
            dependent_values,
        };
        curve.check_lengths()?;
        Ok(curve)
    }

    pub(crate) fn check_lengths(&self) -> Result<(), AppError> {
        if self.independent_values.len() != self.dependent_values.len() {
            return Err(AppError::invalid_sweep(format!(
                "Curve '{}' has {} x-values but {} y-values.",
                self.model_name,
                self.independent_values.len(),
                self.dependent_values.len()
            )));
        }
        Ok(())
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn axis(&self) -> SweepAxis {
        self.axis
    }

    pub fn independent_values(&self) -> &[f64] {
        &self.independent_values
    }

    pub fn dependent_values(&self) -> &[f64] {
        &self.dependent_values
    }

    pub fn len(&self) -> usize {
        self.independent_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.independent_values.is_empty()
    }

    /// `(x, tau)` pairs in sweep order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.independent_values
            .iter()
            .copied()
            .zip(self.dependent_values.iter().copied())
    }

    /// `(min, max)` of the stress values.
    pub fn stress_range(&self) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &y in &self.dependent_values {
            lo = lo.min(y);
            hi = hi.max(y);
        }
        if lo.is_finite() && hi.is_finite() {
            Some((lo, hi))
        } else {
            None
        }
    }

    pub fn mean_stress(&self) -> Option<f64> {
        if self.dependent_values.is_empty() {
            return None;
        }
        let sum: f64 = self.dependent_values.iter().sum();
        Some(sum / self.dependent_values.len() as f64)
    }
}

/// A curve plus the label a chart legend or table header should use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledCurve {
    pub label: String,
    pub curve: ShearStressCurve,
}

/// Whether the unscaled (×1.0) curve is part of the multiplier list or computed
/// separately alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BaselineMode {
    /// The baseline is whatever multiplier `1.0` in the list produces (if any).
    InList,
    /// A separate baseline curve is always computed; the list holds only the
    /// perturbed multipliers.
    Separate,
}

/// Multipliers and baseline handling of a one-way sensitivity run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPlan {
    pub multipliers: Vec<f64>,
    pub baseline: BaselineMode,
}

impl SensitivityPlan {
    pub const CANONICAL_MULTIPLIERS: [f64; 5] = [1.0, 1.75, 2.25, 3.25, 0.25];
    pub const LAYERED_MULTIPLIERS: [f64; 4] = [1.75, 2.5, 3.25, 0.25];

    /// Perturbations layered on top of a separately computed baseline.
    pub fn layered() -> Self {
        Self {
            multipliers: Self::LAYERED_MULTIPLIERS.to_vec(),
            baseline: BaselineMode::Separate,
        }
    }
}

impl Default for SensitivityPlan {
    fn default() -> Self {
        Self {
            multipliers: Self::CANONICAL_MULTIPLIERS.to_vec(),
            baseline: BaselineMode::InList,
        }
    }
}

/// One perturbed curve of a sensitivity run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityCurve {
    pub multiplier: f64,
    pub curve: ShearStressCurve,
}

/// Output of a one-way sensitivity run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityResult {
    pub field: ParameterField,
    pub baseline_mode: BaselineMode,
    /// One curve per multiplier, in plan order.
    pub curves: Vec<SensitivityCurve>,
    /// Present only for `BaselineMode::Separate`.
    pub baseline: Option<ShearStressCurve>,
}

impl SensitivityResult {
    /// Multipliers of the perturbed curves, in plan order.
    pub fn multipliers(&self) -> impl Iterator<Item = f64> + '_ {
        self.curves.iter().map(|c| c.multiplier)
    }

    pub fn curve_for(&self, multiplier: f64) -> Option<&ShearStressCurve> {
        self.curves
            .iter()
            .find(|c| c.multiplier == multiplier)
            .map(|c| &c.curve)
    }

    /// The unperturbed curve, wherever the plan put it.
    pub fn baseline_curve(&self) -> Option<&ShearStressCurve> {
        match self.baseline_mode {
            BaselineMode::Separate => self.baseline.as_ref(),
            BaselineMode::InList => self.curve_for(1.0),
        }
    }

    pub fn labeled(&self) -> Vec<LabeledCurve> {
        let mut out = Vec::with_capacity(self.curves.len() + 1);
        if let Some(base) = &self.baseline {
            out.push(LabeledCurve {
                label: format!("{} x1 (baseline)", self.field),
                curve: base.clone(),
            });
        }
        for c in &self.curves {
            out.push(LabeledCurve {
                label: format!("{} x{}", self.field, c.multiplier),
                curve: c.curve.clone(),
            });
        }
        out
    }
}

/// One member of a curve family: the inner sweep at a fixed outer value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub outer_value: f64,
    pub curve: ShearStressCurve,
}

/// Nested sweep output: one inner curve per outer value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveFamily {
    pub outer_axis: SweepAxis,
    pub members: Vec<FamilyMember>,
}

impl CurveFamily {
    pub fn labeled(&self) -> Vec<LabeledCurve> {
        self.members
            .iter()
            .map(|m| LabeledCurve {
                label: format!("{} = {}", self.outer_axis.name(), m.outer_value),
                curve: m.curve.clone(),
            })
            .collect()
    }
}

/// A saved curve file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub parameters: ParameterSet,
    pub operating_point: OperatingPoint,
    pub sweep: SweepSpec,
    pub series: Vec<LabeledCurve>,
}
