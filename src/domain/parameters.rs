//! The physical parameter set fed into every model evaluation.
//!
//! A `ParameterSet` is validated on construction and never mutated afterwards.
//! Experiments derive new sets with [`ParameterSet::with_field`] or
//! [`ParameterSet::scaled`], which copy the base, override exactly one field,
//! and validate again.

use std::f64::consts::FRAC_PI_2;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Names of the fields of a [`ParameterSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterField {
    ConsistencyIndex,
    FlowIndex,
    Density,
    PressureDrop,
    DynamicViscosity,
    VesselRadius,
    VesselLength,
    OrientationAngle,
    YieldStress,
}

impl ParameterField {
    pub const ALL: [ParameterField; 9] = [
        ParameterField::ConsistencyIndex,
        ParameterField::FlowIndex,
        ParameterField::Density,
        ParameterField::PressureDrop,
        ParameterField::DynamicViscosity,
        ParameterField::VesselRadius,
        ParameterField::VesselLength,
        ParameterField::OrientationAngle,
        ParameterField::YieldStress,
    ];

    /// Canonical snake_case name (the form accepted by sensitivity runs).
    pub fn name(self) -> &'static str {
        match self {
            ParameterField::ConsistencyIndex => "consistency_index",
            ParameterField::FlowIndex => "flow_index",
            ParameterField::Density => "density",
            ParameterField::PressureDrop => "pressure_drop",
            ParameterField::DynamicViscosity => "dynamic_viscosity",
            ParameterField::VesselRadius => "vessel_radius",
            ParameterField::VesselLength => "vessel_length",
            ParameterField::OrientationAngle => "orientation_angle",
            ParameterField::YieldStress => "yield_stress",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            ParameterField::ConsistencyIndex => "Pa·s^n",
            ParameterField::FlowIndex => "-",
            ParameterField::Density => "kg/m^3",
            ParameterField::PressureDrop => "Pa",
            ParameterField::DynamicViscosity => "Pa·s",
            ParameterField::VesselRadius => "m",
            ParameterField::VesselLength => "m",
            ParameterField::OrientationAngle => "rad",
            ParameterField::YieldStress => "Pa",
        }
    }

    fn short_alias(self) -> &'static str {
        match self {
            ParameterField::ConsistencyIndex => "m",
            ParameterField::FlowIndex => "n",
            ParameterField::Density => "rho",
            ParameterField::PressureDrop => "p",
            ParameterField::DynamicViscosity => "mu",
            ParameterField::VesselRadius => "r",
            ParameterField::VesselLength => "l",
            ParameterField::OrientationAngle => "theta",
            ParameterField::YieldStress => "ys",
        }
    }
}

impl std::fmt::Display for ParameterField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParameterField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        ParameterField::ALL
            .into_iter()
            .find(|f| f.name() == key || f.short_alias() == key)
            .ok_or_else(|| AppError::unknown_field(s))
    }
}

/// Immutable bundle of the physical constants of one vessel/fluid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ParameterOverrides")]
pub struct ParameterSet {
    consistency_index: f64,
    flow_index: f64,
    density: f64,
    pressure_drop: f64,
    dynamic_viscosity: f64,
    vessel_radius: f64,
    vessel_length: f64,
    orientation_angle: f64,
    yield_stress: f64,
}

impl ParameterSet {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        consistency_index: f64,
        flow_index: f64,
        density: f64,
        pressure_drop: f64,
        dynamic_viscosity: f64,
        vessel_radius: f64,
        vessel_length: f64,
        orientation_angle: f64,
        yield_stress: f64,
    ) -> Result<Self, AppError> {
        let params = Self {
            consistency_index,
            flow_index,
            density,
            pressure_drop,
            dynamic_viscosity,
            vessel_radius,
            vessel_length,
            orientation_angle,
            yield_stress,
        };
        params.validate()?;
        Ok(params)
    }

    /// Generalized coronary artery filled with whole blood.
    ///
    /// Sources:
    /// - power-law `m`, `n`: shear-thinning fit for whole blood
    /// - density: Cutnell & Johnson, *Physics* (4th ed.), 1998
    /// - pressure drop: Klabunde, *Cardiovascular Physiology Concepts*
    /// - viscosity: plasma reference values, Clin Chem Lab Med 2000 (3.5 mPa·s)
    /// - radius and length: typical coronary artery geometry
    /// - angle: 45° downward tilt, aortic anatomy survey (Tubbs et al.)
    /// - yield stress: pressure-scanning capillary hemorheometer measurements
    pub fn literature_defaults() -> Self {
        Self {
            consistency_index: 0.01615,
            flow_index: 0.708,
            density: 1060.0,
            pressure_drop: 10_000.0,
            dynamic_viscosity: 0.0035,
            vessel_radius: 0.0015,
            vessel_length: 0.03,
            orientation_angle: -std::f64::consts::FRAC_PI_4,
            yield_stress: 0.0144,
        }
    }

    pub fn consistency_index(&self) -> f64 {
        self.consistency_index
    }

    pub fn flow_index(&self) -> f64 {
        self.flow_index
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn pressure_drop(&self) -> f64 {
        self.pressure_drop
    }

    pub fn dynamic_viscosity(&self) -> f64 {
        self.dynamic_viscosity
    }

    pub fn vessel_radius(&self) -> f64 {
        self.vessel_radius
    }

    pub fn vessel_length(&self) -> f64 {
        self.vessel_length
    }

    pub fn orientation_angle(&self) -> f64 {
        self.orientation_angle
    }

    pub fn yield_stress(&self) -> f64 {
        self.yield_stress
    }

    pub fn get(&self, field: ParameterField) -> f64 {
        match field {
            ParameterField::ConsistencyIndex => self.consistency_index,
            ParameterField::FlowIndex => self.flow_index,
            ParameterField::Density => self.density,
            ParameterField::PressureDrop => self.pressure_drop,
            ParameterField::DynamicViscosity => self.dynamic_viscosity,
            ParameterField::VesselRadius => self.vessel_radius,
            ParameterField::VesselLength => self.vessel_length,
            ParameterField::OrientationAngle => self.orientation_angle,
            ParameterField::YieldStress => self.yield_stress,
        }
    }

    /// Copy of `self` with one field replaced.
    pub fn with_field(&self, field: ParameterField, value: f64) -> Result<Self, AppError> {
        let mut out = *self;
        *out.slot(field) = value;
        out.validate()?;
        Ok(out)
    }

    /// Copy of `self` with one field multiplied by `multiplier`.
    pub fn scaled(&self, field: ParameterField, multiplier: f64) -> Result<Self, AppError> {
        self.with_field(field, self.get(field) * multiplier)
    }

    fn slot(&mut self, field: ParameterField) -> &mut f64 {
        match field {
            ParameterField::ConsistencyIndex => &mut self.consistency_index,
            ParameterField::FlowIndex => &mut self.flow_index,
            ParameterField::Density => &mut self.density,
            ParameterField::PressureDrop => &mut self.pressure_drop,
            ParameterField::DynamicViscosity => &mut self.dynamic_viscosity,
            ParameterField::VesselRadius => &mut self.vessel_radius,
            ParameterField::VesselLength => &mut self.vessel_length,
            ParameterField::OrientationAngle => &mut self.orientation_angle,
            ParameterField::YieldStress => &mut self.yield_stress,
        }
    }

    fn validate(&self) -> Result<(), AppError> {
        for field in ParameterField::ALL {
            let v = self.get(field);
            if !v.is_finite() {
                return Err(AppError::invalid_parameter(format!(
                    "Parameter {field} must be finite, got {v}."
                )));
            }
        }

        let positive = [
            ParameterField::ConsistencyIndex,
            ParameterField::FlowIndex,
            ParameterField::Density,
            ParameterField::DynamicViscosity,
            ParameterField::VesselRadius,
            ParameterField::VesselLength,
        ];
        for field in positive {
            let v = self.get(field);
            if v <= 0.0 {
                return Err(AppError::invalid_parameter(format!(
                    "Parameter {field} must be > 0 {}, got {v}.",
                    field.unit()
                )));
            }
        }

        if !(-FRAC_PI_2..=FRAC_PI_2).contains(&self.orientation_angle) {
            return Err(AppError::invalid_parameter(format!(
                "Parameter orientation_angle must lie in [-pi/2, pi/2] rad, got {}.",
                self.orientation_angle
            )));
        }
        if self.yield_stress < 0.0 {
            return Err(AppError::invalid_parameter(format!(
                "Parameter yield_stress must be >= 0 Pa, got {}.",
                self.yield_stress
            )));
        }
        Ok(())
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self::literature_defaults()
    }
}

/// Partial parameter set, used for JSON parameter files and CLI overrides.
///
/// Missing fields fall back to whatever base set the overrides are applied to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consistency_index: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_index: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure_drop: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_viscosity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vessel_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vessel_length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation_angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yield_stress: Option<f64>,
}

impl ParameterOverrides {
    fn entries(&self) -> [(ParameterField, Option<f64>); 9] {
        [
            (ParameterField::ConsistencyIndex, self.consistency_index),
            (ParameterField::FlowIndex, self.flow_index),
            (ParameterField::Density, self.density),
            (ParameterField::PressureDrop, self.pressure_drop),
            (ParameterField::DynamicViscosity, self.dynamic_viscosity),
            (ParameterField::VesselRadius, self.vessel_radius),
            (ParameterField::VesselLength, self.vessel_length),
            (ParameterField::OrientationAngle, self.orientation_angle),
            (ParameterField::YieldStress, self.yield_stress),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.entries().iter().all(|(_, v)| v.is_none())
    }

    /// Layer `top` over `self`: fields set in `top` win.
    pub fn layered(self, top: ParameterOverrides) -> ParameterOverrides {
        ParameterOverrides {
            consistency_index: top.consistency_index.or(self.consistency_index),
            flow_index: top.flow_index.or(self.flow_index),
            density: top.density.or(self.density),
            pressure_drop: top.pressure_drop.or(self.pressure_drop),
            dynamic_viscosity: top.dynamic_viscosity.or(self.dynamic_viscosity),
            vessel_radius: top.vessel_radius.or(self.vessel_radius),
            vessel_length: top.vessel_length.or(self.vessel_length),
            orientation_angle: top.orientation_angle.or(self.orientation_angle),
            yield_stress: top.yield_stress.or(self.yield_stress),
        }
    }

    /// Apply every set field to `base` and validate the result once.
    pub fn apply(&self, base: &ParameterSet) -> Result<ParameterSet, AppError> {
        let mut out = *base;
        for (field, value) in self.entries() {
            if let Some(v) = value {
                *out.slot(field) = v;
            }
        }
        out.validate()?;
        Ok(out)
    }
}

impl TryFrom<ParameterOverrides> for ParameterSet {
    type Error = AppError;

    fn try_from(value: ParameterOverrides) -> Result<Self, Self::Error> {
        value.apply(&ParameterSet::literature_defaults())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn literature_defaults_are_valid() {
        let p = ParameterSet::literature_defaults();
        assert!(p.validate().is_ok());
        assert_eq!(p.flow_index(), 0.708);
        assert_eq!(p.density(), 1060.0);
    }

    #[test]
    fn rejects_non_positive_fields() {
        let p = ParameterSet::literature_defaults();
        for field in [
            ParameterField::ConsistencyIndex,
            ParameterField::FlowIndex,
            ParameterField::Density,
            ParameterField::DynamicViscosity,
            ParameterField::VesselRadius,
            ParameterField::VesselLength,
        ] {
            let err = p.with_field(field, 0.0).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidParameter, "{field}");
            assert!(p.with_field(field, -1.0).is_err(), "{field}");
        }
    }

    #[test]
    fn angle_must_be_physiological() {
        let p = ParameterSet::literature_defaults();
        assert!(p.with_field(ParameterField::OrientationAngle, FRAC_PI_2).is_ok());
        assert!(p.with_field(ParameterField::OrientationAngle, -FRAC_PI_2).is_ok());
        assert!(p.with_field(ParameterField::OrientationAngle, 1.6).is_err());
        assert!(p.with_field(ParameterField::OrientationAngle, -1.6).is_err());
    }

    #[test]
    fn pressure_drop_may_be_negative_but_not_nan() {
        let p = ParameterSet::literature_defaults();
        assert!(p.with_field(ParameterField::PressureDrop, -5000.0).is_ok());
        assert!(p.with_field(ParameterField::PressureDrop, f64::NAN).is_err());
        assert!(p.with_field(ParameterField::YieldStress, -0.1).is_err());
    }

    #[test]
    fn scaled_overrides_exactly_one_field() {
        let base = ParameterSet::literature_defaults();
        let derived = base.scaled(ParameterField::Density, 1.75).unwrap();
        assert_eq!(derived.density(), 1060.0 * 1.75);
        for field in ParameterField::ALL {
            if field != ParameterField::Density {
                assert_eq!(derived.get(field), base.get(field), "{field}");
            }
        }
        // The base is untouched.
        assert_eq!(base.density(), 1060.0);
    }

    #[test]
    fn field_names_parse_with_aliases() {
        assert_eq!(
            "consistency_index".parse::<ParameterField>().unwrap(),
            ParameterField::ConsistencyIndex
        );
        assert_eq!("rho".parse::<ParameterField>().unwrap(), ParameterField::Density);
        assert_eq!(
            "vessel-radius".parse::<ParameterField>().unwrap(),
            ParameterField::VesselRadius
        );
        let err = "nonexistent_field".parse::<ParameterField>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownField);
    }

    #[test]
    fn overrides_layer_and_apply() {
        let file = ParameterOverrides {
            pressure_drop: Some(16_000.0),
            vessel_radius: Some(0.002),
            ..Default::default()
        };
        let cli = ParameterOverrides {
            vessel_radius: Some(0.0025),
            ..Default::default()
        };
        let merged = file.layered(cli);
        let p = merged.apply(&ParameterSet::literature_defaults()).unwrap();
        assert_eq!(p.pressure_drop(), 16_000.0);
        assert_eq!(p.vessel_radius(), 0.0025);
        assert_eq!(p.density(), 1060.0);
        assert!(ParameterOverrides::default().is_empty());
    }

    #[test]
    fn deserializing_validates() {
        let ok: ParameterSet = serde_json::from_str(r#"{"density": 1050.0}"#).unwrap();
        assert_eq!(ok.density(), 1050.0);
        assert_eq!(ok.flow_index(), 0.708);

        assert!(serde_json::from_str::<ParameterSet>(r#"{"density": -1.0}"#).is_err());
        assert!(serde_json::from_str::<ParameterSet>(r#"{"bogus": 1.0}"#).is_err());
    }

    #[test]
    fn serialize_round_trips() {
        let p = ParameterSet::literature_defaults()
            .with_field(ParameterField::VesselLength, 0.05)
            .unwrap();
        let json = serde_json::to_string(&p).unwrap();
        let back: ParameterSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
