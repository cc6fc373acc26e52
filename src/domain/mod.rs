//! Domain types used throughout the engine.
//!
//! This module defines:
//!
//! - the validated physical parameter set (`ParameterSet`, `ParameterField`)
//! - sweep inputs (`SweepAxis`, `SweepSpec`, `OperatingPoint`)
//! - engine outputs (`ShearStressCurve`, `SensitivityResult`, `CurveFamily`)

pub mod parameters;
pub mod types;

pub use parameters::*;
pub use types::*;
