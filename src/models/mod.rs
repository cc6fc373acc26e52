//! Constitutive models for wall shear stress.
//!
//! Models are implemented as small, pure functions so that sweep and
//! sensitivity code can stay generic.

pub mod model;

pub use model::*;
