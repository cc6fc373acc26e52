//! Input/output helpers.
//!
//! - parameter files (`params`)
//! - curve exports to CSV (`export`)
//! - curve JSON read/write (`curve`)

pub mod curve;
pub mod export;
pub mod params;

pub use curve::*;
pub use export::*;
pub use params::*;
