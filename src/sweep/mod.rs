//! Sweep orchestration.
//!
//! Responsibilities:
//!
//! - generate sample points for one axis
//! - evaluate a model along that axis (parallel)
//! - run one-way sensitivity studies on top of single-axis sweeps

pub mod engine;
pub mod grid;
pub mod sensitivity;

pub use engine::*;
pub use grid::*;
pub use sensitivity::*;
