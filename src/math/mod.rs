//! Mathematical utilities: least squares fits for sensitivity summaries.

pub mod ols;

pub use ols::*;
