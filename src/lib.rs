//! `wss-sweep` library crate.
//!
//! Wall shear stress of blood flowing in an inclined vessel, under varying
//! gravity, for power-law, Newtonian, and Bingham-plastic fluid models.
//!
//! The binary (`wss`) is a thin wrapper around this library so that:
//!
//! - the models and sweeps are testable without spawning processes
//! - curves can be produced from other front-ends (notebooks, batch jobs)

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod sweep;
