//! Read/write curve JSON files.
//!
//! Curve JSON is the portable representation of a run:
//! - the resolved parameter set and operating point
//! - the sweep that produced the samples
//! - every labeled curve (model comparison, family, or sensitivity series)
//!
//! The schema is defined by `domain::CurveFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::domain::{CurveFile, LabeledCurve, OperatingPoint, ParameterSet, SweepSpec};
use crate::error::AppError;

/// Assemble a curve file stamped with the current time.
pub fn build_curve_file(
    params: &ParameterSet,
    op: &OperatingPoint,
    sweep: &SweepSpec,
    series: Vec<LabeledCurve>,
) -> CurveFile {
    CurveFile {
        tool: "wss".to_string(),
        generated_at: Utc::now(),
        parameters: *params,
        operating_point: *op,
        sweep: *sweep,
        series,
    }
}

/// Write a curve JSON file.
pub fn write_curve_json(path: &Path, curve: &CurveFile) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::io(format!("Failed to create curve JSON '{}': {e}", path.display()))
    })?;

    serde_json::to_writer_pretty(file, curve)
        .map_err(|e| AppError::io(format!("Failed to write curve JSON: {e}")))?;

    Ok(())
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open curve JSON '{}': {e}", path.display())))?;
    let curve: CurveFile = serde_json::from_reader(file)
        .map_err(|e| AppError::io(format!("Invalid curve JSON: {e}")))?;
    for s in &curve.series {
        s.curve
            .check_lengths()
            .map_err(|e| AppError::io(format!("Invalid curve JSON: {e}")))?;
    }
    Ok(curve)
}
