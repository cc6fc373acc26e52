//! Export curves to CSV.
//!
//! The export is long-format (one row per sample) so curves with different
//! x-grids can share a file and it stays easy to pivot in a spreadsheet.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::LabeledCurve;
use crate::error::AppError;

const HEADER: [&str; 5] = ["series", "model", "axis", "x", "shear_stress_pa"];

/// Write every sample of every curve to a CSV file.
pub fn write_curves_csv(path: &Path, series: &[LabeledCurve]) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::io(format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;
    write_curves(file, series)
}

fn write_curves<W: Write>(out: W, series: &[LabeledCurve]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(out);
    let to_io = |e: csv::Error| AppError::io(format!("Failed to write export CSV: {e}"));

    writer.write_record(HEADER).map_err(to_io)?;
    for s in series {
        let axis = s.curve.axis().name();
        for (x, tau) in s.curve.points() {
            let x = format!("{x:.10}");
            let tau = format!("{tau:.10}");
            writer
                .write_record([
                    s.label.as_str(),
                    s.curve.model_name(),
                    axis,
                    x.as_str(),
                    tau.as_str(),
                ])
                .map_err(to_io)?;
        }
    }
    writer
        .flush()
        .map_err(|e| AppError::io(format!("Failed to write export CSV: {e}")))?;
    Ok(())
}
