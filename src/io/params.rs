//! Parameter files (JSON).
//!
//! A parameter file is a partial `ParameterSet`: any subset of the field names,
//! e.g.
//!
//! ```json
//! { "pressure_drop": 16000.0, "vessel_radius": 0.0025 }
//! ```
//!
//! Missing fields keep their literature defaults (or whatever base the
//! overrides are applied to). Unknown keys are rejected.

use std::fs::File;
use std::path::Path;

use log::info;

use crate::domain::{ParameterOverrides, ParameterSet};
use crate::error::AppError;

/// Read a parameter file without validating it against a base set.
pub fn read_parameter_overrides(path: &Path) -> Result<ParameterOverrides, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::io(format!("Failed to open parameter file '{}': {e}", path.display()))
    })?;
    let overrides: ParameterOverrides = serde_json::from_reader(file).map_err(|e| {
        AppError::io(format!("Invalid parameter file '{}': {e}", path.display()))
    })?;
    info!("loaded parameter overrides from {}", path.display());
    Ok(overrides)
}

/// Write a full parameter set as pretty JSON.
pub fn write_parameter_file(path: &Path, params: &ParameterSet) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::io(format!("Failed to create parameter file '{}': {e}", path.display()))
    })?;
    serde_json::to_writer_pretty(file, params)
        .map_err(|e| AppError::io(format!("Failed to write parameter file: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ParameterField;
    use crate::error::ErrorKind;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("wss_params_{}_{name}", std::process::id()))
    }

    #[test]
    fn parameter_file_round_trip() {
        let path = temp_path("roundtrip.json");
        let p = ParameterSet::literature_defaults()
            .with_field(ParameterField::PressureDrop, 16_000.0)
            .unwrap();
        write_parameter_file(&path, &p).unwrap();

        let overrides = read_parameter_overrides(&path).unwrap();
        let back = overrides.apply(&ParameterSet::literature_defaults()).unwrap();
        assert_eq!(back, p);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn missing_and_malformed_files_are_io_errors() {
        let missing = temp_path("does_not_exist.json");
        assert_eq!(
            read_parameter_overrides(&missing).unwrap_err().kind(),
            ErrorKind::Io
        );

        let bad = temp_path("bad.json");
        std::fs::write(&bad, r#"{"viscosity": 1.0}"#).unwrap();
        assert_eq!(read_parameter_overrides(&bad).unwrap_err().kind(), ErrorKind::Io);
        let _ = std::fs::remove_file(&bad);
    }
}
