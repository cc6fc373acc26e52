//! Command-line parsing for the wall shear stress sweep tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! engine; `app` turns these structs into engine inputs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{BaselineMode, OperatingPoint, ParameterOverrides, SweepAxis, SweepSpec};
use crate::models::ModelKind;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "wss",
    version,
    about = "Wall shear stress under varying gravity: model sweeps and one-way sensitivity"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sweep one axis and compare one or more models on it.
    Sweep(SweepArgs),
    /// Scale one parameter by a list of multipliers and sweep each variant.
    Sensitivity(SensitivityArgs),
    /// Nested sweep: one inner curve per outer value (e.g. radius curves at several g).
    Family(FamilyArgs),
    /// Plot a previously exported curve JSON.
    Plot(PlotArgs),
    /// Print the resolved parameter set (defaults, file, and overrides applied).
    Params(ParamsArgs),
}

/// Parameter file and per-field overrides.
#[derive(Debug, Args, Clone, Default)]
pub struct ParamArgs {
    /// JSON parameter file (any subset of fields). Falls back to $WSS_PARAMS.
    #[arg(long, value_name = "JSON")]
    pub params: Option<PathBuf>,

    /// Power-law consistency index m (Pa·s^n).
    #[arg(long)]
    pub consistency_index: Option<f64>,

    /// Power-law flow index n.
    #[arg(long)]
    pub flow_index: Option<f64>,

    /// Fluid density (kg/m^3).
    #[arg(long)]
    pub density: Option<f64>,

    /// Pressure drop along the vessel (Pa).
    #[arg(long, allow_negative_numbers = true)]
    pub pressure_drop: Option<f64>,

    /// Dynamic (plastic) viscosity (Pa·s).
    #[arg(long)]
    pub viscosity: Option<f64>,

    /// Vessel radius (m).
    #[arg(long)]
    pub radius: Option<f64>,

    /// Vessel length (m).
    #[arg(long)]
    pub length: Option<f64>,

    /// Vessel orientation angle (rad, within [-pi/2, pi/2]).
    #[arg(long, allow_negative_numbers = true)]
    pub angle: Option<f64>,

    /// Yield stress (Pa).
    #[arg(long)]
    pub yield_stress: Option<f64>,
}

impl ParamArgs {
    pub fn overrides(&self) -> ParameterOverrides {
        ParameterOverrides {
            consistency_index: self.consistency_index,
            flow_index: self.flow_index,
            density: self.density,
            pressure_drop: self.pressure_drop,
            dynamic_viscosity: self.viscosity,
            vessel_radius: self.radius,
            vessel_length: self.length,
            orientation_angle: self.angle,
            yield_stress: self.yield_stress,
        }
    }
}

/// The swept axis.
#[derive(Debug, Args, Clone)]
pub struct AxisArgs {
    /// Independent variable to sweep.
    #[arg(long, value_enum, default_value_t = SweepAxis::Gravity)]
    pub axis: SweepAxis,

    /// First sample (inclusive).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub start: f64,

    /// End of the sweep (exclusive).
    #[arg(long, default_value_t = 9.8, allow_negative_numbers = true)]
    pub stop: f64,

    /// Sample spacing (> 0).
    #[arg(long, default_value_t = 0.01)]
    pub step: f64,
}

impl AxisArgs {
    pub fn spec(&self) -> SweepSpec {
        SweepSpec::new(self.axis, self.start, self.stop, self.step)
    }
}

/// Inner sweep of a curve family (vessel radius, 1 mm to 3 mm, by default).
#[derive(Debug, Args, Clone)]
pub struct FamilyAxisArgs {
    /// Independent variable of each inner curve.
    #[arg(long, value_enum, default_value_t = SweepAxis::Radius)]
    pub axis: SweepAxis,

    /// First sample (inclusive).
    #[arg(long, default_value_t = 0.001, allow_negative_numbers = true)]
    pub start: f64,

    /// End of the sweep (exclusive).
    #[arg(long, default_value_t = 0.003, allow_negative_numbers = true)]
    pub stop: f64,

    /// Sample spacing (> 0).
    #[arg(long, default_value_t = 0.0001)]
    pub step: f64,
}

impl FamilyAxisArgs {
    pub fn spec(&self) -> SweepSpec {
        SweepSpec::new(self.axis, self.start, self.stop, self.step)
    }
}

/// Values held fixed while another axis is swept.
#[derive(Debug, Args, Clone)]
pub struct OperatingArgs {
    /// Gravitational acceleration when gravity is not the swept axis (m/s^2).
    #[arg(long, default_value_t = 9.8, allow_negative_numbers = true)]
    pub gravity: f64,

    /// Local shear rate when shear rate is not the swept axis (1/s).
    #[arg(long, default_value_t = 100.0)]
    pub shear_rate: f64,
}

impl OperatingArgs {
    pub fn operating_point(&self) -> OperatingPoint {
        OperatingPoint {
            gravity: self.gravity,
            shear_rate: self.shear_rate,
        }
    }
}

/// Presentation and export options shared by every run.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Render an ASCII plot in the terminal.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Horizontal reference stress drawn on the plot (Pa).
    #[arg(long)]
    pub reference: Option<f64>,

    /// Maximum number of table rows to print (0 disables the table).
    #[arg(long, default_value_t = 20)]
    pub rows: usize,

    /// Export every curve sample to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export curves (plus parameters and sweep) to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct SweepArgs {
    /// Model(s) to evaluate; repeat or comma-separate to compare.
    #[arg(
        long = "model",
        value_enum,
        value_delimiter = ',',
        default_values_t = [ModelKind::PowerLaw, ModelKind::Newtonian]
    )]
    pub models: Vec<ModelKind>,

    /// Normalization constant K of the Newtonian and yield-offset models.
    #[arg(long, default_value_t = 280.0)]
    pub normalization: f64,

    #[command(flatten)]
    pub axis: AxisArgs,

    #[command(flatten)]
    pub operating: OperatingArgs,

    #[command(flatten)]
    pub params: ParamArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct SensitivityArgs {
    /// Parameter field to perturb (e.g. consistency_index, density, pressure_drop).
    #[arg(long)]
    pub field: String,

    /// Multipliers applied to the field's base value.
    #[arg(long, value_delimiter = ',', default_values_t = [1.0, 1.75, 2.25, 3.25, 0.25])]
    pub multipliers: Vec<f64>,

    /// Whether the x1 baseline is part of the list or computed separately.
    #[arg(long, value_enum, default_value_t = BaselineMode::InList)]
    pub baseline: BaselineMode,

    /// Use the layered plan: multipliers 1.75,2.5,3.25,0.25 over a separate baseline.
    #[arg(long, conflicts_with_all = ["multipliers", "baseline"])]
    pub layered: bool,

    /// Model to evaluate.
    #[arg(long, value_enum, default_value_t = ModelKind::PowerLaw)]
    pub model: ModelKind,

    /// Normalization constant K of the Newtonian and yield-offset models.
    #[arg(long, default_value_t = 500.0)]
    pub normalization: f64,

    #[command(flatten)]
    pub axis: AxisArgs,

    #[command(flatten)]
    pub operating: OperatingArgs,

    #[command(flatten)]
    pub params: ParamArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct FamilyArgs {
    /// Axis held at each outer value.
    #[arg(long, value_enum, default_value_t = SweepAxis::Gravity)]
    pub outer_axis: SweepAxis,

    /// Outer values, one inner curve each.
    #[arg(
        long,
        value_delimiter = ',',
        allow_negative_numbers = true,
        default_values_t = [9.8e-6, 3.3, 6.6, 9.8]
    )]
    pub outer_values: Vec<f64>,

    /// Model to evaluate.
    #[arg(long, value_enum, default_value_t = ModelKind::PowerLaw)]
    pub model: ModelKind,

    /// Normalization constant K of the Newtonian and yield-offset models.
    #[arg(long, default_value_t = 280.0)]
    pub normalization: f64,

    #[command(flatten)]
    pub axis: FamilyAxisArgs,

    #[command(flatten)]
    pub operating: OperatingArgs,

    #[command(flatten)]
    pub params: ParamArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Options for plotting a saved curve file.
#[derive(Debug, Args)]
pub struct PlotArgs {
    /// Curve JSON file produced by `--export-json`.
    #[arg(long, value_name = "JSON")]
    pub curves: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Horizontal reference stress drawn on the plot (Pa).
    #[arg(long)]
    pub reference: Option<f64>,
}

#[derive(Debug, Args)]
pub struct ParamsArgs {
    #[command(flatten)]
    pub params: ParamArgs,

    /// Also write the resolved set to this JSON file.
    #[arg(long, value_name = "JSON")]
    pub write: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn sweep_defaults_compare_power_law_and_newtonian() {
        let cli = Cli::parse_from(["wss", "sweep"]);
        let Command::Sweep(args) = cli.command else {
            panic!("expected sweep");
        };
        assert_eq!(args.models, vec![ModelKind::PowerLaw, ModelKind::Newtonian]);
        assert_eq!(args.axis.spec(), SweepSpec::new(SweepAxis::Gravity, 0.0, 9.8, 0.01));
        assert!(args.params.overrides().is_empty());
    }

    #[test]
    fn negative_values_and_overrides_parse() {
        let cli = Cli::parse_from([
            "wss",
            "sweep",
            "--axis",
            "angle",
            "--start",
            "-1.5",
            "--stop",
            "1.5",
            "--step",
            "0.1",
            "--angle",
            "-0.5",
            "--pressure-drop",
            "16000",
            "--model",
            "bingham,yield-offset",
        ]);
        let Command::Sweep(args) = cli.command else {
            panic!("expected sweep");
        };
        assert_eq!(args.axis.start, -1.5);
        assert_eq!(args.axis.axis, SweepAxis::Angle);
        assert_eq!(args.params.overrides().orientation_angle, Some(-0.5));
        assert_eq!(args.params.overrides().pressure_drop, Some(16_000.0));
        assert_eq!(args.models, vec![ModelKind::Bingham, ModelKind::YieldOffset]);
    }

    #[test]
    fn sensitivity_defaults_to_canonical_multipliers() {
        let cli = Cli::parse_from(["wss", "sensitivity", "--field", "density"]);
        let Command::Sensitivity(args) = cli.command else {
            panic!("expected sensitivity");
        };
        assert_eq!(args.multipliers, vec![1.0, 1.75, 2.25, 3.25, 0.25]);
        assert_eq!(args.baseline, BaselineMode::InList);
        assert!(!args.layered);
    }

    #[test]
    fn family_defaults_to_radius_curves_at_gravity_levels() {
        let cli = Cli::parse_from(["wss", "family"]);
        let Command::Family(args) = cli.command else {
            panic!("expected family");
        };
        assert_eq!(args.outer_axis, SweepAxis::Gravity);
        assert_eq!(args.outer_values, vec![9.8e-6, 3.3, 6.6, 9.8]);
        assert_eq!(
            args.axis.spec(),
            SweepSpec::new(SweepAxis::Radius, 0.001, 0.003, 0.0001)
        );
    }

    #[test]
    fn family_inner_axis_can_be_overridden() {
        let cli = Cli::parse_from([
            "wss",
            "family",
            "--axis",
            "angle",
            "--start",
            "-1.5",
            "--stop",
            "1.5",
            "--step",
            "0.1",
        ]);
        let Command::Family(args) = cli.command else {
            panic!("expected family");
        };
        assert_eq!(args.axis.axis, SweepAxis::Angle);
        assert_eq!(args.axis.start, -1.5);
    }
}
