//! Shared run logic behind the CLI subcommands.
//!
//! Every run follows the same shape:
//! resolve parameters -> sweep (one or many) -> labeled curves
//!
//! The handlers in `app` only decide what to print and where to export.

use std::path::{Path, PathBuf};

use log::info;

use crate::domain::{
    CurveFamily, FamilyMember, LabeledCurve, OperatingPoint, ParameterOverrides, ParameterSet,
    SensitivityPlan, SensitivityResult, SweepAxis, SweepSpec,
};
use crate::error::AppError;
use crate::models::Model;
use crate::sweep::{apply_axis, elasticity, run_one_way_sensitivity, sweep, sweep_models};

/// Environment variable naming a default parameter file.
pub const PARAMS_ENV: &str = "WSS_PARAMS";

/// Outputs of a model comparison sweep.
#[derive(Debug, Clone)]
pub struct ComparisonRun {
    pub series: Vec<LabeledCurve>,
}

/// Outputs of a one-way sensitivity run.
#[derive(Debug, Clone)]
pub struct SensitivityRun {
    pub result: SensitivityResult,
    pub elasticity: Option<f64>,
}

/// The parameter file to use: the explicit flag, else `$WSS_PARAMS`.
pub fn params_path(flag: Option<&Path>) -> Option<PathBuf> {
    flag.map(Path::to_path_buf).or_else(|| {
        std::env::var_os(PARAMS_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    })
}

/// Defaults, then the parameter file (if any), then command-line overrides.
pub fn resolve_parameters(
    file: Option<&Path>,
    overrides: &ParameterOverrides,
) -> Result<ParameterSet, AppError> {
    let from_file = match file {
        Some(path) => crate::io::read_parameter_overrides(path)?,
        None => ParameterOverrides::default(),
    };
    let params = from_file
        .layered(*overrides)
        .apply(&ParameterSet::literature_defaults())?;
    info!(
        "resolved parameters (file: {}, cli overrides: {})",
        file.map(|p| p.display().to_string())
            .unwrap_or_else(|| "none".to_string()),
        !overrides.is_empty()
    );
    Ok(params)
}

/// Sweep every model over the same samples.
pub fn run_comparison(
    models: &[Model],
    params: &ParameterSet,
    op: &OperatingPoint,
    spec: &SweepSpec,
) -> Result<ComparisonRun, AppError> {
    if models.is_empty() {
        return Err(AppError::invalid_parameter("No model selected."));
    }
    let curves = sweep_models(models, params, op, spec)?;
    let series = curves
        .into_iter()
        .map(|curve| LabeledCurve {
            label: curve.model_name().to_string(),
            curve,
        })
        .collect();
    Ok(ComparisonRun { series })
}

/// One-way sensitivity plus the fitted elasticity of mean stress.
pub fn run_sensitivity(
    model: &Model,
    params: &ParameterSet,
    field: &str,
    plan: &SensitivityPlan,
    op: &OperatingPoint,
    spec: &SweepSpec,
) -> Result<SensitivityRun, AppError> {
    let result = run_one_way_sensitivity(model, params, field, plan, op, spec)?;
    let elasticity = elasticity(&result);
    Ok(SensitivityRun { result, elasticity })
}

/// Nested sweep: place each outer value on `outer_axis`, then sweep `spec`.
pub fn run_family(
    model: &Model,
    params: &ParameterSet,
    op: &OperatingPoint,
    outer_axis: SweepAxis,
    outer_values: &[f64],
    spec: &SweepSpec,
) -> Result<CurveFamily, AppError> {
    if outer_values.is_empty() {
        return Err(AppError::invalid_sweep("Curve family needs at least one outer value."));
    }
    if outer_axis == spec.axis {
        return Err(AppError::invalid_sweep(format!(
            "Outer and inner axis are both {}.",
            spec.axis.name()
        )));
    }

    let members = outer_values
        .iter()
        .map(|&v| {
            let (p, o) = apply_axis(outer_axis, v, params, op)?;
            let curve = sweep(model, &p, &o, spec)?;
            Ok(FamilyMember {
                outer_value: v,
                curve,
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    info!(
        "family of {} {} curves over {} levels of {}",
        members.len(),
        spec.axis.name(),
        outer_values.len(),
        outer_axis.name()
    );
    Ok(CurveFamily {
        outer_axis,
        members,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::{Cli, Command};
    use crate::error::ErrorKind;
    use crate::models::{ModelKind, evaluate_bingham_plastic, evaluate_power_law};
    use crate::report::family_changes;

    fn gravity_spec() -> SweepSpec {
        SweepSpec::new(SweepAxis::Gravity, 0.0, 9.8, 0.01)
    }

    #[test]
    fn cli_overrides_win_over_file() {
        let path = std::env::temp_dir().join(format!("wss_pipeline_{}.json", std::process::id()));
        std::fs::write(&path, r#"{"density": 1100.0, "pressure_drop": 12000.0}"#).unwrap();

        let cli = ParameterOverrides {
            density: Some(1200.0),
            ..Default::default()
        };
        let params = resolve_parameters(Some(&path), &cli).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(params.density(), 1200.0);
        assert_eq!(params.pressure_drop(), 12_000.0);
        assert_eq!(
            params.consistency_index(),
            ParameterSet::literature_defaults().consistency_index()
        );
    }

    #[test]
    fn invalid_override_is_rejected() {
        let cli = ParameterOverrides {
            vessel_radius: Some(-1.0),
            ..Default::default()
        };
        let err = resolve_parameters(None, &cli).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    }

    #[test]
    fn explicit_params_flag_is_preferred() {
        let flag = Path::new("given.json");
        assert_eq!(params_path(Some(flag)), Some(PathBuf::from("given.json")));
    }

    #[test]
    fn comparison_labels_by_model() {
        let models = [Model::PowerLaw, Model::Newtonian { normalization: 280.0 }];
        let run = run_comparison(
            &models,
            &ParameterSet::literature_defaults(),
            &OperatingPoint::default(),
            &gravity_spec(),
        )
        .unwrap();
        assert_eq!(run.series.len(), 2);
        assert_eq!(run.series[0].label, "Power Law (Shear Thinning)");
        assert_eq!(run.series[1].label, "Newtonian");
        assert_eq!(run.series[0].curve.len(), 980);
        assert!((run.series[1].curve.dependent_values()[0] - 0.8928571428571429).abs() < 1e-12);
    }

    #[test]
    fn comparison_requires_a_model() {
        let err = run_comparison(
            &[],
            &ParameterSet::literature_defaults(),
            &OperatingPoint::default(),
            &gravity_spec(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    }

    #[test]
    fn family_over_gravity_levels() {
        let params = ParameterSet::literature_defaults();
        let spec = SweepSpec::new(SweepAxis::Radius, 0.0005, 0.0035, 0.0005);
        let levels = [0.0, 9.8];
        let family = run_family(
            &Model::PowerLaw,
            &params,
            &OperatingPoint::default(),
            SweepAxis::Gravity,
            &levels,
            &spec,
        )
        .unwrap();

        assert_eq!(family.members.len(), 2);
        for (member, &g) in family.members.iter().zip(levels.iter()) {
            assert_eq!(member.outer_value, g);
            assert_eq!(member.curve.axis(), SweepAxis::Radius);
            let r = member.curve.independent_values()[0];
            let expected = evaluate_power_law(
                &params.with_field(crate::domain::ParameterField::VesselRadius, r).unwrap(),
                g,
            );
            assert!((member.curve.dependent_values()[0] - expected).abs() < 1e-15);
        }
        let labels: Vec<String> = family.labeled().into_iter().map(|l| l.label).collect();
        assert_eq!(labels, vec!["gravity = 0", "gravity = 9.8"]);
    }

    #[test]
    fn family_rejects_same_axis_and_empty_levels() {
        let params = ParameterSet::literature_defaults();
        let op = OperatingPoint::default();
        let spec = gravity_spec();
        let err = run_family(&Model::PowerLaw, &params, &op, SweepAxis::Gravity, &[1.0], &spec)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSweep);

        let spec = SweepSpec::new(SweepAxis::Radius, 0.001, 0.002, 0.0005);
        let err = run_family(&Model::PowerLaw, &params, &op, SweepAxis::Gravity, &[], &spec)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSweep);
    }

    #[test]
    fn family_runs_with_command_line_defaults() {
        let Command::Family(args) = Cli::parse_from(["wss", "family"]).command else {
            panic!("expected family");
        };
        let params = resolve_parameters(None, &args.params.overrides()).unwrap();
        let family = run_family(
            &Model::from_kind(args.model, args.normalization),
            &params,
            &args.operating.operating_point(),
            args.outer_axis,
            &args.outer_values,
            &args.axis.spec(),
        )
        .unwrap();

        assert_eq!(family.members.len(), 4);
        assert!(family.members.iter().all(|m| m.curve.axis() == SweepAxis::Radius));
        assert!(family.members.iter().all(|m| m.curve.len() == 20));
    }

    #[test]
    fn bingham_shear_rate_family_change_against_lowest_gravity() {
        let params = ParameterSet::literature_defaults();
        let op = OperatingPoint::default();
        let levels = [9.8e-6, 3.3, 6.6, 9.8];
        let spec = SweepSpec::new(SweepAxis::ShearRate, 0.1, 1000.0, 10.0);
        let model = Model::from_kind(ModelKind::Bingham, 280.0);
        let family = run_family(&model, &params, &op, SweepAxis::Gravity, &levels, &spec).unwrap();
        let changes = family_changes(&family);

        assert_eq!(changes.len(), 4);
        assert_eq!(changes[0].max_abs_change_pct, Some(0.0));
        assert_eq!(changes[0].mean_change_pct, Some(0.0));

        let reference = evaluate_bingham_plastic(&params, 0.1, levels[0]);
        for (c, &g) in changes.iter().zip(levels.iter()).skip(1) {
            let first = (evaluate_bingham_plastic(&params, 0.1, g) - reference) / reference * 100.0;
            let max = c.max_abs_change_pct.unwrap();
            assert!(max >= first.abs() * (1.0 - 1e-12), "g={g}: max={max} first={first}");
        }
        let maxima: Vec<f64> = changes.iter().filter_map(|c| c.max_abs_change_pct).collect();
        assert!(maxima.windows(2).all(|w| w[1] > w[0]), "{maxima:?}");
    }

    #[test]
    fn sensitivity_run_reports_elasticity() {
        let op = OperatingPoint {
            gravity: 0.0,
            ..OperatingPoint::default()
        };
        let run = run_sensitivity(
            &Model::PowerLaw,
            &ParameterSet::literature_defaults(),
            "consistency_index",
            &SensitivityPlan::default(),
            &op,
            &SweepSpec::new(SweepAxis::ShearRate, 10.0, 20.0, 5.0),
        )
        .unwrap();
        assert_eq!(run.result.curves.len(), 5);
        assert!((run.elasticity.unwrap() - 1.0).abs() < 1e-9);
    }
}
