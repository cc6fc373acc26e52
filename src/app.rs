//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initializes logging
//! - parses CLI arguments
//! - resolves the parameter set
//! - runs sweeps / sensitivity studies / curve families
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;
use log::debug;

use crate::cli::{
    Command, FamilyArgs, OutputArgs, ParamArgs, ParamsArgs, PlotArgs, SensitivityArgs, SweepArgs,
};
use crate::domain::{LabeledCurve, OperatingPoint, ParameterSet, SensitivityPlan, SweepSpec};
use crate::error::AppError;
use crate::models::Model;

pub mod pipeline;

/// Entry point for the `wss` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Sweep(args) => handle_sweep(args),
        Command::Sensitivity(args) => handle_sensitivity(args),
        Command::Family(args) => handle_family(args),
        Command::Plot(args) => handle_plot(args),
        Command::Params(args) => handle_params(args),
    }
}

fn handle_sweep(args: SweepArgs) -> Result<(), AppError> {
    let params = resolve(&args.params)?;
    let op = args.operating.operating_point();
    let spec = args.axis.spec();
    let models: Vec<Model> = args
        .models
        .iter()
        .map(|&k| Model::from_kind(k, args.normalization))
        .collect();

    let run = pipeline::run_comparison(&models, &params, &op, &spec)?;

    println!(
        "{}",
        crate::report::format_sweep_summary("model comparison", &params, &op, &spec, &run.series)
    );
    emit(&args.output, &params, &op, &spec, run.series)
}

fn handle_sensitivity(args: SensitivityArgs) -> Result<(), AppError> {
    let params = resolve(&args.params)?;
    let op = args.operating.operating_point();
    let spec = args.axis.spec();
    let model = Model::from_kind(args.model, args.normalization);
    let plan = if args.layered {
        SensitivityPlan::layered()
    } else {
        SensitivityPlan {
            multipliers: args.multipliers.clone(),
            baseline: args.baseline,
        }
    };

    let run = pipeline::run_sensitivity(&model, &params, &args.field, &plan, &op, &spec)?;
    let series = run.result.labeled();

    let title = format!("{} sensitivity", model.display_name());
    println!(
        "{}",
        crate::report::format_sweep_summary(&title, &params, &op, &spec, &series)
    );
    println!(
        "{}",
        crate::report::format_sensitivity_summary(&run.result, run.elasticity)
    );
    emit(&args.output, &params, &op, &spec, series)
}

fn handle_family(args: FamilyArgs) -> Result<(), AppError> {
    let params = resolve(&args.params)?;
    let op = args.operating.operating_point();
    let spec = args.axis.spec();
    let model = Model::from_kind(args.model, args.normalization);

    let family = pipeline::run_family(
        &model,
        &params,
        &op,
        args.outer_axis,
        &args.outer_values,
        &spec,
    )?;
    let series = family.labeled();

    let title = format!(
        "{} family over {}",
        model.display_name(),
        args.outer_axis.name()
    );
    println!(
        "{}",
        crate::report::format_sweep_summary(&title, &params, &op, &spec, &series)
    );
    println!("{}", crate::report::format_family_summary(&family));
    emit(&args.output, &params, &op, &spec, series)
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let file = crate::io::read_curve_json(&args.curves)?;
    debug!(
        "loaded {} series generated by {} at {}",
        file.series.len(),
        file.tool,
        file.generated_at
    );

    let plot =
        crate::plot::render_ascii_plot(&file.series, args.width, args.height, args.reference);
    println!("{plot}");
    Ok(())
}

fn handle_params(args: ParamsArgs) -> Result<(), AppError> {
    let params = resolve(&args.params)?;
    println!("{}", crate::report::format_parameters(&params));
    if let Some(path) = &args.write {
        crate::io::write_parameter_file(path, &params)?;
    }
    Ok(())
}

fn resolve(args: &ParamArgs) -> Result<ParameterSet, AppError> {
    let file = pipeline::params_path(args.params.as_deref());
    pipeline::resolve_parameters(file.as_deref(), &args.overrides())
}

/// Print the table and plot, then write any requested exports.
fn emit(
    output: &OutputArgs,
    params: &ParameterSet,
    op: &OperatingPoint,
    spec: &SweepSpec,
    series: Vec<LabeledCurve>,
) -> Result<(), AppError> {
    if output.rows > 0 {
        println!("{}", crate::report::format_curve_table(&series, output.rows));
    }

    if output.plot {
        let plot = crate::plot::render_ascii_plot(
            &series,
            output.width,
            output.height,
            output.reference,
        );
        println!("{plot}");
    }

    if let Some(path) = &output.export {
        crate::io::write_curves_csv(path, &series)?;
    }
    if let Some(path) = &output.export_json {
        let file = crate::io::build_curve_file(params, op, spec, series);
        crate::io::write_curve_json(path, &file)?;
    }

    Ok(())
}
