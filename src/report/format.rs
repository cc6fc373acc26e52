//! Formatted terminal output.
//!
//! We keep formatting code in one place so the engine stays free of
//! presentation concerns and output changes are localized.

use crate::domain::{
    CurveFamily, LabeledCurve, OperatingPoint, ParameterField, ParameterSet, SensitivityResult,
    SweepSpec,
};
use crate::report::{family_changes, relative_change, summarize};

/// Table of every parameter with its unit.
pub fn format_parameters(params: &ParameterSet) -> String {
    let mut out = String::new();
    out.push_str("Parameters:\n");
    for field in ParameterField::ALL {
        out.push_str(&format!(
            "  {:<18} {:>14} {}\n",
            field.name(),
            fmt_num(params.get(field)),
            field.unit()
        ));
    }
    out
}

/// Run header plus per-curve min/max/mean.
pub fn format_sweep_summary(
    title: &str,
    params: &ParameterSet,
    op: &OperatingPoint,
    spec: &SweepSpec,
    series: &[LabeledCurve],
) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== wss - {title} ===\n"));
    out.push_str(&format!(
        "Sweep: {} in [{}, {}) step {}\n",
        spec.axis.name(),
        fmt_num(spec.start),
        fmt_num(spec.stop),
        fmt_num(spec.step)
    ));
    out.push_str(&format!(
        "Operating point: g={} m/s^2 | shear_rate={} 1/s\n",
        fmt_num(op.gravity),
        fmt_num(op.shear_rate)
    ));
    out.push_str(&format_parameters(params));

    out.push_str("\nCurves:\n");
    out.push_str(
        format!(
            "{:<32} {:>7} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
            "series",
            "n",
            "x(first)",
            "x(last)",
            "tau(first)",
            "tau(last)",
            "tau(min)",
            "tau(max)",
            "tau(mean)"
        )
        .trim_end(),
    );
    out.push('\n');
    for s in summarize(series) {
        out.push_str(
            format!(
                "{:<32} {:>7} {:>12} {:>12} {:>12.6} {:>12.6} {:>12.6} {:>12.6} {:>12.6}",
                truncate(&s.label, 32),
                s.samples,
                fmt_num(s.x_first),
                fmt_num(s.x_last),
                s.tau_first,
                s.tau_last,
                s.tau_min,
                s.tau_max,
                s.tau_mean
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Per-multiplier mean stress and worst-case deviation from the baseline.
pub fn format_sensitivity_summary(result: &SensitivityResult, elasticity: Option<f64>) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\nOne-way sensitivity on {} ({:?} baseline):\n",
        result.field, result.baseline_mode
    ));
    out.push_str(
        format!(
            "{:>10} {:>14} {:>14}",
            "multiplier", "mean tau (Pa)", "max |dtau| %"
        )
        .trim_end(),
    );
    out.push('\n');

    let baseline = result.baseline_curve();
    let mut rows: Vec<(f64, &crate::domain::ShearStressCurve)> = Vec::new();
    if let Some(base) = &result.baseline {
        rows.push((1.0, base));
    }
    rows.extend(result.curves.iter().map(|c| (c.multiplier, &c.curve)));

    for (k, curve) in rows {
        let mean = curve.mean_stress().unwrap_or(f64::NAN);
        let max_change = baseline
            .map(|b| {
                relative_change(curve.dependent_values(), b.dependent_values())
                    .into_iter()
                    .flatten()
                    .fold(0.0_f64, |acc, v| acc.max(v.abs()))
            })
            .map(|v| format!("{v:.3}"))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(format!("{k:>10} {mean:>14.6} {max_change:>14}").trim_end());
        out.push('\n');
    }

    match elasticity {
        Some(e) => out.push_str(&format!(
            "Elasticity d ln(tau) / d ln({}): {e:.4}\n",
            result.field
        )),
        None => out.push_str("Elasticity: n/a\n"),
    }
    out
}

/// Percent change of each family member against the first one.
pub fn format_family_summary(family: &CurveFamily) -> String {
    let mut out = String::new();
    let Some(first) = family.members.first() else {
        return out;
    };
    out.push_str(&format!(
        "\nChange vs {} = {}:\n",
        family.outer_axis.name(),
        fmt_num(first.outer_value)
    ));
    out.push_str(
        format!("{:>14} {:>14} {:>14}", family.outer_axis.name(), "max |dtau| %", "mean dtau %")
            .trim_end(),
    );
    out.push('\n');

    let pct = |v: Option<f64>| v.map(|v| format!("{v:.3}")).unwrap_or_else(|| "-".to_string());
    for c in family_changes(family) {
        out.push_str(
            format!(
                "{:>14} {:>14} {:>14}",
                fmt_num(c.outer_value),
                pct(c.max_abs_change_pct),
                pct(c.mean_change_pct)
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

/// Tabulate curves side by side on the first series' x-grid.
///
/// At most `max_rows` evenly spaced rows are printed (the last sample is
/// always included). Cells are left blank where a series has no sample at
/// the same x.
pub fn format_curve_table(series: &[LabeledCurve], max_rows: usize) -> String {
    let mut out = String::new();
    let Some(first) = series.first() else {
        return out;
    };
    let xs = first.curve.independent_values();
    if xs.is_empty() {
        return out;
    }

    let mut header = format!("{:>14}", first.curve.axis().name());
    for s in series {
        header.push_str(&format!(" {:>18}", truncate(&s.label, 18)));
    }
    out.push_str(header.trim_end());
    out.push('\n');

    for i in row_indices(xs.len(), max_rows) {
        let x = xs[i];
        let mut line = format!("{:>14}", fmt_num(x));
        for s in series {
            let cell = match (
                s.curve.independent_values().get(i),
                s.curve.dependent_values().get(i),
            ) {
                (Some(&sx), Some(&y)) if sx == x => format!("{y:.6}"),
                _ => String::new(),
            };
            line.push_str(&format!(" {cell:>18}"));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn row_indices(len: usize, max_rows: usize) -> Vec<usize> {
    if len == 0 || max_rows == 0 {
        return Vec::new();
    }
    if len <= max_rows {
        return (0..len).collect();
    }
    if max_rows == 1 {
        return vec![0];
    }
    let mut out: Vec<usize> = (0..max_rows)
        .map(|i| ((i as f64) * (len - 1) as f64 / (max_rows - 1) as f64).round() as usize)
        .collect();
    out.dedup();
    out
}

fn fmt_num(v: f64) -> String {
    if v != 0.0 && (v.abs() < 1e-3 || v.abs() >= 1e6) {
        format!("{v:.4e}")
    } else {
        format!("{}", (v * 1e6).round() / 1e6)
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
