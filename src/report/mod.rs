//! Reporting utilities: per-curve summaries and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::{CurveFamily, LabeledCurve};

/// Headline numbers for one curve.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSummary {
    pub label: String,
    pub samples: usize,
    pub x_first: f64,
    pub x_last: f64,
    pub tau_first: f64,
    pub tau_last: f64,
    pub tau_min: f64,
    pub tau_max: f64,
    pub tau_mean: f64,
}

/// Summarize each curve; empty curves are skipped.
pub fn summarize(series: &[LabeledCurve]) -> Vec<CurveSummary> {
    series
        .iter()
        .filter_map(|s| {
            let c = &s.curve;
            let (tau_min, tau_max) = c.stress_range()?;
            let xs = c.independent_values();
            let ys = c.dependent_values();
            Some(CurveSummary {
                label: s.label.clone(),
                samples: c.len(),
                x_first: xs[0],
                x_last: xs[xs.len() - 1],
                tau_first: ys[0],
                tau_last: ys[ys.len() - 1],
                tau_min,
                tau_max,
                tau_mean: c.mean_stress()?,
            })
        })
        .collect()
}

/// Relative change (%) of `curve` against `baseline`, sample by sample.
///
/// Samples where the baseline is zero are reported as `None`.
pub fn relative_change(curve: &[f64], baseline: &[f64]) -> Vec<Option<f64>> {
    curve
        .iter()
        .zip(baseline.iter())
        .map(|(&y, &b)| if b != 0.0 { Some((y - b) / b * 100.0) } else { None })
        .collect()
}

/// Percent change of one family member against the first member.
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyChange {
    pub label: String,
    pub outer_value: f64,
    /// Largest `|Δτ|` in percent, or `None` if no sample had a non-zero reference.
    pub max_abs_change_pct: Option<f64>,
    pub mean_change_pct: Option<f64>,
}

/// Compare every member of `family` with `members[0]`, sample by sample.
pub fn family_changes(family: &CurveFamily) -> Vec<FamilyChange> {
    let Some(reference) = family.members.first() else {
        return Vec::new();
    };
    let labels = family.labeled();

    family
        .members
        .iter()
        .zip(labels)
        .map(|(m, l)| {
            let changes: Vec<f64> = relative_change(
                m.curve.dependent_values(),
                reference.curve.dependent_values(),
            )
            .into_iter()
            .flatten()
            .collect();
            let max_abs_change_pct = changes.iter().map(|c| c.abs()).reduce(f64::max);
            let mean_change_pct = if changes.is_empty() {
                None
            } else {
                Some(changes.iter().sum::<f64>() / changes.len() as f64)
            };
            FamilyChange {
                label: l.label,
                outer_value: m.outer_value,
                max_abs_change_pct,
                mean_change_pct,
            }
        })
        .collect()
}
