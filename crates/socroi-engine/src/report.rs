//! Text and JSON rendering of an evaluation.
//!
//! Formatting happens only here, after every rounding point and cap has been
//! applied by the engine.

use std::fmt::Write;

use serde::Serialize;
use socroi_core::{FieldName, InputRecord};
use socroi_store::ViewMode;

use crate::Evaluation;

/// Serialized form of a report. Simple view omits inputs and breakdown.
#[derive(Serialize)]
struct Report<'a> {
    view_mode: ViewMode,
    results: &'a socroi_core::ResultRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    inputs: Option<&'a InputRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    breakdown: Option<&'a socroi_core::ValueBreakdown>,
}

pub fn render_json(
    record: &InputRecord,
    evaluation: &Evaluation,
    view_mode: ViewMode,
) -> serde_json::Result<String> {
    let advanced = view_mode == ViewMode::Advanced;
    let report = Report {
        view_mode,
        results: &evaluation.results,
        inputs: advanced.then_some(record),
        breakdown: advanced.then_some(&evaluation.breakdown),
    };
    serde_json::to_string_pretty(&report)
}

pub fn render_text(record: &InputRecord, evaluation: &Evaluation, view_mode: ViewMode) -> String {
    let r = &evaluation.results;
    let mut out = String::new();

    let summary = [
        ("Human SOC (annual)", format_currency(r.human_soc_total_cost)),
        ("Autonomous SOC (annual)", format_currency(r.autonomous_soc_total_cost)),
        ("Residual human cost", format_currency(r.adjusted_annual_soc_cost)),
        ("Platform savings", format_currency(r.platform_savings)),
        ("Annual savings", format_currency(r.annual_savings)),
        ("ROI", format_percent(r.roi_percentage)),
        ("Payback period", format_months(r.payback_period)),
        ("Efficiency improvement", format_percent(r.efficiency_improvement)),
        ("Response improvement", format_percent(r.incident_response_improvement)),
    ];

    let _ = writeln!(out, "SOC cost comparison");
    for (label, value) in summary {
        let _ = writeln!(out, "  {label:<26}{value:>16}");
    }

    if view_mode == ViewMode::Simple {
        return out;
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Inputs");
    for field in FieldName::ALL {
        let marker = if field.is_base() { " " } else { "*" };
        let value = match record.get(field) {
            socroi_core::FieldValue::Number(n) => format_number(n),
            socroi_core::FieldValue::Flag(b) => b.to_string(),
        };
        let _ = writeln!(out, " {marker}{:<32}{:>16}", field.as_str(), value);
    }
    let _ = writeln!(out, "  (* derived)");

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Value breakdown (total {})",
        format_currency(evaluation.breakdown.total_value)
    );
    for entry in &evaluation.breakdown.entries {
        let _ = writeln!(
            out,
            "  {:<28}{:>14}{:>8}",
            entry.name,
            format_currency(entry.value),
            format_percent(entry.percentage)
        );
    }

    out
}

/// Whole-dollar amount with thousands separators, e.g. `$1,234,567`.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(rounded.abs() as u64))
}

/// One decimal place, e.g. `59.0%`.
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

pub fn format_months(months: f64) -> String {
    if months == 0.0 {
        "immediate".to_string()
    } else {
        format!("{months:.1} months")
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        let sign = if n < 0.0 { "-" } else { "" };
        format!("{sign}{}", group_thousands(n.abs() as u64))
    } else {
        format!("{n:.2}")
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
