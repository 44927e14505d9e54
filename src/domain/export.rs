//! Flat `(label, formatted value)` rows for PDF/CSV export.
//!
//! Currency renders as `$#,##0` and percentages as `#0%`, both rounded half
//! up at this point and nowhere earlier.

use serde::Serialize;

use super::catalog::label_for;
use super::engine::{ValuationRequest, ValuationResult};
use super::valuation::excel_round;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub label: String,
    pub value: String,
}

impl ExportRow {
    fn new(label: impl Into<String>, value: String) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// `1234567.4` -> `$1,234,567`, `-1200` -> `-$1,200`.
pub fn format_currency(amount: f64) -> String {
    let rounded = excel_round(amount);
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(rounded.abs()))
}

/// `25.0` -> `25%`. The input is already a percentage.
pub fn format_percent(pct: f64) -> String {
    format!("{:.0}%", excel_round(pct))
}

/// `1.5` -> `1.5x`, `2.0` -> `2.0x`.
pub fn format_multiple(multiple: f64) -> String {
    if multiple.fract() == 0.0 {
        format!("{multiple:.1}x")
    } else {
        format!("{multiple}x")
    }
}

fn group_thousands(whole: f64) -> String {
    let digits = format!("{whole:.0}");
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Every input, add-back and derived value, in report order.
///
/// Add-back labels come from the request's add-back catalog.
pub fn export_rows(request: &ValuationRequest, result: &ValuationResult) -> Vec<ExportRow> {
    let metric = result.mode.metric_label();
    let mut rows = Vec::new();

    for field in result.mode.fields() {
        rows.push(ExportRow::new(
            field.label,
            format_currency(request.inputs.get(&field.key)),
        ));
    }

    for (key, amount) in request.addbacks.iter() {
        rows.push(ExportRow::new(
            label_for(&request.addback_catalog, key),
            format_currency(amount),
        ));
    }

    rows.push(ExportRow::new(
        "Total Operating Expenses",
        format_currency(result.total_expenses),
    ));
    rows.push(ExportRow::new(metric, format_currency(result.net_metric)));
    rows.push(ExportRow::new(
        format!("{metric} Margin"),
        format_percent(result.margin_pct),
    ));
    rows.push(ExportRow::new(
        "Total Owner Benefit",
        format_currency(result.total_owner_benefit),
    ));
    rows.push(ExportRow::new(
        "Valuation Base",
        format_currency(result.valuation_base),
    ));

    let valuation = result.valuation.rounded();
    let multiples = result.multiples;
    for (tier, multiple, amount) in [
        ("Low", multiples.low, valuation.low),
        ("Median", multiples.median, valuation.median),
        ("High", multiples.high, valuation.high),
    ] {
        rows.push(ExportRow::new(
            format!("{tier} Valuation ({})", format_multiple(multiple)),
            format_currency(amount),
        ));
    }

    rows
}
