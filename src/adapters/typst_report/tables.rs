//! Table formatting for reports.
//!
//! Provides functions to generate Typst markup for:
//! - Financial inputs and owner add-backs
//! - Derived results (expenses, metric, margin, owner benefit)
//! - Valuation range at each multiple

use crate::domain::catalog::category_for;
use crate::domain::engine::{ValuationRequest, ValuationResult};
use crate::domain::export::{format_currency, format_multiple, format_percent};

/// Escape characters that Typst markup would otherwise interpret.
pub fn escape_typst(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if matches!(
            ch,
            '\\' | '$' | '#' | '*' | '_' | '[' | ']' | '@' | '<' | '>' | '`' | '~'
        ) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

fn two_column_table(header: (&str, &str), rows: &[(String, String)]) -> String {
    let mut out = String::from("#table(\n  columns: 2,\n  align: (left, right),\n");
    out.push_str(&format!("  [*{}*], [*{}*],\n", header.0, header.1));
    for (label, value) in rows {
        out.push_str(&format!(
            "  [{}], [{}],\n",
            escape_typst(label),
            escape_typst(value)
        ));
    }
    out.push_str(")\n");
    out
}

pub fn render_inputs_table(request: &ValuationRequest) -> String {
    let rows: Vec<(String, String)> = request
        .mode
        .fields()
        .into_iter()
        .map(|field| {
            let amount = request.inputs.get(&field.key);
            (field.label, format_currency(amount))
        })
        .collect();
    two_column_table(("Field", "Amount"), &rows)
}

pub fn render_addbacks_table(request: &ValuationRequest) -> String {
    if request.addbacks.is_empty() {
        return "_No add-backs entered._\n".to_string();
    }
    let mut out = String::from("#table(\n  columns: 3,\n  align: (left, left, right),\n");
    out.push_str("  [*Add-Back*], [*Description*], [*Amount*],\n");
    for (key, amount) in request.addbacks.iter() {
        let category = category_for(&request.addback_catalog, key);
        out.push_str(&format!(
            "  [{}], [{}], [{}],\n",
            escape_typst(&category.label),
            escape_typst(&category.description),
            escape_typst(&format_currency(amount))
        ));
    }
    out.push_str(")\n");
    out
}

pub fn render_results_table(result: &ValuationResult) -> String {
    let metric = result.mode.metric_label();
    let rows = vec![
        (
            "Total Operating Expenses".to_string(),
            format_currency(result.total_expenses),
        ),
        (metric.to_string(), format_currency(result.net_metric)),
        (format!("{metric} Margin"), format_percent(result.margin_pct)),
        (
            "Total Owner Benefit".to_string(),
            format_currency(result.total_owner_benefit),
        ),
    ];
    two_column_table(("Metric", "Value"), &rows)
}

pub fn render_valuation_table(result: &ValuationResult) -> String {
    let range = result.valuation.rounded();
    let m = result.multiples;

    let mut out = format!(
        "Valuation base ({}): {}\n\n",
        escape_typst(result.base.name()),
        escape_typst(&format_currency(result.valuation_base))
    );
    out.push_str("#table(\n  columns: 3,\n  align: (left, right, right),\n");
    out.push_str("  [*Estimate*], [*Multiple*], [*Valuation*],\n");
    for (tier, multiple, amount) in [
        ("Low", m.low, range.low),
        ("Median", m.median, range.median),
        ("High", m.high, range.high),
    ] {
        out.push_str(&format!(
            "  [{}], [{}], [{}],\n",
            tier,
            format_multiple(multiple),
            escape_typst(&format_currency(amount))
        ));
    }
    out.push_str(")\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::earnings::Mode;
    use crate::domain::engine::evaluate;
    use crate::domain::sheet::{FinancialInputs, OwnerAddBacks};
    use crate::domain::valuation::ValuationBase;

    fn sample_request(addbacks: OwnerAddBacks) -> ValuationRequest {
        let inputs = FinancialInputs::from_raw([
            ("income", 300_000.0),
            ("purchases", 90_000.0),
            ("labor", 100_000.0),
            ("operating_expenses", 50_000.0),
        ]);
        ValuationRequest::new(Mode::Sde, inputs, addbacks, ValuationBase::MetricPlusAddBacks)
    }

    #[test]
    fn escape_dollar_and_markup() {
        assert_eq!(escape_typst("$1,200"), "\\$1,200");
        assert_eq!(escape_typst("a_b #c"), "a\\_b \\#c");
        assert_eq!(escape_typst("Owner's Salary"), "Owner's Salary");
    }

    #[test]
    fn inputs_table_lists_mode_fields() {
        let output = render_inputs_table(&sample_request(OwnerAddBacks::new()));
        assert!(output.contains("#table("));
        assert!(output.contains("[Income], [\\$300,000]"));
        assert!(output.contains("[Operating Expenses], [\\$50,000]"));
    }

    #[test]
    fn addbacks_table_empty() {
        let output = render_addbacks_table(&sample_request(OwnerAddBacks::new()));
        assert!(output.contains("No add-backs"));
    }

    #[test]
    fn addbacks_table_uses_catalog_labels() {
        let addbacks = OwnerAddBacks::from_raw([("owner_salary", "40,000"), ("boat_lease", "(100)")]);
        let output = render_addbacks_table(&sample_request(addbacks));
        assert!(output.contains(
            "[Owner's Salary], [Compensation paid to the working owner.], [\\$40,000]"
        ));
        assert!(output.contains("[Boat Lease], [], [-\\$100]"));
    }

    #[test]
    fn addbacks_table_uses_configured_categories() {
        use crate::domain::catalog::{default_addbacks, merge_catalog, parse_category};

        let addbacks = OwnerAddBacks::from_raw([("boat_lease", "2,400")]);
        let catalog = merge_catalog(
            default_addbacks(),
            vec![parse_category(
                "boat_lease",
                "Boat Lease | Owner's boat, run through the business",
            )],
        );
        let request = sample_request(addbacks).with_addback_catalog(catalog);
        let output = render_addbacks_table(&request);
        assert!(output.contains(
            "[Boat Lease], [Owner's boat, run through the business], [\\$2,400]"
        ));
    }

    #[test]
    fn results_table_contents() {
        let result = evaluate(&sample_request(OwnerAddBacks::new()));
        let output = render_results_table(&result);
        assert!(output.contains("[SDE], [\\$60,000]"));
        assert!(output.contains("[SDE Margin], [20%]"));
    }

    #[test]
    fn valuation_table_contents() {
        let addbacks = OwnerAddBacks::from_raw([("owner_salary", "40,000")]);
        let result = evaluate(&sample_request(addbacks));
        let output = render_valuation_table(&result);
        assert!(output.contains("metric\\_plus\\_addbacks"));
        assert!(output.contains("\\$100,000"));
        assert!(output.contains("[Low], [1.5x], [\\$150,000]"));
        assert!(output.contains("[Median], [2.0x], [\\$200,000]"));
        assert!(output.contains("[High], [2.5x], [\\$250,000]"));
    }
}
