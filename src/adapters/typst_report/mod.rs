//! Typst-based PDF report generation.
//!
//! Orchestrates placeholder resolution: takes a Typst template (either the
//! built-in default or a custom file via `template_path`), resolves all
//! `{{PLACEHOLDER}}` markers by calling helpers from `chart_svg` and `tables`,
//! and writes the final `.typ` file.

pub mod chart_svg;
pub mod default_template;
pub mod tables;

use std::fs;
use std::path::Path;

use crate::domain::breakdown::Breakdown;
use crate::domain::error::ValuatorError;
use crate::ports::report_port::{ReportContext, ReportPort};

/// Writes a Typst report from the default or a caller-supplied template.
#[derive(Debug, Default)]
pub struct TypstReportAdapter {
    template: Option<String>,
}

impl TypstReportAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(template: String) -> Self {
        Self {
            template: Some(template),
        }
    }

    pub fn from_template_path<P: AsRef<Path>>(path: P) -> Result<Self, ValuatorError> {
        Ok(Self::with_template(fs::read_to_string(path)?))
    }

    fn template(&self) -> &str {
        self.template
            .as_deref()
            .unwrap_or(default_template::template())
    }
}

impl ReportPort for TypstReportAdapter {
    fn write(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), ValuatorError> {
        let content = resolve(self.template(), ctx);
        fs::write(output_path, content).map_err(|e| ValuatorError::Export {
            path: output_path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// Resolve all `{{PLACEHOLDER}}`s in the given template string and return
/// the final Typst markup ready to be written to a `.typ` file.
pub fn resolve(template: &str, ctx: &ReportContext) -> String {
    let mut output = template.to_string();

    output = output.replace("{{TITLE}}", ctx.result.mode.title());
    output = output.replace(
        "{{PREPARED_FOR}}",
        &tables::escape_typst(&ctx.session.heading_suffix()),
    );
    output = output.replace(
        "{{PREPARED_ON}}",
        &ctx.prepared_on.format("%B %-d, %Y").to_string(),
    );

    output = output.replace("{{INPUTS_TABLE}}", &tables::render_inputs_table(ctx.request));
    output = output.replace(
        "{{ADDBACKS_TABLE}}",
        &tables::render_addbacks_table(ctx.request),
    );
    output = output.replace("{{RESULTS_TABLE}}", &tables::render_results_table(ctx.result));
    output = output.replace("{{BREAKDOWN_CHART}}", &render_breakdown(ctx));
    output = output.replace(
        "{{VALUATION_TABLE}}",
        &tables::render_valuation_table(ctx.result),
    );

    output
}

fn render_breakdown(ctx: &ReportContext) -> String {
    let breakdown = Breakdown::from_result(ctx.result);
    let svg = chart_svg::generate_donut_svg(&breakdown);
    if svg.is_empty() {
        let negative = if breakdown.earnings.value < 0.0 {
            Some(&breakdown.earnings.label)
        } else if breakdown.expenses.value < 0.0 {
            Some(&breakdown.expenses.label)
        } else {
            None
        };
        return match negative {
            Some(label) => format!("_{label} is negative; no breakdown chart is shown._"),
            None => "_Enter financial values to generate the breakdown chart._".to_string(),
        };
    }

    let mut out = format!(
        "#image.decode(\n\"{}\",\n  width: 40%,\n)\n\n",
        svg.replace('\\', "\\\\").replace('"', "\\\"")
    );
    for (color, label) in chart_svg::legend(&breakdown) {
        out.push_str(&format!(
            "#box(width: 8pt, height: 8pt, fill: rgb(\"{}\")) {} \\\n",
            color,
            tables::escape_typst(&label)
        ));
    }
    out
}
