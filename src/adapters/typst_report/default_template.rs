//! Default Typst report template.
//!
//! Built-in Typst report markup with `{{PLACEHOLDER}}` substitution.

const TEMPLATE: &str = r#"#set page(paper: "us-letter", margin: 2cm)
#set text(font: "Liberation Sans", size: 11pt)

= {{TITLE}}

Prepared{{PREPARED_FOR}} on {{PREPARED_ON}}.

== Financial Information

{{INPUTS_TABLE}}

== Add-Backs

{{ADDBACKS_TABLE}}

== Results

{{RESULTS_TABLE}}

== Earnings Breakdown

{{BREAKDOWN_CHART}}

== Valuation Range

{{VALUATION_TABLE}}
"#;

pub fn template() -> &'static str {
    TEMPLATE
}
