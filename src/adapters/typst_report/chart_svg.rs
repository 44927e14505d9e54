//! SVG donut chart of the expenses/earnings breakdown.

use std::f64::consts::PI;

use crate::domain::breakdown::Breakdown;

const SIZE: f64 = 240.0;
const RADIUS: f64 = 80.0;
const STROKE: f64 = 36.0;
const EXPENSES_COLOR: &str = "#4C72B0";
const EARNINGS_COLOR: &str = "#55A868";

/// Render the breakdown as a standalone SVG document.
///
/// Returns an empty string when the breakdown cannot be drawn as a
/// part-to-whole chart.
pub fn generate_donut_svg(breakdown: &Breakdown) -> String {
    let Some((_, earnings_fraction)) = breakdown.fractions() else {
        return String::new();
    };

    let center = SIZE / 2.0;
    let circumference = 2.0 * PI * RADIUS;
    let earnings_arc = earnings_fraction * circumference;

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{SIZE:.0}" height="{SIZE:.0}" viewBox="0 0 {SIZE:.0} {SIZE:.0}">"#
    ));
    // Full ring in the expenses color; the earnings arc is drawn over it
    // starting at 12 o'clock.
    svg.push_str(&format!(
        r#"<circle cx="{center:.1}" cy="{center:.1}" r="{RADIUS:.1}" fill="none" stroke="{EXPENSES_COLOR}" stroke-width="{STROKE:.1}"/>"#
    ));
    if earnings_arc > 0.0 {
        svg.push_str(&format!(
            r#"<circle cx="{center:.1}" cy="{center:.1}" r="{RADIUS:.1}" fill="none" stroke="{EARNINGS_COLOR}" stroke-width="{STROKE:.1}" stroke-dasharray="{earnings_arc:.2} {circumference:.2}" transform="rotate(-90 {center:.1} {center:.1})"/>"#
        ));
    }
    svg.push_str(&format!(
        r#"<text x="{center:.1}" y="{center:.1}" text-anchor="middle" dominant-baseline="middle" font-size="28" font-family="sans-serif">{}</text>"#,
        xml_escape(&breakdown.center_label)
    ));
    svg.push_str("</svg>");
    svg
}

/// Legend entries `(color, label)` matching the chart colors.
pub fn legend(breakdown: &Breakdown) -> [(&'static str, String); 2] {
    [
        (EXPENSES_COLOR, breakdown.expenses.label.clone()),
        (EARNINGS_COLOR, breakdown.earnings.label.clone()),
    ]
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
