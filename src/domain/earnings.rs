//! Core earnings metric: revenue minus costs, and margin on revenue.

use std::fmt;
use std::str::FromStr;

use super::catalog::{self, Category};
use super::normalize::normalize_number;
use super::sheet::FinancialInputs;

/// Which earnings metric to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Ebitda,
    Sde,
}

impl Mode {
    pub fn shape(self) -> EarningsShape {
        match self {
            Mode::Ebitda => EarningsShape::new(
                "net_sales",
                &["cogs", "employee_cost", "other_operating_cost"],
            ),
            Mode::Sde => {
                EarningsShape::new("income", &["purchases", "labor", "operating_expenses"])
            }
        }
    }

    pub fn fields(self) -> Vec<Category> {
        match self {
            Mode::Ebitda => catalog::ebitda_fields(),
            Mode::Sde => catalog::sde_fields(),
        }
    }

    /// Short metric name used in labels ("EBITDA", "SDE").
    pub fn metric_label(self) -> &'static str {
        match self {
            Mode::Ebitda => "EBITDA",
            Mode::Sde => "SDE",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Mode::Ebitda => "EBITDA Valuation Report",
            Mode::Sde => "Seller's Discretionary Earnings Valuation Report",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Ebitda => write!(f, "ebitda"),
            Mode::Sde => write!(f, "sde"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ebitda" => Ok(Mode::Ebitda),
            "sde" => Ok(Mode::Sde),
            other => Err(format!("unknown mode '{other}', expected ebitda or sde")),
        }
    }
}

/// The revenue field and the cost fields subtracted from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EarningsShape {
    pub revenue: String,
    pub costs: Vec<String>,
}

impl EarningsShape {
    pub fn new(revenue: &str, costs: &[&str]) -> Self {
        Self {
            revenue: revenue.to_string(),
            costs: costs.iter().map(|c| c.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarningsBreakdown {
    pub revenue: f64,
    pub total_costs: f64,
    pub net_metric: f64,
    /// Percentage of revenue (25.0 means 25%).
    pub margin_pct: f64,
}

/// Compute `revenue - sum(costs)` and the margin on revenue.
///
/// Margin is 0 when revenue is zero or negative. Any value that overflows
/// to infinity is reported as 0.
pub fn compute_earnings(inputs: &FinancialInputs, shape: &EarningsShape) -> EarningsBreakdown {
    let revenue = inputs.get(&shape.revenue);
    let total_costs = normalize_number(shape.costs.iter().map(|c| inputs.get(c)).sum());
    let net_metric = normalize_number(revenue - total_costs);
    let margin_pct = if revenue > 0.0 {
        normalize_number(net_metric / revenue * 100.0)
    } else {
        0.0
    };

    EarningsBreakdown {
        revenue,
        total_costs,
        net_metric,
        margin_pct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn inputs(fields: &[(&str, f64)]) -> FinancialInputs {
        FinancialInputs::from_raw(fields.iter().map(|&(k, v)| (k, v)))
    }

    #[test]
    fn ebitda_scenario() {
        let sheet = inputs(&[
            ("net_sales", 200_000.0),
            ("cogs", 60_000.0),
            ("employee_cost", 70_000.0),
            ("other_operating_cost", 20_000.0),
        ]);
        let e = compute_earnings(&sheet, &Mode::Ebitda.shape());
        assert_eq!(e.total_costs, 150_000.0);
        assert_eq!(e.net_metric, 50_000.0);
        assert_relative_eq!(e.margin_pct, 25.0);
    }

    #[test]
    fn sde_scenario() {
        let sheet = inputs(&[
            ("income", 300_000.0),
            ("purchases", 90_000.0),
            ("labor", 100_000.0),
            ("operating_expenses", 50_000.0),
        ]);
        let e = compute_earnings(&sheet, &Mode::Sde.shape());
        assert_eq!(e.total_costs, 240_000.0);
        assert_eq!(e.net_metric, 60_000.0);
        assert_relative_eq!(e.margin_pct, 20.0);
    }

    #[test]
    fn zero_revenue_has_zero_margin() {
        let sheet = inputs(&[("cogs", 1_000.0), ("employee_cost", 500.0)]);
        let e = compute_earnings(&sheet, &Mode::Ebitda.shape());
        assert_eq!(e.total_costs, 1_500.0);
        assert_eq!(e.net_metric, -1_500.0);
        assert_eq!(e.margin_pct, 0.0);
    }

    #[test]
    fn negative_revenue_has_zero_margin() {
        let sheet = inputs(&[("income", -100.0), ("labor", 50.0)]);
        let e = compute_earnings(&sheet, &Mode::Sde.shape());
        assert_eq!(e.net_metric, -150.0);
        assert_eq!(e.margin_pct, 0.0);
    }

    #[test]
    fn all_zero_is_valid() {
        let e = compute_earnings(&FinancialInputs::new(), &Mode::Ebitda.shape());
        assert_eq!(e.revenue, 0.0);
        assert_eq!(e.total_costs, 0.0);
        assert_eq!(e.net_metric, 0.0);
        assert_eq!(e.margin_pct, 0.0);
    }

    #[test]
    fn losses_are_not_clamped() {
        let sheet = inputs(&[("net_sales", 100.0), ("cogs", 250.0)]);
        let e = compute_earnings(&sheet, &Mode::Ebitda.shape());
        assert_eq!(e.net_metric, -150.0);
        assert_relative_eq!(e.margin_pct, -150.0);
    }

    #[test]
    fn fields_outside_the_shape_are_ignored() {
        let sheet = inputs(&[("net_sales", 100.0), ("cogs", 10.0), ("rent", 40.0)]);
        let e = compute_earnings(&sheet, &Mode::Ebitda.shape());
        assert_eq!(e.total_costs, 10.0);
    }

    #[test]
    fn custom_shape() {
        let shape = EarningsShape::new("gross", &["a", "b"]);
        let sheet = inputs(&[("gross", 10.0), ("a", 2.0), ("b", 3.0)]);
        let e = compute_earnings(&sheet, &shape);
        assert_eq!(e.net_metric, 5.0);
        assert_relative_eq!(e.margin_pct, 50.0);
    }

    #[test]
    fn overflowing_costs_are_zero() {
        let shape = Mode::Ebitda.shape();
        let sheet = inputs(&[
            ("net_sales", 1.0e308),
            ("cogs", 1.7e308),
            ("employee_cost", 1.7e308),
        ]);
        let e = compute_earnings(&sheet, &shape);
        assert_eq!(e.total_costs, 0.0);
        assert_eq!(e.net_metric, 1.0e308);
        assert!(e.margin_pct.is_finite());
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("EBITDA".parse::<Mode>(), Ok(Mode::Ebitda));
        assert_eq!(" sde ".parse::<Mode>(), Ok(Mode::Sde));
        assert!("ebit".parse::<Mode>().is_err());
    }

    #[test]
    fn mode_display_round_trips() {
        for mode in [Mode::Ebitda, Mode::Sde] {
            assert_eq!(mode.to_string().parse::<Mode>(), Ok(mode));
        }
    }

    #[test]
    fn shape_matches_catalog() {
        for mode in [Mode::Ebitda, Mode::Sde] {
            let shape = mode.shape();
            let keys: Vec<String> = mode.fields().into_iter().map(|c| c.key).collect();
            assert_eq!(keys[0], shape.revenue);
            assert_eq!(&keys[1..], shape.costs.as_slice());
        }
    }
}
