//! Two-slice expenses/earnings breakdown for part-to-whole charts.

use super::engine::ValuationResult;
use super::export::format_percent;

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Breakdown {
    pub expenses: Slice,
    pub earnings: Slice,
    pub center_label: String,
}

impl Breakdown {
    pub fn from_result(result: &ValuationResult) -> Self {
        Self {
            expenses: Slice {
                label: "Total Operating Expenses".to_string(),
                value: result.total_expenses,
            },
            earnings: Slice {
                label: result.mode.metric_label().to_string(),
                value: result.net_metric,
            },
            center_label: format_percent(result.margin_pct),
        }
    }

    /// A part-to-whole chart is only meaningful with non-negative slices and
    /// a positive whole.
    pub fn is_drawable(&self) -> bool {
        self.expenses.value >= 0.0 && self.earnings.value >= 0.0 && self.whole() > 0.0
    }

    pub fn whole(&self) -> f64 {
        self.expenses.value + self.earnings.value
    }

    /// Fraction of the whole taken by each slice, `(expenses, earnings)`.
    pub fn fractions(&self) -> Option<(f64, f64)> {
        if !self.is_drawable() {
            return None;
        }
        let whole = self.whole();
        Some((self.expenses.value / whole, self.earnings.value / whole))
    }
}
