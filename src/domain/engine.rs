//! Valuation engine.
//!
//! [`evaluate`] is a pure function of a [`ValuationRequest`]: it derives the
//! earnings metric, margin, owner benefit, valuation base and valuation range.
//! It has no error path; malformed inputs have already been normalized to 0
//! by the time they reach an [`AmountSheet`](super::sheet::AmountSheet).

use tracing::debug;

use super::catalog::{default_addbacks, Category};
use super::earnings::{compute_earnings, Mode};
use super::owner_benefit::total_owner_benefit;
use super::sheet::{FinancialInputs, OwnerAddBacks};
use super::valuation::{Multiples, ValuationBase, ValuationRange};

#[derive(Debug, Clone, PartialEq)]
pub struct ValuationRequest {
    pub mode: Mode,
    pub inputs: FinancialInputs,
    pub addbacks: OwnerAddBacks,
    pub base: ValuationBase,
    pub multiples: Multiples,
    /// Labels and descriptions for add-back keys; presentation only.
    pub addback_catalog: Vec<Category>,
}

impl ValuationRequest {
    /// Request using the default multiples for `mode` and the default
    /// add-back catalog.
    pub fn new(
        mode: Mode,
        inputs: FinancialInputs,
        addbacks: OwnerAddBacks,
        base: ValuationBase,
    ) -> Self {
        Self {
            mode,
            inputs,
            addbacks,
            base,
            multiples: Multiples::for_mode(mode),
            addback_catalog: default_addbacks(),
        }
    }

    pub fn with_multiples(mut self, multiples: Multiples) -> Self {
        self.multiples = multiples;
        self
    }

    pub fn with_addback_catalog(mut self, catalog: Vec<Category>) -> Self {
        self.addback_catalog = catalog;
        self
    }
}

/// Derived metrics for one request. Amounts are unrounded.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationResult {
    pub mode: Mode,
    pub revenue: f64,
    pub total_expenses: f64,
    pub net_metric: f64,
    pub margin_pct: f64,
    pub total_owner_benefit: f64,
    pub base: ValuationBase,
    pub valuation_base: f64,
    pub multiples: Multiples,
    pub valuation: ValuationRange,
}

pub fn evaluate(request: &ValuationRequest) -> ValuationResult {
    let earnings = compute_earnings(&request.inputs, &request.mode.shape());
    let owner_benefit = total_owner_benefit(&request.addbacks);
    let valuation_base = request.base.resolve(earnings.net_metric, owner_benefit);
    let valuation = ValuationRange::from_base(valuation_base, request.multiples);

    debug!(
        mode = %request.mode,
        revenue = earnings.revenue,
        total_expenses = earnings.total_costs,
        net_metric = earnings.net_metric,
        margin_pct = earnings.margin_pct,
        owner_benefit,
        base = %request.base,
        valuation_base,
        "evaluated valuation"
    );

    ValuationResult {
        mode: request.mode,
        revenue: earnings.revenue,
        total_expenses: earnings.total_costs,
        net_metric: earnings.net_metric,
        margin_pct: earnings.margin_pct,
        total_owner_benefit: owner_benefit,
        base: request.base,
        valuation_base,
        multiples: request.multiples,
        valuation,
    }
}
