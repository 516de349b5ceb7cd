//! Capital structure and blended discount rate

use serde::{Deserialize, Serialize};

use crate::scenario::ScenarioInputs;

/// How the plant is paid for
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapitalStructure {
    /// Capital cost per MW times AC capacity
    pub base_capital_cost: f64,
    /// Base cost scaled by the DC overloading factor
    pub capital_cost: f64,
    /// Total subsidy / VGF
    pub subsidy_amount: f64,
    /// Capital cost net of subsidy; also the depreciable base
    pub effective_capital_cost: f64,
    pub loan_amount: f64,
    pub equity_amount: f64,
}

impl CapitalStructure {
    pub fn from_inputs(inputs: &ScenarioInputs) -> Self {
        let base_capital_cost = inputs.capital_cost_per_mw * inputs.plant_capacity_mw;
        let capital_cost = base_capital_cost * inputs.dc_overload_factor;
        let subsidy_amount = inputs.subsidy_per_mw * inputs.plant_capacity_mw;
        let effective_capital_cost = capital_cost - subsidy_amount;
        let loan_amount = effective_capital_cost * (inputs.loan_percent / 100.0);
        let equity_amount = effective_capital_cost - loan_amount;

        Self {
            base_capital_cost,
            capital_cost,
            subsidy_amount,
            effective_capital_cost,
            loan_amount,
            equity_amount,
        }
    }

    /// Whether there is anything left to finance after the subsidy
    pub fn is_financeable(&self) -> bool {
        self.effective_capital_cost > 0.0
    }

    /// Weighted average cost of capital with after-tax cost of debt.
    ///
    /// `None` when the effective capital cost is zero or negative, since the
    /// debt and equity weights are undefined.
    pub fn wacc(&self, cost_of_debt: f64, cost_of_equity: f64, tax_rate: f64) -> Option<f64> {
        if !self.is_financeable() {
            return None;
        }
        let debt_weight = self.loan_amount / self.effective_capital_cost;
        let equity_weight = self.equity_amount / self.effective_capital_cost;
        Some(debt_weight * cost_of_debt * (1.0 - tax_rate) + equity_weight * cost_of_equity)
    }
}
