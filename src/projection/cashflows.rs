//! Cashflow output structures for projections

use serde::{Deserialize, Serialize};

use super::capital::CapitalStructure;

/// A single row of projection output for one year.
///
/// Year 0 holds the construction outlay only; operating fields are zero.
/// Discounted fields are `None` when their discount rate is undefined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    pub year: u32,

    // Operations
    pub energy_kwh: f64,
    pub revenue: f64,
    pub om_cost: f64,
    pub ebitda: f64,
    pub depreciation: f64,
    /// EBIT, reported as "profit"
    pub ebit: f64,
    pub tax: f64,

    // Debt service
    pub interest: f64,
    pub principal: f64,
    pub loan_balance: f64,

    // Undiscounted cash flows
    pub project_cf: f64,
    pub equity_cf: f64,
    /// Project plus equity cash flow (year 0: the project outlay)
    pub total_cf: f64,

    // Discounted cash flows
    pub discounted_project_cf: Option<f64>,
    pub discounted_equity_cf: Option<f64>,
    pub discounted_total_cf: Option<f64>,
    pub cumulative_discounted_project_cf: Option<f64>,
    pub cumulative_discounted_equity_cf: Option<f64>,
    pub cumulative_discounted_total_cf: Option<f64>,
}

impl YearRecord {
    /// Create a new year record with operating values zeroed
    pub fn new(year: u32) -> Self {
        Self {
            year,
            energy_kwh: 0.0,
            revenue: 0.0,
            om_cost: 0.0,
            ebitda: 0.0,
            depreciation: 0.0,
            ebit: 0.0,
            tax: 0.0,
            interest: 0.0,
            principal: 0.0,
            loan_balance: 0.0,
            project_cf: 0.0,
            equity_cf: 0.0,
            total_cf: 0.0,
            discounted_project_cf: None,
            discounted_equity_cf: None,
            discounted_total_cf: None,
            cumulative_discounted_project_cf: None,
            cumulative_discounted_equity_cf: None,
            cumulative_discounted_total_cf: None,
        }
    }
}

/// Scalar results of a projection. `None` marks a metric that is undefined
/// for this scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub capital: CapitalStructure,

    pub wacc: Option<f64>,
    /// Rate applied to the project stream
    pub project_discount_rate: Option<f64>,
    /// Rate applied to the equity stream
    pub equity_discount_rate: Option<f64>,

    pub npv: Option<f64>,
    pub irr_project: Option<f64>,
    pub irr_equity: Option<f64>,
    /// Undiscounted project cash flow per kWh over the plant life
    pub lcoe: Option<f64>,
    /// First year whose cumulative cash flow is non-negative
    pub payback_year: Option<u32>,
    pub feasible: bool,

    pub energy_year1_kwh: f64,
    pub total_energy_kwh: f64,
    pub annual_debt_payment: Option<f64>,
    /// Loan interest paid over the projection
    pub total_interest: f64,
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Year rows 0..=N in chronological order
    pub years: Vec<YearRecord>,

    pub summary: ProjectionSummary,
}

impl ProjectionResult {
    /// Project life in operating years
    pub fn project_life(&self) -> u32 {
        self.years.len().saturating_sub(1) as u32
    }

    pub fn project_cashflows(&self) -> Vec<f64> {
        self.years.iter().map(|r| r.project_cf).collect()
    }

    pub fn equity_cashflows(&self) -> Vec<f64> {
        self.years.iter().map(|r| r.equity_cf).collect()
    }

    pub fn total_cashflows(&self) -> Vec<f64> {
        self.years.iter().map(|r| r.total_cf).collect()
    }

    /// Energy for operating years 1..=N
    pub fn energy_outputs(&self) -> Vec<f64> {
        self.years.iter().skip(1).map(|r| r.energy_kwh).collect()
    }
}
