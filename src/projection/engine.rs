//! Core projection engine for annual plant cash flows

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::capital::CapitalStructure;
use super::cashflows::{ProjectionResult, ProjectionSummary, YearRecord};
use super::irr::{calculate_irr, cumulative, discount_series};
use super::loan::{AmortizationMethod, LoanSchedule};
use crate::error::Result;
use crate::scenario::{ScenarioInputs, HOURS_PER_YEAR};

/// Rate used to discount the equity cash flow stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EquityDiscountBasis {
    /// Expected return on equity
    #[default]
    CostOfEquity,
    /// Same blended rate as the project stream
    Wacc,
}

/// Cash flow stream whose cumulative (undiscounted) sum defines payback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaybackBasis {
    /// Project plus equity cash flow, year 0 = project outlay
    #[default]
    Total,
    Project,
    Equity,
}

/// Configuration for a projection run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Loan debt service policy
    pub amortization: AmortizationMethod,

    /// Discount rate for the equity stream
    pub equity_discount: EquityDiscountBasis,

    /// Stream used for the payback year
    pub payback_basis: PaybackBasis,
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Validate the inputs, then project
    pub fn run(&self, inputs: &ScenarioInputs) -> Result<ProjectionResult> {
        inputs.validate()?;
        Ok(self.project(inputs))
    }

    /// Project year-by-year cash flows and summary metrics.
    ///
    /// Pure: identical inputs give identical results. Inputs are assumed
    /// validated; degenerate cases surface as `None` metrics.
    pub fn project(&self, inputs: &ScenarioInputs) -> ProjectionResult {
        let capital = CapitalStructure::from_inputs(inputs);
        let wacc = capital.wacc(inputs.loan_interest_rate, inputs.return_on_equity, inputs.tax_rate);
        debug!(
            "Capital structure: effective cost {:.2}, loan {:.2}, equity {:.2}, WACC {:?}",
            capital.effective_capital_cost, capital.loan_amount, capital.equity_amount, wacc
        );
        if wacc.is_none() {
            warn!(
                "Effective capital cost {:.2} is not positive; WACC and NPV are undefined",
                capital.effective_capital_cost
            );
        }

        let energy_y1 = inputs.plant_capacity_mw * 1000.0 * HOURS_PER_YEAR * inputs.cuf * inputs.dc_overload_factor;
        let om_cost_y1 = inputs.om_cost_per_mw * inputs.plant_capacity_mw;

        let loan = LoanSchedule::build(
            self.config.amortization,
            capital.loan_amount,
            inputs.loan_interest_rate,
            inputs.loan_tenure,
            inputs.project_life,
        );

        let mut years = Vec::with_capacity(inputs.project_life as usize + 1);
        years.push(self.outlay_year(&capital));

        // Flat depreciation on the post-subsidy cost
        let depreciation = capital.effective_capital_cost * inputs.depreciation_rate;

        for year in 1..=inputs.project_life {
            let mut row = YearRecord::new(year);
            let age = (year - 1) as i32;

            row.energy_kwh = energy_y1 * (1.0 - inputs.degradation).powi(age);
            row.om_cost = om_cost_y1 * (1.0 + inputs.om_escalation).powi(age);
            row.revenue = row.energy_kwh * inputs.tariff;
            row.depreciation = depreciation;
            row.ebitda = row.revenue - row.om_cost;
            row.ebit = row.ebitda - depreciation;
            // No loss carryforward
            row.tax = inputs.tax_rate * row.ebit.max(0.0);

            let debt = loan.year(year);
            row.interest = debt.interest;
            row.principal = debt.principal;
            row.loan_balance = debt.closing_balance;

            row.project_cf = row.ebitda - row.tax;
            row.equity_cf = row.project_cf - row.interest - row.principal;
            row.total_cf = row.project_cf + row.equity_cf;

            years.push(row);
        }

        let project_rate = wacc;
        let equity_rate = match self.config.equity_discount {
            EquityDiscountBasis::CostOfEquity => Some(inputs.return_on_equity),
            EquityDiscountBasis::Wacc => wacc,
        };
        let npv = apply_discounting(&mut years, project_rate, equity_rate);

        let summary = self.summarize(&years, capital, wacc, project_rate, equity_rate, npv, energy_y1, &loan);
        ProjectionResult { years, summary }
    }

    /// Year 0: the capital outlay, nothing produced or spent on operations
    fn outlay_year(&self, capital: &CapitalStructure) -> YearRecord {
        let mut row = YearRecord::new(0);
        row.loan_balance = capital.loan_amount.max(0.0);
        row.project_cf = -capital.effective_capital_cost;
        row.equity_cf = -capital.equity_amount;
        row.total_cf = -capital.effective_capital_cost;
        row
    }

    #[allow(clippy::too_many_arguments)]
    fn summarize(
        &self,
        years: &[YearRecord],
        capital: CapitalStructure,
        wacc: Option<f64>,
        project_rate: Option<f64>,
        equity_rate: Option<f64>,
        npv: Option<f64>,
        energy_y1: f64,
        loan: &LoanSchedule,
    ) -> ProjectionSummary {
        let project_cfs: Vec<f64> = years.iter().map(|r| r.project_cf).collect();
        let equity_cfs: Vec<f64> = years.iter().map(|r| r.equity_cf).collect();

        let irr_project = calculate_irr(&project_cfs);
        if irr_project.is_none() {
            warn!("Project IRR is undefined for this cash flow stream");
        }
        let irr_equity = calculate_irr(&equity_cfs);
        if irr_equity.is_none() {
            warn!("Equity IRR is undefined for this cash flow stream");
        }

        let total_energy: f64 = years.iter().skip(1).map(|r| r.energy_kwh).sum();
        let lcoe = levelized_cost(&project_cfs, total_energy);
        if lcoe.is_none() {
            warn!("Total energy output is zero; LCOE is undefined");
        }

        let payback_stream: Vec<f64> = match self.config.payback_basis {
            PaybackBasis::Total => years.iter().map(|r| r.total_cf).collect(),
            PaybackBasis::Project => project_cfs.clone(),
            PaybackBasis::Equity => equity_cfs.clone(),
        };
        let payback_year = payback_year(&payback_stream);

        ProjectionSummary {
            capital,
            wacc,
            project_discount_rate: project_rate,
            equity_discount_rate: equity_rate,
            npv,
            irr_project,
            irr_equity,
            lcoe,
            payback_year,
            feasible: npv.map(|v| v > 0.0).unwrap_or(false),
            energy_year1_kwh: energy_y1,
            total_energy_kwh: total_energy,
            annual_debt_payment: loan.annual_payment,
            total_interest: loan.total_interest(),
        }
    }
}

/// Project with the default policies
pub fn project(inputs: &ScenarioInputs) -> ProjectionResult {
    ProjectionEngine::default().project(inputs)
}

/// Fill the discounted and cumulative columns; returns the project NPV
fn apply_discounting(
    years: &mut [YearRecord],
    project_rate: Option<f64>,
    equity_rate: Option<f64>,
) -> Option<f64> {
    let project_cfs: Vec<f64> = years.iter().map(|r| r.project_cf).collect();
    let equity_cfs: Vec<f64> = years.iter().map(|r| r.equity_cf).collect();

    let discounted_project = project_rate.map(|rate| discount_series(&project_cfs, rate));
    let discounted_equity = equity_rate.map(|rate| discount_series(&equity_cfs, rate));
    let discounted_total: Option<Vec<f64>> = match (&discounted_project, &discounted_equity) {
        (Some(p), Some(e)) => Some(p.iter().zip(e).map(|(p, e)| p + e).collect()),
        _ => None,
    };

    fill_column(years, discounted_project.as_deref(), |r, d, c| {
        r.discounted_project_cf = Some(d);
        r.cumulative_discounted_project_cf = Some(c);
    });
    fill_column(years, discounted_equity.as_deref(), |r, d, c| {
        r.discounted_equity_cf = Some(d);
        r.cumulative_discounted_equity_cf = Some(c);
    });
    fill_column(years, discounted_total.as_deref(), |r, d, c| {
        r.discounted_total_cf = Some(d);
        r.cumulative_discounted_total_cf = Some(c);
    });

    discounted_project.map(|d| d.iter().sum())
}

fn fill_column<F>(years: &mut [YearRecord], discounted: Option<&[f64]>, mut set: F)
where
    F: FnMut(&mut YearRecord, f64, f64),
{
    let Some(discounted) = discounted else {
        return;
    };
    let running = cumulative(discounted);
    for ((row, &d), &c) in years.iter_mut().zip(discounted).zip(&running) {
        set(row, d, c);
    }
}

/// Undiscounted project cash flow (years 1..=N) per kWh generated.
///
/// Not a discounted LCOE; `None` when no energy is produced.
pub fn levelized_cost(project_cfs: &[f64], total_energy_kwh: f64) -> Option<f64> {
    if total_energy_kwh <= 0.0 {
        return None;
    }
    let operating: f64 = project_cfs.iter().skip(1).sum();
    Some(operating / total_energy_kwh)
}

/// Smallest index whose running total is non-negative
pub fn payback_year(cashflows: &[f64]) -> Option<u32> {
    cumulative(cashflows)
        .iter()
        .position(|&total| total >= 0.0)
        .map(|i| i as u32)
}
