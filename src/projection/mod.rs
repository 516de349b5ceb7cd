//! Cash-flow projection engine for a single plant scenario

mod capital;
mod cashflows;
mod engine;
mod irr;
mod loan;

pub use capital::CapitalStructure;
pub use cashflows::{ProjectionResult, ProjectionSummary, YearRecord};
pub use engine::{
    levelized_cost, payback_year, project, EquityDiscountBasis, PaybackBasis, ProjectionConfig,
    ProjectionEngine,
};
pub use irr::{calculate_irr, cumulative, discount_series, npv};
pub use loan::{annuity_payment, AmortizationMethod, DebtService, LoanSchedule};
