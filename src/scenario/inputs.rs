//! Scenario inputs for a single plant, with defaults and validation

use serde::{Deserialize, Serialize};

use crate::error::{FeasibilityError, Result};

/// Hours in a non-leap year
pub const HOURS_PER_YEAR: f64 = 8760.0;

/// Default performance ratio used to turn irradiation into a CUF estimate
pub const DEFAULT_PERFORMANCE_RATIO: f64 = 0.85;

/// Default annual solar irradiation (kWh/m²/year)
pub const DEFAULT_IRRADIATION: f64 = 1800.0;

/// Default DC overloading factor (DC MWp per AC MW)
pub const DEFAULT_DC_OVERLOAD_FACTOR: f64 = 1.2;

/// Allowed project life range in years (inclusive)
pub const MIN_PROJECT_LIFE: u32 = 10;
pub const MAX_PROJECT_LIFE: u32 = 35;

/// Longest loan tenure accepted; no loan outlives the longest project
pub const MAX_LOAN_TENURE: u32 = MAX_PROJECT_LIFE;

/// Solar module technology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanelType {
    Bifacial,
    Monocrystalline,
    Polycrystalline,
}

impl PanelType {
    /// Typical all-in capital cost per AC MW (₹)
    pub fn capital_cost_per_mw(&self) -> f64 {
        match self {
            PanelType::Bifacial => 55_000_000.0,
            PanelType::Monocrystalline => 51_000_000.0,
            PanelType::Polycrystalline => 47_000_000.0,
        }
    }
}

/// Estimate CUF (fraction) from annual irradiation and performance ratio
pub fn estimate_cuf(irradiation_kwh_m2_yr: f64, performance_ratio: f64) -> f64 {
    irradiation_kwh_m2_yr * performance_ratio / HOURS_PER_YEAR
}

/// Inputs for one projection run.
///
/// All rates are fractions (0.05 = 5%) except `loan_percent`, which is on a
/// 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioInputs {
    // Technical
    pub plant_capacity_mw: f64,
    pub dc_overload_factor: f64,
    pub cuf: f64,
    pub project_life: u32,
    pub degradation: f64,

    // Capital
    pub capital_cost_per_mw: f64,
    pub subsidy_per_mw: f64,

    // Debt
    pub loan_percent: f64,
    pub loan_interest_rate: f64,
    pub loan_tenure: u32,

    // Tax
    pub depreciation_rate: f64,
    pub tax_rate: f64,

    // Operations and revenue
    pub om_cost_per_mw: f64,
    pub om_escalation: f64,
    pub tariff: f64,

    /// Expected return on equity (cost of equity)
    pub return_on_equity: f64,
}

impl Default for ScenarioInputs {
    fn default() -> Self {
        Self::for_panel(PanelType::Bifacial)
    }
}

impl ScenarioInputs {
    /// Reference defaults for a 1 MW plant using the given module type
    pub fn for_panel(panel: PanelType) -> Self {
        Self {
            plant_capacity_mw: 1.0,
            dc_overload_factor: DEFAULT_DC_OVERLOAD_FACTOR,
            cuf: estimate_cuf(DEFAULT_IRRADIATION, DEFAULT_PERFORMANCE_RATIO),
            project_life: 25,
            degradation: 0.005,
            capital_cost_per_mw: panel.capital_cost_per_mw(),
            subsidy_per_mw: 0.0,
            loan_percent: 70.0,
            loan_interest_rate: 0.10,
            loan_tenure: 10,
            depreciation_rate: 0.0528,
            tax_rate: 0.25,
            om_cost_per_mw: 300_000.0,
            om_escalation: 0.05,
            tariff: 3.50,
            return_on_equity: 0.14,
        }
    }

    /// Reject out-of-range or non-finite inputs before the engine runs
    pub fn validate(&self) -> Result<()> {
        let scalars = [
            ("plant_capacity_mw", self.plant_capacity_mw),
            ("dc_overload_factor", self.dc_overload_factor),
            ("cuf", self.cuf),
            ("degradation", self.degradation),
            ("capital_cost_per_mw", self.capital_cost_per_mw),
            ("subsidy_per_mw", self.subsidy_per_mw),
            ("loan_percent", self.loan_percent),
            ("loan_interest_rate", self.loan_interest_rate),
            ("depreciation_rate", self.depreciation_rate),
            ("tax_rate", self.tax_rate),
            ("om_cost_per_mw", self.om_cost_per_mw),
            ("om_escalation", self.om_escalation),
            ("tariff", self.tariff),
            ("return_on_equity", self.return_on_equity),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(FeasibilityError::invalid(field, "must be a finite number"));
            }
            if value < 0.0 {
                return Err(FeasibilityError::invalid(field, format!("must be non-negative, got {}", value)));
            }
        }

        if self.plant_capacity_mw <= 0.0 {
            return Err(FeasibilityError::invalid("plant_capacity_mw", "must be greater than zero"));
        }
        if self.dc_overload_factor <= 0.0 {
            return Err(FeasibilityError::invalid("dc_overload_factor", "must be greater than zero"));
        }
        if self.loan_percent > 100.0 {
            return Err(FeasibilityError::invalid(
                "loan_percent",
                format!("must be between 0 and 100, got {}", self.loan_percent),
            ));
        }
        if !(MIN_PROJECT_LIFE..=MAX_PROJECT_LIFE).contains(&self.project_life) {
            return Err(FeasibilityError::invalid(
                "project_life",
                format!(
                    "must be between {} and {} years, got {}",
                    MIN_PROJECT_LIFE, MAX_PROJECT_LIFE, self.project_life
                ),
            ));
        }
        if self.loan_tenure > MAX_LOAN_TENURE {
            return Err(FeasibilityError::invalid(
                "loan_tenure",
                format!("must not exceed {} years, got {}", MAX_LOAN_TENURE, self.loan_tenure),
            ));
        }

        // Fractions that cannot exceed 100%
        for (field, value) in [
            ("cuf", self.cuf),
            ("degradation", self.degradation),
            ("tax_rate", self.tax_rate),
        ] {
            if value > 1.0 {
                return Err(FeasibilityError::invalid(
                    field,
                    format!("is a fraction and must not exceed 1.0, got {}", value),
                ));
            }
        }

        Ok(())
    }
}
