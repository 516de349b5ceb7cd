//! Solar Feasibility - financial projection engine for utility-scale solar plants
//!
//! This library provides:
//! - Scenario inputs with reference defaults, panel presets and CUF estimation
//! - Year-by-year cash flow projection (energy, O&M, tax, debt service)
//! - Investment metrics (WACC, NPV, project and equity IRR, LCOE, payback)
//! - Summary, table, CSV and JSON reporting

pub mod error;
pub mod projection;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use error::FeasibilityError;
pub use projection::{project, ProjectionConfig, ProjectionEngine, ProjectionResult, YearRecord};
pub use scenario::{PanelType, ScenarioInputs};
