//! Scenario inputs and scenario file loading

mod inputs;
pub mod loader;

pub use inputs::{
    estimate_cuf, PanelType, ScenarioInputs, DEFAULT_DC_OVERLOAD_FACTOR, DEFAULT_IRRADIATION,
    DEFAULT_PERFORMANCE_RATIO, HOURS_PER_YEAR, MAX_PROJECT_LIFE, MIN_PROJECT_LIFE,
};
pub use loader::{apply_parameter, load_scenario, load_scenario_from_reader};
