//! Load scenario inputs from a JSON document or a `parameter,value` CSV file
//!
//! Fields missing from the file keep their default values.

use std::fs::File;
use std::path::Path;

use csv::Reader;
use log::{debug, info};

use super::ScenarioInputs;
use crate::error::{FeasibilityError, Result};

/// Raw CSV row of a scenario file
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    parameter: String,
    value: String,
}

fn parse_f64(field: &str, value: &str) -> Result<f64> {
    value.trim().parse().map_err(|_| FeasibilityError::Parse {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn parse_u32(field: &str, value: &str) -> Result<u32> {
    value.trim().parse().map_err(|_| FeasibilityError::Parse {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Apply a single named parameter to the inputs
pub fn apply_parameter(inputs: &mut ScenarioInputs, name: &str, value: &str) -> Result<()> {
    let name = name.trim();
    match name {
        "plant_capacity_mw" => inputs.plant_capacity_mw = parse_f64(name, value)?,
        "dc_overload_factor" => inputs.dc_overload_factor = parse_f64(name, value)?,
        "cuf" => inputs.cuf = parse_f64(name, value)?,
        "project_life" => inputs.project_life = parse_u32(name, value)?,
        "degradation" => inputs.degradation = parse_f64(name, value)?,
        "capital_cost_per_mw" => inputs.capital_cost_per_mw = parse_f64(name, value)?,
        "subsidy_per_mw" => inputs.subsidy_per_mw = parse_f64(name, value)?,
        "loan_percent" => inputs.loan_percent = parse_f64(name, value)?,
        "loan_interest_rate" => inputs.loan_interest_rate = parse_f64(name, value)?,
        "loan_tenure" => inputs.loan_tenure = parse_u32(name, value)?,
        "depreciation_rate" => inputs.depreciation_rate = parse_f64(name, value)?,
        "tax_rate" => inputs.tax_rate = parse_f64(name, value)?,
        "om_cost_per_mw" => inputs.om_cost_per_mw = parse_f64(name, value)?,
        "om_escalation" => inputs.om_escalation = parse_f64(name, value)?,
        "tariff" => inputs.tariff = parse_f64(name, value)?,
        "return_on_equity" => inputs.return_on_equity = parse_f64(name, value)?,
        other => return Err(FeasibilityError::UnknownParameter(other.to_string())),
    }
    debug!("Scenario parameter {} = {}", name, value.trim());
    Ok(())
}

/// Load a `parameter,value` CSV from any reader, starting from defaults
pub fn load_scenario_from_reader<R: std::io::Read>(reader: R) -> Result<ScenarioInputs> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut inputs = ScenarioInputs::default();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        apply_parameter(&mut inputs, &row.parameter, &row.value)?;
    }

    Ok(inputs)
}

/// Load a scenario file; `.json` files are parsed as a JSON object, anything
/// else as a `parameter,value` CSV
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<ScenarioInputs> {
    let path = path.as_ref();
    let file = File::open(path)?;
    info!("Loading scenario from {}", path.display());

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        Ok(serde_json::from_reader(file)?)
    } else {
        load_scenario_from_reader(file)
    }
}
