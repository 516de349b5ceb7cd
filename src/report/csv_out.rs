//! CSV export of the year-by-year cash flows
//!
//! One row per year 0..=N, one column per year record field. The summary is
//! not part of the export. Undefined values are written as empty cells.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::info;

use crate::error::Result;
use crate::projection::{ProjectionResult, YearRecord};

/// Default export file name
pub const DEFAULT_CSV_PATH: &str = "solar_project_cashflow.csv";

pub const CSV_HEADER: [&str; 20] = [
    "Year",
    "Energy Output (kWh)",
    "Revenue (₹)",
    "O&M Cost (₹)",
    "EBITDA (₹)",
    "Depreciation (₹)",
    "Profit (₹)",
    "Tax (₹)",
    "Interest (₹)",
    "Principal (₹)",
    "Loan Balance (₹)",
    "Project CF (₹)",
    "Equity CF (₹)",
    "Total CF (₹)",
    "Discounted Project CF (₹)",
    "Discounted Equity CF (₹)",
    "Discounted Total CF (₹)",
    "Cumulative Discounted Project CF (₹)",
    "Cumulative Discounted Equity CF (₹)",
    "Cumulative Discounted Total CF (₹)",
];

fn cell(value: f64) -> String {
    format!("{:.2}", value)
}

fn optional_cell(value: Option<f64>) -> String {
    value.map(cell).unwrap_or_default()
}

fn record_cells(row: &YearRecord) -> [String; 20] {
    [
        row.year.to_string(),
        cell(row.energy_kwh),
        cell(row.revenue),
        cell(row.om_cost),
        cell(row.ebitda),
        cell(row.depreciation),
        cell(row.ebit),
        cell(row.tax),
        cell(row.interest),
        cell(row.principal),
        cell(row.loan_balance),
        cell(row.project_cf),
        cell(row.equity_cf),
        cell(row.total_cf),
        optional_cell(row.discounted_project_cf),
        optional_cell(row.discounted_equity_cf),
        optional_cell(row.discounted_total_cf),
        optional_cell(row.cumulative_discounted_project_cf),
        optional_cell(row.cumulative_discounted_equity_cf),
        optional_cell(row.cumulative_discounted_total_cf),
    ]
}

/// Write the cash flow table to any writer
pub fn write_cashflow_csv<W: Write>(writer: W, result: &ProjectionResult) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for row in &result.years {
        wtr.write_record(record_cells(row))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Export the cash flow table to a file
pub fn export_cashflow_csv<P: AsRef<Path>>(path: P, result: &ProjectionResult) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_cashflow_csv(file, result)?;
    info!("Cash flow table written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::project;
    use crate::scenario::ScenarioInputs;

    #[test]
    fn test_csv_shape() {
        let result = project(&ScenarioInputs::default());
        let mut buf = Vec::new();
        write_cashflow_csv(&mut buf, &result).unwrap();

        let mut reader = csv::Reader::from_reader(buf.as_slice());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.len(), CSV_HEADER.len());
        assert_eq!(&headers[0], "Year");

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 26);
        assert_eq!(&rows[0][0], "0");
        assert_eq!(&rows[25][0], "25");
        assert_eq!(&rows[0][1], "0.00");
    }

    #[test]
    fn test_csv_undefined_cells_are_empty() {
        let inputs = ScenarioInputs { subsidy_per_mw: 80_000_000.0, ..ScenarioInputs::default() };
        let result = project(&inputs);
        let mut buf = Vec::new();
        write_cashflow_csv(&mut buf, &result).unwrap();

        let mut reader = csv::Reader::from_reader(buf.as_slice());
        let first = reader.records().next().unwrap().unwrap();
        // Discounted project CF
        assert_eq!(&first[14], "");
        // Discounted equity CF is still defined
        assert!(!first[15].is_empty());
    }
}
