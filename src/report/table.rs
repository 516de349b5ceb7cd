//! Console cash flow table

use std::io::{self, Write};

use crate::projection::ProjectionResult;

/// Write up to `max_rows` year rows (all rows when `None`)
pub fn write_table<W: Write>(out: &mut W, result: &ProjectionResult, max_rows: Option<usize>) -> io::Result<()> {
    writeln!(
        out,
        "{:>4} {:>14} {:>14} {:>15} {:>15} {:>15} {:>15} {:>15} {:>17}",
        "Year", "Energy (kWh)", "O&M Cost", "EBITDA", "Profit", "Interest", "Project CF", "Equity CF", "Cum Disc Proj CF"
    )?;
    writeln!(out, "{}", "-".repeat(134))?;

    let limit = max_rows.unwrap_or(result.years.len());
    for row in result.years.iter().take(limit) {
        let cumulative = row
            .cumulative_discounted_project_cf
            .map(|v| format!("{:.0}", v))
            .unwrap_or_else(|| "n/a".to_string());
        writeln!(
            out,
            "{:>4} {:>14.0} {:>14.0} {:>15.0} {:>15.0} {:>15.0} {:>15.0} {:>15.0} {:>17}",
            row.year,
            row.energy_kwh,
            row.om_cost,
            row.ebitda,
            row.ebit,
            row.interest,
            row.project_cf,
            row.equity_cf,
            cumulative,
        )?;
    }

    if result.years.len() > limit {
        writeln!(out, "... ({} more years)", result.years.len() - limit)?;
    }

    Ok(())
}
