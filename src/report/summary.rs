//! Project summary block and value formatting

use std::io::{self, Write};

use crate::projection::ProjectionResult;
use crate::scenario::ScenarioInputs;

/// Placeholder for a metric that is undefined for the scenario
pub const NOT_AVAILABLE: &str = "n/a";

/// Group the integer part of `value` with commas, e.g. `1234567.8` -> `1,234,568`
pub fn group_thousands(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Whole rupees with thousands grouping
pub fn format_currency(value: f64) -> String {
    if value < 0.0 && value.round() != 0.0 {
        format!("-₹{}", group_thousands(-value))
    } else {
        format!("₹{}", group_thousands(value.abs()))
    }
}

/// A fraction shown as a percentage with two decimals
pub fn format_percent(fraction: f64) -> String {
    format!("{:.2} %", fraction * 100.0)
}

fn or_na<T>(value: Option<T>, f: impl FnOnce(T) -> String) -> String {
    value.map(f).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Labelled summary lines in display order
pub fn summary_items(inputs: &ScenarioInputs, result: &ProjectionResult) -> Vec<(&'static str, String)> {
    let s = &result.summary;
    let cap = &s.capital;

    vec![
        ("Plant Capacity (AC)", format!("{:.2} MW", inputs.plant_capacity_mw)),
        ("DC Overloading Factor", format!("{:.2}", inputs.dc_overload_factor)),
        ("CUF", format_percent(inputs.cuf)),
        ("Tariff", format!("₹{:.2} / kWh", inputs.tariff)),
        ("Project Life", format!("{} years", inputs.project_life)),
        ("Annual Degradation", format_percent(inputs.degradation)),
        ("Capital Cost (Base)", format_currency(cap.base_capital_cost)),
        ("Effective Capital Cost", format_currency(cap.effective_capital_cost)),
        ("VGF / Subsidy (Total)", format_currency(cap.subsidy_amount)),
        ("VGF per MW", format!("{} / MW", format_currency(inputs.subsidy_per_mw))),
        ("Loan Portion", format!("{} %", inputs.loan_percent)),
        ("Total Interest (Loan)", format_currency(s.total_interest)),
        ("WACC", or_na(s.wacc, format_percent)),
        ("Feasibility", if s.feasible { "Yes" } else { "No" }.to_string()),
        ("NPV (Project)", or_na(s.npv, format_currency)),
        ("IRR (Project)", or_na(s.irr_project, format_percent)),
        ("IRR (Equity)", or_na(s.irr_equity, format_percent)),
        ("LCOE", or_na(s.lcoe, |v| format!("₹{:.2} / kWh", v))),
        (
            "Payback Period",
            s.payback_year
                .map(|y| format!("{} years", y))
                .unwrap_or_else(|| "not reached".to_string()),
        ),
    ]
}

/// Write the summary as two columns of `label: value`
pub fn write_summary<W: Write>(out: &mut W, inputs: &ScenarioInputs, result: &ProjectionResult) -> io::Result<()> {
    let items = summary_items(inputs, result);
    let mid = items.len() / 2;
    let (left, right) = items.split_at(mid);

    writeln!(out, "Project Summary")?;
    writeln!(out, "{}", "-".repeat(96))?;
    for i in 0..right.len() {
        let left_cell = left
            .get(i)
            .map(|(k, v)| format!("{}: {}", k, v))
            .unwrap_or_default();
        let (rk, rv) = &right[i];
        writeln!(out, "{:<48}{}: {}", left_cell, rk, rv)?;
    }
    Ok(())
}
