//! JSON report document

use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::projection::{ProjectionConfig, ProjectionResult, ProjectionSummary, YearRecord};
use crate::scenario::ScenarioInputs;

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub inputs: &'a ScenarioInputs,
    pub config: &'a ProjectionConfig,
    pub summary: &'a ProjectionSummary,
    pub years: &'a [YearRecord],
}

impl<'a> JsonReport<'a> {
    pub fn new(inputs: &'a ScenarioInputs, config: &'a ProjectionConfig, result: &'a ProjectionResult) -> Self {
        Self {
            inputs,
            config,
            summary: &result.summary,
            years: &result.years,
        }
    }
}

/// Pretty-print the report to `out`
pub fn write_json<W: Write>(mut out: W, report: &JsonReport<'_>) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, report)?;
    writeln!(out)?;
    Ok(())
}
