//! Reporting and export of projection results

pub mod csv_out;
pub mod json;
pub mod summary;
pub mod table;

pub use csv_out::{export_cashflow_csv, write_cashflow_csv, DEFAULT_CSV_PATH};
pub use json::{write_json, JsonReport};
pub use summary::{format_currency, format_percent, summary_items, write_summary};
pub use table::write_table;
