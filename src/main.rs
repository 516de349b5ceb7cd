//! Solar Feasibility CLI
//!
//! Builds a scenario from defaults, an optional scenario file and flags, then
//! prints the project summary and cash flow table.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::info;

use solar_feasibility::projection::{
    AmortizationMethod, EquityDiscountBasis, PaybackBasis, ProjectionConfig, ProjectionEngine,
};
use solar_feasibility::report::{self, JsonReport, DEFAULT_CSV_PATH};
use solar_feasibility::scenario::{self, estimate_cuf, PanelType, ScenarioInputs};

/// Solar power plant financial feasibility calculator
#[derive(Parser, Debug)]
#[command(name = "solar_feasibility", version, about)]
struct Cli {
    /// Scenario file (.json object or `parameter,value` CSV)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Module type; sets the default capital cost per MW
    #[arg(long, value_enum)]
    panel: Option<PanelArg>,

    // Technical
    /// Plant capacity (AC MW)
    #[arg(long)]
    capacity_mw: Option<f64>,
    /// DC overloading factor
    #[arg(long)]
    dc_overload_factor: Option<f64>,
    /// Solar irradiation (kWh/m²/year), used to estimate CUF
    #[arg(long)]
    irradiation: Option<f64>,
    /// Performance ratio used with --irradiation
    #[arg(long, default_value_t = scenario::DEFAULT_PERFORMANCE_RATIO)]
    performance_ratio: f64,
    /// Manual CUF (%), overrides the estimate
    #[arg(long)]
    cuf_pct: Option<f64>,
    /// Project life (years)
    #[arg(long)]
    project_life: Option<u32>,
    /// Annual degradation (%)
    #[arg(long)]
    degradation_pct: Option<f64>,

    // Financial
    /// Capital cost per MW (₹)
    #[arg(long)]
    capital_cost_per_mw: Option<f64>,
    /// Subsidy / VGF per MW (₹)
    #[arg(long)]
    subsidy_per_mw: Option<f64>,
    /// Tariff (₹/kWh)
    #[arg(long)]
    tariff: Option<f64>,
    /// O&M cost per MW in year 1 (₹)
    #[arg(long)]
    om_cost_per_mw: Option<f64>,
    /// O&M escalation rate (%)
    #[arg(long)]
    om_escalation_pct: Option<f64>,

    // Loan and tax
    /// Loan portion of the effective capital cost (%)
    #[arg(long)]
    loan_pct: Option<f64>,
    /// Loan interest rate (%)
    #[arg(long)]
    interest_rate_pct: Option<f64>,
    /// Loan tenure (years)
    #[arg(long)]
    loan_tenure: Option<u32>,
    /// Depreciation rate (%)
    #[arg(long)]
    depreciation_pct: Option<f64>,
    /// Income tax rate (%)
    #[arg(long)]
    tax_pct: Option<f64>,
    /// Expected return on equity (%)
    #[arg(long)]
    roe_pct: Option<f64>,

    // Policies
    #[arg(long, value_enum, default_value_t = AmortizationArg::Annuity)]
    amortization: AmortizationArg,
    #[arg(long, value_enum, default_value_t = EquityDiscountArg::CostOfEquity)]
    equity_discount: EquityDiscountArg,
    #[arg(long, value_enum, default_value_t = PaybackArg::Total)]
    payback_basis: PaybackArg,

    // Output
    /// Export the cash flow table as CSV
    #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_CSV_PATH)]
    csv: Option<PathBuf>,
    /// Print a JSON report instead of the console summary
    #[arg(long)]
    json: bool,
    /// Number of table rows to print
    #[arg(long)]
    rows: Option<usize>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PanelArg {
    Bifacial,
    Monocrystalline,
    Polycrystalline,
}

impl From<PanelArg> for PanelType {
    fn from(arg: PanelArg) -> Self {
        match arg {
            PanelArg::Bifacial => PanelType::Bifacial,
            PanelArg::Monocrystalline => PanelType::Monocrystalline,
            PanelArg::Polycrystalline => PanelType::Polycrystalline,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AmortizationArg {
    Annuity,
    FlatInterest,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EquityDiscountArg {
    CostOfEquity,
    Wacc,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PaybackArg {
    Total,
    Project,
    Equity,
}

impl Cli {
    fn config(&self) -> ProjectionConfig {
        ProjectionConfig {
            amortization: match self.amortization {
                AmortizationArg::Annuity => AmortizationMethod::Annuity,
                AmortizationArg::FlatInterest => AmortizationMethod::FlatInterest,
            },
            equity_discount: match self.equity_discount {
                EquityDiscountArg::CostOfEquity => EquityDiscountBasis::CostOfEquity,
                EquityDiscountArg::Wacc => EquityDiscountBasis::Wacc,
            },
            payback_basis: match self.payback_basis {
                PaybackArg::Total => PaybackBasis::Total,
                PaybackArg::Project => PaybackBasis::Project,
                PaybackArg::Equity => PaybackBasis::Equity,
            },
        }
    }

    /// Defaults, then the scenario file, then the panel preset, then flags
    fn inputs(&self) -> anyhow::Result<ScenarioInputs> {
        let mut inputs = match &self.scenario {
            Some(path) => scenario::load_scenario(path)
                .with_context(|| format!("Failed to load scenario {}", path.display()))?,
            None => ScenarioInputs::default(),
        };

        if let Some(panel) = self.panel {
            inputs.capital_cost_per_mw = PanelType::from(panel).capital_cost_per_mw();
        }

        let pct = |v: f64| v / 100.0;

        if let Some(v) = self.capacity_mw {
            inputs.plant_capacity_mw = v;
        }
        if let Some(v) = self.dc_overload_factor {
            inputs.dc_overload_factor = v;
        }
        if let Some(irradiation) = self.irradiation {
            inputs.cuf = estimate_cuf(irradiation, self.performance_ratio);
        }
        if let Some(v) = self.cuf_pct {
            inputs.cuf = pct(v);
        }
        if let Some(v) = self.project_life {
            inputs.project_life = v;
        }
        if let Some(v) = self.degradation_pct {
            inputs.degradation = pct(v);
        }
        if let Some(v) = self.capital_cost_per_mw {
            inputs.capital_cost_per_mw = v;
        }
        if let Some(v) = self.subsidy_per_mw {
            inputs.subsidy_per_mw = v;
        }
        if let Some(v) = self.tariff {
            inputs.tariff = v;
        }
        if let Some(v) = self.om_cost_per_mw {
            inputs.om_cost_per_mw = v;
        }
        if let Some(v) = self.om_escalation_pct {
            inputs.om_escalation = pct(v);
        }
        if let Some(v) = self.loan_pct {
            inputs.loan_percent = v;
        }
        if let Some(v) = self.interest_rate_pct {
            inputs.loan_interest_rate = pct(v);
        }
        if let Some(v) = self.loan_tenure {
            inputs.loan_tenure = v;
        }
        if let Some(v) = self.depreciation_pct {
            inputs.depreciation_rate = pct(v);
        }
        if let Some(v) = self.tax_pct {
            inputs.tax_rate = pct(v);
        }
        if let Some(v) = self.roe_pct {
            inputs.return_on_equity = pct(v);
        }

        Ok(inputs)
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let inputs = cli.inputs()?;
    let engine = ProjectionEngine::new(cli.config());
    let result = engine.run(&inputs).context("Invalid scenario")?;
    info!(
        "Projected {} years, NPV {:?}, feasible {}",
        result.project_life(),
        result.summary.npv,
        result.summary.feasible
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.json {
        report::write_json(&mut out, &JsonReport::new(&inputs, engine.config(), &result))?;
    } else {
        report::write_summary(&mut out, &inputs, &result)?;
        writeln!(out)?;
        report::write_table(&mut out, &result, cli.rows)?;
    }

    if let Some(path) = &cli.csv {
        report::export_cashflow_csv(path, &result)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        if !cli.json {
            writeln!(out, "\nCash flow table written to: {}", path.display())?;
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {:#}", err);
        process::exit(1);
    }
}
