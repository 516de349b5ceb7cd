use approx::{assert_abs_diff_eq, assert_relative_eq};
use solar_feasibility::projection::{
    project, AmortizationMethod, EquityDiscountBasis, PaybackBasis, ProjectionConfig, ProjectionEngine,
};
use solar_feasibility::scenario::{estimate_cuf, ScenarioInputs};

/// 1 MW reference plant: 1800 kWh/m²/yr at PR 0.85, 70% debt at 10% over 10 years
fn reference_plant() -> ScenarioInputs {
    ScenarioInputs {
        plant_capacity_mw: 1.0,
        dc_overload_factor: 1.2,
        cuf: estimate_cuf(1800.0, 0.85),
        project_life: 25,
        degradation: 0.005,
        capital_cost_per_mw: 55_000_000.0,
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

fn all_configs() -> Vec<ProjectionConfig> {
    let mut configs = Vec::new();
    for amortization in [AmortizationMethod::Annuity, AmortizationMethod::FlatInterest] {
        for equity_discount in [EquityDiscountBasis::CostOfEquity, EquityDiscountBasis::Wacc] {
            for payback_basis in [PaybackBasis::Total, PaybackBasis::Project, PaybackBasis::Equity] {
                configs.push(ProjectionConfig {
                    amortization,
                    equity_discount,
                    payback_basis,
                });
            }
        }
    }
    configs
}

#[test]
fn test_record_count_matches_project_life() {
    for life in [10, 17, 25, 35] {
        let inputs = ScenarioInputs { project_life: life, ..reference_plant() };
        let result = project(&inputs);
        assert_eq!(result.years.len(), life as usize + 1);
        for (i, row) in result.years.iter().enumerate() {
            assert_eq!(row.year as usize, i);
        }
    }
}

#[test]
fn test_reference_plant_year_one_and_outlay() {
    let inputs = reference_plant();
    let result = project(&inputs);

    // 1 * 1000 * 8760 * 0.174657 * 1.2
    assert_relative_eq!(result.years[1].energy_kwh, 1_836_000.0, max_relative = 1e-9);
    assert_relative_eq!(result.summary.energy_year1_kwh, result.years[1].energy_kwh);

    let capital = &result.summary.capital;
    assert_eq!(result.years[0].project_cf, -capital.effective_capital_cost);
    assert_eq!(result.years[0].equity_cf, -capital.equity_amount);
    assert_relative_eq!(capital.effective_capital_cost, 66_000_000.0, max_relative = 1e-12);
}

#[test]
fn test_spec_cuf_energy() {
    let inputs = ScenarioInputs { cuf: 0.1747, ..reference_plant() };
    let result = project(&inputs);
    assert_abs_diff_eq!(result.years[1].energy_kwh, 1_836_446.4, epsilon = 1e-3);
}

#[test]
fn test_energy_monotonic_with_degradation() {
    let result = project(&reference_plant());
    for pair in result.years[1..].windows(2) {
        assert!(pair[1].energy_kwh < pair[0].energy_kwh);
    }

    let flat = project(&ScenarioInputs { degradation: 0.0, ..reference_plant() });
    for pair in flat.years[1..].windows(2) {
        assert_eq!(pair[1].energy_kwh, pair[0].energy_kwh);
    }
}

#[test]
fn test_annuity_balance_retired_within_tenure() {
    for tenure in [1, 5, 10, 15] {
        let inputs = ScenarioInputs { loan_tenure: tenure, ..reference_plant() };
        let result = project(&inputs);

        for pair in result.years.windows(2) {
            assert!(pair[1].loan_balance <= pair[0].loan_balance);
        }

        let paid_off = result
            .years
            .iter()
            .position(|r| r.loan_balance == 0.0)
            .expect("balance should reach zero");
        assert!(paid_off as u32 <= tenure);

        for row in &result.years[paid_off + 1..] {
            assert_eq!(row.interest, 0.0);
            assert_eq!(row.principal, 0.0);
        }
    }
}

#[test]
fn test_zero_tenure_means_no_debt_service() {
    for config in all_configs() {
        let inputs = ScenarioInputs { loan_tenure: 0, ..reference_plant() };
        let result = ProjectionEngine::new(config).project(&inputs);

        for row in &result.years[1..] {
            assert_eq!(row.interest, 0.0);
            assert_eq!(row.principal, 0.0);
            assert_eq!(row.equity_cf, row.project_cf);
        }
    }
}

#[test]
fn test_feasible_iff_npv_positive() {
    for tariff in [1.0, 2.5, 3.5, 5.0, 8.0] {
        for config in all_configs() {
            let inputs = ScenarioInputs { tariff, ..reference_plant() };
            let result = ProjectionEngine::new(config).project(&inputs);
            let npv = result.summary.npv.unwrap();
            assert_eq!(result.summary.feasible, npv > 0.0);
        }
    }
}

#[test]
fn test_projection_is_deterministic() {
    let inputs = reference_plant();
    for config in all_configs() {
        let engine = ProjectionEngine::new(config);
        let first = engine.project(&inputs);
        let second = engine.project(&inputs);
        assert_eq!(first, second);
    }
}

#[test]
fn test_zero_cuf_leaves_lcoe_undefined() {
    let inputs = ScenarioInputs { cuf: 0.0, ..reference_plant() };
    let result = project(&inputs);

    assert!(result.summary.lcoe.is_none());
    assert!(result.summary.npv.is_some());
    assert!(result.summary.wacc.is_some());
    assert!(result.summary.irr_project.is_none());
}

#[test]
fn test_irr_zeroes_npv() {
    let result = project(&ScenarioInputs { tariff: 5.0, ..reference_plant() });
    let irr = result.summary.irr_project.expect("profitable plant has an IRR");
    let cashflows = result.project_cashflows();
    let npv_at_irr = solar_feasibility::projection::npv(irr, &cashflows);
    assert_abs_diff_eq!(npv_at_irr, 0.0, epsilon = 1.0);
}

#[test]
fn test_equity_irr_is_a_root_at_high_leverage() {
    for loan_percent in [90.0, 99.0, 99.9, 99.99] {
        for tariff in [3.5, 8.0] {
            let result = project(&ScenarioInputs { loan_percent, tariff, ..reference_plant() });
            let cashflows = result.equity_cashflows();
            if let Some(irr) = result.summary.irr_equity {
                let scale = cashflows.iter().fold(1.0_f64, |m, cf| m.max(cf.abs()));
                let npv_at_irr = solar_feasibility::projection::npv(irr, &cashflows);
                assert!(
                    npv_at_irr.abs() <= 1e-6 * scale,
                    "loan {}% tariff {}: NPV {} at IRR {}",
                    loan_percent,
                    tariff,
                    npv_at_irr,
                    irr
                );
            }
        }
    }
}

#[test]
fn test_equity_irr_undefined_when_outside_rate_bounds() {
    // A sliver of equity against strong cash flows: NPV stays positive
    // even at a 1000% discount rate
    let result = project(&ScenarioInputs { loan_percent: 99.9, tariff: 8.0, ..reference_plant() });
    assert!(result.equity_cashflows()[1..].iter().all(|&cf| cf > 0.0));
    assert!(result.summary.irr_equity.is_none());
    assert!(result.summary.irr_project.is_some());
}

#[test]
fn test_cumulative_columns_are_running_totals() {
    let result = project(&reference_plant());
    let mut running = 0.0;
    for row in &result.years {
        running += row.discounted_equity_cf.unwrap();
        assert_relative_eq!(row.cumulative_discounted_equity_cf.unwrap(), running, max_relative = 1e-12);
        assert_relative_eq!(
            row.discounted_total_cf.unwrap(),
            row.discounted_project_cf.unwrap() + row.discounted_equity_cf.unwrap(),
            max_relative = 1e-12
        );
    }
}

#[test]
fn test_validation_runs_before_projection() {
    let engine = ProjectionEngine::default();
    let bad = ScenarioInputs { loan_percent: 101.0, ..reference_plant() };
    assert!(engine.run(&bad).is_err());
}
