//! Internal Rate of Return (IRR) and discounting helpers
//!
//! Cash flows are annual, index 0 = year 0 (the construction outlay).

/// Calculate the Internal Rate of Return for a series of annual cash flows
/// using the Newton-Raphson method, falling back to bisection.
///
/// # Arguments
/// * `cashflows` - Cash flows (positive = inflow, negative = outflow)
///
/// # Returns
/// * `Option<f64>` - Annual IRR as a decimal (e.g., 0.05 for 5%), or None if no solution found
pub fn calculate_irr(cashflows: &[f64]) -> Option<f64> {
    if cashflows.is_empty() {
        return None;
    }

    // Need at least one sign change for a root to exist
    let has_positive = cashflows.iter().any(|&cf| cf > 1e-10);
    let has_negative = cashflows.iter().any(|&cf| cf < -1e-10);
    if !has_positive || !has_negative {
        return None;
    }

    let mut rate = 0.10; // Initial guess
    let tolerance = 1e-10;
    let max_iterations = 1000;
    let npv_tolerance = residual_tolerance(cashflows);

    for _ in 0..max_iterations {
        let (value, slope) = npv_and_derivative(cashflows, rate);

        if slope.abs() < 1e-20 || !slope.is_finite() {
            return calculate_irr_bisection(cashflows);
        }

        let new_rate = (rate - value / slope).max(-0.99).min(10.0);

        if (new_rate - rate).abs() < tolerance {
            // A step pinned at the rate bounds is not a root
            if npv(new_rate, cashflows).abs() <= npv_tolerance {
                return Some(new_rate);
            }
            return calculate_irr_bisection(cashflows);
        }

        rate = new_rate;
    }

    calculate_irr_bisection(cashflows)
}

/// Largest NPV still accepted as zero, scaled to the cash flow magnitude
fn residual_tolerance(cashflows: &[f64]) -> f64 {
    let scale = cashflows.iter().fold(1.0_f64, |m, cf| m.max(cf.abs()));
    scale * 1e-6
}

/// NPV and its derivative with respect to rate
fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        npv += cf / (1.0 + rate).powi(t as i32);
        if t > 0 {
            dnpv -= (t as f64) * cf / (1.0 + rate).powi(t as i32 + 1);
        }
    }

    (npv, dnpv)
}

/// Fallback IRR calculation using bisection
fn calculate_irr_bisection(cashflows: &[f64]) -> Option<f64> {
    let mut low = -0.99_f64;
    let mut high = 10.0_f64;
    let tolerance = 1e-10;
    let max_iterations = 1000;

    let mut npv_low = npv(low, cashflows);
    let npv_high = npv(high, cashflows);

    // No root bracketed in this interval
    if npv_low * npv_high > 0.0 {
        return None;
    }

    for _ in 0..max_iterations {
        let mid = (low + high) / 2.0;
        let npv_mid = npv(mid, cashflows);

        if npv_mid.abs() < tolerance || (high - low) / 2.0 < tolerance {
            return Some(mid);
        }

        if npv_mid * npv_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    None
}

/// Present value of annual cash flows at `rate`, year 0 undiscounted
pub fn npv(rate: f64, cashflows: &[f64]) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

/// Discount each cash flow to year 0 at `rate`
pub fn discount_series(cashflows: &[f64], rate: f64) -> Vec<f64> {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .collect()
}

/// Running totals in chronological order
pub fn cumulative(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .scan(0.0, |total, &v| {
            *total += v;
            Some(*total)
        })
        .collect()
}
