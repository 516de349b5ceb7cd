//! Term loan debt service schedules

use serde::{Deserialize, Serialize};

/// Debt service policy for the term loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AmortizationMethod {
    /// Level annual payment; interest on the declining balance
    #[default]
    Annuity,
    /// Interest on the original principal for every year of the tenure.
    /// Principal is never repaid inside the projection.
    FlatInterest,
}

/// Debt service for one projection year
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DebtService {
    pub interest: f64,
    pub principal: f64,
    /// Balance outstanding after this year's payment
    pub closing_balance: f64,
}

/// Year-by-year debt service for the projection horizon
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanSchedule {
    pub method: AmortizationMethod,
    /// Level annual payment (annuity only, `None` when no debt is serviced)
    pub annual_payment: Option<f64>,
    /// Index 0 = year 1
    rows: Vec<DebtService>,
}

impl LoanSchedule {
    /// Build the schedule for `years` projection years
    pub fn build(
        method: AmortizationMethod,
        loan_amount: f64,
        interest_rate: f64,
        tenure: u32,
        years: u32,
    ) -> Self {
        let principal_outstanding = loan_amount.max(0.0);

        // No tenure or nothing borrowed: no debt service at all
        if tenure == 0 || principal_outstanding <= 0.0 {
            let idle = DebtService {
                closing_balance: principal_outstanding,
                ..DebtService::default()
            };
            return Self {
                method,
                annual_payment: None,
                rows: vec![idle; years as usize],
            };
        }

        match method {
            AmortizationMethod::Annuity => {
                Self::annuity(principal_outstanding, interest_rate, tenure, years)
            }
            AmortizationMethod::FlatInterest => {
                Self::flat_interest(principal_outstanding, interest_rate, tenure, years)
            }
        }
    }

    fn annuity(loan_amount: f64, rate: f64, tenure: u32, years: u32) -> Self {
        let payment = annuity_payment(loan_amount, rate, tenure);
        let mut balance = loan_amount;
        let mut rows = Vec::with_capacity(years as usize);

        for year in 1..=years {
            if year <= tenure && balance > 0.0 {
                let interest = balance * rate;
                let mut principal = payment - interest;
                // Final instalment clears whatever rounding left behind
                if year == tenure || principal >= balance {
                    principal = balance;
                }
                balance = (balance - principal).max(0.0);
                rows.push(DebtService {
                    interest,
                    principal,
                    closing_balance: balance,
                });
            } else {
                rows.push(DebtService {
                    closing_balance: balance,
                    ..DebtService::default()
                });
            }
        }

        Self {
            method: AmortizationMethod::Annuity,
            annual_payment: Some(payment),
            rows,
        }
    }

    fn flat_interest(loan_amount: f64, rate: f64, tenure: u32, years: u32) -> Self {
        let rows = (1..=years)
            .map(|year| DebtService {
                interest: if year <= tenure { loan_amount * rate } else { 0.0 },
                principal: 0.0,
                closing_balance: loan_amount,
            })
            .collect();

        Self {
            method: AmortizationMethod::FlatInterest,
            annual_payment: None,
            rows,
        }
    }

    /// Debt service in a projection year (1-based). Years outside the
    /// schedule carry no debt service.
    pub fn year(&self, year: u32) -> DebtService {
        if year == 0 {
            return DebtService::default();
        }
        self.rows
            .get((year - 1) as usize)
            .copied()
            .unwrap_or_default()
    }

    pub fn total_interest(&self) -> f64 {
        self.rows.iter().map(|r| r.interest).sum()
    }
}

/// Level annual payment that retires `principal` over `tenure` years.
///
/// Falls back to straight-line repayment when the rate is zero. When the
/// compounding factor overflows the payment is the interest-only limit.
pub fn annuity_payment(principal: f64, rate: f64, tenure: u32) -> f64 {
    if tenure == 0 {
        return 0.0;
    }
    if rate.abs() < 1e-12 {
        return principal / tenure as f64;
    }
    let growth = match i32::try_from(tenure) {
        Ok(n) => (1.0 + rate).powi(n),
        Err(_) => f64::INFINITY,
    };
    if !growth.is_finite() {
        return principal * rate;
    }
    principal * rate * growth / (growth - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_annuity_payment() {
        // 1,000,000 at 10% over 10 years
        let payment = annuity_payment(1_000_000.0, 0.10, 10);
        assert_relative_eq!(payment, 162_745.39, epsilon = 0.01);
    }

    #[test]
    fn test_annuity_payment_very_long_tenure() {
        // (1.1)^10000 overflows; the payment tends to interest only
        let payment = annuity_payment(1_000_000.0, 0.10, 10_000);
        assert!(payment.is_finite());
        assert_relative_eq!(payment, 100_000.0, max_relative = 1e-12);

        let payment = annuity_payment(1_000_000.0, 0.10, u32::MAX);
        assert!(payment.is_finite());
        assert_relative_eq!(payment, 100_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_annuity_schedule_retires_loan() {
        let schedule = LoanSchedule::build(AmortizationMethod::Annuity, 46_200_000.0, 0.10, 10, 25);

        let mut prev_balance = 46_200_000.0;
        for year in 1..=25 {
            let ds = schedule.year(year);
            assert!(ds.closing_balance <= prev_balance);
            prev_balance = ds.closing_balance;
        }

        assert_eq!(schedule.year(10).closing_balance, 0.0);
        for year in 11..=25 {
            let ds = schedule.year(year);
            assert_eq!(ds.interest, 0.0);
            assert_eq!(ds.principal, 0.0);
        }

        // Year 1 interest on the full balance
        assert_relative_eq!(schedule.year(1).interest, 4_620_000.0, max_relative = 1e-12);
        let repaid: f64 = (1..=10).map(|y| schedule.year(y).principal).sum();
        assert_relative_eq!(repaid, 46_200_000.0, max_relative = 1e-9);
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let schedule = LoanSchedule::build(AmortizationMethod::Annuity, 1_000.0, 0.0, 4, 10);
        assert_relative_eq!(schedule.year(1).principal, 250.0);
        assert_eq!(schedule.year(1).interest, 0.0);
        assert_eq!(schedule.year(4).closing_balance, 0.0);
    }

    #[test]
    fn test_flat_interest_on_original_principal() {
        let schedule = LoanSchedule::build(AmortizationMethod::FlatInterest, 1_000_000.0, 0.10, 10, 25);

        for year in 1..=10 {
            let ds = schedule.year(year);
            assert_relative_eq!(ds.interest, 100_000.0, max_relative = 1e-12);
            assert_eq!(ds.principal, 0.0);
        }
        assert_eq!(schedule.year(11).interest, 0.0);
        assert_relative_eq!(schedule.total_interest(), 1_000_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_zero_tenure_has_no_debt_service() {
        for method in [AmortizationMethod::Annuity, AmortizationMethod::FlatInterest] {
            let schedule = LoanSchedule::build(method, 1_000_000.0, 0.10, 0, 25);
            assert!(schedule.annual_payment.is_none());
            for year in 1..=25 {
                let ds = schedule.year(year);
                assert_eq!(ds.interest, 0.0);
                assert_eq!(ds.principal, 0.0);
            }
        }
    }

    #[test]
    fn test_tenure_longer_than_projection() {
        let schedule = LoanSchedule::build(AmortizationMethod::Annuity, 1_000.0, 0.05, 40, 10);
        assert!(schedule.year(10).closing_balance > 0.0);
        assert_eq!(schedule.year(11), DebtService::default());
    }
}
