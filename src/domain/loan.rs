use crate::error::{LoanError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The three inputs of a level-payment loan.
///
/// `annual_rate_percent` is expressed in percent (`6.5` means 6.5%) and
/// `term_years` may be fractional (`2.5` is thirty monthly payments).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTerms {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub term_years: f64,
}

impl LoanTerms {
    pub fn new(principal: f64, annual_rate_percent: f64, term_years: f64) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_years,
        }
    }

    pub fn summary(&self) -> Result<LoanSummary> {
        compute_loan_summary(self.principal, self.annual_rate_percent, self.term_years)
    }

    pub fn schedule(&self) -> Result<Vec<AmortizationEntry>> {
        generate_schedule(self.principal, self.annual_rate_percent, self.term_years)
    }
}

/// Derived figures for a loan, computed once per calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanSummary {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub term_years: f64,
    pub monthly_rate: f64,
    pub number_of_payments: u32,
    pub monthly_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
}

impl LoanSummary {
    /// True when every monetary and input field is a finite number.
    ///
    /// Summaries received from outside the engine (saved calculations) are
    /// checked with this before they are accepted.
    pub fn is_well_formed(&self) -> bool {
        [
            self.principal,
            self.annual_rate_percent,
            self.term_years,
            self.monthly_payment,
            self.total_payment,
            self.total_interest,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    pub fn terms(&self) -> LoanTerms {
        LoanTerms::new(self.principal, self.annual_rate_percent, self.term_years)
    }
}

/// One row of an amortization schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationEntry {
    /// 1-based position in the schedule.
    pub payment_index: u32,
    pub monthly_payment: f64,
    pub interest_payment: f64,
    pub principal_payment: f64,
    /// Balance left after this payment, never negative.
    pub remaining_balance: f64,
}

/// Upper bound on the schedule length, 1,000 years of monthly payments.
pub const MAX_NUMBER_OF_PAYMENTS: u32 = 12_000;

/// Computes the level monthly payment and loan totals.
///
/// Uses the annuity formula `P * r(1+r)^n / ((1+r)^n - 1)` with
/// `r = annual_rate_percent / 100 / 12` and `n = round(term_years * 12)`.
/// A zero rate degenerates to `P / n` with no interest.
///
/// # Errors
///
/// Returns [`LoanError::Domain`] when an input is not finite, when the term
/// rounds to zero payments or to more than [`MAX_NUMBER_OF_PAYMENTS`], or
/// when the compounding factor overflows.
pub fn compute_loan_summary(
    principal: f64,
    annual_rate_percent: f64,
    term_years: f64,
) -> Result<LoanSummary> {
    if !principal.is_finite() || !annual_rate_percent.is_finite() || !term_years.is_finite() {
        return Err(LoanError::Domain("inputs must be finite numbers".to_string()));
    }

    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    let periods = (term_years * 12.0).round();
    if periods < 1.0 {
        return Err(LoanError::Domain("term too short".to_string()));
    }
    if periods > f64::from(MAX_NUMBER_OF_PAYMENTS) {
        return Err(LoanError::Domain("term too long".to_string()));
    }
    let number_of_payments = periods as u32;
    let n = f64::from(number_of_payments);

    let (monthly_payment, total_payment, total_interest) = if monthly_rate == 0.0 {
        (principal / n, principal, 0.0)
    } else {
        // (1 + r)^n - 1 without cancellation for tiny r
        let growth_minus_one = (n * monthly_rate.ln_1p()).exp_m1();
        let growth = 1.0 + growth_minus_one;
        if !growth.is_finite() {
            return Err(LoanError::Domain(
                "compounding factor is not finite".to_string(),
            ));
        }
        let monthly_payment = principal * (monthly_rate * growth) / growth_minus_one;
        if !monthly_payment.is_finite() {
            return Err(LoanError::Domain(
                "monthly payment is not finite".to_string(),
            ));
        }
        let total_payment = monthly_payment * n;
        (monthly_payment, total_payment, total_payment - principal)
    };

    debug!(
        principal,
        annual_rate_percent,
        term_years,
        number_of_payments,
        monthly_payment,
        "computed loan summary"
    );

    Ok(LoanSummary {
        principal,
        annual_rate_percent,
        term_years,
        monthly_rate,
        number_of_payments,
        monthly_payment,
        total_payment,
        total_interest,
    })
}

/// Builds the full payment-by-payment schedule for a loan.
///
/// The returned vector has exactly `number_of_payments` entries. Reported
/// balances are clamped at zero and the final balance is set to exactly zero
/// so floating-point drift never shows as a residual or an overpayment.
pub fn generate_schedule(
    principal: f64,
    annual_rate_percent: f64,
    term_years: f64,
) -> Result<Vec<AmortizationEntry>> {
    let summary = compute_loan_summary(principal, annual_rate_percent, term_years)?;
    let LoanSummary {
        monthly_payment,
        monthly_rate,
        number_of_payments,
        ..
    } = summary;

    let mut schedule = Vec::with_capacity(number_of_payments as usize);

    if monthly_rate == 0.0 {
        for index in 1..=number_of_payments {
            let balance = if index == number_of_payments {
                0.0
            } else {
                principal - monthly_payment * f64::from(index)
            };
            schedule.push(AmortizationEntry {
                payment_index: index,
                monthly_payment,
                interest_payment: 0.0,
                principal_payment: monthly_payment,
                remaining_balance: balance.max(0.0),
            });
        }
        return Ok(schedule);
    }

    let mut remaining_balance = principal;
    for index in 1..=number_of_payments {
        let interest_payment = remaining_balance * monthly_rate;
        let principal_payment = monthly_payment - interest_payment;
        remaining_balance -= principal_payment;

        if index == number_of_payments {
            if remaining_balance.abs() > 1e-6 * principal.abs().max(1.0) {
                debug!(remaining_balance, "absorbing final balance drift");
            }
            remaining_balance = 0.0;
        }

        schedule.push(AmortizationEntry {
            payment_index: index,
            monthly_payment,
            interest_payment,
            principal_payment,
            remaining_balance: remaining_balance.max(0.0),
        });
    }

    Ok(schedule)
}
