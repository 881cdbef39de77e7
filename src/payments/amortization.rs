use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::decimal::{Money, Rate};
use crate::errors::{CreditError, Result};

/// decimal places an EMI is rounded to
pub const EMI_DP: u32 = 2;

/// highest annual rate the formula accepts
pub const MAX_ANNUAL_RATE_PCT: Decimal = dec!(50);

/// amortization calculator for fixed-rate equal installment loans
#[derive(Debug, Clone, Copy, Default)]
pub struct AmortizationCalculator;

impl AmortizationCalculator {
    pub fn new() -> Self {
        Self
    }

    /// monthly installment for the given terms, see [`compute_emi`]
    pub fn emi(&self, principal: Money, annual_rate: Rate, tenure_months: u32) -> Result<Money> {
        compute_emi(principal, annual_rate, tenure_months)
    }
}

/// calculate EMI rounded to 2 decimal places (half to even)
///
/// EMI = P * r * (1 + r)^n / ((1 + r)^n - 1) with r = annual percent / 1200.
/// A zero rate falls back to straight-line P / n.
pub fn compute_emi(principal: Money, annual_rate: Rate, tenure_months: u32) -> Result<Money> {
    if tenure_months == 0 {
        return Err(CreditError::InvalidInput {
            message: "tenure must be at least one month".to_string(),
        });
    }

    if !principal.is_positive() {
        return Err(CreditError::InvalidInput {
            message: format!("principal must be positive, got {}", principal),
        });
    }

    let rate_pct = annual_rate.as_percentage();
    if rate_pct < Decimal::ZERO || rate_pct > MAX_ANNUAL_RATE_PCT {
        return Err(CreditError::InvalidInput {
            message: format!("annual rate must be within [0, 50], got {}", annual_rate),
        });
    }

    let r = annual_rate.monthly_rate().as_decimal();

    if r.is_zero() {
        let straight = principal.as_decimal() / Decimal::from(tenure_months);
        return Ok(Money::from_decimal(straight.round_dp(EMI_DP)));
    }

    // (1 + r)^n
    let base = Decimal::ONE + r;
    let mut compound = Decimal::ONE;
    for _ in 0..tenure_months {
        compound = compound.checked_mul(base).ok_or(CreditError::CalculationError {
            message: "compound factor overflow".to_string(),
        })?;
    }

    let numerator = principal
        .as_decimal()
        .checked_mul(r)
        .and_then(|scaled| scaled.checked_mul(compound))
        .ok_or(CreditError::CalculationError {
            message: format!("emi for principal {} overflows", principal),
        })?;
    let denominator = compound - Decimal::ONE;

    Ok(Money::from_decimal((numerator / denominator).round_dp(EMI_DP)))
}
