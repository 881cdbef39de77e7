pub mod amortization;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;

pub use amortization::{compute_emi, AmortizationCalculator, EMI_DP};

/// aggregate repayment figures, recomputed from the fixed EMI on demand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub total_amount: Money,
    pub total_interest: Money,
    pub remaining_amount: Money,
    pub on_time_percentage: Decimal,
}

impl LoanSummary {
    pub fn new(
        principal: Money,
        monthly_payment: Money,
        tenure_months: u32,
        emis_paid_on_time: u32,
    ) -> Self {
        let total_amount = monthly_payment * tenure_months;
        let remaining_months = tenure_months.saturating_sub(emis_paid_on_time);

        Self {
            total_amount,
            total_interest: total_amount - principal,
            remaining_amount: monthly_payment * remaining_months,
            on_time_percentage: on_time_percentage(emis_paid_on_time, tenure_months),
        }
    }
}

/// share of EMIs paid on time, 0 for a zero tenure
pub fn on_time_percentage(emis_paid_on_time: u32, tenure_months: u32) -> Decimal {
    if tenure_months == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(emis_paid_on_time) / Decimal::from(tenure_months) * Decimal::ONE_HUNDRED
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_summary_figures() {
        let principal = Money::from_major(100_000);
        let emi = compute_emi(principal, Rate::from_percentage(dec!(12)), 12).unwrap();
        let summary = LoanSummary::new(principal, emi, 12, 3);

        assert_eq!(summary.total_amount, emi * 12);
        assert_eq!(summary.total_amount.as_decimal(), dec!(106618.56));
        assert_eq!(summary.total_interest, summary.total_amount - principal);
        assert_eq!(summary.total_interest.as_decimal(), dec!(6618.56));
        assert_eq!(summary.remaining_amount, emi * 9);
        assert_eq!(summary.on_time_percentage, dec!(25));
    }

    #[test]
    fn test_fully_paid_loan() {
        let summary = LoanSummary::new(Money::from_major(1200), Money::from_major(100), 12, 12);
        assert_eq!(summary.remaining_amount, Money::ZERO);
        assert_eq!(summary.on_time_percentage, dec!(100));
        assert_eq!(summary.total_interest, Money::ZERO);
    }

    #[test]
    fn test_zero_tenure_percentage() {
        assert_eq!(on_time_percentage(0, 0), Decimal::ZERO);
    }
}
