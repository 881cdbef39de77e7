use log::warn;

use crate::decimal::Money;
use crate::errors::{CreditError, Result};
use crate::types::LoanHistory;

/// approved limit set at registration
pub fn approved_limit_for_salary(monthly_salary: Money, multiplier: u32) -> Result<Money> {
    monthly_salary
        .checked_mul(multiplier)
        .ok_or(CreditError::CalculationError {
            message: format!("approved limit for salary {} x {} overflows", monthly_salary, multiplier),
        })
}

/// principal already committed to the customer
///
/// Every loan on record counts, whether or not it has been repaid.
pub fn current_utilization(history: &[LoanHistory]) -> Money {
    history.iter().map(|h| h.loan_amount).sum()
}

/// remaining room under the approved limit, negative when over-committed
pub fn available_headroom(approved_limit: Money, outstanding: Money) -> Money {
    approved_limit - outstanding
}

/// creation-time guard: utilization plus the new principal must stay within the limit
pub fn ensure_headroom(approved_limit: Money, utilization: Money, requested: Money) -> Result<()> {
    let committed = utilization
        .checked_add(requested)
        .ok_or(CreditError::CalculationError {
            message: format!("utilization {} plus requested {} overflows", utilization, requested),
        })?;

    if committed > approved_limit {
        let available = available_headroom(approved_limit, utilization);
        warn!(
            "credit limit exceeded: limit {}, utilized {}, requested {}",
            approved_limit, utilization, requested
        );
        return Err(CreditError::CreditLimitExceeded {
            available,
            requested,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn history(amounts: &[i64]) -> Vec<LoanHistory> {
        amounts
            .iter()
            .map(|&amount| LoanHistory::new(Money::from_major(amount), 12, 0))
            .collect()
    }

    #[test]
    fn test_limit_from_salary() {
        assert_eq!(
            approved_limit_for_salary(Money::from_major(10_000), 36).unwrap(),
            Money::from_major(360_000)
        );
    }

    #[test]
    fn test_oversized_figures_are_errors() {
        let huge = Money::from_decimal(Decimal::MAX);
        assert!(matches!(
            approved_limit_for_salary(huge, 36),
            Err(CreditError::CalculationError { .. })
        ));
        assert!(matches!(
            ensure_headroom(Money::from_major(360_000), Money::from_major(1), huge),
            Err(CreditError::CalculationError { .. })
        ));
    }

    #[test]
    fn test_utilization_counts_every_loan() {
        let loans = history(&[100_000, 150_000, 50_000]);
        assert_eq!(current_utilization(&loans), Money::from_major(300_000));
        assert_eq!(current_utilization(&[]), Money::ZERO);
    }

    #[test]
    fn test_headroom_may_go_negative() {
        let headroom = available_headroom(Money::from_major(100_000), Money::from_major(150_000));
        assert_eq!(headroom, Money::from_major(-50_000));
    }

    #[test]
    fn test_guard_rejects_over_limit() {
        let limit = Money::from_major(360_000);
        let utilization = current_utilization(&history(&[300_000]));

        let err = ensure_headroom(limit, utilization, Money::from_major(100_000)).unwrap_err();
        match err {
            CreditError::CreditLimitExceeded { available, requested } => {
                assert_eq!(available, Money::from_major(60_000));
                assert_eq!(requested, Money::from_major(100_000));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_guard_allows_exact_fit() {
        let limit = Money::from_major(360_000);
        let utilization = Money::from_major(300_000);
        assert!(ensure_headroom(limit, utilization, Money::from_major(60_000)).is_ok());
        assert!(ensure_headroom(limit, utilization, Money::from_major(60_001)).is_err());
    }
}
