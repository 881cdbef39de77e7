use log::debug;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::LoanHistory;

/// credit score on a 1..=10 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreditScore(u8);

impl CreditScore {
    pub const MIN: CreditScore = CreditScore(1);
    pub const MAX: CreditScore = CreditScore(10);

    /// clamp any value onto the 1..=10 scale
    pub fn new(value: u8) -> Self {
        CreditScore(value.clamp(Self::MIN.0, Self::MAX.0))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// decile mapping of an on-time percentage, inclusive on the lower edge
    pub fn from_on_time_percentage(percentage: Decimal) -> Self {
        let decile = (percentage / Decimal::TEN).floor();
        let score = decile.to_u8().unwrap_or(if decile.is_sign_negative() { 0 } else { u8::MAX });
        CreditScore::new(score.saturating_add(1))
    }
}

impl fmt::Display for CreditScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// aggregate on-time percentage across a history, None when there is nothing to rate
pub fn on_time_ratio(history: &[LoanHistory]) -> Option<Decimal> {
    let total_emis: u64 = history.iter().map(|h| h.tenure_months as u64).sum();
    if total_emis == 0 {
        return None;
    }

    let paid_on_time: u64 = history.iter().map(|h| h.emis_paid_on_time as u64).sum();
    Some(Decimal::from(paid_on_time) / Decimal::from(total_emis) * Decimal::ONE_HUNDRED)
}

/// score a customer from their loan history
///
/// New customers (no history, or no scheduled EMIs at all) get the maximum score.
pub fn score(history: &[LoanHistory]) -> CreditScore {
    match on_time_ratio(history) {
        None => CreditScore::MAX,
        Some(percentage) => {
            let score = CreditScore::from_on_time_percentage(percentage);
            debug!(
                "scored {} loans: {}% on time -> {}",
                history.len(),
                percentage.round_dp(2),
                score
            );
            score
        }
    }
}
