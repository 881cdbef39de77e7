use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{CreditError, Result};
use crate::payments::amortization::MAX_ANNUAL_RATE_PCT;
use crate::types::ApprovalStatus;

/// credit policy driving registration limits, request bounds and approval tiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditPolicy {
    /// approved limit = monthly salary x multiplier
    pub limit_multiplier: u32,
    pub registration: RegistrationBounds,
    pub request_bounds: RequestBounds,
    /// ordered by descending `min_score`, first match wins
    pub tiers: Vec<ApprovalTier>,
    /// hard cap on any suggested rate
    pub rate_ceiling: Rate,
    /// error messages kept per imported file
    pub import_error_cap: usize,
}

/// customer registration bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegistrationBounds {
    pub min_age: u32,
    pub max_age: u32,
    pub min_monthly_salary: Money,
}

/// bounds on an eligibility or loan request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RequestBounds {
    pub min_amount: Money,
    pub min_rate: Rate,
    pub max_rate: Rate,
    pub min_tenure_months: u32,
    pub max_tenure_months: u32,
}

/// one bracket of the approval ladder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalTier {
    pub name: String,
    pub min_score: u8,
    /// share of the requested amount that can be approved
    pub approved_fraction: Decimal,
    pub rate_surcharge: Rate,
    /// status reported when headroom leaves nothing to approve
    pub exhausted_status: ApprovalStatus,
}

impl ApprovalTier {
    fn new(
        name: &str,
        min_score: u8,
        approved_fraction: Decimal,
        surcharge_pct: Decimal,
        exhausted_status: ApprovalStatus,
    ) -> Self {
        Self {
            name: name.to_string(),
            min_score,
            approved_fraction,
            rate_surcharge: Rate::from_percentage(surcharge_pct),
            exhausted_status,
        }
    }

    /// `approved` at the full request, `partial` below it, and the tier's
    /// exhausted status when nothing is approved
    pub fn status_for(&self, approved: Money, requested: Money) -> ApprovalStatus {
        if approved.is_positive() && approved >= requested {
            ApprovalStatus::Approved
        } else if approved.is_positive() {
            ApprovalStatus::Partial
        } else {
            self.exhausted_status
        }
    }
}

impl RequestBounds {
    /// check a request against the bounds
    pub fn check(&self, amount: Money, rate: Rate, tenure_months: u32) -> Result<()> {
        if amount < self.min_amount {
            return Err(CreditError::validation(
                "loan_amount",
                format!("must be at least {}", self.min_amount),
            ));
        }

        if !amount.is_whole() {
            return Err(CreditError::validation("loan_amount", "must be a whole amount"));
        }

        if rate < self.min_rate || rate > self.max_rate {
            return Err(CreditError::validation(
                "interest_rate",
                format!("must be between {} and {}", self.min_rate, self.max_rate),
            ));
        }

        if tenure_months < self.min_tenure_months || tenure_months > self.max_tenure_months {
            return Err(CreditError::validation(
                "tenure",
                format!(
                    "must be between {} and {} months",
                    self.min_tenure_months, self.max_tenure_months
                ),
            ));
        }

        Ok(())
    }
}

impl RegistrationBounds {
    pub fn check(&self, age: u32, monthly_salary: Money) -> Result<()> {
        if age < self.min_age || age > self.max_age {
            return Err(CreditError::validation(
                "age",
                format!("must be between {} and {}", self.min_age, self.max_age),
            ));
        }

        if monthly_salary < self.min_monthly_salary {
            return Err(CreditError::validation(
                "monthly_salary",
                format!("must be at least {}", self.min_monthly_salary),
            ));
        }

        if !monthly_salary.is_whole() {
            return Err(CreditError::validation("monthly_salary", "must be a whole amount"));
        }

        Ok(())
    }
}

impl CreditPolicy {
    /// the standard lending policy
    pub fn standard() -> Self {
        Self {
            limit_multiplier: 36,
            registration: RegistrationBounds {
                min_age: 18,
                max_age: 100,
                min_monthly_salary: Money::from_major(1),
            },
            request_bounds: RequestBounds {
                min_amount: Money::from_major(1),
                min_rate: Rate::from_percentage(dec!(0.1)),
                max_rate: Rate::from_percentage(dec!(50)),
                min_tenure_months: 1,
                max_tenure_months: 360,
            },
            tiers: vec![
                ApprovalTier::new("prime", 7, dec!(1), dec!(0), ApprovalStatus::Partial),
                ApprovalTier::new("near_prime", 5, dec!(0.8), dec!(2), ApprovalStatus::Rejected),
                ApprovalTier::new("subprime", 3, dec!(0.6), dec!(4), ApprovalStatus::Rejected),
                ApprovalTier::new("decline", 0, dec!(0), dec!(6), ApprovalStatus::Rejected),
            ],
            rate_ceiling: Rate::from_percentage(dec!(50)),
            import_error_cap: 10,
        }
    }

    /// load a policy from json and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let policy: CreditPolicy = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// first tier whose minimum score the given score reaches
    pub fn tier_for(&self, score: u8) -> Result<&ApprovalTier> {
        self.tiers
            .iter()
            .find(|tier| score >= tier.min_score)
            .ok_or(CreditError::InvalidConfiguration {
                message: format!("no approval tier covers score {}", score),
            })
    }

    pub fn validate(&self) -> Result<()> {
        if self.limit_multiplier == 0 {
            return Err(CreditError::InvalidConfiguration {
                message: "limit multiplier must be positive".to_string(),
            });
        }

        if self.tiers.is_empty() {
            return Err(CreditError::InvalidConfiguration {
                message: "at least one approval tier is required".to_string(),
            });
        }

        if self.tiers.windows(2).any(|pair| pair[0].min_score <= pair[1].min_score) {
            return Err(CreditError::InvalidConfiguration {
                message: "approval tiers must be ordered by strictly descending min_score".to_string(),
            });
        }

        if self.tiers.last().map(|tier| tier.min_score > 1).unwrap_or(true) {
            return Err(CreditError::InvalidConfiguration {
                message: "lowest approval tier must cover score 1".to_string(),
            });
        }

        for tier in &self.tiers {
            if tier.approved_fraction < Decimal::ZERO || tier.approved_fraction > Decimal::ONE {
                return Err(CreditError::InvalidConfiguration {
                    message: format!("tier {} approved fraction must be within [0, 1]", tier.name),
                });
            }
            if tier.exhausted_status == ApprovalStatus::Approved {
                return Err(CreditError::InvalidConfiguration {
                    message: format!("tier {} cannot approve an empty amount", tier.name),
                });
            }
            if tier.rate_surcharge < Rate::ZERO {
                return Err(CreditError::InvalidConfiguration {
                    message: format!("tier {} rate surcharge must not be negative", tier.name),
                });
            }
        }

        let bounds = &self.request_bounds;
        if bounds.min_rate > bounds.max_rate || bounds.min_tenure_months > bounds.max_tenure_months {
            return Err(CreditError::InvalidConfiguration {
                message: "request bounds are inverted".to_string(),
            });
        }

        if bounds.min_tenure_months == 0 || !bounds.min_amount.is_positive() {
            return Err(CreditError::InvalidConfiguration {
                message: "minimum amount and tenure must be positive".to_string(),
            });
        }

        let emi_max = Rate::from_percentage(MAX_ANNUAL_RATE_PCT);
        if self.rate_ceiling <= Rate::ZERO || self.rate_ceiling > emi_max || bounds.max_rate > emi_max {
            return Err(CreditError::InvalidConfiguration {
                message: format!("rate ceiling and maximum rate must be within (0, {}]", emi_max),
            });
        }

        Ok(())
    }
}

impl Default for CreditPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_policy_is_valid() {
        let policy = CreditPolicy::standard();
        assert!(policy.validate().is_ok());
        assert_eq!(policy.limit_multiplier, 36);
        assert_eq!(policy.import_error_cap, 10);
    }

    #[test]
    fn test_tier_lookup() {
        let policy = CreditPolicy::standard();
        assert_eq!(policy.tier_for(10).unwrap().name, "prime");
        assert_eq!(policy.tier_for(7).unwrap().name, "prime");
        assert_eq!(policy.tier_for(6).unwrap().name, "near_prime");
        assert_eq!(policy.tier_for(5).unwrap().name, "near_prime");
        assert_eq!(policy.tier_for(4).unwrap().name, "subprime");
        assert_eq!(policy.tier_for(3).unwrap().name, "subprime");
        assert_eq!(policy.tier_for(2).unwrap().name, "decline");
        assert_eq!(policy.tier_for(1).unwrap().name, "decline");
    }

    #[test]
    fn test_tier_status_when_nothing_approved() {
        let policy = CreditPolicy::standard();
        let requested = Money::from_major(100_000);

        let prime = policy.tier_for(9).unwrap();
        assert_eq!(prime.status_for(requested, requested), ApprovalStatus::Approved);
        assert_eq!(prime.status_for(Money::from_major(1), requested), ApprovalStatus::Partial);
        assert_eq!(prime.status_for(Money::ZERO, requested), ApprovalStatus::Partial);

        let near_prime = policy.tier_for(5).unwrap();
        assert_eq!(near_prime.status_for(Money::from_major(80_000), requested), ApprovalStatus::Partial);
        assert_eq!(near_prime.status_for(Money::ZERO, requested), ApprovalStatus::Rejected);

        assert_eq!(policy.tier_for(1).unwrap().status_for(Money::ZERO, requested), ApprovalStatus::Rejected);
    }

    #[test]
    fn test_request_bounds() {
        let bounds = CreditPolicy::standard().request_bounds;
        let rate = Rate::from_percentage(dec!(12));

        assert!(bounds.check(Money::from_major(1), rate, 1).is_ok());
        assert!(bounds.check(Money::from_major(100_000), Rate::from_percentage(dec!(50)), 360).is_ok());
        assert!(bounds.check(Money::ZERO, rate, 12).is_err());
        assert!(bounds.check(Money::from_major(1000), Rate::from_percentage(dec!(0.05)), 12).is_err());
        assert!(bounds.check(Money::from_major(1000), Rate::from_percentage(dec!(50.01)), 12).is_err());
        assert!(bounds.check(Money::from_major(1000), rate, 0).is_err());
        assert!(bounds.check(Money::from_major(1000), rate, 361).is_err());
        assert!(matches!(
            bounds.check(Money::from_decimal(dec!(1000.5)), rate, 12),
            Err(CreditError::Validation { .. })
        ));
    }

    #[test]
    fn test_registration_bounds() {
        let bounds = CreditPolicy::standard().registration;
        assert!(bounds.check(30, Money::from_major(1)).is_ok());
        assert!(bounds.check(30, Money::ZERO).is_err());
        assert!(bounds.check(30, Money::from_decimal(dec!(1000.75))).is_err());
        assert!(bounds.check(17, Money::from_major(1000)).is_err());
    }

    #[test]
    fn test_policy_json_roundtrip() {
        let policy = CreditPolicy::standard();
        let json = policy.to_json_pretty().unwrap();
        let loaded = CreditPolicy::from_json(&json).unwrap();
        assert_eq!(loaded, policy);
    }

    #[test]
    fn test_unordered_tiers_rejected() {
        let mut policy = CreditPolicy::standard();
        policy.tiers.swap(0, 1);
        assert!(matches!(
            policy.validate(),
            Err(CreditError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_rate_ceiling_above_emi_range_rejected() {
        let mut policy = CreditPolicy::standard();
        policy.rate_ceiling = Rate::from_percentage(dec!(60));
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_uncovered_low_scores_rejected() {
        let mut policy = CreditPolicy::standard();
        policy.tiers.pop();
        assert!(policy.validate().is_err());
    }
}
