use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::CreditPolicy;
use crate::customer::Customer;
use crate::decimal::{Money, Rate};
use crate::errors::{CreditError, Result};
use crate::limits::{available_headroom, current_utilization};
use crate::payments::compute_emi;
use crate::scoring::{self, CreditScore};
use crate::types::{ApprovalStatus, CustomerId, LoanHistory};

/// eligibility check as received from the request boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityRequest {
    pub customer_id: CustomerId,
    pub loan_amount: Money,
    /// annual percentage on the wire
    #[serde(with = "crate::decimal::percentage")]
    pub interest_rate: Rate,
    #[serde(rename = "tenure")]
    pub tenure_months: u32,
}

/// everything the decision depends on, resolved up front
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EligibilityInput {
    pub credit_score: CreditScore,
    pub requested_amount: Money,
    pub requested_rate: Rate,
    pub tenure_months: u32,
    pub headroom: Money,
}

/// decision record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityDecision {
    pub credit_score: CreditScore,
    pub tier: String,
    pub status: ApprovalStatus,
    /// may carry a fraction; responses report whole units
    pub approved_amount: Money,
    #[serde(with = "crate::decimal::percentage")]
    pub suggested_rate: Rate,
    pub monthly_emi: Money,
}

impl EligibilityDecision {
    /// approved amount truncated to whole currency units
    pub fn approved_whole_units(&self) -> Result<i64> {
        self.approved_amount
            .whole_units()
            .ok_or(CreditError::CalculationError {
                message: format!("approved amount {} out of range", self.approved_amount),
            })
    }

    /// something can be lent; a high tier with no headroom is `partial` yet lends nothing
    pub fn is_approved(&self) -> bool {
        self.approved_amount.is_positive()
    }
}

/// tiered eligibility decisions under a credit policy
pub struct EligibilityDecider<'a> {
    policy: &'a CreditPolicy,
}

impl<'a> EligibilityDecider<'a> {
    pub fn new(policy: &'a CreditPolicy) -> Self {
        Self { policy }
    }

    /// decide on an explicit input
    pub fn decide(&self, input: &EligibilityInput) -> Result<EligibilityDecision> {
        decide(self.policy, input)
    }

    /// score the history, derive headroom from the customer's limit, then decide
    pub fn assess(
        &self,
        customer: &Customer,
        history: &[LoanHistory],
        request: &EligibilityRequest,
    ) -> Result<EligibilityDecision> {
        let credit_score = scoring::score(history);
        let utilization = current_utilization(history);
        let headroom = available_headroom(customer.approved_limit(), utilization);

        let input = EligibilityInput {
            credit_score,
            requested_amount: request.loan_amount,
            requested_rate: request.interest_rate,
            tenure_months: request.tenure_months,
            headroom,
        };

        self.decide(&input)
    }
}

/// pure tiered decision
///
/// The first tier whose minimum score is reached sets the share of the request
/// that may be approved (further capped by headroom, never below zero) and the
/// surcharge added to the requested rate. The suggested rate never exceeds the
/// policy ceiling.
pub fn decide(policy: &CreditPolicy, input: &EligibilityInput) -> Result<EligibilityDecision> {
    policy
        .request_bounds
        .check(input.requested_amount, input.requested_rate, input.tenure_months)?;

    let tier = policy.tier_for(input.credit_score.value())?;

    let approved_amount = input
        .requested_amount
        .scale(tier.approved_fraction)
        .min(input.headroom)
        .max(Money::ZERO);

    let status = tier.status_for(approved_amount, input.requested_amount);

    let suggested_rate = (input.requested_rate + tier.rate_surcharge).min(policy.rate_ceiling);

    let monthly_emi = if approved_amount.is_positive() {
        compute_emi(approved_amount, suggested_rate, input.tenure_months)?
    } else {
        Money::ZERO
    };

    debug!(
        "score {} ({}): requested {} at {}, headroom {} -> {} {} at {}",
        input.credit_score,
        tier.name,
        input.requested_amount,
        input.requested_rate,
        input.headroom,
        status,
        approved_amount,
        suggested_rate
    );

    Ok(EligibilityDecision {
        credit_score: input.credit_score,
        tier: tier.name.clone(),
        status,
        approved_amount,
        suggested_rate,
        monthly_emi,
    })
}
