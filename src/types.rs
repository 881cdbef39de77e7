use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::decimal::Money;

/// customer identifier, assigned sequentially by the ledger
pub type CustomerId = u64;

/// unique identifier for a loan
pub type LoanId = Uuid;

/// outcome of an eligibility check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    /// full requested amount approved
    Approved,
    /// some but not all of the requested amount approved
    Partial,
    /// nothing approved
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Partial => "partial",
            ApprovalStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// loan status relative to a given date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    /// end date on or after the reference date
    Active,
    /// end date before the reference date
    Completed,
}

impl LoanStatus {
    pub fn as_of(end_date: NaiveDate, today: NaiveDate) -> Self {
        if end_date >= today {
            LoanStatus::Active
        } else {
            LoanStatus::Completed
        }
    }
}

/// the slice of a loan that scoring and utilization look at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanHistory {
    pub loan_amount: Money,
    pub tenure_months: u32,
    pub emis_paid_on_time: u32,
}

impl LoanHistory {
    pub fn new(loan_amount: Money, tenure_months: u32, emis_paid_on_time: u32) -> Self {
        Self {
            loan_amount,
            tenure_months,
            emis_paid_on_time,
        }
    }
}
