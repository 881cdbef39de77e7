/// serializable views handed to the request boundary
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::customer::Customer;
use crate::decimal::Money;
use crate::eligibility::EligibilityDecision;
use crate::errors::Result;
use crate::loan::Loan;
use crate::payments::LoanSummary;
use crate::types::{ApprovalStatus, CustomerId, LoanId, LoanStatus};

/// decimal places of the suggested rate in responses
const RESPONSE_RATE_DP: u32 = 2;

/// answer to an eligibility check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResponse {
    pub customer_id: CustomerId,
    pub credit_score: u8,
    /// truncated to whole units
    pub approved_amount: i64,
    pub approval_status: ApprovalStatus,
    /// annual percentage
    #[serde(with = "rust_decimal::serde::float")]
    pub suggested_interest_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_emi: Decimal,
}

impl EligibilityResponse {
    pub fn from_decision(customer_id: CustomerId, decision: &EligibilityDecision) -> Result<Self> {
        Ok(EligibilityResponse {
            customer_id,
            credit_score: decision.credit_score.value(),
            approved_amount: decision.approved_whole_units()?,
            approval_status: decision.status,
            suggested_interest_rate: decision.suggested_rate.round_percentage(RESPONSE_RATE_DP),
            monthly_emi: decision.monthly_emi.as_decimal(),
        })
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerView {
    pub customer_id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub phone_number: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_salary: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub approved_limit: Decimal,
}

impl CustomerView {
    pub fn from_customer(customer: &Customer) -> Self {
        CustomerView {
            customer_id: customer.customer_id(),
            first_name: customer.first_name().to_string(),
            last_name: customer.last_name().to_string(),
            age: customer.age(),
            phone_number: customer.phone_number().to_string(),
            monthly_salary: customer.monthly_salary().as_decimal(),
            approved_limit: customer.approved_limit().as_decimal(),
        }
    }
}

/// reply to a successful registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationView {
    pub message: String,
    pub customer_id: CustomerId,
    #[serde(with = "rust_decimal::serde::float")]
    pub approved_limit: Decimal,
    pub customer: CustomerView,
}

impl RegistrationView {
    pub fn from_customer(customer: &Customer) -> Self {
        RegistrationView {
            message: "Customer registered successfully".to_string(),
            customer_id: customer.customer_id(),
            approved_limit: customer.approved_limit().as_decimal(),
            customer: CustomerView::from_customer(customer),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// a loan with its derived repayment figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanView {
    pub loan_id: LoanId,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub loan_amount: Money,
    pub tenure: u32,
    /// annual percentage
    #[serde(with = "rust_decimal::serde::float")]
    pub interest_rate: Decimal,
    pub monthly_payment: Money,
    pub emis_paid_on_time: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: LoanStatus,
    pub summary: LoanSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_details: Option<CustomerView>,
}

impl LoanView {
    /// view as of `today`; the owner's details are attached
    pub fn from_loan(loan: &Loan, customer: &Customer, today: NaiveDate) -> Self {
        let mut view = Self::summary_only(loan, customer, today);
        view.customer_details = Some(CustomerView::from_customer(customer));
        view
    }

    /// view as listed under its owner, without repeating the owner's details
    pub fn summary_only(loan: &Loan, customer: &Customer, today: NaiveDate) -> Self {
        LoanView {
            loan_id: loan.loan_id(),
            customer_id: loan.customer_id(),
            customer_name: customer.full_name(),
            loan_amount: loan.loan_amount(),
            tenure: loan.tenure_months(),
            interest_rate: loan.interest_rate().as_percentage().normalize(),
            monthly_payment: loan.monthly_payment(),
            emis_paid_on_time: loan.emis_paid_on_time(),
            start_date: loan.start_date(),
            end_date: loan.end_date(),
            status: loan.status(today),
            summary: loan.summary(),
            customer_details: None,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// a customer and their loans, newest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerLoansView {
    pub customer: CustomerView,
    pub loans: Vec<LoanView>,
    pub total_loans: usize,
}

impl CustomerLoansView {
    pub fn new(customer: &Customer, loans: &[Loan], today: NaiveDate) -> Self {
        let loans: Vec<LoanView> = loans
            .iter()
            .map(|loan| LoanView::summary_only(loan, customer, today))
            .collect();

        CustomerLoansView {
            customer: CustomerView::from_customer(customer),
            total_loans: loans.len(),
            loans,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
