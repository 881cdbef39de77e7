use thiserror::Error;

use crate::decimal::Money;
use crate::types::{CustomerId, LoanId};

#[derive(Error, Debug)]
pub enum CreditError {
    #[error("invalid {field}: {message}")]
    Validation {
        field: String,
        message: String,
    },

    #[error("customer not found: {customer_id}")]
    CustomerNotFound {
        customer_id: CustomerId,
    },

    #[error("loan not found: {loan_id}")]
    LoanNotFound {
        loan_id: LoanId,
    },

    #[error("invalid input: {message}")]
    InvalidInput {
        message: String,
    },

    #[error("loan amount exceeds available credit limit: available {available}, requested {requested}")]
    CreditLimitExceeded {
        available: Money,
        requested: Money,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl CreditError {
    pub(crate) fn validation(field: &str, message: impl Into<String>) -> Self {
        CreditError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// rejections caused by the caller's input rather than a lookup miss or a fault
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            CreditError::Validation { .. }
                | CreditError::CreditLimitExceeded { .. }
                | CreditError::InvalidDate { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CreditError::CustomerNotFound { .. } | CreditError::LoanNotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CreditError>;
