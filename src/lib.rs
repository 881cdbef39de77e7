pub mod config;
pub mod customer;
pub mod decimal;
pub mod eligibility;
pub mod engine;
pub mod errors;
pub mod import;
pub mod ledger;
pub mod limits;
pub mod loan;
pub mod payments;
pub mod scoring;
pub mod serialization;
pub mod types;

// re-export key types
pub use config::{ApprovalTier, CreditPolicy, RegistrationBounds, RequestBounds};
pub use customer::{Customer, NewCustomer};
pub use decimal::{Money, Rate};
pub use eligibility::{
    decide, EligibilityDecider, EligibilityDecision, EligibilityInput, EligibilityRequest,
};
pub use engine::CreditEngine;
pub use errors::{CreditError, Result};
pub use import::{import_customers, import_loans, ImportReport};
pub use ledger::{CreditRepository, InMemoryLedger};
pub use limits::{approved_limit_for_salary, available_headroom, current_utilization};
pub use loan::{Loan, LoanBuilder, NewLoan};
pub use payments::{compute_emi, AmortizationCalculator, LoanSummary};
pub use scoring::CreditScore;
pub use serialization::{
    CustomerLoansView, CustomerView, EligibilityResponse, LoanView, RegistrationView,
};
pub use types::{ApprovalStatus, CustomerId, LoanHistory, LoanId, LoanStatus};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
