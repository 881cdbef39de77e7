use hourglass_rs::SafeTimeProvider;
use log::{debug, info};
use uuid::Uuid;

use crate::config::CreditPolicy;
use crate::customer::{Customer, NewCustomer};
use crate::eligibility::{EligibilityDecider, EligibilityDecision, EligibilityRequest};
use crate::errors::{CreditError, Result};
use crate::ledger::{CreditRepository, InMemoryLedger};
use crate::limits::{current_utilization, ensure_headroom};
use crate::loan::{Loan, NewLoan};
use crate::types::{CustomerId, LoanId, LoanStatus};

/// credit engine: policy plus the repository it reads snapshots from
///
/// Writes go through `&mut self`, so the headroom check and the insert of a new
/// loan cannot interleave with another origination on the same engine. Share an
/// engine between threads behind a lock to keep that guarantee.
pub struct CreditEngine<R: CreditRepository = InMemoryLedger> {
    policy: CreditPolicy,
    repository: R,
}

impl CreditEngine<InMemoryLedger> {
    /// engine over an empty in-memory ledger
    pub fn in_memory(policy: CreditPolicy) -> Result<Self> {
        Self::new(policy, InMemoryLedger::new())
    }
}

impl<R: CreditRepository> CreditEngine<R> {
    pub fn new(policy: CreditPolicy, repository: R) -> Result<Self> {
        policy.validate()?;
        Ok(Self { policy, repository })
    }

    pub fn policy(&self) -> &CreditPolicy {
        &self.policy
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn into_repository(self) -> R {
        self.repository
    }

    /// register a customer, fixing the approved limit from salary
    pub fn register_customer(&mut self, details: NewCustomer) -> Result<Customer> {
        let customer_id = self.repository.next_customer_id();
        let customer = Customer::register(customer_id, details, &self.policy)?;
        self.repository.insert_customer(customer.clone())?;

        info!(
            "registered customer {} with approved limit {}",
            customer_id,
            customer.approved_limit()
        );

        Ok(customer)
    }

    pub fn customer(&self, customer_id: CustomerId) -> Result<Customer> {
        self.repository.find_customer(customer_id)
    }

    /// score the customer's history and decide on the request
    pub fn check_eligibility(&self, request: &EligibilityRequest) -> Result<EligibilityDecision> {
        let customer = self.repository.find_customer(request.customer_id)?;
        let history = self.repository.loan_history(request.customer_id)?;

        EligibilityDecider::new(&self.policy).assess(&customer, &history, request)
    }

    /// create a loan starting today or later
    pub fn create_loan(&mut self, terms: NewLoan, time_provider: &SafeTimeProvider) -> Result<Loan> {
        let today = time_provider.now().date_naive();
        if terms.start_date < today {
            return Err(CreditError::InvalidDate {
                message: format!("start date {} is before {}", terms.start_date, today),
            });
        }

        self.originate_loan(&terms)
    }

    /// bounds check, headroom guard, EMI and insert; start date is not checked
    pub(crate) fn originate_loan(&mut self, terms: &NewLoan) -> Result<Loan> {
        self.policy
            .request_bounds
            .check(terms.loan_amount, terms.interest_rate, terms.tenure_months)?;

        let customer = self.repository.find_customer(terms.customer_id)?;
        let history = self.repository.loan_history(terms.customer_id)?;
        let utilization = current_utilization(&history);

        ensure_headroom(customer.approved_limit(), utilization, terms.loan_amount)?;

        let loan = Loan::originate(Uuid::new_v4(), terms)?;
        self.repository.insert_loan(loan.clone())?;

        info!(
            "originated loan {} for customer {}: {} over {} months at {}, emi {}",
            loan.loan_id(),
            loan.customer_id(),
            loan.loan_amount(),
            loan.tenure_months(),
            loan.interest_rate(),
            loan.monthly_payment()
        );

        Ok(loan)
    }

    pub fn loan(&self, loan_id: LoanId) -> Result<Loan> {
        self.repository.find_loan(loan_id)
    }

    /// a customer's loans, newest first, optionally only those in the given status today
    pub fn customer_loans(
        &self,
        customer_id: CustomerId,
        status: Option<LoanStatus>,
        time_provider: &SafeTimeProvider,
    ) -> Result<Vec<Loan>> {
        let today = time_provider.now().date_naive();
        let loans = self.repository.loans_for_customer(customer_id)?;

        Ok(match status {
            Some(wanted) => loans
                .into_iter()
                .filter(|loan| loan.status(today) == wanted)
                .collect(),
            None => loans,
        })
    }

    /// count one more EMI paid on schedule
    pub fn record_on_time_emi(&mut self, loan_id: LoanId) -> Result<Loan> {
        let mut loan = self.repository.find_loan(loan_id)?;
        let paid = loan.record_on_time_emi()?;
        self.repository.update_loan(loan.clone())?;

        debug!("loan {}: {} of {} EMIs on time", loan_id, paid, loan.tenure_months());

        Ok(loan)
    }
}
