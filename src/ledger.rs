use std::collections::BTreeMap;

use crate::customer::Customer;
use crate::errors::{CreditError, Result};
use crate::loan::Loan;
use crate::types::{CustomerId, LoanHistory, LoanId};

/// persistence seam between the engine and whatever stores customers and loans
pub trait CreditRepository {
    fn find_customer(&self, customer_id: CustomerId) -> Result<Customer>;

    /// loans owned by the customer, newest first
    fn loans_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Loan>>;

    fn find_loan(&self, loan_id: LoanId) -> Result<Loan>;

    /// id the next registered customer will receive
    fn next_customer_id(&self) -> CustomerId;

    fn insert_customer(&mut self, customer: Customer) -> Result<()>;

    fn insert_loan(&mut self, loan: Loan) -> Result<()>;

    fn update_loan(&mut self, loan: Loan) -> Result<()>;

    /// scoring and utilization snapshot for one customer
    fn loan_history(&self, customer_id: CustomerId) -> Result<Vec<LoanHistory>> {
        Ok(self
            .loans_for_customer(customer_id)?
            .iter()
            .map(LoanHistory::from)
            .collect())
    }
}

/// in-process ledger keeping loans in insertion order
#[derive(Debug, Default, Clone)]
pub struct InMemoryLedger {
    customers: BTreeMap<CustomerId, Customer>,
    loans: Vec<Loan>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }

    pub fn loan_count(&self) -> usize {
        self.loans.len()
    }

    pub fn customers(&self) -> impl Iterator<Item = &Customer> {
        self.customers.values()
    }
}

impl CreditRepository for InMemoryLedger {
    fn find_customer(&self, customer_id: CustomerId) -> Result<Customer> {
        self.customers
            .get(&customer_id)
            .cloned()
            .ok_or(CreditError::CustomerNotFound { customer_id })
    }

    fn loans_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Loan>> {
        if !self.customers.contains_key(&customer_id) {
            return Err(CreditError::CustomerNotFound { customer_id });
        }

        Ok(self
            .loans
            .iter()
            .rev()
            .filter(|loan| loan.customer_id() == customer_id)
            .cloned()
            .collect())
    }

    fn find_loan(&self, loan_id: LoanId) -> Result<Loan> {
        self.loans
            .iter()
            .find(|loan| loan.loan_id() == loan_id)
            .cloned()
            .ok_or(CreditError::LoanNotFound { loan_id })
    }

    fn next_customer_id(&self) -> CustomerId {
        self.customers
            .keys()
            .next_back()
            .map(|id| id + 1)
            .unwrap_or(1)
    }

    fn insert_customer(&mut self, customer: Customer) -> Result<()> {
        let customer_id = customer.customer_id();
        if self.customers.contains_key(&customer_id) {
            return Err(CreditError::InvalidInput {
                message: format!("customer {} already exists", customer_id),
            });
        }
        self.customers.insert(customer_id, customer);
        Ok(())
    }

    fn insert_loan(&mut self, loan: Loan) -> Result<()> {
        let customer_id = loan.customer_id();
        if !self.customers.contains_key(&customer_id) {
            return Err(CreditError::CustomerNotFound { customer_id });
        }

        if self.loans.iter().any(|existing| existing.loan_id() == loan.loan_id()) {
            return Err(CreditError::InvalidInput {
                message: format!("loan {} already exists", loan.loan_id()),
            });
        }

        self.loans.push(loan);
        Ok(())
    }

    fn update_loan(&mut self, loan: Loan) -> Result<()> {
        let slot = self
            .loans
            .iter_mut()
            .find(|existing| existing.loan_id() == loan.loan_id())
            .ok_or(CreditError::LoanNotFound {
                loan_id: loan.loan_id(),
            })?;
        *slot = loan;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CreditPolicy;
    use crate::customer::NewCustomer;
    use crate::decimal::{Money, Rate};
    use crate::loan::NewLoan;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn customer(id: CustomerId) -> Customer {
        Customer::register(
            id,
            NewCustomer::new("Meera", "Shah", 40, "9123456780", Money::from_major(20_000)),
            &CreditPolicy::standard(),
        )
        .unwrap()
    }

    fn loan(customer_id: CustomerId, amount: i64) -> Loan {
        let terms = NewLoan::builder()
            .customer_id(customer_id)
            .amount(Money::from_major(amount))
            .rate(Rate::from_percentage(dec!(9)))
            .tenure_months(24)
            .start_date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
            .build()
            .unwrap();
        Loan::originate(Uuid::new_v4(), &terms).unwrap()
    }

    #[test]
    fn test_customer_ids_are_sequential() {
        let mut ledger = InMemoryLedger::new();
        assert_eq!(ledger.next_customer_id(), 1);

        ledger.insert_customer(customer(1)).unwrap();
        ledger.insert_customer(customer(2)).unwrap();
        assert_eq!(ledger.next_customer_id(), 3);
        assert!(ledger.insert_customer(customer(2)).is_err());
    }

    #[test]
    fn test_unknown_customer_lookup() {
        let ledger = InMemoryLedger::new();
        assert!(matches!(
            ledger.find_customer(42),
            Err(CreditError::CustomerNotFound { customer_id: 42 })
        ));
        assert!(ledger.loans_for_customer(42).is_err());
    }

    #[test]
    fn test_loans_listed_newest_first_per_customer() {
        let mut ledger = InMemoryLedger::new();
        ledger.insert_customer(customer(1)).unwrap();
        ledger.insert_customer(customer(2)).unwrap();

        let first = loan(1, 10_000);
        let other = loan(2, 5_000);
        let second = loan(1, 20_000);
        ledger.insert_loan(first.clone()).unwrap();
        ledger.insert_loan(other).unwrap();
        ledger.insert_loan(second.clone()).unwrap();

        let loans = ledger.loans_for_customer(1).unwrap();
        assert_eq!(loans, vec![second, first]);

        let history = ledger.loan_history(1).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].loan_amount, Money::from_major(20_000));
    }

    #[test]
    fn test_loan_requires_known_customer() {
        let mut ledger = InMemoryLedger::new();
        assert!(matches!(
            ledger.insert_loan(loan(9, 1000)),
            Err(CreditError::CustomerNotFound { .. })
        ));
    }

    #[test]
    fn test_update_loan() {
        let mut ledger = InMemoryLedger::new();
        ledger.insert_customer(customer(1)).unwrap();
        let mut stored = loan(1, 12_000);
        ledger.insert_loan(stored.clone()).unwrap();

        stored.record_on_time_emi().unwrap();
        ledger.update_loan(stored.clone()).unwrap();
        assert_eq!(ledger.find_loan(stored.loan_id()).unwrap().emis_paid_on_time(), 1);

        assert!(matches!(
            ledger.update_loan(loan(1, 1)),
            Err(CreditError::LoanNotFound { .. })
        ));
    }
}
