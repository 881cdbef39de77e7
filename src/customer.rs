use serde::{Deserialize, Serialize};

use crate::config::CreditPolicy;
use crate::decimal::Money;
use crate::errors::{CreditError, Result};
use crate::limits::approved_limit_for_salary;
use crate::types::CustomerId;

/// registration details supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub phone_number: String,
    pub monthly_salary: Money,
}

impl NewCustomer {
    pub fn new(
        first_name: &str,
        last_name: &str,
        age: u32,
        phone_number: &str,
        monthly_salary: Money,
    ) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            age,
            phone_number: phone_number.to_string(),
            monthly_salary,
        }
    }
}

/// registered customer; the approved limit is fixed at registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    customer_id: CustomerId,
    first_name: String,
    last_name: String,
    age: u32,
    phone_number: String,
    monthly_salary: Money,
    approved_limit: Money,
}

impl Customer {
    /// validate registration details and set the approved limit from salary
    pub fn register(customer_id: CustomerId, details: NewCustomer, policy: &CreditPolicy) -> Result<Self> {
        policy.registration.check(details.age, details.monthly_salary)?;

        if details.first_name.trim().is_empty() {
            return Err(CreditError::validation("first_name", "must not be empty"));
        }

        let approved_limit = approved_limit_for_salary(details.monthly_salary, policy.limit_multiplier)?;

        Ok(Self {
            customer_id,
            first_name: details.first_name,
            last_name: details.last_name,
            age: details.age,
            phone_number: details.phone_number,
            monthly_salary: details.monthly_salary,
            approved_limit,
        })
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn monthly_salary(&self) -> Money {
        self.monthly_salary
    }

    pub fn approved_limit(&self) -> Money {
        self.approved_limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(age: u32, salary: i64) -> NewCustomer {
        NewCustomer::new("Ravi", "Kumar", age, "9876543210", Money::from_major(salary))
    }

    #[test]
    fn test_limit_is_thirty_six_months_salary() {
        let policy = CreditPolicy::standard();
        let customer = Customer::register(7, details(35, 50_000), &policy).unwrap();

        assert_eq!(customer.customer_id(), 7);
        assert_eq!(customer.approved_limit(), Money::from_major(1_800_000));
        assert_eq!(customer.full_name(), "Ravi Kumar");
    }

    #[test]
    fn test_age_bounds() {
        let policy = CreditPolicy::standard();
        assert!(Customer::register(1, details(18, 1000), &policy).is_ok());
        assert!(Customer::register(1, details(100, 1000), &policy).is_ok());
        assert!(matches!(
            Customer::register(1, details(17, 1000), &policy),
            Err(CreditError::Validation { .. })
        ));
        assert!(Customer::register(1, details(101, 1000), &policy).is_err());
    }

    #[test]
    fn test_salary_must_be_positive() {
        let policy = CreditPolicy::standard();
        assert!(Customer::register(1, details(30, 0), &policy).is_err());
        assert!(Customer::register(1, details(30, -10), &policy).is_err());
    }

    #[test]
    fn test_salary_must_be_whole() {
        let policy = CreditPolicy::standard();
        let mut fractional = details(30, 1000);
        fractional.monthly_salary = Money::from_decimal(rust_decimal_macros::dec!(1000.75));

        assert!(matches!(
            Customer::register(1, fractional, &policy),
            Err(CreditError::Validation { .. })
        ));
    }

    #[test]
    fn test_oversized_salary_is_an_error() {
        let policy = CreditPolicy::standard();
        let mut huge = details(30, 1000);
        huge.monthly_salary = Money::from_decimal(rust_decimal::Decimal::MAX);

        assert!(matches!(
            Customer::register(1, huge, &policy),
            Err(CreditError::CalculationError { .. })
        ));
    }
}
