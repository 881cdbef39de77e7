//! bulk import of customers and loans from CSV
//!
//! Each row is handled on its own: a failing row is counted and reported, and
//! the rows after it are still processed. Only the first few error messages are
//! kept (see `CreditPolicy::import_error_cap`).

use std::io::Read;

use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use log::{info, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::customer::NewCustomer;
use crate::decimal::{Money, Rate};
use crate::engine::CreditEngine;
use crate::errors::{CreditError, Result};
use crate::ledger::CreditRepository;
use crate::loan::NewLoan;
use crate::types::CustomerId;

/// one customer row: `first_name,last_name,age,phone_number,monthly_salary`
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerRow {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub phone_number: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub monthly_salary: Decimal,
}

/// one loan row: `customer_id,loan_amount,tenure,interest_rate[,start_date][,emis_paid_on_time]`
#[derive(Debug, Clone, Deserialize)]
pub struct LoanRow {
    pub customer_id: CustomerId,
    #[serde(with = "rust_decimal::serde::str")]
    pub loan_amount: Decimal,
    pub tenure: u32,
    /// annual percentage, e.g. `12.5`
    #[serde(with = "rust_decimal::serde::str")]
    pub interest_rate: Decimal,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub emis_paid_on_time: Option<u32>,
}

impl CustomerRow {
    fn into_new_customer(self) -> NewCustomer {
        NewCustomer {
            first_name: self.first_name,
            last_name: self.last_name,
            age: self.age,
            phone_number: self.phone_number,
            monthly_salary: Money::from_decimal(self.monthly_salary),
        }
    }
}

impl LoanRow {
    fn into_new_loan(self, today: NaiveDate) -> Result<NewLoan> {
        NewLoan::builder()
            .customer_id(self.customer_id)
            .amount(Money::from_decimal(self.loan_amount))
            .rate(Rate::from_percentage(self.interest_rate))
            .tenure_months(self.tenure)
            .start_date(self.start_date.unwrap_or(today))
            .emis_paid_on_time(self.emis_paid_on_time.unwrap_or(0))
            .build()
    }
}

/// outcome of importing one file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub created: usize,
    pub failed: usize,
    /// `Row {n}: {reason}`, capped
    pub errors: Vec<String>,
}

impl ImportReport {
    fn record_failure(&mut self, row: usize, error: &CreditError, cap: usize) {
        warn!("import row {} failed: {}", row, error);
        self.failed += 1;
        if self.errors.len() < cap {
            self.errors.push(format!("Row {}: {}", row, error));
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// register every customer row in the reader
pub fn import_customers<R, In>(engine: &mut CreditEngine<R>, input: In) -> Result<ImportReport>
where
    R: CreditRepository,
    In: Read,
{
    let cap = engine.policy().import_error_cap;
    let mut reader = csv::Reader::from_reader(input);
    let mut report = ImportReport::default();

    for (index, record) in reader.deserialize::<CustomerRow>().enumerate() {
        let row = index + 1;
        let outcome = record
            .map_err(CreditError::from)
            .and_then(|parsed| engine.register_customer(parsed.into_new_customer()));

        match outcome {
            Ok(_) => report.created += 1,
            Err(err) => report.record_failure(row, &err, cap),
        }
    }

    info!("customer import: {} created, {} failed", report.created, report.failed);
    Ok(report)
}

/// create every loan row in the reader
///
/// Rows without a start date start today. Unlike `CreditEngine::create_loan`,
/// rows may be back-dated so that an existing loan book with its payment record
/// can be loaded; a source that rejects past start dates on upload will accept
/// fewer rows than this. Every row still has to fit within the customer's
/// remaining headroom.
pub fn import_loans<R, In>(
    engine: &mut CreditEngine<R>,
    input: In,
    time_provider: &SafeTimeProvider,
) -> Result<ImportReport>
where
    R: CreditRepository,
    In: Read,
{
    let cap = engine.policy().import_error_cap;
    let today = time_provider.now().date_naive();
    let mut reader = csv::Reader::from_reader(input);
    let mut report = ImportReport::default();

    for (index, record) in reader.deserialize::<LoanRow>().enumerate() {
        let row = index + 1;
        let outcome = record
            .map_err(CreditError::from)
            .and_then(|parsed| parsed.into_new_loan(today))
            .and_then(|terms| engine.originate_loan(&terms));

        match outcome {
            Ok(_) => report.created += 1,
            Err(err) => report.record_failure(row, &err, cap),
        }
    }

    info!("loan import: {} created, {} failed", report.created, report.failed);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CreditPolicy;
    use crate::types::LoanStatus;
    use chrono::{TimeZone, Utc};
    use hourglass_rs::TimeSource;
    use rust_decimal_macros::dec;

    fn clock() -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
        ))
    }

    const CUSTOMERS: &str = "\
first_name,last_name,age,phone_number,monthly_salary
Anil,Menon,45,9811111111,50000
Divya,Iyer,29,9822222222,30000
";

    #[test]
    fn test_import_customers() {
        let mut engine = CreditEngine::in_memory(CreditPolicy::standard()).unwrap();
        let report = import_customers(&mut engine, CUSTOMERS.as_bytes()).unwrap();

        assert_eq!(report.created, 2);
        assert!(report.is_clean());
        assert_eq!(engine.customer(1).unwrap().approved_limit(), Money::from_major(1_800_000));
        assert_eq!(engine.customer(2).unwrap().first_name(), "Divya");
    }

    #[test]
    fn test_failing_rows_do_not_stop_import() {
        let csv = "\
first_name,last_name,age,phone_number,monthly_salary
Old,Timer,120,9800000000,10000
Bad,Salary,30,9800000001,abc
Good,Row,30,9800000002,10000
";
        let mut engine = CreditEngine::in_memory(CreditPolicy::standard()).unwrap();
        let report = import_customers(&mut engine, csv.as_bytes()).unwrap();

        assert_eq!(report.created, 1);
        assert_eq!(report.failed, 2);
        assert!(report.errors[0].starts_with("Row 1:"));
        assert!(report.errors[1].starts_with("Row 2:"));
        assert_eq!(engine.repository().customer_count(), 1);
    }

    #[test]
    fn test_error_messages_capped() {
        let mut csv = String::from("first_name,last_name,age,phone_number,monthly_salary\n");
        for _ in 0..12 {
            csv.push_str("Too,Young,12,9800000000,10000\n");
        }
        csv.push_str("Old,Enough,30,9800000000,10000\n");

        let mut engine = CreditEngine::in_memory(CreditPolicy::standard()).unwrap();
        let report = import_customers(&mut engine, csv.as_bytes()).unwrap();

        assert_eq!(report.failed, 12);
        assert_eq!(report.errors.len(), 10);
        assert_eq!(report.created, 1);
    }

    #[test]
    fn test_import_loans_with_history() {
        let time = clock();
        let mut engine = CreditEngine::in_memory(CreditPolicy::standard()).unwrap();
        import_customers(&mut engine, CUSTOMERS.as_bytes()).unwrap();

        let loans = "\
customer_id,loan_amount,tenure,interest_rate,start_date,emis_paid_on_time
1,500000,36,10.5,2020-01-10,30
1,200000,12,9,,
2,2000000,24,11,2024-06-01,0
9,1000,12,10,,
2,50000,12,12.25,2024-07-01,
";
        let report = import_loans(&mut engine, loans.as_bytes(), &time).unwrap();

        assert_eq!(report.created, 3);
        assert_eq!(report.failed, 2);
        // row 3 breaches the 1.08M limit, row 4 has no customer
        assert!(report.errors[0].starts_with("Row 3:"));
        assert!(report.errors[1].contains("customer not found"));

        let first = engine.customer_loans(1, None, &time).unwrap();
        assert_eq!(first.len(), 2);
        // newest first: the undated row started today
        assert_eq!(first[0].start_date(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(first[1].emis_paid_on_time(), 30);
        assert_eq!(first[1].status(time.now().date_naive()), LoanStatus::Completed);

        let second = engine.customer_loans(2, None, &time).unwrap();
        assert_eq!(second[0].interest_rate(), Rate::from_percentage(dec!(12.25)));
    }

    #[test]
    fn test_oversized_and_fractional_rows_fail_alone() {
        let csv = "\
first_name,last_name,age,phone_number,monthly_salary
Big,Earner,30,9800000000,79228162514264337593543950335
Frac,Salary,30,9800000001,1000.75
Good,Row,30,9800000002,10000
";
        let mut engine = CreditEngine::in_memory(CreditPolicy::standard()).unwrap();
        let report = import_customers(&mut engine, csv.as_bytes()).unwrap();

        assert_eq!(report.created, 1);
        assert_eq!(report.failed, 2);
        assert!(report.errors[0].contains("calculation error"));
        assert!(report.errors[1].contains("monthly_salary"));
        assert_eq!(engine.customer(1).unwrap().first_name(), "Good");

        let time = clock();
        let loans = "\
customer_id,loan_amount,tenure,interest_rate,start_date,emis_paid_on_time
1,79228162514264337593543950335,12,10,,
1,1000.5,12,10,,
1,1000,12,10,,
";
        let report = import_loans(&mut engine, loans.as_bytes(), &time).unwrap();
        assert_eq!(report.created, 1);
        assert_eq!(report.failed, 2);
        assert!(report.errors[1].contains("loan_amount"));
    }

    #[test]
    fn test_imported_history_too_long_fails() {
        let time = clock();
        let mut engine = CreditEngine::in_memory(CreditPolicy::standard()).unwrap();
        import_customers(&mut engine, CUSTOMERS.as_bytes()).unwrap();

        let loans = "\
customer_id,loan_amount,tenure,interest_rate,start_date,emis_paid_on_time
1,10000,12,10,2023-01-01,13
";
        let report = import_loans(&mut engine, loans.as_bytes(), &time).unwrap();
        assert_eq!(report.failed, 1);
        assert!(report.errors[0].contains("emis_paid_on_time"));
    }
}
