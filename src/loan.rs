use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{CreditError, Result};
use crate::payments::{compute_emi, LoanSummary};
use crate::types::{CustomerId, LoanHistory, LoanId, LoanStatus};

/// loan terms before origination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLoan {
    pub customer_id: CustomerId,
    pub loan_amount: Money,
    /// annual percentage on the wire
    #[serde(with = "crate::decimal::percentage")]
    pub interest_rate: Rate,
    #[serde(rename = "tenure")]
    pub tenure_months: u32,
    pub start_date: NaiveDate,
    /// carried over when importing historical loans
    #[serde(default)]
    pub emis_paid_on_time: u32,
}

impl NewLoan {
    pub fn builder() -> LoanBuilder {
        LoanBuilder::new()
    }
}

/// originated loan
///
/// The monthly payment and end date are fixed at origination. The on-time EMI
/// counter is the only field that changes afterwards and never exceeds the tenure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    loan_id: LoanId,
    customer_id: CustomerId,
    loan_amount: Money,
    tenure_months: u32,
    #[serde(with = "crate::decimal::percentage")]
    interest_rate: Rate,
    monthly_payment: Money,
    emis_paid_on_time: u32,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl Loan {
    /// compute the EMI and end date and originate the loan
    pub fn originate(loan_id: LoanId, terms: &NewLoan) -> Result<Self> {
        if terms.emis_paid_on_time > terms.tenure_months {
            return Err(CreditError::validation(
                "emis_paid_on_time",
                format!(
                    "{} exceeds tenure of {} months",
                    terms.emis_paid_on_time, terms.tenure_months
                ),
            ));
        }

        let monthly_payment = compute_emi(terms.loan_amount, terms.interest_rate, terms.tenure_months)?;
        // summary figures multiply the EMI by the tenure
        if monthly_payment.checked_mul(terms.tenure_months).is_none() {
            return Err(CreditError::CalculationError {
                message: format!("repayment total for {} overflows", terms.loan_amount),
            });
        }
        let end_date = end_date_for(terms.start_date, terms.tenure_months)?;

        Ok(Self {
            loan_id,
            customer_id: terms.customer_id,
            loan_amount: terms.loan_amount,
            tenure_months: terms.tenure_months,
            interest_rate: terms.interest_rate,
            monthly_payment,
            emis_paid_on_time: terms.emis_paid_on_time,
            start_date: terms.start_date,
            end_date,
        })
    }

    pub fn loan_id(&self) -> LoanId {
        self.loan_id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn loan_amount(&self) -> Money {
        self.loan_amount
    }

    pub fn tenure_months(&self) -> u32 {
        self.tenure_months
    }

    pub fn interest_rate(&self) -> Rate {
        self.interest_rate
    }

    pub fn monthly_payment(&self) -> Money {
        self.monthly_payment
    }

    pub fn emis_paid_on_time(&self) -> u32 {
        self.emis_paid_on_time
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// count one more EMI paid on schedule
    pub fn record_on_time_emi(&mut self) -> Result<u32> {
        if self.emis_paid_on_time >= self.tenure_months {
            return Err(CreditError::validation(
                "emis_paid_on_time",
                format!("all {} EMIs already recorded", self.tenure_months),
            ));
        }
        self.emis_paid_on_time += 1;
        Ok(self.emis_paid_on_time)
    }

    pub fn summary(&self) -> LoanSummary {
        LoanSummary::new(
            self.loan_amount,
            self.monthly_payment,
            self.tenure_months,
            self.emis_paid_on_time,
        )
    }

    pub fn status(&self, today: NaiveDate) -> LoanStatus {
        LoanStatus::as_of(self.end_date, today)
    }

    pub fn history(&self) -> LoanHistory {
        LoanHistory::new(self.loan_amount, self.tenure_months, self.emis_paid_on_time)
    }
}

impl From<&Loan> for LoanHistory {
    fn from(loan: &Loan) -> Self {
        loan.history()
    }
}

/// start date plus whole calendar months, clamped to the last day of the month
pub fn end_date_for(start_date: NaiveDate, tenure_months: u32) -> Result<NaiveDate> {
    start_date
        .checked_add_months(Months::new(tenure_months))
        .ok_or(CreditError::InvalidDate {
            message: format!("{} plus {} months is out of range", start_date, tenure_months),
        })
}

/// builder for loan terms
#[derive(Debug, Default)]
pub struct LoanBuilder {
    customer_id: Option<CustomerId>,
    amount: Option<Money>,
    rate: Option<Rate>,
    tenure_months: Option<u32>,
    start_date: Option<NaiveDate>,
    emis_paid_on_time: u32,
}

impl LoanBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn customer_id(mut self, customer_id: CustomerId) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn rate(mut self, rate: Rate) -> Self {
        self.rate = Some(rate);
        self
    }

    pub fn tenure_months(mut self, months: u32) -> Self {
        self.tenure_months = Some(months);
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn emis_paid_on_time(mut self, count: u32) -> Self {
        self.emis_paid_on_time = count;
        self
    }

    pub fn build(self) -> Result<NewLoan> {
        Ok(NewLoan {
            customer_id: self
                .customer_id
                .ok_or_else(|| CreditError::validation("customer_id", "required"))?,
            loan_amount: self
                .amount
                .ok_or_else(|| CreditError::validation("loan_amount", "required"))?,
            interest_rate: self
                .rate
                .ok_or_else(|| CreditError::validation("interest_rate", "required"))?,
            tenure_months: self
                .tenure_months
                .ok_or_else(|| CreditError::validation("tenure", "required"))?,
            start_date: self
                .start_date
                .ok_or_else(|| CreditError::validation("start_date", "required"))?,
            emis_paid_on_time: self.emis_paid_on_time,
        })
    }
}
