/// bulk import - load customers and historical loans from csv
use credit_decision_rs::{
    import_customers, import_loans, CreditEngine, CreditPolicy, LoanStatus, SafeTimeProvider,
    TimeSource,
};

const CUSTOMERS: &str = "\
first_name,last_name,age,phone_number,monthly_salary
Arjun,Reddy,38,9800011111,60000
Sneha,Joshi,27,9800022222,35000
Vikram,Singh,16,9800033333,20000
";

const LOANS: &str = "\
customer_id,loan_amount,tenure,interest_rate,start_date,emis_paid_on_time
1,800000,48,9.5,2019-04-01,45
1,300000,24,11,2023-02-15,10
2,1500000,36,10,2022-01-01,12
2,400000,12,13.75,,
7,10000,12,10,,
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let time = SafeTimeProvider::new(TimeSource::System);
    let mut engine = CreditEngine::in_memory(CreditPolicy::standard())?;

    let customers = import_customers(&mut engine, CUSTOMERS.as_bytes())?;
    println!("customers: {} created, {} failed", customers.created, customers.failed);
    for error in &customers.errors {
        println!("  {}", error);
    }

    let loans = import_loans(&mut engine, LOANS.as_bytes(), &time)?;
    println!("loans: {} created, {} failed", loans.created, loans.failed);
    for error in &loans.errors {
        println!("  {}", error);
    }

    for customer in engine.repository().customers() {
        let active = engine.customer_loans(customer.customer_id(), Some(LoanStatus::Active), &time)?;
        let all = engine.customer_loans(customer.customer_id(), None, &time)?;
        println!(
            "{}: {} loans, {} active, limit {}",
            customer.full_name(),
            all.len(),
            active.len(),
            customer.approved_limit()
        );
    }

    Ok(())
}
