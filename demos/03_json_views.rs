/// json views - the payloads handed to a request boundary
use credit_decision_rs::{
    CreditEngine, CreditPolicy, CustomerLoansView, LoanView, Money, NewCustomer, NewLoan, Rate,
    RegistrationView, SafeTimeProvider, TimeSource,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let time = SafeTimeProvider::new(TimeSource::System);
    let today = time.now().date_naive();
    let mut engine = CreditEngine::in_memory(CreditPolicy::standard())?;

    let customer = engine.register_customer(NewCustomer::new(
        "Farah",
        "Khan",
        29,
        "9988001122",
        Money::from_major(45_000),
    ))?;
    println!("{}", RegistrationView::from_customer(&customer).to_json_pretty()?);

    let terms = NewLoan::builder()
        .customer_id(customer.customer_id())
        .amount(Money::from_major(250_000))
        .rate(Rate::from_percentage(dec!(9.75)))
        .tenure_months(24)
        .start_date(today)
        .build()?;
    let loan = engine.create_loan(terms, &time)?;
    engine.record_on_time_emi(loan.loan_id())?;

    let loan = engine.loan(loan.loan_id())?;
    println!("{}", LoanView::from_loan(&loan, &customer, today).to_json_pretty()?);

    let loans = engine.customer_loans(customer.customer_id(), None, &time)?;
    println!("{}", CustomerLoansView::new(&customer, &loans, today).to_json_pretty()?);

    // the policy itself is plain json
    println!("{}", engine.policy().to_json_pretty()?);

    Ok(())
}
