/// quick start - register a customer, check eligibility, create a loan
use credit_decision_rs::{
    CreditEngine, CreditPolicy, EligibilityRequest, EligibilityResponse, Money, NewCustomer,
    NewLoan, Rate, SafeTimeProvider, TimeSource,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let time = SafeTimeProvider::new(TimeSource::System);
    let mut engine = CreditEngine::in_memory(CreditPolicy::standard())?;

    // limit = 36 x monthly salary
    let customer = engine.register_customer(NewCustomer::new(
        "Rahul",
        "Sharma",
        34,
        "9876543210",
        Money::from_major(50_000),
    ))?;
    println!("customer {} approved limit {}", customer.customer_id(), customer.approved_limit());

    let request = EligibilityRequest {
        customer_id: customer.customer_id(),
        loan_amount: Money::from_major(500_000),
        interest_rate: Rate::from_percentage(dec!(10.5)),
        tenure_months: 36,
    };
    let decision = engine.check_eligibility(&request)?;
    let response = EligibilityResponse::from_decision(customer.customer_id(), &decision)?;
    println!("{}", response.to_json_pretty()?);

    if decision.is_approved() {
        let terms = NewLoan::builder()
            .customer_id(customer.customer_id())
            .amount(Money::from_major(decision.approved_whole_units()?))
            .rate(decision.suggested_rate)
            .tenure_months(request.tenure_months)
            .start_date(time.now().date_naive())
            .build()?;
        let loan = engine.create_loan(terms, &time)?;
        println!("loan {} created, emi {} until {}", loan.loan_id(), loan.monthly_payment(), loan.end_date());
    }

    Ok(())
}
