/// eligibility tiers - how the payment record moves the decision
use chrono::{Duration, TimeZone, Utc};
use credit_decision_rs::{
    CreditEngine, CreditPolicy, EligibilityRequest, Money, NewCustomer, NewLoan, Rate,
    SafeTimeProvider, TimeSource,
};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    println!("=== eligibility tiers ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    ));
    let controller = time.test_control().unwrap();

    let mut engine = CreditEngine::in_memory(CreditPolicy::standard())?;
    let customer = engine.register_customer(NewCustomer::new(
        "Priya",
        "Nair",
        41,
        "9123456789",
        Money::from_major(40_000),
    ))?;
    let id = customer.customer_id();

    let request = EligibilityRequest {
        customer_id: id,
        loan_amount: Money::from_major(200_000),
        interest_rate: Rate::from_percentage(dec!(11)),
        tenure_months: 24,
    };

    // an existing 10 month loan; each on-time EMI lifts the score
    let terms = NewLoan::builder()
        .customer_id(id)
        .amount(Money::from_major(100_000))
        .rate(Rate::from_percentage(dec!(12)))
        .tenure_months(10)
        .start_date(time.now().date_naive())
        .build()?;
    let loan = engine.create_loan(terms, &time)?;

    for month in 0..=10 {
        let decision = engine.check_eligibility(&request)?;
        println!(
            "{} on time: score {:>2} ({:<10}) {:<8} {:>10} at {} emi {}",
            month,
            decision.credit_score,
            decision.tier,
            decision.status,
            decision.approved_whole_units()?,
            decision.suggested_rate,
            decision.monthly_emi
        );

        if month < 10 {
            controller.advance(Duration::days(30));
            engine.record_on_time_emi(loan.loan_id())?;
        }
    }

    Ok(())
}
