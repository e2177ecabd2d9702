//! Walkthrough of both calculation engines: the level-payment amortization
//! formulas and the day-accurate revolving credit ledger.
//!
//! Run with: cargo run --example quick_start

use loan_ledger_rs::{amortization, LoanAccount, Money, PaymentFrequency, PaymentTiming, Rate};
use rust_decimal_macros::dec;

fn main() -> loan_ledger_rs::Result<()> {
    // borrow 100k for 5 years at 7% apr
    let annual_rate = Rate::from_decimal(dec!(0.07));
    let principal = Money::from_major(100_000);

    let yearly = amortization::payment(annual_rate, 5, principal, PaymentTiming::DueAtEnd)?;
    println!("annual payment:  {yearly}");

    let monthly_rate = annual_rate.per_period(PaymentFrequency::Monthly);
    let monthly = amortization::payment(monthly_rate, 60, principal, PaymentTiming::DueAtEnd)?;
    println!("monthly payment: {monthly}");

    let total_monthly = amortization::total_payable(monthly_rate, 60, principal, PaymentTiming::DueAtEnd)?;
    let total_yearly = amortization::total_payable(annual_rate, 5, principal, PaymentTiming::DueAtEnd)?;
    println!("total repayable monthly: {total_monthly}");
    println!("total repayable yearly:  {total_yearly}");

    // interest/principal split of the second annual payment
    let split = amortization::interest_and_principal(
        annual_rate,
        2,
        5,
        principal,
        Money::ZERO,
        PaymentTiming::DueAtEnd,
    )?;
    println!("period 2 interest:  {}", split.interest);
    println!("period 2 principal: {}", split.principal);

    println!("amortization table:");
    for row in amortization::schedule(annual_rate, 5, principal, PaymentTiming::DueAtEnd)? {
        println!(
            "  period {} payment {} interest {} principal {} remaining {}",
            row.period, row.payment, row.interest, row.principal, row.remaining_capital
        );
    }

    // revolving account: 1000 limit at 35% apr
    let mut account = LoanAccount::new(Money::from_major(1_000), Rate::from_decimal(dec!(0.35)))?;
    account.draw(Money::from_major(500), 1)?;
    account.pay(Money::from_major(200), 15)?;
    account.draw(Money::from_major(100), 25)?;

    println!("balance day 30:          {}", account.balance_as_of(30));
    println!("available credit day 30: {}", account.available_credit_as_of(30));
    println!("interest owed day 30:    {}", account.interest_owed_as_of(30));
    println!("payoff day 30:           {}", account.payoff_as_of(30));

    Ok(())
}
