//! Level-payment amortization for loans and annuities.
//!
//! Sign convention follows the spreadsheet one: a borrowed amount is a
//! positive present value and the resulting payment is negative (a cash
//! outflow to the payer). Interest and principal carry the same sign as the
//! payment and the three are never renormalized mid-computation.
//!
//! The growth factor `(1 + rate)^periods` is computed in floating point; all
//! other arithmetic stays consistent with it and only final results are
//! converted to decimal and rounded to cents, ties to even.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};
use crate::types::PaymentTiming;

/// interest/principal split of one period's level payment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodBreakdown {
    pub interest: Money,
    pub principal: Money,
}

/// one row of an amortization table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledPeriod {
    pub period: u32,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    pub remaining_capital: Money,
}

/// calculate the level payment for a loan with a target future value
///
/// `rate` is the rate per period as a decimal fraction (use
/// `Rate::per_period` to derive it from an annual rate). The result is
/// rounded to cents, ties to even.
pub fn payment_with_future_value(
    rate: Rate,
    periods: u32,
    present_value: Money,
    future_value: Money,
    timing: PaymentTiming,
) -> Result<Money> {
    let pmt = level_payment(rate, periods, present_value, future_value, timing)?;
    Ok(to_money(pmt)?.round_bank())
}

/// calculate the level payment for a loan repaid to zero
pub fn payment(rate: Rate, periods: u32, present_value: Money, timing: PaymentTiming) -> Result<Money> {
    payment_with_future_value(rate, periods, present_value, Money::ZERO, timing)
}

/// total cash paid over the life of the loan, as a positive magnitude
pub fn total_payable(rate: Rate, periods: u32, present_value: Money, timing: PaymentTiming) -> Result<Money> {
    let pmt = payment(rate, periods, present_value, timing)?;
    Ok((pmt * Decimal::from(periods)).abs())
}

/// interest and principal portions of the payment for one period
///
/// Walks the declining-balance recurrence from period 1 up to `period`,
/// feeding on the unrounded level payment; only the returned pair is rounded.
pub fn interest_and_principal(
    rate: Rate,
    period: u32,
    periods: u32,
    present_value: Money,
    future_value: Money,
    timing: PaymentTiming,
) -> Result<PeriodBreakdown> {
    if period == 0 || period > periods {
        return Err(LedgerError::PeriodOutOfRange { period, periods });
    }

    let pmt = level_payment(rate, periods, present_value, future_value, timing)?;
    let rate = rate.to_f64();
    let mut capital = present_value.to_f64();
    let mut interest = 0.0;
    let mut principal = 0.0;

    for i in 1..=period {
        interest = period_interest(capital, rate, i, timing);
        principal = pmt - interest;
        capital += principal;
    }

    Ok(PeriodBreakdown {
        interest: to_money(interest)?.round_bank(),
        principal: to_money(principal)?.round_bank(),
    })
}

/// interest portion of the payment for one period (IPMT)
pub fn interest_portion(
    rate: Rate,
    period: u32,
    periods: u32,
    present_value: Money,
    future_value: Money,
    timing: PaymentTiming,
) -> Result<Money> {
    interest_and_principal(rate, period, periods, present_value, future_value, timing)
        .map(|split| split.interest)
}

/// principal portion of the payment for one period (PPMT)
pub fn principal_portion(
    rate: Rate,
    period: u32,
    periods: u32,
    present_value: Money,
    future_value: Money,
    timing: PaymentTiming,
) -> Result<Money> {
    interest_and_principal(rate, period, periods, present_value, future_value, timing)
        .map(|split| split.principal)
}

/// full amortization table for a loan repaid to zero
pub fn schedule(
    rate: Rate,
    periods: u32,
    present_value: Money,
    timing: PaymentTiming,
) -> Result<Vec<ScheduledPeriod>> {
    let pmt = level_payment(rate, periods, present_value, Money::ZERO, timing)?;
    let payment = to_money(pmt)?.round_bank();
    let rate = rate.to_f64();
    let mut capital = present_value.to_f64();
    let mut rows = Vec::with_capacity(periods as usize);

    for i in 1..=periods {
        let interest = period_interest(capital, rate, i, timing);
        let principal = pmt - interest;
        capital += principal;

        rows.push(ScheduledPeriod {
            period: i,
            payment,
            interest: to_money(interest)?.round_bank(),
            principal: to_money(principal)?.round_bank(),
            remaining_capital: to_money(capital)?.round_bank(),
        });
    }

    Ok(rows)
}

/// unrounded level payment; the recurrences above feed on this full-precision value
fn level_payment(
    rate: Rate,
    periods: u32,
    present_value: Money,
    future_value: Money,
    timing: PaymentTiming,
) -> Result<f64> {
    if periods == 0 {
        return Err(LedgerError::InvalidTermLength { periods });
    }

    let rate = rate.to_f64();
    // a borrowed amount is a negative cash flow to the payer
    let pv = -present_value.to_f64();
    let fv = future_value.to_f64();
    let delta = pv - fv;

    let mut pmt = if rate == 0.0 {
        delta / periods as f64
    } else {
        let growth = (1.0 + rate).powi(periods as i32);
        delta * rate * growth / (growth - 1.0) + fv * rate
    };

    // one fewer period of rate accrues when the payment leads the period
    if timing == PaymentTiming::DueAtStart {
        pmt /= 1.0 + rate;
    }

    if !pmt.is_finite() {
        return Err(LedgerError::Calculation {
            message: format!("non-finite payment for rate {rate} over {periods} periods"),
        });
    }

    Ok(pmt)
}

fn period_interest(capital: f64, rate: f64, period: u32, timing: PaymentTiming) -> f64 {
    // no interest falls due before the very first advance payment
    if timing == PaymentTiming::DueAtStart && period == 1 {
        0.0
    } else {
        -capital * rate
    }
}

fn to_money(value: f64) -> Result<Money> {
    Decimal::from_f64(value)
        .map(Money::from_decimal)
        .ok_or_else(|| LedgerError::Calculation {
            message: format!("value {value} is not representable as a decimal"),
        })
}
