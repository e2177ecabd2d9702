//! Revolving credit ledger with day-accurate simple interest.
//!
//! A `LoanAccount` is an append-only log of dated draws and payments.
//! Queries replay the log, so interest is priced for the actual number of
//! days each balance was outstanding rather than from a period-end snapshot.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};
use crate::types::{AccountId, Direction, Transaction};

/// balance and cumulative interest at the end of one ledger day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyPosition {
    pub day: u32,
    pub balance: Money,
    pub interest_accrued: Money,
}

/// revolving credit account
///
/// The credit limit is fixed at construction. Draws are not checked against
/// it; over-draw is representable and preventing it is the caller's
/// responsibility. Shared use across threads requires external locking, as
/// queries read the full transaction log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanAccount {
    id: AccountId,
    credit_limit: Money,
    annual_rate: Rate,
    opened_on: Option<NaiveDate>,
    transactions: Vec<Transaction>,
}

impl LoanAccount {
    /// create a day-indexed account with an empty ledger
    pub fn new(credit_limit: Money, annual_rate: Rate) -> Result<Self> {
        if !credit_limit.is_positive() {
            return Err(LedgerError::InvalidCreditLimit { limit: credit_limit });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            credit_limit,
            annual_rate,
            opened_on: None,
            transactions: Vec::new(),
        })
    }

    /// create an account anchored to a calendar date; day 0 is the opening date
    pub fn opened_on(credit_limit: Money, annual_rate: Rate, date: NaiveDate) -> Result<Self> {
        let mut account = Self::new(credit_limit, annual_rate)?;
        account.opened_on = Some(date);
        Ok(account)
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn credit_limit(&self) -> Money {
        self.credit_limit
    }

    pub fn annual_rate(&self) -> Rate {
        self.annual_rate
    }

    pub fn opening_date(&self) -> Option<NaiveDate> {
        self.opened_on
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// record a draw on the given day
    pub fn draw(&mut self, amount: Money, day: u32) -> Result<()> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidDrawAmount { amount });
        }
        self.transactions.push(Transaction {
            day,
            amount,
            direction: Direction::Debit,
        });
        Ok(())
    }

    /// record a payment on the given day
    pub fn pay(&mut self, amount: Money, day: u32) -> Result<()> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidPaymentAmount { amount });
        }
        self.transactions.push(Transaction {
            day,
            amount,
            direction: Direction::Credit,
        });
        Ok(())
    }

    /// outstanding debt at the end of `day`
    ///
    /// Negative when cumulative payments exceed cumulative draws; that is
    /// representable, not an error.
    pub fn balance_as_of(&self, day: u32) -> Money {
        self.transactions
            .iter()
            .filter(|txn| txn.day <= day)
            .fold(Money::ZERO, |balance, txn| balance + txn.signed_amount())
    }

    /// credit remaining under the limit at the end of `day`
    pub fn available_credit_as_of(&self, day: u32) -> Money {
        self.credit_limit - self.balance_as_of(day)
    }

    /// simple interest accrued through the end of `day`, rounded to cents once
    ///
    /// Replays the ledger day by day from day 0. After a day's transactions
    /// are applied, that day accrues `balance * rate / 365` if the balance is
    /// positive; the accrual never feeds back into the balance. A batch
    /// formula over the ending balance is not equivalent and is deliberately
    /// not used.
    pub fn interest_owed_as_of(&self, day: u32) -> Money {
        let (_, accrued) = self.replay_through(day);
        accrued.round_bank()
    }

    /// balance plus accrued interest; the amount that settles the account
    pub fn payoff_as_of(&self, day: u32) -> Money {
        self.balance_as_of(day) + self.interest_owed_as_of(day)
    }

    /// end-of-day balance and cumulative interest for every day through `day`
    pub fn daily_positions(&self, day: u32) -> Vec<DailyPosition> {
        let daily_rate = self.annual_rate.daily().as_decimal();
        let mut balance = Money::ZERO;
        let mut accrued = Money::ZERO;
        let mut positions = Vec::with_capacity(day as usize + 1);

        for today in 0..=day {
            balance = self.apply_day(balance, today);
            if balance.is_positive() {
                accrued += balance * daily_rate;
            }
            positions.push(DailyPosition {
                day: today,
                balance,
                interest_accrued: accrued.round_bank(),
            });
        }

        positions
    }

    /// day offset of a calendar date, relative to the opening date
    pub fn day_for(&self, date: NaiveDate) -> Result<u32> {
        let opened = self.opened_on.ok_or_else(|| LedgerError::InvalidDate {
            message: "account has no opening date".to_string(),
        })?;
        let offset = (date - opened).num_days();
        if offset < 0 {
            return Err(LedgerError::InvalidDate {
                message: format!("{date} precedes opening date {opened}"),
            });
        }
        Ok(offset as u32)
    }

    /// record a draw on a calendar date
    pub fn draw_on(&mut self, amount: Money, date: NaiveDate) -> Result<()> {
        let day = self.day_for(date)?;
        self.draw(amount, day)
    }

    /// record a payment on a calendar date
    pub fn pay_on(&mut self, amount: Money, date: NaiveDate) -> Result<()> {
        let day = self.day_for(date)?;
        self.pay(amount, day)
    }

    /// outstanding debt at the end of a calendar date
    pub fn balance_on(&self, date: NaiveDate) -> Result<Money> {
        Ok(self.balance_as_of(self.day_for(date)?))
    }

    /// accrued interest through the end of a calendar date
    pub fn interest_owed_on(&self, date: NaiveDate) -> Result<Money> {
        Ok(self.interest_owed_as_of(self.day_for(date)?))
    }

    /// json snapshot of the full account state
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// restore an account from a json snapshot
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn replay_through(&self, day: u32) -> (Money, Money) {
        let daily_rate = self.annual_rate.daily().as_decimal();
        let mut balance = Money::ZERO;
        let mut accrued = Money::ZERO;

        for today in 0..=day {
            balance = self.apply_day(balance, today);
            // interest is charged only while the account owes money
            if balance.is_positive() {
                accrued += balance * daily_rate;
            }
        }

        (balance, accrued)
    }

    fn apply_day(&self, balance: Money, day: u32) -> Money {
        self.transactions
            .iter()
            .filter(|txn| txn.day == day)
            .fold(balance, |balance, txn| balance + txn.signed_amount())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn money(s: &str) -> Money {
        Money::from_str_exact(s).unwrap()
    }

    fn open_account() -> LoanAccount {
        LoanAccount::new(Money::from_major(1_000), Rate::from_decimal(dec!(0.35))).unwrap()
    }

    #[test]
    fn test_single_draw_scenario() {
        let mut account = open_account();
        account.draw(Money::from_major(500), 1).unwrap();

        assert_eq!(account.balance_as_of(30), Money::from_major(500));
        assert_eq!(account.available_credit_as_of(30), Money::from_major(500));
        // 500 at 35% apr, accruing each day from the draw through day 30
        assert_eq!(account.interest_owed_as_of(30), money("14.38"));
        assert_eq!(account.payoff_as_of(30), money("514.38"));
    }

    #[test]
    fn test_mid_period_payment_and_redraw_scenario() {
        let mut account = open_account();
        account.draw(Money::from_major(500), 1).unwrap();
        account.pay(Money::from_major(200), 15).unwrap();
        account.draw(Money::from_major(100), 25).unwrap();

        assert_eq!(account.balance_as_of(30), Money::from_major(400));
        // balances 500, 300 and 400 held for 14, 10 and 6 days
        assert_eq!(account.interest_owed_as_of(30), money("11.89"));
    }

    #[test]
    fn test_interest_depends_on_days_outstanding_not_ending_balance() {
        let mut early = open_account();
        early.draw(Money::from_major(500), 1).unwrap();

        let mut late = open_account();
        late.draw(Money::from_major(500), 20).unwrap();

        // same ending balance, very different carry
        assert_eq!(early.balance_as_of(30), late.balance_as_of(30));
        assert!(early.interest_owed_as_of(30) > late.interest_owed_as_of(30));
    }

    #[test]
    fn test_no_interest_before_first_draw() {
        let mut account = open_account();
        account.draw(Money::from_major(500), 10).unwrap();

        assert_eq!(account.interest_owed_as_of(9), Money::ZERO);
        assert_eq!(account.balance_as_of(9), Money::ZERO);
    }

    #[test]
    fn test_no_interest_while_balance_non_positive() {
        let mut account = open_account();
        account.draw(Money::from_major(500), 1).unwrap();
        account.pay(Money::from_major(500), 10).unwrap();

        let settled = account.interest_owed_as_of(10);
        // paid off on day 10; nothing further accrues
        assert_eq!(account.interest_owed_as_of(60), settled);
    }

    #[test]
    fn test_overpayment_makes_balance_negative() {
        let mut account = open_account();
        account.draw(Money::from_major(500), 1).unwrap();
        account.pay(Money::from_major(700), 5).unwrap();

        assert_eq!(account.balance_as_of(10), Money::from_major(-200));
        assert_eq!(account.available_credit_as_of(10), Money::from_major(1_200));
    }

    #[test]
    fn test_over_draw_is_representable() {
        let mut account = open_account();
        account.draw(Money::from_major(1_500), 1).unwrap();

        assert_eq!(account.balance_as_of(1), Money::from_major(1_500));
        assert_eq!(account.available_credit_as_of(1), Money::from_major(-500));
    }

    #[test]
    fn test_same_day_transactions_net_out() {
        let mut account = open_account();
        account.draw(Money::from_major(500), 3).unwrap();
        account.pay(Money::from_major(200), 3).unwrap();
        account.draw(Money::from_major(50), 3).unwrap();

        assert_eq!(account.balance_as_of(3), Money::from_major(350));

        // day 3 accrues on the netted balance
        let expected = (Money::from_major(350) * (dec!(0.35) / dec!(365))).round_bank();
        assert_eq!(account.interest_owed_as_of(3), expected);
    }

    #[test]
    fn test_interest_is_monotonic_while_balance_positive() {
        let mut account = open_account();
        account.draw(Money::from_major(500), 1).unwrap();
        account.pay(Money::from_major(200), 15).unwrap();
        account.draw(Money::from_major(100), 25).unwrap();

        let mut previous = Money::ZERO;
        for day in 0..=60 {
            let owed = account.interest_owed_as_of(day);
            assert!(owed >= previous, "interest fell between day {} and {day}", day.max(1) - 1);
            previous = owed;
        }
    }

    #[test]
    fn test_queries_are_idempotent() {
        let mut account = open_account();
        account.draw(Money::from_major(500), 1).unwrap();
        account.pay(Money::from_major(200), 15).unwrap();

        assert_eq!(account.balance_as_of(30), account.balance_as_of(30));
        assert_eq!(account.interest_owed_as_of(30), account.interest_owed_as_of(30));
        assert_eq!(account.payoff_as_of(30), account.payoff_as_of(30));
    }

    #[test]
    fn test_daily_positions_track_the_replay() {
        let mut account = open_account();
        account.draw(Money::from_major(500), 1).unwrap();
        account.pay(Money::from_major(200), 15).unwrap();

        let positions = account.daily_positions(30);
        assert_eq!(positions.len(), 31);

        assert_eq!(positions[0].balance, Money::ZERO);
        assert_eq!(positions[0].interest_accrued, Money::ZERO);
        assert_eq!(positions[1].balance, Money::from_major(500));
        assert_eq!(positions[14].balance, Money::from_major(500));
        assert_eq!(positions[15].balance, Money::from_major(300));

        for position in &positions {
            assert_eq!(position.balance, account.balance_as_of(position.day));
            assert_eq!(position.interest_accrued, account.interest_owed_as_of(position.day));
        }
    }

    #[test]
    fn test_invalid_credit_limit_is_rejected() {
        let err = LoanAccount::new(Money::ZERO, Rate::from_decimal(dec!(0.35))).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidCreditLimit { .. }));

        let err = LoanAccount::new(Money::from_major(-100), Rate::from_decimal(dec!(0.35))).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidCreditLimit { .. }));
    }

    #[test]
    fn test_non_positive_amounts_are_rejected() {
        let mut account = open_account();

        let err = account.draw(Money::ZERO, 1).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidDrawAmount { .. }));

        let err = account.pay(Money::from_major(-50), 1).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidPaymentAmount { .. }));

        assert!(account.transactions().is_empty());
    }

    #[test]
    fn test_date_indexed_ledger_matches_day_indexed() {
        let opened = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut account =
            LoanAccount::opened_on(Money::from_major(1_000), Rate::from_decimal(dec!(0.35)), opened).unwrap();

        account
            .draw_on(Money::from_major(500), NaiveDate::from_ymd_opt(2024, 1, 2).unwrap())
            .unwrap();

        // jan 31 is day 30 of the ledger
        let statement_date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(account.day_for(statement_date).unwrap(), 30);
        assert_eq!(account.balance_on(statement_date).unwrap(), Money::from_major(500));
        assert_eq!(account.interest_owed_on(statement_date).unwrap(), money("14.38"));
    }

    #[test]
    fn test_date_before_opening_is_rejected() {
        let opened = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let account =
            LoanAccount::opened_on(Money::from_major(1_000), Rate::from_decimal(dec!(0.35)), opened).unwrap();

        let err = account.day_for(NaiveDate::from_ymd_opt(2024, 1, 9).unwrap()).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidDate { .. }));
    }

    #[test]
    fn test_dates_require_an_opening_date() {
        let account = open_account();
        let err = account.day_for(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidDate { .. }));
    }

    #[test]
    fn test_json_snapshot_round_trip() {
        let mut account = open_account();
        account.draw(Money::from_major(500), 1).unwrap();
        account.pay(Money::from_major(200), 15).unwrap();

        let json = account.to_json().unwrap();
        let restored = LoanAccount::from_json(&json).unwrap();

        assert_eq!(restored.id(), account.id());
        assert_eq!(restored.credit_limit(), account.credit_limit());
        assert_eq!(restored.annual_rate(), account.annual_rate());
        assert_eq!(restored.transactions(), account.transactions());
        assert_eq!(restored.interest_owed_as_of(30), account.interest_owed_as_of(30));
    }
}
