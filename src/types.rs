use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::decimal::Money;

/// unique identifier for a loan account
pub type AccountId = Uuid;

/// whether a period's payment falls before or after that period's interest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentTiming {
    /// payments are due at the beginning of each period
    DueAtStart,
    /// payments are due at the end of each period
    DueAtEnd,
}

/// how often level payments are made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentFrequency {
    Weekly,
    Monthly,
    Quarterly,
    SemiAnnually,
    Annually,
}

impl PaymentFrequency {
    pub fn periods_per_year(&self) -> u32 {
        match self {
            PaymentFrequency::Weekly => 52,
            PaymentFrequency::Monthly => 12,
            PaymentFrequency::Quarterly => 4,
            PaymentFrequency::SemiAnnually => 2,
            PaymentFrequency::Annually => 1,
        }
    }
}

/// direction of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// a payment, reduces debt
    Credit,
    /// a draw, increases debt
    Debit,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Credit => write!(f, "Credit"),
            Direction::Debit => write!(f, "Debit"),
        }
    }
}

/// a dated draw or payment, immutable once recorded
///
/// Transactions on the same day may appear in any order; only the day
/// matters for interest accrual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub day: u32,
    pub amount: Money,
    pub direction: Direction,
}

impl Transaction {
    /// amount signed by direction: positive for a draw, negative for a payment
    pub fn signed_amount(&self) -> Money {
        match self.direction {
            Direction::Credit => -self.amount.abs(),
            Direction::Debit => self.amount.abs(),
        }
    }
}
