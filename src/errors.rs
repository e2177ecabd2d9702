use thiserror::Error;

use crate::decimal::Money;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("invalid credit limit: {limit}")]
    InvalidCreditLimit {
        limit: Money,
    },

    #[error("invalid draw amount: {amount}")]
    InvalidDrawAmount {
        amount: Money,
    },

    #[error("invalid payment amount: {amount}")]
    InvalidPaymentAmount {
        amount: Money,
    },

    #[error("invalid term length: {periods} periods")]
    InvalidTermLength {
        periods: u32,
    },

    #[error("period {period} outside schedule of {periods} periods")]
    PeriodOutOfRange {
        period: u32,
        periods: u32,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("calculation error: {message}")]
    Calculation {
        message: String,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
