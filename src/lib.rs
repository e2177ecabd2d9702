pub mod account;
pub mod amortization;
pub mod decimal;
pub mod errors;
pub mod types;

// re-export key types
pub use account::{DailyPosition, LoanAccount};
pub use amortization::{PeriodBreakdown, ScheduledPeriod};
pub use decimal::{Money, Rate};
pub use errors::{LedgerError, Result};
pub use types::{AccountId, Direction, PaymentFrequency, PaymentTiming, Transaction};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
