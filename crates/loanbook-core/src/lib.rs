//! Loan repayment calendar and collection metrics.
//!
//! Given a loan's disbursement date, daily installment, total payable, recorded
//! payments and a holiday catalog, this crate counts elapsed business days,
//! derives what should have been collected by a given day, reconciles that
//! against what was paid, and lays out the day-by-day repayment schedule.
//! Every computation is a pure function of its inputs.

pub mod calendar;
pub mod error;
pub mod holidays;
pub mod loan;
pub mod metrics;
pub mod policy;
pub mod portfolio;
pub mod schedule;
pub mod types;

mod coerce;

pub use error::LoanbookError;
pub use holidays::{Holiday, HolidayCatalog};
pub use loan::{Loan, Payment};
pub use policy::RepaymentPolicy;
pub use types::*;

/// Standard result type for all loanbook operations
pub type LoanbookResult<T> = Result<T, LoanbookError>;
