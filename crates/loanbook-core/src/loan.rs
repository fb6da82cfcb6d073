//! Loan snapshot as supplied by the loan data provider.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::coerce;
use crate::types::{saturating_add, Money};

/// A payment recorded against a loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(default, deserialize_with = "coerce::money")]
    pub amount: Money,
    #[serde(default, deserialize_with = "coerce::optional_datetime")]
    pub date: Option<DateTime<Utc>>,
}

/// The fields of a loan record the engine reads.
///
/// Every field is optional on the wire. Missing or non-numeric amounts
/// become zero, amounts above [`MAX_AMOUNT`](crate::types::MAX_AMOUNT) are
/// capped, and missing or unparseable dates become `None`. Numeric ids are
/// kept as strings; bare numbers in `payments` are undated payments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    #[serde(
        default,
        deserialize_with = "coerce::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(
        default,
        alias = "disbursedAt",
        deserialize_with = "coerce::optional_datetime"
    )]
    pub disbursed_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "amountDisbursed", deserialize_with = "coerce::money")]
    pub amount_disbursed: Money,
    #[serde(default, alias = "dailyAmount", deserialize_with = "coerce::money")]
    pub daily_amount: Money,
    #[serde(default, alias = "amountToBePaid", deserialize_with = "coerce::money")]
    pub amount_to_be_paid: Money,
    #[serde(default, alias = "amountPaidSoFar", deserialize_with = "coerce::money")]
    pub amount_paid_so_far: Money,
    #[serde(default, deserialize_with = "coerce::payments")]
    pub payments: Vec<Payment>,
}

impl Loan {
    /// UTC calendar day of disbursement, time of day stripped.
    pub fn disbursement_date(&self) -> Option<NaiveDate> {
        self.disbursed_at.map(|dt| dt.date_naive())
    }

    /// Sum of recorded payment amounts, in recorded order.
    pub fn total_payments(&self) -> Money {
        self.payments
            .iter()
            .fold(Decimal::ZERO, |acc, p| saturating_add(acc, p.amount))
    }
}
