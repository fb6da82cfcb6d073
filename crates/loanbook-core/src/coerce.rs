//! Permissive deserializers for loan records supplied by the web layer.
//!
//! Amounts arrive as numbers, numeric strings, `null` or not at all; dates
//! arrive as RFC 3339 timestamps, bare `YYYY-MM-DD` strings or epoch
//! milliseconds. Anything that cannot be read becomes zero (amounts) or
//! `None` (dates). List entries that cannot be read are dropped, so one bad
//! record never fails the surrounding input.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use crate::holidays::{Holiday, HolidayCatalog};
use crate::loan::{Loan, Payment};
use crate::types::{non_negative, Money, MAX_AMOUNT};

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn money<'de, D>(deserializer: D) -> Result<Money, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().map(money_from_value).unwrap_or(Decimal::ZERO))
}

pub(crate) fn optional_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(datetime_from_value))
}

pub(crate) fn calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    datetime_from_value(&raw)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| serde::de::Error::custom(format!("unparseable calendar date {raw}")))
}

/// Loan identifiers arrive as strings or as database integers.
pub(crate) fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Payment entries: objects as usual, bare amounts as undated payments.
pub(crate) fn payments<'de, D>(deserializer: D) -> Result<Vec<Payment>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(entries(raw, "payments")
        .into_iter()
        .filter_map(|entry| match entry {
            Value::Object(_) => match serde_json::from_value::<Payment>(entry) {
                Ok(payment) => Some(payment),
                Err(e) => {
                    warn!(error = %e, "dropping unreadable payment entry");
                    None
                }
            },
            Value::Number(_) | Value::String(_) => Some(Payment {
                amount: money_from_value(&entry),
                date: None,
            }),
            other => {
                warn!(entry = %other, "dropping non-object payment entry");
                None
            }
        })
        .collect())
}

pub(crate) fn lenient_loan<'de, D>(deserializer: D) -> Result<Loan, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.map(loan_from_value).unwrap_or_default())
}

/// Loans that cannot be read keep their place in the list as empty records,
/// which report zero metrics.
pub(crate) fn loan_list<'de, D>(deserializer: D) -> Result<Vec<Loan>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(entries(raw, "loans").into_iter().map(loan_from_value).collect())
}

fn loan_from_value(value: Value) -> Loan {
    if !value.is_object() {
        warn!(entry = %value, "non-object loan record treated as empty");
        return Loan::default();
    }
    serde_json::from_value(value).unwrap_or_else(|e| {
        warn!(error = %e, "unreadable loan record treated as empty");
        Loan::default()
    })
}

/// Build a holiday catalog, counting the entries that had to be dropped.
pub(crate) fn holiday_catalog(raw: Option<Value>) -> HolidayCatalog {
    let mut rejected = 0;
    let holidays: Vec<Holiday> = entries(raw, "holidays")
        .into_iter()
        .filter_map(|entry| {
            let parsed = if entry.is_object() {
                serde_json::from_value::<Holiday>(entry.clone()).ok()
            } else {
                None
            };
            if parsed.is_none() {
                warn!(entry = %entry, "dropping unreadable holiday entry");
                rejected += 1;
            }
            parsed
        })
        .collect();
    HolidayCatalog::with_rejected(holidays, rejected)
}

fn entries(raw: Option<Value>, what: &str) -> Vec<Value> {
    match raw {
        Some(Value::Array(items)) => items,
        None | Some(Value::Null) => Vec::new(),
        Some(other) => {
            warn!(field = what, value = %other, "expected a list; treating as empty");
            Vec::new()
        }
    }
}

/// Read a monetary amount out of an arbitrary JSON value, clamped to
/// `[0, MAX_AMOUNT]`.
pub(crate) fn money_from_value(value: &Value) -> Money {
    let parsed = match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s.trim()),
        _ => None,
    };
    let amount = non_negative(parsed.unwrap_or(Decimal::ZERO));
    if amount > MAX_AMOUNT {
        warn!(%amount, max = %MAX_AMOUNT, "amount above supported maximum; capped");
        return MAX_AMOUNT;
    }
    amount
}

/// Strings are parsed as timestamps or dates; numbers are epoch milliseconds.
pub(crate) fn datetime_from_value(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_datetime(s),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}

/// Exact decimal parse, falling back to `f64` for values outside the
/// `Decimal` range: huge magnitudes saturate, tiny ones round to zero.
fn parse_decimal(s: &str) -> Option<Decimal> {
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = Decimal::from_str(s).or_else(|_| Decimal::from_scientific(s)) {
        return Some(d);
    }
    let f = s.parse::<f64>().ok().filter(|f| f.is_finite())?;
    Some(match Decimal::from_f64(f) {
        Some(d) => d,
        None if f.abs() < 1.0 => Decimal::ZERO,
        None if f > 0.0 => Decimal::MAX,
        None => Decimal::MIN,
    })
}

/// Parse a timestamp or a bare date. Bare dates are taken as UTC midnight.
pub(crate) fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ndt.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| ndt.and_utc())
}
