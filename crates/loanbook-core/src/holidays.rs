//! Holiday catalog: fixed-date and annually recurring markers.

use std::ops::Deref;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

const DEFAULT_REASON: &str = "Holiday";

/// A day on which no installment falls due.
///
/// Recurring holidays match on month and day in every year; fixed holidays
/// match only their exact date. Dates supplied as timestamps are reduced to
/// their UTC calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    #[serde(deserialize_with = "crate::coerce::calendar_date")]
    pub date: NaiveDate,
    #[serde(default, alias = "isRecurring", alias = "recurring")]
    pub is_recurring: bool,
    #[serde(
        default,
        alias = "reason",
        alias = "description",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
}

impl Holiday {
    pub fn fixed(date: NaiveDate) -> Self {
        Self {
            date,
            is_recurring: false,
            name: None,
        }
    }

    pub fn recurring(date: NaiveDate) -> Self {
        Self {
            date,
            is_recurring: true,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn matches(&self, date: NaiveDate) -> bool {
        if self.is_recurring {
            self.date.month() == date.month() && self.date.day() == date.day()
        } else {
            self.date == date
        }
    }

    /// Display reason for schedule entries; never empty.
    pub fn reason(&self) -> &str {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_REASON,
        }
    }
}

/// A holiday list as supplied by callers.
///
/// Deserialization is lenient: entries without a readable date are dropped
/// and counted, so one bad row never rejects the whole input. A single
/// [`Holiday`] stays strict.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HolidayCatalog {
    entries: Vec<Holiday>,
    #[serde(skip)]
    rejected: usize,
}

impl HolidayCatalog {
    pub(crate) fn with_rejected(entries: Vec<Holiday>, rejected: usize) -> Self {
        Self { entries, rejected }
    }

    /// Number of entries dropped while reading the list.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn as_slice(&self) -> &[Holiday] {
        &self.entries
    }
}

impl From<Vec<Holiday>> for HolidayCatalog {
    fn from(entries: Vec<Holiday>) -> Self {
        Self::with_rejected(entries, 0)
    }
}

impl Deref for HolidayCatalog {
    type Target = [Holiday];

    fn deref(&self) -> &[Holiday] {
        &self.entries
    }
}

impl<'de> Deserialize<'de> for HolidayCatalog {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(crate::coerce::holiday_catalog(raw))
    }
}

/// Skipped rows reported in computation warnings, or `None` when every row
/// was read.
pub fn rejected_warning(catalog: &HolidayCatalog) -> Option<String> {
    match catalog.rejected() {
        0 => None,
        n => Some(format!(
            "{n} holiday entr{} without a readable date ignored",
            if n == 1 { "y" } else { "ies" }
        )),
    }
}

/// First holiday in the catalog that falls on `date`.
pub fn find_holiday(date: NaiveDate, holidays: &[Holiday]) -> Option<&Holiday> {
    holidays.iter().find(|h| h.matches(date))
}

pub fn is_holiday(date: NaiveDate, holidays: &[Holiday]) -> bool {
    find_holiday(date, holidays).is_some()
}
