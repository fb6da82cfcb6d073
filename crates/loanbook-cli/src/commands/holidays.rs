use chrono::NaiveDate;
use clap::Args;
use serde_json::Value;

use loanbook_core::holidays::{find_holiday, rejected_warning, Holiday, HolidayCatalog};

use crate::input;

/// Arguments for a holiday catalog lookup
#[derive(Args)]
pub struct IsHolidayArgs {
    /// Date to check (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,

    /// Path to JSON holiday list, bare or as {"holidays": [...]}
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_is_holiday(args: IsHolidayArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let document = input::read_document(args.input.as_deref(), "holiday lookup")?;
    let catalog = catalog_from_document(document)?;
    let found = find_holiday(args.date, &catalog);

    let warnings: Vec<String> = rejected_warning(&catalog).into_iter().collect();

    Ok(serde_json::json!({
        "result": {
            "date": args.date,
            "is_holiday": found.is_some(),
            "reason": found.map(Holiday::reason),
            "is_recurring": found.map(|h| h.is_recurring),
        },
        "warnings": warnings,
    }))
}

/// Accept a bare list or an object carrying a `holidays` list.
fn catalog_from_document(document: Value) -> Result<HolidayCatalog, serde_json::Error> {
    let list = match document {
        Value::Object(mut map) => map.remove("holidays").unwrap_or(Value::Null),
        other => other,
    };
    serde_json::from_value(list)
}
