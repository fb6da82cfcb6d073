pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Flatten one level of nesting: `{"metrics": {"a": 1}}` becomes `{"metrics.a": 1}`.
fn flatten_row(value: &Value) -> Map<String, Value> {
    let mut flat = Map::new();
    if let Value::Object(map) = value {
        for (key, val) in map {
            match val {
                Value::Object(nested) => {
                    for (sub_key, sub_val) in nested {
                        flat.insert(format!("{key}.{sub_key}"), sub_val.clone());
                    }
                }
                _ => {
                    flat.insert(key.clone(), val.clone());
                }
            }
        }
    }
    flat
}

/// Union of keys across rows, in first-seen order. Optional fields such as
/// `holiday_reason` only appear on some rows.
fn collect_headers(rows: &[Map<String, Value>]) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !headers.iter().any(|h| h == key) {
                headers.push(key.clone());
            }
        }
    }
    headers
}
