use serde_json::{Map, Value};
use std::io;

/// Write output as CSV to stdout.
///
/// A result holding an array of rows (schedule entries, portfolio loans) is
/// written as one CSV row per element; otherwise a two-column field/value CSV.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            if let Some(Value::Object(result)) = map.get("result") {
                match first_row_array(result) {
                    Some(rows) => write_array_csv(&mut wtr, rows),
                    None => write_fields_csv(&mut wtr, result),
                }
            } else {
                write_fields_csv(&mut wtr, map);
            }
        }
        Value::Array(arr) => {
            write_array_csv(&mut wtr, arr);
        }
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn first_row_array(result: &Map<String, Value>) -> Option<&Vec<Value>> {
    result.values().find_map(|v| match v {
        Value::Array(rows) if !rows.is_empty() && rows.iter().all(Value::is_object) => Some(rows),
        _ => None,
    })
}

fn write_fields_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, map: &Map<String, Value>) {
    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in map {
        let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
    }
}

fn write_array_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    let flattened: Vec<Map<String, Value>> = arr.iter().map(super::flatten_row).collect();
    let headers = super::collect_headers(&flattened);
    if headers.is_empty() {
        for item in arr {
            let _ = wtr.write_record([&format_csv_value(item)]);
        }
        return;
    }

    let _ = wtr.write_record(&headers);
    for row in &flattened {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| row.get(h.as_str()).map(format_csv_value).unwrap_or_default())
            .collect();
        let _ = wtr.write_record(&cells);
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
