use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_flat_object(map);
            }
        }
        Value::Array(arr) => {
            print_array_table(arr);
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>) {
    if let Value::Object(res_map) = result {
        // Scalars and nested objects go into one field/value table; arrays of
        // rows (schedule entries, portfolio loans) get a table each.
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        let mut sections: Vec<(&str, &Vec<Value>)> = Vec::new();
        for (key, val) in res_map {
            match val {
                Value::Object(nested) => {
                    for (sub_key, sub_val) in nested {
                        builder.push_record([format!("{key}.{sub_key}"), format_value(sub_val)]);
                    }
                }
                Value::Array(rows) if rows.iter().all(Value::is_object) => {
                    sections.push((key.as_str(), rows));
                }
                _ => {
                    builder.push_record([key.clone(), format_value(val)]);
                }
            }
        }
        println!("{}", Table::from(builder));

        for (name, rows) in sections {
            println!("\n{}:", name);
            print_array_table(rows);
        }
    } else {
        print_flat_object(envelope);
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_flat_object(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    let flattened: Vec<Map<String, Value>> = arr.iter().map(super::flatten_row).collect();
    let headers = super::collect_headers(&flattened);
    if headers.is_empty() {
        for item in arr {
            println!("{}", format_value(item));
        }
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(&headers);
    for row in &flattened {
        let cells: Vec<String> = headers
            .iter()
            .map(|h| row.get(h.as_str()).map(format_value).unwrap_or_default())
            .collect();
        builder.push_record(cells);
    }
    println!("{}", Table::from(builder));
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
