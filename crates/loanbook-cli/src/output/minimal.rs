use serde_json::Value;

/// Well-known answer fields, most specific first.
const PRIORITY_KEYS: [&str; 5] = [
    "outstanding_due",
    "total_outstanding_due",
    "is_holiday",
    "total_due",
    "balance_remaining",
];

/// Sub-objects searched after the top level of the result.
const NESTED_SECTIONS: [&str; 2] = ["totals", "summary"];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        let sections = std::iter::once(map).chain(
            NESTED_SECTIONS
                .iter()
                .filter_map(|s| map.get(*s).and_then(Value::as_object)),
        );
        for section in sections {
            for key in &PRIORITY_KEYS {
                if let Some(val) = section.get(*key) {
                    if !val.is_null() {
                        println!("{}", format_minimal(val));
                        return;
                    }
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
