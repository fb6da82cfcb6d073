pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Read typed input from `--input` if given, else from piped stdin.
///
/// Loan and holiday fields are coerced by the core types, so a decode error
/// here means the document's overall shape is wrong.
pub fn read_input<T: DeserializeOwned>(
    path: Option<&str>,
    what: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    let document = read_document(path, what)?;
    serde_json::from_value(document).map_err(|e| format!("Invalid {what} input: {e}").into())
}

/// Untyped variant of [`read_input`] for commands that inspect the shape.
pub fn read_document(path: Option<&str>, what: &str) -> Result<Value, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return file::load_document(path);
    }
    stdin::read_piped_document()?
        .ok_or_else(|| format!("--input <file.json> or stdin required for {what}").into())
}
