use serde_json::Value;
use std::io::{self, Read};
use tracing::debug;

/// JSON document piped on stdin, or `None` for an interactive terminal or
/// an empty pipe.
pub fn read_piped_document() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| format!("Cannot read stdin: {e}"))?;
    let document = buffer.trim();
    if document.is_empty() {
        return Ok(None);
    }

    debug!(bytes = document.len(), "read input from stdin");
    serde_json::from_str(document)
        .map(Some)
        .map_err(|e| format!("stdin is not valid JSON: {e}").into())
}
