use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load a loan or holiday JSON document from disk.
pub fn load_document(path: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let location = locate(path)?;
    let contents = fs::read_to_string(&location)
        .map_err(|e| format!("Cannot read loan data file '{}': {e}", location.display()))?;
    debug!(path = %location.display(), bytes = contents.len(), "loaded input file");
    serde_json::from_str(&contents)
        .map_err(|e| format!("'{}' is not valid JSON: {e}", location.display()).into())
}

/// Relative paths resolve against the working directory; the target must be
/// an existing regular file.
fn locate(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let location = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !location.is_file() {
        let problem = if location.exists() { "not a regular file" } else { "no such file" };
        return Err(format!("Input '{}': {problem}", location.display()).into());
    }
    Ok(location)
}
