use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoanbookError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for LoanbookError {
    fn from(e: serde_json::Error) -> Self {
        LoanbookError::SerializationError(e.to_string())
    }
}

impl From<serde_yaml::Error> for LoanbookError {
    fn from(e: serde_yaml::Error) -> Self {
        LoanbookError::SerializationError(e.to_string())
    }
}
