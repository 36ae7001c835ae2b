//! Error type for hash conversion
//!
//! Every failure is terminal for the invocation and maps to exit status 1.

/// Message printed when the argument is not valid JSON
pub const PARSE_MESSAGE: &str = "Error: Input must be a valid JSON array";

/// Usage line printed on a wrong argument count
pub const USAGE_MESSAGE: &str = "Usage: btc-hash-converter '[56,50,19,157,...]'";

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Wrong number of positional arguments
    #[error("expected exactly one argument")]
    Usage,

    /// Argument is not valid JSON
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Valid JSON, but not an array
    #[error("input is not a JSON array (found {found})")]
    NotAnArray { found: String },

    #[error("element {index} is not an integer: {value}")]
    NotAnInteger { index: usize, value: String },

    #[error("element {index} is out of byte range: {value}")]
    OutOfRange { index: usize, value: String },

    /// Byte array could not be written back out as JSON
    #[error("failed to encode JSON: {0}")]
    Encode(serde_json::Error),

    /// Display hash could not be decoded
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl ConvertError {
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// Line written to stdout for this error
    pub fn user_message(&self) -> String {
        match self {
            ConvertError::Usage => USAGE_MESSAGE.to_string(),
            ConvertError::Parse(_) => PARSE_MESSAGE.to_string(),
            other => format!("Error: {}", other),
        }
    }
}

/// Short name of a JSON value's kind, for error messages
pub fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_and_parse_messages() {
        assert_eq!(ConvertError::Usage.user_message(), USAGE_MESSAGE);

        let err = serde_json::from_str::<serde_json::Value>("[1,2,").unwrap_err();
        assert_eq!(ConvertError::from(err).user_message(), PARSE_MESSAGE);
    }

    #[test]
    fn test_semantic_message() {
        let err = ConvertError::OutOfRange { index: 2, value: "256".to_string() };
        assert_eq!(err.user_message(), "Error: element 2 is out of byte range: 256");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_json_kind() {
        assert_eq!(json_kind(&serde_json::json!({"a": 1})), "object");
        assert_eq!(json_kind(&serde_json::json!("x")), "string");
        assert_eq!(json_kind(&serde_json::json!(null)), "null");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConvertError>();
    }
}
