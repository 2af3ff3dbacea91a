use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    message: String,
}

impl DecodeError {
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for DecodeError {}

/// Parses record payload bytes as JSON. An unparseable payload is fatal for
/// the invocation; there is no raw-bytes fallback.
pub fn decode_record_payload(payload: &[u8]) -> Result<Value, DecodeError> {
    serde_json::from_slice(payload).map_err(|error| DecodeError {
        message: format!("Record payload is not valid JSON: {error}"),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_json_object_payload() {
        let value =
            decode_record_payload(br#"{"temp": 21.5}"#).expect("payload should decode");

        assert_eq!(value, json!({"temp": 21.5}));
    }

    #[test]
    fn rejects_non_json_payload() {
        let error =
            decode_record_payload(b"21.5 degrees").expect_err("raw text should fail");

        assert!(error.message().contains("not valid JSON"));
    }
}
