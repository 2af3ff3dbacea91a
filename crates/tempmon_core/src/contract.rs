use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_POLL_TIMEOUT_SECONDS: f64 = 3.0;
/// Hosting runtime caps an invocation at 15 minutes; a longer poll budget
/// can never be honored.
pub const MAX_POLL_TIMEOUT_SECONDS: f64 = 900.0;
pub const POLL_PAUSE_MILLIS: u64 = 200;
pub const METRIC_NAMESPACE: &str = "Temperature Monitoring Database App";
pub const METRIC_NAME: &str = "Temperature Reading";
pub const DELIVERY_STREAM_NAME: &str = "FirehoseTempReading";

/// Raw poll event as delivered by the invoking caller. Field names follow
/// the wire contract; extra fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PollRequest {
    #[serde(rename = "StreamName")]
    pub stream_name: String,
    #[serde(rename = "Timeout", default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<f64>,
    #[serde(rename = "ShardId", default, skip_serializing_if = "Option::is_none")]
    pub shard_id: Option<String>,
    #[serde(
        rename = "NextShardIterator",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub next_shard_iterator: Option<String>,
    #[serde(
        rename = "SequenceNumber",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sequence_number: Option<String>,
}

/// Where the first fetch should be positioned, resolved once per call.
/// A continuation iterator always wins over a sequence number, which wins
/// over a full-backlog replay from the earliest retained record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartPosition {
    Continuation(String),
    AfterSequenceNumber(String),
    TrimHorizon,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPollRequest {
    pub stream_name: String,
    pub timeout_seconds: f64,
    pub shard_id: Option<String>,
    pub start: StartPosition,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PollResult {
    #[serde(rename = "Data")]
    pub data: Value,
    #[serde(rename = "SequenceNumber")]
    pub sequence_number: String,
    #[serde(rename = "NextShardIterator")]
    pub next_shard_iterator: String,
}

impl PollResult {
    pub fn record(data: Value, sequence_number: String, next_shard_iterator: String) -> Self {
        Self {
            data,
            sequence_number,
            next_shard_iterator,
        }
    }

    /// Timeout is a normal return: the payload fields stay empty but the
    /// iterator is still handed back so the caller keeps its place.
    pub fn timed_out(next_shard_iterator: String) -> Self {
        Self {
            data: Value::String(String::new()),
            sequence_number: String::new(),
            next_shard_iterator,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricReadingRequest {
    pub reading_time: String,
    pub reading_value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusResponse {
    #[serde(rename = "Status")]
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "OK".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

pub fn normalize_poll_request(
    payload: PollRequest,
) -> Result<NormalizedPollRequest, ValidationError> {
    let stream_name = payload.stream_name.trim().to_string();
    if stream_name.is_empty() {
        return Err(ValidationError::new("StreamName cannot be empty"));
    }

    let timeout_seconds = payload.timeout.unwrap_or(DEFAULT_POLL_TIMEOUT_SECONDS);
    if !timeout_seconds.is_finite() || timeout_seconds <= 0.0 {
        return Err(ValidationError::new(
            "Timeout must be a positive number of seconds",
        ));
    }
    if timeout_seconds > MAX_POLL_TIMEOUT_SECONDS {
        return Err(ValidationError::new(
            "Timeout cannot exceed 900 seconds",
        ));
    }

    let shard_id = non_empty(payload.shard_id);
    let start = if let Some(iterator) = non_empty(payload.next_shard_iterator) {
        StartPosition::Continuation(iterator)
    } else if let Some(sequence_number) = non_empty(payload.sequence_number) {
        StartPosition::AfterSequenceNumber(sequence_number)
    } else {
        StartPosition::TrimHorizon
    };

    Ok(NormalizedPollRequest {
        stream_name,
        timeout_seconds,
        shard_id,
        start,
    })
}

pub fn normalize_metric_request(
    payload: MetricReadingRequest,
) -> Result<MetricReadingRequest, ValidationError> {
    let reading_time = payload.reading_time.trim().to_string();
    if reading_time.is_empty() {
        return Err(ValidationError::new("reading_time cannot be empty"));
    }
    if !payload.reading_value.is_finite() {
        return Err(ValidationError::new(
            "reading_value must be a finite number",
        ));
    }

    Ok(MetricReadingRequest {
        reading_time,
        reading_value: payload.reading_value,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn request(value: serde_json::Value) -> PollRequest {
        serde_json::from_value(value).expect("request should parse")
    }

    #[test]
    fn applies_default_timeout() {
        let normalized = normalize_poll_request(request(json!({"StreamName": "temps"})))
            .expect("request should normalize");

        assert_eq!(normalized.timeout_seconds, DEFAULT_POLL_TIMEOUT_SECONDS);
        assert_eq!(normalized.start, StartPosition::TrimHorizon);
        assert_eq!(normalized.shard_id, None);
    }

    #[test]
    fn rejects_blank_stream_name() {
        let error = normalize_poll_request(request(json!({"StreamName": "  "})))
            .expect_err("blank stream name should fail");

        assert_eq!(error.message(), "StreamName cannot be empty");
    }

    #[test]
    fn rejects_non_positive_timeout() {
        for timeout in [0.0, -1.5] {
            normalize_poll_request(request(json!({
                "StreamName": "temps",
                "Timeout": timeout,
            })))
            .expect_err("non-positive timeout should fail");
        }
    }

    #[test]
    fn rejects_timeout_beyond_invocation_cap() {
        for timeout in [901.0, 1e30] {
            let error = normalize_poll_request(request(json!({
                "StreamName": "temps",
                "Timeout": timeout,
            })))
            .expect_err("oversized timeout should fail");

            assert_eq!(error.message(), "Timeout cannot exceed 900 seconds");
        }
    }

    #[test]
    fn rejects_non_numeric_timeout_at_deserialization() {
        let result = serde_json::from_value::<PollRequest>(json!({
            "StreamName": "temps",
            "Timeout": "three",
        }));

        assert!(result.is_err());
    }

    #[test]
    fn continuation_iterator_wins_over_sequence_number() {
        let normalized = normalize_poll_request(request(json!({
            "StreamName": "temps",
            "NextShardIterator": "iter-42",
            "SequenceNumber": "100",
        })))
        .expect("request should normalize");

        assert_eq!(
            normalized.start,
            StartPosition::Continuation("iter-42".to_string())
        );
    }

    #[test]
    fn blank_continuation_falls_back_to_sequence_number() {
        let normalized = normalize_poll_request(request(json!({
            "StreamName": "temps",
            "NextShardIterator": "",
            "SequenceNumber": "100",
        })))
        .expect("request should normalize");

        assert_eq!(
            normalized.start,
            StartPosition::AfterSequenceNumber("100".to_string())
        );
    }

    #[test]
    fn blank_shard_id_treated_as_absent() {
        let normalized = normalize_poll_request(request(json!({
            "StreamName": "temps",
            "ShardId": " ",
        })))
        .expect("request should normalize");

        assert_eq!(normalized.shard_id, None);
    }

    #[test]
    fn timed_out_result_serializes_empty_payload_fields() {
        let value = serde_json::to_value(PollResult::timed_out("iter-7".to_string()))
            .expect("result should serialize");

        assert_eq!(
            value,
            json!({
                "Data": "",
                "SequenceNumber": "",
                "NextShardIterator": "iter-7",
            })
        );
    }

    #[test]
    fn metric_request_rejects_blank_time() {
        let error = normalize_metric_request(MetricReadingRequest {
            reading_time: "".to_string(),
            reading_value: 21.5,
        })
        .expect_err("blank reading_time should fail");

        assert_eq!(error.message(), "reading_time cannot be empty");
    }

    #[test]
    fn metric_request_rejects_non_finite_value() {
        normalize_metric_request(MetricReadingRequest {
            reading_time: "2024-01-01T00:00:00Z".to_string(),
            reading_value: f64::NAN,
        })
        .expect_err("non-finite reading_value should fail");
    }

    #[test]
    fn status_response_uses_wire_field_name() {
        let value =
            serde_json::to_value(StatusResponse::ok()).expect("response should serialize");

        assert_eq!(value, json!({"Status": "OK"}));
    }
}
