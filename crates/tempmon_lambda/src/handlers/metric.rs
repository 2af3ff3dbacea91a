use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::adapters::metric_sink::{MetricReading, MetricSink};
use crate::handlers::HandlerError;
use crate::runtime::contract::{normalize_metric_request, MetricReadingRequest, StatusResponse};

/// Forwards one temperature reading to the metrics service.
pub fn handle_metric_event(
    event: Value,
    sink: &dyn MetricSink,
) -> Result<StatusResponse, HandlerError> {
    let request: MetricReadingRequest = serde_json::from_value(event)
        .map_err(|error| HandlerError::Input(format!("Malformed metric request: {error}")))?;
    let normalized = normalize_metric_request(request)
        .map_err(|error| HandlerError::Input(error.message().to_string()))?;

    let time = DateTime::parse_from_rfc3339(&normalized.reading_time)
        .map_err(|error| {
            HandlerError::Input(format!(
                "reading_time must be an RFC 3339 timestamp: {error}"
            ))
        })?
        .with_timezone(&Utc);

    log_metric_info(
        "reading_received",
        json!({
            "reading_time": normalized.reading_time.clone(),
            "reading_value": normalized.reading_value,
        }),
    );

    let reading = MetricReading {
        time,
        value: normalized.reading_value,
    };
    sink.emit_reading(&reading).map_err(HandlerError::Remote)?;

    Ok(StatusResponse::ok())
}

fn log_metric_info(event: &str, details: Value) {
    eprintln!(
        "{}",
        json!({
            "component": "metric_forwarder",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}
