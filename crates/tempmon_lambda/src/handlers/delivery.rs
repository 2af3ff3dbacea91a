use serde_json::{json, Value};

use crate::adapters::delivery_sink::DeliverySink;
use crate::handlers::HandlerError;
use crate::runtime::contract::StatusResponse;

/// Forwards the whole event as one newline-terminated record to the
/// delivery stream.
pub fn handle_delivery_event(
    event: Value,
    sink: &dyn DeliverySink,
) -> Result<StatusResponse, HandlerError> {
    let mut record = serde_json::to_vec(&event)
        .map_err(|error| HandlerError::Input(format!("Unserializable delivery event: {error}")))?;
    record.push(b'\n');

    log_delivery_info("record_received", json!({"record_bytes": record.len()}));

    sink.append_record(&record).map_err(HandlerError::Remote)?;

    Ok(StatusResponse::ok())
}

fn log_delivery_info(event: &str, details: Value) {
    eprintln!(
        "{}",
        json!({
            "component": "delivery_forwarder",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct CapturingSink {
        records: Mutex<Vec<Vec<u8>>>,
    }

    impl CapturingSink {
        fn new() -> Self {
            Self {
                records: Mutex::new(Vec::new()),
            }
        }

        fn records(&self) -> Vec<Vec<u8>> {
            self.records.lock().expect("poisoned mutex").clone()
        }
    }

    impl DeliverySink for CapturingSink {
        fn append_record(&self, record: &[u8]) -> Result<(), String> {
            self.records
                .lock()
                .expect("poisoned mutex")
                .push(record.to_vec());
            Ok(())
        }
    }

    #[test]
    fn appends_one_newline_terminated_record() {
        let sink = CapturingSink::new();
        let event = json!({"reading_time": "2024-01-01T00:00:00Z", "reading_value": 21.5});

        let response =
            handle_delivery_event(event.clone(), &sink).expect("event should forward");

        assert_eq!(response, StatusResponse::ok());
        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].last(), Some(&b'\n'));

        let round_tripped: Value =
            serde_json::from_slice(&records[0]).expect("record should parse back");
        assert_eq!(round_tripped, event);
    }

    #[test]
    fn forwards_arbitrary_event_shapes() {
        let sink = CapturingSink::new();

        handle_delivery_event(json!([1, 2, 3]), &sink).expect("array event should forward");

        assert_eq!(sink.records().len(), 1);
    }

    #[test]
    fn sink_failure_surfaces_as_remote_error() {
        struct FailingSink;

        impl DeliverySink for FailingSink {
            fn append_record(&self, _record: &[u8]) -> Result<(), String> {
                Err("delivery stream not found".to_string())
            }
        }

        let error = handle_delivery_event(json!({"temp": 21.5}), &FailingSink)
            .expect_err("sink failure should fail");

        assert_eq!(
            error,
            HandlerError::Remote("delivery stream not found".to_string())
        );
    }
}
