use std::time::Duration;

use serde_json::{json, Value};

use crate::adapters::clock::PollClock;
use crate::adapters::stream_source::{RecordRead, ShardStream};
use crate::handlers::HandlerError;
use crate::runtime::contract::{
    normalize_poll_request, NormalizedPollRequest, PollRequest, PollResult, StartPosition,
    POLL_PAUSE_MILLIS,
};
use crate::runtime::decode::decode_record_payload;

/// Bounded stream poller: returns at most one new record within the
/// caller's time budget, always handing back an iterator the caller can
/// resume from.
pub fn handle_poll_event(
    event: Value,
    stream: &dyn ShardStream,
    clock: &dyn PollClock,
) -> Result<PollResult, HandlerError> {
    let request: PollRequest = serde_json::from_value(event)
        .map_err(|error| HandlerError::Input(format!("Malformed poll request: {error}")))?;
    let normalized = normalize_poll_request(request)
        .map_err(|error| HandlerError::Input(error.message().to_string()))?;

    log_poll_info(
        "poll_started",
        json!({
            "stream_name": normalized.stream_name.clone(),
            "timeout_seconds": normalized.timeout_seconds,
            "continuation": matches!(normalized.start, StartPosition::Continuation(_)),
        }),
    );

    match poll_once(&normalized, stream, clock) {
        Ok(result) => {
            log_poll_info(
                "poll_finished",
                json!({
                    "stream_name": normalized.stream_name.clone(),
                    "found_record": !result.sequence_number.is_empty(),
                    "sequence_number": result.sequence_number.clone(),
                }),
            );
            Ok(result)
        }
        Err(error) => {
            log_poll_error(
                "poll_failed",
                json!({
                    "stream_name": normalized.stream_name.clone(),
                    "error": error.to_string(),
                }),
            );
            Err(error)
        }
    }
}

fn poll_once(
    request: &NormalizedPollRequest,
    stream: &dyn ShardStream,
    clock: &dyn PollClock,
) -> Result<PollResult, HandlerError> {
    let iterator = resolve_iterator(request, stream)?;
    run_poll_loop(iterator, request, stream, clock)
}

fn resolve_iterator(
    request: &NormalizedPollRequest,
    stream: &dyn ShardStream,
) -> Result<String, HandlerError> {
    match &request.start {
        StartPosition::Continuation(iterator) => Ok(iterator.clone()),
        StartPosition::AfterSequenceNumber(sequence_number) => {
            let shard_id = resolve_shard(request, stream)?;
            stream
                .iterator_after_sequence(&request.stream_name, &shard_id, sequence_number)
                .map_err(HandlerError::Remote)
        }
        StartPosition::TrimHorizon => {
            let shard_id = resolve_shard(request, stream)?;
            stream
                .iterator_from_trim_horizon(&request.stream_name, &shard_id)
                .map_err(HandlerError::Remote)
        }
    }
}

fn resolve_shard(
    request: &NormalizedPollRequest,
    stream: &dyn ShardStream,
) -> Result<String, HandlerError> {
    match &request.shard_id {
        Some(shard_id) => Ok(shard_id.clone()),
        None => stream
            .first_shard_id(&request.stream_name)
            .map_err(HandlerError::Remote),
    }
}

/// The deadline is checked only between fetches, so the effective wall-clock
/// bound is the timeout plus one remote round-trip. The held iterator is
/// advanced on every fetch, including empty ones, so a timeout still returns
/// a usable continuation point.
fn run_poll_loop(
    mut iterator: String,
    request: &NormalizedPollRequest,
    stream: &dyn ShardStream,
    clock: &dyn PollClock,
) -> Result<PollResult, HandlerError> {
    let deadline = clock.now() + Duration::from_secs_f64(request.timeout_seconds);

    loop {
        let RecordRead {
            record,
            next_iterator,
        } = stream.read_one(&iterator).map_err(HandlerError::Remote)?;
        iterator = next_iterator;

        if let Some(record) = record {
            let data = decode_record_payload(&record.payload)
                .map_err(|error| HandlerError::Decode(error.message().to_string()))?;
            return Ok(PollResult::record(data, record.sequence_number, iterator));
        }

        if clock.now() > deadline {
            return Ok(PollResult::timed_out(iterator));
        }

        clock.pause(Duration::from_millis(POLL_PAUSE_MILLIS));
    }
}

fn log_poll_info(event: &str, details: Value) {
    eprintln!(
        "{}",
        json!({
            "component": "stream_poller",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}

fn log_poll_error(event: &str, details: Value) {
    eprintln!(
        "{}",
        json!({
            "component": "stream_poller",
            "level": "error",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}
