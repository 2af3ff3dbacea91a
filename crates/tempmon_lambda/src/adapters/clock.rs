use std::time::{Duration, Instant};

/// Time source for the poll loop, injected so deadline behavior is testable
/// without wall-clock sleeps.
pub trait PollClock {
    fn now(&self) -> Instant;

    /// Pauses the invocation between empty reads. Blocking the whole
    /// invocation is acceptable in the single-threaded handler model.
    fn pause(&self, interval: Duration);
}
