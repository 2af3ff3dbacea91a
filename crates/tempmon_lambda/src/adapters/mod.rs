pub mod clock;
pub mod delivery_sink;
pub mod invoke;
pub mod metric_sink;
pub mod stream_source;
