use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct MetricReading {
    pub time: DateTime<Utc>,
    pub value: f64,
}

pub trait MetricSink {
    fn emit_reading(&self, reading: &MetricReading) -> Result<(), String>;
}
