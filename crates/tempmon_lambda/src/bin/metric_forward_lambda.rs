use std::sync::Arc;

use aws_sdk_cloudwatch::primitives::DateTime;
use aws_sdk_cloudwatch::types::MetricDatum;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tempmon_lambda::adapters::metric_sink::{MetricReading, MetricSink};
use tempmon_lambda::handlers::metric::handle_metric_event;
use tempmon_lambda::runtime::contract::{StatusResponse, METRIC_NAME, METRIC_NAMESPACE};

struct CloudWatchMetricSink {
    cloudwatch_client: aws_sdk_cloudwatch::Client,
}

impl MetricSink for CloudWatchMetricSink {
    fn emit_reading(&self, reading: &MetricReading) -> Result<(), String> {
        let client = self.cloudwatch_client.clone();
        let datum = MetricDatum::builder()
            .metric_name(METRIC_NAME)
            .timestamp(DateTime::from_millis(reading.time.timestamp_millis()))
            .value(reading.value)
            .build();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .put_metric_data()
                    .namespace(METRIC_NAMESPACE)
                    .metric_data(datum)
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to put metric data: {error}"))
            })
        })
    }
}

async fn handle_request(
    event: LambdaEvent<Value>,
    sink: Arc<CloudWatchMetricSink>,
) -> Result<StatusResponse, Error> {
    handle_metric_event(event.payload, sink.as_ref())
        .map_err(|error| Error::from(error.to_string()))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let sink = Arc::new(CloudWatchMetricSink {
        cloudwatch_client: aws_sdk_cloudwatch::Client::new(&aws_config),
    });

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let sink = sink.clone();
        async move { handle_request(event, sink).await }
    }))
    .await
}
