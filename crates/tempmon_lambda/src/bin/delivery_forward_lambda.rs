use std::sync::Arc;

use aws_sdk_firehose::primitives::Blob;
use aws_sdk_firehose::types::Record;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tempmon_lambda::adapters::delivery_sink::DeliverySink;
use tempmon_lambda::handlers::delivery::handle_delivery_event;
use tempmon_lambda::runtime::contract::{StatusResponse, DELIVERY_STREAM_NAME};

struct FirehoseDeliverySink {
    firehose_client: aws_sdk_firehose::Client,
}

impl DeliverySink for FirehoseDeliverySink {
    fn append_record(&self, record: &[u8]) -> Result<(), String> {
        let client = self.firehose_client.clone();
        let body = record.to_vec();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let record = Record::builder()
                    .data(Blob::new(body))
                    .build()
                    .map_err(|error| format!("failed to build delivery record: {error}"))?;

                client
                    .put_record()
                    .delivery_stream_name(DELIVERY_STREAM_NAME)
                    .record(record)
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to put delivery record: {error}"))
            })
        })
    }
}

async fn handle_request(
    event: LambdaEvent<Value>,
    sink: Arc<FirehoseDeliverySink>,
) -> Result<StatusResponse, Error> {
    handle_delivery_event(event.payload, sink.as_ref())
        .map_err(|error| Error::from(error.to_string()))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let sink = Arc::new(FirehoseDeliverySink {
        firehose_client: aws_sdk_firehose::Client::new(&aws_config),
    });

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let sink = sink.clone();
        async move { handle_request(event, sink).await }
    }))
    .await
}
