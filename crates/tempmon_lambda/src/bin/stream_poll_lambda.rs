use std::sync::Arc;
use std::time::{Duration, Instant};

use aws_sdk_kinesis::types::ShardIteratorType;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tempmon_lambda::adapters::clock::PollClock;
use tempmon_lambda::adapters::stream_source::{FetchedRecord, RecordRead, ShardStream};
use tempmon_lambda::handlers::poll::handle_poll_event;
use tempmon_lambda::runtime::contract::PollResult;

struct KinesisShardStream {
    kinesis_client: aws_sdk_kinesis::Client,
}

impl ShardStream for KinesisShardStream {
    fn first_shard_id(&self, stream_name: &str) -> Result<String, String> {
        let client = self.kinesis_client.clone();
        let stream = stream_name.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .describe_stream()
                    .stream_name(stream)
                    .send()
                    .await
                    .map_err(|error| format!("failed to describe stream: {error}"))?;

                output
                    .stream_description()
                    .and_then(|description| description.shards().first())
                    .map(|shard| shard.shard_id().to_string())
                    .ok_or_else(|| "stream has no shards".to_string())
            })
        })
    }

    fn iterator_after_sequence(
        &self,
        stream_name: &str,
        shard_id: &str,
        sequence_number: &str,
    ) -> Result<String, String> {
        self.acquire_iterator(
            stream_name,
            shard_id,
            ShardIteratorType::AfterSequenceNumber,
            Some(sequence_number.to_string()),
        )
    }

    fn iterator_from_trim_horizon(
        &self,
        stream_name: &str,
        shard_id: &str,
    ) -> Result<String, String> {
        self.acquire_iterator(stream_name, shard_id, ShardIteratorType::TrimHorizon, None)
    }

    fn read_one(&self, shard_iterator: &str) -> Result<RecordRead, String> {
        let client = self.kinesis_client.clone();
        let iterator = shard_iterator.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .get_records()
                    .shard_iterator(iterator)
                    .limit(1)
                    .send()
                    .await
                    .map_err(|error| format!("failed to get records: {error}"))?;

                let next_iterator = output
                    .next_shard_iterator()
                    .map(str::to_string)
                    .ok_or_else(|| "shard is closed: no next iterator".to_string())?;
                let record = output.records().first().map(|record| FetchedRecord {
                    payload: record.data().as_ref().to_vec(),
                    sequence_number: record.sequence_number().to_string(),
                });

                Ok(RecordRead {
                    record,
                    next_iterator,
                })
            })
        })
    }
}

impl KinesisShardStream {
    fn acquire_iterator(
        &self,
        stream_name: &str,
        shard_id: &str,
        iterator_type: ShardIteratorType,
        starting_sequence_number: Option<String>,
    ) -> Result<String, String> {
        let client = self.kinesis_client.clone();
        let stream = stream_name.to_string();
        let shard = shard_id.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .get_shard_iterator()
                    .stream_name(stream)
                    .shard_id(shard)
                    .shard_iterator_type(iterator_type)
                    .set_starting_sequence_number(starting_sequence_number)
                    .send()
                    .await
                    .map_err(|error| format!("failed to get shard iterator: {error}"))?;

                output
                    .shard_iterator()
                    .map(str::to_string)
                    .ok_or_else(|| "service returned no shard iterator".to_string())
            })
        })
    }
}

struct RuntimeClock;

impl PollClock for RuntimeClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn pause(&self, interval: Duration) {
        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(tokio::time::sleep(interval))
        })
    }
}

async fn handle_request(
    event: LambdaEvent<Value>,
    stream: Arc<KinesisShardStream>,
) -> Result<PollResult, Error> {
    handle_poll_event(event.payload, stream.as_ref(), &RuntimeClock)
        .map_err(|error| Error::from(error.to_string()))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let stream = Arc::new(KinesisShardStream {
        kinesis_client: aws_sdk_kinesis::Client::new(&aws_config),
    });

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let stream = stream.clone();
        async move { handle_request(event, stream).await }
    }))
    .await
}
