#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedRecord {
    pub payload: Vec<u8>,
    pub sequence_number: String,
}

/// One fetch against the remote log. The next iterator is always present so
/// the caller can keep its place even when no record came back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRead {
    pub record: Option<FetchedRecord>,
    pub next_iterator: String,
}

/// Synchronous seam over the remote ordered log.
///
/// Shard resolution takes the first shard of the stream only; on a
/// multi-shard stream the poller reads a single shard and the result is
/// incomplete. This is documented contract behavior, not a bug to fix here.
pub trait ShardStream {
    fn first_shard_id(&self, stream_name: &str) -> Result<String, String>;

    fn iterator_after_sequence(
        &self,
        stream_name: &str,
        shard_id: &str,
        sequence_number: &str,
    ) -> Result<String, String>;

    fn iterator_from_trim_horizon(
        &self,
        stream_name: &str,
        shard_id: &str,
    ) -> Result<String, String>;

    fn read_one(&self, shard_iterator: &str) -> Result<RecordRead, String>;
}
