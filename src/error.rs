use thiserror::Error as ThisError;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("dynamodb stream is not available on table: {0}")]
    StreamUnavailable(String),
    #[error("failed to describe table or stream: {0}")]
    DescribeFailed(BoxError),
    #[error("no shard found in stream: {0}")]
    NoShard(String),
    #[error("failed to get shard iterator: {0}")]
    IteratorFailed(BoxError),
    #[error("failed to get records: {0}")]
    PollFailed(BoxError),
    #[error("sequence number went backwards: `{current}` after `{previous}`")]
    OutOfOrder { previous: String, current: String },
    #[error("malformed stream record: {0}")]
    MalformedRecord(String),
    #[error("failed to serialize event: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to dispatch record to `{command}`: {reason}")]
    DispatchFailed { command: String, reason: String },
}
