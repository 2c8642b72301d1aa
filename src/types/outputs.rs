use super::Shard;

use aws_sdk_dynamodbstreams::types::Record;

/// One page of a stream's shard listing.
#[derive(Debug, Clone)]
pub struct GetShardsOutput {
    pub shards: Vec<Shard>,
    pub next_shard_id: Option<String>,
}

/// One batch of records. The shard carries the successor iterator.
#[derive(Debug, Clone)]
pub struct GetRecordsOutput {
    pub shard: Shard,
    pub records: Vec<Record>,
}
