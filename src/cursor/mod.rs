//! Acquisition and advancement of the read position on a single shard.
//!
//! The cursor resolves the table's latest stream, picks one shard with a
//! selection policy and starts reading it from the trim horizon. Every
//! [`ShardCursor::poll`] replaces the shard iterator with the one the provider
//! hands back, until the provider stops issuing iterators.

mod sequence;

use super::{
    client::DynamodbClient,
    error::Error,
    types::{GetRecordsOutput, GetShardsOutput, Shard},
};

pub use sequence::SequenceGuard;

use aws_sdk_dynamodbstreams::types::{Record, ShardIteratorType};
use tracing::{debug, info};

/// Pick the shard to consume: the last one in listing order.
///
/// Parent and child relations between shards are not followed, so records
/// written to a sibling or a child shard created after startup are missed.
pub fn select_shard(shards: Vec<Shard>) -> Option<Shard> {
    shards.into_iter().last()
}

#[derive(Debug)]
pub struct ShardCursor<Client>
where
    Client: DynamodbClient,
{
    client: Client,
    stream_arn: String,
    shard: Shard,
    guard: SequenceGuard,
}

impl<Client> ShardCursor<Client>
where
    Client: DynamodbClient,
{
    /// Acquire a trim-horizon cursor on the shard chosen by [`select_shard`].
    pub async fn acquire(client: Client, table_name: impl Into<String>) -> Result<Self, Error> {
        Self::acquire_with(client, table_name, select_shard).await
    }

    /// Acquire a trim-horizon cursor on the shard chosen by `select`.
    pub async fn acquire_with<F>(
        client: Client,
        table_name: impl Into<String>,
        select: F,
    ) -> Result<Self, Error>
    where
        F: FnOnce(Vec<Shard>) -> Option<Shard>,
    {
        let table_name: String = table_name.into();
        let stream_arn = client.get_stream_arn(&table_name).await?;

        let shards = get_all_shards(&client, &stream_arn).await?;
        debug!("{} shards found in {stream_arn}", shards.len());

        let shard = select(shards).ok_or_else(|| Error::NoShard(stream_arn.clone()))?;
        let shard = client
            .get_shard_with_iterator(&stream_arn, shard, ShardIteratorType::TrimHorizon)
            .await?;

        if shard.is_closed() {
            return Err(Error::IteratorFailed(
                format!("no shard iterator issued for shard {}", shard.id()).into(),
            ));
        }

        info!("reading shard {} of table {table_name}", shard.id());

        Ok(Self {
            client,
            stream_arn,
            shard,
            guard: SequenceGuard::new(),
        })
    }

    pub fn stream_arn(&self) -> &str {
        self.stream_arn.as_str()
    }

    pub fn shard_id(&self) -> &str {
        self.shard.id()
    }

    pub fn iterator(&self) -> Option<&str> {
        self.shard.iterator()
    }

    /// Return true once the shard is closed and fully drained.
    pub fn is_closed(&self) -> bool {
        self.shard.is_closed()
    }

    /// Fetch the next batch and advance to the successor iterator.
    ///
    /// Polling a closed cursor returns an empty batch without calling the provider.
    pub async fn poll(&mut self) -> Result<Vec<Record>, Error> {
        if self.is_closed() {
            return Ok(vec![]);
        }

        let GetRecordsOutput { shard, records } =
            self.client.get_records(self.shard.clone()).await?;

        self.shard = shard;
        Ok(records)
    }

    /// Check that a record comes after every record checked before it.
    ///
    /// Records without a sequence number pass and leave the last seen one unchanged.
    pub fn check_order(&mut self, record: &Record) -> Result<(), Error> {
        self.guard
            .check(record.dynamodb().and_then(|r| r.sequence_number()))
    }
}

/// Get all shards of the stream, following the listing pages.
async fn get_all_shards<Client>(client: &Client, stream_arn: &str) -> Result<Vec<Shard>, Error>
where
    Client: DynamodbClient,
{
    let GetShardsOutput {
        mut shards,
        mut next_shard_id,
    } = client.get_shards(stream_arn, None).await?;

    while next_shard_id.is_some() {
        let mut output = client.get_shards(stream_arn, next_shard_id.take()).await?;
        shards.append(&mut output.shards);
        next_shard_id = output.next_shard_id;
    }

    Ok(shards)
}
