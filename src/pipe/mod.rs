//! # Pipe
//!
//! [`Pipe`] drains the stream of one DynamoDB table and hands every record to a
//! sink, one serialized [`EventEnvelope`](crate::record::EventEnvelope) at a time.
//!
//! ```rust,no_run
//! # use aws_config::BehaviorVersion;
//! use dynamo_pipe::{pipe, Client};
//!
//! # async fn wrapper() -> Result<(), dynamo_pipe::Error> {
//! # let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
//! let summary = pipe::builder()
//!     .table_name("People")
//!     .client(Client::new(&config))
//!     .command("jq", vec![".Records[0].eventName".into()])
//!     .build()
//!     .run()
//!     .await?;
//!
//! println!("{} records piped", summary.dispatched());
//! # Ok(())
//! # }
//! ```
//!
//! Records are processed strictly one after another, and the next poll waits
//! until the whole batch has been dispatched. The run ends when the shard is
//! closed or on the first error from either the provider or the sink. A record
//! whose sequence number is lower than the previous one also ends the run, after
//! every record before it has been dispatched.

mod builder;

use super::{
    client::DynamodbClient, cursor::ShardCursor, error::Error, pacing::Pacing, record::transform,
    sink::Sink,
};

pub use builder::{PipeBuilder, DEFAULT_INTERVAL};

use tracing::{debug, info};

/// Create [`PipeBuilder`].
pub fn builder<C: DynamodbClient>() -> PipeBuilder<C> {
    PipeBuilder::new()
}

/// What a finished run did.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Summary {
    polls: usize,
    dispatched: usize,
}

impl Summary {
    /// Number of get-records calls.
    pub fn polls(&self) -> usize {
        self.polls
    }

    /// Number of records delivered to the sink.
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }
}

pub struct Pipe<Client>
where
    Client: DynamodbClient,
{
    table_name: String,
    client: Client,
    sink: Box<dyn Sink>,
    pacing: Box<dyn Pacing>,
}

impl<Client> Pipe<Client>
where
    Client: DynamodbClient,
{
    pub fn table_name(&self) -> &str {
        self.table_name.as_str()
    }

    /// Read the table's stream from the trim horizon until the shard is closed.
    pub async fn run(self) -> Result<Summary, Error> {
        let Pipe {
            table_name,
            client,
            sink,
            pacing,
        } = self;

        info!("run dynamodb streams pipe on table {table_name}");

        let mut cursor = ShardCursor::acquire(client, table_name).await?;
        let mut summary = Summary::default();

        loop {
            debug!("iterator {}", cursor.iterator().unwrap_or_default());

            let records = cursor.poll().await?;
            summary.polls += 1;
            info!("num records: {}", records.len());

            for record in records {
                cursor.check_order(&record)?;
                let envelope = transform(record, cursor.stream_arn())?;
                let payload = envelope.to_pretty_json()?;
                debug!("record:\n{payload}");

                let output = sink.dispatch(&payload).await?;
                info!("command output: {}", String::from_utf8_lossy(&output));
                summary.dispatched += 1;

                pacing.pause().await;
            }

            if cursor.is_closed() {
                info!("shard {} is closed", cursor.shard_id());
                break;
            }

            pacing.pause().await;
        }

        Ok(summary)
    }
}
