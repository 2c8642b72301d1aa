//! Drain [Amazon DynamoDB Streams](https://docs.aws.amazon.com/amazondynamodb/latest/developerguide/streamsmain.html)
//! and pipe every change record, as JSON, to the standard input of an external command.
//!
//! Each record is wrapped into the `{"Records": [...]}` document Lambda hands to
//! DynamoDB Streams triggers, so tools written for that shape can consume the
//! output unmodified. The command is started once per record.
//!
//! ## Getting Started
//!
//! Assuming that the dynamodb-local instance is running on localhost:8000 and the
//! "People" table has a stream enabled, the following counts the bytes of every
//! event written to the table's stream so far.
//!
//! ```rust,no_run
//! use dynamo_pipe::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), dynamo_pipe::Error> {
//!     let config = Config::new("People", "wc")
//!         .endpoint_url(Some("http://localhost:8000".into()))
//!         .args(vec!["-c".into()]);
//!
//!     let summary = config.pipe().await.run().await?;
//!     println!("{} records piped", summary.dispatched());
//!     Ok(())
//! }
//! ```
//!
//! ## Limitations
//!
//! Only one shard is read: the last one listed at startup, from its trim horizon.
//! Nothing is checkpointed, so every run starts over from the oldest retained record.

/// Client for calling AWS APIs.
pub mod client;

/// Runtime configuration.
pub mod config;

/// Read position on a single shard.
pub mod cursor;

/// Common errors.
pub mod error;

/// Delay between polls and records.
pub mod pacing;

/// The consumption loop.
pub mod pipe;

/// JSON representation of stream records.
pub mod record;

/// Delivery of serialized records.
pub mod sink;

/// Data structures used by operations.
pub mod types;

pub use client::{Client, DynamodbClient};
pub use config::Config;
pub use cursor::{select_shard, ShardCursor};
pub use error::Error;
pub use pacing::Pacing;
pub use pipe::{Pipe, Summary};
pub use record::{transform, EventEnvelope};
pub use sink::{CommandSink, Sink};
