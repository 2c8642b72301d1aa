#![allow(dead_code)]

use async_trait::async_trait;
use aws_config::{retry::RetryConfig, BehaviorVersion, Region, SdkConfig};
use aws_credential_types::{provider::SharedCredentialsProvider, Credentials};
use aws_sdk_dynamodb::{
    types::{
        AttributeDefinition, AttributeValue, BillingMode, KeySchemaElement, KeyType,
        ScalarAttributeType, StreamSpecification, StreamViewType,
    },
    Client,
};
use aws_sdk_dynamodbstreams::types::{Record, ShardIteratorType};
use dynamo_pipe::{
    types::{GetRecordsOutput, GetShardsOutput, Shard},
    DynamodbClient, Error,
};
use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};
use ulid::Ulid;

pub const PK: &str = "Id";

pub struct TestConfig {
    table_name: String,
    config: SdkConfig,
}

impl TestConfig {
    pub fn table_name(&self) -> &str {
        self.table_name.as_str()
    }

    pub fn aws_sdk_config(&self) -> &SdkConfig {
        &self.config
    }
}

pub async fn setup(stream: Option<StreamViewType>) -> TestConfig {
    let creds = Credentials::from_keys(Ulid::new(), Ulid::new(), None);
    let creds_provider = SharedCredentialsProvider::new(creds);

    let retry = RetryConfig::standard().with_max_attempts(5);

    let config = SdkConfig::builder()
        .endpoint_url("http://localhost:8000")
        .credentials_provider(creds_provider)
        .retry_config(retry)
        .behavior_version(BehaviorVersion::latest())
        .region(Some(Region::from_static("us-east-1")))
        .build();

    let table_name = format!("People-{}", Ulid::new());
    create_table(&table_name, stream, &config).await;

    TestConfig { table_name, config }
}

pub async fn put_item(config: &TestConfig, pk: &str, age: u32) {
    Client::new(config.aws_sdk_config())
        .put_item()
        .table_name(config.table_name())
        .item(PK, AttributeValue::S(pk.into()))
        .item("Age", AttributeValue::N(age.to_string()))
        .send()
        .await
        .unwrap();
}

pub async fn teardown(config: &TestConfig) {
    Client::new(config.aws_sdk_config())
        .delete_table()
        .table_name(config.table_name())
        .send()
        .await
        .unwrap();
}

async fn create_table(table_name: &str, stream: Option<StreamViewType>, config: &SdkConfig) {
    let stream_specification = stream.map(|view| {
        StreamSpecification::builder()
            .stream_enabled(true)
            .stream_view_type(view)
            .build()
            .unwrap()
    });

    Client::new(config)
        .create_table()
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name(PK)
                .attribute_type(ScalarAttributeType::S)
                .build()
                .unwrap(),
        )
        .table_name(table_name)
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name(PK)
                .key_type(KeyType::Hash)
                .build()
                .unwrap(),
        )
        .billing_mode(BillingMode::PayPerRequest)
        .set_stream_specification(stream_specification)
        .send()
        .await
        .unwrap();
}

/// In-memory stream provider with a single shard and scripted batches.
#[derive(Clone)]
pub struct FakeClient {
    batches: Arc<Mutex<VecDeque<(Vec<Record>, Option<String>)>>>,
    polls: Arc<AtomicUsize>,
}

impl FakeClient {
    pub fn new(batches: Vec<(Vec<Record>, Option<&str>)>) -> Self {
        let batches = batches
            .into_iter()
            .map(|(records, next)| (records, next.map(|v| v.to_string())))
            .collect();
        Self {
            batches: Arc::new(Mutex::new(batches)),
            polls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn polls(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DynamodbClient for FakeClient {
    async fn get_stream_arn(&self, table_name: impl Into<String> + Send) -> Result<String, Error> {
        let table_name: String = table_name.into();
        Ok(format!(
            "arn:aws:dynamodb:us-east-1:000000000000:table/{table_name}/stream/latest"
        ))
    }

    async fn get_shards(
        &self,
        _stream_arn: impl Into<String> + Send,
        _exclusive_start_shard_id: Option<String>,
    ) -> Result<GetShardsOutput, Error> {
        let shard = aws_sdk_dynamodbstreams::types::Shard::builder()
            .shard_id("shardId-00000001")
            .build();
        Ok(GetShardsOutput {
            shards: Shard::new(shard).into_iter().collect(),
            next_shard_id: None,
        })
    }

    async fn get_shard_with_iterator(
        &self,
        _stream_arn: impl Into<String> + Send,
        shard: Shard,
        _shard_iterator_type: ShardIteratorType,
    ) -> Result<Shard, Error> {
        Ok(shard.set_iterator(Some("iterator-0".into())))
    }

    async fn get_records(&self, shard: Shard) -> Result<GetRecordsOutput, Error> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        let (records, next) = self
            .batches
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::PollFailed("no more batches".into()))?;
        Ok(GetRecordsOutput {
            shard: shard.set_iterator(next),
            records,
        })
    }
}
