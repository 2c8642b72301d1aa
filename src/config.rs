use super::{
    client::Client,
    pipe::{self, Pipe, DEFAULT_INTERVAL},
};

use aws_config::{BehaviorVersion, SdkConfig};
use tokio::time::Duration;

/// Plain values a run needs: what to read, where to read it from and what to
/// pipe it into.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Config {
    table_name: String,
    endpoint_url: Option<String>,
    command: String,
    args: Vec<String>,
    interval: Option<Duration>,
}

impl Config {
    pub fn new(table_name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            endpoint_url: None,
            command: command.into(),
            args: vec![],
            interval: Some(DEFAULT_INTERVAL),
        }
    }

    /// Use an alternate service endpoint, e.g. dynamodb-local.
    pub fn endpoint_url(self, endpoint_url: Option<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.filter(|url| !url.is_empty()),
            ..self
        }
    }

    pub fn args(self, args: Vec<String>) -> Self {
        Self { args, ..self }
    }

    pub fn interval(self, interval: Option<Duration>) -> Self {
        Self { interval, ..self }
    }

    pub fn table_name(&self) -> &str {
        self.table_name.as_str()
    }

    pub fn command(&self) -> &str {
        self.command.as_str()
    }

    pub fn command_args(&self) -> &[String] {
        &self.args
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint_url.as_deref()
    }

    pub fn pause_interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Load the shared AWS configuration from the environment and apply the
    /// endpoint override.
    pub async fn sdk_config(&self) -> SdkConfig {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;

        match self.endpoint_url.as_deref() {
            Some(url) => config.into_builder().endpoint_url(url).build(),
            None => config,
        }
    }

    /// Build the pipe talking to AWS.
    pub async fn pipe(&self) -> Pipe<Client> {
        let client = Client::new(&self.sdk_config().await);

        pipe::builder()
            .table_name(&self.table_name)
            .client(client)
            .command(&self.command, self.args.clone())
            .interval(self.interval)
            .build()
    }
}
