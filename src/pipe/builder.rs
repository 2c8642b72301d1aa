use super::{
    super::{pacing::Pacing, sink::CommandSink, sink::Sink},
    DynamodbClient, Pipe,
};

use tokio::time::Duration;

/// Pause applied after each record and each non-final poll unless set otherwise.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// A builder for [`Pipe`].
pub struct PipeBuilder<Client>
where
    Client: DynamodbClient,
{
    table_name: Option<String>,
    client: Option<Client>,
    sink: Option<Box<dyn Sink>>,
    pacing: Box<dyn Pacing>,
}

impl<Client> PipeBuilder<Client>
where
    Client: DynamodbClient,
{
    /// Create a new `PipeBuilder`.
    pub fn new() -> Self {
        Self {
            table_name: None,
            client: None,
            sink: None,
            pacing: Box::new(Some(DEFAULT_INTERVAL)),
        }
    }

    /// Set table name whose stream is piped.
    ///
    /// **Setting any table name is required** before the build method is called.
    pub fn table_name(self, table_name: impl Into<String>) -> Self {
        Self {
            table_name: Some(table_name.into()),
            ..self
        }
    }

    /// Set client to call AWS APIs.
    ///
    /// **Setting any client is required** before the build method is called.
    pub fn client(self, client: Client) -> Self {
        Self {
            client: Some(client),
            ..self
        }
    }

    /// Pipe every record to a new process of `program` with `args`.
    pub fn command(self, program: impl Into<String>, args: Vec<String>) -> Self {
        self.sink(CommandSink::new(program, args))
    }

    /// Set the receiver of serialized records.
    ///
    /// **Setting a sink (or a command) is required** before the build method is called.
    pub fn sink(self, sink: impl Sink + 'static) -> Self {
        Self {
            sink: Some(Box::new(sink)),
            ..self
        }
    }

    /// Set a fixed interval between polls and between records. When None is provided
    /// there are no pauses at all.
    ///
    /// Setting any interval is optional. If you omit calling this method,
    /// `5 seconds` is used as default value.
    pub fn interval(self, interval: Option<Duration>) -> Self {
        self.pacing(interval)
    }

    /// Replace the fixed interval with a custom pacing policy.
    pub fn pacing(self, pacing: impl Pacing + 'static) -> Self {
        Self {
            pacing: Box::new(pacing),
            ..self
        }
    }

    /// Consumes the builder and constructs a [`Pipe`].
    ///
    /// This method will panic if no table name, no client or no sink is set.
    pub fn build(self) -> Pipe<Client> {
        Pipe {
            table_name: self.table_name.expect("`table_name` is required"),
            client: self.client.expect("`client` is required"),
            sink: self.sink.expect("`sink` or `command` is required"),
            pacing: self.pacing,
        }
    }
}

impl<Client> Default for PipeBuilder<Client>
where
    Client: DynamodbClient,
{
    fn default() -> Self {
        Self::new()
    }
}
