use clap::Parser;
use dynamo_pipe::Config;
use std::{io, process::ExitCode};
use tokio::time::Duration;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Pipe DynamoDB Streams records to a command, one JSON event per invocation.
#[derive(Parser, Debug)]
#[command(name = "dynamo-pipe", version, about, long_about = None)]
struct Cli {
    /// DynamoDB table name.
    #[arg(long, env = "DYNAMODB_TABLE")]
    table: String,

    /// DynamoDB endpoint (optional), e.g. http://localhost:8000
    #[arg(long, env = "DYNAMODB_ENDPOINT_URL")]
    endpoint: Option<String>,

    /// Command executed once per record. ex --command=wc
    #[arg(long)]
    command: String,

    /// Comma separated command args (optional). ex --args=-l
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    args: Vec<String>,

    /// Seconds to wait after each record and between polls. 0 disables waiting.
    #[arg(long, default_value_t = 5)]
    interval: u64,

    /// Log debug messages, including every record sent to the command.
    #[arg(short, long)]
    verbose: bool,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Config {
        let interval = Some(Duration::from_secs(cli.interval)).filter(|d| !d.is_zero());

        Config::new(cli.table, cli.command)
            .endpoint_url(cli.endpoint)
            .args(cli.args)
            .interval(interval)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("setting default subscriber failed: {err}");
        return ExitCode::FAILURE;
    }

    let config = Config::from(cli);

    match config.pipe().await.run().await {
        Ok(summary) => {
            info!(
                "finished after {} polls, {} records piped",
                summary.polls(),
                summary.dispatched()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
