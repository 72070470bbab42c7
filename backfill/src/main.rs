use backfill::{dynamo_client, load_records, Backfill, BackfillConfig, DynamoSink};
use clap::Parser;
use std::env;

const TRACE_DEBUG: &str = "TRACE_DEBUG";

/// Load `data.json` into the submissions table of one environment.
#[derive(Parser)]
struct Opts {
    /// Environment name (dev, prod, etc.)
    env: String,
    /// DynamoDB endpoint to write to instead of the regional one, e.g. http://localhost:8000
    #[arg(long)]
    endpoint_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(match env::var(TRACE_DEBUG) {
            Ok(_) => tracing::Level::DEBUG,
            Err(_) => tracing::Level::INFO
        })
        .with_target(false)
        .init();

    let opts = Opts::parse();
    let config = BackfillConfig {
        endpoint_url: opts.endpoint_url,
        ..BackfillConfig::default()
    };
    let records = load_records(&config.input_path)?;
    let client = dynamo_client(&config).await;

    Backfill::new(config, DynamoSink::new(client))
        .run(&opts.env, &records)
        .await?;
    Ok(())
}
