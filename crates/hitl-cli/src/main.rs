use anyhow::Result;
use clap::Parser;
use hitl_cli::cli::{build_coordinator, Args, Command};
use hitl_cli::protocol;
use tokio::io::{stdin, stdout, BufReader};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries protocol output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = args.routing_config()?;
    info!(
        threshold = config.confidence_threshold,
        min_votes = config.min_votes,
        strategy = %config.strategy,
        "Starting HITL router"
    );

    let coordinator = build_coordinator(config)?;

    match args.command {
        Command::Serve => {
            let handled = protocol::serve(&coordinator, BufReader::new(stdin()), stdout()).await?;
            info!(handled, "Input closed, shutting down");
        }
        Command::Classify { text } => {
            let outcome = coordinator.classify(&text).await?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }

    Ok(())
}
