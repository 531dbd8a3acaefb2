use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use carprice::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carprice=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            artifact,
            config,
            port,
            host,
        } => {
            carprice::cli::serve(artifact, config, port, host).await?;
        }
        Commands::Info { artifact, config } => {
            carprice::cli::info(artifact, config).await?;
        }
        Commands::Predict {
            artifact,
            config,
            input,
        } => {
            carprice::cli::predict(artifact, config, input).await?;
        }
    }

    Ok(())
}
