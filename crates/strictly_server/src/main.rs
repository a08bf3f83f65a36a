//! Strictly Connect4 server binary.

use anyhow::Result;
use clap::Parser;
use strictly_server::{Cli, GameServer};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    let config = cli.load_config()?;
    info!(
        host = %config.host(),
        port = config.port(),
        rows = config.board().rows(),
        columns = config.board().columns(),
        "Starting Strictly Connect4 server"
    );

    GameServer::new(config)?.run().await
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,strictly_server=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
