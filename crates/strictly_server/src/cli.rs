//! Command-line interface for strictly_server.

use crate::config::ServerConfig;
use crate::error::ConfigError;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, instrument};

/// Strictly Connect4 - multiplayer Connect-4 room server
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "strictly_server")]
#[command(about = "Connect-4 room server with WebSocket lobby", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file; defaults apply when absent
    #[arg(short, long, default_value = "strictly_server.toml")]
    pub config: PathBuf,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Board rows
    #[arg(long)]
    pub rows: Option<usize>,

    /// Board columns
    #[arg(long)]
    pub columns: Option<usize>,

    /// Directory of browser client assets to serve
    #[arg(long)]
    pub static_dir: Option<PathBuf>,
}

impl Cli {
    /// Loads the config file (if present) and applies command-line overrides.
    #[instrument(skip(self), fields(config_path = %self.config.display()))]
    pub fn load_config(&self) -> Result<ServerConfig, ConfigError> {
        let config = if self.config.exists() {
            ServerConfig::from_file(&self.config)?
        } else {
            info!(
                "Config file not found at {}, using defaults",
                self.config.display()
            );
            ServerConfig::default()
        };
        let config = self.apply(config);
        config.validate()?;
        Ok(config)
    }

    /// Overlays flags that were given onto `config`.
    pub fn apply(&self, mut config: ServerConfig) -> ServerConfig {
        if let Some(host) = &self.host {
            config = config.with_host(host.as_str());
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        let mut board = *config.board();
        if let Some(rows) = self.rows {
            board = board.with_rows(rows);
        }
        if let Some(columns) = self.columns {
            board = board.with_columns(columns);
        }
        config = config.with_board(board);
        if let Some(dir) = &self.static_dir {
            config = config.with_static_dir(dir.clone());
        }
        config
    }
}
