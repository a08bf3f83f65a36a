//! Server configuration loaded from TOML.
//!
//! ```toml
//! host = "0.0.0.0"
//! port = 3000
//! static_dir = "public"
//! channel_capacity = 256
//!
//! [board]
//! rows = 6
//! columns = 7
//! ```
//!
//! Every key is optional.

use crate::error::ConfigError;
use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strictly_connect4::{BoardSize, MAX_DIMENSION, MIN_DIMENSION};
use tracing::{debug, info, instrument};

/// Board dimensions as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct BoardConfig {
    /// Number of rows.
    #[serde(default = "default_rows")]
    rows: usize,
    /// Number of columns.
    #[serde(default = "default_columns")]
    columns: usize,
}

fn default_rows() -> usize {
    *BoardSize::STANDARD.rows()
}

fn default_columns() -> usize {
    *BoardSize::STANDARD.columns()
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            columns: default_columns(),
        }
    }
}

/// Top-level server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    #[setters(into)]
    host: String,

    /// Bind port.
    #[serde(default = "default_port")]
    port: u16,

    /// Board dimensions for every room.
    #[serde(default)]
    board: BoardConfig,

    /// Directory of browser client assets served at `/`.
    #[serde(default)]
    #[setters(strip_option, into)]
    static_dir: Option<PathBuf>,

    /// Bound on queued lobby commands.
    #[serde(default = "default_channel_capacity")]
    channel_capacity: usize,
}

#[instrument]
fn default_host() -> String {
    "127.0.0.1".to_string()
}

#[instrument]
fn default_port() -> u16 {
    3000
}

#[instrument]
fn default_channel_capacity() -> usize {
    256
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            board: BoardConfig::default(),
            static_dir: None,
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(host = %config.host, port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Board dimensions as a validated [`BoardSize`].
    pub fn board_size(&self) -> Result<BoardSize, ConfigError> {
        BoardSize::new(self.board.rows, self.board.columns).ok_or_else(|| {
            ConfigError::new(format!(
                "Board must be between {MIN_DIMENSION} and {MAX_DIMENSION} in each dimension, got {}x{}",
                self.board.rows, self.board.columns
            ))
        })
    }

    /// Checks values that deserialize fine but cannot run.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.board_size()?;
        if self.channel_capacity == 0 {
            return Err(ConfigError::new("channel_capacity must be at least 1"));
        }
        if self.host.trim().is_empty() {
            return Err(ConfigError::new("host must not be empty"));
        }
        Ok(())
    }
}
