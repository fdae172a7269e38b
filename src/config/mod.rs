//! Configuration management
//!
//! This module handles parsing and validation of the optional TOML
//! configuration file. Every section and field has a default, so running
//! without a config file behaves like an empty one.

mod validation;

pub use validation::{
    validate_bind_address, validate_binary, validate_log_file, validate_player_name,
};

use crate::error::{MuserError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Media-control utility settings
    #[serde(default)]
    pub player: PlayerConfig,

    /// UI document settings
    #[serde(default)]
    pub ui: UiConfig,

    /// Detached launch settings
    #[serde(default)]
    pub launcher: LauncherConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address for HTTP server (loopback only)
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port for HTTP server, 0 picks a free port
    #[serde(default)]
    pub port: u16,
}

/// Media-control utility configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Program name looked up on PATH, or an explicit path
    #[serde(default = "default_binary")]
    pub binary: String,

    /// Restrict control to a single MPRIS player (e.g. "spotify")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
}

/// UI configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Replace the built-in page with this HTML file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_path: Option<PathBuf>,

    /// Hand the served URL to the desktop URL opener on start
    #[serde(default)]
    pub open_browser: bool,
}

/// Detached launch configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LauncherConfig {
    /// File receiving the detached service's stdout and stderr
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            MuserError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        Self::parse(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn parse(toml: &str) -> Result<Self> {
        toml::from_str(toml)
            .map_err(|e| MuserError::Config(format!("Failed to parse TOML config: {}", e)))
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        validate_bind_address(&self.server.bind_address)?;
        validate_binary(&self.player.binary)?;
        if let Some(player) = &self.player.player {
            validate_player_name(player)?;
        }
        validate_log_file(&self.launcher.log_file)?;
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: 0,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            player: None,
        }
    }
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
        }
    }
}

// Default value functions for serde
fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_binary() -> String {
    "playerctl".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from("muser.log")
}
