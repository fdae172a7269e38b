//! Configuration validation functions
//!
//! This module validates the bind address, the media-control binary, the
//! player filter and the launcher log file.

use crate::error::{MuserError, Result};
use std::net::IpAddr;
use std::path::Path;

/// Validate bind address (IP literal, loopback only)
pub fn validate_bind_address(address: &str) -> Result<()> {
    let ip: IpAddr = address
        .parse()
        .map_err(|_| MuserError::Config(format!("Invalid bind address: {}", address)))?;

    if !ip.is_loopback() {
        return Err(MuserError::Config(format!(
            "Bind address {} is not a loopback address",
            address
        )));
    }

    Ok(())
}

/// Validate the media-control binary name or path
pub fn validate_binary(binary: &str) -> Result<()> {
    if binary.trim().is_empty() {
        return Err(MuserError::Config(
            "Player binary cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validate an MPRIS player name passed to `--player`
pub fn validate_player_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(MuserError::Config(
            "Player name cannot be empty".to_string(),
        ));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-')
    {
        return Err(MuserError::Config(format!(
            "Player name '{}' contains invalid characters (only alphanumeric, '.', '_', and '-' allowed)",
            name
        )));
    }

    Ok(())
}

/// Validate log file path
pub fn validate_log_file(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(MuserError::Config(
            "Log file path cannot be empty".to_string(),
        ));
    }

    if path.file_name().is_none() {
        return Err(MuserError::Config(format!(
            "Log file path {:?} does not name a file",
            path
        )));
    }

    Ok(())
}
