//! Subprocess seam for the media-control utility

use crate::error::{MuserError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Runs one invocation of the media-control utility.
///
/// Returns trimmed stdout on success and `None` when the process could not
/// be started or exited unsuccessfully.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    /// Run the utility with `args` and capture its output
    fn run(&self, args: &[String]) -> Option<String>;
}

/// Runner backed by the `playerctl` executable
#[derive(Debug, Clone)]
pub struct PlayerctlRunner {
    program: PathBuf,
    player: Option<String>,
}

impl PlayerctlRunner {
    /// Locate `binary` (a name on PATH or a path) and build a runner.
    pub fn locate(binary: &str, player: Option<String>) -> Result<Self> {
        let program = find_program(binary).ok_or_else(|| {
            MuserError::PlayerUnavailable(format!("{} not found. Please install it.", binary))
        })?;

        debug!("Using media-control utility at {:?}", program);
        Ok(Self { program, player })
    }

    /// Path of the resolved executable
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.program);
        if let Some(player) = &self.player {
            cmd.arg(format!("--player={}", player));
        }
        cmd.args(args).stdin(Stdio::null());
        cmd
    }
}

impl CommandRunner for PlayerctlRunner {
    fn run(&self, args: &[String]) -> Option<String> {
        debug!("Executing command: {:?} {:?}", self.program, args);

        let output = match self.command(args).output() {
            Ok(output) => output,
            Err(e) => {
                debug!("Failed to execute {:?} {}: {}", self.program, args.join(" "), e);
                return None;
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!(
                "Command failed: {} ({}): {}",
                args.join(" "),
                output.status,
                stderr.trim()
            );
            return None;
        }

        Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Resolve a program name on PATH, or accept an existing path as-is.
fn find_program(binary: &str) -> Option<PathBuf> {
    if let Ok(path) = which::which(binary) {
        return Some(path);
    }

    let path = PathBuf::from(binary);
    if path.is_file() {
        return Some(path);
    }

    None
}
