//! Detached launch and URL opening
//!
//! `muser launch` re-executes the current binary with `serve` in a new
//! session so the calling terminal can go away, appending the child's
//! output to a log file. Both helpers here are best effort.

use crate::error::{MuserError, Result};
use std::ffi::OsString;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info, warn};

/// Handle to a launched background service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launched {
    /// Process ID of the detached service
    pub pid: u32,
    /// Log file receiving its output
    pub log_file: PathBuf,
}

/// Build the argument list for the detached child.
///
/// With `open`, the child hands its UI URL to the browser once it is bound;
/// the port is only known to the child.
pub fn serve_args(config_path: Option<&Path>, verbose: bool, open: bool) -> Vec<OsString> {
    let mut args = Vec::new();
    if verbose {
        args.push(OsString::from("--verbose"));
    }
    if let Some(path) = config_path {
        args.push(OsString::from("--config"));
        args.push(path.as_os_str().to_os_string());
    }
    args.push(OsString::from("serve"));
    if open {
        args.push(OsString::from("--open"));
    }
    args
}

/// Spawn `program args...` detached, with stdout and stderr appended to `log_file`.
pub fn spawn_detached(program: &Path, args: &[OsString], log_file: &Path) -> Result<Launched> {
    let log = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|e| {
            MuserError::Launch(format!("Failed to open log file {:?}: {}", log_file, e))
        })?;
    let log_err = log.try_clone()?;

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::from(log))
        .stderr(Stdio::from(log_err));

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        // New session: the child outlives the launching terminal.
        unsafe {
            cmd.pre_exec(|| {
                if libc::setsid() == -1 {
                    return Err(std::io::Error::last_os_error());
                }
                Ok(())
            });
        }
    }

    debug!("Spawning detached: {:?} {:?}", program, args);
    let child = cmd.spawn().map_err(|e| {
        MuserError::Launch(format!("Failed to spawn {:?}: {}", program, e))
    })?;

    let launched = Launched {
        pid: child.id(),
        log_file: log_file.to_path_buf(),
    };
    info!("Launched background service (pid {})", launched.pid);
    Ok(launched)
}

/// Re-run the current executable as a detached `serve`.
pub fn launch_self(
    config_path: Option<&Path>,
    verbose: bool,
    open: bool,
    log_file: &Path,
) -> Result<Launched> {
    let exe = std::env::current_exe()
        .map_err(|e| MuserError::Launch(format!("Cannot locate own executable: {}", e)))?;
    spawn_detached(&exe, &serve_args(config_path, verbose, open), log_file)
}

/// Hand `url` to the desktop's URL opener
pub fn open_in_browser(url: &str) {
    #[cfg(target_os = "macos")]
    let opener = "open";
    #[cfg(not(target_os = "macos"))]
    let opener = "xdg-open";

    let mut cmd = Command::new(opener);
    cmd.arg(url);
    match spawn_reaped(&mut cmd) {
        Ok(_) => info!("Opened {} with {}", url, opener),
        Err(e) => warn!("Could not open {} with {}: {}", url, opener, e),
    }
}

/// Spawn a short-lived helper with no stdio and wait for it on a side thread,
/// so it does not linger as a zombie of the server. Returns its pid.
fn spawn_reaped(cmd: &mut Command) -> std::io::Result<u32> {
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    let pid = child.id();

    std::thread::spawn(move || match child.wait() {
        Ok(status) => debug!("Helper {} exited with {}", pid, status),
        Err(e) => warn!("Failed to wait for helper {}: {}", pid, e),
    });
    Ok(pid)
}
