//! muser: now-playing companion for the desktop
//!
//! This library exposes the currently playing media and basic transport
//! controls through a small loopback HTTP API, backed by the `playerctl`
//! command-line utility. A bundled web page renders the API.
//!
//! # Architecture
//!
//! Nothing is cached between requests: every HTTP call runs one or more
//! fresh `playerctl` invocations and translates their text output into
//! JSON. Failures of individual invocations become default values.
//!
//! # Modules
//!
//! - `config`: Configuration parsing and validation
//! - `player`: `playerctl` adapter and playback value types
//! - `control`: HTTP API (status, transport, artwork files)
//! - `launcher`: Detached launch and URL opening
//! - `error`: Error types and handling

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod control;
pub mod error;
pub mod launcher;
pub mod player;

// Re-export commonly used types
pub use error::{MuserError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
