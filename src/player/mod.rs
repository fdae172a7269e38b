//! Media-control adapter
//!
//! This module wraps the `playerctl` command-line utility: it issues
//! transport commands and turns its text output into typed values.

mod backend;
mod runner;
mod types;

pub use backend::PlayerBackend;
pub use runner::{CommandRunner, PlayerctlRunner};
pub use types::{
    parse_length_micros, parse_position, relative_seek_arg, LoopStatus, PlaybackStatus,
    ShuffleStatus, TrackMetadata, METADATA_FIELDS, METADATA_FORMAT,
};
