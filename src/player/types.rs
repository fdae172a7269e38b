//! Playback value types and the text parsing that produces them
//!
//! Every parser here is total: unparseable input maps to a documented
//! default instead of an error.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of `|`-separated fields in a metadata line.
pub const METADATA_FIELDS: usize = 5;

/// Template passed to `playerctl metadata --format`.
pub const METADATA_FORMAT: &str =
    "{{ title }}|{{ artist }}|{{ album }}|{{ mpris:artUrl }}|{{ mpris:length }}";

const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Current playback state of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackStatus {
    /// Track is playing
    Playing,
    /// Track is paused
    Paused,
    /// Playback is stopped
    Stopped,
    /// No player, or a state playerctl did not name
    Unknown,
}

impl From<&str> for PlaybackStatus {
    fn from(status: &str) -> Self {
        match status.trim() {
            "Playing" => Self::Playing,
            "Paused" => Self::Paused,
            "Stopped" => Self::Stopped,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Playing => "Playing",
            Self::Paused => "Paused",
            Self::Stopped => "Stopped",
            Self::Unknown => "Unknown",
        };
        write!(f, "{s}")
    }
}

/// Loop mode in playerctl's vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopStatus {
    /// No looping
    None,
    /// Loop current track
    Track,
    /// Loop entire playlist
    Playlist,
    /// Loop mode not reported by the player
    Unknown,
}

impl LoopStatus {
    /// Mode to switch to when toggling away from `current`.
    ///
    /// Rotates None -> Playlist -> Track -> None. Anything that is not
    /// exactly `None` or `Playlist`, including a failed query, goes to None.
    pub fn next_after(current: Option<&str>) -> Self {
        match current {
            Some("None") => Self::Playlist,
            Some("Playlist") => Self::Track,
            _ => Self::None,
        }
    }

    /// Argument accepted by `playerctl loop <mode>`
    pub fn as_arg(&self) -> &'static str {
        match self {
            Self::None | Self::Unknown => "None",
            Self::Track => "Track",
            Self::Playlist => "Playlist",
        }
    }
}

impl From<&str> for LoopStatus {
    fn from(status: &str) -> Self {
        match status.trim() {
            "None" => Self::None,
            "Track" => Self::Track,
            "Playlist" => Self::Playlist,
            _ => Self::Unknown,
        }
    }
}

/// Shuffle mode in playerctl's vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShuffleStatus {
    /// Shuffle enabled
    On,
    /// Shuffle disabled
    Off,
    /// Not reported by the player
    Unknown,
}

impl From<&str> for ShuffleStatus {
    fn from(status: &str) -> Self {
        match status.trim() {
            "On" | "true" => Self::On,
            "Off" | "false" => Self::Off,
            _ => Self::Unknown,
        }
    }
}

/// Metadata of the current track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackMetadata {
    /// Track title
    pub title: String,
    /// Track artist(s)
    pub artist: String,
    /// Album name
    pub album: String,
    /// Raw artwork reference, often a `file://` URL
    pub art_url: String,
    /// Track length in seconds
    pub length: f64,
}

impl TrackMetadata {
    /// Value used when the utility printed nothing (no player running).
    pub fn no_media() -> Self {
        Self {
            title: "No Media".to_string(),
            ..Self::unknown()
        }
    }

    /// Value used when the output had too few fields.
    pub fn unknown() -> Self {
        Self {
            title: "Unknown".to_string(),
            artist: "Unknown".to_string(),
            album: "Unknown".to_string(),
            art_url: String::new(),
            length: 0.0,
        }
    }

    /// Parse one line produced with [`METADATA_FORMAT`].
    pub fn parse(output: Option<&str>) -> Self {
        let output = match output {
            Some(out) if !out.is_empty() => out,
            _ => return Self::no_media(),
        };

        let parts: Vec<&str> = output.split('|').collect();
        if parts.len() < METADATA_FIELDS {
            return Self::unknown();
        }

        Self {
            title: parts[0].to_string(),
            artist: parts[1].to_string(),
            album: parts[2].to_string(),
            art_url: parts[3].to_string(),
            length: parse_length_micros(parts[4]),
        }
    }
}

impl Default for TrackMetadata {
    fn default() -> Self {
        Self::no_media()
    }
}

/// Convert an integer-microseconds field into seconds; non-numeric is 0.
pub fn parse_length_micros(field: &str) -> f64 {
    field
        .trim()
        .parse::<u64>()
        .map(|micros| micros as f64 / MICROS_PER_SECOND)
        .unwrap_or(0.0)
}

/// Parse `playerctl position` output; absent or non-numeric is 0.
pub fn parse_position(output: Option<&str>) -> f64 {
    output
        .and_then(|out| out.trim().parse::<f64>().ok())
        .filter(|pos| pos.is_finite() && *pos >= 0.0)
        .unwrap_or(0.0)
}

/// Format the argument for a relative seek.
///
/// playerctl takes the sign as a suffix: `5+` forward, `5-` backward.
pub fn relative_seek_arg(offset: f64) -> String {
    let sign = if offset >= 0.0 { '+' } else { '-' };
    format!("{}{}", offset.abs(), sign)
}
