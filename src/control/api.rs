//! HTTP API response types
//!
//! JSON payloads returned by the `/api` endpoints.

use crate::player::{LoopStatus, PlaybackStatus, ShuffleStatus};
use serde::{Deserialize, Serialize};

/// Payload of `GET /api/status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Raw playback status text, `null` when the query failed
    pub status: Option<String>,

    /// Subset of the track metadata shown by the UI
    pub metadata: StatusMetadata,

    /// Playback position in seconds
    pub position: f64,

    /// Track length in seconds
    pub length: f64,
}

/// Track metadata as exposed to the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusMetadata {
    /// Track title
    pub title: String,

    /// Track artist(s)
    pub artist: String,

    /// Artwork URL the page can load (local files are rewritten)
    pub art_url: String,
}

impl StatusResponse {
    /// Fixed answer when no player backend is available
    pub fn no_player() -> Self {
        Self {
            status: Some("Stopped".to_string()),
            metadata: StatusMetadata {
                title: "No Media".to_string(),
                artist: "Unknown Artist".to_string(),
                art_url: String::new(),
            },
            position: 0.0,
            length: 0.0,
        }
    }
}

/// Acknowledgement returned by mutating endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    /// Always true; command outcomes are not confirmed
    pub success: bool,
}

impl Ack {
    /// Successful acknowledgement
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Payload of `GET /api/modes`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModesResponse {
    /// Playback state
    pub state: PlaybackStatus,

    /// Shuffle mode
    pub shuffle: ShuffleStatus,

    /// Loop mode
    #[serde(rename = "loop")]
    pub loop_mode: LoopStatus,
}

impl ModesResponse {
    /// Answer when nothing could be queried
    pub fn unknown() -> Self {
        Self {
            state: PlaybackStatus::Unknown,
            shuffle: ShuffleStatus::Unknown,
            loop_mode: LoopStatus::Unknown,
        }
    }
}
