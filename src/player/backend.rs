//! Player backend
//!
//! Translates playback queries and transport commands into `playerctl`
//! invocations. Each call is a fresh subprocess; nothing is cached.

use crate::config::PlayerConfig;
use crate::error::Result;
use crate::player::runner::{CommandRunner, PlayerctlRunner};
use crate::player::types::{
    parse_position, relative_seek_arg, LoopStatus, PlaybackStatus, ShuffleStatus, TrackMetadata,
    METADATA_FORMAT,
};
use tracing::{debug, info};

/// Stateless adapter over the media-control utility
pub struct PlayerBackend {
    runner: Box<dyn CommandRunner>,
}

impl PlayerBackend {
    /// Locate the configured utility and build a backend.
    ///
    /// Fails with [`MuserError::PlayerUnavailable`](crate::MuserError::PlayerUnavailable)
    /// when the utility cannot be found.
    pub fn from_config(config: &PlayerConfig) -> Result<Self> {
        let runner = PlayerctlRunner::locate(&config.binary, config.player.clone())?;
        info!("Player backend ready: {:?}", runner.program());
        Ok(Self::with_runner(runner))
    }

    /// Build a backend around any runner
    pub fn with_runner<R: CommandRunner + 'static>(runner: R) -> Self {
        Self {
            runner: Box::new(runner),
        }
    }

    fn run(&self, args: &[&str]) -> Option<String> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        self.runner.run(&args)
    }

    /// Fire-and-forget invocation; the outcome is not inspected.
    fn send(&self, args: &[&str]) {
        if self.run(args).is_none() {
            debug!("Command {:?} did not succeed, ignoring", args);
        }
    }

    /// Metadata of the current track, or a default value
    pub fn metadata(&self) -> TrackMetadata {
        let output = self.run(&["metadata", "--format", METADATA_FORMAT]);
        TrackMetadata::parse(output.as_deref())
    }

    /// Playback position in seconds, 0.0 when unavailable
    pub fn position(&self) -> f64 {
        parse_position(self.run(&["position"]).as_deref())
    }

    /// Raw status text, `None` when the query failed
    pub fn status(&self) -> Option<String> {
        self.run(&["status"])
    }

    /// Typed view of [`status`](Self::status)
    pub fn playback_status(&self) -> PlaybackStatus {
        self.status()
            .as_deref()
            .map(PlaybackStatus::from)
            .unwrap_or(PlaybackStatus::Unknown)
    }

    /// Toggle between playing and paused
    pub fn play_pause(&self) {
        self.send(&["play-pause"]);
    }

    /// Skip to the next track
    pub fn next(&self) {
        self.send(&["next"]);
    }

    /// Go back to the previous track
    pub fn previous(&self) {
        self.send(&["previous"]);
    }

    /// Seek relative to the current position by `offset` seconds
    pub fn seek_relative(&self, offset: f64) {
        let arg = relative_seek_arg(offset);
        self.send(&["position", &arg]);
    }

    /// Seek to an absolute position in seconds
    pub fn set_position(&self, position: f64) {
        let arg = position.to_string();
        self.send(&["position", &arg]);
    }

    /// Toggle shuffle
    pub fn toggle_shuffle(&self) {
        self.send(&["shuffle", "toggle"]);
    }

    /// Rotate the loop mode: None -> Playlist -> Track -> None.
    ///
    /// Reads then writes; a change made by another client in between is
    /// overwritten.
    pub fn toggle_loop(&self) -> LoopStatus {
        let current = self.loop_status();
        let next = LoopStatus::next_after(current.as_deref());
        debug!("Loop mode {:?} -> {:?}", current, next);
        self.send(&["loop", next.as_arg()]);
        next
    }

    /// Raw shuffle state, `None` when the query failed
    pub fn shuffle_status(&self) -> Option<String> {
        self.run(&["shuffle"])
    }

    /// Raw loop state, `None` when the query failed
    pub fn loop_status(&self) -> Option<String> {
        self.run(&["loop"])
    }

    /// Typed view of [`shuffle_status`](Self::shuffle_status)
    pub fn shuffle_mode(&self) -> ShuffleStatus {
        self.shuffle_status()
            .as_deref()
            .map(ShuffleStatus::from)
            .unwrap_or(ShuffleStatus::Unknown)
    }

    /// Typed view of [`loop_status`](Self::loop_status)
    pub fn loop_mode(&self) -> LoopStatus {
        self.loop_status()
            .as_deref()
            .map(LoopStatus::from)
            .unwrap_or(LoopStatus::Unknown)
    }
}

impl std::fmt::Debug for PlayerBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerBackend").finish_non_exhaustive()
    }
}
