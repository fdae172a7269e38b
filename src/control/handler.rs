//! Request handling for the status/control API
//!
//! Every method queries the player backend afresh. Methods block on
//! subprocesses, so the HTTP layer calls them from blocking tasks.

use crate::control::{Ack, ModesResponse, StatusMetadata, StatusResponse};
use crate::player::PlayerBackend;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// URL prefix of the artwork file endpoint.
pub const LOCAL_FILE_PREFIX: &str = "/local-file/";

const FILE_SCHEME: &str = "file://";

/// Dispatches API calls to the player backend, if there is one
#[derive(Debug, Default)]
pub struct ControlHandler {
    backend: Option<PlayerBackend>,
}

impl ControlHandler {
    /// Create a handler; `None` runs in degraded mode with fixed answers.
    pub fn new(backend: Option<PlayerBackend>) -> Self {
        Self { backend }
    }

    /// Whether a player backend is available
    pub fn has_player(&self) -> bool {
        self.backend.is_some()
    }

    /// Compose status, metadata and position into one payload
    pub fn status(&self) -> StatusResponse {
        let Some(player) = &self.backend else {
            return StatusResponse::no_player();
        };

        let status = player.status();
        let metadata = player.metadata();
        let position = player.position();

        StatusResponse {
            status,
            metadata: StatusMetadata {
                title: metadata.title,
                artist: metadata.artist,
                art_url: artwork_url(&metadata.art_url),
            },
            position,
            length: metadata.length,
        }
    }

    /// Toggle play/pause
    pub fn play_pause(&self) -> Ack {
        if let Some(player) = &self.backend {
            player.play_pause();
        }
        Ack::ok()
    }

    /// Skip to next track
    pub fn next(&self) -> Ack {
        if let Some(player) = &self.backend {
            player.next();
        }
        Ack::ok()
    }

    /// Go to previous track
    pub fn previous(&self) -> Ack {
        if let Some(player) = &self.backend {
            player.previous();
        }
        Ack::ok()
    }

    /// Seek to a fraction of the current track's length.
    ///
    /// Nothing is sent when the length is unknown (0).
    pub fn seek_fraction(&self, fraction: f64) -> Ack {
        if let Some(player) = &self.backend {
            let length = player.metadata().length;
            match seek_target(fraction, length) {
                Some(target) => {
                    info!("Seeking to {:.3}s ({} of {:.3}s)", target, fraction, length);
                    player.set_position(target);
                }
                None => debug!("Skipping seek to {} (track length {})", fraction, length),
            }
        }
        Ack::ok()
    }

    /// Seek relative to the current position
    pub fn seek_relative(&self, offset: f64) -> Ack {
        if let Some(player) = &self.backend {
            if offset.is_finite() {
                player.seek_relative(offset);
            }
        }
        Ack::ok()
    }

    /// Toggle shuffle
    pub fn toggle_shuffle(&self) -> Ack {
        if let Some(player) = &self.backend {
            player.toggle_shuffle();
        }
        Ack::ok()
    }

    /// Rotate loop mode
    pub fn toggle_loop(&self) -> Ack {
        if let Some(player) = &self.backend {
            let next = player.toggle_loop();
            info!("Loop mode set to {}", next.as_arg());
        }
        Ack::ok()
    }

    /// Current playback state plus shuffle and loop modes
    pub fn modes(&self) -> ModesResponse {
        match &self.backend {
            Some(player) => ModesResponse {
                state: player.playback_status(),
                shuffle: player.shuffle_mode(),
                loop_mode: player.loop_mode(),
            },
            None => ModesResponse::unknown(),
        }
    }
}

/// Absolute seek position for `fraction` of `length`, if seeking makes sense.
///
/// Negative targets are dropped: playerctl would parse `-100` as an option.
pub fn seek_target(fraction: f64, length: f64) -> Option<f64> {
    if length <= 0.0 {
        return None;
    }
    let target = fraction * length;
    (target.is_finite() && target >= 0.0).then_some(target)
}

/// Rewrite a `file://` artwork reference into a same-origin URL.
///
/// Other references, including the empty string, are returned unchanged.
pub fn artwork_url(art_url: &str) -> String {
    if art_url.starts_with(FILE_SCHEME) {
        format!("{}{}", LOCAL_FILE_PREFIX, art_url)
    } else {
        art_url.to_string()
    }
}

/// Turn the still-encoded path of an artwork request back into a filesystem path.
///
/// Decodes the request path, strips the `file://` scheme, then decodes the
/// locator's own percent-encoding. Works on bytes, so filenames that are not
/// UTF-8 (`caf%E9.png`) resolve to the file that exists on disk.
pub fn resolve_local_path(raw: &str) -> PathBuf {
    let request = urlencoding::decode_binary(raw.as_bytes());
    let mut start = 0;
    while request.get(start) == Some(&b'/') {
        start += 1;
    }
    let request = &request[start..];

    let mut bytes = match request.strip_prefix(FILE_SCHEME.as_bytes()) {
        Some(rest) => urlencoding::decode_binary(rest).into_owned(),
        None => urlencoding::decode_binary(request).into_owned(),
    };
    if bytes.first() != Some(&b'/') {
        bytes.insert(0, b'/');
    }

    path_from_bytes(bytes)
}

#[cfg(unix)]
fn path_from_bytes(bytes: Vec<u8>) -> PathBuf {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    PathBuf::from(OsString::from_vec(bytes))
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: Vec<u8>) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(&bytes).into_owned())
}

/// Content type for an artwork file, by extension
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artwork_url_rewrite() {
        assert_eq!(
            artwork_url("file:///home/u/art.jpg"),
            "/local-file/file:///home/u/art.jpg"
        );
        assert_eq!(
            artwork_url("https://i.scdn.co/image/abc"),
            "https://i.scdn.co/image/abc"
        );
        assert_eq!(artwork_url(""), "");
    }

    #[test]
    fn test_resolve_local_path() {
        assert_eq!(
            resolve_local_path("file:///home/u/art.jpg"),
            PathBuf::from("/home/u/art.jpg")
        );
        assert_eq!(
            resolve_local_path("file:///home/u/My%20Music/cover%20art.png"),
            PathBuf::from("/home/u/My Music/cover art.png")
        );
        assert_eq!(
            resolve_local_path("/file:///tmp/x.png"),
            PathBuf::from("/tmp/x.png")
        );
        assert_eq!(
            resolve_local_path("home/u/art.jpg"),
            PathBuf::from("/home/u/art.jpg")
        );
        assert_eq!(
            resolve_local_path("file%3A%2F%2F%2Fhome%2Fu%2Fart.jpg"),
            PathBuf::from("/home/u/art.jpg")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_local_path_non_utf8() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let expected = Path::new(OsStr::from_bytes(b"/music/caf\xE9.png"));
        assert_eq!(resolve_local_path("file:///music/caf%E9.png"), expected);
        assert_eq!(
            resolve_local_path("file%3A%2F%2F%2Fmusic%2Fcaf%25E9.png"),
            expected
        );
    }

    #[test]
    fn test_seek_target() {
        assert_eq!(seek_target(0.5, 200.0), Some(100.0));
        assert_eq!(seek_target(0.0, 200.0), Some(0.0));
        assert_eq!(seek_target(1.5, 100.0), Some(150.0));
        assert_eq!(seek_target(0.5, 0.0), None);
        assert_eq!(seek_target(f64::NAN, 100.0), None);
        assert_eq!(seek_target(-0.5, 200.0), None);
    }

    #[test]
    fn test_content_type() {
        assert_eq!(content_type_for(Path::new("/a/cover.JPG")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("/a/cover.png")), "image/png");
        assert_eq!(
            content_type_for(Path::new("/a/cover")),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_degraded_handler() {
        let handler = ControlHandler::new(None);
        assert!(!handler.has_player());
        assert_eq!(handler.status(), StatusResponse::no_player());
        assert!(handler.play_pause().success);
        assert!(handler.seek_fraction(0.5).success);
        assert_eq!(handler.modes(), ModesResponse::unknown());
    }
}
