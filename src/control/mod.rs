//! Status/control HTTP API
//!
//! This module exposes the player backend over a small loopback HTTP
//! surface consumed by the UI page: a status endpoint, transport controls
//! and an artwork endpoint for local `file://` covers.

mod api;
mod handler;
mod server;

pub use api::{Ack, ModesResponse, StatusMetadata, StatusResponse};
pub use handler::{
    artwork_url, content_type_for, resolve_local_path, seek_target, ControlHandler,
    LOCAL_FILE_PREFIX,
};
pub use server::{index_document, router, AppState, HttpServer, DEFAULT_INDEX_HTML};
