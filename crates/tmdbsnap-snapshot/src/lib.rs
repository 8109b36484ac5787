//! Snapshot capture for tmdbsnap.
//!
//! Turns a [`MediaReference`] into a directory of JSON documents fetched
//! through a [`tmdbsnap_api::tmdb::LocalMetadataGateway`], refusing to touch
//! any snapshot that already exists on disk.

mod capture;
mod document;
mod layout;
mod media;
mod recipe;

pub use capture::{CaptureError, CaptureOutcome, CaptureReport, SnapshotOrchestrator};
pub use document::{encode_document, read_document};
pub use layout::{DEFAULT_OUTPUT_DIR, document_path, removal_hint, snapshot_dir};
pub use media::{MediaKind, MediaReference, ParseMediaKindError};
pub use recipe::{Recipe, RemoteCall, UNKNOWN_TITLE};
