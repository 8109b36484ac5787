//! `SnapshotOrchestrator` - fetch-and-persist for one title.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tmdbsnap_api::tmdb::{LocalMetadataGateway, RequestError};
use tracing::instrument;

use super::document::encode_document;
use super::layout::{document_path, snapshot_dir};
use super::media::MediaReference;
use super::recipe::{Recipe, UNKNOWN_TITLE};

/// Errors that abort a single capture.
///
/// None of them leaves a snapshot directory behind.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// A remote call failed; nothing was written.
    #[error("failed to fetch {reference}")]
    Request {
        /// Reference being captured.
        reference: MediaReference,
        /// Gateway failure.
        #[source]
        source: RequestError,
    },

    /// A document could not be serialized; nothing was written.
    #[error("failed to encode {}", path.display())]
    Encode {
        /// Document that failed to encode.
        path: PathBuf,
        /// Serializer error.
        #[source]
        source: serde_json::Error,
    },

    /// A filesystem operation failed.
    #[error("failed to write {}", path.display())]
    Storage {
        /// Path being created or written.
        path: PathBuf,
        /// I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result of a successful capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureReport {
    /// Captured reference.
    pub reference: MediaReference,
    /// Display title from the details document.
    pub title: String,
    /// Snapshot directory.
    pub path: PathBuf,
    /// Written documents, in call order.
    pub files: Vec<PathBuf>,
}

/// Outcome of [`SnapshotOrchestrator::capture`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Every document for the kind was fetched and written.
    Captured(CaptureReport),
    /// A snapshot directory already exists; nothing was fetched or written.
    AlreadyCaptured {
        /// Reference that was requested.
        reference: MediaReference,
        /// Existing snapshot directory.
        path: PathBuf,
    },
}

/// Captures snapshots under a fixed storage root.
#[derive(Debug)]
pub struct SnapshotOrchestrator<G> {
    /// Remote gateway.
    gateway: G,
    /// Snapshot root (`<root>/<kind>/<id>`).
    root: PathBuf,
}

impl<G: LocalMetadataGateway> SnapshotOrchestrator<G> {
    /// Creates an orchestrator writing below `root`.
    pub fn new(gateway: G, root: impl Into<PathBuf>) -> Self {
        Self {
            gateway,
            root: root.into(),
        }
    }

    /// Returns the snapshot root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the gateway.
    #[must_use]
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Fetches every document for `reference` and writes the snapshot.
    ///
    /// An existing snapshot directory, complete or not, is never touched:
    /// the call returns [`CaptureOutcome::AlreadyCaptured`] without issuing
    /// any request. Disk writes start only after every remote call has
    /// succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError`] if a remote call fails or the snapshot cannot
    /// be written. The orchestrator stays usable for the next reference.
    #[instrument(skip_all, fields(reference = %reference))]
    pub async fn capture(
        &self,
        reference: &MediaReference,
    ) -> Result<CaptureOutcome, CaptureError> {
        let dir = snapshot_dir(&self.root, reference);
        if dir.is_dir() {
            tracing::debug!(path = %dir.display(), "Snapshot directory already exists");
            return Ok(CaptureOutcome::AlreadyCaptured {
                reference: *reference,
                path: dir,
            });
        }

        let recipe = Recipe::for_kind(reference.kind);
        tracing::info!(
            "Fetching {} ID: {}",
            reference.kind.label(),
            reference.id
        );

        let mut documents: Vec<(&'static str, Value)> = Vec::with_capacity(recipe.calls.len());
        for call in recipe.calls {
            let endpoint = call.endpoint(reference.kind, reference.id);
            let document = self
                .gateway
                .request(&endpoint, &call.params())
                .await
                .map_err(|source| CaptureError::Request {
                    reference: *reference,
                    source,
                })?;
            documents.push((call.document, document));
        }

        let title = documents.first().map_or_else(
            || String::from(UNKNOWN_TITLE),
            |(_, details)| recipe.display_title(details),
        );

        // No await below: an interrupt lands before the claim or after the last write.
        let Some(files) = persist(&dir, &documents)? else {
            tracing::debug!(path = %dir.display(), "Snapshot directory appeared during fetch");
            return Ok(CaptureOutcome::AlreadyCaptured {
                reference: *reference,
                path: dir,
            });
        };

        Ok(CaptureOutcome::Captured(CaptureReport {
            reference: *reference,
            title,
            path: dir,
            files,
        }))
    }
}

/// Writes all documents into a freshly claimed `dir`.
///
/// Returns `Ok(None)` when `dir` was created by someone else after the
/// existence check. On a write failure the directory claimed here is removed
/// again so a later capture can retry.
fn persist(
    dir: &Path,
    documents: &[(&'static str, Value)],
) -> Result<Option<Vec<PathBuf>>, CaptureError> {
    let mut encoded = Vec::with_capacity(documents.len());
    for (name, document) in documents {
        let path = document_path(dir, name);
        match encode_document(document) {
            Ok(bytes) => encoded.push((path, bytes)),
            Err(source) => return Err(CaptureError::Encode { path, source }),
        }
    }

    if let Some(parent) = dir.parent() {
        std::fs::create_dir_all(parent).map_err(|source| CaptureError::Storage {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    #[allow(clippy::create_dir)] // create-if-absent is the claim; ancestors exist already
    match std::fs::create_dir(dir) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::AlreadyExists && dir.is_dir() => return Ok(None),
        Err(source) => {
            return Err(CaptureError::Storage {
                path: dir.to_path_buf(),
                source,
            });
        }
    }

    let mut files = Vec::with_capacity(encoded.len());
    for (path, bytes) in encoded {
        if let Err(source) = std::fs::write(&path, bytes) {
            if let Err(cleanup) = std::fs::remove_dir_all(dir) {
                tracing::warn!(
                    path = %dir.display(),
                    error = %cleanup,
                    "Failed to remove incomplete snapshot directory"
                );
            }
            return Err(CaptureError::Storage { path, source });
        }
        tracing::info!("Saved: {}", path.display());
        files.push(path);
    }

    Ok(Some(files))
}
