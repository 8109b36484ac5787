//! Storage layout: `<root>/<kind>/<id>/<document>.json`.

use std::path::{Path, PathBuf};

use super::media::MediaReference;

/// Default snapshot root, a sibling of the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "../tmdb_config";

/// Returns the snapshot directory for `reference` under `root`.
#[must_use]
pub fn snapshot_dir(root: &Path, reference: &MediaReference) -> PathBuf {
    root.join(reference.kind.as_str())
        .join(reference.id.to_string())
}

/// Returns the file path of one named document inside a snapshot directory.
#[must_use]
pub fn document_path(dir: &Path, document: &str) -> PathBuf {
    dir.join(format!("{document}.json"))
}

/// Shell command an operator can run to remove a snapshot by hand.
#[must_use]
pub fn removal_hint(dir: &Path) -> String {
    let absolute = std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf());
    if cfg!(windows) {
        format!("rmdir /s \"{}\"", absolute.display())
    } else {
        format!("rm -rf \"{}\"", absolute.display())
    }
}
