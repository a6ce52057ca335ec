//! Session export files.
//!
//! Exports are pretty-printed `SessionSnapshot` JSON named
//! `neko-export-YYYY-MM-DD.json` after the UTC export date.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use neko_core::chat::session::validate;
use neko_types::chat::SessionSnapshot;
use neko_types::error::SnapshotError;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// File name for an export made on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("neko-export-{}.json", date.format("%Y-%m-%d"))
}

/// Write `snapshot` into `dir`, creating the directory if needed.
///
/// A second export on the same day overwrites the first. Returns the path
/// written.
pub async fn write_export(dir: &Path, snapshot: &SessionSnapshot) -> Result<PathBuf, ExportError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| ExportError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

    let path = dir.join(export_file_name(snapshot.exported_at.date_naive()));
    let json = serde_json::to_string_pretty(snapshot).map_err(SnapshotError::from)?;

    tokio::fs::write(&path, json)
        .await
        .map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;

    tracing::info!(
        path = %path.display(),
        messages = snapshot.messages.len(),
        "Session exported"
    );
    Ok(path)
}

/// Read and validate an export file.
pub async fn read_export(path: &Path) -> Result<SessionSnapshot, ExportError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let snapshot: SessionSnapshot = serde_json::from_str(&content).map_err(SnapshotError::from)?;
    validate(&snapshot)?;
    Ok(snapshot)
}
