//! JSON export of a transcript.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::session::history::Transcript;

pub const EXPORT_FILE_NAME: &str = "chat_history.json";
pub const EXPORT_MIME_TYPE: &str = "application/json";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write export to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialize the transcript as a 2-space indented JSON array of
/// `{role, content, timestamp}` objects.
pub fn to_json(transcript: &Transcript) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(transcript)?)
}

pub fn from_json(text: &str) -> Result<Transcript, ExportError> {
    Ok(serde_json::from_str(text)?)
}

pub fn write_export(transcript: &Transcript, path: &Path) -> Result<(), ExportError> {
    let content = to_json(transcript)?;
    fs::write(path, content).map_err(|source| ExportError::Io { path: path.to_path_buf(), source })?;
    tracing::info!(path = %path.display(), messages = transcript.len(), "exported chat history");
    Ok(())
}
