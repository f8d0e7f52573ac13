use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum IryeokError {
    #[error("text extraction failed for {}: {}", path.display(), diagnostics.join("; "))]
    ExtractionFailed {
        path: PathBuf,
        diagnostics: Vec<String>,
    },

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("pdftotext did not finish within {timeout:?}")]
    PdftotextTimeout { timeout: Duration },

    #[error("{0}")]
    Engine(String),

    #[error("engine produced no text")]
    EmptyOutput,

    #[error("failed to load header corpus from {path}: {reason}")]
    CorpusLoad { path: PathBuf, reason: String },

    #[error("invalid header corpus: {0}")]
    CorpusInvalid(String),

    #[error("profile photo: {0}")]
    Photo(String),

    #[error("unexpected failure: {0}")]
    Unexpected(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IryeokError {
    /// True for the terminal extraction failure (every engine exhausted or
    /// the input could not be read).
    pub fn is_extraction_failure(&self) -> bool {
        matches!(self, IryeokError::ExtractionFailed { .. })
    }
}

/// Best-effort text of a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
