pub mod chain;
pub mod lopdf_text;
pub mod pdfextract;
pub mod pdftotext;

use crate::error::IryeokError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub use chain::EngineChain;

/// Which engine of the fallback chain produced a document's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineTag {
    Primary,
    Secondary,
    Tertiary,
}

impl fmt::Display for EngineTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineTag::Primary => write!(f, "primary"),
            EngineTag::Secondary => write!(f, "secondary"),
            EngineTag::Tertiary => write!(f, "tertiary"),
        }
    }
}

/// Text extracted from one PDF, with the engine that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct RawDocument {
    pub text: String,
    pub engine: EngineTag,
    /// Backend name of the engine (e.g. "pdftotext").
    pub backend: String,
    /// Failures of the engines tried before the successful one.
    pub diagnostics: Vec<String>,
}

impl RawDocument {
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract the whole document as one layout-preserving string.
    fn extract_text(&self, pdf_bytes: &[u8]) -> Result<String, IryeokError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;

    /// Position of this backend in the fallback chain.
    fn engine(&self) -> EngineTag;
}

/// Read a PDF from disk. Unreadable and zero-byte files are extraction
/// failures naming the file.
pub fn read_pdf(path: &Path) -> Result<Vec<u8>, IryeokError> {
    let bytes = std::fs::read(path).map_err(|e| IryeokError::ExtractionFailed {
        path: path.to_path_buf(),
        diagnostics: vec![format!("cannot read file: {}", e)],
    })?;
    if bytes.is_empty() {
        return Err(IryeokError::ExtractionFailed {
            path: path.to_path_buf(),
            diagnostics: vec!["file is empty".to_string()],
        });
    }
    Ok(bytes)
}
