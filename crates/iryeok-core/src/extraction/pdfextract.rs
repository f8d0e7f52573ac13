use crate::error::{panic_message, IryeokError};
use crate::extraction::{EngineTag, PdfExtractor};
use std::panic;

/// Layout-aware extraction through the `pdf-extract` crate.
///
/// Keeps reading order and approximate line breaks but not column alignment,
/// so it only runs when pdftotext is unavailable or fails.
pub struct PdfExtractExtractor;

impl PdfExtractExtractor {
    pub fn new() -> Self {
        PdfExtractExtractor
    }
}

impl Default for PdfExtractExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdfExtractExtractor {
    fn extract_text(&self, pdf_bytes: &[u8]) -> Result<String, IryeokError> {
        // pdf-extract panics on some malformed fonts instead of returning Err.
        match panic::catch_unwind(|| pdf_extract::extract_text_from_mem(pdf_bytes)) {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(IryeokError::Engine(format!("pdf-extract failed: {}", e))),
            Err(payload) => Err(IryeokError::Engine(format!(
                "pdf-extract panicked: {}",
                panic_message(payload.as_ref())
            ))),
        }
    }

    fn backend_name(&self) -> &str {
        "pdf-extract"
    }

    fn engine(&self) -> EngineTag {
        EngineTag::Secondary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_fail_without_panicking() {
        let result = PdfExtractExtractor::new().extract_text(b"not a pdf at all");
        assert!(matches!(result, Err(IryeokError::Engine(_))));
    }
}
