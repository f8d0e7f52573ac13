use crate::error::IryeokError;
use crate::extraction::{EngineTag, PdfExtractor};
use lopdf::Document;

/// Page-by-page text extraction with lopdf.
///
/// Lowest fidelity of the chain: no layout, one text run per content-stream
/// operator. Pages are joined with a newline.
pub struct LopdfExtractor;

impl LopdfExtractor {
    pub fn new() -> Self {
        LopdfExtractor
    }
}

impl Default for LopdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for LopdfExtractor {
    fn extract_text(&self, pdf_bytes: &[u8]) -> Result<String, IryeokError> {
        let doc = Document::load_mem(pdf_bytes)
            .map_err(|e| IryeokError::Engine(format!("lopdf could not load PDF: {}", e)))?;

        let mut pages = Vec::new();
        for page_number in doc.get_pages().keys() {
            match doc.extract_text(&[*page_number]) {
                Ok(text) => pages.push(text),
                Err(e) => {
                    tracing::debug!(page = page_number, error = %e, "lopdf skipped page");
                }
            }
        }

        Ok(pages.join("\n"))
    }

    fn backend_name(&self) -> &str {
        "lopdf"
    }

    fn engine(&self) -> EngineTag {
        EngineTag::Tertiary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pdf_is_engine_error() {
        let err = LopdfExtractor::new().extract_text(b"").unwrap_err();
        assert!(err.to_string().contains("lopdf"));
    }
}
