use crate::error::IryeokError;
use crate::extraction::lopdf_text::LopdfExtractor;
use crate::extraction::pdfextract::PdfExtractExtractor;
use crate::extraction::pdftotext::PdftotextExtractor;
use crate::extraction::{read_pdf, PdfExtractor, RawDocument};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Ordered list of extraction engines, tried until one yields text.
pub struct EngineChain {
    engines: Vec<Box<dyn PdfExtractor>>,
}

impl EngineChain {
    pub fn new(engines: Vec<Box<dyn PdfExtractor>>) -> Self {
        EngineChain { engines }
    }

    /// pdftotext, then pdf-extract, then lopdf.
    pub fn default_chain(pdftotext: Option<PathBuf>, timeout: Duration) -> Self {
        let primary = match pdftotext {
            Some(path) => PdftotextExtractor::with_executable(path),
            None => PdftotextExtractor::new(),
        };
        EngineChain::new(vec![
            Box::new(primary.with_timeout(timeout)),
            Box::new(PdfExtractExtractor::new()),
            Box::new(LopdfExtractor::new()),
        ])
    }

    pub fn backends(&self) -> Vec<&str> {
        self.engines.iter().map(|e| e.backend_name()).collect()
    }

    /// Run the chain over the bytes of `source`.
    ///
    /// The first engine whose output is non-empty after trimming wins. Every
    /// earlier failure is kept as a `"backend: message"` diagnostic, and when
    /// no engine succeeds they are all carried by `ExtractionFailed`.
    pub fn extract(&self, pdf_bytes: &[u8], source: &Path) -> Result<RawDocument, IryeokError> {
        let mut diagnostics = Vec::new();

        for engine in &self.engines {
            let backend = engine.backend_name();
            tracing::debug!(backend, file = %source.display(), "trying extraction engine");

            let attempt = engine.extract_text(pdf_bytes).and_then(|text| {
                if text.trim().is_empty() {
                    Err(IryeokError::EmptyOutput)
                } else {
                    Ok(text)
                }
            });

            match attempt {
                Ok(text) => {
                    return Ok(RawDocument {
                        text,
                        engine: engine.engine(),
                        backend: backend.to_string(),
                        diagnostics,
                    });
                }
                Err(e) => {
                    tracing::warn!(backend, error = %e, "extraction engine failed");
                    diagnostics.push(format!("{}: {}", backend, e));
                }
            }
        }

        if diagnostics.is_empty() {
            diagnostics.push("no extraction engines configured".to_string());
        }
        Err(IryeokError::ExtractionFailed {
            path: source.to_path_buf(),
            diagnostics,
        })
    }

    /// Read `path` and run the chain. Unreadable or zero-byte files fail
    /// without trying any engine.
    pub fn extract_file(&self, path: &Path) -> Result<RawDocument, IryeokError> {
        let bytes = read_pdf(path)?;
        self.extract(&bytes, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::EngineTag;

    struct Fixed {
        name: &'static str,
        tag: EngineTag,
        result: Result<&'static str, &'static str>,
    }

    impl PdfExtractor for Fixed {
        fn extract_text(&self, _pdf_bytes: &[u8]) -> Result<String, IryeokError> {
            self.result
                .map(str::to_string)
                .map_err(|m| IryeokError::Engine(m.to_string()))
        }
        fn backend_name(&self) -> &str {
            self.name
        }
        fn engine(&self) -> EngineTag {
            self.tag
        }
    }

    fn fixed(name: &'static str, tag: EngineTag, result: Result<&'static str, &'static str>) -> Box<dyn PdfExtractor> {
        Box::new(Fixed { name, tag, result })
    }

    #[test]
    fn test_first_non_empty_engine_wins() {
        let chain = EngineChain::new(vec![
            fixed("a", EngineTag::Primary, Err("missing binary")),
            fixed("b", EngineTag::Secondary, Ok("   \n  ")),
            fixed("c", EngineTag::Tertiary, Ok("홍길동")),
        ]);
        let doc = chain.extract(b"%PDF", Path::new("x.pdf")).unwrap();
        assert_eq!(doc.engine, EngineTag::Tertiary);
        assert_eq!(doc.text, "홍길동");
        assert_eq!(doc.diagnostics.len(), 2);
        assert!(doc.diagnostics[0].starts_with("a: "));
        assert!(doc.diagnostics[1].contains("no text"));
    }

    #[test]
    fn test_all_engines_failing_reports_every_attempt() {
        let chain = EngineChain::new(vec![
            fixed("a", EngineTag::Primary, Err("boom")),
            fixed("b", EngineTag::Secondary, Ok("")),
        ]);
        let err = chain.extract(b"%PDF", Path::new("cv.pdf")).unwrap_err();
        match err {
            IryeokError::ExtractionFailed { path, diagnostics } => {
                assert_eq!(path, PathBuf::from("cv.pdf"));
                assert_eq!(diagnostics.len(), 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file_fails_before_engines() {
        let chain = EngineChain::new(vec![fixed("a", EngineTag::Primary, Ok("text"))]);
        let err = chain
            .extract_file(Path::new("/nonexistent/iryeok/cv.pdf"))
            .unwrap_err();
        assert!(err.is_extraction_failure());
        assert!(err.to_string().contains("/nonexistent/iryeok/cv.pdf"));
    }

    #[test]
    fn test_default_chain_order() {
        let chain = EngineChain::default_chain(None, Duration::from_secs(5));
        assert_eq!(chain.backends(), vec!["pdftotext", "pdf-extract", "lopdf"]);
    }
}
