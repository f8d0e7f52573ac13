pub mod schema;

use crate::error::IryeokError;
use schema::{CorpusArtifact, HeaderCorpus};
use std::path::Path;

/// Where the corpus builder writes its artifact, relative to the working directory.
pub const DEFAULT_CORPUS_PATH: &str = "pdf_resume/common_headers.json";

/// Load a header corpus from a JSON artifact.
pub fn load_corpus(path: &Path) -> Result<HeaderCorpus, IryeokError> {
    let content = std::fs::read_to_string(path).map_err(|e| IryeokError::CorpusLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_corpus(&content, path)
}

/// Parse a header corpus from a JSON string.
pub fn parse_corpus(json: &str, source: &Path) -> Result<HeaderCorpus, IryeokError> {
    let artifact: CorpusArtifact =
        serde_json::from_str(json).map_err(|e| IryeokError::CorpusLoad {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;
    let corpus = HeaderCorpus::from(artifact);
    validate_corpus(&corpus)?;
    Ok(corpus)
}

/// Parse a header corpus from a JSON string (no file path context).
pub fn parse_corpus_str(json: &str) -> Result<HeaderCorpus, IryeokError> {
    let artifact: CorpusArtifact = serde_json::from_str(json).map_err(IryeokError::Json)?;
    let corpus = HeaderCorpus::from(artifact);
    validate_corpus(&corpus)?;
    Ok(corpus)
}

/// Validate that a corpus is usable for segmentation.
pub fn validate_corpus(corpus: &HeaderCorpus) -> Result<(), IryeokError> {
    if corpus.is_empty() {
        return Err(IryeokError::CorpusInvalid(
            "section header list must not be empty".into(),
        ));
    }
    for (i, candidate) in corpus.candidates.iter().enumerate() {
        if candidate.text.trim().is_empty() {
            return Err(IryeokError::CorpusInvalid(format!(
                "header #{} has empty text",
                i + 1
            )));
        }
    }
    Ok(())
}

/// Resolve the corpus for corpus-header segmentation.
///
/// An explicit path must load. Without one the conventional location is
/// tried, and its absence yields `None` so the caller can fall back to the
/// blank-line heuristic.
pub fn resolve_corpus(explicit: Option<&Path>) -> Result<Option<HeaderCorpus>, IryeokError> {
    if let Some(path) = explicit {
        return load_corpus(path).map(Some);
    }
    let default = Path::new(DEFAULT_CORPUS_PATH);
    if !default.is_file() {
        tracing::warn!(
            path = DEFAULT_CORPUS_PATH,
            "header corpus not found, using blank-line segmentation"
        );
        return Ok(None);
    }
    load_corpus(default).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::HeaderCandidate;

    #[test]
    fn test_parse_trailing_headers() {
        let json = r#"{
            "num_files": 20,
            "section_headers": ["경력 총", "학력"],
            "section_headers_with_trailing": [
                { "text": "경력 총", "trailing_min_empty_lines": 2 },
                { "text": "학력", "trailing_min_empty_lines": 3 }
            ]
        }"#;
        let corpus = parse_corpus_str(json).unwrap();
        assert_eq!(
            corpus.candidates,
            vec![HeaderCandidate::new("경력 총", 2), HeaderCandidate::new("학력", 3)]
        );
    }

    #[test]
    fn test_plain_headers_get_zero_trailing() {
        let corpus = parse_corpus_str(r#"{ "section_headers": ["자기소개서"] }"#).unwrap();
        assert_eq!(corpus.candidates, vec![HeaderCandidate::new("자기소개서", 0)]);
    }

    #[test]
    fn test_empty_corpus_rejected() {
        assert!(parse_corpus_str(r#"{ "section_headers": [] }"#).is_err());
        assert!(parse_corpus_str("{}").is_err());
    }

    #[test]
    fn test_blank_header_text_rejected() {
        let json = r#"{ "section_headers_with_trailing": [{ "text": "  ", "trailing_min_empty_lines": 1 }] }"#;
        assert!(matches!(
            parse_corpus_str(json),
            Err(IryeokError::CorpusInvalid(_))
        ));
    }

    #[test]
    fn test_career_detail_amendment_is_idempotent() {
        let corpus = HeaderCorpus::new(vec![HeaderCandidate::new("학력", 2)])
            .with_career_detail_amendment()
            .with_career_detail_amendment();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.candidates[1], HeaderCandidate::new("경력기술서", 0));
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let err = resolve_corpus(Some(Path::new("/nonexistent/headers.json"))).unwrap_err();
        assert!(matches!(err, IryeokError::CorpusLoad { .. }));
    }

    #[test]
    fn test_bundled_artifact_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../headers/common_headers.json");
        let corpus = load_corpus(&path).unwrap();
        assert!(corpus.candidates.iter().any(|c| c.text == "경력 총"));
    }
}
