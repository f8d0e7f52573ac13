use serde::{Deserialize, Serialize};

/// A known section header and the blank lines that must follow it for a
/// line to count as a real section boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderCandidate {
    pub text: String,
    #[serde(default)]
    pub trailing_min_empty_lines: usize,
}

impl HeaderCandidate {
    pub fn new(text: impl Into<String>, trailing_min_empty_lines: usize) -> Self {
        HeaderCandidate {
            text: text.into(),
            trailing_min_empty_lines,
        }
    }
}

/// On-disk layout of a header corpus artifact (`common_headers.json`).
///
/// Only the header lists are used; the remaining fields describe how the
/// artifact was built and are kept for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusArtifact {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub num_files: Option<u32>,
    #[serde(default)]
    pub min_occurrence: Option<u32>,
    #[serde(default)]
    pub section_headers_with_trailing: Vec<HeaderCandidate>,
    /// Older artifacts only list header strings.
    #[serde(default)]
    pub section_headers: Vec<String>,
}

/// Header vocabulary used by corpus-header segmentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeaderCorpus {
    pub candidates: Vec<HeaderCandidate>,
}

pub const CAREER_DETAIL_HEADER: &str = "경력기술서";

impl HeaderCorpus {
    pub fn new(candidates: Vec<HeaderCandidate>) -> Self {
        HeaderCorpus { candidates }
    }

    /// Append the career-detail header (zero trailing blanks) unless the
    /// corpus already knows it.
    pub fn with_career_detail_amendment(mut self) -> Self {
        if !self.candidates.iter().any(|c| c.text == CAREER_DETAIL_HEADER) {
            self.candidates
                .push(HeaderCandidate::new(CAREER_DETAIL_HEADER, 0));
        }
        self
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl From<CorpusArtifact> for HeaderCorpus {
    fn from(artifact: CorpusArtifact) -> Self {
        if !artifact.section_headers_with_trailing.is_empty() {
            HeaderCorpus::new(artifact.section_headers_with_trailing)
        } else {
            HeaderCorpus::new(
                artifact
                    .section_headers
                    .into_iter()
                    .map(|text| HeaderCandidate::new(text, 0))
                    .collect(),
            )
        }
    }
}
