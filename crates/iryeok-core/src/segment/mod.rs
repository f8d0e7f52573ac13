//! Section segmentation: partition extracted text into labeled blocks.

pub mod blank_lines;
pub mod classify;
pub mod corpus_headers;

use crate::corpus::schema::HeaderCorpus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Fixed set of section labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionLabel {
    Header,
    CareerSummary,
    EducationHeader,
    Skills,
    Certifications,
    EmploymentPreference,
    SelfIntroduction,
    CareerDetailContent,
    Portfolio,
    Unknown,
}

impl SectionLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionLabel::Header => "header",
            SectionLabel::CareerSummary => "career_summary",
            SectionLabel::EducationHeader => "education_header",
            SectionLabel::Skills => "skills",
            SectionLabel::Certifications => "certifications",
            SectionLabel::EmploymentPreference => "employment_preference",
            SectionLabel::SelfIntroduction => "self_introduction",
            SectionLabel::CareerDetailContent => "career_detail_content",
            SectionLabel::Portfolio => "portfolio",
            SectionLabel::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SectionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which segmentation algorithm to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentMode {
    #[default]
    BlankLines,
    CorpusHeaders,
}

impl fmt::Display for SegmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentMode::BlankLines => write!(f, "blank_lines"),
            SegmentMode::CorpusHeaders => write!(f, "corpus_headers"),
        }
    }
}

/// A segmentation algorithm together with its input data.
#[derive(Debug, Clone, Copy)]
pub enum SegmentStrategy<'a> {
    BlankLines,
    Corpus(&'a HeaderCorpus),
}

impl SegmentStrategy<'_> {
    pub fn mode(&self) -> SegmentMode {
        match self {
            SegmentStrategy::BlankLines => SegmentMode::BlankLines,
            SegmentStrategy::Corpus(_) => SegmentMode::CorpusHeaders,
        }
    }
}

/// A contiguous run of input lines, `start_line..end_line` (0-based,
/// end exclusive). Blank separator lines belong to the preceding block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub index: usize,
    pub label: SectionLabel,
    pub start_line: usize,
    pub end_line: usize,
    pub text: String,
}

/// Section text by label. Blocks sharing a label are joined with a blank line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Sections(BTreeMap<SectionLabel, String>);

impl Sections {
    pub fn get(&self, label: SectionLabel) -> &str {
        self.0.get(&label).map(String::as_str).unwrap_or("")
    }

    pub fn contains(&self, label: SectionLabel) -> bool {
        self.0.contains_key(&label)
    }

    pub fn append(&mut self, label: SectionLabel, text: &str) {
        let text = text.trim_matches('\n');
        match self.0.get_mut(&label) {
            Some(existing) => {
                existing.push_str("\n\n");
                existing.push_str(text);
            }
            None => {
                self.0.insert(label, text.to_string());
            }
        }
    }

    pub fn labels(&self) -> impl Iterator<Item = SectionLabel> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Output of segmentation.
#[derive(Debug, Clone, Serialize)]
pub struct Segmentation {
    pub mode: SegmentMode,
    /// No boundary was found and the whole text became the header.
    pub degenerate: bool,
    pub blocks: Vec<Block>,
    pub sections: Sections,
}

/// Partition `text` into blocks and aggregate them into sections.
pub fn segment(text: &str, strategy: SegmentStrategy<'_>) -> Segmentation {
    let lines: Vec<&str> = text.split('\n').collect();

    let blocks = match strategy {
        SegmentStrategy::BlankLines => blank_lines::split_blocks(&lines),
        SegmentStrategy::Corpus(corpus) => corpus_headers::split_blocks(&lines, corpus),
    };

    let degenerate = match (&strategy, blocks.as_slice()) {
        (_, []) => true,
        (SegmentStrategy::BlankLines, [_]) => true,
        (SegmentStrategy::Corpus(_), [only]) => only.label == SectionLabel::Header,
        _ => false,
    };

    if degenerate {
        tracing::warn!(
            mode = %strategy.mode(),
            "no section boundaries found, treating whole text as header"
        );
        let block = Block {
            index: 0,
            label: SectionLabel::Header,
            start_line: 0,
            end_line: lines.len(),
            text: text.to_string(),
        };
        let mut sections = Sections::default();
        sections.append(SectionLabel::Header, text);
        return Segmentation {
            mode: strategy.mode(),
            degenerate,
            blocks: vec![block],
            sections,
        };
    }

    // In corpus mode the header is only what precedes the first match
    let first_feeds_header = matches!(strategy, SegmentStrategy::BlankLines);
    let mut sections = Sections::default();
    for block in &blocks {
        if first_feeds_header && block.index == 0 && block.label != SectionLabel::Header {
            // Identity fields sit next to whatever the first block is about.
            sections.append(SectionLabel::Header, &block.text);
        }
        sections.append(block.label, &block.text);
    }

    Segmentation {
        mode: strategy.mode(),
        degenerate,
        blocks,
        sections,
    }
}

/// Build a block from a line range.
pub(crate) fn make_block(lines: &[&str], index: usize, start: usize, end: usize, label: SectionLabel) -> Block {
    Block {
        index,
        label,
        start_line: start,
        end_line: end,
        text: lines[start..end].join("\n"),
    }
}
