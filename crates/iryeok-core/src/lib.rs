pub mod corpus;
pub mod debug;
pub mod error;
pub mod extraction;
pub mod fields;
pub mod model;
pub mod photo;
pub mod segment;

use error::{panic_message, IryeokError};
use extraction::{read_pdf, EngineChain};
use fields::narrative::{self, CAREER_DETAIL_HEADERS, SELF_INTRO_HEADERS, SKILLS_MARKER};
use fields::summary::{extract_summary, CareerSummary};
use model::{ErrorRecord, PipelineOutcome, ResumeRecord};
use segment::{SectionLabel, SegmentMode, SegmentStrategy, Segmentation};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Alternate pdftotext executable.
    pub pdftotext_path: Option<PathBuf>,
    pub pdftotext_timeout: Duration,
    pub segment_mode: SegmentMode,
    /// HeaderCorpus artifact; the conventional location is tried when unset.
    pub header_corpus_path: Option<PathBuf>,
    pub debug_dir: Option<PathBuf>,
    pub photo_dir: Option<PathBuf>,
    pub photo_footprint: (u32, u32),
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            pdftotext_path: None,
            pdftotext_timeout: extraction::pdftotext::DEFAULT_TIMEOUT,
            segment_mode: SegmentMode::default(),
            header_corpus_path: None,
            debug_dir: None,
            photo_dir: None,
            photo_footprint: photo::DEFAULT_PHOTO_FOOTPRINT,
        }
    }
}

impl PipelineOptions {
    /// The default engine chain for these options.
    pub fn engine_chain(&self) -> EngineChain {
        EngineChain::default_chain(self.pdftotext_path.clone(), self.pdftotext_timeout)
    }
}

/// Main API entry point: turn one résumé PDF into a record.
///
/// Extraction failure and an unloadable explicit corpus are errors; every
/// other stage recovers locally.
pub fn parse_pdf(
    path: &Path,
    chain: &EngineChain,
    options: &PipelineOptions,
) -> Result<ResumeRecord, IryeokError> {
    let bytes = read_pdf(path)?;
    let raw = chain.extract(&bytes, path)?;
    tracing::debug!(
        file = %path.display(),
        engine = %raw.engine,
        backend = %raw.backend,
        chars = raw.char_count(),
        "extracted text"
    );

    // Corpus mode silently degrades when no artifact is available
    let corpus = match options.segment_mode {
        SegmentMode::CorpusHeaders => {
            corpus::resolve_corpus(options.header_corpus_path.as_deref())?
                .map(|c| c.with_career_detail_amendment())
        }
        SegmentMode::BlankLines => None,
    };
    let strategy = match &corpus {
        Some(c) => SegmentStrategy::Corpus(c),
        None => SegmentStrategy::BlankLines,
    };
    let segmentation = segment::segment(&raw.text, strategy);

    let stem = file_stem(path);
    if let Some(dir) = &options.debug_dir {
        if let Err(e) = debug::write_artifacts(dir, &stem, &raw, &segmentation) {
            tracing::warn!(dir = %dir.display(), error = %e, "could not write debug artifacts");
        }
    }

    let mut record = assemble(&raw.text, &segmentation);

    if let Some(dir) = &options.photo_dir {
        match photo::locate_profile_photo(&bytes, options.photo_footprint, dir, &stem) {
            Ok(filename) => record.profile_photo_filename = filename,
            Err(e) => tracing::warn!(error = %e, "profile photo lookup failed"),
        }
    }

    Ok(record)
}

/// Segment already-extracted text and assemble the record.
pub fn parse_text(text: &str, strategy: SegmentStrategy<'_>) -> ResumeRecord {
    let segmentation = segment::segment(text, strategy);
    assemble(text, &segmentation)
}

/// Run the pipeline and fold every failure, panics included, into an
/// error record.
pub fn run(path: &Path, chain: &EngineChain, options: &PipelineOptions) -> PipelineOutcome {
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        parse_pdf(path, chain, options)
    }));

    match result {
        Ok(Ok(record)) => PipelineOutcome::Success(Box::new(record)),
        Ok(Err(e)) => {
            tracing::error!(file = %path.display(), error = %e, "pipeline failed");
            PipelineOutcome::Failure(ErrorRecord {
                error: e.to_string(),
                traceback: source_chain(&e),
            })
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            let e = IryeokError::Unexpected(format!("{} while processing {}", message, path.display()));
            tracing::error!(file = %path.display(), error = %e, "pipeline panicked");
            PipelineOutcome::Failure(ErrorRecord {
                error: e.to_string(),
                traceback: Some(format!("panic: {}", message)),
            })
        }
    }
}

/// Run every field extractor over its section and merge the results.
fn assemble(text: &str, segmentation: &Segmentation) -> ResumeRecord {
    let sections = &segmentation.sections;
    let strip_header = segmentation.mode == SegmentMode::CorpusHeaders;

    let header = sections.get(SectionLabel::Header);
    let career = sections.get(SectionLabel::CareerSummary);

    let mut basic_info = fields::basic::extract_basic_info(header);

    // Header first, then the career section, then everything above the skills list
    let summary = extract_summary(header)
        .or(extract_summary(career))
        .or(above_skills(text).map(extract_summary).unwrap_or_default());
    apply_summary(&mut basic_info, summary);

    let career_detail = narrative::narrative_text(
        sections.get(SectionLabel::CareerDetailContent),
        CAREER_DETAIL_HEADERS,
        strip_header,
    );

    ResumeRecord {
        basic_info,
        skills: narrative::extract_skills(sections.get(SectionLabel::Skills), text),
        careers: fields::career::extract_careers(career),
        education: fields::education::extract_education(sections.get(SectionLabel::EducationHeader)),
        certifications: fields::certification::extract_certifications(
            sections.get(SectionLabel::Certifications),
        ),
        employment_preference: fields::preference::extract_preference(
            sections.get(SectionLabel::EmploymentPreference),
        ),
        self_introduction: narrative::narrative_text(
            sections.get(SectionLabel::SelfIntroduction),
            SELF_INTRO_HEADERS,
            strip_header,
        ),
        career_detail_content: (!career_detail.is_empty()).then_some(career_detail),
        portfolio: narrative::extract_portfolio(sections.get(SectionLabel::Portfolio)),
        profile_photo_filename: None,
    }
}

/// Summary figures only fill fields basic-info extraction left empty.
fn apply_summary(info: &mut model::BasicInfo, summary: CareerSummary) {
    if info.total_career.is_none() {
        info.total_career = summary.total_career;
    }
    if info.desired_salary.is_none() {
        info.desired_salary = summary.desired_salary;
    }
    if info.last_salary.is_none() {
        info.last_salary = summary.last_salary;
    }
}

fn above_skills(text: &str) -> Option<&str> {
    text.find(SKILLS_MARKER).map(|idx| &text[..idx])
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}

fn source_chain(e: &IryeokError) -> Option<String> {
    let mut causes = Vec::new();
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        causes.push(cause.to_string());
        source = std::error::Error::source(cause);
    }
    (!causes.is_empty()).then(|| causes.join("\ncaused by: "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = PipelineOptions::default();
        assert_eq!(options.segment_mode, SegmentMode::BlankLines);
        assert_eq!(options.photo_footprint, (120, 160));
        assert_eq!(options.pdftotext_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_summary_does_not_override_basic_info() {
        let mut info = model::BasicInfo {
            desired_salary: Some("5000만원".into()),
            ..Default::default()
        };
        apply_summary(
            &mut info,
            CareerSummary {
                desired_salary: Some("4500만원".into()),
                total_career: Some("3년".into()),
                last_salary: None,
            },
        );
        assert_eq!(info.desired_salary.as_deref(), Some("5000만원"));
        assert_eq!(info.total_career.as_deref(), Some("3년"));
        assert_eq!(info.last_salary, None);
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem(Path::new("/tmp/홍길동_이력서.pdf")), "홍길동_이력서");
    }

    #[test]
    fn test_io_error_traceback() {
        let e = IryeokError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert_eq!(source_chain(&e).as_deref(), Some("disk"));
        assert_eq!(source_chain(&IryeokError::EmptyOutput), None);
    }
}
