use iryeok_core::error::IryeokError;
use iryeok_core::model::PipelineOutcome;
use iryeok_core::segment::SegmentMode;
use iryeok_core::PipelineOptions;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::output;

pub struct ParseArgs {
    pub pdftotext: Option<PathBuf>,
    pub timeout: u64,
    pub debug_dir: Option<PathBuf>,
    pub use_corpus_headers: bool,
    pub headers: Option<PathBuf>,
    pub photo_dir: Option<PathBuf>,
}

/// Run the pipeline on one file and emit exactly one record. Returns
/// whether the record was a success.
pub fn run(
    input_file: &Path,
    args: ParseArgs,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<bool, IryeokError> {
    let options = PipelineOptions {
        pdftotext_path: args.pdftotext,
        pdftotext_timeout: Duration::from_secs(args.timeout),
        segment_mode: if args.use_corpus_headers {
            SegmentMode::CorpusHeaders
        } else {
            SegmentMode::BlankLines
        },
        header_corpus_path: args.headers,
        debug_dir: args.debug_dir,
        photo_dir: args.photo_dir,
        ..Default::default()
    };
    let chain = options.engine_chain();
    let outcome = iryeok_core::run(input_file, &chain, &options);

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            output::json::write(&path, &outcome)?;
            match &outcome {
                PipelineOutcome::Success(record) => eprintln!(
                    "Parsed {} career(s), {} education entr(ies), written to {}",
                    record.careers.len(),
                    record.education.len(),
                    path.display()
                ),
                PipelineOutcome::Failure(e) => {
                    eprintln!("Failed: {}, written to {}", e.error, path.display())
                }
            }
        }
        None => match (&outcome, output_format) {
            (PipelineOutcome::Success(record), "table") => {
                println!("{}", output::table::format_record(record));
            }
            _ => output::json::print(&outcome)?,
        },
    }

    Ok(outcome.is_success())
}
