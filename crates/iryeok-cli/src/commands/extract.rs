use iryeok_core::error::IryeokError;
use iryeok_core::extraction::EngineChain;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub fn run(
    input_file: &Path,
    pdftotext: Option<PathBuf>,
    timeout: u64,
    output_file: Option<PathBuf>,
) -> Result<(), IryeokError> {
    let chain = EngineChain::default_chain(pdftotext, Duration::from_secs(timeout));
    let raw = chain.extract_file(input_file)?;

    for diagnostic in &raw.diagnostics {
        eprintln!("  skipped {}", diagnostic);
    }
    eprintln!(
        "engine: {} ({}), {} characters",
        raw.engine,
        raw.backend,
        raw.char_count()
    );

    match output_file {
        Some(path) => std::fs::write(&path, &raw.text)?,
        None => print!("{}", raw.text),
    }
    Ok(())
}
