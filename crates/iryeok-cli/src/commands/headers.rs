use iryeok_core::corpus;
use iryeok_core::error::IryeokError;
use std::collections::HashSet;
use std::path::Path;

use crate::output;

pub fn validate(file: &Path) -> Result<(), IryeokError> {
    let corpus = corpus::load_corpus(file)?;

    println!("Header corpus '{}' is valid.", file.display());
    println!("  Headers: {}", corpus.len());

    // Potential issues (warnings, not errors)
    let mut warnings = Vec::new();
    let mut seen = HashSet::new();
    for candidate in &corpus.candidates {
        if !seen.insert(candidate.text.as_str()) {
            warnings.push(format!("header '{}' is listed more than once", candidate.text));
        }
        if candidate.trailing_min_empty_lines == 0 {
            warnings.push(format!(
                "header '{}' needs no trailing blank lines and will also match table cells",
                candidate.text
            ));
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }
    Ok(())
}

pub fn show(file: &Path) -> Result<(), IryeokError> {
    let corpus = corpus::load_corpus(file)?.with_career_detail_amendment();
    println!("{}", output::table::format_corpus(&corpus));
    Ok(())
}
