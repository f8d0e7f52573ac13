use iryeok_core::error::IryeokError;
use iryeok_core::model::PipelineOutcome;
use std::path::Path;

pub fn print(outcome: &PipelineOutcome) -> Result<(), IryeokError> {
    let json = serde_json::to_string_pretty(outcome)?;
    println!("{json}");
    Ok(())
}

pub fn write(path: &Path, outcome: &PipelineOutcome) -> Result<(), IryeokError> {
    let json = serde_json::to_string_pretty(outcome)?;
    std::fs::write(path, json)?;
    Ok(())
}
