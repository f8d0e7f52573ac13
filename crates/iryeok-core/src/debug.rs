//! Per-document debug artifacts for inspecting the intermediate stages.

use crate::error::IryeokError;
use crate::extraction::{EngineTag, RawDocument};
use crate::segment::{Block, Sections, SegmentMode, Segmentation};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const RAW_SUFFIX: &str = "stage1_raw.txt";
pub const META_SUFFIX: &str = "stage1_meta.json";
pub const SEGMENTS_SUFFIX: &str = "stage2_segments.json";

/// Extraction metadata written next to the raw text.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionMeta<'a> {
    pub engine: EngineTag,
    pub backend: &'a str,
    pub char_count: usize,
    pub diagnostics: &'a [String],
}

/// Segmentation result as written to disk.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentsDump<'a> {
    pub mode: SegmentMode,
    pub degenerate: bool,
    pub blocks: &'a [Block],
    pub sections: &'a Sections,
}

/// Write `<stem>.stage1_raw.txt`, `<stem>.stage1_meta.json` and
/// `<stem>.stage2_segments.json` into `dir`, returning the paths written.
pub fn write_artifacts(
    dir: &Path,
    stem: &str,
    raw: &RawDocument,
    segmentation: &Segmentation,
) -> Result<Vec<PathBuf>, IryeokError> {
    std::fs::create_dir_all(dir)?;

    let raw_path = dir.join(format!("{}.{}", stem, RAW_SUFFIX));
    let annotated = format!("# engine: {} ({})\n{}", raw.engine, raw.backend, raw.text);
    std::fs::write(&raw_path, annotated)?;

    let meta = ExtractionMeta {
        engine: raw.engine,
        backend: &raw.backend,
        char_count: raw.char_count(),
        diagnostics: &raw.diagnostics,
    };
    let meta_path = dir.join(format!("{}.{}", stem, META_SUFFIX));
    std::fs::write(&meta_path, serde_json::to_string_pretty(&meta)?)?;

    let dump = SegmentsDump {
        mode: segmentation.mode,
        degenerate: segmentation.degenerate,
        blocks: &segmentation.blocks,
        sections: &segmentation.sections,
    };
    let segments_path = dir.join(format!("{}.{}", stem, SEGMENTS_SUFFIX));
    std::fs::write(&segments_path, serde_json::to_string_pretty(&dump)?)?;

    tracing::debug!(dir = %dir.display(), stem, "wrote debug artifacts");
    Ok(vec![raw_path, meta_path, segments_path])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::{segment, SegmentStrategy};

    #[test]
    fn test_artifacts_written() {
        let text = "홍길동 경력\n\n\n\n자기소개서\n안녕하세요";
        let raw = RawDocument {
            text: text.to_string(),
            engine: EngineTag::Secondary,
            backend: "pdf-extract".to_string(),
            diagnostics: vec!["pdftotext: not found".to_string()],
        };
        let seg = segment(text, SegmentStrategy::BlankLines);
        let dir = tempfile::tempdir().unwrap();

        let paths = write_artifacts(dir.path(), "cv", &raw, &seg).unwrap();
        assert_eq!(paths.len(), 3);

        let raw_text = std::fs::read_to_string(&paths[0]).unwrap();
        assert!(raw_text.starts_with("# engine: secondary (pdf-extract)\n홍길동"));

        let meta: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&paths[1]).unwrap()).unwrap();
        assert_eq!(meta["engine"], "secondary");
        assert_eq!(meta["char_count"], text.chars().count());

        let segments: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&paths[2]).unwrap()).unwrap();
        assert_eq!(segments["mode"], "blank_lines");
        assert_eq!(segments["blocks"][1]["label"], "self_introduction");
        assert_eq!(segments["sections"]["self_introduction"], "자기소개서\n안녕하세요");
    }
}
