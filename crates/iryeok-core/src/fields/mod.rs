//! Field extractors, one per section type.
//!
//! Every extractor is a pure function of section text. Cross-section
//! reconciliation happens in the assembler, not here.

pub mod basic;
pub mod career;
pub mod certification;
pub mod education;
pub mod narrative;
pub mod preference;
pub mod summary;

use regex::Regex;
use std::sync::LazyLock;

/// `YYYY.MM ~ YYYY.MM`, `YYYY.MM ~ 재직중`, and the form layouts that use a
/// dash or only whitespace between the two dates.
pub(crate) static DATE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4}\.\d{2})\s*(?:[~\-–]\s*)?(재직중|현재|\d{4}\.\d{2})").unwrap()
});

/// A line opening with a date range, with the rest of the line captured.
pub(crate) static DATE_RANGE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}\.\d{2})\s*(?:[~\-–]\s*)?(재직중|현재|\d{4}\.\d{2})(?:\s+(.*))?$").unwrap()
});

/// Split result of a date-range line.
pub(crate) struct DatedLine<'a> {
    pub start: &'a str,
    pub end: &'a str,
    pub rest: &'a str,
}

pub(crate) fn parse_dated_line(line: &str) -> Option<DatedLine<'_>> {
    let caps = DATE_RANGE_LINE.captures(line.trim())?;
    Some(DatedLine {
        start: caps.get(1)?.as_str(),
        end: caps.get(2)?.as_str(),
        rest: caps.get(3).map(|m| m.as_str().trim()).unwrap_or(""),
    })
}

pub(crate) fn is_date_range_line(line: &str) -> bool {
    DATE_RANGE_LINE.is_match(line.trim())
}

/// Split a line by gaps of 2+ whitespace characters.
///
/// Column boundaries in `pdftotext -layout` output are runs of spaces, while
/// single spaces stay inside a cell.
pub(crate) fn split_by_whitespace_gaps(line: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = None;
    let mut gap_start = 0;
    let mut space_count = 0;

    for (i, c) in line.char_indices() {
        if c.is_whitespace() {
            if space_count == 0 {
                gap_start = i;
            }
            space_count += 1;
            if space_count == 2 {
                if let Some(s) = start {
                    segments.push(&line[s..gap_start]);
                    start = None;
                }
            }
        } else {
            if start.is_none() {
                start = Some(i);
            }
            space_count = 0;
        }
    }

    if let Some(s) = start {
        segments.push(line[s..].trim_end());
    }

    segments
}

/// Value following `label` on a line, cut at the next 3+ space gap.
pub(crate) fn extract_after_label(line: &str, label: &str) -> Option<String> {
    let idx = line.find(label)?;
    let after = &line[idx + label.len()..];
    let trimmed = after.trim_start_matches(|c: char| c == ':' || c.is_whitespace());
    let value = match trimmed.find("   ") {
        Some(gap_pos) => trimmed[..gap_pos].trim(),
        None => trimmed.trim(),
    };
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Strip bullet glyphs used by form layouts (`▣ 학력사항`, `■ 경력`).
pub(crate) fn strip_bullets(line: &str) -> &str {
    line.trim()
        .trim_start_matches(['▣', '■', '□', '●', '◆', '◇', '○', '※', '-', '*', '·'])
        .trim_start()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_by_whitespace_gaps() {
        assert_eq!(
            split_by_whitespace_gaps("  서울고등학교   졸업  전자계산기과 "),
            vec!["서울고등학교", "졸업", "전자계산기과"]
        );
        assert_eq!(split_by_whitespace_gaps("ACME 주식회사"), vec!["ACME 주식회사"]);
    }

    #[test]
    fn test_split_keeps_wide_whitespace_boundaries() {
        // U+3000 is three bytes wide.
        assert_eq!(split_by_whitespace_gaps("자바\u{3000}\u{3000}파이썬"), vec!["자바", "파이썬"]);
    }

    #[test]
    fn test_dated_line_variants() {
        let d = parse_dated_line("2018.01 ~ 재직중  ACME · 백엔드개발").unwrap();
        assert_eq!((d.start, d.end, d.rest), ("2018.01", "재직중", "ACME · 백엔드개발"));

        let d = parse_dated_line("2015.03 - 2019.02").unwrap();
        assert_eq!((d.start, d.end, d.rest), ("2015.03", "2019.02", ""));

        let d = parse_dated_line("   2015.03    2019.02   한국대학교").unwrap();
        assert_eq!(d.rest, "한국대학교");

        assert!(parse_dated_line("2019.05  정보처리기사").is_none());
    }

    #[test]
    fn test_extract_after_label_truncates_at_gap() {
        assert_eq!(
            extract_after_label("주소 : 서울시 강남구    휴대폰 010-1234-5678", "주소"),
            Some("서울시 강남구".to_string())
        );
        assert_eq!(extract_after_label("주소 :", "주소"), None);
    }

    #[test]
    fn test_strip_bullets() {
        assert_eq!(strip_bullets("  ▣ 학력사항"), "학력사항");
        assert_eq!(strip_bullets("경력"), "경력");
    }
}
