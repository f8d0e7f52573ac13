use super::{is_date_range_line, split_by_whitespace_gaps};
use crate::model::{CertificationEntry, CertificationKind};
use regex::Regex;
use std::sync::LazyLock;

static DATED_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4}\.\d{2}(?:\.\d{2})?)\s+(.+)$").unwrap());

/// Endings of issuing-body names (한국산업인력공단, 대한상공회의소 ...).
const ISSUER_SUFFIXES: &[&str] = &["공단", "협회", "위원회", "재단", "센터", "회의소", "청", "원", "부"];

/// Substrings that mark a licence or certificate name.
const LICENCE_CUES: &[&str] = &["기사", "기능사", "1급", "2급", "면허", "자격"];

/// Column captions of form tables.
const CAPTION_CUES: &[&str] = &[
    "자격명",
    "발행기관",
    "발급기관",
    "취득일",
    "수상명",
    "수상기관",
    "수상내용",
    "등급",
    "해외연수국가",
];

/// Extract certification, language-score and award rows.
///
/// Undated rows after a `수상명` caption are awards until a `자격명`
/// caption switches back.
pub fn extract_certifications(block: &str) -> Vec<CertificationEntry> {
    let mut entries = Vec::new();
    let mut awards = false;

    for line in block.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if is_caption(line) {
            if line.contains("수상명") {
                awards = true;
            } else if line.contains("자격명") {
                awards = false;
            }
            continue;
        }
        let entry = dated_row(line).or_else(|| {
            if awards {
                award_row(line)
            } else {
                undated_form_row(line)
            }
        });
        entries.extend(entry);
    }
    entries
}

/// A table caption: a cell that is exactly a caption word, or two caption
/// words on one line. `1등급` in a data cell is neither.
fn is_caption(line: &str) -> bool {
    if DATED_ROW.is_match(line) {
        return false;
    }
    let exact_cell = split_by_whitespace_gaps(line)
        .iter()
        .any(|cell| CAPTION_CUES.contains(cell));
    exact_cell || CAPTION_CUES.iter().filter(|c| line.contains(*c)).count() >= 2
}

/// `2019.05  정보처리기사  한국산업인력공단`. A dated line with no further
/// structure still yields a name-only entry.
fn dated_row(line: &str) -> Option<CertificationEntry> {
    if is_date_range_line(line) {
        return None;
    }
    let caps = DATED_ROW.captures(line)?;
    let date = caps[1].to_string();
    let parts = split_by_whitespace_gaps(&caps[2]);

    let entry = match parts.as_slice() {
        [name, grade, issuer @ ..] if !issuer.is_empty() => CertificationEntry {
            date,
            name: name.to_string(),
            grade: Some(grade.to_string()),
            issuer: Some(issuer.join(" ")),
            ..Default::default()
        },
        [name, issuer] => CertificationEntry {
            date,
            name: name.to_string(),
            grade: None,
            issuer: Some(issuer.to_string()),
            ..Default::default()
        },
        _ => {
            let (name, issuer) = split_issuer_suffix(caps[2].trim());
            CertificationEntry {
                date,
                name,
                grade: None,
                issuer,
                ..Default::default()
            }
        }
    };
    Some(entry)
}

/// Single-spaced `정보처리기사 한국산업인력공단`: split off a trailing issuer.
fn split_issuer_suffix(text: &str) -> (String, Option<String>) {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    match tokens.split_last() {
        Some((last, name)) if !name.is_empty() && is_issuer(last) => {
            (name.join(" "), Some(last.to_string()))
        }
        _ => (text.to_string(), None),
    }
}

fn is_issuer(text: &str) -> bool {
    ISSUER_SUFFIXES.iter().any(|s| text.ends_with(s))
}

/// Form tables list `name  grade  issuer` without a date column.
fn undated_form_row(line: &str) -> Option<CertificationEntry> {
    let parts = split_by_whitespace_gaps(line);
    let [name, grade, issuer, ..] = parts.as_slice() else {
        return None;
    };
    let licence = LICENCE_CUES.iter().any(|c| name.contains(c));
    if !licence && !is_issuer(issuer) {
        return None;
    }
    Some(CertificationEntry {
        name: name.to_string(),
        grade: (!grade.is_empty()).then(|| grade.to_string()),
        issuer: Some(issuer.to_string()),
        ..Default::default()
    })
}

/// `수상명  수상기관  수상내용`: name and organisation, detail optional.
fn award_row(line: &str) -> Option<CertificationEntry> {
    let parts = split_by_whitespace_gaps(line);
    let [name, organisation, detail @ ..] = parts.as_slice() else {
        return None;
    };
    Some(CertificationEntry {
        kind: CertificationKind::Award,
        name: name.to_string(),
        issuer: Some(organisation.to_string()),
        detail: (!detail.is_empty()).then(|| detail.join(" ")),
        ..Default::default()
    })
}
