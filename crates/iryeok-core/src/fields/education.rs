use super::{is_date_range_line, parse_dated_line, strip_bullets, DATE_RANGE};
use crate::model::{EducationEntry, Gpa};
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

/// `3.8/4.5`, not glued to other digits or dots.
static GPA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\d.])(\d\.\d{1,2})\s*/\s*(\d\.\d{1,2})(?:$|[^\d.])").unwrap()
});

/// Closed set of degree-status labels.
pub const DEGREE_STATUSES: &[&str] = &["졸업예정", "졸업", "재학", "휴학", "중퇴", "수료"];

/// High-school track annotations that are neither school nor major.
const TRACK_TOKENS: &[&str] = &["전문(실업)계", "전문계", "실업계", "인문계"];

const INSTITUTION_SUFFIXES: &[&str] = &["학교", "대학", "대학원", "고교", "학원"];

/// Lines after an entry searched for a GPA that was not on the entry line.
const GPA_SCAVENGE_LINES: usize = 3;

/// Extract education entries.
///
/// Falls back to a single undated entry when the section names a degree
/// status but has no date range at all.
pub fn extract_education(block: &str) -> Vec<EducationEntry> {
    let lines: Vec<&str> = block.lines().collect();
    let mut entries = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let Some(dated) = parse_dated_line(line) else {
            continue;
        };
        let mut entry = parse_row(dated.rest);
        entry.start_date = dated.start.to_string();
        entry.end_date = dated.end.to_string();
        if entry.gpa.is_none() {
            entry.gpa = scavenge_gpa(&lines[i + 1..]);
        }
        entries.push(entry);
    }

    if entries.is_empty() && !DATE_RANGE.is_match(block) {
        if let Some(entry) = undated_entry(&lines) {
            entries.push(entry);
        }
    }

    entries
}

/// School, major, degree, GPA and location from the text of one row.
fn parse_row(rest: &str) -> EducationEntry {
    let (before, after, gpa) = match find_gpa(rest) {
        Some((gpa, start, end)) => (&rest[..start], &rest[end..], Some(gpa)),
        None => (rest, "", None),
    };

    let mut degree = None;
    let mut keep = |tok: &&str| {
        if TRACK_TOKENS.contains(tok) || *tok == "/" {
            return false;
        }
        if DEGREE_STATUSES.contains(tok) {
            degree.get_or_insert(tok.to_string());
            return false;
        }
        true
    };
    let leading: Vec<&str> = before.split_whitespace().filter(&mut keep).collect();
    let trailing: Vec<&str> = after.split_whitespace().filter(&mut keep).collect();

    let (school, major) = split_school(&leading);
    EducationEntry {
        school,
        major,
        degree: degree.unwrap_or_default(),
        gpa,
        location: (!trailing.is_empty()).then(|| trailing.join(" ")),
        ..Default::default()
    }
}

/// School name is everything up to the first institution-suffixed token,
/// or the first token when none has a suffix.
fn split_school(tokens: &[&str]) -> (String, String) {
    let cut = tokens
        .iter()
        .position(|t| INSTITUTION_SUFFIXES.iter().any(|s| t.ends_with(s)))
        .map(|p| p + 1)
        .unwrap_or(tokens.len().min(1));
    (tokens[..cut].join(" "), tokens[cut..].join(" "))
}

/// GPA and the byte span it occupies in `text`.
fn find_gpa(text: &str) -> Option<(Gpa, usize, usize)> {
    let caps = GPA.captures(text)?;
    let score = caps.get(1)?;
    let max = caps.get(2)?;
    let gpa = Gpa {
        score: Decimal::from_str(score.as_str()).ok()?,
        max: Decimal::from_str(max.as_str()).ok()?,
    };
    Some((gpa, score.start(), max.end()))
}

/// GPA from the lines following an entry, never past the next entry's row.
fn scavenge_gpa(following: &[&str]) -> Option<Gpa> {
    following
        .iter()
        .take(GPA_SCAVENGE_LINES)
        .take_while(|l| !is_date_range_line(l))
        .find_map(|l| find_gpa(l).map(|(gpa, _, _)| gpa))
}

fn undated_entry(lines: &[&str]) -> Option<EducationEntry> {
    let line = lines.iter().find(|l| {
        l.split_whitespace()
            .any(|tok| DEGREE_STATUSES.contains(&tok))
    })?;
    let text = strip_bullets(line);
    let text = text.strip_prefix("학력사항").or_else(|| text.strip_prefix("학력")).unwrap_or(text);
    Some(parse_row(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_high_school_row() {
        let entries = extract_education("2019.03 ~ 2020.02   서울고등학교 졸업");
        assert_eq!(
            entries,
            vec![EducationEntry {
                start_date: "2019.03".into(),
                end_date: "2020.02".into(),
                school: "서울고등학교".into(),
                degree: "졸업".into(),
                major: "".into(),
                gpa: None,
                location: None,
            }]
        );
    }

    #[test]
    fn test_track_tokens_are_skipped() {
        let e = &extract_education("2008.03 ~ 2011.02  한빛고등학교 전문(실업)계 전자계산기과 졸업")[0];
        assert_eq!(e.school, "한빛고등학교");
        assert_eq!(e.major, "전자계산기과");
        assert_eq!(e.degree, "졸업");
    }

    #[test]
    fn test_inline_gpa_and_location() {
        let e = &extract_education("2010.03  2014.02  한국대학교  컴퓨터공학  3.80/4.5  서울  졸업")[0];
        assert_eq!(e.school, "한국대학교");
        assert_eq!(e.major, "컴퓨터공학");
        assert_eq!(e.degree, "졸업");
        assert_eq!(e.location.as_deref(), Some("서울"));
        let gpa = e.gpa.unwrap();
        assert_eq!(gpa.score, dec!(3.80));
        assert_eq!(gpa.score.to_string(), "3.80");
        assert_eq!(gpa.max, dec!(4.5));
    }

    #[test]
    fn test_gpa_scavenged_from_following_line() {
        let block = "2014.03 ~ 2018.02  한국대학교 경영학과 졸업\n학점 3.5 / 4.5";
        let e = &extract_education(block)[0];
        assert_eq!(e.gpa.map(|g| g.to_string()).as_deref(), Some("3.5/4.5"));
    }

    #[test]
    fn test_gpa_scavenging_stops_at_next_entry() {
        let block = "\
2011.03 ~ 2014.02  서울고등학교 졸업
2014.03 ~ 2018.02  한국대학교 경영학과 졸업
3.9/4.5";
        let entries = extract_education(block);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].gpa, None);
        assert_eq!(entries[1].gpa.map(|g| g.score), Some(dec!(3.9)));
    }

    #[test]
    fn test_scavenging_is_bounded() {
        let block = "2014.03 ~ 2018.02  한국대학교 졸업\n\n\n\n3.9/4.5";
        assert_eq!(extract_education(block)[0].gpa, None);
    }

    #[test]
    fn test_undated_degree_fallback() {
        let entries = extract_education("학력  고등학교 졸업");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].school, "고등학교");
        assert_eq!(entries[0].degree, "졸업");
        assert_eq!(entries[0].start_date, "");
    }

    #[test]
    fn test_no_entries_without_dates_or_degree() {
        assert!(extract_education("학력\n자료 없음").is_empty());
    }
}
