use super::split_by_whitespace_gaps;
use regex::Regex;
use std::sync::LazyLock;

/// Marker line of the skills list on free-form layouts.
pub const SKILLS_MARKER: &str = "나의 스킬";

static SKILLS_AFTER_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"나의 스킬[^\n]*\n").unwrap());

const SKILLS_HEADERS: &[&str] = &["나의 스킬", "스킬", "보유기술", "보유 기술"];
const PORTFOLIO_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".pdf", ".doc", ".docx"];

pub const SELF_INTRO_HEADERS: &[&str] = &["자기소개서", "자기소개", "간략 소개", "간략소개"];
pub const CAREER_DETAIL_HEADERS: &[&str] = &["경력기술서", "경 력 기 술 서", "경력 기술서"];

/// Skill tokens, split on column gaps.
///
/// Reads the skills section when there is one, otherwise the lines after
/// the `나의 스킬` marker up to the career total or a wide blank gap.
pub fn extract_skills(section: &str, full_text: &str) -> Vec<String> {
    let region = if section.trim().is_empty() {
        skills_after_marker(full_text)
    } else {
        strip_leading_header(section, SKILLS_HEADERS)
    };

    region
        .lines()
        .flat_map(split_by_whitespace_gaps)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn skills_after_marker(text: &str) -> &str {
    let Some(m) = SKILLS_AFTER_MARKER.find(text) else {
        return "";
    };
    let rest = &text[m.end()..];
    let end = [rest.find("경력 총"), rest.find("\n\n\n\n")]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(rest.len());
    &rest[..end]
}

/// Attachment file names listed in the portfolio section.
pub fn extract_portfolio(section: &str) -> Vec<String> {
    section
        .lines()
        .flat_map(split_by_whitespace_gaps)
        .map(str::trim)
        .filter(|s| {
            let lower = s.to_lowercase();
            PORTFOLIO_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
        })
        .map(str::to_string)
        .collect()
}

/// Free text of a narrative section, trimmed. With `strip_header` the
/// leading header word is removed.
pub fn narrative_text(section: &str, headers: &[&str], strip_header: bool) -> String {
    if strip_header {
        strip_leading_header(section, headers).trim().to_string()
    } else {
        section.trim().to_string()
    }
}

/// Text after the first matching header word at the start of `section`.
fn strip_leading_header<'a>(section: &'a str, headers: &[&str]) -> &'a str {
    let trimmed = section.trim_start();
    headers
        .iter()
        .find_map(|h| trimmed.strip_prefix(h))
        .unwrap_or(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skills_from_section() {
        let skills = extract_skills("나의 스킬\nJava  Spring Boot   SQL\n협업", "");
        assert_eq!(skills, vec!["Java", "Spring Boot", "SQL", "협업"]);
    }

    #[test]
    fn test_skills_fallback_bounded_by_career_total() {
        let text = "홍길동 경력\n나의 스킬\nPython  Django\n경력 총 3년\n2018.01 ~ 재직중  ACME · 개발";
        assert_eq!(extract_skills("", text), vec!["Python", "Django"]);
        assert!(extract_skills("", "스킬 없음").is_empty());
    }

    #[test]
    fn test_portfolio_file_names() {
        let section = "포트폴리오 및 기타문서\n포트폴리오.PDF   작품사진.jpg\n링크 https://example.com";
        assert_eq!(extract_portfolio(section), vec!["포트폴리오.PDF", "작품사진.jpg"]);
    }

    #[test]
    fn test_narrative_header_stripping() {
        let section = "\n자기소개서\n\n성실한 개발자입니다.\n";
        assert_eq!(
            narrative_text(section, SELF_INTRO_HEADERS, true),
            "성실한 개발자입니다."
        );
        assert_eq!(
            narrative_text(section, SELF_INTRO_HEADERS, false),
            "자기소개서\n\n성실한 개발자입니다."
        );
    }
}
