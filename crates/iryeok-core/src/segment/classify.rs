//! Content-based section labeling.
//!
//! Both tables below are evaluated top to bottom and the first hit wins.

use super::SectionLabel;
use crate::fields::{strip_bullets, DATE_RANGE};
use regex::Regex;
use std::sync::LazyLock;

/// Non-blank lines inspected when labeling a block.
const HEAD_LINES: usize = 5;

/// Blocks at least this long without a leading date read as prose.
const PROSE_MIN_LINES: usize = 5;
const PROSE_MIN_CHARS: usize = 200;

static DATED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}\.\d{2}(?:\.\d{2})?\s+\S").unwrap());

/// Contact labels and the `남, 1991` gender/birth-year line.
static IDENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@|이메일|휴대폰|연락처|\(한글\)|성\s*명|(?:남|여)\s*[,/]\s*\d{4}").unwrap()
});

/// Heading lines are short; longer lines are prose even when they open
/// with a keyword.
const HEADING_MAX_CHARS: usize = 35;

/// Endings a heading may attach to its keyword (학력사항, 자기소개서, 자격증).
const HEADING_SUFFIXES: &[&str] = &["사항", "내역", "경력", "능력", "서", "증"];

/// Header keywords. A head line is a heading when it is a keyword, optionally
/// followed by a heading suffix, and then ends or continues after a delimiter.
const KEYWORDS: &[(&[&str], SectionLabel)] = &[
    (
        &["경력기술서", "경 력 기 술 서", "경력 기술서", "경력기술"],
        SectionLabel::CareerDetailContent,
    ),
    (&["경력 총", "경력사항", "경력"], SectionLabel::CareerSummary),
    (&["학력"], SectionLabel::EducationHeader),
    (&["나의 스킬", "스킬", "보유기술", "보유 기술"], SectionLabel::Skills),
    (&["자격", "어학", "수상"], SectionLabel::Certifications),
    (&["취업우대", "병역"], SectionLabel::EmploymentPreference),
    (&["포트폴리오"], SectionLabel::Portfolio),
    (&["자기소개", "간략 소개", "간략소개"], SectionLabel::SelfIntroduction),
];

const INSTITUTION_TOKENS: &[&str] = &["학교", "대학", "대학교", "고등학교", "대학원"];

/// What the pattern rules look at.
struct BlockView<'a> {
    head: Vec<&'a str>,
    non_blank: usize,
    chars: usize,
}

impl<'a> BlockView<'a> {
    fn new(lines: &[&'a str]) -> Self {
        let non_blank: Vec<&'a str> = lines
            .iter()
            .copied()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        BlockView {
            head: non_blank.iter().take(HEAD_LINES).copied().collect(),
            non_blank: non_blank.len(),
            chars: non_blank.iter().map(|l| l.chars().count()).sum(),
        }
    }

    fn has_date_range(&self) -> bool {
        self.head.iter().any(|l| DATE_RANGE.is_match(l))
    }

    fn has_institution(&self) -> bool {
        self.head
            .iter()
            .any(|l| INSTITUTION_TOKENS.iter().any(|t| l.contains(t)))
    }

    fn has_dated_line(&self) -> bool {
        self.head.iter().any(|l| DATED_LINE.is_match(l))
    }

    fn leads_with_date(&self) -> bool {
        self.head
            .first()
            .is_some_and(|l| l.starts_with(|c: char| c.is_ascii_digit()))
    }
}

type Rule = (fn(&BlockView) -> bool, SectionLabel);

fn identity(p: &BlockView) -> bool {
    p.head.iter().any(|l| IDENTITY.is_match(l))
}

fn dated_institution(p: &BlockView) -> bool {
    p.has_date_range() && p.has_institution()
}

fn dated_range(p: &BlockView) -> bool {
    p.has_date_range()
}

fn mentions_military(p: &BlockView) -> bool {
    p.head.iter().any(|l| l.contains("병역"))
}

fn dated_rows(p: &BlockView) -> bool {
    p.has_dated_line()
}

fn prose(p: &BlockView) -> bool {
    !p.leads_with_date() && (p.non_blank >= PROSE_MIN_LINES || p.chars >= PROSE_MIN_CHARS)
}

/// Cue rules for blocks without a header keyword. Institution tokens are
/// checked before plain date ranges: a school row also carries a range.
const CUES: &[Rule] = &[
    (identity, SectionLabel::Header),
    (dated_institution, SectionLabel::EducationHeader),
    (dated_range, SectionLabel::CareerSummary),
    (mentions_military, SectionLabel::EmploymentPreference),
    (dated_rows, SectionLabel::Certifications),
    (prose, SectionLabel::SelfIntroduction),
];

fn keyword_label(line: &str) -> Option<SectionLabel> {
    let line = strip_bullets(line);
    if line.chars().count() > HEADING_MAX_CHARS {
        return None;
    }
    KEYWORDS
        .iter()
        .find(|(words, _)| {
            words
                .iter()
                .any(|w| line.strip_prefix(w).is_some_and(is_heading_rest))
        })
        .map(|(_, label)| *label)
}

/// What may follow a keyword on a heading line.
fn is_heading_rest(rest: &str) -> bool {
    let rest = HEADING_SUFFIXES
        .iter()
        .find_map(|s| rest.strip_prefix(s))
        .unwrap_or(rest);
    match rest.chars().next() {
        None => true,
        Some(c) => c.is_whitespace() || matches!(c, '/' | ':' | '(' | '·' | ','),
    }
}

/// Label a blank-line block from its first few non-blank lines.
pub fn classify_block(lines: &[&str]) -> SectionLabel {
    let view = BlockView::new(lines);
    if let Some(label) = view.head.iter().find_map(|l| keyword_label(l)) {
        return label;
    }
    CUES.iter()
        .find(|(rule, _)| rule(&view))
        .map(|(_, label)| *label)
        .unwrap_or(SectionLabel::Unknown)
}

/// Corpus header text to section label.
const HEADER_TEXT_LABELS: &[(&str, SectionLabel)] = &[
    ("경력기술", SectionLabel::CareerDetailContent),
    ("경 력 기 술", SectionLabel::CareerDetailContent),
    ("경력", SectionLabel::CareerSummary),
    ("학력", SectionLabel::EducationHeader),
    ("스킬", SectionLabel::Skills),
    ("나의", SectionLabel::Skills),
    ("자격", SectionLabel::Certifications),
    ("어학", SectionLabel::Certifications),
    ("수상", SectionLabel::Certifications),
    ("취업", SectionLabel::EmploymentPreference),
    ("병역", SectionLabel::EmploymentPreference),
    ("포트폴리오", SectionLabel::Portfolio),
    ("자기소개", SectionLabel::SelfIntroduction),
    ("간략", SectionLabel::SelfIntroduction),
    ("희망", SectionLabel::CareerSummary),
    ("지원분야", SectionLabel::Header),
    ("입사지원일", SectionLabel::Header),
    ("주소", SectionLabel::Header),
];

pub fn label_for_header(text: &str) -> SectionLabel {
    HEADER_TEXT_LABELS
        .iter()
        .find(|(needle, _)| text.contains(needle))
        .map(|(_, label)| *label)
        .unwrap_or(SectionLabel::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_beats_cues() {
        let lines = ["학력", "2015.03 ~ 2019.02  ACME"];
        assert_eq!(classify_block(&lines), SectionLabel::EducationHeader);
    }

    #[test]
    fn test_career_detail_before_career_summary() {
        assert_eq!(classify_block(&["경력기술서"]), SectionLabel::CareerDetailContent);
        assert_eq!(classify_block(&["▣ 경력사항"]), SectionLabel::CareerSummary);
    }

    #[test]
    fn test_institution_tokens_take_precedence() {
        let lines = ["2012.03 ~ 2015.02   서울고등학교   졸업"];
        assert_eq!(classify_block(&lines), SectionLabel::EducationHeader);
        let lines = ["2018.01 ~ 재직중  ACME · 백엔드개발"];
        assert_eq!(classify_block(&lines), SectionLabel::CareerSummary);
    }

    #[test]
    fn test_dated_single_line_is_certification() {
        let lines = ["2019.05  정보처리기사  한국산업인력공단"];
        assert_eq!(classify_block(&lines), SectionLabel::Certifications);
    }

    #[test]
    fn test_long_block_is_self_introduction() {
        let lines = ["저는", "성실하고", "책임감 있는", "개발자로서", "팀에 기여하겠습니다"];
        assert_eq!(classify_block(&lines), SectionLabel::SelfIntroduction);
    }

    #[test]
    fn test_contact_block_is_header() {
        let lines = [
            "홍길동",
            "남, 1991 (34세)",
            "이메일 hong@example.com",
            "휴대폰 010-1234-5678",
            "주소 서울특별시 강남구 테헤란로 1",
            "희망연봉 4500만원",
        ];
        assert_eq!(classify_block(&lines), SectionLabel::Header);
    }

    #[test]
    fn test_prose_opening_with_keyword_is_not_a_heading() {
        let lines = [
            "저는 성실한 개발자입니다.",
            "경력을 쌓으며 많은 것을 배웠습니다.",
            "학력보다 실력이 중요하다고 생각합니다.",
            "팀과 함께 성장하고 싶습니다.",
            "감사합니다.",
        ];
        assert_eq!(classify_block(&lines), SectionLabel::SelfIntroduction);
    }

    #[test]
    fn test_heading_forms() {
        assert_eq!(keyword_label("학력사항"), Some(SectionLabel::EducationHeader));
        assert_eq!(keyword_label("▣ 자기소개서"), Some(SectionLabel::SelfIntroduction));
        assert_eq!(keyword_label("자격/어학/수상"), Some(SectionLabel::Certifications));
        assert_eq!(keyword_label("어학(최근2년 취득)"), Some(SectionLabel::Certifications));
        assert_eq!(keyword_label("경력 총 5년 3개월"), Some(SectionLabel::CareerSummary));
        assert_eq!(keyword_label("병역: 군필"), Some(SectionLabel::EmploymentPreference));
        assert_eq!(keyword_label("경력을 쌓으며"), None);
        assert_eq!(keyword_label("자격이 있습니다"), None);
        assert_eq!(
            keyword_label("경력 관리에 힘쓰며 다양한 프로젝트를 진행하고 팀을 이끌어 성과를 냈습니다"),
            None
        );
    }

    #[test]
    fn test_short_unlabeled_block_is_unknown() {
        assert_eq!(classify_block(&["홍길동"]), SectionLabel::Unknown);
        assert_eq!(classify_block(&[]), SectionLabel::Unknown);
    }

    #[test]
    fn test_label_for_header() {
        assert_eq!(label_for_header("경력 총"), SectionLabel::CareerSummary);
        assert_eq!(label_for_header("경력기술서"), SectionLabel::CareerDetailContent);
        assert_eq!(label_for_header("자격/어학/수상"), SectionLabel::Certifications);
        assert_eq!(label_for_header("희망연봉"), SectionLabel::CareerSummary);
        assert_eq!(label_for_header("나의 스킬"), SectionLabel::Skills);
        assert_eq!(label_for_header("기타"), SectionLabel::Unknown);
    }
}
