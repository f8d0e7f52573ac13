use super::extract_after_label;
use super::narrative::SKILLS_MARKER;
use crate::model::{BasicInfo, Residence};
use regex::Regex;
use std::sync::LazyLock;

static LABELED_HANGUL_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(한글\)[ \t]*([^\s(]+(?:[ \t]+[^\s(]+)*)[ \t]*\(한문\)").unwrap()
});
static NAME_BEFORE_STATUS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)(\S+)[ \t]+(?:경력|신입)[ \t\r]*$").unwrap());
static NAME_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"성[ \t]*명[ \t]*:?[ \t]*([^\s(:]+)").unwrap());
static ENGLISH_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(영문\)[ \t]*([A-Za-z][A-Za-z \t]*[A-Za-z])").unwrap());

static HANGUL_NAME_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[가-힣]{2,4}$").unwrap());
static LATIN_NAME_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{2,20}$").unwrap());

static GENDER_BIRTH_AGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(남|여)\s*,\s*(\d{4})\s*\((\d+)세\)").unwrap());
static GENDER_BIRTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(남|여)\s*[,/]\s*(\d{4})").unwrap());
static GENDER_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"성\s*별\s*:?\s*(남|여)").unwrap());
static BIRTH_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"생년월일\s*:?\s*(\d{4}년\s*\d{1,2}월\s*\d{1,2}일|\d{4}[.\-/]\d{1,2}[.\-/]\d{1,2})").unwrap()
});

static EMAIL_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"이메일\s*:?\s*(\S+@\S+)").unwrap());
static EMAIL_LATIN_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)e-?mail\s*:?\s*(\S+@\S+)").unwrap());
static EMAIL_BARE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").unwrap()
});

static PHONE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:휴대폰|핸드폰|전화번호)\s*:?\s*(\d{2,3}[-.\s]?\d{3,4}[-.\s]?\d{4})").unwrap()
});
static PHONE_CONTACT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"연\s*락\s*처\s*:?\s*(\d{2,3}[-.\s]?\d{3,4}[-.\s]?\d{4})").unwrap()
});
static PHONE_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"01[016789][-.\s]?\d{3,4}[-.\s]?\d{4}").unwrap());

static ADDRESS_POSTAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"주소\s*:?\s*\(?\d{5}\)?\s*(.+)$").unwrap());
static ADDRESS_CURRENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"현\s*주\s*소\s*:?\s*(.+)$").unwrap());
static CONTACT_LABEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"연\s*락").unwrap());

static APPLICATION_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"지원분야\s*:\s*([^\s입]+)").unwrap());
static APPLICATION_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"입사지원일\s*:\s*([^)]+\))").unwrap());
static APPLICATION_DATE_PLAIN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"입사지원일\s*:?\s*(\d{4}[.\-]\d{2}[.\-]\d{2})").unwrap());

/// Words that sit next to "경력"/"신입" in headings but are not names.
const NOT_A_NAME: &[&str] = &["스킬", "소프트스킬", "경력", "학력", "나의", "-", "입니다"];

type NameRule = fn(&str) -> Option<String>;

/// Name-finding rules, most explicit first.
const NAME_RULES: &[NameRule] = &[
    name_from_hangul_label,
    name_before_status,
    name_above_gender_line,
    name_from_name_label,
];

/// Extract identity and contact fields from the header section.
pub fn extract_basic_info(block: &str) -> BasicInfo {
    let flat = block.replace('\n', " ");
    let mut info = BasicInfo {
        name: find_name(block),
        name_english: ENGLISH_NAME
            .captures(block)
            .map(|c| collapse_spaces(&c[1])),
        ..Default::default()
    };

    if let Some(c) = GENDER_BIRTH_AGE.captures(&flat) {
        info.gender = Some(c[1].to_string());
        info.birth_year = Some(c[2].to_string());
        info.age = c[3].parse().ok();
    } else if let Some(c) = GENDER_BIRTH.captures(&flat) {
        info.gender = Some(c[1].to_string());
        info.birth_year = Some(c[2].to_string());
    }
    if info.gender.is_none() {
        info.gender = GENDER_LABEL.captures(&flat).map(|c| c[1].to_string());
    }
    if let Some(c) = BIRTH_DATE.captures(&flat) {
        let date = c[1].trim().to_string();
        if info.birth_year.is_none() {
            info.birth_year = Some(date.chars().take(4).collect());
        }
        info.birth_date = Some(date);
    }

    info.email = [&*EMAIL_LABEL, &*EMAIL_LATIN_LABEL]
        .iter()
        .find_map(|re| re.captures(&flat).map(|c| c[1].to_string()))
        .or_else(|| EMAIL_BARE.find(&flat).map(|m| m.as_str().to_string()));

    info.phone = [&*PHONE_LABEL, &*PHONE_CONTACT]
        .iter()
        .find_map(|re| re.captures(&flat).map(|c| c[1].to_string()))
        .or_else(|| PHONE_BARE.find(&flat).map(|m| m.as_str().to_string()))
        .map(|p| p.split_whitespace().collect());

    info.address = find_address(block);
    info.residence = info.address.as_deref().and_then(Residence::from_address);

    info.application_field = APPLICATION_FIELD
        .captures(&flat)
        .map(|c| c[1].to_string())
        .or_else(|| {
            block
                .lines()
                .find_map(|l| extract_after_label(l, "지원분야"))
                .filter(|v| !v.starts_with("입사지원일"))
        });
    info.application_date = APPLICATION_DATE
        .captures(&flat)
        .or_else(|| APPLICATION_DATE_PLAIN.captures(&flat))
        .map(|c| c[1].trim().to_string());

    info
}

/// Run the name rules in order and return the first acceptable name.
pub fn find_name(block: &str) -> Option<String> {
    NAME_RULES.iter().find_map(|rule| rule(block))
}

fn accept_name(word: &str) -> bool {
    if word.is_empty() || NOT_A_NAME.iter().any(|x| word.contains(x)) {
        return false;
    }
    HANGUL_NAME_SHAPE.is_match(word) || LATIN_NAME_SHAPE.is_match(word)
}

/// `(한글) 홍 길 동 (한문) 洪吉童` on form layouts.
fn name_from_hangul_label(block: &str) -> Option<String> {
    let caps = LABELED_HANGUL_NAME.captures(block)?;
    let name: String = caps[1].split_whitespace().collect();
    accept_name(&name).then_some(name)
}

/// `홍길동 경력` / `PRASETYO 신입`, only above the skills list.
fn name_before_status(block: &str) -> Option<String> {
    let region = match block.find(SKILLS_MARKER) {
        Some(idx) => &block[..idx],
        None => block,
    };
    NAME_BEFORE_STATUS
        .captures_iter(region)
        .map(|c| c[1].trim().to_string())
        .find(|name| accept_name(name))
}

/// The line right above `남, 1991 (34세)`.
fn name_above_gender_line(block: &str) -> Option<String> {
    let lines: Vec<&str> = block.lines().map(str::trim).collect();
    let idx = lines.iter().position(|l| GENDER_BIRTH.is_match(l))?;
    let above = lines[..idx].iter().rev().find(|l| !l.is_empty())?;
    let name = above.split_whitespace().next()?;
    accept_name(name).then(|| name.to_string())
}

fn name_from_name_label(block: &str) -> Option<String> {
    let caps = NAME_LABEL.captures(block)?;
    let name = caps[1].to_string();
    accept_name(&name).then_some(name)
}

fn find_address(block: &str) -> Option<String> {
    let lines: Vec<&str> = block.lines().map(str::trim).collect();

    let postal = lines.iter().find_map(|l| {
        let caps = ADDRESS_POSTAL.captures(l)?;
        cut_address(&caps[1])
    });
    if postal.is_some() {
        return postal;
    }

    let current = lines.iter().find_map(|l| {
        let caps = ADDRESS_CURRENT.captures(l)?;
        let value = &caps[1];
        let value = match CONTACT_LABEL.find(value) {
            Some(m) => &value[..m.start()],
            None => value,
        };
        let value = collapse_spaces(value);
        (!value.is_empty()).then_some(value)
    });
    if current.is_some() {
        return current;
    }

    lines
        .iter()
        .find_map(|l| extract_after_label(l, "주소"))
        .and_then(|v| cut_address(&v))
}

/// Address value up to the next column gap or a trailing `경력` cell.
fn cut_address(value: &str) -> Option<String> {
    let value = match value.find("   ") {
        Some(gap) => &value[..gap],
        None => value,
    };
    let value = match value.find(" 경력") {
        Some(idx) => &value[..idx],
        None => value,
    };
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn collapse_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FREEFORM: &str = "\
지원분야 : 백엔드개발 입사지원일 : 2024.05.01 (수)
홍길동 경력
남, 1991 (34세)
이메일 hong@example.com   휴대폰 010-1234-5678
주소 (06236) 서울 강남구 테헤란로 123
나의 스킬
Java  Spring";

    #[test]
    fn test_freeform_header() {
        let info = extract_basic_info(FREEFORM);
        assert_eq!(info.name.as_deref(), Some("홍길동"));
        assert_eq!(info.gender.as_deref(), Some("남"));
        assert_eq!(info.birth_year.as_deref(), Some("1991"));
        assert_eq!(info.age, Some(34));
        assert_eq!(info.email.as_deref(), Some("hong@example.com"));
        assert_eq!(info.phone.as_deref(), Some("010-1234-5678"));
        assert_eq!(info.address.as_deref(), Some("서울 강남구 테헤란로 123"));
        assert_eq!(info.residence, Some(Residence::Seoul));
        assert_eq!(info.application_field.as_deref(), Some("백엔드개발"));
        assert_eq!(info.application_date.as_deref(), Some("2024.05.01 (수)"));
    }

    #[test]
    fn test_form_header() {
        let block = "\
성 명   (한글) 김 철 수   (한문) 金哲洙
        (영문) Kim Chulsoo
생년월일   1990년 3월 5일
현 주 소   경기도 수원시 팔달구 123   연 락 처   010 9876 5432
e-mail   kim@example.co.kr";
        let info = extract_basic_info(block);
        assert_eq!(info.name.as_deref(), Some("김철수"));
        assert_eq!(info.name_english.as_deref(), Some("Kim Chulsoo"));
        assert_eq!(info.birth_date.as_deref(), Some("1990년 3월 5일"));
        assert_eq!(info.birth_year.as_deref(), Some("1990"));
        assert_eq!(info.address.as_deref(), Some("경기도 수원시 팔달구 123"));
        assert_eq!(info.residence, Some(Residence::Metro));
        assert_eq!(info.phone.as_deref(), Some("01098765432"));
        assert_eq!(info.email.as_deref(), Some("kim@example.co.kr"));
    }

    #[test]
    fn test_hangul_label_beats_positional_rules() {
        let block = "박영희 경력\n(한글) 이 순 신 (한문) 李舜臣";
        assert_eq!(find_name(block).as_deref(), Some("이순신"));
    }

    #[test]
    fn test_status_name_ignores_skills_region() {
        let block = "나의 스킬\n소프트스킬 경력\n홍길동 경력";
        assert_eq!(name_before_status(block), None);
        let block = "나의 경력\nPRASETYO 신입\n나의 스킬";
        assert_eq!(find_name(block).as_deref(), Some("PRASETYO"));
    }

    #[test]
    fn test_name_above_gender_line() {
        let block = "이력서\n\n최민준\n남, 1995 (29세)";
        assert_eq!(find_name(block).as_deref(), Some("최민준"));
    }

    #[test]
    fn test_no_name_without_match() {
        assert_eq!(find_name("자기소개서\n성실한 개발자입니다"), None);
        assert_eq!(extract_basic_info(""), BasicInfo::default());
    }

    #[test]
    fn test_bare_contact_fallbacks() {
        let info = extract_basic_info("연락: 010.2222.3333  mail me at lee@corp.kr");
        assert_eq!(info.phone.as_deref(), Some("010.2222.3333"));
        assert_eq!(info.email.as_deref(), Some("lee@corp.kr"));
    }
}
