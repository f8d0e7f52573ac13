use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Salary text used when the applicant defers to company policy.
pub const COMPANY_POLICY: &str = "회사내규에 따름";

static TOTAL_CAREER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"경력\s*총\s*(\d+년\s*\d*개월|\d+년|\d+개월)").unwrap());
static TOTAL_CAREER_LOOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"총\s*(\d+년\s*\d*개월|\d+개월)").unwrap());
static DESIRED_SALARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"희망\s*연봉\s*[:\s]*([0-9][0-9,]*)\s*\(?\s*만원").unwrap());
static LAST_SALARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"직전\s*연봉\s*[:\s]*([0-9][0-9,]*)\s*만원").unwrap());

/// Career-summary figures: total career length and salary expectations.
///
/// Layouts put this small table either under the identity block or at the top
/// of the career section, so the assembler runs this on several regions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_career: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired_salary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_salary: Option<String>,
}

impl CareerSummary {
    /// Fill fields still missing here from `other`.
    pub fn or(self, other: CareerSummary) -> CareerSummary {
        CareerSummary {
            total_career: self.total_career.or(other.total_career),
            desired_salary: self.desired_salary.or(other.desired_salary),
            last_salary: self.last_salary.or(other.last_salary),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_career.is_none() && self.desired_salary.is_none() && self.last_salary.is_none()
    }
}

pub fn extract_summary(block: &str) -> CareerSummary {
    let text = block.replace('\n', " ");

    let total_career = TOTAL_CAREER
        .captures(&text)
        .or_else(|| TOTAL_CAREER_LOOSE.captures(&text))
        .map(|c| c[1].trim().to_string());

    let desired_salary = DESIRED_SALARY
        .captures(&text)
        .map(|c| format!("{}만원", &c[1]))
        .or_else(|| desired_by_policy(&text));

    let last_salary = LAST_SALARY
        .captures(&text)
        .map(|c| format!("{}만원", &c[1]))
        .or_else(|| text.contains(COMPANY_POLICY).then(|| COMPANY_POLICY.to_string()));

    CareerSummary {
        total_career,
        desired_salary,
        last_salary,
    }
}

/// The policy phrase counts as the desired salary only when it appears
/// before the last-salary row.
fn desired_by_policy(text: &str) -> Option<String> {
    let policy = text.find(COMPANY_POLICY)?;
    match text.find("직전") {
        Some(last) if last < policy => None,
        _ => Some(COMPANY_POLICY.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_table() {
        let block = "경력 총 5년 3개월\n희망연봉   회사내규에 따름\n직전 연봉 : 3,800 만원";
        let s = extract_summary(block);
        assert_eq!(s.total_career.as_deref(), Some("5년 3개월"));
        assert_eq!(s.desired_salary.as_deref(), Some(COMPANY_POLICY));
        assert_eq!(s.last_salary.as_deref(), Some("3,800만원"));
    }

    #[test]
    fn test_desired_salary_amount() {
        let s = extract_summary("희망연봉 4500만원");
        assert_eq!(s.desired_salary.as_deref(), Some("4500만원"));
        assert_eq!(s.last_salary, None);
        let s = extract_summary("희망연봉     3000 (만원)");
        assert_eq!(s.desired_salary.as_deref(), Some("3000만원"));
    }

    #[test]
    fn test_policy_after_last_salary_is_not_desired() {
        let s = extract_summary("직전 연봉  회사내규에 따름");
        assert_eq!(s.desired_salary, None);
        assert_eq!(s.last_salary.as_deref(), Some(COMPANY_POLICY));
    }

    #[test]
    fn test_loose_total_career() {
        let s = extract_summary("총 14개월");
        assert_eq!(s.total_career.as_deref(), Some("14개월"));
        assert!(extract_summary("자기소개").is_empty());
    }

    #[test]
    fn test_or_keeps_first_non_empty() {
        let header = CareerSummary {
            desired_salary: Some("4500만원".into()),
            ..Default::default()
        };
        let career = CareerSummary {
            desired_salary: Some("5000만원".into()),
            last_salary: Some("4000만원".into()),
            ..Default::default()
        };
        let merged = header.or(career);
        assert_eq!(merged.desired_salary.as_deref(), Some("4500만원"));
        assert_eq!(merged.last_salary.as_deref(), Some("4000만원"));
    }
}
