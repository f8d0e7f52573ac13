use crate::model::EmploymentPreference;
use regex::Regex;
use std::sync::LazyLock;

static MILITARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)병역(?:사항)?\s*:?\s*([^\s:]+).*?(\S+/\S+).*?(\d{4}\.\d{2}\s*[~\-]\s*\d{4}\.\d{2})",
    )
    .unwrap()
});
static MILITARY_STATUS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"병역(?:사항)?\s*:?\s*([^\s:]+)").unwrap());

/// Military service status, detail (branch/rank) and period.
///
/// Without the literal `병역` the record stays empty.
pub fn extract_preference(block: &str) -> EmploymentPreference {
    if !block.contains("병역") {
        return EmploymentPreference::default();
    }
    if let Some(c) = MILITARY.captures(block) {
        return EmploymentPreference {
            military_status: Some(c[1].to_string()),
            military_detail: Some(c[2].to_string()),
            military_period: Some(c[3].to_string()),
        };
    }
    EmploymentPreference {
        military_status: MILITARY_STATUS.captures(block).map(|c| c[1].to_string()),
        ..Default::default()
    }
}
