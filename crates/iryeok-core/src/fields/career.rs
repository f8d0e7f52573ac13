use super::{is_date_range_line, parse_dated_line, split_by_whitespace_gaps};
use crate::model::CareerEntry;
use regex::Regex;
use std::sync::LazyLock;

static DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d+개월|\d+년\s*\d*개월|\d+년)$").unwrap());
static SALARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)연봉\s+([^\s:근]+)").unwrap());
static REGION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"근무지역\s+(\S+)").unwrap());
static LEAVE_REASON: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"퇴사사유\s+(.+)").unwrap());

/// Separator between company and role on free-form layouts.
const COMPANY_ROLE_SEPARATOR: char = '·';

/// Extract career entries in document order.
///
/// Each date-range line opens an entry. The lines after it, up to the next
/// date-range line, carry the duration, the labeled salary/region/leave
/// reason cells and the free description.
pub fn extract_careers(block: &str) -> Vec<CareerEntry> {
    let lines: Vec<&str> = block.lines().collect();
    let mut entries = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let Some(dated) = parse_dated_line(lines[i]) else {
            i += 1;
            continue;
        };

        let mut entry = open_entry(dated.start, dated.end, dated.rest);
        let mut description = Vec::new();
        i += 1;

        while i < lines.len() && !is_date_range_line(lines[i]) {
            let line = lines[i].trim();
            i += 1;
            if line.is_empty() {
                continue;
            }
            if DURATION.is_match(line) {
                entry.duration.get_or_insert_with(|| line.to_string());
                continue;
            }
            if !apply_labeled_cells(&mut entry, line) {
                description.push(line);
            }
        }

        entry.description = description.join(" ");
        entries.push(entry);
    }

    entries
}

/// Company, role and form-layout columns from the text after the dates.
fn open_entry(start: &str, end: &str, rest: &str) -> CareerEntry {
    let mut entry = CareerEntry {
        start_date: start.to_string(),
        end_date: end.to_string(),
        ..Default::default()
    };

    if let Some((company, role)) = rest.split_once(COMPANY_ROLE_SEPARATOR) {
        entry.company = company.trim().to_string();
        entry.role = role.trim().to_string();
        return entry;
    }

    // Form layout: company  department  position  salary  leave reason
    let parts = split_by_whitespace_gaps(rest);
    match parts.as_slice() {
        [] => {}
        [company] => entry.company = company.to_string(),
        [company, role] => {
            entry.company = company.to_string();
            entry.role = role.to_string();
        }
        [company, department, role, more @ ..] => {
            entry.company = format!("{} {}", company, department);
            entry.role = role.to_string();
            entry.salary = more.first().map(|s| s.to_string());
            if more.len() > 1 {
                entry.leave_reason = Some(more[1..].join(" "));
            }
        }
    }
    entry
}

/// Pick up `연봉`, `근무지역` and `퇴사사유` cells. Returns whether the line
/// carried any of them.
fn apply_labeled_cells(entry: &mut CareerEntry, line: &str) -> bool {
    let mut labeled = false;

    if let Some(c) = SALARY.captures(line) {
        labeled = true;
        entry.salary.get_or_insert_with(|| c[1].to_string());
    }
    if let Some(c) = REGION.captures(line) {
        labeled = true;
        let region = c[1].split("퇴사사유").next().unwrap_or("").trim();
        if !region.is_empty() {
            entry.region.get_or_insert_with(|| region.to_string());
        }
    }
    if let Some(c) = LEAVE_REASON.captures(line) {
        labeled = true;
        entry
            .leave_reason
            .get_or_insert_with(|| c[1].trim().to_string());
    }

    labeled
}
