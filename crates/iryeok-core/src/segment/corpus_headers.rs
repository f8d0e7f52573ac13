use super::classify::label_for_header;
use super::{make_block, Block, SectionLabel};
use crate::corpus::schema::{HeaderCandidate, HeaderCorpus};

/// Split lines at every line that starts a known header.
///
/// Text before the first header becomes the `header` block. Each header
/// block runs from its header line up to the next header line.
pub fn split_blocks(lines: &[&str], corpus: &HeaderCorpus) -> Vec<Block> {
    let matches = find_headers(lines, corpus);

    let mut blocks = Vec::new();
    let first = matches.first().map(|(i, _)| *i).unwrap_or(lines.len());
    if first > 0 {
        blocks.push(make_block(lines, 0, 0, first, SectionLabel::Header));
    }

    for (n, (start, candidate)) in matches.iter().enumerate() {
        let end = matches.get(n + 1).map(|(i, _)| *i).unwrap_or(lines.len());
        let label = label_for_header(&candidate.text);
        blocks.push(make_block(lines, blocks.len(), *start, end, label));
    }

    blocks
}

/// Line index and winning candidate of every header occurrence, in order.
pub fn find_headers<'c>(lines: &[&str], corpus: &'c HeaderCorpus) -> Vec<(usize, &'c HeaderCandidate)> {
    let mut found = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let trailing = trailing_blank_lines(lines, i);
        let best = corpus
            .candidates
            .iter()
            .filter(|c| trimmed.starts_with(c.text.as_str()))
            .filter(|c| trailing >= c.trailing_min_empty_lines)
            .max_by_key(|c| c.text.chars().count());
        if let Some(candidate) = best {
            tracing::debug!(line = i, header = %candidate.text, "matched corpus header");
            found.push((i, candidate));
        }
    }
    found
}

/// Number of blank lines directly after line `i`.
fn trailing_blank_lines(lines: &[&str], i: usize) -> usize {
    lines[i + 1..]
        .iter()
        .take_while(|l| l.trim().is_empty())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> HeaderCorpus {
        HeaderCorpus::new(vec![
            HeaderCandidate::new("경력", 2),
            HeaderCandidate::new("경력 총", 2),
            HeaderCandidate::new("학력", 2),
            HeaderCandidate::new("자기소개서", 1),
        ])
        .with_career_detail_amendment()
    }

    #[test]
    fn test_table_cell_without_trailing_blanks_is_not_a_header() {
        let lines = vec![
            "홍길동",
            "경력      학력",
            "3년      대졸",
            "경력 총 3년 2개월",
            "",
            "",
            "2018.01 ~ 재직중  ACME · 백엔드개발",
        ];
        let corpus = corpus();
        let found = find_headers(&lines, &corpus);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, 3);
        // the longer candidate wins on the same line
        assert_eq!(found[0].1.text, "경력 총");
    }

    #[test]
    fn test_blocks_run_to_next_header() {
        let lines = vec![
            "홍길동",
            "학력",
            "",
            "",
            "2015.03 ~ 2019.02  한국대학교",
            "자기소개서",
            "",
            "안녕하세요",
        ];
        let blocks = split_blocks(&lines, &corpus());
        let spans: Vec<_> = blocks
            .iter()
            .map(|b| (b.label, b.start_line, b.end_line))
            .collect();
        assert_eq!(
            spans,
            vec![
                (SectionLabel::Header, 0, 1),
                (SectionLabel::EducationHeader, 1, 5),
                (SectionLabel::SelfIntroduction, 5, 8),
            ]
        );
    }

    #[test]
    fn test_career_detail_amendment_matches_without_blanks() {
        let lines = vec!["머리", "경력기술서", "ACME 결제 시스템 구축"];
        let blocks = split_blocks(&lines, &corpus());
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].label, SectionLabel::CareerDetailContent);
    }

    #[test]
    fn test_header_on_first_line_has_no_preamble() {
        let lines = vec!["학력", "", "", "2015.03 ~ 2019.02  한국대학교"];
        let blocks = split_blocks(&lines, &corpus());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].label, SectionLabel::EducationHeader);
    }
}
