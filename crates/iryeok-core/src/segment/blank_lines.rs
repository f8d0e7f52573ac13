use super::classify::classify_block;
use super::{make_block, Block, SectionLabel};

/// Blank lines needed between two blocks.
pub const MIN_SEPARATOR_BLANKS: usize = 3;

/// Split lines into blocks at runs of `MIN_SEPARATOR_BLANKS` or more blank
/// lines, then classify each block by content.
///
/// A separator run stays with the block before it, and leading blank lines
/// belong to the first block, so the blocks tile the input exactly.
pub fn split_blocks(lines: &[&str]) -> Vec<Block> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    let mut start = 0;
    let mut seen_content = false;
    let mut blank_run = 0;

    for (i, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            blank_run += 1;
            continue;
        }
        if seen_content && blank_run >= MIN_SEPARATOR_BLANKS {
            ranges.push((start, i));
            start = i;
        }
        seen_content = true;
        blank_run = 0;
    }
    if start < lines.len() {
        ranges.push((start, lines.len()));
    }

    ranges
        .into_iter()
        .enumerate()
        .map(|(index, (s, e))| {
            let label = match classify_block(&lines[s..e]) {
                SectionLabel::Unknown if index == 0 => SectionLabel::Header,
                label => label,
            };
            make_block(lines, index, s, e, label)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_blank_lines_do_not_split() {
        let lines = vec!["홍길동", "", "", "이메일 hong@example.com"];
        assert_eq!(split_blocks(&lines).len(), 1);
    }

    #[test]
    fn test_three_blank_lines_split() {
        let lines = vec!["홍길동", "", "", "", "자기소개서", "안녕하세요"];
        let blocks = split_blocks(&lines);
        assert_eq!(blocks.len(), 2);
        assert_eq!((blocks[0].start_line, blocks[0].end_line), (0, 4));
        assert_eq!((blocks[1].start_line, blocks[1].end_line), (4, 6));
        assert_eq!(blocks[1].label, SectionLabel::SelfIntroduction);
    }

    #[test]
    fn test_leading_blanks_join_first_block() {
        let lines = vec!["", "", "", "", "홍길동"];
        let blocks = split_blocks(&lines);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].start_line, 0);
        assert_eq!(blocks[0].label, SectionLabel::Header);
    }

    #[test]
    fn test_whitespace_only_lines_count_as_blank() {
        let lines = vec!["머리", "   ", "\u{c}", "\t", "꼬리"];
        assert_eq!(split_blocks(&lines).len(), 2);
    }
}
