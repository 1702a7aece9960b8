//! Block segmentation and classification

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// A blank line: two or more consecutive newlines
static BLANK_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{2,}").expect("valid blank line regex"));

pub(crate) const CODE_FENCE: &str = "```";
pub(crate) const QUOTE_MARKER: char = '>';
pub(crate) const UNORDERED_MARKER: &str = "- ";
pub(crate) const MAX_HEADING_LEVEL: usize = 6;

/// Kind of a Markdown block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    /// Heading with level (1-6)
    Heading(u8),
    /// Fenced code block
    Code,
    Quote,
    UnorderedList,
    OrderedList,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::Paragraph => f.write_str("paragraph"),
            BlockKind::Heading(level) => write!(f, "heading({level})"),
            BlockKind::Code => f.write_str("code"),
            BlockKind::Quote => f.write_str("quote"),
            BlockKind::UnorderedList => f.write_str("unordered_list"),
            BlockKind::OrderedList => f.write_str("ordered_list"),
        }
    }
}

/// Split a document into trimmed, non-empty blocks in source order
pub fn split_blocks(document: &str) -> Vec<String> {
    BLANK_LINE_RE
        .split(document)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(str::to_string)
        .collect()
}

/// Classify a block, falling back to a paragraph when no rule matches
pub fn classify_block(block: &str) -> BlockKind {
    if let Some(level) = heading_level(block) {
        return BlockKind::Heading(level);
    }
    if is_code(block) {
        return BlockKind::Code;
    }
    if block.split('\n').all(|line| line.starts_with(QUOTE_MARKER)) {
        return BlockKind::Quote;
    }
    if block.split('\n').all(|line| line.starts_with(UNORDERED_MARKER)) {
        return BlockKind::UnorderedList;
    }
    if is_ordered_list(block) {
        return BlockKind::OrderedList;
    }
    BlockKind::Paragraph
}

/// Marker expected at the start of the `index`-th (zero-based) ordered list line
pub(crate) fn ordered_marker(index: usize) -> String {
    format!("{}. ", index + 1)
}

/// Level of a `#`-run followed by a space, if it is a valid heading
fn heading_level(block: &str) -> Option<u8> {
    let hashes = block.bytes().take_while(|&b| b == b'#').count();
    if hashes == 0 || hashes > MAX_HEADING_LEVEL {
        return None;
    }
    if block.as_bytes().get(hashes) != Some(&b' ') {
        return None;
    }
    u8::try_from(hashes).ok()
}

fn is_code(block: &str) -> bool {
    block.len() >= 2 * CODE_FENCE.len()
        && block.starts_with(CODE_FENCE)
        && block.ends_with(CODE_FENCE)
}

fn is_ordered_list(block: &str) -> bool {
    block
        .split('\n')
        .enumerate()
        .all(|(i, line)| line.starts_with(&ordered_marker(i)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_blocks() {
        let md = "# This is a heading\n\nThis is a paragraph of text. It has some **bold** and _italic_ words inside of it.\n\n- This is the first list item in a list block\n- This is a list item\n- This is another list item";
        assert_eq!(
            split_blocks(md),
            vec![
                "# This is a heading",
                "This is a paragraph of text. It has some **bold** and _italic_ words inside of it.",
                "- This is the first list item in a list block\n- This is a list item\n- This is another list item",
            ]
        );
    }

    #[test]
    fn test_split_blocks_collapses_blank_runs() {
        let md = "\n\n  first  \n\n\n\n\nsecond\nline\n\n   \n\n";
        assert_eq!(split_blocks(md), vec!["first", "second\nline"]);
    }

    #[test]
    fn test_split_blocks_empty() {
        assert!(split_blocks("").is_empty());
        assert!(split_blocks("\n\n\n").is_empty());
    }

    #[test]
    fn test_split_blocks_idempotent() {
        for md in [
            "# a\n\n\n\nb  \nc\n\n\n- d\n- e\n",
            "\n\n\nfirst\n\n\n",
            "  one  \n\n two\n\n\n\n",
            "single",
            "",
        ] {
            let once = split_blocks(md);
            let twice = split_blocks(&once.join("\n\n"));
            assert_eq!(once, twice, "input: {md:?}");
        }
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(classify_block("# Title"), BlockKind::Heading(1));
        assert_eq!(classify_block("### Title"), BlockKind::Heading(3));
        assert_eq!(classify_block("###### Title"), BlockKind::Heading(6));
        assert_eq!(classify_block("####### Title"), BlockKind::Paragraph);
        assert_eq!(classify_block("#Title"), BlockKind::Paragraph);
        assert_eq!(classify_block("#"), BlockKind::Paragraph);
    }

    #[test]
    fn test_code_block() {
        assert_eq!(classify_block("```\nlet x = 1;\n```"), BlockKind::Code);
        assert_eq!(classify_block("```\nunterminated"), BlockKind::Paragraph);
        assert_eq!(classify_block("```"), BlockKind::Paragraph);
    }

    #[test]
    fn test_quote() {
        assert_eq!(classify_block("> one\n>two"), BlockKind::Quote);
        assert_eq!(classify_block("> one\ntwo"), BlockKind::Paragraph);
    }

    #[test]
    fn test_unordered_list() {
        assert_eq!(classify_block("- a\n- b"), BlockKind::UnorderedList);
        assert_eq!(classify_block("- a\n-b"), BlockKind::Paragraph);
    }

    #[test]
    fn test_ordered_list() {
        assert_eq!(classify_block("1. a\n2. b\n3. c"), BlockKind::OrderedList);
        assert_eq!(classify_block("1. a\n3. b"), BlockKind::Paragraph);
        assert_eq!(classify_block("2. a\n3. b"), BlockKind::Paragraph);
        assert_eq!(classify_block("1.a"), BlockKind::Paragraph);
    }

    #[test]
    fn test_ordered_list_past_nine() {
        let block = (1..=11)
            .map(|i| format!("{i}. item"))
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(classify_block(&block), BlockKind::OrderedList);
    }

    #[test]
    fn test_paragraph() {
        assert_eq!(classify_block("Just text."), BlockKind::Paragraph);
    }
}
