//! Tree building
//!
//! Turns a Markdown document into a `div` rooted node tree, one child
//! subtree per block.

use tracing::{debug, trace};

use crate::block::{
    classify_block, ordered_marker, split_blocks, BlockKind, CODE_FENCE, QUOTE_MARKER,
    UNORDERED_MARKER,
};
use crate::inline::{tokenize_inline, TextToken};
use crate::node::HtmlNode;
use crate::serialize::serialize;
use crate::{MarkupError, Result};

const ROOT_TAG: &str = "div";
const TITLE_PREFIX: &str = "# ";

/// Build the node tree for a whole document
///
/// Fails with [`MarkupError::EmptyDocument`] when the document has no
/// blocks; any error inside a block aborts the whole build.
pub fn build_tree(document: &str) -> Result<HtmlNode> {
    let blocks = split_blocks(document);
    if blocks.is_empty() {
        return Err(MarkupError::EmptyDocument);
    }
    debug!(blocks = blocks.len(), "building document tree");

    let children = blocks
        .iter()
        .map(|block| build_block(block))
        .collect::<Result<Vec<_>>>()?;

    HtmlNode::parent(ROOT_TAG, children)
}

/// Convert a document straight to an HTML string
pub fn markdown_to_html(document: &str) -> Result<String> {
    build_tree(document).map(|tree| serialize(&tree))
}

/// Return the text of the first `# ` line, trimmed
pub fn extract_title(document: &str) -> Result<String> {
    if document.is_empty() {
        return Err(MarkupError::MissingInput);
    }

    document
        .split('\n')
        .find_map(|line| line.strip_prefix(TITLE_PREFIX))
        .map(|title| title.trim().to_string())
        .ok_or(MarkupError::NoTitle)
}

/// Map an inline token to its HTML node
pub fn text_token_to_node(token: &TextToken) -> Result<HtmlNode> {
    match token {
        TextToken::Plain(text) => HtmlNode::text(text),
        TextToken::Bold(text) => HtmlNode::leaf("b", text),
        TextToken::Italic(text) => HtmlNode::leaf("i", text),
        TextToken::Code(text) => HtmlNode::leaf("code", text),
        TextToken::Link { text, url } => {
            HtmlNode::leaf_with_attrs("a", text, vec![("href", url.as_str())])
        }
        TextToken::Image { alt, url } => HtmlNode::leaf_with_attrs(
            "img",
            "",
            vec![("src", url.as_str()), ("alt", alt.as_str())],
        ),
    }
}

fn build_block(block: &str) -> Result<HtmlNode> {
    let kind = classify_block(block);
    trace!(%kind, len = block.len(), "classified block");

    match kind {
        BlockKind::Heading(level) => build_heading(block, level),
        BlockKind::Code => build_code(block),
        BlockKind::Quote => build_quote(block),
        BlockKind::UnorderedList => build_unordered_list(block),
        BlockKind::OrderedList => build_ordered_list(block),
        BlockKind::Paragraph => build_paragraph(block),
    }
}

fn inline_children(text: &str) -> Result<Vec<HtmlNode>> {
    tokenize_inline(text)?
        .iter()
        .map(text_token_to_node)
        .collect()
}

fn build_heading(block: &str, level: u8) -> Result<HtmlNode> {
    // Classification guarantees `level` hashes followed by a space
    let text = &block[usize::from(level) + 1..];
    HtmlNode::parent(&format!("h{level}"), inline_children(text)?)
}

fn build_code(block: &str) -> Result<HtmlNode> {
    let inner = &block[CODE_FENCE.len()..block.len() - CODE_FENCE.len()];
    let code = inner.strip_prefix('\n').unwrap_or(inner);
    HtmlNode::parent("pre", vec![HtmlNode::leaf("code", code)?])
}

fn build_quote(block: &str) -> Result<HtmlNode> {
    let text = block
        .split('\n')
        .map(|line| line.trim_start_matches(QUOTE_MARKER).trim())
        .collect::<Vec<_>>()
        .join("\n");
    HtmlNode::parent("blockquote", inline_children(&text)?)
}

fn build_unordered_list(block: &str) -> Result<HtmlNode> {
    let items = block
        .split('\n')
        .map(|line| {
            let text = line.strip_prefix(UNORDERED_MARKER).unwrap_or(line);
            HtmlNode::parent("li", inline_children(text.trim())?)
        })
        .collect::<Result<Vec<_>>>()?;
    HtmlNode::parent("ul", items)
}

fn build_ordered_list(block: &str) -> Result<HtmlNode> {
    let items = block
        .split('\n')
        .enumerate()
        .map(|(i, line)| {
            let text = line.strip_prefix(&ordered_marker(i)).unwrap_or(line);
            HtmlNode::parent("li", inline_children(text.trim())?)
        })
        .collect::<Result<Vec<_>>>()?;
    HtmlNode::parent("ol", items)
}

fn build_paragraph(block: &str) -> Result<HtmlNode> {
    let text = block.replace('\n', " ");
    HtmlNode::parent("p", inline_children(&text)?)
}
