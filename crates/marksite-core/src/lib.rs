//! marksite-core - Markdown to HTML node tree conversion
//!
//! This crate turns a deliberately small Markdown subset into a tree of HTML
//! nodes and serializes that tree back to an HTML string. It is used by the
//! `marksite` static-site generator but has no I/O of its own.
//!
//! # Architecture
//!
//! ```text
//! Markdown ──split──▶ blocks ──classify──▶ (block, kind) ──build──▶ HtmlNode ──▶ HTML String
//!                                               │
//!                                      tokenize_inline
//! ```
//!
//! # Supported subset
//!
//! - Headings `#` to `######`, fenced code blocks, quotes, `- ` lists and
//!   `1. ` lists numbered from one without gaps. Everything else is a paragraph.
//! - Inline `**bold**`, `_italic_`, `` `code` ``, `[links](url)` and
//!   `![images](url)`. Emphasis does not nest.
//!
//! # Example
//!
//! ```rust
//! use marksite_core::{build_tree, serialize};
//!
//! let tree = build_tree("# H\n\nBody _em_.").unwrap();
//! assert_eq!(serialize(&tree), "<div><h1>H</h1><p>Body <i>em</i>.</p></div>");
//! ```

mod block;
mod build;
mod inline;
mod node;
mod serialize;

pub use block::{classify_block, split_blocks, BlockKind};
pub use build::{build_tree, extract_title, markdown_to_html, text_token_to_node};
pub use inline::{tokenize_inline, TextToken, TokenKind};
pub use node::{is_void, Attributes, HtmlNode, LeafNode, ParentNode, VOID_ELEMENTS};
pub use serialize::serialize;

/// Error type for Markdown conversion
///
/// Every variant aborts the conversion of the whole document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkupError {
    #[error("Invalid Markdown: missing or unmatched `{delimiter}` delimiter")]
    MalformedMarkup { delimiter: &'static str },

    #[error("'{tag}' must have '{attribute}' attribute")]
    MissingRequiredAttribute { tag: String, attribute: &'static str },

    #[error("'{tag}' cannot have an empty value")]
    EmptyLeafValue { tag: String },

    #[error("'{tag}' must have child nodes")]
    EmptyParent { tag: String },

    #[error("Parent node must have a tag")]
    MissingTag,

    #[error("Markdown document contains no blocks")]
    EmptyDocument,

    #[error("No title in markdown document")]
    NoTitle,

    #[error("Markdown document cannot be empty")]
    MissingInput,
}

pub type Result<T> = std::result::Result<T, MarkupError>;
