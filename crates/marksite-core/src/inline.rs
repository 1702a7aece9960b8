//! Inline tokenization
//!
//! Splits a span of raw text into typed tokens. Passes run in a fixed order
//! and never re-enter each other: images, links, then the `` ` ``, `**` and
//! `_` delimiters. Only plain tokens are candidates for further splitting.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{MarkupError, Result};

/// URL inside `(...)`: no whitespace, optionally containing balanced,
/// non-nested parenthesis groups
const URL_PATTERN: &str = r"\s*([^()\s]+(?:\([^()\s]+\)[^()\s]*)*)\s*";

/// `![alt](url)`
static IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"!\[(.*?)\]\({URL_PATTERN}\)")).expect("valid image regex"));

/// `[text](url)`, where text may be an embedded image taken verbatim
static LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"\[(!?\[.*?\]\(.*?\)|.*?)\]\({URL_PATTERN}\)"))
        .expect("valid link regex")
});

const CODE_DELIMITER: &str = "`";
const BOLD_DELIMITER: &str = "**";
const ITALIC_DELIMITER: &str = "_";

/// Kind of an inline token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

/// A typed span of inline text
///
/// Links and images always carry a target URL; the other kinds never do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextToken {
    /// Untyped text
    Plain(String),
    Bold(String),
    Italic(String),
    /// Inline code
    Code(String),
    /// Link with display text and URL
    Link { text: String, url: String },
    /// Image with alt text and URL
    Image { alt: String, url: String },
}

impl TextToken {
    pub fn kind(&self) -> TokenKind {
        match self {
            TextToken::Plain(_) => TokenKind::Plain,
            TextToken::Bold(_) => TokenKind::Bold,
            TextToken::Italic(_) => TokenKind::Italic,
            TextToken::Code(_) => TokenKind::Code,
            TextToken::Link { .. } => TokenKind::Link,
            TextToken::Image { .. } => TokenKind::Image,
        }
    }

    /// Get the display text
    pub fn content(&self) -> &str {
        match self {
            TextToken::Plain(text)
            | TextToken::Bold(text)
            | TextToken::Italic(text)
            | TextToken::Code(text) => text,
            TextToken::Link { text, .. } => text,
            TextToken::Image { alt, .. } => alt,
        }
    }

    /// Get the URL for links and images
    pub fn target(&self) -> Option<&str> {
        match self {
            TextToken::Link { url, .. } | TextToken::Image { url, .. } => Some(url),
            _ => None,
        }
    }

    /// Whitespace left over from splitting, other than a single space
    fn is_noise(&self) -> bool {
        match self {
            TextToken::Plain(text) => text.trim().is_empty() && text != " ",
            _ => false,
        }
    }
}

/// Tokenize a span of raw text
///
/// Fails with [`MarkupError::MalformedMarkup`] when a delimiter is left
/// unmatched.
pub fn tokenize_inline(text: &str) -> Result<Vec<TextToken>> {
    let tokens = vec![TextToken::Plain(text.to_string())];
    let tokens = split_images(tokens);
    let tokens = split_links(tokens);
    let tokens = split_delimiter(tokens, CODE_DELIMITER, TextToken::Code)?;
    let tokens = split_delimiter(tokens, BOLD_DELIMITER, TextToken::Bold)?;
    let tokens = split_delimiter(tokens, ITALIC_DELIMITER, TextToken::Italic)?;

    Ok(tokens.into_iter().filter(|t| !t.is_noise()).collect())
}

/// Extract `![alt](url)` images from plain tokens
///
/// An image that is the anchor text of an enclosing link is left in place
/// for the link pass.
fn split_images(tokens: Vec<TextToken>) -> Vec<TextToken> {
    split_pattern(tokens, |text| {
        let anchors: Vec<Range<usize>> = LINK_RE
            .captures_iter(text)
            .filter_map(|caps| caps.get(1).map(|m| m.range()))
            .collect();

        IMAGE_RE
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let inside_link = anchors
                    .iter()
                    .any(|a| a.start <= whole.start() && whole.end() <= a.end);
                if inside_link {
                    return None;
                }
                Some((
                    whole.range(),
                    TextToken::Image {
                        alt: caps[1].to_string(),
                        url: caps[2].to_string(),
                    },
                ))
            })
            .collect()
    })
}

/// Extract `[text](url)` links from plain tokens
fn split_links(tokens: Vec<TextToken>) -> Vec<TextToken> {
    split_pattern(tokens, |text| {
        LINK_RE
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                Some((
                    whole.range(),
                    TextToken::Link {
                        text: caps[1].to_string(),
                        url: caps[2].to_string(),
                    },
                ))
            })
            .collect()
    })
}

/// Replace matched spans of plain tokens with the tokens `find` produced,
/// keeping any non-empty text between them as plain tokens
fn split_pattern<F>(tokens: Vec<TextToken>, find: F) -> Vec<TextToken>
where
    F: Fn(&str) -> Vec<(Range<usize>, TextToken)>,
{
    let mut result = Vec::with_capacity(tokens.len());

    for token in tokens {
        let TextToken::Plain(text) = token else {
            result.push(token);
            continue;
        };

        let matches = find(&text);
        if matches.is_empty() {
            result.push(TextToken::Plain(text));
            continue;
        }

        let mut cursor = 0;
        for (span, matched) in matches {
            if span.start > cursor {
                result.push(TextToken::Plain(text[cursor..span.start].to_string()));
            }
            result.push(matched);
            cursor = span.end;
        }
        if cursor < text.len() {
            result.push(TextToken::Plain(text[cursor..].to_string()));
        }
    }

    result
}

/// Split plain tokens on a paired delimiter
///
/// Each opening delimiter must be closed by the next occurrence; the text
/// after a closed pair is scanned again for further pairs.
fn split_delimiter(
    tokens: Vec<TextToken>,
    delimiter: &'static str,
    wrap: fn(String) -> TextToken,
) -> Result<Vec<TextToken>> {
    let mut result = Vec::with_capacity(tokens.len());

    for token in tokens {
        let TextToken::Plain(text) = token else {
            result.push(token);
            continue;
        };

        if !text.contains(delimiter) {
            result.push(TextToken::Plain(text));
            continue;
        }

        let mut rest = text.as_str();
        while let Some(open) = rest.find(delimiter) {
            let inner_start = open + delimiter.len();
            let close = rest[inner_start..]
                .find(delimiter)
                .ok_or(MarkupError::MalformedMarkup { delimiter })?;

            result.push(TextToken::Plain(rest[..open].to_string()));
            result.push(wrap(rest[inner_start..inner_start + close].to_string()));
            rest = &rest[inner_start + close + delimiter.len()..];
        }
        result.push(TextToken::Plain(rest.to_string()));
    }

    Ok(result)
}
