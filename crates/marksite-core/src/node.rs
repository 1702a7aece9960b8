//! HTML node tree
//!
//! A node is either a leaf (tag, text and attributes) or a parent (tag,
//! children and attributes). Both are validated when they are constructed,
//! so a tree that exists is always serializable.

use indexmap::IndexMap;

use crate::{MarkupError, Result};

/// Attribute map, kept in insertion order
pub type Attributes = IndexMap<String, String>;

/// Void (self-closing) elements that may carry an empty value
pub const VOID_ELEMENTS: &[&str] = &[
    "img", "hr", "br", "input", "meta", "link", "source", "track", "area", "embed",
];

/// Tags that cannot be built without a specific attribute
const REQUIRED_ATTRIBUTES: &[(&str, &str)] = &[("img", "src"), ("a", "href")];

/// Node name used in errors for tagless text leaves
const TEXT_NODE_NAME: &str = "#text";

/// Check if a tag is a void element
pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// A node in the HTML tree
#[derive(Debug, Clone, PartialEq)]
pub enum HtmlNode {
    /// Element with a literal value and no children, or raw text when untagged
    Leaf(LeafNode),
    /// Element defined by its ordered children
    Parent(ParentNode),
}

/// An element (or raw text) with no element children
#[derive(Debug, Clone, PartialEq)]
pub struct LeafNode {
    tag: Option<String>,
    text: String,
    attributes: Attributes,
}

/// An element that only holds child nodes
#[derive(Debug, Clone, PartialEq)]
pub struct ParentNode {
    tag: String,
    children: Vec<HtmlNode>,
    attributes: Attributes,
}

impl LeafNode {
    /// Create a leaf, validating required attributes and the value
    ///
    /// An empty tag string is treated as no tag.
    pub fn new(tag: Option<&str>, text: &str, attrs: Vec<(&str, &str)>) -> Result<Self> {
        let tag = tag.filter(|t| !t.is_empty());
        let attributes = collect_attributes(attrs);

        if let Some(tag) = tag {
            for (required_tag, attribute) in REQUIRED_ATTRIBUTES {
                if tag == *required_tag && !attributes.contains_key(*attribute) {
                    return Err(MarkupError::MissingRequiredAttribute {
                        tag: tag.to_string(),
                        attribute: *attribute,
                    });
                }
            }
        }

        if text.is_empty() && !tag.is_some_and(is_void) {
            return Err(MarkupError::EmptyLeafValue {
                tag: tag.unwrap_or(TEXT_NODE_NAME).to_string(),
            });
        }

        Ok(Self {
            tag: tag.map(str::to_string),
            text: text.to_string(),
            attributes,
        })
    }

    /// Get the tag name, `None` for raw text
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Get the literal value
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the attributes in insertion order
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Check if this leaf serializes as a self-closing element
    pub fn is_void(&self) -> bool {
        self.tag.as_deref().is_some_and(is_void)
    }
}

impl ParentNode {
    /// Create a parent, rejecting a missing tag or an empty child list
    pub fn new(tag: &str, children: Vec<HtmlNode>, attrs: Vec<(&str, &str)>) -> Result<Self> {
        if tag.is_empty() {
            return Err(MarkupError::MissingTag);
        }
        if children.is_empty() {
            return Err(MarkupError::EmptyParent {
                tag: tag.to_string(),
            });
        }

        Ok(Self {
            tag: tag.to_string(),
            children,
            attributes: collect_attributes(attrs),
        })
    }

    /// Get the tag name
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Get child nodes in document order
    pub fn children(&self) -> &[HtmlNode] {
        &self.children
    }

    /// Get the attributes in insertion order
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

impl HtmlNode {
    /// Create a raw text node
    pub fn text(text: &str) -> Result<Self> {
        LeafNode::new(None, text, Vec::new()).map(HtmlNode::Leaf)
    }

    /// Create a leaf element without attributes
    pub fn leaf(tag: &str, text: &str) -> Result<Self> {
        LeafNode::new(Some(tag), text, Vec::new()).map(HtmlNode::Leaf)
    }

    /// Create a leaf element with attributes
    pub fn leaf_with_attrs(tag: &str, text: &str, attrs: Vec<(&str, &str)>) -> Result<Self> {
        LeafNode::new(Some(tag), text, attrs).map(HtmlNode::Leaf)
    }

    /// Create a parent element without attributes
    pub fn parent(tag: &str, children: Vec<HtmlNode>) -> Result<Self> {
        ParentNode::new(tag, children, Vec::new()).map(HtmlNode::Parent)
    }

    /// Create a parent element with attributes
    pub fn parent_with_attrs(
        tag: &str,
        children: Vec<HtmlNode>,
        attrs: Vec<(&str, &str)>,
    ) -> Result<Self> {
        ParentNode::new(tag, children, attrs).map(HtmlNode::Parent)
    }

    /// Get the tag name, `None` for raw text
    pub fn tag(&self) -> Option<&str> {
        match self {
            HtmlNode::Leaf(leaf) => leaf.tag(),
            HtmlNode::Parent(parent) => Some(parent.tag()),
        }
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        let attributes = match self {
            HtmlNode::Leaf(leaf) => leaf.attributes(),
            HtmlNode::Parent(parent) => parent.attributes(),
        };
        attributes.get(name).map(String::as_str)
    }

    /// Get child nodes (always empty for leaves)
    pub fn children(&self) -> &[HtmlNode] {
        match self {
            HtmlNode::Leaf(_) => &[],
            HtmlNode::Parent(parent) => parent.children(),
        }
    }

    /// Get all text content from this node and descendants
    pub fn text_content(&self) -> String {
        match self {
            HtmlNode::Leaf(leaf) => leaf.text().to_string(),
            HtmlNode::Parent(parent) => parent
                .children()
                .iter()
                .map(HtmlNode::text_content)
                .collect(),
        }
    }

    /// Serialize this node and its descendants to HTML
    pub fn to_html(&self) -> String {
        crate::serialize::serialize(self)
    }
}

fn collect_attributes(attrs: Vec<(&str, &str)>) -> Attributes {
    attrs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_leaf() {
        let node = HtmlNode::leaf("p", "Hello, world!").unwrap();
        assert_eq!(node.tag(), Some("p"));
        assert_eq!(node.text_content(), "Hello, world!");
        assert!(node.children().is_empty());
    }

    #[test]
    fn test_create_text() {
        let node = HtmlNode::text("Plain text").unwrap();
        assert_eq!(node.tag(), None);
        assert_eq!(node.text_content(), "Plain text");
    }

    #[test]
    fn test_empty_tag_is_raw_text() {
        let leaf = LeafNode::new(Some(""), "Text", Vec::new()).unwrap();
        assert_eq!(leaf.tag(), None);
    }

    #[test]
    fn test_empty_value_rejected() {
        let err = HtmlNode::leaf("p", "").unwrap_err();
        assert_eq!(err, MarkupError::EmptyLeafValue { tag: "p".to_string() });
        assert_eq!(err.to_string(), "'p' cannot have an empty value");
    }

    #[test]
    fn test_empty_text_rejected() {
        let err = HtmlNode::text("").unwrap_err();
        assert_eq!(
            err,
            MarkupError::EmptyLeafValue {
                tag: "#text".to_string()
            }
        );
    }

    #[test]
    fn test_void_element_allows_empty_value() {
        let hr = HtmlNode::leaf("hr", "").unwrap();
        assert_eq!(hr.text_content(), "");

        let img = HtmlNode::leaf_with_attrs("img", "", vec![("src", "a.png")]).unwrap();
        assert_eq!(img.attr("src"), Some("a.png"));
    }

    #[test]
    fn test_required_attributes() {
        let err = HtmlNode::leaf("a", "Click").unwrap_err();
        assert_eq!(
            err,
            MarkupError::MissingRequiredAttribute {
                tag: "a".to_string(),
                attribute: "href"
            }
        );

        let err = HtmlNode::leaf_with_attrs("img", "", vec![("alt", "x")]).unwrap_err();
        assert!(matches!(
            err,
            MarkupError::MissingRequiredAttribute { attribute: "src", .. }
        ));
    }

    #[test]
    fn test_required_attribute_checked_before_value() {
        let err = HtmlNode::leaf("a", "").unwrap_err();
        assert!(matches!(err, MarkupError::MissingRequiredAttribute { .. }));
    }

    #[test]
    fn test_parent_requires_children() {
        let err = HtmlNode::parent("div", Vec::new()).unwrap_err();
        assert_eq!(
            err,
            MarkupError::EmptyParent {
                tag: "div".to_string()
            }
        );
    }

    #[test]
    fn test_parent_requires_tag() {
        let child = HtmlNode::text("x").unwrap();
        let err = HtmlNode::parent("", vec![child]).unwrap_err();
        assert_eq!(err, MarkupError::MissingTag);
    }

    #[test]
    fn test_text_content() {
        let div = HtmlNode::parent(
            "div",
            vec![
                HtmlNode::text("Hello ").unwrap(),
                HtmlNode::parent("span", vec![HtmlNode::leaf("b", "World").unwrap()]).unwrap(),
            ],
        )
        .unwrap();

        assert_eq!(div.children().len(), 2);
        assert_eq!(div.text_content(), "Hello World");
    }

    #[test]
    fn test_is_void() {
        assert!(is_void("img"));
        assert!(is_void("br"));
        assert!(!is_void("div"));
        assert!(!is_void("a"));
    }
}
