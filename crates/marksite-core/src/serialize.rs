//! HTML node tree serialization
//!
//! Converts a validated node tree into an HTML string. Text and attribute
//! values are emitted as-is.

use crate::node::{Attributes, HtmlNode, LeafNode, ParentNode};

/// Serialize a node tree to an HTML string
pub fn serialize(node: &HtmlNode) -> String {
    let mut output = String::with_capacity(256);
    serialize_node(node, &mut output);
    output
}

fn serialize_node(node: &HtmlNode, out: &mut String) {
    match node {
        HtmlNode::Leaf(leaf) => serialize_leaf(leaf, out),
        HtmlNode::Parent(parent) => serialize_parent(parent, out),
    }
}

fn serialize_leaf(leaf: &LeafNode, out: &mut String) {
    let Some(tag) = leaf.tag() else {
        out.push_str(leaf.text());
        return;
    };

    out.push('<');
    out.push_str(tag);
    push_attributes(leaf.attributes(), out);

    if leaf.is_void() {
        out.push_str(" />");
        return;
    }

    out.push('>');
    out.push_str(leaf.text());
    push_closing_tag(tag, out);
}

fn serialize_parent(parent: &ParentNode, out: &mut String) {
    out.push('<');
    out.push_str(parent.tag());
    push_attributes(parent.attributes(), out);
    out.push('>');

    for child in parent.children() {
        serialize_node(child, out);
    }

    push_closing_tag(parent.tag(), out);
}

fn push_attributes(attributes: &Attributes, out: &mut String) {
    for (name, value) in attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
}

fn push_closing_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
