//! [§ 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)
//!
//! Turns a (sub)tree back into markup. The output of serializing a parsed
//! well-formed document reparses to the same tree.

use crate::{DomTree, Namespace, NodeId, NodeType, QualName};

/// Elements whose start tag is serialized without children or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Elements whose text children are emitted without escaping.
const RAW_TEXT_PARENTS: &[&str] = &[
    "style",
    "script",
    "xmp",
    "iframe",
    "noembed",
    "noframes",
    "plaintext",
];

/// Serialize `node` itself followed by its subtree (the `outerHTML` view).
/// A document node serializes to its children.
#[must_use]
pub fn serialize(tree: &DomTree, node: NodeId) -> String {
    let mut out = String::new();
    match tree.get(node).map(|n| &n.node_type) {
        Some(NodeType::Document { .. } | NodeType::DocumentFragment) => {
            write_children(tree, node, &mut out);
        }
        Some(_) => write_node(tree, node, &mut out),
        None => {}
    }
    out
}

/// "The HTML fragment serialization algorithm" (the `innerHTML` view).
#[must_use]
pub fn serialize_children(tree: &DomTree, node: NodeId) -> String {
    let mut out = String::new();
    write_children(tree, node, &mut out);
    out
}

fn write_children(tree: &DomTree, node: NodeId, out: &mut String) {
    // "If the node is a template element, then let the node instead be the
    // template element's template contents"
    let node = tree.template_contents(node).unwrap_or(node);
    for &child in tree.children(node) {
        write_node(tree, child, out);
    }
}

fn write_node(tree: &DomTree, node: NodeId, out: &mut String) {
    let Some(current) = tree.get(node) else {
        return;
    };
    match &current.node_type {
        NodeType::Element(element) => {
            let tag = element.local_name();
            out.push('<');
            out.push_str(tag);
            for attr in &element.attrs {
                out.push(' ');
                push_attribute_name(&attr.name, out);
                out.push_str("=\"");
                escape(&attr.value, true, out);
                out.push('"');
            }
            out.push('>');

            let is_html = element.namespace() == Namespace::Html;
            if is_html && VOID_ELEMENTS.contains(&tag) {
                return;
            }
            // The parser drops one leading newline after these start tags.
            if is_html && matches!(tag, "pre" | "textarea" | "listing") {
                let first_text = tree.first_child(node).and_then(|c| tree.as_text(c));
                if first_text.is_some_and(|text| text.starts_with('\n')) {
                    out.push('\n');
                }
            }
            write_children(tree, node, out);
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        NodeType::Text(text) => {
            let raw_parent = tree
                .parent(node)
                .and_then(|p| tree.as_element(p))
                .is_some_and(|p| {
                    p.namespace() == Namespace::Html && RAW_TEXT_PARENTS.contains(&p.local_name())
                });
            if raw_parent {
                out.push_str(text);
            } else {
                escape(text, false, out);
            }
        }
        NodeType::Comment(data) => {
            out.push_str("<!--");
            out.push_str(data);
            out.push_str("-->");
        }
        NodeType::Doctype(doctype) => {
            out.push_str("<!DOCTYPE ");
            out.push_str(&doctype.name);
            out.push('>');
        }
        NodeType::Document { .. } | NodeType::DocumentFragment => write_children(tree, node, out),
    }
}

/// "the attribute's serialized name"
fn push_attribute_name(name: &QualName, out: &mut String) {
    match name.ns {
        Namespace::None => {}
        Namespace::Xml => out.push_str("xml:"),
        Namespace::Xmlns if name.local == "xmlns" => {}
        Namespace::Xmlns => out.push_str("xmlns:"),
        Namespace::XLink => out.push_str("xlink:"),
        _ => {
            if let Some(prefix) = &name.prefix {
                out.push_str(prefix);
                out.push(':');
            }
        }
    }
    out.push_str(&name.local);
}

/// [§ 13.3 Escaping a string](https://html.spec.whatwg.org/multipage/parsing.html#escapingString)
fn escape(text: &str, attribute_mode: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            '"' if attribute_mode => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}
