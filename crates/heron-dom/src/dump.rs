//! The html5lib tree-construction test format.
//!
//! ```text
//! | <!DOCTYPE html>
//! | <html>
//! |   <head>
//! |   <body>
//! |     <svg svg>
//! |       viewBox="0 0 1 1"
//! |     "text"
//! ```
//!
//! Each node is one line, indented two spaces per level. Attributes are
//! listed under their element in sorted order, template contents appear
//! under a `content` line.

use crate::{DomTree, Namespace, NodeId, NodeType};

/// Dump every child of the document.
#[must_use]
pub fn dump_document(tree: &DomTree) -> String {
    dump_children(tree, tree.root())
}

/// Dump the children of `node` (use the fragment root for fragment parses).
#[must_use]
pub fn dump_children(tree: &DomTree, node: NodeId) -> String {
    let mut lines = Vec::new();
    for &child in tree.children(node) {
        dump_node(tree, child, 0, &mut lines);
    }
    lines.join("\n")
}

fn line(indent: usize, text: &str) -> String {
    format!("| {}{text}", " ".repeat(indent))
}

fn dump_node(tree: &DomTree, node: NodeId, indent: usize, lines: &mut Vec<String>) {
    let Some(current) = tree.get(node) else {
        return;
    };
    match &current.node_type {
        NodeType::Doctype(doctype) => {
            let text = if doctype.public_id.is_empty() && doctype.system_id.is_empty() {
                format!("<!DOCTYPE {}>", doctype.name)
            } else {
                format!(
                    "<!DOCTYPE {} \"{}\" \"{}\">",
                    doctype.name, doctype.public_id, doctype.system_id
                )
            };
            lines.push(line(indent, &text));
        }
        NodeType::Comment(data) => lines.push(line(indent, &format!("<!-- {data} -->"))),
        NodeType::Text(data) => lines.push(line(indent, &format!("\"{data}\""))),
        NodeType::Element(element) => {
            let prefix = match element.namespace() {
                Namespace::Svg => "svg ",
                Namespace::MathMl => "math ",
                _ => "",
            };
            lines.push(line(indent, &format!("<{prefix}{}>", element.local_name())));

            let mut attrs: Vec<(String, &str)> = element
                .attrs
                .iter()
                .map(|attr| {
                    let ns = match attr.name.ns {
                        Namespace::XLink => "xlink ",
                        Namespace::Xml => "xml ",
                        Namespace::Xmlns => "xmlns ",
                        _ => "",
                    };
                    (format!("{ns}{}", attr.name.local), attr.value.as_str())
                })
                .collect();
            attrs.sort();
            for (name, value) in attrs {
                lines.push(line(indent + 2, &format!("{name}=\"{value}\"")));
            }

            if let Some(contents) = element.template_contents {
                lines.push(line(indent + 2, "content"));
                for &child in tree.children(contents) {
                    dump_node(tree, child, indent + 4, lines);
                }
            }
            for &child in tree.children(node) {
                dump_node(tree, child, indent + 2, lines);
            }
        }
        NodeType::Document { .. } | NodeType::DocumentFragment => {
            for &child in tree.children(node) {
                dump_node(tree, child, indent, lines);
            }
        }
    }
}
