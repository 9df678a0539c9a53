//! Tests for DOM tree mutation, serialization and the html5lib dump.

use heron_dom::dump::dump_document;
use heron_dom::serialize::{serialize, serialize_children};
use heron_dom::{DoctypeData, DomTree, Namespace, NodeId, QualName, QuirksMode};

/// Helper to create an HTML element node and return its NodeId.
fn element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.create_element(QualName::html(tag))
}

// ========== insert / detach ==========

#[test]
fn test_append_child_moves_node_from_old_parent() {
    let mut tree = DomTree::new();
    let a = element(&mut tree, "div");
    let b = element(&mut tree, "div");
    let child = element(&mut tree, "p");
    tree.append_child(NodeId::ROOT, a);
    tree.append_child(a, b);
    tree.append_child(a, child);

    tree.append_child(b, child);

    assert_eq!(tree.children(a), &[b]);
    assert_eq!(tree.children(b), &[child]);
    assert_eq!(tree.parent(child), Some(b));
}

#[test]
fn test_insert_before_places_node_ahead_of_reference() {
    let mut tree = DomTree::new();
    let parent = element(&mut tree, "div");
    let a = element(&mut tree, "a");
    let c = element(&mut tree, "c");
    tree.append_child(parent, a);
    tree.append_child(parent, c);

    let b = element(&mut tree, "b");
    tree.insert_before(parent, b, c);

    assert_eq!(tree.children(parent), &[a, b, c]);
    assert_eq!(tree.prev_sibling(b), Some(a));
    assert_eq!(tree.next_sibling(b), Some(c));
}

#[test]
fn test_detach_middle_child() {
    let mut tree = DomTree::new();
    let parent = element(&mut tree, "div");
    let a = element(&mut tree, "a");
    let b = element(&mut tree, "b");
    let c = element(&mut tree, "c");
    for id in [a, b, c] {
        tree.append_child(parent, id);
    }

    tree.detach(b);

    assert_eq!(tree.children(parent), &[a, c]);
    assert_eq!(tree.parent(b), None);
    assert_eq!(tree.next_sibling(a), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(a));
}

#[test]
fn test_reparent_children_keeps_order() {
    let mut tree = DomTree::new();
    let from = element(&mut tree, "b");
    let to = element(&mut tree, "i");
    let existing = tree.create_text("0");
    tree.append_child(to, existing);
    let one = tree.create_text("1");
    let two = element(&mut tree, "span");
    tree.append_child(from, one);
    tree.append_child(from, two);

    tree.reparent_children(from, to);

    assert!(tree.children(from).is_empty());
    assert_eq!(tree.children(to), &[existing, one, two]);
    assert_eq!(tree.parent(two), Some(to));
}

#[test]
fn test_append_text_only_on_text_nodes() {
    let mut tree = DomTree::new();
    let text = tree.create_text("ab");
    let div = element(&mut tree, "div");

    assert!(tree.append_text(text, "cd"));
    assert!(!tree.append_text(div, "cd"));
    assert_eq!(tree.as_text(text), Some("abcd"));
}

#[test]
fn test_set_attribute_replaces_existing_value() {
    let mut tree = DomTree::new();
    let div = element(&mut tree, "div");
    let data = tree.as_element_mut(div).unwrap();
    data.set_attribute(QualName::attribute("id"), "a".to_string());
    data.set_attribute(QualName::attribute("class"), "x".to_string());
    data.set_attribute(QualName::attribute("id"), "b".to_string());

    let data = tree.as_element(div).unwrap();
    assert_eq!(data.attrs.len(), 2);
    assert_eq!(data.get_attribute("id"), Some("b"));
    assert_eq!(data.attrs[0].name.local, "id");
}

#[test]
fn test_template_gets_contents_fragment() {
    let mut tree = DomTree::new();
    let template = element(&mut tree, "template");
    let div = element(&mut tree, "div");

    assert!(tree.template_contents(template).is_some());
    assert!(tree.template_contents(div).is_none());
}

#[test]
fn test_document_accessors() {
    let mut tree = DomTree::new();
    let html = element(&mut tree, "html");
    let head = element(&mut tree, "head");
    let body = element(&mut tree, "body");
    let doctype = tree.create_doctype(DoctypeData {
        name: "html".to_string(),
        ..DoctypeData::default()
    });
    tree.append_child(NodeId::ROOT, doctype);
    tree.append_child(NodeId::ROOT, html);
    tree.append_child(html, head);
    tree.append_child(html, body);
    tree.set_quirks_mode(QuirksMode::LimitedQuirks);

    assert_eq!(tree.document_element(), Some(html));
    assert_eq!(tree.head(), Some(head));
    assert_eq!(tree.body(), Some(body));
    assert_eq!(tree.quirks_mode(), QuirksMode::LimitedQuirks);
    assert_eq!(tree.ancestors(body).collect::<Vec<_>>(), vec![html, NodeId::ROOT]);
}

// ========== serialization ==========

fn small_document() -> (DomTree, NodeId) {
    let mut tree = DomTree::new();
    let html = element(&mut tree, "html");
    let body = element(&mut tree, "body");
    tree.append_child(NodeId::ROOT, html);
    tree.append_child(html, body);
    (tree, body)
}

#[test]
fn test_serialize_escapes_text_and_attributes() {
    let (mut tree, body) = small_document();
    let p = element(&mut tree, "p");
    tree.as_element_mut(p)
        .unwrap()
        .set_attribute(QualName::attribute("title"), "a\"b&c".to_string());
    let text = tree.create_text("1 < 2 & 3\u{a0}");
    tree.append_child(body, p);
    tree.append_child(p, text);

    assert_eq!(
        serialize_children(&tree, body),
        "<p title=\"a&quot;b&amp;c\">1 &lt; 2 &amp; 3&nbsp;</p>"
    );
}

#[test]
fn test_serialize_void_and_raw_text_elements() {
    let (mut tree, body) = small_document();
    let br = element(&mut tree, "br");
    let script = element(&mut tree, "script");
    let code = tree.create_text("if (a < b) {}");
    tree.append_child(body, br);
    tree.append_child(body, script);
    tree.append_child(script, code);

    assert_eq!(
        serialize_children(&tree, body),
        "<br><script>if (a < b) {}</script>"
    );
}

#[test]
fn test_serialize_namespaced_attributes_and_comments() {
    let (mut tree, body) = small_document();
    let svg = tree.create_element(QualName::new(Namespace::Svg, "svg"));
    tree.as_element_mut(svg).unwrap().set_attribute(
        QualName {
            ns: Namespace::XLink,
            prefix: Some("xlink".to_string()),
            local: "href".to_string(),
        },
        "#a".to_string(),
    );
    let comment = tree.create_comment(" note ");
    tree.append_child(body, svg);
    tree.append_child(body, comment);

    assert_eq!(
        serialize(&tree, body),
        "<body><svg xlink:href=\"#a\"></svg><!-- note --></body>"
    );
}

#[test]
fn test_serialize_pre_keeps_leading_newline() {
    let (mut tree, body) = small_document();
    let pre = element(&mut tree, "pre");
    let text = tree.create_text("\nx");
    tree.append_child(body, pre);
    tree.append_child(pre, text);

    assert_eq!(serialize_children(&tree, body), "<pre>\n\nx</pre>");
}

#[test]
fn test_serialize_template_contents() {
    let (mut tree, body) = small_document();
    let template = element(&mut tree, "template");
    let contents = tree.template_contents(template).unwrap();
    let span = element(&mut tree, "span");
    tree.append_child(body, template);
    tree.append_child(contents, span);

    assert_eq!(
        serialize_children(&tree, body),
        "<template><span></span></template>"
    );
}

// ========== dump ==========

#[test]
fn test_dump_document_format() {
    let mut tree = DomTree::new();
    let doctype = tree.create_doctype(DoctypeData {
        name: "html".to_string(),
        ..DoctypeData::default()
    });
    let html = element(&mut tree, "html");
    let body = element(&mut tree, "body");
    let svg = tree.create_element(QualName::new(Namespace::Svg, "svg"));
    tree.as_element_mut(svg)
        .unwrap()
        .set_attribute(QualName::attribute("viewBox"), "0 0 1 1".to_string());
    tree.as_element_mut(svg)
        .unwrap()
        .set_attribute(QualName::attribute("class"), "c".to_string());
    let text = tree.create_text("hi");
    tree.append_child(NodeId::ROOT, doctype);
    tree.append_child(NodeId::ROOT, html);
    tree.append_child(html, body);
    tree.append_child(body, svg);
    tree.append_child(body, text);

    let expected = [
        "| <!DOCTYPE html>",
        "| <html>",
        "|   <body>",
        "|     <svg svg>",
        "|       class=\"c\"",
        "|       viewBox=\"0 0 1 1\"",
        "|     \"hi\"",
    ]
    .join("\n");
    assert_eq!(dump_document(&tree), expected);
}
