//! Integration tests for fragment parsing.

use heron_dom::dump::dump_children;
use heron_dom::serialize::serialize_children;
use heron_dom::{DomTree, Namespace, QualName};
use heron_html::{HtmlParser, ParseStatus, ParserOptions, parse_fragment};

/// Helper to parse `input` inside an HTML `context` element and dump the result
fn fragment(context: &str, input: &str) -> String {
    let (tree, root) = parse_fragment(QualName::html(context), input);
    dump_children(&tree, root)
}

/// Helper to join expected dump lines
fn lines(expected: &[&str]) -> String {
    expected.join("\n")
}

#[test]
fn test_fragment_in_div() {
    assert_eq!(
        fragment("div", "<p>a<p>b"),
        lines(&["| <p>", "|   \"a\"", "| <p>", "|   \"b\""])
    );
}

#[test]
fn test_fragment_has_no_head_or_body() {
    assert_eq!(
        fragment("div", "<title>t</title>x"),
        lines(&["| <title>", "|   \"t\"", "| \"x\""])
    );
}

#[test]
fn test_fragment_in_td() {
    assert_eq!(fragment("td", "<b>bold"), lines(&["| <b>", "|   \"bold\""]));
}

#[test]
fn test_fragment_in_tr() {
    assert_eq!(fragment("tr", "<td>a"), lines(&["| <td>", "|   \"a\""]));
}

#[test]
fn test_fragment_in_table_implies_tbody() {
    assert_eq!(
        fragment("table", "<tr><td>x"),
        lines(&["| <tbody>", "|   <tr>", "|     <td>", "|       \"x\""])
    );
}

#[test]
fn test_fragment_in_select() {
    assert_eq!(
        fragment("select", "<option>a<option>b"),
        lines(&["| <option>", "|   \"a\"", "| <option>", "|   \"b\""])
    );
}

#[test]
fn test_fragment_in_template() {
    assert_eq!(fragment("template", "<td>x"), lines(&["| <td>", "|   \"x\""]));
}

#[test]
fn test_fragment_in_caption_ignores_unmatched_end_tag() {
    // The context caption is not on the stack, so there is nothing to close.
    assert_eq!(fragment("caption", "a</caption>b"), lines(&["| \"ab\""]));
}

#[test]
fn test_fragment_in_title_is_rcdata() {
    assert_eq!(fragment("title", "a<b>&amp;"), lines(&["| \"a<b>&\""]));
    assert_eq!(fragment("textarea", "<p>&lt;"), lines(&["| \"<p><\""]));
}

#[test]
fn test_fragment_in_script_is_raw() {
    assert_eq!(fragment("script", "<p>&amp;"), lines(&["| \"<p>&amp;\""]));
}

#[test]
fn test_fragment_context_name_ends_raw_text() {
    // The context element's name counts as the last start tag, so its end
    // tag leaves the RCDATA state.
    assert_eq!(fragment("title", "x</title>y"), lines(&["| \"xy\""]));
    assert_eq!(fragment("title", "x</style>y"), lines(&["| \"x</style>y\""]));
}

#[test]
fn test_fragment_in_svg() {
    let (tree, root) = parse_fragment(QualName::new(Namespace::Svg, "svg"), r#"<circle r="1"/>text"#);
    assert_eq!(
        dump_children(&tree, root),
        lines(&["| <svg circle>", "|   r=\"1\"", "| \"text\""])
    );
}

#[test]
fn test_fragment_in_svg_with_integration_point() {
    let (tree, root) = parse_fragment(
        QualName::new(Namespace::Svg, "svg"),
        "<foreignobject><p>x</p></foreignobject>",
    );
    assert_eq!(
        dump_children(&tree, root),
        lines(&["| <svg foreignObject>", "|   <p>", "|     \"x\""])
    );
}

#[test]
fn test_fragment_parser_streams_input() {
    let mut tree = DomTree::new();
    let context = tree.create_element(QualName::html("div"));
    let mut parser = HtmlParser::new_fragment(tree, &context, ParserOptions::default());

    assert_eq!(parser.parse_str("<p>a<", false).unwrap(), ParseStatus::NeedMoreInput);
    assert_eq!(parser.parse_str("p>b", true).unwrap(), ParseStatus::Finished);

    let root = *parser.fragment_root().unwrap();
    let tree = parser.into_sink();
    assert_eq!(serialize_children(&tree, root), "<p>a</p><p>b</p>");
    // The context element itself is never modified.
    assert!(tree.children(context).is_empty());
}
