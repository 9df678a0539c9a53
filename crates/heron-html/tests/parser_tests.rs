//! Integration tests for tree construction.

use heron_dom::dump::dump_document;
use heron_dom::serialize::serialize_children;
use heron_dom::{DomTree, Namespace, NodeId, QuirksMode};
use heron_html::{
    HtmlParser, InsertionMode, IssueSource, ParserOptions, parse_document, parse_document_with_options,
};

/// Helper to parse HTML and return the html5lib-style dump
fn dump(html: &str) -> String {
    dump_document(&parse_document(html))
}

/// Helper to build an expected dump from its lines
fn lines(expected: &[&str]) -> String {
    expected.join("\n")
}

/// Helper to serialize the children of `<body>`
fn body_html(html: &str) -> String {
    let tree = parse_document(html);
    let body = tree.body().expect("document has a body");
    serialize_children(&tree, body)
}

/// Helper to get element by tag name (first match, depth-first)
fn find_element(tree: &DomTree, from: NodeId, tag: &str) -> Option<NodeId> {
    if tree.as_element(from).is_some_and(|data| data.local_name() == tag) {
        return Some(from);
    }
    for &child_id in tree.children(from) {
        if let Some(found) = find_element(tree, child_id, tag) {
            return Some(found);
        }
    }
    None
}

#[test]
fn test_document_structure() {
    assert_eq!(
        dump("<!DOCTYPE html><html><head></head><body></body></html>"),
        lines(&["| <!DOCTYPE html>", "| <html>", "|   <head>", "|   <body>"])
    );
}

#[test]
fn test_implied_html_head_body() {
    assert_eq!(
        dump("Hello"),
        lines(&["| <html>", "|   <head>", "|   <body>", "|     \"Hello\""])
    );
}

#[test]
fn test_void_elements() {
    assert_eq!(
        dump("<!DOCTYPE html><p>a<br>b<img src=x>c</p>"),
        lines(&[
            "| <!DOCTYPE html>",
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <p>",
            "|       \"a\"",
            "|       <br>",
            "|       \"b\"",
            "|       <img>",
            "|         src=\"x\"",
            "|       \"c\"",
        ])
    );
}

#[test]
fn test_every_void_element_is_childless() {
    let void_elements = [
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source", "track",
        "wbr",
    ];
    for tag in void_elements {
        // A stray <col> is dropped in body; it only exists inside a table.
        let html = if tag == "col" {
            format!("<!DOCTYPE html><table><{tag}>x</table>")
        } else {
            format!("<!DOCTYPE html><{tag}>x")
        };
        let tree = parse_document(&html);
        let element = find_element(&tree, tree.root(), tag).unwrap_or_else(|| panic!("no <{tag}> in {html}"));
        assert!(tree.children(element).is_empty(), "<{tag}> has children");
        assert_eq!(tree.text_content(tree.body().unwrap()), "x", "text after <{tag}>");
    }
}

#[test]
fn test_foster_parenting() {
    assert_eq!(
        dump("<table>X<tr><td>Y"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     \"X\"",
            "|     <table>",
            "|       <tbody>",
            "|         <tr>",
            "|           <td>",
            "|             \"Y\"",
        ])
    );
}

#[test]
fn test_whitespace_in_table_stays_in_table() {
    assert_eq!(
        body_html("<table> <tr> <td>x</td> </tr> </table>"),
        "<table> <tbody><tr> <td>x</td> </tr> </tbody></table>"
    );
}

#[test]
fn test_misnested_formatting() {
    assert_eq!(
        dump("<b>1<i>2</b>3</i>"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <b>",
            "|       \"1\"",
            "|       <i>",
            "|         \"2\"",
            "|     <i>",
            "|       \"3\"",
        ])
    );
}

#[test]
fn test_adoption_agency_with_furthest_block() {
    assert_eq!(
        dump("<a><p>X</a>Y"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <a>",
            "|     <p>",
            "|       <a>",
            "|         \"X\"",
            "|       \"Y\"",
        ])
    );
}

#[test]
fn test_nested_anchor_closes_previous() {
    assert_eq!(body_html("<a>1<a>2"), "<a>1</a><a>2</a>");
}

#[test]
fn test_formatting_reconstructed_after_block() {
    assert_eq!(body_html("<p><b>x</p>y"), "<p><b>x</b></p><b>y</b>");
}

#[test]
fn test_noahs_ark_tree() {
    assert_eq!(
        dump("<p><b><b><b><b><p>x"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <p>",
            "|       <b>",
            "|         <b>",
            "|           <b>",
            "|             <b>",
            "|     <p>",
            "|       <b>",
            "|         <b>",
            "|           <b>",
            "|             \"x\"",
        ])
    );
}

#[test]
fn test_noahs_ark_limits_identical_entries() {
    let mut parser = HtmlParser::new(DomTree::new(), ParserOptions::default());
    let _ = parser.parse_str("<b><b><b><b>", false).unwrap();
    assert_eq!(parser.tree_builder().active_formatting_len(), 3);
}

#[test]
fn test_noahs_ark_compares_attributes() {
    let mut parser = HtmlParser::new(DomTree::new(), ParserOptions::default());
    let _ = parser
        .parse_str("<b class=x><b class=x><b class=x><b class=y>", false)
        .unwrap();
    assert_eq!(parser.tree_builder().active_formatting_len(), 4);
}

#[test]
fn test_doctype_quirks_modes() {
    let cases = [
        ("<!DOCTYPE html>", QuirksMode::NoQuirks),
        ("<p>no doctype", QuirksMode::Quirks),
        (
            r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN">"#,
            QuirksMode::Quirks,
        ),
        (
            r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN" "http://www.w3.org/TR/html4/loose.dtd">"#,
            QuirksMode::LimitedQuirks,
        ),
        (
            r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">"#,
            QuirksMode::LimitedQuirks,
        ),
        ("<!DOCTYPE potato>", QuirksMode::Quirks),
        ("<!DOCTYPE>", QuirksMode::Quirks),
    ];
    for (input, expected) in cases {
        assert_eq!(parse_document(input).quirks_mode(), expected, "input: {input}");
    }
}

#[test]
fn test_iframe_srcdoc_never_quirks() {
    let options = ParserOptions::default().with_iframe_srcdoc(true);
    let (tree, issues) = parse_document_with_options("<p>x", options);
    assert_eq!(tree.quirks_mode(), QuirksMode::NoQuirks);
    assert!(issues.is_empty());
}

#[test]
fn test_table_inside_p_depends_on_quirks() {
    assert_eq!(body_html("<p><table></table>"), "<p><table></table></p>");
    assert_eq!(
        body_html("<!DOCTYPE html><p><table></table>"),
        "<p></p><table></table>"
    );
}

#[test]
fn test_rcdata_title() {
    let tree = parse_document("<title>a &amp; <b></title>");
    let title = find_element(&tree, tree.root(), "title").unwrap();
    assert_eq!(tree.text_content(title), "a & <b>");
}

#[test]
fn test_raw_text_script() {
    let tree = parse_document("<script>if (a<b && c) {}</script>");
    let script = find_element(&tree, tree.root(), "script").unwrap();
    assert_eq!(tree.text_content(script), "if (a<b && c) {}");
    let head = tree.head().unwrap();
    assert_eq!(tree.parent(script), Some(head));
}

#[test]
fn test_pre_drops_leading_newline() {
    assert_eq!(body_html("<pre>\nfoo</pre>"), "<pre>foo</pre>");
    let tree = parse_document("<pre>\n\nfoo</pre>");
    let pre = find_element(&tree, tree.root(), "pre").unwrap();
    assert_eq!(tree.text_content(pre), "\nfoo");
}

#[test]
fn test_implied_end_tags_for_list_items() {
    assert_eq!(
        body_html("<ul><li>a<li>b</ul>"),
        "<ul><li>a</li><li>b</li></ul>"
    );
    assert_eq!(
        body_html("<dl><dt>a<dd>b<dt>c</dl>"),
        "<dl><dt>a</dt><dd>b</dd><dt>c</dt></dl>"
    );
}

#[test]
fn test_block_closes_paragraph() {
    assert_eq!(body_html("<p>a<div>b</div>"), "<p>a</p><div>b</div>");
    assert_eq!(body_html("<h1>a<h2>b"), "<h1>a</h1><h2>b</h2>");
}

#[test]
fn test_stray_end_p_inserts_empty_paragraph() {
    assert_eq!(body_html("a</p>b"), "a<p></p>b");
}

#[test]
fn test_table_sections_are_implied() {
    assert_eq!(
        body_html("<table><td>a<td>b</table>"),
        "<table><tbody><tr><td>a</td><td>b</td></tr></tbody></table>"
    );
    assert_eq!(
        body_html("<table><col></table>"),
        "<table><colgroup><col></colgroup></table>"
    );
    assert_eq!(
        body_html("<table><caption>c<tr><td>x</table>"),
        "<table><caption>c</caption><tbody><tr><td>x</td></tr></tbody></table>"
    );
}

#[test]
fn test_caption_end_tag_closes_formatting() {
    // </caption> pops the open <b> and clears it from the formatting list,
    // so the text after it is foster parented without a new <b>.
    assert_eq!(
        body_html("<table><caption><b>c</caption>x</table>"),
        "x<table><caption><b>c</b></caption></table>"
    );
}

#[test]
fn test_select_options() {
    assert_eq!(
        body_html("<select><option>a<option>b</select>"),
        "<select><option>a</option><option>b</option></select>"
    );
}

#[test]
fn test_select_in_table_closed_by_cell() {
    assert_eq!(
        body_html("<table><tr><td><select><option>a<td>b</table>"),
        "<table><tbody><tr><td><select><option>a</option></select></td><td>b</td></tr></tbody></table>"
    );
}

#[test]
fn test_template_contents() {
    assert_eq!(
        dump("<template><td>x</td></template>"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|     <template>",
            "|       content",
            "|         <td>",
            "|           \"x\"",
            "|   <body>",
        ])
    );
}

#[test]
fn test_template_serializes_its_contents() {
    assert_eq!(
        body_html("<body><template><b>x</b></template>"),
        "<template><b>x</b></template>"
    );
}

#[test]
fn test_svg_content() {
    assert_eq!(
        dump(r#"<svg viewbox="0 0 1 1"><foreignobject><p>hi</p></foreignobject></svg>"#),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <svg svg>",
            "|       viewBox=\"0 0 1 1\"",
            "|       <svg foreignObject>",
            "|         <p>",
            "|           \"hi\"",
        ])
    );
}

#[test]
fn test_mathml_content() {
    let tree = parse_document("<math><mi>x</mi></math>");
    let mi = find_element(&tree, tree.root(), "mi").unwrap();
    assert_eq!(tree.as_element(mi).unwrap().namespace(), Namespace::MathMl);
    assert_eq!(tree.text_content(mi), "x");
}

#[test]
fn test_foreign_attributes() {
    let tree = parse_document(r##"<svg xlink:href="#a" xml:lang="en"></svg>"##);
    let svg = find_element(&tree, tree.root(), "svg").unwrap();
    let element = tree.as_element(svg).unwrap();
    assert_eq!(element.get_attribute_ns(Namespace::XLink, "href"), Some("#a"));
    assert_eq!(element.get_attribute_ns(Namespace::Xml, "lang"), Some("en"));
}

#[test]
fn test_cdata_in_svg() {
    let tree = parse_document("<svg><![CDATA[a<b]]></svg>");
    let svg = find_element(&tree, tree.root(), "svg").unwrap();
    assert_eq!(tree.text_content(svg), "a<b");
}

#[test]
fn test_html_breaks_out_of_svg() {
    assert_eq!(
        dump("<svg><p>x"),
        lines(&[
            "| <html>",
            "|   <head>",
            "|   <body>",
            "|     <svg svg>",
            "|     <p>",
            "|       \"x\"",
        ])
    );
}

#[test]
fn test_comments_outside_html() {
    assert_eq!(
        dump("<!--c--><html></html><!--d-->"),
        lines(&[
            "| <!-- c -->",
            "| <html>",
            "|   <head>",
            "|   <body>",
            "| <!-- d -->",
        ])
    );
}

#[test]
fn test_stray_html_start_tag_merges_attributes() {
    let tree = parse_document("<html a=1><body><html a=3 b=2>");
    let html = tree.document_element().unwrap();
    let element = tree.as_element(html).unwrap();
    assert_eq!(element.get_attribute("a"), Some("1"));
    assert_eq!(element.get_attribute("b"), Some("2"));
}

#[test]
fn test_frameset() {
    assert_eq!(
        dump("<frameset><frame></frameset>"),
        lines(&["| <html>", "|   <head>", "|   <frameset>", "|     <frame>"])
    );
}

#[test]
fn test_nested_form_is_ignored() {
    assert_eq!(
        body_html("<form><form><input></form>"),
        "<form><input></form>"
    );
}

#[test]
fn test_image_becomes_img() {
    assert_eq!(body_html("<image src=a>"), "<img src=\"a\">");
}

#[test]
fn test_noscript_follows_scripting_flag() {
    let input = "<body><noscript><p>a</p></noscript>";
    let tree = parse_document(input);
    let noscript = find_element(&tree, tree.root(), "noscript").unwrap();
    assert_eq!(tree.text_content(noscript), "<p>a</p>");
    assert!(find_element(&tree, tree.root(), "p").is_none());

    let options = ParserOptions::default().with_scripting(false);
    let (tree, _) = parse_document_with_options(input, options);
    let p = find_element(&tree, tree.root(), "p").unwrap();
    assert_eq!(tree.text_content(p), "a");
}

#[test]
fn test_null_characters_in_body_are_dropped() {
    assert_eq!(body_html("a\0b"), "ab");
}

#[test]
fn test_parse_issues_are_reported() {
    let (_, issues) = parse_document_with_options("<p>a</div>", ParserOptions::default());
    assert!(issues
        .iter()
        .any(|issue| issue.message == "expected-doctype-but-got-other"));
    assert!(issues.iter().all(|issue| issue.source == IssueSource::TreeBuilder));
    assert!(issues.len() >= 2);

    let (_, issues) = parse_document_with_options("<!DOCTYPE html><p>a</p>", ParserOptions::default());
    assert!(issues.is_empty());
}

#[test]
fn test_tokenizer_issues_come_first() {
    let mut parser = HtmlParser::new(DomTree::new(), ParserOptions::default());
    let _ = parser.parse_str("<p a=1 a=2>", true).unwrap();
    let issues = parser.issues();
    assert_eq!(issues[0].source, IssueSource::Tokenizer);
    assert_eq!(issues[0].message, "duplicate-attribute");
    assert_eq!(issues.last().unwrap().source, IssueSource::TreeBuilder);
}

#[test]
fn test_insertion_mode_after_body() {
    let mut parser = HtmlParser::new(DomTree::new(), ParserOptions::default());
    let _ = parser.parse_str("<body></body>", false).unwrap();
    assert_eq!(parser.tree_builder().mode(), InsertionMode::AfterBody);
    assert_eq!(InsertionMode::InTableText.to_string(), "in_table_text");
}

#[test]
fn test_text_after_body_goes_into_body() {
    assert_eq!(body_html("<body>a</body>b"), "ab");
}
