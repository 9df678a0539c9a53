//! Integration tests for incremental parsing, pausing and script re-entrancy.

use std::cell::RefCell;
use std::rc::Rc;

use heron_dom::DomTree;
use heron_dom::dump::dump_document;
use heron_dom::serialize::serialize_children;
use heron_html::{HtmlError, HtmlParser, ParseStatus, ParserOptions, parse_document};
use quickcheck_macros::quickcheck;

const SAMPLE: &str = "<!DOCTYPE html>\r\n<html><head><title>A &amp; B</title></head>\r\n\
<body><p class=x>One<b>two<i>three</b>four</i>\r\n<table>X<tr><td>\u{1F600}&notit;</table>\
<svg viewBox='0 0 1 1'><foreignObject><p>in</p></foreignObject></svg><!-- done --></body></html>";

/// Helper to parse `input` in chunks of `size` UTF-16 code units
fn parse_in_chunks(input: &str, size: usize) -> DomTree {
    let units: Vec<u16> = input.encode_utf16().collect();
    let mut parser = HtmlParser::new(DomTree::new(), ParserOptions::default());
    for chunk in units.chunks(size) {
        assert_eq!(parser.parse(chunk, false).unwrap(), ParseStatus::NeedMoreInput);
    }
    assert_eq!(parser.parse(&[], true).unwrap(), ParseStatus::Finished);
    parser.into_sink()
}

/// Helper to parse `input` split at the given UTF-16 offsets
fn parse_split_at(input: &str, offsets: &[usize]) -> DomTree {
    let units: Vec<u16> = input.encode_utf16().collect();
    let mut parser = HtmlParser::new(DomTree::new(), ParserOptions::default());
    let mut start = 0;
    for &offset in offsets {
        let _ = parser.parse(&units[start..offset], false).unwrap();
        start = offset;
    }
    let _ = parser.parse(&units[start..], true).unwrap();
    parser.into_sink()
}

/// Helper to serialize the body of a parsed tree
fn body_html(tree: &DomTree) -> String {
    serialize_children(tree, tree.body().unwrap())
}

#[test]
fn test_single_code_unit_chunks_match_whole_input() {
    let expected = dump_document(&parse_document(SAMPLE));
    assert_eq!(dump_document(&parse_in_chunks(SAMPLE, 1)), expected);
}

#[test]
fn test_various_chunk_sizes_match_whole_input() {
    let expected = dump_document(&parse_document(SAMPLE));
    for size in [2, 3, 5, 7, 16, 64] {
        assert_eq!(
            dump_document(&parse_in_chunks(SAMPLE, size)),
            expected,
            "chunk size {size}"
        );
    }
}

#[test]
fn test_crlf_split_between_chunks() {
    let tree = parse_split_at("<pre>a\r\nb</pre>", &[7]);
    assert_eq!(body_html(&tree), "<pre>a\nb</pre>");
}

#[test]
fn test_leading_newline_in_pre_split_from_tag() {
    let tree = parse_split_at("<pre>\r\nx</pre>", &[5, 6]);
    assert_eq!(body_html(&tree), "<pre>x</pre>");
}

#[test]
fn test_surrogate_pair_split_between_chunks() {
    let input = "<p>\u{1F600}</p>";
    let high = 3;
    assert!(char::decode_utf16([input.encode_utf16().nth(high).unwrap()]).all(|c| c.is_err()));

    let tree = parse_split_at(input, &[high + 1]);
    assert_eq!(body_html(&tree), "<p>\u{1F600}</p>");
}

#[test]
fn test_character_reference_split_between_chunks() {
    let tree = parse_split_at("<p>&not", &[5]);
    let tree_tail = parse_split_at("<p>&notit;", &[5, 7]);
    assert_eq!(body_html(&tree), "<p>\u{00AC}</p>");
    assert_eq!(body_html(&tree_tail), "<p>\u{00AC}it;</p>");
}

#[test]
fn test_need_more_input_until_final() {
    let mut parser = HtmlParser::new(DomTree::new(), ParserOptions::default());
    assert_eq!(parser.parse_str("<title>Hel", false).unwrap(), ParseStatus::NeedMoreInput);
    assert_eq!(parser.parse_str("lo</title>", false).unwrap(), ParseStatus::NeedMoreInput);
    assert_eq!(parser.parse_str("", true).unwrap(), ParseStatus::Finished);

    let tree = parser.into_sink();
    assert_eq!(tree.text_content(tree.head().unwrap()), "Hello");
}

#[test]
fn test_input_after_final_chunk_is_rejected() {
    let mut parser = HtmlParser::new(DomTree::new(), ParserOptions::default());
    assert_eq!(parser.parse_str("<p>a", true).unwrap(), ParseStatus::Finished);
    assert_eq!(parser.parse_str("b", false), Err(HtmlError::StreamClosed));
    // An empty chunk is still accepted.
    assert_eq!(parser.parse(&[], true), Ok(ParseStatus::Finished));
}

#[test]
fn test_pause_queues_input_until_resume() {
    let mut parser = HtmlParser::new(DomTree::new(), ParserOptions::default());
    assert_eq!(parser.parse_str("<p>a", false).unwrap(), ParseStatus::NeedMoreInput);

    parser.pause();
    parser.pause();
    assert!(parser.is_paused());
    assert_eq!(parser.parse_str("<p>b", true).unwrap(), ParseStatus::Paused);
    assert_eq!(body_html(parser.sink()), "<p>a</p>");

    // The counter has to drop back to zero.
    assert_eq!(parser.resume(), ParseStatus::Paused);
    assert_eq!(parser.resume(), ParseStatus::Finished);
    assert!(!parser.is_paused());
    assert_eq!(body_html(&parser.into_sink()), "<p>a</p><p>b</p>");
}

#[test]
fn test_should_pause_callback() {
    let units: Vec<u16> = "<p>one</p><p>two</p>".encode_utf16().collect();
    let mut parser = HtmlParser::new(DomTree::new(), ParserOptions::default());

    let status = parser
        .parse_with(&units, true, |tree: &DomTree| tree.body().is_some())
        .unwrap();
    assert_eq!(status, ParseStatus::Paused);
    assert!(parser.is_paused());

    assert_eq!(parser.resume(), ParseStatus::Finished);
    assert_eq!(body_html(&parser.into_sink()), "<p>one</p><p>two</p>");
}

#[test]
fn test_insert_outside_script_hook_is_an_error() {
    let mut parser = HtmlParser::new(DomTree::new(), ParserOptions::default());
    assert_eq!(parser.insert("<b>x</b>"), Err(HtmlError::NotInScript));
}

#[test]
fn test_script_hook_inserts_markup_after_the_script() {
    let mut parser = HtmlParser::new(DomTree::new(), ParserOptions::default());
    parser.set_script_hook(|parser, _script| {
        parser.insert("<b>x</b>").unwrap();
    });

    let status = parser.parse_str("<body><script>s</script><i>y</i>", true).unwrap();
    assert_eq!(status, ParseStatus::Finished);
    assert_eq!(
        body_html(&parser.into_sink()),
        "<script>s</script><b>x</b><i>y</i>"
    );
}

#[test]
fn test_script_hook_sees_the_script_element() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let record = Rc::clone(&seen);

    let mut parser = HtmlParser::new(DomTree::new(), ParserOptions::default());
    parser.set_script_hook(move |parser, script| {
        let text = parser.sink().text_content(*script);
        record.borrow_mut().push(text.clone());
        // Write the script's own text back into the stream.
        parser.insert(&text).unwrap();
    });

    let _ = parser
        .parse_str("<body><script><em>w</em></script>tail<script>!</script>", true)
        .unwrap();

    assert_eq!(*seen.borrow(), vec!["<em>w</em>".to_string(), "!".to_string()]);
    assert_eq!(
        body_html(&parser.into_sink()),
        "<script><em>w</em></script><em>w</em>tail<script>!</script>!"
    );
}

#[test]
fn test_inserted_text_joins_following_input() {
    let mut parser = HtmlParser::new(DomTree::new(), ParserOptions::default());
    parser.set_script_hook(|parser, _script| {
        // An unfinished tag completed by the rest of the stream.
        parser.insert("<p class=").unwrap();
    });

    let _ = parser.parse_str("<body><script></script>a>text", true).unwrap();
    assert_eq!(
        body_html(&parser.into_sink()),
        "<script></script><p class=\"a\">text</p>"
    );
}

#[test]
fn test_script_hook_pauses_the_parser() {
    let mut parser = HtmlParser::new(DomTree::new(), ParserOptions::default());
    parser.set_script_hook(|parser, _script| parser.pause());

    let status = parser.parse_str("<body><script></script><p>after", true).unwrap();
    assert_eq!(status, ParseStatus::Paused);
    assert_eq!(body_html(parser.sink()), "<script></script>");

    assert_eq!(parser.resume(), ParseStatus::Finished);
    assert_eq!(
        body_html(&parser.into_sink()),
        "<script></script><p>after</p>"
    );
}

#[test]
fn test_text_inserted_while_paused_waits_for_resume() {
    let mut parser = HtmlParser::new(DomTree::new(), ParserOptions::default());
    parser.set_script_hook(|parser, _script| {
        parser.pause();
        parser.insert("<i>ins</i>").unwrap();
    });

    let status = parser.parse_str("<body><script>x</script>tail", true).unwrap();
    assert_eq!(status, ParseStatus::Paused);
    assert_eq!(body_html(parser.sink()), "<script>x</script>");

    assert_eq!(parser.resume(), ParseStatus::Finished);
    assert_eq!(
        body_html(&parser.into_sink()),
        "<script>x</script><i>ins</i>tail"
    );
}

#[test]
fn test_script_split_across_chunks_runs_hook_once() {
    let runs = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&runs);

    let mut parser = HtmlParser::new(DomTree::new(), ParserOptions::default());
    parser.set_script_hook(move |_, _| *counter.borrow_mut() += 1);

    for chunk in ["<scr", "ipt>a</scr", "ipt", "><p>b"] {
        let _ = parser.parse_str(chunk, false).unwrap();
    }
    let _ = parser.parse_str("", true).unwrap();
    assert_eq!(*runs.borrow(), 1);
}

#[quickcheck]
fn random_split_points_do_not_change_the_tree(points: Vec<u16>) -> bool {
    let len = SAMPLE.encode_utf16().count();
    let mut offsets: Vec<usize> = points.into_iter().map(|p| usize::from(p) % (len + 1)).collect();
    offsets.sort_unstable();

    dump_document(&parse_split_at(SAMPLE, &offsets)) == dump_document(&parse_document(SAMPLE))
}
