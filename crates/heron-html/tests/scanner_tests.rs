//! Integration tests for the input scanner.

use heron_html::scanner::{Peek, ScanUntil, Scanner};

/// Helper to drain every buffered code point into a string
fn drain(scanner: &mut Scanner) -> String {
    let mut out = String::new();
    while let Peek::Char(c) = scanner.consume() {
        out.push(c);
    }
    out
}

fn utf16(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

#[test]
fn test_empty_scanner_needs_more() {
    let scanner = Scanner::new();
    assert_eq!(scanner.peek(), Peek::NeedMore);
    assert!(!scanner.has_buffered_input());
}

#[test]
fn test_finished_scanner_reports_eof() {
    let mut scanner = Scanner::new();
    scanner.feed_str("a");
    scanner.finish();
    assert_eq!(scanner.consume(), Peek::Char('a'));
    assert_eq!(scanner.consume(), Peek::Eof);
    assert!(scanner.is_finished());
}

#[test]
fn test_crlf_becomes_lf() {
    let mut scanner = Scanner::new();
    scanner.feed_str("a\r\nb\rc\n");
    assert_eq!(drain(&mut scanner), "a\nb\nc\n");
}

#[test]
fn test_crlf_split_across_chunks() {
    let mut scanner = Scanner::new();
    scanner.feed(&utf16("a\r"));
    scanner.feed(&utf16("\nb"));
    assert_eq!(drain(&mut scanner), "a\nb");
}

#[test]
fn test_cr_cr_lf() {
    let mut scanner = Scanner::new();
    scanner.feed_str("\r\r\n");
    assert_eq!(drain(&mut scanner), "\n\n");
}

#[test]
fn test_surrogate_pair_split_across_chunks() {
    let units = utf16("x\u{1F600}y");
    assert_eq!(units.len(), 4);

    let mut scanner = Scanner::new();
    scanner.feed(&units[..2]);
    assert_eq!(scanner.consume(), Peek::Char('x'));
    // The high surrogate is held back until its pair arrives.
    assert_eq!(scanner.peek(), Peek::NeedMore);
    scanner.feed(&units[2..]);
    assert_eq!(drain(&mut scanner), "\u{1F600}y");
}

#[test]
fn test_lone_surrogates_become_replacement_characters() {
    let mut scanner = Scanner::new();
    scanner.feed(&[0xDC00, u16::from(b'a'), 0xD800]);
    scanner.finish();
    assert_eq!(drain(&mut scanner), "\u{FFFD}a\u{FFFD}");
}

#[test]
fn test_match_ahead() {
    let mut scanner = Scanner::new();
    scanner.feed_str("DocType");
    assert_eq!(scanner.match_ahead("doctype", true), Some(true));
    assert_eq!(scanner.match_ahead("doctype", false), Some(false));
    assert_eq!(scanner.match_ahead("DocTypes", false), None);
    scanner.finish();
    assert_eq!(scanner.match_ahead("DocTypes", false), Some(false));
}

#[test]
fn test_consume_until() {
    let mut scanner = Scanner::new();
    scanner.feed_str("abc]]");
    assert_eq!(scanner.consume_until("]]>"), ScanUntil::NeedMore("abc".to_string()));
    scanner.feed_str(">rest");
    assert_eq!(scanner.consume_until("]]>"), ScanUntil::Found(String::new()));
    scanner.finish();
    assert_eq!(scanner.consume_until("]]>"), ScanUntil::Eof("rest".to_string()));
}

#[test]
fn test_consume_run() {
    let mut scanner = Scanner::new();
    scanner.feed_str("abc123");
    let mut out = String::new();
    scanner.consume_run(|c| c.is_ascii_alphabetic(), &mut out);
    assert_eq!(out, "abc");
    assert_eq!(scanner.peek(), Peek::Char('1'));
}

#[test]
fn test_nested_frame_is_read_first() {
    let mut scanner = Scanner::new();
    scanner.feed_str("tail");
    scanner.push_frame("head-");
    assert_eq!(scanner.nested_depth(), 1);
    assert_eq!(drain(&mut scanner), "head-tail");
    assert_eq!(scanner.nested_depth(), 0);
}

#[test]
fn test_nested_frames_stack() {
    let mut scanner = Scanner::new();
    scanner.feed_str("3");
    scanner.push_frame("2");
    scanner.push_frame("1");
    assert_eq!(scanner.nested_depth(), 2);
    assert_eq!(scanner.consume(), Peek::Char('1'));
    assert_eq!(scanner.nested_depth(), 1);
    assert_eq!(drain(&mut scanner), "23");
}

#[test]
fn test_nested_frame_normalizes_newlines() {
    let mut scanner = Scanner::new();
    scanner.push_frame("a\r\nb");
    assert_eq!(drain(&mut scanner), "a\nb");
}
