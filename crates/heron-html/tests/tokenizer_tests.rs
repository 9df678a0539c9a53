//! Integration tests for the HTML tokenizer.

use heron_html::tokenizer::{
    Attribute, Token, TokenCollector, TokenizerOptions, TokenizerState, tokenize_str,
};
use serde_json::json;

/// Helper to tokenize a string and return the tokens
fn tokenize(input: &str) -> Vec<Token> {
    tokenize_str(input, TokenizerOptions::default()).tokens
}

/// Helper to collect the parse error codes for an input
fn error_codes(input: &str) -> Vec<String> {
    tokenize_str(input, TokenizerOptions::default())
        .issues
        .into_iter()
        .map(|issue| issue.message)
        .collect()
}

/// Helper to get the concatenated text of a token list
fn text_of(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(|token| match token {
            Token::Text { data, .. } => Some(data.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_plain_text() {
    let tokens = tokenize("Hello");
    assert_eq!(tokens, vec![Token::text("Hello"), Token::EndOfFile]);
}

#[test]
fn test_doctype() {
    let tokens = tokenize("<!DOCTYPE html>");
    assert_eq!(tokens.len(), 2); // DOCTYPE + EOF
    match &tokens[0] {
        Token::Doctype {
            name,
            public_identifier,
            system_identifier,
            force_quirks,
        } => {
            assert_eq!(name.as_deref(), Some("html"));
            assert!(public_identifier.is_none());
            assert!(system_identifier.is_none());
            assert!(!force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_doctype_with_identifiers() {
    let tokens = tokenize(r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" "http://www.w3.org/TR/html4/strict.dtd">"#);
    match &tokens[0] {
        Token::Doctype {
            name,
            public_identifier,
            system_identifier,
            force_quirks,
        } => {
            assert_eq!(name.as_deref(), Some("html"));
            assert_eq!(public_identifier.as_deref(), Some("-//W3C//DTD HTML 4.01//EN"));
            assert_eq!(
                system_identifier.as_deref(),
                Some("http://www.w3.org/TR/html4/strict.dtd")
            );
            assert!(!force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_doctype_without_name_forces_quirks() {
    let tokens = tokenize("<!DOCTYPE>");
    match &tokens[0] {
        Token::Doctype {
            name, force_quirks, ..
        } => {
            assert!(name.is_none());
            assert!(force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_start_tag() {
    let tokens = tokenize("<div>");
    assert_eq!(tokens, vec![Token::start_tag("div"), Token::EndOfFile]);
}

#[test]
fn test_end_tag() {
    let tokens = tokenize("</div>");
    assert_eq!(tokens, vec![Token::end_tag("div"), Token::EndOfFile]);
}

#[test]
fn test_tag_names_are_lowercased() {
    let tokens = tokenize("<DIV ID=Main>");
    assert_eq!(tokens[0].tag_name(), Some("div"));
    assert_eq!(tokens[0].attribute("id"), Some("Main"));
}

#[test]
fn test_self_closing_tag() {
    let tokens = tokenize("<br/>");
    assert!(matches!(
        &tokens[0],
        Token::StartTag { name, self_closing: true, .. } if name == "br"
    ));
}

#[test]
fn test_attribute_quoting_styles() {
    let tokens = tokenize(r#"<input type="text" name='q' value=x disabled>"#);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(
                attributes,
                &vec![
                    Attribute::new("type", "text"),
                    Attribute::new("name", "q"),
                    Attribute::new("value", "x"),
                    Attribute::new("disabled", ""),
                ]
            );
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_duplicate_attribute_keeps_first() {
    let tokens = tokenize("<a x=1 x=2>");
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes, &vec![Attribute::new("x", "1")]);
        }
        _ => panic!("Expected StartTag token"),
    }
    assert!(error_codes("<a x=1 x=2>").contains(&"duplicate-attribute".to_string()));
}

#[test]
fn test_comment() {
    let tokens = tokenize("<!-- hello -->");
    assert_eq!(
        tokens[0],
        Token::Comment {
            data: " hello ".to_string()
        }
    );
}

#[test]
fn test_bogus_comment_from_processing_instruction() {
    let tokens = tokenize("<?xml version?>");
    assert_eq!(
        tokens[0],
        Token::Comment {
            data: "?xml version?".to_string()
        }
    );
    assert_eq!(
        error_codes("<?xml version?>"),
        vec!["unexpected-question-mark-instead-of-tag-name".to_string()]
    );
}

#[test]
fn test_cdata_outside_foreign_content_is_a_comment() {
    let tokens = tokenize("<![CDATA[x]]>");
    assert_eq!(
        tokens[0],
        Token::Comment {
            data: "[CDATA[x]]".to_string()
        }
    );
    assert!(error_codes("<![CDATA[x]]>").contains(&"cdata-in-html-content".to_string()));
}

#[test]
fn test_eof_in_tag_drops_the_tag() {
    let tokens = tokenize("<div class");
    assert_eq!(tokens, vec![Token::EndOfFile]);
    assert_eq!(error_codes("<div class"), vec!["eof-in-tag".to_string()]);
}

#[test]
fn test_lone_less_than_is_text() {
    let tokens = tokenize("a < b");
    assert_eq!(text_of(&tokens), "a < b");
}

#[test]
fn test_null_in_data_is_passed_through() {
    let tokens = tokenize("a\0b");
    assert_eq!(
        tokens[0],
        Token::Text {
            data: "a\0b".to_string(),
            has_nul: true
        }
    );
    assert_eq!(error_codes("a\0b"), vec!["unexpected-null-character".to_string()]);
}

#[test]
fn test_named_character_reference() {
    assert_eq!(text_of(&tokenize("&amp;")), "&");
    assert_eq!(text_of(&tokenize("a &lt; b")), "a < b");
}

#[test]
fn test_numeric_character_references() {
    assert_eq!(text_of(&tokenize("&#65;")), "A");
    assert_eq!(text_of(&tokenize("&#x1F600;")), "\u{1F600}");
    assert_eq!(text_of(&tokenize("&#X41;")), "A");
}

#[test]
fn test_numeric_reference_replacements() {
    assert_eq!(text_of(&tokenize("&#0;")), "\u{FFFD}");
    assert_eq!(text_of(&tokenize("&#x80;")), "\u{20AC}");
    assert_eq!(text_of(&tokenize("&#xD800;")), "\u{FFFD}");
    assert_eq!(text_of(&tokenize("&#x110000;")), "\u{FFFD}");
    assert_eq!(error_codes("&#0;"), vec!["null-character-reference".to_string()]);
}

#[test]
fn test_numeric_reference_without_semicolon() {
    assert_eq!(text_of(&tokenize("&#65x")), "Ax");
    assert_eq!(
        error_codes("&#65x"),
        vec!["missing-semicolon-after-character-reference".to_string()]
    );
}

#[test]
fn test_numeric_reference_without_digits() {
    assert_eq!(text_of(&tokenize("&#;")), "&#;");
    assert_eq!(
        error_codes("&#;"),
        vec!["absence-of-digits-in-numeric-character-reference".to_string()]
    );
}

#[test]
fn test_legacy_reference_prefix_in_text() {
    // The longest match is the legacy `&not`; the rest stays literal.
    assert_eq!(text_of(&tokenize("&notit;")), "\u{00AC}it;");
    assert_eq!(
        error_codes("&notit;"),
        vec!["missing-semicolon-after-character-reference".to_string()]
    );
}

#[test]
fn test_legacy_reference_prefix_in_attribute_is_literal() {
    let tokens = tokenize(r#"<a title="&notit;">"#);
    assert_eq!(tokens[0].attribute("title"), Some("&notit;"));

    let tokens = tokenize(r#"<a href="?x=1&not=2">"#);
    assert_eq!(tokens[0].attribute("href"), Some("?x=1&not=2"));
}

#[test]
fn test_reference_in_attribute_with_semicolon() {
    let tokens = tokenize(r#"<a title="&amp;&not;">"#);
    assert_eq!(tokens[0].attribute("title"), Some("&\u{00AC}"));
}

#[test]
fn test_unknown_named_reference() {
    assert_eq!(text_of(&tokenize("&zzzz;")), "&zzzz;");
    assert_eq!(
        error_codes("&zzzz;"),
        vec!["unknown-named-character-reference".to_string()]
    );
}

#[test]
fn test_rcdata_appropriate_end_tag() {
    let options = TokenizerOptions::default()
        .with_initial_state(TokenizerState::RCDATA)
        .with_last_start_tag("title");
    let tokens = tokenize_str("a</b>&amp;</title>", options).tokens;
    assert_eq!(
        tokens,
        vec![Token::text("a</b>&"), Token::end_tag("title"), Token::EndOfFile]
    );
}

#[test]
fn test_rawtext_ignores_character_references() {
    let options = TokenizerOptions::default()
        .with_initial_state(TokenizerState::RAWTEXT)
        .with_last_start_tag("style");
    let tokens = tokenize_str("&amp;</style>", options).tokens;
    assert_eq!(tokens[0], Token::text("&amp;"));
    assert_eq!(tokens[1], Token::end_tag("style"));
}

#[test]
fn test_script_data_double_escape() {
    let options = TokenizerOptions::default()
        .with_initial_state(TokenizerState::ScriptData)
        .with_last_start_tag("script");
    let tokens = tokenize_str("<!--<script></script>--></script>", options).tokens;
    assert_eq!(
        tokens,
        vec![
            Token::text("<!--<script></script>-->"),
            Token::end_tag("script"),
            Token::EndOfFile
        ]
    );
}

#[test]
fn test_plaintext_never_ends() {
    let options = TokenizerOptions::default().with_initial_state(TokenizerState::PLAINTEXT);
    let tokens = tokenize_str("</plaintext><b>", options).tokens;
    assert_eq!(tokens, vec![Token::text("</plaintext><b>"), Token::EndOfFile]);
}

#[test]
fn test_state_names_parse() {
    assert_eq!("RCDATA state".parse::<TokenizerState>(), Ok(TokenizerState::RCDATA));
    assert_eq!("Data state".parse::<TokenizerState>(), Ok(TokenizerState::Data));
    assert!("Nonsense state".parse::<TokenizerState>().is_err());
}

#[test]
fn test_chunking_does_not_change_tokens() {
    let input = "<!DOCTYPE html><p class=\"a&amp;b\">x&notit; &#x1F600;<!-- c --></p>\r\n";
    let whole = tokenize(input);

    let chars: Vec<String> = input.chars().map(String::from).collect();
    let chunked = TokenCollector::collect_chunks(chars.iter().map(String::as_str), TokenizerOptions::default());
    assert_eq!(chunked.tokens, whole);

    let halves = input.split_at(17);
    let split = TokenCollector::collect_chunks([halves.0, halves.1], TokenizerOptions::default());
    assert_eq!(split.tokens, whole);
}

#[test]
fn test_html5lib_json_shape() {
    let collected = tokenize_str(
        "<!DOCTYPE html><a href=x/><!--c-->t</a>",
        TokenizerOptions::default(),
    );
    assert_eq!(
        collected.to_html5lib_json(),
        json!([
            ["DOCTYPE", "html", null, null, true],
            ["StartTag", "a", {"href": "x/"}],
            ["Comment", "c"],
            ["Character", "t"],
            ["EndTag", "a"]
        ])
    );
}
