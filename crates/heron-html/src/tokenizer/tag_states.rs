//! Tag and attribute states.
//!
//! [§ 13.2.5.6](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
//! through [§ 13.2.5.40](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state).

use super::core::{TagKind, Tokenizer, TokenizerState};
use super::sink::TokenSink;
use super::text_states::is_whitespace_char;

impl Tokenizer {
    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    pub(super) fn handle_tag_open_state<S: TokenSink>(&mut self, c: Option<char>, sink: &mut S) {
        match c {
            // "U+0021 EXCLAMATION MARK (!) - Switch to the markup declaration open state."
            Some('!') => self.switch_to(TokenizerState::MarkupDeclarationOpen),
            // "U+002F SOLIDUS (/) - Switch to the end tag open state."
            Some('/') => self.switch_to(TokenizerState::EndTagOpen),
            // "ASCII alpha - Create a new start tag token, set its tag name to the
            // empty string. Reconsume in the tag name state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.create_tag(TagKind::Start);
                self.reconsume_in(TokenizerState::TagName);
            }
            // "U+003F QUESTION MARK (?) - This is an
            // unexpected-question-mark-instead-of-tag-name parse error. Create a
            // comment token whose data is the empty string. Reconsume in the bogus
            // comment state."
            Some('?') => {
                self.parse_error("unexpected-question-mark-instead-of-tag-name");
                self.create_comment("");
                self.reconsume_in(TokenizerState::BogusComment);
            }
            // "EOF - This is an eof-before-tag-name parse error. Emit a U+003C
            // LESS-THAN SIGN character token and an end-of-file token."
            None => {
                self.parse_error("eof-before-tag-name");
                self.emit_char('<');
                self.emit_eof(sink);
            }
            // "Anything else - This is an invalid-first-character-of-tag-name parse
            // error. Emit a U+003C LESS-THAN SIGN character token. Reconsume in the
            // data state."
            Some(_) => {
                self.parse_error("invalid-first-character-of-tag-name");
                self.emit_char('<');
                self.reconsume_in(TokenizerState::Data);
            }
        }
    }

    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    pub(super) fn handle_end_tag_open_state<S: TokenSink>(&mut self, c: Option<char>, sink: &mut S) {
        match c {
            Some(c) if c.is_ascii_alphabetic() => {
                self.create_tag(TagKind::End);
                self.reconsume_in(TokenizerState::TagName);
            }
            // "This is a missing-end-tag-name parse error. Switch to the data state."
            Some('>') => {
                self.parse_error("missing-end-tag-name");
                self.switch_to(TokenizerState::Data);
            }
            None => {
                self.parse_error("eof-before-tag-name");
                self.emit_str("</");
                self.emit_eof(sink);
            }
            Some(_) => {
                self.parse_error("invalid-first-character-of-tag-name");
                self.create_comment("");
                self.reconsume_in(TokenizerState::BogusComment);
            }
        }
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    pub(super) fn handle_tag_name_state<S: TokenSink>(&mut self, c: Option<char>, sink: &mut S) {
        match c {
            // "Switch to the before attribute name state."
            Some(c) if is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            // "Switch to the data state. Emit the current tag token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_tag(sink);
            }
            // "U+0000 NULL - This is an unexpected-null-character parse error.
            // Append a U+FFFD REPLACEMENT CHARACTER character to the current tag
            // token's tag name."
            Some('\0') => {
                self.parse_error("unexpected-null-character");
                self.tag_name.push('\u{FFFD}');
            }
            // "EOF - This is an eof-in-tag parse error. Emit an end-of-file token."
            None => {
                self.parse_error("eof-in-tag");
                self.emit_eof(sink);
            }
            // ASCII upper alpha is lowercased; everything else is appended as is.
            Some(c) => self.tag_name.push(c.to_ascii_lowercase()),
        }
    }

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    pub(super) fn handle_before_attribute_name_state(&mut self, c: Option<char>) {
        match c {
            // "Ignore the character."
            Some(c) if is_whitespace_char(c) => {}
            // "U+002F SOLIDUS (/), U+003E GREATER-THAN SIGN (>), EOF - Reconsume in
            // the after attribute name state."
            Some('/' | '>') | None => self.reconsume_in(TokenizerState::AfterAttributeName),
            // "This is an unexpected-equals-sign-before-attribute-name parse error.
            // Start a new attribute in the current tag token. Set that attribute's
            // name to the current input character, and its value to the empty
            // string. Switch to the attribute name state."
            Some('=') => {
                self.parse_error("unexpected-equals-sign-before-attribute-name");
                self.start_new_attribute();
                self.append_to_attribute_name('=');
                self.switch_to(TokenizerState::AttributeName);
            }
            Some(_) => {
                self.start_new_attribute();
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    pub(super) fn handle_attribute_name_state(&mut self, c: Option<char>) {
        match c {
            Some(c) if is_whitespace_char(c) || c == '/' || c == '>' => {
                self.check_duplicate_attribute();
                self.reconsume_in(TokenizerState::AfterAttributeName);
            }
            None => {
                self.check_duplicate_attribute();
                self.reconsume_in(TokenizerState::AfterAttributeName);
            }
            Some('=') => {
                self.check_duplicate_attribute();
                self.switch_to(TokenizerState::BeforeAttributeValue);
            }
            Some('\0') => {
                self.parse_error("unexpected-null-character");
                self.append_to_attribute_name('\u{FFFD}');
            }
            // "This is an unexpected-character-in-attribute-name parse error. Treat
            // it as per the "anything else" entry below."
            Some(c @ ('"' | '\'' | '<')) => {
                self.parse_error("unexpected-character-in-attribute-name");
                self.append_to_attribute_name(c);
            }
            Some(c) => self.append_to_attribute_name(c.to_ascii_lowercase()),
        }
    }

    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    pub(super) fn handle_after_attribute_name_state<S: TokenSink>(
        &mut self,
        c: Option<char>,
        sink: &mut S,
    ) {
        match c {
            Some(c) if is_whitespace_char(c) => {}
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('=') => self.switch_to(TokenizerState::BeforeAttributeValue),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_tag(sink);
            }
            None => {
                self.parse_error("eof-in-tag");
                self.emit_eof(sink);
            }
            Some(_) => {
                self.start_new_attribute();
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    pub(super) fn handle_before_attribute_value_state<S: TokenSink>(
        &mut self,
        c: Option<char>,
        sink: &mut S,
    ) {
        match c {
            Some(c) if is_whitespace_char(c) => {}
            Some('"') => self.switch_to(TokenizerState::AttributeValueDoubleQuoted),
            Some('\'') => self.switch_to(TokenizerState::AttributeValueSingleQuoted),
            // "This is a missing-attribute-value parse error. Switch to the data
            // state. Emit the current tag token."
            Some('>') => {
                self.parse_error("missing-attribute-value");
                self.switch_to(TokenizerState::Data);
                self.emit_current_tag(sink);
            }
            _ => self.reconsume_in(TokenizerState::AttributeValueUnquoted),
        }
    }

    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    /// and [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    pub(super) fn handle_attribute_value_quoted_state<S: TokenSink>(
        &mut self,
        c: Option<char>,
        quote: char,
        sink: &mut S,
    ) {
        match c {
            Some(c) if c == quote => self.switch_to(TokenizerState::AfterAttributeValueQuoted),
            // "Set the return state to the attribute value (double-quoted) state.
            // Switch to the character reference state."
            Some('&') => self.begin_character_reference(self.state),
            Some('\0') => {
                self.parse_error("unexpected-null-character");
                self.append_to_attribute_value("\u{FFFD}");
            }
            None => {
                self.parse_error("eof-in-tag");
                self.emit_eof(sink);
            }
            Some(c) => {
                let mut buf = [0u8; 4];
                self.append_to_attribute_value(c.encode_utf8(&mut buf));
            }
        }
    }

    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    pub(super) fn handle_attribute_value_unquoted_state<S: TokenSink>(
        &mut self,
        c: Option<char>,
        sink: &mut S,
    ) {
        match c {
            Some(c) if is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('&') => self.begin_character_reference(TokenizerState::AttributeValueUnquoted),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_tag(sink);
            }
            Some('\0') => {
                self.parse_error("unexpected-null-character");
                self.append_to_attribute_value("\u{FFFD}");
            }
            None => {
                self.parse_error("eof-in-tag");
                self.emit_eof(sink);
            }
            Some(c) => {
                if matches!(c, '"' | '\'' | '<' | '=' | '`') {
                    self.parse_error("unexpected-character-in-unquoted-attribute-value");
                }
                let mut buf = [0u8; 4];
                self.append_to_attribute_value(c.encode_utf8(&mut buf));
            }
        }
    }

    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    pub(super) fn handle_after_attribute_value_quoted_state<S: TokenSink>(
        &mut self,
        c: Option<char>,
        sink: &mut S,
    ) {
        match c {
            Some(c) if is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => self.switch_to(TokenizerState::SelfClosingStartTag),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_tag(sink);
            }
            None => {
                self.parse_error("eof-in-tag");
                self.emit_eof(sink);
            }
            // "This is a missing-whitespace-between-attributes parse error.
            // Reconsume in the before attribute name state."
            Some(_) => {
                self.parse_error("missing-whitespace-between-attributes");
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }

    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    pub(super) fn handle_self_closing_start_tag_state<S: TokenSink>(
        &mut self,
        c: Option<char>,
        sink: &mut S,
    ) {
        match c {
            // "Set the self-closing flag of the current tag token. Switch to the
            // data state. Emit the current tag token."
            Some('>') => {
                self.tag_self_closing = true;
                self.switch_to(TokenizerState::Data);
                self.emit_current_tag(sink);
            }
            None => {
                self.parse_error("eof-in-tag");
                self.emit_eof(sink);
            }
            Some(_) => {
                self.parse_error("unexpected-solidus-in-tag");
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }
}
