//! Data, RCDATA, RAWTEXT, PLAINTEXT and script data states.
//!
//! [§ 13.2.5.1](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
//! through [§ 13.2.5.31](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escape-end-state).
//!
//! Runs of ordinary characters in the five top-level text states are taken
//! in bulk by `consume_text_run`; the handlers here see the delimiters.

use super::core::{TagKind, Tokenizer, TokenizerState};
use super::sink::TokenSink;

/// "U+0009 CHARACTER TABULATION (tab), U+000A LINE FEED (LF),
/// U+000C FORM FEED (FF), U+0020 SPACE"
pub(super) const fn is_whitespace_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\x0C' | ' ')
}

/// The end tag open state that belongs to a text state.
const fn end_tag_open_state(text_state: TokenizerState) -> TokenizerState {
    match text_state {
        TokenizerState::RCDATA => TokenizerState::RCDATAEndTagOpen,
        TokenizerState::RAWTEXT => TokenizerState::RAWTEXTEndTagOpen,
        TokenizerState::ScriptDataEscaped => TokenizerState::ScriptDataEscapedEndTagOpen,
        _ => TokenizerState::ScriptDataEndTagOpen,
    }
}

/// The end tag name state that belongs to a text state.
const fn end_tag_name_state(text_state: TokenizerState) -> TokenizerState {
    match text_state {
        TokenizerState::RCDATA => TokenizerState::RCDATAEndTagName,
        TokenizerState::RAWTEXT => TokenizerState::RAWTEXTEndTagName,
        TokenizerState::ScriptDataEscaped => TokenizerState::ScriptDataEscapedEndTagName,
        _ => TokenizerState::ScriptDataEndTagName,
    }
}

impl Tokenizer {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    pub(super) fn handle_data_state<S: TokenSink>(&mut self, c: Option<char>, sink: &mut S) {
        match c {
            // "U+0026 AMPERSAND (&) - Set the return state to the data state.
            // Switch to the character reference state."
            Some('&') => self.begin_character_reference(TokenizerState::Data),
            // "U+003C LESS-THAN SIGN (<) - Switch to the tag open state."
            Some('<') => self.switch_to(TokenizerState::TagOpen),
            // "U+0000 NULL - This is an unexpected-null-character parse error.
            // Emit the current input character as a character token."
            Some('\0') => {
                self.parse_error("unexpected-null-character");
                self.emit_char('\0');
            }
            // "EOF - Emit an end-of-file token."
            None => self.emit_eof(sink),
            // "Anything else - Emit the current input character as a character token."
            Some(c) => self.emit_char(c),
        }
    }

    /// [§ 13.2.5.2 RCDATA state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-state)
    pub(super) fn handle_rcdata_state<S: TokenSink>(&mut self, c: Option<char>, sink: &mut S) {
        match c {
            // "Set the return state to the RCDATA state. Switch to the character reference state."
            Some('&') => self.begin_character_reference(TokenizerState::RCDATA),
            // "Switch to the RCDATA less-than sign state."
            Some('<') => self.switch_to(TokenizerState::RCDATALessThanSign),
            // "This is an unexpected-null-character parse error. Emit a U+FFFD REPLACEMENT
            // CHARACTER character token."
            Some('\0') => {
                self.parse_error("unexpected-null-character");
                self.emit_char('\u{FFFD}');
            }
            None => self.emit_eof(sink),
            Some(c) => self.emit_char(c),
        }
    }

    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    pub(super) fn handle_rawtext_state<S: TokenSink>(&mut self, c: Option<char>, sink: &mut S) {
        match c {
            Some('<') => self.switch_to(TokenizerState::RAWTEXTLessThanSign),
            Some('\0') => {
                self.parse_error("unexpected-null-character");
                self.emit_char('\u{FFFD}');
            }
            None => self.emit_eof(sink),
            Some(c) => self.emit_char(c),
        }
    }

    /// [§ 13.2.5.4 Script data state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-state)
    pub(super) fn handle_script_data_state<S: TokenSink>(&mut self, c: Option<char>, sink: &mut S) {
        match c {
            Some('<') => self.switch_to(TokenizerState::ScriptDataLessThanSign),
            Some('\0') => {
                self.parse_error("unexpected-null-character");
                self.emit_char('\u{FFFD}');
            }
            None => self.emit_eof(sink),
            Some(c) => self.emit_char(c),
        }
    }

    /// [§ 13.2.5.5 PLAINTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#plaintext-state)
    pub(super) fn handle_plaintext_state<S: TokenSink>(&mut self, c: Option<char>, sink: &mut S) {
        match c {
            Some('\0') => {
                self.parse_error("unexpected-null-character");
                self.emit_char('\u{FFFD}');
            }
            None => self.emit_eof(sink),
            Some(c) => self.emit_char(c),
        }
    }

    /// [§ 13.2.5.9 RCDATA less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-less-than-sign-state)
    /// and [§ 13.2.5.12 RAWTEXT less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-less-than-sign-state)
    pub(super) fn handle_text_less_than_sign_state(&mut self, c: Option<char>, text_state: TokenizerState) {
        match c {
            // "Set the temporary buffer to the empty string. Switch to the
            // RCDATA end tag open state."
            Some('/') => {
                self.temporary_buffer.clear();
                self.switch_to(end_tag_open_state(text_state));
            }
            // "Emit a U+003C LESS-THAN SIGN character token. Reconsume in the RCDATA state."
            _ => {
                self.emit_char('<');
                self.reconsume_in(text_state);
            }
        }
    }

    /// [§ 13.2.5.10 RCDATA end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-open-state)
    ///
    /// Shared by the RAWTEXT, script data and script data escaped variants,
    /// which differ only in the states they move to.
    pub(super) fn handle_text_end_tag_open_state(&mut self, c: Option<char>, text_state: TokenizerState) {
        match c {
            // "ASCII alpha - Create a new end tag token, set its tag name to the
            // empty string. Reconsume in the RCDATA end tag name state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.create_tag(TagKind::End);
                self.reconsume_in(end_tag_name_state(text_state));
            }
            // "Emit a U+003C LESS-THAN SIGN character token and a U+002F SOLIDUS
            // character token. Reconsume in the RCDATA state."
            _ => {
                self.emit_str("</");
                self.reconsume_in(text_state);
            }
        }
    }

    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    ///
    /// Shared by the RAWTEXT, script data and script data escaped variants.
    pub(super) fn handle_text_end_tag_name_state<S: TokenSink>(
        &mut self,
        c: Option<char>,
        text_state: TokenizerState,
        sink: &mut S,
    ) {
        match c {
            // "If the current end tag token is an appropriate end tag token, then
            // switch to the before attribute name state."
            Some(c) if is_whitespace_char(c) && self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            // "...switch to the self-closing start tag state."
            Some('/') if self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            // "...switch to the data state and emit the current tag token."
            Some('>') if self.is_appropriate_end_tag_token() => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_tag(sink);
            }
            // "ASCII upper alpha - Append the lowercase version of the current input
            // character to the current tag token's tag name. Append the current
            // input character to the temporary buffer."
            Some(c) if c.is_ascii_alphabetic() => {
                self.tag_name.push(c.to_ascii_lowercase());
                self.temporary_buffer.push(c);
            }
            // "Emit a U+003C LESS-THAN SIGN character token, a U+002F SOLIDUS
            // character token, and a character token for each of the characters in
            // the temporary buffer (in the order they were added to the buffer).
            // Reconsume in the RCDATA state."
            _ => {
                self.emit_char('<');
                self.emit_char('/');
                let buffer = std::mem::take(&mut self.temporary_buffer);
                self.emit_str(&buffer);
                self.reconsume_in(text_state);
            }
        }
    }

    /// [§ 13.2.5.15 Script data less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-less-than-sign-state)
    pub(super) fn handle_script_data_less_than_sign_state(&mut self, c: Option<char>) {
        match c {
            Some('/') => {
                self.temporary_buffer.clear();
                self.switch_to(TokenizerState::ScriptDataEndTagOpen);
            }
            // "Switch to the script data escape start state. Emit a U+003C
            // LESS-THAN SIGN character token and a U+0021 EXCLAMATION MARK
            // character token."
            Some('!') => {
                self.switch_to(TokenizerState::ScriptDataEscapeStart);
                self.emit_str("<!");
            }
            _ => {
                self.emit_char('<');
                self.reconsume_in(TokenizerState::ScriptData);
            }
        }
    }

    /// [§ 13.2.5.18 Script data escape start state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escape-start-state)
    pub(super) fn handle_script_data_escape_start_state(&mut self, c: Option<char>) {
        if c == Some('-') {
            self.switch_to(TokenizerState::ScriptDataEscapeStartDash);
            self.emit_char('-');
        } else {
            self.reconsume_in(TokenizerState::ScriptData);
        }
    }

    /// [§ 13.2.5.19 Script data escape start dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escape-start-dash-state)
    pub(super) fn handle_script_data_escape_start_dash_state(&mut self, c: Option<char>) {
        if c == Some('-') {
            self.switch_to(TokenizerState::ScriptDataEscapedDashDash);
            self.emit_char('-');
        } else {
            self.reconsume_in(TokenizerState::ScriptData);
        }
    }

    /// [§ 13.2.5.20 Script data escaped state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-state)
    pub(super) fn handle_script_data_escaped_state<S: TokenSink>(
        &mut self,
        c: Option<char>,
        sink: &mut S,
    ) {
        match c {
            Some('-') => {
                self.switch_to(TokenizerState::ScriptDataEscapedDash);
                self.emit_char('-');
            }
            Some('<') => self.switch_to(TokenizerState::ScriptDataEscapedLessThanSign),
            Some('\0') => {
                self.parse_error("unexpected-null-character");
                self.emit_char('\u{FFFD}');
            }
            // "This is an eof-in-script-html-comment-like-text parse error.
            // Emit an end-of-file token."
            None => {
                self.parse_error("eof-in-script-html-comment-like-text");
                self.emit_eof(sink);
            }
            Some(c) => self.emit_char(c),
        }
    }

    /// [§ 13.2.5.21 Script data escaped dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-dash-state)
    pub(super) fn handle_script_data_escaped_dash_state<S: TokenSink>(
        &mut self,
        c: Option<char>,
        sink: &mut S,
    ) {
        match c {
            Some('-') => {
                self.switch_to(TokenizerState::ScriptDataEscapedDashDash);
                self.emit_char('-');
            }
            Some('<') => self.switch_to(TokenizerState::ScriptDataEscapedLessThanSign),
            Some('\0') => {
                self.parse_error("unexpected-null-character");
                self.switch_to(TokenizerState::ScriptDataEscaped);
                self.emit_char('\u{FFFD}');
            }
            None => {
                self.parse_error("eof-in-script-html-comment-like-text");
                self.emit_eof(sink);
            }
            Some(c) => {
                self.switch_to(TokenizerState::ScriptDataEscaped);
                self.emit_char(c);
            }
        }
    }

    /// [§ 13.2.5.22 Script data escaped dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-dash-dash-state)
    pub(super) fn handle_script_data_escaped_dash_dash_state<S: TokenSink>(
        &mut self,
        c: Option<char>,
        sink: &mut S,
    ) {
        match c {
            Some('-') => self.emit_char('-'),
            Some('<') => self.switch_to(TokenizerState::ScriptDataEscapedLessThanSign),
            // "Switch to the script data state. Emit a U+003E GREATER-THAN SIGN
            // character token."
            Some('>') => {
                self.switch_to(TokenizerState::ScriptData);
                self.emit_char('>');
            }
            Some('\0') => {
                self.parse_error("unexpected-null-character");
                self.switch_to(TokenizerState::ScriptDataEscaped);
                self.emit_char('\u{FFFD}');
            }
            None => {
                self.parse_error("eof-in-script-html-comment-like-text");
                self.emit_eof(sink);
            }
            Some(c) => {
                self.switch_to(TokenizerState::ScriptDataEscaped);
                self.emit_char(c);
            }
        }
    }

    /// [§ 13.2.5.23 Script data escaped less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-less-than-sign-state)
    pub(super) fn handle_script_data_escaped_less_than_sign_state(&mut self, c: Option<char>) {
        match c {
            Some('/') => {
                self.temporary_buffer.clear();
                self.switch_to(TokenizerState::ScriptDataEscapedEndTagOpen);
            }
            // "Set the temporary buffer to the empty string. Emit a U+003C
            // LESS-THAN SIGN character token. Reconsume in the script data double
            // escape start state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.temporary_buffer.clear();
                self.emit_char('<');
                self.reconsume_in(TokenizerState::ScriptDataDoubleEscapeStart);
            }
            _ => {
                self.emit_char('<');
                self.reconsume_in(TokenizerState::ScriptDataEscaped);
            }
        }
    }

    /// [§ 13.2.5.26 Script data double escape start state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escape-start-state)
    pub(super) fn handle_script_data_double_escape_start_state(&mut self, c: Option<char>) {
        self.handle_double_escape_boundary(
            c,
            TokenizerState::ScriptDataDoubleEscaped,
            TokenizerState::ScriptDataEscaped,
        );
    }

    /// [§ 13.2.5.31 Script data double escape end state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escape-end-state)
    pub(super) fn handle_script_data_double_escape_end_state(&mut self, c: Option<char>) {
        self.handle_double_escape_boundary(
            c,
            TokenizerState::ScriptDataEscaped,
            TokenizerState::ScriptDataDoubleEscaped,
        );
    }

    /// The double escape start and end states only differ in where they go.
    ///
    /// "If the temporary buffer is the string "script", then switch to
    /// `on_script`. Otherwise, switch to `otherwise`. Emit the current input
    /// character as a character token."
    fn handle_double_escape_boundary(
        &mut self,
        c: Option<char>,
        on_script: TokenizerState,
        otherwise: TokenizerState,
    ) {
        match c {
            Some(c) if is_whitespace_char(c) || c == '/' || c == '>' => {
                if self.temporary_buffer == "script" {
                    self.switch_to(on_script);
                } else {
                    self.switch_to(otherwise);
                }
                self.emit_char(c);
            }
            Some(c) if c.is_ascii_alphabetic() => {
                self.temporary_buffer.push(c.to_ascii_lowercase());
                self.emit_char(c);
            }
            _ => self.reconsume_in(otherwise),
        }
    }

    /// [§ 13.2.5.27 Script data double escaped state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-state)
    pub(super) fn handle_script_data_double_escaped_state<S: TokenSink>(
        &mut self,
        c: Option<char>,
        sink: &mut S,
    ) {
        match c {
            Some('-') => {
                self.switch_to(TokenizerState::ScriptDataDoubleEscapedDash);
                self.emit_char('-');
            }
            Some('<') => {
                self.switch_to(TokenizerState::ScriptDataDoubleEscapedLessThanSign);
                self.emit_char('<');
            }
            Some('\0') => {
                self.parse_error("unexpected-null-character");
                self.emit_char('\u{FFFD}');
            }
            None => {
                self.parse_error("eof-in-script-html-comment-like-text");
                self.emit_eof(sink);
            }
            Some(c) => self.emit_char(c),
        }
    }

    /// [§ 13.2.5.28 Script data double escaped dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-dash-state)
    pub(super) fn handle_script_data_double_escaped_dash_state<S: TokenSink>(
        &mut self,
        c: Option<char>,
        sink: &mut S,
    ) {
        match c {
            Some('-') => {
                self.switch_to(TokenizerState::ScriptDataDoubleEscapedDashDash);
                self.emit_char('-');
            }
            Some('<') => {
                self.switch_to(TokenizerState::ScriptDataDoubleEscapedLessThanSign);
                self.emit_char('<');
            }
            Some('\0') => {
                self.parse_error("unexpected-null-character");
                self.switch_to(TokenizerState::ScriptDataDoubleEscaped);
                self.emit_char('\u{FFFD}');
            }
            None => {
                self.parse_error("eof-in-script-html-comment-like-text");
                self.emit_eof(sink);
            }
            Some(c) => {
                self.switch_to(TokenizerState::ScriptDataDoubleEscaped);
                self.emit_char(c);
            }
        }
    }

    /// [§ 13.2.5.29 Script data double escaped dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-dash-dash-state)
    pub(super) fn handle_script_data_double_escaped_dash_dash_state<S: TokenSink>(
        &mut self,
        c: Option<char>,
        sink: &mut S,
    ) {
        match c {
            Some('-') => self.emit_char('-'),
            Some('<') => {
                self.switch_to(TokenizerState::ScriptDataDoubleEscapedLessThanSign);
                self.emit_char('<');
            }
            Some('>') => {
                self.switch_to(TokenizerState::ScriptData);
                self.emit_char('>');
            }
            Some('\0') => {
                self.parse_error("unexpected-null-character");
                self.switch_to(TokenizerState::ScriptDataDoubleEscaped);
                self.emit_char('\u{FFFD}');
            }
            None => {
                self.parse_error("eof-in-script-html-comment-like-text");
                self.emit_eof(sink);
            }
            Some(c) => {
                self.switch_to(TokenizerState::ScriptDataDoubleEscaped);
                self.emit_char(c);
            }
        }
    }

    /// [§ 13.2.5.30 Script data double escaped less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-less-than-sign-state)
    pub(super) fn handle_script_data_double_escaped_less_than_sign_state(&mut self, c: Option<char>) {
        if c == Some('/') {
            self.temporary_buffer.clear();
            self.switch_to(TokenizerState::ScriptDataDoubleEscapeEnd);
            self.emit_char('/');
        } else {
            self.reconsume_in(TokenizerState::ScriptDataDoubleEscaped);
        }
    }
}
