//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Token construction ("Create a new start tag token")
//! - Token emission ("Emit the current token")
//! - Attribute helpers for duplicate detection
//! - Parse error reporting

use heron_common::warning::warn_once;

use super::core::{TagKind, Tokenizer, TokenizerState};
use super::sink::{TokenSink, TokenSinkResult};
use super::token::{Attribute, Token};
use crate::error::{IssueSource, ParseIssue};
use crate::scanner::Scanner;

// =============================================================================
// State Transition Helpers
// =============================================================================

impl Tokenizer {
    /// "Switch to the X state"
    ///
    /// The next character will be consumed on the next step.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// The same character will be processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }

    /// [§ 13.2.5.72](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    ///
    /// "Set the return state to X. Switch to the character reference state."
    pub(super) fn begin_character_reference(&mut self, return_state: TokenizerState) {
        self.return_state = return_state;
        self.temporary_buffer.clear();
        self.temporary_buffer.push('&');
        self.switch_to(TokenizerState::CharacterReference);
    }
}

// =============================================================================
// Text Helpers
// =============================================================================

impl Tokenizer {
    /// "Emit the current input character as a character token."
    pub(super) fn emit_char(&mut self, c: char) {
        self.pending_text.push(c);
    }

    /// Emit every character of `s` as character tokens.
    pub(super) fn emit_str(&mut self, s: &str) {
        self.pending_text.push_str(s);
    }

    /// Deliver buffered characters as one text token.
    pub(super) fn flush_text<S: TokenSink>(&mut self, sink: &mut S) {
        if self.pending_text.is_empty() {
            return;
        }
        let data = std::mem::take(&mut self.pending_text);
        self.deliver(Token::text(data), sink);
    }

    /// Consume a run of ordinary characters in the data-like states.
    ///
    /// Returns `false` if nothing was consumed, so the caller falls back to
    /// the character-at-a-time path for the delimiter, NUL, or EOF.
    pub(super) fn consume_text_run(&mut self, scanner: &mut Scanner) -> bool {
        let before = self.pending_text.len();
        let mut nuls = 0usize;
        match self.state {
            // The data state passes U+0000 through untouched.
            TokenizerState::Data => scanner.consume_run(
                |c| {
                    nuls += usize::from(c == '\0');
                    c != '<' && c != '&'
                },
                &mut self.pending_text,
            ),
            TokenizerState::RCDATA => {
                scanner.consume_run(|c| !matches!(c, '<' | '&' | '\0'), &mut self.pending_text);
            }
            TokenizerState::RAWTEXT | TokenizerState::ScriptData => {
                scanner.consume_run(|c| !matches!(c, '<' | '\0'), &mut self.pending_text);
            }
            _ => scanner.consume_run(|c| c != '\0', &mut self.pending_text),
        }
        for _ in 0..nuls {
            self.parse_error("unexpected-null-character");
        }
        self.pending_text.len() > before
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    ///
    /// "A character reference is said to be consumed as part of an attribute if
    /// the return state is either attribute value (double-quoted) state,
    /// attribute value (single-quoted) state, or attribute value (unquoted) state."
    pub(super) const fn consumed_as_part_of_attribute(&self) -> bool {
        matches!(
            self.return_state,
            TokenizerState::AttributeValueDoubleQuoted
                | TokenizerState::AttributeValueSingleQuoted
                | TokenizerState::AttributeValueUnquoted
        )
    }

    /// "Flush code points consumed as a character reference"
    ///
    /// "If the character reference was consumed as part of an attribute, then
    /// append each character to the current attribute's value. Otherwise, emit
    /// each character as a character token."
    pub(super) fn flush_code_points_consumed_as_character_reference(&mut self) {
        let buffer = std::mem::take(&mut self.temporary_buffer);
        if self.consumed_as_part_of_attribute() {
            self.append_to_attribute_value(&buffer);
        } else {
            self.emit_str(&buffer);
        }
    }
}

// =============================================================================
// Token Construction Helpers
// =============================================================================

impl Tokenizer {
    /// "Create a new start tag token, set its tag name to the empty string."
    pub(super) fn create_tag(&mut self, kind: TagKind) {
        self.tag_kind = kind;
        self.tag_name.clear();
        self.tag_self_closing = false;
        self.tag_attributes.clear();
        self.current_attribute = None;
        self.current_attribute_is_duplicate = false;
    }

    /// "Start a new attribute in the current tag token. Set that attribute
    /// name and value to the empty string."
    pub(super) fn start_new_attribute(&mut self) {
        self.finish_attribute();
        self.current_attribute = Some(Attribute::new("", ""));
    }

    fn finish_attribute(&mut self) {
        let is_duplicate = std::mem::take(&mut self.current_attribute_is_duplicate);
        if let Some(attribute) = self.current_attribute.take() {
            if !is_duplicate {
                self.tag_attributes.push(attribute);
            }
        }
    }

    pub(super) fn append_to_attribute_name(&mut self, c: char) {
        if let Some(attribute) = self.current_attribute.as_mut() {
            attribute.name.push(c);
        }
    }

    pub(super) fn append_to_attribute_value(&mut self, s: &str) {
        if let Some(attribute) = self.current_attribute.as_mut() {
            attribute.value.push_str(s);
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "When the user agent leaves the attribute name state (and before emitting the
    /// tag token, if appropriate), the complete attribute's name must be compared to
    /// the other attributes on the same token; if there is already an attribute on
    /// the token with the exact same name, then this is a duplicate-attribute parse
    /// error and the new attribute must be removed from the token."
    pub(super) fn check_duplicate_attribute(&mut self) {
        let is_duplicate = self.current_attribute.as_ref().is_some_and(|current| {
            self.tag_attributes
                .iter()
                .any(|attribute| attribute.name == current.name)
        });
        if is_duplicate {
            self.parse_error("duplicate-attribute");
            self.current_attribute_is_duplicate = true;
        }
    }

    /// "Create a new comment token. Set its data to the empty string."
    pub(super) fn create_comment(&mut self, data: &str) {
        self.comment_data.clear();
        self.comment_data.push_str(data);
    }

    /// "Create a new DOCTYPE token."
    pub(super) fn create_doctype(&mut self) {
        self.doctype_name = None;
        self.doctype_public_id = None;
        self.doctype_system_id = None;
        self.doctype_force_quirks = false;
    }

    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    ///
    /// "An appropriate end tag token is an end tag token whose tag name matches
    /// the tag name of the last start tag to have been emitted from this
    /// tokenizer, if any. If no start tag has been emitted from this tokenizer,
    /// then no end tag token is appropriate."
    pub(super) fn is_appropriate_end_tag_token(&self) -> bool {
        self.tag_kind == TagKind::End
            && self.last_start_tag_name.as_deref() == Some(self.tag_name.as_str())
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl Tokenizer {
    /// Hand a token to the sink and apply its feedback.
    fn deliver<S: TokenSink>(&mut self, token: Token, sink: &mut S) {
        self.tokens_emitted += 1;
        match sink.process_token(token) {
            TokenSinkResult::Continue => {}
            TokenSinkResult::SwitchTo(state) => self.switch_to(state),
            TokenSinkResult::Suspend => self.suspended = true,
        }
    }

    /// Emit a non-text token, delivering buffered characters first.
    pub(super) fn emit<S: TokenSink>(&mut self, token: Token, sink: &mut S) {
        self.flush_text(sink);
        self.deliver(token, sink);
    }

    /// "Emit the current tag token."
    pub(super) fn emit_current_tag<S: TokenSink>(&mut self, sink: &mut S) {
        self.finish_attribute();
        let name = std::mem::take(&mut self.tag_name);
        let token = match self.tag_kind {
            TagKind::Start => {
                self.last_start_tag_name = Some(name.clone());
                Token::StartTag {
                    name,
                    self_closing: self.tag_self_closing,
                    attributes: std::mem::take(&mut self.tag_attributes),
                }
            }
            TagKind::End => {
                if !self.tag_attributes.is_empty() {
                    self.parse_error("end-tag-with-attributes");
                    self.tag_attributes.clear();
                }
                if self.tag_self_closing {
                    self.parse_error("end-tag-with-trailing-solidus");
                }
                Token::EndTag { name }
            }
        };
        self.emit(token, sink);
    }

    /// "Emit the comment token."
    pub(super) fn emit_current_comment<S: TokenSink>(&mut self, sink: &mut S) {
        let data = std::mem::take(&mut self.comment_data);
        self.emit(Token::Comment { data }, sink);
    }

    /// "Emit the current DOCTYPE token."
    pub(super) fn emit_current_doctype<S: TokenSink>(&mut self, sink: &mut S) {
        let token = Token::Doctype {
            name: self.doctype_name.take(),
            public_identifier: self.doctype_public_id.take(),
            system_identifier: self.doctype_system_id.take(),
            force_quirks: self.doctype_force_quirks,
        };
        self.emit(token, sink);
    }

    /// "Emit an end-of-file token."
    pub(super) fn emit_eof<S: TokenSink>(&mut self, sink: &mut S) {
        self.emit(Token::EndOfFile, sink);
        self.finished = true;
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl Tokenizer {
    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Records a parse error. Parse errors in HTML are not fatal - the
    /// tokenizer recovers and continues.
    pub(super) fn parse_error(&mut self, code: &str) {
        if self.log_parse_errors {
            let _ = warn_once(IssueSource::Tokenizer.component(), code);
        }
        self.issues.push(ParseIssue {
            source: IssueSource::Tokenizer,
            message: code.to_string(),
        });
    }
}
