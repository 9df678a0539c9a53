//! Markup declarations: comments, DOCTYPEs and CDATA sections.
//!
//! [§ 13.2.5.41](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
//! through [§ 13.2.5.69](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-state).

use super::core::{Tokenizer, TokenizerResult, TokenizerState};
use super::sink::TokenSink;
use super::text_states::is_whitespace_char;
use crate::scanner::{Peek, ScanUntil, Scanner};

// =============================================================================
// Comments
// =============================================================================

impl Tokenizer {
    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    pub(super) fn handle_bogus_comment_state<S: TokenSink>(&mut self, c: Option<char>, sink: &mut S) {
        match c {
            // "Switch to the data state. Emit the current comment token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_comment(sink);
            }
            // "EOF - Emit the comment. Emit an end-of-file token."
            None => {
                self.emit_current_comment(sink);
                self.emit_eof(sink);
            }
            Some('\0') => {
                self.parse_error("unexpected-null-character");
                self.comment_data.push('\u{FFFD}');
            }
            Some(c) => self.comment_data.push(c),
        }
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// Looks ahead without consuming. If the buffered input is a prefix of one
    /// of the keywords, wait for more rather than guess.
    pub(super) fn handle_markup_declaration_open_state<S: TokenSink>(
        &mut self,
        scanner: &mut Scanner,
        sink: &mut S,
    ) -> TokenizerResult {
        // "If the next two characters are both U+002D HYPHEN-MINUS characters
        // (-), consume those two characters, create a comment token whose data is
        // the empty string, and switch to the comment start state."
        match scanner.match_ahead("--", false) {
            None => return TokenizerResult::NeedMoreInput,
            Some(true) => {
                scanner.advance(2);
                self.create_comment("");
                self.switch_to(TokenizerState::CommentStart);
                return TokenizerResult::Continue;
            }
            Some(false) => {}
        }

        // "Otherwise, if the next seven characters are an ASCII case-insensitive
        // match for the word "DOCTYPE", then consume those characters and switch
        // to the DOCTYPE state."
        match scanner.match_ahead("DOCTYPE", true) {
            None => return TokenizerResult::NeedMoreInput,
            Some(true) => {
                scanner.advance(7);
                self.switch_to(TokenizerState::DOCTYPE);
                return TokenizerResult::Continue;
            }
            Some(false) => {}
        }

        // "Otherwise, if there is an adjusted current node and it is not an
        // element in the HTML namespace and the next seven characters are a
        // case-sensitive match for the string "[CDATA[", then consume those
        // characters and switch to the CDATA section state."
        match scanner.match_ahead("[CDATA[", false) {
            None => return TokenizerResult::NeedMoreInput,
            Some(true) => {
                scanner.advance(7);
                if sink.adjusted_current_node_is_foreign() {
                    self.switch_to(TokenizerState::CDATASection);
                } else {
                    // "Otherwise, this is a cdata-in-html-content parse error.
                    // Create a comment token whose data is the "[CDATA[" string.
                    // Switch to the bogus comment state."
                    self.parse_error("cdata-in-html-content");
                    self.create_comment("[CDATA[");
                    self.switch_to(TokenizerState::BogusComment);
                }
                return TokenizerResult::Continue;
            }
            Some(false) => {}
        }

        // "Otherwise, this is an incorrectly-opened-comment parse error. Create
        // a comment token whose data is the empty string. Switch to the bogus
        // comment state (don't consume anything in the current state)."
        self.parse_error("incorrectly-opened-comment");
        self.create_comment("");
        self.switch_to(TokenizerState::BogusComment);
        TokenizerResult::Continue
    }

    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    pub(super) fn handle_comment_start_state<S: TokenSink>(&mut self, c: Option<char>, sink: &mut S) {
        match c {
            Some('-') => self.switch_to(TokenizerState::CommentStartDash),
            // "This is an abrupt-closing-of-empty-comment parse error. Switch to
            // the data state. Emit the current comment token."
            Some('>') => {
                self.parse_error("abrupt-closing-of-empty-comment");
                self.switch_to(TokenizerState::Data);
                self.emit_current_comment(sink);
            }
            _ => self.reconsume_in(TokenizerState::Comment),
        }
    }

    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    pub(super) fn handle_comment_start_dash_state<S: TokenSink>(
        &mut self,
        c: Option<char>,
        sink: &mut S,
    ) {
        match c {
            Some('-') => self.switch_to(TokenizerState::CommentEnd),
            Some('>') => {
                self.parse_error("abrupt-closing-of-empty-comment");
                self.switch_to(TokenizerState::Data);
                self.emit_current_comment(sink);
            }
            None => self.eof_in_comment(sink),
            Some(_) => {
                self.comment_data.push('-');
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    pub(super) fn handle_comment_state<S: TokenSink>(&mut self, c: Option<char>, sink: &mut S) {
        match c {
            // "Append the current input character to the comment token's data.
            // Switch to the comment less-than sign state."
            Some('<') => {
                self.comment_data.push('<');
                self.switch_to(TokenizerState::CommentLessThanSign);
            }
            Some('-') => self.switch_to(TokenizerState::CommentEndDash),
            Some('\0') => {
                self.parse_error("unexpected-null-character");
                self.comment_data.push('\u{FFFD}');
            }
            None => self.eof_in_comment(sink),
            Some(c) => self.comment_data.push(c),
        }
    }

    /// [§ 13.2.5.46 Comment less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-state)
    pub(super) fn handle_comment_less_than_sign_state<S: TokenSink>(
        &mut self,
        c: Option<char>,
        _sink: &mut S,
    ) {
        match c {
            Some('!') => {
                self.comment_data.push('!');
                self.switch_to(TokenizerState::CommentLessThanSignBang);
            }
            Some('<') => self.comment_data.push('<'),
            _ => self.reconsume_in(TokenizerState::Comment),
        }
    }

    /// [§ 13.2.5.47 Comment less-than sign bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-state)
    pub(super) fn handle_comment_less_than_sign_bang_state<S: TokenSink>(
        &mut self,
        c: Option<char>,
        _sink: &mut S,
    ) {
        if c == Some('-') {
            self.switch_to(TokenizerState::CommentLessThanSignBangDash);
        } else {
            self.reconsume_in(TokenizerState::Comment);
        }
    }

    /// [§ 13.2.5.48 Comment less-than sign bang dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-state)
    pub(super) fn handle_comment_less_than_sign_bang_dash_state<S: TokenSink>(
        &mut self,
        c: Option<char>,
        _sink: &mut S,
    ) {
        if c == Some('-') {
            self.switch_to(TokenizerState::CommentLessThanSignBangDashDash);
        } else {
            self.reconsume_in(TokenizerState::CommentEndDash);
        }
    }

    /// [§ 13.2.5.49 Comment less-than sign bang dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-dash-state)
    pub(super) fn handle_comment_less_than_sign_bang_dash_dash_state<S: TokenSink>(
        &mut self,
        c: Option<char>,
        _sink: &mut S,
    ) {
        // "Anything else - This is a nested-comment parse error. Reconsume in
        // the comment end state."
        if !matches!(c, Some('>') | None) {
            self.parse_error("nested-comment");
        }
        self.reconsume_in(TokenizerState::CommentEnd);
    }

    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    pub(super) fn handle_comment_end_dash_state<S: TokenSink>(&mut self, c: Option<char>, sink: &mut S) {
        match c {
            Some('-') => self.switch_to(TokenizerState::CommentEnd),
            None => self.eof_in_comment(sink),
            Some(_) => {
                self.comment_data.push('-');
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    pub(super) fn handle_comment_end_state<S: TokenSink>(&mut self, c: Option<char>, sink: &mut S) {
        match c {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_comment(sink);
            }
            Some('!') => self.switch_to(TokenizerState::CommentEndBang),
            // "Append a U+002D HYPHEN-MINUS character (-) to the comment token's data."
            Some('-') => self.comment_data.push('-'),
            None => self.eof_in_comment(sink),
            Some(_) => {
                self.comment_data.push_str("--");
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.52 Comment end bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-bang-state)
    pub(super) fn handle_comment_end_bang_state<S: TokenSink>(&mut self, c: Option<char>, sink: &mut S) {
        match c {
            Some('-') => {
                self.comment_data.push_str("--!");
                self.switch_to(TokenizerState::CommentEndDash);
            }
            // "This is an incorrectly-closed-comment parse error. Switch to the
            // data state. Emit the current comment token."
            Some('>') => {
                self.parse_error("incorrectly-closed-comment");
                self.switch_to(TokenizerState::Data);
                self.emit_current_comment(sink);
            }
            None => self.eof_in_comment(sink),
            Some(_) => {
                self.comment_data.push_str("--!");
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// "This is an eof-in-comment parse error. Emit the current comment token.
    /// Emit an end-of-file token."
    fn eof_in_comment<S: TokenSink>(&mut self, sink: &mut S) {
        self.parse_error("eof-in-comment");
        self.emit_current_comment(sink);
        self.emit_eof(sink);
    }
}

// =============================================================================
// DOCTYPE
// =============================================================================

impl Tokenizer {
    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    pub(super) fn handle_doctype_state<S: TokenSink>(&mut self, c: Option<char>, sink: &mut S) {
        match c {
            Some(c) if is_whitespace_char(c) => self.switch_to(TokenizerState::BeforeDOCTYPEName),
            Some('>') => self.reconsume_in(TokenizerState::BeforeDOCTYPEName),
            // "This is an eof-in-doctype parse error. Create a new DOCTYPE token.
            // Set its force-quirks flag to on. Emit the current token. Emit an
            // end-of-file token."
            None => {
                self.create_doctype();
                self.eof_in_doctype(sink);
            }
            Some(_) => {
                self.parse_error("missing-whitespace-before-doctype-name");
                self.reconsume_in(TokenizerState::BeforeDOCTYPEName);
            }
        }
    }

    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    pub(super) fn handle_before_doctype_name_state<S: TokenSink>(
        &mut self,
        c: Option<char>,
        sink: &mut S,
    ) {
        match c {
            Some(c) if is_whitespace_char(c) => {}
            Some('\0') => {
                self.parse_error("unexpected-null-character");
                self.create_doctype();
                self.doctype_name = Some(String::from('\u{FFFD}'));
                self.switch_to(TokenizerState::DOCTYPEName);
            }
            // "This is a missing-doctype-name parse error. Create a new DOCTYPE
            // token. Set its force-quirks flag to on. Switch to the data state.
            // Emit the current token."
            Some('>') => {
                self.parse_error("missing-doctype-name");
                self.create_doctype();
                self.doctype_force_quirks = true;
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype(sink);
            }
            None => {
                self.create_doctype();
                self.eof_in_doctype(sink);
            }
            // "Create a new DOCTYPE token. Set the token's name to the current
            // input character", lowercased if it is ASCII upper alpha.
            Some(c) => {
                self.create_doctype();
                self.doctype_name = Some(String::from(c.to_ascii_lowercase()));
                self.switch_to(TokenizerState::DOCTYPEName);
            }
        }
    }

    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    pub(super) fn handle_doctype_name_state<S: TokenSink>(&mut self, c: Option<char>, sink: &mut S) {
        match c {
            Some(c) if is_whitespace_char(c) => self.switch_to(TokenizerState::AfterDOCTYPEName),
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype(sink);
            }
            None => self.eof_in_doctype(sink),
            Some(c) => {
                let c = if c == '\0' {
                    self.parse_error("unexpected-null-character");
                    '\u{FFFD}'
                } else {
                    c.to_ascii_lowercase()
                };
                self.doctype_name.get_or_insert_with(String::new).push(c);
            }
        }
    }

    /// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
    ///
    /// The "PUBLIC"/"SYSTEM" keywords are matched by looking ahead, so this
    /// state reads the scanner directly.
    pub(super) fn handle_after_doctype_name_state<S: TokenSink>(
        &mut self,
        scanner: &mut Scanner,
        sink: &mut S,
    ) -> TokenizerResult {
        match scanner.peek() {
            Peek::NeedMore => return TokenizerResult::NeedMoreInput,
            Peek::Eof => self.eof_in_doctype(sink),
            Peek::Char(c) if is_whitespace_char(c) => scanner.advance(1),
            Peek::Char('>') => {
                scanner.advance(1);
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype(sink);
            }
            Peek::Char(_) => {
                // "If the six characters starting from the current input
                // character are an ASCII case-insensitive match for the word
                // "PUBLIC", then consume those characters and switch to the after
                // DOCTYPE public keyword state."
                let public = scanner.match_ahead("PUBLIC", true);
                let system = scanner.match_ahead("SYSTEM", true);
                match (public, system) {
                    (Some(true), _) => {
                        scanner.advance(6);
                        self.switch_to(TokenizerState::AfterDOCTYPEPublicKeyword);
                    }
                    (_, Some(true)) => {
                        scanner.advance(6);
                        self.switch_to(TokenizerState::AfterDOCTYPESystemKeyword);
                    }
                    (None, _) | (_, None) => return TokenizerResult::NeedMoreInput,
                    // "Otherwise, this is an
                    // invalid-character-sequence-after-doctype-name parse error.
                    // Set the current DOCTYPE token's force-quirks flag to on.
                    // Reconsume in the bogus DOCTYPE state."
                    (Some(false), Some(false)) => {
                        self.parse_error("invalid-character-sequence-after-doctype-name");
                        self.doctype_force_quirks = true;
                        self.switch_to(TokenizerState::BogusDOCTYPE);
                    }
                }
            }
        }
        TokenizerResult::Continue
    }

    /// [§ 13.2.5.57 After DOCTYPE public keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-keyword-state)
    /// and [§ 13.2.5.63 After DOCTYPE system keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-keyword-state)
    pub(super) fn handle_after_doctype_keyword_state<S: TokenSink>(
        &mut self,
        c: Option<char>,
        is_public: bool,
        sink: &mut S,
    ) {
        let keyword = if is_public { "public" } else { "system" };
        match c {
            Some(c) if is_whitespace_char(c) => {
                self.switch_to(if is_public {
                    TokenizerState::BeforeDOCTYPEPublicIdentifier
                } else {
                    TokenizerState::BeforeDOCTYPESystemIdentifier
                });
            }
            // "This is a missing-whitespace-after-doctype-public-keyword parse
            // error. Set the current DOCTYPE token's public identifier to the
            // empty string (not missing), then switch to the DOCTYPE public
            // identifier (double-quoted) state."
            Some(quote @ ('"' | '\'')) => {
                self.parse_error(&format!("missing-whitespace-after-doctype-{keyword}-keyword"));
                self.begin_doctype_identifier(quote, is_public);
            }
            Some('>') => self.missing_doctype_identifier(is_public, sink),
            None => self.eof_in_doctype(sink),
            Some(_) => self.missing_quote_before_doctype_identifier(is_public),
        }
    }

    /// [§ 13.2.5.58 Before DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-public-identifier-state)
    /// and [§ 13.2.5.64 Before DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-system-identifier-state)
    pub(super) fn handle_before_doctype_identifier_state<S: TokenSink>(
        &mut self,
        c: Option<char>,
        is_public: bool,
        sink: &mut S,
    ) {
        match c {
            Some(c) if is_whitespace_char(c) => {}
            Some(quote @ ('"' | '\'')) => self.begin_doctype_identifier(quote, is_public),
            Some('>') => self.missing_doctype_identifier(is_public, sink),
            None => self.eof_in_doctype(sink),
            Some(_) => self.missing_quote_before_doctype_identifier(is_public),
        }
    }

    /// [§ 13.2.5.59](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(double-quoted)-state)
    /// through [§ 13.2.5.66](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(single-quoted)-state):
    /// the four quoted identifier states.
    pub(super) fn handle_doctype_identifier_quoted_state<S: TokenSink>(
        &mut self,
        c: Option<char>,
        quote: char,
        is_public: bool,
        sink: &mut S,
    ) {
        match c {
            Some(c) if c == quote => {
                self.switch_to(if is_public {
                    TokenizerState::AfterDOCTYPEPublicIdentifier
                } else {
                    TokenizerState::AfterDOCTYPESystemIdentifier
                });
            }
            Some('\0') => {
                self.parse_error("unexpected-null-character");
                self.doctype_identifier(is_public).push('\u{FFFD}');
            }
            // "This is an abrupt-doctype-public-identifier parse error. Set the
            // current DOCTYPE token's force-quirks flag to on. Switch to the data
            // state. Emit the current DOCTYPE token."
            Some('>') => {
                let keyword = if is_public { "public" } else { "system" };
                self.parse_error(&format!("abrupt-doctype-{keyword}-identifier"));
                self.doctype_force_quirks = true;
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype(sink);
            }
            None => self.eof_in_doctype(sink),
            Some(c) => self.doctype_identifier(is_public).push(c),
        }
    }

    /// [§ 13.2.5.61 After DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-identifier-state)
    pub(super) fn handle_after_doctype_public_identifier_state<S: TokenSink>(
        &mut self,
        c: Option<char>,
        sink: &mut S,
    ) {
        match c {
            Some(c) if is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BetweenDOCTYPEPublicAndSystemIdentifiers);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype(sink);
            }
            Some(quote @ ('"' | '\'')) => {
                self.parse_error("missing-whitespace-between-doctype-public-and-system-identifiers");
                self.begin_doctype_identifier(quote, false);
            }
            None => self.eof_in_doctype(sink),
            Some(_) => self.missing_quote_before_doctype_identifier(false),
        }
    }

    /// [§ 13.2.5.62 Between DOCTYPE public and system identifiers state](https://html.spec.whatwg.org/multipage/parsing.html#between-doctype-public-and-system-identifiers-state)
    pub(super) fn handle_between_doctype_public_and_system_identifiers_state<S: TokenSink>(
        &mut self,
        c: Option<char>,
        sink: &mut S,
    ) {
        match c {
            Some(c) if is_whitespace_char(c) => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype(sink);
            }
            Some(quote @ ('"' | '\'')) => self.begin_doctype_identifier(quote, false),
            None => self.eof_in_doctype(sink),
            Some(_) => self.missing_quote_before_doctype_identifier(false),
        }
    }

    /// [§ 13.2.5.67 After DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-identifier-state)
    pub(super) fn handle_after_doctype_system_identifier_state<S: TokenSink>(
        &mut self,
        c: Option<char>,
        sink: &mut S,
    ) {
        match c {
            Some(c) if is_whitespace_char(c) => {}
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype(sink);
            }
            None => self.eof_in_doctype(sink),
            // "This is an unexpected-character-after-doctype-system-identifier
            // parse error. Reconsume in the bogus DOCTYPE state. (This does not
            // set the current DOCTYPE token's force-quirks flag to on.)"
            Some(_) => {
                self.parse_error("unexpected-character-after-doctype-system-identifier");
                self.reconsume_in(TokenizerState::BogusDOCTYPE);
            }
        }
    }

    /// [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state)
    pub(super) fn handle_bogus_doctype_state<S: TokenSink>(&mut self, c: Option<char>, sink: &mut S) {
        match c {
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_doctype(sink);
            }
            Some('\0') => self.parse_error("unexpected-null-character"),
            // "Emit the DOCTYPE token. Emit an end-of-file token."
            None => {
                self.emit_current_doctype(sink);
                self.emit_eof(sink);
            }
            Some(_) => {}
        }
    }

    /// The public or system identifier being built.
    fn doctype_identifier(&mut self, is_public: bool) -> &mut String {
        let slot = if is_public {
            &mut self.doctype_public_id
        } else {
            &mut self.doctype_system_id
        };
        slot.get_or_insert_with(String::new)
    }

    /// "Set the current DOCTYPE token's identifier to the empty string (not
    /// missing), then switch to the DOCTYPE identifier (quoted) state."
    fn begin_doctype_identifier(&mut self, quote: char, is_public: bool) {
        self.doctype_identifier(is_public).clear();
        self.switch_to(match (is_public, quote) {
            (true, '"') => TokenizerState::DOCTYPEPublicIdentifierDoubleQuoted,
            (true, _) => TokenizerState::DOCTYPEPublicIdentifierSingleQuoted,
            (false, '"') => TokenizerState::DOCTYPESystemIdentifierDoubleQuoted,
            (false, _) => TokenizerState::DOCTYPESystemIdentifierSingleQuoted,
        });
    }

    /// "This is a missing-doctype-public-identifier parse error. Set the
    /// current DOCTYPE token's force-quirks flag to on. Switch to the data
    /// state. Emit the current DOCTYPE token."
    fn missing_doctype_identifier<S: TokenSink>(&mut self, is_public: bool, sink: &mut S) {
        let keyword = if is_public { "public" } else { "system" };
        self.parse_error(&format!("missing-doctype-{keyword}-identifier"));
        self.doctype_force_quirks = true;
        self.switch_to(TokenizerState::Data);
        self.emit_current_doctype(sink);
    }

    /// "This is a missing-quote-before-doctype-public-identifier parse error.
    /// Set the current DOCTYPE token's force-quirks flag to on. Reconsume in
    /// the bogus DOCTYPE state."
    fn missing_quote_before_doctype_identifier(&mut self, is_public: bool) {
        let keyword = if is_public { "public" } else { "system" };
        self.parse_error(&format!("missing-quote-before-doctype-{keyword}-identifier"));
        self.doctype_force_quirks = true;
        self.reconsume_in(TokenizerState::BogusDOCTYPE);
    }

    /// "This is an eof-in-doctype parse error. Set the current DOCTYPE token's
    /// force-quirks flag to on. Emit the current DOCTYPE token. Emit an
    /// end-of-file token."
    fn eof_in_doctype<S: TokenSink>(&mut self, sink: &mut S) {
        self.parse_error("eof-in-doctype");
        self.doctype_force_quirks = true;
        self.emit_current_doctype(sink);
        self.emit_eof(sink);
    }
}

// =============================================================================
// CDATA
// =============================================================================

impl Tokenizer {
    /// [§ 13.2.5.69 CDATA section state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-state)
    ///
    /// Also covers the bracket and end states: everything up to `]]>` is
    /// character data, NULs included.
    pub(super) fn handle_cdata_section_state<S: TokenSink>(
        &mut self,
        scanner: &mut Scanner,
        sink: &mut S,
    ) -> TokenizerResult {
        match scanner.consume_until("]]>") {
            ScanUntil::Found(text) => {
                self.emit_str(&text);
                self.switch_to(TokenizerState::Data);
                TokenizerResult::Continue
            }
            ScanUntil::NeedMore(text) => {
                self.emit_str(&text);
                TokenizerResult::NeedMoreInput
            }
            // "This is an eof-in-cdata parse error. Emit an end-of-file token."
            ScanUntil::Eof(text) => {
                self.emit_str(&text);
                self.parse_error("eof-in-cdata");
                self.emit_eof(sink);
                TokenizerResult::Continue
            }
        }
    }
}
