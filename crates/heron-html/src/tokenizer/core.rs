use strum_macros::{Display, EnumString};

use super::sink::TokenSink;
use super::token::Attribute;
use crate::error::ParseIssue;
use crate::scanner::{Peek, Scanner};

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// The tokenizer state machine. Each state corresponds to a section in § 13.2.5.
///
/// The CDATA section bracket and end states are folded into
/// [`TokenizerState::CDATASection`], which scans for `]]>` directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum TokenizerState {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    #[strum(to_string = "Data state")]
    Data,
    /// [§ 13.2.5.2 RCDATA state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-state)
    #[strum(to_string = "RCDATA state")]
    RCDATA,
    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    #[strum(to_string = "RAWTEXT state")]
    RAWTEXT,
    /// [§ 13.2.5.4 Script data state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-state)
    #[strum(to_string = "Script data state")]
    ScriptData,
    /// [§ 13.2.5.5 PLAINTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#plaintext-state)
    #[strum(to_string = "PLAINTEXT state")]
    PLAINTEXT,
    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    TagOpen,
    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    EndTagOpen,
    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    TagName,
    /// [§ 13.2.5.9 RCDATA less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-less-than-sign-state)
    RCDATALessThanSign,
    /// [§ 13.2.5.10 RCDATA end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-open-state)
    RCDATAEndTagOpen,
    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    RCDATAEndTagName,
    /// [§ 13.2.5.12 RAWTEXT less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-less-than-sign-state)
    RAWTEXTLessThanSign,
    /// [§ 13.2.5.13 RAWTEXT end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-open-state)
    RAWTEXTEndTagOpen,
    /// [§ 13.2.5.14 RAWTEXT end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-name-state)
    RAWTEXTEndTagName,
    /// [§ 13.2.5.15 Script data less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-less-than-sign-state)
    ScriptDataLessThanSign,
    /// [§ 13.2.5.16 Script data end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-end-tag-open-state)
    ScriptDataEndTagOpen,
    /// [§ 13.2.5.17 Script data end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-end-tag-name-state)
    ScriptDataEndTagName,
    /// [§ 13.2.5.18 Script data escape start state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escape-start-state)
    ScriptDataEscapeStart,
    /// [§ 13.2.5.19 Script data escape start dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escape-start-dash-state)
    ScriptDataEscapeStartDash,
    /// [§ 13.2.5.20 Script data escaped state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-state)
    ScriptDataEscaped,
    /// [§ 13.2.5.21 Script data escaped dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-dash-state)
    ScriptDataEscapedDash,
    /// [§ 13.2.5.22 Script data escaped dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-dash-dash-state)
    ScriptDataEscapedDashDash,
    /// [§ 13.2.5.23 Script data escaped less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-less-than-sign-state)
    ScriptDataEscapedLessThanSign,
    /// [§ 13.2.5.24 Script data escaped end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-end-tag-open-state)
    ScriptDataEscapedEndTagOpen,
    /// [§ 13.2.5.25 Script data escaped end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-escaped-end-tag-name-state)
    ScriptDataEscapedEndTagName,
    /// [§ 13.2.5.26 Script data double escape start state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escape-start-state)
    ScriptDataDoubleEscapeStart,
    /// [§ 13.2.5.27 Script data double escaped state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-state)
    ScriptDataDoubleEscaped,
    /// [§ 13.2.5.28 Script data double escaped dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-dash-state)
    ScriptDataDoubleEscapedDash,
    /// [§ 13.2.5.29 Script data double escaped dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-dash-dash-state)
    ScriptDataDoubleEscapedDashDash,
    /// [§ 13.2.5.30 Script data double escaped less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escaped-less-than-sign-state)
    ScriptDataDoubleEscapedLessThanSign,
    /// [§ 13.2.5.31 Script data double escape end state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-double-escape-end-state)
    ScriptDataDoubleEscapeEnd,
    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    BeforeAttributeName,
    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    AttributeName,
    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    AfterAttributeName,
    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    BeforeAttributeValue,
    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    AttributeValueDoubleQuoted,
    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    AttributeValueSingleQuoted,
    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    AttributeValueUnquoted,
    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    AfterAttributeValueQuoted,
    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    SelfClosingStartTag,
    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    BogusComment,
    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    MarkupDeclarationOpen,
    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    CommentStart,
    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    CommentStartDash,
    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    Comment,
    /// [§ 13.2.5.46 Comment less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-state)
    CommentLessThanSign,
    /// [§ 13.2.5.47 Comment less-than sign bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-state)
    CommentLessThanSignBang,
    /// [§ 13.2.5.48 Comment less-than sign bang dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-state)
    CommentLessThanSignBangDash,
    /// [§ 13.2.5.49 Comment less-than sign bang dash dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-less-than-sign-bang-dash-dash-state)
    CommentLessThanSignBangDashDash,
    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    CommentEndDash,
    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    CommentEnd,
    /// [§ 13.2.5.52 Comment end bang state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-bang-state)
    CommentEndBang,
    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    DOCTYPE,
    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    BeforeDOCTYPEName,
    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    DOCTYPEName,
    /// [§ 13.2.5.56 After DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-name-state)
    AfterDOCTYPEName,
    /// [§ 13.2.5.57 After DOCTYPE public keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-keyword-state)
    AfterDOCTYPEPublicKeyword,
    /// [§ 13.2.5.58 Before DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-public-identifier-state)
    BeforeDOCTYPEPublicIdentifier,
    /// [§ 13.2.5.59 DOCTYPE public identifier (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(double-quoted)-state)
    DOCTYPEPublicIdentifierDoubleQuoted,
    /// [§ 13.2.5.60 DOCTYPE public identifier (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-public-identifier-(single-quoted)-state)
    DOCTYPEPublicIdentifierSingleQuoted,
    /// [§ 13.2.5.61 After DOCTYPE public identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-public-identifier-state)
    AfterDOCTYPEPublicIdentifier,
    /// [§ 13.2.5.62 Between DOCTYPE public and system identifiers state](https://html.spec.whatwg.org/multipage/parsing.html#between-doctype-public-and-system-identifiers-state)
    BetweenDOCTYPEPublicAndSystemIdentifiers,
    /// [§ 13.2.5.63 After DOCTYPE system keyword state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-keyword-state)
    AfterDOCTYPESystemKeyword,
    /// [§ 13.2.5.64 Before DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-system-identifier-state)
    BeforeDOCTYPESystemIdentifier,
    /// [§ 13.2.5.65 DOCTYPE system identifier (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(double-quoted)-state)
    DOCTYPESystemIdentifierDoubleQuoted,
    /// [§ 13.2.5.66 DOCTYPE system identifier (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-system-identifier-(single-quoted)-state)
    DOCTYPESystemIdentifierSingleQuoted,
    /// [§ 13.2.5.67 After DOCTYPE system identifier state](https://html.spec.whatwg.org/multipage/parsing.html#after-doctype-system-identifier-state)
    AfterDOCTYPESystemIdentifier,
    /// [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state)
    BogusDOCTYPE,
    /// [§ 13.2.5.69 CDATA section state](https://html.spec.whatwg.org/multipage/parsing.html#cdata-section-state)
    #[strum(to_string = "CDATA section state")]
    CDATASection,
    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    CharacterReference,
    /// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
    NamedCharacterReference,
    /// [§ 13.2.5.74 Ambiguous ampersand state](https://html.spec.whatwg.org/multipage/parsing.html#ambiguous-ampersand-state)
    AmbiguousAmpersand,
    /// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    NumericCharacterReference,
    /// [§ 13.2.5.76 Hexadecimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-start-state)
    HexadecimalCharacterReferenceStart,
    /// [§ 13.2.5.77 Decimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-start-state)
    DecimalCharacterReferenceStart,
    /// [§ 13.2.5.78 Hexadecimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-state)
    HexadecimalCharacterReference,
    /// [§ 13.2.5.79 Decimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-state)
    DecimalCharacterReference,
    /// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
    NumericCharacterReferenceEnd,
}

/// Start or end tag, while the tag token is being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TagKind {
    Start,
    End,
}

/// Tokenizer configuration.
#[derive(Debug, Clone)]
pub struct TokenizerOptions {
    /// State to start in. Tree construction picks RCDATA/RAWTEXT/... for
    /// fragment parsing; tokenizer tests pick them directly.
    pub initial_state: TokenizerState,
    /// Seed for "the last start tag", used to decide whether an end tag is
    /// appropriate in RCDATA/RAWTEXT/script data.
    pub last_start_tag: Option<String>,
    /// Report each distinct parse error once on stderr.
    pub log_parse_errors: bool,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            initial_state: TokenizerState::Data,
            last_start_tag: None,
            log_parse_errors: false,
        }
    }
}

impl TokenizerOptions {
    /// Start in `state`.
    #[must_use]
    pub const fn with_initial_state(mut self, state: TokenizerState) -> Self {
        self.initial_state = state;
        self
    }

    /// Seed the last start tag name.
    #[must_use]
    pub fn with_last_start_tag(mut self, tag: impl Into<String>) -> Self {
        self.last_start_tag = Some(tag.into());
        self
    }

    /// Log parse errors through the shared warning system.
    #[must_use]
    pub const fn with_parse_error_logging(mut self, enabled: bool) -> Self {
        self.log_parse_errors = enabled;
        self
    }
}

/// Outcome of one tokenizer step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizerResult {
    /// Keep stepping.
    Continue,
    /// The scanner ran dry before the stream was finished.
    NeedMoreInput,
    /// The sink asked to suspend (a script end tag was processed).
    Suspended,
    /// The end-of-file token has been emitted.
    Done,
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// "Implementations must act as if they used the following state machine to
/// tokenize HTML."
///
/// Input comes from a [`Scanner`]; tokens go to a [`TokenSink`]. The
/// tokenizer holds every partially built token between calls, so it can stop
/// at any chunk boundary and pick up where it left off.
#[derive(Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct Tokenizer {
    /// The current state of the tokenizer state machine.
    pub(super) state: TokenizerState,

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    ///
    /// "set the return state to the X state"
    pub(super) return_state: TokenizerState,

    /// "The current input character is the last character to have been consumed."
    /// `None` means EOF.
    pub(super) current_input_character: Option<char>,

    /// "Reconsume in the X state": the current input character is handed to
    /// the next state instead of consuming a new one.
    pub(super) reconsume: bool,

    /// Characters waiting to be delivered as one text token.
    pub(super) pending_text: String,

    // Tag under construction.
    pub(super) tag_kind: TagKind,
    pub(super) tag_name: String,
    pub(super) tag_self_closing: bool,
    pub(super) tag_attributes: Vec<Attribute>,
    /// Attribute under construction.
    pub(super) current_attribute: Option<Attribute>,
    /// Set when the current attribute's name repeats an earlier one.
    pub(super) current_attribute_is_duplicate: bool,

    /// Data of the comment under construction.
    pub(super) comment_data: String,

    // DOCTYPE under construction.
    pub(super) doctype_name: Option<String>,
    pub(super) doctype_public_id: Option<String>,
    pub(super) doctype_system_id: Option<String>,
    pub(super) doctype_force_quirks: bool,

    /// "The temporary buffer"
    pub(super) temporary_buffer: String,

    /// "The character reference code"
    pub(super) character_reference_code: u32,

    /// Longest named reference seen so far: bytes of the temporary buffer it
    /// covers and its replacement.
    pub(super) named_match: Option<(usize, &'static str)>,

    /// "The last start tag to have been emitted from this tokenizer"
    pub(super) last_start_tag_name: Option<String>,

    /// Set after the end-of-file token has been emitted.
    pub(super) finished: bool,

    /// Set when the sink asked to suspend after the last token.
    pub(super) suspended: bool,

    /// Total tokens delivered to the sink.
    pub(super) tokens_emitted: u64,

    pub(super) issues: Vec<ParseIssue>,
    pub(super) log_parse_errors: bool,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(TokenizerOptions::default())
    }
}

impl Tokenizer {
    /// Create a tokenizer with the given options.
    #[must_use]
    pub fn new(options: TokenizerOptions) -> Self {
        Self {
            state: options.initial_state,
            return_state: TokenizerState::Data,
            current_input_character: None,
            reconsume: false,
            pending_text: String::new(),
            tag_kind: TagKind::Start,
            tag_name: String::new(),
            tag_self_closing: false,
            tag_attributes: Vec::new(),
            current_attribute: None,
            current_attribute_is_duplicate: false,
            comment_data: String::new(),
            doctype_name: None,
            doctype_public_id: None,
            doctype_system_id: None,
            doctype_force_quirks: false,
            temporary_buffer: String::new(),
            character_reference_code: 0,
            named_match: None,
            last_start_tag_name: options.last_start_tag,
            finished: false,
            suspended: false,
            tokens_emitted: 0,
            issues: Vec::new(),
            log_parse_errors: options.log_parse_errors,
        }
    }

    /// The state the machine is in.
    #[must_use]
    pub const fn state(&self) -> TokenizerState {
        self.state
    }

    /// Force a state change (the tree builder's feedback path).
    pub const fn set_state(&mut self, state: TokenizerState) {
        self.state = state;
    }

    /// Whether the end-of-file token has been emitted.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Number of tokens delivered to the sink so far.
    #[must_use]
    pub const fn tokens_emitted(&self) -> u64 {
        self.tokens_emitted
    }

    /// Parse errors recovered from so far.
    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// Step until the scanner runs dry, the sink suspends, or EOF is emitted.
    pub fn run<S: TokenSink>(&mut self, scanner: &mut Scanner, sink: &mut S) -> TokenizerResult {
        loop {
            match self.step(scanner, sink) {
                TokenizerResult::Continue => {}
                result => return result,
            }
        }
    }

    /// Run one state of the machine.
    pub fn step<S: TokenSink>(&mut self, scanner: &mut Scanner, sink: &mut S) -> TokenizerResult {
        if self.finished {
            return TokenizerResult::Done;
        }

        let result = self.step_state(scanner, sink);

        if result == TokenizerResult::NeedMoreInput {
            self.flush_text(sink);
        }
        if self.suspended {
            self.suspended = false;
            return TokenizerResult::Suspended;
        }
        if self.finished {
            return TokenizerResult::Done;
        }
        result
    }

    /// Run the handler for the current state.
    ///
    /// The lookahead states (character reference, named and numeric
    /// character reference end, markup declaration open, CDATA section and
    /// after DOCTYPE name) are dispatched by the first `match` and never
    /// reach the per-character `match`; a pending reconsume carries over to
    /// the state they switch to. The `unreachable!` arms of the second
    /// `match` guard that internal invariant; no input can reach them.
    fn step_state<S: TokenSink>(&mut self, scanner: &mut Scanner, sink: &mut S) -> TokenizerResult {
        // States that look ahead, or need no input at all, read the scanner
        // themselves. Only numeric character reference end is entered by
        // reconsuming, and it reads no input.
        match self.state {
            TokenizerState::CharacterReference => {
                return self.handle_character_reference_state(scanner);
            }
            TokenizerState::NamedCharacterReference => {
                return self.handle_named_character_reference_state(scanner);
            }
            TokenizerState::NumericCharacterReferenceEnd => {
                self.handle_numeric_character_reference_end_state();
                return TokenizerResult::Continue;
            }
            TokenizerState::MarkupDeclarationOpen => {
                return self.handle_markup_declaration_open_state(scanner, sink);
            }
            TokenizerState::AfterDOCTYPEName if !self.reconsume => {
                return self.handle_after_doctype_name_state(scanner, sink);
            }
            TokenizerState::CDATASection => return self.handle_cdata_section_state(scanner, sink),
            TokenizerState::Data
            | TokenizerState::RCDATA
            | TokenizerState::RAWTEXT
            | TokenizerState::ScriptData
            | TokenizerState::PLAINTEXT
                if !self.reconsume =>
            {
                if self.consume_text_run(scanner) {
                    return TokenizerResult::Continue;
                }
            }
            _ => {}
        }

        // Each remaining state begins by consuming the next input character,
        // unless we're reconsuming from a previous state transition.
        if self.reconsume {
            self.reconsume = false;
        } else {
            self.current_input_character = match scanner.consume() {
                Peek::Char(c) => Some(c),
                Peek::Eof => None,
                Peek::NeedMore => return TokenizerResult::NeedMoreInput,
            };
        }
        let c = self.current_input_character;

        match self.state {
            TokenizerState::Data => self.handle_data_state(c, sink),
            TokenizerState::RCDATA => self.handle_rcdata_state(c, sink),
            TokenizerState::RAWTEXT => self.handle_rawtext_state(c, sink),
            TokenizerState::ScriptData => self.handle_script_data_state(c, sink),
            TokenizerState::PLAINTEXT => self.handle_plaintext_state(c, sink),
            TokenizerState::TagOpen => self.handle_tag_open_state(c, sink),
            TokenizerState::EndTagOpen => self.handle_end_tag_open_state(c, sink),
            TokenizerState::TagName => self.handle_tag_name_state(c, sink),
            TokenizerState::RCDATALessThanSign => {
                self.handle_text_less_than_sign_state(c, TokenizerState::RCDATA);
            }
            TokenizerState::RCDATAEndTagOpen => {
                self.handle_text_end_tag_open_state(c, TokenizerState::RCDATA);
            }
            TokenizerState::RCDATAEndTagName => {
                self.handle_text_end_tag_name_state(c, TokenizerState::RCDATA, sink);
            }
            TokenizerState::RAWTEXTLessThanSign => {
                self.handle_text_less_than_sign_state(c, TokenizerState::RAWTEXT);
            }
            TokenizerState::RAWTEXTEndTagOpen => {
                self.handle_text_end_tag_open_state(c, TokenizerState::RAWTEXT);
            }
            TokenizerState::RAWTEXTEndTagName => {
                self.handle_text_end_tag_name_state(c, TokenizerState::RAWTEXT, sink);
            }
            TokenizerState::ScriptDataLessThanSign => {
                self.handle_script_data_less_than_sign_state(c);
            }
            TokenizerState::ScriptDataEndTagOpen => {
                self.handle_text_end_tag_open_state(c, TokenizerState::ScriptData);
            }
            TokenizerState::ScriptDataEndTagName => {
                self.handle_text_end_tag_name_state(c, TokenizerState::ScriptData, sink);
            }
            TokenizerState::ScriptDataEscapeStart => self.handle_script_data_escape_start_state(c),
            TokenizerState::ScriptDataEscapeStartDash => {
                self.handle_script_data_escape_start_dash_state(c);
            }
            TokenizerState::ScriptDataEscaped => self.handle_script_data_escaped_state(c, sink),
            TokenizerState::ScriptDataEscapedDash => {
                self.handle_script_data_escaped_dash_state(c, sink);
            }
            TokenizerState::ScriptDataEscapedDashDash => {
                self.handle_script_data_escaped_dash_dash_state(c, sink);
            }
            TokenizerState::ScriptDataEscapedLessThanSign => {
                self.handle_script_data_escaped_less_than_sign_state(c);
            }
            TokenizerState::ScriptDataEscapedEndTagOpen => {
                self.handle_text_end_tag_open_state(c, TokenizerState::ScriptDataEscaped);
            }
            TokenizerState::ScriptDataEscapedEndTagName => {
                self.handle_text_end_tag_name_state(c, TokenizerState::ScriptDataEscaped, sink);
            }
            TokenizerState::ScriptDataDoubleEscapeStart => {
                self.handle_script_data_double_escape_start_state(c);
            }
            TokenizerState::ScriptDataDoubleEscaped => {
                self.handle_script_data_double_escaped_state(c, sink);
            }
            TokenizerState::ScriptDataDoubleEscapedDash => {
                self.handle_script_data_double_escaped_dash_state(c, sink);
            }
            TokenizerState::ScriptDataDoubleEscapedDashDash => {
                self.handle_script_data_double_escaped_dash_dash_state(c, sink);
            }
            TokenizerState::ScriptDataDoubleEscapedLessThanSign => {
                self.handle_script_data_double_escaped_less_than_sign_state(c);
            }
            TokenizerState::ScriptDataDoubleEscapeEnd => {
                self.handle_script_data_double_escape_end_state(c);
            }
            TokenizerState::BeforeAttributeName => self.handle_before_attribute_name_state(c),
            TokenizerState::AttributeName => self.handle_attribute_name_state(c),
            TokenizerState::AfterAttributeName => self.handle_after_attribute_name_state(c, sink),
            TokenizerState::BeforeAttributeValue => {
                self.handle_before_attribute_value_state(c, sink);
            }
            TokenizerState::AttributeValueDoubleQuoted => {
                self.handle_attribute_value_quoted_state(c, '"', sink);
            }
            TokenizerState::AttributeValueSingleQuoted => {
                self.handle_attribute_value_quoted_state(c, '\'', sink);
            }
            TokenizerState::AttributeValueUnquoted => {
                self.handle_attribute_value_unquoted_state(c, sink);
            }
            TokenizerState::AfterAttributeValueQuoted => {
                self.handle_after_attribute_value_quoted_state(c, sink);
            }
            TokenizerState::SelfClosingStartTag => self.handle_self_closing_start_tag_state(c, sink),
            TokenizerState::BogusComment => self.handle_bogus_comment_state(c, sink),
            TokenizerState::CommentStart => self.handle_comment_start_state(c, sink),
            TokenizerState::CommentStartDash => self.handle_comment_start_dash_state(c, sink),
            TokenizerState::Comment => self.handle_comment_state(c, sink),
            TokenizerState::CommentLessThanSign => self.handle_comment_less_than_sign_state(c, sink),
            TokenizerState::CommentLessThanSignBang => {
                self.handle_comment_less_than_sign_bang_state(c, sink);
            }
            TokenizerState::CommentLessThanSignBangDash => {
                self.handle_comment_less_than_sign_bang_dash_state(c, sink);
            }
            TokenizerState::CommentLessThanSignBangDashDash => {
                self.handle_comment_less_than_sign_bang_dash_dash_state(c, sink);
            }
            TokenizerState::CommentEndDash => self.handle_comment_end_dash_state(c, sink),
            TokenizerState::CommentEnd => self.handle_comment_end_state(c, sink),
            TokenizerState::CommentEndBang => self.handle_comment_end_bang_state(c, sink),
            TokenizerState::DOCTYPE => self.handle_doctype_state(c, sink),
            TokenizerState::BeforeDOCTYPEName => self.handle_before_doctype_name_state(c, sink),
            TokenizerState::DOCTYPEName => self.handle_doctype_name_state(c, sink),
            TokenizerState::AfterDOCTYPEName => {
                // Only reached by reconsuming, which no state does.
                unreachable!("after DOCTYPE name state entered by reconsume")
            }
            TokenizerState::AfterDOCTYPEPublicKeyword => {
                self.handle_after_doctype_keyword_state(c, true, sink);
            }
            TokenizerState::BeforeDOCTYPEPublicIdentifier => {
                self.handle_before_doctype_identifier_state(c, true, sink);
            }
            TokenizerState::DOCTYPEPublicIdentifierDoubleQuoted => {
                self.handle_doctype_identifier_quoted_state(c, '"', true, sink);
            }
            TokenizerState::DOCTYPEPublicIdentifierSingleQuoted => {
                self.handle_doctype_identifier_quoted_state(c, '\'', true, sink);
            }
            TokenizerState::AfterDOCTYPEPublicIdentifier => {
                self.handle_after_doctype_public_identifier_state(c, sink);
            }
            TokenizerState::BetweenDOCTYPEPublicAndSystemIdentifiers => {
                self.handle_between_doctype_public_and_system_identifiers_state(c, sink);
            }
            TokenizerState::AfterDOCTYPESystemKeyword => {
                self.handle_after_doctype_keyword_state(c, false, sink);
            }
            TokenizerState::BeforeDOCTYPESystemIdentifier => {
                self.handle_before_doctype_identifier_state(c, false, sink);
            }
            TokenizerState::DOCTYPESystemIdentifierDoubleQuoted => {
                self.handle_doctype_identifier_quoted_state(c, '"', false, sink);
            }
            TokenizerState::DOCTYPESystemIdentifierSingleQuoted => {
                self.handle_doctype_identifier_quoted_state(c, '\'', false, sink);
            }
            TokenizerState::AfterDOCTYPESystemIdentifier => {
                self.handle_after_doctype_system_identifier_state(c, sink);
            }
            TokenizerState::BogusDOCTYPE => self.handle_bogus_doctype_state(c, sink),
            TokenizerState::AmbiguousAmpersand => self.handle_ambiguous_ampersand_state(c),
            TokenizerState::NumericCharacterReference => {
                self.handle_numeric_character_reference_state(c);
            }
            TokenizerState::HexadecimalCharacterReferenceStart => {
                self.handle_hexadecimal_character_reference_start_state(c);
            }
            TokenizerState::DecimalCharacterReferenceStart => {
                self.handle_decimal_character_reference_start_state(c);
            }
            TokenizerState::HexadecimalCharacterReference => {
                self.handle_hexadecimal_character_reference_state(c);
            }
            TokenizerState::DecimalCharacterReference => {
                self.handle_decimal_character_reference_state(c);
            }
            TokenizerState::CharacterReference
            | TokenizerState::NamedCharacterReference
            | TokenizerState::NumericCharacterReferenceEnd
            | TokenizerState::MarkupDeclarationOpen
            | TokenizerState::CDATASection => {
                unreachable!("{} is handled before consuming input", self.state)
            }
        }

        TokenizerResult::Continue
    }
}
