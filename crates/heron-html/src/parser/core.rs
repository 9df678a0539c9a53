use strum_macros::{Display, EnumString};

use heron_common::warning::warn_once;
use heron_dom::{Namespace, QualName, QuirksMode};

use super::foreign_content::{dom_attributes, mathml};
use super::formatting::FormattingEntry;
use super::sink::TreeSink;
use super::stack::OpenElement;
use crate::driver::ParserOptions;
use crate::error::{IssueSource, ParseIssue};
use crate::tokenizer::{Attribute, Token, TokenSink, TokenSinkResult, TokenizerState};

/// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
///
/// "The insertion mode is a state variable that controls the primary operation
/// of the tree construction stage."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum InsertionMode {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    Initial,
    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    BeforeHtml,
    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    BeforeHead,
    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    InHead,
    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    InHeadNoscript,
    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    AfterHead,
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    InBody,
    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    Text,
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    InTable,
    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    InTableText,
    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    InCaption,
    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolumngroup)
    InColumnGroup,
    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intablebody)
    InTableBody,
    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inrow)
    InRow,
    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incell)
    InCell,
    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    InSelect,
    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    InSelectInTable,
    /// [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)
    InTemplate,
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    AfterBody,
    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    InFrameset,
    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    AfterFrameset,
    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    AfterAfterBody,
    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    AfterAfterFrameset,
}

/// What to do after a rule has run.
#[derive(Debug)]
pub(super) enum ProcessResult {
    /// The token has been consumed.
    Done,
    /// "Switch the insertion mode to X and reprocess the token." Goes back
    /// through the tree construction dispatcher.
    Reprocess(InsertionMode, Token),
    /// Reprocess with the current insertion mode's rules, skipping the
    /// foreign content check. Used when leaving foreign content.
    ReprocessHtml(Token),
}

/// [§ 13.2.6.1 Creating and inserting nodes](https://html.spec.whatwg.org/multipage/parsing.html#appropriate-place-for-inserting-a-node)
///
/// "The adjusted insertion location": a parent and an optional sibling to
/// insert before.
#[derive(Debug, Clone)]
pub(super) enum InsertionPlace<H> {
    /// Append as the last child of the node.
    Append(H),
    /// Insert into `parent` immediately before `sibling`.
    Before {
        /// The parent.
        parent: H,
        /// The sibling the new node goes in front of.
        sibling: H,
    },
}

/// "ASCII whitespace is U+0009 TAB, U+000A LF, U+000C FF, U+000D CR, or
/// U+0020 SPACE."
pub(super) const fn is_html_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' ')
}

/// Split a text run into its leading whitespace and the rest.
pub(super) fn split_leading_whitespace(data: &str) -> (&str, &str) {
    let split = data.find(|c| !is_html_whitespace(c)).unwrap_or(data.len());
    data.split_at(split)
}

/// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
///
/// Receives tokens from the tokenizer and builds a document through a
/// [`TreeSink`].
#[allow(clippy::struct_excessive_bools)]
pub struct TreeBuilder<S: TreeSink> {
    /// Where nodes are created and inserted.
    pub(super) sink: S,

    /// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
    pub(super) mode: InsertionMode,

    /// [§ 13.2.4.1](https://html.spec.whatwg.org/multipage/parsing.html#original-insertion-mode)
    ///
    /// "The original insertion mode", set when entering the text and in table
    /// text modes.
    pub(super) original_mode: Option<InsertionMode>,

    /// [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    pub(super) open_elements: Vec<OpenElement<S::Handle>>,

    /// [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
    pub(super) active_formatting: Vec<FormattingEntry<S::Handle>>,

    /// [§ 13.2.4.1](https://html.spec.whatwg.org/multipage/parsing.html#stack-of-template-insertion-modes)
    ///
    /// "The stack of template insertion modes"
    pub(super) template_modes: Vec<InsertionMode>,

    /// [§ 13.2.4.4 The element pointers](https://html.spec.whatwg.org/multipage/parsing.html#the-element-pointers)
    pub(super) head_element: Option<S::Handle>,
    /// "The form element pointer points to the last form element that was
    /// opened and whose end tag has not yet been seen."
    pub(super) form_element: Option<S::Handle>,

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#concept-frag-parse-context)
    ///
    /// The context element when parsing a fragment.
    pub(super) context_element: Option<OpenElement<S::Handle>>,

    /// [§ 13.2.4.5 Other parsing state flags](https://html.spec.whatwg.org/multipage/parsing.html#other-parsing-state-flags)
    pub(super) scripting_enabled: bool,
    /// "The frameset-ok flag"
    pub(super) frameset_ok: bool,

    pub(super) iframe_srcdoc: bool,
    pub(super) quirks_mode: QuirksMode,

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#foster-parent)
    pub(super) foster_parenting: bool,

    /// [§ 13.2.6.4.10](https://html.spec.whatwg.org/multipage/parsing.html#concept-pending-table-char-tokens)
    ///
    /// "The pending table character tokens list"
    pub(super) pending_table_text: String,

    /// Set after `<pre>`, `<listing>` and `<textarea>`: "If the next token is
    /// a U+000A LINE FEED (LF) character token, then ignore that token".
    pub(super) ignore_next_lf: bool,

    /// Tokenizer state requested by the last token, handed back through
    /// [`TokenSinkResult::SwitchTo`].
    pub(super) next_tokenizer_state: Option<TokenizerState>,

    /// A `<script>` whose end tag was just processed, waiting for the
    /// driver's script hook.
    pub(super) pending_script: Option<S::Handle>,
    suspend_requested: bool,

    /// Set by "stop parsing".
    pub(super) stopped: bool,

    issues: Vec<ParseIssue>,
    log_parse_errors: bool,
}

impl<S: TreeSink> TreeBuilder<S> {
    /// A tree builder for a whole document.
    #[must_use]
    pub fn new(sink: S, options: &ParserOptions) -> Self {
        Self {
            sink,
            mode: InsertionMode::Initial,
            original_mode: None,
            open_elements: Vec::new(),
            active_formatting: Vec::new(),
            template_modes: Vec::new(),
            head_element: None,
            form_element: None,
            context_element: None,
            scripting_enabled: options.scripting_enabled,
            frameset_ok: true,
            iframe_srcdoc: options.iframe_srcdoc,
            quirks_mode: QuirksMode::NoQuirks,
            foster_parenting: false,
            pending_table_text: String::new(),
            ignore_next_lf: false,
            next_tokenizer_state: None,
            pending_script: None,
            suspend_requested: false,
            stopped: false,
            issues: Vec::new(),
            log_parse_errors: options.log_parse_errors,
        }
    }

    /// [§ 13.2.9 Parsing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments)
    ///
    /// Set up fragment parsing with `context` (already created in the sink)
    /// as the context element. Returns the tokenizer state to start in and
    /// the synthetic `<html>` root whose children are the result.
    pub fn begin_fragment(&mut self, context: &S::Handle) -> (TokenizerState, S::Handle) {
        let name = self
            .sink
            .element_name(context)
            .unwrap_or_else(|| QualName::html("template"));
        let html_integration_point = name.ns == Namespace::MathMl
            && name.local == "annotation-xml"
            && self
                .sink
                .attribute(context, "encoding")
                .is_some_and(|encoding| mathml::is_html_annotation_encoding(&encoding));
        let context_element = OpenElement {
            handle: context.clone(),
            ns: name.ns,
            local: name.local,
            html_integration_point,
        };

        // "Let root be a new html element with no attributes. Append the
        // element root to the Document node created above. Set up the parser's
        // stack of open elements so that it contains just the single element
        // root."
        let document = self.sink.document();
        let root = self.sink.create_element(QualName::html("html"), Vec::new());
        self.sink.append_child(&document, &root);
        self.open_elements.push(OpenElement::html(root.clone(), "html"));

        // "If the context element is a template element, push "in template"
        // onto the stack of template insertion modes"
        if context_element.is_html("template") {
            self.template_modes.push(InsertionMode::InTemplate);
        }

        // "Set the state of the HTML parser's tokenization stage as follows,
        // switching on the context element"
        let state = if context_element.ns == Namespace::Html {
            match context_element.local.as_str() {
                "title" | "textarea" => TokenizerState::RCDATA,
                "style" | "xmp" | "iframe" | "noembed" | "noframes" => TokenizerState::RAWTEXT,
                "script" => TokenizerState::ScriptData,
                "noscript" if self.scripting_enabled => TokenizerState::RAWTEXT,
                "plaintext" => TokenizerState::PLAINTEXT,
                _ => TokenizerState::Data,
            }
        } else {
            TokenizerState::Data
        };

        self.context_element = Some(context_element);
        self.reset_insertion_mode();

        // "Set the parser's form element pointer to the nearest node to the
        // context element that is a form element (going straight up the
        // ancestor chain, and including the element itself, if it is a form
        // element), if any."
        let mut node = Some(context.clone());
        while let Some(current) = node {
            if self
                .sink
                .element_name(&current)
                .is_some_and(|name| name.ns == Namespace::Html && name.local == "form")
            {
                self.form_element = Some(current);
                break;
            }
            node = self.sink.parent(&current);
        }

        (state, root)
    }

    /// The sink being built into.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the sink, e.g. for a script hook.
    pub const fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Give up the tree builder and keep the sink.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// The current insertion mode.
    #[must_use]
    pub const fn mode(&self) -> InsertionMode {
        self.mode
    }

    /// The document mode chosen from the DOCTYPE.
    #[must_use]
    pub const fn quirks_mode(&self) -> QuirksMode {
        self.quirks_mode
    }

    /// Whether "stop parsing" has run.
    #[must_use]
    pub const fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Parse errors recovered from so far.
    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// Number of entries (markers included) in the list of active
    /// formatting elements.
    #[must_use]
    pub fn active_formatting_len(&self) -> usize {
        self.active_formatting.len()
    }

    /// The script element whose end tag suspended the parser, if any.
    pub const fn take_pending_script(&mut self) -> Option<S::Handle> {
        self.pending_script.take()
    }

    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    pub(super) fn parse_error(&mut self, message: &str) {
        if self.log_parse_errors {
            let _ = warn_once(IssueSource::TreeBuilder.component(), message);
        }
        self.issues.push(ParseIssue {
            source: IssueSource::TreeBuilder,
            message: message.to_string(),
        });
    }

    /// A token the current mode has no use for.
    pub(super) fn unexpected(&mut self, token: &Token) {
        let message = format!("unexpected {token} in {} mode", self.mode);
        self.parse_error(&message);
    }

    pub(super) fn set_quirks_mode(&mut self, mode: QuirksMode) {
        self.quirks_mode = mode;
        self.sink.set_quirks_mode(mode);
    }

    /// Ask the tokenizer to switch state once the current token is done.
    pub(super) const fn switch_tokenizer_to(&mut self, state: TokenizerState) {
        self.next_tokenizer_state = Some(state);
    }

    /// "Stop parsing": pop everything off the stack.
    pub(super) fn stop_parsing(&mut self) {
        self.open_elements.clear();
        self.stopped = true;
    }

    /// Hand a `</script>`'s element to the driver and suspend the tokenizer.
    pub(super) fn suspend_for_script(&mut self, script: S::Handle) {
        self.pending_script = Some(script);
        self.suspend_requested = true;
    }
}

// =============================================================================
// Token routing
// =============================================================================

impl<S: TreeSink> TokenSink for TreeBuilder<S> {
    fn process_token(&mut self, token: Token) -> TokenSinkResult {
        if self.stopped {
            return TokenSinkResult::Continue;
        }

        let mut token = token;
        if std::mem::take(&mut self.ignore_next_lf) {
            if let Token::Text { data, .. } = &mut token {
                if data.starts_with('\n') {
                    let _ = data.remove(0);
                    if data.is_empty() {
                        return TokenSinkResult::Continue;
                    }
                }
            }
        }

        self.dispatch(token);

        if std::mem::take(&mut self.suspend_requested) {
            return TokenSinkResult::Suspend;
        }
        match self.next_tokenizer_state.take() {
            Some(state) => TokenSinkResult::SwitchTo(state),
            None => TokenSinkResult::Continue,
        }
    }

    fn adjusted_current_node_is_foreign(&self) -> bool {
        self.adjusted_current_node()
            .is_some_and(|node| node.ns != Namespace::Html)
    }
}

impl<S: TreeSink> TreeBuilder<S> {
    /// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
    ///
    /// The tree construction dispatcher, run as a loop so reprocessing never
    /// recurses.
    fn dispatch(&mut self, token: Token) {
        let mut token = token;
        let mut use_foreign_rules = self.should_use_foreign_rules(&token);
        loop {
            let result = if use_foreign_rules {
                self.process_foreign_content(token)
            } else {
                self.process_in_mode(self.mode, token)
            };
            match result {
                ProcessResult::Done => return,
                ProcessResult::Reprocess(mode, next) => {
                    self.mode = mode;
                    token = next;
                    use_foreign_rules = self.should_use_foreign_rules(&token);
                }
                ProcessResult::ReprocessHtml(next) => {
                    token = next;
                    use_foreign_rules = false;
                }
            }
        }
    }

    /// "As each token is emitted from the tokenizer, the user agent must
    /// follow the appropriate steps from the following list"
    fn should_use_foreign_rules(&self, token: &Token) -> bool {
        // "If the stack of open elements is empty"
        let Some(node) = self.adjusted_current_node() else {
            return false;
        };
        // "If the adjusted current node is an element in the HTML namespace"
        if node.ns == Namespace::Html {
            return false;
        }
        // "If the adjusted current node is a MathML text integration point
        // and the token is a start tag whose tag name is neither "mglyph" nor
        // "malignmark"" / "...and the token is a character token"
        if node.is_mathml_text_integration_point() {
            match token {
                Token::StartTag { name, .. } if name != "mglyph" && name != "malignmark" => {
                    return false;
                }
                Token::Text { .. } => return false,
                _ => {}
            }
        }
        // "If the adjusted current node is a MathML annotation-xml element and
        // the token is a start tag whose tag name is "svg""
        if node.ns == Namespace::MathMl && node.local == "annotation-xml" && token.is_start_tag("svg") {
            return false;
        }
        // "If the adjusted current node is an HTML integration point and the
        // token is a start tag" / "...and the token is a character token"
        if node.is_html_integration_point() && matches!(token, Token::StartTag { .. } | Token::Text { .. }) {
            return false;
        }
        // "If the token is an end-of-file token"
        !token.is_eof()
    }
}

// =============================================================================
// Creating and inserting nodes
// =============================================================================

impl<S: TreeSink> TreeBuilder<S> {
    /// Where a node goes when appended to `element`, entering template
    /// contents.
    fn append_place(&self, element: &OpenElement<S::Handle>) -> InsertionPlace<S::Handle> {
        // "If the adjusted insertion location is inside a template element, let
        // it instead be inside the template element's template contents"
        if element.is_html("template") {
            InsertionPlace::Append(self.sink.template_contents(&element.handle))
        } else {
            InsertionPlace::Append(element.handle.clone())
        }
    }

    /// [§ 13.2.6.1 Creating and inserting nodes](https://html.spec.whatwg.org/multipage/parsing.html#appropriate-place-for-inserting-a-node)
    ///
    /// "The appropriate place for inserting a node, optionally using a
    /// particular override target"
    pub(super) fn appropriate_place(
        &self,
        override_target: Option<&OpenElement<S::Handle>>,
    ) -> Option<InsertionPlace<S::Handle>> {
        // "If there was an override target specified, then let target be the
        // override target. Otherwise, let target be the current node."
        let target = match override_target {
            Some(target) => target,
            None => self.open_elements.last()?,
        };

        // "If foster parenting is enabled and target is a table, tbody, tfoot,
        // thead, or tr element"
        if !(self.foster_parenting && target.is_html_one_of(&["table", "tbody", "tfoot", "thead", "tr"])) {
            return Some(self.append_place(target));
        }

        // "Let last template be the last template element in the stack of open
        // elements, if any. Let last table be the last table element in the
        // stack of open elements, if any."
        let last_template = self.open_elements.iter().rposition(|e| e.is_html("template"));
        let last_table = self.open_elements.iter().rposition(|e| e.is_html("table"));

        let place = match (last_template, last_table) {
            // "If there is a last template and either there is no last table, or
            // there is one, but last template is lower (more recently added)
            // than last table in the stack of open elements, then: let adjusted
            // insertion location be inside last template's template contents"
            (Some(template), table) if table.is_none_or(|table| template > table) => {
                self.append_place(&self.open_elements[template])
            }
            // "If there is no last table, then let adjusted insertion location
            // be inside the first element in the stack of open elements (the
            // html element). (fragment case)"
            (_, None) => self.append_place(&self.open_elements[0]),
            (_, Some(table)) => {
                let table_handle = &self.open_elements[table].handle;
                // "If last table has a parent node, then let adjusted insertion
                // location be inside last table's parent node, immediately
                // before last table"
                match self.sink.parent(table_handle) {
                    Some(parent) => InsertionPlace::Before {
                        parent,
                        sibling: table_handle.clone(),
                    },
                    // "Let previous element be the element immediately above
                    // last table in the stack of open elements"
                    None => self.append_place(&self.open_elements[table.saturating_sub(1)]),
                }
            }
        };
        Some(place)
    }

    /// Insert `node` at `place`.
    pub(super) fn insert_at(&mut self, place: InsertionPlace<S::Handle>, node: &S::Handle) {
        match place {
            InsertionPlace::Append(parent) => self.sink.append_child(&parent, node),
            InsertionPlace::Before { parent, sibling } => self.sink.insert_before(&parent, node, &sibling),
        }
    }

    /// [§ 13.2.6.1 Create an element for a token](https://html.spec.whatwg.org/multipage/parsing.html#create-an-element-for-the-token)
    pub(super) fn create_element_for(
        &mut self,
        name: &str,
        attributes: &[Attribute],
        ns: Namespace,
    ) -> OpenElement<S::Handle> {
        let html_integration_point = ns == Namespace::MathMl
            && name == "annotation-xml"
            && attributes.iter().any(|attribute| {
                attribute.name == "encoding" && mathml::is_html_annotation_encoding(&attribute.value)
            });
        let handle = self
            .sink
            .create_element(QualName::new(ns, name), dom_attributes(attributes, ns));
        OpenElement {
            handle,
            ns,
            local: name.to_string(),
            html_integration_point,
        }
    }

    /// [§ 13.2.6.1 Insert a foreign element](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-foreign-element)
    ///
    /// "Let the adjusted insertion location be the appropriate place for
    /// inserting a node. Let element be the result of creating an element for
    /// the token in the given namespace... insert element at the adjusted
    /// insertion location... Push element onto the stack of open elements so
    /// that it is the new current node."
    pub(super) fn insert_element(&mut self, name: &str, attributes: &[Attribute], ns: Namespace) -> S::Handle {
        let place = self.appropriate_place(None);
        let element = self.create_element_for(name, attributes, ns);
        let handle = element.handle.clone();
        if let Some(place) = place {
            self.insert_at(place, &handle);
        }
        self.open_elements.push(element);
        handle
    }

    /// [§ 13.2.6.1 Insert an HTML element](https://html.spec.whatwg.org/multipage/parsing.html#insert-an-html-element)
    pub(super) fn insert_html_element(&mut self, name: &str, attributes: &[Attribute]) -> S::Handle {
        self.insert_element(name, attributes, Namespace::Html)
    }

    /// Insert an HTML element and pop it right away (void elements).
    pub(super) fn insert_void_element(&mut self, name: &str, attributes: &[Attribute]) {
        let _ = self.insert_html_element(name, attributes);
        let _ = self.open_elements.pop();
    }

    /// [§ 13.2.6.1 Insert a comment](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-comment)
    pub(super) fn insert_comment(&mut self, data: &str) {
        let Some(place) = self.appropriate_place(None) else {
            return;
        };
        let comment = self.sink.create_comment(data);
        self.insert_at(place, &comment);
    }

    /// Insert a comment as the last child of `parent`.
    pub(super) fn append_comment_to(&mut self, parent: &S::Handle, data: &str) {
        let comment = self.sink.create_comment(data);
        self.sink.append_child(parent, &comment);
    }

    /// [§ 13.2.6.1 Insert a character](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    pub(super) fn insert_text(&mut self, data: &str) {
        if data.is_empty() {
            return;
        }
        let Some(place) = self.appropriate_place(None) else {
            return;
        };
        match place {
            // "If the adjusted insertion location is in a Document node, then
            // return."
            InsertionPlace::Append(parent) if parent == self.sink.document() => {}
            InsertionPlace::Append(parent) => self.sink.append_text(&parent, data),
            InsertionPlace::Before { parent, sibling } => self.sink.insert_text_before(&parent, &sibling, data),
        }
    }
}
