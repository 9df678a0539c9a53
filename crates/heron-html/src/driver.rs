//! The streaming parser: scanner, tokenizer and tree builder wired together.
//!
//! [§ 13.2.1 Overview of the parsing model](https://html.spec.whatwg.org/multipage/parsing.html#overview-of-the-parsing-model)
//!
//! Input arrives in chunks through [`HtmlParser::parse`]. Each call runs the
//! tokenizer until the buffered input is used up, the parser is paused, or
//! the end-of-file token has been processed. A script hook runs after every
//! `</script>` and may write text back into the stream with
//! [`HtmlParser::insert`].

use heron_dom::{DomTree, NodeId, QualName};

use crate::error::{HtmlError, ParseIssue};
use crate::parser::{TreeBuilder, TreeSink};
use crate::scanner::Scanner;
use crate::tokenizer::{Tokenizer, TokenizerOptions, TokenizerResult};

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// [§ 13.2.4.5](https://html.spec.whatwg.org/multipage/parsing.html#scripting-flag)
    ///
    /// "The scripting flag is set to "enabled" if scripting was enabled for the
    /// Document with which the parser is associated when the parser was
    /// created, and "disabled" otherwise." Decides how `<noscript>` parses.
    pub scripting_enabled: bool,
    /// Parse as an `iframe srcdoc` document: a missing DOCTYPE is not an
    /// error and never selects quirks mode.
    pub iframe_srcdoc: bool,
    /// Report each distinct parse error once on stderr.
    pub log_parse_errors: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            scripting_enabled: true,
            iframe_srcdoc: false,
            log_parse_errors: false,
        }
    }
}

impl ParserOptions {
    /// Set the scripting flag.
    #[must_use]
    pub const fn with_scripting(mut self, enabled: bool) -> Self {
        self.scripting_enabled = enabled;
        self
    }

    /// Treat the input as an `iframe srcdoc` document.
    #[must_use]
    pub const fn with_iframe_srcdoc(mut self, enabled: bool) -> Self {
        self.iframe_srcdoc = enabled;
        self
    }

    /// Log parse errors through the shared warning system.
    #[must_use]
    pub const fn with_parse_error_logging(mut self, enabled: bool) -> Self {
        self.log_parse_errors = enabled;
        self
    }
}

/// Where a call to [`HtmlParser::parse`] left off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatus {
    /// Every buffered code point was consumed; feed more input.
    NeedMoreInput,
    /// The pause counter is non-zero. Input fed now is queued until
    /// [`HtmlParser::resume`].
    Paused,
    /// The end-of-file token has been processed.
    Finished,
}

/// Called after a `</script>` end tag with the script element.
pub type ScriptHook<S> = Box<dyn FnMut(&mut HtmlParser<S>, &<S as TreeSink>::Handle)>;

/// A streaming HTML parser building into a [`TreeSink`].
///
/// # Example
///
/// ```
/// use heron_dom::DomTree;
/// use heron_html::{HtmlParser, ParseStatus, ParserOptions};
///
/// let mut parser = HtmlParser::new(DomTree::new(), ParserOptions::default());
/// assert_eq!(parser.parse_str("<p>Hel", false).unwrap(), ParseStatus::NeedMoreInput);
/// assert_eq!(parser.parse_str("lo</p>", true).unwrap(), ParseStatus::Finished);
///
/// let tree = parser.into_sink();
/// let body = tree.body().unwrap();
/// assert_eq!(tree.text_content(body), "Hello");
/// ```
pub struct HtmlParser<S: TreeSink> {
    scanner: Scanner,
    tokenizer: Tokenizer,
    tree_builder: TreeBuilder<S>,
    /// "A script nesting level" style pause counter; non-zero blocks the
    /// tokenizer.
    pause_depth: usize,
    script_hook: Option<ScriptHook<S>>,
    /// Number of script hooks currently running.
    script_nesting: usize,
    fragment_root: Option<S::Handle>,
}

impl<S: TreeSink> HtmlParser<S> {
    /// A parser for a whole document.
    #[must_use]
    pub fn new(sink: S, options: ParserOptions) -> Self {
        let tokenizer = Tokenizer::new(TokenizerOptions::default().with_parse_error_logging(options.log_parse_errors));
        Self {
            scanner: Scanner::new(),
            tokenizer,
            tree_builder: TreeBuilder::new(sink, &options),
            pause_depth: 0,
            script_hook: None,
            script_nesting: 0,
            fragment_root: None,
        }
    }

    /// [§ 13.2.9 Parsing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments)
    ///
    /// A parser for the children of `context`, an element that already exists
    /// in `sink`. The parsed nodes end up under [`HtmlParser::fragment_root`].
    #[must_use]
    pub fn new_fragment(sink: S, context: &S::Handle, options: ParserOptions) -> Self {
        let mut tree_builder = TreeBuilder::new(sink, &options);
        let (state, root) = tree_builder.begin_fragment(context);

        let mut tokenizer_options = TokenizerOptions::default()
            .with_initial_state(state)
            .with_parse_error_logging(options.log_parse_errors);
        if let Some(name) = tree_builder.sink().element_name(context) {
            tokenizer_options = tokenizer_options.with_last_start_tag(name.local);
        }

        Self {
            scanner: Scanner::new(),
            tokenizer: Tokenizer::new(tokenizer_options),
            tree_builder,
            pause_depth: 0,
            script_hook: None,
            script_nesting: 0,
            fragment_root: Some(root),
        }
    }

    /// Run `hook` after every `</script>` end tag.
    pub fn set_script_hook(&mut self, hook: impl FnMut(&mut Self, &S::Handle) + 'static) {
        self.script_hook = Some(Box::new(hook));
    }

    /// Feed a chunk of UTF-16 code units. `is_final` marks the end of the
    /// stream.
    ///
    /// # Errors
    ///
    /// [`HtmlError::StreamClosed`] if input arrives after the end of the
    /// stream was signalled.
    pub fn parse(&mut self, chunk: &[u16], is_final: bool) -> Result<ParseStatus, HtmlError> {
        self.parse_with(chunk, is_final, |_| false)
    }

    /// Like [`HtmlParser::parse`] for input that is already a string.
    ///
    /// # Errors
    ///
    /// [`HtmlError::StreamClosed`] if input arrives after the end of the
    /// stream was signalled.
    pub fn parse_str(&mut self, chunk: &str, is_final: bool) -> Result<ParseStatus, HtmlError> {
        self.check_open(chunk.is_empty())?;
        self.scanner.feed_str(chunk);
        if is_final {
            self.scanner.finish();
        }
        Ok(self.pump(&mut |_| false))
    }

    /// Like [`HtmlParser::parse`], asking `should_pause` after every
    /// tokenizer step whether to pause. A pause requested this way is
    /// released with [`HtmlParser::resume`].
    ///
    /// # Errors
    ///
    /// [`HtmlError::StreamClosed`] if input arrives after the end of the
    /// stream was signalled.
    pub fn parse_with(
        &mut self,
        chunk: &[u16],
        is_final: bool,
        mut should_pause: impl FnMut(&S) -> bool,
    ) -> Result<ParseStatus, HtmlError> {
        self.check_open(chunk.is_empty())?;
        self.scanner.feed(chunk);
        if is_final {
            self.scanner.finish();
        }
        Ok(self.pump(&mut should_pause))
    }

    fn check_open(&self, chunk_is_empty: bool) -> Result<(), HtmlError> {
        if self.scanner.is_finished() && !chunk_is_empty {
            return Err(HtmlError::StreamClosed);
        }
        Ok(())
    }

    /// Increment the pause counter. The tokenizer stops before its next step.
    pub const fn pause(&mut self) {
        self.pause_depth += 1;
    }

    /// Decrement the pause counter and, once it reaches zero, continue with
    /// the queued input.
    pub fn resume(&mut self) -> ParseStatus {
        self.pause_depth = self.pause_depth.saturating_sub(1);
        self.pump(&mut |_| false)
    }

    /// Whether the pause counter is non-zero.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.pause_depth > 0
    }

    /// Write `text` into the input stream at the current position, as
    /// `document.write()` does from a running script. The text is tokenized
    /// and built before this returns; input after the script continues
    /// afterwards. While the parser is paused the text is only queued, ahead
    /// of the remaining input, until [`HtmlParser::resume`].
    ///
    /// # Errors
    ///
    /// [`HtmlError::NotInScript`] unless called from the script hook.
    pub fn insert(&mut self, text: &str) -> Result<(), HtmlError> {
        if self.script_nesting == 0 {
            return Err(HtmlError::NotInScript);
        }
        let depth = self.scanner.nested_depth();
        self.scanner.push_frame(text);
        if self.pause_depth > 0 {
            return Ok(());
        }
        while self.scanner.nested_depth() > depth {
            match self.tokenizer.step(&mut self.scanner, &mut self.tree_builder) {
                TokenizerResult::Continue => {}
                TokenizerResult::Suspended => self.run_script_hook(),
                TokenizerResult::NeedMoreInput | TokenizerResult::Done => break,
            }
        }
        Ok(())
    }

    fn pump(&mut self, should_pause: &mut dyn FnMut(&S) -> bool) -> ParseStatus {
        loop {
            if self.pause_depth > 0 {
                return ParseStatus::Paused;
            }
            if self.tokenizer.is_finished() {
                return ParseStatus::Finished;
            }
            match self.tokenizer.step(&mut self.scanner, &mut self.tree_builder) {
                TokenizerResult::Continue => {
                    if should_pause(self.tree_builder.sink()) {
                        self.pause_depth += 1;
                        return ParseStatus::Paused;
                    }
                }
                TokenizerResult::NeedMoreInput => return ParseStatus::NeedMoreInput,
                TokenizerResult::Suspended => self.run_script_hook(),
                TokenizerResult::Done => return ParseStatus::Finished,
            }
        }
    }

    fn run_script_hook(&mut self) {
        let Some(script) = self.tree_builder.take_pending_script() else {
            return;
        };
        let Some(mut hook) = self.script_hook.take() else {
            return;
        };
        self.script_nesting += 1;
        hook(self, &script);
        self.script_nesting -= 1;
        // A hook may install a replacement for itself.
        if self.script_hook.is_none() {
            self.script_hook = Some(hook);
        }
    }

    /// The tree builder, for inspecting its state.
    #[must_use]
    pub const fn tree_builder(&self) -> &TreeBuilder<S> {
        &self.tree_builder
    }

    /// The sink being built into.
    #[must_use]
    pub const fn sink(&self) -> &S {
        self.tree_builder.sink()
    }

    /// Mutable access to the sink.
    pub const fn sink_mut(&mut self) -> &mut S {
        self.tree_builder.sink_mut()
    }

    /// The synthetic `<html>` element holding a parsed fragment.
    #[must_use]
    pub const fn fragment_root(&self) -> Option<&S::Handle> {
        self.fragment_root.as_ref()
    }

    /// Every parse error recovered from so far, tokenizer errors first.
    #[must_use]
    pub fn issues(&self) -> Vec<ParseIssue> {
        self.tokenizer
            .issues()
            .iter()
            .chain(self.tree_builder.issues())
            .cloned()
            .collect()
    }

    /// Finish with the parser and keep the sink.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.tree_builder.into_sink()
    }
}

/// Parse a complete document into a [`DomTree`].
///
/// # Example
///
/// ```
/// use heron_dom::dump::dump_document;
/// use heron_html::parse_document;
///
/// let tree = parse_document("<b>1<i>2</b>3</i>");
/// assert!(dump_document(&tree).contains("|     <i>\n|       \"3\""));
/// ```
#[must_use]
pub fn parse_document(input: &str) -> DomTree {
    parse_document_with_options(input, ParserOptions::default()).0
}

/// Parse a complete document, returning the tree and its parse errors.
#[must_use]
pub fn parse_document_with_options(input: &str, options: ParserOptions) -> (DomTree, Vec<ParseIssue>) {
    let mut parser = HtmlParser::new(DomTree::new(), options);
    // The stream is still open, so this cannot fail.
    let _ = parser.parse_str(input, true);
    let issues = parser.issues();
    (parser.into_sink(), issues)
}

/// Parse `input` as the contents of a detached `context` element.
///
/// Returns the tree and the synthetic `<html>` element whose children are
/// the parsed nodes.
#[must_use]
pub fn parse_fragment(context: QualName, input: &str) -> (DomTree, NodeId) {
    parse_fragment_with_options(context, input, ParserOptions::default())
}

/// [`parse_fragment`] with explicit options.
#[must_use]
pub fn parse_fragment_with_options(context: QualName, input: &str, options: ParserOptions) -> (DomTree, NodeId) {
    let mut tree = DomTree::new();
    let context = TreeSink::create_element(&mut tree, context, Vec::new());
    let mut parser = HtmlParser::new_fragment(tree, &context, options);
    let _ = parser.parse_str(input, true);
    let root = parser.fragment_root().copied().unwrap_or(context);
    (parser.into_sink(), root)
}
