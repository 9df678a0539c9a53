//! Where tokens go, and a collecting sink for diagnostics.

use serde_json::{Map, Value, json};

use super::core::{Tokenizer, TokenizerOptions, TokenizerResult, TokenizerState};
use super::token::Token;
use crate::error::ParseIssue;
use crate::scanner::Scanner;

/// What the consumer of a token wants the tokenizer to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSinkResult {
    /// Carry on.
    Continue,
    /// Switch the tokenizer to a new state before the next character
    /// (e.g. RCDATA after `<title>`).
    SwitchTo(TokenizerState),
    /// Stop after this token. Used when a script end tag was processed.
    Suspend,
}

/// Receives tokens from a [`Tokenizer`].
pub trait TokenSink {
    /// Process one token.
    fn process_token(&mut self, token: Token) -> TokenSinkResult;

    /// [§ 13.2.5.42](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// Whether "there is an adjusted current node and it is not an element in
    /// the HTML namespace". Decides if `<![CDATA[` opens a CDATA section.
    fn adjusted_current_node_is_foreign(&self) -> bool {
        false
    }
}

/// A sink that records every token, for tests and the `tokens` output of
/// the command-line tool.
///
/// Adjacent text tokens are merged, so the result doesn't depend on how
/// the input was chunked.
#[derive(Debug, Default)]
pub struct TokenCollector {
    /// Tokens in emission order, EOF included.
    pub tokens: Vec<Token>,
    /// Parse errors reported by the tokenizer.
    pub issues: Vec<ParseIssue>,
    /// Pretend the adjusted current node is foreign, so CDATA sections open.
    pub in_foreign_content: bool,
}

impl TokenSink for TokenCollector {
    fn process_token(&mut self, token: Token) -> TokenSinkResult {
        if let Token::Text { data, has_nul } = &token {
            if let Some(Token::Text {
                data: previous,
                has_nul: previous_has_nul,
            }) = self.tokens.last_mut()
            {
                previous.push_str(data);
                *previous_has_nul |= *has_nul;
                return TokenSinkResult::Continue;
            }
        }
        self.tokens.push(token);
        TokenSinkResult::Continue
    }

    fn adjusted_current_node_is_foreign(&self) -> bool {
        self.in_foreign_content
    }
}

impl TokenCollector {
    /// Tokenize `chunks` in order, then finish the stream.
    #[must_use]
    pub fn collect_chunks<'a>(
        chunks: impl IntoIterator<Item = &'a str>,
        options: TokenizerOptions,
    ) -> Self {
        let mut collector = Self::default();
        let mut tokenizer = Tokenizer::new(options);
        let mut scanner = Scanner::new();

        for chunk in chunks {
            scanner.feed_str(chunk);
            let _ = tokenizer.run(&mut scanner, &mut collector);
        }
        scanner.finish();
        loop {
            match tokenizer.run(&mut scanner, &mut collector) {
                TokenizerResult::Done | TokenizerResult::NeedMoreInput => break,
                TokenizerResult::Continue | TokenizerResult::Suspended => {}
            }
        }

        collector.issues = tokenizer.issues().to_vec();
        collector
    }

    /// Tokens in the html5lib test-suite JSON shape, EOF omitted.
    ///
    /// `["DOCTYPE", name, publicId, systemId, correctness]`,
    /// `["StartTag", name, {attributes}]` (with a trailing `true` when
    /// self-closing), `["EndTag", name]`, `["Comment", data]` and
    /// `["Character", data]`.
    #[must_use]
    pub fn to_html5lib_json(&self) -> Value {
        Value::Array(self.tokens.iter().filter_map(token_to_json).collect())
    }
}

fn token_to_json(token: &Token) -> Option<Value> {
    let value = match token {
        Token::Doctype {
            name,
            public_identifier,
            system_identifier,
            force_quirks,
        } => json!(["DOCTYPE", name, public_identifier, system_identifier, !force_quirks]),
        Token::StartTag {
            name,
            self_closing,
            attributes,
        } => {
            let attributes: Map<String, Value> = attributes
                .iter()
                .map(|attribute| (attribute.name.clone(), Value::from(attribute.value.as_str())))
                .collect();
            if *self_closing {
                json!(["StartTag", name, attributes, true])
            } else {
                json!(["StartTag", name, attributes])
            }
        }
        Token::EndTag { name } => json!(["EndTag", name]),
        Token::Comment { data } => json!(["Comment", data]),
        Token::Text { data, .. } => json!(["Character", data]),
        Token::EndOfFile => return None,
    };
    Some(value)
}

/// Tokenize a whole string with a [`TokenCollector`].
///
/// # Example
///
/// ```
/// use heron_html::tokenizer::{Token, TokenizerOptions, tokenize_str};
///
/// let collected = tokenize_str("<p class=x>hi", TokenizerOptions::default());
/// assert_eq!(collected.tokens.len(), 3);
/// assert_eq!(collected.tokens[1], Token::text("hi"));
/// ```
#[must_use]
pub fn tokenize_str(input: &str, options: TokenizerOptions) -> TokenCollector {
    TokenCollector::collect_chunks([input], options)
}
