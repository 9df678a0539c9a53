//! Errors and parse-error diagnostics.
//!
//! [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
//!
//! Malformed markup never fails a parse; each recovered error becomes a
//! [`ParseIssue`]. [`HtmlError`] covers misuse of the parser API itself.

use serde::Serialize;
use thiserror::Error;

/// Errors returned by the parser API.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HtmlError {
    /// Input was fed after the end of the stream was signalled.
    #[error("input was fed after the end of the stream was signalled")]
    StreamClosed,

    /// `insert` was called while no script hook is running.
    #[error("text can only be inserted while a script hook is running")]
    NotInScript,

    /// A tokenizer state name could not be parsed.
    #[error("unknown tokenizer state: {0}")]
    UnknownState(String),
}

/// Which stage noticed a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueSource {
    /// The tokenizer.
    Tokenizer,
    /// Tree construction.
    TreeBuilder,
}

impl IssueSource {
    pub(crate) const fn component(self) -> &'static str {
        match self {
            Self::Tokenizer => "Tokenizer",
            Self::TreeBuilder => "Tree Builder",
        }
    }
}

/// A recovered parse error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseIssue {
    /// Which stage reported it.
    pub source: IssueSource,
    /// The standard error code (e.g. `unexpected-null-character`) or a short
    /// description for tree-construction errors.
    pub message: String,
}
