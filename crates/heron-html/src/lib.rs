//! Streaming HTML tokenizer and tree builder for Heron.
//!
//! # Scope
//!
//! This crate implements:
//! - **Input scanner** ([WHATWG § 13.2.3.5](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream))
//!   - UTF-16 chunks, newline normalization, nested insertion frames
//!
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Every tokenizer state, including script data escapes and CDATA
//!   - Named and numeric character references
//!
//! - **HTML Parser / Tree Builder** ([WHATWG § 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction))
//!   - All 23 insertion modes and foreign (SVG/MathML) content
//!   - Adoption agency algorithm, foster parenting, templates
//!   - Fragment parsing
//!
//! - **Driver**: incremental parsing, pause/resume and script-time insertion
//!
//! # Example
//!
//! ```
//! use heron_dom::serialize::serialize_children;
//! use heron_html::parse_document;
//!
//! let tree = parse_document("<table>X<tr><td>Y</table>");
//! let body = tree.body().unwrap();
//! assert_eq!(
//!     serialize_children(&tree, body),
//!     "X<table><tbody><tr><td>Y</td></tr></tbody></table>"
//! );
//! ```

/// The streaming parser driver.
pub mod driver;
/// API errors and parse-error diagnostics.
pub mod error;
/// HTML tree construction.
pub mod parser;
/// Buffered input for the tokenizer.
pub mod scanner;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;

pub use driver::{
    HtmlParser, ParseStatus, ParserOptions, ScriptHook, parse_document, parse_document_with_options, parse_fragment,
    parse_fragment_with_options,
};
pub use error::{HtmlError, IssueSource, ParseIssue};
pub use parser::{InsertionMode, TreeBuilder, TreeSink};
pub use tokenizer::{Attribute, Token, Tokenizer, TokenizerOptions, TokenizerState};
