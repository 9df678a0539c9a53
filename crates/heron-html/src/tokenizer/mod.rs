//! HTML tokenizer module.
//!
//! Implements [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//! of the WHATWG HTML Living Standard.

/// Character reference states per § 13.2.5.72 - § 13.2.5.80.
mod character_reference;
/// Tokenizer state machine and driver loop.
pub mod core;
/// Helper methods for tokenizer state transitions.
mod helpers;
/// Comment, DOCTYPE and CDATA states.
mod markup_states;
/// Named character reference lookup table per § 13.5.
pub mod named_character_references;
/// Token consumers.
pub mod sink;
/// Tag and attribute states.
mod tag_states;
/// Data-like and script data states.
mod text_states;
/// Token types produced by the tokenizer.
pub mod token;

pub use self::core::{Tokenizer, TokenizerOptions, TokenizerResult, TokenizerState};
pub use sink::{TokenCollector, TokenSink, TokenSinkResult, tokenize_str};
pub use token::{Attribute, Token};
