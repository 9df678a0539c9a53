//! HTML tree construction.
//!
//! Implements [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
//! of the WHATWG HTML Living Standard.

/// Tree builder state, token routing and node insertion.
pub mod core;
/// SVG and MathML content.
pub mod foreign_content;
/// The list of active formatting elements and the adoption agency algorithm.
mod formatting;
/// One file per group of insertion modes.
mod modes;
/// DOCTYPE-driven document modes.
pub mod quirks;
/// The interface nodes are built through.
pub mod sink;
/// The stack of open elements and element scopes.
mod stack;

pub use self::core::{InsertionMode, TreeBuilder};
pub use sink::TreeSink;
