//! The insertion modes.
//!
//! [§ 13.2.6.4 The rules for parsing tokens in HTML content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhtml)
//!
//! Each handler takes a token and returns a [`ProcessResult`]. "Process the
//! token using the rules for the X insertion mode" is a direct call to the
//! other handler; "switch to X and reprocess" is
//! [`ProcessResult::Reprocess`].

mod after;
mod body;
mod head;
mod initial;
mod select;
mod table;
mod template;

use super::core::{InsertionMode, ProcessResult, TreeBuilder};
use super::sink::TreeSink;
use crate::tokenizer::{Attribute, Token, TokenizerState};

impl<S: TreeSink> TreeBuilder<S> {
    /// Run the rules for `mode` on `token`.
    pub(super) fn process_in_mode(&mut self, mode: InsertionMode, token: Token) -> ProcessResult {
        match mode {
            InsertionMode::Initial => self.handle_initial_mode(token),
            InsertionMode::BeforeHtml => self.handle_before_html_mode(token),
            InsertionMode::BeforeHead => self.handle_before_head_mode(token),
            InsertionMode::InHead => self.handle_in_head_mode(token),
            InsertionMode::InHeadNoscript => self.handle_in_head_noscript_mode(token),
            InsertionMode::AfterHead => self.handle_after_head_mode(token),
            InsertionMode::InBody => self.handle_in_body_mode(token),
            InsertionMode::Text => self.handle_text_mode(token),
            InsertionMode::InTable => self.handle_in_table_mode(token),
            InsertionMode::InTableText => self.handle_in_table_text_mode(token),
            InsertionMode::InCaption => self.handle_in_caption_mode(token),
            InsertionMode::InColumnGroup => self.handle_in_column_group_mode(token),
            InsertionMode::InTableBody => self.handle_in_table_body_mode(token),
            InsertionMode::InRow => self.handle_in_row_mode(token),
            InsertionMode::InCell => self.handle_in_cell_mode(token),
            InsertionMode::InSelect => self.handle_in_select_mode(token),
            InsertionMode::InSelectInTable => self.handle_in_select_in_table_mode(token),
            InsertionMode::InTemplate => self.handle_in_template_mode(token),
            InsertionMode::AfterBody => self.handle_after_body_mode(token),
            InsertionMode::InFrameset => self.handle_in_frameset_mode(token),
            InsertionMode::AfterFrameset => self.handle_after_frameset_mode(token),
            InsertionMode::AfterAfterBody => self.handle_after_after_body_mode(token),
            InsertionMode::AfterAfterFrameset => self.handle_after_after_frameset_mode(token),
        }
    }

    /// [§ 13.2.6.2 Parsing elements that contain only text](https://html.spec.whatwg.org/multipage/parsing.html#generic-raw-text-element-parsing-algorithm)
    ///
    /// "Insert an HTML element for the token. If the algorithm that was
    /// invoked is the generic raw text element parsing algorithm, switch the
    /// tokenizer to the RAWTEXT state; otherwise the algorithm invoked was the
    /// generic RCDATA element parsing algorithm, switch the tokenizer to the
    /// RCDATA state. Let the original insertion mode be the current insertion
    /// mode. Then, switch the insertion mode to "text"."
    pub(super) fn parse_text_element(&mut self, name: &str, attributes: &[Attribute], state: TokenizerState) {
        let _ = self.insert_html_element(name, attributes);
        self.switch_tokenizer_to(state);
        self.original_mode = Some(self.mode);
        self.mode = InsertionMode::Text;
    }

    /// Split text into its leading whitespace and a token for the rest, if
    /// there is any.
    pub(super) fn split_text_token(data: &str) -> (&str, Option<Token>) {
        let (whitespace, rest) = super::core::split_leading_whitespace(data);
        let rest = (!rest.is_empty()).then(|| Token::text(rest));
        (whitespace, rest)
    }
}
