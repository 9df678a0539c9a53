use crate::parser::core::{InsertionMode, ProcessResult, TreeBuilder, is_html_whitespace};
use crate::parser::sink::TreeSink;
use crate::parser::stack::Scope;
use crate::tokenizer::Token;

impl<S: TreeSink> TreeBuilder<S> {
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    pub(in crate::parser) fn handle_in_table_mode(&mut self, token: Token) -> ProcessResult {
        match &token {
            // "A character token, if the current node is table, tbody,
            // template, tfoot, thead, or tr element: Let the pending table
            // character tokens be an empty list of tokens. Let the original
            // insertion mode be the current insertion mode. Switch the insertion
            // mode to "in table text" and reprocess the token."
            Token::Text { .. } if self.current_node_is_one_of(&["table", "tbody", "template", "tfoot", "thead", "tr"]) => {
                self.pending_table_text.clear();
                self.original_mode = Some(self.mode);
                ProcessResult::Reprocess(InsertionMode::InTableText, token)
            }
            Token::Comment { data } => {
                self.insert_comment(data);
                ProcessResult::Done
            }
            Token::Doctype { .. } => {
                self.unexpected(&token);
                ProcessResult::Done
            }
            Token::StartTag { name, attributes, .. } => match name.as_str() {
                // "Clear the stack back to a table context. Insert a marker at
                // the end of the list of active formatting elements. Insert an
                // HTML element for the token, then switch the insertion mode to
                // "in caption"."
                "caption" => {
                    self.clear_stack_back_to_table_context();
                    self.push_formatting_marker();
                    let _ = self.insert_html_element(name, attributes);
                    self.mode = InsertionMode::InCaption;
                    ProcessResult::Done
                }
                "colgroup" => {
                    self.clear_stack_back_to_table_context();
                    let _ = self.insert_html_element(name, attributes);
                    self.mode = InsertionMode::InColumnGroup;
                    ProcessResult::Done
                }
                "col" => {
                    self.clear_stack_back_to_table_context();
                    let _ = self.insert_html_element("colgroup", &[]);
                    ProcessResult::Reprocess(InsertionMode::InColumnGroup, token)
                }
                "tbody" | "tfoot" | "thead" => {
                    self.clear_stack_back_to_table_context();
                    let _ = self.insert_html_element(name, attributes);
                    self.mode = InsertionMode::InTableBody;
                    ProcessResult::Done
                }
                "td" | "th" | "tr" => {
                    self.clear_stack_back_to_table_context();
                    let _ = self.insert_html_element("tbody", &[]);
                    ProcessResult::Reprocess(InsertionMode::InTableBody, token)
                }
                "table" => {
                    self.unexpected(&token);
                    // "If the stack of open elements does not have a table
                    // element in table scope, ignore the token. Otherwise: Pop
                    // elements from this stack until a table element has been
                    // popped from the stack. Reset the insertion mode
                    // appropriately. Reprocess the token."
                    if !self.in_scope("table", Scope::Table) {
                        return ProcessResult::Done;
                    }
                    self.pop_until("table");
                    self.reset_insertion_mode();
                    ProcessResult::Reprocess(self.mode, token)
                }
                "style" | "script" | "template" => self.handle_in_head_mode(token),
                "input" => {
                    // "If the token does not have an attribute with the name
                    // "type", or if it does, but that attribute's value is not an
                    // ASCII case-insensitive match for the string "hidden", then:
                    // act as described in the "anything else" entry below."
                    if !token.attribute("type").is_some_and(|t| t.eq_ignore_ascii_case("hidden")) {
                        return self.in_table_anything_else(token);
                    }
                    // "Otherwise: Parse error. Insert an HTML element for the
                    // token. Pop that input element off the stack of open
                    // elements. Acknowledge the token's self-closing flag, if it
                    // is set."
                    self.unexpected(&token);
                    self.insert_void_element(name, attributes);
                    ProcessResult::Done
                }
                "form" => {
                    self.unexpected(&token);
                    // "If there is a template element on the stack of open
                    // elements, or if the form element pointer is not null,
                    // ignore the token. Otherwise: Insert an HTML element for the
                    // token, and set the form element pointer to point to the
                    // element created. Pop that form element off the stack of
                    // open elements."
                    if !self.stack_contains("template") && self.form_element.is_none() {
                        let form = self.insert_html_element(name, attributes);
                        self.form_element = Some(form);
                        let _ = self.open_elements.pop();
                    }
                    ProcessResult::Done
                }
                _ => self.in_table_anything_else(token),
            },
            Token::EndTag { name } => match name.as_str() {
                "table" => {
                    if !self.in_scope("table", Scope::Table) {
                        self.unexpected(&token);
                        return ProcessResult::Done;
                    }
                    self.pop_until("table");
                    self.reset_insertion_mode();
                    ProcessResult::Done
                }
                "body" | "caption" | "col" | "colgroup" | "html" | "tbody" | "td" | "tfoot" | "th" | "thead" | "tr" => {
                    self.unexpected(&token);
                    ProcessResult::Done
                }
                "template" => self.handle_in_head_mode(token),
                _ => self.in_table_anything_else(token),
            },
            // "An end-of-file token: Process the token using the rules for the
            // "in body" insertion mode."
            Token::EndOfFile => self.handle_in_body_mode(token),
            Token::Text { .. } => self.in_table_anything_else(token),
        }
    }

    /// "Parse error. Enable foster parenting, process the token using the
    /// rules for the "in body" insertion mode, and then disable foster
    /// parenting."
    fn in_table_anything_else(&mut self, token: Token) -> ProcessResult {
        self.unexpected(&token);
        self.foster_parenting = true;
        let result = self.handle_in_body_mode(token);
        self.foster_parenting = false;
        result
    }

    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    pub(in crate::parser) fn handle_in_table_text_mode(&mut self, token: Token) -> ProcessResult {
        if let Token::Text { data, has_nul } = &token {
            // "A character token that is U+0000 NULL: Parse error. Ignore the
            // token."
            if *has_nul {
                self.parse_error("unexpected-null-character");
                self.pending_table_text
                    .extend(data.chars().filter(|&c| c != '\0'));
            } else {
                // "Any other character token: Append the character token to the
                // pending table character tokens list."
                self.pending_table_text.push_str(data);
            }
            return ProcessResult::Done;
        }

        // "Anything else: If any of the tokens in the pending table character
        // tokens list are character tokens that are not ASCII whitespace, then
        // this is a parse error: reprocess the character tokens in the pending
        // table character tokens list using the rules given in the "anything
        // else" entry in the "in table" insertion mode. Otherwise, insert the
        // characters given by the pending table character tokens list."
        let pending = std::mem::take(&mut self.pending_table_text);
        if pending.chars().any(|c| !is_html_whitespace(c)) {
            self.parse_error("non-space characters in table");
            self.foster_parenting = true;
            let _ = self.handle_in_body_mode(Token::text(pending));
            self.foster_parenting = false;
        } else {
            self.insert_text(&pending);
        }

        // "Switch the insertion mode to the original insertion mode and
        // reprocess the token."
        let original = self.original_mode.take().unwrap_or(InsertionMode::InTable);
        ProcessResult::Reprocess(original, token)
    }

    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    pub(in crate::parser) fn handle_in_caption_mode(&mut self, token: Token) -> ProcessResult {
        match &token {
            Token::EndTag { name } if name == "caption" => {
                let _ = self.close_caption(&token);
                ProcessResult::Done
            }
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "td" | "tfoot" | "th" | "thead" | "tr"
                ) =>
            {
                self.reprocess_after_caption(token)
            }
            Token::EndTag { name } if name == "table" => self.reprocess_after_caption(token),
            Token::EndTag { name }
                if matches!(
                    name.as_str(),
                    "body" | "col" | "colgroup" | "html" | "tbody" | "td" | "tfoot" | "th" | "thead" | "tr"
                ) =>
            {
                self.unexpected(&token);
                ProcessResult::Done
            }
            _ => self.handle_in_body_mode(token),
        }
    }

    /// Close the caption, returning whether there was one to close.
    fn close_caption(&mut self, token: &Token) -> bool {
        // "If the stack of open elements does not have a caption element in
        // table scope, this is a parse error; ignore the token. (fragment
        // case)"
        if !self.in_scope("caption", Scope::Table) {
            self.unexpected(token);
            return false;
        }
        // "Generate implied end tags. Now, if the current node is not a caption
        // element, then this is a parse error. Pop elements from this stack
        // until a caption element has been popped from the stack. Clear the list
        // of active formatting elements up to the last marker. Switch the
        // insertion mode to "in table"."
        self.generate_implied_end_tags(None);
        if !self.current_node_is("caption") {
            self.parse_error("caption closed with open elements");
        }
        self.pop_until("caption");
        self.clear_active_formatting_to_last_marker();
        self.mode = InsertionMode::InTable;
        true
    }

    fn reprocess_after_caption(&mut self, token: Token) -> ProcessResult {
        if self.close_caption(&token) {
            ProcessResult::Reprocess(InsertionMode::InTable, token)
        } else {
            ProcessResult::Done
        }
    }

    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolumngroup)
    pub(in crate::parser) fn handle_in_column_group_mode(&mut self, token: Token) -> ProcessResult {
        match &token {
            Token::Text { data, .. } => {
                let (whitespace, rest) = Self::split_text_token(data);
                self.insert_text(whitespace);
                match rest {
                    Some(rest) => self.in_column_group_anything_else(rest),
                    None => ProcessResult::Done,
                }
            }
            Token::Comment { data } => {
                self.insert_comment(data);
                ProcessResult::Done
            }
            Token::Doctype { .. } => {
                self.unexpected(&token);
                ProcessResult::Done
            }
            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),
            Token::StartTag { name, attributes, .. } if name == "col" => {
                self.insert_void_element(name, attributes);
                ProcessResult::Done
            }
            Token::EndTag { name } if name == "colgroup" => {
                if !self.current_node_is("colgroup") {
                    self.unexpected(&token);
                    return ProcessResult::Done;
                }
                let _ = self.open_elements.pop();
                self.mode = InsertionMode::InTable;
                ProcessResult::Done
            }
            Token::EndTag { name } if name == "col" => {
                self.unexpected(&token);
                ProcessResult::Done
            }
            Token::StartTag { name, .. } | Token::EndTag { name } if name == "template" => {
                self.handle_in_head_mode(token)
            }
            Token::EndOfFile => self.handle_in_body_mode(token),
            _ => self.in_column_group_anything_else(token),
        }
    }

    /// "If the current node is not a colgroup element, then this is a parse
    /// error; ignore the token. Otherwise, pop the current node from the stack
    /// of open elements. Switch the insertion mode to "in table". Reprocess
    /// the token."
    fn in_column_group_anything_else(&mut self, token: Token) -> ProcessResult {
        if !self.current_node_is("colgroup") {
            self.unexpected(&token);
            return ProcessResult::Done;
        }
        let _ = self.open_elements.pop();
        ProcessResult::Reprocess(InsertionMode::InTable, token)
    }

    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intablebody)
    pub(in crate::parser) fn handle_in_table_body_mode(&mut self, token: Token) -> ProcessResult {
        match &token {
            Token::StartTag { name, attributes, .. } if name == "tr" => {
                self.clear_stack_back_to_table_body_context();
                let _ = self.insert_html_element(name, attributes);
                self.mode = InsertionMode::InRow;
                ProcessResult::Done
            }
            Token::StartTag { name, .. } if name == "th" || name == "td" => {
                self.unexpected(&token);
                self.clear_stack_back_to_table_body_context();
                let _ = self.insert_html_element("tr", &[]);
                ProcessResult::Reprocess(InsertionMode::InRow, token)
            }
            Token::EndTag { name } if matches!(name.as_str(), "tbody" | "tfoot" | "thead") => {
                if !self.in_scope(name, Scope::Table) {
                    self.unexpected(&token);
                    return ProcessResult::Done;
                }
                self.clear_stack_back_to_table_body_context();
                let _ = self.open_elements.pop();
                self.mode = InsertionMode::InTable;
                ProcessResult::Done
            }
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "tfoot" | "thead"
                ) =>
            {
                self.leave_table_body(token)
            }
            Token::EndTag { name } if name == "table" => self.leave_table_body(token),
            Token::EndTag { name }
                if matches!(
                    name.as_str(),
                    "body" | "caption" | "col" | "colgroup" | "html" | "td" | "th" | "tr"
                ) =>
            {
                self.unexpected(&token);
                ProcessResult::Done
            }
            _ => self.handle_in_table_mode(token),
        }
    }

    /// "If the stack of open elements does not have a tbody, thead, or tfoot
    /// element in table scope, this is a parse error; ignore the token.
    /// Otherwise: Clear the stack back to a table body context. Pop the
    /// current node from the stack of open elements. Switch the insertion mode
    /// to "in table". Reprocess the token."
    fn leave_table_body(&mut self, token: Token) -> ProcessResult {
        if !self.in_scope_where(Scope::Table, |e| e.is_html_one_of(&["tbody", "thead", "tfoot"])) {
            self.unexpected(&token);
            return ProcessResult::Done;
        }
        self.clear_stack_back_to_table_body_context();
        let _ = self.open_elements.pop();
        ProcessResult::Reprocess(InsertionMode::InTable, token)
    }

    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inrow)
    pub(in crate::parser) fn handle_in_row_mode(&mut self, token: Token) -> ProcessResult {
        match &token {
            // "A start tag whose tag name is one of: "th", "td": Clear the stack
            // back to a table row context. Insert an HTML element for the token,
            // then switch the insertion mode to "in cell". Insert a marker at the
            // end of the list of active formatting elements."
            Token::StartTag { name, attributes, .. } if name == "th" || name == "td" => {
                self.clear_stack_back_to_table_row_context();
                let _ = self.insert_html_element(name, attributes);
                self.mode = InsertionMode::InCell;
                self.push_formatting_marker();
                ProcessResult::Done
            }
            Token::EndTag { name } if name == "tr" => {
                let _ = self.close_row(&token);
                ProcessResult::Done
            }
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "tfoot" | "thead" | "tr"
                ) =>
            {
                self.reprocess_after_row(token)
            }
            Token::EndTag { name } if name == "table" => self.reprocess_after_row(token),
            Token::EndTag { name } if matches!(name.as_str(), "tbody" | "tfoot" | "thead") => {
                if !self.in_scope(name, Scope::Table) {
                    self.unexpected(&token);
                    return ProcessResult::Done;
                }
                // "If the stack of open elements does not have a tr element in
                // table scope, ignore the token."
                if !self.in_scope("tr", Scope::Table) {
                    return ProcessResult::Done;
                }
                self.reprocess_after_row(token)
            }
            Token::EndTag { name }
                if matches!(
                    name.as_str(),
                    "body" | "caption" | "col" | "colgroup" | "html" | "td" | "th"
                ) =>
            {
                self.unexpected(&token);
                ProcessResult::Done
            }
            _ => self.handle_in_table_mode(token),
        }
    }

    /// "If the stack of open elements does not have a tr element in table
    /// scope, this is a parse error; ignore the token. Otherwise: Clear the
    /// stack back to a table row context. Pop the current node (which will be
    /// a tr element) from the stack of open elements. Switch the insertion mode
    /// to "in table body"."
    fn close_row(&mut self, token: &Token) -> bool {
        if !self.in_scope("tr", Scope::Table) {
            self.unexpected(token);
            return false;
        }
        self.clear_stack_back_to_table_row_context();
        let _ = self.open_elements.pop();
        self.mode = InsertionMode::InTableBody;
        true
    }

    fn reprocess_after_row(&mut self, token: Token) -> ProcessResult {
        if self.close_row(&token) {
            ProcessResult::Reprocess(InsertionMode::InTableBody, token)
        } else {
            ProcessResult::Done
        }
    }

    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incell)
    pub(in crate::parser) fn handle_in_cell_mode(&mut self, token: Token) -> ProcessResult {
        match &token {
            Token::EndTag { name } if name == "td" || name == "th" => {
                if !self.in_scope(name, Scope::Table) {
                    self.unexpected(&token);
                    return ProcessResult::Done;
                }
                self.generate_implied_end_tags(None);
                if !self.current_node_is(name) {
                    self.unexpected(&token);
                }
                self.pop_until(name);
                self.clear_active_formatting_to_last_marker();
                self.mode = InsertionMode::InRow;
                ProcessResult::Done
            }
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "caption" | "col" | "colgroup" | "tbody" | "td" | "tfoot" | "th" | "thead" | "tr"
                ) =>
            {
                // "Assert: The stack of open elements has a td or th element in
                // table scope. Close the cell and reprocess the token."
                if !self.in_scope_where(Scope::Table, |e| e.is_html_one_of(&["td", "th"])) {
                    self.unexpected(&token);
                    return ProcessResult::Done;
                }
                self.close_cell();
                ProcessResult::Reprocess(InsertionMode::InRow, token)
            }
            Token::EndTag { name } if matches!(name.as_str(), "body" | "caption" | "col" | "colgroup" | "html") => {
                self.unexpected(&token);
                ProcessResult::Done
            }
            Token::EndTag { name } if matches!(name.as_str(), "table" | "tbody" | "tfoot" | "thead" | "tr") => {
                if !self.in_scope(name, Scope::Table) {
                    self.unexpected(&token);
                    return ProcessResult::Done;
                }
                self.close_cell();
                ProcessResult::Reprocess(InsertionMode::InRow, token)
            }
            _ => self.handle_in_body_mode(token),
        }
    }
}
