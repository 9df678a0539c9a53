use crate::parser::core::{ProcessResult, TreeBuilder};
use crate::parser::sink::TreeSink;
use crate::parser::stack::Scope;
use crate::tokenizer::Token;

/// Table-structure tags that close a `<select>` inside a table.
const TABLE_TAGS: &[&str] = &["caption", "table", "tbody", "tfoot", "thead", "tr", "td", "th"];

impl<S: TreeSink> TreeBuilder<S> {
    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    pub(in crate::parser) fn handle_in_select_mode(&mut self, token: Token) -> ProcessResult {
        match &token {
            // "A character token that is U+0000 NULL: Parse error. Ignore the
            // token. Any other character token: Insert the token's character."
            Token::Text { data, has_nul } => {
                if *has_nul {
                    self.parse_error("unexpected-null-character");
                    let stripped = data.replace('\0', "");
                    self.insert_text(&stripped);
                } else {
                    self.insert_text(data);
                }
                ProcessResult::Done
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
                "html" => self.handle_in_body_mode(token),
                // "If the current node is an option element, pop that node from
                // the stack of open elements. Insert an HTML element for the
                // token."
                "option" => {
                    if self.current_node_is("option") {
                        let _ = self.open_elements.pop();
                    }
                    let _ = self.insert_html_element(name, attributes);
                    ProcessResult::Done
                }
                "optgroup" | "hr" => {
                    if self.current_node_is("option") {
                        let _ = self.open_elements.pop();
                    }
                    if self.current_node_is("optgroup") {
                        let _ = self.open_elements.pop();
                    }
                    if name == "hr" {
                        self.insert_void_element(name, attributes);
                    } else {
                        let _ = self.insert_html_element(name, attributes);
                    }
                    ProcessResult::Done
                }
                // "Parse error. If the stack of open elements does not have a
                // select element in select scope, ignore the token. (fragment
                // case) Otherwise: Pop elements from the stack of open elements
                // until a select element has been popped from the stack. Reset
                // the insertion mode appropriately."
                "select" => {
                    self.unexpected(&token);
                    if self.in_scope("select", Scope::Select) {
                        self.pop_until("select");
                        self.reset_insertion_mode();
                    }
                    ProcessResult::Done
                }
                "input" | "keygen" | "textarea" => {
                    self.unexpected(&token);
                    if !self.in_scope("select", Scope::Select) {
                        return ProcessResult::Done;
                    }
                    self.pop_until("select");
                    self.reset_insertion_mode();
                    ProcessResult::Reprocess(self.mode, token)
                }
                "script" | "template" => self.handle_in_head_mode(token),
                _ => {
                    self.unexpected(&token);
                    ProcessResult::Done
                }
            },
            Token::EndTag { name } => match name.as_str() {
                // "First, if the current node is an option element, and the node
                // immediately before it in the stack of open elements is an
                // optgroup element, then pop the current node from the stack of
                // open elements. If the current node is an optgroup element,
                // then pop that node from the stack of open elements. Otherwise,
                // this is a parse error; ignore the token."
                "optgroup" => {
                    let len = self.open_elements.len();
                    if self.current_node_is("option")
                        && len >= 2
                        && self.open_elements[len - 2].is_html("optgroup")
                    {
                        let _ = self.open_elements.pop();
                    }
                    if self.current_node_is("optgroup") {
                        let _ = self.open_elements.pop();
                    } else {
                        self.unexpected(&token);
                    }
                    ProcessResult::Done
                }
                "option" => {
                    if self.current_node_is("option") {
                        let _ = self.open_elements.pop();
                    } else {
                        self.unexpected(&token);
                    }
                    ProcessResult::Done
                }
                "select" => {
                    if self.in_scope("select", Scope::Select) {
                        self.pop_until("select");
                        self.reset_insertion_mode();
                    } else {
                        self.unexpected(&token);
                    }
                    ProcessResult::Done
                }
                "template" => self.handle_in_head_mode(token),
                _ => {
                    self.unexpected(&token);
                    ProcessResult::Done
                }
            },
            Token::EndOfFile => self.handle_in_body_mode(token),
        }
    }

    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    pub(in crate::parser) fn handle_in_select_in_table_mode(&mut self, token: Token) -> ProcessResult {
        match &token {
            // "Parse error. Pop elements from the stack of open elements until a
            // select element has been popped from the stack. Reset the insertion
            // mode appropriately. Reprocess the token."
            Token::StartTag { name, .. } if TABLE_TAGS.contains(&name.as_str()) => {
                self.unexpected(&token);
                self.pop_until("select");
                self.reset_insertion_mode();
                ProcessResult::Reprocess(self.mode, token)
            }
            // "If the stack of open elements does not have an element in table
            // scope that is an HTML element with the same tag name as that of
            // the token, then ignore the token."
            Token::EndTag { name } if TABLE_TAGS.contains(&name.as_str()) => {
                self.unexpected(&token);
                if !self.in_scope(name, Scope::Table) {
                    return ProcessResult::Done;
                }
                self.pop_until("select");
                self.reset_insertion_mode();
                ProcessResult::Reprocess(self.mode, token)
            }
            _ => self.handle_in_select_mode(token),
        }
    }
}
