use crate::parser::core::{InsertionMode, ProcessResult, TreeBuilder};
use crate::parser::sink::TreeSink;
use crate::parser::stack::OpenElement;
use crate::tokenizer::{Token, TokenizerState};

impl<S: TreeSink> TreeBuilder<S> {
    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    pub(in crate::parser) fn handle_before_head_mode(&mut self, token: Token) -> ProcessResult {
        match &token {
            // "A character token that is one of U+0009 CHARACTER TABULATION, ...
            // or U+0020 SPACE: Ignore the token."
            Token::Text { data, .. } => match Self::split_text_token(data).1 {
                Some(rest) => self.before_head_anything_else(rest),
                None => ProcessResult::Done,
            },
            Token::Comment { data } => {
                self.insert_comment(data);
                ProcessResult::Done
            }
            Token::Doctype { .. } => {
                self.unexpected(&token);
                ProcessResult::Done
            }
            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),
            // "A start tag whose tag name is "head": Insert an HTML element for
            // the token. Set the head element pointer to the newly created head
            // element. Switch the insertion mode to "in head"."
            Token::StartTag { name, attributes, .. } if name == "head" => {
                let head = self.insert_html_element(name, attributes);
                self.head_element = Some(head);
                self.mode = InsertionMode::InHead;
                ProcessResult::Done
            }
            Token::EndTag { name } if matches!(name.as_str(), "head" | "body" | "html" | "br") => {
                self.before_head_anything_else(token)
            }
            Token::EndTag { .. } => {
                self.unexpected(&token);
                ProcessResult::Done
            }
            _ => self.before_head_anything_else(token),
        }
    }

    /// "Insert an HTML element for a "head" start tag token with no
    /// attributes. Set the head element pointer to the newly created head
    /// element. Switch the insertion mode to "in head". Reprocess the current
    /// token."
    fn before_head_anything_else(&mut self, token: Token) -> ProcessResult {
        let head = self.insert_html_element("head", &[]);
        self.head_element = Some(head);
        ProcessResult::Reprocess(InsertionMode::InHead, token)
    }

    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    pub(in crate::parser) fn handle_in_head_mode(&mut self, token: Token) -> ProcessResult {
        match &token {
            // "A character token that is one of U+0009 CHARACTER TABULATION, ...
            // or U+0020 SPACE: Insert the character."
            Token::Text { data, .. } => {
                let (whitespace, rest) = Self::split_text_token(data);
                self.insert_text(whitespace);
                match rest {
                    Some(rest) => self.in_head_anything_else(rest),
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
            Token::StartTag {
                name,
                attributes,
                ..
            } => match name.as_str() {
                "html" => self.handle_in_body_mode(token),
                // "A start tag whose tag name is one of: "base", "basefont",
                // "bgsound", "link": Insert an HTML element for the token.
                // Immediately pop the current node off the stack of open
                // elements. Acknowledge the token's self-closing flag, if it is
                // set."
                "base" | "basefont" | "bgsound" | "link" | "meta" => {
                    self.insert_void_element(name, attributes);
                    ProcessResult::Done
                }
                // "A start tag whose tag name is "title": Follow the generic
                // RCDATA element parsing algorithm."
                "title" => {
                    self.parse_text_element(name, attributes, TokenizerState::RCDATA);
                    ProcessResult::Done
                }
                // "A start tag whose tag name is "noscript", if the scripting
                // flag is enabled; A start tag whose tag name is one of:
                // "noframes", "style": Follow the generic raw text element
                // parsing algorithm."
                "noscript" if self.scripting_enabled => {
                    self.parse_text_element(name, attributes, TokenizerState::RAWTEXT);
                    ProcessResult::Done
                }
                "noframes" | "style" => {
                    self.parse_text_element(name, attributes, TokenizerState::RAWTEXT);
                    ProcessResult::Done
                }
                // "A start tag whose tag name is "noscript", if the scripting
                // flag is disabled: Insert an HTML element for the token. Switch
                // the insertion mode to "in head noscript"."
                "noscript" => {
                    let _ = self.insert_html_element(name, attributes);
                    self.mode = InsertionMode::InHeadNoscript;
                    ProcessResult::Done
                }
                "script" => {
                    // STEP 1: "Let the adjusted insertion location be the
                    // appropriate place for inserting a node."
                    // STEP 2: "Let element be the result of creating an element
                    // for the token in the given namespace, with the intended
                    // parent being the element in which the adjusted insertion
                    // location finds itself."
                    // STEP 5-6: "Insert the newly created element at the adjusted
                    // insertion location. Push the element onto the stack of open
                    // elements so that it is the new current node."
                    let _ = self.insert_html_element(name, attributes);
                    // STEP 7: "Switch the tokenizer to the script data state."
                    self.switch_tokenizer_to(TokenizerState::ScriptData);
                    // STEP 8-9: "Let the original insertion mode be the current
                    // insertion mode. Switch the insertion mode to "text"."
                    self.original_mode = Some(self.mode);
                    self.mode = InsertionMode::Text;
                    ProcessResult::Done
                }
                // "A start tag whose tag name is "template""
                "template" => {
                    let _ = self.insert_html_element(name, attributes);
                    self.push_formatting_marker();
                    self.frameset_ok = false;
                    self.mode = InsertionMode::InTemplate;
                    self.template_modes.push(InsertionMode::InTemplate);
                    ProcessResult::Done
                }
                "head" => {
                    self.unexpected(&token);
                    ProcessResult::Done
                }
                _ => self.in_head_anything_else(token),
            },
            // "An end tag whose tag name is "head": Pop the current node (which
            // will be the head element) off the stack of open elements. Switch
            // the insertion mode to "after head"."
            Token::EndTag { name } if name == "head" => {
                let _ = self.open_elements.pop();
                self.mode = InsertionMode::AfterHead;
                ProcessResult::Done
            }
            Token::EndTag { name } if matches!(name.as_str(), "body" | "html" | "br") => {
                self.in_head_anything_else(token)
            }
            Token::EndTag { name } if name == "template" => {
                self.close_template(&token);
                ProcessResult::Done
            }
            Token::EndTag { .. } => {
                self.unexpected(&token);
                ProcessResult::Done
            }
            Token::EndOfFile => self.in_head_anything_else(token),
        }
    }

    /// "Pop the current node (which will be the head element) off the stack
    /// of open elements. Switch the insertion mode to "after head". Reprocess
    /// the token."
    fn in_head_anything_else(&mut self, token: Token) -> ProcessResult {
        let _ = self.open_elements.pop();
        ProcessResult::Reprocess(InsertionMode::AfterHead, token)
    }

    /// "An end tag whose tag name is "template"" in the "in head" mode.
    fn close_template(&mut self, token: &Token) {
        // "If there is no template element on the stack of open elements, then
        // this is a parse error; ignore the token."
        if !self.stack_contains("template") {
            self.unexpected(token);
            return;
        }
        // "Generate all implied end tags thoroughly."
        self.generate_all_implied_end_tags_thoroughly();
        // "If the current node is not a template element, then this is a parse
        // error."
        if !self.current_node_is("template") {
            self.parse_error("template closed with open elements");
        }
        // "Pop elements from the stack of open elements until a template
        // element has been popped from the stack."
        self.pop_until("template");
        // "Clear the list of active formatting elements up to the last marker."
        self.clear_active_formatting_to_last_marker();
        // "Pop the current template insertion mode off the stack of template
        // insertion modes."
        let _ = self.template_modes.pop();
        // "Reset the insertion mode appropriately."
        self.reset_insertion_mode();
    }

    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    pub(in crate::parser) fn handle_in_head_noscript_mode(&mut self, token: Token) -> ProcessResult {
        match &token {
            Token::Doctype { .. } => {
                self.unexpected(&token);
                ProcessResult::Done
            }
            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),
            // "An end tag whose tag name is "noscript": Pop the current node
            // (which will be a noscript element) from the stack of open
            // elements; the new current node will be a head element. Switch the
            // insertion mode to "in head"."
            Token::EndTag { name } if name == "noscript" => {
                let _ = self.open_elements.pop();
                self.mode = InsertionMode::InHead;
                ProcessResult::Done
            }
            Token::Text { data, .. } => {
                let (whitespace, rest) = Self::split_text_token(data);
                self.insert_text(whitespace);
                match rest {
                    Some(rest) => self.in_head_noscript_anything_else(rest),
                    None => ProcessResult::Done,
                }
            }
            Token::Comment { .. } => self.handle_in_head_mode(token),
            Token::StartTag { name, .. }
                if matches!(
                    name.as_str(),
                    "basefont" | "bgsound" | "link" | "meta" | "noframes" | "style"
                ) =>
            {
                self.handle_in_head_mode(token)
            }
            Token::EndTag { name } if name == "br" => self.in_head_noscript_anything_else(token),
            Token::StartTag { name, .. } if name == "head" || name == "noscript" => {
                self.unexpected(&token);
                ProcessResult::Done
            }
            Token::EndTag { .. } => {
                self.unexpected(&token);
                ProcessResult::Done
            }
            _ => self.in_head_noscript_anything_else(token),
        }
    }

    /// "Parse error. Pop the current node (which will be a noscript element)
    /// from the stack of open elements; the new current node will be a head
    /// element. Switch the insertion mode to "in head". Reprocess the token."
    fn in_head_noscript_anything_else(&mut self, token: Token) -> ProcessResult {
        self.unexpected(&token);
        let _ = self.open_elements.pop();
        ProcessResult::Reprocess(InsertionMode::InHead, token)
    }

    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    pub(in crate::parser) fn handle_after_head_mode(&mut self, token: Token) -> ProcessResult {
        match &token {
            Token::Text { data, .. } => {
                let (whitespace, rest) = Self::split_text_token(data);
                self.insert_text(whitespace);
                match rest {
                    Some(rest) => self.after_head_anything_else(rest),
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
            Token::StartTag { name, attributes, .. } => match name.as_str() {
                "html" => self.handle_in_body_mode(token),
                // "A start tag whose tag name is "body": Insert an HTML element
                // for the token. Set the frameset-ok flag to "not ok". Switch
                // the insertion mode to "in body"."
                "body" => {
                    let _ = self.insert_html_element(name, attributes);
                    self.frameset_ok = false;
                    self.mode = InsertionMode::InBody;
                    ProcessResult::Done
                }
                "frameset" => {
                    let _ = self.insert_html_element(name, attributes);
                    self.mode = InsertionMode::InFrameset;
                    ProcessResult::Done
                }
                // "Parse error. Push the node pointed to by the head element
                // pointer onto the stack of open elements. Process the token
                // using the rules for the "in head" insertion mode. Remove the
                // node pointed to by the head element pointer from the stack of
                // open elements. (It might not be the current node at this
                // point.)"
                "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes" | "script" | "style"
                | "template" | "title" => {
                    self.unexpected(&token);
                    let Some(head) = self.head_element.clone() else {
                        return self.handle_in_head_mode(token);
                    };
                    self.open_elements.push(OpenElement::html(head.clone(), "head"));
                    let result = self.handle_in_head_mode(token);
                    self.remove_from_stack(&head);
                    result
                }
                "head" => {
                    self.unexpected(&token);
                    ProcessResult::Done
                }
                _ => self.after_head_anything_else(token),
            },
            Token::EndTag { name } if name == "template" => self.handle_in_head_mode(token),
            Token::EndTag { name } if matches!(name.as_str(), "body" | "html" | "br") => {
                self.after_head_anything_else(token)
            }
            Token::EndTag { .. } => {
                self.unexpected(&token);
                ProcessResult::Done
            }
            Token::EndOfFile => self.after_head_anything_else(token),
        }
    }

    /// "Insert an HTML element for a "body" start tag token with no
    /// attributes. Switch the insertion mode to "in body". Reprocess the
    /// current token."
    fn after_head_anything_else(&mut self, token: Token) -> ProcessResult {
        let _ = self.insert_html_element("body", &[]);
        ProcessResult::Reprocess(InsertionMode::InBody, token)
    }
}
