use crate::parser::core::{InsertionMode, ProcessResult, TreeBuilder, is_html_whitespace};
use crate::parser::sink::TreeSink;
use crate::tokenizer::Token;

impl<S: TreeSink> TreeBuilder<S> {
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    pub(in crate::parser) fn handle_after_body_mode(&mut self, token: Token) -> ProcessResult {
        match &token {
            // "A character token that is one of U+0009 CHARACTER TABULATION, ...
            // or U+0020 SPACE: Process the token using the rules for the "in
            // body" insertion mode."
            Token::Text { data, .. } => {
                let (whitespace, rest) = Self::split_text_token(data);
                if !whitespace.is_empty() {
                    let _ = self.handle_in_body_mode(Token::text(whitespace));
                }
                match rest {
                    Some(rest) => self.after_body_anything_else(rest),
                    None => ProcessResult::Done,
                }
            }
            // "A comment token: Insert a comment as the last child of the first
            // element in the stack of open elements (the html element)."
            Token::Comment { data } => {
                if let Some(html) = self.open_elements.first().map(|e| e.handle.clone()) {
                    self.append_comment_to(&html, data);
                }
                ProcessResult::Done
            }
            Token::Doctype { .. } => {
                self.unexpected(&token);
                ProcessResult::Done
            }
            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),
            // "An end tag whose tag name is "html": If the parser was created as
            // part of the HTML fragment parsing algorithm, this is a parse
            // error; ignore the token. (fragment case) Otherwise, switch the
            // insertion mode to "after after body"."
            Token::EndTag { name } if name == "html" => {
                if self.context_element.is_some() {
                    self.unexpected(&token);
                } else {
                    self.mode = InsertionMode::AfterAfterBody;
                }
                ProcessResult::Done
            }
            Token::EndOfFile => {
                self.stop_parsing();
                ProcessResult::Done
            }
            _ => self.after_body_anything_else(token),
        }
    }

    /// "Parse error. Switch the insertion mode to "in body" and reprocess the
    /// token."
    fn after_body_anything_else(&mut self, token: Token) -> ProcessResult {
        self.unexpected(&token);
        ProcessResult::Reprocess(InsertionMode::InBody, token)
    }

    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    pub(in crate::parser) fn handle_in_frameset_mode(&mut self, token: Token) -> ProcessResult {
        match &token {
            Token::Text { data, .. } => {
                self.insert_frameset_whitespace(&token, data);
                ProcessResult::Done
            }
            Token::Comment { data } => {
                self.insert_comment(data);
                ProcessResult::Done
            }
            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),
            Token::StartTag { name, attributes, .. } if name == "frameset" => {
                let _ = self.insert_html_element(name, attributes);
                ProcessResult::Done
            }
            // "An end tag whose tag name is "frameset""
            Token::EndTag { name } if name == "frameset" => {
                // "If the current node is the root html element, then this is a
                // parse error; ignore the token. (fragment case)"
                if self.open_elements.len() <= 1 {
                    self.unexpected(&token);
                    return ProcessResult::Done;
                }
                // "Otherwise, pop the current node from the stack of open
                // elements. If the parser was not created as part of the HTML
                // fragment parsing algorithm (fragment case), and the current
                // node is no longer a frameset element, then switch the insertion
                // mode to "after frameset"."
                let _ = self.open_elements.pop();
                if self.context_element.is_none() && !self.current_node_is("frameset") {
                    self.mode = InsertionMode::AfterFrameset;
                }
                ProcessResult::Done
            }
            Token::StartTag { name, attributes, .. } if name == "frame" => {
                self.insert_void_element(name, attributes);
                ProcessResult::Done
            }
            Token::StartTag { name, .. } if name == "noframes" => self.handle_in_head_mode(token),
            Token::EndOfFile => {
                // "If the current node is not the root html element, then this is
                // a parse error."
                if self.open_elements.len() > 1 {
                    self.unexpected(&token);
                }
                self.stop_parsing();
                ProcessResult::Done
            }
            _ => {
                self.unexpected(&token);
                ProcessResult::Done
            }
        }
    }

    /// Frameset modes keep whitespace characters and drop everything else
    /// with a parse error.
    fn insert_frameset_whitespace(&mut self, token: &Token, data: &str) {
        let whitespace: String = data.chars().filter(|&c| is_html_whitespace(c)).collect();
        if whitespace.len() != data.len() {
            self.unexpected(token);
        }
        self.insert_text(&whitespace);
    }

    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    pub(in crate::parser) fn handle_after_frameset_mode(&mut self, token: Token) -> ProcessResult {
        match &token {
            Token::Text { data, .. } => {
                self.insert_frameset_whitespace(&token, data);
                ProcessResult::Done
            }
            Token::Comment { data } => {
                self.insert_comment(data);
                ProcessResult::Done
            }
            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),
            Token::EndTag { name } if name == "html" => {
                self.mode = InsertionMode::AfterAfterFrameset;
                ProcessResult::Done
            }
            Token::StartTag { name, .. } if name == "noframes" => self.handle_in_head_mode(token),
            Token::EndOfFile => {
                self.stop_parsing();
                ProcessResult::Done
            }
            _ => {
                self.unexpected(&token);
                ProcessResult::Done
            }
        }
    }

    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    pub(in crate::parser) fn handle_after_after_body_mode(&mut self, token: Token) -> ProcessResult {
        match &token {
            // "A comment token: Insert a comment as the last child of the
            // Document object."
            Token::Comment { data } => {
                let document = self.sink.document();
                self.append_comment_to(&document, data);
                ProcessResult::Done
            }
            Token::Doctype { .. } => self.handle_in_body_mode(token),
            Token::Text { data, .. } => {
                let (whitespace, rest) = Self::split_text_token(data);
                if !whitespace.is_empty() {
                    let _ = self.handle_in_body_mode(Token::text(whitespace));
                }
                match rest {
                    Some(rest) => self.after_body_anything_else(rest),
                    None => ProcessResult::Done,
                }
            }
            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),
            Token::EndOfFile => {
                self.stop_parsing();
                ProcessResult::Done
            }
            _ => self.after_body_anything_else(token),
        }
    }

    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    pub(in crate::parser) fn handle_after_after_frameset_mode(&mut self, token: Token) -> ProcessResult {
        match &token {
            Token::Comment { data } => {
                let document = self.sink.document();
                self.append_comment_to(&document, data);
                ProcessResult::Done
            }
            Token::Doctype { .. } => self.handle_in_body_mode(token),
            Token::Text { data, .. } => {
                let whitespace: String = data.chars().filter(|&c| is_html_whitespace(c)).collect();
                if whitespace.len() != data.len() {
                    self.unexpected(&token);
                }
                if !whitespace.is_empty() {
                    let _ = self.handle_in_body_mode(Token::text(whitespace));
                }
                ProcessResult::Done
            }
            Token::StartTag { name, .. } if name == "html" => self.handle_in_body_mode(token),
            Token::StartTag { name, .. } if name == "noframes" => self.handle_in_head_mode(token),
            Token::EndOfFile => {
                self.stop_parsing();
                ProcessResult::Done
            }
            _ => {
                self.unexpected(&token);
                ProcessResult::Done
            }
        }
    }
}
