use heron_dom::QuirksMode;

use crate::parser::core::{InsertionMode, ProcessResult, TreeBuilder};
use crate::parser::quirks::{doctype_is_parse_error, quirks_mode_for_doctype};
use crate::parser::sink::TreeSink;
use crate::parser::stack::OpenElement;
use crate::tokenizer::Token;

impl<S: TreeSink> TreeBuilder<S> {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    pub(in crate::parser) fn handle_initial_mode(&mut self, token: Token) -> ProcessResult {
        match &token {
            // "A character token that is one of U+0009 CHARACTER TABULATION,
            // U+000A LINE FEED (LF), U+000C FORM FEED (FF), U+000D CARRIAGE
            // RETURN (CR), or U+0020 SPACE: Ignore the token."
            Token::Text { data, .. } => {
                let (_, rest) = Self::split_text_token(data);
                match rest {
                    Some(rest) => self.initial_anything_else(rest),
                    None => ProcessResult::Done,
                }
            }
            // "A comment token: Insert a comment as the last child of the
            // Document object."
            Token::Comment { data } => {
                let document = self.sink.document();
                self.append_comment_to(&document, data);
                ProcessResult::Done
            }
            Token::Doctype {
                name,
                public_identifier,
                system_identifier,
                force_quirks,
            } => {
                let (name, public_id, system_id) = (
                    name.as_deref(),
                    public_identifier.as_deref(),
                    system_identifier.as_deref(),
                );
                if doctype_is_parse_error(name, public_id, system_id) {
                    self.unexpected(&token);
                }

                // "Append a DocumentType node to the Document node, with its
                // name set to the name given in the DOCTYPE token, or the empty
                // string if the name was missing; its public ID set to the
                // public identifier given in the DOCTYPE token, or the empty
                // string if the public identifier was missing; and its system ID
                // set to the system identifier given in the DOCTYPE token, or
                // the empty string if the system identifier was missing."
                let doctype = self.sink.create_doctype(
                    name.unwrap_or(""),
                    public_id.unwrap_or(""),
                    system_id.unwrap_or(""),
                );
                let document = self.sink.document();
                self.sink.append_child(&document, &doctype);

                let mode = quirks_mode_for_doctype(name, public_id, system_id, *force_quirks, self.iframe_srcdoc);
                self.set_quirks_mode(mode);

                // "Then, switch the insertion mode to "before html"."
                self.mode = InsertionMode::BeforeHtml;
                ProcessResult::Done
            }
            _ => self.initial_anything_else(token),
        }
    }

    /// "If the document is not an iframe srcdoc document, then this is a
    /// parse error; if the parser cannot change the mode flag is false, set
    /// the Document to quirks mode. In any case, switch the insertion mode to
    /// "before html", then reprocess the token."
    fn initial_anything_else(&mut self, token: Token) -> ProcessResult {
        if !self.iframe_srcdoc {
            self.parse_error("expected-doctype-but-got-other");
            self.set_quirks_mode(QuirksMode::Quirks);
        }
        ProcessResult::Reprocess(InsertionMode::BeforeHtml, token)
    }

    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    pub(in crate::parser) fn handle_before_html_mode(&mut self, token: Token) -> ProcessResult {
        match &token {
            Token::Doctype { .. } => {
                self.unexpected(&token);
                ProcessResult::Done
            }
            Token::Comment { data } => {
                let document = self.sink.document();
                self.append_comment_to(&document, data);
                ProcessResult::Done
            }
            Token::Text { data, .. } => match Self::split_text_token(data).1 {
                Some(rest) => self.before_html_anything_else(rest),
                None => ProcessResult::Done,
            },
            // "A start tag whose tag name is "html": Create an element for the
            // token in the HTML namespace, with the Document as the intended
            // parent. Append it to the Document object. Put this element in the
            // stack of open elements. Switch the insertion mode to "before
            // head"."
            Token::StartTag { name, attributes, .. } if name == "html" => {
                let element = self.create_element_for(name, attributes, heron_dom::Namespace::Html);
                let document = self.sink.document();
                self.sink.append_child(&document, &element.handle);
                self.open_elements.push(element);
                self.mode = InsertionMode::BeforeHead;
                ProcessResult::Done
            }
            Token::EndTag { name } if matches!(name.as_str(), "head" | "body" | "html" | "br") => {
                self.before_html_anything_else(token)
            }
            // "Any other end tag: Parse error. Ignore the token."
            Token::EndTag { .. } => {
                self.unexpected(&token);
                ProcessResult::Done
            }
            _ => self.before_html_anything_else(token),
        }
    }

    /// "Create an html element whose node document is the Document object.
    /// Append it to the Document object. Put this element in the stack of open
    /// elements. Switch the insertion mode to "before head", then reprocess
    /// the token."
    fn before_html_anything_else(&mut self, token: Token) -> ProcessResult {
        let html = self.sink.create_element(heron_dom::QualName::html("html"), Vec::new());
        let document = self.sink.document();
        self.sink.append_child(&document, &html);
        self.open_elements.push(OpenElement::html(html, "html"));
        ProcessResult::Reprocess(InsertionMode::BeforeHead, token)
    }
}
