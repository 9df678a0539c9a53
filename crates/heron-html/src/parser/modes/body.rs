use heron_dom::{Namespace, QuirksMode};

use crate::parser::core::{InsertionMode, ProcessResult, TreeBuilder, is_html_whitespace};
use crate::parser::foreign_content::dom_attributes;
use crate::parser::formatting::AdoptionOutcome;
use crate::parser::sink::TreeSink;
use crate::parser::stack::{HEADINGS, Scope};
use crate::tokenizer::{Attribute, Token, TokenizerState};

/// Start tags that close a `<p>` in button scope before inserting.
const BLOCK_START_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "center",
    "details",
    "dialog",
    "dir",
    "div",
    "dl",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "header",
    "hgroup",
    "main",
    "menu",
    "nav",
    "ol",
    "p",
    "search",
    "section",
    "summary",
    "ul",
];

/// End tags that close a block in default scope.
const BLOCK_END_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "button",
    "center",
    "details",
    "dialog",
    "dir",
    "div",
    "dl",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "header",
    "hgroup",
    "listing",
    "main",
    "menu",
    "nav",
    "ol",
    "pre",
    "search",
    "section",
    "summary",
    "ul",
];

/// Tags handled by the adoption agency algorithm.
const FORMATTING_END_TAGS: &[&str] = &[
    "a", "b", "big", "code", "em", "font", "i", "nobr", "s", "small", "strike", "strong", "tt", "u",
];

/// Formatting start tags pushed without extra checks.
const PLAIN_FORMATTING_TAGS: &[&str] = &[
    "b", "big", "code", "em", "font", "i", "s", "small", "strike", "strong", "tt", "u",
];

impl<S: TreeSink> TreeBuilder<S> {
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    pub(in crate::parser) fn handle_in_body_mode(&mut self, token: Token) -> ProcessResult {
        match &token {
            Token::Text { data, has_nul } => {
                self.in_body_text(data, *has_nul);
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
            Token::StartTag { .. } => self.in_body_start_tag(token),
            Token::EndTag { .. } => self.in_body_end_tag(token),
            Token::EndOfFile => {
                // "If the stack of template insertion modes is not empty, then
                // process the token using the rules for the "in template"
                // insertion mode."
                if !self.template_modes.is_empty() {
                    return self.handle_in_template_mode(token);
                }
                // "Otherwise, follow these steps: If there is a node in the
                // stack of open elements that is not either a dd element, a dt
                // element, an li element, ... then this is a parse error."
                self.stop_parsing();
                ProcessResult::Done
            }
        }
    }

    fn in_body_text(&mut self, data: &str, has_nul: bool) {
        // "A character token that is U+0000 NULL: Parse error. Ignore the
        // token."
        let stripped;
        let data = if has_nul {
            self.parse_error("unexpected-null-character");
            stripped = data.replace('\0', "");
            stripped.as_str()
        } else {
            data
        };
        if data.is_empty() {
            return;
        }

        // "Reconstruct the active formatting elements, if any. Insert the
        // token's character."
        self.reconstruct_active_formatting_elements();
        self.insert_text(data);

        // "Any other character token: ... Set the frameset-ok flag to "not
        // ok"."
        if data.chars().any(|c| !is_html_whitespace(c)) {
            self.frameset_ok = false;
        }
    }

    fn in_body_start_tag(&mut self, token: Token) -> ProcessResult {
        let Token::StartTag {
            name,
            self_closing,
            attributes,
        } = &token
        else {
            return ProcessResult::Done;
        };

        match name.as_str() {
            // "A start tag whose tag name is "html""
            "html" => {
                self.unexpected(&token);
                // "If there is a template element on the stack of open
                // elements, then ignore the token. Otherwise, for each attribute
                // on the token, check to see if the attribute is already present
                // on the top element of the stack of open elements. If it is
                // not, add the attribute and its corresponding value to that
                // element."
                if !self.stack_contains("template") {
                    if let Some(html) = self.open_elements.first().map(|e| e.handle.clone()) {
                        self.sink
                            .add_attributes_if_missing(&html, dom_attributes(attributes, Namespace::Html));
                    }
                }
            }
            "base" | "basefont" | "bgsound" | "link" | "meta" | "noframes" | "script" | "style" | "template"
            | "title" => return self.handle_in_head_mode(token),
            "body" => {
                self.unexpected(&token);
                // "If the second element on the stack of open elements is not a
                // body element, if the stack of open elements has only one node
                // on it, or if there is a template element on the stack of open
                // elements, then ignore the token. (fragment case or there is a
                // template element on the stack)"
                let second_is_body = self.open_elements.get(1).is_some_and(|e| e.is_html("body"));
                if second_is_body && !self.stack_contains("template") {
                    // "Otherwise, set the frameset-ok flag to "not ok"; then, for
                    // each attribute on the token, check to see if the attribute
                    // is already present on the body element (the second element)
                    // on the stack of open elements, and if it is not, add the
                    // attribute and its corresponding value to that element."
                    self.frameset_ok = false;
                    let body = self.open_elements[1].handle.clone();
                    self.sink
                        .add_attributes_if_missing(&body, dom_attributes(attributes, Namespace::Html));
                }
            }
            "frameset" => {
                self.unexpected(&token);
                let second_is_body = self.open_elements.get(1).is_some_and(|e| e.is_html("body"));
                // "If the stack of open elements has only one node on it, or if
                // the second element on the stack of open elements is not a body
                // element, then ignore the token. (fragment case or there is a
                // template element on the stack)"
                // "If the frameset-ok flag is set to "not ok", ignore the token."
                if second_is_body && self.frameset_ok {
                    // "Remove the second element on the stack of open elements
                    // from its parent node, if it has one."
                    let body = self.open_elements[1].handle.clone();
                    self.sink.remove_from_parent(&body);
                    // "Pop all the nodes from the bottom of the stack of open
                    // elements, from the current node up to, but not including,
                    // the root html element."
                    self.open_elements.truncate(1);
                    // "Insert an HTML element for the token. Switch the insertion
                    // mode to "in frameset"."
                    let _ = self.insert_html_element(name, attributes);
                    self.mode = InsertionMode::InFrameset;
                }
            }
            _ if BLOCK_START_TAGS.contains(&name.as_str()) => {
                self.close_p_element_in_button_scope();
                let _ = self.insert_html_element(name, attributes);
            }
            _ if HEADINGS.contains(&name.as_str()) => {
                self.close_p_element_in_button_scope();
                // "If the current node is an HTML element whose tag name is one
                // of "h1", "h2", "h3", "h4", "h5", or "h6", then this is a parse
                // error; pop the current node off the stack of open elements."
                if self.current_node_is_one_of(HEADINGS) {
                    self.unexpected(&token);
                    let _ = self.open_elements.pop();
                }
                let _ = self.insert_html_element(name, attributes);
            }
            "pre" | "listing" => {
                self.close_p_element_in_button_scope();
                let _ = self.insert_html_element(name, attributes);
                // "If the next token is a U+000A LINE FEED (LF) character token,
                // then ignore that token and move on to the next one. (Newlines
                // at the start of pre blocks are ignored as an authoring
                // convenience.)"
                self.ignore_next_lf = true;
                self.frameset_ok = false;
            }
            "form" => {
                // "If the form element pointer is not null, and there is no
                // template element on the stack of open elements, then this is a
                // parse error; ignore the token."
                let has_template = self.stack_contains("template");
                if self.form_element.is_some() && !has_template {
                    self.unexpected(&token);
                } else {
                    self.close_p_element_in_button_scope();
                    let form = self.insert_html_element(name, attributes);
                    if !has_template {
                        self.form_element = Some(form);
                    }
                }
            }
            "li" => {
                self.frameset_ok = false;
                self.close_list_item(&["li"]);
                self.close_p_element_in_button_scope();
                let _ = self.insert_html_element(name, attributes);
            }
            "dd" | "dt" => {
                self.frameset_ok = false;
                self.close_list_item(&["dd", "dt"]);
                self.close_p_element_in_button_scope();
                let _ = self.insert_html_element(name, attributes);
            }
            "plaintext" => {
                self.close_p_element_in_button_scope();
                let _ = self.insert_html_element(name, attributes);
                // "Switch the tokenizer to the PLAINTEXT state."
                self.switch_tokenizer_to(TokenizerState::PLAINTEXT);
            }
            "button" => {
                // "If the stack of open elements has a button element in scope,
                // then run these substeps: Parse error. Generate implied end
                // tags. Pop elements from the stack of open elements until a
                // button element has been popped from the stack."
                if self.in_scope("button", Scope::Default) {
                    self.unexpected(&token);
                    self.generate_implied_end_tags(None);
                    self.pop_until("button");
                }
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(name, attributes);
                self.frameset_ok = false;
            }
            "a" => {
                // "If the list of active formatting elements contains an a
                // element between the end of the list and the last marker on the
                // list (or the start of the list if there is no marker on the
                // list), then this is a parse error; run the adoption agency
                // algorithm for the token, then remove that element from the
                // list of active formatting elements and the stack of open
                // elements if the adoption agency algorithm didn't already
                // remove it (it might not have if the element is not in table
                // scope)."
                if let Some((_, existing)) = self.formatting_element_after_last_marker("a") {
                    self.unexpected(&token);
                    let _ = self.adoption_agency("a");
                    self.remove_from_active_formatting(&existing);
                    self.remove_from_stack(&existing);
                }
                self.reconstruct_active_formatting_elements();
                let handle = self.insert_html_element(name, attributes);
                self.push_formatting_element(handle, name, attributes);
            }
            _ if PLAIN_FORMATTING_TAGS.contains(&name.as_str()) => {
                self.reconstruct_active_formatting_elements();
                let handle = self.insert_html_element(name, attributes);
                self.push_formatting_element(handle, name, attributes);
            }
            "nobr" => {
                self.reconstruct_active_formatting_elements();
                // "If the stack of open elements has a nobr element in scope,
                // then this is a parse error; run the adoption agency algorithm
                // for the token, then once again reconstruct the active
                // formatting elements, if any."
                if self.in_scope("nobr", Scope::Default) {
                    self.unexpected(&token);
                    let _ = self.adoption_agency("nobr");
                    self.reconstruct_active_formatting_elements();
                }
                let handle = self.insert_html_element(name, attributes);
                self.push_formatting_element(handle, name, attributes);
            }
            "applet" | "marquee" | "object" => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(name, attributes);
                self.push_formatting_marker();
                self.frameset_ok = false;
            }
            "table" => {
                // "If the Document is not set to quirks mode, and the stack of
                // open elements has a p element in button scope, then close a p
                // element."
                if self.quirks_mode != QuirksMode::Quirks {
                    self.close_p_element_in_button_scope();
                }
                let _ = self.insert_html_element(name, attributes);
                self.frameset_ok = false;
                self.mode = InsertionMode::InTable;
            }
            "area" | "br" | "embed" | "img" | "keygen" | "wbr" => {
                self.insert_void_with_formatting(name, attributes);
            }
            "input" => {
                self.reconstruct_active_formatting_elements();
                self.insert_void_element(name, attributes);
                // "If the token does not have an attribute with the name "type",
                // or if it does, but that attribute's value is not an ASCII
                // case-insensitive match for the string "hidden", then: set the
                // frameset-ok flag to "not ok"."
                if !token.attribute("type").is_some_and(|t| t.eq_ignore_ascii_case("hidden")) {
                    self.frameset_ok = false;
                }
            }
            "param" | "source" | "track" => self.insert_void_element(name, attributes),
            "hr" => {
                self.close_p_element_in_button_scope();
                self.insert_void_element(name, attributes);
                self.frameset_ok = false;
            }
            // "A start tag whose tag name is "image": Parse error. Change the
            // token's tag name to "img" and reprocess it. (Don't ask.)"
            "image" => {
                self.unexpected(&token);
                let token = Token::StartTag {
                    name: "img".to_string(),
                    self_closing: *self_closing,
                    attributes: attributes.clone(),
                };
                return ProcessResult::Reprocess(self.mode, token);
            }
            "textarea" => {
                let _ = self.insert_html_element(name, attributes);
                self.ignore_next_lf = true;
                self.switch_tokenizer_to(TokenizerState::RCDATA);
                self.original_mode = Some(self.mode);
                self.frameset_ok = false;
                self.mode = InsertionMode::Text;
            }
            "xmp" => {
                self.close_p_element_in_button_scope();
                self.reconstruct_active_formatting_elements();
                self.frameset_ok = false;
                self.parse_text_element(name, attributes, TokenizerState::RAWTEXT);
            }
            "iframe" => {
                self.frameset_ok = false;
                self.parse_text_element(name, attributes, TokenizerState::RAWTEXT);
            }
            "noembed" => self.parse_text_element(name, attributes, TokenizerState::RAWTEXT),
            "noscript" if self.scripting_enabled => {
                self.parse_text_element(name, attributes, TokenizerState::RAWTEXT);
            }
            "select" => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(name, attributes);
                self.frameset_ok = false;
                // "If the insertion mode is one of "in table", "in caption", "in
                // table body", "in row", or "in cell", then switch the insertion
                // mode to "in select in table". Otherwise, switch the insertion
                // mode to "in select"."
                self.mode = match self.mode {
                    InsertionMode::InTable
                    | InsertionMode::InCaption
                    | InsertionMode::InTableBody
                    | InsertionMode::InRow
                    | InsertionMode::InCell => InsertionMode::InSelectInTable,
                    _ => InsertionMode::InSelect,
                };
            }
            "optgroup" | "option" => {
                if self.current_node_is("option") {
                    let _ = self.open_elements.pop();
                }
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(name, attributes);
            }
            "rb" | "rtc" => {
                if self.in_scope("ruby", Scope::Default) {
                    self.generate_implied_end_tags(None);
                    if !self.current_node_is("ruby") {
                        self.unexpected(&token);
                    }
                }
                let _ = self.insert_html_element(name, attributes);
            }
            "rp" | "rt" => {
                if self.in_scope("ruby", Scope::Default) {
                    self.generate_implied_end_tags(Some("rtc"));
                    if !self.current_node_is_one_of(&["rtc", "ruby"]) {
                        self.unexpected(&token);
                    }
                }
                let _ = self.insert_html_element(name, attributes);
            }
            // "A start tag whose tag name is "math"" / "A start tag whose tag
            // name is "svg"": "Reconstruct the active formatting elements, if
            // any. Adjust MathML attributes for the token. Adjust foreign
            // attributes for the token. Insert a foreign element for the token,
            // with MathML namespace and false."
            "math" | "svg" => {
                self.reconstruct_active_formatting_elements();
                let ns = if name == "math" { Namespace::MathMl } else { Namespace::Svg };
                let _ = self.insert_element(name, attributes, ns);
                // "If the token has its self-closing flag set, pop the current
                // node off the stack of open elements and acknowledge the
                // token's self-closing flag."
                if *self_closing {
                    let _ = self.open_elements.pop();
                }
            }
            "caption" | "col" | "colgroup" | "frame" | "head" | "tbody" | "td" | "tfoot" | "th" | "thead" | "tr" => {
                self.unexpected(&token);
            }
            // "Any other start tag: Reconstruct the active formatting elements,
            // if any. Insert an HTML element for the token."
            _ => {
                self.reconstruct_active_formatting_elements();
                let _ = self.insert_html_element(name, attributes);
            }
        }
        ProcessResult::Done
    }

    /// "Reconstruct the active formatting elements, if any. Insert an HTML
    /// element for the token. Immediately pop the current node off the stack
    /// of open elements. Acknowledge the token's self-closing flag, if it is
    /// set. Set the frameset-ok flag to "not ok"."
    fn insert_void_with_formatting(&mut self, name: &str, attributes: &[Attribute]) {
        self.reconstruct_active_formatting_elements();
        self.insert_void_element(name, attributes);
        self.frameset_ok = false;
    }

    /// The loop shared by `<li>`, `<dd>` and `<dt>` start tags: close an open
    /// item of one of `names` unless a special element intervenes.
    fn close_list_item(&mut self, names: &[&str]) {
        // STEP 2: "Initialize node to be the current node (the bottommost node
        // of the stack)."
        for index in (0..self.open_elements.len()).rev() {
            let node = &self.open_elements[index];
            // STEP 3: "Loop: If node is an li element, then run these substeps:
            // Generate implied end tags, except for li elements. If the current
            // node is not an li element, then this is a parse error. Pop
            // elements from the stack of open elements until an li element has
            // been popped from the stack. Jump to the step labeled done below."
            if node.is_html_one_of(names) {
                let local = node.local.clone();
                self.generate_implied_end_tags(Some(&local));
                if !self.current_node_is(&local) {
                    self.parse_error(&format!("<{local}> closed with open elements"));
                }
                self.pop_until(&local);
                return;
            }
            // STEP 4: "If node is in the special category, but is not an
            // address, div, or p element, then jump to the step labeled done
            // below."
            if node.is_special() && !node.is_html_one_of(&["address", "div", "p"]) {
                return;
            }
            // STEP 5: "Otherwise, set node to the previous entry in the stack of
            // open elements and return to the step labeled loop."
        }
    }

    fn in_body_end_tag(&mut self, token: Token) -> ProcessResult {
        let Token::EndTag { name } = &token else {
            return ProcessResult::Done;
        };

        match name.as_str() {
            "template" => return self.handle_in_head_mode(token),
            // "An end tag whose tag name is "body""
            "body" | "html" => {
                // "If the stack of open elements does not have a body element in
                // scope, this is a parse error; ignore the token."
                if !self.in_scope("body", Scope::Default) {
                    self.unexpected(&token);
                    return ProcessResult::Done;
                }
                // "Switch the insertion mode to "after body"."
                if name == "html" {
                    return ProcessResult::Reprocess(InsertionMode::AfterBody, token);
                }
                self.mode = InsertionMode::AfterBody;
            }
            _ if BLOCK_END_TAGS.contains(&name.as_str()) => {
                // "If the stack of open elements does not have an element in
                // scope that is an HTML element with the same tag name as that of
                // the token, then this is a parse error; ignore the token."
                if !self.in_scope(name, Scope::Default) {
                    self.unexpected(&token);
                    return ProcessResult::Done;
                }
                self.generate_implied_end_tags(None);
                if !self.current_node_is(name) {
                    self.unexpected(&token);
                }
                self.pop_until(name);
            }
            "form" => self.close_form(&token),
            "p" => {
                // "If the stack of open elements does not have a p element in
                // button scope, then this is a parse error; insert an HTML
                // element for a "p" start tag token with no attributes."
                if !self.in_scope("p", Scope::Button) {
                    self.unexpected(&token);
                    let _ = self.insert_html_element("p", &[]);
                }
                // "Close a p element."
                self.close_p_element();
            }
            "li" | "dd" | "dt" => {
                let scope = if name == "li" { Scope::ListItem } else { Scope::Default };
                if !self.in_scope(name, scope) {
                    self.unexpected(&token);
                    return ProcessResult::Done;
                }
                self.generate_implied_end_tags(Some(name));
                if !self.current_node_is(name) {
                    self.unexpected(&token);
                }
                self.pop_until(name);
            }
            _ if HEADINGS.contains(&name.as_str()) => {
                // "If the stack of open elements does not have an element in
                // scope that is an HTML element and whose tag name is one of
                // "h1", "h2", "h3", "h4", "h5", or "h6", then this is a parse
                // error; ignore the token."
                if !self.in_scope_where(Scope::Default, |e| e.is_html_one_of(HEADINGS)) {
                    self.unexpected(&token);
                    return ProcessResult::Done;
                }
                self.generate_implied_end_tags(None);
                if !self.current_node_is(name) {
                    self.unexpected(&token);
                }
                self.pop_until_one_of(HEADINGS);
            }
            _ if FORMATTING_END_TAGS.contains(&name.as_str()) => {
                if self.adoption_agency(name) == AdoptionOutcome::AnyOtherEndTag {
                    self.any_other_end_tag(&token);
                }
            }
            "applet" | "marquee" | "object" => {
                if !self.in_scope(name, Scope::Default) {
                    self.unexpected(&token);
                    return ProcessResult::Done;
                }
                self.generate_implied_end_tags(None);
                if !self.current_node_is(name) {
                    self.unexpected(&token);
                }
                self.pop_until(name);
                self.clear_active_formatting_to_last_marker();
            }
            // "An end tag whose tag name is "br": Parse error. Drop the
            // attributes from the token, and act as described in the next
            // entry; i.e. act as if this was a "br" start tag token with no
            // attributes, rather than the end tag token that it actually is."
            "br" => {
                self.unexpected(&token);
                self.insert_void_with_formatting("br", &[]);
            }
            _ => self.any_other_end_tag(&token),
        }
        ProcessResult::Done
    }

    /// "An end tag whose tag name is "form""
    fn close_form(&mut self, token: &Token) {
        if !self.stack_contains("template") {
            // "Let node be the element that the form element pointer is set to,
            // or null if it is not set to an element. Set the form element
            // pointer to null."
            let node = self.form_element.take();
            // "If node is null or if the stack of open elements does not have
            // node in scope, then this is a parse error; return and ignore the
            // token."
            let Some(node) = node.filter(|node| self.in_scope_where(Scope::Default, |e| e.handle == *node)) else {
                self.unexpected(token);
                return;
            };
            self.generate_implied_end_tags(None);
            // "If the current node is not node, then this is a parse error."
            if self.current_node().is_some_and(|current| current.handle != node) {
                self.unexpected(token);
            }
            // "Remove node from the stack of open elements."
            self.remove_from_stack(&node);
        } else {
            // "If the stack of open elements does not have a form element in
            // scope, then this is a parse error; return and ignore the token."
            if !self.in_scope("form", Scope::Default) {
                self.unexpected(token);
                return;
            }
            self.generate_implied_end_tags(None);
            if !self.current_node_is("form") {
                self.unexpected(token);
            }
            self.pop_until("form");
        }
    }

    /// "Any other end tag" in the "in body" insertion mode.
    pub(in crate::parser) fn any_other_end_tag(&mut self, token: &Token) {
        let Some(name) = token.tag_name() else {
            return;
        };
        // STEP 1: "Initialize node to be the current node (the bottommost node
        // of the stack)."
        for index in (0..self.open_elements.len()).rev() {
            let node = &self.open_elements[index];
            // STEP 2: "Loop: If node is an HTML element with the same tag name as
            // the token, then: Generate implied end tags, except for HTML
            // elements with the same tag name as the token. If node is not the
            // current node, then this is a parse error. Pop all the nodes from
            // the current node up to node, including node, then stop these
            // steps."
            if node.is_html(name) {
                self.generate_implied_end_tags(Some(name));
                if index + 1 != self.open_elements.len() {
                    self.unexpected(token);
                }
                self.open_elements.truncate(index);
                return;
            }
            // STEP 3: "Otherwise, if node is in the special category, then this
            // is a parse error; ignore the token, and return."
            if node.is_special() {
                self.unexpected(token);
                return;
            }
            // STEP 4: "Set node to the previous entry in the stack of open
            // elements."
        }
    }

    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    pub(in crate::parser) fn handle_text_mode(&mut self, token: Token) -> ProcessResult {
        let original = self.original_mode.take().unwrap_or(InsertionMode::InBody);
        match &token {
            // "A character token: Insert the token's character."
            Token::Text { data, .. } => {
                self.original_mode = Some(original);
                self.insert_text(data);
                ProcessResult::Done
            }
            // "An end-of-file token: Parse error. If the current node is a
            // script element, then set its already started to true. Pop the
            // current node off the stack of open elements. Switch the insertion
            // mode to the original insertion mode and reprocess the token."
            Token::EndOfFile => {
                self.unexpected(&token);
                let _ = self.open_elements.pop();
                ProcessResult::Reprocess(original, token)
            }
            // "An end tag whose tag name is "script""
            Token::EndTag { name } if name == "script" => {
                // "Let script be the current node (which will be a script
                // element). Pop the current node off the stack of open elements.
                // Switch the insertion mode to the original insertion mode."
                let script = self.open_elements.pop();
                self.mode = original;
                if let Some(script) = script {
                    self.suspend_for_script(script.handle);
                }
                ProcessResult::Done
            }
            // "Any other end tag: Pop the current node off the stack of open
            // elements. Switch the insertion mode to the original insertion
            // mode."
            _ => {
                let _ = self.open_elements.pop();
                self.mode = original;
                ProcessResult::Done
            }
        }
    }
}
