//! SVG and MathML content inside HTML.
//!
//! [§ 13.2.6.5 The rules for parsing tokens in foreign content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign)

pub mod mathml;
pub mod svg;

use heron_dom::{Attribute as DomAttribute, Namespace, QualName};

use super::core::{ProcessResult, TreeBuilder, is_html_whitespace};
use super::sink::TreeSink;
use crate::tokenizer::{Attribute, Token};

/// [§ 13.2.6.3 Adjust foreign attributes](https://html.spec.whatwg.org/multipage/parsing.html#adjust-foreign-attributes)
///
/// Attribute name, prefix, local name and namespace.
const FOREIGN_ATTRIBUTES: &[(&str, Option<&str>, &str, Namespace)] = &[
    ("xlink:actuate", Some("xlink"), "actuate", Namespace::XLink),
    ("xlink:arcrole", Some("xlink"), "arcrole", Namespace::XLink),
    ("xlink:href", Some("xlink"), "href", Namespace::XLink),
    ("xlink:role", Some("xlink"), "role", Namespace::XLink),
    ("xlink:show", Some("xlink"), "show", Namespace::XLink),
    ("xlink:title", Some("xlink"), "title", Namespace::XLink),
    ("xlink:type", Some("xlink"), "type", Namespace::XLink),
    ("xml:lang", Some("xml"), "lang", Namespace::Xml),
    ("xml:space", Some("xml"), "space", Namespace::Xml),
    ("xmlns", None, "xmlns", Namespace::Xmlns),
    ("xmlns:xlink", Some("xmlns"), "xlink", Namespace::Xmlns),
];

/// The namespaced name of a foreign attribute, if `name` is one.
fn adjust_foreign_attribute(name: &str) -> Option<QualName> {
    FOREIGN_ATTRIBUTES
        .iter()
        .find(|(from, ..)| *from == name)
        .map(|(_, prefix, local, ns)| QualName {
            ns: *ns,
            prefix: prefix.map(str::to_string),
            local: (*local).to_string(),
        })
}

/// Convert token attributes to DOM attributes for an element in `ns`,
/// applying the MathML, SVG and foreign attribute adjustments.
pub(super) fn dom_attributes(attributes: &[Attribute], ns: Namespace) -> Vec<DomAttribute> {
    attributes
        .iter()
        .map(|attribute| {
            let name = match ns {
                Namespace::Html => QualName::attribute(attribute.name.as_str()),
                _ => adjust_foreign_attribute(&attribute.name).unwrap_or_else(|| {
                    let adjusted = match ns {
                        Namespace::MathMl => mathml::adjust_mathml_attribute_name(&attribute.name),
                        Namespace::Svg => svg::adjust_svg_attribute_name(&attribute.name),
                        _ => None,
                    };
                    QualName::attribute(adjusted.unwrap_or(attribute.name.as_str()))
                }),
            };
            DomAttribute {
                name,
                value: attribute.value.clone(),
            }
        })
        .collect()
}

/// "A start tag whose tag name is one of: "b", "big", "blockquote", "body",
/// "br", "center", "code", "dd", "div", "dl", "dt", "em", "embed", "h1",
/// "h2", "h3", "h4", "h5", "h6", "head", "hr", "i", "img", "li", "listing",
/// "menu", "meta", "nobr", "ol", "p", "pre", "ruby", "s", "small", "span",
/// "strong", "strike", "sub", "sup", "table", "tt", "u", "ul", "var"
/// A start tag whose tag name is "font", if the token has any attributes
/// named "color", "face", or "size"
/// An end tag whose tag name is "br", "p""
fn is_breakout(token: &Token) -> bool {
    match token {
        Token::StartTag { name, attributes, .. } => {
            matches!(
                name.as_str(),
                "b" | "big"
                    | "blockquote"
                    | "body"
                    | "br"
                    | "center"
                    | "code"
                    | "dd"
                    | "div"
                    | "dl"
                    | "dt"
                    | "em"
                    | "embed"
                    | "h1"
                    | "h2"
                    | "h3"
                    | "h4"
                    | "h5"
                    | "h6"
                    | "head"
                    | "hr"
                    | "i"
                    | "img"
                    | "li"
                    | "listing"
                    | "menu"
                    | "meta"
                    | "nobr"
                    | "ol"
                    | "p"
                    | "pre"
                    | "ruby"
                    | "s"
                    | "small"
                    | "span"
                    | "strong"
                    | "strike"
                    | "sub"
                    | "sup"
                    | "table"
                    | "tt"
                    | "u"
                    | "ul"
                    | "var"
            ) || (name == "font"
                && attributes
                    .iter()
                    .any(|a| matches!(a.name.as_str(), "color" | "face" | "size")))
        }
        Token::EndTag { name } => name == "br" || name == "p",
        _ => false,
    }
}

impl<S: TreeSink> TreeBuilder<S> {
    /// [§ 13.2.6.5 The rules for parsing tokens in foreign content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inforeign)
    pub(super) fn process_foreign_content(&mut self, token: Token) -> ProcessResult {
        match &token {
            Token::Text { data, has_nul } => {
                // "A character token that is U+0000 NULL: Parse error. Insert a
                // U+FFFD REPLACEMENT CHARACTER character."
                if *has_nul {
                    self.parse_error("unexpected-null-character");
                    let replaced = data.replace('\0', "\u{FFFD}");
                    self.insert_text(&replaced);
                } else {
                    self.insert_text(data);
                }
                // "Any other character token: Insert the token's character. Set
                // the frameset-ok flag to "not ok"."
                if data.chars().any(|c| !is_html_whitespace(c) && c != '\0') {
                    self.frameset_ok = false;
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
            _ if is_breakout(&token) => {
                // "Parse error. While the current node is not a MathML text
                // integration point, an HTML integration point, or an element in
                // the HTML namespace, pop elements from the stack of open
                // elements. Reprocess the token according to the rules given in
                // the section corresponding to the current insertion mode in
                // HTML content."
                self.unexpected(&token);
                while self.current_node().is_some_and(|node| {
                    !node.is_mathml_text_integration_point()
                        && !node.is_html_integration_point()
                        && node.ns != Namespace::Html
                }) {
                    let _ = self.open_elements.pop();
                }
                ProcessResult::ReprocessHtml(token)
            }
            Token::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                // "Any other start tag"
                let ns = self
                    .adjusted_current_node()
                    .map_or(Namespace::Html, |node| node.ns);
                let local = match ns {
                    Namespace::Svg => svg::adjust_svg_tag_name(name).unwrap_or(name.as_str()),
                    _ => name.as_str(),
                };
                let _ = self.insert_element(local, attributes, ns);

                // "If the token has its self-closing flag set, then run the
                // appropriate steps from the following list: ... Pop the
                // current node off the stack of open elements and acknowledge
                // the token's self-closing flag."
                if *self_closing {
                    let _ = self.open_elements.pop();
                }
                ProcessResult::Done
            }
            Token::EndTag { name } => {
                // "An end tag whose tag name is "script", if the current node is
                // an SVG script element"
                if name == "script"
                    && self
                        .current_node()
                        .is_some_and(|node| node.ns == Namespace::Svg && node.local == "script")
                {
                    let _ = self.open_elements.pop();
                    return ProcessResult::Done;
                }
                self.foreign_end_tag(token)
            }
            Token::EndOfFile => ProcessResult::ReprocessHtml(token),
        }
    }

    /// "Any other end tag" in foreign content.
    fn foreign_end_tag(&mut self, token: Token) -> ProcessResult {
        let Token::EndTag { name } = &token else {
            return ProcessResult::Done;
        };

        // STEP 1: "Initialize node to be the current node (the bottommost node
        // of the stack)."
        let Some(mut index) = self.open_elements.len().checked_sub(1) else {
            return ProcessResult::Done;
        };

        // STEP 2: "If node's tag name, converted to ASCII lowercase, is not
        // the same as the tag name of the token, then this is a parse error."
        if !self.open_elements[index].local.eq_ignore_ascii_case(name) {
            self.unexpected(&token);
        }

        loop {
            // STEP 3: "Loop: If node is the topmost element in the stack of
            // open elements, then return. (fragment case)"
            if index == 0 {
                return ProcessResult::Done;
            }

            // STEP 4: "If node's tag name, converted to ASCII lowercase, is the
            // same as the tag name of the token, pop elements from the stack of
            // open elements until node has been popped from the stack, and
            // then return."
            if self.open_elements[index].local.eq_ignore_ascii_case(name) {
                self.open_elements.truncate(index);
                return ProcessResult::Done;
            }

            // STEP 5: "Set node to the previous entry in the stack of open
            // elements."
            index -= 1;

            // STEP 6: "If node is not an element in the HTML namespace, return
            // to the step labeled loop."
            if self.open_elements[index].ns != Namespace::Html {
                continue;
            }

            // STEP 7: "Otherwise, process the token according to the rules
            // given in the section corresponding to the current insertion mode
            // in HTML content."
            return ProcessResult::ReprocessHtml(token);
        }
    }
}
