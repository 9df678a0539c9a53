//! The stack of open elements.
//!
//! [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)

use heron_dom::Namespace;

use super::core::{InsertionMode, TreeBuilder};
use super::foreign_content::mathml;
use super::sink::TreeSink;

/// An entry on the stack of open elements.
#[derive(Debug, Clone)]
pub(crate) struct OpenElement<H> {
    pub(crate) handle: H,
    pub(crate) ns: Namespace,
    pub(crate) local: String,
    /// Set for a MathML `annotation-xml` whose start tag had an HTML
    /// `encoding`.
    pub(crate) html_integration_point: bool,
}

impl<H> OpenElement<H> {
    /// An HTML element entry.
    pub(crate) fn html(handle: H, local: &str) -> Self {
        Self {
            handle,
            ns: Namespace::Html,
            local: local.to_string(),
            html_integration_point: false,
        }
    }

    /// Whether this is the HTML element `local`.
    pub(crate) fn is_html(&self, local: &str) -> bool {
        self.ns == Namespace::Html && self.local == local
    }

    /// Whether this is an HTML element named one of `names`.
    pub(crate) fn is_html_one_of(&self, names: &[&str]) -> bool {
        self.ns == Namespace::Html && names.contains(&self.local.as_str())
    }

    /// [§ 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#mathml-text-integration-point)
    pub(crate) fn is_mathml_text_integration_point(&self) -> bool {
        self.ns == Namespace::MathMl && mathml::is_text_integration_point(&self.local)
    }

    /// [§ 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#html-integration-point)
    ///
    /// "A MathML annotation-xml element whose start tag token had an attribute
    /// with the name "encoding" whose value was ... "text/html" ... "application/xhtml+xml"
    /// An SVG `foreignObject` element
    /// An SVG desc element
    /// An SVG title element"
    pub(crate) fn is_html_integration_point(&self) -> bool {
        match self.ns {
            Namespace::MathMl => self.html_integration_point,
            Namespace::Svg => matches!(self.local.as_str(), "foreignObject" | "desc" | "title"),
            _ => false,
        }
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#special)
    ///
    /// "The following elements have varying levels of special parsing rules"
    pub(crate) fn is_special(&self) -> bool {
        match self.ns {
            Namespace::Html => SPECIAL_HTML_ELEMENTS.contains(&self.local.as_str()),
            Namespace::MathMl => matches!(self.local.as_str(), "mi" | "mo" | "mn" | "ms" | "mtext" | "annotation-xml"),
            Namespace::Svg => matches!(self.local.as_str(), "foreignObject" | "desc" | "title"),
            _ => false,
        }
    }
}

const SPECIAL_HTML_ELEMENTS: &[&str] = &[
    "address",
    "applet",
    "area",
    "article",
    "aside",
    "base",
    "basefont",
    "bgsound",
    "blockquote",
    "body",
    "br",
    "button",
    "caption",
    "center",
    "col",
    "colgroup",
    "dd",
    "details",
    "dir",
    "div",
    "dl",
    "dt",
    "embed",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "frame",
    "frameset",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "head",
    "header",
    "hgroup",
    "hr",
    "html",
    "iframe",
    "img",
    "input",
    "keygen",
    "li",
    "link",
    "listing",
    "main",
    "marquee",
    "menu",
    "meta",
    "nav",
    "noembed",
    "noframes",
    "noscript",
    "object",
    "ol",
    "p",
    "param",
    "plaintext",
    "pre",
    "script",
    "search",
    "section",
    "select",
    "source",
    "style",
    "summary",
    "table",
    "tbody",
    "td",
    "template",
    "textarea",
    "tfoot",
    "th",
    "thead",
    "title",
    "tr",
    "track",
    "ul",
    "wbr",
    "xmp",
];

/// "generate implied end tags": elements popped by it.
const IMPLIED_END_TAGS: &[&str] = &["dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc"];

/// "generate all implied end tags thoroughly"
const THOROUGH_IMPLIED_END_TAGS: &[&str] = &[
    "caption", "colgroup", "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc", "tbody", "td",
    "tfoot", "th", "thead", "tr",
];

pub(super) const HEADINGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-scope)
///
/// The element scopes, each a different set of boundary elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Scope {
    /// "has an element in scope"
    Default,
    /// "has an element in list item scope"
    ListItem,
    /// "has an element in button scope"
    Button,
    /// "has an element in table scope"
    Table,
    /// "has an element in select scope"
    Select,
}

impl Scope {
    fn is_boundary<H>(self, element: &OpenElement<H>) -> bool {
        match self {
            // "all element types except the following: optgroup in the HTML
            // namespace, option in the HTML namespace"
            Self::Select => !element.is_html_one_of(&["optgroup", "option"]),
            // "html in the HTML namespace, table in the HTML namespace,
            // template in the HTML namespace"
            Self::Table => element.is_html_one_of(&["html", "table", "template"]),
            Self::Default | Self::ListItem | Self::Button => {
                let default = match element.ns {
                    Namespace::Html => matches!(
                        element.local.as_str(),
                        "applet" | "caption" | "html" | "table" | "td" | "th" | "marquee" | "object" | "template"
                    ),
                    Namespace::MathMl => matches!(
                        element.local.as_str(),
                        "mi" | "mo" | "mn" | "ms" | "mtext" | "annotation-xml"
                    ),
                    Namespace::Svg => matches!(element.local.as_str(), "foreignObject" | "desc" | "title"),
                    _ => false,
                };
                default
                    || (self == Self::ListItem && element.is_html_one_of(&["ol", "ul"]))
                    || (self == Self::Button && element.is_html("button"))
            }
        }
    }
}

impl<S: TreeSink> TreeBuilder<S> {
    /// "The current node is the bottommost node in this stack of open
    /// elements."
    pub(super) fn current_node(&self) -> Option<&OpenElement<S::Handle>> {
        self.open_elements.last()
    }

    /// Whether the current node is the HTML element `name`.
    pub(super) fn current_node_is(&self, name: &str) -> bool {
        self.current_node().is_some_and(|node| node.is_html(name))
    }

    /// Whether the current node is an HTML element named one of `names`.
    pub(super) fn current_node_is_one_of(&self, names: &[&str]) -> bool {
        self.current_node().is_some_and(|node| node.is_html_one_of(names))
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#adjusted-current-node)
    ///
    /// "The adjusted current node is the context element if the parser was
    /// created as part of the HTML fragment parsing algorithm and the stack of
    /// open elements has only one element in it (fragment case); otherwise,
    /// the adjusted current node is the current node."
    pub(super) fn adjusted_current_node(&self) -> Option<&OpenElement<S::Handle>> {
        match &self.context_element {
            Some(context) if self.open_elements.len() == 1 => Some(context),
            _ => self.current_node(),
        }
    }

    /// "The stack of open elements is said to have a particular element in a
    /// specific scope when..."
    pub(super) fn in_scope_where(&self, scope: Scope, target: impl Fn(&OpenElement<S::Handle>) -> bool) -> bool {
        for element in self.open_elements.iter().rev() {
            // "If node is the target node, terminate in a match state."
            if target(element) {
                return true;
            }
            // "Otherwise, if node is one of the element types in list,
            // terminate in a failure state."
            if scope.is_boundary(element) {
                return false;
            }
        }
        false
    }

    /// Whether an HTML element named `name` is in `scope`.
    pub(super) fn in_scope(&self, name: &str, scope: Scope) -> bool {
        self.in_scope_where(scope, |element| element.is_html(name))
    }

    /// Whether the stack contains the HTML element `name` at all.
    pub(super) fn stack_contains(&self, name: &str) -> bool {
        self.open_elements.iter().any(|element| element.is_html(name))
    }

    /// Index of `handle` in the stack.
    pub(super) fn stack_position(&self, handle: &S::Handle) -> Option<usize> {
        self.open_elements
            .iter()
            .rposition(|element| element.handle == *handle)
    }

    /// Remove `handle` from the stack wherever it is.
    pub(super) fn remove_from_stack(&mut self, handle: &S::Handle) {
        if let Some(index) = self.stack_position(handle) {
            let _ = self.open_elements.remove(index);
        }
    }

    /// "Pop elements from the stack of open elements until an X element has
    /// been popped from the stack."
    pub(super) fn pop_until(&mut self, name: &str) {
        self.pop_until_one_of(&[name]);
    }

    /// Pop until an HTML element named one of `names` has been popped.
    pub(super) fn pop_until_one_of(&mut self, names: &[&str]) {
        while let Some(element) = self.open_elements.pop() {
            if element.is_html_one_of(names) {
                break;
            }
        }
    }

    /// [§ 13.2.6.3 Closing elements that have implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
    ///
    /// "while the current node is a dd element, a dt element, an li element,
    /// an optgroup element, an option element, a p element, an rb element, an
    /// rp element, an rt element, or an rtc element, the UA must pop the
    /// current node off the stack of open elements."
    pub(super) fn generate_implied_end_tags(&mut self, except: Option<&str>) {
        while let Some(node) = self.current_node() {
            if !node.is_html_one_of(IMPLIED_END_TAGS) || except.is_some_and(|name| node.is_html(name)) {
                break;
            }
            let _ = self.open_elements.pop();
        }
    }

    /// "generate all implied end tags thoroughly"
    pub(super) fn generate_all_implied_end_tags_thoroughly(&mut self) {
        while self.current_node_is_one_of(THOROUGH_IMPLIED_END_TAGS) {
            let _ = self.open_elements.pop();
        }
    }

    /// Pop until the current node is one of `names` (or `html`).
    ///
    /// "clear the stack back to a table context" and friends.
    pub(super) fn clear_stack_back_to(&mut self, names: &[&str]) {
        while let Some(node) = self.current_node() {
            if node.is_html_one_of(names) || node.is_html("html") {
                break;
            }
            let _ = self.open_elements.pop();
        }
    }

    /// "clear the stack back to a table context"
    pub(super) fn clear_stack_back_to_table_context(&mut self) {
        self.clear_stack_back_to(&["table", "template"]);
    }

    /// "clear the stack back to a table body context"
    pub(super) fn clear_stack_back_to_table_body_context(&mut self) {
        self.clear_stack_back_to(&["tbody", "tfoot", "thead", "template"]);
    }

    /// "clear the stack back to a table row context"
    pub(super) fn clear_stack_back_to_table_row_context(&mut self) {
        self.clear_stack_back_to(&["tr", "template"]);
    }

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#close-a-p-element)
    ///
    /// "Generate implied end tags, except for p elements. If the current node
    /// is not a p element, then this is a parse error. Pop elements from the
    /// stack of open elements until a p element has been popped from the
    /// stack."
    pub(super) fn close_p_element(&mut self) {
        self.generate_implied_end_tags(Some("p"));
        if !self.current_node_is("p") {
            self.parse_error("end tag p implied with open elements");
        }
        self.pop_until("p");
    }

    /// Close a `<p>` if one is in button scope.
    pub(super) fn close_p_element_in_button_scope(&mut self) {
        if self.in_scope("p", Scope::Button) {
            self.close_p_element();
        }
    }

    /// [§ 13.2.6.4.15](https://html.spec.whatwg.org/multipage/parsing.html#close-the-cell)
    pub(super) fn close_cell(&mut self) {
        // "Generate implied end tags."
        self.generate_implied_end_tags(None);
        // "If the current node is not now a td element or a th element, then
        // this is a parse error."
        if !self.current_node_is_one_of(&["td", "th"]) {
            self.parse_error("cell closed with open elements");
        }
        // "Pop elements from the stack of open elements stack until a td
        // element or a th element has been popped from the stack."
        self.pop_until_one_of(&["td", "th"]);
        // "Clear the list of active formatting elements up to the last marker."
        self.clear_active_formatting_to_last_marker();
        // "Switch the insertion mode to "in row"."
        self.mode = InsertionMode::InRow;
    }

    /// [§ 13.2.4.1 Reset the insertion mode appropriately](https://html.spec.whatwg.org/multipage/parsing.html#reset-the-insertion-mode-appropriately)
    pub(super) fn reset_insertion_mode(&mut self) {
        self.mode = self.appropriate_insertion_mode();
    }

    fn appropriate_insertion_mode(&self) -> InsertionMode {
        // STEP 1: "Let last be false."
        // STEP 2: "Let node be the last node in the stack of open elements."
        for index in (0..self.open_elements.len()).rev() {
            // STEP 3: "Loop: If node is the first node in the stack of open
            // elements, then set last to true, and, if the parser was created
            // as part of the HTML fragment parsing algorithm (fragment case),
            // set node to the context element passed to that algorithm."
            let last = index == 0;
            let node = match &self.context_element {
                Some(context) if last => context,
                _ => &self.open_elements[index],
            };
            if node.ns != Namespace::Html {
                if last {
                    return InsertionMode::InBody;
                }
                continue;
            }

            match node.local.as_str() {
                // STEP 4: "If node is a select element"
                "select" => {
                    if !last {
                        for ancestor in self.open_elements[..index].iter().rev() {
                            if ancestor.is_html("template") {
                                break;
                            }
                            if ancestor.is_html("table") {
                                return InsertionMode::InSelectInTable;
                            }
                        }
                    }
                    return InsertionMode::InSelect;
                }
                // STEP 5: "If node is a td or th element and last is false"
                "td" | "th" if !last => return InsertionMode::InCell,
                "tr" => return InsertionMode::InRow,
                "tbody" | "thead" | "tfoot" => return InsertionMode::InTableBody,
                "caption" => return InsertionMode::InCaption,
                "colgroup" => return InsertionMode::InColumnGroup,
                "table" => return InsertionMode::InTable,
                // STEP 11: "If node is a template element, then switch the
                // insertion mode to the current template insertion mode"
                "template" => {
                    return self
                        .template_modes
                        .last()
                        .copied()
                        .unwrap_or(InsertionMode::InTemplate);
                }
                "head" if !last => return InsertionMode::InHead,
                "body" => return InsertionMode::InBody,
                "frameset" => return InsertionMode::InFrameset,
                // STEP 15: "If node is an html element"
                "html" => {
                    return if self.head_element.is_none() {
                        InsertionMode::BeforeHead
                    } else {
                        InsertionMode::AfterHead
                    };
                }
                _ => {}
            }

            // STEP 16: "If last is true, then switch the insertion mode to
            // "in body" and return. (fragment case)"
            if last {
                return InsertionMode::InBody;
            }
        }
        InsertionMode::InBody
    }
}
