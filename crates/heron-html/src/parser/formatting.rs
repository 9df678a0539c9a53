//! The list of active formatting elements and the adoption agency algorithm.
//!
//! [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)

use super::core::TreeBuilder;
use super::sink::TreeSink;
use super::stack::{OpenElement, Scope};
use crate::tokenizer::Attribute;

/// An entry in the list of active formatting elements.
#[derive(Debug, Clone)]
pub(crate) enum FormattingEntry<H> {
    /// Inserted when entering applet, object, marquee, template, td, th
    /// and caption, so formatting doesn't leak into them.
    Marker,
    /// A formatting element and the start tag it was created from.
    Element {
        handle: H,
        name: String,
        attributes: Vec<Attribute>,
    },
}

impl<H: PartialEq> FormattingEntry<H> {
    fn is_handle(&self, target: &H) -> bool {
        matches!(self, Self::Element { handle, .. } if handle == target)
    }
}

/// What the caller of the adoption agency algorithm should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum AdoptionOutcome {
    Done,
    /// "act as described in the "any other end tag" entry"
    AnyOtherEndTag,
}

/// Where the new formatting element goes in the list at the end of an
/// adoption agency iteration.
#[derive(Debug, Clone)]
enum Bookmark<H> {
    /// Take the place of this entry.
    Replace(H),
    /// Go right after this entry.
    InsertAfter(H),
}

/// "Two elements have the same tag name, namespace, and attributes": same
/// attribute names and values, in any order.
fn same_attributes(a: &[Attribute], b: &[Attribute]) -> bool {
    a.len() == b.len() && a.iter().all(|attribute| b.contains(attribute))
}

impl<S: TreeSink> TreeBuilder<S> {
    /// Index of `handle` in the list of active formatting elements.
    pub(super) fn formatting_position(&self, handle: &S::Handle) -> Option<usize> {
        self.active_formatting
            .iter()
            .rposition(|entry| entry.is_handle(handle))
    }

    /// Remove `handle` from the list of active formatting elements.
    pub(super) fn remove_from_active_formatting(&mut self, handle: &S::Handle) {
        if let Some(index) = self.formatting_position(handle) {
            let _ = self.active_formatting.remove(index);
        }
    }

    /// The last element named `name` between the end of the list and the
    /// last marker.
    pub(super) fn formatting_element_after_last_marker(&self, name: &str) -> Option<(usize, S::Handle)> {
        for (index, entry) in self.active_formatting.iter().enumerate().rev() {
            match entry {
                FormattingEntry::Marker => return None,
                FormattingEntry::Element { handle, name: entry_name, .. } if entry_name == name => {
                    return Some((index, handle.clone()));
                }
                FormattingEntry::Element { .. } => {}
            }
        }
        None
    }

    /// Insert a marker at the end of the list.
    pub(super) fn push_formatting_marker(&mut self) {
        self.active_formatting.push(FormattingEntry::Marker);
    }

    /// [§ 13.2.4.3 Push onto the list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#push-onto-the-list-of-active-formatting-elements)
    pub(super) fn push_formatting_element(&mut self, handle: S::Handle, name: &str, attributes: &[Attribute]) {
        // STEP 1: "If there are already three elements in the list of active
        // formatting elements after the last marker, if any, or anywhere in the
        // list if there are no markers, that have the same tag name, namespace,
        // and attributes as element, then remove the earliest such element from
        // the list of active formatting elements." (Noah's Ark clause)
        let mut matching = 0;
        let mut earliest = None;
        for (index, entry) in self.active_formatting.iter().enumerate().rev() {
            match entry {
                FormattingEntry::Marker => break,
                FormattingEntry::Element {
                    name: entry_name,
                    attributes: entry_attributes,
                    ..
                } => {
                    if entry_name == name && same_attributes(entry_attributes, attributes) {
                        matching += 1;
                        earliest = Some(index);
                    }
                }
            }
        }
        if matching >= 3 {
            if let Some(index) = earliest {
                let _ = self.active_formatting.remove(index);
            }
        }

        // STEP 2: "Add element to the list of active formatting elements."
        self.active_formatting.push(FormattingEntry::Element {
            handle,
            name: name.to_string(),
            attributes: attributes.to_vec(),
        });
    }

    /// [§ 13.2.4.3 Clear the list of active formatting elements up to the last marker](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-list-of-active-formatting-elements-up-to-the-last-marker)
    pub(super) fn clear_active_formatting_to_last_marker(&mut self) {
        while let Some(entry) = self.active_formatting.pop() {
            if matches!(entry, FormattingEntry::Marker) {
                break;
            }
        }
    }

    fn is_marker_or_open(&self, entry: &FormattingEntry<S::Handle>) -> bool {
        match entry {
            FormattingEntry::Marker => true,
            FormattingEntry::Element { handle, .. } => self.stack_position(handle).is_some(),
        }
    }

    /// [§ 13.2.4.3 Reconstruct the active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#reconstruct-the-active-formatting-elements)
    pub(super) fn reconstruct_active_formatting_elements(&mut self) {
        // STEP 1: "If there are no entries in the list of active formatting
        // elements, then there is nothing to reconstruct; stop this algorithm."
        // STEP 2: "If the last (most recently added) entry in the list of
        // active formatting elements is a marker, or if it is an element that
        // is in the stack of open elements, then there is nothing to
        // reconstruct; stop this algorithm."
        let Some(last) = self.active_formatting.last() else {
            return;
        };
        if self.is_marker_or_open(last) {
            return;
        }

        // STEP 3-6: "Rewind: If there are no entries before entry in the list
        // of active formatting elements, then jump to the step labeled create.
        // Let entry be the entry one earlier than entry in the list of active
        // formatting elements. If entry is neither a marker nor an element that
        // is also in the stack of open elements, go to the step labeled rewind."
        let mut index = self.active_formatting.len() - 1;
        while index > 0 {
            index -= 1;
            if self.is_marker_or_open(&self.active_formatting[index]) {
                // STEP 7: "Advance: Let entry be the element one later than
                // entry in the list of active formatting elements."
                index += 1;
                break;
            }
        }

        // STEP 8-10: "Create: Insert an HTML element for the token for which
        // the element entry was created, to obtain new element. Replace the
        // entry for entry in the list with an entry for new element. If the
        // entry for new element in the list of active formatting elements is
        // not the last entry in the list, return to the step labeled advance."
        for position in index..self.active_formatting.len() {
            let FormattingEntry::Element { name, attributes, .. } = &self.active_formatting[position] else {
                continue;
            };
            let (name, attributes) = (name.clone(), attributes.clone());
            let handle = self.insert_html_element(&name, &attributes);
            self.active_formatting[position] = FormattingEntry::Element {
                handle,
                name,
                attributes,
            };
        }
    }

    /// [§ 13.2.6.4.7 Adoption agency algorithm](https://html.spec.whatwg.org/multipage/parsing.html#adoption-agency-algorithm)
    pub(super) fn adoption_agency(&mut self, subject: &str) -> AdoptionOutcome {
        // STEP 2: "If the current node is an HTML element whose tag name is
        // subject, and the current node is not in the list of active formatting
        // elements, then pop the current node off the stack of open elements
        // and return."
        if let Some(current) = self.current_node() {
            if current.is_html(subject) && self.formatting_position(&current.handle).is_none() {
                let _ = self.open_elements.pop();
                return AdoptionOutcome::Done;
            }
        }

        // STEP 3-6: "Let outer loop counter be 0. Outer loop: If outer loop
        // counter is greater than or equal to 8, then return. Increment outer
        // loop counter by 1."
        for _ in 0..8 {
            // STEP 7: "Let formatting element be the last element in the list
            // of active formatting elements that is between the end of the list
            // and the last marker in the list, if any, or the start of the list
            // otherwise, and has the tag name subject."
            // STEP 8: "If there is no such element, then return and instead act
            // as described in the "any other end tag" entry above."
            let Some((formatting_index, formatting_element)) = self.formatting_element_after_last_marker(subject)
            else {
                return AdoptionOutcome::AnyOtherEndTag;
            };

            // STEP 9: "If formatting element is not in the stack of open
            // elements, then this is a parse error; remove the element from the
            // list, and return."
            let Some(formatting_stack_index) = self.stack_position(&formatting_element) else {
                self.parse_error(&format!("formatting element <{subject}> is not open"));
                let _ = self.active_formatting.remove(formatting_index);
                return AdoptionOutcome::Done;
            };

            // STEP 10: "If formatting element is in the stack of open elements,
            // but the element is not in scope, then this is a parse error;
            // return."
            if !self.in_scope_where(Scope::Default, |element| element.handle == formatting_element) {
                self.parse_error(&format!("formatting element <{subject}> is not in scope"));
                return AdoptionOutcome::Done;
            }

            // STEP 11: "If formatting element is not the current node, this is a
            // parse error. (But do not return.)"
            if self.current_node().is_some_and(|node| node.handle != formatting_element) {
                self.parse_error(&format!("end tag </{subject}> closes other open elements"));
            }

            // STEP 12: "Let furthest block be the topmost node in the stack of
            // open elements that is lower in the stack than formatting element,
            // and is an element in the special category. There might not be
            // one."
            let furthest_block_index = (formatting_stack_index + 1..self.open_elements.len())
                .find(|&index| self.open_elements[index].is_special());

            // STEP 13: "If there is no furthest block, then the UA must first pop
            // all the nodes from the bottom of the stack of open elements, from
            // the current node up to and including formatting element, then
            // remove formatting element from the list of active formatting
            // elements, and finally return."
            let Some(furthest_block_index) = furthest_block_index else {
                self.open_elements.truncate(formatting_stack_index);
                let _ = self.active_formatting.remove(formatting_index);
                return AdoptionOutcome::Done;
            };
            let furthest_block = self.open_elements[furthest_block_index].handle.clone();

            // STEP 14: "Let common ancestor be the element immediately above
            // formatting element in the stack of open elements."
            let Some(common_ancestor) = formatting_stack_index
                .checked_sub(1)
                .map(|index| self.open_elements[index].clone())
            else {
                return AdoptionOutcome::Done;
            };

            // STEP 15: "Let a bookmark note the position of formatting element
            // in the list of active formatting elements relative to the elements
            // on either side of it in the list."
            let mut bookmark = Bookmark::Replace(formatting_element.clone());

            // STEP 16: "Let node and last node be furthest block."
            let mut node_index = furthest_block_index;
            let mut last_node = furthest_block.clone();

            // STEP 17: "Let inner loop counter be 0."
            let mut inner_loop_counter = 0;
            loop {
                // STEP 17.1: "Increment inner loop counter by 1."
                inner_loop_counter += 1;

                // STEP 17.2: "Let node be the element immediately above node in
                // the stack of open elements, or if node is no longer in the
                // stack of open elements (e.g. because it got removed by this
                // algorithm), the element that was immediately above node in the
                // stack of open elements before node was removed."
                node_index -= 1;
                let node = self.open_elements[node_index].handle.clone();

                // STEP 17.3: "If node is formatting element, then break."
                if node == formatting_element {
                    break;
                }

                // STEP 17.4: "If inner loop counter is greater than 3 and node is
                // in the list of active formatting elements, then remove node
                // from the list of active formatting elements."
                let mut node_formatting_index = self.formatting_position(&node);
                if inner_loop_counter > 3 {
                    if let Some(index) = node_formatting_index.take() {
                        let _ = self.active_formatting.remove(index);
                    }
                }

                // STEP 17.5: "If node is not in the list of active formatting
                // elements, then remove node from the stack of open elements and
                // continue."
                let Some(node_formatting_index) = node_formatting_index else {
                    let _ = self.open_elements.remove(node_index);
                    continue;
                };

                // STEP 17.6: "Create an element for the token for which the
                // element node was created, in the HTML namespace, with common
                // ancestor as the intended parent; replace the entry for node in
                // the list of active formatting elements with an entry for the
                // new element, replace the entry for node in the stack of open
                // elements with an entry for the new element, and let node be the
                // new element."
                let FormattingEntry::Element { name, attributes, .. } = &self.active_formatting[node_formatting_index]
                else {
                    break;
                };
                let (name, attributes) = (name.clone(), attributes.clone());
                let new_element = self.create_element_for(&name, &attributes, heron_dom::Namespace::Html);
                let new_handle = new_element.handle.clone();
                self.active_formatting[node_formatting_index] = FormattingEntry::Element {
                    handle: new_handle.clone(),
                    name,
                    attributes,
                };
                self.open_elements[node_index] = new_element;

                // STEP 17.7: "If last node is furthest block, then move the
                // aforementioned bookmark to be immediately after the new node in
                // the list of active formatting elements."
                if last_node == furthest_block {
                    bookmark = Bookmark::InsertAfter(new_handle.clone());
                }

                // STEP 17.8: "Append last node to node."
                self.sink.remove_from_parent(&last_node);
                self.sink.append_child(&new_handle, &last_node);

                // STEP 17.9: "Set last node to node."
                last_node = new_handle;
            }

            // STEP 18: "Insert whatever last node ended up being in the previous
            // step at the appropriate place for inserting a node, but using
            // common ancestor as the override target."
            self.sink.remove_from_parent(&last_node);
            if let Some(place) = self.appropriate_place(Some(&common_ancestor)) {
                self.insert_at(place, &last_node);
            }

            // STEP 19: "Create an element for the token for which formatting
            // element was created, in the HTML namespace, with furthest block as
            // the intended parent."
            let Some(FormattingEntry::Element { name, attributes, .. }) = self
                .formatting_position(&formatting_element)
                .map(|index| self.active_formatting[index].clone())
            else {
                return AdoptionOutcome::Done;
            };
            let new_element: OpenElement<S::Handle> =
                self.create_element_for(&name, &attributes, heron_dom::Namespace::Html);
            let new_handle = new_element.handle.clone();

            // STEP 20: "Take all of the child nodes of furthest block and append
            // them to the element created in the last step."
            self.sink.reparent_children(&furthest_block, &new_handle);

            // STEP 21: "Append that new element to furthest block."
            self.sink.append_child(&furthest_block, &new_handle);

            // STEP 22: "Remove formatting element from the list of active
            // formatting elements, and insert the new element into the list of
            // active formatting elements at the position of the aforementioned
            // bookmark."
            let new_entry = FormattingEntry::Element {
                handle: new_handle.clone(),
                name,
                attributes,
            };
            match bookmark {
                Bookmark::Replace(handle) => {
                    if let Some(index) = self.formatting_position(&handle) {
                        self.active_formatting[index] = new_entry;
                    }
                }
                Bookmark::InsertAfter(handle) => {
                    if let Some(index) = self.formatting_position(&handle) {
                        self.active_formatting.insert(index + 1, new_entry);
                    }
                    self.remove_from_active_formatting(&formatting_element);
                }
            }

            // STEP 23: "Remove formatting element from the stack of open
            // elements, and insert the new element into the stack of open
            // elements immediately below the position of furthest block in that
            // stack."
            self.remove_from_stack(&formatting_element);
            if let Some(index) = self.stack_position(&furthest_block) {
                self.open_elements.insert(index + 1, new_element);
            }
        }
        AdoptionOutcome::Done
    }
}
