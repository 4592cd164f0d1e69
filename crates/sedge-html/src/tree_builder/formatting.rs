//! [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)

use sedge_dom::Namespace;

use super::TreeBuilder;
use crate::tokenizer::{Attributes, SourceSpan};
use crate::tree_handler::{ElementId, TreeHandler};

/// An entry in the list of active formatting elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FormattingEntry {
    /// "markers are inserted when entering applet, object, marquee, template,
    /// td, th, and caption elements"
    Marker,
    /// A formatting element. Its name and attributes stand in for "the token
    /// for which the element was created".
    Element(ElementId),
}

/// Attribute lists compare equal regardless of order.
fn same_attributes(a: &Attributes, b: &Attributes) -> bool {
    a.len() == b.len() && a.iter().all(|attr| b.get(&attr.name) == Some(attr.value.as_str()))
}

impl<H: TreeHandler> TreeBuilder<H> {
    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#push-onto-the-list-of-active-formatting-elements)
    ///
    /// "When the steps below require the UA to push onto the list of active
    /// formatting elements an element element"
    pub(super) fn push_active_formatting_element(&mut self, id: ElementId) {
        // STEP 1: "If there are already three elements in the list of active
        //          formatting elements after the last marker, if any, or
        //          anywhere in the list if there are no markers, that have the
        //          same tag name, namespace, and attributes as element, then
        //          remove the earliest such element from the list of active
        //          formatting elements."
        let element = self.element(id);
        let mut count = 0;
        let mut earliest = None;
        for (index, entry) in self.active_formatting_elements.iter().enumerate().rev() {
            let FormattingEntry::Element(other) = *entry else {
                break;
            };
            let other = self.element(other);
            if other.name == element.name
                && other.namespace == element.namespace
                && same_attributes(&other.attributes, &element.attributes)
            {
                count += 1;
                earliest = Some(index);
            }
        }
        if count >= 3
            && let Some(index) = earliest
        {
            let _ = self.active_formatting_elements.remove(index);
        }

        // STEP 2: "Add element to the list of active formatting elements."
        self.active_formatting_elements
            .push(FormattingEntry::Element(id));
    }

    pub(super) fn insert_marker(&mut self) {
        self.active_formatting_elements.push(FormattingEntry::Marker);
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#reconstruct-the-active-formatting-elements)
    ///
    /// "When the steps below require the UA to reconstruct the active
    /// formatting elements, the UA must perform the following steps:"
    pub(super) fn reconstruct_active_formatting_elements(&mut self) {
        // STEP 1: "If there are no entries in the list of active formatting
        //          elements, then there is nothing to reconstruct; stop this
        //          algorithm."
        // STEP 2: "If the last (most recently added) entry in the list of
        //          active formatting elements is a marker, or if it is an
        //          element that is in the stack of open elements, then there is
        //          nothing to reconstruct; stop this algorithm."
        match self.active_formatting_elements.last() {
            None | Some(FormattingEntry::Marker) => return,
            Some(FormattingEntry::Element(id)) if self.stack_contains(*id) => return,
            Some(FormattingEntry::Element(_)) => {}
        }

        // STEP 3: "Let entry be the last (most recently added) element in the
        //          list of active formatting elements."
        // STEP 4-6: "Rewind" while the entry before is neither a marker nor an
        //           element on the stack of open elements.
        let mut index = self.active_formatting_elements.len() - 1;
        while index > 0 {
            match self.active_formatting_elements[index - 1] {
                FormattingEntry::Marker => break,
                FormattingEntry::Element(id) if self.stack_contains(id) => break,
                FormattingEntry::Element(_) => index -= 1,
            }
        }

        // STEP 7-10: "Advance", "Create": insert a copy of each entry from
        //            here on and replace the entry with it.
        for index in index..self.active_formatting_elements.len() {
            let FormattingEntry::Element(old) = self.active_formatting_elements[index] else {
                continue;
            };
            let new = self.clone_formatting_element(old);
            let at = self.appropriate_place(None);
            self.report_insert(at, new, false, SourceSpan::empty_at(self.span.start));
            self.push_open_element(new);
            self.active_formatting_elements[index] = FormattingEntry::Element(new);
        }
    }

    /// A new element with the same name and attributes as `id`, standing in
    /// for "an element for the token for which the element was created".
    pub(super) fn clone_formatting_element(&mut self, id: ElementId) -> ElementId {
        let element = self.element(id);
        let name = element.name.clone();
        let attributes = element.attributes.clone();
        self.create_element(&name, Namespace::Html, attributes)
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-list-of-active-formatting-elements-up-to-the-last-marker)
    ///
    /// "1. Let entry be the last (most recently added) entry in the list of
    /// active formatting elements. 2. Remove entry from the list of active
    /// formatting elements. 3. If entry was a marker, then stop the algorithm
    /// at this point. 4. Go to step 1."
    pub(super) fn clear_active_formatting_elements_to_last_marker(&mut self) {
        while let Some(entry) = self.active_formatting_elements.pop() {
            if entry == FormattingEntry::Marker {
                break;
            }
        }
    }

    /// Position of `id` in the list of active formatting elements.
    pub(super) fn formatting_position(&self, id: ElementId) -> Option<usize> {
        self.active_formatting_elements
            .iter()
            .position(|&entry| entry == FormattingEntry::Element(id))
    }

    /// The last HTML element named `name` in the list, after the last marker.
    pub(super) fn formatting_element_after_last_marker(&self, name: &str) -> Option<ElementId> {
        for entry in self.active_formatting_elements.iter().rev() {
            match *entry {
                FormattingEntry::Marker => return None,
                FormattingEntry::Element(id) if self.element(id).is_html(name) => return Some(id),
                FormattingEntry::Element(_) => {}
            }
        }
        None
    }

    pub(super) fn remove_formatting_element(&mut self, id: ElementId) {
        if let Some(index) = self.formatting_position(id) {
            let _ = self.active_formatting_elements.remove(index);
        }
    }
}
