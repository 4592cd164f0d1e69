//! [§ 13.2.6.4.7 The adoption agency algorithm](https://html.spec.whatwg.org/multipage/parsing.html#adoption-agency-algorithm)
//!
//! Misnested formatting elements (`<b><p>x</b>y`) are repaired by closing the
//! formatting element, cloning it, and moving content under the clones. The
//! handler sees the repair as ordinary calls: end tags for the elements that
//! leave the stack, `insert_element` for the clones and for every element
//! that moves, and one `reparent_children` for the furthest block.

use super::TreeBuilder;
use super::elements::is_special;
use super::formatting::FormattingEntry;
use crate::tokenizer::SourceSpan;
use crate::tree_handler::{ElementId, TreeHandler};

/// "If outer loop counter is greater than or equal to 8, then return."
const OUTER_LOOP_LIMIT: usize = 8;

/// "If inner loop counter is greater than 3 and node is in the list of active
/// formatting elements, then remove node from the list"
const INNER_LOOP_LIMIT: usize = 3;

impl<H: TreeHandler> TreeBuilder<H> {
    /// "When the steps below require the UA to run the adoption agency
    /// algorithm for a token, the UA must perform the following steps:"
    pub(super) fn run_adoption_agency(&mut self, subject: &str) {
        // STEP 2: "If the current node is an HTML element whose tag name is
        //          subject, and the current node is not in the list of active
        //          formatting elements, then pop the current node off the stack
        //          of open elements and return."
        if let Some(current) = self.current_node()
            && self.element(current).is_html(subject)
            && self.formatting_position(current).is_none()
        {
            let _ = self.pop();
            return;
        }

        // STEP 3-6: the outer loop.
        for _ in 0..OUTER_LOOP_LIMIT {
            // STEP 7: "Let formatting element be the last element in the list of
            //          active formatting elements that: is between the end of the
            //          list and the last marker in the list, if any, or the start
            //          of the list otherwise, and has the tag name subject."
            // STEP 8: "If there is no such element, then return and instead act
            //          as described in the "any other end tag" entry above."
            let Some(formatting_element) = self.formatting_element_after_last_marker(subject)
            else {
                self.any_other_end_tag(subject);
                return;
            };

            // STEP 9: "If formatting element is not in the stack of open
            //          elements, then this is a parse error; remove the element
            //          from the list, and return."
            let Some(formatting_index) = self
                .stack_of_open_elements
                .iter()
                .position(|&id| id == formatting_element)
            else {
                self.parse_error(&format!("formatting element </{subject}> is not open"));
                self.remove_formatting_element(formatting_element);
                return;
            };

            // STEP 10: "If formatting element is in the stack of open elements,
            //           but the element is not in scope, then this is a parse
            //           error; return."
            if !self.has_element_in_scope(formatting_element) {
                self.parse_error(&format!("formatting element </{subject}> is not in scope"));
                return;
            }

            // STEP 11: "If formatting element is not the current node, this is a
            //           parse error. (But do not return.)"
            if self.current_node() != Some(formatting_element) {
                self.parse_error(&format!("misnested formatting element </{subject}>"));
            }

            // STEP 12: "Let furthest block be the topmost node in the stack of
            //           open elements that is lower in the stack than formatting
            //           element, and is an element in the special category."
            let furthest = self.stack_of_open_elements[formatting_index + 1..]
                .iter()
                .position(|&id| is_special(self.element(id)))
                .map(|offset| formatting_index + 1 + offset);

            // STEP 13: "If there is no furthest block, then the UA must first
            //           pop all the nodes from the bottom of the stack of open
            //           elements, from the current node up to and including
            //           formatting element, then remove formatting element from
            //           the list of active formatting elements, and finally
            //           return."
            let Some(furthest_index) = furthest else {
                self.pop_until_id(formatting_element);
                self.remove_formatting_element(formatting_element);
                return;
            };
            let furthest_block = self.stack_of_open_elements[furthest_index];

            // STEP 14: "Let common ancestor be the element immediately above
            //           formatting element in the stack of open elements."
            let common_ancestor = self.stack_of_open_elements[formatting_index - 1];

            // STEP 15: "Let a bookmark note the position of formatting element
            //           in the list of active formatting elements relative to
            //           the elements on either side of it in the list."
            let mut bookmark = self.formatting_position(formatting_element).unwrap_or(0);

            // STEP 16: "Let node and last node be furthest block."
            // The chain runs from furthest block up to last node; each entry
            // becomes the child of the next.
            let mut chain = vec![furthest_block];
            let mut node_index = furthest_index;

            // STEP 17-18: the inner loop.
            let mut inner_loop_counter = 0;
            loop {
                inner_loop_counter += 1;

                // "Let node be the element immediately above node in the stack
                // of open elements, or if node is no longer in the stack of open
                // elements (e.g. because it got removed by this algorithm), the
                // element that was immediately above node in the stack of open
                // elements before node was removed."
                node_index -= 1;
                let node = self.stack_of_open_elements[node_index];

                // "If node is formatting element, then break."
                if node == formatting_element {
                    break;
                }

                // "If inner loop counter is greater than 3 and node is in the
                // list of active formatting elements, then remove node from the
                // list of active formatting elements."
                let mut formatting_pos = self.formatting_position(node);
                if inner_loop_counter > INNER_LOOP_LIMIT
                    && let Some(pos) = formatting_pos
                {
                    let _ = self.active_formatting_elements.remove(pos);
                    if pos < bookmark {
                        bookmark -= 1;
                    }
                    formatting_pos = None;
                }

                // "If node is not in the list of active formatting elements,
                // then remove node from the stack of open elements and continue."
                let Some(pos) = formatting_pos else {
                    let _ = self.stack_of_open_elements.remove(node_index);
                    self.report_end_tag(node);
                    continue;
                };

                // "Create an element for the token for which the element node
                // was created, in the HTML namespace, with common ancestor as
                // the intended parent; replace the entry for node in the list of
                // active formatting elements with an entry for the new element,
                // replace the entry for node in the stack of open elements with
                // an entry for the new element, and let node be the new
                // element."
                let replacement = self.clone_formatting_element(node);
                self.active_formatting_elements[pos] = FormattingEntry::Element(replacement);
                self.stack_of_open_elements[node_index] = replacement;
                self.report_end_tag(node);

                // "If last node is furthest block, then move the aforementioned
                // bookmark to be immediately after the new node in the list of
                // active formatting elements."
                if chain.len() == 1 {
                    bookmark = pos + 1;
                }

                // "Append last node to node." "Set last node to node."
                chain.push(replacement);
            }

            // STEP 19: "Insert whatever last node ended up being in the
            //           previous step at the appropriate place for inserting a
            //           node, but using common ancestor as the override target."
            // Then every "append last node to node" from the inner loop, top
            // down, so each parent is in the tree before its child moves in.
            let at = self.appropriate_place(Some(common_ancestor));
            let moved = SourceSpan::empty_at(self.span.start);
            if let Some(&top) = chain.last() {
                self.report_insert(at, top, false, moved);
            }
            for pair in chain.windows(2).rev() {
                let (child, parent) = (pair[0], pair[1]);
                let at = self.under(parent);
                self.report_insert(at, child, false, moved);
            }

            // STEP 20: "Create an element for the token for which formatting
            //           element was created, in the HTML namespace, with furthest
            //           block as the intended parent."
            let new_element = self.clone_formatting_element(formatting_element);

            // STEP 21-22: "Take all of the child nodes of furthest block and
            //              append them to the element created in the last step."
            //              "Append that new element to furthest block."
            self.report_reparent(furthest_block, new_element);

            // STEP 23: "Remove formatting element from the list of active
            //           formatting elements, and insert the new element into the
            //           list of active formatting elements at the position of the
            //           aforementioned bookmark."
            if let Some(pos) = self.formatting_position(formatting_element) {
                let _ = self.active_formatting_elements.remove(pos);
                if pos < bookmark {
                    bookmark -= 1;
                }
            }
            let bookmark = bookmark.min(self.active_formatting_elements.len());
            self.active_formatting_elements
                .insert(bookmark, FormattingEntry::Element(new_element));

            // STEP 24: "Remove formatting element from the stack of open
            //           elements, and insert the new element into the stack of
            //           open elements immediately below the position of furthest
            //           block in that stack."
            self.remove_from_stack(formatting_element);
            if let Some(index) = self
                .stack_of_open_elements
                .iter()
                .position(|&id| id == furthest_block)
            {
                self.stack_of_open_elements.insert(index + 1, new_element);
            }

            // STEP 25: "Jump back to the step labeled outer loop."
        }
    }

    fn report_reparent(&mut self, element: ElementId, new_parent: ElementId) {
        let pos = self.span.start;
        let (element, new_parent) = (&self.elements[element.0], &self.elements[new_parent.0]);
        self.handler.reparent_children(element, new_parent, pos);
    }
}
