//! The stack of open elements: popping, scopes, implied end tags and
//! resetting the insertion mode.

use sedge_dom::Namespace;

use super::elements::{IMPLIED_END_TAGS, Scope, THOROUGH_IMPLIED_END_TAGS};
use super::{InsertionMode, TreeBuilder};
use crate::tokenizer::SourceSpan;
use crate::tree_handler::{ElementId, TreeHandler};

impl<H: TreeHandler> TreeBuilder<H> {
    /// [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#current-node)
    ///
    /// "The current node is the bottommost node in this stack of open elements."
    pub(super) fn current_node(&self) -> Option<ElementId> {
        self.stack_of_open_elements.last().copied()
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#adjusted-current-node)
    ///
    /// "The adjusted current node is the context element if the parser was
    /// created as part of the HTML fragment parsing algorithm and the stack of
    /// open elements has only one element in it; otherwise, the adjusted
    /// current node is the current node."
    pub(super) fn adjusted_current_node(&self) -> Option<ElementId> {
        if self.stack_of_open_elements.len() == 1
            && let Some(context) = self.context_element
        {
            return Some(context);
        }
        self.current_node()
    }

    /// True if the current node is an HTML element named `name`.
    pub(super) fn current_node_is(&self, name: &str) -> bool {
        self.current_node()
            .is_some_and(|id| self.element(id).is_html(name))
    }

    /// True if the current node is an HTML element named one of `names`.
    pub(super) fn current_node_is_one_of(&self, names: &[&str]) -> bool {
        self.current_node()
            .is_some_and(|id| self.element(id).is_html_one_of(names))
    }

    pub(super) fn push_open_element(&mut self, id: ElementId) {
        self.stack_of_open_elements.push(id);
    }

    /// Pop the current node and tell the handler it is closed.
    ///
    /// The element closed by the end tag being processed gets that tag's
    /// span; every other element is closed implicitly, with an empty span.
    /// The fragment root is never reported.
    pub(super) fn pop(&mut self) -> Option<ElementId> {
        let id = self.stack_of_open_elements.pop()?;
        self.report_end_tag(id);
        Some(id)
    }

    pub(super) fn report_end_tag(&mut self, id: ElementId) {
        if Some(id) == self.fragment_root {
            return;
        }
        let element = &self.elements[id.0];
        let span = if self
            .closing_tag
            .as_deref()
            .is_some_and(|name| element.name.eq_ignore_ascii_case(name))
        {
            self.closing_tag = None;
            self.span
        } else {
            SourceSpan::empty_at(self.span.start)
        };
        self.handler.end_tag(element, span);
    }

    /// Remove `id` from wherever it is in the stack, closing it.
    pub(super) fn remove_from_stack(&mut self, id: ElementId) {
        if let Some(index) = self.stack_of_open_elements.iter().rposition(|&e| e == id) {
            let _ = self.stack_of_open_elements.remove(index);
            self.report_end_tag(id);
        }
    }

    pub(super) fn stack_contains(&self, id: ElementId) -> bool {
        self.stack_of_open_elements.contains(&id)
    }

    /// True if an HTML element named `name` is anywhere on the stack.
    pub(super) fn stack_has_html(&self, name: &str) -> bool {
        self.stack_of_open_elements
            .iter()
            .any(|&id| self.element(id).is_html(name))
    }

    /// "Pop elements from the stack of open elements until a `name` element
    /// has been popped from the stack."
    pub(super) fn pop_until(&mut self, name: &str) {
        self.pop_until_one_of(&[name]);
    }

    /// Pop until an HTML element named one of `names` has been popped.
    pub(super) fn pop_until_one_of(&mut self, names: &[&str]) {
        while let Some(id) = self.pop() {
            if self.element(id).is_html_one_of(names) {
                break;
            }
        }
    }

    /// Pop until `target` has been popped.
    pub(super) fn pop_until_id(&mut self, target: ElementId) {
        while let Some(id) = self.pop() {
            if id == target {
                break;
            }
        }
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope)
    ///
    /// "1. Initialize node to be the current node (the bottommost node of the
    /// stack). 2. If node is the target node, terminate in a match state.
    /// 3. Otherwise, if node is one of the element types in list, terminate in
    /// a failure state. 4. Otherwise, set node to the previous entry in the
    /// stack of open elements and return to step 2."
    fn has_in_specific_scope(&self, scope: Scope, is_target: impl Fn(ElementId) -> bool) -> bool {
        for &id in self.stack_of_open_elements.iter().rev() {
            if is_target(id) {
                return true;
            }
            if scope.is_boundary(self.element(id)) {
                return false;
            }
        }
        false
    }

    /// "has a `name` element in scope"
    pub(super) fn has_in_scope(&self, name: &str) -> bool {
        self.has_in_specific_scope(Scope::Default, |id| self.element(id).is_html(name))
    }

    /// "has an h1, h2, h3, h4, h5, or h6 element in scope" and similar.
    pub(super) fn has_one_of_in_scope(&self, names: &[&str]) -> bool {
        self.has_in_specific_scope(Scope::Default, |id| self.element(id).is_html_one_of(names))
    }

    /// "has `node` in scope", for a particular element rather than a name.
    pub(super) fn has_element_in_scope(&self, target: ElementId) -> bool {
        self.has_in_specific_scope(Scope::Default, |id| id == target)
    }

    pub(super) fn has_in_list_item_scope(&self, name: &str) -> bool {
        self.has_in_specific_scope(Scope::ListItem, |id| self.element(id).is_html(name))
    }

    pub(super) fn has_in_button_scope(&self, name: &str) -> bool {
        self.has_in_specific_scope(Scope::Button, |id| self.element(id).is_html(name))
    }

    pub(super) fn has_in_table_scope(&self, name: &str) -> bool {
        self.has_in_specific_scope(Scope::Table, |id| self.element(id).is_html(name))
    }

    pub(super) fn has_one_of_in_table_scope(&self, names: &[&str]) -> bool {
        self.has_in_specific_scope(Scope::Table, |id| self.element(id).is_html_one_of(names))
    }

    pub(super) fn has_in_select_scope(&self, name: &str) -> bool {
        self.has_in_specific_scope(Scope::Select, |id| self.element(id).is_html(name))
    }

    /// [§ 13.2.6.3 Closing elements that have implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
    ///
    /// "while the current node is a dd element, a dt element, an li element,
    /// an optgroup element, an option element, a p element, an rb element, an
    /// rp element, an rt element, or an rtc element, the user agent must pop
    /// the current node off the stack of open elements."
    pub(super) fn generate_implied_end_tags(&mut self) {
        self.generate_implied_end_tags_except(None);
    }

    /// "If a step requires the user agent to generate implied end tags but
    /// lists an element to exclude from the process, then the user agent must
    /// perform the above steps as if that element was not in the above list."
    pub(super) fn generate_implied_end_tags_except(&mut self, exclude: Option<&str>) {
        while let Some(id) = self.current_node() {
            let element = self.element(id);
            if element.is_html_one_of(IMPLIED_END_TAGS) && exclude != Some(element.name.as_str())
            {
                let _ = self.pop();
            } else {
                break;
            }
        }
    }

    /// "When the steps below require the UA to generate all implied end tags
    /// thoroughly"
    pub(super) fn generate_all_implied_end_tags_thoroughly(&mut self) {
        while let Some(id) = self.current_node() {
            let element = self.element(id);
            if element.is_html_one_of(IMPLIED_END_TAGS)
                || element.is_html_one_of(THOROUGH_IMPLIED_END_TAGS)
            {
                let _ = self.pop();
            } else {
                break;
            }
        }
    }

    /// [§ 13.2.6.4.9](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-context)
    ///
    /// "While the current node is not a table, template, or html element, pop
    /// elements from the stack of open elements."
    pub(super) fn clear_stack_back_to_table_context(&mut self) {
        self.clear_stack_back_to(&["table", "template", "html"]);
    }

    /// [§ 13.2.6.4.13](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-body-context)
    ///
    /// "While the current node is not a tbody, tfoot, thead, template, or html
    /// element, pop elements from the stack of open elements."
    pub(super) fn clear_stack_back_to_table_body_context(&mut self) {
        self.clear_stack_back_to(&["tbody", "tfoot", "thead", "template", "html"]);
    }

    /// [§ 13.2.6.4.14](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-row-context)
    ///
    /// "While the current node is not a tr, template, or html element, pop
    /// elements from the stack of open elements."
    pub(super) fn clear_stack_back_to_table_row_context(&mut self) {
        self.clear_stack_back_to(&["tr", "template", "html"]);
    }

    fn clear_stack_back_to(&mut self, names: &[&str]) {
        while let Some(id) = self.current_node() {
            if self.element(id).is_html_one_of(names) {
                break;
            }
            let _ = self.pop();
        }
    }

    /// [§ 13.2.6.4.7](https://html.spec.whatwg.org/multipage/parsing.html#close-a-p-element)
    ///
    /// "Generate implied end tags, except for p elements. If the current node
    /// is not a p element, then this is a parse error. Pop elements from the
    /// stack of open elements until a p element has been popped from the
    /// stack."
    pub(super) fn close_p_element(&mut self) {
        self.generate_implied_end_tags_except(Some("p"));
        if !self.current_node_is("p") {
            self.parse_error("unclosed elements before implied </p>");
        }
        self.pop_until("p");
    }

    /// Close a `p` element if one is in button scope.
    pub(super) fn close_p_if_in_button_scope(&mut self) {
        if self.has_in_button_scope("p") {
            self.close_p_element();
        }
    }

    /// [§ 13.2.6.4.15](https://html.spec.whatwg.org/multipage/parsing.html#close-the-cell)
    ///
    /// "Where the steps above say to close the cell, they mean to run the
    /// following algorithm:"
    pub(super) fn close_the_cell(&mut self) {
        // STEP 1: "Generate implied end tags."
        self.generate_implied_end_tags();
        // STEP 2: "If the current node is not now a td element or a th
        //          element, then this is a parse error."
        if !self.current_node_is_one_of(&["td", "th"]) {
            self.parse_error("unclosed elements in table cell");
        }
        // STEP 3: "Pop elements from the stack of open elements stack until a
        //          td element or a th element has been popped from the stack."
        self.pop_until_one_of(&["td", "th"]);
        // STEP 4: "Clear the list of active formatting elements up to the last
        //          marker."
        self.clear_active_formatting_elements_to_last_marker();
        // STEP 5: "Switch the insertion mode to "in row"."
        self.switch_mode(InsertionMode::InRow);
    }

    /// [§ 13.2.4.1 Reset the insertion mode appropriately](https://html.spec.whatwg.org/multipage/parsing.html#reset-the-insertion-mode-appropriately)
    pub(super) fn reset_insertion_mode_appropriately(&mut self) {
        self.insertion_mode = self.appropriate_insertion_mode();
    }

    fn appropriate_insertion_mode(&self) -> InsertionMode {
        let stack = &self.stack_of_open_elements;
        // STEP 1: "Let last be false."
        // STEP 2: "Let node be the last node in the stack of open elements."
        for (index, &id) in stack.iter().enumerate().rev() {
            // STEP 3: "Loop: If node is the first node in the stack of open
            //          elements, then set last to true, and, if the parser was
            //          created as part of the HTML fragment parsing algorithm
            //          (fragment case), set node to the context element passed
            //          to that algorithm."
            let last = index == 0;
            let node = match self.context_element {
                Some(context) if last => self.element(context),
                _ => self.element(id),
            };
            if node.namespace != Namespace::Html {
                if last {
                    return InsertionMode::InBody;
                }
                continue;
            }

            match node.name.as_str() {
                // STEP 4: "If node is a select element"
                "select" => {
                    if !last {
                        for &ancestor in stack[..index].iter().rev() {
                            let ancestor = self.element(ancestor);
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
                // STEP 5: "If node is a td or th element and last is false,
                //          then switch the insertion mode to "in cell""
                "td" | "th" if !last => return InsertionMode::InCell,
                // STEP 6
                "tr" => return InsertionMode::InRow,
                // STEP 7
                "tbody" | "thead" | "tfoot" => return InsertionMode::InTableBody,
                // STEP 8
                "caption" => return InsertionMode::InCaption,
                // STEP 9
                "colgroup" => return InsertionMode::InColumnGroup,
                // STEP 10
                "table" => return InsertionMode::InTable,
                // STEP 11: "If node is a template element, then switch the
                //           insertion mode to the current template insertion
                //           mode and return."
                "template" => {
                    return self
                        .template_insertion_modes
                        .last()
                        .copied()
                        .unwrap_or(InsertionMode::InTemplate);
                }
                // STEP 12
                "head" if !last => return InsertionMode::InHead,
                // STEP 13
                "body" => return InsertionMode::InBody,
                // STEP 14
                "frameset" => return InsertionMode::InFrameset,
                // STEP 15: "If node is an html element, run these substeps:"
                "html" => {
                    return if self.head_element_pointer.is_none() {
                        InsertionMode::BeforeHead
                    } else {
                        InsertionMode::AfterHead
                    };
                }
                _ => {}
            }
            // STEP 16: "If last is true, then switch the insertion mode to "in
            //           body" and return."
            if last {
                return InsertionMode::InBody;
            }
            // STEP 17: "Let node now be the node before node in the stack of
            //           open elements."
        }
        InsertionMode::InBody
    }
}
