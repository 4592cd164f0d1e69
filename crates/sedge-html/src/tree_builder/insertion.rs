//! [§ 13.2.6.1 Creating and inserting nodes](https://html.spec.whatwg.org/multipage/parsing.html#creating-and-inserting-nodes)

use sedge_dom::Namespace;

use super::TreeBuilder;
use super::foreign_content::{adjust_mathml_attributes, adjust_svg_attributes};
use crate::tokenizer::{Attributes, SourceSpan, Token};
use crate::tree_handler::{ElementId, Preposition, TreeHandler, is_void_element};

impl<H: TreeHandler> TreeBuilder<H> {
    /// Where to insert "inside" `id`. Insertions into the fragment root are
    /// insertions at the root of the fragment.
    pub(super) fn under(&self, id: ElementId) -> Preposition {
        if Some(id) == self.fragment_root {
            Preposition::Root
        } else {
            Preposition::Under(id)
        }
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#appropriate-place-for-inserting-a-node)
    ///
    /// "The appropriate place for inserting a node, optionally using a
    /// particular override target"
    pub(super) fn appropriate_place(&self, override_target: Option<ElementId>) -> Preposition {
        // STEP 1: "If there was an override target specified, then let target
        //          be the override target. Otherwise, let target be the current
        //          node."
        let Some(target) = override_target.or_else(|| self.current_node()) else {
            return Preposition::Root;
        };

        // STEP 2: "Determine the adjusted insertion location using the first
        //          matching steps from the following list:"
        // "If foster parenting is enabled and target is a table, tbody, tfoot,
        // thead, or tr element"
        if self.foster_parenting
            && self
                .element(target)
                .is_html_one_of(&["table", "tbody", "tfoot", "thead", "tr"])
        {
            return self.foster_parent_place();
        }

        // STEP 3: "If the adjusted insertion location is inside a template
        //          element, let it instead be inside the template element's
        //          template contents". The handler resolves Under(template) to
        //          the contents.
        self.under(target)
    }

    /// The foster parenting branch of the appropriate place algorithm.
    fn foster_parent_place(&self) -> Preposition {
        let stack = &self.stack_of_open_elements;
        // "1. Let last template be the last template element in the stack of
        //  open elements, if any."
        let last_template = stack
            .iter()
            .rposition(|&id| self.element(id).is_html("template"));
        // "2. Let last table be the last table element in the stack of open
        //  elements, if any."
        let last_table = stack
            .iter()
            .rposition(|&id| self.element(id).is_html("table"));

        match (last_template, last_table) {
            // "3. If there is a last template and either there is no last
            //  table, or there is one, but last template is lower (more
            //  recently added) than last table in the stack of open elements,
            //  then: let adjusted insertion location be inside last template's
            //  template contents"
            (Some(template), None) => self.under(stack[template]),
            (Some(template), Some(table)) if template > table => self.under(stack[template]),
            // "4. If there is no last table, then let adjusted insertion
            //  location be inside the first element in the stack of open
            //  elements (the html element)"
            (None, None) => self.under(stack[0]),
            // "6. If last table has a parent node, then let adjusted insertion
            //  location be inside last table's parent node, immediately before
            //  last table". A table on the stack always has a parent.
            (_, Some(table)) => Preposition::Before(stack[table]),
        }
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#create-an-element-for-the-token)
    ///
    /// "Create an element for a token" in `namespace`, applying the
    /// attribute adjustments foreign elements need.
    pub(super) fn create_element_for_token(&mut self, token: &Token, namespace: Namespace) -> ElementId {
        let (name, mut attributes) = match token {
            Token::StartTag {
                name, attributes, ..
            } => (name.as_str(), attributes.clone()),
            _ => ("", Attributes::new()),
        };
        match namespace {
            Namespace::Html => {}
            Namespace::MathMl => adjust_mathml_attributes(&mut attributes),
            Namespace::Svg => adjust_svg_attributes(&mut attributes),
        }
        self.create_element(name, namespace, attributes)
    }

    /// Report `id` to the handler at `at`.
    pub(super) fn report_insert(&mut self, at: Preposition, id: ElementId, is_void: bool, span: SourceSpan) {
        let element = &self.elements[id.0];
        self.handler.insert_element(at, element, is_void, span);
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#insert-an-html-element)
    ///
    /// "Insert an HTML element for a token": create it, insert it at the
    /// appropriate place, and push it onto the stack of open elements.
    ///
    /// Void elements are reported as void and never pushed, so nothing needs
    /// to pop them again. Their self-closing flag is acknowledged.
    pub(super) fn insert_html_element(&mut self, token: &Token) -> ElementId {
        let id = self.create_element_for_token(token, Namespace::Html);
        let at = self.appropriate_place(None);
        let is_void = is_void_element(&self.element(id).name);
        self.report_insert(at, id, is_void, self.span);
        if is_void {
            self.acknowledge_self_closing();
        } else {
            self.push_open_element(id);
        }
        id
    }

    /// Insert an HTML element for a tag the parser invents, such as the
    /// implied `html`, `head`, `body` or `tbody`.
    pub(super) fn insert_implied_html_element(&mut self, name: &str) -> ElementId {
        let id = self.create_element(name, Namespace::Html, Attributes::new());
        let at = self.appropriate_place(None);
        self.report_insert(at, id, false, SourceSpan::empty_at(self.span.start));
        self.push_open_element(id);
        id
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-foreign-element)
    ///
    /// "Insert a foreign element" in `namespace`. The caller adjusts the tag
    /// name first.
    pub(super) fn insert_foreign_element(&mut self, token: &Token, namespace: Namespace) -> ElementId {
        let id = self.create_element_for_token(token, namespace);
        let at = self.appropriate_place(None);
        self.report_insert(at, id, false, self.span);
        self.push_open_element(id);
        id
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    ///
    /// "Insert a character", for a whole text run. The handler merges adjacent
    /// text. Text with nowhere to go (at the document level) is dropped.
    pub(super) fn insert_characters(&mut self, data: &str, span: SourceSpan) {
        if data.is_empty() {
            return;
        }
        let at = self.appropriate_place(None);
        if at == Preposition::Root && self.fragment_root.is_none() {
            return;
        }
        self.handler.characters(at, data, span);
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-comment)
    ///
    /// "Insert a comment", optionally at an explicit position.
    pub(super) fn insert_comment(&mut self, data: &str, at: Option<Preposition>) {
        let at = at.unwrap_or_else(|| self.appropriate_place(None));
        self.handler.comment(at, data, self.span);
    }

    /// [§ 13.2.5.40](https://html.spec.whatwg.org/multipage/parsing.html#acknowledge-self-closing-flag)
    ///
    /// "acknowledge the token's self-closing flag"
    pub(super) const fn acknowledge_self_closing(&mut self) {
        self.self_closing_acknowledged = true;
    }
}
