//! A [`TreeHandler`] that materializes a [`DomTree`].

use sedge_dom::{DomTree, ElementData, NodeId, NodeType, QuirksMode};

use crate::tokenizer::{Attributes, SourceSpan};
use crate::tree_handler::{Element, ElementId, FragmentContext, ParseIssue, Preposition, TreeHandler};

/// Builds an arena DOM from tree builder calls.
///
/// Element ids map one-to-one onto DOM nodes. Insertions under a `template`
/// element land in its template contents. Parse errors are collected rather
/// than printed.
#[derive(Debug)]
pub struct DomBuilder {
    tree: DomTree,
    /// `ElementId` to `NodeId`, filled on first insertion.
    nodes: Vec<Option<NodeId>>,
    /// The Document, or the `html` element a fragment is parsed into.
    root: NodeId,
    issues: Vec<ParseIssue>,
}

impl DomBuilder {
    /// An empty builder, ready for `start_document`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: DomTree::new(),
            nodes: Vec::new(),
            root: NodeId::ROOT,
            issues: Vec::new(),
        }
    }

    /// The tree built so far.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Where the parse put its top-level nodes: the Document for a document
    /// parse, the fragment's `html` root for a fragment parse.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Parse errors reported so far.
    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// The DOM node created for `id`, once it has been inserted.
    #[must_use]
    pub fn node_for(&self, id: ElementId) -> Option<NodeId> {
        self.nodes.get(id.0).copied().flatten()
    }

    /// Consume the builder, returning the tree.
    #[must_use]
    pub fn into_tree(self) -> DomTree {
        self.tree
    }

    /// Consume the builder, returning the tree, its root and the parse
    /// errors.
    #[must_use]
    pub fn into_parts(self) -> (DomTree, NodeId, Vec<ParseIssue>) {
        (self.tree, self.root, self.issues)
    }

    /// The node for `element`, allocating it on first sight.
    fn node_or_alloc(&mut self, element: &Element) -> NodeId {
        if let Some(node) = self.node_for(element.id) {
            return node;
        }
        let node = self.tree.alloc_element(ElementData {
            tag_name: element.name.clone(),
            namespace: element.namespace,
            attrs: element.attributes.clone(),
            template_contents: None,
        });
        if self.nodes.len() <= element.id.0 {
            self.nodes.resize(element.id.0 + 1, None);
        }
        self.nodes[element.id.0] = Some(node);
        node
    }

    /// The node children are appended to when inserting "inside" `node`.
    fn container(&self, node: NodeId) -> NodeId {
        self.tree.template_contents(node).unwrap_or(node)
    }

    /// Resolve a position to a parent and an optional reference child.
    fn resolve(&self, at: Preposition) -> Option<(NodeId, Option<NodeId>)> {
        match at {
            Preposition::Root => Some((self.root, None)),
            Preposition::Under(id) => Some((self.container(self.node_for(id)?), None)),
            Preposition::Before(id) => {
                let reference = self.node_for(id)?;
                Some((self.tree.parent(reference)?, Some(reference)))
            }
        }
    }

    fn place(&mut self, at: Preposition, node: NodeId) {
        match self.resolve(at) {
            Some((parent, Some(reference))) => self.tree.insert_before(parent, node, reference),
            Some((parent, None)) => self.tree.append_child(parent, node),
            None => {}
        }
    }
}

impl Default for DomBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeHandler for DomBuilder {
    fn start_document(&mut self, fragment: Option<&FragmentContext>) {
        if fragment.is_some() {
            // [§ 13.4](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments)
            // "Let root be a new html element with no attributes. Append the
            // element root to the Document node created above."
            let root = self.tree.alloc_element(ElementData::html("html"));
            self.tree.append_child(NodeId::ROOT, root);
            self.root = root;
            self.tree.set_quirks_mode(QuirksMode::NoQuirks);
        } else {
            // A document without a DOCTYPE is in quirks mode; `doctype`
            // overrides this.
            self.tree.set_quirks_mode(QuirksMode::Quirks);
        }
    }

    fn end_document(&mut self, _pos: usize) {}

    fn characters(&mut self, at: Preposition, text: &str, _span: SourceSpan) {
        match self.resolve(at) {
            Some((parent, Some(reference))) => self.tree.insert_text_before(parent, text, reference),
            Some((parent, None)) => self.tree.append_text(parent, text),
            None => {}
        }
    }

    fn insert_element(&mut self, at: Preposition, element: &Element, _is_void: bool, _span: SourceSpan) {
        let node = self.node_or_alloc(element);
        self.place(at, node);
    }

    fn end_tag(&mut self, _element: &Element, _span: SourceSpan) {}

    fn doctype(
        &mut self,
        name: &str,
        public_id: Option<&str>,
        system_id: Option<&str>,
        quirks: QuirksMode,
        _span: SourceSpan,
    ) {
        let node = self.tree.alloc(NodeType::Doctype {
            name: name.to_string(),
            public_id: public_id.unwrap_or_default().to_string(),
            system_id: system_id.unwrap_or_default().to_string(),
        });
        self.tree.append_child(NodeId::ROOT, node);
        self.tree.set_quirks_mode(quirks);
    }

    fn comment(&mut self, at: Preposition, text: &str, _span: SourceSpan) {
        let node = self.tree.alloc(NodeType::Comment(text.to_string()));
        self.place(at, node);
    }

    fn error(&mut self, text: &str, pos: usize) {
        self.issues.push(ParseIssue {
            message: text.to_string(),
            position: pos,
        });
    }

    fn merge_attributes(&mut self, element: &Element, attrs: &Attributes, _pos: usize) {
        if let Some(node) = self.node_for(element.id)
            && let Some(data) = self.tree.as_element_mut(node)
        {
            let _ = data.attrs.merge_missing(attrs);
        }
    }

    fn remove_node(&mut self, element: &Element, _pos: usize) {
        if let Some(node) = self.node_for(element.id) {
            self.tree.detach(node);
        }
    }

    fn reparent_children(&mut self, element: &Element, new_parent: &Element, _pos: usize) {
        let Some(node) = self.node_for(element.id) else {
            return;
        };
        let container = self.container(node);
        let new_node = self.node_or_alloc(new_parent);
        self.tree.move_children(container, new_node);
        self.tree.append_child(container, new_node);
    }
}
