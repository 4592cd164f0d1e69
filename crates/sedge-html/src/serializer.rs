//! [§ 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)
//!
//! Markup output, both as a [`TreeHandler`] that turns a parse straight back
//! into HTML and as a function over an existing [`DomTree`].

use core::fmt::Write;

use sedge_dom::{DomTree, Namespace, NodeId, NodeType};

use crate::dom_builder::DomBuilder;
use crate::tokenizer::{Attributes, SourceSpan};
use crate::tree_handler::{
    Element, FragmentContext, ParseIssue, Preposition, QuirksMode, TreeHandler, is_void_element,
};

/// Elements whose text children are written without escaping.
const RAW_TEXT_PARENTS: &[&str] = &[
    "style", "script", "xmp", "iframe", "noembed", "noframes", "plaintext",
];

/// A [`TreeHandler`] producing the serialization of the parsed tree.
///
/// Nodes can still move after their end tag (the adoption agency moves
/// content out of closed elements, and `head` is reopened for stray
/// metadata), so the tree is kept until `end_document` and written out then.
#[derive(Debug)]
pub struct Serializer {
    dom: DomBuilder,
    scripting: bool,
    output: Option<String>,
}

impl Serializer {
    /// A serializer with the scripting flag enabled, matching the parser's
    /// default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dom: DomBuilder::new(),
            scripting: true,
            output: None,
        }
    }

    /// Set the scripting flag, which decides whether `noscript` content is
    /// raw text.
    #[must_use]
    pub const fn with_scripting(mut self, scripting: bool) -> Self {
        self.scripting = scripting;
        self
    }

    /// The markup, once the document has ended.
    #[must_use]
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    /// Parse errors reported during the parse.
    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        self.dom.issues()
    }

    /// Consume the serializer, returning the markup (empty if the document
    /// never ended) and the parse errors.
    #[must_use]
    pub fn finish(self) -> (String, Vec<ParseIssue>) {
        let (_, _, issues) = self.dom.into_parts();
        (self.output.unwrap_or_default(), issues)
    }
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeHandler for Serializer {
    fn start_document(&mut self, fragment: Option<&FragmentContext>) {
        self.output = None;
        self.dom.start_document(fragment);
    }

    fn end_document(&mut self, pos: usize) {
        self.dom.end_document(pos);
        let mut out = String::new();
        write_children(self.dom.tree(), self.dom.root(), self.scripting, &mut out);
        self.output = Some(out);
    }

    fn characters(&mut self, at: Preposition, text: &str, span: SourceSpan) {
        self.dom.characters(at, text, span);
    }

    fn insert_element(&mut self, at: Preposition, element: &Element, is_void: bool, span: SourceSpan) {
        self.dom.insert_element(at, element, is_void, span);
    }

    fn end_tag(&mut self, element: &Element, span: SourceSpan) {
        self.dom.end_tag(element, span);
    }

    fn doctype(
        &mut self,
        name: &str,
        public_id: Option<&str>,
        system_id: Option<&str>,
        quirks: QuirksMode,
        span: SourceSpan,
    ) {
        self.dom.doctype(name, public_id, system_id, quirks, span);
    }

    fn comment(&mut self, at: Preposition, text: &str, span: SourceSpan) {
        self.dom.comment(at, text, span);
    }

    fn error(&mut self, text: &str, pos: usize) {
        self.dom.error(text, pos);
    }

    fn merge_attributes(&mut self, element: &Element, attrs: &Attributes, pos: usize) {
        self.dom.merge_attributes(element, attrs, pos);
    }

    fn remove_node(&mut self, element: &Element, pos: usize) {
        self.dom.remove_node(element, pos);
    }

    fn reparent_children(&mut self, element: &Element, new_parent: &Element, pos: usize) {
        self.dom.reparent_children(element, new_parent, pos);
    }
}

/// Serialize the children of `node` (the template contents, for a
/// `template`). With `scripting` on, `noscript` content is raw text.
#[must_use]
pub fn serialize_children(tree: &DomTree, node: NodeId, scripting: bool) -> String {
    let mut out = String::new();
    write_children(tree, node, scripting, &mut out);
    out
}

/// Serialize `node` itself and its subtree.
#[must_use]
pub fn serialize_node(tree: &DomTree, node: NodeId, scripting: bool) -> String {
    let mut out = String::new();
    write_node(tree, node, None, scripting, &mut out);
    out
}

/// "The algorithm takes as input a DOM Element, Document, or
/// DocumentFragment referred to as the node."
fn write_children(tree: &DomTree, node: NodeId, scripting: bool, out: &mut String) {
    // "If the node is a template element, then let the node instead be the
    // template element's template contents"
    let node = tree.template_contents(node).unwrap_or(node);
    let parent = tree.as_element(node).map(|e| (e.namespace, e.tag_name.as_str()));
    for &child in tree.children(node) {
        write_node(tree, child, parent, scripting, out);
    }
}

fn write_node(
    tree: &DomTree,
    node: NodeId,
    parent: Option<(Namespace, &str)>,
    scripting: bool,
    out: &mut String,
) {
    let Some(entry) = tree.get(node) else {
        return;
    };
    match &entry.node_type {
        NodeType::Element(data) => {
            // "If current node is an element in the HTML namespace, the MathML
            // namespace, or the SVG namespace, then let tagname be current
            // node's local name."
            let tag = data.tag_name.as_str();
            out.push('<');
            out.push_str(tag);
            for attr in &data.attrs {
                let _ = write!(out, " {}=\"", attr.name);
                escape_into(&attr.value, true, out);
                out.push('"');
            }
            out.push('>');

            // "If current node serializes as void, then continue on to the
            // next child node at this point."
            if data.namespace == Namespace::Html && is_void_element(tag) {
                return;
            }

            // "If current node is a pre, textarea, or listing element, and the
            // first child node of the element, if any, is a Text node whose
            // character data has as its first character a U+000A LINE FEED
            // (LF) character, then append a U+000A LINE FEED (LF) character."
            if data.namespace == Namespace::Html
                && matches!(tag, "pre" | "textarea" | "listing")
                && tree
                    .first_child(node)
                    .and_then(|child| tree.as_text(child))
                    .is_some_and(|text| text.starts_with('\n'))
            {
                out.push('\n');
            }

            write_children(tree, node, scripting, out);
            let _ = write!(out, "</{tag}>");
        }

        NodeType::Text(text) => {
            // "If the parent of current node is a style, script, xmp, iframe,
            // noembed, noframes, or plaintext element, or if the parent of
            // current node is a noscript element and scripting is enabled for
            // the node, then append the value of current node's data literally."
            let raw = parent.is_some_and(|(namespace, name)| {
                namespace == Namespace::Html
                    && (RAW_TEXT_PARENTS.contains(&name) || (scripting && name == "noscript"))
            });
            if raw {
                out.push_str(text);
            } else {
                escape_into(text, false, out);
            }
        }

        NodeType::Comment(text) => {
            let _ = write!(out, "<!--{text}-->");
        }

        NodeType::Doctype { name, .. } => {
            let _ = write!(out, "<!DOCTYPE {name}>");
        }

        NodeType::Document | NodeType::DocumentFragment => {
            write_children(tree, node, scripting, out);
        }
    }
}

/// [§ 13.3](https://html.spec.whatwg.org/multipage/parsing.html#escapingString)
///
/// "Escaping a string ... consists of running the following steps:
/// 1. Replace any occurrence of the "&" character by the string "&amp;".
/// 2. Replace any occurrences of the U+00A0 NO-BREAK SPACE character by the
/// string "&nbsp;". 3. If the algorithm was invoked in the attribute mode,
/// then replace any occurrences of the """ character by the string
/// "&quot;". 4. If the algorithm was not invoked in the attribute mode, then
/// replace any occurrences of the "<" character by the string "&lt;", and
/// any occurrences of the ">" character by the string "&gt;"."
fn escape_into(text: &str, attribute_mode: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{A0}' => out.push_str("&nbsp;"),
            '"' if attribute_mode => out.push_str("&quot;"),
            '<' if !attribute_mode => out.push_str("&lt;"),
            '>' if !attribute_mode => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}
