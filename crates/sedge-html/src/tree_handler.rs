//! The output contract of tree construction.
//!
//! The tree builder never owns nodes. It describes the tree it would build as
//! a sequence of calls on a [`TreeHandler`], naming elements by their
//! [`ElementId`]. Handlers keep whatever representation they like: the
//! [`DomBuilder`](crate::dom_builder::DomBuilder) materializes an arena tree,
//! the [`Serializer`](crate::serializer::Serializer) produces markup text.

use core::fmt;

use serde::Serialize;

pub use sedge_dom::{Namespace, QuirksMode};

use crate::tokenizer::{Attributes, SourceSpan};

/// A dense handle naming an element for the lifetime of one parse.
///
/// Ids are allocated in creation order. Handlers typically use them as
/// indexes into their own node tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An element as the tree builder sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Handle for this element.
    pub id: ElementId,
    /// Local name, after SVG case adjustment.
    pub name: String,
    /// Element namespace.
    pub namespace: Namespace,
    /// Attributes, after foreign attribute adjustment.
    pub attributes: Attributes,
    /// Set on MathML `annotation-xml` elements whose `encoding` attribute makes
    /// them an HTML integration point.
    pub(crate) annotation_html: bool,
}

impl Element {
    /// True if this is an HTML element with the given local name.
    #[must_use]
    pub fn is_html(&self, name: &str) -> bool {
        self.namespace == Namespace::Html && self.name == name
    }

    /// True if this is an HTML element named one of `names`.
    #[must_use]
    pub fn is_html_one_of(&self, names: &[&str]) -> bool {
        self.namespace == Namespace::Html && names.contains(&self.name.as_str())
    }

    /// True if the element is in the given namespace with the given name.
    #[must_use]
    pub fn is(&self, namespace: Namespace, name: &str) -> bool {
        self.namespace == namespace && self.name == name
    }

    /// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#mathml-text-integration-point)
    ///
    /// "A node is a MathML text integration point if it is one of the following
    /// elements: A MathML mi element, A MathML mo element, A MathML mn element,
    /// A MathML ms element, A MathML mtext element"
    #[must_use]
    pub fn is_mathml_text_integration_point(&self) -> bool {
        self.namespace == Namespace::MathMl
            && matches!(self.name.as_str(), "mi" | "mo" | "mn" | "ms" | "mtext")
    }

    /// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#html-integration-point)
    ///
    /// "A node is an HTML integration point if it is one of the following
    /// elements: A MathML annotation-xml element whose start tag token had an
    /// attribute with the name "encoding" whose value was an ASCII
    /// case-insensitive match for the string "text/html"; [or]
    /// "application/xhtml+xml"; An SVG foreignObject element; An SVG desc
    /// element; An SVG title element"
    #[must_use]
    pub fn is_html_integration_point(&self) -> bool {
        match self.namespace {
            Namespace::MathMl => self.annotation_html,
            Namespace::Svg => matches!(self.name.as_str(), "foreignObject" | "desc" | "title"),
            Namespace::Html => false,
        }
    }

    /// True for the void elements of the HTML namespace.
    #[must_use]
    pub fn is_void(&self) -> bool {
        self.namespace == Namespace::Html && is_void_element(&self.name)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.namespace {
            Namespace::Html => write!(f, "<{}{}>", self.name, self.id),
            ns => write!(f, "<{ns} {}{}>", self.name, self.id),
        }
    }
}

/// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements: area, base, br, col, embed, hr, img, input, link, meta,
/// source, track, wbr"
///
/// The legacy `basefont`, `bgsound`, `frame`, `keygen` and `param` are parsed
/// and serialized the same way.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// True if `name` is an HTML void element.
#[must_use]
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

/// Where a node goes, relative to an element the handler already knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preposition {
    /// Insert as the previous sibling of this element (foster parenting).
    Before(ElementId),
    /// Append as the last child of this element. For a `template` element
    /// this means its template contents.
    Under(ElementId),
    /// Append to the document, or to the fragment root when parsing a
    /// fragment.
    Root,
}

impl fmt::Display for Preposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Before(id) => write!(f, "before {id}"),
            Self::Under(id) => write!(f, "under {id}"),
            Self::Root => write!(f, "root"),
        }
    }
}

/// [§ 13.4 Parsing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments)
///
/// The context element of a fragment parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentContext {
    /// Local name of the context element.
    pub name: String,
    /// Namespace of the context element.
    pub namespace: Namespace,
}

impl FragmentContext {
    /// An HTML context element.
    #[must_use]
    pub fn html(name: &str) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            namespace: Namespace::Html,
        }
    }
}

/// A parse error, as collected by the handlers in this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseIssue {
    /// The error code or description.
    pub message: String,
    /// Byte offset in the input.
    pub position: usize,
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.position)
    }
}

/// Receiver of tree mutations.
///
/// Every parse makes exactly one `start_document` call first and exactly one
/// `end_document` call last. In between:
///
/// - each non-void element gets one `insert_element` when it is created and
///   one `end_tag` when it leaves the stack of open elements;
/// - void elements get `insert_element` with `is_void` set and no `end_tag`;
/// - `insert_element` for an element that was inserted before moves it;
/// - `reparent_children` introduces one new element.
pub trait TreeHandler {
    /// Parsing begins. `fragment` is the context element for fragment parses.
    fn start_document(&mut self, fragment: Option<&FragmentContext>);

    /// Parsing is over; `pos` is the input length.
    fn end_document(&mut self, pos: usize);

    /// Insert text. Adjacent text at the same place should be merged.
    fn characters(&mut self, at: Preposition, text: &str, span: SourceSpan);

    /// Insert an element, or move it if it was inserted before.
    fn insert_element(&mut self, at: Preposition, element: &Element, is_void: bool, span: SourceSpan);

    /// The element was popped from the stack of open elements. `span` is the
    /// end tag that closed it, or empty when it was closed implicitly.
    fn end_tag(&mut self, element: &Element, span: SourceSpan);

    /// A DOCTYPE, and the document mode it selects.
    fn doctype(
        &mut self,
        name: &str,
        public_id: Option<&str>,
        system_id: Option<&str>,
        quirks: QuirksMode,
        span: SourceSpan,
    );

    /// Insert a comment.
    fn comment(&mut self, at: Preposition, text: &str, span: SourceSpan);

    /// A parse error. Parsing continues.
    fn error(&mut self, text: &str, pos: usize);

    /// Add the attributes in `attrs` that `element` doesn't have yet. Used for
    /// repeated `<html>` and `<body>` start tags.
    fn merge_attributes(&mut self, element: &Element, attrs: &Attributes, pos: usize);

    /// Detach `element` from its parent.
    fn remove_node(&mut self, element: &Element, pos: usize);

    /// Move every child of `element` into `new_parent`, then make
    /// `new_parent` the only child of `element`.
    ///
    /// `new_parent` has not been seen before: this call is its insertion, and
    /// it is open until its `end_tag`.
    fn reparent_children(&mut self, element: &Element, new_parent: &Element, pos: usize);
}
