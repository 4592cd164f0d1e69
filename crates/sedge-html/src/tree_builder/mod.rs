//! HTML tree construction.
//!
//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
//!
//! The [`TreeBuilder`] owns the parser state (insertion modes, the stack of
//! open elements, the list of active formatting elements, the element
//! pointers) and reports every tree mutation to a [`TreeHandler`]. It never
//! stores nodes: elements are small records in an arena, named by
//! [`ElementId`].

mod adoption;
mod elements;
mod formatting;
mod insertion;
mod modes;
mod quirks;
mod stack;

/// SVG and MathML name adjustment tables and the foreign content rules.
pub mod foreign_content;

use strum_macros::{Display, EnumString};

use sedge_dom::{Namespace, QuirksMode};

pub use quirks::quirks_mode_for_doctype;

use self::formatting::FormattingEntry;
use crate::tokenizer::{Attributes, SourceSpan, Token, TokenizerState};
use crate::tree_handler::{Element, ElementId, FragmentContext, TreeHandler};

/// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
///
/// "The insertion mode is a state variable that controls the primary operation
/// of the tree construction stage."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "kebab-case")]
#[allow(missing_docs)]
pub enum InsertionMode {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    Initial,
    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    BeforeHtml,
    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    BeforeHead,
    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    InHead,
    /// [§ 13.2.6.4.5 The "in head noscript" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inheadnoscript)
    InHeadNoscript,
    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    AfterHead,
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    InBody,
    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    Text,
    /// [§ 13.2.6.4.9 The "in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intable)
    InTable,
    /// [§ 13.2.6.4.10 The "in table text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intabletext)
    InTableText,
    /// [§ 13.2.6.4.11 The "in caption" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incaption)
    InCaption,
    /// [§ 13.2.6.4.12 The "in column group" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incolgroup)
    InColumnGroup,
    /// [§ 13.2.6.4.13 The "in table body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intbody)
    InTableBody,
    /// [§ 13.2.6.4.14 The "in row" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intr)
    InRow,
    /// [§ 13.2.6.4.15 The "in cell" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intd)
    InCell,
    /// [§ 13.2.6.4.16 The "in select" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselect)
    InSelect,
    /// [§ 13.2.6.4.17 The "in select in table" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inselectintable)
    InSelectInTable,
    /// [§ 13.2.6.4.18 The "in template" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-intemplate)
    InTemplate,
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    AfterBody,
    /// [§ 13.2.6.4.20 The "in frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inframeset)
    InFrameset,
    /// [§ 13.2.6.4.21 The "after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterframeset)
    AfterFrameset,
    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    AfterAfterBody,
    /// [§ 13.2.6.4.23 The "after after frameset" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-frameset-insertion-mode)
    AfterAfterFrameset,
}

/// Tree builder configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeBuilderOptions {
    /// [§ 13.2.1 The scripting flag](https://html.spec.whatwg.org/multipage/parsing.html#scripting-flag)
    ///
    /// "The scripting flag is set to "enabled" if scripting was enabled for the
    /// Document with which the parser is associated when the parser was
    /// created, and "disabled" otherwise."
    ///
    /// Only affects `noscript` parsing. On by default.
    pub scripting: bool,
    /// Do not report tree construction errors to the handler.
    pub ignore_errors: bool,
}

impl Default for TreeBuilderOptions {
    fn default() -> Self {
        Self {
            scripting: true,
            ignore_errors: false,
        }
    }
}

impl TreeBuilderOptions {
    /// Set the scripting flag.
    #[must_use]
    pub const fn with_scripting(mut self, scripting: bool) -> Self {
        self.scripting = scripting;
        self
    }

    /// Suppress tree construction error reporting.
    #[must_use]
    pub const fn with_ignore_errors(mut self) -> Self {
        self.ignore_errors = true;
        self
    }
}

/// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
///
/// The tree construction state machine. Feed it tokens with
/// [`TreeBuilder::process_token`]; it reports the resulting tree to its handler.
pub struct TreeBuilder<H> {
    handler: H,
    options: TreeBuilderOptions,

    /// Every element created during the parse, indexed by `ElementId`.
    elements: Vec<Element>,

    /// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
    insertion_mode: InsertionMode,

    /// [§ 13.2.4.1](https://html.spec.whatwg.org/multipage/parsing.html#original-insertion-mode)
    ///
    /// "When the insertion mode is switched to "text" or "in table text", the
    /// original insertion mode is also set. This is the insertion mode to
    /// which the tree construction stage will return."
    original_insertion_mode: Option<InsertionMode>,

    /// [§ 13.2.4.1](https://html.spec.whatwg.org/multipage/parsing.html#stack-of-template-insertion-modes)
    ///
    /// "The stack of template insertion modes"
    template_insertion_modes: Vec<InsertionMode>,

    /// [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    stack_of_open_elements: Vec<ElementId>,

    /// [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
    active_formatting_elements: Vec<FormattingEntry>,

    /// [§ 13.2.4.4 The element pointers](https://html.spec.whatwg.org/multipage/parsing.html#head-element-pointer)
    head_element_pointer: Option<ElementId>,

    /// [§ 13.2.4.4 The element pointers](https://html.spec.whatwg.org/multipage/parsing.html#form-element-pointer)
    form_element_pointer: Option<ElementId>,

    /// [§ 13.4 Parsing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#concept-frag-parse-context)
    context_element: Option<ElementId>,

    /// The `html` element a fragment parse builds under. It is never reported
    /// to the handler; insertions into it are reported as `Preposition::Root`.
    fragment_root: Option<ElementId>,

    /// [§ 13.2.4.5 Other parsing state flags](https://html.spec.whatwg.org/multipage/parsing.html#frameset-ok-flag)
    frameset_ok: bool,

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#foster-parent)
    foster_parenting: bool,

    /// Set after `pre`, `listing` and `textarea` start tags: "If the next token
    /// is a U+000A LINE FEED (LF) character token, then ignore that token".
    skip_next_newline: bool,

    /// [§ 13.2.6.4.10](https://html.spec.whatwg.org/multipage/parsing.html#concept-pending-table-char-tokens)
    ///
    /// "The pending table character tokens list"
    pending_table_characters: Vec<(String, SourceSpan)>,

    quirks_mode: QuirksMode,

    /// Span of the token being processed.
    span: SourceSpan,

    /// Name of the end tag being processed, so the element it closes gets
    /// the end tag's span.
    closing_tag: Option<String>,

    /// [§ 13.2.5.40](https://html.spec.whatwg.org/multipage/parsing.html#acknowledge-self-closing-flag)
    self_closing_acknowledged: bool,

    /// A tokenizer state switch requested while processing the current token.
    tokenizer_switch: Option<(TokenizerState, String)>,

    stopped: bool,
}

impl<H: TreeHandler> TreeBuilder<H> {
    /// Create a tree builder for a full document and announce the document to
    /// the handler.
    pub fn new(handler: H, options: TreeBuilderOptions) -> Self {
        let mut builder = Self::blank(handler, options);
        builder.handler.start_document(None);
        builder
    }

    /// [§ 13.4 Parsing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments)
    ///
    /// Create a tree builder for the HTML fragment parsing algorithm with the
    /// given context element.
    pub fn new_fragment(handler: H, options: TreeBuilderOptions, context: &FragmentContext) -> Self {
        let mut builder = Self::blank(handler, options);
        builder.handler.start_document(Some(context));

        // STEP 4: "Let root be a new html element with no attributes."
        // STEP 5: "Append the element root to the Document node created above."
        // STEP 6: "Set up the parser's stack of open elements so that it
        //          contains just the single element root."
        let root = builder.create_element("html", Namespace::Html, Attributes::new());
        builder.fragment_root = Some(root);
        builder.stack_of_open_elements.push(root);

        let context_id =
            builder.create_element(&context.name, context.namespace, Attributes::new());
        builder.context_element = Some(context_id);

        // STEP 7: "If the context element is a template element, then push
        //          "in template" onto the stack of template insertion modes so
        //          that it is the new current template insertion mode."
        if context.namespace == Namespace::Html && context.name == "template" {
            builder.template_insertion_modes.push(InsertionMode::InTemplate);
        }

        // STEP 9: "Reset the parser's insertion mode appropriately."
        builder.reset_insertion_mode_appropriately();

        // STEP 10: "Set the parser's form element pointer to the nearest node to
        //           the context element that is a form element (going straight
        //           up the ancestor chain, and including the element itself, if
        //           it is a form element), if any."
        if context.namespace == Namespace::Html && context.name == "form" {
            builder.form_element_pointer = Some(context_id);
        }
        builder
    }

    fn blank(handler: H, options: TreeBuilderOptions) -> Self {
        Self {
            handler,
            options,
            elements: Vec::new(),
            insertion_mode: InsertionMode::Initial,
            original_insertion_mode: None,
            template_insertion_modes: Vec::new(),
            stack_of_open_elements: Vec::new(),
            active_formatting_elements: Vec::new(),
            head_element_pointer: None,
            form_element_pointer: None,
            context_element: None,
            fragment_root: None,
            frameset_ok: true,
            foster_parenting: false,
            skip_next_newline: false,
            pending_table_characters: Vec::new(),
            quirks_mode: QuirksMode::NoQuirks,
            span: SourceSpan::default(),
            closing_tag: None,
            self_closing_acknowledged: true,
            tokenizer_switch: None,
            stopped: false,
        }
    }

    /// Borrow the handler.
    pub const fn handler(&self) -> &H {
        &self.handler
    }

    /// Mutably borrow the handler.
    pub const fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Consume the builder and return its handler.
    pub fn into_handler(self) -> H {
        self.handler
    }

    /// The current insertion mode.
    #[must_use]
    pub const fn insertion_mode(&self) -> InsertionMode {
        self.insertion_mode
    }

    /// The document's quirks mode, as decided by the DOCTYPE.
    #[must_use]
    pub const fn quirks_mode(&self) -> QuirksMode {
        self.quirks_mode
    }

    /// True once the end-of-file token has been processed.
    #[must_use]
    pub const fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Depth of the stack of open elements.
    #[must_use]
    pub fn stack_depth(&self) -> usize {
        self.stack_of_open_elements.len()
    }

    /// The tokenizer state change requested by the last token, with the
    /// name of the element whose end tag leaves that state.
    pub fn take_tokenizer_switch(&mut self) -> Option<(TokenizerState, String)> {
        self.tokenizer_switch.take()
    }

    /// [§ 13.2.5.42](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// "If there is an adjusted current node and it is not an element in the
    /// HTML namespace"
    #[must_use]
    pub fn adjusted_current_node_is_foreign(&self) -> bool {
        self.adjusted_current_node()
            .is_some_and(|id| self.element(id).namespace != Namespace::Html)
    }

    /// Process one token from the tokenizer.
    pub fn process_token(&mut self, token: Token, span: SourceSpan) {
        if self.stopped {
            return;
        }
        self.span = span;
        self.closing_tag = match &token {
            Token::EndTag { name } => Some(name.clone()),
            _ => None,
        };

        let token = if self.skip_next_newline {
            self.skip_next_newline = false;
            self.strip_leading_newline(token)
        } else {
            Some(token)
        };
        let Some(token) = token else {
            return;
        };

        let self_closing = matches!(
            token,
            Token::StartTag {
                self_closing: true,
                ..
            }
        );
        self.self_closing_acknowledged = !self_closing;
        let name = match &token {
            Token::StartTag { name, .. } => Some(name.clone()),
            _ => None,
        };

        self.dispatch(token);

        // [§ 13.2.5.40](https://html.spec.whatwg.org/multipage/parsing.html#acknowledge-self-closing-flag)
        // "When a start tag token is emitted with its self-closing flag set, if
        // the flag is not acknowledged when it is processed by the tree
        // construction stage, that is a
        // non-void-html-element-start-tag-with-trailing-solidus parse error."
        if !self.self_closing_acknowledged
            && let Some(name) = name
        {
            self.parse_error(&format!(
                "non-void-html-element-start-tag-with-trailing-solidus: <{name}/>"
            ));
        }
    }

    /// Drop a leading LF from a character token. Returns `None` if nothing is
    /// left.
    fn strip_leading_newline(&mut self, token: Token) -> Option<Token> {
        let Token::Character { data } = token else {
            return Some(token);
        };
        let Some(rest) = data.strip_prefix('\n') else {
            return Some(Token::Character { data });
        };
        if rest.is_empty() {
            return None;
        }
        let (_, rest_span) = self.split_span(&data, 1);
        self.span = rest_span;
        Some(Token::Character {
            data: rest.to_string(),
        })
    }

    /// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction-dispatcher)
    ///
    /// "As each token is emitted from the tokenizer, the user agent must follow
    /// the appropriate steps from the following list, known as the tree
    /// construction dispatcher"
    fn dispatch(&mut self, token: Token) {
        if self.use_html_rules(&token) {
            self.process_using_rules(self.insertion_mode, token);
        } else {
            self.process_in_foreign_content(token);
        }
    }

    /// "Reprocess the token" goes back through the tree construction
    /// dispatcher with the current insertion mode.
    pub(super) fn reprocess_token(&mut self, token: Token) {
        self.dispatch(token);
    }

    /// The first entries of the tree construction dispatcher: cases where the
    /// token is processed "according to the rules given in the section
    /// corresponding to the current insertion mode in HTML content".
    fn use_html_rules(&self, token: &Token) -> bool {
        // "If the stack of open elements is empty"
        let Some(node) = self.adjusted_current_node() else {
            return true;
        };
        let node = self.element(node);
        // "If the adjusted current node is an element in the HTML namespace"
        if node.namespace == Namespace::Html {
            return true;
        }
        match token {
            // "If the adjusted current node is a MathML text integration point
            // and the token is a start tag whose tag name is neither "mglyph"
            // nor "malignmark""
            // "If the adjusted current node is a MathML annotation-xml element
            // and the token is a start tag whose tag name is "svg""
            // "If the adjusted current node is an HTML integration point and
            // the token is a start tag"
            Token::StartTag { name, .. } => {
                (node.is_mathml_text_integration_point()
                    && name != "mglyph"
                    && name != "malignmark")
                    || (node.is(Namespace::MathMl, "annotation-xml") && name == "svg")
                    || node.is_html_integration_point()
            }
            // "If the adjusted current node is a MathML text integration point
            // and the token is a character token"
            // "If the adjusted current node is an HTML integration point and
            // the token is a character token"
            Token::Character { .. } => {
                node.is_mathml_text_integration_point() || node.is_html_integration_point()
            }
            // "If the token is an end-of-file token"
            Token::EndOfFile => true,
            _ => false,
        }
    }

    /// Process `token` with the rules for `mode`, without going through the
    /// dispatcher. "Process the token using the rules for the X insertion mode".
    pub(super) fn process_using_rules(&mut self, mode: InsertionMode, token: Token) {
        match mode {
            InsertionMode::Initial => self.handle_initial_mode(token),
            InsertionMode::BeforeHtml => self.handle_before_html_mode(token),
            InsertionMode::BeforeHead => self.handle_before_head_mode(token),
            InsertionMode::InHead => self.handle_in_head_mode(token),
            InsertionMode::InHeadNoscript => self.handle_in_head_noscript_mode(token),
            InsertionMode::AfterHead => self.handle_after_head_mode(token),
            InsertionMode::InBody => self.handle_in_body_mode(token),
            InsertionMode::Text => self.handle_text_mode(token),
            InsertionMode::InTable => self.handle_in_table_mode(token),
            InsertionMode::InTableText => self.handle_in_table_text_mode(token),
            InsertionMode::InCaption => self.handle_in_caption_mode(token),
            InsertionMode::InColumnGroup => self.handle_in_column_group_mode(token),
            InsertionMode::InTableBody => self.handle_in_table_body_mode(token),
            InsertionMode::InRow => self.handle_in_row_mode(token),
            InsertionMode::InCell => self.handle_in_cell_mode(token),
            InsertionMode::InSelect => self.handle_in_select_mode(token),
            InsertionMode::InSelectInTable => self.handle_in_select_in_table_mode(token),
            InsertionMode::InTemplate => self.handle_in_template_mode(token),
            InsertionMode::AfterBody => self.handle_after_body_mode(token),
            InsertionMode::InFrameset => self.handle_in_frameset_mode(token),
            InsertionMode::AfterFrameset => self.handle_after_frameset_mode(token),
            InsertionMode::AfterAfterBody => self.handle_after_after_body_mode(token),
            InsertionMode::AfterAfterFrameset => self.handle_after_after_frameset_mode(token),
        }
    }

    pub(super) const fn switch_mode(&mut self, mode: InsertionMode) {
        self.insertion_mode = mode;
    }

    /// [§ 13.2.6.2 Parsing elements that contain only text](https://html.spec.whatwg.org/multipage/parsing.html#parsing-elements-that-contain-only-text)
    ///
    /// The generic raw text and RCDATA element parsing algorithms.
    pub(super) fn parse_text_element(&mut self, token: &Token, state: TokenizerState) {
        // STEP 1: "Insert an HTML element for the token."
        let _ = self.insert_html_element(token);
        // STEP 2: "If the algorithm that was invoked is the generic raw text
        //          element parsing algorithm, switch the tokenizer to the RAWTEXT
        //          state; otherwise the algorithm invoked was the generic RCDATA
        //          element parsing algorithm, switch the tokenizer to the RCDATA
        //          state."
        self.switch_tokenizer(token, state);
        // STEP 3: "Set the original insertion mode to the current insertion mode."
        self.original_insertion_mode = Some(self.insertion_mode);
        // STEP 4: "Then, switch the insertion mode to "text"."
        self.switch_mode(InsertionMode::Text);
    }

    /// Ask the tokenizer to continue in `state`, ended by the end tag for
    /// the start tag `token`.
    pub(super) fn switch_tokenizer(&mut self, token: &Token, state: TokenizerState) {
        if let Token::StartTag { name, .. } = token {
            self.tokenizer_switch = Some((state, name.clone()));
        }
    }

    /// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#stop-parsing)
    ///
    /// "Stop parsing": every remaining element is popped, then the document
    /// ends.
    pub(super) fn stop_parsing(&mut self) {
        // "Pop all the nodes off the stack of open elements."
        while self.pop().is_some() {}
        self.handler.end_document(self.span.start);
        self.stopped = true;
    }

    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Report a tree construction error at the current token.
    pub(super) fn parse_error(&mut self, message: &str) {
        if !self.options.ignore_errors {
            self.handler.error(message, self.span.start);
        }
    }

    pub(super) fn unexpected_token(&mut self, token: &Token) {
        let message = match token {
            Token::StartTag { name, .. } => {
                format!("unexpected start tag <{name}> in {}", self.insertion_mode)
            }
            Token::EndTag { name } => {
                format!("unexpected end tag </{name}> in {}", self.insertion_mode)
            }
            Token::Doctype { .. } => format!("unexpected DOCTYPE in {}", self.insertion_mode),
            Token::Character { .. } => {
                format!("unexpected characters in {}", self.insertion_mode)
            }
            Token::Comment { .. } => format!("unexpected comment in {}", self.insertion_mode),
            Token::EndOfFile => format!("unexpected end of file in {}", self.insertion_mode),
        };
        self.parse_error(&message);
    }

    /// The element record for `id`.
    pub(super) fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    /// [§ 13.2.6.1](https://html.spec.whatwg.org/multipage/parsing.html#create-an-element-for-the-token)
    ///
    /// "Create an element for a token": allocate an element record. Nothing
    /// is reported until the element is inserted.
    pub(super) fn create_element(
        &mut self,
        name: &str,
        namespace: Namespace,
        attributes: Attributes,
    ) -> ElementId {
        let id = ElementId(self.elements.len());
        let annotation_html = namespace == Namespace::MathMl
            && name == "annotation-xml"
            && attributes.get("encoding").is_some_and(|encoding| {
                encoding.eq_ignore_ascii_case("text/html")
                    || encoding.eq_ignore_ascii_case("application/xhtml+xml")
            });
        self.elements.push(Element {
            id,
            name: name.to_string(),
            namespace,
            attributes,
            annotation_html,
        });
        id
    }

    /// Split the current span at byte `at` of the token text `data`.
    ///
    /// Text and source only line up byte for byte when no character
    /// references or newline normalization happened in between; otherwise the
    /// first part gets an empty span and the second keeps the whole span.
    pub(super) fn split_span(&self, data: &str, at: usize) -> (SourceSpan, SourceSpan) {
        if self.span.len == data.len() {
            (
                self.span.slice(0, at),
                self.span.slice(at, data.len() - at),
            )
        } else {
            (SourceSpan::empty_at(self.span.start), self.span)
        }
    }
}

/// [§ 12.1.4 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
///
/// "ASCII whitespace is U+0009 TAB, U+000A LF, U+000C FF, U+000D CR,
/// or U+0020 SPACE."
pub(super) const fn is_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' ')
}

/// Byte length of the leading run of ASCII whitespace in `data`.
pub(super) fn leading_whitespace_len(data: &str) -> usize {
    data.len() - data.trim_start_matches(is_whitespace).len()
}
