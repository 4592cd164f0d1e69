//! Streaming HTML tokenizer and tree builder.
//!
//! # Pipeline
//!
//! - **Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   pushes tokens with source spans into a [`TokenSink`].
//! - **Dispatcher** ([WHATWG § 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction))
//!   routes each token to the tree builder and hands lexer state switches
//!   back to the tokenizer.
//! - **Tree builder** runs the insertion modes, the adoption agency
//!   algorithm, foster parenting and foreign content, and reports the tree
//!   it builds as calls on a [`TreeHandler`].
//! - **Handlers**: [`DomBuilder`] materializes a `sedge_dom::DomTree`,
//!   [`Serializer`] writes markup, and the [`tracer`] decorators log every
//!   call.
//!
//! Malformed markup never fails a parse: every parse error is recovered
//! from and reported to the handler. Only inconsistent [`ParseOptions`]
//! are rejected, before any input is read.

/// The tokenizer-to-tree-builder seam.
pub mod dispatcher;
/// Arena DOM construction.
pub mod dom_builder;
/// Markup serialization.
pub mod serializer;
/// HTML tokenizer for converting input into tokens.
pub mod tokenizer;
/// Call logs for handlers and sinks.
pub mod tracer;
/// Tree construction.
pub mod tree_builder;
/// The tree handler contract.
pub mod tree_handler;

use sedge_common::error::OptionsError;
use sedge_dom::{DomTree, NodeId};

pub use dispatcher::Dispatcher;
pub use dom_builder::DomBuilder;
pub use serializer::Serializer;
pub use tokenizer::{
    Attribute, Attributes, HTMLTokenizer, SinkResult, SourceSpan, Token, TokenCollector,
    TokenSink, TokenizerOptions, TokenizerState,
};
pub use tracer::{TokenSinkTracer, TreeHandlerTracer};
pub use tree_builder::{InsertionMode, TreeBuilder, TreeBuilderOptions};
pub use tree_handler::{
    Element, ElementId, FragmentContext, Namespace, ParseIssue, Preposition, QuirksMode,
    TreeHandler,
};

/// Everything a parse can be configured with. The defaults parse a full
/// document conformantly with scripting enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Namespace of the fragment context element: `html`, `svg`, `math`, or
    /// a namespace URL. Defaults to HTML when only a name is given.
    pub fragment_namespace: Option<String>,
    /// Local name of the fragment context element. Setting it makes this a
    /// fragment parse.
    pub fragment_name: Option<String>,
    /// Start the tokenizer in this text state.
    pub initial_state: Option<TokenizerState>,
    /// The end tag that leaves `initial_state`.
    pub appropriate_end_tag: Option<String>,
    /// Pass U+0000 through untouched.
    pub ignore_nulls: bool,
    /// Treat '&' as an ordinary character.
    pub ignore_char_refs: bool,
    /// Report no parse errors.
    pub ignore_errors: bool,
    /// The input is already preprocessed.
    pub skip_preprocess: bool,
    /// [§ 13.2.4.5](https://html.spec.whatwg.org/multipage/parsing.html#scripting-flag)
    pub scripting: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            fragment_namespace: None,
            fragment_name: None,
            initial_state: None,
            appropriate_end_tag: None,
            ignore_nulls: false,
            ignore_char_refs: false,
            ignore_errors: false,
            skip_preprocess: false,
            scripting: true,
        }
    }
}

impl ParseOptions {
    /// Parse as a fragment of an HTML `name` element.
    #[must_use]
    pub fn fragment(name: &str) -> Self {
        Self {
            fragment_name: Some(name.to_string()),
            ..Self::default()
        }
    }

    /// Set the fragment context namespace.
    #[must_use]
    pub fn with_fragment_namespace(mut self, namespace: &str) -> Self {
        self.fragment_namespace = Some(namespace.to_string());
        self
    }

    /// Set the scripting flag.
    #[must_use]
    pub const fn with_scripting(mut self, scripting: bool) -> Self {
        self.scripting = scripting;
        self
    }

    /// Suppress parse error reporting.
    #[must_use]
    pub const fn with_ignore_errors(mut self) -> Self {
        self.ignore_errors = true;
        self
    }

    /// Check the options for consistency and resolve the fragment context.
    ///
    /// # Errors
    ///
    /// - [`OptionsError::MissingFragmentName`] if a namespace is given
    ///   without a name.
    /// - [`OptionsError::UnknownNamespace`] if the namespace is not HTML, SVG
    ///   or MathML.
    /// - [`OptionsError::UnsupportedInitialState`] if the initial state is not
    ///   a text state.
    pub fn validate(&self) -> Result<Option<FragmentContext>, OptionsError> {
        let context = match (&self.fragment_namespace, &self.fragment_name) {
            (Some(_), None) => return Err(OptionsError::MissingFragmentName),
            (None, None) => None,
            (namespace, Some(name)) => {
                let namespace = match namespace {
                    Some(namespace) => namespace
                        .parse::<Namespace>()
                        .map_err(|_| OptionsError::UnknownNamespace(namespace.clone()))?,
                    None => Namespace::Html,
                };
                let name = if namespace == Namespace::Html {
                    name.to_ascii_lowercase()
                } else {
                    name.clone()
                };
                Some(FragmentContext { name, namespace })
            }
        };
        self.tokenizer_options(context.as_ref()).validate()?;
        Ok(context)
    }

    /// The tokenizer half of the options. A fragment context that is a text
    /// element starts the tokenizer in that element's text state.
    #[must_use]
    pub fn tokenizer_options(&self, context: Option<&FragmentContext>) -> TokenizerOptions {
        let mut options = TokenizerOptions {
            skip_preprocess: self.skip_preprocess,
            ignore_char_refs: self.ignore_char_refs,
            ignore_nulls: self.ignore_nulls,
            ignore_errors: self.ignore_errors,
            initial_state: self.initial_state,
            appropriate_end_tag: self.appropriate_end_tag.clone(),
        };
        if options.initial_state.is_none()
            && let Some(context) = context
            && let Some(state) = fragment_tokenizer_state(context, self.scripting)
        {
            options = options.with_initial_state(state, Some(&context.name));
        }
        options
    }

    /// The tree builder half of the options.
    #[must_use]
    pub fn tree_builder_options(&self) -> TreeBuilderOptions {
        let options = TreeBuilderOptions::default().with_scripting(self.scripting);
        if self.ignore_errors {
            options.with_ignore_errors()
        } else {
            options
        }
    }
}

/// [§ 13.4 Parsing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#parsing-html-fragments)
///
/// "Set the state of the HTML parser's tokenization stage as follows,
/// switching on the context element"
fn fragment_tokenizer_state(context: &FragmentContext, scripting: bool) -> Option<TokenizerState> {
    if context.namespace != Namespace::Html {
        return None;
    }
    match context.name.as_str() {
        "title" | "textarea" => Some(TokenizerState::RCDATA),
        "style" | "xmp" | "iframe" | "noembed" | "noframes" => Some(TokenizerState::RAWTEXT),
        "noscript" if scripting => Some(TokenizerState::RAWTEXT),
        "script" => Some(TokenizerState::ScriptData),
        "plaintext" => Some(TokenizerState::PLAINTEXT),
        _ => None,
    }
}

/// Parse `input` into `handler` and return the handler.
///
/// # Errors
///
/// Returns an error if `options` are inconsistent; see
/// [`ParseOptions::validate`]. Nothing is reported to the handler then.
pub fn parse_into<H: TreeHandler>(
    input: &str,
    handler: H,
    options: &ParseOptions,
) -> Result<H, OptionsError> {
    let context = options.validate()?;
    let builder_options = options.tree_builder_options();
    let builder = match &context {
        Some(context) => TreeBuilder::new_fragment(handler, builder_options, context),
        None => TreeBuilder::new(handler, builder_options),
    };
    let tokenizer_options = options.tokenizer_options(context.as_ref());
    let mut tokenizer = HTMLTokenizer::with_options(input, Dispatcher::new(builder), tokenizer_options)?;
    tokenizer.run();
    Ok(tokenizer.into_sink().into_handler())
}

/// Parse a complete document into a DOM tree, with its parse errors.
#[must_use]
pub fn parse_document(input: &str) -> (DomTree, Vec<ParseIssue>) {
    let builder = TreeBuilder::new(DomBuilder::new(), TreeBuilderOptions::default());
    let mut tokenizer = HTMLTokenizer::new(input, Dispatcher::new(builder));
    tokenizer.run();
    let (tree, _, issues) = tokenizer.into_sink().into_handler().into_parts();
    (tree, issues)
}

/// Parse `input` as the contents of `context`. The fragment's nodes are the
/// children of the returned root.
///
/// # Errors
///
/// Returns an error only if the derived tokenizer options are rejected,
/// which no HTML, SVG or MathML context produces.
pub fn parse_fragment(
    input: &str,
    context: &FragmentContext,
) -> Result<(DomTree, NodeId, Vec<ParseIssue>), OptionsError> {
    let options = ParseOptions {
        fragment_name: Some(context.name.clone()),
        fragment_namespace: Some(context.namespace.url().to_string()),
        ..ParseOptions::default()
    };
    Ok(parse_into(input, DomBuilder::new(), &options)?.into_parts())
}

/// Parse a document and serialize it straight back to markup.
#[must_use]
pub fn serialize_document(input: &str) -> String {
    let builder = TreeBuilder::new(Serializer::new(), TreeBuilderOptions::default());
    let mut tokenizer = HTMLTokenizer::new(input, Dispatcher::new(builder));
    tokenizer.run();
    let (markup, _) = tokenizer.into_sink().into_handler().finish();
    markup
}
