//! Call logs for the two seams of the pipeline.
//!
//! [`TreeHandlerTracer`] and [`TokenSinkTracer`] wrap a handler or sink,
//! write one line per call to a [`fmt::Write`] target, and forward the call
//! unchanged. With echo enabled every line is also printed to stderr, dimmed,
//! repeats included.

use core::fmt;

use owo_colors::OwoColorize;

use crate::tokenizer::{Attributes, SinkResult, SourceSpan, Token, TokenSink, TokenizerError};
use crate::tree_handler::{Element, FragmentContext, Preposition, QuirksMode, TreeHandler};

/// Writes one line to the log, and to stderr when echoing.
fn trace<W: fmt::Write>(log: &mut W, echo: bool, component: &str, line: fmt::Arguments<'_>) {
    let line = line.to_string();
    // A failing log target drops the line; the traced call still happens.
    let _ = writeln!(log, "{line}");
    if echo {
        eprintln!("{}", format!("[sedge {component}] {line}").dimmed());
    }
}

/// A [`TreeHandler`] decorator logging every call before forwarding it.
#[derive(Debug)]
pub struct TreeHandlerTracer<H, W = String> {
    inner: H,
    log: W,
    echo: bool,
}

impl<H: TreeHandler> TreeHandlerTracer<H> {
    /// Trace into a `String`.
    #[must_use]
    pub const fn new(inner: H) -> Self {
        Self::with_writer(inner, String::new())
    }
}

impl<H: TreeHandler, W: fmt::Write> TreeHandlerTracer<H, W> {
    /// Trace into `log`.
    #[must_use]
    pub const fn with_writer(inner: H, log: W) -> Self {
        Self {
            inner,
            log,
            echo: false,
        }
    }

    /// Also print every line to stderr.
    #[must_use]
    pub const fn with_echo(mut self) -> Self {
        self.echo = true;
        self
    }

    /// The wrapped handler.
    pub const fn inner(&self) -> &H {
        &self.inner
    }

    /// The log written so far.
    pub const fn log(&self) -> &W {
        &self.log
    }

    /// Consume the tracer, returning the handler and the log.
    pub fn into_parts(self) -> (H, W) {
        (self.inner, self.log)
    }

    fn line(&mut self, line: fmt::Arguments<'_>) {
        trace(&mut self.log, self.echo, "TreeHandler", line);
    }
}

impl<H: TreeHandler, W: fmt::Write> TreeHandler for TreeHandlerTracer<H, W> {
    fn start_document(&mut self, fragment: Option<&FragmentContext>) {
        match fragment {
            Some(context) => self.line(format_args!(
                "start_document fragment={} {}",
                context.namespace, context.name
            )),
            None => self.line(format_args!("start_document")),
        }
        self.inner.start_document(fragment);
    }

    fn end_document(&mut self, pos: usize) {
        self.line(format_args!("end_document @{pos}"));
        self.inner.end_document(pos);
    }

    fn characters(&mut self, at: Preposition, text: &str, span: SourceSpan) {
        self.line(format_args!("characters {at} {text:?} @{span}"));
        self.inner.characters(at, text, span);
    }

    fn insert_element(&mut self, at: Preposition, element: &Element, is_void: bool, span: SourceSpan) {
        let void = if is_void { " void" } else { "" };
        self.line(format_args!("insert_element {at} {element}{void} @{span}"));
        self.inner.insert_element(at, element, is_void, span);
    }

    fn end_tag(&mut self, element: &Element, span: SourceSpan) {
        self.line(format_args!("end_tag {element} @{span}"));
        self.inner.end_tag(element, span);
    }

    fn doctype(
        &mut self,
        name: &str,
        public_id: Option<&str>,
        system_id: Option<&str>,
        quirks: QuirksMode,
        span: SourceSpan,
    ) {
        self.line(format_args!(
            "doctype {name:?} public={public_id:?} system={system_id:?} {quirks} @{span}"
        ));
        self.inner.doctype(name, public_id, system_id, quirks, span);
    }

    fn comment(&mut self, at: Preposition, text: &str, span: SourceSpan) {
        self.line(format_args!("comment {at} {text:?} @{span}"));
        self.inner.comment(at, text, span);
    }

    fn error(&mut self, text: &str, pos: usize) {
        self.line(format_args!("error {text} @{pos}"));
        self.inner.error(text, pos);
    }

    fn merge_attributes(&mut self, element: &Element, attrs: &Attributes, pos: usize) {
        self.line(format_args!(
            "merge_attributes {element} ({} attributes) @{pos}",
            attrs.len()
        ));
        self.inner.merge_attributes(element, attrs, pos);
    }

    fn remove_node(&mut self, element: &Element, pos: usize) {
        self.line(format_args!("remove_node {element} @{pos}"));
        self.inner.remove_node(element, pos);
    }

    fn reparent_children(&mut self, element: &Element, new_parent: &Element, pos: usize) {
        self.line(format_args!("reparent_children {element} -> {new_parent} @{pos}"));
        self.inner.reparent_children(element, new_parent, pos);
    }
}

/// A [`TokenSink`] decorator logging every token and tokenizer error.
#[derive(Debug)]
pub struct TokenSinkTracer<S, W = String> {
    inner: S,
    log: W,
    echo: bool,
}

impl<S: TokenSink> TokenSinkTracer<S> {
    /// Trace into a `String`.
    #[must_use]
    pub const fn new(inner: S) -> Self {
        Self::with_writer(inner, String::new())
    }
}

impl<S: TokenSink, W: fmt::Write> TokenSinkTracer<S, W> {
    /// Trace into `log`.
    #[must_use]
    pub const fn with_writer(inner: S, log: W) -> Self {
        Self {
            inner,
            log,
            echo: false,
        }
    }

    /// Also print every line to stderr.
    #[must_use]
    pub const fn with_echo(mut self) -> Self {
        self.echo = true;
        self
    }

    /// The wrapped sink.
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// The log written so far.
    pub const fn log(&self) -> &W {
        &self.log
    }

    /// Consume the tracer, returning the sink and the log.
    pub fn into_parts(self) -> (S, W) {
        (self.inner, self.log)
    }
}

impl<S: TokenSink, W: fmt::Write> TokenSink for TokenSinkTracer<S, W> {
    fn process_token(&mut self, token: Token, span: SourceSpan) -> SinkResult {
        trace(&mut self.log, self.echo, "Tokenizer", format_args!("{token} @{span}"));
        let result = self.inner.process_token(token, span);
        if let SinkResult::SwitchTo {
            state,
            appropriate_end_tag,
        } = &result
        {
            let end_tag = appropriate_end_tag.as_deref().unwrap_or("");
            trace(
                &mut self.log,
                self.echo,
                "Tokenizer",
                format_args!("  switch to {state} until </{end_tag}>"),
            );
        }
        result
    }

    fn parse_error(&mut self, error: TokenizerError, pos: usize) {
        trace(&mut self.log, self.echo, "Tokenizer", format_args!("error {error} @{pos}"));
        self.inner.parse_error(error, pos);
    }

    fn allows_cdata(&self) -> bool {
        self.inner.allows_cdata()
    }
}
