//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
//!
//! The seam between the tokenizer and the tree builder.

use crate::tokenizer::{SinkResult, SourceSpan, Token, TokenSink, TokenizerError};
use crate::tree_builder::TreeBuilder;
use crate::tree_handler::TreeHandler;

/// A [`TokenSink`] that feeds a [`TreeBuilder`].
///
/// Each token goes through the tree construction dispatcher with whatever
/// insertion mode is current at that moment. When the tree builder opens a
/// text-only element the dispatcher hands the state switch back to the
/// tokenizer, along with the end tag that closes it.
pub struct Dispatcher<H> {
    builder: TreeBuilder<H>,
}

impl<H: TreeHandler> Dispatcher<H> {
    /// Wrap a tree builder.
    #[must_use]
    pub const fn new(builder: TreeBuilder<H>) -> Self {
        Self { builder }
    }

    /// Borrow the tree builder.
    #[must_use]
    pub const fn builder(&self) -> &TreeBuilder<H> {
        &self.builder
    }

    /// Consume the dispatcher and return the tree builder.
    pub fn into_builder(self) -> TreeBuilder<H> {
        self.builder
    }

    /// Consume the dispatcher and return the tree handler.
    pub fn into_handler(self) -> H {
        self.builder.into_handler()
    }
}

impl<H: TreeHandler> TokenSink for Dispatcher<H> {
    fn process_token(&mut self, token: Token, span: SourceSpan) -> SinkResult {
        self.builder.process_token(token, span);
        match self.builder.take_tokenizer_switch() {
            Some((state, end_tag)) => SinkResult::SwitchTo {
                state,
                appropriate_end_tag: Some(end_tag),
            },
            None => SinkResult::Continue,
        }
    }

    fn parse_error(&mut self, error: TokenizerError, pos: usize) {
        self.builder.handler_mut().error(&error.to_string(), pos);
    }

    fn allows_cdata(&self) -> bool {
        self.builder.adjusted_current_node_is_foreign()
    }
}
