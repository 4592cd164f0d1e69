//! The receiving end of the tokenizer.

use super::core::TokenizerState;
use super::error::TokenizerError;
use super::token::{SourceSpan, Token};

/// What the sink wants the tokenizer to do after a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkResult {
    /// Carry on in the current state.
    Continue,
    /// [§ 13.2.6.2 Parsing elements that contain only text](https://html.spec.whatwg.org/multipage/parsing.html#parsing-elements-that-contain-only-text)
    ///
    /// "Switch the tokenizer to the RCDATA state" (or RAWTEXT, script data,
    /// PLAINTEXT). The end tag name, when given, becomes the appropriate end tag.
    SwitchTo {
        /// The state to continue in.
        state: TokenizerState,
        /// The tag name that will end the text, if any.
        appropriate_end_tag: Option<String>,
    },
}

/// Consumer of tokens.
///
/// The tokenizer pushes every token into its sink as soon as it is complete,
/// and consults the sink's answer before reading on.
pub trait TokenSink {
    /// Handle one token. `span` locates its markup in the original input.
    fn process_token(&mut self, token: Token, span: SourceSpan) -> SinkResult;

    /// A tokenization parse error at byte offset `pos`.
    fn parse_error(&mut self, error: TokenizerError, pos: usize);

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// "If there is an adjusted current node and it is not an element in the
    /// HTML namespace, then switch to the CDATA section state."
    fn allows_cdata(&self) -> bool {
        false
    }
}

/// A sink that records tokens, for inspection without a tree builder.
///
/// Without tree construction nobody tells the tokenizer when to leave the
/// data state, so the collector applies the usual switches itself: `title`
/// and `textarea` open RCDATA, `style`, `xmp`, `iframe`, `noembed` and
/// `noframes` open RAWTEXT, `script` opens script data and `plaintext`
/// opens PLAINTEXT.
#[derive(Debug, Default)]
pub struct TokenCollector {
    tokens: Vec<(Token, SourceSpan)>,
    errors: Vec<(TokenizerError, usize)>,
}

impl TokenCollector {
    /// An empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The tokens collected so far, with their spans.
    #[must_use]
    pub fn tokens(&self) -> &[(Token, SourceSpan)] {
        &self.tokens
    }

    /// The parse errors collected so far.
    #[must_use]
    pub fn errors(&self) -> &[(TokenizerError, usize)] {
        &self.errors
    }

    /// Consume the collector and return the bare tokens.
    #[must_use]
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens.into_iter().map(|(token, _)| token).collect()
    }
}

impl TokenSink for TokenCollector {
    fn process_token(&mut self, token: Token, span: SourceSpan) -> SinkResult {
        let switch = match &token {
            Token::StartTag { name, .. } => {
                let state = match name.as_str() {
                    "title" | "textarea" => Some(TokenizerState::RCDATA),
                    "style" | "xmp" | "iframe" | "noembed" | "noframes" => {
                        Some(TokenizerState::RAWTEXT)
                    }
                    "script" => Some(TokenizerState::ScriptData),
                    "plaintext" => Some(TokenizerState::PLAINTEXT),
                    _ => None,
                };
                state.map(|state| SinkResult::SwitchTo {
                    state,
                    appropriate_end_tag: Some(name.clone()),
                })
            }
            _ => None,
        };
        self.tokens.push((token, span));
        switch.unwrap_or(SinkResult::Continue)
    }

    fn parse_error(&mut self, error: TokenizerError, pos: usize) {
        self.errors.push((error, pos));
    }
}
