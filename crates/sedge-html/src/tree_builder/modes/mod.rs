//! One handler per insertion mode.
//!
//! [§ 13.2.6.4 The rules for parsing tokens in HTML content](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhtml)

mod after;
mod body;
mod head;
mod initial;
mod select;
mod table;
mod template;

use super::{InsertionMode, TreeBuilder, is_whitespace, leading_whitespace_len};
use crate::tokenizer::{SourceSpan, Token};
use crate::tree_handler::TreeHandler;

impl<H: TreeHandler> TreeBuilder<H> {
    /// Split a text run into its leading whitespace and whatever follows.
    ///
    /// Many modes treat "a character token that is one of U+0009 CHARACTER
    /// TABULATION, U+000A LINE FEED (LF), U+000C FORM FEED (FF), U+000D
    /// CARRIAGE RETURN (CR), or U+0020 SPACE" differently from other
    /// characters. The remainder becomes the token being processed, with
    /// `self.span` narrowed to it.
    fn split_leading_whitespace(
        &mut self,
        token: Token,
    ) -> (Option<(String, SourceSpan)>, Option<Token>) {
        let Token::Character { mut data } = token else {
            return (None, Some(token));
        };
        let len = leading_whitespace_len(&data);
        if len == 0 {
            return (None, Some(Token::Character { data }));
        }
        if len == data.len() {
            return (Some((data, self.span)), None);
        }
        let (whitespace_span, rest_span) = self.split_span(&data, len);
        let rest = data.split_off(len);
        self.span = rest_span;
        (
            Some((data, whitespace_span)),
            Some(Token::Character { data: rest }),
        )
    }

    /// "Ignore the token" for leading whitespace.
    pub(super) fn skip_leading_whitespace(&mut self, token: Token) -> Option<Token> {
        self.split_leading_whitespace(token).1
    }

    /// "Insert the character" for leading whitespace.
    pub(super) fn insert_leading_whitespace(&mut self, token: Token) -> Option<Token> {
        let (whitespace, rest) = self.split_leading_whitespace(token);
        if let Some((text, span)) = whitespace {
            self.insert_characters(&text, span);
        }
        rest
    }

    /// For modes that keep whitespace characters and ignore every other
    /// character of a run: the whitespace that is left, if any. Dropped
    /// characters are one parse error for the run.
    pub(super) fn whitespace_only(&mut self, data: &str) -> Option<(String, SourceSpan)> {
        let whitespace: String = data.chars().filter(|&c| is_whitespace(c)).collect();
        if whitespace.len() == data.len() {
            return (!whitespace.is_empty()).then_some((whitespace, self.span));
        }
        self.parse_error(&format!("unexpected characters in {}", self.insertion_mode));
        if whitespace.is_empty() {
            return None;
        }
        Some((whitespace, SourceSpan::empty_at(self.span.start)))
    }

    /// Insert the whitespace of a run and drop everything else, as the
    /// frameset modes do.
    pub(super) fn insert_whitespace_only(&mut self, data: &str) {
        if let Some((whitespace, span)) = self.whitespace_only(data) {
            self.insert_characters(&whitespace, span);
        }
    }

    /// "Process the token using the rules for the "in body" insertion mode"
    /// for leading whitespace.
    pub(super) fn process_leading_whitespace_in_body(&mut self, token: Token) -> Option<Token> {
        let (whitespace, rest) = self.split_leading_whitespace(token);
        if let Some((data, span)) = whitespace {
            let rest_span = self.span;
            self.span = span;
            self.process_using_rules(InsertionMode::InBody, Token::Character { data });
            self.span = rest_span;
        }
        rest
    }
}
