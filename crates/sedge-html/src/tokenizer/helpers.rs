//! Helper functions for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains utility functions used throughout the tokenizer:
//! - State transitions ("Switch to", "Reconsume in")
//! - Input handling ("Consume the next input character") and preprocessing
//! - Token emission ("Emit the current token") with source spans
//! - Attribute helpers for duplicate detection

use super::core::{HTMLTokenizer, TokenizerState};
use super::error::TokenizerError;
use super::sink::{SinkResult, TokenSink};
use super::token::{Attribute, SourceSpan, Token};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl<S: TokenSink> HTMLTokenizer<'_, S> {
    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "Switch to the X state"
    ///
    /// Transitions to a new state. The next character will be consumed on the
    /// next iteration of the main loop.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "Reconsume in the X state"
    ///
    /// Transitions to a new state without consuming the current character.
    /// The same character will be processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }

    /// "Switch to the return state", falling back to the data state if a
    /// character reference was entered without one.
    pub(super) fn take_return_state(&mut self) -> TokenizerState {
        self.return_state.take().unwrap_or(TokenizerState::Data)
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl<S: TokenSink> HTMLTokenizer<'_, S> {
    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "Consume the next input character"
    ///
    /// Returns None once the end of input is reached. Unless preprocessing is
    /// disabled, this also applies
    /// [§ 13.2.3.5 Preprocessing the input stream](https://html.spec.whatwg.org/multipage/parsing.html#preprocessing-the-input-stream):
    /// "normalize newlines" turns CR LF and lone CR into LF, and control and
    /// noncharacter code points are reported as parse errors.
    pub(super) fn consume(&mut self) -> Option<char> {
        self.current_char_start = self.current_pos;
        let c = self.input[self.current_pos..].chars().next()?;
        self.current_pos += c.len_utf8();

        if self.options.skip_preprocess {
            return Some(c);
        }
        if c == '\r' {
            if self.input.as_bytes().get(self.current_pos) == Some(&b'\n') {
                self.current_pos += 1;
            }
            return Some('\n');
        }
        if is_control(c) {
            self.log_parse_error(TokenizerError::ControlCharacterInInputStream);
        } else if is_noncharacter(u32::from(c)) {
            self.log_parse_error(TokenizerError::NoncharacterInInputStream);
        }
        Some(c)
    }

    /// "If the next few characters are..."
    ///
    /// Matches `target` starting at the current input character.
    pub(super) fn upcoming_is(&self, target: &str, case_insensitive: bool) -> bool {
        let Some(candidate) = self
            .input
            .get(self.current_char_start..self.current_char_start + target.len())
        else {
            return false;
        };
        if case_insensitive {
            candidate.eq_ignore_ascii_case(target)
        } else {
            candidate == target
        }
    }

    /// "Consume those characters"
    ///
    /// Caller must have already verified the characters with [`Self::upcoming_is`].
    pub(super) const fn consume_upcoming(&mut self, target: &str) {
        self.current_pos = self.current_char_start + target.len();
    }

    /// The next character after the current position, without consuming it.
    pub(super) fn peek(&self) -> Option<char> {
        self.input[self.current_pos..].chars().next()
    }

    /// [§ 12.1.4 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
    ///
    /// NOTE: HTML tokenizer uses a subset excluding CR (which is normalized earlier).
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        // "U+0009 CHARACTER TABULATION (tab)"
        // "U+000A LINE FEED (LF)"
        // "U+000C FORM FEED (FF)"
        // "U+0020 SPACE"
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C')
    }
}

/// [Infra § 4.6 Code points](https://infra.spec.whatwg.org/#control)
///
/// A control other than ASCII whitespace and NULL.
const fn is_control(c: char) -> bool {
    matches!(c, '\u{1}'..='\u{8}' | '\u{B}' | '\u{E}'..='\u{1F}' | '\u{7F}'..='\u{9F}')
}

/// [Infra § 4.6 Code points](https://infra.spec.whatwg.org/#noncharacter)
///
/// "A noncharacter is a code point that is in the range U+FDD0 to U+FDEF,
/// inclusive, or U+FFFE, U+FFFF, U+1FFFE, U+1FFFF, ... U+10FFFE, or U+10FFFF."
pub(super) const fn is_noncharacter(cp: u32) -> bool {
    matches!(cp, 0xFDD0..=0xFDEF) || ((cp & 0xFFFE) == 0xFFFE && cp <= 0x10_FFFF)
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl<S: TokenSink> HTMLTokenizer<'_, S> {
    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "Emit the current token"
    ///
    /// Pending text is flushed first so that tokens reach the sink in input
    /// order. The token's span runs from its opening '<' to the current
    /// position.
    pub(super) fn emit_token(&mut self) {
        self.finish_attribute();
        let Some(token) = self.current_token.take() else {
            return;
        };
        self.flush_text(self.token_start);

        match &token {
            // "When an end tag token is emitted with attributes, that is an
            // end-tag-with-attributes parse error."
            Token::EndTag { .. } if self.current_tag_has_attributes => {
                self.log_parse_error(TokenizerError::EndTagWithAttributes);
            }
            Token::StartTag { name, .. } => {
                self.last_start_tag_name = Some(name.clone());
            }
            _ => {}
        }

        let span = SourceSpan::between(self.token_start, self.current_pos);
        self.last_emit_end = self.current_pos;
        self.dispatch(token, span);
    }

    /// "Emit the current input character as a character token."
    ///
    /// Characters are buffered and delivered as one run when the next
    /// non-character token is emitted.
    pub(super) fn emit_character_token(&mut self, c: char) {
        self.pending_text.push(c);
    }

    /// Emit each character of `s` as a character token.
    pub(super) fn emit_characters(&mut self, s: &str) {
        self.pending_text.push_str(s);
    }

    /// "Emit an end-of-file token."
    pub(super) fn emit_eof_token(&mut self) {
        let end = self.input.len();
        self.flush_text(end);
        self.dispatch(Token::EndOfFile, SourceSpan::empty_at(end));
        self.at_eof = true;
    }

    /// Deliver buffered characters as one text run ending at `end`.
    pub(super) fn flush_text(&mut self, end: usize) {
        if self.pending_text.is_empty() {
            return;
        }
        let data = std::mem::take(&mut self.pending_text);
        let span = SourceSpan::between(self.last_emit_end, end);
        self.last_emit_end = end;
        self.dispatch(Token::Character { data }, span);
    }

    fn dispatch(&mut self, token: Token, span: SourceSpan) {
        match self.sink.process_token(token, span) {
            SinkResult::Continue => {}
            SinkResult::SwitchTo {
                state,
                appropriate_end_tag,
            } => {
                self.state = state;
                if appropriate_end_tag.is_some() {
                    self.last_start_tag_name = appropriate_end_tag;
                }
            }
        }
    }

    /// Begin a new tag token, remembering where it started.
    pub(super) fn start_tag_token(&mut self, token: Token) {
        self.current_token = Some(token);
        self.current_attribute = None;
        self.current_tag_has_attributes = false;
    }

    /// Apply `f` to the current token, if any.
    pub(super) fn with_current_token(&mut self, f: impl FnOnce(&mut Token)) {
        if let Some(token) = self.current_token.as_mut() {
            f(token);
        }
    }

    pub(super) fn append_to_tag_name(&mut self, c: char) {
        self.with_current_token(|t| t.append_to_tag_name(c));
    }

    pub(super) fn append_to_comment(&mut self, c: char) {
        self.with_current_token(|t| t.append_to_comment(c));
    }

    pub(super) fn append_str_to_comment(&mut self, s: &str) {
        for c in s.chars() {
            self.append_to_comment(c);
        }
    }
}

// =============================================================================
// Raw Text Helpers
// =============================================================================

impl<S: TokenSink> HTMLTokenizer<'_, S> {
    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    /// [§ 13.2.5.14 RAWTEXT end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-name-state)
    /// [§ 13.2.5.17 Script data end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-end-tag-name-state)
    ///
    /// "An appropriate end tag token is an end tag token whose tag name matches
    /// the tag name of the last start tag to have been emitted from this
    /// tokenizer, if any. If no start tag has been emitted from this tokenizer,
    /// then no end tag token is appropriate."
    pub(super) fn is_appropriate_end_tag_token(&self) -> bool {
        if let (Some(last_start_tag), Some(Token::EndTag { name })) =
            (&self.last_start_tag_name, &self.current_token)
        {
            return name == last_start_tag;
        }
        false
    }

    /// "Anything else" of the four end tag name states:
    ///
    /// "Emit a U+003C LESS-THAN SIGN character token, a U+002F SOLIDUS character
    /// token, and a character token for each of the characters in the temporary
    /// buffer (in the order they were added to the buffer). Reconsume in the
    /// RCDATA state."
    pub(super) fn emit_end_tag_name_anything_else(&mut self, text_state: TokenizerState) {
        self.emit_characters("</");
        let buffer = std::mem::take(&mut self.temporary_buffer);
        self.emit_characters(&buffer);
        self.current_token = None;
        self.reconsume_in(text_state);
    }
}

// =============================================================================
// Attribute Helpers
// =============================================================================

impl<S: TokenSink> HTMLTokenizer<'_, S> {
    /// "Start a new attribute in the current tag token."
    pub(super) fn start_new_attribute(&mut self) {
        self.finish_attribute();
        self.current_attribute = Some(Attribute::new(String::new(), String::new()));
    }

    pub(super) fn append_to_attribute_name(&mut self, c: char) {
        if let Some(attr) = self.current_attribute.as_mut() {
            attr.name.push(c);
        }
    }

    pub(super) fn append_to_attribute_value(&mut self, c: char) {
        if let Some(attr) = self.current_attribute.as_mut() {
            attr.value.push(c);
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "When the user agent leaves the attribute name state (and before emitting
    /// the tag token, if appropriate), the complete attribute's name must be
    /// compared to the other attributes on the same token; if there is already
    /// an attribute on the token with the exact same name, then this is a
    /// duplicate-attribute parse error and the new attribute must be removed
    /// from the token."
    ///
    /// End tags never keep attributes; we only note that they had some.
    pub(super) fn finish_attribute(&mut self) {
        let Some(attr) = self.current_attribute.take() else {
            return;
        };
        let duplicate = match self.current_token.as_mut() {
            Some(Token::EndTag { .. }) => {
                self.current_tag_has_attributes = true;
                false
            }
            Some(token) => !token.add_attribute(attr),
            None => false,
        };
        if duplicate {
            self.log_parse_error(TokenizerError::DuplicateAttribute);
        }
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl<S: TokenSink> HTMLTokenizer<'_, S> {
    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Reports a parse error to the sink at the current input character.
    /// Parse errors in HTML are not fatal; the tokenizer recovers and continues.
    pub(super) fn log_parse_error(&mut self, code: TokenizerError) {
        if !self.options.ignore_errors {
            self.sink.parse_error(code, self.current_char_start);
        }
    }
}
