//! Character reference states of the HTML tokenizer.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//! through [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state).

use super::core::{HTMLTokenizer, TokenizerState};
use super::error::TokenizerError;
use super::helpers::is_noncharacter;
use super::sink::TokenSink;

impl<S: TokenSink> HTMLTokenizer<'_, S> {
    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    pub(super) fn handle_character_reference_state(&mut self) {
        // "Set the temporary buffer to the empty string. Append a U+0026 AMPERSAND (&)
        // character to the temporary buffer."
        self.temporary_buffer.clear();
        self.temporary_buffer.push('&');
        match self.current_input_character {
            // "ASCII alphanumeric"
            // "Reconsume in the named character reference state."
            Some(c) if c.is_ascii_alphanumeric() => {
                self.reconsume_in(TokenizerState::NamedCharacterReference);
            }
            // "U+0023 NUMBER SIGN (#)"
            // "Append the current input character to the temporary buffer. Switch to the
            // numeric character reference state."
            Some('#') => {
                self.temporary_buffer.push('#');
                self.switch_to(TokenizerState::NumericCharacterReference);
            }
            // "Anything else"
            // "Flush code points consumed as a character reference. Reconsume in the
            // return state."
            _ => {
                self.flush_code_points_consumed_as_character_reference();
                let state = self.take_return_state();
                self.reconsume_in(state);
            }
        }
    }

    /// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
    ///
    /// "Consume the maximum number of characters possible, where the consumed
    /// characters are one of the identifiers in the first column of the named
    /// character references table. Append each character to the temporary
    /// buffer when it's consumed."
    pub(super) fn handle_named_character_reference_state(&mut self) {
        let rest = &self.input[self.current_char_start..];
        let Some((len, replacement)) = self.entities.longest_match(rest) else {
            // "Otherwise"
            // "Flush code points consumed as a character reference. Switch to the
            // ambiguous ampersand state."
            //
            // Nothing past the '&' was consumed, so the current character is
            // reconsumed there.
            self.flush_code_points_consumed_as_character_reference();
            self.reconsume_in(TokenizerState::AmbiguousAmpersand);
            return;
        };

        self.temporary_buffer.push_str(&rest[..len]);
        self.current_pos = self.current_char_start + len;
        let ends_with_semicolon = rest[..len].ends_with(';');

        // "If the character reference was consumed as part of an attribute, and the
        // last character matched is not a U+003B SEMICOLON character (;), and the
        // next input character is either a U+003D EQUALS SIGN character (=) or an
        // ASCII alphanumeric, then, for historical reasons, flush code points
        // consumed as a character reference and switch to the return state."
        let historical = self.is_consumed_as_part_of_attribute()
            && !ends_with_semicolon
            && self
                .peek()
                .is_some_and(|c| c == '=' || c.is_ascii_alphanumeric());

        if !historical {
            // "If the last character matched is not a U+003B SEMICOLON character (;),
            // then this is a missing-semicolon-after-character-reference parse error."
            if !ends_with_semicolon {
                self.log_parse_error(TokenizerError::MissingSemicolonAfterCharacterReference);
            }
            // "Set the temporary buffer to the empty string. Append one or two characters
            // corresponding to the character reference name (as given by the second
            // column of the named character references table) to the temporary buffer."
            self.temporary_buffer.clear();
            self.temporary_buffer.push_str(replacement);
        }
        self.flush_code_points_consumed_as_character_reference();
        let state = self.take_return_state();
        self.switch_to(state);
    }

    /// [§ 13.2.5.74 Ambiguous ampersand state](https://html.spec.whatwg.org/multipage/parsing.html#ambiguous-ampersand-state)
    pub(super) fn handle_ambiguous_ampersand_state(&mut self) {
        match self.current_input_character {
            // "ASCII alphanumeric"
            // "If the character reference was consumed as part of an attribute, then
            // append the current input character to the current attribute's value.
            // Otherwise, emit the current input character as a character token."
            Some(c) if c.is_ascii_alphanumeric() => {
                if self.is_consumed_as_part_of_attribute() {
                    self.append_to_attribute_value(c);
                } else {
                    self.emit_character_token(c);
                }
            }
            // "U+003B SEMICOLON (;)"
            // "This is an unknown-named-character-reference parse error. Reconsume in
            // the return state."
            Some(';') => {
                self.log_parse_error(TokenizerError::UnknownNamedCharacterReference);
                let state = self.take_return_state();
                self.reconsume_in(state);
            }
            _ => {
                let state = self.take_return_state();
                self.reconsume_in(state);
            }
        }
    }

    /// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    pub(super) fn handle_numeric_character_reference_state(&mut self) {
        // "Set the character reference code to zero (0)."
        self.character_reference_code = 0;
        match self.current_input_character {
            // "U+0078 LATIN SMALL LETTER X"
            // "U+0058 LATIN CAPITAL LETTER X"
            // "Append the current input character to the temporary buffer. Switch to the
            // hexadecimal character reference start state."
            Some(c @ ('x' | 'X')) => {
                self.temporary_buffer.push(c);
                self.switch_to(TokenizerState::HexadecimalCharacterReferenceStart);
            }
            // "Anything else"
            // "Reconsume in the decimal character reference start state."
            _ => self.reconsume_in(TokenizerState::DecimalCharacterReferenceStart),
        }
    }

    /// [§ 13.2.5.76 Hexadecimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-start-state)
    /// [§ 13.2.5.77 Decimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-start-state)
    pub(super) fn handle_numeric_character_reference_start_state(&mut self, radix: u32) {
        match self.current_input_character {
            // "ASCII hex digit"
            // "Reconsume in the hexadecimal character reference state."
            Some(c) if c.is_digit(radix) => self.reconsume_in(if radix == 16 {
                TokenizerState::HexadecimalCharacterReference
            } else {
                TokenizerState::DecimalCharacterReference
            }),
            // "Anything else"
            // "This is an absence-of-digits-in-numeric-character-reference parse error.
            // Flush code points consumed as a character reference. Reconsume in the
            // return state."
            _ => {
                self.log_parse_error(TokenizerError::AbsenceOfDigitsInNumericCharacterReference);
                self.flush_code_points_consumed_as_character_reference();
                let state = self.take_return_state();
                self.reconsume_in(state);
            }
        }
    }

    /// [§ 13.2.5.78 Hexadecimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-state)
    /// [§ 13.2.5.79 Decimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-state)
    pub(super) fn handle_numeric_character_reference_digits_state(&mut self, radix: u32) {
        match self.current_input_character {
            // "ASCII digit"
            // "Multiply the character reference code by 16. Add a numeric version of the
            // current input character (subtract 0x0030 from the character's code point)
            // to the character reference code."
            //
            // The code saturates; anything past U+10FFFF is out of range anyway.
            Some(c) if c.is_digit(radix) => {
                let digit = c.to_digit(radix).unwrap_or(0);
                self.character_reference_code = self
                    .character_reference_code
                    .saturating_mul(radix)
                    .saturating_add(digit);
            }
            // "U+003B SEMICOLON"
            // "Switch to the numeric character reference end state."
            Some(';') => self.switch_to(TokenizerState::NumericCharacterReferenceEnd),
            // "Anything else"
            // "This is a missing-semicolon-after-character-reference parse error.
            // Reconsume in the numeric character reference end state."
            _ => {
                self.log_parse_error(TokenizerError::MissingSemicolonAfterCharacterReference);
                self.reconsume_in(TokenizerState::NumericCharacterReferenceEnd);
            }
        }
    }

    /// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
    ///
    /// This state consumes nothing, so whatever character brought us here is
    /// handed back to the return state.
    pub(super) fn handle_numeric_character_reference_end_state(&mut self) {
        let mut code = self.character_reference_code;

        // "If the number is 0x00, then this is a null-character-reference parse error.
        // Set the character reference code to 0xFFFD."
        if code == 0 {
            self.log_parse_error(TokenizerError::NullCharacterReference);
            code = 0xFFFD;
        }
        // "If the number is greater than 0x10FFFF, then this is a
        // character-reference-outside-unicode-range parse error. Set the character
        // reference code to 0xFFFD."
        else if code > 0x10_FFFF {
            self.log_parse_error(TokenizerError::CharacterReferenceOutsideUnicodeRange);
            code = 0xFFFD;
        }
        // "If the number is a surrogate, then this is a surrogate-character-reference
        // parse error. Set the character reference code to 0xFFFD."
        else if (0xD800..=0xDFFF).contains(&code) {
            self.log_parse_error(TokenizerError::SurrogateCharacterReference);
            code = 0xFFFD;
        }
        // "If the number is a noncharacter, then this is a
        // noncharacter-character-reference parse error."
        else if is_noncharacter(code) {
            self.log_parse_error(TokenizerError::NoncharacterCharacterReference);
        }
        // "If the number is 0x0D, or a control that's not ASCII whitespace, then this
        // is a control-character-reference parse error. If the number is one of the
        // numbers in the first column of the following table, then find the row with
        // that number in the first column, and set the character reference code to
        // the number in the second column of that row."
        else if code == 0x0D || is_control_reference(code) {
            self.log_parse_error(TokenizerError::ControlCharacterReference);
            if let Some(replacement) = c1_replacement(code) {
                code = replacement;
            }
        }

        // "Set the temporary buffer to the empty string. Append a code point equal to
        // the character reference code to the temporary buffer. Flush code points
        // consumed as a character reference. Switch to the return state."
        self.temporary_buffer.clear();
        self.temporary_buffer
            .push(char::from_u32(code).unwrap_or('\u{FFFD}'));
        self.flush_code_points_consumed_as_character_reference();
        let state = self.take_return_state();
        self.reconsume_in(state);
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    ///
    /// "consumed as part of an attribute": the return state is one of the
    /// attribute value states.
    pub(super) const fn is_consumed_as_part_of_attribute(&self) -> bool {
        matches!(
            self.return_state,
            Some(
                TokenizerState::AttributeValueDoubleQuoted
                    | TokenizerState::AttributeValueSingleQuoted
                    | TokenizerState::AttributeValueUnquoted
            )
        )
    }

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#flush-code-points-consumed-as-a-character-reference)
    ///
    /// "When a state says to flush code points consumed as a character reference,
    /// it means that for each code point in the temporary buffer (in the order
    /// they were added to the buffer) user agent must append the code point from
    /// the buffer to the current attribute's value if the character reference was
    /// consumed as part of an attribute, or emit the code point as a character
    /// token otherwise."
    pub(super) fn flush_code_points_consumed_as_character_reference(&mut self) {
        let buffer = std::mem::take(&mut self.temporary_buffer);
        if self.is_consumed_as_part_of_attribute() {
            if let Some(attr) = self.current_attribute.as_mut() {
                attr.value.push_str(&buffer);
            }
        } else {
            self.emit_characters(&buffer);
        }
    }
}

/// A control code point other than ASCII whitespace, as a character
/// reference target. NULL is handled separately.
const fn is_control_reference(code: u32) -> bool {
    matches!(code, 0x01..=0x08 | 0x0B | 0x0E..=0x1F | 0x7F..=0x9F)
}

/// The replacement table for numeric references into the C1 control range.
const fn c1_replacement(code: u32) -> Option<u32> {
    let replacement = match code {
        0x80 => 0x20AC, // EURO SIGN (€)
        0x82 => 0x201A, // SINGLE LOW-9 QUOTATION MARK (‚)
        0x83 => 0x0192, // LATIN SMALL LETTER F WITH HOOK (ƒ)
        0x84 => 0x201E, // DOUBLE LOW-9 QUOTATION MARK („)
        0x85 => 0x2026, // HORIZONTAL ELLIPSIS (…)
        0x86 => 0x2020, // DAGGER (†)
        0x87 => 0x2021, // DOUBLE DAGGER (‡)
        0x88 => 0x02C6, // MODIFIER LETTER CIRCUMFLEX ACCENT (ˆ)
        0x89 => 0x2030, // PER MILLE SIGN (‰)
        0x8A => 0x0160, // LATIN CAPITAL LETTER S WITH CARON (Š)
        0x8B => 0x2039, // SINGLE LEFT-POINTING ANGLE QUOTATION MARK (‹)
        0x8C => 0x0152, // LATIN CAPITAL LIGATURE OE (Œ)
        0x8E => 0x017D, // LATIN CAPITAL LETTER Z WITH CARON (Ž)
        0x91 => 0x2018, // LEFT SINGLE QUOTATION MARK (‘)
        0x92 => 0x2019, // RIGHT SINGLE QUOTATION MARK (’)
        0x93 => 0x201C, // LEFT DOUBLE QUOTATION MARK (“)
        0x94 => 0x201D, // RIGHT DOUBLE QUOTATION MARK (”)
        0x95 => 0x2022, // BULLET (•)
        0x96 => 0x2013, // EN DASH (–)
        0x97 => 0x2014, // EM DASH (—)
        0x98 => 0x02DC, // SMALL TILDE (˜)
        0x99 => 0x2122, // TRADE MARK SIGN (™)
        0x9A => 0x0161, // LATIN SMALL LETTER S WITH CARON (š)
        0x9B => 0x203A, // SINGLE RIGHT-POINTING ANGLE QUOTATION MARK (›)
        0x9C => 0x0153, // LATIN SMALL LIGATURE OE (œ)
        0x9E => 0x017E, // LATIN SMALL LETTER Z WITH CARON (ž)
        0x9F => 0x0178, // LATIN CAPITAL LETTER Y WITH DIAERESIS (Ÿ)
        _ => return None,
    };
    Some(replacement)
}
