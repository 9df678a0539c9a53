//! Character reference states.
//!
//! [§ 13.2.5.72](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//! through [§ 13.2.5.80](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state).
//!
//! The temporary buffer always starts with the `&` that opened the
//! reference. On a chunk boundary the buffer and any partial named match
//! are kept, and matching resumes when more input arrives.

use super::core::{Tokenizer, TokenizerResult, TokenizerState};
use super::named_character_references::{any_entity_has_prefix, lookup_entity};
use crate::scanner::{Peek, Scanner};

/// Code point used when a numeric reference overflows. Anything above
/// U+10FFFF is replaced the same way, so the exact value doesn't matter.
const OVERFLOW_CODE: u32 = 0x0011_0000;

/// [§ 13.2.5.80](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// "If the number is one of the numbers in the first column of the following
/// table, then find the row with that number in the first column, and set the
/// character reference code to the number in the second column of that row."
fn windows_1252_replacement(code: u32) -> Option<u32> {
    let replacement = match code {
        0x80 => 0x20AC,
        0x82 => 0x201A,
        0x83 => 0x0192,
        0x84 => 0x201E,
        0x85 => 0x2026,
        0x86 => 0x2020,
        0x87 => 0x2021,
        0x88 => 0x02C6,
        0x89 => 0x2030,
        0x8A => 0x0160,
        0x8B => 0x2039,
        0x8C => 0x0152,
        0x8E => 0x017D,
        0x91 => 0x2018,
        0x92 => 0x2019,
        0x93 => 0x201C,
        0x94 => 0x201D,
        0x95 => 0x2022,
        0x96 => 0x2013,
        0x97 => 0x2014,
        0x98 => 0x02DC,
        0x99 => 0x2122,
        0x9A => 0x0161,
        0x9B => 0x203A,
        0x9C => 0x0153,
        0x9E => 0x017E,
        0x9F => 0x0178,
        _ => return None,
    };
    Some(replacement)
}

/// "A noncharacter is a code point that is in the range U+FDD0 to U+FDEF,
/// inclusive, or U+FFFE, U+FFFF, U+1FFFE, U+1FFFF, ... U+10FFFE, or U+10FFFF."
const fn is_noncharacter(code: u32) -> bool {
    matches!(code, 0xFDD0..=0xFDEF) || (code & 0xFFFE) == 0xFFFE
}

/// "A control is a C0 control or a code point in the range U+007F DELETE to
/// U+009F APPLICATION PROGRAM COMMAND, inclusive."
const fn is_control(code: u32) -> bool {
    matches!(code, 0x00..=0x1F | 0x7F..=0x9F)
}

const fn is_ascii_whitespace(code: u32) -> bool {
    matches!(code, 0x09 | 0x0A | 0x0C | 0x0D | 0x20)
}

impl Tokenizer {
    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    pub(super) fn handle_character_reference_state(&mut self, scanner: &mut Scanner) -> TokenizerResult {
        match scanner.peek() {
            Peek::NeedMore => return TokenizerResult::NeedMoreInput,
            // "ASCII alphanumeric - Reconsume in the named character reference state."
            Peek::Char(c) if c.is_ascii_alphanumeric() => {
                self.named_match = None;
                self.switch_to(TokenizerState::NamedCharacterReference);
            }
            // "U+0023 NUMBER SIGN (#) - Append the current input character to the
            // temporary buffer. Switch to the numeric character reference state."
            Peek::Char('#') => {
                scanner.advance(1);
                self.temporary_buffer.push('#');
                self.character_reference_code = 0;
                self.switch_to(TokenizerState::NumericCharacterReference);
            }
            // "Anything else - Flush code points consumed as a character
            // reference. Reconsume in the return state."
            Peek::Char(_) | Peek::Eof => {
                self.flush_code_points_consumed_as_character_reference();
                self.switch_to(self.return_state);
            }
        }
        TokenizerResult::Continue
    }

    /// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
    ///
    /// "Consume the maximum number of characters possible, where the consumed
    /// characters are one of the identifiers in the named character references
    /// table."
    ///
    /// Characters are consumed while they still extend a prefix of some
    /// name; the longest complete name seen on the way is the match. Anything
    /// consumed past it is alphanumeric and goes out literally.
    pub(super) fn handle_named_character_reference_state(&mut self, scanner: &mut Scanner) -> TokenizerResult {
        let next = loop {
            match scanner.peek() {
                Peek::NeedMore => return TokenizerResult::NeedMoreInput,
                Peek::Char(c) => {
                    let mut candidate = String::with_capacity(self.temporary_buffer.len());
                    candidate.push_str(&self.temporary_buffer[1..]);
                    candidate.push(c);
                    if !any_entity_has_prefix(&candidate) {
                        break Some(c);
                    }
                    scanner.advance(1);
                    self.temporary_buffer.push(c);
                    if let Some(value) = lookup_entity(&candidate) {
                        self.named_match = Some((self.temporary_buffer.len(), value));
                    }
                }
                Peek::Eof => break None,
            }
        };

        let Some((matched_len, value)) = self.named_match.take() else {
            // "Otherwise - Flush code points consumed as a character reference.
            // Switch to the ambiguous ampersand state."
            self.flush_code_points_consumed_as_character_reference();
            self.switch_to(TokenizerState::AmbiguousAmpersand);
            return TokenizerResult::Continue;
        };

        let past_match = self.temporary_buffer.split_off(matched_len);
        let ends_with_semicolon = self.temporary_buffer.ends_with(';');
        let next_after_match = past_match.chars().next().or(next);

        // "If the character reference was consumed as part of an attribute, and
        // the last character matched is not a U+003B SEMICOLON character (;),
        // and the next input character is either a U+003D EQUALS SIGN character
        // (=) or an ASCII alphanumeric, then, for historical reasons, flush code
        // points consumed as a character reference and switch to the return
        // state."
        if self.consumed_as_part_of_attribute()
            && !ends_with_semicolon
            && next_after_match.is_some_and(|c| c == '=' || c.is_ascii_alphanumeric())
        {
            self.temporary_buffer.push_str(&past_match);
            self.flush_code_points_consumed_as_character_reference();
            self.switch_to(self.return_state);
            return TokenizerResult::Continue;
        }

        // "If the last character matched is not a U+003B SEMICOLON character (;),
        // then this is a missing-semicolon-after-character-reference parse error."
        if !ends_with_semicolon {
            self.parse_error("missing-semicolon-after-character-reference");
        }

        // "Set the temporary buffer to the empty string. Append one or two
        // characters corresponding to the character reference name to the
        // temporary buffer. Flush code points consumed as a character reference.
        // Switch to the return state."
        self.temporary_buffer.clear();
        self.temporary_buffer.push_str(value);
        self.temporary_buffer.push_str(&past_match);
        self.flush_code_points_consumed_as_character_reference();
        self.switch_to(self.return_state);
        TokenizerResult::Continue
    }

    /// [§ 13.2.5.74 Ambiguous ampersand state](https://html.spec.whatwg.org/multipage/parsing.html#ambiguous-ampersand-state)
    pub(super) fn handle_ambiguous_ampersand_state(&mut self, c: Option<char>) {
        match c {
            // "If the character reference was consumed as part of an attribute,
            // then append the current input character to the current attribute's
            // value. Otherwise, emit the current input character as a character
            // token."
            Some(c) if c.is_ascii_alphanumeric() => {
                if self.consumed_as_part_of_attribute() {
                    let mut buf = [0u8; 4];
                    self.append_to_attribute_value(c.encode_utf8(&mut buf));
                } else {
                    self.emit_char(c);
                }
            }
            // "This is an unknown-named-character-reference parse error. Reconsume
            // in the return state."
            Some(';') => {
                self.parse_error("unknown-named-character-reference");
                self.reconsume_in(self.return_state);
            }
            _ => self.reconsume_in(self.return_state),
        }
    }

    /// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
    pub(super) fn handle_numeric_character_reference_state(&mut self, c: Option<char>) {
        match c {
            Some(c @ ('x' | 'X')) => {
                self.temporary_buffer.push(c);
                self.switch_to(TokenizerState::HexadecimalCharacterReferenceStart);
            }
            _ => self.reconsume_in(TokenizerState::DecimalCharacterReferenceStart),
        }
    }

    /// [§ 13.2.5.76 Hexadecimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-start-state)
    pub(super) fn handle_hexadecimal_character_reference_start_state(&mut self, c: Option<char>) {
        match c {
            Some(c) if c.is_ascii_hexdigit() => {
                self.reconsume_in(TokenizerState::HexadecimalCharacterReference);
            }
            _ => self.absence_of_digits(),
        }
    }

    /// [§ 13.2.5.77 Decimal character reference start state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-start-state)
    pub(super) fn handle_decimal_character_reference_start_state(&mut self, c: Option<char>) {
        match c {
            Some(c) if c.is_ascii_digit() => {
                self.reconsume_in(TokenizerState::DecimalCharacterReference);
            }
            _ => self.absence_of_digits(),
        }
    }

    /// "This is an absence-of-digits-in-numeric-character-reference parse
    /// error. Flush code points consumed as a character reference. Reconsume
    /// in the return state."
    fn absence_of_digits(&mut self) {
        self.parse_error("absence-of-digits-in-numeric-character-reference");
        self.flush_code_points_consumed_as_character_reference();
        self.reconsume_in(self.return_state);
    }

    /// [§ 13.2.5.78 Hexadecimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#hexadecimal-character-reference-state)
    pub(super) fn handle_hexadecimal_character_reference_state(&mut self, c: Option<char>) {
        self.accumulate_digit(c, 16);
    }

    /// [§ 13.2.5.79 Decimal character reference state](https://html.spec.whatwg.org/multipage/parsing.html#decimal-character-reference-state)
    pub(super) fn handle_decimal_character_reference_state(&mut self, c: Option<char>) {
        self.accumulate_digit(c, 10);
    }

    fn accumulate_digit(&mut self, c: Option<char>, radix: u32) {
        match c {
            // "Multiply the character reference code by 16. Add a numeric version
            // of the current input character to the character reference code."
            Some(c) if c.is_digit(radix) => {
                let digit = c.to_digit(radix).unwrap_or_default();
                self.character_reference_code = self
                    .character_reference_code
                    .saturating_mul(radix)
                    .saturating_add(digit)
                    .min(OVERFLOW_CODE);
            }
            Some(';') => self.switch_to(TokenizerState::NumericCharacterReferenceEnd),
            // "This is a missing-semicolon-after-character-reference parse error.
            // Reconsume in the numeric character reference end state."
            _ => {
                self.parse_error("missing-semicolon-after-character-reference");
                self.reconsume_in(TokenizerState::NumericCharacterReferenceEnd);
            }
        }
    }

    /// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
    ///
    /// Consumes nothing. A pending reconsume carries over to the return state.
    pub(super) fn handle_numeric_character_reference_end_state(&mut self) {
        let mut code = self.character_reference_code;

        if code == 0 {
            // "If the number is 0x00, then this is a null-character-reference
            // parse error. Set the character reference code to 0xFFFD."
            self.parse_error("null-character-reference");
            code = 0xFFFD;
        } else if code > 0x0010_FFFF {
            self.parse_error("character-reference-outside-unicode-range");
            code = 0xFFFD;
        } else if (0xD800..=0xDFFF).contains(&code) {
            self.parse_error("surrogate-character-reference");
            code = 0xFFFD;
        } else if is_noncharacter(code) {
            self.parse_error("noncharacter-character-reference");
        } else if code == 0x0D || (is_control(code) && !is_ascii_whitespace(code)) {
            self.parse_error("control-character-reference");
            if let Some(replacement) = windows_1252_replacement(code) {
                code = replacement;
            }
        }

        // "Set the temporary buffer to the empty string. Append a code point
        // equal to the character reference code to the temporary buffer. Flush
        // code points consumed as a character reference. Switch to the return
        // state."
        self.temporary_buffer.clear();
        self.temporary_buffer
            .push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
        self.flush_code_points_consumed_as_character_reference();
        self.state = self.return_state;
    }
}
