//! Structured field parsing.
//!
//! This module provides the [`Parser`], a recursive-descent reader over an
//! ASCII byte slice. It holds an explicit cursor (`position`) that each
//! sub-grammar advances as it consumes input.
//!
//! ## Overview
//!
//! - **Single pass**: every byte is examined at most once; no backtracking
//! - **Strict**: the first malformed construct aborts the whole parse
//! - **Positioned errors**: each [`Error`] reports the byte offset where it was detected
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use structured_fields::{parse, FieldType};
//!
//! let value = parse(b"text/html;q=1.0", FieldType::List).unwrap();
//! assert_eq!(value.as_list().map(Vec::len), Some(1));
//! ```
//!
//! The parser can also drive a single sub-grammar directly:
//!
//! ```rust
//! use structured_fields::{BareItem, Parser};
//!
//! let mut parser = Parser::new(b"?1;a");
//! assert_eq!(parser.parse_bare_item().unwrap(), BareItem::Boolean(true));
//! assert_eq!(parser.position(), 2);
//! ```

use crate::chars;
use crate::{
    BareItem, Decimal, Dictionary, Error, InnerList, Item, List, ListEntry, Parameters, Result,
    Token,
};
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

const INTEGER_MAX_DIGITS: usize = 15;
const DECIMAL_MAX_CHARS: usize = 16;
const DECIMAL_MAX_INTEGER_DIGITS: usize = 12;
const DECIMAL_MAX_FRACTIONAL_DIGITS: usize = 3;

/// Standard alphabet; padding may be omitted and non-zero pad bits are accepted.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// The structured field parser.
///
/// Created over a byte slice via [`Parser::new`]. Each `parse_*` method
/// consumes the construct at the cursor and leaves the cursor just past it.
pub struct Parser<'a> {
    input: &'a [u8],
    position: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Parser { input, position: 0 }
    }

    /// Byte offset of the cursor into the input.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Checks if we're at the end of input
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.position).copied()
    }

    fn next_byte(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.position += 1;
        Some(b)
    }

    /// Discards leading SP characters.
    pub fn skip_sp(&mut self) {
        while self.peek() == Some(b' ') {
            self.position += 1;
        }
    }

    /// Discards leading OWS (SP and HTAB) characters.
    pub fn skip_ows(&mut self) {
        while self.peek().is_some_and(chars::is_ows) {
            self.position += 1;
        }
    }

    /// Parses a List: comma-separated items or inner lists.
    pub fn parse_list(&mut self) -> Result<List> {
        let mut members = List::new();

        while !self.at_end() {
            members.push(self.parse_item_or_inner_list()?);
            if self.consume_member_separator()? {
                break;
            }
        }

        Ok(members)
    }

    /// Parses a Dictionary. A repeated key overwrites the earlier member in place.
    pub fn parse_dictionary(&mut self) -> Result<Dictionary> {
        let mut dictionary = Dictionary::new();

        while !self.at_end() {
            let key = self.parse_key()?;

            let member = if self.peek() == Some(b'=') {
                self.position += 1;
                self.parse_item_or_inner_list()?
            } else {
                let params = self.parse_parameters()?;
                ListEntry::Item(Item::with_params(true, params))
            };
            dictionary.insert(key, member);

            if self.consume_member_separator()? {
                break;
            }
        }

        Ok(dictionary)
    }

    /// Handles the whitespace and comma after a list or dictionary member.
    /// Returns `true` when the input is exhausted.
    fn consume_member_separator(&mut self) -> Result<bool> {
        self.skip_ows();
        if self.at_end() {
            return Ok(true);
        }

        if self.peek() != Some(b',') {
            return Err(Error::ExpectedComma {
                position: self.position,
            });
        }
        self.position += 1;

        self.skip_ows();
        if self.at_end() {
            return Err(Error::TrailingComma {
                position: self.position,
            });
        }
        Ok(false)
    }

    pub fn parse_item_or_inner_list(&mut self) -> Result<ListEntry> {
        if self.peek() == Some(b'(') {
            self.parse_inner_list().map(ListEntry::InnerList)
        } else {
            self.parse_item().map(ListEntry::Item)
        }
    }

    pub fn parse_inner_list(&mut self) -> Result<InnerList> {
        if self.peek() != Some(b'(') {
            return Err(Error::UnrecognizedItemType {
                position: self.position,
            });
        }
        self.position += 1;

        let mut items = Vec::new();
        loop {
            self.skip_sp();
            match self.peek() {
                None => break,
                Some(b')') => {
                    self.position += 1;
                    let params = self.parse_parameters()?;
                    return Ok(InnerList::with_params(items, params));
                }
                Some(_) => {}
            }

            items.push(self.parse_item()?);

            match self.peek() {
                None => break,
                Some(b' ') | Some(b')') => {}
                Some(_) => {
                    return Err(Error::MalformedInnerListSeparator {
                        position: self.position,
                    })
                }
            }
        }

        Err(Error::UnterminatedInnerList {
            position: self.position,
        })
    }

    pub fn parse_item(&mut self) -> Result<Item> {
        let bare_item = self.parse_bare_item()?;
        let params = self.parse_parameters()?;
        Ok(Item { bare_item, params })
    }

    /// Parses `;key[=value]` pairs until the next character is not `;`.
    pub fn parse_parameters(&mut self) -> Result<Parameters> {
        let mut params = Parameters::new();

        while self.peek() == Some(b';') {
            self.position += 1;
            self.skip_sp();

            let key = self.parse_key()?;
            let value = if self.peek() == Some(b'=') {
                self.position += 1;
                self.parse_bare_item()?
            } else {
                BareItem::Boolean(true)
            };
            params.insert(key, value);
        }

        Ok(params)
    }

    pub fn parse_key(&mut self) -> Result<String> {
        match self.peek() {
            Some(b) if chars::is_key_start(b) => {}
            _ => {
                return Err(Error::InvalidKeyStart {
                    position: self.position,
                })
            }
        }

        let start = self.position;
        while self.peek().is_some_and(chars::is_key_char) {
            self.position += 1;
        }
        Ok(ascii_string(&self.input[start..self.position]))
    }

    /// Parses a bare item, dispatching on its first character.
    pub fn parse_bare_item(&mut self) -> Result<BareItem> {
        match self.peek() {
            None => Err(Error::UnexpectedEnd {
                position: self.position,
            }),
            Some(b) if b == b'-' || chars::is_digit(b) => self.parse_number(),
            Some(b'"') => self.parse_string().map(BareItem::String),
            Some(b) if chars::is_token_start(b) => self.parse_token().map(BareItem::Token),
            Some(b':') => self.parse_byte_sequence().map(BareItem::ByteSequence),
            Some(b'?') => self.parse_boolean().map(BareItem::Boolean),
            Some(_) => Err(Error::UnrecognizedItemType {
                position: self.position,
            }),
        }
    }

    /// Parses an Integer or a Decimal.
    fn parse_number(&mut self) -> Result<BareItem> {
        let negative = self.peek() == Some(b'-');
        if negative {
            self.position += 1;
        }

        match self.peek() {
            Some(b) if chars::is_digit(b) => {}
            _ => {
                return Err(Error::EmptyOrInvalidNumber {
                    position: self.position,
                })
            }
        }

        let start = self.position;
        let mut dot: Option<usize> = None;

        while let Some(b) = self.peek() {
            let len = self.position - start;
            if chars::is_digit(b) {
                self.position += 1;
            } else if b == b'.' && dot.is_none() {
                if len > DECIMAL_MAX_INTEGER_DIGITS {
                    return Err(Error::DecimalIntegerPartTooLong {
                        position: self.position,
                    });
                }
                dot = Some(self.position);
                self.position += 1;
            } else {
                break;
            }

            let len = self.position - start;
            if dot.is_none() && len > INTEGER_MAX_DIGITS {
                return Err(Error::IntegerTooLong {
                    position: self.position,
                });
            }
            if dot.is_some() && len > DECIMAL_MAX_CHARS {
                return Err(Error::DecimalTooLong {
                    position: self.position,
                });
            }
        }

        let digits = &self.input[start..self.position];
        let Some(dot) = dot else {
            let magnitude = digits_value(digits);
            return Ok(BareItem::Integer(if negative { -magnitude } else { magnitude }));
        };

        let int_digits = &self.input[start..dot];
        let frac_digits = &self.input[dot + 1..self.position];
        if frac_digits.is_empty() {
            return Err(Error::TrailingDecimalPoint {
                position: self.position,
            });
        }
        if frac_digits.len() > DECIMAL_MAX_FRACTIONAL_DIGITS {
            return Err(Error::TooManyFractionalDigits {
                position: self.position,
            });
        }

        let mut frac = digits_value(frac_digits);
        for _ in frac_digits.len()..DECIMAL_MAX_FRACTIONAL_DIGITS {
            frac *= 10;
        }
        let magnitude = digits_value(int_digits) * 1000 + frac;
        Ok(BareItem::Decimal(Decimal::from_thousandths(if negative {
            -magnitude
        } else {
            magnitude
        })))
    }

    fn parse_string(&mut self) -> Result<String> {
        let start = self.position;
        if self.next_byte() != Some(b'"') {
            return Err(Error::UnrecognizedItemType { position: start });
        }

        let mut result = String::new();
        loop {
            let position = self.position;
            match self.next_byte() {
                None => return Err(Error::UnterminatedString { position: start }),
                Some(b'\\') => match self.next_byte() {
                    Some(escaped @ (b'"' | b'\\')) => result.push(char::from(escaped)),
                    _ => return Err(Error::InvalidEscape { position }),
                },
                Some(b'"') => return Ok(result),
                Some(b) if chars::is_string_char(b) => result.push(char::from(b)),
                Some(_) => return Err(Error::ControlCharacterInString { position }),
            }
        }
    }

    fn parse_token(&mut self) -> Result<Token> {
        match self.peek() {
            Some(b) if chars::is_token_start(b) => {}
            _ => {
                return Err(Error::UnrecognizedItemType {
                    position: self.position,
                })
            }
        }

        let start = self.position;
        while self.peek().is_some_and(chars::is_token_char) {
            self.position += 1;
        }
        Ok(Token::new(ascii_string(&self.input[start..self.position])))
    }

    fn parse_byte_sequence(&mut self) -> Result<Vec<u8>> {
        let start = self.position;
        if self.next_byte() != Some(b':') {
            return Err(Error::UnrecognizedItemType { position: start });
        }

        let content_start = self.position;
        let rest = &self.input[content_start..];
        let Some(len) = rest.iter().position(|&b| b == b':') else {
            return Err(Error::UnterminatedByteSequence { position: start });
        };
        let content = &rest[..len];

        if let Some(bad) = content.iter().position(|&b| !chars::is_base64_char(b)) {
            return Err(Error::InvalidBase64Alphabet {
                position: content_start + bad,
            });
        }

        let decoded = LENIENT_BASE64
            .decode(content)
            .map_err(|e| Error::Base64DecodeError {
                position: content_start,
                reason: e.to_string(),
            })?;

        // Past the content and the closing ':'.
        self.position = content_start + len + 1;
        Ok(decoded)
    }

    fn parse_boolean(&mut self) -> Result<bool> {
        let start = self.position;
        if self.next_byte() != Some(b'?') {
            return Err(Error::UnrecognizedItemType { position: start });
        }

        match self.peek() {
            Some(b'1') => {
                self.position += 1;
                Ok(true)
            }
            Some(b'0') => {
                self.position += 1;
                Ok(false)
            }
            _ => Err(Error::InvalidBoolean {
                position: self.position,
            }),
        }
    }
}

/// Value of a run of ASCII digits short enough to fit an `i64`.
fn digits_value(digits: &[u8]) -> i64 {
    digits
        .iter()
        .fold(0i64, |acc, &d| acc * 10 + i64::from(d - b'0'))
}

fn ascii_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
