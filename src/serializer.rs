//! Structured field serialization.
//!
//! This module provides the [`Serializer`], which writes a value tree in the
//! canonical text form. The output of a successful serialization always parses
//! back to an equal value.
//!
//! ## Validation
//!
//! Values are checked while they are written:
//!
//! - Integers must be within ±999,999,999,999,999
//! - Decimals must have at most 12 integer digits
//! - Strings must be printable ASCII; tokens and keys must match their grammars
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use structured_fields::{serialize_item, Item, Token};
//!
//! let item = Item::new(Token::new("text/html")).with_param("charset", Token::new("utf-8"));
//! assert_eq!(serialize_item(&item).unwrap(), "text/html;charset=utf-8");
//! ```
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use structured_fields::{BareItem, Serializer};
//!
//! let mut serializer = Serializer::new();
//! serializer.serialize_bare_item(&BareItem::from("say \"hi\"")).unwrap();
//! assert_eq!(serializer.into_inner(), r#""say \"hi\"""#);
//! ```

use crate::chars;
use crate::value::{MAX_INTEGER, Parameters};
use crate::{BareItem, Decimal, Dictionary, Error, InnerList, Item, ListEntry, Result, Token};
use base64::Engine;

/// The structured field serializer.
///
/// Accumulates output in an internal buffer; retrieve it with
/// [`Serializer::into_inner`]. If any `serialize_*` call fails, the buffer
/// contents are unspecified and should be discarded.
#[derive(Debug, Default)]
pub struct Serializer {
    output: String,
}

impl Serializer {
    pub fn new() -> Self {
        Serializer {
            output: String::with_capacity(64),
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes list members separated by `", "`.
    pub fn serialize_list(&mut self, list: &[ListEntry]) -> Result<()> {
        for (i, member) in list.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            self.serialize_list_entry(member)?;
        }
        Ok(())
    }

    /// Writes dictionary members separated by `", "`. Members whose value is
    /// Boolean true are written as the bare key plus parameters.
    pub fn serialize_dictionary(&mut self, dictionary: &Dictionary) -> Result<()> {
        for (i, (key, member)) in dictionary.iter().enumerate() {
            if i > 0 {
                self.output.push_str(", ");
            }
            self.serialize_key(key)?;

            match member {
                ListEntry::Item(Item {
                    bare_item: BareItem::Boolean(true),
                    params,
                }) => self.serialize_parameters(params)?,
                _ => {
                    self.output.push('=');
                    self.serialize_list_entry(member)?;
                }
            }
        }
        Ok(())
    }

    fn serialize_list_entry(&mut self, member: &ListEntry) -> Result<()> {
        match member {
            ListEntry::Item(item) => self.serialize_item(item),
            ListEntry::InnerList(list) => self.serialize_inner_list(list),
        }
    }

    pub fn serialize_inner_list(&mut self, list: &InnerList) -> Result<()> {
        self.output.push('(');
        for (i, item) in list.items.iter().enumerate() {
            if i > 0 {
                self.output.push(' ');
            }
            self.serialize_item(item)?;
        }
        self.output.push(')');
        self.serialize_parameters(&list.params)
    }

    pub fn serialize_item(&mut self, item: &Item) -> Result<()> {
        self.serialize_bare_item(&item.bare_item)?;
        self.serialize_parameters(&item.params)
    }

    /// Writes `;key` for Boolean true values and `;key=value` otherwise.
    pub fn serialize_parameters(&mut self, params: &Parameters) -> Result<()> {
        for (key, value) in params {
            self.output.push(';');
            self.serialize_key(key)?;
            if *value != BareItem::Boolean(true) {
                self.output.push('=');
                self.serialize_bare_item(value)?;
            }
        }
        Ok(())
    }

    pub fn serialize_key(&mut self, key: &str) -> Result<()> {
        if !chars::is_valid_key(key) {
            return Err(Error::InvalidKey(key.to_string()));
        }
        self.output.push_str(key);
        Ok(())
    }

    pub fn serialize_bare_item(&mut self, bare_item: &BareItem) -> Result<()> {
        match bare_item {
            BareItem::Integer(v) => self.serialize_integer(*v),
            BareItem::Decimal(d) => self.serialize_decimal(*d),
            BareItem::String(s) => self.serialize_string(s),
            BareItem::Token(t) => self.serialize_token(t),
            BareItem::ByteSequence(bytes) => {
                self.serialize_byte_sequence(bytes);
                Ok(())
            }
            BareItem::Boolean(b) => {
                self.output.push_str(if *b { "?1" } else { "?0" });
                Ok(())
            }
        }
    }

    fn serialize_integer(&mut self, v: i64) -> Result<()> {
        if !(-MAX_INTEGER..=MAX_INTEGER).contains(&v) {
            return Err(Error::IntegerOutOfRange(v));
        }
        self.output.push_str(&v.to_string());
        Ok(())
    }

    fn serialize_decimal(&mut self, d: Decimal) -> Result<()> {
        if !d.is_serializable() {
            return Err(Error::DecimalOutOfRange(d.to_string()));
        }
        self.output.push_str(&d.to_string());
        Ok(())
    }

    fn serialize_string(&mut self, s: &str) -> Result<()> {
        if !s.bytes().all(chars::is_string_char) {
            return Err(Error::NonSerializableCharacter(s.to_string()));
        }

        self.output.reserve(s.len() + 2);
        self.output.push('"');
        for ch in s.chars() {
            if ch == '"' || ch == '\\' {
                self.output.push('\\');
            }
            self.output.push(ch);
        }
        self.output.push('"');
        Ok(())
    }

    fn serialize_token(&mut self, token: &Token) -> Result<()> {
        let s = token.as_str();
        if !s.is_ascii() {
            return Err(Error::NonSerializableCharacter(s.to_string()));
        }
        if !chars::is_valid_token(s) {
            return Err(Error::InvalidToken(s.to_string()));
        }
        self.output.push_str(s);
        Ok(())
    }

    fn serialize_byte_sequence(&mut self, bytes: &[u8]) {
        self.output.push(':');
        base64::engine::general_purpose::STANDARD.encode_string(bytes, &mut self.output);
        self.output.push(':');
    }
}
