//! # structured_fields
//!
//! A strict parser and canonical serializer for HTTP Structured Field Values
//! (RFC 8941).
//!
//! ## What are Structured Fields?
//!
//! Structured fields give HTTP header values a small, typed data model: Lists,
//! Dictionaries and Items, where each Item is a scalar (Integer, Decimal,
//! String, Token, Byte Sequence or Boolean) with optional Parameters. The text
//! grammar is precise, so two implementations that follow it agree on every
//! value byte for byte.
//!
//! ## Key Features
//!
//! - **Strict**: malformed input is rejected as a whole, never partially parsed
//! - **Canonical output**: serialization produces the one normative form
//! - **Typed model**: exhaustive enums instead of dynamic values
//! - **Exact decimals**: decimals are fixed-point, with no float rounding surprises
//! - **Named errors**: every failure is a distinct [`Error`] variant
//!
//! ## Quick Start
//!
//! ```rust
//! use structured_fields::{parse, serialize, FieldType, Value};
//!
//! let value = parse(b"text/html;q=1.0, text/plain;q=0.5", FieldType::List).unwrap();
//! let list = value.as_list().unwrap();
//! assert_eq!(list.len(), 2);
//!
//! let bytes = serialize(&value).unwrap().unwrap();
//! assert_eq!(bytes, b"text/html;q=1.0, text/plain;q=0.5");
//! ```
//!
//! ### Building Values
//!
//! ```rust
//! use structured_fields::{serialize_dictionary, Decimal, Dictionary, InnerList, Item, Token};
//!
//! let mut dict = Dictionary::new();
//! dict.insert("a".to_string(), Item::new(Token::new("foo")).into());
//! dict.insert("b".to_string(), Item::new(true).with_param("p", Decimal::from_thousandths(250)).into());
//! dict.insert("c".to_string(), InnerList::new(vec![Item::new(1), Item::new(2)]).into());
//!
//! let text = serialize_dictionary(&dict).unwrap();
//! assert_eq!(text.as_deref(), Some("a=foo, b;p=0.25, c=(1 2)"));
//! ```
//!
//! ### Empty Fields
//!
//! An empty List or Dictionary is not serialized at all: the field should be
//! omitted, which is signalled by `Ok(None)`.
//!
//! ```rust
//! use structured_fields::{serialize, Value};
//!
//! assert_eq!(serialize(&Value::List(vec![])).unwrap(), None);
//! ```
//!
//! ## Concurrency
//!
//! Every call owns its own cursor and output; there is no shared state, so
//! calls may run on any number of threads at once.

pub mod chars;
pub mod error;
pub mod field;
pub mod map;
pub mod parser;
pub mod serializer;
pub mod value;

pub use error::{Error, Result};
pub use field::{get_structured_field, serialize_field, FieldType};
pub use map::OrderedMap;
pub use parser::Parser;
pub use serializer::Serializer;
pub use value::{
    BareItem, Decimal, Dictionary, InnerList, Item, List, ListEntry, Parameters, Token, Value,
};

/// Parses a field value as the given field type.
///
/// Leading and trailing spaces are ignored; anything else left after the value
/// is an error.
///
/// # Examples
///
/// ```rust
/// use structured_fields::{parse, FieldType, Value};
///
/// let value = parse(b"a=1, b;foo=9, c=3", FieldType::Dictionary).unwrap();
/// let keys: Vec<_> = value.as_dictionary().unwrap().keys().cloned().collect();
/// assert_eq!(keys, vec!["a", "b", "c"]);
///
/// assert!(parse(b"a=1, b;foo=9, c=3", FieldType::Item).is_err());
/// ```
///
/// # Errors
///
/// Returns the first grammar violation found. Parsing is all-or-nothing.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(input: &[u8], field_type: FieldType) -> Result<Value> {
    let result = match field_type {
        FieldType::List => parse_list(input).map(Value::List),
        FieldType::Dictionary => parse_dictionary(input).map(Value::Dictionary),
        FieldType::Item => parse_item(input).map(Value::Item),
    };
    if let Err(err) = &result {
        log::debug!("failed to parse {} field: {}", field_type, err);
    }
    result
}

/// Parses a field value as a List.
///
/// # Errors
///
/// Returns an error if the input is not a valid List.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_list(input: &[u8]) -> Result<List> {
    parse_top_level(input, Parser::parse_list)
}

/// Parses a field value as a Dictionary.
///
/// # Errors
///
/// Returns an error if the input is not a valid Dictionary.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_dictionary(input: &[u8]) -> Result<Dictionary> {
    parse_top_level(input, Parser::parse_dictionary)
}

/// Parses a field value as an Item.
///
/// # Errors
///
/// Returns an error if the input is not a valid Item.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_item(input: &[u8]) -> Result<Item> {
    parse_top_level(input, Parser::parse_item)
}

fn parse_top_level<'a, T>(
    input: &'a [u8],
    parse_value: impl FnOnce(&mut Parser<'a>) -> Result<T>,
) -> Result<T> {
    if let Some(position) = input.iter().position(|b| !b.is_ascii()) {
        return Err(Error::NonAsciiInput { position });
    }

    let mut parser = Parser::new(input);
    parser.skip_sp();
    let output = parse_value(&mut parser)?;
    parser.skip_sp();

    if !parser.at_end() {
        return Err(Error::TrailingGarbage {
            position: parser.position(),
        });
    }
    Ok(output)
}

/// Serializes a value to ASCII bytes.
///
/// Returns `Ok(None)` for an empty List or Dictionary: such a field must be
/// omitted rather than sent with an empty value.
///
/// # Examples
///
/// ```rust
/// use structured_fields::{serialize, Item, Token, Value};
///
/// let value = Value::Item(Item::new(Token::new("gzip")).with_param("q", true));
/// assert_eq!(serialize(&value).unwrap(), Some(b"gzip;q".to_vec()));
/// ```
///
/// # Errors
///
/// Returns an error if any part of the value cannot be serialized, such as an
/// out-of-range number or an invalid token.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize(value: &Value) -> Result<Option<Vec<u8>>> {
    Ok(serialize_to_string(value)?.map(String::into_bytes))
}

pub(crate) fn serialize_to_string(value: &Value) -> Result<Option<String>> {
    match value {
        Value::List(list) => serialize_list(list),
        Value::Dictionary(dict) => serialize_dictionary(dict),
        Value::Item(item) => serialize_item(item).map(Some),
    }
}

/// Serializes a List; `Ok(None)` if it is empty.
///
/// # Errors
///
/// Returns an error if any member cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize_list(list: &[ListEntry]) -> Result<Option<String>> {
    if list.is_empty() {
        log::trace!("omitting empty list field");
        return Ok(None);
    }
    let mut serializer = Serializer::new();
    serializer.serialize_list(list)?;
    Ok(Some(serializer.into_inner()))
}

/// Serializes a Dictionary; `Ok(None)` if it is empty.
///
/// # Errors
///
/// Returns an error if any key or member cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize_dictionary(dict: &Dictionary) -> Result<Option<String>> {
    if dict.is_empty() {
        log::trace!("omitting empty dictionary field");
        return Ok(None);
    }
    let mut serializer = Serializer::new();
    serializer.serialize_dictionary(dict)?;
    Ok(Some(serializer.into_inner()))
}

/// Serializes an Item.
///
/// # Errors
///
/// Returns an error if the bare item or a parameter cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize_item(item: &Item) -> Result<String> {
    let mut serializer = Serializer::new();
    serializer.serialize_item(item)?;
    Ok(serializer.into_inner())
}
