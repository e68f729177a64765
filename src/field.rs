//! Field types and helpers for raw header values.
//!
//! A structured field is always parsed as one of three declared types. The
//! caller, not the text, decides which: the same bytes may be a valid List and
//! an invalid Dictionary.
//!
//! ## Examples
//!
//! ```rust
//! use structured_fields::{get_structured_field, FieldType};
//!
//! let field_type: FieldType = "dictionary".parse().unwrap();
//! let value = get_structured_field(Some("a=1, b".as_bytes()), field_type).unwrap();
//! assert_eq!(value.as_dictionary().map(|d| d.len()), Some(2));
//!
//! // Malformed fields are treated as absent.
//! assert!(get_structured_field(Some("a=1,".as_bytes()), field_type).is_none());
//! assert!(get_structured_field(None, field_type).is_none());
//! ```

use crate::{Error, Result, Value};
use std::fmt;
use std::str::FromStr;

/// The declared type of a structured field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldType {
    List,
    Dictionary,
    Item,
}

impl FieldType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            FieldType::List => "list",
            FieldType::Dictionary => "dictionary",
            FieldType::Item => "item",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "list" => Ok(FieldType::List),
            "dictionary" => Ok(FieldType::Dictionary),
            "item" => Ok(FieldType::Item),
            other => Err(Error::UnknownFieldType(other.to_string())),
        }
    }
}

/// Parses a header value that may be missing.
///
/// Returns `None` when the value is absent or does not parse as `field_type`;
/// a field that fails to parse must be ignored as a whole.
#[must_use]
pub fn get_structured_field(value: Option<&[u8]>, field_type: FieldType) -> Option<Value> {
    let value = value?;
    match crate::parse(value, field_type) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            log::debug!("ignoring malformed {} field: {}", field_type, err);
            None
        }
    }
}

/// Serializes `value` for use as a header value.
///
/// `Ok(None)` means the field should be omitted entirely (empty List or
/// Dictionary).
pub fn serialize_field(value: &Value) -> Result<Option<String>> {
    crate::serialize_to_string(value)
}
