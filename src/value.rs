//! The structured field value model.
//!
//! Every structured field is one of three top-level shapes, represented by
//! [`Value`]:
//!
//! - [`List`]: an ordered sequence of [`ListEntry`] members
//! - [`Dictionary`]: an ordered map from keys to [`ListEntry`] members
//! - [`Item`]: a single [`BareItem`] with [`Parameters`]
//!
//! A [`ListEntry`] is either an [`Item`] or an [`InnerList`] (a parenthesized
//! sequence of items carrying its own parameters).
//!
//! ## Building Values
//!
//! ```rust
//! use structured_fields::{BareItem, Decimal, Item, Token};
//!
//! let item = Item::new(Token::new("text/html")).with_param("q", Decimal::from_thousandths(500));
//! assert_eq!(item.bare_item.as_token(), Some("text/html"));
//! assert_eq!(item.params.get("q").and_then(BareItem::as_decimal), Some(Decimal::from_thousandths(500)));
//! ```
//!
//! ## Type Checking
//!
//! ```rust
//! use structured_fields::BareItem;
//!
//! let value = BareItem::from(42);
//! assert!(value.is_integer());
//! assert!(!value.is_string());
//! assert_eq!(value.as_integer(), Some(42));
//! ```

use crate::{Error, OrderedMap, Result};
use base64::Engine;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;

/// Largest magnitude an Integer may have.
pub const MAX_INTEGER: i64 = 999_999_999_999_999;

/// Largest magnitude of a Decimal, in thousandths (12 integer digits, 3 fractional).
pub const MAX_DECIMAL_THOUSANDTHS: i64 = 999_999_999_999_999;

/// Ordered, key-deduplicated parameters attached to an item or inner list.
pub type Parameters = OrderedMap<BareItem>;

/// Ordered members of a List field.
pub type List = Vec<ListEntry>;

/// Ordered members of a Dictionary field, keyed by member name.
pub type Dictionary = OrderedMap<ListEntry>;

/// A scalar value without parameters.
///
/// # Examples
///
/// ```rust
/// use structured_fields::{BareItem, Token};
///
/// let s = BareItem::from("hello");
/// let t = BareItem::from(Token::new("hello"));
/// assert_ne!(s, t);
/// assert_eq!(s.as_str(), Some("hello"));
/// assert_eq!(t.as_token(), Some("hello"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BareItem {
    Integer(i64),
    Decimal(Decimal),
    String(String),
    Token(Token),
    ByteSequence(Vec<u8>),
    Boolean(bool),
}

impl BareItem {
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, BareItem::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_decimal(&self) -> bool {
        matches!(self, BareItem::Decimal(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, BareItem::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_token(&self) -> bool {
        matches!(self, BareItem::Token(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_byte_sequence(&self) -> bool {
        matches!(self, BareItem::ByteSequence(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(self, BareItem::Boolean(_))
    }

    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            BareItem::Integer(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            BareItem::Decimal(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the content of a String item. Tokens are not strings.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            BareItem::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_token(&self) -> Option<&str> {
        match self {
            BareItem::Token(t) => Some(t.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            BareItem::ByteSequence(b) => Some(b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            BareItem::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<i64> for BareItem {
    fn from(v: i64) -> Self {
        BareItem::Integer(v)
    }
}

impl From<i32> for BareItem {
    fn from(v: i32) -> Self {
        BareItem::Integer(i64::from(v))
    }
}

impl From<Decimal> for BareItem {
    fn from(v: Decimal) -> Self {
        BareItem::Decimal(v)
    }
}

impl From<&str> for BareItem {
    fn from(v: &str) -> Self {
        BareItem::String(v.to_string())
    }
}

impl From<String> for BareItem {
    fn from(v: String) -> Self {
        BareItem::String(v)
    }
}

impl From<Token> for BareItem {
    fn from(v: Token) -> Self {
        BareItem::Token(v)
    }
}

impl From<Vec<u8>> for BareItem {
    fn from(v: Vec<u8>) -> Self {
        BareItem::ByteSequence(v)
    }
}

impl From<bool> for BareItem {
    fn from(v: bool) -> Self {
        BareItem::Boolean(v)
    }
}

/// A decimal number with at most three fractional digits, stored as an exact
/// count of thousandths.
///
/// Floats are converted with [`Decimal::try_from`], which rounds to three
/// fractional digits (half to even) on the float's shortest decimal rendering,
/// so `1.0005` becomes `1.0` and `1.0015` becomes `1.002`.
///
/// # Examples
///
/// ```rust
/// use structured_fields::Decimal;
/// use std::convert::TryFrom;
///
/// let d = Decimal::try_from(1.0005).unwrap();
/// assert_eq!(d.to_string(), "1.0");
/// assert_eq!(Decimal::from_thousandths(-1500).to_string(), "-1.5");
/// assert_eq!(Decimal::try_from(2.5).unwrap().to_f64(), 2.5);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimal(i64);

impl Decimal {
    #[inline]
    #[must_use]
    pub const fn from_thousandths(thousandths: i64) -> Self {
        Decimal(thousandths)
    }

    #[inline]
    #[must_use]
    pub const fn thousandths(self) -> i64 {
        self.0
    }

    #[must_use]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 1000.0
    }

    /// Returns `true` if the integer part fits in 12 digits.
    #[must_use]
    pub const fn is_serializable(self) -> bool {
        self.0.unsigned_abs() <= MAX_DECIMAL_THOUSANDTHS as u64
    }
}

impl TryFrom<f64> for Decimal {
    type Error = Error;

    fn try_from(v: f64) -> Result<Self> {
        if !v.is_finite() {
            return Err(Error::DecimalOutOfRange(v.to_string()));
        }
        let out_of_range = || Error::DecimalOutOfRange(v.to_string());

        // Display for f64 never uses exponent notation.
        let rendered = v.abs().to_string();
        let (int_part, frac_part) = rendered.split_once('.').unwrap_or((&rendered, ""));
        let int_value: i64 = int_part.parse().map_err(|_| out_of_range())?;

        let frac = frac_part.as_bytes();
        let mut kept: i64 = 0;
        for i in 0..3 {
            let digit = frac.get(i).map_or(0, |d| i64::from(d - b'0'));
            kept = kept * 10 + digit;
        }

        let rest = frac.get(3..).unwrap_or(&[]);
        let round_up = match rest.split_first() {
            Some((&first, _)) if first > b'5' => true,
            Some((&b'5', tail)) => tail.iter().any(|&d| d != b'0') || kept % 2 == 1,
            _ => false,
        };
        if round_up {
            kept += 1;
        }

        let magnitude = int_value
            .checked_mul(1000)
            .and_then(|m| m.checked_add(kept))
            .ok_or_else(out_of_range)?;
        Ok(Decimal(if v.is_sign_negative() { -magnitude } else { magnitude }))
    }
}

impl From<Decimal> for f64 {
    fn from(d: Decimal) -> Self {
        d.to_f64()
    }
}

/// Canonical text form: always a decimal point and at least one fractional digit.
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 0 {
            f.write_str("-")?;
        }
        let abs = self.0.unsigned_abs();
        let int_part = abs / 1000;
        let mut frac = abs % 1000;
        let mut width = 3;
        while width > 1 && frac % 10 == 0 {
            frac /= 10;
            width -= 1;
        }
        write!(f, "{}.{:0width$}", int_part, frac, width = width)
    }
}

/// A bare-word scalar such as `text/html` or `*`.
///
/// The token grammar is checked when the token is serialized; constructing a
/// `Token` never fails.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    pub fn new(s: impl Into<String>) -> Self {
        Token(s.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Token(s.to_string())
    }
}

/// A bare item together with its parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Item {
    pub bare_item: BareItem,
    pub params: Parameters,
}

impl Item {
    pub fn new(bare_item: impl Into<BareItem>) -> Self {
        Item {
            bare_item: bare_item.into(),
            params: Parameters::new(),
        }
    }

    pub fn with_params(bare_item: impl Into<BareItem>, params: Parameters) -> Self {
        Item {
            bare_item: bare_item.into(),
            params,
        }
    }

    /// Adds a parameter, overwriting an existing one with the same key in place.
    #[must_use]
    pub fn with_param(mut self, key: &str, value: impl Into<BareItem>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }
}

/// A parenthesized list of items; its parameters belong to the list as a whole.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InnerList {
    pub items: Vec<Item>,
    pub params: Parameters,
}

impl InnerList {
    pub fn new(items: Vec<Item>) -> Self {
        InnerList {
            items,
            params: Parameters::new(),
        }
    }

    pub fn with_params(items: Vec<Item>, params: Parameters) -> Self {
        InnerList { items, params }
    }

    #[must_use]
    pub fn with_param(mut self, key: &str, value: impl Into<BareItem>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }
}

/// A member of a List or Dictionary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListEntry {
    Item(Item),
    InnerList(InnerList),
}

impl ListEntry {
    #[must_use]
    pub fn params(&self) -> &Parameters {
        match self {
            ListEntry::Item(item) => &item.params,
            ListEntry::InnerList(list) => &list.params,
        }
    }

    #[must_use]
    pub fn as_item(&self) -> Option<&Item> {
        match self {
            ListEntry::Item(item) => Some(item),
            ListEntry::InnerList(_) => None,
        }
    }

    #[must_use]
    pub fn as_inner_list(&self) -> Option<&InnerList> {
        match self {
            ListEntry::InnerList(list) => Some(list),
            ListEntry::Item(_) => None,
        }
    }
}

impl From<Item> for ListEntry {
    fn from(item: Item) -> Self {
        ListEntry::Item(item)
    }
}

impl From<InnerList> for ListEntry {
    fn from(list: InnerList) -> Self {
        ListEntry::InnerList(list)
    }
}

/// A complete structured field value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    List(List),
    Dictionary(Dictionary),
    Item(Item),
}

impl Value {
    #[must_use]
    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            Value::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_item(&self) -> Option<&Item> {
        match self {
            Value::Item(item) => Some(item),
            _ => None,
        }
    }

    /// Empty lists and dictionaries are not serialized at all.
    #[must_use]
    pub fn is_empty_container(&self) -> bool {
        match self {
            Value::List(list) => list.is_empty(),
            Value::Dictionary(dict) => dict.is_empty(),
            Value::Item(_) => false,
        }
    }
}

impl From<List> for Value {
    fn from(list: List) -> Self {
        Value::List(list)
    }
}

impl From<Dictionary> for Value {
    fn from(dict: Dictionary) -> Self {
        Value::Dictionary(dict)
    }
}

impl From<Item> for Value {
    fn from(item: Item) -> Self {
        Value::Item(item)
    }
}

// JSON view, in the layout of the public structured field test fixtures.

impl Serialize for BareItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            BareItem::Integer(v) => serializer.serialize_i64(*v),
            BareItem::Decimal(d) => serializer.serialize_f64(d.to_f64()),
            BareItem::String(s) => serializer.serialize_str(s),
            BareItem::Token(t) => {
                let mut state = serializer.serialize_struct("Token", 2)?;
                state.serialize_field("__type", "token")?;
                state.serialize_field("value", t.as_str())?;
                state.end()
            }
            BareItem::ByteSequence(bytes) => {
                let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
                let mut state = serializer.serialize_struct("ByteSequence", 2)?;
                state.serialize_field("__type", "binary")?;
                state.serialize_field("value", &encoded)?;
                state.end()
            }
            BareItem::Boolean(b) => serializer.serialize_bool(*b),
        }
    }
}

impl Serialize for Item {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        (&self.bare_item, &self.params).serialize(serializer)
    }
}

impl Serialize for InnerList {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        (&self.items, &self.params).serialize(serializer)
    }
}

impl Serialize for ListEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ListEntry::Item(item) => item.serialize(serializer),
            ListEntry::InnerList(list) => list.serialize(serializer),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::List(list) => list.serialize(serializer),
            Value::Dictionary(dict) => dict.serialize(serializer),
            Value::Item(item) => item.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(v: f64) -> Decimal {
        Decimal::try_from(v).unwrap()
    }

    #[test]
    fn test_decimal_display() {
        assert_eq!(Decimal::from_thousandths(1000).to_string(), "1.0");
        assert_eq!(Decimal::from_thousandths(1123).to_string(), "1.123");
        assert_eq!(Decimal::from_thousandths(1500).to_string(), "1.5");
        assert_eq!(Decimal::from_thousandths(1050).to_string(), "1.05");
        assert_eq!(Decimal::from_thousandths(0).to_string(), "0.0");
        assert_eq!(Decimal::from_thousandths(-5).to_string(), "-0.005");
        assert_eq!(Decimal::from_thousandths(-123_456).to_string(), "-123.456");
    }

    #[test]
    fn test_decimal_from_f64_exact() {
        assert_eq!(dec(1.123).thousandths(), 1123);
        assert_eq!(dec(-2.5).thousandths(), -2500);
        assert_eq!(dec(0.0).thousandths(), 0);
        assert_eq!(dec(-0.0).thousandths(), 0);
        assert_eq!(dec(999_999_999_999.999).thousandths(), 999_999_999_999_999);
    }

    #[test]
    fn test_decimal_rounds_half_to_even() {
        // Tie: kept digit 0 is even, stays.
        assert_eq!(dec(1.0005).thousandths(), 1000);
        // Tie: kept digit 1 is odd, rounds up.
        assert_eq!(dec(1.0015).thousandths(), 1002);
        assert_eq!(dec(1.0025).thousandths(), 1002);
        // Not a tie.
        assert_eq!(dec(1.00051).thousandths(), 1001);
        assert_eq!(dec(1.0004).thousandths(), 1000);
        assert_eq!(dec(1.0006).thousandths(), 1001);
        // Carry into the integer part.
        assert_eq!(dec(0.9999).thousandths(), 1000);
        assert_eq!(dec(-1.0015).thousandths(), -1002);
    }

    #[test]
    fn test_decimal_rejects_non_finite() {
        assert!(matches!(
            Decimal::try_from(f64::NAN),
            Err(Error::DecimalOutOfRange(_))
        ));
        assert!(matches!(
            Decimal::try_from(f64::INFINITY),
            Err(Error::DecimalOutOfRange(_))
        ));
        assert!(matches!(
            Decimal::try_from(1e300),
            Err(Error::DecimalOutOfRange(_))
        ));
    }

    #[test]
    fn test_decimal_serializable_range() {
        assert!(Decimal::from_thousandths(MAX_DECIMAL_THOUSANDTHS).is_serializable());
        assert!(!Decimal::from_thousandths(MAX_DECIMAL_THOUSANDTHS + 1).is_serializable());
        assert!(!dec(1e12).is_serializable());
    }

    #[test]
    fn test_bare_item_accessors() {
        assert_eq!(BareItem::from(true).as_bool(), Some(true));
        assert_eq!(BareItem::from(vec![1u8, 2]).as_bytes(), Some(&[1u8, 2][..]));
        assert_eq!(BareItem::from("s").as_token(), None);
        assert!(BareItem::from(Token::new("t")).is_token());
        assert!(BareItem::from(Decimal::from_thousandths(1)).is_decimal());
        assert!(BareItem::from(3i64).is_integer());
    }

    #[test]
    fn test_item_builder_overwrites_params() {
        let item = Item::new(1).with_param("a", 1).with_param("b", 2).with_param("a", 3);
        let keys: Vec<_> = item.params.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(item.params.get("a"), Some(&BareItem::Integer(3)));
    }

    #[test]
    fn test_empty_container_detection() {
        assert!(Value::List(vec![]).is_empty_container());
        assert!(Value::Dictionary(Dictionary::new()).is_empty_container());
        assert!(!Value::Item(Item::new(true)).is_empty_container());
    }
}
