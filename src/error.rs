//! Error types for structured field parsing and serialization.
//!
//! Every failure the codec can report is a named variant of [`Error`]. There is
//! no catch-all: callers (and conformance suites) can match on exactly the
//! condition that caused a field to be rejected.
//!
//! ## Error Categories
//!
//! - **Parse errors**: malformed input text. Each carries the byte `position`
//!   in the original input where the problem was detected.
//! - **Serialization errors**: a value tree that cannot be written in the
//!   canonical text form (out-of-range numbers, bad tokens or keys, non-ASCII
//!   strings).
//!
//! Failures are total: a parse error anywhere inside a field discards the whole
//! field, and a serialization error anywhere inside a value fails the whole call.
//!
//! ## Examples
//!
//! ```rust
//! use structured_fields::{parse_item, Error};
//!
//! let err = parse_item(b"\"unterminated").unwrap_err();
//! assert!(matches!(err, Error::UnterminatedString { .. }));
//! assert!(err.is_parse());
//! ```

use thiserror::Error;

/// Represents every way parsing or serializing a structured field can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input contained a byte outside the 7-bit ASCII range.
    #[error("non-ASCII byte at position {position}")]
    NonAsciiInput { position: usize },

    /// Input remained after the top-level value was parsed.
    #[error("unexpected trailing characters at position {position}")]
    TrailingGarbage { position: usize },

    /// The input ended where another character was required.
    #[error("unexpected end of input at position {position}")]
    UnexpectedEnd { position: usize },

    /// A bare item started with a character that begins no known item type.
    #[error("unrecognized item type at position {position}")]
    UnrecognizedItemType { position: usize },

    /// A number had no digits, or its first character after the sign was not a digit.
    #[error("empty or invalid number at position {position}")]
    EmptyOrInvalidNumber { position: usize },

    /// An integer had more than 15 digits.
    #[error("integer longer than 15 digits at position {position}")]
    IntegerTooLong { position: usize },

    /// A decimal had more than 12 digits before the decimal point.
    #[error("decimal integer part longer than 12 digits at position {position}")]
    DecimalIntegerPartTooLong { position: usize },

    /// A decimal had more than 16 characters in total.
    #[error("decimal longer than 16 characters at position {position}")]
    DecimalTooLong { position: usize },

    /// A decimal ended with its decimal point.
    #[error("decimal ends with '.' at position {position}")]
    TrailingDecimalPoint { position: usize },

    /// A decimal had more than three fractional digits.
    #[error("more than 3 fractional digits at position {position}")]
    TooManyFractionalDigits { position: usize },

    /// A backslash in a string was not followed by `"` or `\`.
    #[error("invalid escape sequence at position {position}")]
    InvalidEscape { position: usize },

    /// A string contained a byte in 0x00-0x1F or 0x7F-0xFF.
    #[error("control character in string at position {position}")]
    ControlCharacterInString { position: usize },

    /// A string had no closing quote.
    #[error("unterminated string starting at position {position}")]
    UnterminatedString { position: usize },

    /// A byte sequence had no closing colon.
    #[error("unterminated byte sequence starting at position {position}")]
    UnterminatedByteSequence { position: usize },

    /// A byte sequence contained a character outside the base64 alphabet.
    #[error("invalid base64 character at position {position}")]
    InvalidBase64Alphabet { position: usize },

    /// The byte sequence content was not decodable base64.
    #[error("base64 decode failed at position {position}: {reason}")]
    Base64DecodeError { position: usize, reason: String },

    /// `?` was not followed by `0` or `1`.
    #[error("invalid boolean at position {position}")]
    InvalidBoolean { position: usize },

    /// A key did not start with a lowercase letter or `*`.
    #[error("invalid key start at position {position}")]
    InvalidKeyStart { position: usize },

    /// An inner list member was followed by something other than SP or `)`.
    #[error("expected ' ' or ')' in inner list at position {position}")]
    MalformedInnerListSeparator { position: usize },

    /// An inner list had no closing parenthesis.
    #[error("unterminated inner list at position {position}")]
    UnterminatedInnerList { position: usize },

    /// List or dictionary members were not separated by a comma.
    #[error("expected ',' at position {position}")]
    ExpectedComma { position: usize },

    /// A list or dictionary ended with a comma.
    #[error("trailing comma at position {position}")]
    TrailingComma { position: usize },

    /// A field type name other than `list`, `dictionary` or `item`.
    #[error("unknown field type: {0}")]
    UnknownFieldType(String),

    /// An integer outside `-999,999,999,999,999..=999,999,999,999,999`.
    #[error("integer out of range: {0}")]
    IntegerOutOfRange(i64),

    /// A decimal whose integer part needs more than 12 digits, or a float that
    /// cannot be represented as a decimal at all.
    #[error("decimal out of range: {0}")]
    DecimalOutOfRange(String),

    /// A string or token containing characters that cannot be written.
    #[error("non-serializable character in {0:?}")]
    NonSerializableCharacter(String),

    /// A token that does not match the token grammar.
    #[error("invalid token: {0:?}")]
    InvalidToken(String),

    /// A dictionary or parameter key that does not match the key grammar.
    #[error("invalid key: {0:?}")]
    InvalidKey(String),
}

impl Error {
    /// Returns `true` if this error was raised while parsing text.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use structured_fields::Error;
    ///
    /// assert!(Error::TrailingComma { position: 3 }.is_parse());
    /// assert!(!Error::IntegerOutOfRange(1_000_000_000_000_000).is_parse());
    /// ```
    #[must_use]
    pub fn is_parse(&self) -> bool {
        self.position().is_some()
    }

    /// Returns `true` if this error was raised while serializing a value.
    #[must_use]
    pub fn is_serialize(&self) -> bool {
        matches!(
            self,
            Error::IntegerOutOfRange(_)
                | Error::DecimalOutOfRange(_)
                | Error::NonSerializableCharacter(_)
                | Error::InvalidToken(_)
                | Error::InvalidKey(_)
        )
    }

    /// The byte offset into the input at which a parse error was detected.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::NonAsciiInput { position }
            | Error::TrailingGarbage { position }
            | Error::UnexpectedEnd { position }
            | Error::UnrecognizedItemType { position }
            | Error::EmptyOrInvalidNumber { position }
            | Error::IntegerTooLong { position }
            | Error::DecimalIntegerPartTooLong { position }
            | Error::DecimalTooLong { position }
            | Error::TrailingDecimalPoint { position }
            | Error::TooManyFractionalDigits { position }
            | Error::InvalidEscape { position }
            | Error::ControlCharacterInString { position }
            | Error::UnterminatedString { position }
            | Error::UnterminatedByteSequence { position }
            | Error::InvalidBase64Alphabet { position }
            | Error::Base64DecodeError { position, .. }
            | Error::InvalidBoolean { position }
            | Error::InvalidKeyStart { position }
            | Error::MalformedInnerListSeparator { position }
            | Error::UnterminatedInnerList { position }
            | Error::ExpectedComma { position }
            | Error::TrailingComma { position } => Some(*position),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
