//! Character classes used by the structured field grammar.
//!
//! All predicates operate on single bytes; the grammar is ASCII-only.

/// `ALPHA = %x41-5A / %x61-7A`
#[inline]
pub const fn is_alpha(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

/// `DIGIT = %x30-39`
#[inline]
pub const fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

/// `lcalpha = %x61-7A`
#[inline]
pub const fn is_lcalpha(b: u8) -> bool {
    b.is_ascii_lowercase()
}

/// `tchar` from RFC 7230: letters, digits and ``!#$%&'*+-.^_`|~``.
#[inline]
pub const fn is_tchar(b: u8) -> bool {
    matches!(
        b,
        b'!' | b'#'
            | b'$'
            | b'%'
            | b'&'
            | b'\''
            | b'*'
            | b'+'
            | b'-'
            | b'.'
            | b'^'
            | b'_'
            | b'`'
            | b'|'
            | b'~'
    ) || b.is_ascii_alphanumeric()
}

/// First character of a token.
#[inline]
pub const fn is_token_start(b: u8) -> bool {
    is_alpha(b) || b == b'*'
}

/// Any character after the first in a token.
#[inline]
pub const fn is_token_char(b: u8) -> bool {
    is_tchar(b) || b == b':' || b == b'/'
}

/// First character of a key.
#[inline]
pub const fn is_key_start(b: u8) -> bool {
    is_lcalpha(b) || b == b'*'
}

/// Any character after the first in a key.
#[inline]
pub const fn is_key_char(b: u8) -> bool {
    is_lcalpha(b) || is_digit(b) || matches!(b, b'_' | b'-' | b'.' | b'*')
}

/// `VCHAR / SP`: the characters allowed unescaped inside a string.
#[inline]
pub const fn is_string_char(b: u8) -> bool {
    matches!(b, 0x20..=0x7e)
}

/// Characters of the standard base64 alphabet, including padding.
#[inline]
pub const fn is_base64_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'=')
}

/// `OWS = *( SP / HTAB )`
#[inline]
pub const fn is_ows(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Returns `true` if `s` matches the token grammar.
pub fn is_valid_token(s: &str) -> bool {
    let bytes = s.as_bytes();
    match bytes.split_first() {
        Some((&first, rest)) => is_token_start(first) && rest.iter().all(|&b| is_token_char(b)),
        None => false,
    }
}

/// Returns `true` if `s` matches the key grammar.
pub fn is_valid_key(s: &str) -> bool {
    let bytes = s.as_bytes();
    match bytes.split_first() {
        Some((&first, rest)) => is_key_start(first) && rest.iter().all(|&b| is_key_char(b)),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tchar_excludes_delimiters() {
        for b in b"\"(),/:;<=>?@[\\]{} \t".iter().copied() {
            assert!(!is_tchar(b), "{:?} should not be a tchar", b as char);
        }
        for b in b"!#$%&'*+-.^_`|~aZ09".iter().copied() {
            assert!(is_tchar(b), "{:?} should be a tchar", b as char);
        }
    }

    #[test]
    fn test_token_grammar() {
        assert!(is_valid_token("text/html"));
        assert!(is_valid_token("*foo:bar"));
        assert!(is_valid_token("Foo"));
        assert!(!is_valid_token(""));
        assert!(!is_valid_token("1abc"));
        assert!(!is_valid_token("a b"));
        assert!(!is_valid_token("a\"b"));
    }

    #[test]
    fn test_key_grammar() {
        assert!(is_valid_key("a"));
        assert!(is_valid_key("*"));
        assert!(is_valid_key("a1_-.*"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("A"));
        assert!(!is_valid_key("1a"));
        assert!(!is_valid_key("aB"));
        assert!(!is_valid_key("a/b"));
    }

    #[test]
    fn test_string_chars() {
        assert!(is_string_char(b' '));
        assert!(is_string_char(b'~'));
        assert!(!is_string_char(0x1f));
        assert!(!is_string_char(0x7f));
        assert!(!is_string_char(b'\t'));
    }

    #[test]
    fn test_base64_alphabet() {
        assert!(is_base64_char(b'+'));
        assert!(is_base64_char(b'/'));
        assert!(is_base64_char(b'='));
        assert!(!is_base64_char(b'-'));
        assert!(!is_base64_char(b'_'));
        assert!(!is_base64_char(b'\n'));
    }
}
