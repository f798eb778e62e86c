//! String escapes
//!
//! [`decode`] turns the raw text between two quotes into its value and
//! [`escape_into`] does the reverse for serialization.

use std::borrow::Cow;
use std::fmt::Write;

/// Decode the escapes in a raw JSON string body
///
/// - `\" \\ \/ \b \f \n \r \t` map to their characters
/// - `\uXXXX` yields a UTF-16 code unit; surrogate pairs are combined and
///   lone surrogates become U+FFFD
/// - an invalid or truncated `\u` keeps the `u` and the text after it
/// - any other escaped character is kept as is
/// - a trailing lone `\` is dropped
pub fn decode(raw: &str) -> Cow<'_, str> {
    let Some(first) = memchr::memchr(b'\\', raw.as_bytes()) else {
        return Cow::Borrowed(raw);
    };

    let mut out = String::with_capacity(raw.len());
    out.push_str(&raw[..first]);
    let mut rest = &raw[first..];

    while let Some(pos) = memchr::memchr(b'\\', rest.as_bytes()) {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let mut chars = after.chars();
        let Some(c) = chars.next() else {
            // trailing backslash
            rest = "";
            break;
        };
        rest = chars.as_str();
        match c {
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'u' => match hex4(rest) {
                Some(unit) => {
                    rest = &rest[4..];
                    rest = decode_unit(unit, rest, &mut out);
                }
                None => out.push('u'),
            },
            other => out.push(other),
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Push the character for `unit`, pairing a high surrogate with a following
/// `\uDC00..=\uDFFF` escape when present
fn decode_unit<'a>(unit: u16, rest: &'a str, out: &mut String) -> &'a str {
    match unit {
        0xD800..=0xDBFF => {
            let low = rest
                .strip_prefix("\\u")
                .and_then(hex4)
                .filter(|low| (0xDC00..=0xDFFF).contains(low));
            match low {
                Some(low) => {
                    let c = 0x10000
                        + ((u32::from(unit) - 0xD800) << 10)
                        + (u32::from(low) - 0xDC00);
                    out.push(char::from_u32(c).unwrap_or(char::REPLACEMENT_CHARACTER));
                    &rest[6..]
                }
                None => {
                    out.push(char::REPLACEMENT_CHARACTER);
                    rest
                }
            }
        }
        _ => {
            out.push(char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER));
            rest
        }
    }
}

/// Four hex digits at the start of `s`
fn hex4(s: &str) -> Option<u16> {
    let digits = s.get(..4)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(digits, 16).ok()
}

/// Append `s` to `out` with JSON escaping
///
/// Escapes `"`, `\` and `/`, the short control escapes `\b \f \n \r \t`,
/// and every code point above 255 as lowercase `\uXXXX` UTF-16 units.
pub fn escape_into(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '/' => out.push_str("\\/"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if u32::from(c) > 0xFF => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{:04x}", unit);
                }
            }
            c => out.push(c),
        }
    }
}

/// `s` with JSON escaping applied
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    escape_into(s, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_without_escapes_borrows() {
        assert!(matches!(decode("plain text"), Cow::Borrowed("plain text")));
    }

    #[test]
    fn test_decode_short_escapes() {
        assert_eq!(decode(r#"x\"y"#), "x\"y");
        assert_eq!(decode(r"a\\b\/c"), "a\\b/c");
        assert_eq!(decode(r"\b\f\n\r\t"), "\u{8}\u{c}\n\r\t");
    }

    #[test]
    fn test_decode_unicode() {
        assert_eq!(decode(r"\u0041\u00e9"), "Aé");
        assert_eq!(decode(r"\u00E9"), "é");
        assert_eq!(decode(r"\ud83d\ude00!"), "😀!");
    }

    #[test]
    fn test_decode_lone_surrogates() {
        assert_eq!(decode(r"\ud83dx"), "\u{FFFD}x");
        assert_eq!(decode(r"\ude00"), "\u{FFFD}");
        assert_eq!(decode(r"\ud83d\u0041"), "\u{FFFD}A");
    }

    #[test]
    fn test_decode_invalid_unicode() {
        assert_eq!(decode(r"\u12"), "u12");
        assert_eq!(decode(r"\uzzzz"), "uzzzz");
    }

    #[test]
    fn test_decode_unknown_escape_keeps_char() {
        assert_eq!(decode(r"\q\é"), "qé");
    }

    #[test]
    fn test_decode_trailing_backslash() {
        assert_eq!(decode("abc\\"), "abc");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a\"b\\c/d"), r#"a\"b\\c\/d"#);
        assert_eq!(escape("\u{8}\u{c}\n\r\t"), r"\b\f\n\r\t");
        assert_eq!(escape("é"), "é");
        assert_eq!(escape("Ā"), r"\u0100");
        assert_eq!(escape("😀"), r"\ud83d\ude00");
    }

    #[test]
    fn test_escape_then_decode() {
        for s in ["", "plain", "q\"uote", "tab\tnew\nline", "😀 ☃ é /"] {
            assert_eq!(decode(&escape(s)), s);
        }
    }
}
