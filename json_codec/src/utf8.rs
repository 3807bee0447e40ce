//! UTF-8 validation and JSON string escaping.
//!
//! [`validate`] is the single source of truth for what counts as valid string
//! data in a [`Value`](crate::Value). Escape decoding is shared with the
//! scanner through [`simple_escape`], [`decode_hex4`] and
//! [`encode_code_point`].

use crate::error::EscapeError;

/// Returns true if `bytes` is well-formed UTF-8.
///
/// Rejects invalid leading bytes, bad or missing continuation bytes,
/// overlong encodings, surrogate code points and anything above U+10FFFF.
pub fn validate(bytes: &[u8]) -> bool {
    let mut i = 0;

    while i < bytes.len() {
        let lead = bytes[i];

        // Sequence length, payload bits of the lead byte and the smallest
        // code point that may use that length
        let (len, mut code_point, min) = match lead {
            b if b & 0x80 == 0x00 => {
                i += 1;
                continue;
            }
            b if b & 0xE0 == 0xC0 => (2, u32::from(b & 0x1F), 0x80),
            b if b & 0xF0 == 0xE0 => (3, u32::from(b & 0x0F), 0x800),
            b if b & 0xF8 == 0xF0 => (4, u32::from(b & 0x07), 0x10000),
            _ => return false,
        };

        let Some(continuation) = bytes.get(i + 1..i + len) else {
            return false;
        };

        for &byte in continuation {
            if byte & 0xC0 != 0x80 {
                return false;
            }
            code_point = (code_point << 6) | u32::from(byte & 0x3F);
        }

        if code_point < min || code_point > 0x10FFFF {
            return false;
        }
        if (0xD800..=0xDFFF).contains(&code_point) {
            return false;
        }

        i += len;
    }

    true
}

/// Quotes `input` as a JSON string literal.
pub fn escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len() + 2);
    escape_into(&mut escaped, input);
    escaped
}

pub(crate) fn escape_into(out: &mut String, input: &str) {
    const HEX: &[u8; 16] = b"0123456789abcdef";

    out.push('"');

    // Only ASCII is ever replaced, so copy everything between escapes in runs
    let bytes = input.as_bytes();
    let mut run_start = 0;
    for (i, &byte) in bytes.iter().enumerate() {
        let replacement = match byte {
            b'"' => "\\\"",
            b'\\' => "\\\\",
            0x08 => "\\b",
            0x0C => "\\f",
            b'\n' => "\\n",
            b'\r' => "\\r",
            b'\t' => "\\t",
            0x00..=0x1F => "",
            _ => continue,
        };

        out.push_str(&input[run_start..i]);
        if replacement.is_empty() {
            out.push_str("\\u00");
            out.push(char::from(HEX[usize::from(byte >> 4)]));
            out.push(char::from(HEX[usize::from(byte & 0x0F)]));
        } else {
            out.push_str(replacement);
        }
        run_start = i + 1;
    }
    out.push_str(&input[run_start..]);

    out.push('"');
}

/// Decodes a quoted JSON string literal, including its escape sequences.
///
/// `\uXXXX` escapes are decoded one at a time. Surrogate pairs are not
/// combined, so an escaped surrogate half fails with [`EscapeError::InvalidUtf8`].
pub fn unescape(input: &str) -> Result<String, EscapeError> {
    let bytes = input.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'"' || bytes[bytes.len() - 1] != b'"' {
        return Err(EscapeError::NotQuoted);
    }

    let end = bytes.len() - 1;
    let mut result = Vec::with_capacity(end - 1);
    let mut i = 1;

    while i < end {
        let byte = bytes[i];
        i += 1;

        if byte != b'\\' {
            result.push(byte);
            continue;
        }

        let escape_start = i - 1;
        if i >= end {
            return Err(EscapeError::InvalidEscape {
                position: escape_start,
            });
        }

        let next = bytes[i];
        i += 1;

        if next == b'u' {
            let code_point = bytes
                .get(i..i + 4)
                .filter(|_| i + 4 <= end)
                .and_then(decode_hex4)
                .ok_or(EscapeError::InvalidUnicodeEscape {
                    position: escape_start,
                })?;
            encode_code_point(code_point, &mut result);
            i += 4;
            continue;
        }

        let value = simple_escape(next).ok_or(EscapeError::InvalidEscape {
            position: escape_start,
        })?;
        result.push(value);
    }

    if !validate(&result) {
        return Err(EscapeError::InvalidUtf8);
    }
    String::from_utf8(result).map_err(|_| EscapeError::InvalidUtf8)
}

/// Maps the character after a backslash to the byte it stands for.
/// `u` is not handled here.
pub(crate) fn simple_escape(byte: u8) -> Option<u8> {
    match byte {
        b'"' => Some(b'"'),
        b'\\' => Some(b'\\'),
        b'/' => Some(b'/'),
        b'b' => Some(0x08),
        b'f' => Some(0x0C),
        b'n' => Some(b'\n'),
        b'r' => Some(b'\r'),
        b't' => Some(b'\t'),
        _ => None,
    }
}

/// Parses exactly four hex digits (either case).
pub(crate) fn decode_hex4(digits: &[u8]) -> Option<u32> {
    if digits.len() != 4 {
        return None;
    }

    digits.iter().try_fold(0u32, |acc, &digit| {
        let nibble = match digit {
            b'0'..=b'9' => digit - b'0',
            b'a'..=b'f' => digit - b'a' + 10,
            b'A'..=b'F' => digit - b'A' + 10,
            _ => return None,
        };
        Some((acc << 4) | u32::from(nibble))
    })
}

/// Appends the UTF-8 encoding of `code_point` to `out`.
///
/// Surrogates are encoded like any other code point, so callers must run
/// [`validate`] over the result.
pub(crate) fn encode_code_point(code_point: u32, out: &mut Vec<u8>) {
    // Truncating casts are intended: each byte keeps only the masked bits
    match code_point {
        0..=0x7F => out.push(code_point as u8),
        0x80..=0x7FF => {
            out.push(0xC0 | ((code_point >> 6) & 0x1F) as u8);
            out.push(0x80 | (code_point & 0x3F) as u8);
        }
        0x800..=0xFFFF => {
            out.push(0xE0 | ((code_point >> 12) & 0x0F) as u8);
            out.push(0x80 | ((code_point >> 6) & 0x3F) as u8);
            out.push(0x80 | (code_point & 0x3F) as u8);
        }
        0x10000..=0x10FFFF => {
            out.push(0xF0 | ((code_point >> 18) & 0x07) as u8);
            out.push(0x80 | ((code_point >> 12) & 0x3F) as u8);
            out.push(0x80 | ((code_point >> 6) & 0x3F) as u8);
            out.push(0x80 | (code_point & 0x3F) as u8);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(b"" ; "empty")]
    #[test_case(b"plain ascii" ; "ascii")]
    #[test_case(b"\x7F" ; "u007f")]
    #[test_case(b"\xC2\x80" ; "u0080")]
    #[test_case(b"\xE0\xA0\x80" ; "u0800")]
    #[test_case(b"\xED\x9F\xBF" ; "ud7ff")]
    #[test_case(b"\xEE\x80\x80" ; "ue000")]
    #[test_case(b"\xEF\xBF\xBF" ; "uffff")]
    #[test_case(b"\xF0\x90\x80\x80" ; "u10000")]
    #[test_case(b"\xF4\x8F\xBF\xBF" ; "u10ffff")]
    #[test_case("Emoji 😄, 中文, العربية".as_bytes() ; "mixed script")]
    fn test_validate_accepts(bytes: &[u8]) {
        assert!(validate(bytes));
    }

    #[test_case(b"\x80" ; "lone continuation")]
    #[test_case(b"\xC2" ; "truncated two byte")]
    #[test_case(b"\xE0\xA0" ; "truncated three byte")]
    #[test_case(b"\xF0\x90\x80" ; "truncated four byte")]
    #[test_case(b"\xC2\x41" ; "bad continuation")]
    #[test_case(b"\xC0\x80" ; "overlong nul")]
    #[test_case(b"\xC1\xBF" ; "overlong two byte")]
    #[test_case(b"\xE0\x9F\xBF" ; "overlong three byte")]
    #[test_case(b"\xF0\x8F\xBF\xBF" ; "overlong four byte")]
    #[test_case(b"\xED\xA0\x80" ; "high surrogate")]
    #[test_case(b"\xED\xBF\xBF" ; "low surrogate")]
    #[test_case(b"\xF4\x90\x80\x80" ; "above max")]
    #[test_case(b"\xF8\x88\x80\x80\x80" ; "five byte lead")]
    #[test_case(b"\xFF" ; "invalid lead")]
    #[test_case(b"ok\xC3" ; "truncated after ascii")]
    fn test_validate_rejects(bytes: &[u8]) {
        assert!(!validate(bytes));
    }

    #[test]
    fn test_escape() {
        let cases = vec![
            ("", r#""""#),
            ("plain", r#""plain""#),
            ("a\n", r#""a\n""#),
            ("quote\"back\\slash", r#""quote\"back\\slash""#),
            ("\x08\x0C\r\t", r#""\b\f\r\t""#),
            ("\x00\x01\x1F", r#""\u0000\u0001\u001f""#),
            ("/ stays", r#""/ stays""#),
            ("\x7F", "\"\x7F\""),
            ("héllo 😄", "\"héllo 😄\""),
        ];

        for (input, expected) in cases {
            assert_eq!(expected, escape(input), "escaping {input:?}");
        }
    }

    #[test]
    fn test_unescape() {
        let cases = vec![
            (r#""""#, ""),
            (r#""plain""#, "plain"),
            (r#""a\nb""#, "a\nb"),
            (r#""\"\\\/\b\f\n\r\t""#, "\"\\/\x08\x0C\n\r\t"),
            (r#""\u00A9""#, "©"),
            (r#""\u00a9""#, "©"),
            (r#""\u0041\u0042C""#, "ABC"),
            (r#""\u4E2D""#, "中"),
            (r#""\uFFFF""#, "\u{FFFF}"),
            ("\"raw 😄\"", "raw 😄"),
        ];

        for (input, expected) in cases {
            assert_eq!(Ok(expected.to_string()), unescape(input), "unescaping {input}");
        }
    }

    #[test]
    fn test_unescape_requires_quotes() {
        for input in ["", "\"", "abc", "\"abc", "abc\""] {
            assert_eq!(Err(EscapeError::NotQuoted), unescape(input), "{input:?}");
        }
    }

    #[test]
    fn test_unescape_invalid() {
        let cases = vec![
            (r#""bad\escape""#, EscapeError::InvalidEscape { position: 4 }),
            (r#""\x""#, EscapeError::InvalidEscape { position: 1 }),
            (r#""trailing\""#, EscapeError::InvalidEscape { position: 9 }),
            (r#""\uZZZZ""#, EscapeError::InvalidUnicodeEscape { position: 1 }),
            (r#""\u12""#, EscapeError::InvalidUnicodeEscape { position: 1 }),
            (r#""\u+123""#, EscapeError::InvalidUnicodeEscape { position: 1 }),
        ];

        for (input, expected) in cases {
            assert_eq!(Err(expected), unescape(input), "unescaping {input}");
        }
    }

    #[test]
    fn test_unescape_does_not_combine_surrogate_pairs() {
        assert_eq!(Err(EscapeError::InvalidUtf8), unescape(r#""\uD83D\uDE00""#));
        assert_eq!(Err(EscapeError::InvalidUtf8), unescape(r#""\uD800""#));
    }

    #[test]
    fn test_escape_then_unescape_control_characters() {
        let input = "tab\tnul\x00unit\x1F";
        assert_eq!(Ok(input.to_string()), unescape(&escape(input)));
    }

    #[test]
    fn test_encode_code_point_lengths() {
        for (code_point, len) in [(0x41, 1), (0x7FF, 2), (0x800, 3), (0xFFFF, 3), (0x10FFFF, 4)] {
            let mut out = Vec::new();
            encode_code_point(code_point, &mut out);
            assert_eq!(len, out.len(), "U+{code_point:04X}");
            assert!(validate(&out));
        }
    }
}
