//! Text helpers shared by the walker, the renderers, and the CLI.

use std::borrow::Cow;

/// Decode bytes to a string, handling editor exports saved in legacy encodings.
///
/// This function:
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. If malformed, tries the hint encoding (from a `<meta charset>` or caller)
/// 3. Falls back to Windows-1252
///
/// Uses `Cow<str>` to avoid allocation when the input is valid UTF-8.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Collapse every run of whitespace to a single space and trim both ends.
///
/// Mirrors how a browser renders inline text, so `"  Jane\n   Doe "`
/// becomes `"Jane Doe"`. Non-whitespace control characters are dropped.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        let word = strip_control_chars(word);
        if word.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&word);
    }
    out
}

/// Remove control characters other than whitespace.
///
/// XML 1.0 forbids most of the C0 range, so these must never reach a
/// WordprocessingML part.
pub fn strip_control_chars(text: &str) -> Cow<'_, str> {
    if !text.chars().any(is_stray_control) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.chars().filter(|&c| !is_stray_control(c)).collect())
}

fn is_stray_control(c: char) -> bool {
    c.is_control() && !c.is_whitespace()
}

/// Encode a single character as a WinAnsi (Windows-1252) byte.
///
/// Characters outside the code page map to `?`.
pub fn win_ansi_byte(ch: char) -> u8 {
    if ch.is_ascii() {
        return ch as u8;
    }
    let mut buf = [0u8; 4];
    let (bytes, _, unmappable) = encoding_rs::WINDOWS_1252.encode(ch.encode_utf8(&mut buf));
    match (unmappable, bytes.as_ref()) {
        (false, [byte]) => *byte,
        _ => b'?',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        assert_eq!(decode_text("Jane Doe".as_bytes(), None), "Jane Doe");
    }

    #[test]
    fn test_decode_windows_1252_fallback() {
        // 0xE9 is "é" in Windows-1252 and malformed as UTF-8
        let bytes = b"Caf\xE9";
        assert_eq!(decode_text(bytes, None), "Café");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  Jane\n\t  Doe  "), "Jane Doe");
        assert_eq!(collapse_whitespace("   "), "");
        assert_eq!(collapse_whitespace("Jane\u{1}Doe \u{1f} Lead"), "JaneDoe Lead");
    }

    #[test]
    fn test_strip_control_chars() {
        assert!(matches!(strip_control_chars("Jane Doe"), Cow::Borrowed(_)));
        assert_eq!(strip_control_chars("a\u{0}b\u{8}c\u{7f}d"), "abcd");
        assert_eq!(strip_control_chars("tab\tline\n"), "tab\tline\n");
    }

    #[test]
    fn test_win_ansi_byte() {
        assert_eq!(win_ansi_byte('A'), b'A');
        assert_eq!(win_ansi_byte('•'), 0x95);
        assert_eq!(win_ansi_byte('é'), 0xE9);
        assert_eq!(win_ansi_byte('—'), 0x97);
        assert_eq!(win_ansi_byte('中'), b'?');
    }
}
