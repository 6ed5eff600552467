//! Code page utilities for receipt printers
//!
//! Receipt printers do not understand UTF-8. Text is sent in Windows-1252
//! (ESC/POS code table 16, "WPC1252"), which covers French accents and the
//! Euro sign. This module provides utilities for:
//! - Stripping control characters from caller text
//! - Truncating/padding strings to fixed column widths
//! - Converting UTF-8 to WPC1252 while preserving ESC/POS commands

use tracing::instrument;

/// ESC t 16 - select character code table WPC1252
const SELECT_WPC1252: [u8; 3] = [0x1B, 0x74, 0x10];

/// Make caller text safe to print as a single line
///
/// Line breaks and tabs become spaces. Every other control character
/// (ESC, GS, NUL, C1) is dropped, so text can never carry a printer command.
pub fn sanitize_text(s: &str) -> String {
    s.chars()
        .filter_map(|c| match c {
            '\n' | '\r' | '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// Truncate a string to at most `max_chars` characters
///
/// Counts Unicode scalar values, so accented names never split mid-character.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

/// Pad a string with trailing spaces to exactly `width` characters
///
/// If the string is longer than the width, it will be truncated.
pub fn pad_right(s: &str, width: usize) -> String {
    let truncated = truncate_chars(s, width);
    let len = truncated.chars().count();
    format!("{}{}", truncated, " ".repeat(width - len))
}

/// Pad a string with leading spaces to at least `width` characters
///
/// Longer strings are returned unchanged, so amounts are never cut.
pub fn pad_left(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        return s.to_string();
    }
    format!("{}{}", " ".repeat(width - len), s)
}

/// Convert mixed UTF-8 content (with ESC/POS commands) to WPC1252
///
/// This function preserves ASCII bytes (0x00-0x7F) exactly as is,
/// which protects ESC/POS commands from being corrupted.
/// Only bytes >= 0x80 are treated as UTF-8 sequences and converted.
///
/// The code table is selected at the start and re-selected after every
/// INIT command (ESC @), which resets it to the printer default.
#[instrument(skip(bytes), fields(len = bytes.len()))]
pub fn encode_for_printer(bytes: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(bytes.len() + 8);
    result.extend_from_slice(&SELECT_WPC1252);

    let mut buffer = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if b == 0x1B && i + 1 < bytes.len() && bytes[i + 1] == 0x40 {
            flush_buffer(&mut buffer, &mut result);

            result.push(0x1B);
            result.push(0x40);
            result.extend_from_slice(&SELECT_WPC1252);

            i += 2;
            continue;
        }

        if b < 128 {
            flush_buffer(&mut buffer, &mut result);
            result.push(b);
        } else {
            buffer.push(b);
        }
        i += 1;
    }

    flush_buffer(&mut buffer, &mut result);

    result
}

/// Flush the non-ASCII buffer, converting UTF-8 to WPC1252
///
/// Characters outside the code page become '?'.
fn flush_buffer(buffer: &mut Vec<u8>, result: &mut Vec<u8>) {
    if buffer.is_empty() {
        return;
    }

    let s = String::from_utf8_lossy(buffer);
    let mut tmp = [0u8; 4];
    for c in s.chars() {
        let (encoded, _, had_errors) = encoding_rs::WINDOWS_1252.encode(c.encode_utf8(&mut tmp));
        if had_errors {
            result.push(b'?');
        } else {
            result.extend_from_slice(&encoded);
        }
    }
    buffer.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello world", 5), "hello");
        assert_eq!(truncate_chars("Crème brûlée", 8), "Crème br");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }

    #[test]
    fn test_sanitize_text() {
        assert_eq!(sanitize_text("Thé\nMenthe\x1dV\x00"), "Thé MentheV");
        assert_eq!(sanitize_text("a\tb\r\n"), "a b  ");
        assert_eq!(sanitize_text("\x1b@\x1bd\x7f\u{9b}"), "@d");
        assert_eq!(sanitize_text("Crème brûlée €"), "Crème brûlée €");
    }

    #[test]
    fn test_pad() {
        assert_eq!(pad_right("hi", 5), "hi   ");
        assert_eq!(pad_right("hello world", 5), "hello");
        assert_eq!(pad_left("hi", 5), "   hi");
        assert_eq!(pad_left("1234567", 5), "1234567");
        assert_eq!(pad_left("Qté", 5), "  Qté");
    }

    #[test]
    fn test_encode_accents() {
        let data = encode_for_printer("Café".as_bytes());
        assert_eq!(data, vec![0x1B, 0x74, 0x10, b'C', b'a', b'f', 0xE9]);
    }

    #[test]
    fn test_encode_reselects_after_init() {
        let data = encode_for_printer(&[0x1B, 0x40, b'A']);
        assert_eq!(
            data,
            vec![0x1B, 0x74, 0x10, 0x1B, 0x40, 0x1B, 0x74, 0x10, b'A']
        );
    }

    #[test]
    fn test_encode_unmappable() {
        let data = encode_for_printer("宫".as_bytes());
        assert_eq!(&data[3..], b"?");
    }
}
