//! ESC/POS encoding
//!
//! Command table plus the encoder that turns [`PrintOp`]s into printer data.

use crate::document::{Alignment, PrintOp};
use crate::encoding::encode_for_printer;

/// Command prefixes, argument byte follows
pub(crate) mod cmd {
    /// ESC @
    pub const INIT: [u8; 2] = [0x1B, 0x40];
    /// ESC a n
    pub const ALIGN: [u8; 2] = [0x1B, 0x61];
    /// ESC E n
    pub const EMPHASIS: [u8; 2] = [0x1B, 0x45];
    /// GS ! n
    pub const CHAR_SIZE: [u8; 2] = [0x1D, 0x21];
    /// ESC d n
    pub const FEED_LINES: [u8; 2] = [0x1B, 0x64];
    /// GS V 0
    pub const FULL_CUT: [u8; 3] = [0x1D, 0x56, 0x00];
}

/// Largest line count `ESC d n` accepts
pub const MAX_FEED_LINES: u8 = 0x7F;

/// `GS ! n` argument: width factor in the high nibble, height in the low one
///
/// Factors are clamped to `1..=8`.
pub fn char_size(width: u8, height: u8) -> u8 {
    let w = width.clamp(1, 8) - 1;
    let h = height.clamp(1, 8) - 1;
    (w << 4) | h
}

/// Streaming ESC/POS encoder
///
/// Starts with INIT; text stays UTF-8 until [`EscPosEncoder::finish`]
/// converts it to the printer code page.
pub struct EscPosEncoder {
    buf: Vec<u8>,
}

impl EscPosEncoder {
    pub fn new() -> Self {
        let mut buf = Vec::with_capacity(1024);
        buf.extend_from_slice(&cmd::INIT);
        Self { buf }
    }

    /// Append one operation
    pub fn push(&mut self, op: &PrintOp) -> &mut Self {
        match op {
            PrintOp::SetAlignment(alignment) => {
                let n = match alignment {
                    Alignment::Left => 0x00,
                    Alignment::Center => 0x01,
                };
                self.command(&cmd::ALIGN, n);
            }
            PrintOp::SetEmphasis(on) => self.command(&cmd::EMPHASIS, u8::from(*on)),
            PrintOp::SetTextScale(w, h) => self.command(&cmd::CHAR_SIZE, char_size(*w, *h)),
            PrintOp::WriteText(text) => self.text(text),
            PrintOp::Feed(lines) => self.command(&cmd::FEED_LINES, (*lines).min(MAX_FEED_LINES)),
            PrintOp::Cut => self.buf.extend_from_slice(&cmd::FULL_CUT),
        }
        self
    }

    pub fn push_all<'a>(&mut self, ops: impl IntoIterator<Item = &'a PrintOp>) -> &mut Self {
        for op in ops {
            self.push(op);
        }
        self
    }

    /// Bytes so far, before code page conversion
    pub fn as_raw(&self) -> &[u8] {
        &self.buf
    }

    /// Finish in the printer code page (WPC1252)
    pub fn finish(self) -> Vec<u8> {
        encode_for_printer(&self.buf)
    }

    /// Text bytes only: control characters other than LF never reach the printer
    fn text(&mut self, text: &str) {
        let mut tmp = [0u8; 4];
        for c in text.chars().filter(|&c| c == '\n' || !c.is_control()) {
            self.buf.extend_from_slice(c.encode_utf8(&mut tmp).as_bytes());
        }
    }

    fn command(&mut self, prefix: &[u8; 2], arg: u8) {
        self.buf.extend_from_slice(prefix);
        self.buf.push(arg);
    }
}

impl Default for EscPosEncoder {
    fn default() -> Self {
        Self::new()
    }
}
