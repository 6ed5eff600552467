//! Printer operation vocabulary
//!
//! A [`PrintDocument`] is an ordered, immutable list of abstract printer
//! operations. Layout code produces documents; transports consume them
//! exactly once, usually through [`PrintDocument::into_escpos`].

use serde::Serialize;

use crate::encoding::sanitize_text;
use crate::escpos::EscPosEncoder;

/// Text justification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
}

/// A single abstract printer operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", content = "arg", rename_all = "snake_case")]
pub enum PrintOp {
    SetAlignment(Alignment),
    SetEmphasis(bool),
    /// Character magnification (width, height), each in `1..=8`
    SetTextScale(u8, u8),
    WriteText(String),
    /// Print and feed n lines
    Feed(u8),
    Cut,
}

/// Ordered sequence of printer operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrintDocument {
    ops: Vec<PrintOp>,
}

impl PrintDocument {
    pub fn new(ops: Vec<PrintOp>) -> Self {
        Self { ops }
    }

    /// Start a fluent builder for the given paper width in characters
    pub fn builder(width: usize) -> DocumentBuilder {
        DocumentBuilder::new(width)
    }

    pub fn ops(&self) -> &[PrintOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Iterate over the text payloads, in print order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            PrintOp::WriteText(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Encode to ESC/POS bytes, consuming the document
    ///
    /// The output starts with INIT (ESC @) and is in the WPC1252 code page.
    pub fn into_escpos(self) -> Vec<u8> {
        let mut encoder = EscPosEncoder::new();
        encoder.push_all(&self.ops);
        encoder.finish()
    }
}

/// Fluent builder for [`PrintDocument`]
///
/// Records operations rather than bytes, so a layout can be inspected or
/// previewed before it is encoded.
pub struct DocumentBuilder {
    ops: Vec<PrintOp>,
    width: usize,
}

impl DocumentBuilder {
    pub fn new(width: usize) -> Self {
        Self {
            ops: Vec::with_capacity(64),
            width,
        }
    }

    /// Get the configured paper width
    pub fn width(&self) -> usize {
        self.width
    }

    // === Text Output ===

    /// Write text; control characters are stripped
    pub fn text(&mut self, s: &str) -> &mut Self {
        self.ops.push(PrintOp::WriteText(sanitize_text(s)));
        self
    }

    /// Write text followed by newline
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.ops.push(PrintOp::WriteText(format!("{}\n", sanitize_text(s))));
        self
    }

    pub fn feed(&mut self, lines: u8) -> &mut Self {
        self.ops.push(PrintOp::Feed(lines));
        self
    }

    // === Alignment ===

    pub fn center(&mut self) -> &mut Self {
        self.ops.push(PrintOp::SetAlignment(Alignment::Center));
        self
    }

    pub fn left(&mut self) -> &mut Self {
        self.ops.push(PrintOp::SetAlignment(Alignment::Left));
        self
    }

    // === Text Style ===

    pub fn bold(&mut self) -> &mut Self {
        self.ops.push(PrintOp::SetEmphasis(true));
        self
    }

    pub fn bold_off(&mut self) -> &mut Self {
        self.ops.push(PrintOp::SetEmphasis(false));
        self
    }

    pub fn size(&mut self, width: u8, height: u8) -> &mut Self {
        self.ops.push(PrintOp::SetTextScale(width, height));
        self
    }

    pub fn reset_size(&mut self) -> &mut Self {
        self.size(1, 1)
    }

    // === Separators ===

    /// Print a full-width line of '-' characters
    pub fn divider(&mut self) -> &mut Self {
        let rule = "-".repeat(self.width);
        self.line(&rule)
    }

    // === Paper Control ===

    pub fn cut(&mut self) -> &mut Self {
        self.ops.push(PrintOp::Cut);
        self
    }

    pub fn build(self) -> PrintDocument {
        PrintDocument::new(self.ops)
    }
}
