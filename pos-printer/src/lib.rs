//! # pos-printer
//!
//! ESC/POS thermal printer library - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - The abstract printer operation vocabulary ([`PrintOp`], [`PrintDocument`])
//! - ESC/POS encoding
//! - Western code page (WPC1252) encoding for receipt printers
//! - Network printing (TCP port 9100)
//!
//! Business logic (WHAT to print) stays in application code:
//! - Customer and kitchen ticket layout → print-gateway
//!
//! ## Example
//!
//! ```ignore
//! use pos_printer::{NetworkPrinter, PrintDocument, Printer};
//!
//! let mut b = PrintDocument::builder(48);
//! b.center().size(2, 2).line("CAFÉ CENTRAL").reset_size();
//! b.divider().feed(3).cut();
//! let doc = b.build();
//!
//! let printer = NetworkPrinter::new("192.168.1.100", 9100)?;
//! printer.print(&doc.into_escpos()).await?;
//! ```

mod document;
mod encoding;
mod error;
mod escpos;
mod printer;

// Re-exports
pub use document::{Alignment, DocumentBuilder, PrintDocument, PrintOp};
pub use encoding::{encode_for_printer, pad_left, pad_right, sanitize_text, truncate_chars};
pub use error::{PrintError, PrintResult};
pub use escpos::{EscPosEncoder, MAX_FEED_LINES, char_size};
pub use printer::{NetworkPrinter, Printer};
