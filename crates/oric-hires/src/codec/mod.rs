//! Picture codec: canvas ⇄ `.s` assembly byte table.
//!
//! A picture file holds one labelled table of 8000 bytes, 40 per scanline,
//! written as `.byt` lines of 16 hex values:
//!
//! ```text
//! _LabelPicture
//! 	.byt $40,$40,$40,$40,$40,$40,$40,$40,$40,$40,$40,$40,$40,$40,$40,$40
//! 	...
//! ```
//!
//! Each byte is one serial attribute or six pixels (see
//! [`attribute`](crate::attribute)). The codec never stores attribute
//! bytes alongside the canvas: [`encode`] recomputes them from the pixels
//! every time, and [`decode`] expands them straight back into pixels.
//!
//! # Round trip
//!
//! For every document `encode` accepts, `decode(&encode(&doc)?)? == doc`.
//!
//! ```
//! use oric_hires::{codec, OricColour, PictureDocument};
//!
//! let mut doc = PictureDocument::new();
//! doc.canvas_mut().paint(30, 40, OricColour::White, 3).unwrap();
//!
//! let text = codec::encode(&doc).unwrap();
//! assert!(text.starts_with("_LabelPicture\n\t.byt $40,"));
//! assert_eq!(codec::decode(&text).unwrap(), doc);
//! ```

mod decode;
mod encode;

pub use decode::{decode, decode_bytes, decode_expecting, parse_table, ParsedTable};
pub use encode::{encode, encode_canvas, encode_row, write_table};

use crate::attribute::{CELLS_PER_ROW, HEIGHT};

/// Scanlines in a picture.
pub const ROWS: usize = HEIGHT;
/// Pixel columns in a picture.
pub const COLUMNS: usize = crate::attribute::WIDTH;
/// Bytes per scanline.
pub const BYTES_PER_ROW: usize = CELLS_PER_ROW;
/// Total bytes in a picture table.
pub const PICTURE_BYTES: usize = ROWS * BYTES_PER_ROW;
/// Values per `.byt` line when encoding.
pub const BYTES_PER_LINE: usize = 16;
/// Label used for new documents and by the converter's `-o4` option.
pub const DEFAULT_LABEL: &str = "_LabelPicture";

/// True if `label` is a valid assembler identifier.
pub fn is_valid_label(label: &str) -> bool {
    let mut chars = label.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
