//! oric-hires: ORIC hires picture model and `.s` codec
//!
//! This library holds a 240×200 free-paint canvas in the 8-colour ORIC
//! palette, the attribute-cell rules of the hires screen, and the text
//! format pictures are exchanged in.
//!
//! # Quick Start
//!
//! ```
//! use oric_hires::{codec, OricColour, PictureDocument};
//!
//! let mut doc = PictureDocument::new();
//! doc.canvas_mut().paint(120, 100, OricColour::White, 4).unwrap();
//!
//! let text = codec::encode(&doc).unwrap();
//! let back = codec::decode(&text).unwrap();
//! assert_eq!(back, doc);
//! ```
//!
//! # The Attribute Rule
//!
//! The hardware splits every scanline into 40 cells of 6 pixels. Each cell
//! stores one byte, which is either six pixels drawn in the current ink and
//! paper, or a serial attribute that changes ink or paper for the rest of
//! the scanline and itself shows as a block of paper. A cell can therefore
//! never show more than two colours, and which two depends on what the
//! cells to its left did.
//!
//! The [`Canvas`] ignores this while painting. [`codec::encode`] enforces
//! it, failing with [`HiresError::NonConformantCell`] at the first cell
//! that cannot be produced, and [`Canvas::normalize`] offers a lossy local
//! repair for the simple "too many colours" case.
//!
//! # Colours
//!
//! [`OricColour`] indices are a 3-bit RGB mask (bit 0 red, bit 1 green,
//! bit 2 blue), so `0` is black, `7` is white and inverse video is
//! `index ^ 7`.

pub mod attribute;
pub mod canvas;
pub mod codec;
pub mod document;
pub mod error;
pub mod palette;
pub mod raster;


pub use attribute::TieBreak;
pub use canvas::{Canvas, MAX_BRUSH_RADIUS, MIN_BRUSH_RADIUS};
pub use codec::{decode, decode_expecting, encode};
pub use document::PictureDocument;
pub use error::{CellConflict, FormatError, HiresError};
pub use palette::{OricColour, ParseColourError, PALETTE_SIZE};
pub use raster::{Raster, RgbImage};
