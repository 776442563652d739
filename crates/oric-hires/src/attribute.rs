//! Attribute-cell model: cell addressing, the two-colour rule and the
//! serial attribute byte format.
//!
//! A hires scanline is 40 bytes wide. Each byte covers one 6-pixel cell and
//! is either an *attribute* (changes ink or paper for the rest of the
//! scanline and shows as a solid paper-coloured cell) or *pixel data* (six
//! ink/paper selection bits).
//!
//! | Byte pattern        | Meaning                                     |
//! |---------------------|---------------------------------------------|
//! | `x00 00ccc`         | ink = `ccc`                                 |
//! | `x00 10ccc`         | paper = `ccc`                               |
//! | `x00 01xxx`         | character set (no visible effect in hires)  |
//! | `x00 11mxx`         | video mode; `m = 0` switches to text mode   |
//! | bit 5 or 6 set      | pixel data in bits 0-5, bit 5 = leftmost    |
//!
//! The top bit `x` of every byte selects inverse video for that cell.
//! Each scanline starts with white ink on black paper.

use crate::error::HiresError;
use crate::palette::{OricColour, PALETTE_SIZE};

/// Canvas width in pixels.
pub const WIDTH: usize = 240;
/// Canvas height in pixels.
pub const HEIGHT: usize = 200;
/// Pixels per attribute cell.
pub const CELL_WIDTH: usize = 6;
/// Cells (and bytes) per scanline.
pub const CELLS_PER_ROW: usize = WIDTH / CELL_WIDTH;

/// Ink at the start of every scanline.
pub const ROW_START_INK: OricColour = OricColour::White;
/// Paper at the start of every scanline.
pub const ROW_START_PAPER: OricColour = OricColour::Black;

const ATTRIBUTE_MASK: u8 = 0x60;
const KIND_MASK: u8 = 0x18;
const INVERSE_BIT: u8 = 0x80;
const PIXEL_BASE: u8 = 0x40;
const PIXEL_BITS: u8 = 0x3f;
const HIRES_MODE_BIT: u8 = 0x04;

/// Return the `[start, end)` pixel range of the cell containing `x`.
pub fn cell_bounds(x: usize) -> Result<(usize, usize), HiresError> {
    if x >= WIDTH {
        return Err(HiresError::out_of_range("x", x, WIDTH));
    }
    let start = x / CELL_WIDTH * CELL_WIDTH;
    Ok((start, start + CELL_WIDTH))
}

/// True if the cell uses at most two distinct colours.
pub fn is_conformant(cell: &[OricColour]) -> bool {
    distinct_colours(cell) <= 2
}

/// Number of distinct colours in a run of pixels.
pub fn distinct_colours(pixels: &[OricColour]) -> usize {
    let mut seen = [false; PALETTE_SIZE];
    for &c in pixels {
        seen[c.index() as usize] = true;
    }
    seen.iter().filter(|&&s| s).count()
}

/// Per-colour pixel counts.
pub fn histogram(pixels: &[OricColour]) -> [usize; PALETTE_SIZE] {
    let mut counts = [0usize; PALETTE_SIZE];
    for &c in pixels {
        counts[c.index() as usize] += 1;
    }
    counts
}

/// How equal pixel counts are resolved when ranking colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Lowest palette index wins.
    #[default]
    LowestIndex,
    /// Highest palette index wins.
    HighestIndex,
}

impl TieBreak {
    /// Colours present in `counts`, most frequent first.
    fn rank(self, counts: &[usize; PALETTE_SIZE]) -> Vec<OricColour> {
        let mut present: Vec<OricColour> = OricColour::ALL
            .into_iter()
            .filter(|c| counts[c.index() as usize] > 0)
            .collect();
        present.sort_by(|a, b| {
            let by_count = counts[b.index() as usize].cmp(&counts[a.index() as usize]);
            let by_index = match self {
                TieBreak::LowestIndex => a.cmp(b),
                TieBreak::HighestIndex => b.cmp(a),
            };
            by_count.then(by_index)
        });
        present
    }
}

/// Most frequent colour in `counts`.
///
/// If `prefer` is among the colours tied for the maximum it wins; otherwise
/// ties go to the lowest palette index. Returns `None` for an empty
/// histogram.
pub fn dominant_colour(
    counts: &[usize; PALETTE_SIZE],
    prefer: Option<OricColour>,
) -> Option<OricColour> {
    let max = *counts.iter().max()?;
    if max == 0 {
        return None;
    }
    if let Some(p) = prefer {
        if counts[p.index() as usize] == max {
            return Some(p);
        }
    }
    OricColour::ALL
        .into_iter()
        .find(|c| counts[c.index() as usize] == max)
}

/// Choose the `(ink, paper)` pair for a cell.
///
/// The most frequent colour becomes the paper and the runner-up the ink;
/// equal counts are ordered by `tie_break`. A single-colour cell returns the
/// same colour in both slots. Colours beyond the top two are dropped, which
/// is the local reduction policy used by [`Canvas::normalize`].
///
/// # Panics
///
/// Panics if `cell` is empty.
///
/// [`Canvas::normalize`]: crate::canvas::Canvas::normalize
pub fn reduce_to_two_colours(cell: &[OricColour], tie_break: TieBreak) -> (OricColour, OricColour) {
    let ranked = tie_break.rank(&histogram(cell));
    let paper = ranked[0];
    let ink = ranked.get(1).copied().unwrap_or(paper);
    (ink, paper)
}

/// A decoded hires byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellByte {
    /// Serial attribute setting the ink colour.
    Ink { colour: OricColour, inverse: bool },
    /// Serial attribute setting the paper colour.
    Paper { colour: OricColour, inverse: bool },
    /// Character-set attribute; shows as paper, changes nothing in hires.
    Charset { bits: u8, inverse: bool },
    /// Video-mode attribute. `hires == false` would switch the display to
    /// text mode.
    VideoMode { bits: u8, hires: bool, inverse: bool },
    /// Six pixels; bit 5 is the leftmost, a set bit selects ink.
    Pixels { bits: u8, inverse: bool },
}

impl CellByte {
    /// Classify a raw byte. Every byte value has a meaning.
    pub fn from_byte(v: u8) -> Self {
        let inverse = v & INVERSE_BIT != 0;
        if v & ATTRIBUTE_MASK != 0 {
            return CellByte::Pixels {
                bits: v & PIXEL_BITS,
                inverse,
            };
        }
        match v & KIND_MASK {
            0x00 => CellByte::Ink {
                colour: OricColour::from_bits(v),
                inverse,
            },
            0x10 => CellByte::Paper {
                colour: OricColour::from_bits(v),
                inverse,
            },
            0x08 => CellByte::Charset {
                bits: v & 0x07,
                inverse,
            },
            _ => CellByte::VideoMode {
                bits: v & 0x07,
                hires: v & HIRES_MODE_BIT != 0,
                inverse,
            },
        }
    }

    /// Encode back to a raw byte. Pixel bytes always use the `0x40` base.
    pub fn to_byte(self) -> u8 {
        let (body, inverse) = match self {
            CellByte::Ink { colour, inverse } => (colour.index(), inverse),
            CellByte::Paper { colour, inverse } => (0x10 | colour.index(), inverse),
            CellByte::Charset { bits, inverse } => (0x08 | (bits & 0x07), inverse),
            CellByte::VideoMode { bits, inverse, .. } => (0x18 | (bits & 0x07), inverse),
            CellByte::Pixels { bits, inverse } => (PIXEL_BASE | (bits & PIXEL_BITS), inverse),
        };
        if inverse {
            body | INVERSE_BIT
        } else {
            body
        }
    }

    pub fn is_inverse(self) -> bool {
        match self {
            CellByte::Ink { inverse, .. }
            | CellByte::Paper { inverse, .. }
            | CellByte::Charset { inverse, .. }
            | CellByte::VideoMode { inverse, .. }
            | CellByte::Pixels { inverse, .. } => inverse,
        }
    }
}

/// Ink/paper state while walking a scanline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeState {
    pub ink: OricColour,
    pub paper: OricColour,
}

impl Default for AttributeState {
    fn default() -> Self {
        Self {
            ink: ROW_START_INK,
            paper: ROW_START_PAPER,
        }
    }
}

impl AttributeState {
    /// Apply `byte`, writing the six displayed colours into `out`.
    pub fn apply(&mut self, byte: CellByte, out: &mut [OricColour; CELL_WIDTH]) {
        match byte {
            CellByte::Ink { colour, .. } => self.ink = colour,
            CellByte::Paper { colour, .. } => self.paper = colour,
            CellByte::Charset { .. } | CellByte::VideoMode { .. } => {}
            CellByte::Pixels { bits, inverse } => {
                let (ink, paper) = self.shown(inverse);
                for (i, px) in out.iter_mut().enumerate() {
                    let on = (bits >> (CELL_WIDTH - 1 - i)) & 1 == 1;
                    *px = if on { ink } else { paper };
                }
                return;
            }
        }
        let (_, paper) = self.shown(byte.is_inverse());
        *out = [paper; CELL_WIDTH];
    }

    /// Displayed `(ink, paper)` with optional inverse video.
    #[inline]
    pub fn shown(self, inverse: bool) -> (OricColour, OricColour) {
        if inverse {
            (self.ink.inverse(), self.paper.inverse())
        } else {
            (self.ink, self.paper)
        }
    }
}
