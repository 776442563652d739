//! The eight ORIC colours and nearest-colour matching.
//!
//! The hardware palette is fixed: each colour is one bit per RGB channel,
//! so index bit 0 is red, bit 1 green and bit 2 blue. Inverse video flips
//! all three bits, which is why [`OricColour::inverse`] is `index ^ 7`.

use std::fmt;
use std::str::FromStr;

use super::error::ParseColourError;

/// Number of colours in the ORIC palette.
pub const PALETTE_SIZE: usize = 8;

/// One of the eight ORIC hires colours.
///
/// The discriminant is the hardware palette index used in attribute bytes.
///
/// # Example
///
/// ```
/// use oric_hires::OricColour;
///
/// let red: OricColour = "red".parse().unwrap();
/// assert_eq!(red.index(), 1);
/// assert_eq!(red.inverse(), OricColour::Cyan);
/// assert_eq!(red.rgb(), [255, 0, 0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum OricColour {
    #[default]
    Black = 0,
    Red = 1,
    Green = 2,
    Yellow = 3,
    Blue = 4,
    Magenta = 5,
    Cyan = 6,
    White = 7,
}

impl OricColour {
    /// All colours in palette index order.
    pub const ALL: [OricColour; PALETTE_SIZE] = [
        OricColour::Black,
        OricColour::Red,
        OricColour::Green,
        OricColour::Yellow,
        OricColour::Blue,
        OricColour::Magenta,
        OricColour::Cyan,
        OricColour::White,
    ];

    /// Colour for a palette index, or `None` outside 0..=7.
    #[inline]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Colour from the low three bits of an attribute byte.
    #[inline]
    pub fn from_bits(bits: u8) -> Self {
        Self::ALL[(bits & 0x07) as usize]
    }

    /// Hardware palette index (0..=7).
    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Colour shown for this colour under inverse video.
    #[inline]
    pub fn inverse(self) -> Self {
        Self::from_bits(self.index() ^ 0x07)
    }

    /// sRGB triple for previews and PNG export.
    #[inline]
    pub fn rgb(self) -> [u8; 3] {
        let i = self.index();
        let channel = |bit: u8| if i & bit != 0 { 255 } else { 0 };
        [channel(1), channel(2), channel(4)]
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            OricColour::Black => "Black",
            OricColour::Red => "Red",
            OricColour::Green => "Green",
            OricColour::Yellow => "Yellow",
            OricColour::Blue => "Blue",
            OricColour::Magenta => "Magenta",
            OricColour::Cyan => "Cyan",
            OricColour::White => "White",
        }
    }

    /// Nearest palette colour to an sRGB triple.
    ///
    /// Uses squared Euclidean distance in sRGB. The palette is the corners
    /// of the RGB cube, so this thresholds each channel at the midpoint.
    /// Exact palette colours always map to themselves.
    pub fn nearest(rgb: [u8; 3]) -> Self {
        let mut best = OricColour::Black;
        let mut best_distance = u32::MAX;
        for colour in Self::ALL {
            let distance: u32 = colour
                .rgb()
                .iter()
                .zip(rgb.iter())
                .map(|(&a, &b)| {
                    let d = a as i32 - b as i32;
                    (d * d) as u32
                })
                .sum();
            if distance < best_distance {
                best = colour;
                best_distance = distance;
            }
        }
        best
    }
}

impl fmt::Display for OricColour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<OricColour> for u8 {
    fn from(colour: OricColour) -> u8 {
        colour.index()
    }
}

impl TryFrom<u8> for OricColour {
    type Error = ParseColourError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::from_index(index).ok_or(ParseColourError::IndexOutOfRange(index as u32))
    }
}

/// Parses a palette index (`"0"`..`"7"`) or a colour name (case-insensitive).
impl FromStr for OricColour {
    type Err = ParseColourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u32>() {
            return u8::try_from(n)
                .ok()
                .and_then(Self::from_index)
                .ok_or(ParseColourError::IndexOutOfRange(n));
        }
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseColourError::UnknownName(s.to_string()))
    }
}
