//! The editable 240×200 indexed bitmap.

use crate::attribute::{
    self, dominant_colour, histogram, TieBreak, CELLS_PER_ROW, CELL_WIDTH, HEIGHT, WIDTH,
};
use crate::error::HiresError;
use crate::palette::{OricColour, PALETTE_SIZE};
use crate::raster::Raster;

/// Smallest brush radius (a single pixel).
pub const MIN_BRUSH_RADIUS: usize = 1;
/// Largest brush radius (a 39×39 square).
pub const MAX_BRUSH_RADIUS: usize = 20;

/// A free-paint hires canvas.
///
/// Stores one [`OricColour`] per pixel in row-major order. Painting never
/// enforces the two-colours-per-cell rule; that happens when the picture is
/// encoded or compiled.
///
/// Every mutating method validates its arguments before touching a pixel,
/// so a returned error always leaves the canvas unchanged.
///
/// # Example
///
/// ```
/// use oric_hires::{Canvas, OricColour};
///
/// let mut canvas = Canvas::new(OricColour::Black);
/// canvas.paint(10, 10, OricColour::Red, 2).unwrap();
/// assert_eq!(canvas.sample(11, 11).unwrap(), OricColour::Red);
/// assert_eq!(canvas.sample(12, 12).unwrap(), OricColour::Black);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    pixels: Vec<OricColour>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(OricColour::Black)
    }
}

impl Canvas {
    /// A canvas filled with `colour`.
    pub fn new(colour: OricColour) -> Self {
        Self {
            pixels: vec![colour; WIDTH * HEIGHT],
        }
    }

    /// Build from row-major pixels; `None` unless exactly 240×200.
    pub fn from_pixels(pixels: Vec<OricColour>) -> Option<Self> {
        (pixels.len() == WIDTH * HEIGHT).then_some(Self { pixels })
    }

    #[inline]
    pub fn width(&self) -> usize {
        WIDTH
    }

    #[inline]
    pub fn height(&self) -> usize {
        HEIGHT
    }

    /// All pixels, row-major.
    #[inline]
    pub fn pixels(&self) -> &[OricColour] {
        &self.pixels
    }

    #[inline]
    pub(crate) fn pixels_mut(&mut self) -> &mut [OricColour] {
        &mut self.pixels
    }

    /// One scanline.
    ///
    /// # Panics
    ///
    /// Panics if `y >= 200`.
    #[inline]
    pub fn row(&self, y: usize) -> &[OricColour] {
        &self.pixels[y * WIDTH..(y + 1) * WIDTH]
    }

    /// The six pixels of cell `cell` on row `y`.
    pub fn cell(&self, y: usize, cell: usize) -> Result<&[OricColour], HiresError> {
        check_y(y)?;
        if cell >= CELLS_PER_ROW {
            return Err(HiresError::out_of_range("cell", cell, CELLS_PER_ROW));
        }
        let start = y * WIDTH + cell * CELL_WIDTH;
        Ok(&self.pixels[start..start + CELL_WIDTH])
    }

    /// Colour at `(x, y)`.
    pub fn sample(&self, x: usize, y: usize) -> Result<OricColour, HiresError> {
        check_x(x)?;
        check_y(y)?;
        Ok(self.pixels[y * WIDTH + x])
    }

    /// Paint a square brush centred on `(x, y)`.
    ///
    /// The footprint covers `radius - 1` pixels on each side of the centre,
    /// so radius 1 paints one pixel and radius 20 a 39×39 square. Pixels
    /// falling outside the canvas are clipped. Returns how many pixels
    /// changed colour.
    pub fn paint(
        &mut self,
        x: usize,
        y: usize,
        colour: OricColour,
        radius: usize,
    ) -> Result<usize, HiresError> {
        check_x(x)?;
        check_y(y)?;
        if !(MIN_BRUSH_RADIUS..=MAX_BRUSH_RADIUS).contains(&radius) {
            return Err(HiresError::out_of_range(
                "brush radius",
                radius,
                MAX_BRUSH_RADIUS,
            ));
        }

        let reach = radius - 1;
        let x0 = x.saturating_sub(reach);
        let x1 = (x + reach).min(WIDTH - 1);
        let y0 = y.saturating_sub(reach);
        let y1 = (y + reach).min(HEIGHT - 1);

        let mut changed = 0;
        for py in y0..=y1 {
            for px in &mut self.pixels[py * WIDTH + x0..=py * WIDTH + x1] {
                if *px != colour {
                    *px = colour;
                    changed += 1;
                }
            }
        }
        Ok(changed)
    }

    /// Replace each cell's background colour on row `y`.
    ///
    /// For every cell the background is its most frequent colour. On a tie
    /// `colour` wins if it is one of the tied colours, otherwise the lowest
    /// palette index does; this makes a repeated call a no-op. Pixels equal
    /// to the background are repainted, all others are left alone. Returns
    /// how many pixels changed.
    pub fn replace_row_background(
        &mut self,
        y: usize,
        colour: OricColour,
    ) -> Result<usize, HiresError> {
        check_y(y)?;
        let row = &mut self.pixels[y * WIDTH..(y + 1) * WIDTH];
        let mut changed = 0;
        for cell in row.chunks_exact_mut(CELL_WIDTH) {
            let Some(background) = dominant_colour(&histogram(cell), Some(colour)) else {
                continue;
            };
            if background == colour {
                continue;
            }
            for px in cell.iter_mut().filter(|px| **px == background) {
                *px = colour;
                changed += 1;
            }
        }
        Ok(changed)
    }

    /// Replace the most common colour of the whole picture with `colour`.
    ///
    /// Scans all 48,000 pixels on every call; ties go to the lowest palette
    /// index. Returns the colour that was replaced.
    pub fn replace_global_background(&mut self, colour: OricColour) -> OricColour {
        let background = dominant_colour(&self.histogram(), None).unwrap_or_default();
        if background != colour {
            for px in self.pixels.iter_mut().filter(|px| **px == background) {
                *px = colour;
            }
        }
        background
    }

    /// Set every pixel to `colour`.
    pub fn clear(&mut self, colour: OricColour) {
        self.pixels.fill(colour);
    }

    /// Pixel counts per palette index.
    pub fn histogram(&self) -> [usize; PALETTE_SIZE] {
        histogram(&self.pixels)
    }

    /// `(row, cell)` of every cell holding more than two colours.
    pub fn non_conformant_cells(&self) -> Vec<(usize, usize)> {
        self.pixels
            .chunks_exact(CELL_WIDTH)
            .enumerate()
            .filter(|(_, cell)| !attribute::is_conformant(cell))
            .map(|(i, _)| (i / CELLS_PER_ROW, i % CELLS_PER_ROW))
            .collect()
    }

    /// Reduce every cell to at most two colours.
    ///
    /// Each non-conformant cell keeps the pair chosen by
    /// [`attribute::reduce_to_two_colours`] with the lowest-index tie-break;
    /// pixels of any other colour become the paper colour. Returns how many
    /// cells were rewritten.
    pub fn normalize(&mut self) -> usize {
        let mut rewritten = 0;
        for cell in self.pixels.chunks_exact_mut(CELL_WIDTH) {
            if attribute::is_conformant(cell) {
                continue;
            }
            let (ink, paper) = attribute::reduce_to_two_colours(cell, TieBreak::LowestIndex);
            for px in cell.iter_mut().filter(|px| **px != ink && **px != paper) {
                *px = paper;
            }
            rewritten += 1;
        }
        rewritten
    }

    /// Flat RGB bytes (`240 * 200 * 3`).
    pub fn to_rgb(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.pixels.len() * 3);
        for px in &self.pixels {
            rgb.extend_from_slice(&px.rgb());
        }
        rgb
    }
}

impl Raster for Canvas {
    fn width(&self) -> usize {
        WIDTH
    }

    fn height(&self) -> usize {
        HEIGHT
    }

    fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        self.pixels[y * WIDTH + x].rgb()
    }
}

fn check_x(x: usize) -> Result<(), HiresError> {
    if x >= WIDTH {
        return Err(HiresError::out_of_range("x", x, WIDTH));
    }
    Ok(())
}

fn check_y(y: usize) -> Result<(), HiresError> {
    if y >= HEIGHT {
        return Err(HiresError::out_of_range("y", y, HEIGHT));
    }
    Ok(())
}
