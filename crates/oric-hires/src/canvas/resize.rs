//! Fit an arbitrary raster onto the fixed hires grid.
//!
//! Nearest-neighbour sampling with the source aspect ratio preserved: the
//! image is scaled to fit inside 240×200, centred, and the borders are left
//! black. Colours are snapped to the nearest palette entry. The result is
//! free-paint data; attribute conformance is the converter's job.

use super::canvas::Canvas;
use crate::attribute::{HEIGHT, WIDTH};
use crate::palette::OricColour;
use crate::raster::Raster;

/// Placement of a scaled source image on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub width: usize,
    pub height: usize,
    pub offset_x: usize,
    pub offset_y: usize,
}

/// Where a `source_width × source_height` image lands after fitting.
///
/// Integer arithmetic only, so the same input always gives the same
/// placement. Degenerate (zero-sized) sources get a zero placement.
pub fn fit(source_width: usize, source_height: usize) -> Placement {
    if source_width == 0 || source_height == 0 {
        return Placement {
            width: 0,
            height: 0,
            offset_x: WIDTH / 2,
            offset_y: HEIGHT / 2,
        };
    }
    // Compare WIDTH/source_width against HEIGHT/source_height without floats.
    let (width, height) = if WIDTH * source_height <= HEIGHT * source_width {
        (WIDTH, (source_height * WIDTH / source_width).max(1))
    } else {
        ((source_width * HEIGHT / source_height).max(1), HEIGHT)
    };
    Placement {
        width,
        height,
        offset_x: (WIDTH - width) / 2,
        offset_y: (HEIGHT - height) / 2,
    }
}

impl Canvas {
    /// Resample `source` onto a new canvas.
    pub fn resample_from(source: &impl Raster) -> Canvas {
        let mut canvas = Canvas::new(OricColour::Black);
        let placement = fit(source.width(), source.height());
        let pixels = canvas.pixels_mut();

        for dy in 0..placement.height {
            let sy = dy * source.height() / placement.height;
            let row = (placement.offset_y + dy) * WIDTH;
            for dx in 0..placement.width {
                let sx = dx * source.width() / placement.width;
                pixels[row + placement.offset_x + dx] =
                    OricColour::nearest(source.pixel(sx, sy));
            }
        }
        canvas
    }
}
