//! Raster boundary between the canvas and image files.
//!
//! File decoding lives outside this crate. Callers hand in anything that
//! implements [`Raster`] (dimensions plus an RGB pixel accessor); the owned
//! [`RgbImage`] covers the common case of a decoded PNG.

/// Read-only access to an RGB bitmap.
pub trait Raster {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// sRGB colour at `(x, y)`. Callers keep coordinates in bounds.
    fn pixel(&self, x: usize, y: usize) -> [u8; 3];
}

/// An owned RGB image, row-major, three bytes per pixel.
///
/// # Example
///
/// ```
/// use oric_hires::{Raster, RgbImage};
///
/// let image = RgbImage::new(vec![255, 0, 0, 0, 0, 255], 2, 1).unwrap();
/// assert_eq!(image.pixel(1, 0), [0, 0, 255]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    /// RGB bytes, `width * height * 3` long.
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl RgbImage {
    /// Wrap RGB bytes. Returns `None` if the length does not match the
    /// dimensions or either dimension is zero.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> Option<Self> {
        if width == 0 || height == 0 || data.len() != width * height * 3 {
            return None;
        }
        Some(Self {
            data,
            width,
            height,
        })
    }

    /// A solid-colour image.
    pub fn filled(width: usize, height: usize, rgb: [u8; 3]) -> Self {
        let data = rgb.repeat(width * height);
        Self {
            data,
            width,
            height,
        }
    }

    /// Copy any raster into an owned image.
    pub fn from_raster(raster: &impl Raster) -> Self {
        let mut data = Vec::with_capacity(raster.width() * raster.height() * 3);
        for y in 0..raster.height() {
            for x in 0..raster.width() {
                data.extend_from_slice(&raster.pixel(x, y));
            }
        }
        Self {
            data,
            width: raster.width(),
            height: raster.height(),
        }
    }

    /// Raw RGB bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Overwrite one pixel. Out-of-bounds writes are ignored.
    pub fn put_pixel(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        if x < self.width && y < self.height {
            let i = (y * self.width + x) * 3;
            self.data[i..i + 3].copy_from_slice(&rgb);
        }
    }
}

impl Raster for RgbImage {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}
