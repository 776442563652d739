//! PNG encode/decode at the raster boundary.
//!
//! The converter reads 24-bit RGB PNGs, and imports accept any 8/16-bit
//! PNG the `png` crate can expand to RGB(A) or grey.

use std::io::Cursor;
use std::path::Path;

use oric_hires::{Raster, RgbImage};

use crate::error::RenderError;

/// Encode any raster as an 8-bit RGB PNG.
pub fn encode_png(raster: &impl Raster) -> Result<Vec<u8>, RenderError> {
    let (width, height) = (raster.width(), raster.height());
    let w = u32::try_from(width).map_err(|_| RenderError::PngEncode(format!("width {width}")))?;
    let h =
        u32::try_from(height).map_err(|_| RenderError::PngEncode(format!("height {height}")))?;
    let rgb = RgbImage::from_raster(raster);

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, w, h);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(rgb.as_bytes())
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Decode PNG bytes into an RGB image.
///
/// Palette and low-bit images are expanded, 16-bit samples are stripped to
/// 8 bits, and alpha is composited over black.
pub fn decode_png(bytes: &[u8]) -> Result<RgbImage, RenderError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;
    buf.truncate(info.buffer_size());

    if info.bit_depth != png::BitDepth::Eight {
        return Err(RenderError::UnsupportedFormat(format!(
            "{:?} bit samples",
            info.bit_depth
        )));
    }

    let (width, height) = (info.width as usize, info.height as usize);
    let rgb: Vec<u8> = match info.color_type {
        png::ColorType::Rgb => buf,
        png::ColorType::Rgba => buf
            .chunks_exact(4)
            .flat_map(|p| [over_black(p[0], p[3]), over_black(p[1], p[3]), over_black(p[2], p[3])])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&v| [v, v, v]).collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|p| {
                let v = over_black(p[0], p[1]);
                [v, v, v]
            })
            .collect(),
        other => {
            return Err(RenderError::UnsupportedFormat(format!("{other:?}")));
        }
    };

    RgbImage::new(rgb, width, height)
        .ok_or_else(|| RenderError::PngDecode(format!("bad pixel data for {width}x{height}")))
}

#[inline]
fn over_black(value: u8, alpha: u8) -> u8 {
    ((value as u16 * alpha as u16 + 127) / 255) as u8
}

/// Read and decode a PNG file.
pub fn read_png(path: &Path) -> Result<RgbImage, RenderError> {
    decode_png(&std::fs::read(path)?)
}

/// Encode a raster and write it as a PNG file.
pub fn write_png(path: &Path, raster: &impl Raster) -> Result<(), RenderError> {
    std::fs::write(path, encode_png(raster)?)?;
    Ok(())
}
