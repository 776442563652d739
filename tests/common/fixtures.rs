//! Test fixtures.

use oric_hires::{codec, Canvas, OricColour, PictureDocument};
use std::path::{Path, PathBuf};

/// Label PictConv is invoked with by default
pub const LABEL: &str = "_LabelPicture";

/// A picture that encodes: coloured bands, each cell a single colour,
/// plus white-on-black detail that needs no attributes.
pub fn banded_document() -> PictureDocument {
    let mut canvas = Canvas::new(OricColour::Black);
    for (band, colour) in OricColour::ALL.into_iter().enumerate() {
        for y in band * 25..(band + 1) * 25 {
            canvas.replace_row_background(y, colour).unwrap();
        }
    }
    // White specks in the black band (rows 0..25).
    for x in (1..240).step_by(7) {
        canvas.paint(x, 10, OricColour::White, 1).unwrap();
    }
    PictureDocument::with_canvas(LABEL, canvas)
}

/// A clean picture with one cell holding three colours (row 3, cell 5).
pub fn three_colour_document() -> PictureDocument {
    let mut doc = PictureDocument::new();
    let canvas = doc.canvas_mut();
    canvas.paint(31, 3, OricColour::Red, 1).unwrap();
    canvas.paint(33, 3, OricColour::Green, 1).unwrap();
    doc.mark_clean();
    doc
}

/// Save `doc` as `name` under `dir`.
pub fn write_picture(dir: &Path, name: &str, doc: &PictureDocument) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, codec::encode(doc).unwrap()).unwrap();
    path
}

/// A 480x400 PNG: left half red, right half blue.
pub fn two_tone_png(dir: &Path) -> PathBuf {
    let mut image = oric_hires::RgbImage::filled(480, 400, [255, 0, 0]);
    for y in 0..400 {
        for x in 240..480 {
            image.put_pixel(x, y, [0, 0, 255]);
        }
    }
    let path = dir.join("two_tone.png");
    oric_picture::rendering::write_png(&path, &image).unwrap();
    path
}
