//! Stand-in converters.

use async_trait::async_trait;
use oric_hires::attribute::{dominant_colour, histogram, CELLS_PER_ROW, CELL_WIDTH};
use oric_hires::{codec, Canvas, PictureDocument};
use oric_picture::error::CompileError;
use oric_picture::rendering;
use oric_picture::services::Converter;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Behaves like PictConv for test purposes: reads the PNG and writes a
/// conformant picture in which every cell is filled with its dominant
/// colour.
#[derive(Default)]
pub struct FakePictConv {
    pub runs: AtomicUsize,
}

impl FakePictConv {
    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

/// Fill every cell with its most common colour.
pub fn flatten_cells(canvas: &Canvas) -> Canvas {
    let mut flat = canvas.clone();
    for y in 0..canvas.height() {
        for cell in 0..CELLS_PER_ROW {
            let pixels = canvas.cell(y, cell).unwrap();
            let colour = dominant_colour(&histogram(pixels), None).unwrap();
            for x in cell * CELL_WIDTH..(cell + 1) * CELL_WIDTH {
                flat.paint(x, y, colour, 1).unwrap();
            }
        }
    }
    flat
}

#[async_trait]
impl Converter for FakePictConv {
    async fn convert(
        &self,
        input: &Path,
        output: &Path,
        label: &str,
    ) -> Result<String, CompileError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        let image = rendering::read_png(input)?;
        let canvas = flatten_cells(&Canvas::resample_from(&image));
        let text = codec::encode(&PictureDocument::with_canvas(label, canvas))?;
        std::fs::write(output, text)?;
        Ok(format!("fake pictconv: {label}\n"))
    }
}

/// Always fails like a converter exiting with an error.
pub struct FailingConverter {
    pub exit_code: Option<i32>,
    pub log: String,
}

impl FailingConverter {
    pub fn new(exit_code: i32, log: &str) -> Self {
        Self {
            exit_code: Some(exit_code),
            log: log.to_string(),
        }
    }
}

#[async_trait]
impl Converter for FailingConverter {
    async fn convert(&self, _: &Path, _: &Path, _: &str) -> Result<String, CompileError> {
        Err(CompileError::ConverterFailed {
            exit_code: self.exit_code,
            log: self.log.clone(),
        })
    }
}

/// Write an executable shell script to stand in for the converter binary.
#[cfg(unix)]
pub fn script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}
