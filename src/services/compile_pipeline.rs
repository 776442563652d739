use std::path::{Path, PathBuf};
use std::sync::Arc;

use oric_hires::codec::{self, is_valid_label};
use oric_hires::{Canvas, PictureDocument, Raster};

use crate::error::CompileError;
use crate::models::AppConfig;
use crate::rendering;
use crate::services::{Converter, PictConv};

const INPUT_NAME: &str = "in.png";
const OUTPUT_NAME: &str = "out.s";

/// Result of one converter run
#[derive(Debug)]
pub struct CompileOutput {
    /// The converted picture, carrying the input's label
    pub document: PictureDocument,
    /// Converter stdout/stderr
    pub log: String,
}

/// Compile pipeline that runs canvas → PNG → converter → decoded picture
///
/// Each run works in its own scratch directory, removed when the run ends
/// whether it succeeded or not.
pub struct CompilePipeline {
    converter: Arc<dyn Converter>,
    temp_root: Option<PathBuf>,
}

impl CompilePipeline {
    pub fn new(converter: Arc<dyn Converter>) -> Self {
        Self {
            converter,
            temp_root: None,
        }
    }

    /// Pipeline using PictConv as configured
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            converter: Arc::new(PictConv::from_config(&config.converter)),
            temp_root: config.temp_dir.clone(),
        }
    }

    /// Create scratch directories under `dir` instead of the system temp dir
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(dir.into());
        self
    }

    fn scratch_dir(&self) -> std::io::Result<tempfile::TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("oric-picture-");
        match self.temp_root {
            Some(ref root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
    }

    /// Convert a document's canvas through the external tool.
    ///
    /// `doc` is only read; on any failure the caller still has it exactly
    /// as it was.
    pub async fn compile(&self, doc: &PictureDocument) -> Result<CompileOutput, CompileError> {
        self.run(doc.canvas(), doc.label()).await
    }

    /// Fit an arbitrary image onto the hires grid and convert it.
    pub async fn import(
        &self,
        source: &impl Raster,
        label: &str,
    ) -> Result<CompileOutput, CompileError> {
        let canvas = Canvas::resample_from(source);
        self.run(&canvas, label).await
    }

    async fn run(&self, canvas: &Canvas, label: &str) -> Result<CompileOutput, CompileError> {
        if !is_valid_label(label) {
            return Err(CompileError::InvalidLabel(label.to_string()));
        }

        let scratch = self.scratch_dir()?;
        let input = scratch.path().join(INPUT_NAME);
        let output = scratch.path().join(OUTPUT_NAME);
        rendering::write_png(&input, canvas)?;

        tracing::info!(label, scratch = %scratch.path().display(), "Compiling picture");
        let log = self.converter.convert(&input, &output, label).await?;

        let document = read_output(&output, label, &log)?;
        tracing::info!(label, "Compile finished");
        Ok(CompileOutput { document, log })
    }
}

fn read_output(output: &Path, label: &str, log: &str) -> Result<PictureDocument, CompileError> {
    if !output.exists() {
        return Err(CompileError::ConverterFailed {
            exit_code: Some(0),
            log: format!("{log}no output file produced"),
        });
    }
    let text = std::fs::read_to_string(output)?;
    let mut document = codec::decode_expecting(&text, label)?;
    document.mark_dirty();
    Ok(document)
}
