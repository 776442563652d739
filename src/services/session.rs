use std::path::{Path, PathBuf};

use oric_hires::{Canvas, PictureDocument};

use crate::error::{CompileError, DocumentError};
use crate::rendering;
use crate::services::{document_store, CompilePipeline};

/// One open picture and the tools that act on it
///
/// The session owns its document. Edits go through [`Session::document_mut`];
/// [`Session::compile`] and [`Session::import_png`] take `&mut self`, so
/// nothing else can touch the document while a conversion is running, and
/// the document is only replaced once the conversion has succeeded.
pub struct Session {
    document: PictureDocument,
    path: Option<PathBuf>,
    pipeline: CompilePipeline,
}

impl Session {
    /// A session on a blank picture
    pub fn new(label: impl Into<String>, pipeline: CompilePipeline) -> Self {
        Self {
            document: PictureDocument::with_canvas(label, Canvas::default()),
            path: None,
            pipeline,
        }
    }

    /// A session on a picture loaded from `path`
    pub fn open(path: impl Into<PathBuf>, pipeline: CompilePipeline) -> Result<Self, DocumentError> {
        let path = path.into();
        let document = document_store::open(&path)?;
        Ok(Self {
            document,
            path: Some(path),
            pipeline,
        })
    }

    pub fn document(&self) -> &PictureDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut PictureDocument {
        &mut self.document
    }

    /// Swap in another picture. The result is unsaved, so it is marked dirty.
    pub fn replace_document(&mut self, document: PictureDocument) {
        self.document = document;
        self.document.mark_dirty();
    }

    /// Start over on a blank picture with no file behind it
    pub fn new_document(&mut self, label: impl Into<String>) {
        self.document = PictureDocument::with_canvas(label, Canvas::default());
        self.path = None;
    }

    /// Load `path` in place of the current picture
    ///
    /// The file is fully decoded before anything is replaced, so a malformed
    /// file leaves the current document and path as they were.
    pub fn open_document(&mut self, path: impl Into<PathBuf>) -> Result<(), DocumentError> {
        let path = path.into();
        let document = document_store::open(&path)?;
        tracing::info!(path = %path.display(), "Opened picture");
        self.document = document;
        self.path = Some(path);
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.document.is_dirty()
    }

    /// Save to the session's current path
    pub fn save(&mut self) -> Result<(), DocumentError> {
        let path = self.path.clone().ok_or(DocumentError::NoPath)?;
        self.save_as(path)
    }

    /// Save to `path` and make it the session's current path
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<(), DocumentError> {
        let path = path.into();
        document_store::save(&self.document, &path)?;
        self.path = Some(path);
        self.document.mark_clean();
        Ok(())
    }

    /// Run the converter on the current picture and adopt its result
    ///
    /// Returns the converter log. On failure the document is unchanged.
    pub async fn compile(&mut self) -> Result<String, CompileError> {
        let output = self.pipeline.compile(&self.document).await?;
        self.document = output.document;
        Ok(output.log)
    }

    /// Import a PNG through the converter, replacing the current picture
    ///
    /// The current label is kept. On failure the document is unchanged.
    pub async fn import_png(&mut self, png: &Path) -> Result<String, CompileError> {
        let image = rendering::read_png(png)?;
        let output = self.pipeline.import(&image, self.document.label()).await?;
        tracing::info!(source = %png.display(), "Imported image");
        self.document = output.document;
        Ok(output.log)
    }

    /// Write the canvas as a PNG (the image the converter would receive)
    pub fn export_png(&self, path: &Path) -> Result<(), CompileError> {
        rendering::write_png(path, self.document.canvas())?;
        tracing::info!(path = %path.display(), "Exported PNG");
        Ok(())
    }
}
