//! The picture document: canvas plus label identity and dirty state.

use crate::canvas::Canvas;
use crate::codec::DEFAULT_LABEL;
use crate::palette::OricColour;

/// A picture being edited.
///
/// Equality compares label and pixels only; the dirty flag is session
/// state, not picture content.
#[derive(Debug, Clone)]
pub struct PictureDocument {
    label: String,
    canvas: Canvas,
    dirty: bool,
}

impl PictureDocument {
    /// A blank black picture with the default label.
    pub fn new() -> Self {
        Self::with_canvas(DEFAULT_LABEL, Canvas::new(OricColour::Black))
    }

    /// A clean document wrapping an existing canvas.
    pub fn with_canvas(label: impl Into<String>, canvas: Canvas) -> Self {
        Self {
            label: label.into(),
            canvas,
            dirty: false,
        }
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
        self.dirty = true;
    }

    #[inline]
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Mutable canvas access. Marks the document dirty.
    pub fn canvas_mut(&mut self) -> &mut Canvas {
        self.dirty = true;
        &mut self.canvas
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

impl Default for PictureDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for PictureDocument {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && self.canvas == other.canvas
    }
}

impl Eq for PictureDocument {}
