//! Free-paint canvas
//!
//! [`Canvas`] is the mutable 240×200 bitmap every editing operation works
//! on. The [`resize`] submodule fits arbitrary rasters onto it.

mod canvas;
pub mod resize;

pub use canvas::{Canvas, MAX_BRUSH_RADIUS, MIN_BRUSH_RADIUS};
