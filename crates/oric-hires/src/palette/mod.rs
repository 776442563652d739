//! The fixed ORIC palette
//!
//! This module provides the eight-colour [`OricColour`] type and the error
//! returned when parsing a colour from user input.

mod colour;
mod error;

pub use colour::{OricColour, PALETTE_SIZE};
pub use error::ParseColourError;
