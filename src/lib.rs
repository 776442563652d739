//! oric-picture - ORIC hires picture editor
//!
//! Picture files, PNG import/export and the PictConv compile pipeline
//! around the `oric-hires` canvas and codec.
//! This library exposes modules for integration testing.

pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
