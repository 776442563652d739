//! Common test infrastructure for oric-picture integration tests.
//!
//! Each test file compiles its own copy of this module, so items may appear
//! unused from the perspective of a single test file even though they're
//! used elsewhere.

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod converters;
pub mod fixtures;

pub use converters::{FailingConverter, FakePictConv};
