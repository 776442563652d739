//! Error type for colour parsing

use thiserror::Error;

/// Error returned when a colour name or index cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColourError {
    /// Numeric index outside 0..=7
    #[error("colour index {0} out of range (expected 0-7)")]
    IndexOutOfRange(u32),
    /// Neither a known colour name nor a number
    #[error("unknown colour `{0}`")]
    UnknownName(String),
}
