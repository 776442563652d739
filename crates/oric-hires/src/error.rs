//! Error types for canvas, attribute and codec operations.
//!
//! [`HiresError`] is the single error returned by the public API. Decode
//! failures carry a [`FormatError`] with the line or row where parsing
//! stopped, so a caller can point the user at the broken spot.

use thiserror::Error;

/// Why a cell could not be written as hires picture data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellConflict {
    /// The cell holds more than two distinct colours.
    TooManyColours(usize),
    /// The cell holds at most two colours, but no ink/paper state reachable
    /// through the serial attributes earlier in the scanline can show them.
    AttributeClash,
}

impl std::fmt::Display for CellConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellConflict::TooManyColours(n) => write!(f, "{n} distinct colours"),
            CellConflict::AttributeClash => {
                write!(f, "colours unreachable from the scanline's attributes")
            }
        }
    }
}

/// Unified error type for the oric-hires public API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HiresError {
    /// A coordinate, radius or index outside its valid range.
    #[error("{what} {value} out of range (limit {limit})")]
    OutOfRange {
        what: &'static str,
        value: usize,
        limit: usize,
    },

    /// A cell that violates the hardware colour rule where conformance is
    /// required.
    #[error("non-conformant cell at row {row}, cell {cell}: {conflict}")]
    NonConformantCell {
        row: usize,
        cell: usize,
        conflict: CellConflict,
    },

    /// A picture label that is not an assembler identifier.
    #[error("invalid picture label `{0}`")]
    InvalidLabel(String),

    /// The picture text could not be parsed.
    #[error("malformed picture: {0}")]
    MalformedFormat(#[from] FormatError),
}

impl HiresError {
    pub(crate) fn out_of_range(what: &'static str, value: usize, limit: usize) -> Self {
        HiresError::OutOfRange { what, value, limit }
    }
}

/// Decode-time parse failures.
///
/// Line numbers are 1-based and refer to the source text; rows and columns
/// are picture coordinates (row 0..200, byte column 0..40).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("no picture label found")]
    MissingLabel,

    #[error("line {line}: invalid label `{label}`")]
    InvalidLabel { line: usize, label: String },

    #[error("line {line}: expected label `{expected}`, found `{found}`")]
    UnexpectedLabel {
        line: usize,
        expected: String,
        found: String,
    },

    #[error("line {line}: second label `{label}` (one picture per file)")]
    MultipleLabels { line: usize, label: String },

    #[error("line {line}: data before the picture label")]
    DataBeforeLabel { line: usize },

    #[error("line {line}: unsupported directive `{directive}`")]
    UnsupportedDirective { line: usize, directive: String },

    #[error("line {line}: invalid byte `{token}`")]
    InvalidByte { line: usize, token: String },

    #[error("line {line}: value {value} does not fit in a byte")]
    ByteOutOfRange { line: usize, value: u32 },

    #[error("byte table truncated at row {row} ({found} of {expected} bytes)")]
    Truncated {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("byte table too long ({found} bytes, expected {expected})")]
    TrailingData { found: usize, expected: usize },

    #[error("row {row}, column {column}: text-mode attribute ${byte:02x}")]
    TextModeAttribute { row: usize, column: usize, byte: u8 },
}
