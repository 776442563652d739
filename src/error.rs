use std::path::PathBuf;

use oric_hires::HiresError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("Unsupported PNG format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Converter failed ({}): {log}", exit_status(.exit_code))]
    ConverterFailed {
        exit_code: Option<i32>,
        log: String,
    },

    #[error("Invalid label: {0}")]
    InvalidLabel(String),

    #[error("Converter output rejected: {0}")]
    InvalidOutput(#[from] HiresError),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn exit_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code".to_string(),
    }
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid picture {}: {source}", .path.display())]
    Picture { path: PathBuf, source: HiresError },

    #[error("Cannot save picture: {0}")]
    Encode(#[from] HiresError),

    #[error("No file name set for this picture")]
    NoPath,
}
