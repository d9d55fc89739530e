use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a sweep before any file is touched.
#[derive(Error, Debug)]
pub enum SweepError {
    #[error("Image directory does not exist: {}", .path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("Image path is not a directory: {}", .path.display())]
    NotADirectory { path: PathBuf },
}

/// Per-file encode failure. Counted and reported, never fatal to the sweep.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("{tool} failed (exit code: {}): {}", display_exit_code(.exit_code), .stderr.trim())]
    ToolFailed {
        tool: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Encoder reported success but wrote an empty file")]
    EmptyOutput,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn display_exit_code(code: &Option<i32>) -> String {
    code.map(|c| c.to_string())
        .unwrap_or_else(|| "none".to_string())
}

pub type Result<T> = std::result::Result<T, SweepError>;
