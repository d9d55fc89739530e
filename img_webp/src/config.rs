//! Sweep configuration.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Source formats that get a WebP companion. Lowercase, matched case-insensitively.
pub const SOURCE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Extension of the derived copy.
pub const OUTPUT_EXTENSION: &str = "webp";

/// Fixed encoder settings. Quality is 0..=100, method (effort) is 0..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeParams {
    pub quality: u8,
    pub method: u8,
}

impl EncodeParams {
    pub const QUALITY: u8 = 85;
    pub const METHOD: u8 = 6;
}

impl Default for EncodeParams {
    fn default() -> Self {
        Self {
            quality: Self::QUALITY,
            method: Self::METHOD,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SweepConfig {
    pub image_dir: PathBuf,
    pub encode: EncodeParams,
}

impl SweepConfig {
    pub fn new(image_dir: impl Into<PathBuf>) -> Self {
        Self {
            image_dir: image_dir.into(),
            encode: EncodeParams::default(),
        }
    }
}

/// `<exe dir>/../data/images`: the binary sits one level below the project
/// root, next to `data/`.
pub fn default_image_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    image_dir_for_executable(&exe)
}

pub fn image_dir_for_executable(exe: &Path) -> Result<PathBuf> {
    let root = exe
        .parent()
        .and_then(Path::parent)
        .with_context(|| format!("Executable has no parent directory: {}", exe.display()))?;
    Ok(root.join("data").join("images"))
}
