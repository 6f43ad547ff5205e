use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File name Kindle uses for the clippings export, under `documents/`.
pub const CLIPPINGS_FILENAME: &str = "My Clippings.txt";

#[derive(Debug)]
pub enum DeviceError {
    InputNotFound(String),
    ClippingsNotFound(String),
}

impl std::fmt::Display for DeviceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceError::InputNotFound(path) => {
                write!(f, "Input path does not exist: {}", path)
            }
            DeviceError::ClippingsNotFound(path) => {
                write!(f, "No '{}' found under {}", CLIPPINGS_FILENAME, path)
            }
        }
    }
}

impl std::error::Error for DeviceError {}

/// Resolve the clippings file from the configured input path.
///
/// A file path is taken as-is, so any export location works. A directory
/// (typically a mounted Kindle root) is searched for the clippings file.
pub fn resolve_clippings_path(input: &Path) -> Result<PathBuf, DeviceError> {
    if input.is_file() {
        return Ok(input.to_path_buf());
    }

    if !input.is_dir() {
        return Err(DeviceError::InputNotFound(input.display().to_string()));
    }

    WalkDir::new(input)
        .into_iter()
        .filter_map(|e| e.ok())
        .find(|e| {
            e.path()
                .file_name()
                .map(|n| n.to_string_lossy() == CLIPPINGS_FILENAME)
                .unwrap_or(false)
        })
        .map(|e| e.path().to_path_buf())
        .ok_or_else(|| DeviceError::ClippingsNotFound(input.display().to_string()))
}
