//! File IO helpers for the conversion pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use crate::convert::Format;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot infer a format from `{0}`: expected a .usfm, .usx or .usj/.json extension")]
    UnknownExtension(PathBuf),
}

/// Read a source document and return its content.
pub fn read_file(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Write a converted document, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) -> Result<(), IoError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }
    fs::write(path, content).map_err(IoError::Io)
}

/// Infer the document format from a file extension.
pub fn detect_format(path: &Path) -> Result<Format, IoError> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("usfm") | Some("sfm") => Ok(Format::Usfm),
        Some("usx") => Ok(Format::Usx),
        Some("usj") | Some("json") => Ok(Format::Usj),
        _ => Err(IoError::UnknownExtension(path.to_path_buf())),
    }
}
