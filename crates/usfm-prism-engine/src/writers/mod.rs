//! Writers: one per target format, all reading from the same model.
//!
//! The USJ writer is the canonical one; the others are projections of the
//! same sid-enriched document.

pub mod usfm;
pub mod usj;
pub mod usx;

use thiserror::Error;

/// Failure while serializing a document.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("serialized document was not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
