//! Readers: one per source format, all assembling the same model.
//!
//! The USFM and USX readers drive a [`DocumentBuilder`]; the USJ reader is a
//! direct serde deserialization since the model is USJ-shaped.
//!
//! [`DocumentBuilder`]: crate::builder::DocumentBuilder

pub mod usfm;
pub mod usj;
pub mod usx;

use thiserror::Error;
use usfm_prism_syntax::GrammarError;

/// Failure while reading a source document into the model.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("Error loading grammar: {0}")]
    Grammar(#[from] GrammarError),
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("malformed XML attribute: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported document root `{0}`")]
    UnexpectedRoot(String),
    #[error("expected a <usx> root element")]
    MissingUsxRoot,
}
