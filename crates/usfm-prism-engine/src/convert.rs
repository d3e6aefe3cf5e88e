//! The top-level conversion surface: [`Format`], [`parse`], [`render`] and
//! [`transform`].
//!
//! Same-format conversion is not a pass-through: the input still goes through
//! the model, which normalizes marker spelling, attribute placement and sids.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::builder::UsjBuilder;
use crate::model::Document;
use crate::readers::{self, ReadError};
use crate::writers::{self, WriteError};

/// The three supported serializations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Usfm,
    Usx,
    Usj,
}

impl Format {
    /// Canonical file extension for the format.
    pub fn extension(self) -> &'static str {
        match self {
            Format::Usfm => "usfm",
            Format::Usx => "usx",
            Format::Usj => "usj",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A format name that is none of `usfm`, `usx`, `usj`/`json`.
#[derive(Debug, Error)]
#[error("unsupported format `{0}`: expected usfm, usx or usj")]
pub struct UnsupportedFormat(pub String);

impl FromStr for Format {
    type Err = UnsupportedFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "usfm" | "sfm" => Ok(Format::Usfm),
            "usx" => Ok(Format::Usx),
            "usj" | "json" => Ok(Format::Usj),
            other => Err(UnsupportedFormat(other.to_string())),
        }
    }
}

/// Failure of a whole conversion, from either side of the model.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Parse input text of the given format into a document.
pub fn parse(input: &str, from: Format) -> Result<Document, ReadError> {
    match from {
        Format::Usfm => readers::usfm::read_str::<UsjBuilder>(input),
        Format::Usx => readers::usx::read_str::<UsjBuilder>(input),
        Format::Usj => readers::usj::read_str(input),
    }
}

/// Serialize a document into the given format. `pretty` only affects USJ.
pub fn render(doc: &Document, to: Format, pretty: bool) -> Result<String, WriteError> {
    match to {
        Format::Usfm => Ok(writers::usfm::write_string(doc)),
        Format::Usx => writers::usx::write_string(doc),
        Format::Usj => writers::usj::write_string(doc, pretty),
    }
}

/// Convert input text between two formats.
pub fn transform(input: &str, from: Format, to: Format) -> Result<String, ConvertError> {
    let doc = parse(input, from)?;
    Ok(render(&doc, to, false)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const USFM: &str = "\\id PSA Psalms\n\\usfm 3.0\n\\c 1\n\\q\n\\v 1 Blessed is the man\n";

    #[rstest::rstest]
    #[case("usfm", Format::Usfm)]
    #[case("USX", Format::Usx)]
    #[case("json", Format::Usj)]
    #[case("usj", Format::Usj)]
    fn format_names_parse(#[case] name: &str, #[case] expected: Format) {
        assert_eq!(name.parse::<Format>().unwrap(), expected);
    }

    #[test]
    fn unknown_format_names_are_rejected() {
        let err = "osis".parse::<Format>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unsupported format `osis`: expected usfm, usx or usj"
        );
    }

    #[test]
    fn usfm_to_usj_produces_the_envelope() {
        let usj = transform(USFM, Format::Usfm, Format::Usj).unwrap();
        let value: serde_json::Value = serde_json::from_str(&usj).unwrap();
        assert_eq!(value["type"], "USJ");
        assert_eq!(value["content"][0]["code"], "PSA");
    }

    #[test]
    fn usfm_to_usx_produces_the_envelope() {
        let usx = transform(USFM, Format::Usfm, Format::Usx).unwrap();
        assert!(usx.starts_with("<usx version=\"3.0\">"));
        assert!(usx.contains(r#"<book code="PSA" style="id">Psalms</book>"#));
    }

    #[test]
    fn same_format_conversion_normalizes_through_the_model() {
        let once = transform(USFM, Format::Usfm, Format::Usfm).unwrap();
        let twice = transform(&once, Format::Usfm, Format::Usfm).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn full_cycle_preserves_the_document() {
        let usj = transform(USFM, Format::Usfm, Format::Usj).unwrap();
        let usx = transform(&usj, Format::Usj, Format::Usx).unwrap();
        let back = transform(&usx, Format::Usx, Format::Usj).unwrap();
        assert_eq!(usj, back);
    }
}
