//! The typed document model, shaped after USJ.
//!
//! USJ is the canonical in-memory representation: both other formats read
//! into it and write out of it. The serde layout below matches USJ 3.x JSON
//! directly, so the USJ reader/writer are (almost) plain serde round-trips.

mod content;
mod inline;

pub use content::{Book, Chapter, Content, Para};
pub use inline::{CharSpan, Figure, Inline, InlineElement, Milestone, Note, Verse};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Attribute bag for markers that carry open-ended attributes
/// (`x-occurrence`, `strong`, …). Insertion order is preserved so documents
/// round-trip without attribute reshuffling.
pub type AttrMap = IndexMap<String, String>;

/// USFM version a document defaults to when the source does not declare one.
pub const DEFAULT_VERSION: &str = "3.0";

/// A whole scripture document: the root of the USJ shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "type")]
    pub doc_type: String,
    pub version: String,
    pub content: Vec<Content>,
}

impl Document {
    /// An empty document with the default version.
    pub fn new() -> Self {
        Document {
            doc_type: "USJ".to_string(),
            version: DEFAULT_VERSION.to_string(),
            content: Vec::new(),
        }
    }

    /// The book code (`PSA`, `GEN`, …) if the document carries a book block.
    pub fn book_code(&self) -> Option<&str> {
        self.content.iter().find_map(|block| match block {
            Content::Book(book) => Some(book.code.as_str()),
            _ => None,
        })
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn document_serializes_with_usj_envelope() {
        let mut doc = Document::new();
        doc.content.push(Content::Book(Book {
            marker: "id".to_string(),
            code: "PSA".to_string(),
            content: vec!["Psalms".to_string()],
        }));

        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&doc).unwrap()).unwrap();
        assert_eq!(json["type"], "USJ");
        assert_eq!(json["version"], "3.0");
        assert_eq!(json["content"][0]["type"], "book");
        assert_eq!(json["content"][0]["code"], "PSA");
    }

    #[test]
    fn book_code_finds_the_book_block() {
        let mut doc = Document::new();
        assert_eq!(doc.book_code(), None);

        doc.content.push(Content::Book(Book {
            marker: "id".to_string(),
            code: "GEN".to_string(),
            content: Vec::new(),
        }));
        assert_eq!(doc.book_code(), Some("GEN"));
    }
}
