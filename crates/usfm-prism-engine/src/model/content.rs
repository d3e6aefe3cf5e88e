//! Block-level content: the direct children of the document root.

use serde::{Deserialize, Serialize};

use super::inline::Inline;

/// One block-level element. The `type` field of the USJ object selects the
/// variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    Book(Book),
    Chapter(Chapter),
    Para(Para),
}

/// The book identification block (`\id PSA …`).
///
/// Its content is the free text trailing the id line; USJ keeps it as plain
/// strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub marker: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<String>,
}

/// A chapter milestone (`\c 1`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub marker: String,
    pub number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altnumber: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pubnumber: Option<String>,
}

impl Chapter {
    pub fn new(number: impl Into<String>) -> Self {
        Chapter {
            marker: "c".to_string(),
            number: number.into(),
            sid: None,
            altnumber: None,
            pubnumber: None,
        }
    }
}

/// A paragraph-level block (`\p`, `\q2`, `\s`, `\mt`, …) and its inline
/// content. Verses live inside paragraphs, not the other way round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Para {
    pub marker: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Inline>,
}
