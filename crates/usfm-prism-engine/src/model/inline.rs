//! Inline content: everything that can appear inside a paragraph.

use serde::{Deserialize, Serialize};

use super::AttrMap;

/// One inline item. USJ mixes bare strings and typed objects inside content
/// arrays, hence the untagged split between text and elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Inline {
    Text(String),
    Element(InlineElement),
}

impl Inline {
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text(text.into())
    }

    /// The plain text of this item, if it is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Inline::Text(text) => Some(text),
            Inline::Element(_) => None,
        }
    }
}

/// A typed inline element, selected by the USJ `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InlineElement {
    #[serde(rename = "verse")]
    Verse(Verse),
    #[serde(rename = "char")]
    Char(CharSpan),
    #[serde(rename = "ms")]
    Milestone(Milestone),
    #[serde(rename = "note")]
    Note(Note),
    #[serde(rename = "figure")]
    Figure(Figure),
}

/// A verse milestone (`\v 1`). `number` may be a range (`1-2`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verse {
    pub marker: String,
    pub number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altnumber: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pubnumber: Option<String>,
}

impl Verse {
    pub fn new(number: impl Into<String>) -> Self {
        Verse {
            marker: "v".to_string(),
            number: number.into(),
            sid: None,
            altnumber: None,
            pubnumber: None,
        }
    }
}

/// A character-level span (`\w …\w*`, `\bd …\bd*`).
///
/// `default` holds the marker's default attribute (`\w man|Man\w*`); any
/// other attributes go into the ordered `attrs` bag and serialize as
/// top-level USJ keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharSpan {
    pub marker: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Inline>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(flatten, skip_serializing_if = "AttrMap::is_empty")]
    pub attrs: AttrMap,
}

impl CharSpan {
    pub fn new(marker: impl Into<String>) -> Self {
        CharSpan {
            marker: marker.into(),
            content: Vec::new(),
            default: None,
            attrs: AttrMap::new(),
        }
    }
}

/// A standalone milestone (`\ts\*`, `\zaln-s |…\*`). No content of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub marker: String,
    #[serde(flatten, skip_serializing_if = "AttrMap::is_empty")]
    pub attrs: AttrMap,
}

impl Milestone {
    pub fn new(marker: impl Into<String>) -> Self {
        Milestone {
            marker: marker.into(),
            attrs: AttrMap::new(),
        }
    }
}

/// A footnote or cross reference (`\f + …\f*`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub marker: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caller: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Inline>,
}

/// A figure (`\fig …\fig*`): attributes plus an optional caption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub marker: String,
    #[serde(flatten, skip_serializing_if = "AttrMap::is_empty")]
    pub attrs: AttrMap,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Inline>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn inline_strings_deserialize_as_text() {
        let items: Vec<Inline> =
            serde_json::from_str(r#"["Blessed is the ", {"type": "verse", "marker": "v", "number": "1"}]"#)
                .unwrap();

        assert_eq!(items[0].as_text(), Some("Blessed is the "));
        match &items[1] {
            Inline::Element(InlineElement::Verse(verse)) => assert_eq!(verse.number, "1"),
            other => panic!("expected a verse, got {other:?}"),
        }
    }

    #[test]
    fn char_span_keeps_unknown_attributes() {
        let json = r#"{"type": "char", "marker": "w", "x-occurrence": "1", "content": ["milestone"]}"#;
        let element: InlineElement = serde_json::from_str(json).unwrap();

        let InlineElement::Char(span) = &element else {
            panic!("expected a char span");
        };
        assert_eq!(span.attrs.get("x-occurrence").map(String::as_str), Some("1"));

        // And they come back out at the top level.
        let back = serde_json::to_string(&element).unwrap();
        assert!(back.contains(r#""x-occurrence":"1""#));
    }

    #[test]
    fn milestone_round_trips_attributes_in_order() {
        let json = r#"{"type": "ms", "marker": "zaln-s", "x-strong": "G5043", "x-occurrence": "1"}"#;
        let element: InlineElement = serde_json::from_str(json).unwrap();
        let keys: Vec<&str> = match &element {
            InlineElement::Milestone(ms) => ms.attrs.keys().map(String::as_str).collect(),
            other => panic!("expected a milestone, got {other:?}"),
        };
        assert_eq!(keys, vec!["x-strong", "x-occurrence"]);
    }
}
