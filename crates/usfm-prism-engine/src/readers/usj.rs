//! USJ reader. The model is USJ-shaped, so this is a serde deserialization
//! plus an envelope check rather than a builder-driven walk.

use crate::model::Document;
use crate::readers::ReadError;

/// Parse USJ text into a document.
pub fn read_str(input: &str) -> Result<Document, ReadError> {
    let doc: Document = serde_json::from_str(input)?;
    if !doc.doc_type.eq_ignore_ascii_case("usj") {
        return Err(ReadError::UnexpectedRoot(doc.doc_type));
    }
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Content, Inline, InlineElement};
    use pretty_assertions::assert_eq;

    const PSALM_USJ: &str = r#"{
        "type": "USJ",
        "version": "3.0",
        "content": [
            {"type": "book", "marker": "id", "code": "PSA", "content": ["unfoldingWord Literal Text"]},
            {"type": "chapter", "marker": "c", "number": "1", "sid": "PSA 1"},
            {"type": "para", "marker": "q", "content": [
                {"type": "verse", "marker": "v", "number": "1"},
                "Blessed is the ",
                {"type": "char", "marker": "w", "default": "Man", "content": ["man"]}
            ]}
        ]
    }"#;

    #[test]
    fn reads_typed_usj() {
        let doc = read_str(PSALM_USJ).expect("psalm USJ parses");
        assert_eq!(doc.version, "3.0");
        assert_eq!(doc.book_code(), Some("PSA"));

        let Content::Para(para) = &doc.content[2] else {
            panic!("expected the \\q para");
        };
        let Inline::Element(InlineElement::Char(word)) = &para.content[2] else {
            panic!("expected the \\w span");
        };
        assert_eq!(word.default.as_deref(), Some("Man"));
    }

    #[test]
    fn missing_version_is_an_error() {
        let result = read_str(r#"{"type": "USJ", "content": []}"#);
        assert!(matches!(result, Err(ReadError::Json(_))));
    }

    #[test]
    fn foreign_roots_are_rejected() {
        let result = read_str(r#"{"type": "OSIS", "version": "3.0", "content": []}"#);
        assert!(matches!(result, Err(ReadError::UnexpectedRoot(_))));
    }
}
