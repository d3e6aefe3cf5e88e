//! USJ writer: sid enrichment plus serde serialization.

use crate::model::{Content, Document, Inline, InlineElement};
use crate::writers::WriteError;

/// Serialize a document as USJ, compact or pretty-printed.
pub fn write_string(doc: &Document, pretty: bool) -> Result<String, WriteError> {
    let enriched = enrich_with_sids(doc.clone());
    let json = if pretty {
        serde_json::to_string_pretty(&enriched)?
    } else {
        serde_json::to_string(&enriched)?
    };
    Ok(json)
}

/// Thread book and chapter context through the document and stamp standard
/// ids onto chapters (`PSA 1`) and verses (`PSA 1:1`).
///
/// Existing sids are overwritten: the model treats them as derived data, so
/// this is the single source of truth for them.
pub fn enrich_with_sids(mut doc: Document) -> Document {
    let mut book_code = String::new();
    let mut chapter_number = String::new();

    for block in &mut doc.content {
        match block {
            Content::Book(book) => {
                book_code = book.code.clone();
            }
            Content::Chapter(chapter) => {
                chapter_number = chapter.number.clone();
                if !book_code.is_empty() {
                    chapter.sid = Some(format!("{book_code} {chapter_number}"));
                }
            }
            Content::Para(para) => {
                for item in &mut para.content {
                    if let Inline::Element(InlineElement::Verse(verse)) = item
                        && !book_code.is_empty()
                        && !chapter_number.is_empty()
                    {
                        verse.sid =
                            Some(format!("{book_code} {chapter_number}:{}", verse.number));
                    }
                }
            }
        }
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::UsjBuilder;
    use crate::readers;
    use pretty_assertions::assert_eq;

    const USFM: &str =
        "\\id PSA Psalms\n\\usfm 3.0\n\\c 1\n\\q\n\\v 1 Blessed is the man\n\\v 2 who walks\n";

    #[test]
    fn stamps_chapter_and_verse_sids() {
        let doc = readers::usfm::read_str::<UsjBuilder>(USFM).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&write_string(&doc, false).unwrap()).unwrap();

        assert_eq!(json["content"][1]["sid"], "PSA 1");
        assert_eq!(json["content"][2]["content"][0]["sid"], "PSA 1:1");
        assert_eq!(json["content"][2]["content"][2]["sid"], "PSA 1:2");
    }

    #[test]
    fn keeps_the_usj_envelope() {
        let doc = readers::usfm::read_str::<UsjBuilder>(USFM).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&write_string(&doc, true).unwrap()).unwrap();
        assert_eq!(json["type"], "USJ");
        assert_eq!(json["version"], "3.0");
    }

    #[test]
    fn documents_without_a_book_get_no_sids() {
        let doc = readers::usfm::read_str::<UsjBuilder>("\\c 1\n\\p\n\\v 1 text\n").unwrap();
        let enriched = enrich_with_sids(doc);
        let Content::Chapter(chapter) = &enriched.content[0] else {
            panic!("expected a chapter");
        };
        assert_eq!(chapter.sid, None);
    }
}
