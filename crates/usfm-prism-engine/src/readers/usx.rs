//! USX reader: a streaming pass over quick-xml events.
//!
//! USX brackets everything explicitly, so no mode tracking is needed: each
//! element maps straight onto a builder call. Two quirks are handled here:
//! `style` attributes become markers, and chapter/verse/milestone elements
//! that carry `eid` are end-of-span echoes of elements already seen and are
//! skipped (the original end-marker convention of USX 3).

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::builder::DocumentBuilder;
use crate::model::{AttrMap, Document};
use crate::readers::ReadError;

/// Parse USX text into a document via the given builder.
pub fn read_str<B: DocumentBuilder>(input: &str) -> Result<Document, ReadError> {
    let mut reader = Reader::from_str(input);
    let mut builder = B::new();
    let mut saw_root = false;

    loop {
        match reader.read_event()? {
            Event::Start(el) => {
                check_root(&el, &mut saw_root)?;
                handle_element(&mut builder, &el, false)?;
            }
            Event::Empty(el) => {
                check_root(&el, &mut saw_root)?;
                handle_element(&mut builder, &el, true)?;
            }
            Event::Text(el) => {
                if let Some(text) = normalize_text(&el.unescape()?) {
                    builder.add_text(&text);
                }
            }
            Event::End(el) => match el.local_name().as_ref() {
                b"book" => builder.end_book(),
                b"para" => builder.end_para(),
                b"char" => builder.end_char(),
                b"note" => builder.end_note(),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(ReadError::MissingUsxRoot);
    }
    Ok(builder.finish())
}

/// The first element of the stream must be the `<usx>` envelope.
fn check_root(el: &BytesStart<'_>, saw_root: &mut bool) -> Result<(), ReadError> {
    if *saw_root {
        return Ok(());
    }
    let name = String::from_utf8_lossy(el.local_name().as_ref()).into_owned();
    if name != "usx" {
        return Err(ReadError::UnexpectedRoot(name));
    }
    *saw_root = true;
    Ok(())
}

fn handle_element<B: DocumentBuilder>(
    builder: &mut B,
    el: &BytesStart<'_>,
    empty: bool,
) -> Result<(), ReadError> {
    let name = String::from_utf8_lossy(el.local_name().as_ref()).into_owned();
    let mut attrs = attributes(el)?;

    // USX spells the marker as `style`; span ids are positional noise for
    // the model and get recomputed on write.
    let marker = attrs.shift_remove("style").unwrap_or_else(|| name.clone());
    let eid = attrs.shift_remove("eid");
    attrs.shift_remove("sid");
    attrs.shift_remove("vid");

    match name.as_str() {
        "usx" => {
            if let Some(version) = attrs.get("version") {
                builder.set_version(version);
            }
        }
        "book" => {
            let code = attrs.shift_remove("code").unwrap_or_default();
            builder.start_book(&marker, &code);
            if empty {
                builder.end_book();
            }
        }
        "para" => {
            builder.start_para(&marker);
            if empty {
                builder.end_para();
            }
        }
        "chapter" => {
            if eid.is_none() {
                let number = attrs.shift_remove("number").unwrap_or_default();
                builder.add_chapter(&number, attrs);
            }
        }
        "verse" => {
            if eid.is_none() {
                let number = attrs.shift_remove("number").unwrap_or_default();
                builder.add_verse(&number, attrs);
            }
        }
        "char" => {
            let default = attrs.shift_remove("default");
            builder.start_char(&marker, attrs);
            if let Some(default) = default {
                builder.set_char_default(&default);
            }
            if empty {
                builder.end_char();
            }
        }
        "ms" => {
            if eid.is_none() {
                builder.add_milestone(&marker, attrs);
            }
        }
        "note" => {
            let caller = attrs.shift_remove("caller");
            builder.start_note(&marker, caller.as_deref());
            if empty {
                builder.end_note();
            }
        }
        _ => {}
    }
    Ok(())
}

fn attributes(el: &BytesStart<'_>) -> Result<AttrMap, ReadError> {
    let mut attrs = AttrMap::new();
    for attr in el.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        attrs.insert(key, value);
    }
    Ok(attrs)
}

/// Strip pretty-printing out of a mixed-content text node.
///
/// Indentation-only nodes disappear; whitespace runs that contain a line
/// break collapse to a single space; everything else is kept verbatim.
fn normalize_text(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        // A pure-space node without a newline is real inline spacing.
        return (!raw.contains('\n')).then(|| raw.to_string());
    }
    if !raw.contains('\n') {
        return Some(raw.to_string());
    }

    let mut out = String::with_capacity(raw.len());
    let mut run = String::new();
    for ch in raw.chars() {
        if ch.is_whitespace() {
            run.push(ch);
        } else {
            flush_whitespace(&mut out, &mut run);
            out.push(ch);
        }
    }
    flush_whitespace(&mut out, &mut run);
    Some(out)
}

fn flush_whitespace(out: &mut String, run: &mut String) {
    if run.is_empty() {
        return;
    }
    if run.contains('\n') {
        out.push(' ');
    } else {
        out.push_str(run);
    }
    run.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::UsjBuilder;
    use crate::model::{Content, Inline, InlineElement};
    use pretty_assertions::assert_eq;

    const PSALM_USX: &str = r#"<usx version="3.0">
    <book code="PSA" style="id">unfoldingWord Literal Text</book>
    <para style="h">Psalms</para>
    <chapter number="1" style="c" sid="PSA 1"/>
    <para style="q">
        <verse number="1" style="v" sid="PSA 1:1"/>Blessed is the <char style="w" default="Man">man</char> who walks</para>
    <verse eid="PSA 1:1"/>
    <chapter eid="PSA 1"/>
</usx>"#;

    fn psalm() -> crate::model::Document {
        read_str::<UsjBuilder>(PSALM_USX).expect("psalm USX parses")
    }

    #[test]
    fn reads_the_usx_envelope() {
        let doc = psalm();
        assert_eq!(doc.version, "3.0");
        assert_eq!(doc.book_code(), Some("PSA"));
        // end-marker echoes (eid) add nothing
        assert_eq!(doc.content.len(), 4);
    }

    #[test]
    fn style_attributes_become_markers() {
        let doc = psalm();
        let Content::Para(para) = &doc.content[1] else {
            panic!("expected the \\h para");
        };
        assert_eq!(para.marker, "h");
        assert_eq!(para.content[0].as_text(), Some("Psalms"));
    }

    #[test]
    fn chapter_and_verse_positions_survive() {
        let doc = psalm();
        let Content::Chapter(chapter) = &doc.content[2] else {
            panic!("expected the chapter");
        };
        assert_eq!(chapter.number, "1");

        let Content::Para(para) = &doc.content[3] else {
            panic!("expected the \\q para");
        };
        let Inline::Element(InlineElement::Verse(verse)) = &para.content[0] else {
            panic!("expected the verse first, got {:?}", para.content[0]);
        };
        assert_eq!(verse.number, "1");
        // sid is recomputed at write time, not carried through the model
        assert_eq!(verse.sid, None);
    }

    #[test]
    fn char_spans_keep_text_and_default() {
        let doc = psalm();
        let Content::Para(para) = &doc.content[3] else {
            panic!("expected the \\q para");
        };
        assert_eq!(para.content[1].as_text(), Some("Blessed is the "));
        let Inline::Element(InlineElement::Char(word)) = &para.content[2] else {
            panic!("expected the \\w span, got {:?}", para.content[2]);
        };
        assert_eq!(word.marker, "w");
        assert_eq!(word.default.as_deref(), Some("Man"));
        assert_eq!(word.content[0].as_text(), Some("man"));
        assert_eq!(para.content[3].as_text(), Some(" who walks"));
    }

    #[test]
    fn notes_and_milestones_map_to_elements() {
        let usx = r#"<usx version="3.0"><para style="p"><verse number="1" style="v"/>grace <note caller="+" style="f"><char style="ft">a note</char></note> and <ms style="zaln-s" x-strong="G5043"/>peace</para></usx>"#;
        let doc = read_str::<UsjBuilder>(usx).expect("parses");
        let Content::Para(para) = &doc.content[0] else {
            panic!("expected a para");
        };

        let note = para
            .content
            .iter()
            .find_map(|item| match item {
                Inline::Element(InlineElement::Note(note)) => Some(note),
                _ => None,
            })
            .expect("the note is present");
        assert_eq!(note.caller.as_deref(), Some("+"));

        let milestone = para
            .content
            .iter()
            .find_map(|item| match item {
                Inline::Element(InlineElement::Milestone(ms)) => Some(ms),
                _ => None,
            })
            .expect("the milestone is present");
        assert_eq!(milestone.marker, "zaln-s");
        assert_eq!(
            milestone.attrs.get("x-strong").map(String::as_str),
            Some("G5043")
        );
    }

    #[test]
    fn indentation_is_not_content() {
        let doc = psalm();
        let Content::Para(para) = &doc.content[3] else {
            panic!("expected the \\q para");
        };
        // No whitespace-only runs from the pretty-printed source.
        for item in &para.content {
            if let Some(text) = item.as_text() {
                assert!(!text.trim().is_empty());
            }
        }
    }

    #[test]
    fn malformed_xml_is_an_error() {
        let result = read_str::<UsjBuilder>("<usx version=\"3.0\"><para></usx>");
        assert!(matches!(result, Err(ReadError::Xml(_))));
    }

    #[test]
    fn non_usx_input_is_rejected() {
        assert!(matches!(
            read_str::<UsjBuilder>("not xml at all"),
            Err(ReadError::MissingUsxRoot)
        ));
        assert!(matches!(
            read_str::<UsjBuilder>("<osis></osis>"),
            Err(ReadError::UnexpectedRoot(_))
        ));
    }
}
