//! USX writer: quick-xml events with 4-space indentation.
//!
//! Markers are written back as `style` attributes; chapters, verses and
//! milestones become empty elements, as USX 3 expects.

use std::io::Write;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::writer::Writer;

use crate::model::{CharSpan, Content, Document, Inline, InlineElement, Note};
use crate::writers::{WriteError, usj};

/// Serialize a document as USX.
pub fn write_string(doc: &Document) -> Result<String, WriteError> {
    let doc = usj::enrich_with_sids(doc.clone());
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);

    let mut usx = BytesStart::new("usx");
    usx.push_attribute(("version", doc.version.as_str()));
    writer.write_event(Event::Start(usx))?;

    for block in &doc.content {
        match block {
            Content::Book(book) => {
                let mut el = BytesStart::new("book");
                el.push_attribute(("code", book.code.as_str()));
                el.push_attribute(("style", book.marker.as_str()));
                if book.content.is_empty() {
                    writer.write_event(Event::Empty(el))?;
                } else {
                    writer.write_event(Event::Start(el))?;
                    for text in &book.content {
                        writer.write_event(Event::Text(BytesText::new(text)))?;
                    }
                    writer.write_event(Event::End(BytesEnd::new("book")))?;
                }
            }
            Content::Chapter(chapter) => {
                let mut el = BytesStart::new("chapter");
                el.push_attribute(("number", chapter.number.as_str()));
                el.push_attribute(("style", chapter.marker.as_str()));
                push_opt(&mut el, "sid", chapter.sid.as_deref());
                push_opt(&mut el, "altnumber", chapter.altnumber.as_deref());
                push_opt(&mut el, "pubnumber", chapter.pubnumber.as_deref());
                writer.write_event(Event::Empty(el))?;
            }
            Content::Para(para) => {
                let mut el = BytesStart::new("para");
                el.push_attribute(("style", para.marker.as_str()));
                if para.content.is_empty() {
                    writer.write_event(Event::Empty(el))?;
                } else {
                    writer.write_event(Event::Start(el))?;
                    for item in &para.content {
                        write_inline(&mut writer, item)?;
                    }
                    writer.write_event(Event::End(BytesEnd::new("para")))?;
                }
            }
        }
    }

    writer.write_event(Event::End(BytesEnd::new("usx")))?;
    Ok(String::from_utf8(writer.into_inner())?)
}

fn push_opt(el: &mut BytesStart<'_>, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        el.push_attribute((key, value));
    }
}

fn write_inline<W: Write>(writer: &mut Writer<W>, item: &Inline) -> Result<(), WriteError> {
    match item {
        Inline::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
        Inline::Element(InlineElement::Verse(verse)) => {
            let mut el = BytesStart::new("verse");
            el.push_attribute(("number", verse.number.as_str()));
            el.push_attribute(("style", verse.marker.as_str()));
            push_opt(&mut el, "sid", verse.sid.as_deref());
            push_opt(&mut el, "altnumber", verse.altnumber.as_deref());
            push_opt(&mut el, "pubnumber", verse.pubnumber.as_deref());
            writer.write_event(Event::Empty(el))?;
        }
        Inline::Element(InlineElement::Char(span)) => write_char(writer, span)?,
        Inline::Element(InlineElement::Milestone(ms)) => {
            let mut el = BytesStart::new("ms");
            el.push_attribute(("style", ms.marker.as_str()));
            for (key, value) in &ms.attrs {
                el.push_attribute((key.as_str(), value.as_str()));
            }
            writer.write_event(Event::Empty(el))?;
        }
        Inline::Element(InlineElement::Note(note)) => write_note(writer, note)?,
        Inline::Element(InlineElement::Figure(figure)) => {
            let mut el = BytesStart::new("figure");
            el.push_attribute(("style", figure.marker.as_str()));
            for (key, value) in &figure.attrs {
                el.push_attribute((key.as_str(), value.as_str()));
            }
            writer.write_event(Event::Start(el))?;
            for item in &figure.content {
                write_inline(writer, item)?;
            }
            writer.write_event(Event::End(BytesEnd::new("figure")))?;
        }
    }
    Ok(())
}

fn write_char<W: Write>(writer: &mut Writer<W>, span: &CharSpan) -> Result<(), WriteError> {
    let mut el = BytesStart::new("char");
    el.push_attribute(("style", span.marker.as_str()));
    push_opt(&mut el, "default", span.default.as_deref());
    for (key, value) in &span.attrs {
        el.push_attribute((key.as_str(), value.as_str()));
    }
    if span.content.is_empty() {
        writer.write_event(Event::Empty(el))?;
        return Ok(());
    }
    writer.write_event(Event::Start(el))?;
    for item in &span.content {
        write_inline(writer, item)?;
    }
    writer.write_event(Event::End(BytesEnd::new("char")))?;
    Ok(())
}

fn write_note<W: Write>(writer: &mut Writer<W>, note: &Note) -> Result<(), WriteError> {
    let mut el = BytesStart::new("note");
    el.push_attribute(("style", note.marker.as_str()));
    push_opt(&mut el, "caller", note.caller.as_deref());
    if note.content.is_empty() {
        writer.write_event(Event::Empty(el))?;
        return Ok(());
    }
    writer.write_event(Event::Start(el))?;
    for item in &note.content {
        write_inline(writer, item)?;
    }
    writer.write_event(Event::End(BytesEnd::new("note")))?;
    Ok(())
}
