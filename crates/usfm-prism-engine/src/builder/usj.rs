//! The one shipped [`DocumentBuilder`]: typed assembly straight into the
//! USJ-shaped model.

use crate::builder::DocumentBuilder;
use crate::model::{
    AttrMap, Book, Chapter, CharSpan, Content, Document, Inline, InlineElement, Milestone, Note,
    Para, Verse,
};

/// An open inline frame. Char spans and notes nest; the innermost frame
/// receives text and child elements.
#[derive(Debug)]
enum Frame {
    Char(CharSpan),
    Note(Note),
}

impl Frame {
    fn push(&mut self, item: Inline) {
        match self {
            Frame::Char(span) => span.content.push(item),
            Frame::Note(note) => note.content.push(item),
        }
    }
}

/// Assembles a [`Document`] from builder events.
#[derive(Debug)]
pub struct UsjBuilder {
    doc: Document,
    book: Option<Book>,
    para: Option<Para>,
    frames: Vec<Frame>,
}

impl UsjBuilder {
    /// Route an inline item to the innermost open frame, falling back to the
    /// open paragraph, then to the open book (text only, a book block holds
    /// no elements).
    fn push_inline(&mut self, item: Inline) {
        if let Some(frame) = self.frames.last_mut() {
            frame.push(item);
        } else if let Some(para) = self.para.as_mut() {
            para.content.push(item);
        } else if let Some(book) = self.book.as_mut() {
            if let Inline::Text(text) = item {
                book.content.push(text);
            }
        }
    }

    fn target_is_empty(&self) -> bool {
        match self.frames.last() {
            Some(Frame::Char(span)) => span.content.is_empty(),
            Some(Frame::Note(note)) => note.content.is_empty(),
            None => match (&self.para, &self.book) {
                (Some(para), _) => para.content.is_empty(),
                (None, Some(book)) => book.content.is_empty(),
                (None, None) => true,
            },
        }
    }

    fn close_innermost_frame(&mut self) {
        if let Some(frame) = self.frames.pop() {
            let element = match frame {
                Frame::Char(span) => InlineElement::Char(span),
                Frame::Note(note) => InlineElement::Note(note),
            };
            self.push_inline(Inline::Element(element));
        }
    }
}

impl DocumentBuilder for UsjBuilder {
    fn new() -> Self {
        UsjBuilder {
            doc: Document::new(),
            book: None,
            para: None,
            frames: Vec::new(),
        }
    }

    fn set_version(&mut self, version: &str) {
        if !version.is_empty() {
            self.doc.version = version.to_string();
        }
    }

    fn start_book(&mut self, marker: &str, code: &str) {
        self.book = Some(Book {
            marker: marker.to_string(),
            code: code.to_string(),
            content: Vec::new(),
        });
    }

    fn end_book(&mut self) {
        if let Some(book) = self.book.take() {
            self.doc.content.push(Content::Book(book));
        }
    }

    fn add_chapter(&mut self, number: &str, mut attrs: AttrMap) {
        let mut chapter = Chapter::new(number);
        chapter.altnumber = attrs.shift_remove("altnumber");
        chapter.pubnumber = attrs.shift_remove("pubnumber");
        self.doc.content.push(Content::Chapter(chapter));
    }

    fn set_chapter_pubnumber(&mut self, value: &str) {
        if let Some(Content::Chapter(chapter)) = self
            .doc
            .content
            .iter_mut()
            .rev()
            .find(|block| matches!(block, Content::Chapter(_)))
        {
            chapter.pubnumber = Some(value.to_string());
        }
    }

    fn start_para(&mut self, marker: &str) {
        self.para = Some(Para {
            marker: marker.to_string(),
            content: Vec::new(),
        });
    }

    fn end_para(&mut self) {
        if let Some(para) = self.para.take() {
            self.doc.content.push(Content::Para(para));
        }
    }

    fn add_verse(&mut self, number: &str, mut attrs: AttrMap) {
        let mut verse = Verse::new(number);
        verse.altnumber = attrs.shift_remove("altnumber");
        verse.pubnumber = attrs.shift_remove("pubnumber");
        self.push_inline(Inline::Element(InlineElement::Verse(verse)));
    }

    fn add_milestone(&mut self, marker: &str, attrs: AttrMap) {
        let mut milestone = Milestone::new(marker);
        milestone.attrs = attrs;
        self.push_inline(Inline::Element(InlineElement::Milestone(milestone)));
    }

    fn start_char(&mut self, marker: &str, attrs: AttrMap) {
        let mut span = CharSpan::new(marker);
        span.attrs = attrs;
        self.frames.push(Frame::Char(span));
    }

    fn set_char_default(&mut self, value: &str) {
        if let Some(Frame::Char(span)) = self.frames.last_mut() {
            span.default = Some(value.to_string());
        }
    }

    fn add_char_attr(&mut self, key: &str, value: &str) {
        if let Some(Frame::Char(span)) = self.frames.last_mut() {
            span.attrs.insert(key.to_string(), value.to_string());
        }
    }

    fn end_char(&mut self) {
        if matches!(self.frames.last(), Some(Frame::Char(_))) {
            self.close_innermost_frame();
        }
    }

    fn start_note(&mut self, marker: &str, caller: Option<&str>) {
        self.frames.push(Frame::Note(Note {
            marker: marker.to_string(),
            caller: caller.map(str::to_string),
            content: Vec::new(),
        }));
    }

    fn end_note(&mut self) {
        if matches!(self.frames.last(), Some(Frame::Note(_))) {
            self.close_innermost_frame();
        }
    }

    fn add_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        // Leading whitespace in a fresh container is layout, not content.
        if text.trim().is_empty() && self.target_is_empty() {
            return;
        }
        // Merge with a preceding text run so readers can emit text in pieces.
        let merged = match self.frames.last_mut() {
            Some(Frame::Char(span)) => merge_text(&mut span.content, text),
            Some(Frame::Note(note)) => merge_text(&mut note.content, text),
            None => match self.para.as_mut() {
                Some(para) => merge_text(&mut para.content, text),
                None => false,
            },
        };
        if !merged {
            self.push_inline(Inline::text(text));
        }
    }

    fn finish(mut self) -> Document {
        while !self.frames.is_empty() {
            self.close_innermost_frame();
        }
        self.end_para();
        self.end_book();
        self.doc
    }
}

fn merge_text(content: &mut [Inline], text: &str) -> bool {
    if let Some(Inline::Text(last)) = content.last_mut() {
        last.push_str(text);
        true
    } else {
        false
    }
}
