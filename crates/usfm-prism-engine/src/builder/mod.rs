//! The builder seam between the readers and the document model.
//!
//! All structural readers (USFM, USX) drive a [`DocumentBuilder`] rather than
//! constructing model values directly. The trait mirrors the event shape of
//! the formats: blocks open and close, inline frames (char spans, notes)
//! nest, text runs land in whatever frame is open.

mod usj;

pub use usj::UsjBuilder;

use crate::model::{AttrMap, Document};

/// Receives document structure events from a reader and assembles a
/// [`Document`].
///
/// Call protocol, enforced by the readers:
/// - `start_book`/`end_book` and `start_para`/`end_para` bracket blocks and
///   do not nest;
/// - `start_char`/`end_char` and `start_note`/`end_note` bracket inline
///   frames and may nest (char inside note, char inside char);
/// - `add_text` targets the innermost open frame, then the open block;
/// - `finish` closes anything still open and yields the document.
pub trait DocumentBuilder {
    fn new() -> Self;

    /// Record the USFM/USX version of the source.
    fn set_version(&mut self, version: &str);

    fn start_book(&mut self, marker: &str, code: &str);
    fn end_book(&mut self);

    fn add_chapter(&mut self, number: &str, attrs: AttrMap);
    /// Attach a published chapter label to the most recent chapter.
    fn set_chapter_pubnumber(&mut self, value: &str);

    fn start_para(&mut self, marker: &str);
    fn end_para(&mut self);

    fn add_verse(&mut self, number: &str, attrs: AttrMap);
    fn add_milestone(&mut self, marker: &str, attrs: AttrMap);

    fn start_char(&mut self, marker: &str, attrs: AttrMap);
    /// Set the default attribute (`\w man|Man\w*`) of the innermost open
    /// char span.
    fn set_char_default(&mut self, value: &str);
    /// Add a named attribute to the innermost open char span.
    fn add_char_attr(&mut self, key: &str, value: &str);
    fn end_char(&mut self);

    fn start_note(&mut self, marker: &str, caller: Option<&str>);
    fn end_note(&mut self);

    /// Append a text run to the innermost open frame.
    fn add_text(&mut self, text: &str);

    fn finish(self) -> Document;
}
