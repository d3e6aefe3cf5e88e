//! USFM reader: a token-driven state machine over the marker grammar.
//!
//! The lexer (from `usfm-prism-syntax`) classifies the input; this module
//! turns the token stream into builder events. Structure in USFM is implied
//! rather than bracketed: a paragraph runs until the next paragraph-level
//! marker, a book id line runs until end of line. The machine tracks a
//! small amount of context: the current line mode, the stack of open char
//! spans, whether a note or milestone is being collected.

use usfm_prism_syntax::{Token, TokenKind, language, lex};

use crate::builder::DocumentBuilder;
use crate::model::{AttrMap, Document};
use crate::readers::ReadError;

/// Character-level markers of USFM 3 (content spans closed by `\marker*`).
/// Anything `+`-prefixed is a nested char marker regardless of this list.
const CHAR_MARKERS: &[&str] = &[
    "add", "bd", "bdit", "bk", "dc", "em", "fk", "fl", "fq", "fqa", "fr", "ft", "fv", "fw", "it",
    "k", "nd", "no", "ord", "pn", "png", "pro", "qac", "qs", "qt", "rb", "rq", "sc", "sig", "sls",
    "sup", "tl", "w", "wa", "wg", "wh", "wj", "xk", "xo", "xq", "xt",
];

/// Note-opening markers (closed by `\marker*`, carry a caller).
const NOTE_MARKERS: &[&str] = &["f", "fe", "ef", "x", "ex"];

/// Note-internal text markers. These are not nested in USFM: each one
/// implicitly closes the previous (`\fr 1:1 \ft text` are siblings).
const NOTE_TEXT_MARKERS: &[&str] = &[
    "fk", "fl", "fp", "fq", "fqa", "fr", "ft", "fv", "fw", "xk", "xo", "xq", "xt",
];

/// What the current line's text belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Between blocks; stray text has nowhere to go.
    Idle,
    /// After `\usfm`: text is the version number.
    Header,
    /// After `\id`: first word is the book code, the rest is book text.
    Book,
    /// Inside a paragraph (and possibly char/note frames).
    Para,
}

fn is_char_marker(marker: &str) -> bool {
    marker.starts_with('+') || CHAR_MARKERS.contains(&marker)
}

fn is_note_marker(marker: &str) -> bool {
    NOTE_MARKERS.contains(&marker)
}

/// Marker name of a tag token: `\+it ` → `+it`, `\w*` → `w*`.
fn marker_of(token: &Token<'_>) -> String {
    token.text.trim().replace('\\', "")
}

/// First chapter/verse number in a marker token (`\v 1-2 ` → `1-2`).
fn number_of(text: &str) -> &str {
    let Some(start) = text.find(|c: char| c.is_ascii_digit()) else {
        return "";
    };
    let rest = &text[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit() && c != '-')
        .unwrap_or(rest.len());
    &rest[..end]
}

/// Split an attribute token (`|x-occurrence="1" ` or `lemma="grace"`) into
/// key and unquoted value.
fn split_attribute(text: &str) -> Option<(&str, &str)> {
    let (key, value) = text.split_once('=')?;
    let key = key.trim().trim_start_matches('|').trim();
    let value = value.trim();
    let value = value.strip_prefix('"').unwrap_or(value);
    let value = value.strip_suffix('"').unwrap_or(value);
    Some((key, value))
}

struct Machine<B> {
    builder: B,
    mode: Mode,
    text: String,
    pending_space: bool,
    para_open: bool,
    book_open: bool,
    /// Base markers of the open char spans, innermost last.
    char_stack: Vec<String>,
    /// Char-stack depth at which the open note started, if one is open.
    note_open_at: Option<usize>,
    /// A note opener waiting for its caller token.
    pending_note: Option<String>,
    /// Swallow the single space that separates a note caller from content.
    note_skip_space: bool,
    /// A milestone start collecting its attributes until `\*`.
    milestone: Option<(String, AttrMap)>,
}

impl<B: DocumentBuilder> Machine<B> {
    fn new() -> Self {
        Machine {
            builder: B::new(),
            mode: Mode::Idle,
            text: String::new(),
            pending_space: false,
            para_open: false,
            book_open: false,
            char_stack: Vec::new(),
            note_open_at: None,
            pending_note: None,
            note_skip_space: false,
            milestone: None,
        }
    }

    /// Flush the pending text run into the builder. Book text is a single
    /// trimmed string; paragraph text keeps its inner spacing.
    fn flush_text(&mut self) {
        if self.text.is_empty() {
            return;
        }
        match self.mode {
            Mode::Book => self.builder.add_text(self.text.trim()),
            Mode::Para => self.builder.add_text(&self.text),
            Mode::Header | Mode::Idle => {}
        }
        self.text.clear();
    }

    fn end_char(&mut self) {
        if self.char_stack.pop().is_some() {
            self.builder.end_char();
        }
    }

    fn close_note(&mut self) {
        if let Some(depth) = self.note_open_at.take() {
            while self.char_stack.len() > depth {
                self.end_char();
            }
            self.builder.end_note();
        }
    }

    fn close_para(&mut self) {
        while !self.char_stack.is_empty() {
            self.end_char();
        }
        self.close_note();
        if self.para_open {
            self.builder.end_para();
            self.para_open = false;
        }
    }

    fn open_para(&mut self, marker: &str) {
        self.builder.start_para(marker);
        self.para_open = true;
        self.mode = Mode::Para;
    }

    fn ensure_para(&mut self) {
        if self.mode != Mode::Para {
            self.open_para("p");
        }
    }

    /// A structural token arrived while a note opener was still waiting for
    /// its caller: the note has none.
    fn resolve_pending_note(&mut self) {
        if let Some(marker) = self.pending_note.take() {
            self.note_open_at = Some(self.char_stack.len());
            self.builder.start_note(&marker, None);
        }
    }

    fn on_text(&mut self, token: &Token<'_>) {
        match self.mode {
            Mode::Idle => {}
            Mode::Header => self.text.push_str(token.text),
            Mode::Book => {
                if !self.book_open {
                    if token.kind == TokenKind::WordLike {
                        self.builder.start_book("id", token.text);
                        self.book_open = true;
                    }
                } else {
                    self.text.push_str(token.text);
                }
            }
            Mode::Para => {
                if let Some(marker) = self.pending_note.take() {
                    // The first word after a note opener is its caller.
                    if token.kind == TokenKind::LineSpace {
                        self.pending_note = Some(marker);
                    } else {
                        self.note_open_at = Some(self.char_stack.len());
                        self.builder.start_note(&marker, Some(token.text.trim()));
                        self.note_skip_space = true;
                    }
                    return;
                }
                if self.note_skip_space {
                    self.note_skip_space = false;
                    if token.kind == TokenKind::LineSpace && self.text.is_empty() {
                        return;
                    }
                }
                if self.pending_space && self.text.is_empty() {
                    self.text.push(' ');
                }
                self.pending_space = false;
                self.text.push_str(token.text);
            }
        }
    }

    fn on_start_tag(&mut self, marker: &str) {
        self.flush_text();
        self.pending_space = false;

        if marker == "usfm" {
            self.mode = Mode::Header;
        } else if marker == "id" {
            self.close_para();
            self.mode = Mode::Book;
            self.book_open = false;
        } else if is_char_marker(marker) {
            // A char span outside any paragraph gets an implicit one.
            self.ensure_para();
            let base = marker.strip_prefix('+').unwrap_or(marker);
            if NOTE_TEXT_MARKERS.contains(&base)
                && self
                    .char_stack
                    .last()
                    .is_some_and(|top| NOTE_TEXT_MARKERS.contains(&top.as_str()))
            {
                // Note-internal text markers are siblings, not nested.
                self.end_char();
            }
            self.builder.start_char(base, AttrMap::new());
            self.char_stack.push(base.to_string());
        } else if is_note_marker(marker) {
            self.ensure_para();
            self.pending_note = Some(marker.to_string());
        } else {
            if self.book_open {
                self.builder.end_book();
                self.book_open = false;
            }
            self.close_para();
            self.open_para(marker);
        }
    }

    fn on_end_tag(&mut self, marker: &str) {
        self.flush_text();
        self.pending_space = false;
        let marker = marker.trim_end_matches('*');
        let base = marker.strip_prefix('+').unwrap_or(marker);

        if is_note_marker(base) {
            self.close_note();
        } else if !self.char_stack.is_empty() {
            self.end_char();
        }
    }

    fn on_block_break(&mut self) {
        self.flush_text();
        self.pending_space = false;
        if self.book_open {
            self.builder.end_book();
            self.book_open = false;
        }
        self.close_para();
        self.mode = Mode::Idle;
    }

    fn on_eol(&mut self) {
        match self.mode {
            Mode::Header => {
                self.builder.set_version(self.text.trim());
                self.text.clear();
                self.mode = Mode::Idle;
            }
            Mode::Book => {
                self.flush_text();
                self.builder.end_book();
                self.book_open = false;
                self.mode = Mode::Idle;
            }
            Mode::Para => {
                // Line breaks inside a paragraph are soft: the paragraph
                // continues until the next block-level marker.
                self.flush_text();
                self.pending_space = true;
            }
            Mode::Idle => self.text.clear(),
        }
    }

    fn finish(mut self) -> Document {
        match self.mode {
            Mode::Header => {
                let version = std::mem::take(&mut self.text);
                self.builder.set_version(version.trim());
            }
            _ => self.flush_text(),
        }
        if let Some((marker, attrs)) = self.milestone.take() {
            self.builder.add_milestone(&marker, attrs);
        }
        self.builder.finish()
    }
}

/// Parse USFM text into a document via the given builder.
pub fn read_str<B: DocumentBuilder>(input: &str) -> Result<Document, ReadError> {
    let lang = language()?;
    let tokens = lex(lang, input);

    let mut m = Machine::<B>::new();

    for token in &tokens {
        if token.kind.is_text() {
            m.on_text(token);
            continue;
        }
        m.resolve_pending_note();
        m.note_skip_space = false;

        match token.kind {
            TokenKind::StartTag => {
                let marker = marker_of(token);
                m.on_start_tag(&marker);
            }

            TokenKind::EndTag => {
                let marker = marker_of(token);
                m.on_end_tag(&marker);
            }

            TokenKind::Chapter => {
                m.on_block_break();
                m.builder.add_chapter(number_of(token.text), AttrMap::new());
            }

            TokenKind::PubChapter => {
                m.on_block_break();
                let label = token.text.trim().trim_start_matches("\\cp").trim();
                m.builder.set_chapter_pubnumber(label);
            }

            TokenKind::Verses => {
                m.flush_text();
                m.pending_space = false;
                m.ensure_para();
                m.builder.add_verse(number_of(token.text), AttrMap::new());
            }

            TokenKind::Attribute => {
                m.flush_text();
                m.pending_space = false;
                if let Some((key, value)) = split_attribute(token.text) {
                    if let Some((_, attrs)) = m.milestone.as_mut() {
                        attrs.insert(key.to_string(), value.to_string());
                    } else if !m.char_stack.is_empty() {
                        m.builder.add_char_attr(key, value);
                    }
                }
            }

            TokenKind::DefaultAttribute => {
                m.flush_text();
                m.pending_space = false;
                let value = token.text.trim().trim_start_matches('|').trim();
                if let Some((_, attrs)) = m.milestone.as_mut() {
                    attrs.insert("default".to_string(), value.to_string());
                } else if !m.char_stack.is_empty() {
                    m.builder.set_char_default(value);
                }
            }

            TokenKind::EmptyMilestone => {
                m.flush_text();
                m.pending_space = false;
                let marker = marker_of(token);
                m.builder
                    .add_milestone(marker.trim_end_matches('*'), AttrMap::new());
            }

            TokenKind::StartMilestoneTag => {
                m.flush_text();
                m.pending_space = false;
                m.milestone = Some((marker_of(token), AttrMap::new()));
            }

            TokenKind::EndMilestoneMarker => {
                if let Some((marker, attrs)) = m.milestone.take() {
                    m.builder.add_milestone(&marker, attrs);
                }
            }

            TokenKind::Eol => m.on_eol(),

            TokenKind::NoBreakSpace => {
                if m.mode == Mode::Para {
                    m.text.push('\u{00a0}');
                }
            }

            TokenKind::SoftLineBreak => {
                if m.mode == Mode::Para {
                    m.text.push_str("//");
                }
            }

            TokenKind::BareSlash | TokenKind::Unknown => {}

            // Text kinds are handled above the match.
            TokenKind::WordLike | TokenKind::LineSpace | TokenKind::Punctuation => {}
        }
    }

    Ok(m.finish())
}
