//! USFM writer: plain-text marker emission.
//!
//! Infallible by construction: the output is built in memory. Nested char
//! spans get their `+` prefix here; the model stores bare markers.

use crate::model::{CharSpan, Content, Document, Inline, InlineElement, Note};

/// Serialize a document as USFM.
pub fn write_string(doc: &Document) -> String {
    let mut out = String::new();

    out.push_str("\\usfm ");
    out.push_str(&doc.version);
    out.push('\n');

    for block in &doc.content {
        match block {
            Content::Book(book) => {
                out.push('\\');
                out.push_str(&book.marker);
                out.push(' ');
                out.push_str(&book.code);
                for text in &book.content {
                    out.push(' ');
                    out.push_str(text);
                }
                out.push('\n');
            }
            Content::Chapter(chapter) => {
                out.push_str("\\c ");
                out.push_str(&chapter.number);
                out.push('\n');
                if let Some(pubnumber) = &chapter.pubnumber {
                    out.push_str("\\cp ");
                    out.push_str(pubnumber);
                    out.push('\n');
                }
            }
            Content::Para(para) => {
                out.push('\\');
                out.push_str(&para.marker);
                // Only text needs the separating space; verses break to their
                // own line and markers carry their own backslash.
                if matches!(para.content.first(), Some(Inline::Text(_))) {
                    out.push(' ');
                }
                for item in &para.content {
                    write_inline(&mut out, item, false);
                }
                if !out.ends_with('\n') {
                    out.push('\n');
                }
            }
        }
    }
    out
}

fn write_inline(out: &mut String, item: &Inline, nested: bool) {
    match item {
        Inline::Text(text) => out.push_str(text),
        Inline::Element(InlineElement::Verse(verse)) => {
            if !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str("\\v ");
            out.push_str(&verse.number);
            out.push(' ');
        }
        Inline::Element(InlineElement::Char(span)) => write_char(out, span, nested),
        Inline::Element(InlineElement::Milestone(ms)) => {
            out.push('\\');
            out.push_str(&ms.marker);
            if !ms.attrs.is_empty() {
                out.push_str(" |");
                out.push_str(&join_attrs(&ms.attrs));
            }
            out.push_str("\\*");
        }
        Inline::Element(InlineElement::Note(note)) => write_note(out, note),
        Inline::Element(InlineElement::Figure(figure)) => {
            out.push('\\');
            out.push_str(&figure.marker);
            out.push(' ');
            for item in &figure.content {
                write_inline(out, item, nested);
            }
            if !figure.attrs.is_empty() {
                out.push('|');
                out.push_str(&join_attrs(&figure.attrs));
            }
            out.push('\\');
            out.push_str(&figure.marker);
            out.push('*');
        }
    }
}

fn write_char(out: &mut String, span: &CharSpan, nested: bool) {
    let prefix = if nested { "+" } else { "" };
    out.push('\\');
    out.push_str(prefix);
    out.push_str(&span.marker);
    out.push(' ');
    for item in &span.content {
        write_inline(out, item, true);
    }
    if span.default.is_some() || !span.attrs.is_empty() {
        out.push('|');
        let mut parts = Vec::new();
        if let Some(default) = &span.default {
            parts.push(default.clone());
        }
        if !span.attrs.is_empty() {
            parts.push(join_attrs(&span.attrs));
        }
        out.push_str(&parts.join(" "));
    }
    out.push('\\');
    out.push_str(prefix);
    out.push_str(&span.marker);
    out.push('*');
}

fn write_note(out: &mut String, note: &Note) {
    out.push('\\');
    out.push_str(&note.marker);
    out.push(' ');
    if let Some(caller) = &note.caller {
        out.push_str(caller);
        out.push(' ');
    }
    for item in &note.content {
        write_inline(out, item, false);
    }
    out.push('\\');
    out.push_str(&note.marker);
    out.push('*');
}

fn join_attrs(attrs: &crate::model::AttrMap) -> String {
    attrs
        .iter()
        .map(|(key, value)| format!("{key}=\"{value}\""))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::UsjBuilder;
    use crate::readers;
    use pretty_assertions::assert_eq;

    const USFM: &str = "\\id PSA unfoldingWord Literal Text\n\
        \\usfm 3.0\n\
        \\c 1\n\
        \\q\n\
        \\v 1 Blessed is the \\w man|Man\\w* who \\bd \\+it does not\\+it* walk\\bd*\n";

    fn round_trip(input: &str) -> String {
        let doc = readers::usfm::read_str::<UsjBuilder>(input).unwrap();
        write_string(&doc)
    }

    #[test]
    fn emits_header_book_and_chapter_lines() {
        let output = round_trip(USFM);
        assert!(output.starts_with("\\usfm 3.0\n\\id PSA unfoldingWord Literal Text\n"));
        assert!(output.contains("\\c 1\n"));
    }

    #[test]
    fn char_spans_close_with_their_marker() {
        let output = round_trip(USFM);
        assert!(output.contains("\\w man|Man\\w*"));
    }

    #[test]
    fn nested_char_spans_regain_their_plus_prefix() {
        let output = round_trip(USFM);
        assert!(output.contains("\\+it does not\\+it*"));
        assert!(output.contains("\\bd "));
        assert!(output.contains("\\bd*"));
    }

    #[test]
    fn milestones_round_trip_with_attributes() {
        let input = "\\id PSA\n\\c 1\n\\q\n\\v 1 a \\zaln-s |x-strong=\"G5043\"\\*word\\zaln-e\\*\n";
        let output = round_trip(input);
        assert!(output.contains("\\zaln-s |x-strong=\"G5043\"\\*"));
        assert!(output.contains("\\zaln-e\\*"));
    }

    #[test]
    fn notes_round_trip_with_caller() {
        let input = "\\id PSA\n\\c 1\n\\p\n\\v 1 grace \\f + \\ft a note\\f* follows\n";
        let output = round_trip(input);
        assert!(output.contains("\\f + \\ft a note\\ft*\\f*"));
        assert!(output.contains(" follows"));
    }

    #[test]
    fn writing_and_rereading_is_stable() {
        let doc = readers::usfm::read_str::<UsjBuilder>(USFM).unwrap();
        let once = write_string(&doc);
        let doc_again = readers::usfm::read_str::<UsjBuilder>(&once).unwrap();
        assert_eq!(doc_again, doc);

        // And the text form itself is a fixpoint from then on.
        assert_eq!(write_string(&doc_again), once);
    }

    #[test]
    fn pubnumber_becomes_a_cp_line() {
        let input = "\\id PSA\n\\c 1\n\\cp One\n\\p\n\\v 1 text\n";
        let output = round_trip(input);
        assert!(output.contains("\\c 1\n\\cp One\n"));
    }
}
