//! TokenKind enum for the lexical classes of USFM surface text.

/// All lexical classes produced by the USFM lexer.
///
/// Variant order matches the grammar rule table: when a piece of input is
/// accepted by more than one rule, the earlier variant classifies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Chapter marker with number (`\c 1`)
    Chapter,
    /// Published chapter label (`\cp Ⅰ`)
    PubChapter,
    /// Verse marker with number or range (`\v 1`, `\v 1-2`)
    Verses,
    /// Named attribute (`x-occurrence="1"`, with optional leading `|`)
    Attribute,
    /// Default attribute value after a bare `|`
    DefaultAttribute,
    /// Self-closed milestone (`\ts\*`)
    EmptyMilestone,
    /// Milestone start/end tag (`\zaln-s`, `\zaln-e`)
    StartMilestoneTag,
    /// Milestone closing marker (`\*`)
    EndMilestoneMarker,
    /// Closing tag (`\w*`, `\+it*`)
    EndTag,
    /// Opening tag (`\id`, `\q2`, `\+it`)
    StartTag,
    /// A backslash not forming any tag
    BareSlash,
    /// Line break run, with surrounding horizontal whitespace
    Eol,
    /// No-break space (`~`)
    NoBreakSpace,
    /// Soft line break (`//`)
    SoftLineBreak,
    /// Run of letters, numbers and combining marks
    WordLike,
    /// Run of horizontal whitespace inside a line
    LineSpace,
    /// Single punctuation or symbol character
    Punctuation,
    /// Anything no other rule accepts
    Unknown,
}

impl TokenKind {
    /// True for the classes that carry document text rather than structure.
    ///
    /// The readers accumulate these into text runs; everything else drives
    /// state transitions.
    pub fn is_text(self) -> bool {
        matches!(
            self,
            TokenKind::WordLike | TokenKind::LineSpace | TokenKind::Punctuation
        )
    }
}
