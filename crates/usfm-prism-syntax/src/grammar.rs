//! The embedded USFM marker grammar and its compiled handle.
//!
//! The grammar is a flat table of lexical rules ([`RULES`]), each pairing a
//! [`TokenKind`] with a pattern source. [`UsfmLanguage::load`] compiles the
//! table into per-rule matchers plus one combined scanner used for the main
//! scan; [`language`] memoizes the canonical handle.
//!
//! Rule order is load-bearing: classification takes the first rule that
//! accepts a piece of input, so specific shapes (`\c 1`, `\zaln-s`) must
//! appear before the general tag rules, and the catch-all must stay last.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::token_kind::TokenKind;

/// Failure to turn the embedded rule table into a usable language handle.
///
/// Loading is pure and deterministic, so any of these indicates a defect in
/// the embedded table itself. Retrying cannot help.
#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("grammar rule table is empty")]
    EmptyRuleTable,
    #[error("grammar rule `{name}` failed to compile: {source}")]
    BadRule {
        name: &'static str,
        source: regex::Error,
    },
}

/// One lexical rule of the marker grammar.
#[derive(Debug, Clone, Copy)]
pub struct MarkerRule {
    /// Stable rule name, used in load diagnostics.
    pub name: &'static str,
    /// The token class this rule produces.
    pub kind: TokenKind,
    /// Pattern source, compiled at load time.
    pub pattern: &'static str,
}

/// The embedded grammar artifact: every lexical rule of USFM surface text,
/// in precedence order.
pub const RULES: &[MarkerRule] = &[
    MarkerRule {
        name: "chapter",
        kind: TokenKind::Chapter,
        pattern: r"([\r\n]*\\c[ \t]+(\d+)[ \t\r\n]*)",
    },
    MarkerRule {
        name: "pubchapter",
        kind: TokenKind::PubChapter,
        pattern: r"([\r\n]*\\cp[ \t]+([^\r\n]+)[ \t\r\n]*)",
    },
    MarkerRule {
        name: "verses",
        kind: TokenKind::Verses,
        pattern: r"(\\v[ \t]+([\d\-]+)[ \t\r\n]*)",
    },
    MarkerRule {
        name: "attribute",
        kind: TokenKind::Attribute,
        pattern: r#"([ \t]*\|?[ \t]*([A-Za-z0-9\-]+)="([^"]*)"[ \t]?)"#,
    },
    MarkerRule {
        name: "defaultAttribute",
        kind: TokenKind::DefaultAttribute,
        pattern: r"([ \t]*\|[ \t]*([^\|\\]*))",
    },
    MarkerRule {
        name: "emptyMilestone",
        kind: TokenKind::EmptyMilestone,
        pattern: r"(\\([a-z1-9]+)\\[*])",
    },
    MarkerRule {
        name: "startMilestoneTag",
        kind: TokenKind::StartMilestoneTag,
        pattern: r"(\\([a-z1-9]+)-([se]))",
    },
    MarkerRule {
        name: "endMilestoneMarker",
        kind: TokenKind::EndMilestoneMarker,
        pattern: r"(\\([*]))",
    },
    MarkerRule {
        name: "endTag",
        kind: TokenKind::EndTag,
        pattern: r"(\\([+]?[a-z\-]+)([1-9]?(-([1-9]))?)[*])",
    },
    MarkerRule {
        name: "startTag",
        kind: TokenKind::StartTag,
        pattern: r"(\\([+]?[a-z\-]+)([1-9]?(-([1-9]))?)[ \t]?)",
    },
    MarkerRule {
        name: "bareSlash",
        kind: TokenKind::BareSlash,
        pattern: r"(\\)",
    },
    MarkerRule {
        name: "eol",
        kind: TokenKind::Eol,
        pattern: r"([ \t]*[\r\n]+[ \t]*)",
    },
    MarkerRule {
        name: "noBreakSpace",
        kind: TokenKind::NoBreakSpace,
        pattern: r"(~)",
    },
    MarkerRule {
        name: "softLineBreak",
        kind: TokenKind::SoftLineBreak,
        pattern: r"(//)",
    },
    MarkerRule {
        name: "wordLike",
        kind: TokenKind::WordLike,
        pattern: r"([\p{Letter}\p{Number}\p{Mark}\u{2060}]{1,127})",
    },
    MarkerRule {
        name: "lineSpace",
        kind: TokenKind::LineSpace,
        pattern: r"([\p{Separator}\t]{1,127})",
    },
    MarkerRule {
        name: "punctuation",
        kind: TokenKind::Punctuation,
        pattern: r"([\p{Punctuation}\p{Math_Symbol}\p{Currency_Symbol}\p{Modifier_Symbol}\p{Other_Symbol}])",
    },
    MarkerRule {
        name: "unknown",
        kind: TokenKind::Unknown,
        pattern: r"(.)",
    },
];

struct CompiledRule {
    kind: TokenKind,
    matcher: Regex,
}

/// An opaque handle over the compiled marker grammar.
///
/// Owns the per-rule matchers and the combined scanner; nothing else. Cheap
/// to share by reference, and the canonical instance lives for the whole
/// process (see [`language`]).
pub struct UsfmLanguage {
    rules: Vec<CompiledRule>,
    scanner: Regex,
}

impl UsfmLanguage {
    /// Compile the embedded rule table into a language handle.
    ///
    /// Single-shot and deterministic: for a given build this either always
    /// succeeds or always fails with the same [`GrammarError`].
    pub fn load() -> Result<Self, GrammarError> {
        if RULES.is_empty() {
            return Err(GrammarError::EmptyRuleTable);
        }

        let mut rules = Vec::with_capacity(RULES.len());
        for rule in RULES {
            let matcher = Regex::new(rule.pattern).map_err(|source| GrammarError::BadRule {
                name: rule.name,
                source,
            })?;
            rules.push(CompiledRule {
                kind: rule.kind,
                matcher,
            });
        }

        let combined = RULES
            .iter()
            .map(|rule| rule.pattern)
            .collect::<Vec<_>>()
            .join("|");
        let scanner = Regex::new(&combined).map_err(|source| GrammarError::BadRule {
            name: "combined",
            source,
        })?;

        Ok(UsfmLanguage { rules, scanner })
    }

    /// Number of rules in the loaded grammar. Always non-zero for a handle
    /// that loaded successfully.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// The combined scanner over all rules.
    pub(crate) fn scanner(&self) -> &Regex {
        &self.scanner
    }

    /// Classify one scanner match by the first rule that accepts it.
    pub(crate) fn classify(&self, text: &str) -> TokenKind {
        self.rules
            .iter()
            .find(|rule| rule.matcher.is_match(text))
            .map(|rule| rule.kind)
            .unwrap_or(TokenKind::Unknown)
    }
}

/// The canonical handle for the embedded grammar, loaded on first use.
///
/// Repeated calls return the same handle. A failure here is a build defect
/// in the embedded table and is reported as-is to every caller.
pub fn language() -> Result<&'static UsfmLanguage, GrammarError> {
    static LANGUAGE: OnceLock<UsfmLanguage> = OnceLock::new();
    if let Some(lang) = LANGUAGE.get() {
        return Ok(lang);
    }
    let lang = UsfmLanguage::load()?;
    Ok(LANGUAGE.get_or_init(|| lang))
}
