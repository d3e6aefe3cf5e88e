//! # Lexer - classifying USFM surface text
//!
//! The lexer runs the combined scanner from the loaded [`UsfmLanguage`] over
//! the input and classifies every match by the first rule in table order that
//! accepts it. The output is a flat token stream; nesting and document
//! structure are the reader's concern.
//!
//! Unlike a lossless CST lexer, this one may skip input the scanner does not
//! match (there is effectively none: the catch-all rule accepts any single
//! character outside line breaks, and line breaks are an explicit rule).
//!
//! ```
//! use usfm_prism_syntax::{TokenKind, language, lex};
//!
//! let lang = language().unwrap();
//! let tokens = lex(lang, "\\c 1\n\\v 1 In the beginning");
//! assert_eq!(tokens[0].kind, TokenKind::Chapter);
//! assert_eq!(tokens[1].kind, TokenKind::Verses);
//! ```

use crate::grammar::UsfmLanguage;
use crate::token_kind::TokenKind;

/// One classified piece of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// The matched slice of the input, untrimmed.
    pub text: &'a str,
}

/// Tokenize `input` with the given language handle.
pub fn lex<'a>(lang: &UsfmLanguage, input: &'a str) -> Vec<Token<'a>> {
    lang.scanner()
        .find_iter(input)
        .map(|m| {
            let text = m.as_str();
            Token {
                kind: lang.classify(text),
                text,
            }
        })
        .collect()
}
