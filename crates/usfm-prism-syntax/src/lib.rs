//! # usfm-prism-syntax
//!
//! The USFM marker grammar and the lexer that drives it.
//!
//! USFM is a line-oriented markup where every structural element is introduced
//! by a backslash marker (`\c 1`, `\v 12`, `\w grace|strong="G5485"\w*`). This
//! crate owns the lexical layer of that format:
//!
//! - [`TokenKind`]: the lexical classes USFM surface text decomposes into
//! - [`grammar`]: the embedded rule table and the [`UsfmLanguage`] handle
//!   that wraps its compiled form
//! - [`lexer`]: classification of input text into a flat [`Token`] stream
//!
//! ## The grammar handle
//!
//! The rule table is embedded in the crate as static pattern sources.
//! [`UsfmLanguage::load`] compiles it once into a combined scanner and wraps
//! the result in an opaque handle; [`language`] memoizes the canonical handle
//! for the lifetime of the process. Loading is deterministic: it either always
//! succeeds for a given build of this crate or always fails, so a load failure
//! indicates a defect in the embedded table, not a transient condition.
//!
//! ```
//! let lang = usfm_prism_syntax::language().expect("Error loading grammar");
//! assert!(lang.rule_count() > 0);
//! ```
//!
//! ## Lexing
//!
//! [`lex`] scans input with the combined pattern and classifies each match by
//! the first rule in table order that accepts it. Earlier rules win: `\c 1`
//! is a chapter token, never a start tag followed by word text.
//!
//! ```
//! use usfm_prism_syntax::{TokenKind, language, lex};
//!
//! let lang = language().unwrap();
//! let tokens = lex(lang, "\\v 1 Blessed");
//! assert_eq!(tokens[0].kind, TokenKind::Verses);
//! ```
//!
//! The lexer classifies; it does not build a tree. Document structure is the
//! concern of the readers in `usfm-prism-engine`, which consume this token
//! stream.

pub mod grammar;
pub mod lexer;
pub mod token_kind;

pub use grammar::{GrammarError, UsfmLanguage, language};
pub use lexer::{Token, lex};
pub use token_kind::TokenKind;
