//! # usfm-prism-engine
//!
//! The conversion core: a typed USJ-shaped document model, readers for
//! USFM/USX/USJ, writers for the same three formats, and the [`transform`]
//! entry point that strings them together.
//!
//! ```
//! use usfm_prism_engine::{Format, transform};
//!
//! let usfm = "\\id PSA Psalms\n\\c 1\n\\q\n\\v 1 Blessed is the man\n";
//! let usj = transform(usfm, Format::Usfm, Format::Usj).unwrap();
//! assert!(usj.contains("\"code\":\"PSA\""));
//! ```

pub mod builder;
pub mod convert;
pub mod io;
pub mod model;
pub mod readers;
pub mod writers;

// Re-export the conversion surface for easier usage
pub use builder::{DocumentBuilder, UsjBuilder};
pub use convert::{ConvertError, Format, UnsupportedFormat, parse, render, transform};
pub use model::Document;
pub use readers::ReadError;
pub use writers::WriteError;
