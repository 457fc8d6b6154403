//! # docfb2
//!
//! Convert DOCX word-processor documents into FictionBook 2 (FB2) e-books.
//!
//! ## Pipeline
//!
//! - [`docx`] reads the package into a flat [`SourceDocument`] of paragraphs
//!   and runs
//! - [`classify`] maps paragraph style names to headings or body text
//! - [`inline`] rebuilds `<strong>`/`<emphasis>` spans from the run sequence
//! - [`media`] pulls raster images out of the package and normalizes them to
//!   JPEG
//! - [`fb2`] composes the `<title-info>` header, serializes the book and
//!   optionally checks that the result is well-formed
//!
//! ## Quick Start
//!
//! ```no_run
//! use docfb2::{ConversionOptions, convert};
//!
//! let fb2 = convert("manuscript.docx", &ConversionOptions::default())?;
//! std::fs::write("manuscript.fb2", fb2)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Building a book by hand
//!
//! ```
//! use docfb2::{ConversionOptions, OutputDocument, Paragraph, Run, SourceDocument};
//! use docfb2::{compose_metadata, serialize, validate};
//! use std::path::Path;
//!
//! let mut source = SourceDocument::new();
//! source.push(Paragraph::new("Heading 1").with_run(Run::plain("Chapter One")));
//! source.push(Paragraph::new("Normal").with_run(Run::bold("Some")).with_run(Run::plain(" text.")));
//!
//! let book = OutputDocument::new(compose_metadata(Path::new("story.docx")))
//!     .with_source(&source, &ConversionOptions::default());
//! let xml = serialize(&book);
//! validate(&xml)?;
//! assert!(xml.contains("<p><strong>Some</strong> text.</p>"));
//! # Ok::<(), docfb2::Error>(())
//! ```

pub mod classify;
pub mod convert;
pub mod docx;
pub mod error;
pub mod fb2;
pub mod inline;
pub mod media;
pub mod model;
pub mod options;
pub(crate) mod util;

pub use classify::{BlockKind, classify};
pub use convert::{Converter, convert, extract_metadata};
pub use docx::{read_docx, read_docx_from_reader};
pub use error::{Error, Result};
pub use fb2::{
    Author, Block, Metadata, OutputDocument, compose_metadata, compose_metadata_on, serialize,
    validate,
};
pub use inline::{Inline, reconstruct, reconstruct_runs};
pub use media::{EmbeddedImage, extract_images};
pub use model::{Paragraph, Run, SourceDocument};
pub use options::ConversionOptions;
