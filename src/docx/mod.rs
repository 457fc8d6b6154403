//! DOCX (Office Open XML) package reading.

mod parser;
mod reader;

pub use parser::{
    DEFAULT_STYLE_NAME, StyleTable, parse_document, parse_relationships, parse_styles,
};
pub use reader::{Package, read_docx, read_docx_from_reader};
