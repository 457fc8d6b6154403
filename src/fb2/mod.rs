//! FictionBook 2 output: document tree, metadata, serializer and validator.

mod document;
mod metadata;
mod validate;
mod writer;

pub use document::{Author, Block, Metadata, OutputDocument};
pub use metadata::{
    DEFAULT_LANGUAGE, PLACEHOLDER_FIRST_NAME, PLACEHOLDER_LAST_NAME, compose_metadata,
    compose_metadata_on,
};
pub use validate::validate;
pub use writer::{FB2_NAMESPACE, XLINK_NAMESPACE, escape_xml, serialize};
