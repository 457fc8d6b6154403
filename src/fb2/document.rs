use crate::classify::{BlockKind, classify};
use crate::inline::{Inline, reconstruct};
use crate::media::EmbeddedImage;
use crate::model::SourceDocument;
use crate::options::ConversionOptions;

/// Bibliographic header written to `<title-info>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub author: Author,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub lang: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

/// A classified paragraph with its inline content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub content: Vec<Inline>,
}

/// Everything needed to write one FB2 file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDocument {
    pub metadata: Metadata,
    pub blocks: Vec<Block>,
    pub images: Vec<EmbeddedImage>,
}

impl Block {
    pub fn new(kind: BlockKind, content: Vec<Inline>) -> Self {
        Self { kind, content }
    }
}

impl OutputDocument {
    pub fn new(metadata: Metadata) -> Self {
        Self {
            metadata,
            blocks: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Classify and reconstruct every retained paragraph of `source`.
    ///
    /// Blank paragraphs are dropped first when
    /// [`ConversionOptions::remove_empty_paragraphs`] is set.
    pub fn with_source(mut self, source: &SourceDocument, options: &ConversionOptions) -> Self {
        self.blocks = source
            .paragraphs
            .iter()
            .filter(|p| !(options.remove_empty_paragraphs && p.is_blank()))
            .map(|p| Block::new(classify(&p.style_name), reconstruct(p, options)))
            .collect();
        self
    }

    pub fn with_images(mut self, images: Vec<EmbeddedImage>) -> Self {
        self.images = images;
        self
    }
}
