//! Paragraph style classification.

/// Semantic role of a paragraph in the output document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Heading of level 1, 2 or 3.
    Heading(u8),
    Body,
}

/// Ordered substring rules; the first match wins.
const HEADING_RULES: &[(&str, u8)] = &[("heading 2", 2), ("heading 3", 3), ("heading", 1)];

/// Map a paragraph style name to its block kind.
///
/// Matching is a case-insensitive substring test, so localized or decorated
/// names such as `"Custom Heading 2 Bold"` still classify. Names that match
/// no rule are body paragraphs.
///
/// ```
/// use docfb2::{BlockKind, classify};
///
/// assert_eq!(classify("Heading 2"), BlockKind::Heading(2));
/// assert_eq!(classify("Title Heading"), BlockKind::Heading(1));
/// assert_eq!(classify("Normal"), BlockKind::Body);
/// ```
pub fn classify(style_name: &str) -> BlockKind {
    let lowered = style_name.to_lowercase();
    HEADING_RULES
        .iter()
        .find(|(needle, _)| lowered.contains(needle))
        .map(|&(_, level)| BlockKind::Heading(level))
        .unwrap_or(BlockKind::Body)
}

impl BlockKind {
    /// FB2 element name used for this block.
    pub fn element_name(self) -> &'static str {
        match self {
            BlockKind::Heading(2) => "subtitle2",
            BlockKind::Heading(3) => "subtitle3",
            BlockKind::Heading(_) => "subtitle",
            BlockKind::Body => "p",
        }
    }

    pub fn is_heading(self) -> bool {
        matches!(self, BlockKind::Heading(_))
    }
}
