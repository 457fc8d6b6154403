//! Source document model: paragraphs and runs as read from a DOCX package.
//!
//! The model is deliberately flat. A [`SourceDocument`] is an ordered list of
//! [`Paragraph`]s, each carrying its resolved style name and an ordered list
//! of [`Run`]s. Tables, lists, footnotes and sections are not represented.

use crate::classify::classify;

/// A word-processor document reduced to its body paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceDocument {
    pub paragraphs: Vec<Paragraph>,
}

/// A body paragraph.
///
/// `raw_text` is the concatenation of every run's text, in order. Readers may
/// also produce a paragraph with no runs and non-empty `raw_text`; it is then
/// rendered as plain text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub style_name: String,
    pub runs: Vec<Run>,
    pub raw_text: String,
}

/// Minimal span of text sharing one formatting state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

impl SourceDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a paragraph to the end of the document.
    pub fn push(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    /// Plain-text preview of the document.
    ///
    /// Blank paragraphs are skipped. Paragraphs whose style names a heading
    /// are prefixed with the upper-cased style name in brackets.
    pub fn preview(&self) -> String {
        let mut lines = Vec::new();
        for para in &self.paragraphs {
            if para.is_blank() {
                continue;
            }
            if classify(&para.style_name).is_heading() {
                lines.push(format!(
                    "[{}] {}",
                    para.style_name.to_uppercase(),
                    para.raw_text
                ));
            } else {
                lines.push(para.raw_text.clone());
            }
        }
        lines.join("\n")
    }
}

impl Paragraph {
    pub fn new(style_name: impl Into<String>) -> Self {
        Self {
            style_name: style_name.into(),
            ..Default::default()
        }
    }

    /// Append a run, keeping `raw_text` in sync.
    pub fn with_run(mut self, run: Run) -> Self {
        self.push_run(run);
        self
    }

    pub fn push_run(&mut self, run: Run) {
        self.raw_text.push_str(&run.text);
        self.runs.push(run);
    }

    /// Paragraph with no runs whose text is carried only in `raw_text`.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.runs.clear();
        self.raw_text = text.into();
        self
    }

    /// True when the paragraph holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.raw_text.trim().is_empty()
    }
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self::plain(text).with_bold(true)
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self::plain(text).with_italic(true)
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_run_keeps_raw_text() {
        let para = Paragraph::new("Normal")
            .with_run(Run::plain("Hello "))
            .with_run(Run::bold("world"))
            .with_run(Run::plain("!"));

        assert_eq!(para.raw_text, "Hello world!");
        assert_eq!(para.runs.len(), 3);
        assert!(para.runs[1].bold);
        assert!(!para.runs[1].italic);
    }

    #[test]
    fn test_blank_paragraph() {
        assert!(Paragraph::new("Normal").is_blank());
        assert!(Paragraph::new("Normal").with_run(Run::plain("  \t")).is_blank());
        assert!(!Paragraph::new("Normal").with_text("x").is_blank());
    }

    #[test]
    fn test_preview_marks_headings() {
        let mut doc = SourceDocument::new();
        doc.push(Paragraph::new("Heading 1").with_run(Run::plain("Chapter One")));
        doc.push(Paragraph::new("Normal"));
        doc.push(Paragraph::new("Normal").with_run(Run::plain("Some text.")));

        assert_eq!(doc.preview(), "[HEADING 1] Chapter One\nSome text.");
    }

    #[test]
    fn test_preview_follows_classifier() {
        let mut doc = SourceDocument::new();
        doc.push(Paragraph::new("Custom Heading 2 Bold").with_run(Run::plain("Part")));
        doc.push(Paragraph::new("Subtitle").with_run(Run::plain("Not a heading")));

        assert_eq!(
            doc.preview(),
            "[CUSTOM HEADING 2 BOLD] Part\nNot a heading"
        );
    }
}
