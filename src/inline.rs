//! Rebuild inline formatting spans from a flat run sequence.
//!
//! FB2 inline markup is element-with-text-and-tail: a `<strong>` carries its
//! own text, and whatever follows it up to the next span is its tail. The
//! reconstructor therefore tracks at most one open span at a time rather than
//! a general stack. Spans are never nested inside each other; a run that is
//! both bold and italic becomes bold.

use crate::model::{Paragraph, Run};
use crate::options::ConversionOptions;

/// Inline content of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    /// Bold span (`<strong>`).
    Strong(Vec<Inline>),
    /// Italic span (`<emphasis>`).
    Emphasis(Vec<Inline>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanKind {
    Strong,
    Emphasis,
}

/// Where the next run's text goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    /// No span yet: plain text is leading text of the paragraph.
    Root,
    /// Span at this index is open and may absorb a run of the same kind.
    Open(usize),
    /// The last span has received trailing text and is closed.
    Closed,
}

/// Reconstruct a paragraph's inline content.
///
/// A paragraph with no runs but non-empty text becomes a single text node.
pub fn reconstruct(paragraph: &Paragraph, options: &ConversionOptions) -> Vec<Inline> {
    if paragraph.runs.is_empty() {
        if paragraph.raw_text.is_empty() {
            return Vec::new();
        }
        return vec![Inline::Text(paragraph.raw_text.clone())];
    }
    reconstruct_runs(&paragraph.runs, options)
}

/// Reconstruct inline content from runs, preserving reading order.
///
/// Consecutive runs with the same formatting merge into one span; plain text
/// after a span becomes its trailing text and closes it, so a later run of
/// the same kind opens a new sibling span.
///
/// ```
/// use docfb2::{ConversionOptions, Inline, Run, reconstruct_runs};
///
/// let runs = [Run::plain("Hello "), Run::bold("world"), Run::plain("!")];
/// let content = reconstruct_runs(&runs, &ConversionOptions::default());
/// assert_eq!(
///     content,
///     vec![
///         Inline::Text("Hello ".into()),
///         Inline::Strong(vec![Inline::Text("world".into())]),
///         Inline::Text("!".into()),
///     ]
/// );
/// ```
pub fn reconstruct_runs(runs: &[Run], options: &ConversionOptions) -> Vec<Inline> {
    let mut nodes: Vec<Inline> = Vec::new();
    let mut cursor = Cursor::Root;

    for run in runs {
        if run.text.is_empty() {
            continue;
        }

        match span_kind(run, options) {
            Some(kind) => {
                if let Cursor::Open(idx) = cursor
                    && let Some(children) = span_children_mut(&mut nodes[idx], kind)
                {
                    append_text(children, &run.text);
                    continue;
                }
                nodes.push(kind.span(run.text.clone()));
                cursor = Cursor::Open(nodes.len() - 1);
            }
            None => {
                append_text(&mut nodes, &run.text);
                if cursor != Cursor::Root {
                    cursor = Cursor::Closed;
                }
            }
        }
    }

    nodes
}

/// Bold is checked before italic; formatting is ignored when not preserved.
fn span_kind(run: &Run, options: &ConversionOptions) -> Option<SpanKind> {
    if !options.preserve_formatting {
        return None;
    }
    if run.bold {
        Some(SpanKind::Strong)
    } else if run.italic {
        Some(SpanKind::Emphasis)
    } else {
        None
    }
}

fn span_children_mut(node: &mut Inline, kind: SpanKind) -> Option<&mut Vec<Inline>> {
    match (node, kind) {
        (Inline::Strong(children), SpanKind::Strong)
        | (Inline::Emphasis(children), SpanKind::Emphasis) => Some(children),
        _ => None,
    }
}

/// Extend the trailing text node, or start one.
fn append_text(nodes: &mut Vec<Inline>, text: &str) {
    if let Some(Inline::Text(last)) = nodes.last_mut() {
        last.push_str(text);
    } else {
        nodes.push(Inline::Text(text.to_string()));
    }
}

impl SpanKind {
    fn span(self, text: String) -> Inline {
        let children = vec![Inline::Text(text)];
        match self {
            SpanKind::Strong => Inline::Strong(children),
            SpanKind::Emphasis => Inline::Emphasis(children),
        }
    }
}

impl Inline {
    /// Concatenated text of this node and its descendants.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Inline::Text(text) => out.push_str(text),
            Inline::Strong(children) | Inline::Emphasis(children) => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    fn strong(s: &str) -> Inline {
        Inline::Strong(vec![text(s)])
    }

    fn emphasis(s: &str) -> Inline {
        Inline::Emphasis(vec![text(s)])
    }

    fn rebuild(runs: &[Run]) -> Vec<Inline> {
        reconstruct_runs(runs, &ConversionOptions::default())
    }

    #[test]
    fn test_plain_bold_plain() {
        let runs = [Run::plain("Hello "), Run::bold("world"), Run::plain("!")];
        assert_eq!(rebuild(&runs), vec![text("Hello "), strong("world"), text("!")]);
    }

    #[test]
    fn test_consecutive_bold_runs_merge() {
        let runs = [Run::bold("A"), Run::bold("B")];
        assert_eq!(rebuild(&runs), vec![strong("AB")]);
    }

    #[test]
    fn test_plain_runs_merge_into_leading_text() {
        let runs = [Run::plain("one "), Run::plain("two")];
        assert_eq!(rebuild(&runs), vec![text("one two")]);
    }

    #[test]
    fn test_trailing_text_accumulates() {
        let runs = [
            Run::italic("word"),
            Run::plain(", then "),
            Run::plain("more"),
        ];
        assert_eq!(rebuild(&runs), vec![emphasis("word"), text(", then more")]);
    }

    #[test]
    fn test_bold_after_tail_opens_sibling() {
        let runs = [Run::bold("A"), Run::plain(" and "), Run::bold("B")];
        assert_eq!(rebuild(&runs), vec![strong("A"), text(" and "), strong("B")]);
    }

    #[test]
    fn test_bold_to_italic_creates_sibling() {
        let runs = [Run::bold("A"), Run::italic("B"), Run::bold("C")];
        assert_eq!(rebuild(&runs), vec![strong("A"), emphasis("B"), strong("C")]);
    }

    #[test]
    fn test_bold_wins_over_italic() {
        let runs = [Run::bold("both").with_italic(true)];
        assert_eq!(rebuild(&runs), vec![strong("both")]);
    }

    #[test]
    fn test_empty_runs_are_skipped() {
        let runs = [Run::bold("A"), Run::plain(""), Run::bold("B")];
        assert_eq!(rebuild(&runs), vec![strong("AB")]);
    }

    #[test]
    fn test_formatting_ignored_when_not_preserved() {
        let options = ConversionOptions::default().with_preserve_formatting(false);
        let runs = [Run::plain("a"), Run::bold("b"), Run::italic("c")];
        assert_eq!(reconstruct_runs(&runs, &options), vec![text("abc")]);
    }

    #[test]
    fn test_paragraph_without_runs_uses_raw_text() {
        let options = ConversionOptions::default();
        let para = Paragraph::new("Normal").with_text("fallback");
        assert_eq!(reconstruct(&para, &options), vec![text("fallback")]);

        let empty = Paragraph::new("Normal");
        assert!(reconstruct(&empty, &options).is_empty());
    }

    #[test]
    fn test_reading_order_is_preserved() {
        let runs = [
            Run::plain("a"),
            Run::bold("b"),
            Run::bold("c"),
            Run::plain("d"),
            Run::italic("e"),
            Run::italic("f"),
            Run::bold("g"),
            Run::plain("h"),
        ];
        let content = rebuild(&runs);
        let flat: String = content.iter().map(Inline::plain_text).collect();
        assert_eq!(flat, "abcdefgh");
        assert_eq!(
            content,
            vec![
                text("a"),
                strong("bc"),
                text("d"),
                emphasis("ef"),
                strong("g"),
                text("h"),
            ]
        );
    }
}
