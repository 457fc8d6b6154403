//! FB2 serialization.
//!
//! The document is written directly as text. Structural elements go on their
//! own indented lines; inline content inside a block is written with no
//! added whitespace, since any whitespace there would become book text.

use crate::inline::Inline;

use super::document::{Block, Metadata, OutputDocument};

pub const FB2_NAMESPACE: &str = "http://www.gribuser.ru/xml/fictionbook/2.0";
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

const INDENT: &str = "  ";

/// Serialize an [`OutputDocument`] to FB2 text.
pub fn serialize(doc: &OutputDocument) -> String {
    let payload: usize = doc.images.iter().map(|i| i.data.len() * 4 / 3 + 64).sum();
    let mut out = String::with_capacity(1024 + doc.blocks.len() * 128 + payload);

    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(&format!(
        "<FictionBook xmlns=\"{FB2_NAMESPACE}\" xmlns:l=\"{XLINK_NAMESPACE}\">\n"
    ));

    write_description(&mut out, &doc.metadata);

    line(&mut out, 1, "<body>");
    line(&mut out, 2, "<title/>");
    if doc.blocks.is_empty() {
        line(&mut out, 2, "<section/>");
    } else {
        line(&mut out, 2, "<section>");
        for block in &doc.blocks {
            write_block(&mut out, block);
        }
        line(&mut out, 2, "</section>");
    }
    line(&mut out, 1, "</body>");

    for image in &doc.images {
        indent(&mut out, 1);
        out.push_str(&format!(
            "<binary id=\"{}\" content-type=\"{}\">",
            escape_xml(&image.id),
            escape_xml(image.content_type)
        ));
        out.push_str(&image.to_base64());
        out.push_str("</binary>\n");
    }

    out.push_str("</FictionBook>\n");
    out
}

fn write_description(out: &mut String, meta: &Metadata) {
    line(out, 1, "<description>");
    line(out, 2, "<title-info>");
    text_element(out, 3, "book-title", &meta.title);
    line(out, 3, "<author>");
    text_element(out, 4, "first-name", &meta.author.first_name);
    text_element(out, 4, "last-name", &meta.author.last_name);
    line(out, 3, "</author>");
    text_element(out, 3, "date", &meta.date);
    text_element(out, 3, "lang", &meta.lang);
    line(out, 2, "</title-info>");
    line(out, 1, "</description>");
}

fn write_block(out: &mut String, block: &Block) {
    let name = block.kind.element_name();
    indent(out, 3);
    if block.content.is_empty() {
        out.push_str(&format!("<{name}/>\n"));
        return;
    }
    out.push_str(&format!("<{name}>"));
    write_inlines(out, &block.content);
    out.push_str(&format!("</{name}>\n"));
}

fn write_inlines(out: &mut String, nodes: &[Inline]) {
    for node in nodes {
        match node {
            Inline::Text(text) => out.push_str(&escape_xml(text)),
            Inline::Strong(children) => write_span(out, "strong", children),
            Inline::Emphasis(children) => write_span(out, "emphasis", children),
        }
    }
}

fn write_span(out: &mut String, name: &str, children: &[Inline]) {
    out.push('<');
    out.push_str(name);
    out.push('>');
    write_inlines(out, children);
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn text_element(out: &mut String, depth: usize, name: &str, text: &str) {
    indent(out, depth);
    if text.is_empty() {
        out.push_str(&format!("<{name}/>\n"));
    } else {
        out.push_str(&format!("<{name}>{}</{name}>\n", escape_xml(text)));
    }
}

fn line(out: &mut String, depth: usize, markup: &str) {
    indent(out, depth);
    out.push_str(markup);
    out.push('\n');
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

/// Escape text for element content or attribute values.
///
/// Characters that XML 1.0 does not allow at all (most C0 controls, lone
/// surrogates cannot occur in `str`, U+FFFE/U+FFFF) are dropped.
pub fn escape_xml(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            '\t' | '\n' | '\r' => result.push(c),
            '\u{0}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}' => {}
            _ => result.push(c),
        }
    }
    result
}
