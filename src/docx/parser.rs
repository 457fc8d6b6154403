//! WordprocessingML parsing (package relationships, styles, document body).
//!
//! Pure functions over part bytes; archive access lives in `reader`.

use std::borrow::Cow;
use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesEnd, BytesStart, Event};

use crate::error::Result;
use crate::model::{Paragraph, Run, SourceDocument};
use crate::util::{decode_xml, local_name, resolve_entity};

const OFFICE_DOCUMENT_REL: &str = "/officeDocument";

/// Style name used when a package declares no default paragraph style.
pub const DEFAULT_STYLE_NAME: &str = "Normal";

/// Paragraph style ids resolved to their display names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleTable {
    names: HashMap<String, String>,
    default_paragraph: Option<String>,
}

impl StyleTable {
    /// Display name for a paragraph's style id.
    ///
    /// Paragraphs without a style take the default paragraph style; ids
    /// missing from the table are returned unchanged.
    pub fn name_for(&self, style_id: Option<&str>) -> String {
        match style_id {
            Some(id) => self.names.get(id).cloned().unwrap_or_else(|| id.to_string()),
            None => self
                .default_paragraph
                .as_ref()
                .and_then(|id| self.names.get(id))
                .cloned()
                .unwrap_or_else(|| DEFAULT_STYLE_NAME.to_string()),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Find the main document part in `_rels/.rels`.
pub fn parse_relationships(bytes: &[u8]) -> Result<Option<String>> {
    let content = decode_xml(bytes);
    let mut reader = Reader::from_str(&content);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event()? {
            Event::Empty(e) | Event::Start(e) if local_name(e.name().as_ref()) == b"Relationship" => {
                let mut rel_type = String::new();
                let mut target = String::new();
                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Type" => rel_type = attr_value(&attr),
                        b"Target" => target = attr_value(&attr),
                        _ => {}
                    }
                }
                if rel_type.ends_with(OFFICE_DOCUMENT_REL) && !target.is_empty() {
                    return Ok(Some(target.trim_start_matches('/').to_string()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(None)
}

/// Parse `word/styles.xml` into a [`StyleTable`].
pub fn parse_styles(bytes: &[u8]) -> Result<StyleTable> {
    let content = decode_xml(bytes);
    let mut reader = Reader::from_str(&content);
    reader.config_mut().trim_text(true);

    let mut table = StyleTable::default();
    // (style id, is the default paragraph style)
    let mut current: Option<(String, bool)> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) if local_name(e.name().as_ref()) == b"style" => {
                let mut id = String::new();
                let mut paragraph = false;
                let mut default = false;
                for attr in e.attributes().flatten() {
                    match local_name(attr.key.as_ref()) {
                        b"styleId" => id = attr_value(&attr),
                        b"type" => paragraph = attr.value.as_ref() == b"paragraph",
                        b"default" => default = is_on(&attr.value),
                        _ => {}
                    }
                }
                if !id.is_empty() {
                    if paragraph && default {
                        table.default_paragraph = Some(id.clone());
                    }
                    current = Some((id, paragraph && default));
                }
            }
            Event::Empty(e) | Event::Start(e) if local_name(e.name().as_ref()) == b"name" => {
                if let Some((id, _)) = &current
                    && let Some(val) = val_attr(&e)
                {
                    table.names.insert(id.clone(), val);
                }
            }
            Event::End(e) if local_name(e.name().as_ref()) == b"style" => current = None,
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(table)
}

/// Parse `word/document.xml` into a [`SourceDocument`].
///
/// Only paragraphs directly under `<w:body>` are read. Runs are collected
/// from anywhere inside the paragraph (hyperlinks, smart tags, inline content
/// controls) except nested text boxes.
pub fn parse_document(bytes: &[u8], styles: &StyleTable) -> Result<SourceDocument> {
    let content = decode_xml(bytes);
    let mut reader = Reader::from_str(&content);

    let mut builder = DocumentBuilder::new(styles);

    loop {
        match reader.read_event()? {
            Event::Start(e) => builder.open(&e, false),
            Event::Empty(e) => builder.open(&e, true),
            Event::End(e) => builder.close(&e),
            Event::Text(e) => builder.text(&String::from_utf8_lossy(e.as_ref())),
            Event::GeneralRef(e) => {
                let entity = String::from_utf8_lossy(e.as_ref());
                if let Some(resolved) = resolve_entity(&entity) {
                    builder.text(&resolved);
                }
            }
            Event::CData(e) => builder.text(&String::from_utf8_lossy(e.as_ref())),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(builder.finish())
}

struct OpenParagraph {
    depth: usize,
    style_id: Option<String>,
    paragraph: Paragraph,
}

struct OpenRun {
    depth: usize,
    run: Run,
}

/// Event-driven paragraph/run collector.
///
/// `depth` counts currently open elements; each open container remembers the
/// depth at which it started so the matching end tag can close it.
struct DocumentBuilder<'a> {
    styles: &'a StyleTable,
    document: SourceDocument,
    depth: usize,
    body_depth: Option<usize>,
    skip_depth: Option<usize>,
    paragraph: Option<OpenParagraph>,
    run: Option<OpenRun>,
    in_run_props: bool,
    in_text: bool,
}

impl<'a> DocumentBuilder<'a> {
    fn new(styles: &'a StyleTable) -> Self {
        Self {
            styles,
            document: SourceDocument::new(),
            depth: 0,
            body_depth: None,
            skip_depth: None,
            paragraph: None,
            run: None,
            in_run_props: false,
            in_text: false,
        }
    }

    fn open(&mut self, e: &BytesStart, empty: bool) {
        if self.skip_depth.is_none() {
            self.open_element(e, empty);
        }
        if !empty {
            self.depth += 1;
        }
    }

    fn open_element(&mut self, e: &BytesStart, empty: bool) {
        let name = e.name();
        let local = local_name(name.as_ref());

        match local {
            b"body" if self.body_depth.is_none() && !empty => self.body_depth = Some(self.depth),
            b"p" if self.paragraph.is_some() => {
                if !empty {
                    self.skip_depth = Some(self.depth);
                }
            }
            b"p" if self.body_depth.is_some_and(|d| self.depth == d + 1) => {
                self.paragraph = Some(OpenParagraph {
                    depth: self.depth,
                    style_id: None,
                    paragraph: Paragraph::default(),
                });
                if empty {
                    self.finish_paragraph();
                }
            }
            b"txbxContent" if self.paragraph.is_some() && !empty => {
                self.skip_depth = Some(self.depth);
            }
            // Tracked changes keep the previous properties; only the current ones apply
            b"rPrChange" | b"pPrChange" if self.paragraph.is_some() && !empty => {
                self.skip_depth = Some(self.depth);
            }
            b"pStyle" if self.run.is_none() => {
                if let Some(open) = self.paragraph.as_mut() {
                    open.style_id = val_attr(e);
                }
            }
            b"r" if self.paragraph.is_some() && self.run.is_none() && !empty => {
                // m:r (math runs) share the local name
                if is_word_element(name.as_ref()) {
                    self.run = Some(OpenRun {
                        depth: self.depth,
                        run: Run::default(),
                    });
                }
            }
            b"rPr" if self.run.is_some() && !empty => self.in_run_props = true,
            b"b" | b"i" if self.in_run_props => {
                let on = toggle_value(e);
                if let Some(open) = self.run.as_mut() {
                    if local == b"b" {
                        open.run.bold = on;
                    } else {
                        open.run.italic = on;
                    }
                }
            }
            b"t" if self.run.is_some() && !self.in_run_props && !empty => self.in_text = true,
            b"tab" if !self.in_run_props => self.push_run_text("\t"),
            b"br" | b"cr" if !self.in_run_props => self.push_run_text("\n"),
            _ => {}
        }
    }

    fn close(&mut self, e: &BytesEnd) {
        self.depth = self.depth.saturating_sub(1);

        if let Some(skip) = self.skip_depth {
            if self.depth == skip {
                self.skip_depth = None;
            }
            return;
        }

        match local_name(e.name().as_ref()) {
            b"t" => self.in_text = false,
            b"rPr" => self.in_run_props = false,
            b"r" if self.run.as_ref().is_some_and(|r| r.depth == self.depth) => {
                if let Some(OpenRun { run, .. }) = self.run.take()
                    && !run.text.is_empty()
                    && let Some(open) = self.paragraph.as_mut()
                {
                    open.paragraph.push_run(run);
                }
                self.in_run_props = false;
                self.in_text = false;
            }
            b"p" if self.paragraph.as_ref().is_some_and(|p| p.depth == self.depth) => {
                self.finish_paragraph();
            }
            b"body" if self.body_depth == Some(self.depth) => self.body_depth = None,
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.in_text && self.skip_depth.is_none() {
            self.push_run_text(text);
        }
    }

    fn push_run_text(&mut self, text: &str) {
        if let Some(open) = self.run.as_mut() {
            open.run.text.push_str(text);
        }
    }

    fn finish_paragraph(&mut self) {
        if let Some(open) = self.paragraph.take() {
            let mut paragraph = open.paragraph;
            paragraph.style_name = self.styles.name_for(open.style_id.as_deref());
            self.document.push(paragraph);
        }
        self.run = None;
        self.in_run_props = false;
        self.in_text = false;
    }

    fn finish(self) -> SourceDocument {
        self.document
    }
}

/// `w:r` or an unprefixed `r`; anything else (e.g. `m:r`) is foreign.
fn is_word_element(name: &[u8]) -> bool {
    match name.iter().position(|&b| b == b':') {
        Some(i) => &name[..i] == b"w",
        None => true,
    }
}

/// Value of a toggle property such as `<w:b/>` or `<w:b w:val="0"/>`.
fn toggle_value(e: &BytesStart) -> bool {
    e.attributes()
        .flatten()
        .find(|attr| local_name(attr.key.as_ref()) == b"val")
        .map(|attr| is_on(&attr.value))
        .unwrap_or(true)
}

fn is_on(value: &[u8]) -> bool {
    !matches!(value, b"0" | b"false" | b"off")
}

fn val_attr(e: &BytesStart) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| local_name(attr.key.as_ref()) == b"val")
        .map(|attr| attr_value(&attr))
}

fn attr_value(attr: &Attribute) -> String {
    let raw = String::from_utf8_lossy(&attr.value);
    match quick_xml::escape::unescape(&raw) {
        Ok(Cow::Owned(s)) => s,
        _ => raw.into_owned(),
    }
}
