//! Syntactic well-formedness check for produced markup.
//!
//! Only XML syntax is checked: matching tags, a single root, nothing but
//! whitespace outside it. The FictionBook schema is not consulted.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::{Error, Result};
use crate::util::resolve_entity;

/// Re-parse `xml` and fail with [`Error::MalformedOutput`] on a syntax error.
///
/// The error carries a copy of `xml` so callers can still inspect it.
pub fn validate(xml: &str) -> Result<()> {
    check(xml).map_err(|message| Error::MalformedOutput {
        message,
        output: xml.to_string(),
    })
}

fn check(xml: &str) -> std::result::Result<(), String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().check_end_names = true;

    let mut depth = 0usize;
    let mut roots = 0usize;

    loop {
        let position = reader.buffer_position();
        let event = reader
            .read_event()
            .map_err(|e| format!("{e} at byte {position}"))?;

        if let Event::Start(e) | Event::Empty(e) = &event {
            for attr in e.attributes() {
                attr.map_err(|e| format!("{e} at byte {position}"))?;
            }
        }

        match event {
            Event::Start(_) => {
                if depth == 0 {
                    roots += 1;
                }
                depth += 1;
            }
            Event::Empty(_) if depth == 0 => roots += 1,
            Event::End(_) => depth = depth.saturating_sub(1),
            Event::Text(e) if depth == 0 => {
                if !e.iter().all(u8::is_ascii_whitespace) {
                    return Err(format!("text outside the root element at byte {position}"));
                }
            }
            Event::CData(_) | Event::GeneralRef(_) if depth == 0 => {
                return Err(format!("content outside the root element at byte {position}"));
            }
            Event::GeneralRef(e) => {
                let name = String::from_utf8_lossy(e.as_ref());
                if resolve_entity(&name).is_none() {
                    return Err(format!("undefined entity &{name}; at byte {position}"));
                }
            }
            Event::Eof => break,
            _ => {}
        }

        if roots > 1 {
            return Err(format!("more than one root element at byte {position}"));
        }
    }

    if depth != 0 {
        return Err(format!("{depth} element(s) left unclosed at end of document"));
    }
    if roots == 0 {
        return Err("document has no root element".to_string());
    }
    Ok(())
}
