//! In-memory DOCX fixtures.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/></w:style>
<w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/></w:style>
<w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/><w:basedOn w:val="Normal"/></w:style>
<w:style w:type="paragraph" w:styleId="Heading3"><w:name w:val="heading 3"/><w:basedOn w:val="Normal"/></w:style>
</w:styles>"#;

/// A run as (text, bold, italic).
pub type RunSpec<'a> = (&'a str, bool, bool);

/// Builds a minimal but valid DOCX package.
#[derive(Default)]
pub struct DocxBuilder {
    paragraphs: Vec<String>,
    media: Vec<(String, Vec<u8>)>,
}

impl DocxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paragraph with a style id (e.g. `Heading1`) and plain text.
    pub fn paragraph(self, style_id: Option<&str>, text: &str) -> Self {
        if text.is_empty() {
            self.paragraph_runs(style_id, &[])
        } else {
            self.paragraph_runs(style_id, &[(text, false, false)])
        }
    }

    pub fn paragraph_runs(mut self, style_id: Option<&str>, runs: &[RunSpec]) -> Self {
        let mut xml = String::from("<w:p>");
        if let Some(id) = style_id {
            xml.push_str(&format!(r#"<w:pPr><w:pStyle w:val="{id}"/></w:pPr>"#));
        }
        for (text, bold, italic) in runs {
            xml.push_str("<w:r>");
            if *bold || *italic {
                xml.push_str("<w:rPr>");
                if *bold {
                    xml.push_str("<w:b/>");
                }
                if *italic {
                    xml.push_str("<w:i/>");
                }
                xml.push_str("</w:rPr>");
            }
            xml.push_str(&format!(
                r#"<w:t xml:space="preserve">{}</w:t>"#,
                escape(text)
            ));
            xml.push_str("</w:r>");
        }
        xml.push_str("</w:p>");
        self.paragraphs.push(xml);
        self
    }

    /// Add an entry under `word/media/`.
    pub fn media(mut self, name: &str, data: Vec<u8>) -> Self {
        self.media.push((format!("word/media/{name}"), data));
        self
    }

    /// Add an arbitrary archive entry.
    pub fn entry(mut self, path: &str, data: Vec<u8>) -> Self {
        self.media.push((path.to_string(), data));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();

        let document = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{W_NS}"><w:body>{}<w:sectPr/></w:body></w:document>"#,
            self.paragraphs.concat()
        );

        let parts: [(&str, &[u8]); 4] = [
            ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
            ("_rels/.rels", RELS.as_bytes()),
            ("word/document.xml", document.as_bytes()),
            ("word/styles.xml", STYLES.as_bytes()),
        ];
        for (name, data) in parts {
            zip.start_file(name, options).unwrap();
            zip.write_all(data).unwrap();
        }
        for (name, data) in &self.media {
            zip.start_file(name.as_str(), options).unwrap();
            zip.write_all(data).unwrap();
        }

        zip.finish().unwrap().into_inner()
    }

    /// Write the package to `dir/name` and return its path.
    pub fn write_to(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, self.build()).unwrap();
        path
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

pub fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format).unwrap();
    buf
}

pub fn rgba_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([20, 120, 220, 100]));
    encode(DynamicImage::ImageRgba8(img), ImageFormat::Png)
}

pub fn rgb_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([250, 250, 10]));
    encode(DynamicImage::ImageRgb8(img), ImageFormat::Jpeg)
}

pub fn gif(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]));
    encode(DynamicImage::ImageRgba8(img), ImageFormat::Gif)
}
