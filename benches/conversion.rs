//! Benchmarks for the DOCX to FB2 pipeline.
//!
//! Run with: cargo bench

use std::io::{Cursor, Write};
use std::path::Path;

use criterion::{Criterion, criterion_group, criterion_main};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use docfb2::docx::{Package, StyleTable, parse_document};
use docfb2::{ConversionOptions, Converter, Run, reconstruct_runs, serialize, validate};

const PARAGRAPHS: usize = 2000;

/// Build a document.xml with alternating headings and formatted body text.
fn sample_document_xml() -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
    );
    for i in 0..PARAGRAPHS {
        if i % 50 == 0 {
            xml.push_str(&format!(
                r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:t>Chapter {i}</w:t></w:r></w:p>"#
            ));
        } else {
            xml.push_str(
                r#"<w:p><w:r><w:t xml:space="preserve">Plain text with </w:t></w:r><w:r><w:rPr><w:b/></w:rPr><w:t>bold</w:t></w:r><w:r><w:t xml:space="preserve"> and </w:t></w:r><w:r><w:rPr><w:i/></w:rPr><w:t>italic &amp; more</w:t></w:r></w:p>"#,
            );
        }
    }
    xml.push_str("</w:body></w:document>");
    xml
}

fn sample_docx() -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(sample_document_xml().as_bytes()).unwrap();
    zip.finish().unwrap().into_inner()
}

// ============================================================================
// Pipeline Benchmarks
// ============================================================================

fn bench_parse_document(c: &mut Criterion) {
    let xml = sample_document_xml();
    let styles = StyleTable::default();

    c.bench_function("parse_document", |b| {
        b.iter(|| parse_document(xml.as_bytes(), &styles).unwrap());
    });
}

fn bench_convert(c: &mut Criterion) {
    let bytes = sample_docx();
    let converter = Converter::new();

    c.bench_function("convert", |b| {
        b.iter(|| {
            converter
                .convert_reader(Cursor::new(bytes.as_slice()), "bench.docx")
                .unwrap()
        });
    });
}

fn bench_convert_unvalidated(c: &mut Criterion) {
    let bytes = sample_docx();
    let converter = Converter::new()
        .with_options(ConversionOptions::default().with_validate_output(false));

    c.bench_function("convert_unvalidated", |b| {
        b.iter(|| {
            converter
                .convert_reader(Cursor::new(bytes.as_slice()), "bench.docx")
                .unwrap()
        });
    });
}

// ============================================================================
// Stage Benchmarks
// ============================================================================

fn bench_reconstruct_runs(c: &mut Criterion) {
    let runs: Vec<Run> = (0..64)
        .map(|i| match i % 4 {
            0 => Run::plain("text "),
            1 => Run::bold("bold "),
            2 => Run::bold("bolder "),
            _ => Run::italic("slanted "),
        })
        .collect();
    let options = ConversionOptions::default();

    c.bench_function("reconstruct_runs", |b| {
        b.iter(|| reconstruct_runs(&runs, &options));
    });
}

fn bench_validate(c: &mut Criterion) {
    let bytes = sample_docx();
    let mut package = Package::from_reader(Cursor::new(bytes)).unwrap();
    let document = Converter::new()
        .build(&mut package, docfb2::compose_metadata(Path::new("bench.docx")))
        .unwrap();
    let xml = serialize(&document);

    c.bench_function("validate", |b| {
        b.iter(|| validate(&xml).unwrap());
    });
}

criterion_group!(
    benches,
    // Pipeline
    bench_parse_document,
    bench_convert,
    bench_convert_unvalidated,
    // Stages
    bench_reconstruct_runs,
    bench_validate,
);
criterion_main!(benches);
