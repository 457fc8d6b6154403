//! The conversion entry points.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use crate::docx::Package;
use crate::error::Result;
use crate::fb2::{Metadata, OutputDocument, compose_metadata, serialize, validate};
use crate::media::extract_images_from_package;
use crate::options::ConversionOptions;

/// DOCX to FB2 converter.
///
/// Holds only the immutable [`ConversionOptions`]. All per-conversion state
/// (package handle, document, image counter) lives inside one [`convert`]
/// call, so a converter can be reused and shared between threads.
///
/// [`convert`]: Converter::convert
///
/// # Example
///
/// ```no_run
/// use docfb2::{ConversionOptions, Converter};
///
/// let fb2 = Converter::new()
///     .with_options(ConversionOptions::default().with_convert_images(false))
///     .convert("manuscript.docx")?;
/// std::fs::write("manuscript.fb2", fb2)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConversionOptions,
}

impl Converter {
    /// Create a converter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the converter with custom options.
    pub fn with_options(mut self, options: ConversionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Convert the DOCX at `path` to FB2 text.
    ///
    /// The book title is taken from the file name.
    pub fn convert<P: AsRef<Path>>(&self, path: P) -> Result<String> {
        let path = path.as_ref();
        log::debug!("converting {}", path.display());
        let package = Package::open(path)?;
        self.convert_package(package, compose_metadata(path))
    }

    /// Convert a DOCX read from memory or any seekable source.
    ///
    /// `source_name` stands in for the file name when composing metadata.
    pub fn convert_reader<R: Read + Seek>(&self, reader: R, source_name: &str) -> Result<String> {
        let package = Package::from_reader(reader)?;
        self.convert_package(package, compose_metadata(Path::new(source_name)))
    }

    /// Convert an opened package with precomposed metadata.
    pub fn convert_package<R: Read + Seek>(
        &self,
        mut package: Package<R>,
        metadata: Metadata,
    ) -> Result<String> {
        let document = self.build(&mut package, metadata)?;
        let xml = serialize(&document);

        if self.options.validate_output {
            validate(&xml)?;
        }
        Ok(xml)
    }

    /// Assemble the output tree without serializing it.
    pub fn build<R: Read + Seek>(
        &self,
        package: &mut Package<R>,
        metadata: Metadata,
    ) -> Result<OutputDocument> {
        let source = package.read_document()?;
        let mut document = OutputDocument::new(metadata).with_source(&source, &self.options);

        if self.options.convert_images {
            document = document.with_images(extract_images_from_package(package));
        }
        log::debug!(
            "{} blocks, {} images",
            document.blocks.len(),
            document.images.len()
        );

        Ok(document)
    }
}

/// Convert the DOCX at `path` with `options`.
pub fn convert<P: AsRef<Path>>(path: P, options: &ConversionOptions) -> Result<String> {
    Converter::new().with_options(*options).convert(path)
}

/// Compose the FB2 header for the DOCX at `path` without converting it.
///
/// The package is opened to confirm it is a readable DOCX.
pub fn extract_metadata<P: AsRef<Path>>(path: P) -> Result<Metadata> {
    let path = path.as_ref();
    Package::<File>::open(path)?;
    Ok(compose_metadata(path))
}
