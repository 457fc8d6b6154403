//! Embedded image extraction and transcoding.
//!
//! Images are taken from the package's media directory rather than from the
//! document's drawing references, so every raster picture in the package is
//! embedded once, in archive order. Everything that is not already JPEG is
//! re-encoded as JPEG, the only raster format all FB2 readers accept.

use std::io::{Read, Seek};
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use thiserror::Error;

use crate::docx::Package;
use crate::error::Result;

/// MIME type of every embedded image.
pub const CANONICAL_MIME_TYPE: &str = "image/jpeg";

/// JPEG quality used when re-encoding.
pub const JPEG_QUALITY: u8 = 90;

/// An image ready to be written as an FB2 `<binary>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    /// `image_N`, counting from 0 within one conversion.
    pub id: String,
    pub content_type: &'static str,
    pub data: Vec<u8>,
}

impl EmbeddedImage {
    pub fn new(id: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            content_type: CANONICAL_MIME_TYPE,
            data,
        }
    }

    /// Payload encoded with the standard base64 alphabet, unwrapped.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }
}

/// Raster formats accepted from the media directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Jpeg,
    Png,
    Gif,
    Bmp,
}

impl SourceFormat {
    /// Detect the format from an entry's extension (case-insensitive).
    pub fn from_path(path: &str) -> Option<Self> {
        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "jpg" | "jpeg" => Some(SourceFormat::Jpeg),
            "png" => Some(SourceFormat::Png),
            "gif" => Some(SourceFormat::Gif),
            "bmp" => Some(SourceFormat::Bmp),
            _ => None,
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            SourceFormat::Jpeg => ImageFormat::Jpeg,
            SourceFormat::Png => ImageFormat::Png,
            SourceFormat::Gif => ImageFormat::Gif,
            SourceFormat::Bmp => ImageFormat::Bmp,
        }
    }
}

/// Failure to produce one image. Never aborts a conversion.
#[derive(Error, Debug)]
pub enum MediaError {
    #[error("cannot read entry: {0}")]
    Read(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("cannot encode JPEG: {0}")]
    Encode(#[source] image::ImageError),
}

/// Extract and transcode all media images of the DOCX at `path`.
///
/// Only opening the package can fail; individual images that cannot be
/// decoded are logged and left out.
pub fn extract_images<P: AsRef<Path>>(path: P) -> Result<Vec<EmbeddedImage>> {
    let mut package = Package::open(path)?;
    Ok(extract_images_from_package(&mut package))
}

/// Extract and transcode all media images of an opened package.
///
/// Ids are assigned in archive order to the images that were produced, so
/// they stay contiguous when an entry is skipped.
pub fn extract_images_from_package<R: Read + Seek>(package: &mut Package<R>) -> Vec<EmbeddedImage> {
    let prefix = package.media_prefix();
    let archive = package.archive_mut();

    let candidates: Vec<(usize, String, SourceFormat)> = (0..archive.len())
        .filter_map(|index| {
            let name = archive.name_for_index(index)?;
            if !name.starts_with(&prefix) {
                return None;
            }
            let format = SourceFormat::from_path(name)?;
            Some((index, name.to_string(), format))
        })
        .collect();

    let outcomes: Vec<(String, std::result::Result<Vec<u8>, MediaError>)> = candidates
        .into_iter()
        .map(|(index, name, format)| {
            let outcome = read_entry(archive, index).and_then(|data| transcode(format, data));
            (name, outcome)
        })
        .collect();

    let mut images = Vec::with_capacity(outcomes.len());
    for (name, outcome) in outcomes {
        match outcome {
            Ok(data) => {
                let id = format!("image_{}", images.len());
                log::debug!("{name} -> {id} ({} bytes)", data.len());
                images.push(EmbeddedImage::new(id, data));
            }
            Err(e) => log::warn!("skipping image {name}: {e}"),
        }
    }
    images
}

fn read_entry<R: Read + Seek>(
    archive: &mut zip::ZipArchive<R>,
    index: usize,
) -> std::result::Result<Vec<u8>, MediaError> {
    let mut file = archive.by_index(index)?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)?;
    Ok(data)
}

/// Convert image bytes to the canonical JPEG encoding.
///
/// JPEG input is returned untouched. Other formats are decoded, flattened to
/// 8-bit RGB (alpha and palette dropped; 8-bit grayscale kept) and encoded
/// at [`JPEG_QUALITY`].
pub fn transcode(format: SourceFormat, data: Vec<u8>) -> std::result::Result<Vec<u8>, MediaError> {
    if format == SourceFormat::Jpeg {
        return Ok(data);
    }

    let img = image::load_from_memory_with_format(&data, format.image_format())
        .map_err(MediaError::Decode)?;
    let img = flatten(img);

    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
    img.write_with_encoder(encoder).map_err(MediaError::Encode)?;
    Ok(out)
}

fn flatten(img: DynamicImage) -> DynamicImage {
    match img {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => img,
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}
