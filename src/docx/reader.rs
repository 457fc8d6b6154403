use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use zip::ZipArchive;
use zip::result::ZipError;

use super::parser::{StyleTable, parse_document, parse_relationships, parse_styles};
use crate::error::{Error, Result};
use crate::model::SourceDocument;

const DEFAULT_MAIN_PART: &str = "word/document.xml";

/// Compound File Binary signature used by legacy `.doc` files.
const OLE_SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Read a DOCX file from disk into a [`SourceDocument`].
///
/// # Example
///
/// ```no_run
/// use docfb2::read_docx;
///
/// let doc = read_docx("manuscript.docx")?;
/// println!("{} paragraphs", doc.paragraphs.len());
/// # Ok::<(), docfb2::Error>(())
/// ```
pub fn read_docx<P: AsRef<Path>>(path: P) -> Result<SourceDocument> {
    Package::open(path)?.read_document()
}

/// Read a DOCX from any [`Read`] + [`Seek`] source.
///
/// Useful for reading from memory buffers.
pub fn read_docx_from_reader<R: Read + Seek>(reader: R) -> Result<SourceDocument> {
    Package::from_reader(reader)?.read_document()
}

/// An opened DOCX package with its main document part located.
///
/// One package handle serves both the document reader and the media
/// extractor, so a conversion opens the archive once.
pub struct Package<R> {
    archive: ZipArchive<R>,
    main_part: String,
}

impl Package<File> {
    /// Open a package on disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::unreadable(format!("cannot open {}: {e}", path.display())))?;
        Self::from_reader(file)
    }
}

impl<R: Read + Seek> Package<R> {
    /// Open a package from a seekable byte source.
    ///
    /// Fails with [`Error::UnreadableDocument`] for anything that is not a
    /// ZIP container holding a WordprocessingML main part, including legacy
    /// binary `.doc` files.
    pub fn from_reader(mut reader: R) -> Result<Self> {
        reject_legacy_format(&mut reader)?;

        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::unreadable(format!("not a DOCX package: {e}")))?;
        let main_part = find_main_part(&mut archive)?;
        log::debug!("main document part: {main_part}");

        Ok(Self { archive, main_part })
    }

    /// Path of the main document part, e.g. `word/document.xml`.
    pub fn main_part(&self) -> &str {
        &self.main_part
    }

    /// Directory holding the main part and its sibling parts, e.g. `word`.
    pub fn part_dir(&self) -> &str {
        self.main_part
            .rfind('/')
            .map(|i| &self.main_part[..i])
            .unwrap_or("")
    }

    /// Prefix of embedded media entries, e.g. `word/media/`.
    pub fn media_prefix(&self) -> String {
        sibling_path(self.part_dir(), "media/")
    }

    /// Parse the styles and main part into a [`SourceDocument`].
    pub fn read_document(&mut self) -> Result<SourceDocument> {
        let styles_path = sibling_path(self.part_dir(), "styles.xml");
        let styles = match read_optional(&mut self.archive, &styles_path)? {
            Some(bytes) => parse_styles(&bytes)?,
            None => StyleTable::default(),
        };
        log::debug!("{} styles in {styles_path}", styles.len());

        let bytes = read_optional(&mut self.archive, &self.main_part)?
            .ok_or_else(|| Error::unreadable(format!("missing part {}", self.main_part)))?;
        let document = parse_document(&bytes, &styles)?;
        log::debug!("read {} paragraphs", document.paragraphs.len());

        Ok(document)
    }

    pub fn archive_mut(&mut self) -> &mut ZipArchive<R> {
        &mut self.archive
    }
}

fn reject_legacy_format<R: Read + Seek>(reader: &mut R) -> Result<()> {
    let unreadable = |e: std::io::Error| Error::unreadable(format!("cannot read document: {e}"));

    let mut magic = Vec::with_capacity(OLE_SIGNATURE.len());
    reader
        .by_ref()
        .take(OLE_SIGNATURE.len() as u64)
        .read_to_end(&mut magic)
        .map_err(unreadable)?;
    reader.seek(SeekFrom::Start(0)).map_err(unreadable)?;

    if magic == OLE_SIGNATURE {
        return Err(Error::unreadable(
            "legacy binary .doc files are not supported; save the document as .docx",
        ));
    }
    Ok(())
}

/// Locate the main part through `_rels/.rels`, falling back to the
/// conventional location.
fn find_main_part<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<String> {
    let from_rels = match read_optional(archive, "_rels/.rels") {
        Ok(Some(bytes)) => parse_relationships(&bytes).ok().flatten(),
        _ => None,
    };

    if let Some(target) = from_rels
        && archive.index_for_name(&target).is_some()
    {
        return Ok(target);
    }

    if archive.index_for_name(DEFAULT_MAIN_PART).is_some() {
        return Ok(DEFAULT_MAIN_PART.to_string());
    }

    Err(Error::unreadable(
        "package has no WordprocessingML main document part",
    ))
}

fn sibling_path(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}

/// Read an archive entry, returning `None` if it does not exist.
pub(crate) fn read_optional<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: &str,
) -> Result<Option<Vec<u8>>> {
    match archive.by_name(path) {
        Ok(mut file) => {
            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;
            Ok(Some(contents))
        }
        Err(ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
