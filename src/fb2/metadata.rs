use std::path::Path;

use chrono::NaiveDate;

use super::document::{Author, Metadata};

pub const PLACEHOLDER_FIRST_NAME: &str = "Автор";
pub const PLACEHOLDER_LAST_NAME: &str = "Неизвестен";
pub const DEFAULT_LANGUAGE: &str = "ru";

const FALLBACK_TITLE: &str = "book";

/// Compose the `<title-info>` header for `source`, dated today.
pub fn compose_metadata(source: &Path) -> Metadata {
    compose_metadata_on(source, chrono::Local::now().date_naive())
}

/// Compose the `<title-info>` header for `source` with an explicit date.
///
/// The title is the file name without its extension; the author is a
/// placeholder the publisher is expected to replace.
///
/// ```
/// use std::path::Path;
/// use chrono::NaiveDate;
/// use docfb2::compose_metadata_on;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
/// let meta = compose_metadata_on(Path::new("/books/My Novel.docx"), date);
/// assert_eq!(meta.title, "My Novel");
/// assert_eq!(meta.date, "2024-03-09");
/// ```
pub fn compose_metadata_on(source: &Path, date: NaiveDate) -> Metadata {
    let title = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| FALLBACK_TITLE.to_string());

    Metadata {
        title,
        author: Author {
            first_name: PLACEHOLDER_FIRST_NAME.to_string(),
            last_name: PLACEHOLDER_LAST_NAME.to_string(),
        },
        date: date.format("%Y-%m-%d").to_string(),
        lang: DEFAULT_LANGUAGE.to_string(),
    }
}
