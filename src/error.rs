//! Error types for docfb2 operations.

use thiserror::Error;

/// Errors surfaced by a conversion.
///
/// Callers see exactly three kinds of failure. Internal faults (I/O, archive
/// or XML errors raised after the source package was opened) are folded into
/// [`Error::ConversionFailed`] by the `From` conversions below, so `?` never
/// leaks a lower-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// The source could not be opened or is not a DOCX package.
    #[error("unreadable document: {0}")]
    UnreadableDocument(String),

    /// Output validation was requested and the produced text did not parse.
    ///
    /// The produced text is kept so it can still be inspected.
    #[error("malformed output: {message}")]
    MalformedOutput { message: String, output: String },

    /// Any other internal fault, carrying the original message.
    #[error("conversion failed: {0}")]
    ConversionFailed(String),
}

impl Error {
    pub(crate) fn unreadable(msg: impl Into<String>) -> Self {
        Error::UnreadableDocument(msg.into())
    }

    /// The produced output attached to a [`Error::MalformedOutput`].
    pub fn output(&self) -> Option<&str> {
        match self {
            Error::MalformedOutput { output, .. } => Some(output),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::ConversionFailed(e.to_string())
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(e: zip::result::ZipError) -> Self {
        Error::ConversionFailed(e.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(e: quick_xml::Error) -> Self {
        Error::ConversionFailed(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_errors_collapse_to_conversion_failed() {
        let io = std::io::Error::other("disk on fire");
        let err: Error = io.into();
        assert!(matches!(err, Error::ConversionFailed(ref m) if m.contains("disk on fire")));
    }

    #[test]
    fn test_malformed_output_keeps_text() {
        let err = Error::MalformedOutput {
            message: "unexpected end".into(),
            output: "<a>".into(),
        };
        assert_eq!(err.output(), Some("<a>"));
        assert_eq!(err.to_string(), "malformed output: unexpected end");
        assert_eq!(Error::unreadable("x").output(), None);
    }
}
