//! Conversion options.

/// Immutable snapshot of the settings that drive one conversion.
///
/// Every flag defaults to `true`, matching the behaviour of a fresh install of
/// the desktop converter this crate grew out of.
///
/// ```
/// use docfb2::ConversionOptions;
///
/// let options = ConversionOptions::default()
///     .with_convert_images(false)
///     .with_validate_output(false);
/// assert!(options.preserve_formatting);
/// assert!(!options.convert_images);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "cli", serde(default))]
pub struct ConversionOptions {
    /// Keep bold/italic runs as `<strong>`/`<emphasis>`.
    pub preserve_formatting: bool,
    /// Embed media entries as `<binary>` elements.
    pub convert_images: bool,
    /// Drop paragraphs whose text is empty or whitespace.
    pub remove_empty_paragraphs: bool,
    /// Re-parse the produced markup and fail on syntax errors.
    pub validate_output: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            preserve_formatting: true,
            convert_images: true,
            remove_empty_paragraphs: true,
            validate_output: true,
        }
    }
}

impl ConversionOptions {
    pub fn with_preserve_formatting(mut self, value: bool) -> Self {
        self.preserve_formatting = value;
        self
    }

    pub fn with_convert_images(mut self, value: bool) -> Self {
        self.convert_images = value;
        self
    }

    pub fn with_remove_empty_paragraphs(mut self, value: bool) -> Self {
        self.remove_empty_paragraphs = value;
        self
    }

    pub fn with_validate_output(mut self, value: bool) -> Self {
        self.validate_output = value;
        self
    }
}
