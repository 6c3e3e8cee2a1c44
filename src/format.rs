//! Container format vocabulary and file-extension classification.
//!
//! The recognized set is closed: PNG, GIF, JPEG, and BMP. Classification is
//! purely extension-driven; nothing here inspects file contents. BMP is the
//! one asymmetric member: it can be written but not loaded from a path (see
//! [`ImageFormat::is_loadable`]).

use std::path::Path;

/// A recognized container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Gif,
    /// Covers both the `jpg` and `jpeg` extensions.
    Jpeg,
    /// Encode-only: `save` accepts it, `load` rejects it.
    Bmp,
}

impl ImageFormat {
    /// Classify a bare file extension (no leading dot), ASCII
    /// case-insensitively. Returns `None` for anything outside the
    /// recognized set.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "bmp" => Some(Self::Bmp),
            _ => None,
        }
    }

    /// Classify a path by its extension. Returns `None` when the path has
    /// no extension, a non-UTF-8 extension, or an unrecognized one.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Whether a file of this format may be loaded from disk.
    ///
    /// The loadable set is `{png, gif, jpg, jpeg}`; BMP files are produced
    /// but never read back by extension.
    pub fn is_loadable(self) -> bool {
        !matches!(self, Self::Bmp)
    }
}
