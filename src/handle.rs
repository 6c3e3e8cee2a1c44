//! The [`Image`] handle.
//!
//! An `Image` owns a decoded pixel buffer (or none, the *null* state) plus
//! the metadata callers can query: dimensions, the format it was loaded
//! from, the source path, and the palette size after a reduction. All pixel
//! work is delegated to a [`PixelBackend`]; this module only decides *what*
//! to ask the backend for and keeps the metadata consistent with the
//! buffer.
//!
//! Failure never panics and never surfaces a backend error directly:
//! loading and saving report booleans, derivation yields a null image, and
//! queries on a null image return sentinels (`-1` dimensions, `None`
//! format, `0` color count).

use crate::backend::PixelBackend;
use crate::format::ImageFormat;
use crate::geometry::{AspectRatioMode, resolve_scaled_size};
use crate::quality::Quality;
use crate::rust_backend::RustBackend;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::{Path, PathBuf};

/// A raster image: an opaque pixel buffer plus its metadata.
///
/// Handles start out null and become valid through [`load`](Self::load) or
/// [`from_bytes`](Self::from_bytes). [`scaled`](Self::scaled) and friends
/// derive new handles and leave the source alone;
/// [`set_color_count`](Self::set_color_count) is the one in-place
/// operation.
pub struct Image<B: PixelBackend = RustBackend> {
    backend: B,
    buffer: Option<B::Buffer>,
    width: i32,
    height: i32,
    format: Option<ImageFormat>,
    source_path: Option<PathBuf>,
    palette_len: u32,
}

impl Image<RustBackend> {
    /// Creates a null handle over the default backend.
    pub fn new() -> Self {
        Self::with_backend(RustBackend::new())
    }

    /// Decodes an image from an in-memory byte sequence, sniffing the
    /// container type from the bytes themselves.
    ///
    /// On failure the returned handle is null; check
    /// [`is_null`](Self::is_null). The sniffed container is not recorded:
    /// byte-built images stay format-unset until they are saved.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut image = Self::new();
        if let Ok(buffer) = image.backend.decode_bytes(bytes) {
            image.bind_buffer(buffer, None, None);
        }
        image
    }
}

impl<B: PixelBackend> Image<B> {
    /// Creates a null handle over a specific backend.
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            buffer: None,
            width: -1,
            height: -1,
            format: None,
            source_path: None,
            palette_len: 0,
        }
    }

    /// A null handle sharing this one's backend.
    fn null_like(&self) -> Self {
        Self::with_backend(self.backend.clone())
    }

    /// Binds a freshly produced buffer and re-reads the metadata from it.
    fn bind_buffer(
        &mut self,
        buffer: B::Buffer,
        format: Option<ImageFormat>,
        source_path: Option<PathBuf>,
    ) {
        let dims = self.backend.dimensions(&buffer);
        self.width = dims.width as i32;
        self.height = dims.height as i32;
        self.buffer = Some(buffer);
        self.format = format;
        self.source_path = source_path;
        self.palette_len = 0;
    }

    /// Loads an image from `path`, picking the decoder from the file
    /// extension (`png`, `gif`, `jpg`, `jpeg`; ASCII case-insensitive).
    ///
    /// Returns `true` on success. On failure (unrecognized extension,
    /// unreadable file, decoder rejection) the handle keeps whatever state
    /// it had before the call.
    pub fn load(&mut self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let Some(format) = ImageFormat::from_path(path).filter(|f| f.is_loadable()) else {
            return false;
        };
        let Ok(buffer) = self.backend.decode_file(path, format) else {
            return false;
        };
        self.bind_buffer(buffer, Some(format), Some(path.to_path_buf()));
        true
    }

    /// Saves the image to `path` with default settings: PNG for images
    /// without a format of their own, encoder-default quality.
    pub fn save(&self, path: impl AsRef<Path>) -> bool {
        self.save_with(path, ImageFormat::Png, Quality::DEFAULT)
    }

    /// Saves the image to `path`.
    ///
    /// The image's own format wins over `format_hint`; the hint only
    /// applies to handles that never went through an extension-dispatched
    /// load. Returns `false` for a null image and on any encoder or I/O
    /// failure.
    pub fn save_with(
        &self,
        path: impl AsRef<Path>,
        format_hint: ImageFormat,
        quality: Quality,
    ) -> bool {
        let Some(buffer) = &self.buffer else {
            return false;
        };
        let format = self.format.unwrap_or(format_hint);
        let Ok(file) = File::create(path.as_ref()) else {
            return false;
        };
        let mut writer = BufWriter::new(file);
        if self.backend.encode(buffer, &mut writer, format, quality).is_err() {
            return false;
        }
        writer.flush().is_ok()
    }

    /// Encodes the image into `writer` instead of a file, under the same
    /// format and quality rules as [`save_with`](Self::save_with).
    pub fn write_to<W: Write + Seek>(
        &self,
        writer: &mut W,
        format_hint: ImageFormat,
        quality: Quality,
    ) -> bool {
        let Some(buffer) = &self.buffer else {
            return false;
        };
        let format = self.format.unwrap_or(format_hint);
        self.backend.encode(buffer, writer, format, quality).is_ok()
    }

    /// Returns a copy resampled to the target size `mode` resolves from
    /// `width` and `height`.
    ///
    /// The copy inherits this image's format but not its source path, and
    /// is truecolor regardless of any palette reduction applied here. When
    /// the target resolves to a non-positive dimension, or when this image
    /// is null, the result is a null image.
    pub fn scaled(&self, width: i32, height: i32, mode: AspectRatioMode) -> Self {
        let Some(buffer) = &self.buffer else {
            return self.null_like();
        };
        let source = self.backend.dimensions(buffer);
        let Some(target) = resolve_scaled_size(source, width, height, mode) else {
            return self.null_like();
        };
        let resampled = self.backend.resample(buffer, target.width, target.height);
        let mut image = self.null_like();
        image.bind_buffer(resampled, self.format, None);
        image
    }

    /// Scales to `width`, deriving the height from the aspect ratio.
    pub fn scaled_to_width(&self, width: i32) -> Self {
        self.scaled(width, 0, AspectRatioMode::KeepAspectRatio)
    }

    /// Scales to `height`, deriving the width from the aspect ratio.
    pub fn scaled_to_height(&self, height: i32) -> Self {
        self.scaled(0, height, AspectRatioMode::KeepAspectRatioByExpanding)
    }

    /// Reduces this image, in place, to a palette of at most `count`
    /// colors. `count` is clamped to `1..=256`.
    ///
    /// Unlike scaling, this mutates the handle it is called on. On a null
    /// image it does nothing.
    pub fn set_color_count(&mut self, count: i32) {
        let Some(buffer) = &mut self.buffer else {
            return;
        };
        let max_colors = count.clamp(1, 256) as u32;
        self.palette_len = self.backend.quantize(buffer, max_colors);
    }

    /// Width in pixels, `-1` when null.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in pixels, `-1` when null.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The format recorded at load time. Byte-built and null images have
    /// none.
    pub fn format(&self) -> Option<ImageFormat> {
        self.format
    }

    /// The path this image was loaded from. Derived and byte-built images
    /// have none.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Palette entries in use after a reduction, `0` for truecolor and
    /// null images.
    pub fn color_count(&self) -> i32 {
        self.palette_len as i32
    }

    /// True when no pixel buffer is bound.
    pub fn is_null(&self) -> bool {
        self.buffer.is_none()
    }

    /// Whether `(x, y)` addresses a pixel. Both coordinates must lie
    /// strictly between zero and the matching dimension, so column `0`,
    /// row `0`, and the far edges count as outside.
    pub fn valid(&self, x: i32, y: i32) -> bool {
        x > 0 && x < self.width && y > 0 && y < self.height
    }
}

impl<B: PixelBackend + Default> Default for Image<B> {
    fn default() -> Self {
        Self::with_backend(B::default())
    }
}

impl<B: PixelBackend> Clone for Image<B>
where
    B::Buffer: Clone,
{
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            buffer: self.buffer.clone(),
            width: self.width,
            height: self.height,
            format: self.format,
            source_path: self.source_path.clone(),
            palette_len: self.palette_len,
        }
    }
}

impl<B: PixelBackend> fmt::Debug for Image<B> {
    // Metadata only; the pixel buffer never reaches debug output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("source_path", &self.source_path)
            .field("palette_len", &self.palette_len)
            .finish_non_exhaustive()
    }
}
