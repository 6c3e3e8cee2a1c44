//! Pixel backend trait and shared types.
//!
//! The [`PixelBackend`] trait defines the capability set every backend must
//! support: decode (from file or memory), encode, resample, quantize, and
//! inspect. [`Image`](crate::Image) routes all pixel work through it and
//! keeps the buffer type opaque, so the format-dispatch and geometry logic
//! never depends on a concrete pixel library.
//!
//! The production implementation is
//! [`RustBackend`](crate::rust_backend::RustBackend): pure Rust, statically
//! linked codecs from the `image` crate.

use crate::format::ImageFormat;
use crate::quality::Quality;
use std::io::{Seek, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("encode failed: {0}")]
    Encode(String),
}

/// Pixel dimensions reported by a backend buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for pixel backends.
///
/// A backend owns the codec and resampling machinery behind an opaque
/// [`Buffer`](PixelBackend::Buffer) type. Backends are cheap value types;
/// derived images clone the backend of their parent, hence the `Clone`
/// bound.
pub trait PixelBackend: Clone {
    /// Decoded raster buffer. Only the backend looks inside it.
    type Buffer;

    /// Decode a file with the codec for `format`. The file content must
    /// actually be in that format; there is no fallback sniffing.
    fn decode_file(&self, path: &Path, format: ImageFormat) -> Result<Self::Buffer, BackendError>;

    /// Decode an in-memory byte sequence, sniffing the container type from
    /// the bytes themselves.
    fn decode_bytes(&self, bytes: &[u8]) -> Result<Self::Buffer, BackendError>;

    /// Encode `buffer` into `writer` with the codec for `format`. `quality`
    /// applies where the format supports it (JPEG quality, PNG compression
    /// hint) and is ignored elsewhere.
    fn encode<W: Write + Seek>(
        &self,
        buffer: &Self::Buffer,
        writer: &mut W,
        format: ImageFormat,
        quality: Quality,
    ) -> Result<(), BackendError>;

    /// Resample the full source extent into a new buffer of exactly
    /// `width` × `height`. Both dimensions are nonzero; the caller checks
    /// geometry before asking.
    fn resample(&self, buffer: &Self::Buffer, width: u32, height: u32) -> Self::Buffer;

    /// Reduce `buffer` in place to a palette of at most `max_colors`
    /// entries (`1..=256`). Returns the number of palette entries the
    /// quantized buffer actually uses.
    fn quantize(&self, buffer: &mut Self::Buffer, max_colors: u32) -> u32;

    /// Read the buffer's dimensions back.
    fn dimensions(&self, buffer: &Self::Buffer) -> Dimensions;
}
