//! # Pictor
//!
//! A small raster image handle. Load a PNG, GIF, or JPEG from disk (or
//! decode one from memory), inspect it, derive aspect-ratio-aware scaled
//! copies, reduce its palette, and save it back as PNG, GIF, JPEG, or BMP.
//!
//! ```no_run
//! use pictor::Image;
//!
//! let mut photo = Image::new();
//! if photo.load("cat.jpg") {
//!     let thumb = photo.scaled_to_width(320);
//!     thumb.save("cat-thumb.png");
//! }
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`handle`] | The [`Image`] handle: loading, saving, scaling, palette reduction, introspection |
//! | [`format`] | The closed set of recognized container formats and extension dispatch |
//! | [`geometry`] | Aspect-ratio modes and pure target-size resolution |
//! | [`quality`] | The encode-quality knob (`-1` default sentinel, clamped `0..=100`) |
//! | [`backend`] | The [`PixelBackend`] seam: decode, encode, resample, quantize, inspect |
//! | [`rust_backend`] | The production backend on the `image` crate |
//!
//! # Design Decisions
//!
//! ## Booleans and Null Images Over Error Enums
//!
//! The [`Image`] surface reports failure the way callers actually consume
//! it: `load` and `save` return booleans, derivation returns a null image,
//! and queries on a null image return sentinels (`-1` dimensions, `None`
//! format, `0` color count). Nothing on the handle panics for an expected
//! failure. The richer taxonomy still exists one layer down:
//! [`backend::BackendError`] separates I/O, decode, and encode failures,
//! and the handle folds those `Result`s into its sentinel contract.
//!
//! ## Extension-Driven Dispatch
//!
//! [`Image::load`] trusts the file name: the extension picks the decoder,
//! and content that disagrees with it is a failure, not a fallback. The one
//! sanctioned sniffing path is [`Image::from_bytes`], which has no file
//! name to go by. At save time the image's own format outranks the caller's
//! hint, so a loaded PNG stays a PNG no matter what the output path or hint
//! claims.
//!
//! ## Copy-on-Scale, In-Place Palette Reduction
//!
//! [`Image::scaled`] and its helpers always build a new handle and leave
//! the source untouched. [`Image::set_color_count`] is the single
//! deliberate exception: it rewrites the pixels of the handle it is called
//! on, matching how palette reduction is used in practice (a terminal step
//! before saving, not a branching point).
//!
//! ## Pure-Rust Imaging
//!
//! The production backend sits on the `image` crate's statically linked
//! codecs plus `color_quant` for palette reduction. No ImageMagick and no
//! system libraries; the crate works wherever the compiler does. The
//! backend lives behind the [`PixelBackend`] trait, so the dispatch and
//! geometry logic is testable without touching a codec.

pub mod backend;
pub mod format;
pub mod geometry;
pub mod handle;
pub mod quality;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, PixelBackend};
pub use format::ImageFormat;
pub use geometry::AspectRatioMode;
pub use handle::Image;
pub use quality::Quality;
pub use rust_backend::RustBackend;
