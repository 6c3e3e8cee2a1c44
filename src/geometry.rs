//! Pure geometry for scaling requests.
//!
//! No pixels move in this module. Given a source size, a requested size,
//! and an aspect-ratio mode, [`resolve_scaled_size`] works out the target
//! dimensions a resample should produce, or rejects the request.

use crate::backend::Dimensions;

/// How a scaling request treats the source aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatioMode {
    /// Use the requested width and height exactly, distorting freely.
    #[default]
    IgnoreAspectRatio,
    /// Keep the source ratio; the requested width wins and the height is
    /// derived from it.
    KeepAspectRatio,
    /// Keep the source ratio; the requested height wins and the width is
    /// derived from it.
    KeepAspectRatioByExpanding,
}

/// Resolve the target size for a scaling request.
///
/// Derived lengths truncate toward zero. Requests that resolve to a
/// non-positive width or height yield `None`, as does a degenerate
/// (zero-sized) source.
///
/// # Examples
///
/// ```
/// use pictor::backend::Dimensions;
/// use pictor::geometry::{resolve_scaled_size, AspectRatioMode};
///
/// let source = Dimensions { width: 100, height: 50 };
/// let target = resolve_scaled_size(source, 50, 0, AspectRatioMode::KeepAspectRatio);
/// assert_eq!(target, Some(Dimensions { width: 50, height: 25 }));
/// ```
pub fn resolve_scaled_size(
    source: Dimensions,
    width: i32,
    height: i32,
    mode: AspectRatioMode,
) -> Option<Dimensions> {
    if source.width == 0 || source.height == 0 {
        return None;
    }

    // i64 keeps the cross-multiplication exact for any u32 source size.
    let src_w = source.width as i64;
    let src_h = source.height as i64;
    let (width, height) = match mode {
        AspectRatioMode::IgnoreAspectRatio => (width as i64, height as i64),
        AspectRatioMode::KeepAspectRatio => {
            let width = width as i64;
            (width, width * src_h / src_w)
        }
        AspectRatioMode::KeepAspectRatioByExpanding => {
            let height = height as i64;
            (height * src_w / src_h, height)
        }
    };

    if width <= 0 || height <= 0 || width > u32::MAX as i64 || height > u32::MAX as i64 {
        return None;
    }
    Some(Dimensions {
        width: width as u32,
        height: height as u32,
    })
}
