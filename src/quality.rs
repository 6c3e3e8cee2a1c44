//! The encoder quality knob.

/// Quality factor for lossy or compressed encoding.
///
/// The domain is `0..=100` plus a default sentinel: `0` asks for small,
/// heavily compressed output, `100` for large, lightly compressed output,
/// and [`Quality::DEFAULT`] leaves the choice to the encoder. Out-of-domain
/// input is clamped on construction, not rejected: negative values become
/// the default sentinel, values above `100` become `100`.
///
/// How the factor is honored depends on the target format: JPEG treats it
/// as the usual lossy quality percentage, PNG as a compression-level hint,
/// and GIF/BMP ignore it entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(i32);

impl Quality {
    /// Leave the quality choice to the encoder.
    pub const DEFAULT: Self = Self(-1);

    /// Builds a clamped quality factor. See the type docs for the clamping
    /// rules.
    pub fn new(value: i32) -> Self {
        if value < 0 {
            Self::DEFAULT
        } else {
            Self(value.min(100))
        }
    }

    /// The raw factor: `-1` for the default sentinel, otherwise `0..=100`.
    pub fn value(self) -> i32 {
        self.0
    }

    /// True when the encoder should pick its own setting.
    pub fn is_default(self) -> bool {
        self.0 < 0
    }

    /// The factor as a percentage, substituting `fallback` for the default
    /// sentinel.
    pub fn percent_or(self, fallback: u8) -> u8 {
        if self.0 < 0 { fallback } else { self.0 as u8 }
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::DEFAULT
    }
}
