//! Pure Rust pixel backend. Everything is statically linked; no system
//! image libraries are involved.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (PNG, GIF, JPEG) | `image` crate (pure Rust decoders) |
//! | Encode (PNG, GIF, JPEG, BMP) | `image` crate encoders |
//! | Resample | `image::DynamicImage::resize_exact` with `Triangle` filter |
//! | Palette reduction | `color_quant::NeuQuant` (Kohonen network) |

use crate::backend::{BackendError, Dimensions, PixelBackend};
use crate::format::ImageFormat;
use crate::quality::Quality;
use color_quant::NeuQuant;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{self, CompressionType, PngEncoder};
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader, Rgba, RgbaImage};
use std::fs::File;
use std::io::{BufReader, Seek, Write};
use std::path::Path;

/// NeuQuant sampling factor. 1 visits every pixel; 10 samples a tenth and
/// is the customary speed/fidelity middle ground.
const QUANT_SAMPLE_FACTOR: i32 = 10;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
#[derive(Debug, Clone, Copy)]
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn codec_format(format: ImageFormat) -> image::ImageFormat {
    match format {
        ImageFormat::Png => image::ImageFormat::Png,
        ImageFormat::Gif => image::ImageFormat::Gif,
        ImageFormat::Jpeg => image::ImageFormat::Jpeg,
        ImageFormat::Bmp => image::ImageFormat::Bmp,
    }
}

/// JPEG quality percentage, defaulting to 75. The encoder floor is 1.
fn jpeg_quality(quality: Quality) -> u8 {
    quality.percent_or(75).max(1)
}

/// Map the 0..=100 quality scale onto PNG compression effort. Low quality
/// asks for the smallest file, high quality for the fastest encode.
fn png_compression(quality: Quality) -> CompressionType {
    if quality.is_default() {
        return CompressionType::Default;
    }
    match quality.value() {
        0..=33 => CompressionType::Best,
        34..=66 => CompressionType::Default,
        _ => CompressionType::Fast,
    }
}

fn encode_error(error: image::ImageError) -> BackendError {
    BackendError::Encode(error.to_string())
}

/// Channel-wise mean over the whole buffer.
fn mean_color(rgba: &RgbaImage) -> Rgba<u8> {
    let mut sums = [0u64; 4];
    for pixel in rgba.pixels() {
        for (sum, channel) in sums.iter_mut().zip(pixel.0) {
            *sum += u64::from(channel);
        }
    }
    let count = (u64::from(rgba.width()) * u64::from(rgba.height())).max(1);
    Rgba(sums.map(|sum| (sum / count) as u8))
}

impl PixelBackend for RustBackend {
    type Buffer = DynamicImage;

    fn decode_file(&self, path: &Path, format: ImageFormat) -> Result<DynamicImage, BackendError> {
        let file = File::open(path).map_err(BackendError::Io)?;
        let reader = ImageReader::with_format(BufReader::new(file), codec_format(format));
        let decoded = reader
            .decode()
            .map_err(|e| BackendError::Decode(format!("{}: {}", path.display(), e)))?;
        // PNG sources stay RGBA so transparency survives later re-encodes,
        // whatever sub-format (paletted, grayscale) the file used.
        Ok(match format {
            ImageFormat::Png => DynamicImage::ImageRgba8(decoded.into_rgba8()),
            _ => decoded,
        })
    }

    fn decode_bytes(&self, bytes: &[u8]) -> Result<DynamicImage, BackendError> {
        image::load_from_memory(bytes).map_err(|e| BackendError::Decode(e.to_string()))
    }

    fn encode<W: Write + Seek>(
        &self,
        buffer: &DynamicImage,
        writer: &mut W,
        format: ImageFormat,
        quality: Quality,
    ) -> Result<(), BackendError> {
        match format {
            ImageFormat::Png => {
                let encoder = PngEncoder::new_with_quality(
                    writer,
                    png_compression(quality),
                    png::FilterType::Adaptive,
                );
                buffer.write_with_encoder(encoder).map_err(encode_error)
            }
            ImageFormat::Jpeg => {
                let encoder = JpegEncoder::new_with_quality(writer, jpeg_quality(quality));
                // JPEG has no alpha channel; flatten before handing over.
                DynamicImage::ImageRgb8(buffer.to_rgb8())
                    .write_with_encoder(encoder)
                    .map_err(encode_error)
            }
            ImageFormat::Gif => {
                // The GIF encoder takes RGB and RGBA frames only.
                DynamicImage::ImageRgba8(buffer.to_rgba8())
                    .write_to(writer, image::ImageFormat::Gif)
                    .map_err(encode_error)
            }
            ImageFormat::Bmp => {
                // 24-bit BMP; alpha is dropped.
                DynamicImage::ImageRgb8(buffer.to_rgb8())
                    .write_to(writer, image::ImageFormat::Bmp)
                    .map_err(encode_error)
            }
        }
    }

    fn resample(&self, buffer: &DynamicImage, width: u32, height: u32) -> DynamicImage {
        buffer.resize_exact(width, height, FilterType::Triangle)
    }

    fn quantize(&self, buffer: &mut DynamicImage, max_colors: u32) -> u32 {
        let mut rgba = buffer.to_rgba8();
        if max_colors <= 1 {
            // NeuQuant cannot build a one-entry network; a one-color
            // palette is the mean color everywhere.
            let flat = mean_color(&rgba);
            for pixel in rgba.pixels_mut() {
                *pixel = flat;
            }
            *buffer = DynamicImage::ImageRgba8(rgba);
            return 1;
        }

        let net_size = max_colors.min(256) as usize;
        let quantizer = NeuQuant::new(QUANT_SAMPLE_FACTOR, net_size, rgba.as_raw());
        let palette = quantizer.color_map_rgba();

        let mut used = vec![false; net_size];
        for pixel in rgba.pixels_mut() {
            let index = quantizer.index_of(&pixel.0);
            used[index] = true;
            pixel.0.copy_from_slice(&palette[index * 4..index * 4 + 4]);
        }

        *buffer = DynamicImage::ImageRgba8(rgba);
        used.iter().filter(|&&in_use| in_use).count() as u32
    }

    fn dimensions(&self, buffer: &DynamicImage) -> Dimensions {
        Dimensions {
            width: buffer.width(),
            height: buffer.height(),
        }
    }
}
