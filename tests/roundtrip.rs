//! End-to-end tests over the public API: real files, real codecs.
//!
//! Everything here goes through [`pictor::Image`] the way a caller would,
//! with the `image` crate used directly only to fabricate inputs and to
//! verify what actually landed on disk.

use pictor::{AspectRatioMode, Image, ImageFormat, Quality};
use std::collections::HashSet;
use std::io::Cursor;
use std::path::Path;

fn gradient_rgba(width: u32, height: u32) -> image::RgbaImage {
    image::RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([
            (x * 7 % 256) as u8,
            (y * 11 % 256) as u8,
            ((x + y) * 3 % 256) as u8,
            255 - (x % 32) as u8,
        ])
    })
}

fn write_gradient_png(path: &Path, width: u32, height: u32) {
    gradient_rgba(width, height)
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

fn write_gradient_jpeg(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x * 7 % 256) as u8, (y * 11 % 256) as u8, 128])
    });
    img.save_with_format(path, image::ImageFormat::Jpeg).unwrap();
}

fn gradient_png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    gradient_rgba(width, height)
        .write_to(&mut cursor, image::ImageFormat::Png)
        .unwrap();
    cursor.into_inner()
}

#[test]
fn load_populates_dimensions_format_and_source() {
    let tmp = tempfile::TempDir::new().unwrap();
    let source = tmp.path().join("photo.png");
    write_gradient_png(&source, 100, 50);

    let mut image = Image::new();
    assert!(image.load(&source));
    assert!(!image.is_null());
    assert_eq!(image.width(), 100);
    assert_eq!(image.height(), 50);
    assert_eq!(image.format(), Some(ImageFormat::Png));
    assert_eq!(image.source_path(), Some(source.as_path()));
}

#[test]
fn scaling_to_half_width_is_stable_across_repeats() {
    let tmp = tempfile::TempDir::new().unwrap();
    let source = tmp.path().join("photo.png");
    write_gradient_png(&source, 100, 50);

    let mut image = Image::new();
    assert!(image.load(&source));

    let half = image.scaled_to_width(50);
    assert_eq!((half.width(), half.height()), (50, 25));
    assert_eq!(half.format(), Some(ImageFormat::Png));
    assert_eq!(half.source_path(), None);

    let again = half.scaled_to_width(50);
    assert_eq!((again.width(), again.height()), (50, 25));
}

#[test]
fn png_round_trip_preserves_every_pixel() {
    let tmp = tempfile::TempDir::new().unwrap();
    let source = tmp.path().join("in.png");
    let copy = tmp.path().join("out.png");
    write_gradient_png(&source, 80, 60);

    let mut image = Image::new();
    assert!(image.load(&source));
    assert!(image.save(&copy));

    let before = image::open(&source).unwrap().into_rgba8();
    let after = image::open(&copy).unwrap().into_rgba8();
    assert_eq!(before.dimensions(), after.dimensions());
    // Alpha included: the load/save pipeline must not blend or drop it.
    assert_eq!(before.as_raw(), after.as_raw());
}

#[test]
fn jpeg_round_trip_keeps_exact_dimensions() {
    let tmp = tempfile::TempDir::new().unwrap();
    let source = tmp.path().join("in.jpg");
    let copy = tmp.path().join("out.jpg");
    write_gradient_jpeg(&source, 97, 41);

    let mut image = Image::new();
    assert!(image.load(&source));
    assert!(image.save_with(&copy, ImageFormat::Jpeg, Quality::new(85)));

    let mut reloaded = Image::new();
    assert!(reloaded.load(&copy));
    assert_eq!(reloaded.width(), 97);
    assert_eq!(reloaded.height(), 41);
}

#[test]
fn the_jpg_hint_loses_to_the_loaded_format() {
    let tmp = tempfile::TempDir::new().unwrap();
    let source = tmp.path().join("photo.png");
    let out = tmp.path().join("out.jpg");
    write_gradient_png(&source, 40, 40);

    let mut image = Image::new();
    assert!(image.load(&source));
    assert!(image.save_with(&out, ImageFormat::Jpeg, Quality::new(80)));

    // The file is named .jpg but its content is PNG.
    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Png);
}

#[test]
fn byte_built_images_follow_the_save_hint() {
    let tmp = tempfile::TempDir::new().unwrap();
    let image = Image::from_bytes(&gradient_png_bytes(60, 40));
    assert!(!image.is_null());
    assert_eq!(image.format(), None);
    assert_eq!(image.source_path(), None);

    let as_gif = tmp.path().join("out.gif");
    assert!(image.save_with(&as_gif, ImageFormat::Gif, Quality::DEFAULT));
    let bytes = std::fs::read(&as_gif).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Gif);

    // Without a hint the default is PNG.
    let as_default = tmp.path().join("out.png");
    assert!(image.save(&as_default));
    let bytes = std::fs::read(&as_default).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Png);
}

#[test]
fn gif_round_trip_preserves_pixel_data() {
    let tmp = tempfile::TempDir::new().unwrap();
    let source = tmp.path().join("blocks.gif");
    let copy = tmp.path().join("copy.gif");

    // Four flat blocks; a palette the encoder can reproduce exactly.
    let colors = [
        image::Rgb([200u8, 30, 30]),
        image::Rgb([40, 180, 60]),
        image::Rgb([30, 60, 200]),
        image::Rgb([240, 240, 240]),
    ];
    let blocks = image::RgbImage::from_fn(64, 64, |x, y| {
        colors[(x / 32 + 2 * (y / 32)) as usize]
    });
    blocks.save_with_format(&source, image::ImageFormat::Gif).unwrap();

    let mut image = Image::new();
    assert!(image.load(&source));
    assert!(image.save(&copy));

    let mut reloaded = Image::new();
    assert!(reloaded.load(&copy));
    assert_eq!(reloaded.format(), Some(ImageFormat::Gif));
    assert_eq!((reloaded.width(), reloaded.height()), (64, 64));

    let before = image::open(&source).unwrap().into_rgba8();
    let after = image::open(&copy).unwrap().into_rgba8();
    assert_eq!(before.as_raw(), after.as_raw());
}

#[test]
fn bmp_can_be_written_but_not_loaded_by_name() {
    let tmp = tempfile::TempDir::new().unwrap();
    let out = tmp.path().join("plain.bmp");

    let image = Image::from_bytes(&gradient_png_bytes(30, 20));
    assert!(image.save_with(&out, ImageFormat::Bmp, Quality::DEFAULT));
    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Bmp);

    // The loader does not recognize the extension.
    let mut reloaded = Image::new();
    assert!(!reloaded.load(&out));
    assert!(reloaded.is_null());

    // The byte path still decodes it.
    let from_bytes = Image::from_bytes(&bytes);
    assert_eq!((from_bytes.width(), from_bytes.height()), (30, 20));

    // BMP is uncompressed: the color channels survive bit-exactly. Only
    // alpha is gone, since the writer flattens to 24-bit.
    let decoded = image::load_from_memory(&bytes).unwrap().into_rgb8();
    let expected = image::DynamicImage::ImageRgba8(gradient_rgba(30, 20)).into_rgb8();
    assert_eq!(decoded.as_raw(), expected.as_raw());
}

#[test]
fn an_unsupported_extension_leaves_the_image_untouched() {
    let tmp = tempfile::TempDir::new().unwrap();
    let source = tmp.path().join("photo.png");
    write_gradient_png(&source, 100, 50);
    // Real PNG content behind an extension the loader does not accept.
    let stray = tmp.path().join("scan.tiff");
    write_gradient_png(&stray, 10, 10);

    let mut image = Image::new();
    assert!(image.load(&source));
    assert!(!image.load(&stray));
    assert_eq!(image.width(), 100);
    assert_eq!(image.height(), 50);
    assert_eq!(image.source_path(), Some(source.as_path()));
}

#[test]
fn lower_quality_produces_smaller_jpeg_files() {
    let tmp = tempfile::TempDir::new().unwrap();
    let rough = tmp.path().join("rough.jpg");
    let fine = tmp.path().join("fine.jpg");

    let image = Image::from_bytes(&gradient_png_bytes(128, 128));
    assert!(image.save_with(&rough, ImageFormat::Jpeg, Quality::new(5)));
    assert!(image.save_with(&fine, ImageFormat::Jpeg, Quality::new(95)));

    let rough_len = std::fs::metadata(&rough).unwrap().len();
    let fine_len = std::fs::metadata(&fine).unwrap().len();
    assert!(
        rough_len < fine_len,
        "expected q5 ({rough_len} bytes) smaller than q95 ({fine_len} bytes)"
    );
}

#[test]
fn palette_reduction_bounds_the_colors_on_disk() {
    let tmp = tempfile::TempDir::new().unwrap();
    let source = tmp.path().join("photo.png");
    let out = tmp.path().join("reduced.png");
    write_gradient_png(&source, 64, 64);

    let mut image = Image::new();
    assert!(image.load(&source));
    assert_eq!(image.color_count(), 0);

    image.set_color_count(8);
    assert!(image.color_count() >= 1 && image.color_count() <= 8);
    assert!(image.save(&out));

    let distinct: HashSet<[u8; 4]> = image::open(&out)
        .unwrap()
        .into_rgba8()
        .pixels()
        .map(|p| p.0)
        .collect();
    assert!(distinct.len() <= 8, "distinct colors: {}", distinct.len());
}

#[test]
fn a_one_color_reduction_flattens_the_file() {
    let tmp = tempfile::TempDir::new().unwrap();
    let source = tmp.path().join("checker.png");
    let out = tmp.path().join("flat.png");

    let checker = image::RgbaImage::from_fn(32, 32, |x, y| {
        if (x + y) % 2 == 0 {
            image::Rgba([255, 255, 255, 255])
        } else {
            image::Rgba([0, 0, 0, 255])
        }
    });
    checker.save_with_format(&source, image::ImageFormat::Png).unwrap();

    let mut image = Image::new();
    assert!(image.load(&source));

    image.set_color_count(1);
    assert_eq!(image.color_count(), 1);
    assert!(image.save(&out));

    let distinct: HashSet<[u8; 4]> = image::open(&out)
        .unwrap()
        .into_rgba8()
        .pixels()
        .map(|p| p.0)
        .collect();
    assert_eq!(distinct.len(), 1);
}

#[test]
fn write_to_streams_the_same_encoding_as_save() {
    let tmp = tempfile::TempDir::new().unwrap();
    let source = tmp.path().join("photo.png");
    write_gradient_png(&source, 50, 30);

    let mut image = Image::new();
    assert!(image.load(&source));

    let mut sink = Cursor::new(Vec::new());
    assert!(image.write_to(&mut sink, ImageFormat::Png, Quality::DEFAULT));
    let bytes = sink.into_inner();
    assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Png);

    let reparsed = Image::from_bytes(&bytes);
    assert_eq!((reparsed.width(), reparsed.height()), (50, 30));
}

#[test]
fn a_scaled_copy_survives_the_trip_to_disk() {
    let tmp = tempfile::TempDir::new().unwrap();
    let source = tmp.path().join("photo.png");
    let thumb = tmp.path().join("thumb.png");
    write_gradient_png(&source, 100, 50);

    let mut image = Image::new();
    assert!(image.load(&source));
    let scaled = image.scaled(200, 80, AspectRatioMode::IgnoreAspectRatio);
    assert!(scaled.save(&thumb));

    let on_disk = image::open(&thumb).unwrap();
    assert_eq!((on_disk.width(), on_disk.height()), (200, 80));
}

#[test]
fn coordinate_validity_tracks_the_loaded_size() {
    let tmp = tempfile::TempDir::new().unwrap();
    let source = tmp.path().join("photo.png");
    write_gradient_png(&source, 100, 50);

    let mut image = Image::new();
    assert!(image.load(&source));
    assert!(image.valid(1, 1));
    assert!(image.valid(99, 49));
    assert!(!image.valid(0, 0));
    assert!(!image.valid(100, 50));
}
