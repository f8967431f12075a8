//! Flattening of transparent images onto an opaque black canvas.
//!
//! Each channel is blended as `round(c * a / 255)`, which is the source-over
//! result on a black background. Images without alpha are only normalized to
//! packed RGB8.

use image::{DynamicImage, GrayAlphaImage, RgbImage, RgbaImage};

use crate::decode::{ColorMode, OpaqueImage, SourceImage};

/// Produce a fully opaque RGB image from any source layout.
///
/// Alpha-carrying modes are composited onto solid black using alpha as the
/// blend mask. Opaque modes are converted to RGB without altering colors.
pub fn flatten_onto_black(image: SourceImage) -> OpaqueImage {
    let mode = image.mode();
    let img = image.into_dynamic();

    let rgb = match (mode, img) {
        (ColorMode::Rgb, DynamicImage::ImageRgb8(rgb)) => rgb,
        (ColorMode::Rgba, img) => blend_rgba(&img.into_rgba8()),
        (ColorMode::GrayAlpha, img) => blend_gray_alpha(&img.into_luma_alpha8()),
        (_, img) => img.into_rgb8(),
    };

    OpaqueImage::from_rgb_image(rgb)
}

fn blend_rgba(src: &RgbaImage) -> RgbImage {
    let (width, height) = src.dimensions();
    let mut out = Vec::with_capacity((width as usize) * (height as usize) * 3);
    for px in src.pixels() {
        let [r, g, b, a] = px.0;
        out.extend_from_slice(&[over_black(r, a), over_black(g, a), over_black(b, a)]);
    }
    // Buffer length is exactly width * height * 3.
    RgbImage::from_raw(width, height, out).unwrap_or_else(|| RgbImage::new(width, height))
}

fn blend_gray_alpha(src: &GrayAlphaImage) -> RgbImage {
    let (width, height) = src.dimensions();
    let mut out = Vec::with_capacity((width as usize) * (height as usize) * 3);
    for px in src.pixels() {
        let [l, a] = px.0;
        let v = over_black(l, a);
        out.extend_from_slice(&[v, v, v]);
    }
    RgbImage::from_raw(width, height, out).unwrap_or_else(|| RgbImage::new(width, height))
}

/// Blend one channel value onto black.
#[inline]
fn over_black(channel: u8, alpha: u8) -> u8 {
    ((channel as u32 * alpha as u32 + 127) / 255) as u8
}


// ============================================================================
// Property-Based Tests
// ============================================================================
