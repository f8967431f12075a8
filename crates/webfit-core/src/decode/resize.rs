//! Image resizing for the optimization pipeline.
//!
//! All functions return new `SourceImage` instances without modifying the input.
//! The channel layout (including any alpha channel) is preserved so that
//! compositing can happen after resampling.

use image::imageops::FilterType;

use super::SourceImage;
use crate::config::ConfigError;

/// Resampling filter used for every downscale.
const RESAMPLE_FILTER: FilterType = FilterType::Lanczos3;

/// Resize an image to exact dimensions with Lanczos3 resampling.
///
/// # Arguments
///
/// * `image` - The source image to resize
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
///
/// # Errors
///
/// Returns `ConfigError::ZeroDimension` if either target dimension is zero.
pub fn resize(
    image: &SourceImage,
    width: u32,
    height: u32,
) -> Result<SourceImage, ConfigError> {
    if width == 0 || height == 0 {
        return Err(ConfigError::ZeroDimension);
    }

    // Fast path: if dimensions match, just clone
    if image.width() == width && image.height() == height {
        return Ok(image.clone());
    }

    let resized = image
        .as_dynamic()
        .resize_exact(width, height, RESAMPLE_FILTER);

    Ok(SourceImage::new(resized))
}

/// Downscale an image so that it is at most `max_width` pixels wide.
///
/// The height follows the original aspect ratio. Images that are already
/// `max_width` wide or narrower are returned unchanged; this never upscales.
///
/// # Errors
///
/// Returns `ConfigError::ZeroDimension` if `max_width` is zero.
pub fn resize_to_width(
    image: &SourceImage,
    max_width: u32,
) -> Result<SourceImage, ConfigError> {
    if max_width == 0 {
        return Err(ConfigError::ZeroDimension);
    }

    let (new_width, new_height) =
        calculate_width_constrained_dimensions(image.width(), image.height(), max_width);

    resize(image, new_width, new_height)
}

/// Calculate the output dimensions for a width-constrained downscale.
///
/// Returns the input unchanged when `width <= max_width`. Otherwise the width
/// becomes `max_width` and the height is `round(height * max_width / width)`,
/// never less than 1.
pub fn calculate_width_constrained_dimensions(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width <= max_width || height == 0 {
        return (width, height);
    }

    let scale = max_width as f64 / width as f64;
    let new_height = (height as f64 * scale).round() as u32;
    (max_width, new_height.max(1))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
