//! Core types for image decoding.

use image::{ColorType, DynamicImage};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or not one of PNG, JPEG, WebP.
    #[error("Invalid or unsupported image format")]
    UnsupportedFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// I/O error while reading the byte stream.
    #[error("I/O error: {0}")]
    Io(String),
}

/// Channel layout of a decoded image.
///
/// Palette images never show up here: the decoder expands them, so a palette
/// with a transparent index arrives as [`ColorMode::Rgba`] and an opaque
/// palette as [`ColorMode::Rgb`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Single luminance channel.
    Gray,
    /// Luminance plus alpha.
    GrayAlpha,
    /// Opaque red, green, blue.
    Rgb,
    /// Red, green, blue plus alpha.
    Rgba,
}

impl From<ColorType> for ColorMode {
    fn from(value: ColorType) -> Self {
        if value.has_color() {
            if value.has_alpha() {
                ColorMode::Rgba
            } else {
                ColorMode::Rgb
            }
        } else if value.has_alpha() {
            ColorMode::GrayAlpha
        } else {
            ColorMode::Gray
        }
    }
}

/// A decoded image in its native channel layout.
///
/// Owned by a single pipeline invocation and dropped once the image has been
/// flattened into an [`OpaqueImage`].
#[derive(Debug, Clone)]
pub struct SourceImage {
    image: DynamicImage,
}

impl SourceImage {
    /// Wrap an already decoded image.
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Channel layout of the pixel buffer.
    pub fn mode(&self) -> ColorMode {
        ColorMode::from(self.image.color())
    }

    /// Borrow the underlying image.
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    /// Consume and return the underlying image.
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }
}

impl From<DynamicImage> for SourceImage {
    fn from(image: DynamicImage) -> Self {
        Self::new(image)
    }
}

/// A fully opaque image with packed RGB pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl OpaqueImage {
    /// Create a new OpaqueImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create an OpaqueImage from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Get the RGB triple at (x, y), or None when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + x as usize) * 3;
        Some([self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_mode_from_color_type() {
        assert_eq!(ColorMode::from(ColorType::L8), ColorMode::Gray);
        assert_eq!(ColorMode::from(ColorType::L16), ColorMode::Gray);
        assert_eq!(ColorMode::from(ColorType::La8), ColorMode::GrayAlpha);
        assert_eq!(ColorMode::from(ColorType::Rgb8), ColorMode::Rgb);
        assert_eq!(ColorMode::from(ColorType::Rgb16), ColorMode::Rgb);
        assert_eq!(ColorMode::from(ColorType::Rgba8), ColorMode::Rgba);
        assert_eq!(ColorMode::from(ColorType::Rgba32F), ColorMode::Rgba);
    }

    #[test]
    fn test_source_image_accessors() {
        let img = SourceImage::from(DynamicImage::new_rgba8(40, 30));
        assert_eq!(img.width(), 40);
        assert_eq!(img.height(), 30);
        assert_eq!(img.mode(), ColorMode::Rgba);
    }

    #[test]
    fn test_opaque_image_creation() {
        let pixels = vec![0u8; 100 * 50 * 3];
        let img = OpaqueImage::new(100, 50, pixels);

        assert_eq!(img.width, 100);
        assert_eq!(img.height, 50);
        assert_eq!(img.pixels.len(), 15_000);
    }

    #[test]
    fn test_opaque_image_pixel_lookup() {
        let img = OpaqueImage::new(2, 1, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(img.pixel(0, 0), Some([1, 2, 3]));
        assert_eq!(img.pixel(1, 0), Some([4, 5, 6]));
        assert_eq!(img.pixel(2, 0), None);
        assert_eq!(img.pixel(0, 1), None);
    }

    #[test]
    fn test_opaque_image_empty() {
        let img = OpaqueImage::new(0, 0, vec![]);
        assert!(img.is_empty());
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::CorruptedFile("truncated".to_string());
        assert_eq!(err.to_string(), "Corrupted or incomplete image file: truncated");

        let err = DecodeError::UnsupportedFormat;
        assert_eq!(err.to_string(), "Invalid or unsupported image format");
    }
}
