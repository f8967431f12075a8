//! Lossy WebP encoding.
//!
//! This module wraps libwebp through the `webp` crate's advanced API so the
//! compression method (effort) can be pinned. Output is deterministic for
//! identical pixels, quality and effort.

use thiserror::Error;

use crate::decode::OpaqueImage;

/// Largest width or height a WebP bitstream can describe.
pub const MAX_WEBP_DIMENSION: u32 = 16383;

/// Errors that can occur during WebP encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero or above the WebP limit
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be within 1-16383")]
    InvalidDimensions { width: u32, height: u32 },

    /// libwebp rejected the configuration or failed to encode
    #[error("WebP encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode RGB pixel data to lossy WebP bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - WebP quality (0-100, clamped)
/// * `effort` - libwebp method (0 fastest, 6 smallest output; clamped)
///
/// # Returns
///
/// WebP-encoded bytes on success, or an error if encoding fails.
pub fn encode_webp(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
    effort: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 || width > MAX_WEBP_DIMENSION || height > MAX_WEBP_DIMENSION {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let mut config = ::webp::WebPConfig::new()
        .map_err(|_| EncodeError::EncodingFailed("failed to create WebPConfig".to_string()))?;
    config.lossless = 0;
    config.quality = quality.min(100) as f32;
    config.method = effort.min(6) as i32;

    let encoder = ::webp::Encoder::from_rgb(pixels, width, height);
    let memory = encoder
        .encode_advanced(&config)
        .map_err(|e| EncodeError::EncodingFailed(format!("{e:?}")))?;

    Ok(memory.to_vec())
}

/// Encode an [`OpaqueImage`] to lossy WebP bytes.
pub fn encode_opaque(image: &OpaqueImage, quality: u8, effort: u8) -> Result<Vec<u8>, EncodeError> {
    encode_webp(&image.pixels, image.width, image.height, quality, effort)
}

/// Check the RIFF/WEBP container signature.
pub fn is_webp(bytes: &[u8]) -> bool {
    bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP"
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Property: Valid input always produces a WebP container.
        #[test]
        fn prop_valid_input_produces_webp(
            width in 1u32..=32,
            height in 1u32..=32,
            quality in 0u8..=100,
            effort in 0u8..=6,
        ) {
            let pixels = vec![128u8; (width * height * 3) as usize];
            let result = encode_webp(&pixels, width, height, quality, effort);

            prop_assert!(result.is_ok());
            prop_assert!(is_webp(&result.unwrap()));
        }

        /// Property: Mismatched pixel data length always returns error.
        #[test]
        fn prop_invalid_pixel_length_returns_error(
            width in 1u32..=32,
            height in 1u32..=32,
            delta in 1usize..=10,
            longer in any::<bool>(),
        ) {
            let expected = (width * height * 3) as usize;
            let actual = if longer { expected + delta } else { expected.saturating_sub(delta) };
            let pixels = vec![0u8; actual];

            let result = encode_webp(&pixels, width, height, 90, 6);
            prop_assert!(
                matches!(result, Err(EncodeError::InvalidPixelData { .. })),
                "Mismatched pixel data should return InvalidPixelData error"
            );
        }
    }
}
