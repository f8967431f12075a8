//! Decoding of uploaded PNG, JPEG and WebP bytes.

use std::io::Cursor;

use image::{ImageFormat, ImageReader};

use super::{DecodeError, SourceImage};

/// Formats accepted as input.
pub const SUPPORTED_FORMATS: [ImageFormat; 3] =
    [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::WebP];

/// Decode an image from bytes, keeping its native channel layout.
///
/// The format is detected from the content, not from a filename. Only PNG,
/// JPEG and WebP are accepted; anything else is rejected before decoding.
///
/// # Errors
///
/// Returns `DecodeError::UnsupportedFormat` if the bytes are not one of the
/// supported formats.
/// Returns `DecodeError::CorruptedFile` if the data is damaged or truncated.
pub fn decode_image(bytes: &[u8]) -> Result<SourceImage, DecodeError> {
    let format = detect_format(bytes)?;

    let reader = ImageReader::with_format(Cursor::new(bytes), format);
    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    Ok(SourceImage::new(img))
}

/// Detect the container format of `bytes`.
///
/// # Errors
///
/// Returns `DecodeError::UnsupportedFormat` if the format is unknown or not
/// in [`SUPPORTED_FORMATS`].
pub fn detect_format(bytes: &[u8]) -> Result<ImageFormat, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::Io(e.to_string()))?;

    match reader.format() {
        Some(format) if SUPPORTED_FORMATS.contains(&format) => Ok(format),
        _ => Err(DecodeError::UnsupportedFormat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::ColorMode;
    use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

    fn encode_as(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, format).unwrap();
        out.into_inner()
    }

    fn sample_rgb() -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(8, 6, |x, y| {
            Rgb([(x * 30) as u8, (y * 40) as u8, 128])
        }))
    }

    /// 4x1 indexed PNG, palette [white, red], white fully transparent via tRNS.
    fn indexed_png_with_trns() -> Vec<u8> {
        let mut bytes = Vec::new();
        let mut encoder = png::Encoder::new(&mut bytes, 4, 1);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_palette(vec![255, 255, 255, 255, 0, 0]);
        encoder.set_trns(vec![0, 255]);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&[0, 1, 1, 0]).unwrap();
        writer.finish().unwrap();
        bytes
    }

    #[test]
    fn test_decode_png_rgba() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(5, 4, Rgba([10, 20, 30, 0])));
        let bytes = encode_as(&img, ImageFormat::Png);

        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.width(), 5);
        assert_eq!(decoded.height(), 4);
        assert_eq!(decoded.mode(), ColorMode::Rgba);
    }

    #[test]
    fn test_decode_png_gray_alpha() {
        let img = DynamicImage::ImageLumaA8(image::GrayAlphaImage::from_pixel(
            3,
            3,
            image::LumaA([200, 128]),
        ));
        let bytes = encode_as(&img, ImageFormat::Png);

        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.mode(), ColorMode::GrayAlpha);
    }

    #[test]
    fn test_decode_indexed_png_with_transparency() {
        let decoded = decode_image(&indexed_png_with_trns()).unwrap();

        assert_eq!((decoded.width(), decoded.height()), (4, 1));
        assert_eq!(decoded.mode(), ColorMode::Rgba);
    }

    #[test]
    fn test_decode_jpeg() {
        let bytes = encode_as(&sample_rgb(), ImageFormat::Jpeg);

        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.width(), 8);
        assert_eq!(decoded.height(), 6);
        assert_eq!(decoded.mode(), ColorMode::Rgb);
    }

    #[test]
    fn test_decode_webp() {
        let bytes = encode_as(&sample_rgb(), ImageFormat::WebP);

        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.width(), 8);
        assert_eq!(decoded.height(), 6);
    }

    #[test]
    fn test_decode_unknown_bytes() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::UnsupportedFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        let result = decode_image(&[]);
        assert!(matches!(result, Err(DecodeError::UnsupportedFormat)));
    }

    #[test]
    fn test_decode_rejects_bmp() {
        // BMP magic is recognized by the guesser but not an accepted input.
        let bytes = b"BM\x00\x00\x00\x00\x00\x00\x00\x00\x36\x00\x00\x00";
        let result = decode_image(bytes);
        assert!(matches!(result, Err(DecodeError::UnsupportedFormat)));
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = encode_as(&sample_rgb(), ImageFormat::Png);
        let truncated = &bytes[..bytes.len() / 2];

        let result = decode_image(truncated);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_detect_format() {
        let png = encode_as(&sample_rgb(), ImageFormat::Png);
        let jpeg = encode_as(&sample_rgb(), ImageFormat::Jpeg);

        assert_eq!(detect_format(&png).unwrap(), ImageFormat::Png);
        assert_eq!(detect_format(&jpeg).unwrap(), ImageFormat::Jpeg);
    }
}
