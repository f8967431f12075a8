//! The per-image pipeline: decode, downscale, flatten, then fit under budget.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::composite::flatten_onto_black;
use crate::config::{ConfigError, OptimizeConfig};
use crate::decode::{decode_image, resize_to_width, DecodeError};
use crate::encode::{encode_opaque, EncodeError};
use crate::search::search_quality;

/// Extension given to every output file.
pub const OUTPUT_EXTENSION: &str = "webp";

/// Errors that abort the optimization of a single image.
#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Output of [`optimize`] for one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptimizationResult {
    /// Encoded WebP bytes.
    #[serde(skip_serializing)]
    pub bytes: Vec<u8>,
    /// Original filename with its extension replaced by `.webp`.
    pub filename: String,
    /// Length of `bytes`.
    pub size_bytes: usize,
    /// Quality the bytes were encoded at.
    pub quality: u8,
    /// Output width in pixels.
    pub final_width: u32,
    /// Output height in pixels.
    pub final_height: u32,
    /// False when the quality floor was reached and `size_bytes` exceeds the budget.
    pub budget_met: bool,
    /// Number of encoder invocations the search needed.
    pub attempts: u32,
}

/// Optimize one uploaded image.
///
/// Downscales to at most `config.target_width` pixels wide (Lanczos3, never
/// upscaling), composites any transparency onto black, and searches the
/// quality ladder for the highest quality whose WebP output fits
/// `config.budget_bytes`.
///
/// Reaching the quality floor without fitting is not an error: the result
/// carries the lowest-quality encoding with `budget_met == false`.
///
/// # Errors
///
/// Returns `OptimizeError::Config` for an invalid config (checked before the
/// bytes are touched), `OptimizeError::Decode` for unreadable input and
/// `OptimizeError::Encode` if libwebp rejects the image.
pub fn optimize(
    bytes: &[u8],
    original_filename: &str,
    config: &OptimizeConfig,
) -> Result<OptimizationResult, OptimizeError> {
    config.validate()?;

    let source = decode_image(bytes)?;
    let (original_width, original_height) = (source.width(), source.height());

    let resized = if source.width() > config.target_width {
        resize_to_width(&source, config.target_width)?
    } else {
        source
    };

    let opaque = flatten_onto_black(resized);
    let (final_width, final_height) = (opaque.width, opaque.height);

    let ladder = config.ladder();
    let outcome = search_quality(&ladder, config.budget_bytes, config.strategy, |quality| {
        encode_opaque(&opaque, quality, config.effort).map_err(OptimizeError::from)
    })?;

    let filename = derive_output_filename(original_filename);
    debug!(
        filename = %filename,
        original_width,
        original_height,
        final_width,
        final_height,
        quality = outcome.quality,
        size = outcome.bytes.len(),
        attempts = outcome.attempts,
        "Optimized image"
    );

    Ok(OptimizationResult {
        size_bytes: outcome.bytes.len(),
        bytes: outcome.bytes,
        filename,
        quality: outcome.quality,
        final_width,
        final_height,
        budget_met: outcome.budget_met,
        attempts: outcome.attempts,
    })
}

/// Replace the last extension of `original` with `.webp`.
///
/// Everything after the final `.` is dropped; a name without a dot keeps its
/// full text.
pub fn derive_output_filename(original: &str) -> String {
    let stem = match original.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => original,
    };
    format!("{stem}.{OUTPUT_EXTENSION}")
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Derived names always end in .webp and keep everything before the last dot.
        #[test]
        fn prop_filename_keeps_stem(stem in "[a-zA-Z0-9_ -]{1,20}", ext in "[a-z]{1,4}") {
            let name = format!("{stem}.{ext}");
            prop_assert_eq!(derive_output_filename(&name), format!("{stem}.webp"));
        }

        /// Property: Names without a dot are kept whole.
        #[test]
        fn prop_filename_without_dot(stem in "[a-zA-Z0-9_-]{1,20}") {
            prop_assert_eq!(derive_output_filename(&stem), format!("{stem}.webp"));
        }
    }
}
