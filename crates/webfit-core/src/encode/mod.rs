//! Image encoding for webfit.
//!
//! This module provides functionality for:
//! - Encoding opaque RGB images to lossy WebP with a fixed effort level
//!
//! # Examples
//!
//! ```ignore
//! use webfit_core::encode::encode_webp;
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
//! let webp_bytes = encode_webp(&pixels, 100, 100, 90, 6).unwrap();
//! println!("Encoded {} bytes", webp_bytes.len());
//! ```

mod webp;

pub use self::webp::{encode_opaque, encode_webp, is_webp, EncodeError, MAX_WEBP_DIMENSION};
