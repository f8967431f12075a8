//! Image decoding and resizing for webfit.
//!
//! This module provides functionality for:
//! - Decoding PNG, JPEG and WebP uploads into a [`SourceImage`]
//! - Downscaling to a maximum width without ever upscaling
//!
//! # Architecture
//!
//! Decoded images keep their native channel layout (including alpha) until
//! the compositor flattens them. All operations are synchronous and
//! single-threaded, and never mutate their input.
//!
//! # Examples
//!
//! ```ignore
//! use webfit_core::decode::{decode_image, resize_to_width};
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! let image = resize_to_width(&image, 1440).unwrap();
//! println!("Now {}x{}", image.width(), image.height());
//! ```

mod reader;
mod resize;
mod types;

pub use reader::{decode_image, detect_format, SUPPORTED_FORMATS};
pub use resize::{calculate_width_constrained_dimensions, resize, resize_to_width};
pub use types::{ColorMode, DecodeError, OpaqueImage, SourceImage};
