//! webfit Core - size-constrained WebP optimization
//!
//! This crate turns an uploaded PNG, JPEG or WebP into a WebP that is at most
//! 1440 pixels wide, fully opaque (transparency composited onto black), and
//! encoded at the highest quality that fits a byte budget.
//!
//! The pipeline is a pure function per image: [`optimize`] decodes, resizes,
//! flattens and searches, and returns an [`OptimizationResult`]. Batching,
//! progress reporting and archiving belong to the caller.
//!
//! ```ignore
//! use webfit_core::{optimize, OptimizeConfig};
//!
//! let bytes = std::fs::read("banner.png").unwrap();
//! let result = optimize(&bytes, "banner.png", &OptimizeConfig::default()).unwrap();
//! println!("{} | {} bytes | Q: {}", result.filename, result.size_bytes, result.quality);
//! ```

pub mod composite;
pub mod config;
pub mod decode;
pub mod encode;
pub mod optimize;
pub mod search;

pub use composite::flatten_onto_black;
pub use config::{ConfigError, OptimizeConfig, SearchStrategy};
pub use decode::{DecodeError, OpaqueImage, SourceImage};
pub use encode::EncodeError;
pub use optimize::{derive_output_filename, optimize, OptimizationResult, OptimizeError};
pub use search::{search_quality, SearchOutcome};
