//! Compression budget and pipeline configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default maximum output width in pixels.
pub const DEFAULT_TARGET_WIDTH: u32 = 1440;
/// Default byte budget: 95 KiB, a safety margin under 100 KiB.
pub const DEFAULT_BUDGET_BYTES: usize = 95 * 1024;
/// Default first quality tried.
pub const DEFAULT_START_QUALITY: u8 = 95;
/// Default floor; the search never encodes at or below it.
pub const DEFAULT_FLOOR_QUALITY: u8 = 5;
/// Default distance between two attempted qualities.
pub const DEFAULT_QUALITY_STEP: u8 = 2;
/// Slowest and most thorough libwebp method.
pub const MAX_EFFORT: u8 = 6;

/// Errors raised for invalid configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A target width or height of zero was requested.
    #[error("Target dimensions must be non-zero")]
    ZeroDimension,

    /// The byte budget is zero.
    #[error("Byte budget must be non-zero")]
    ZeroBudget,

    /// The quality step is zero, so the search would never advance.
    #[error("Quality step must be non-zero")]
    ZeroStep,

    /// A quality value lies outside 0-100.
    #[error("Quality {0} is out of range (0-100)")]
    QualityOutOfRange(u8),

    /// The floor is not strictly below the start quality.
    #[error("Floor quality ({floor}) must be below start quality ({start})")]
    FloorNotBelowStart { floor: u8, start: u8 },

    /// The encoder effort lies outside 0-6.
    #[error("Effort {0} is out of range (0-6)")]
    EffortOutOfRange(u8),

    /// No quality lies strictly between the floor and the start.
    #[error("Quality ladder is empty")]
    EmptyLadder,
}

/// How the quality ladder is searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    /// Walk the ladder from the top and stop at the first fit.
    #[default]
    Linear,
    /// Binary search over the ladder, assuming size grows with quality.
    Bisect,
}

/// Compression budget and pipeline settings.
///
/// Every field has a default, so a partial JSON document deserializes into a
/// complete config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizeConfig {
    /// Maximum output width in pixels (never upscales).
    pub target_width: u32,
    /// Maximum accepted output size in bytes.
    pub budget_bytes: usize,
    /// First quality attempted (0-100).
    pub start_quality: u8,
    /// Quality at or below which the search stops.
    pub floor_quality: u8,
    /// Quality decrement between attempts.
    pub step: u8,
    /// Encoder effort (libwebp method, 0-6).
    pub effort: u8,
    /// Ladder search order.
    pub strategy: SearchStrategy,
}

impl Default for OptimizeConfig {
    fn default() -> Self {
        Self {
            target_width: DEFAULT_TARGET_WIDTH,
            budget_bytes: DEFAULT_BUDGET_BYTES,
            start_quality: DEFAULT_START_QUALITY,
            floor_quality: DEFAULT_FLOOR_QUALITY,
            step: DEFAULT_QUALITY_STEP,
            effort: MAX_EFFORT,
            strategy: SearchStrategy::Linear,
        }
    }
}

impl OptimizeConfig {
    /// Create a config with the default budget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_width == 0 {
            return Err(ConfigError::ZeroDimension);
        }
        if self.budget_bytes == 0 {
            return Err(ConfigError::ZeroBudget);
        }
        if self.step == 0 {
            return Err(ConfigError::ZeroStep);
        }
        if self.start_quality > 100 {
            return Err(ConfigError::QualityOutOfRange(self.start_quality));
        }
        if self.floor_quality >= self.start_quality {
            return Err(ConfigError::FloorNotBelowStart {
                floor: self.floor_quality,
                start: self.start_quality,
            });
        }
        if self.effort > MAX_EFFORT {
            return Err(ConfigError::EffortOutOfRange(self.effort));
        }
        Ok(())
    }

    /// Qualities the search may try, highest first.
    ///
    /// Starts at `start_quality` and descends by `step` while strictly above
    /// `floor_quality`. Empty only for an invalid config.
    pub fn ladder(&self) -> Vec<u8> {
        if self.step == 0 {
            return Vec::new();
        }
        let floor = self.floor_quality as i32;
        let step = self.step as i32;
        let mut qualities = Vec::new();
        let mut q = self.start_quality as i32;
        while q > floor {
            qualities.push(q as u8);
            q -= step;
        }
        qualities
    }
}
