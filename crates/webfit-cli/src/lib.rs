//! webfit CLI - batch front-end for webfit-core
//!
//! Collects input images, optimizes them one at a time, and packages the
//! results into a single deflate-compressed zip archive.
//!
//! # Module Structure
//!
//! - `inputs` - Expanding files and directories into the list to process
//! - `settings` - JSON config file plus command-line overrides
//! - `batch` - The sequential caller loop with progress callbacks
//! - `archive` - Zip writer with unique entry names
//! - `report` - Per-item outcomes and summary rendering
//! - `logging` - tracing subscriber setup

pub mod archive;
pub mod batch;
pub mod inputs;
pub mod logging;
pub mod report;
pub mod settings;

pub use archive::{discard_archive, ArchiveError, ArchiveWriter};
pub use batch::{run_batch, ItemError, ProgressEvent};
pub use inputs::{collect_inputs, InputError};
pub use report::{BatchReport, ItemOutcome};
pub use settings::{resolve_config, Overrides, SettingsError};
