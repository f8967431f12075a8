//! The caller loop: optimize each input in order and archive the results.
//!
//! A failing item is recorded and skipped; only an archive write failure
//! stops the batch, since the container itself is then unusable.

use std::fs;
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use webfit_core::{optimize, OptimizationResult, OptimizeConfig, OptimizeError};

use crate::archive::{ArchiveError, ArchiveWriter};
use crate::inputs::display_name;
use crate::report::{BatchReport, ItemOutcome};

/// Why a single item failed.
#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Cannot read file: {0}")]
    Read(#[from] std::io::Error),

    #[error(transparent)]
    Optimize(#[from] OptimizeError),
}

/// Progress notifications emitted around each item.
#[derive(Debug)]
pub enum ProgressEvent<'a> {
    /// Item `index` (0-based) of `total` is about to be processed.
    Started {
        index: usize,
        total: usize,
        source: &'a str,
    },
    /// Item `index` of `total` is done.
    Finished {
        index: usize,
        total: usize,
        outcome: &'a ItemOutcome,
    },
}

/// Optimize every input sequentially and add each result to `archive`.
///
/// # Errors
///
/// Returns `ArchiveError` only when writing to the archive fails; per-item
/// failures end up in the report.
pub fn run_batch<W, P>(
    inputs: &[PathBuf],
    config: &OptimizeConfig,
    archive: &mut ArchiveWriter<W>,
    mut on_progress: P,
) -> Result<BatchReport, ArchiveError>
where
    W: Write + Seek,
    P: FnMut(ProgressEvent<'_>),
{
    let total = inputs.len();
    let mut report = BatchReport::new(config.budget_bytes);

    for (index, path) in inputs.iter().enumerate() {
        let source = display_name(path);
        on_progress(ProgressEvent::Started {
            index,
            total,
            source: &source,
        });

        let outcome = match process_file(path, &source, config) {
            Ok(result) => {
                let entry = archive.add(&result.filename, &result.bytes)?;
                ItemOutcome::optimized(source, entry, &result)
            }
            Err(error) => ItemOutcome::Failed {
                source,
                error: error.to_string(),
            },
        };

        on_progress(ProgressEvent::Finished {
            index,
            total,
            outcome: &outcome,
        });
        report.push(outcome);
    }

    Ok(report)
}

fn process_file(
    path: &Path,
    name: &str,
    config: &OptimizeConfig,
) -> Result<OptimizationResult, ItemError> {
    let bytes = fs::read(path)?;
    Ok(optimize(&bytes, name, config)?)
}
