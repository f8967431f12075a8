//! Collection of input files from the command line.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Extensions picked up when scanning a directory.
pub const ACCEPTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Input not found: {0}")]
    NotFound(PathBuf),

    #[error("Cannot read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Returns true if the path ends in one of [`ACCEPTED_EXTENSIONS`] (any case).
pub fn has_accepted_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
        .unwrap_or(false)
}

/// Expand `paths` into a sorted, de-duplicated list of files.
///
/// Files are taken as given; the decoder decides whether they are images.
/// Directories contribute the files directly inside them whose extension is
/// accepted. Subdirectories are not descended into.
pub fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>, InputError> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            let entries = fs::read_dir(path).map_err(|source| InputError::ReadDir {
                path: path.clone(),
                source,
            })?;
            for entry in entries {
                let entry = entry.map_err(|source| InputError::ReadDir {
                    path: path.clone(),
                    source,
                })?;
                let file = entry.path();
                if file.is_file() && has_accepted_extension(&file) {
                    files.push(file);
                }
            }
        } else {
            return Err(InputError::NotFound(path.clone()));
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// Display name of an input: its file name, or the whole path as a fallback.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
