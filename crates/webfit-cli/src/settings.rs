//! Loading the optimizer config from a JSON file plus command-line overrides.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use webfit_core::{ConfigError, OptimizeConfig, SearchStrategy};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// Values given on the command line; `None` keeps the file or default value.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub target_width: Option<u32>,
    pub budget_kb: Option<usize>,
    pub effort: Option<u8>,
    pub bisect: bool,
}

/// Build the effective config: defaults, then the JSON file, then overrides.
///
/// The result is validated before it is returned.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: &Overrides,
) -> Result<OptimizeConfig, SettingsError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => OptimizeConfig::default(),
    };

    if let Some(width) = overrides.target_width {
        config.target_width = width;
    }
    if let Some(kb) = overrides.budget_kb {
        config.budget_bytes = kb.saturating_mul(1024);
    }
    if let Some(effort) = overrides.effort {
        config.effort = effort;
    }
    if overrides.bisect {
        config.strategy = SearchStrategy::Bisect;
    }

    config.validate()?;
    Ok(config)
}

/// Read a (possibly partial) JSON config file.
pub fn load_config(path: &Path) -> Result<OptimizeConfig, SettingsError> {
    let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
