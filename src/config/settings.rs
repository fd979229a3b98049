//! Config file discovery and persistence
//!
//! Handles finding, reading and writing `odoo-boost.json`.

use std::fs::{self, File};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use crate::core::{BoostError, BoostResult};

use super::schema::BoostConfig;

/// Name of the configuration file at the project root
pub const CONFIG_FILENAME: &str = "odoo-boost.json";

/// Walk up from `start` looking for `odoo-boost.json`
///
/// Returns `None` once the filesystem root is reached without a match.
pub fn find_config_path(start: &Path) -> Option<PathBuf> {
    let mut current = start
        .canonicalize()
        .unwrap_or_else(|_| start.to_path_buf());

    loop {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Load the config from an explicit path, or by searching upward from the
/// current working directory
pub fn load_config(path: Option<&Path>) -> BoostResult<(BoostConfig, PathBuf)> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let cwd = std::env::current_dir()?;
            find_config_path(&cwd).ok_or_else(|| {
                BoostError::config(format!(
                    "No {} found. Run 'odoo-boost install' first.",
                    CONFIG_FILENAME
                ))
            })?
        }
    };

    if !path.is_file() {
        return Err(BoostError::config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    tracing::debug!("[Config] Loading {}", path.display());

    let file = File::open(&path)?;
    let reader = BufReader::new(file);
    let config: BoostConfig = serde_json::from_reader(reader)?;
    config.validate()?;

    Ok((config, path))
}

/// Persist the config to `path` (defaults to `./odoo-boost.json`)
///
/// The file is written pretty-printed with a trailing newline.
pub fn save_config(config: &BoostConfig, path: Option<&Path>) -> BoostResult<PathBuf> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => std::env::current_dir()?.join(CONFIG_FILENAME),
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut text = serde_json::to_string_pretty(config)?;
    text.push('\n');

    let mut file = File::create(&path)?;
    file.write_all(text.as_bytes())?;

    tracing::debug!("[Config] Saved {}", path.display());
    Ok(path)
}

/// Resolve the project root a loaded config refers to
///
/// Relative `project_path` values are taken relative to the directory that
/// holds the config file, so commands behave the same from any subdirectory.
pub fn resolve_project_path(config: &BoostConfig, config_path: &Path) -> PathBuf {
    let project = Path::new(&config.project_path);
    if project.is_absolute() {
        return project.to_path_buf();
    }

    let base = config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    if config.project_path == "." {
        base
    } else {
        base.join(project)
    }
}
