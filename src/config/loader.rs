// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::{RawSettings, Settings};
use crate::errors::Result;

/// Load settings from a given path and return the raw `RawSettings`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_settings`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawSettings> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let settings: RawSettings = toml::from_str(&contents)?;

    Ok(settings)
}

/// Load and validate settings.
///
/// - With an explicit `path`, the file must exist and parse.
/// - With no explicit path, `Routesplit.toml` in the current working
///   directory is used if present; otherwise defaults apply.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let raw = match path {
        Some(p) => load_from_path(p)?,
        None => {
            let default = default_config_path();
            if default.is_file() {
                load_from_path(&default)?
            } else {
                RawSettings::default()
            }
        }
    };
    Settings::try_from(raw)
}

/// Helper to resolve a default config path.
///
/// Currently this just returns `Routesplit.toml` in the current working
/// directory, but this function exists so you can later:
///
/// - Look for multiple default locations.
/// - Support XDG-style per-user config discovery.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Routesplit.toml")
}
