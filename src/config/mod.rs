// src/config/mod.rs

//! Optional TOML settings for `routesplit`.
//!
//! - [`model`] declares the raw file shape and the validated [`Settings`].
//! - [`loader`] reads the file (or falls back to defaults).
//! - [`validate`] converts `RawSettings` into `Settings`.
//!
//! CLI flags always override file values; the merge happens in `lib.rs`.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_settings};
pub use model::{RawSettings, Settings, DEFAULT_PATH_ENV, DEFAULT_TIMEOUT_SECS};
