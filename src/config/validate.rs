// src/config/validate.rs

use crate::config::model::{RawSettings, Settings, DEFAULT_PATH_ENV, DEFAULT_TIMEOUT_SECS};
use crate::errors::{Result, RoutesplitError};
use crate::types::AuthMode;

impl TryFrom<RawSettings> for Settings {
    type Error = RoutesplitError;

    fn try_from(raw: RawSettings) -> std::result::Result<Self, Self::Error> {
        let auth_mode = parse_auth_mode(raw.auth_mode.as_deref())?;
        let timeout_secs = validate_timeout(raw.timeout_secs)?;
        let path_env = validate_path_env(raw.path_env)?;
        Ok(Settings::new_unchecked(
            raw.repo,
            auth_mode,
            timeout_secs,
            path_env,
        ))
    }
}

fn parse_auth_mode(raw: Option<&str>) -> Result<Option<AuthMode>> {
    match raw {
        None => Ok(None),
        Some(s) => s
            .parse::<AuthMode>()
            .map(Some)
            .map_err(RoutesplitError::ConfigError),
    }
}

fn validate_timeout(raw: Option<u64>) -> Result<u64> {
    match raw {
        None => Ok(DEFAULT_TIMEOUT_SECS),
        Some(0) => Err(RoutesplitError::ConfigError(
            "timeout_secs must be >= 1 (got 0)".to_string(),
        )),
        Some(secs) => Ok(secs),
    }
}

fn validate_path_env(raw: Option<String>) -> Result<String> {
    match raw {
        None => Ok(DEFAULT_PATH_ENV.to_string()),
        Some(p) if p.trim().is_empty() => Err(RoutesplitError::ConfigError(
            "path_env must not be empty".to_string(),
        )),
        Some(p) => Ok(p),
    }
}
