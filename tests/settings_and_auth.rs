//! Settings parsing/validation and default auth-mode detection.

use std::fs;

use routesplit::config::{load_settings, Settings, DEFAULT_PATH_ENV, DEFAULT_TIMEOUT_SECS};
use routesplit::config::model::RawSettings;
use routesplit::exec::default_auth_mode;
use routesplit::types::AuthMode;
use tempfile::TempDir;

#[test]
fn defaults_apply_when_no_file_is_given() {
    let raw = RawSettings::default();
    let settings = Settings::try_from(raw).unwrap();
    assert_eq!(settings.repo, None);
    assert_eq!(settings.auth_mode, None);
    assert_eq!(settings.timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert_eq!(settings.path_env, DEFAULT_PATH_ENV);
}

#[test]
fn full_settings_file_parses() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Routesplit.toml");
    fs::write(
        &path,
        r#"
repo = "/opt/splitroute"
auth_mode = "password_prompt"
timeout_secs = 30
path_env = "/usr/bin:/bin"
"#,
    )
    .unwrap();

    let settings = load_settings(Some(path.as_path())).unwrap();
    assert_eq!(
        settings.repo.as_deref(),
        Some(std::path::Path::new("/opt/splitroute"))
    );
    assert_eq!(settings.auth_mode, Some(AuthMode::PasswordPrompt));
    assert_eq!(settings.timeout_secs, 30);
    assert_eq!(settings.path_env, "/usr/bin:/bin");
}

#[test]
fn unknown_auth_mode_is_rejected() {
    let raw = RawSettings {
        auth_mode: Some("fingerprint".to_string()),
        ..RawSettings::default()
    };
    let err = Settings::try_from(raw).unwrap_err();
    assert!(err.to_string().contains("invalid auth mode"), "got: {err}");
}

#[test]
fn zero_timeout_is_rejected() {
    let raw = RawSettings {
        timeout_secs: Some(0),
        ..RawSettings::default()
    };
    let err = Settings::try_from(raw).unwrap_err();
    assert!(err.to_string().contains("timeout_secs"), "got: {err}");
}

#[test]
fn missing_explicit_settings_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.toml");
    assert!(load_settings(Some(path.as_path())).is_err());
}

#[test]
fn auth_mode_parses_from_strings() {
    assert_eq!(
        "touchid_sudo".parse::<AuthMode>().unwrap(),
        AuthMode::TouchIdSudo
    );
    assert_eq!(
        " Password_Prompt ".parse::<AuthMode>().unwrap(),
        AuthMode::PasswordPrompt
    );
    assert!("dialog".parse::<AuthMode>().is_err());
}

#[test]
fn pam_tid_on_an_active_line_selects_touch_id_sudo() {
    let dir = TempDir::new().unwrap();
    let pam = dir.path().join("sudo");
    fs::write(
        &pam,
        "# sudo: auth account password session\nauth sufficient pam_tid.so\nauth required pam_opendirectory.so\n",
    )
    .unwrap();
    assert_eq!(default_auth_mode(&pam), AuthMode::TouchIdSudo);
}

#[test]
fn commented_pam_tid_does_not_count() {
    let dir = TempDir::new().unwrap();
    let pam = dir.path().join("sudo");
    fs::write(
        &pam,
        "# auth sufficient pam_tid.so\nauth required pam_opendirectory.so\n",
    )
    .unwrap();
    assert_eq!(default_auth_mode(&pam), AuthMode::PasswordPrompt);
}

#[test]
fn unreadable_pam_file_falls_back_to_password_prompt() {
    assert_eq!(
        default_auth_mode("/definitely/not/a/pam/file"),
        AuthMode::PasswordPrompt
    );
}
