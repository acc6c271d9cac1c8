// src/repo/paths.rs

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{Result, RoutesplitError};
use crate::types::ActionKind;

/// Maximum number of parent directories inspected when searching upward for
/// a repository root.
const UPWARD_SEARCH_DEPTH: usize = 8;

/// Well-known paths inside a splitroute repository checkout.
#[derive(Debug, Clone)]
pub struct RepoPaths {
    root: PathBuf,
}

impl RepoPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn scripts_dir(&self) -> PathBuf {
        self.root.join("scripts")
    }

    pub fn services_dir(&self) -> PathBuf {
        self.root.join("services")
    }

    pub fn on_script(&self) -> PathBuf {
        self.scripts_dir().join("splitroute_on.sh")
    }

    pub fn off_script(&self) -> PathBuf {
        self.scripts_dir().join("splitroute_off.sh")
    }

    pub fn check_script(&self) -> PathBuf {
        self.scripts_dir().join("splitroute_check.sh")
    }

    /// Script invoked for a given action. REFRESH reuses the ON script.
    pub fn script_for(&self, action: ActionKind) -> PathBuf {
        match action {
            ActionKind::On | ActionKind::Refresh => self.on_script(),
            ActionKind::Off => self.off_script(),
            ActionKind::Status | ActionKind::Verify => self.check_script(),
        }
    }

    pub fn service_dir(&self, service: &str) -> PathBuf {
        self.services_dir().join(service)
    }

    pub fn hosts_file(&self, service: &str) -> PathBuf {
        self.service_dir(service).join("hosts.txt")
    }

    pub fn dns_domains_file(&self, service: &str) -> PathBuf {
        self.service_dir(service).join("dns_domains.txt")
    }

    /// A directory counts as a repository root when the ON script is present.
    pub fn is_valid_root(path: &Path) -> bool {
        path.join("scripts/splitroute_on.sh").is_file()
    }
}

/// Resolve the repository root.
///
/// Order:
/// 1. explicit `--repo` flag
/// 2. `ROUTESPLIT_REPO` environment variable
/// 3. `repo` key of the settings file
/// 4. upward search from the current directory (up to 8 levels)
///
/// An explicitly given root that does not look like a repository is an error
/// rather than a fallthrough, so a typo'd path is not silently ignored.
pub fn discover_root(
    cli_repo: Option<&Path>,
    settings_repo: Option<&Path>,
) -> Result<RepoPaths> {
    if let Some(root) = cli_repo {
        return validated(root, "--repo");
    }

    if let Ok(env_root) = std::env::var("ROUTESPLIT_REPO") {
        if !env_root.is_empty() {
            return validated(Path::new(&env_root), "ROUTESPLIT_REPO");
        }
    }

    if let Some(root) = settings_repo {
        return validated(root, "config file");
    }

    let cwd = std::env::current_dir()?;
    let mut candidate = cwd.as_path();
    for _ in 0..UPWARD_SEARCH_DEPTH {
        if RepoPaths::is_valid_root(candidate) {
            debug!(root = %candidate.display(), "repository root found by upward search");
            return Ok(RepoPaths::new(candidate));
        }
        match candidate.parent() {
            Some(parent) => candidate = parent,
            None => break,
        }
    }

    Err(RoutesplitError::RepoError(
        "no splitroute repository found; pass --repo, set ROUTESPLIT_REPO, or run from inside a checkout"
            .to_string(),
    ))
}

fn validated(root: &Path, source: &str) -> Result<RepoPaths> {
    if RepoPaths::is_valid_root(root) {
        debug!(root = %root.display(), source, "repository root");
        Ok(RepoPaths::new(root))
    } else {
        Err(RoutesplitError::RepoError(format!(
            "'{}' (from {source}) does not look like a splitroute repo (missing scripts/splitroute_on.sh)",
            root.display()
        )))
    }
}
