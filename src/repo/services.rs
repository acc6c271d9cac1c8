// src/repo/services.rs

use std::fs;

use anyhow::Context;
use tracing::debug;

use crate::errors::{Result, RoutesplitError};
use crate::repo::paths::RepoPaths;

/// Enumerate the services in the repository.
///
/// A service is a subdirectory of `services/`; entries starting with `_` or
/// `.` are skipped. The result is sorted so presentation order is stable.
pub fn list_services(paths: &RepoPaths) -> Result<Vec<String>> {
    let dir = paths.services_dir();
    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(_) => return Ok(Vec::new()),
    };

    let mut services = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if name.starts_with('_') || name.starts_with('.') {
            continue;
        }
        services.push(name.to_string());
    }
    services.sort();
    Ok(services)
}

/// Primary host used for a targeted VERIFY check.
///
/// The first usable line of `dns_domains.txt` wins; `hosts.txt` is the
/// fallback. `None` means the service has no usable host and VERIFY skips it.
pub fn primary_host(paths: &RepoPaths, service: &str) -> Option<String> {
    first_host_line(&paths.dns_domains_file(service))
        .or_else(|| first_host_line(&paths.hosts_file(service)))
}

fn first_host_line(path: &std::path::Path) -> Option<String> {
    let text = fs::read_to_string(path).ok()?;
    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(token) = line.split([' ', '\t']).next() {
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }
    None
}

/// Normalize user input into a service name.
///
/// Accepts a bare domain or a URL; strips the scheme, any path, port and a
/// leading `www.`, lowercases, and then enforces the filesystem-safe
/// character allow-list `[a-z0-9.-]`. `None` means the input is unusable.
pub fn normalize_domain(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let without_scheme = match trimmed.find("://") {
        Some(idx) => &trimmed[idx + 3..],
        None => trimmed,
    };
    let host = without_scheme
        .split('/')
        .next()
        .unwrap_or_default()
        .split(':')
        .next()
        .unwrap_or_default();

    let mut value = host.to_lowercase();
    if let Some(stripped) = value.strip_prefix("www.") {
        value = stripped.to_string();
    }
    let value = value.trim_matches('.').to_string();
    if value.is_empty() {
        return None;
    }

    let allowed = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-';
    if !value.chars().all(allowed) {
        return None;
    }
    Some(value)
}

/// Create `services/<name>/` with seeded `hosts.txt` and `dns_domains.txt`.
///
/// Returns the created service name. The input goes through
/// [`normalize_domain`] first; an existing service directory is an error so
/// hand-edited host lists are never clobbered.
pub fn create_service(paths: &RepoPaths, raw_domain: &str) -> Result<String> {
    let Some(domain) = normalize_domain(raw_domain) else {
        return Err(RoutesplitError::InvalidServiceName(format!(
            "'{raw_domain}' is not a usable domain (expected something like example.com)"
        )));
    };

    let service_dir = paths.service_dir(&domain);
    if service_dir.exists() {
        return Err(RoutesplitError::RepoError(format!(
            "service '{domain}' already exists"
        )));
    }

    fs::create_dir_all(&service_dir)
        .with_context(|| format!("creating service dir {}", service_dir.display()))?;

    let mut hosts = vec!["# core".to_string(), domain.clone()];
    let www = format!("www.{domain}");
    if www != domain {
        hosts.push(www);
    }
    let hosts_text = hosts.join("\n") + "\n";
    fs::write(paths.hosts_file(&domain), hosts_text)
        .with_context(|| format!("writing hosts.txt for '{domain}'"))?;

    let dns_text = format!("{domain}\n");
    fs::write(paths.dns_domains_file(&domain), dns_text)
        .with_context(|| format!("writing dns_domains.txt for '{domain}'"))?;

    debug!(service = %domain, "service created");
    Ok(domain)
}
