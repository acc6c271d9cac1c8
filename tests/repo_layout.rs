//! Repository discovery, service enumeration and service creation.

use std::fs;

use routesplit::repo::{
    create_service, discover_root, list_services, normalize_domain, primary_host, RepoPaths,
};
use routesplit::types::ActionKind;
use tempfile::TempDir;

/// Minimal valid repository checkout.
fn fake_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("scripts")).unwrap();
    fs::create_dir_all(dir.path().join("services")).unwrap();
    for script in [
        "splitroute_on.sh",
        "splitroute_off.sh",
        "splitroute_check.sh",
    ] {
        fs::write(dir.path().join("scripts").join(script), "#!/bin/sh\n").unwrap();
    }
    dir
}

fn add_service_dir(repo: &TempDir, name: &str) {
    fs::create_dir_all(repo.path().join("services").join(name)).unwrap();
}

#[test]
fn explicit_root_must_be_a_repo() {
    let repo = fake_repo();
    assert!(discover_root(Some(repo.path()), None).is_ok());

    let not_a_repo = TempDir::new().unwrap();
    let err = discover_root(Some(not_a_repo.path()), None).unwrap_err();
    assert!(err.to_string().contains("splitroute_on.sh"), "got: {err}");
}

#[test]
fn settings_root_is_used_when_no_flag_is_given() {
    let repo = fake_repo();
    let paths = discover_root(None, Some(repo.path())).unwrap();
    assert_eq!(paths.root(), repo.path());
}

#[test]
fn script_selection_per_action() {
    let paths = RepoPaths::new("/r");
    assert!(paths
        .script_for(ActionKind::On)
        .ends_with("scripts/splitroute_on.sh"));
    assert!(paths
        .script_for(ActionKind::Refresh)
        .ends_with("scripts/splitroute_on.sh"));
    assert!(paths
        .script_for(ActionKind::Off)
        .ends_with("scripts/splitroute_off.sh"));
    assert!(paths
        .script_for(ActionKind::Status)
        .ends_with("scripts/splitroute_check.sh"));
    assert!(paths
        .script_for(ActionKind::Verify)
        .ends_with("scripts/splitroute_check.sh"));
}

#[test]
fn services_are_sorted_and_underscored_entries_skipped() {
    let repo = fake_repo();
    add_service_dir(&repo, "zeta.com");
    add_service_dir(&repo, "alpha.com");
    add_service_dir(&repo, "_template");
    // A stray file in services/ is not a service.
    fs::write(repo.path().join("services/README.md"), "notes\n").unwrap();

    let paths = RepoPaths::new(repo.path());
    let services = list_services(&paths).unwrap();
    assert_eq!(services, vec!["alpha.com".to_string(), "zeta.com".to_string()]);
}

#[test]
fn missing_services_dir_means_no_services() {
    let dir = TempDir::new().unwrap();
    let paths = RepoPaths::new(dir.path());
    assert!(list_services(&paths).unwrap().is_empty());
}

#[test]
fn primary_host_prefers_dns_domains_and_skips_comments() {
    let repo = fake_repo();
    add_service_dir(&repo, "svc.com");
    let paths = RepoPaths::new(repo.path());

    fs::write(
        paths.dns_domains_file("svc.com"),
        "# comment\n\nsvc.com extra tokens\n",
    )
    .unwrap();
    fs::write(paths.hosts_file("svc.com"), "fallback.com\n").unwrap();
    assert_eq!(primary_host(&paths, "svc.com").as_deref(), Some("svc.com"));
}

#[test]
fn primary_host_falls_back_to_hosts_txt() {
    let repo = fake_repo();
    add_service_dir(&repo, "svc.com");
    let paths = RepoPaths::new(repo.path());

    fs::write(paths.hosts_file("svc.com"), "# core\nfallback.com\n").unwrap();
    assert_eq!(
        primary_host(&paths, "svc.com").as_deref(),
        Some("fallback.com")
    );

    // No usable line anywhere.
    fs::write(paths.hosts_file("svc.com"), "# only comments\n").unwrap();
    assert_eq!(primary_host(&paths, "svc.com"), None);
}

#[test]
fn create_service_seeds_hosts_and_dns_files() {
    let repo = fake_repo();
    let paths = RepoPaths::new(repo.path());

    let name = create_service(&paths, "https://www.Example.com/path").unwrap();
    assert_eq!(name, "example.com");

    let hosts = fs::read_to_string(paths.hosts_file("example.com")).unwrap();
    assert_eq!(hosts, "# core\nexample.com\nwww.example.com\n");

    let dns = fs::read_to_string(paths.dns_domains_file("example.com")).unwrap();
    assert_eq!(dns, "example.com\n");

    // Second creation must not clobber the existing service.
    let err = create_service(&paths, "example.com").unwrap_err();
    assert!(err.to_string().contains("already exists"), "got: {err}");
}

#[test]
fn normalize_domain_accepts_urls_and_rejects_garbage() {
    assert_eq!(normalize_domain("Example.com").as_deref(), Some("example.com"));
    assert_eq!(
        normalize_domain("  https://www.example.com/a/b?q=1  ").as_deref(),
        Some("example.com")
    );
    assert_eq!(
        normalize_domain("http://example.com:8443").as_deref(),
        Some("example.com")
    );
    assert_eq!(normalize_domain("www.example.com.").as_deref(), Some("example.com"));

    assert_eq!(normalize_domain(""), None);
    assert_eq!(normalize_domain("   "), None);
    assert_eq!(normalize_domain("exa mple.com"), None);
    assert_eq!(normalize_domain("bad_underscore.com"), None);
    assert_eq!(normalize_domain("..."), None);
}
