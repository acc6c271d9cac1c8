// src/repo/mod.rs

//! The splitroute repository checkout this tool drives.
//!
//! The repository is external state: a directory with `scripts/` holding the
//! privileged shell scripts and `services/` holding one subdirectory per
//! service. This module knows the layout and nothing about execution.
//!
//! - [`paths`] derives well-known paths from a root and discovers the root.
//! - [`services`] enumerates services, resolves primary hosts for VERIFY and
//!   creates new service directories.

pub mod paths;
pub mod services;

pub use paths::{discover_root, RepoPaths};
pub use services::{create_service, list_services, normalize_domain, primary_host};
