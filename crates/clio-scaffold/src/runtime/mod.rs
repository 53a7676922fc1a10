//! Host runtime detection and version compatibility
//!
//! This module provides:
//! - Node.js detection on the host
//! - The pure `major.minor` support check used to warn about old runtimes

pub mod check;
pub mod version;

pub use check::{check_node, RuntimeInfo};
pub use version::{
    is_supported_version, is_supported_version_against, VersionSpec, MINIMUM_SUPPORTED_VERSION,
};
