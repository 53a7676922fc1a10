//! Host runtime detection for Node.js

use super::version::is_supported_version_against;
use semver::Version;
use std::process::Command;

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

impl RuntimeInfo {
    /// Whether the detected runtime meets `minimum`.
    /// A missing runtime or an unreadable version is unsupported.
    pub fn is_supported(&self, minimum: &Version) -> bool {
        self.available
            && self
                .version
                .as_deref()
                .is_some_and(|v| is_supported_version_against(v, minimum))
    }
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    let output = Command::new("node").arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            tracing::debug!(%version, "detected node");
            RuntimeInfo {
                name: "Node.js",
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name: "Node.js",
            version: None,
            available: false,
        },
    }
}
