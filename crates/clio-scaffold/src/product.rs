//! Product configuration trait for CLI binaries
//!
//! The scaffolding pipeline is product-agnostic. The binary supplies the
//! template namespace, the branch templates are taken from, where archives
//! are downloaded from and the guidance printed once a project exists.

use crate::runtime::version::MINIMUM_SUPPORTED_VERSION;
use semver::Version;
use std::path::Path;

/// Configuration trait for the product shipping the `new` command
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Organisation owning the `template-{target}` repositories
    fn template_namespace(&self) -> &'static str;

    /// Branch every template (and default dependency) is taken from
    fn template_branch(&self) -> &'static str;

    /// Default host serving branch archives
    fn default_archive_host(&self) -> &'static str;

    /// Environment variable name for overriding the archive host
    fn archive_host_env(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path) -> Vec<String>;

    /// Oldest host runtime the toolchain supports
    fn minimum_runtime_version(&self) -> Version {
        MINIMUM_SUPPORTED_VERSION
    }

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}
