//! Error taxonomy for the scaffolding pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Result type returned by every pipeline stage
pub type ScaffoldResult<T> = std::result::Result<T, ScaffoldError>;

/// Everything that can stop `clio new`
///
/// Precondition failures are detected before any side effect. Retrieval
/// failures are detected before the repository is bootstrapped.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("A project name is required.")]
    MissingProjectName,

    #[error("Invalid project name '{name}': it must be a single directory name.")]
    InvalidProjectName { name: String },

    #[error("New command only supports \"browser\" or \"node\" targets (got \"{target}\").")]
    UnsupportedTarget { target: String },

    #[error("Git is required to create a new Clio project ({program} could not be started).")]
    MissingVersionControl { program: String },

    #[error("Template {template} was not found.")]
    TemplateNotFound { template: String },

    #[error("Failed to download template {template}: {reason}")]
    NetworkFailure { template: String, reason: String },

    #[error("Failed to read local template {template}: {reason}")]
    TemplateReadFailure { template: String, reason: String },

    #[error("Failed to write {}: {source}", path.display())]
    FilesystemWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("git {step} failed: {reason}")]
    VersionControlFailed { step: &'static str, reason: String },

    #[error("Invalid dependency manifest {}: {reason}", path.display())]
    DependencyManifest { path: PathBuf, reason: String },
}

impl ScaffoldError {
    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FilesystemWriteFailure {
            path: path.into(),
            source,
        }
    }

    /// True for failures raised before any side effect took place
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::MissingProjectName
                | Self::InvalidProjectName { .. }
                | Self::UnsupportedTarget { .. }
                | Self::MissingVersionControl { .. }
        )
    }
}
