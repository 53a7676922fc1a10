//! Clio Scaffold - project scaffolding behind `clio new`
//!
//! Creates a new Clio project from the `template-{target}` repository of the
//! template namespace and turns it into a git repository with one commit.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - runtime version checks, template
//!   retrieval (`templates`), git access (`git`)
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait and
//!   `ScaffoldOrchestrator`, with `Reporter` as the output seam
//! - **Layer 3: CLI Interface** - Optional cliclack front end (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based front end
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use clio_scaffold::{GitCli, ScaffoldOptions, ScaffoldOrchestrator, SilentReporter, TemplateFetcher};
//!
//! let fetcher = TemplateFetcher::from_config(&MyConfig)?;
//! let orchestrator = ScaffoldOrchestrator::new(
//!     MyConfig,
//!     fetcher,
//!     GitCli::new(),
//!     SilentReporter,
//!     ScaffoldOptions::new(std::env::current_dir()?),
//! );
//! let dir = orchestrator.create_project(Some("my-app"), "node").await?;
//! ```

pub mod error;
pub mod git;
pub mod product;
pub mod report;
pub mod runtime;
pub mod scaffold;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::{ScaffoldError, ScaffoldResult};
pub use git::{GitCli, VersionControl};
pub use product::ProductConfig;
pub use report::{Reporter, SilentReporter};
pub use runtime::{is_supported_version, VersionSpec, MINIMUM_SUPPORTED_VERSION};
pub use scaffold::{ScaffoldOptions, ScaffoldOrchestrator, ScaffoldRequest, TargetPlatform};
pub use templates::{TemplateFetcher, TemplateLocation, TemplateRetriever, TemplateSource};

#[cfg(feature = "tui")]
pub use tui::run;
