//! Scaffolding pipeline
//!
//! `new <project> --target <node|browser>` runs, strictly in order:
//! - `validate`: project name, target platform, git available
//! - template retrieval into `<workdir>/<project>` (see `crate::templates`)
//! - `deps`: optional, off unless requested
//! - `bootstrap`: `git init`, `git add -A`, `git commit -m "Initial Commit"`
//!
//! `orchestrator` wires the stages together and reports milestones.

pub mod bootstrap;
pub mod deps;
pub mod orchestrator;
pub mod request;
pub mod validate;

pub use bootstrap::{bootstrap, INITIAL_COMMIT_MESSAGE};
pub use deps::{fetch_dependencies, read_dependencies, Dependency};
pub use orchestrator::{ScaffoldOptions, ScaffoldOrchestrator};
pub use request::{ScaffoldRequest, TargetPlatform};
pub use validate::validate;
