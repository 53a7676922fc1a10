//! Version control access
//!
//! The pipeline only needs four git operations. They sit behind
//! [`VersionControl`] so the orchestrator can be driven without a git binary.

use crate::error::{ScaffoldError, ScaffoldResult};
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

/// Version control operations used while scaffolding
pub trait VersionControl {
    /// Check that the tool can be launched at all
    fn probe(&self) -> ScaffoldResult<()>;

    /// Create an empty repository in `dir`
    fn init(&self, dir: &Path) -> ScaffoldResult<()>;

    /// Stage every file below `dir`
    fn stage_all(&self, dir: &Path) -> ScaffoldResult<()>;

    /// Record the staged files as a commit
    fn commit(&self, dir: &Path, message: &str) -> ScaffoldResult<()>;
}

/// Commit identity forced through the environment
#[derive(Debug, Clone)]
struct Author {
    name: String,
    email: String,
}

/// [`VersionControl`] backed by the `git` executable
#[derive(Debug, Clone)]
pub struct GitCli {
    program: OsString,
    author: Option<Author>,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl GitCli {
    /// Use `git` from PATH
    pub fn new() -> Self {
        Self::with_program("git")
    }

    /// Use a specific git executable
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            author: None,
        }
    }

    /// Pin the author and committer of the commits this instance creates
    pub fn with_author(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.author = Some(Author {
            name: name.into(),
            email: email.into(),
        });
        self
    }

    fn run(&self, dir: &Path, step: &'static str, args: &[&str]) -> ScaffoldResult<()> {
        tracing::debug!(step, dir = %dir.display(), "running git");

        let mut command = Command::new(&self.program);
        command.args(args).current_dir(dir);
        if let Some(author) = &self.author {
            command
                .env("GIT_AUTHOR_NAME", &author.name)
                .env("GIT_AUTHOR_EMAIL", &author.email)
                .env("GIT_COMMITTER_NAME", &author.name)
                .env("GIT_COMMITTER_EMAIL", &author.email);
        }

        let output = command
            .output()
            .map_err(|e| ScaffoldError::VersionControlFailed {
                step,
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let reason = if stderr.is_empty() {
                format!("exit code {}", output.status.code().unwrap_or(-1))
            } else {
                stderr
            };
            return Err(ScaffoldError::VersionControlFailed { step, reason });
        }

        Ok(())
    }
}

impl VersionControl for GitCli {
    fn probe(&self) -> ScaffoldResult<()> {
        // Bare `git` prints usage and exits non-zero; only a failed launch matters
        Command::new(&self.program)
            .output()
            .map(|_| ())
            .map_err(|e| {
                tracing::debug!(error = %e, "git probe failed");
                ScaffoldError::MissingVersionControl {
                    program: self.program.to_string_lossy().into_owned(),
                }
            })
    }

    fn init(&self, dir: &Path) -> ScaffoldResult<()> {
        self.run(dir, "init", &["init"])
    }

    fn stage_all(&self, dir: &Path) -> ScaffoldResult<()> {
        self.run(dir, "add", &["add", "-A"])
    }

    fn commit(&self, dir: &Path, message: &str) -> ScaffoldResult<()> {
        self.run(dir, "commit", &["commit", "-m", message])
    }
}
