//! The `new` pipeline: validate, retrieve, bootstrap, report

use super::bootstrap::bootstrap;
use super::deps::fetch_dependencies;
use super::validate::validate;
use crate::error::ScaffoldResult;
use crate::git::VersionControl;
use crate::product::ProductConfig;
use crate::report::Reporter;
use crate::templates::{TemplateRetriever, TemplateSource};
use std::path::PathBuf;

/// Knobs of one scaffold run
#[derive(Debug, Clone)]
pub struct ScaffoldOptions {
    /// Directory the project directory is created in
    pub workdir: PathBuf,
    /// Retrieve the packages listed in the template's `clio.toml`
    pub fetch_dependencies: bool,
}

impl ScaffoldOptions {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            fetch_dependencies: false,
        }
    }

    pub fn with_dependencies(mut self, enabled: bool) -> Self {
        self.fetch_dependencies = enabled;
        self
    }
}

/// Runs `new` from raw input to a committed project directory
pub struct ScaffoldOrchestrator<C, R, V, P> {
    config: C,
    retriever: R,
    vcs: V,
    reporter: P,
    options: ScaffoldOptions,
}

impl<C, R, V, P> ScaffoldOrchestrator<C, R, V, P>
where
    C: ProductConfig,
    R: TemplateRetriever,
    V: VersionControl,
    P: Reporter,
{
    pub fn new(config: C, retriever: R, vcs: V, reporter: P, options: ScaffoldOptions) -> Self {
        Self {
            config,
            retriever,
            vcs,
            reporter,
            options,
        }
    }

    pub fn options(&self) -> &ScaffoldOptions {
        &self.options
    }

    pub fn retriever(&self) -> &R {
        &self.retriever
    }

    pub fn vcs(&self) -> &V {
        &self.vcs
    }

    pub fn reporter(&self) -> &P {
        &self.reporter
    }

    /// Create `<workdir>/<project_name>` from the template for `target`.
    ///
    /// Returns the project directory. Any failure is reported exactly once
    /// through the reporter before being returned; whatever was already
    /// written stays on disk.
    pub async fn create_project(
        &self,
        project_name: Option<&str>,
        target: &str,
    ) -> ScaffoldResult<PathBuf> {
        match self.run(project_name, target).await {
            Ok(dest) => Ok(dest),
            Err(err) => {
                if err.is_precondition() {
                    tracing::debug!(error = ?err, "scaffold refused before any side effect");
                } else {
                    tracing::warn!(error = ?err, "scaffold failed");
                }
                self.reporter.error(&err.to_string());
                Err(err)
            }
        }
    }

    async fn run(&self, project_name: Option<&str>, target: &str) -> ScaffoldResult<PathBuf> {
        let request = validate(project_name, target, &self.vcs)?;
        tracing::info!(
            project = %request.project_name,
            target = %request.target,
            "preconditions satisfied"
        );

        let dest = self.options.workdir.join(&request.project_name);
        let source = TemplateSource::for_target(
            self.config.template_namespace(),
            self.config.template_branch(),
            request.target,
        );

        if dest.exists() {
            self.reporter
                .warning(&format!("Replacing existing directory {}", dest.display()));
        }

        self.reporter.begin(&format!("Fetching template {}...", source));
        let fetched = self.retriever.retrieve(&source, &dest).await;
        self.reporter.end(if fetched.is_ok() {
            "Template fetched"
        } else {
            "Template fetch failed"
        });
        fetched?;
        tracing::info!(dest = %dest.display(), "template fetched");

        if self.options.fetch_dependencies {
            let installed =
                fetch_dependencies(&self.retriever, &dest, self.config.template_branch()).await?;
            self.reporter.info(&format!(
                "Added {} {} dependencies",
                installed.len(),
                self.config.display_name()
            ));
        }

        bootstrap(&self.vcs, &dest)?;
        self.reporter.info("Initialized new git repository.");

        self.reporter.success("Initialization Complete!");
        self.reporter
            .next_steps(&self.config.next_steps(&PathBuf::from(&request.project_name)));

        Ok(dest)
    }
}
