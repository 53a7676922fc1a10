//! Charm-style CLI flow for `new` using cliclack

use super::reporter::CliclackReporter;
use crate::git::GitCli;
use crate::product::ProductConfig;
use crate::runtime::check;
use crate::scaffold::{ScaffoldOptions, ScaffoldOrchestrator};
use crate::templates::TemplateFetcher;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// CLI arguments for the new command
#[derive(Debug, Clone)]
pub struct CreateArgs {
    /// Name of the project (and of the directory created for it)
    pub project: Option<String>,

    /// Target platform, validated by the pipeline
    pub target: String,

    /// Local directory to use for templates instead of fetching from remote
    pub template_dir: Option<PathBuf>,

    /// Retrieve the dependencies listed in the template's clio.toml
    pub with_dependencies: bool,
}

impl Default for CreateArgs {
    fn default() -> Self {
        Self {
            project: None,
            target: "node".to_string(),
            template_dir: None,
            with_dependencies: false,
        }
    }
}

/// Run `new` with cliclack output. Returns the created project directory.
///
/// Pipeline failures have already been shown to the user when this returns
/// an error wrapping a [`crate::ScaffoldError`].
pub async fn run<C: ProductConfig>(
    config: &C,
    args: CreateArgs,
    cli_version: &str,
) -> Result<PathBuf> {
    cliclack::intro(format!("{} {}", config.display_name(), cli_version))?;

    // Advisory only: an old runtime does not stop scaffolding
    check_runtime(config)?;

    let fetcher = setup_fetcher(config, &args.template_dir)?;
    let workdir = std::env::current_dir().context("Failed to read the current directory")?;
    let options = ScaffoldOptions::new(workdir).with_dependencies(args.with_dependencies);

    let orchestrator = ScaffoldOrchestrator::new(
        config.clone(),
        fetcher,
        GitCli::new(),
        CliclackReporter::new(),
        options,
    );

    match orchestrator
        .create_project(args.project.as_deref(), &args.target)
        .await
    {
        Ok(dir) => {
            cliclack::outro("Happy coding!")?;
            Ok(dir)
        }
        Err(err) => {
            cliclack::outro_cancel("Project was not created")?;
            Err(err.into())
        }
    }
}

fn check_runtime<C: ProductConfig>(config: &C) -> Result<()> {
    let minimum = config.minimum_runtime_version();
    let node = check::check_node();

    match node.version.as_deref() {
        Some(version) if node.is_supported(&minimum) => {
            cliclack::log::success(format!("{} {}", node.name, version))?;
        }
        Some(version) => {
            cliclack::log::warning(format!(
                "{} {} is not supported, {} needs {}.{} or newer",
                node.name,
                version,
                config.display_name(),
                minimum.major,
                minimum.minor
            ))?;
        }
        None => {
            cliclack::log::warning(format!(
                "{} was not found, install {}.{} or newer to run {} projects",
                node.name,
                minimum.major,
                minimum.minor,
                config.display_name()
            ))?;
        }
    }

    Ok(())
}

fn setup_fetcher<C: ProductConfig>(
    config: &C,
    template_dir: &Option<PathBuf>,
) -> Result<TemplateFetcher> {
    let fetcher = match template_dir {
        Some(path) => {
            cliclack::log::info(format!("Using local templates from {}", path.display()))?;
            TemplateFetcher::from_local(path.clone(), config.user_agent())
        }
        None => TemplateFetcher::from_config(config)?,
    };

    Ok(fetcher)
}
