//! Clio CLI - `clio new` project scaffolding

mod logging;

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use clio_scaffold::tui::CreateArgs;
use clio_scaffold::{ProductConfig, ScaffoldError};
use std::path::{Path, PathBuf};

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Clio product configuration
#[derive(Clone)]
pub struct ClioConfig;

impl ProductConfig for ClioConfig {
    fn name(&self) -> &'static str {
        "clio"
    }

    fn display_name(&self) -> &'static str {
        "Clio"
    }

    fn template_namespace(&self) -> &'static str {
        "clio-lang"
    }

    fn template_branch(&self) -> &'static str {
        "master"
    }

    fn default_archive_host(&self) -> &'static str {
        "https://codeload.github.com"
    }

    fn archive_host_env(&self) -> &'static str {
        "CLIO_TEMPLATE_HOST"
    }

    fn next_steps(&self, dir: &Path) -> Vec<String> {
        vec![
            format!("cd {}", dir.display()),
            "clio run index.clio".to_string(),
        ]
    }
}

#[derive(Parser, Debug)]
#[command(name = "clio")]
#[command(about = "Command-line tool for the Clio programming language")]
#[command(version)]
pub struct Args {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct GlobalArgs {
    /// Increase diagnostic output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print errors in diagnostic output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new Clio project
    New(NewArgs),
}

#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Name of the project
    pub project: Option<String>,

    /// What is this project intended for (node or browser)?
    #[arg(short, long, default_value = "node")]
    pub target: String,

    /// Local directory to use for templates instead of fetching from remote (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Fetch the dependencies listed in the template's clio.toml
    #[arg(long = "with-dependencies")]
    pub with_dependencies: bool,
}

impl From<NewArgs> for CreateArgs {
    fn from(args: NewArgs) -> Self {
        CreateArgs {
            project: args.project,
            target: args.target,
            template_dir: args.template_dir,
            with_dependencies: args.with_dependencies,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    logging::init_logging(&args.global)?;
    let config = ClioConfig;

    let result = match args.command {
        Command::New(new_args) => {
            clio_scaffold::run(&config, new_args.into(), CLI_VERSION)
                .await
                .map(|dir| tracing::info!(dir = %dir.display(), "project created"))
        }
    };

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    if let Err(err) = result {
        // Pipeline failures were already reported by the scaffolder
        if !err.is::<ScaffoldError>() {
            eprintln!("error: {:#}", err);
        }
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_steps() {
        let steps = ClioConfig.next_steps(Path::new("my-app"));
        assert_eq!(steps, vec!["cd my-app", "clio run index.clio"]);
    }

    #[test]
    fn test_target_defaults_to_node() {
        let args = Args::try_parse_from(["clio", "new", "my-app"]).unwrap();
        let Command::New(new_args) = args.command;
        assert_eq!(new_args.project.as_deref(), Some("my-app"));
        assert_eq!(new_args.target, "node");
        assert!(!new_args.with_dependencies);
    }

    #[test]
    fn test_target_is_free_text() {
        // Unsupported targets are rejected by the pipeline, not by clap
        let args = Args::try_parse_from(["clio", "new", "my-app", "--target", "wasm"]).unwrap();
        let Command::New(new_args) = args.command;
        assert_eq!(new_args.target, "wasm");
    }

    #[test]
    fn test_verbosity_flags() {
        let args = Args::try_parse_from(["clio", "new", "my-app", "-vv"]).unwrap();
        assert_eq!(args.global.verbose, 2);
        assert!(!args.global.quiet);
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Args::try_parse_from(["clio"]).is_err());
    }
}
