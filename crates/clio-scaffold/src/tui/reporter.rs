//! [`Reporter`] rendering pipeline milestones with cliclack

use crate::report::Reporter;
use colored::Colorize;
use std::sync::Mutex;

/// Renders milestones as cliclack log lines and a spinner for long steps
#[derive(Default)]
pub struct CliclackReporter {
    spinner: Mutex<Option<cliclack::ProgressBar>>,
}

impl CliclackReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn stop_spinner(&self, message: &str) {
        let spinner = self.spinner.lock().ok().and_then(|mut slot| slot.take());
        if let Some(spinner) = spinner {
            spinner.stop(message);
        }
    }
}

impl Reporter for CliclackReporter {
    fn info(&self, message: &str) {
        let _ = cliclack::log::info(message);
    }

    fn success(&self, message: &str) {
        let _ = cliclack::log::success(message);
    }

    fn warning(&self, message: &str) {
        let _ = cliclack::log::warning(message);
    }

    fn error(&self, message: &str) {
        self.stop_spinner("Failed");
        let _ = cliclack::log::error(message);
    }

    fn begin(&self, message: &str) {
        let spinner = cliclack::spinner();
        spinner.start(message);
        if let Ok(mut slot) = self.spinner.lock() {
            *slot = Some(spinner);
        }
    }

    fn end(&self, message: &str) {
        self.stop_spinner(message);
    }

    fn next_steps(&self, steps: &[String]) {
        let _ = cliclack::log::success("Your project is ready");

        println!();
        println!("  {}", "Next steps".bold());
        println!();

        for (i, step) in steps.iter().enumerate() {
            println!("  {}.  {}", i + 1, step.cyan());
        }
        println!();
    }
}
