//! Console reporting seam
//!
//! The pipeline announces its milestones through [`Reporter`]; how they are
//! rendered is up to the caller (`tui::CliclackReporter` in the CLI).

/// Receives user-facing progress of one scaffold run
pub trait Reporter {
    fn info(&self, message: &str);

    fn success(&self, message: &str);

    fn warning(&self, message: &str);

    fn error(&self, message: &str);

    /// A long-running step started (e.g. the template download)
    fn begin(&self, message: &str) {
        self.info(message);
    }

    /// The step announced by [`Reporter::begin`] finished, successfully or not
    fn end(&self, _message: &str) {}

    /// Commands the user should run next
    fn next_steps(&self, steps: &[String]) {
        for step in steps {
            self.info(step);
        }
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn info(&self, _message: &str) {}

    fn success(&self, _message: &str) {}

    fn warning(&self, _message: &str) {}

    fn error(&self, _message: &str) {}
}
