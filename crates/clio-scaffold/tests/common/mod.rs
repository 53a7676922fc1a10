//! Test doubles shared by the integration tests

#![allow(dead_code)]

use clio_scaffold::templates::{materialize, TemplateFile};
use clio_scaffold::{
    ProductConfig, Reporter, ScaffoldError, ScaffoldResult, TemplateRetriever, TemplateSource,
    VersionControl,
};
use std::cell::RefCell;
use std::path::Path;
use std::sync::Mutex;

#[derive(Clone)]
pub struct TestConfig;

impl ProductConfig for TestConfig {
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
        "http://127.0.0.1:9"
    }

    fn archive_host_env(&self) -> &'static str {
        "CLIO_TEST_TEMPLATE_HOST"
    }

    fn next_steps(&self, dir: &Path) -> Vec<String> {
        vec![
            format!("cd {}", dir.display()),
            "clio run index.clio".to_string(),
        ]
    }
}

/// Serves canned templates and remembers what was asked for
#[derive(Default)]
pub struct FakeRetriever {
    pub requests: Mutex<Vec<String>>,
    pub fail: bool,
    /// Extra files added to every `template-*` source
    pub extra: Vec<(&'static str, &'static str)>,
}

impl FakeRetriever {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl TemplateRetriever for FakeRetriever {
    async fn retrieve(&self, source: &TemplateSource, dest: &Path) -> ScaffoldResult<()> {
        self.requests.lock().unwrap().push(source.to_string());
        if self.fail {
            return Err(ScaffoldError::NetworkFailure {
                template: source.to_string(),
                reason: "simulated outage".to_string(),
            });
        }

        let mut files = vec![TemplateFile::file(
            "README.md",
            format!("# {}\n", source.name),
        )];
        if source.name.starts_with("template-") {
            files.push(TemplateFile::file(
                "index.clio",
                b"export fn main argv:\n  console.log 'Hello'\n".to_vec(),
            ));
            for (path, contents) in &self.extra {
                files.push(TemplateFile::file(*path, contents.as_bytes().to_vec()));
            }
        }
        materialize(&files, dest).await
    }
}

/// Records git operations instead of running them
#[derive(Default)]
pub struct FakeVcs {
    pub calls: RefCell<Vec<String>>,
    pub missing: bool,
    pub fail_commit: bool,
}

impl FakeVcs {
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl VersionControl for FakeVcs {
    fn probe(&self) -> ScaffoldResult<()> {
        self.calls.borrow_mut().push("probe".to_string());
        if self.missing {
            return Err(ScaffoldError::MissingVersionControl {
                program: "git".to_string(),
            });
        }
        Ok(())
    }

    fn init(&self, dir: &Path) -> ScaffoldResult<()> {
        assert!(dir.is_dir(), "init runs inside the fetched template");
        self.calls.borrow_mut().push("init".to_string());
        Ok(())
    }

    fn stage_all(&self, _dir: &Path) -> ScaffoldResult<()> {
        self.calls.borrow_mut().push("add".to_string());
        Ok(())
    }

    fn commit(&self, _dir: &Path, message: &str) -> ScaffoldResult<()> {
        self.calls.borrow_mut().push(format!("commit {}", message));
        if self.fail_commit {
            return Err(ScaffoldError::VersionControlFailed {
                step: "commit",
                reason: "Please tell me who you are.".to_string(),
            });
        }
        Ok(())
    }
}

/// Keeps every message with its level
#[derive(Default)]
pub struct RecordingReporter {
    pub messages: RefCell<Vec<(String, String)>>,
}

impl RecordingReporter {
    fn push(&self, level: &str, message: &str) {
        self.messages
            .borrow_mut()
            .push((level.to_string(), message.to_string()));
    }

    pub fn with_level(&self, level: &str) -> Vec<String> {
        self.messages
            .borrow()
            .iter()
            .filter(|(l, _)| l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn info(&self, message: &str) {
        self.push("info", message);
    }

    fn success(&self, message: &str) {
        self.push("success", message);
    }

    fn warning(&self, message: &str) {
        self.push("warning", message);
    }

    fn error(&self, message: &str) {
        self.push("error", message);
    }

    fn next_steps(&self, steps: &[String]) {
        for step in steps {
            self.push("next", step);
        }
    }
}
