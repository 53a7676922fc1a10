//! Template identifiers (`owner/name#branch`)

use crate::scaffold::request::TargetPlatform;
use std::fmt;

/// A repository snapshot to materialize: `owner/name#branch`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    pub owner: String,
    pub name: String,
    pub branch: String,
}

impl TemplateSource {
    pub fn new(
        owner: impl Into<String>,
        name: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            branch: branch.into(),
        }
    }

    /// The starter template for a target platform
    pub fn for_target(namespace: &str, branch: &str, target: TargetPlatform) -> Self {
        Self::new(namespace, format!("template-{}", target), branch)
    }

    /// Parse `owner/name` or `owner/name#branch`
    pub fn parse(spec: &str, default_branch: &str) -> Option<Self> {
        let (repo, branch) = match spec.trim().split_once('#') {
            Some((repo, branch)) => (repo, branch),
            None => (spec.trim(), default_branch),
        };
        let (owner, name) = repo.split_once('/')?;

        let valid = |part: &str| {
            !part.is_empty()
                && part != "."
                && part != ".."
                && !part.contains(['/', '\\', '#'])
                && !part.chars().any(char::is_whitespace)
        };
        if !valid(owner) || !valid(name) || branch.is_empty() || branch.contains(char::is_whitespace)
        {
            return None;
        }

        Some(Self::new(owner, name, branch))
    }
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.name, self.branch)
    }
}
