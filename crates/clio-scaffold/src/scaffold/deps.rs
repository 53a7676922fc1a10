//! Optional dependency stage
//!
//! A template may ship a `clio.toml` listing packages it builds on:
//!
//! ```toml
//! [dependencies]
//! rpc = "clio-lang/rpc"
//! stdlib = "clio-lang/stdlib#develop"
//! ```
//!
//! When the stage is enabled every entry is retrieved like a template into
//! `.clio/deps/<name>` inside the project. It is off unless the caller opts in.

use super::validate::is_single_component;
use crate::error::{ScaffoldError, ScaffoldResult};
use crate::templates::{TemplateRetriever, TemplateSource};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Project manifest file name
pub const MANIFEST_FILE: &str = "clio.toml";

/// Where fetched dependencies land, relative to the project root
pub const DEPENDENCY_DIR: &str = ".clio/deps";

#[derive(Debug, Default, Deserialize)]
struct ProjectManifest {
    #[serde(default)]
    dependencies: BTreeMap<String, String>,
}

/// A dependency declared in `clio.toml`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    pub source: TemplateSource,
}

/// Read the dependencies declared by the project in `project_dir`.
///
/// A project without a manifest has no dependencies.
pub fn read_dependencies(
    project_dir: &Path,
    default_branch: &str,
) -> ScaffoldResult<Vec<Dependency>> {
    let path = project_dir.join(MANIFEST_FILE);
    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(ScaffoldError::DependencyManifest {
                path,
                reason: e.to_string(),
            })
        }
    };

    parse_manifest(&content, default_branch)
        .map_err(|reason| ScaffoldError::DependencyManifest { path, reason })
}

fn parse_manifest(content: &str, default_branch: &str) -> Result<Vec<Dependency>, String> {
    let manifest: ProjectManifest = toml::from_str(content).map_err(|e| e.to_string())?;

    manifest
        .dependencies
        .into_iter()
        .map(|(name, spec)| {
            if !is_single_component(&name) {
                return Err(format!("invalid dependency name '{}'", name));
            }
            let source = TemplateSource::parse(&spec, default_branch).ok_or_else(|| {
                format!(
                    "dependency '{}' must look like owner/repo or owner/repo#branch (got '{}')",
                    name, spec
                )
            })?;
            Ok(Dependency { name, source })
        })
        .collect()
}

/// Retrieve every declared dependency of the project, one after another.
/// Returns the installed dependencies.
pub async fn fetch_dependencies<R: TemplateRetriever>(
    retriever: &R,
    project_dir: &Path,
    default_branch: &str,
) -> ScaffoldResult<Vec<Dependency>> {
    let dependencies = read_dependencies(project_dir, default_branch)?;

    for dependency in &dependencies {
        let dest = dependency_dir(project_dir, &dependency.name);
        tracing::debug!(
            name = %dependency.name,
            source = %dependency.source,
            "fetching dependency"
        );
        retriever.retrieve(&dependency.source, &dest).await?;
    }

    Ok(dependencies)
}

/// Install location of dependency `name`
pub fn dependency_dir(project_dir: &Path, name: &str) -> PathBuf {
    project_dir.join(DEPENDENCY_DIR).join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dependencies() {
        let deps = parse_manifest(
            r#"
[package]
name = "my-app"

[dependencies]
stdlib = "clio-lang/stdlib#develop"
rpc = "clio-lang/rpc"
"#,
            "master",
        )
        .unwrap();

        assert_eq!(
            deps,
            vec![
                Dependency {
                    name: "rpc".to_string(),
                    source: TemplateSource::new("clio-lang", "rpc", "master"),
                },
                Dependency {
                    name: "stdlib".to_string(),
                    source: TemplateSource::new("clio-lang", "stdlib", "develop"),
                },
            ]
        );
    }

    #[test]
    fn test_manifest_without_dependencies() {
        assert!(parse_manifest("[package]\nname = \"my-app\"\n", "master")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_bad_entries() {
        assert!(parse_manifest("[dependencies]\nrpc = \"rpc\"\n", "master").is_err());
        assert!(parse_manifest("[dependencies]\n\"../up\" = \"a/b\"\n", "master").is_err());
        assert!(parse_manifest("[dependencies\n", "master").is_err());
    }

    #[test]
    fn test_missing_manifest_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_dependencies(dir.path(), "master").unwrap().is_empty());
    }

    #[test]
    fn test_unreadable_manifest_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "dependencies = 3").unwrap();

        match read_dependencies(dir.path(), "master") {
            Err(ScaffoldError::DependencyManifest { path, .. }) => {
                assert_eq!(path, dir.path().join(MANIFEST_FILE));
            }
            other => panic!("expected DependencyManifest, got {:?}", other),
        }
    }
}
