//! Checks performed before anything touches the disk or the network

use super::request::{ScaffoldRequest, TargetPlatform};
use crate::error::{ScaffoldError, ScaffoldResult};
use crate::git::VersionControl;
use std::path::{Component, Path};

/// Turn raw CLI input into a [`ScaffoldRequest`].
///
/// Checks run in order and stop at the first failure, so the version control
/// probe is only spawned once the name and target are known to be good.
pub fn validate<V: VersionControl>(
    project_name: Option<&str>,
    target: &str,
    vcs: &V,
) -> ScaffoldResult<ScaffoldRequest> {
    let project_name = match project_name.map(str::trim) {
        Some(name) if !name.is_empty() => name,
        _ => return Err(ScaffoldError::MissingProjectName),
    };

    if !is_single_component(project_name) {
        return Err(ScaffoldError::InvalidProjectName {
            name: project_name.to_string(),
        });
    }

    let target: TargetPlatform = target
        .parse()
        .map_err(|_| ScaffoldError::UnsupportedTarget {
            target: target.to_string(),
        })?;

    vcs.probe()?;

    Ok(ScaffoldRequest {
        project_name: project_name.to_string(),
        target,
    })
}

/// True when `name` names exactly one directory below its parent
pub(crate) fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains(['/', '\\'])
}
