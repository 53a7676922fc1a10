//! Validated input of one `new` invocation

use std::fmt;
use std::str::FromStr;

/// Runtime environment a project is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetPlatform {
    Node,
    Browser,
}

impl TargetPlatform {
    /// Every supported target, in the order shown to users
    pub const ALL: [TargetPlatform; 2] = [TargetPlatform::Node, TargetPlatform::Browser];

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetPlatform::Node => "node",
            TargetPlatform::Browser => "browser",
        }
    }
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a target name is not one of [`TargetPlatform::ALL`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTarget(pub String);

impl FromStr for TargetPlatform {
    type Err = UnknownTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetPlatform::ALL
            .into_iter()
            .find(|target| target.as_str() == s)
            .ok_or_else(|| UnknownTarget(s.to_string()))
    }
}

/// A project name and target that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldRequest {
    pub project_name: String,
    pub target: TargetPlatform,
}
