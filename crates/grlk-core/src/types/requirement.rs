//! Root requirements and their sources.

use super::constraint::Constraint;
use serde::{Deserialize, Serialize};

/// Where a library comes from.
///
/// Only `Registry` feeds the resolver's catalog lookup; the other two
/// are passed through into the lock output unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    Registry,
    Vcs {
        url: String,
        branch: Option<String>,
        tag: Option<String>,
        reference: Option<String>,
    },
    Path {
        local_path: String,
    },
}

impl Source {
    /// Build a vcs source from a `github: "user/repo"` shorthand
    pub fn github(repo: &str) -> Self {
        Source::Vcs {
            url: format!("https://github.com/{}.git", repo),
            branch: None,
            tag: None,
            reference: None,
        }
    }

    /// Build a vcs source from an explicit git URL
    pub fn git(url: impl Into<String>) -> Self {
        Source::Vcs {
            url: url.into(),
            branch: None,
            tag: None,
            reference: None,
        }
    }

    /// Snapshot byte for this source (0=registry, 1=github, 2=git, 3=path)
    pub fn tag_byte(&self) -> u8 {
        match self {
            Source::Registry => 0,
            Source::Vcs { url, .. } if url.starts_with("https://github.com/") => 1,
            Source::Vcs { .. } => 2,
            Source::Path { .. } => 3,
        }
    }

    pub fn is_registry(&self) -> bool {
        matches!(self, Source::Registry)
    }
}

/// A top-level requirement parsed from one manifest line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootRequirement {
    pub name: String,
    /// Explicit constraints; empty means the implicit `>= 0.0.0`
    pub constraints: Vec<Constraint>,
    pub source: Source,
    /// Set by `require: false`; carried into emission, never affects
    /// selection
    pub optional: bool,
    /// Enclosing `group` block symbols; grouped requirements are kept
    /// out of the resolver work set
    pub groups: Vec<String>,
}

impl RootRequirement {
    /// Create a registry requirement with no constraints
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraints: Vec::new(),
            source: Source::Registry,
            optional: false,
            groups: Vec::new(),
        }
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn with_source(mut self, source: Source) -> Self {
        self.source = source;
        self
    }

    /// Whether this requirement participates in resolution
    pub fn in_work_set(&self) -> bool {
        self.groups.is_empty()
    }
}
