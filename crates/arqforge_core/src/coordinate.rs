//! Dependency coordinates.
//!
//! A [`DependencyCoordinate`] names a Maven artifact. Presence checks only look at the identity pair
//! `(groupId, artifactId)`; version, scope and packaging type are payload.
//!
//! ## Examples
//! ```rust
//! use arqforge_core::{DependencyCoordinate, Scope};
//!
//! let junit = DependencyCoordinate::new("junit", "junit").with_scope(Scope::Test);
//! let pinned = junit.clone().with_version("4.8.2");
//! assert!(junit.same_identity(&pinned));
//! assert_eq!(pinned.to_string(), "junit:junit:4.8.2:test");
//! ```

use std::fmt;
use std::str::FromStr;

/// Maven dependency scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scope {
    #[default]
    Compile,
    Provided,
    Runtime,
    Test,
    System,
    Import,
}

impl Scope {
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Compile => "compile",
            Scope::Provided => "provided",
            Scope::Runtime => "runtime",
            Scope::Test => "test",
            Scope::System => "system",
            Scope::Import => "import",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "compile" => Ok(Scope::Compile),
            "provided" => Ok(Scope::Provided),
            "runtime" => Ok(Scope::Runtime),
            "test" => Ok(Scope::Test),
            "system" => Ok(Scope::System),
            "import" => Ok(Scope::Import),
            other => Err(format!("unknown dependency scope '{}'", other)),
        }
    }
}

/// A Maven dependency coordinate.
///
/// Coordinates are immutable values: the `with_*` builders consume `self` and return a new coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyCoordinate {
    group_id: String,
    artifact_id: String,
    version: Option<String>,
    scope: Option<Scope>,
    packaging: Option<String>,
}

impl DependencyCoordinate {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: None,
            scope: None,
            packaging: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Set the packaging type (`pom`, `jar`, ...). `jar` is the Maven default and is not recorded.
    pub fn with_packaging(mut self, packaging: impl Into<String>) -> Self {
        let packaging = packaging.into();
        self.packaging = if packaging == "jar" { None } else { Some(packaging) };
        self
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn scope(&self) -> Option<Scope> {
        self.scope
    }

    pub fn packaging(&self) -> Option<&str> {
        self.packaging.as_deref()
    }

    /// `groupId:artifactId`, the identity key.
    pub fn key(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }

    /// Two coordinates name the same dependency when group and artifact match, whatever their versions.
    pub fn same_identity(&self, other: &DependencyCoordinate) -> bool {
        self.group_id == other.group_id && self.artifact_id == other.artifact_id
    }
}

impl fmt::Display for DependencyCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)?;
        if let Some(version) = &self.version {
            write!(f, ":{}", version)?;
        }
        if let Some(scope) = self.scope {
            write!(f, ":{}", scope)?;
        }
        Ok(())
    }
}
