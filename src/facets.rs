//! Host facet interfaces
//!
//! The negotiation and export logic only talks to its surroundings through these traits:
//! - dependency declarations and version resolution ([`DependencyFacet`])
//! - the project's test-source area ([`SourceFacet`], [`JavaResource`])
//! - out-of-process execution of a project class ([`ExecutionFacet`])
//! - operator choices ([`Prompter`])
//!
//! [`crate::backend::project::MavenProject`] and [`crate::maven::MavenDependencies`] are the
//! filesystem-backed implementations; tests substitute in-memory fakes.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use arqforge_core::DependencyCoordinate;
use thiserror::Error;

use crate::backend::codegen::GeneratedArtifact;

// ============================================================================
// Errors
// ============================================================================

/// Failures of the project's dependency declaration store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no pom.xml found in {0}")]
    MissingPom(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path} is not a valid POM:\n{details}")]
    Malformed { path: PathBuf, details: String },
}

/// The operator could not (or did not) pick an option.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("{question} (no answer available in non-interactive mode)")]
    AnswerRequired { question: String },

    #[error("version {version} of {coordinate} is not available; candidates: {candidates}")]
    NotACandidate {
        version: String,
        coordinate: String,
        candidates: String,
    },

    #[error("prompt failed: {0}")]
    Interaction(String),
}

/// Failures while turning a coordinate into a concrete version.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("no versions of {coordinate} are available")]
    NoCandidateVersions { coordinate: String },

    #[error("cannot read the Maven repository at {path}: {source}")]
    Unreachable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures of the external compile-and-run step.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` exited with status {code}")]
    Exit { command: String, code: i32 },

    #[error("`{command}` was interrupted")]
    Interrupted { command: String },
}

// ============================================================================
// Dependency store
// ============================================================================

/// Dependency declarations of a project plus version resolution for coordinates.
///
/// Presence checks use the coordinate identity `(groupId, artifactId)`; versions are ignored.
pub trait DependencyFacet {
    fn has_dependency(&self, coordinate: &DependencyCoordinate) -> Result<bool, StoreError> {
        Ok(self.get_dependency(coordinate)?.is_some())
    }

    /// The declared dependency with the same identity, if any.
    fn get_dependency(&self, coordinate: &DependencyCoordinate) -> Result<Option<DependencyCoordinate>, StoreError>;

    /// Declare `coordinate`, or update the version of the declaration with the same identity.
    fn add_dependency(&mut self, coordinate: &DependencyCoordinate) -> Result<(), StoreError>;

    /// Available versions of `coordinate`, oldest first. Each returned coordinate carries a version.
    fn resolve_available_versions(
        &self,
        coordinate: &DependencyCoordinate,
    ) -> Result<Vec<DependencyCoordinate>, ResolutionError>;
}

// ============================================================================
// Source area
// ============================================================================

/// A Java source file addressed by its logical path (`com/acme/Widget.java`).
pub trait JavaResource {
    fn logical_path(&self) -> &str;

    fn exists(&self) -> bool;

    fn read(&self) -> io::Result<String>;

    /// Remove the file. Deleting a file that does not exist succeeds.
    fn delete(&self) -> io::Result<()>;
}

/// The project's source trees.
pub trait SourceFacet {
    type Resource: JavaResource;

    /// Write `artifact` under the test-source root, replacing any file at the same logical path.
    fn save_test_source(&self, artifact: &GeneratedArtifact) -> io::Result<Self::Resource>;

    /// Handle to a test source, whether or not it exists.
    fn test_resource(&self, logical_path: &str) -> Self::Resource;

    /// Locate a class by qualified name, searching main sources before test sources.
    fn find_class(&self, qualified_name: &str) -> Option<Self::Resource>;
}

/// A [`JavaResource`] backed by a file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResource {
    logical_path: String,
    path: PathBuf,
}

impl FileResource {
    pub fn new(logical_path: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            logical_path: logical_path.into(),
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl JavaResource for FileResource {
    fn logical_path(&self) -> &str {
        &self.logical_path
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn read(&self) -> io::Result<String> {
        fs::read_to_string(&self.path)
    }

    fn delete(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

// ============================================================================
// Execution and prompting
// ============================================================================

/// Runs a class from the target project's compiled test classpath.
pub trait ExecutionFacet {
    /// Compile the project, then run `qualified_name` with `argument` as its only argument.
    fn execute_project_class(&self, qualified_name: &str, argument: &str) -> Result<(), ExecutionError>;
}

/// Asks the operator to pick one of several options.
pub trait Prompter {
    /// Returns the index of the chosen option. With `default = None` the operator must choose
    /// explicitly.
    fn choose(&mut self, question: &str, options: &[String], default: Option<usize>) -> Result<usize, PromptError>;
}
