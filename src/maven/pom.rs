//! `pom.xml` dependency store.
//!
//! Every mutation re-reads the file, splices the edit into the original text and writes it back, so
//! formatting and comments outside the edited element survive.

use std::fs;
use std::path::{Path, PathBuf};

use arqforge_core::DependencyCoordinate;
use arqforge_syntax::diagnostics::format_errors;
use arqforge_syntax::pom::PomDocument;

use crate::facets::StoreError;

/// A project's `pom.xml`.
#[derive(Debug, Clone)]
pub struct PomFile {
    path: PathBuf,
}

impl PomFile {
    /// Open the POM at `path`, failing if it does not exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if !path.is_file() {
            let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
            return Err(StoreError::MissingPom(dir));
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the current file contents.
    pub fn document(&self) -> Result<PomDocument, StoreError> {
        let text = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        PomDocument::parse(text.as_str()).map_err(|errors| StoreError::Malformed {
            path: self.path.clone(),
            details: format_errors(&self.path.display().to_string(), &text, &errors),
        })
    }

    /// Declared dependencies (`project/dependencies`), versions resolved.
    pub fn dependencies(&self) -> Result<Vec<DependencyCoordinate>, StoreError> {
        Ok(self
            .document()?
            .dependencies()
            .into_iter()
            .map(|d| d.coordinate)
            .collect())
    }

    pub fn get(&self, coordinate: &DependencyCoordinate) -> Result<Option<DependencyCoordinate>, StoreError> {
        Ok(self
            .document()?
            .find_dependency(coordinate.group_id(), coordinate.artifact_id())
            .map(|d| d.coordinate))
    }

    /// Add `coordinate`, or rewrite the version of the entry with the same identity.
    ///
    /// An existing entry is left untouched when `coordinate` has no version or the versions already
    /// match.
    #[tracing::instrument(skip_all, fields(dependency = %coordinate))]
    pub fn upsert(&self, coordinate: &DependencyCoordinate) -> Result<(), StoreError> {
        let doc = self.document()?;
        let updated = match doc.find_dependency(coordinate.group_id(), coordinate.artifact_id()) {
            Some(existing) => match coordinate.version() {
                Some(version) if existing.coordinate.version() != Some(version) => {
                    tracing::debug!(from = ?existing.coordinate.version(), to = version, "updating dependency version");
                    doc.with_dependency_version(&existing, version)
                }
                _ => return Ok(()),
            },
            None => {
                tracing::debug!("adding dependency");
                doc.with_dependency_added(coordinate)
            }
        };
        fs::write(&self.path, updated).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
