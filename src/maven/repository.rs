//! Candidate versions from a local Maven repository.
//!
//! For `group:artifact` the repository directory is `<repo>/<group with dots as slashes>/<artifact>/`.
//! Versions are the union of the `<version>` entries of every `maven-metadata*.xml` in that directory and
//! the names of its version subdirectories.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use arqforge_core::DependencyCoordinate;
use arqforge_core::version::sort_versions;
use arqforge_syntax::pom::parse_document;

use crate::facets::ResolutionError;

#[derive(Debug, Clone)]
pub struct LocalRepository {
    root: PathBuf,
}

impl LocalRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn artifact_dir(&self, coordinate: &DependencyCoordinate) -> PathBuf {
        let mut dir = self.root.clone();
        for part in coordinate.group_id().split('.') {
            dir.push(part);
        }
        dir.push(coordinate.artifact_id());
        dir
    }

    /// Known versions of `coordinate`, oldest first. Empty when the artifact is not in the repository.
    #[tracing::instrument(skip_all, fields(artifact = %coordinate.key()))]
    pub fn available_versions(&self, coordinate: &DependencyCoordinate) -> Result<Vec<String>, ResolutionError> {
        if !self.root.is_dir() {
            return Err(ResolutionError::Unreachable {
                path: self.root.clone(),
                source: io::Error::new(io::ErrorKind::NotFound, "repository directory does not exist"),
            });
        }

        let dir = self.artifact_dir(coordinate);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(dir = %dir.display(), "artifact not in local repository");
                return Ok(Vec::new());
            }
            Err(source) => return Err(ResolutionError::Unreachable { path: dir, source }),
        };

        let mut versions = BTreeSet::new();
        for entry in entries {
            let entry = entry.map_err(|source| ResolutionError::Unreachable {
                path: dir.clone(),
                source,
            })?;
            let name = entry.file_name().to_string_lossy().to_string();
            let path = entry.path();
            if path.is_dir() {
                if !name.starts_with('.') {
                    versions.insert(name);
                }
            } else if name.starts_with("maven-metadata") && name.ends_with(".xml") {
                versions.extend(metadata_versions(&path));
            }
        }

        let mut versions: Vec<String> = versions.into_iter().collect();
        sort_versions(&mut versions);
        tracing::debug!(count = versions.len(), "resolved candidate versions");
        Ok(versions)
    }
}

/// `<version>` entries under `metadata/versioning/versions`. Unreadable or malformed files contribute
/// nothing.
fn metadata_versions(path: &Path) -> Vec<String> {
    let Ok(text) = fs::read_to_string(path) else {
        return Vec::new();
    };
    match parse_document(&text) {
        Ok(root) => root
            .child("versioning")
            .and_then(|v| v.child("versions"))
            .map(|versions| {
                versions
                    .children_named("version")
                    .map(|v| v.trimmed_text().to_string())
                    .filter(|v| !v.is_empty())
                    .collect()
            })
            .unwrap_or_default(),
        Err(_) => {
            tracing::warn!(path = %path.display(), "ignoring malformed repository metadata");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn junit() -> DependencyCoordinate {
        DependencyCoordinate::new("org.jboss.arquillian.junit", "arquillian-junit-container")
    }

    #[test]
    fn test_union_of_metadata_and_directories() {
        let repo = tempfile::tempdir().unwrap();
        let local = LocalRepository::new(repo.path());
        let dir = local.artifact_dir(&junit());
        fs::create_dir_all(dir.join("1.0.0.Alpha4")).unwrap();
        fs::create_dir_all(dir.join("1.0.0.CR1")).unwrap();
        fs::write(
            dir.join("maven-metadata-central.xml"),
            "<metadata><versioning><versions>\
             <version>1.0.0.Alpha5</version><version>1.0.0.CR1</version><version>1.0.0.Final</version>\
             </versions></versioning></metadata>",
        )
        .unwrap();
        fs::write(dir.join("_remote.repositories"), "").unwrap();

        let versions = local.available_versions(&junit()).unwrap();
        assert_eq!(versions, vec!["1.0.0.Alpha4", "1.0.0.Alpha5", "1.0.0.CR1", "1.0.0.Final"]);
    }

    #[test]
    fn test_missing_artifact_is_empty() {
        let repo = tempfile::tempdir().unwrap();
        let versions = LocalRepository::new(repo.path()).available_versions(&junit()).unwrap();
        assert!(versions.is_empty());
    }

    #[test]
    fn test_missing_repository_is_unreachable() {
        let repo = tempfile::tempdir().unwrap();
        let local = LocalRepository::new(repo.path().join("nope"));
        let err = local.available_versions(&junit()).unwrap_err();
        assert!(matches!(err, ResolutionError::Unreachable { .. }));
    }

    #[test]
    fn test_malformed_metadata_is_ignored() {
        let repo = tempfile::tempdir().unwrap();
        let local = LocalRepository::new(repo.path());
        let dir = local.artifact_dir(&junit());
        fs::create_dir_all(dir.join("1.0")).unwrap();
        fs::write(dir.join("maven-metadata.xml"), "<metadata><versioning>").unwrap();
        assert_eq!(local.available_versions(&junit()).unwrap(), vec!["1.0"]);
    }
}
