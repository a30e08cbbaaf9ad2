//! Maven-backed dependency facet: declarations live in `pom.xml`, candidate versions come from the local
//! repository.

pub mod pom;
pub mod repository;

use arqforge_core::DependencyCoordinate;

use crate::facets::{DependencyFacet, ResolutionError, StoreError};
pub use pom::PomFile;
pub use repository::LocalRepository;

pub struct MavenDependencies {
    pom: PomFile,
    repository: LocalRepository,
}

impl MavenDependencies {
    pub fn new(pom: PomFile, repository: LocalRepository) -> Self {
        Self { pom, repository }
    }

    pub fn pom(&self) -> &PomFile {
        &self.pom
    }
}

impl DependencyFacet for MavenDependencies {
    fn get_dependency(&self, coordinate: &DependencyCoordinate) -> Result<Option<DependencyCoordinate>, StoreError> {
        self.pom.get(coordinate)
    }

    fn add_dependency(&mut self, coordinate: &DependencyCoordinate) -> Result<(), StoreError> {
        self.pom.upsert(coordinate)
    }

    fn resolve_available_versions(
        &self,
        coordinate: &DependencyCoordinate,
    ) -> Result<Vec<DependencyCoordinate>, ResolutionError> {
        Ok(self
            .repository
            .available_versions(coordinate)?
            .into_iter()
            .map(|version| coordinate.clone().with_version(version))
            .collect())
    }
}
