//! Arquillian container adapters
//!
//! Each supported runtime is a [`Container`] that knows its Arquillian adapter artifact and the runtime
//! libraries it needs. The CLI maps the operator's `--container` identifier to an implementation through
//! an explicit [`ContainerRegistry`].

use arqforge_core::{DependencyCoordinate, Scope};

use crate::facets::{DependencyFacet, StoreError};

const ARQUILLIAN_CONTAINER_GROUP: &str = "org.jboss.arquillian.container";

/// A runtime Arquillian can deploy tests into.
pub trait Container {
    /// Identifier used on the command line (`weld-ee-embedded-1.1`).
    fn id(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// The Arquillian adapter for this runtime, unversioned. It is released alongside Arquillian and
    /// is installed at the negotiated Arquillian version.
    fn arquillian_artifact(&self) -> DependencyCoordinate {
        DependencyCoordinate::new(ARQUILLIAN_CONTAINER_GROUP, format!("arquillian-{}", self.id())).with_scope(Scope::Test)
    }

    /// Runtime libraries with their own fixed versions.
    fn runtime_dependencies(&self) -> Vec<DependencyCoordinate>;

    /// Everything this container needs when Arquillian is at `version`.
    fn dependencies(&self, version: &str) -> Vec<DependencyCoordinate> {
        let mut deps = vec![self.arquillian_artifact().with_version(version)];
        deps.extend(self.runtime_dependencies());
        deps
    }

    /// Declare this container's dependencies in `store`.
    ///
    /// The Arquillian artifact is upserted at `version`; runtime libraries are only added when absent.
    /// Returns the coordinates that were written.
    fn install_dependencies(
        &self,
        version: &str,
        store: &mut dyn DependencyFacet,
    ) -> Result<Vec<DependencyCoordinate>, StoreError> {
        let mut written = Vec::new();
        let mut deps = self.dependencies(version).into_iter();

        if let Some(adapter) = deps.next() {
            let current = store.get_dependency(&adapter)?;
            if current.as_ref().and_then(|c| c.version()) != Some(version) {
                store.add_dependency(&adapter)?;
                written.push(adapter);
            }
        }
        for dep in deps {
            if !store.has_dependency(&dep)? {
                store.add_dependency(&dep)?;
                written.push(dep);
            }
        }

        tracing::info!(container = self.id(), version, added = written.len(), "installed container dependencies");
        Ok(written)
    }
}

fn test_dep(group: &str, artifact: &str, version: &str) -> DependencyCoordinate {
    DependencyCoordinate::new(group, artifact)
        .with_version(version)
        .with_scope(Scope::Test)
}

pub struct WeldEeEmbedded;

impl Container for WeldEeEmbedded {
    fn id(&self) -> &'static str {
        "weld-ee-embedded-1.1"
    }

    fn description(&self) -> &'static str {
        "Weld EE embedded (CDI in-process)"
    }

    fn runtime_dependencies(&self) -> Vec<DependencyCoordinate> {
        vec![
            test_dep("org.jboss.weld", "weld-core", "1.1.0.Final"),
            DependencyCoordinate::new("org.jboss.spec", "jboss-javaee-6.0")
                .with_version("1.0.0.Final")
                .with_packaging("pom")
                .with_scope(Scope::Provided),
        ]
    }
}

pub struct JbossAsRemote;

impl Container for JbossAsRemote {
    fn id(&self) -> &'static str {
        "jbossas-remote-6"
    }

    fn description(&self) -> &'static str {
        "JBoss AS 6 (running server)"
    }

    fn runtime_dependencies(&self) -> Vec<DependencyCoordinate> {
        vec![jboss_as_client()]
    }
}

pub struct JbossAsManaged;

impl Container for JbossAsManaged {
    fn id(&self) -> &'static str {
        "jbossas-managed-6"
    }

    fn description(&self) -> &'static str {
        "JBoss AS 6 (started and stopped by Arquillian)"
    }

    fn runtime_dependencies(&self) -> Vec<DependencyCoordinate> {
        vec![jboss_as_client()]
    }
}

fn jboss_as_client() -> DependencyCoordinate {
    test_dep("org.jboss.jbossas", "jboss-as-client", "6.0.0.Final").with_packaging("pom")
}

pub struct GlassfishEmbedded;

impl Container for GlassfishEmbedded {
    fn id(&self) -> &'static str {
        "glassfish-embedded-3"
    }

    fn description(&self) -> &'static str {
        "GlassFish 3 embedded"
    }

    fn runtime_dependencies(&self) -> Vec<DependencyCoordinate> {
        vec![
            DependencyCoordinate::new("org.glassfish.extras", "glassfish-embedded-all")
                .with_version("3.0.1")
                .with_scope(Scope::Provided),
        ]
    }
}

pub struct OpenEjbEmbedded;

impl Container for OpenEjbEmbedded {
    fn id(&self) -> &'static str {
        "openejb-embedded-3.1"
    }

    fn description(&self) -> &'static str {
        "OpenEJB 3.1 embedded"
    }

    fn runtime_dependencies(&self) -> Vec<DependencyCoordinate> {
        vec![test_dep("org.apache.openejb", "openejb-core", "3.1.4")]
    }
}

/// Containers by identifier.
pub struct ContainerRegistry {
    containers: Vec<Box<dyn Container>>,
}

impl ContainerRegistry {
    pub fn new(containers: Vec<Box<dyn Container>>) -> Self {
        Self { containers }
    }

    /// Every container arqforge knows how to install.
    pub fn builtin() -> Self {
        Self::new(vec![
            Box::new(WeldEeEmbedded),
            Box::new(JbossAsRemote),
            Box::new(JbossAsManaged),
            Box::new(GlassfishEmbedded),
            Box::new(OpenEjbEmbedded),
        ])
    }

    pub fn get(&self, id: &str) -> Option<&dyn Container> {
        self.containers.iter().find(|c| c.id() == id).map(|c| c.as_ref())
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.containers.iter().map(|c| c.id()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Container> {
        self.containers.iter().map(|c| c.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_ids_are_unique_and_resolvable() {
        let registry = ContainerRegistry::builtin();
        let ids = registry.ids();
        let unique: BTreeSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
        for id in ids {
            assert_eq!(registry.get(id).map(|c| c.id()), Some(id));
        }
        assert!(registry.get("tomcat-embedded").is_none());
    }

    #[test]
    fn test_arquillian_artifact_follows_version() {
        let registry = ContainerRegistry::builtin();
        let weld = registry.get("weld-ee-embedded-1.1").unwrap();
        let deps = weld.dependencies("1.0.0.Alpha5");
        assert_eq!(
            deps[0].to_string(),
            "org.jboss.arquillian.container:arquillian-weld-ee-embedded-1.1:1.0.0.Alpha5:test"
        );
        assert_eq!(deps[2].packaging(), Some("pom"));
        assert_eq!(deps[2].scope(), Some(Scope::Provided));
    }
}
