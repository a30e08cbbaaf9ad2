//! Deployment export
//!
//! `arqforge export <class>` writes the archive built by a class's `@Deployment` method to disk. The
//! archive can only be built inside the project's own classpath, so the pipeline:
//!
//! 1. checks that the class exists and declares a static `@Deployment` method,
//! 2. generates `forge.arquillian.DeploymentExporter` into the test sources unless it is already there,
//! 3. has the execution facet compile the project and run the exporter with the class name,
//! 4. deletes the exporter again unless asked to keep it. Cleanup runs whether or not step 3 succeeded.

use std::io;

use arqforge_syntax::java::CompilationUnit;
use thiserror::Error;

use super::codegen::CodeGenerator;
use super::templates::{GenerationError, TemplateRequest};
use super::{ClassLookupError, load_class};
use crate::facets::{ExecutionError, ExecutionFacet, SourceFacet};

/// Where the exporter lives under the test-source root.
pub const EXPORTER_LOGICAL_PATH: &str = "forge/arquillian/DeploymentExporter.java";
pub const EXPORTER_CLASS: &str = "forge.arquillian.DeploymentExporter";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Resource(#[from] ClassLookupError),

    #[error("`{class}` has no static @Deployment method")]
    NotADeploymentClass { class: String },

    #[error("Error while calling generated DeploymentExporter: {0}")]
    Execution(#[source] ExecutionError),

    #[error("failed to remove generated exporter {path}: {source}")]
    Cleanup {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Error while calling generated DeploymentExporter: {execution} (removing {path} also failed: {cleanup})")]
    ExecutionAndCleanup {
        #[source]
        execution: ExecutionError,
        path: String,
        cleanup: io::Error,
    },
}

/// What a successful export did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// Qualified name of the deployment class, as parsed from its source.
    pub deployment_class: String,
    /// The exporter was generated by this run rather than found in place.
    pub generated: bool,
    /// The exporter was left in the test sources.
    pub kept: bool,
}

pub struct ExportPipeline<'a, S: SourceFacet, E: ExecutionFacet + ?Sized> {
    generator: &'a CodeGenerator,
    sources: &'a S,
    executor: &'a E,
    keep_exporter: bool,
}

impl<'a, S: SourceFacet, E: ExecutionFacet + ?Sized> ExportPipeline<'a, S, E> {
    pub fn new(generator: &'a CodeGenerator, sources: &'a S, executor: &'a E) -> Self {
        Self {
            generator,
            sources,
            executor,
            keep_exporter: false,
        }
    }

    pub fn keep_exporter(mut self, keep: bool) -> Self {
        self.keep_exporter = keep;
        self
    }

    #[tracing::instrument(skip(self), fields(keep = self.keep_exporter))]
    pub fn run(&self, deployment_class: &str) -> Result<ExportReport, ExportError> {
        let unit = load_class(self.sources, deployment_class)?;
        let class = resolve_deployment_class(&unit, deployment_class)?;

        let generated = if self.generator.exists(self.sources, EXPORTER_LOGICAL_PATH) {
            tracing::debug!("reusing existing exporter");
            false
        } else {
            let artifact = self.generator.generate(&TemplateRequest::DeploymentExporter)?;
            if let Err(e) = self.generator.persist(&artifact, self.sources) {
                if !self.keep_exporter {
                    self.remove_partial_exporter();
                }
                return Err(e.into());
            }
            true
        };

        let executed = self.executor.execute_project_class(EXPORTER_CLASS, &class);
        let report = ExportReport {
            deployment_class: class,
            generated,
            kept: self.keep_exporter,
        };
        if self.keep_exporter {
            return executed.map(|()| report).map_err(ExportError::Execution);
        }

        let path = EXPORTER_LOGICAL_PATH.to_string();
        match (executed, self.generator.delete(self.sources, EXPORTER_LOGICAL_PATH)) {
            (Ok(()), Ok(())) => {
                tracing::debug!("removed exporter");
                Ok(report)
            }
            (Ok(()), Err(source)) => Err(ExportError::Cleanup { path, source }),
            (Err(execution), Ok(())) => Err(ExportError::Execution(execution)),
            (Err(execution), Err(cleanup)) => Err(ExportError::ExecutionAndCleanup {
                execution,
                path,
                cleanup,
            }),
        }
    }

    /// Best effort after a failed write; the write error is what gets reported.
    fn remove_partial_exporter(&self) {
        if let Err(e) = self.generator.delete(self.sources, EXPORTER_LOGICAL_PATH) {
            tracing::warn!(path = EXPORTER_LOGICAL_PATH, error = %e, "failed to remove partially written exporter");
        }
    }
}

/// The qualified name of `unit`'s primary type, provided it declares a static `@Deployment` method.
pub fn resolve_deployment_class(unit: &CompilationUnit, requested: &str) -> Result<String, ExportError> {
    let not_deployment = || ExportError::NotADeploymentClass {
        class: requested.to_string(),
    };
    let primary = unit.primary_type().ok_or_else(not_deployment)?;
    if !primary.annotated_methods("Deployment").any(|m| m.is_static()) {
        return Err(not_deployment());
    }
    unit.qualified_name().ok_or_else(not_deployment)
}
