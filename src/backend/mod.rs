#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
//! arqforge backend
//!
//! Everything that produces or consumes Java sources in the target project.
//!
//! ## Module Organization
//!
//! - `templates` - askama templates and their contexts
//! - `codegen` - render, validate, persist
//! - `export` - the generate / execute / clean-up pipeline behind `arqforge export`
//! - `project` - the Maven project as a source and execution facet

pub mod codegen;
pub mod export;
pub mod project;
pub mod templates;

use arqforge_syntax::diagnostics::format_errors;
use arqforge_syntax::java::{self, CompilationUnit};
use thiserror::Error;

use crate::facets::{JavaResource, SourceFacet};

pub use codegen::{CodeGenerator, GeneratedArtifact};
pub use export::{ExportError, ExportPipeline, ExportReport};
pub use project::MavenProject;
pub use templates::{GenerationError, TemplateName, TemplateRenderer, TemplateRequest, TestClassContext};

/// Failures locating or reading a class in the project's sources.
#[derive(Debug, Error)]
pub enum ClassLookupError {
    #[error("class `{class}` was not found in the main or test sources")]
    NotFound { class: String },

    #[error("failed to read {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{class}` could not be parsed:\n{details}")]
    Invalid { class: String, details: String },
}

/// Find `qualified_name` in `sources` and parse it.
pub fn load_class<S: SourceFacet>(sources: &S, qualified_name: &str) -> Result<CompilationUnit, ClassLookupError> {
    let resource = sources
        .find_class(qualified_name)
        .ok_or_else(|| ClassLookupError::NotFound {
            class: qualified_name.to_string(),
        })?;
    let text = resource.read().map_err(|source| ClassLookupError::Unreadable {
        path: resource.logical_path().to_string(),
        source,
    })?;
    java::parse_source(&text).map_err(|errors| ClassLookupError::Invalid {
        class: qualified_name.to_string(),
        details: format_errors(resource.logical_path(), &text, &errors),
    })
}
