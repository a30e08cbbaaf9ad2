//! Code generation: render a template, check the result is well-formed Java, hand it to a source facet.

use std::io;

use arqforge_syntax::SourceDiagnostic;
use arqforge_syntax::java::{self, CompilationUnit};

use super::templates::{GenerationError, TemplateRenderer, TemplateRequest};
use crate::facets::{JavaResource, SourceFacet};

/// A rendered and validated Java source file.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedArtifact {
    logical_path: String,
    qualified_name: String,
    content: String,
    unit: CompilationUnit,
}

impl GeneratedArtifact {
    /// `com/acme/WidgetTest.java`
    pub fn logical_path(&self) -> &str {
        &self.logical_path
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// The parsed outline of [`Self::content`].
    pub fn unit(&self) -> &CompilationUnit {
        &self.unit
    }
}

#[derive(Debug, Clone, Default)]
pub struct CodeGenerator {
    renderer: TemplateRenderer,
}

impl CodeGenerator {
    pub fn new(renderer: TemplateRenderer) -> Self {
        Self { renderer }
    }

    /// Render `request` and parse the result.
    ///
    /// The output always ends with exactly one newline. Its logical path is derived from the package and
    /// primary type it declares.
    #[tracing::instrument(skip_all, fields(template = %request.name()))]
    pub fn generate(&self, request: &TemplateRequest<'_>) -> Result<GeneratedArtifact, GenerationError> {
        let rendered = self.renderer.render(request)?;
        let artifact = Self::validate(request.name().as_str(), &rendered)?;
        tracing::debug!(class = %artifact.qualified_name, "generated source");
        Ok(artifact)
    }

    /// Check that `rendered` is a Java unit declaring a type.
    ///
    /// ## Errors
    /// [`GenerationError::GeneratedSourceInvalid`] carrying one diagnostic per parse error.
    pub fn validate(template: &'static str, rendered: &str) -> Result<GeneratedArtifact, GenerationError> {
        let content = format!("{}\n", rendered.trim_end());

        let invalid =
            |diagnostics: Vec<SourceDiagnostic>| GenerationError::GeneratedSourceInvalid { template, diagnostics };
        let unit = java::parse_source(&content).map_err(|errors| {
            invalid(
                errors
                    .iter()
                    .map(|e| e.to_diagnostic(template, &content))
                    .collect(),
            )
        })?;
        let qualified_name = unit.qualified_name().ok_or_else(|| invalid(Vec::new()))?;

        Ok(GeneratedArtifact {
            logical_path: java::logical_path_for(&qualified_name),
            qualified_name,
            content,
            unit,
        })
    }

    /// Write `artifact` to the test-source area of `sources`.
    pub fn persist<S: SourceFacet>(
        &self,
        artifact: &GeneratedArtifact,
        sources: &S,
    ) -> Result<S::Resource, GenerationError> {
        let resource = sources
            .save_test_source(artifact)
            .map_err(|source| GenerationError::Io {
                path: artifact.logical_path.clone(),
                source,
            })?;
        tracing::info!(path = resource.logical_path(), "wrote test source");
        Ok(resource)
    }

    /// Whether a test source exists at `logical_path`.
    pub fn exists<S: SourceFacet>(&self, sources: &S, logical_path: &str) -> bool {
        sources.test_resource(logical_path).exists()
    }

    /// Remove the test source at `logical_path`. Removing a missing source succeeds.
    pub fn delete<S: SourceFacet>(&self, sources: &S, logical_path: &str) -> io::Result<()> {
        sources.test_resource(logical_path).delete()
    }
}
