//! Template rendering
//!
//! Templates live in `templates/` at the repository root and are compiled into the binary by askama.
//! Rendering never touches the filesystem; [`super::codegen::CodeGenerator`] validates and persists the
//! result.

use std::fmt;
use std::str::FromStr;

use arqforge_core::TestFramework;
use arqforge_syntax::SourceDiagnostic;
use arqforge_syntax::java::CompilationUnit;
use arqforge_syntax::java::tokens::is_identifier;
use askama::Template;
use thiserror::Error;

use crate::version::ARQFORGE_VERSION;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("unknown template `{name}` (available: {available})")]
    TemplateNotFound { name: String, available: String },

    #[error("failed to render template `{template}`: {message}")]
    TemplateRender { template: &'static str, message: String },

    #[error("invalid template context: {0}")]
    InvalidContext(String),

    #[error("template `{template}` produced Java that does not parse ({} error(s))", .diagnostics.len())]
    GeneratedSourceInvalid {
        template: &'static str,
        diagnostics: Vec<SourceDiagnostic>,
    },

    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// The templates arqforge ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateName {
    TestClass,
    DeploymentExporter,
}

impl TemplateName {
    pub const ALL: [TemplateName; 2] = [TemplateName::TestClass, TemplateName::DeploymentExporter];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateName::TestClass => "test-class",
            TemplateName::DeploymentExporter => "deployment-exporter",
        }
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateName {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| GenerationError::TemplateNotFound {
                name: s.to_string(),
                available: Self::ALL.map(TemplateName::as_str).join(", "),
            })
    }
}

/// Values substituted into the test-class template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestClassContext {
    package: String,
    class_to_test: String,
    class_to_test_var: String,
    package_import: String,
    enable_jpa: bool,
}

impl TestClassContext {
    /// Context for testing `class_name` in `package` (empty for the default package).
    ///
    /// ## Errors
    /// [`GenerationError::InvalidContext`] when the names are not legal Java, including a class whose
    /// lowercased name is a reserved word.
    pub fn new(package: &str, class_name: &str, enable_jpa: bool) -> Result<Self, GenerationError> {
        if !is_identifier(class_name) {
            return Err(GenerationError::InvalidContext(format!(
                "`{}` is not a valid Java class name",
                class_name
            )));
        }
        if !package.is_empty() && !package.split('.').all(is_identifier) {
            return Err(GenerationError::InvalidContext(format!(
                "`{}` is not a valid Java package name",
                package
            )));
        }
        let class_to_test_var = class_name.to_lowercase();
        if !is_identifier(&class_to_test_var) {
            return Err(GenerationError::InvalidContext(format!(
                "cannot derive a field name for `{}`: `{}` is reserved",
                class_name, class_to_test_var
            )));
        }
        Ok(Self {
            package: package.to_string(),
            class_to_test: class_name.to_string(),
            class_to_test_var,
            package_import: package.to_string(),
            enable_jpa,
        })
    }

    /// Context for testing the primary type of a parsed class.
    pub fn for_unit(unit: &CompilationUnit, enable_jpa: bool) -> Result<Self, GenerationError> {
        let primary = unit
            .primary_type()
            .ok_or_else(|| GenerationError::InvalidContext("source declares no type".to_string()))?;
        Self::new(unit.package_name(), &primary.name, enable_jpa)
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn class_to_test(&self) -> &str {
        &self.class_to_test
    }

    pub fn class_to_test_var(&self) -> &str {
        &self.class_to_test_var
    }

    pub fn enable_jpa(&self) -> bool {
        self.enable_jpa
    }

    pub fn test_class_name(&self) -> String {
        format!("{}Test", self.class_to_test)
    }
}

/// What to render.
#[derive(Debug, Clone, Copy)]
pub enum TemplateRequest<'a> {
    TestClass {
        context: &'a TestClassContext,
        framework: TestFramework,
    },
    DeploymentExporter,
}

impl TemplateRequest<'_> {
    pub fn name(&self) -> TemplateName {
        match self {
            TemplateRequest::TestClass { .. } => TemplateName::TestClass,
            TemplateRequest::DeploymentExporter => TemplateName::DeploymentExporter,
        }
    }
}

#[derive(Template)]
#[template(path = "test_class.java", escape = "none")]
struct TestClassTemplate<'a> {
    version: &'a str,
    ctx: &'a TestClassContext,
    junit: bool,
}

#[derive(Template)]
#[template(path = "deployment_exporter.java", escape = "none")]
struct DeploymentExporterTemplate<'a> {
    version: &'a str,
}

/// Renders [`TemplateRequest`]s to Java text.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    version: String,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    pub fn new() -> Self {
        Self {
            version: ARQFORGE_VERSION.to_string(),
        }
    }

    /// Stamp generated files with `version` instead of the running tool's.
    pub fn with_version(version: impl Into<String>) -> Self {
        Self { version: version.into() }
    }

    pub fn render(&self, request: &TemplateRequest<'_>) -> Result<String, GenerationError> {
        let rendered = match *request {
            TemplateRequest::TestClass { context, framework } => TestClassTemplate {
                version: &self.version,
                ctx: context,
                junit: framework == TestFramework::Junit,
            }
            .render(),
            TemplateRequest::DeploymentExporter => DeploymentExporterTemplate {
                version: &self.version,
            }
            .render(),
        };
        rendered.map_err(|e| GenerationError::TemplateRender {
            template: request.name().as_str(),
            message: e.to_string(),
        })
    }
}
