//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fmt::Display;
use std::sync::atomic::Ordering;

use arqforge_core::TestFramework;

use crate::backend::export::ExportError;
use crate::backend::{
    ClassLookupError, CodeGenerator, ExportPipeline, GenerationError, MavenProject, TemplateName, TemplateRequest,
    TestClassContext, load_class,
};
use crate::config::ToolConfig;
use crate::containers::ContainerRegistry;
use crate::facets::Prompter;
use crate::maven::{LocalRepository, MavenDependencies, PomFile};
use crate::negotiate::{DependencyNegotiator, VersionPins};

use super::prompt::{NonInteractivePrompter, TerminalPrompter};
use super::{CliError, CliResult, ExitCode};

fn fail(err: impl Display) -> CliError {
    CliError::failure(format!("Error: {}", err))
}

/// Generated sources that do not parse are our bug, not the operator's; show the full report.
fn generation_error(err: GenerationError) -> CliError {
    match err {
        GenerationError::GeneratedSourceInvalid { template, diagnostics } => {
            let mut msg = format!(
                "Error: template `{}` produced invalid Java. This is a bug in arqforge, please report it.\n",
                template
            );
            for diagnostic in diagnostics {
                msg.push_str(&format!("{:?}\n", miette::Report::new(diagnostic)));
            }
            CliError::failure(msg.trim_end())
        }
        other => fail(other),
    }
}

fn export_error(err: ExportError) -> CliError {
    match err {
        ExportError::Generation(inner) => generation_error(inner),
        other => fail(other),
    }
}

fn prompter_for(config: &ToolConfig) -> Box<dyn Prompter> {
    if config.interactive {
        Box::new(TerminalPrompter)
    } else {
        Box::new(NonInteractivePrompter)
    }
}

// ============================================================================
// setup
// ============================================================================

pub fn setup(
    config: &ToolConfig,
    framework: TestFramework,
    container_id: &str,
    pins: &VersionPins,
) -> CliResult<ExitCode> {
    let registry = ContainerRegistry::builtin();
    let container = registry.get(container_id).ok_or_else(|| {
        CliError::failure(format!(
            "Error: unknown container `{}`. Known containers: {}",
            container_id,
            registry.ids().join(", ")
        ))
    })?;

    let pom = PomFile::open(config.pom_path()).map_err(fail)?;
    let repository = LocalRepository::new(config.local_repository().map_err(fail)?);
    let mut store = MavenDependencies::new(pom, repository);
    let mut prompter = prompter_for(config);

    let companion = container.arquillian_artifact();
    let outcome = DependencyNegotiator::new(&mut store, prompter.as_mut())
        .negotiate(framework, Some(&companion), pins)
        .map_err(fail)?;
    let installed = container
        .install_dependencies(&outcome.resolved_version, &mut store)
        .map_err(fail)?;

    for dependency in outcome.declared.iter().chain(&installed) {
        println!("Added {}", dependency);
    }
    println!(
        "{} with Arquillian {} on {} is ready in {}",
        framework.display_name(),
        outcome.resolved_version,
        container.id(),
        store.pom().path().display()
    );
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// create-test
// ============================================================================

/// The framework declared in the project's POM. JUnit unless TestNG is the only one declared.
pub fn declared_framework(config: &ToolConfig) -> TestFramework {
    let Ok(pom) = PomFile::open(config.pom_path()) else {
        return TestFramework::Junit;
    };
    let dependencies = match pom.dependencies() {
        Ok(dependencies) => dependencies,
        Err(e) => {
            tracing::warn!(error = %e, "cannot read declared test framework; using JUnit");
            return TestFramework::Junit;
        }
    };
    let declared = |framework: TestFramework| {
        let primary = framework.primary();
        dependencies.iter().any(|d| d.same_identity(&primary))
    };
    if declared(TestFramework::TestNg) && !declared(TestFramework::Junit) {
        TestFramework::TestNg
    } else {
        TestFramework::Junit
    }
}

fn test_class_context(project: &MavenProject, class: &str, enable_jpa: bool) -> CliResult<TestClassContext> {
    let unit = load_class(project, class).map_err(|e| match e {
        ClassLookupError::NotFound { .. } => CliError::failure(format!(
            "Error: {} (searched {} and {})",
            e,
            project.config().main_source_root().display(),
            project.config().test_source_root().display()
        )),
        other => fail(other),
    })?;
    TestClassContext::for_unit(&unit, enable_jpa).map_err(generation_error)
}

pub fn create_test(config: &ToolConfig, class: &str, enable_jpa: bool) -> CliResult<ExitCode> {
    let project = MavenProject::new(config.clone());
    let context = test_class_context(&project, class, enable_jpa)?;
    let framework = declared_framework(config);

    let generator = CodeGenerator::default();
    let artifact = generator
        .generate(&TemplateRequest::TestClass {
            context: &context,
            framework,
        })
        .map_err(generation_error)?;
    let resource = generator.persist(&artifact, &project).map_err(generation_error)?;

    println!(
        "Created {} test {} at {}",
        framework.display_name(),
        artifact.qualified_name(),
        resource.path().display()
    );
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// export
// ============================================================================

pub fn export(config: &ToolConfig, class: &str, keep_exporter: bool) -> CliResult<ExitCode> {
    let project = MavenProject::new(config.clone());
    let flag = project.interrupt_flag();
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
        .map_err(|e| CliError::failure(format!("Error: cannot install interrupt handler: {}", e)))?;

    let generator = CodeGenerator::default();
    let report = ExportPipeline::new(&generator, &project, &project)
        .keep_exporter(keep_exporter)
        .run(class)
        .map_err(export_error)?;

    println!("Exported deployment of {}", report.deployment_class);
    if report.kept {
        println!("Kept generated exporter in {}", config.test_source_root().display());
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// emit / containers
// ============================================================================

/// Render a template to stdout without writing it into the project.
pub fn emit(config: &ToolConfig, template: &str, class: Option<&str>, enable_jpa: bool) -> CliResult<ExitCode> {
    let name: TemplateName = template.parse().map_err(fail)?;
    let generator = CodeGenerator::default();
    let artifact = match name {
        TemplateName::TestClass => {
            let class = class.ok_or_else(|| CliError::failure("Error: `emit test-class` requires --class"))?;
            let project = MavenProject::new(config.clone());
            let context = test_class_context(&project, class, enable_jpa)?;
            generator.generate(&TemplateRequest::TestClass {
                context: &context,
                framework: declared_framework(config),
            })
        }
        TemplateName::DeploymentExporter => generator.generate(&TemplateRequest::DeploymentExporter),
    }
    .map_err(generation_error)?;

    print!("{}", artifact.content());
    Ok(ExitCode::SUCCESS)
}

pub fn containers() -> CliResult<ExitCode> {
    let registry = ContainerRegistry::builtin();
    let width = registry.ids().iter().map(|id| id.len()).max().unwrap_or(0);
    for container in registry.iter() {
        println!("{:width$}  {}", container.id(), container.description(), width = width);
    }
    Ok(ExitCode::SUCCESS)
}
