#![forbid(unsafe_code)]
//! arqforge: Arquillian test scaffolding for Maven projects.
//!
//! The tool installs test-framework and container dependencies into a project's `pom.xml`, generates
//! Arquillian test classes from templates, and exports the archive produced by a `@Deployment` method by
//! running a generated helper class inside the project's own test classpath.
//!
//! ## Layout
//!
//! - [`negotiate`] - picks versions for a (framework, adapter) dependency pair
//! - [`containers`] - per-runtime dependency sets, looked up by identifier
//! - [`backend`] - templates, code generation, the export pipeline and the Maven project facets
//! - [`maven`] - `pom.xml` dependency store and local-repository version resolver
//! - [`facets`] - the traits the core consumes from its host
//! - [`cli`] - command-line front end
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `backend` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod backend;
pub mod cli;
pub mod config;
pub mod containers;
pub mod facets;
pub mod maven;
pub mod negotiate;
pub mod version;

pub use backend::codegen::{CodeGenerator, GeneratedArtifact};
pub use backend::export::{ExportPipeline, ExportReport};
pub use backend::project::MavenProject;
pub use config::ToolConfig;
pub use containers::{Container, ContainerRegistry};
pub use negotiate::{DependencyNegotiator, NegotiationOutcome};
