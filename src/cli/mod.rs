//! CLI module for arqforge
//!
//! ## Commands
//!
//! - `setup` - Declare test framework, Arquillian adapter and container dependencies
//! - `create-test --class <fqcn>` - Generate an Arquillian test for a class
//! - `export --class <fqcn>` - Write the archive of a `@Deployment` method to disk
//! - `emit <template>` - Render a template to stdout (debug)
//! - `containers` - List supported containers
//!
//! ## Modules
//!
//! - `commands` - Command implementations
//! - `prompt` - Terminal and non-interactive prompters
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;
pub mod prompt;

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::process;

use arqforge_core::{TestFramework, frameworks};
use clap::{Parser, Subcommand};

use crate::config::ToolConfig;
use crate::negotiate::VersionPins;
use crate::version::ARQFORGE_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Arquillian test scaffolding for Maven projects
#[derive(Parser, Debug)]
#[command(name = "arqforge")]
#[command(version = ARQFORGE_VERSION)]
#[command(about = "Arquillian test scaffolding for Maven projects", long_about = None)]
pub struct Cli {
    /// Project root (default: current directory)
    #[arg(long, value_name = "DIR", global = true)]
    pub project: Option<PathBuf>,

    /// Never prompt; use defaults and command-line versions instead
    #[arg(long, global = true)]
    pub non_interactive: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Declare test framework, Arquillian and container dependencies in pom.xml
    Setup {
        /// junit or testng
        #[arg(long, value_name = "FRAMEWORK", default_value = "junit", value_parser = parse_framework)]
        test_framework: TestFramework,
        /// Container identifier (see `arqforge containers`)
        #[arg(long, value_name = "ID")]
        container: String,
        /// Test framework version to install instead of prompting
        #[arg(long, value_name = "VERSION")]
        framework_version: Option<String>,
        /// Arquillian version to install instead of prompting
        #[arg(long, value_name = "VERSION")]
        arquillian_version: Option<String>,
    },

    /// Generate an Arquillian test for a class
    CreateTest {
        /// Fully qualified name of the class to test
        #[arg(long, value_name = "CLASS")]
        class: String,
        /// Inject an EntityManager and package persistence.xml
        #[arg(long = "enable-jpa", alias = "enableJPA")]
        enable_jpa: bool,
    },

    /// Export the archive built by a class's @Deployment method
    Export {
        /// Fully qualified name of the deployment class
        #[arg(long, value_name = "CLASS")]
        class: String,
        /// Leave the generated DeploymentExporter in the test sources
        #[arg(long = "keep-exporter", alias = "keepExporter")]
        keep_exporter: bool,
    },

    /// Render a template to stdout without touching the project (debug)
    Emit {
        /// test-class or deployment-exporter
        #[arg(value_name = "TEMPLATE")]
        template: String,
        /// Class under test, for test-class
        #[arg(long, value_name = "CLASS")]
        class: Option<String>,
        #[arg(long = "enable-jpa", alias = "enableJPA")]
        enable_jpa: bool,
    },

    /// List supported containers
    Containers,
}

fn parse_framework(value: &str) -> Result<TestFramework, String> {
    frameworks::from_str(value).ok_or_else(|| format!("unknown test framework `{}` (expected junit or testng)", value))
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

fn load_config(cli: &Cli) -> CliResult<ToolConfig> {
    let root = match &cli.project {
        Some(dir) => dir.clone(),
        None => env::current_dir()
            .map_err(|e| CliError::failure(format!("Error: cannot determine current directory: {}", e)))?,
    };
    let mut config =
        ToolConfig::load(&root).map_err(|e| CliError::failure(format!("Error: {}", e)))?;
    if cli.non_interactive {
        config.interactive = false;
    }
    tracing::debug!(root = %config.project_root.display(), interactive = config.interactive, "loaded configuration");
    Ok(config)
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    if let Command::Containers = cli.command {
        return commands::containers();
    }
    let config = load_config(&cli)?;

    match cli.command {
        Command::Setup {
            test_framework,
            container,
            framework_version,
            arquillian_version,
        } => {
            let pins = VersionPins {
                framework_version,
                arquillian_version,
            };
            commands::setup(&config, test_framework, &container, &pins)
        }
        Command::CreateTest { class, enable_jpa } => commands::create_test(&config, &class, enable_jpa),
        Command::Export { class, keep_exporter } => commands::export(&config, &class, keep_exporter),
        Command::Emit {
            template,
            class,
            enable_jpa,
        } => commands::emit(&config, &template, class.as_deref(), enable_jpa),
        Command::Containers => commands::containers(),
    }
}

// ============================================================================
// Tests
// ============================================================================
