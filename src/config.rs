//! Tool configuration
//!
//! Settings come from, in increasing precedence: built-in defaults, `<project>/arqforge.toml`, environment
//! variables, and command-line flags (applied by the CLI on the loaded value).

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "arqforge.toml";
/// Overrides `maven_command`.
pub const MAVEN_ENV: &str = "ARQFORGE_MAVEN";
/// Overrides `local_repository`.
pub const MAVEN_REPO_ENV: &str = "ARQFORGE_MAVEN_REPO";

const DEFAULT_MAIN_SOURCES: &str = "src/main/java";
const DEFAULT_TEST_SOURCES: &str = "src/test/java";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("cannot locate the local Maven repository: no home directory; set ARQFORGE_MAVEN_REPO")]
    NoLocalRepository,
}

/// On-disk shape of `arqforge.toml`. Every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub maven_command: Option<String>,
    pub local_repository: Option<PathBuf>,
    pub main_sources: Option<PathBuf>,
    pub test_sources: Option<PathBuf>,
    pub interactive: Option<bool>,
}

/// Effective configuration for one project.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolConfig {
    pub project_root: PathBuf,
    /// Program used for `test-compile exec:java`.
    pub maven_command: String,
    local_repository: Option<PathBuf>,
    /// Relative to `project_root`.
    pub main_sources: PathBuf,
    /// Relative to `project_root`.
    pub test_sources: PathBuf,
    pub interactive: bool,
}

impl ToolConfig {
    /// Built-in defaults for a project rooted at `project_root`.
    pub fn defaults(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        let maven_command = if project_root.join("mvnw").is_file() {
            "./mvnw".to_string()
        } else {
            "mvn".to_string()
        };
        Self {
            project_root,
            maven_command,
            local_repository: dirs::home_dir().map(|home| home.join(".m2").join("repository")),
            main_sources: PathBuf::from(DEFAULT_MAIN_SOURCES),
            test_sources: PathBuf::from(DEFAULT_TEST_SOURCES),
            interactive: std::io::stdin().is_terminal(),
        }
    }

    /// Load the configuration for `project_root` using the process environment.
    pub fn load(project_root: &Path) -> Result<Self, ConfigError> {
        Self::load_with_env(project_root, |key| std::env::var(key).ok())
    }

    /// Load the configuration, reading environment overrides through `env`.
    pub fn load_with_env(project_root: &Path, env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::defaults(project_root);

        let path = config_path(project_root);
        if path.is_file() {
            let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
            let file: ConfigFile = toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;
            config.apply_file(file);
            tracing::debug!(path = %path.display(), "loaded configuration file");
        }

        if let Some(command) = env(MAVEN_ENV).filter(|v| !v.is_empty()) {
            config.maven_command = command;
        }
        if let Some(repo) = env(MAVEN_REPO_ENV).filter(|v| !v.is_empty()) {
            config.local_repository = Some(PathBuf::from(repo));
        }
        Ok(config)
    }

    fn apply_file(&mut self, file: ConfigFile) {
        if let Some(command) = file.maven_command {
            self.maven_command = command;
        }
        if let Some(repo) = file.local_repository {
            self.local_repository = Some(repo);
        }
        if let Some(main) = file.main_sources {
            self.main_sources = main;
        }
        if let Some(test) = file.test_sources {
            self.test_sources = test;
        }
        if let Some(interactive) = file.interactive {
            self.interactive = interactive;
        }
    }

    pub fn with_local_repository(mut self, path: impl Into<PathBuf>) -> Self {
        self.local_repository = Some(path.into());
        self
    }

    pub fn local_repository(&self) -> Result<&Path, ConfigError> {
        self.local_repository.as_deref().ok_or(ConfigError::NoLocalRepository)
    }

    pub fn pom_path(&self) -> PathBuf {
        self.project_root.join("pom.xml")
    }

    pub fn main_source_root(&self) -> PathBuf {
        self.project_root.join(&self.main_sources)
    }

    pub fn test_source_root(&self) -> PathBuf {
        self.project_root.join(&self.test_sources)
    }
}

pub fn config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_FILE_NAME)
}
