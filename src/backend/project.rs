//! The target Maven project as seen by the backend
//!
//! - Sources live under the configured main and test roots (`src/main/java`, `src/test/java`).
//! - Project classes run through `exec:java` in the test classpath scope, with the Maven build
//!   inheriting the terminal so its output streams straight to the operator.

use std::fs;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arqforge_syntax::java::logical_path_for;

use super::codegen::GeneratedArtifact;
use crate::config::ToolConfig;
use crate::facets::{ExecutionError, ExecutionFacet, FileResource, SourceFacet};

pub struct MavenProject {
    config: ToolConfig,
    interrupted: Arc<AtomicBool>,
}

impl MavenProject {
    pub fn new(config: ToolConfig) -> Self {
        Self {
            config,
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Set by the Ctrl-C handler. Once raised, no build is launched, and a build that finishes after it
    /// was raised is reported as interrupted.
    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupted)
    }

    /// Arguments for running `qualified_name` with `argument` after compiling the test sources.
    pub fn exec_args(qualified_name: &str, argument: &str) -> Vec<String> {
        vec![
            "-q".to_string(),
            "test-compile".to_string(),
            "exec:java".to_string(),
            format!("-Dexec.mainClass={}", qualified_name),
            format!("-Dexec.args={}", argument),
            "-Dexec.classpathScope=test".to_string(),
        ]
    }

    fn resource_under(root: &Path, logical_path: &str) -> FileResource {
        FileResource::new(logical_path, root.join(logical_path))
    }
}

impl SourceFacet for MavenProject {
    type Resource = FileResource;

    fn save_test_source(&self, artifact: &GeneratedArtifact) -> io::Result<FileResource> {
        let resource = self.test_resource(artifact.logical_path());
        if let Some(parent) = resource.path().parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(resource.path(), artifact.content())?;
        Ok(resource)
    }

    fn test_resource(&self, logical_path: &str) -> FileResource {
        Self::resource_under(&self.config.test_source_root(), logical_path)
    }

    fn find_class(&self, qualified_name: &str) -> Option<FileResource> {
        let logical_path = logical_path_for(qualified_name);
        [self.config.main_source_root(), self.config.test_source_root()]
            .iter()
            .map(|root| Self::resource_under(root, &logical_path))
            .find(|r| r.path().is_file())
    }
}

impl ExecutionFacet for MavenProject {
    #[tracing::instrument(skip(self))]
    fn execute_project_class(&self, qualified_name: &str, argument: &str) -> Result<(), ExecutionError> {
        let args = Self::exec_args(qualified_name, argument);
        let command = format!("{} {}", self.config.maven_command, args.join(" "));
        if self.interrupted.load(Ordering::SeqCst) {
            tracing::info!(%command, "interrupted before launch");
            return Err(ExecutionError::Interrupted { command });
        }
        tracing::info!(%command, "running project class");

        let mut child = Command::new(&self.config.maven_command)
            .args(&args)
            .current_dir(&self.config.project_root)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| ExecutionError::Launch {
                command: command.clone(),
                source,
            })?;
        let status = child.wait().map_err(|source| ExecutionError::Launch {
            command: command.clone(),
            source,
        })?;

        if self.interrupted.load(Ordering::SeqCst) {
            return Err(ExecutionError::Interrupted { command });
        }
        match status.code() {
            Some(0) => Ok(()),
            Some(code) => Err(ExecutionError::Exit { command, code }),
            // Killed by a signal.
            None => Err(ExecutionError::Interrupted { command }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facets::JavaResource;

    fn project(dir: &Path, maven: &str) -> MavenProject {
        let mut config = ToolConfig::defaults(dir);
        config.maven_command = maven.to_string();
        MavenProject::new(config)
    }

    #[test]
    fn test_find_class_prefers_main_sources() {
        let dir = tempfile::tempdir().unwrap();
        let project = project(dir.path(), "mvn");
        for root in ["src/main/java", "src/test/java"] {
            let pkg = dir.path().join(root).join("com/acme");
            fs::create_dir_all(&pkg).unwrap();
            fs::write(pkg.join("Widget.java"), root).unwrap();
        }
        let found = project.find_class("com.acme.Widget").unwrap();
        assert_eq!(found.read().unwrap(), "src/main/java");
        assert_eq!(found.logical_path(), "com/acme/Widget.java");
        assert!(project.find_class("com.acme.Gadget").is_none());
    }

    #[test]
    fn test_exec_args() {
        let args = MavenProject::exec_args("forge.arquillian.DeploymentExporter", "com.acme.WidgetTest");
        assert_eq!(args[3], "-Dexec.mainClass=forge.arquillian.DeploymentExporter");
        assert_eq!(args[4], "-Dexec.args=com.acme.WidgetTest");
        assert_eq!(args[5], "-Dexec.classpathScope=test");
    }

    #[test]
    fn test_launch_failure() {
        let dir = tempfile::tempdir().unwrap();
        let project = project(dir.path(), "arqforge-no-such-maven");
        let err = project.execute_project_class("a.B", "c.D").unwrap_err();
        assert!(matches!(err, ExecutionError::Launch { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        assert!(project(dir.path(), "true").execute_project_class("a.B", "c.D").is_ok());
        let err = project(dir.path(), "false").execute_project_class("a.B", "c.D").unwrap_err();
        assert!(matches!(err, ExecutionError::Exit { code: 1, .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_interrupt_flag_wins() {
        let dir = tempfile::tempdir().unwrap();
        let project = project(dir.path(), "true");
        project.interrupt_flag().store(true, Ordering::SeqCst);
        let err = project.execute_project_class("a.B", "c.D").unwrap_err();
        assert!(matches!(err, ExecutionError::Interrupted { .. }));
    }

    #[test]
    fn test_interrupt_before_launch_skips_the_build() {
        let dir = tempfile::tempdir().unwrap();
        // Launching this would fail, so an `Interrupted` error shows the build never started.
        let project = project(dir.path(), "arqforge-no-such-maven");
        project.interrupt_flag().store(true, Ordering::SeqCst);
        let err = project.execute_project_class("a.B", "c.D").unwrap_err();
        assert!(matches!(err, ExecutionError::Interrupted { .. }));
    }
}
