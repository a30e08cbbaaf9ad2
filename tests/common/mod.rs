//! In-memory facets shared by the integration tests.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::io;
use std::rc::Rc;

use arqforge::GeneratedArtifact;
use arqforge::backend::export::EXPORTER_LOGICAL_PATH;
use arqforge::facets::{
    DependencyFacet, ExecutionError, ExecutionFacet, JavaResource, PromptError, Prompter, ResolutionError,
    SourceFacet, StoreError,
};
use arqforge_core::DependencyCoordinate;
use arqforge_syntax::java::logical_path_for;

// ============================================================================
// Dependency store
// ============================================================================

#[derive(Default)]
pub struct MemoryStore {
    pub declared: Vec<DependencyCoordinate>,
    pub available: BTreeMap<String, Vec<String>>,
    /// Resolution fails on this call number (1-based).
    pub fail_resolution_on: Option<usize>,
    pub resolutions: Cell<usize>,
}

impl MemoryStore {
    pub fn with_versions(mut self, key: &str, versions: &[&str]) -> Self {
        self.available
            .insert(key.to_string(), versions.iter().map(|v| v.to_string()).collect());
        self
    }

    pub fn declare(mut self, coordinate: DependencyCoordinate) -> Self {
        self.declared.push(coordinate);
        self
    }

    pub fn version_of(&self, key: &str) -> Option<String> {
        self.declared
            .iter()
            .find(|d| d.key() == key)
            .and_then(|d| d.version().map(str::to_string))
    }
}

impl DependencyFacet for MemoryStore {
    fn get_dependency(&self, coordinate: &DependencyCoordinate) -> Result<Option<DependencyCoordinate>, StoreError> {
        Ok(self.declared.iter().find(|d| d.same_identity(coordinate)).cloned())
    }

    fn add_dependency(&mut self, coordinate: &DependencyCoordinate) -> Result<(), StoreError> {
        match self.declared.iter_mut().find(|d| d.same_identity(coordinate)) {
            Some(existing) => *existing = coordinate.clone(),
            None => self.declared.push(coordinate.clone()),
        }
        Ok(())
    }

    fn resolve_available_versions(
        &self,
        coordinate: &DependencyCoordinate,
    ) -> Result<Vec<DependencyCoordinate>, ResolutionError> {
        let call = self.resolutions.get() + 1;
        self.resolutions.set(call);
        if self.fail_resolution_on == Some(call) {
            return Err(ResolutionError::Unreachable {
                path: "memory://repository".into(),
                source: io::Error::new(io::ErrorKind::TimedOut, "resolver went away"),
            });
        }
        Ok(self
            .available
            .get(&coordinate.key())
            .map(|vs| vs.iter().map(|v| coordinate.clone().with_version(v.as_str())).collect())
            .unwrap_or_default())
    }
}

// ============================================================================
// Prompting
// ============================================================================

/// Answers from a script; `None` means "accept the default" and fails when there is none.
#[derive(Default)]
pub struct ScriptedPrompter {
    pub answers: Vec<Option<usize>>,
    pub questions: Vec<String>,
}

impl ScriptedPrompter {
    pub fn answering(answers: &[Option<usize>]) -> Self {
        Self {
            answers: answers.to_vec(),
            questions: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn choose(&mut self, question: &str, _options: &[String], default: Option<usize>) -> Result<usize, PromptError> {
        self.questions.push(question.to_string());
        let answer = if self.answers.is_empty() { None } else { self.answers.remove(0) };
        answer.or(default).ok_or_else(|| PromptError::AnswerRequired {
            question: question.to_string(),
        })
    }
}

// ============================================================================
// Sources
// ============================================================================

type Files = Rc<RefCell<BTreeMap<String, String>>>;

#[derive(Clone, Default)]
pub struct MemorySources {
    pub main: Files,
    pub test: Files,
    pub fail_delete: Rc<Cell<bool>>,
    /// Saves write only the first line, then fail.
    pub fail_save: Rc<Cell<bool>>,
}

impl MemorySources {
    pub fn add_main(&self, qualified_name: &str, source: &str) {
        self.main
            .borrow_mut()
            .insert(logical_path_for(qualified_name), source.to_string());
    }

    pub fn add_test(&self, qualified_name: &str, source: &str) {
        self.test
            .borrow_mut()
            .insert(logical_path_for(qualified_name), source.to_string());
    }

    pub fn test_paths(&self) -> Vec<String> {
        self.test.borrow().keys().cloned().collect()
    }

    pub fn has_exporter(&self) -> bool {
        self.test.borrow().contains_key(EXPORTER_LOGICAL_PATH)
    }
}

pub struct MemoryResource {
    files: Files,
    logical_path: String,
    fail_delete: bool,
}

impl JavaResource for MemoryResource {
    fn logical_path(&self) -> &str {
        &self.logical_path
    }

    fn exists(&self) -> bool {
        self.files.borrow().contains_key(&self.logical_path)
    }

    fn read(&self) -> io::Result<String> {
        self.files
            .borrow()
            .get(&self.logical_path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, self.logical_path.clone()))
    }

    fn delete(&self) -> io::Result<()> {
        if self.fail_delete {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only source tree"));
        }
        self.files.borrow_mut().remove(&self.logical_path);
        Ok(())
    }
}

impl SourceFacet for MemorySources {
    type Resource = MemoryResource;

    fn save_test_source(&self, artifact: &GeneratedArtifact) -> io::Result<MemoryResource> {
        if self.fail_save.get() {
            let partial = artifact.content().lines().next().unwrap_or_default();
            self.test
                .borrow_mut()
                .insert(artifact.logical_path().to_string(), partial.to_string());
            return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
        }
        self.test
            .borrow_mut()
            .insert(artifact.logical_path().to_string(), artifact.content().to_string());
        Ok(self.test_resource(artifact.logical_path()))
    }

    fn test_resource(&self, logical_path: &str) -> MemoryResource {
        MemoryResource {
            files: Rc::clone(&self.test),
            logical_path: logical_path.to_string(),
            fail_delete: self.fail_delete.get(),
        }
    }

    fn find_class(&self, qualified_name: &str) -> Option<MemoryResource> {
        let logical_path = logical_path_for(qualified_name);
        [&self.main, &self.test]
            .into_iter()
            .find(|files| files.borrow().contains_key(&logical_path))
            .map(|files| MemoryResource {
                files: Rc::clone(files),
                logical_path,
                fail_delete: false,
            })
    }
}

// ============================================================================
// Execution
// ============================================================================

/// Records each run and whether the exporter was in place at the time.
pub struct RecordingExecutor {
    sources: MemorySources,
    pub exit_code: Option<i32>,
    pub calls: RefCell<Vec<(String, String, bool)>>,
}

impl RecordingExecutor {
    pub fn new(sources: &MemorySources) -> Self {
        Self {
            sources: sources.clone(),
            exit_code: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(sources: &MemorySources, code: i32) -> Self {
        Self {
            exit_code: Some(code),
            ..Self::new(sources)
        }
    }
}

impl ExecutionFacet for RecordingExecutor {
    fn execute_project_class(&self, qualified_name: &str, argument: &str) -> Result<(), ExecutionError> {
        self.calls.borrow_mut().push((
            qualified_name.to_string(),
            argument.to_string(),
            self.sources.has_exporter(),
        ));
        match self.exit_code {
            Some(code) => Err(ExecutionError::Exit {
                command: "mvn exec:java".to_string(),
                code,
            }),
            None => Ok(()),
        }
    }
}

pub const DEPLOYMENT_TEST: &str = "package com.acme;

import org.jboss.arquillian.api.Deployment;
import org.jboss.shrinkwrap.api.spec.JavaArchive;

public class WidgetTest
{
   @Deployment
   public static JavaArchive createDeployment()
   {
      return null;
   }
}
";
