//! Dependency negotiation against an in-memory store.

mod common;

use arqforge::containers::ContainerRegistry;
use arqforge::facets::{PromptError, ResolutionError};
use arqforge::negotiate::{DependencyNegotiator, VersionPins};
use arqforge_core::{DependencyCoordinate, Scope, TestFramework};
use common::{MemoryStore, ScriptedPrompter};

const JUNIT: &str = "junit:junit";
const JUNIT_ADAPTER: &str = "org.jboss.arquillian.junit:arquillian-junit-container";
const TESTNG: &str = "org.testng:testng";
const TESTNG_ADAPTER: &str = "org.jboss.arquillian.testng:arquillian-testng-container";
const WELD: &str = "weld-ee-embedded-1.1";

fn store() -> MemoryStore {
    MemoryStore::default()
        .with_versions(JUNIT, &["4.7", "4.8.1", "4.8.2"])
        .with_versions(JUNIT_ADAPTER, &["1.0", "1.1", "1.2"])
        .with_versions(TESTNG, &["5.12.1", "5.14"])
        .with_versions(TESTNG_ADAPTER, &["1.0", "1.1", "1.2"])
}

/// Negotiate and install the container, the way `arqforge setup` does.
fn setup(
    store: &mut MemoryStore,
    prompter: &mut ScriptedPrompter,
    framework: TestFramework,
) -> Result<String, ResolutionError> {
    let registry = ContainerRegistry::builtin();
    let container = registry.get(WELD).unwrap();
    let companion = container.arquillian_artifact();
    let outcome =
        DependencyNegotiator::new(store, prompter).negotiate(framework, Some(&companion), &VersionPins::default())?;
    container.install_dependencies(&outcome.resolved_version, store)?;
    Ok(outcome.resolved_version)
}

fn container_key() -> String {
    ContainerRegistry::builtin().get(WELD).unwrap().arquillian_artifact().key()
}

#[test]
fn test_adapter_defaults_to_latest() {
    let mut store = store();
    let mut prompter = ScriptedPrompter::answering(&[Some(1), None]);
    let version = setup(&mut store, &mut prompter, TestFramework::Junit).unwrap();

    assert_eq!(version, "1.2");
    assert_eq!(store.version_of(JUNIT).as_deref(), Some("4.8.1"));
    assert_eq!(store.version_of(JUNIT_ADAPTER).as_deref(), Some("1.2"));
    assert_eq!(
        prompter.questions,
        vec![
            "Which version of JUnit do you want to install?",
            "Which version of Arquillian do you want to install?",
        ]
    );
}

#[test]
fn test_primary_requires_explicit_choice() {
    let mut store = store();
    let mut prompter = ScriptedPrompter::default();
    let err = setup(&mut store, &mut prompter, TestFramework::TestNg).unwrap_err();
    assert!(matches!(err, ResolutionError::Prompt(PromptError::AnswerRequired { .. })));
    assert!(store.declared.is_empty());
}

#[test]
fn test_no_partial_declaration_when_adapter_resolution_fails() {
    let mut store = store();
    store.fail_resolution_on = Some(2);
    let mut prompter = ScriptedPrompter::answering(&[Some(0)]);

    let err = setup(&mut store, &mut prompter, TestFramework::Junit).unwrap_err();
    assert!(matches!(err, ResolutionError::Unreachable { .. }));
    assert_eq!(store.resolutions.get(), 2);
    assert!(store.declared.is_empty(), "declared: {:?}", store.declared);
}

#[test]
fn test_no_candidate_versions() {
    let mut store = MemoryStore::default().with_versions(JUNIT, &["4.8.2"]);
    let mut prompter = ScriptedPrompter::answering(&[Some(0)]);
    let err = setup(&mut store, &mut prompter, TestFramework::Junit).unwrap_err();
    match err {
        ResolutionError::NoCandidateVersions { coordinate } => assert_eq!(coordinate, JUNIT_ADAPTER),
        other => panic!("unexpected error: {other}"),
    }
    assert!(store.declared.is_empty());
}

#[test]
fn test_rerun_adopts_declared_adapter_without_prompting() {
    let mut store = store()
        .declare(TestFramework::Junit.primary().with_version("4.8.2"))
        .declare(TestFramework::Junit.adapter().with_version("1.1"));
    let mut prompter = ScriptedPrompter::default();

    let version = setup(&mut store, &mut prompter, TestFramework::Junit).unwrap();
    assert_eq!(version, "1.1");
    assert!(prompter.questions.is_empty());
    assert_eq!(store.version_of(&container_key()).as_deref(), Some("1.1"));
}

#[test]
fn test_declared_primary_still_resolves_missing_adapter() {
    let mut store = store().declare(TestFramework::TestNg.primary().with_version("5.14"));
    let mut prompter = ScriptedPrompter::default();

    let version = setup(&mut store, &mut prompter, TestFramework::TestNg).unwrap();
    assert_eq!(version, "1.2");
    assert_eq!(store.version_of(TESTNG).as_deref(), Some("5.14"));
    assert_eq!(store.version_of(TESTNG_ADAPTER).as_deref(), Some("1.2"));
}

#[test]
fn test_container_artifact_pins_missing_adapter() {
    let container = DependencyCoordinate::new("org.jboss.arquillian.container", "arquillian-weld-ee-embedded-1.1")
        .with_version("1.0")
        .with_scope(Scope::Test);
    let mut store = store().declare(container);
    let mut prompter = ScriptedPrompter::answering(&[Some(2)]);

    let version = setup(&mut store, &mut prompter, TestFramework::Junit).unwrap();
    assert_eq!(version, "1.0");
    assert_eq!(store.version_of(JUNIT_ADAPTER).as_deref(), Some("1.0"));
    assert_eq!(prompter.questions.len(), 1);
}

/// Whatever pre-existed, the adapter and the container's Arquillian artifact end up at the same version.
#[test]
fn test_version_pinning_invariant() {
    let framework_states = [None, Some("4.7")];
    let adapter_states = [None, Some("1.1")];
    let container_states = [None, Some("1.0"), Some("1.2")];

    for framework in framework_states {
        for adapter in adapter_states {
            for container in container_states {
                let mut store = store();
                if let Some(v) = framework {
                    store = store.declare(TestFramework::Junit.primary().with_version(v));
                }
                if let Some(v) = adapter {
                    store = store.declare(TestFramework::Junit.adapter().with_version(v));
                }
                if let Some(v) = container {
                    store = store.declare(
                        DependencyCoordinate::new("org.jboss.arquillian.container", "arquillian-weld-ee-embedded-1.1")
                            .with_version(v),
                    );
                }
                let mut prompter = ScriptedPrompter::answering(&[Some(0)]);
                setup(&mut store, &mut prompter, TestFramework::Junit).unwrap();

                assert_eq!(
                    store.version_of(JUNIT_ADAPTER),
                    store.version_of(&container_key()),
                    "framework={framework:?} adapter={adapter:?} container={container:?}"
                );
            }
        }
    }
}

#[test]
fn test_runtime_dependencies_are_not_overwritten() {
    let weld = DependencyCoordinate::new("org.jboss.weld", "weld-core").with_version("1.1.1.Final");
    let mut store = store().declare(weld);
    let mut prompter = ScriptedPrompter::answering(&[Some(0)]);
    setup(&mut store, &mut prompter, TestFramework::Junit).unwrap();
    assert_eq!(store.version_of("org.jboss.weld:weld-core").as_deref(), Some("1.1.1.Final"));
    assert_eq!(store.version_of("org.jboss.spec:jboss-javaee-6.0").as_deref(), Some("1.0.0.Final"));
}
