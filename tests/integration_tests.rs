//! End-to-end tests against temporary Maven projects on disk.

use std::fs;
use std::path::Path;

use arqforge::ToolConfig;
use arqforge::cli::commands;
use arqforge::maven::{LocalRepository, PomFile};
use arqforge::negotiate::VersionPins;
use arqforge_core::{DependencyCoordinate, TestFramework};

const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <groupId>com.acme</groupId>
  <artifactId>shop</artifactId>
  <version>1.0-SNAPSHOT</version>
  <properties>
    <weld.version>1.1.1.Final</weld.version>
  </properties>
  <dependencies>
    <dependency>
      <groupId>org.jboss.weld</groupId>
      <artifactId>weld-core</artifactId>
      <version>${weld.version}</version>
      <scope>test</scope>
    </dependency>
  </dependencies>
</project>
"#;

fn publish(repo: &LocalRepository, group: &str, artifact: &str, versions: &[&str]) {
    let dir = repo.artifact_dir(&DependencyCoordinate::new(group, artifact));
    for version in versions {
        fs::create_dir_all(dir.join(version)).unwrap();
    }
}

fn project(root: &Path) -> ToolConfig {
    fs::write(root.join("pom.xml"), POM).unwrap();
    let repo = LocalRepository::new(root.join("repository"));
    publish(&repo, "junit", "junit", &["4.7", "4.8.1", "4.8.2"]);
    publish(
        &repo,
        "org.jboss.arquillian.junit",
        "arquillian-junit-container",
        &["1.0.0.Alpha4", "1.0.0.Alpha5", "1.0.0.Alpha10"],
    );
    let mut config = ToolConfig::defaults(root).with_local_repository(repo.root());
    config.interactive = false;
    config
}

#[test]
fn test_setup_declares_framework_adapter_and_container() {
    let dir = tempfile::tempdir().unwrap();
    let config = project(dir.path());
    let pins = VersionPins {
        framework_version: Some("4.8.2".into()),
        arquillian_version: None,
    };

    commands::setup(&config, TestFramework::Junit, "weld-ee-embedded-1.1", &pins).unwrap();

    let pom = PomFile::open(config.pom_path()).unwrap();
    let version = |group: &str, artifact: &str| {
        pom.get(&DependencyCoordinate::new(group, artifact))
            .unwrap()
            .and_then(|d| d.version().map(str::to_string))
    };
    assert_eq!(version("junit", "junit").as_deref(), Some("4.8.2"));
    assert_eq!(
        version("org.jboss.arquillian.junit", "arquillian-junit-container").as_deref(),
        Some("1.0.0.Alpha10")
    );
    assert_eq!(
        version("org.jboss.arquillian.container", "arquillian-weld-ee-embedded-1.1").as_deref(),
        Some("1.0.0.Alpha10")
    );
    // Declared through a property; left alone.
    assert_eq!(version("org.jboss.weld", "weld-core").as_deref(), Some("1.1.1.Final"));

    let text = fs::read_to_string(config.pom_path()).unwrap();
    assert!(text.contains("<version>${weld.version}</version>"));
    assert!(text.contains("<type>pom</type>"));
    assert_eq!(pom.dependencies().unwrap().len(), 5);

    // A second run changes nothing.
    commands::setup(&config, TestFramework::Junit, "weld-ee-embedded-1.1", &VersionPins::default()).unwrap();
    assert_eq!(fs::read_to_string(config.pom_path()).unwrap(), text);
}

#[test]
fn test_non_interactive_setup_needs_framework_version() {
    let dir = tempfile::tempdir().unwrap();
    let config = project(dir.path());

    let err = commands::setup(&config, TestFramework::Junit, "jbossas-remote-6", &VersionPins::default()).unwrap_err();
    assert!(err.message.contains("Which version of JUnit do you want to install?"));
    assert_eq!(fs::read_to_string(config.pom_path()).unwrap(), POM);
}

#[test]
fn test_setup_without_pom() {
    let dir = tempfile::tempdir().unwrap();
    let config = ToolConfig::defaults(dir.path()).with_local_repository(dir.path());
    let err = commands::setup(&config, TestFramework::Junit, "jbossas-remote-6", &VersionPins::default()).unwrap_err();
    assert!(err.message.contains("no pom.xml found"));
}

#[test]
fn test_create_test_uses_configured_test_root_and_declared_framework() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("pom.xml"),
        "<project>\n  <dependencies>\n    <dependency>\n      <groupId>org.testng</groupId>\n      \
         <artifactId>testng</artifactId>\n      <version>5.14</version>\n    </dependency>\n  </dependencies>\n</project>\n",
    )
    .unwrap();
    let source_dir = dir.path().join("src/main/java/com/acme/shop");
    fs::create_dir_all(&source_dir).unwrap();
    fs::write(
        source_dir.join("Cart.java"),
        "package com.acme.shop;\n\nimport java.util.List;\n\n@Stateful\npublic class Cart {\n    private List<String> items;\n}\n",
    )
    .unwrap();

    let mut config = ToolConfig::defaults(dir.path());
    config.test_sources = "src/it/java".into();
    commands::create_test(&config, "com.acme.shop.Cart", true).unwrap();

    let written = fs::read_to_string(dir.path().join("src/it/java/com/acme/shop/CartTest.java")).unwrap();
    assert!(written.contains("public class CartTest extends Arquillian"));
    assert!(written.contains("private Cart cart;"));
    assert!(written.contains("private EntityManager em;"));
}
