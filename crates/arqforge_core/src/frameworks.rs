//! Registry of supported test frameworks.
//!
//! Each framework pairs a **primary** artifact (the test framework itself) with an **adapter** artifact
//! (the Arquillian integration for that framework). Both are declared test-scoped.
//!
//! ## Notes
//! - Lookup via [`from_str`] is case-insensitive.
//! - The registry is pure data; negotiation logic lives in the `arqforge` crate.
//!
//! ## Examples
//! ```rust
//! use arqforge_core::frameworks::{self, TestFramework};
//!
//! assert_eq!(frameworks::from_str("TestNG"), Some(TestFramework::TestNg));
//! assert_eq!(TestFramework::Junit.adapter().artifact_id(), "arquillian-junit-container");
//! ```

use crate::coordinate::{DependencyCoordinate, Scope};

/// Stable identifier for every supported test framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TestFramework {
    #[default]
    Junit,
    TestNg,
}

/// Metadata for a test framework.
#[derive(Debug, Clone, Copy)]
pub struct FrameworkInfo {
    pub id: TestFramework,
    /// Identifier used on the command line.
    pub canonical: &'static str,
    /// Name used in operator prompts.
    pub display_name: &'static str,
    pub primary: (&'static str, &'static str),
    pub adapter: (&'static str, &'static str),
}

pub const FRAMEWORKS: &[FrameworkInfo] = &[
    FrameworkInfo {
        id: TestFramework::Junit,
        canonical: "junit",
        display_name: "JUnit",
        primary: ("junit", "junit"),
        adapter: ("org.jboss.arquillian.junit", "arquillian-junit-container"),
    },
    FrameworkInfo {
        id: TestFramework::TestNg,
        canonical: "testng",
        display_name: "TestNG",
        primary: ("org.testng", "testng"),
        adapter: ("org.jboss.arquillian.testng", "arquillian-testng-container"),
    },
];

/// Look up the metadata row for a framework.
pub fn info_for(id: TestFramework) -> &'static FrameworkInfo {
    match id {
        TestFramework::Junit => &FRAMEWORKS[0],
        TestFramework::TestNg => &FRAMEWORKS[1],
    }
}

/// Resolve a command-line spelling to a framework.
pub fn from_str(s: &str) -> Option<TestFramework> {
    FRAMEWORKS
        .iter()
        .find(|f| f.canonical.eq_ignore_ascii_case(s))
        .map(|f| f.id)
}

impl TestFramework {
    pub fn as_str(self) -> &'static str {
        info_for(self).canonical
    }

    pub fn display_name(self) -> &'static str {
        info_for(self).display_name
    }

    /// The test framework artifact, test-scoped, unversioned.
    pub fn primary(self) -> DependencyCoordinate {
        let (group, artifact) = info_for(self).primary;
        DependencyCoordinate::new(group, artifact).with_scope(Scope::Test)
    }

    /// The Arquillian integration artifact for this framework, test-scoped, unversioned.
    pub fn adapter(self) -> DependencyCoordinate {
        let (group, artifact) = info_for(self).adapter;
        DependencyCoordinate::new(group, artifact).with_scope(Scope::Test)
    }
}
