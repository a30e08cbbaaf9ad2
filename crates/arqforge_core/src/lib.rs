//! Provide the shared, pure vocabulary used by the arqforge scaffolding tool.
//!
//! This crate is intentionally small and dependency-light. It contains deterministic helpers that the
//! negotiation logic, the Maven host facets and the CLI all agree on:
//! - [`coordinate`]: dependency coordinates and their identity rules,
//! - [`version`]: Maven version ordering, used to sort resolver candidates oldest → newest,
//! - [`frameworks`]: the registry of supported test frameworks and their adapter artifacts.
//!
//! ## Notes
//!
//! - This is a “semantic core” crate: **no IO**, no global state, no host-specific types.

pub mod coordinate;
pub mod frameworks;
pub mod version;

pub use coordinate::{DependencyCoordinate, Scope};
pub use frameworks::TestFramework;
pub use version::MavenVersion;
