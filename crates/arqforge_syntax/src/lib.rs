//! Syntax frontends for arqforge: a Java compilation-unit outline parser and a POM scanner.
//!
//! This crate is dependency-light and shared by the code generator (validating rendered sources), the
//! CLI (reading classes under test) and the Maven dependency store (reading and editing `pom.xml`).
//!
//! ## Notes
//! - The Java parser is an *outline* parser: it understands packages, imports, type declarations,
//!   annotations, fields and method signatures. Method bodies and initializers are only checked for
//!   balanced delimiters.
//! - The POM scanner keeps byte spans for every element so edits can be spliced into the original text
//!   without reformatting the rest of the file.
//!
//! ## Examples
//! ```rust
//! use arqforge_syntax::java;
//!
//! let unit = java::parse_source("package com.acme;\npublic class Widget {}\n").unwrap();
//! assert_eq!(unit.qualified_name().as_deref(), Some("com.acme.Widget"));
//! ```

pub mod ast;
pub mod diagnostics;
pub mod java;
pub mod pom;

pub use ast::{Span, Spanned};
pub use diagnostics::{SourceDiagnostic, SyntaxError};
