//! Java frontend: lexer, outline parser and AST.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod tokens;

pub use ast::{
    Annotation, CompilationUnit, FieldDecl, ImportDecl, Member, MethodDecl, Param, TypeDecl, TypeKind,
    logical_path_for, qualify,
};
pub use lexer::lex;
pub use parser::Parser;

use crate::diagnostics::SyntaxError;
use tokens::Token;

/// Parse an already-lexed token stream.
pub fn parse(source: &str, tokens: &[Token]) -> Result<CompilationUnit, Vec<SyntaxError>> {
    Parser::new(source, tokens).parse()
}

/// Lex and parse a Java source file.
///
/// ## Errors
/// Lexical errors are returned on their own; parsing only runs on a clean token stream.
#[tracing::instrument(skip_all, fields(len = source.len()))]
pub fn parse_source(source: &str) -> Result<CompilationUnit, Vec<SyntaxError>> {
    let tokens = lex(source)?;
    let unit = parse(source, &tokens)?;
    tracing::debug!(types = unit.types.len(), "parsed compilation unit");
    Ok(unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_errors_short_circuit() {
        let errs = parse_source("class A { String s = \"open; }").unwrap_err();
        assert!(errs.iter().all(|e| e.kind == crate::diagnostics::ErrorKind::Lexical));
    }

    #[test]
    fn test_qualified_name_of_nested_package() {
        let unit = parse_source("package org.example.shop;\n\npublic interface Cart {}\n").unwrap();
        assert_eq!(unit.qualified_name().as_deref(), Some("org.example.shop.Cart"));
        assert_eq!(unit.logical_path().as_deref(), Some("org/example/shop/Cart.java"));
        assert_eq!(unit.primary_type().map(|t| t.kind), Some(TypeKind::Interface));
    }
}
