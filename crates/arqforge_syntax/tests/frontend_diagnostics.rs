//! Snapshot tests for the plain-text error rendering of both frontends.
//!
//! Review changes: `cargo insta review`

use arqforge_syntax::diagnostics::format_errors;
use arqforge_syntax::java;
use arqforge_syntax::pom::PomDocument;

fn java_errors(source: &str) -> String {
    let errors = java::parse_source(source).expect_err("source should be rejected");
    format_errors("Widget.java", source, &errors)
}

fn pom_errors(source: &str) -> String {
    let errors = PomDocument::parse(source).expect_err("pom should be rejected");
    format_errors("pom.xml", source, &errors)
}

#[test]
fn missing_field_name() {
    insta::assert_snapshot!(java_errors("class Widget {\n  int = 3;\n}\n"), @"Widget.java:2:7: syntax error: Expected member name, found `=`");
}

#[test]
fn unclosed_type_body() {
    insta::assert_snapshot!(java_errors("public class Widget {\n"), @r"
    Widget.java:1:21: lexical error: Unclosed `{`
      hint: add the matching `}`
    ");
}

#[test]
fn two_public_types() {
    insta::assert_snapshot!(java_errors("public class A {}\npublic class B {}\n"), @"Widget.java:2:1: structure error: More than one public top-level type (`A` and `B`)");
}

#[test]
fn mismatched_pom_tags() {
    insta::assert_snapshot!(pom_errors("<project><dependencies></project>"), @r"
    pom.xml:1:24: structure error: Mismatched closing tag: expected `</dependencies>`, found `</project>`
      hint: `<dependencies>` opened at byte 9
    pom.xml:1:1: structure error: Unclosed element `<project>`
      hint: add `</project>`
    ");
}

#[test]
fn diagnostic_points_at_the_offending_token() {
    let source = "package com.acme\npublic class Widget {}\n";
    let errors = java::parse_source(source).unwrap_err();
    let diagnostic = errors[0].to_diagnostic("Widget.java", source);
    assert_eq!(diagnostic.offset(), source.find("public").unwrap());
    assert!(diagnostic.message().contains("`;` after package name"));
}
