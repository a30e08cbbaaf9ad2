//! Layering guardrails for the core vocabulary crate.
//!
//! `arqforge_core` is shared by the negotiation logic, the Maven facets and the CLI and must stay free of I/O and
//! third-party dependencies. This test scans its `Cargo.toml` and fails if `[dependencies]` lists anything.

#[test]
fn core_crate_has_no_runtime_dependencies() {
    let manifest = include_str!("../crates/arqforge_core/Cargo.toml");
    let mut in_dependencies = false;

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }

        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line_no_comment = line.split('#').next().unwrap_or("").trim();
        if !line_no_comment.is_empty() {
            panic!("`arqforge_core` must not have runtime dependencies, found `{}`", line_no_comment);
        }
    }
}

/// The syntax crate may depend on diagnostics and logging only.
#[test]
fn syntax_crate_dependencies_are_limited() {
    let manifest = include_str!("../crates/arqforge_syntax/Cargo.toml");
    let allowed = ["arqforge_core", "miette", "thiserror", "tracing"];
    let mut in_dependencies = false;

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }
        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }
        let name = line.split(['=', '.']).next().unwrap_or("").trim();
        assert!(allowed.contains(&name), "unexpected dependency `{}` in arqforge_syntax", name);
    }
}
