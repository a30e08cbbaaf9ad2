//! Reading and editing Maven `pom.xml` files.
//!
//! [`PomDocument`] exposes the dependencies declared directly under `project/dependencies` (not
//! `dependencyManagement`, profiles or plugin dependencies) and the project properties used to resolve
//! `${...}` references. Edits are computed as new document text: the original text is kept byte for byte
//! outside the spliced region.

pub mod xml;

use std::collections::BTreeMap;

use arqforge_core::{DependencyCoordinate, Scope};

use crate::ast::Span;
use crate::diagnostics::SyntaxError;
pub use xml::{Element, parse_document};

const DEFAULT_INDENT: &str = "    ";
const MAX_RESOLVE_PASSES: usize = 8;

/// A `<dependency>` entry as declared in the POM.
#[derive(Debug, Clone, PartialEq)]
pub struct PomDependency {
    /// Coordinate with `${...}` references resolved.
    pub coordinate: DependencyCoordinate,
    /// The version text exactly as written, if any.
    pub raw_version: Option<String>,
    /// Span of the whole `<dependency>` element.
    pub span: Span,
    /// Span of the content of `<version>`, if present.
    pub version_span: Option<Span>,
    /// Span of `<artifactId>`; a missing `<version>` goes right after it.
    artifact_span: Span,
}

/// A parsed POM with its original text.
#[derive(Debug, Clone)]
pub struct PomDocument {
    source: String,
    root: Element,
}

impl PomDocument {
    /// Parse POM text.
    ///
    /// ## Errors
    /// Malformed XML, or a root element other than `<project>`.
    #[tracing::instrument(skip_all)]
    pub fn parse(source: impl Into<String>) -> Result<Self, Vec<SyntaxError>> {
        let source = source.into();
        let root = parse_document(&source)?;
        if root.name != "project" {
            return Err(vec![
                SyntaxError::structure(format!("Expected `<project>` root element, found `<{}>`", root.name), root.span)
                    .with_hint("arqforge edits Maven POM files"),
            ]);
        }
        Ok(Self { source, root })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// `<properties>` entries plus the built-in `project.*` values.
    pub fn properties(&self) -> BTreeMap<String, String> {
        let mut props = BTreeMap::new();
        let parent = self.root.child("parent");
        for key in ["groupId", "artifactId", "version"] {
            let value = self
                .root
                .child_text(key)
                .or_else(|| parent.and_then(|p| p.child_text(key)));
            if let Some(value) = value {
                props.insert(format!("project.{}", key), value.to_string());
                props.insert(format!("pom.{}", key), value.to_string());
            }
        }
        if let Some(properties) = self.root.child("properties") {
            for prop in &properties.children {
                props.insert(prop.name.clone(), prop.trimmed_text().to_string());
            }
        }
        props
    }

    /// Substitute `${name}` references. Unknown references are left as written.
    pub fn resolve(&self, raw: &str) -> String {
        resolve_with(&self.properties(), raw)
    }

    /// Dependencies declared in `project/dependencies`, in document order.
    pub fn dependencies(&self) -> Vec<PomDependency> {
        let Some(deps) = self.root.child("dependencies") else {
            return Vec::new();
        };
        let props = self.properties();
        deps.children_named("dependency")
            .filter_map(|dep| read_dependency(dep, &props))
            .collect()
    }

    pub fn find_dependency(&self, group_id: &str, artifact_id: &str) -> Option<PomDependency> {
        self.dependencies()
            .into_iter()
            .find(|d| d.coordinate.group_id() == group_id && d.coordinate.artifact_id() == artifact_id)
    }

    /// Text of the document with `coordinate` appended to `project/dependencies`.
    ///
    /// Creates `<dependencies>` right before `</project>` if the POM has none. Indentation follows the
    /// surrounding elements.
    pub fn with_dependency_added(&self, coordinate: &DependencyCoordinate) -> String {
        let unit = self.indent_unit();
        match self.root.child("dependencies") {
            Some(deps) => {
                let deps_indent = indent_of(&self.source, deps.span.start);
                let dep_indent = deps
                    .children_named("dependency")
                    .last()
                    .map(|d| indent_of(&self.source, d.span.start).to_string())
                    .unwrap_or_else(|| format!("{}{}", deps_indent, unit));
                let block = render_dependency(coordinate, &dep_indent, &unit);
                self.insert_before_close(deps, &block, deps_indent)
            }
            None => {
                let project_indent = indent_of(&self.source, self.root.span.start);
                let deps_indent = format!("{}{}", project_indent, unit);
                let dep_indent = format!("{}{}", deps_indent, unit);
                let block = format!(
                    "{indent}<dependencies>\n{body}\n{indent}</dependencies>",
                    indent = deps_indent,
                    body = render_dependency(coordinate, &dep_indent, &unit)
                );
                self.insert_before_close(&self.root, &block, project_indent)
            }
        }
    }

    /// Text of the document with the `<version>` of `dependency` set to `version`.
    pub fn with_dependency_version(&self, dependency: &PomDependency, version: &str) -> String {
        let escaped = xml::escape_text(version);
        match dependency.version_span {
            Some(span) => splice(&self.source, span, &escaped),
            None => {
                let indent = indent_of(&self.source, dependency.artifact_span.start);
                let at = dependency.artifact_span.end;
                splice(
                    &self.source,
                    Span::new(at, at),
                    &format!("\n{}<version>{}</version>", indent, escaped),
                )
            }
        }
    }

    /// Insert `block` on its own line right before the end tag of `element`.
    fn insert_before_close(&self, element: &Element, block: &str, element_indent: &str) -> String {
        if element.self_closing {
            let expanded = format!(
                "<{name}>\n{block}\n{indent}</{name}>",
                name = element.name,
                indent = element_indent
            );
            return splice(&self.source, element.span, &expanded);
        }
        let close = element.close_tag_start();
        let line_start = self.source[..close].rfind('\n').map_or(0, |i| i + 1);
        if self.source[line_start..close].trim().is_empty() {
            splice(&self.source, Span::new(line_start, line_start), &format!("{}\n", block))
        } else {
            splice(
                &self.source,
                Span::new(close, close),
                &format!("\n{}\n{}", block, element_indent),
            )
        }
    }

    /// Indentation step used by the file, taken from the first child of `<project>`.
    fn indent_unit(&self) -> String {
        let project_indent = indent_of(&self.source, self.root.span.start);
        self.root
            .children
            .first()
            .map(|c| indent_of(&self.source, c.span.start))
            .and_then(|child| child.strip_prefix(project_indent))
            .filter(|unit| !unit.is_empty())
            .unwrap_or(DEFAULT_INDENT)
            .to_string()
    }
}

fn read_dependency(element: &Element, props: &BTreeMap<String, String>) -> Option<PomDependency> {
    let group = element.child_text("groupId")?;
    let artifact_el = element.child("artifactId")?;
    let mut coordinate = DependencyCoordinate::new(
        resolve_with(props, group),
        resolve_with(props, artifact_el.trimmed_text()),
    );

    let version_el = element.child("version");
    let raw_version = version_el.map(|v| v.trimmed_text().to_string());
    if let Some(raw) = &raw_version {
        coordinate = coordinate.with_version(resolve_with(props, raw));
    }
    if let Some(scope) = element.child_text("scope") {
        if let Ok(scope) = resolve_with(props, scope).parse::<Scope>() {
            coordinate = coordinate.with_scope(scope);
        }
    }
    if let Some(packaging) = element.child_text("type") {
        coordinate = coordinate.with_packaging(resolve_with(props, packaging));
    }

    Some(PomDependency {
        coordinate,
        raw_version,
        span: element.span,
        version_span: version_el.map(|v| trimmed_span(v.content, v.text.as_str())),
        artifact_span: artifact_el.span,
    })
}

/// Narrow a content span to its non-whitespace part, so replacements keep surrounding formatting.
fn trimmed_span(content: Span, text: &str) -> Span {
    let leading = text.len() - text.trim_start().len();
    let trailing = text.len() - text.trim_end().len();
    if content.len() != text.len() {
        // Entities or CDATA changed the length; replace the whole content.
        return content;
    }
    Span::new(content.start + leading, content.end - trailing)
}

pub fn resolve_with(props: &BTreeMap<String, String>, raw: &str) -> String {
    let mut value = raw.to_string();
    for _ in 0..MAX_RESOLVE_PASSES {
        let mut changed = false;
        let mut out = String::with_capacity(value.len());
        let mut rest = value.as_str();
        while let Some(start) = rest.find("${") {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            match tail.find('}') {
                Some(end) => {
                    let key = &tail[2..end];
                    match props.get(key) {
                        Some(v) => {
                            out.push_str(v);
                            changed = true;
                        }
                        None => out.push_str(&tail[..=end]),
                    }
                    rest = &tail[end + 1..];
                }
                None => {
                    out.push_str(tail);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        value = out;
        if !changed {
            break;
        }
    }
    value
}

fn render_dependency(coordinate: &DependencyCoordinate, indent: &str, unit: &str) -> String {
    let child = format!("{}{}", indent, unit);
    let mut out = format!("{}<dependency>\n", indent);
    let mut line = |tag: &str, value: &str| {
        out.push_str(&format!("{}<{tag}>{}</{tag}>\n", child, xml::escape_text(value)));
    };
    line("groupId", coordinate.group_id());
    line("artifactId", coordinate.artifact_id());
    if let Some(version) = coordinate.version() {
        line("version", version);
    }
    if let Some(packaging) = coordinate.packaging() {
        line("type", packaging);
    }
    if let Some(scope) = coordinate.scope().filter(|s| *s != Scope::Compile) {
        line("scope", scope.as_str());
    }
    out.push_str(&format!("{}</dependency>", indent));
    out
}

/// Whitespace between the start of the line and `offset`, or `""` if other text precedes it.
fn indent_of(source: &str, offset: usize) -> &str {
    let line_start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    let prefix = &source[line_start..offset];
    if prefix.chars().all(|c| c == ' ' || c == '\t') {
        prefix
    } else {
        ""
    }
}

fn splice(source: &str, span: Span, replacement: &str) -> String {
    let mut out = String::with_capacity(source.len() + replacement.len());
    out.push_str(&source[..span.start]);
    out.push_str(replacement);
    out.push_str(&source[span.end..]);
    out
}
