//! Outline AST for a Java compilation unit.
//!
//! Types are kept as their source spelling with whitespace removed (`List<String>`, `String[]`). Method
//! bodies and field initializers are not represented.

use crate::ast::Spanned;

/// A parsed `.java` file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompilationUnit {
    /// `None` for the default package.
    pub package: Option<Spanned<String>>,
    pub imports: Vec<Spanned<ImportDecl>>,
    pub types: Vec<Spanned<TypeDecl>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    /// Dotted path without the trailing `.*`.
    pub path: String,
    pub is_static: bool,
    pub wildcard: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Annotation,
    Record,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Name as written (`Deployment` or `org.jboss.arquillian.api.Deployment`).
    pub name: String,
    /// Raw argument text between the parentheses, if any.
    pub args: Option<String>,
}

impl Annotation {
    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub kind: TypeKind,
    pub name: String,
    pub annotations: Vec<Annotation>,
    pub modifiers: Vec<String>,
    pub extends: Vec<String>,
    pub implements: Vec<String>,
    /// Enum constant names, in declaration order.
    pub enum_constants: Vec<String>,
    pub members: Vec<Spanned<Member>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Field(FieldDecl),
    Method(MethodDecl),
    Constructor(MethodDecl),
    Initializer { is_static: bool },
    Type(TypeDecl),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub annotations: Vec<Annotation>,
    pub modifiers: Vec<String>,
    pub ty: String,
    /// `int a, b;` declares two names.
    pub names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub ty: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub annotations: Vec<Annotation>,
    pub modifiers: Vec<String>,
    /// `None` for constructors.
    pub return_type: Option<String>,
    pub name: String,
    pub params: Vec<Param>,
    pub has_body: bool,
}

fn has_annotation(annotations: &[Annotation], simple_name: &str) -> bool {
    annotations.iter().any(|a| a.simple_name() == simple_name)
}

impl MethodDecl {
    pub fn has_annotation(&self, simple_name: &str) -> bool {
        has_annotation(&self.annotations, simple_name)
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.iter().any(|m| m == "static")
    }
}

impl FieldDecl {
    pub fn has_annotation(&self, simple_name: &str) -> bool {
        has_annotation(&self.annotations, simple_name)
    }
}

impl TypeDecl {
    pub fn has_annotation(&self, simple_name: &str) -> bool {
        has_annotation(&self.annotations, simple_name)
    }

    pub fn is_public(&self) -> bool {
        self.modifiers.iter().any(|m| m == "public")
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDecl> {
        self.members.iter().filter_map(|m| match &m.node {
            Member::Field(f) => Some(f),
            _ => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.members.iter().filter_map(|m| match &m.node {
            Member::Method(f) => Some(f),
            _ => None,
        })
    }

    /// Methods carrying the given annotation (by simple name).
    pub fn annotated_methods<'a>(&'a self, simple_name: &'a str) -> impl Iterator<Item = &'a MethodDecl> {
        self.methods().filter(move |m| m.has_annotation(simple_name))
    }
}

impl CompilationUnit {
    pub fn package_name(&self) -> &str {
        self.package.as_ref().map_or("", |p| p.node.as_str())
    }

    /// The type the file is named after: the public top-level type, or the first one.
    pub fn primary_type(&self) -> Option<&TypeDecl> {
        self.types
            .iter()
            .map(|t| &t.node)
            .find(|t| t.is_public())
            .or_else(|| self.types.first().map(|t| &t.node))
    }

    pub fn qualified_name(&self) -> Option<String> {
        let primary = self.primary_type()?;
        Some(qualify(self.package_name(), &primary.name))
    }

    /// Path of the file relative to a source root: `com/acme/Widget.java`.
    pub fn logical_path(&self) -> Option<String> {
        let primary = self.primary_type()?;
        Some(logical_path_for(&qualify(self.package_name(), &primary.name)))
    }

    pub fn imports_path(&self, path: &str) -> bool {
        self.imports.iter().any(|i| !i.node.wildcard && i.node.path == path)
    }
}

/// `package` + `.` + `name`, or just `name` in the default package.
pub fn qualify(package: &str, name: &str) -> String {
    if package.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", package, name)
    }
}

/// `com.acme.Widget` → `com/acme/Widget.java`
pub fn logical_path_for(qualified_name: &str) -> String {
    format!("{}.java", qualified_name.replace('.', "/"))
}
