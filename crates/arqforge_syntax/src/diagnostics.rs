//! Diagnostics for the Java and POM frontends.
//!
//! Frontends collect [`SyntaxError`]s (message + byte span). Callers that need to show an error to a
//! human convert it into a [`SourceDiagnostic`], a `miette` diagnostic that carries the source text and
//! highlights the offending span.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::ast::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad character, unterminated literal or comment.
    Lexical,
    /// Token sequence does not match the grammar.
    Syntax,
    /// Well-formed text with the wrong shape (no type declaration, mismatched XML tags, ...).
    Structure,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Lexical => write!(f, "lexical error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
            ErrorKind::Structure => write!(f, "structure error"),
        }
    }
}

/// An error with location information
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {message}")]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
    pub kind: ErrorKind,
    pub hints: Vec<String>,
}

impl SyntaxError {
    pub fn lexical(message: impl Into<String>, span: Span) -> Self {
        Self::with_kind(ErrorKind::Lexical, message, span)
    }

    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self::with_kind(ErrorKind::Syntax, message, span)
    }

    pub fn structure(message: impl Into<String>, span: Span) -> Self {
        Self::with_kind(ErrorKind::Structure, message, span)
    }

    fn with_kind(kind: ErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            kind,
            hints: Vec::new(),
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    /// Attach the source text so the error can be rendered with context.
    pub fn to_diagnostic(&self, source_name: &str, source: &str) -> SourceDiagnostic {
        let start = self.span.start.min(source.len());
        let len = self.span.len().min(source.len() - start);
        SourceDiagnostic {
            message: format!("{}: {}", self.kind, self.message),
            src: NamedSource::new(source_name, source.to_string()),
            span: (start, len).into(),
            label: self.kind.to_string(),
            help: if self.hints.is_empty() {
                None
            } else {
                Some(self.hints.join("\n"))
            },
        }
    }
}

/// A renderable diagnostic pointing into a source file.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(arqforge::syntax))]
pub struct SourceDiagnostic {
    message: String,
    #[source_code]
    src: NamedSource<String>,
    #[label("{label}")]
    span: SourceSpan,
    label: String,
    #[help]
    help: Option<String>,
}

impl SourceDiagnostic {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn offset(&self) -> usize {
        self.span.offset()
    }
}

/// Line (1-based), column (1-based) and the text of the line containing `offset`.
pub fn line_info(source: &str, offset: usize) -> (usize, usize, &str) {
    let offset = offset.min(source.len());
    let line_start = source[..offset].rfind('\n').map_or(0, |i| i + 1);
    let line_end = source[offset..].find('\n').map_or(source.len(), |i| offset + i);
    let line_num = source[..line_start].matches('\n').count() + 1;
    let col = source[line_start..offset].chars().count() + 1;
    (line_num, col, &source[line_start..line_end])
}

/// Format errors as `name:line:col: kind: message` lines, for logs and plain-text output.
pub fn format_errors(source_name: &str, source: &str, errors: &[SyntaxError]) -> String {
    let mut out = String::new();
    for err in errors {
        let (line, col, _) = line_info(source, err.span.start);
        out.push_str(&format!("{}:{}:{}: {}\n", source_name, line, col, err));
        for hint in &err.hints {
            out.push_str(&format!("  hint: {}\n", hint));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_info() {
        let src = "first\nsecond line\nthird";
        assert_eq!(line_info(src, 0), (1, 1, "first"));
        assert_eq!(line_info(src, 7), (2, 2, "second line"));
        assert_eq!(line_info(src, src.len()), (3, 6, "third"));
    }

    #[test]
    fn test_diagnostic_clamps_span_to_source() {
        let err = SyntaxError::syntax("unexpected end of input", Span::new(40, 90));
        let diag = err.to_diagnostic("Widget.java", "class Widget {");
        assert_eq!(diag.offset(), "class Widget {".len());
        assert!(diag.message().contains("unexpected end of input"));
    }

    #[test]
    fn test_format_errors_includes_hints() {
        let err = SyntaxError::structure("no type declaration", Span::new(0, 1)).with_hint("declare a class");
        let text = format_errors("A.java", "x", &[err]);
        assert_eq!(text, "A.java:1:1: structure error: no type declaration\n  hint: declare a class\n");
    }
}
