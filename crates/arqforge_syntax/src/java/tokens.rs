//! Token types for the Java lexer.
//!
//! Only the keywords the outline parser branches on get a [`Keyword`] id; every other reserved word is
//! lexed as an identifier and handled as an opaque part of a type or expression.

use crate::ast::Span;

/// Reserved words the outline parser cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Package,
    Import,
    Class,
    Interface,
    Enum,
    Extends,
    Implements,
    Throws,
    Default,
    // Modifiers
    Public,
    Protected,
    Private,
    Static,
    Final,
    Abstract,
    Transient,
    Volatile,
    Synchronized,
    Native,
    Strictfp,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Package => "package",
            Keyword::Import => "import",
            Keyword::Class => "class",
            Keyword::Interface => "interface",
            Keyword::Enum => "enum",
            Keyword::Extends => "extends",
            Keyword::Implements => "implements",
            Keyword::Throws => "throws",
            Keyword::Default => "default",
            Keyword::Public => "public",
            Keyword::Protected => "protected",
            Keyword::Private => "private",
            Keyword::Static => "static",
            Keyword::Final => "final",
            Keyword::Abstract => "abstract",
            Keyword::Transient => "transient",
            Keyword::Volatile => "volatile",
            Keyword::Synchronized => "synchronized",
            Keyword::Native => "native",
            Keyword::Strictfp => "strictfp",
        }
    }

    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Keyword::Public
                | Keyword::Protected
                | Keyword::Private
                | Keyword::Static
                | Keyword::Final
                | Keyword::Abstract
                | Keyword::Transient
                | Keyword::Volatile
                | Keyword::Synchronized
                | Keyword::Native
                | Keyword::Strictfp
                | Keyword::Default
        )
    }
}

const KEYWORDS: &[Keyword] = &[
    Keyword::Package,
    Keyword::Import,
    Keyword::Class,
    Keyword::Interface,
    Keyword::Enum,
    Keyword::Extends,
    Keyword::Implements,
    Keyword::Throws,
    Keyword::Default,
    Keyword::Public,
    Keyword::Protected,
    Keyword::Private,
    Keyword::Static,
    Keyword::Final,
    Keyword::Abstract,
    Keyword::Transient,
    Keyword::Volatile,
    Keyword::Synchronized,
    Keyword::Native,
    Keyword::Strictfp,
];

/// Resolve an identifier spelling to a keyword id, if the parser treats it as one.
pub fn keyword_id(spelling: &str) -> Option<Keyword> {
    KEYWORDS.iter().copied().find(|k| k.as_str() == spelling)
}

/// Every Java reserved word and literal name; none of these can be used as an identifier.
pub const RESERVED_WORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "null", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "true", "try",
    "void", "volatile", "while", "_",
];

pub fn is_reserved_word(spelling: &str) -> bool {
    RESERVED_WORDS.contains(&spelling)
}

/// Whether `spelling` is a legal Java identifier (ASCII letters, digits, `_` and `$`; not reserved).
pub fn is_identifier(spelling: &str) -> bool {
    let mut chars = spelling.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        && !is_reserved_word(spelling)
}

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Keyword(Keyword),
    Ident(String),

    // Literals keep their source spelling; the outline never evaluates them.
    Number(String),
    String(String),
    Char(String),

    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semi,
    Comma,
    Dot,
    Ellipsis,
    At,
    Lt,
    Gt,
    Eq,
    Question,
    Colon,
    /// Any other operator character (`+`, `&`, `!`, ...), one per token.
    Op(char),

    Eof,
}

impl TokenKind {
    /// Short human description for “expected …, found …” messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Keyword(k) => format!("keyword `{}`", k.as_str()),
            TokenKind::Ident(s) => format!("identifier `{}`", s),
            TokenKind::Number(s) => format!("number `{}`", s),
            TokenKind::String(_) => "string literal".to_string(),
            TokenKind::Char(_) => "char literal".to_string(),
            TokenKind::LParen => "`(`".to_string(),
            TokenKind::RParen => "`)`".to_string(),
            TokenKind::LBrace => "`{`".to_string(),
            TokenKind::RBrace => "`}`".to_string(),
            TokenKind::LBracket => "`[`".to_string(),
            TokenKind::RBracket => "`]`".to_string(),
            TokenKind::Semi => "`;`".to_string(),
            TokenKind::Comma => "`,`".to_string(),
            TokenKind::Dot => "`.`".to_string(),
            TokenKind::Ellipsis => "`...`".to_string(),
            TokenKind::At => "`@`".to_string(),
            TokenKind::Lt => "`<`".to_string(),
            TokenKind::Gt => "`>`".to_string(),
            TokenKind::Eq => "`=`".to_string(),
            TokenKind::Question => "`?`".to_string(),
            TokenKind::Colon => "`:`".to_string(),
            TokenKind::Op(c) => format!("`{}`", c),
            TokenKind::Eof => "end of input".to_string(),
        }
    }
}

/// A token with its kind and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}
