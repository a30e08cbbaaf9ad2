//! Outline parser for Java compilation units.
//!
//! ## Notes
//! - Single pass over the token stream. Errors inside a member are recovered by skipping to the next `;`
//!   or closing brace at the member's depth, so one broken member does not hide the rest.
//! - Bodies, initializers and annotation arguments are skipped as balanced token runs; the lexer has
//!   already rejected unbalanced brackets.

use super::ast::{Annotation, CompilationUnit, FieldDecl, ImportDecl, Member, MethodDecl, Param, TypeDecl, TypeKind};
use super::tokens::{Keyword, Token, TokenKind};
use crate::ast::{Span, Spanned};
use crate::diagnostics::SyntaxError;

type PResult<T> = Result<T, SyntaxError>;

/// Parser state.
pub struct Parser<'a> {
    source: &'a str,
    tokens: &'a [Token],
    pos: usize,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    /// Create a parser over a token stream produced from `source` by [`super::lexer::lex`].
    pub fn new(source: &'a str, tokens: &'a [Token]) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            errors: Vec::new(),
        }
    }

    /// Parse the token stream into a [`CompilationUnit`].
    ///
    /// ## Errors
    /// Returns every error found; the parser recovers at member and declaration boundaries.
    pub fn parse(mut self) -> Result<CompilationUnit, Vec<SyntaxError>> {
        let mut unit = CompilationUnit::default();

        if let Err(e) = self.header(&mut unit) {
            self.errors.push(e);
            self.skip_past_semi();
        }

        while !self.is_at_end() {
            if self.check(&TokenKind::Semi) {
                self.advance();
                continue;
            }
            let start = self.current_span();
            let result = self
                .modifiers()
                .and_then(|(annotations, modifiers)| self.type_declaration(annotations, modifiers));
            match result {
                Ok(decl) => {
                    let span = start.merge(self.previous_span());
                    unit.types.push(Spanned::new(decl, span));
                }
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize_top_level();
                }
            }
        }

        if self.errors.is_empty() {
            self.check_structure(&unit);
        }

        if self.errors.is_empty() {
            Ok(unit)
        } else {
            Err(self.errors)
        }
    }

    // ========================================================================
    // Token helpers
    // ========================================================================

    fn peek(&self) -> &TokenKind {
        self.peek_at(0)
    }

    fn peek_at(&self, n: usize) -> &TokenKind {
        let idx = (self.pos + n).min(self.tokens.len().saturating_sub(1));
        self.tokens.get(idx).map_or(&TokenKind::Eof, |t| &t.kind)
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek(), TokenKind::Eof)
    }

    fn advance(&mut self) -> &Token {
        let idx = self.pos.min(self.tokens.len().saturating_sub(1));
        if !self.is_at_end() {
            self.pos += 1;
        }
        &self.tokens[idx]
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek() == kind
    }

    fn check_kw(&self, kw: Keyword) -> bool {
        matches!(self.peek(), TokenKind::Keyword(k) if *k == kw)
    }

    fn check_ident(&self, spelling: &str) -> bool {
        matches!(self.peek(), TokenKind::Ident(s) if s == spelling)
    }

    fn current_span(&self) -> Span {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(Span::default(), |t| t.span)
    }

    fn previous_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(self.current_span(), |t| t.span)
    }

    fn error_expected(&self, what: &str) -> SyntaxError {
        SyntaxError::syntax(
            format!("Expected {}, found {}", what, self.peek().describe()),
            self.current_span(),
        )
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> PResult<Span> {
        if self.check(&kind) {
            Ok(self.advance().span)
        } else {
            Err(self.error_expected(what))
        }
    }

    fn expect_ident(&mut self, what: &str) -> PResult<String> {
        if let TokenKind::Ident(name) = self.peek() {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(self.error_expected(what))
        }
    }

    /// Source text of tokens `[from, self.pos)` with inter-token whitespace removed.
    fn text_since(&self, from: usize) -> String {
        self.tokens[from..self.pos]
            .iter()
            .map(|t| &self.source[t.span.start..t.span.end])
            .collect()
    }

    // ========================================================================
    // Package and imports
    // ========================================================================

    fn header(&mut self, unit: &mut CompilationUnit) -> PResult<()> {
        if self.check_kw(Keyword::Package) {
            let start = self.advance().span;
            let name = self.qualified_name("package name")?;
            let end = self.expect(TokenKind::Semi, "`;` after package name")?;
            unit.package = Some(Spanned::new(name, start.merge(end)));
        }

        while self.check_kw(Keyword::Import) {
            let start = self.advance().span;
            let is_static = self.check_kw(Keyword::Static);
            if is_static {
                self.advance();
            }
            let mut path = self.expect_ident("import path")?;
            let mut wildcard = false;
            while self.check(&TokenKind::Dot) {
                self.advance();
                if matches!(self.peek(), TokenKind::Op('*')) {
                    self.advance();
                    wildcard = true;
                    break;
                }
                path.push('.');
                path.push_str(&self.expect_ident("identifier in import path")?);
            }
            let end = self.expect(TokenKind::Semi, "`;` after import")?;
            unit.imports.push(Spanned::new(
                ImportDecl {
                    path,
                    is_static,
                    wildcard,
                },
                start.merge(end),
            ));
        }
        Ok(())
    }

    fn qualified_name(&mut self, what: &str) -> PResult<String> {
        let mut name = self.expect_ident(what)?;
        while self.check(&TokenKind::Dot) && matches!(self.peek_at(1), TokenKind::Ident(_)) {
            self.advance();
            name.push('.');
            name.push_str(&self.expect_ident(what)?);
        }
        Ok(name)
    }

    // ========================================================================
    // Modifiers and annotations
    // ========================================================================

    fn starts_annotation_type(&self) -> bool {
        self.check(&TokenKind::At) && matches!(self.peek_at(1), TokenKind::Keyword(Keyword::Interface))
    }

    fn modifiers(&mut self) -> PResult<(Vec<Annotation>, Vec<String>)> {
        let mut annotations = Vec::new();
        let mut modifiers = Vec::new();
        loop {
            match self.peek() {
                TokenKind::At if !self.starts_annotation_type() => annotations.push(self.annotation()?),
                TokenKind::Keyword(k) if k.is_modifier() => {
                    modifiers.push(k.as_str().to_string());
                    self.advance();
                }
                TokenKind::Ident(s) if s == "sealed" && matches!(self.peek_at(1), TokenKind::Keyword(_)) => {
                    modifiers.push("sealed".to_string());
                    self.advance();
                }
                TokenKind::Ident(s)
                    if s == "non"
                        && matches!(self.peek_at(1), TokenKind::Op('-'))
                        && matches!(self.peek_at(2), TokenKind::Ident(t) if t == "sealed") =>
                {
                    modifiers.push("non-sealed".to_string());
                    self.advance();
                    self.advance();
                    self.advance();
                }
                _ => return Ok((annotations, modifiers)),
            }
        }
    }

    fn annotation(&mut self) -> PResult<Annotation> {
        self.expect(TokenKind::At, "`@`")?;
        let name = self.qualified_name("annotation name")?;
        let args = if self.check(&TokenKind::LParen) {
            let span = self.skip_balanced(TokenKind::LParen, TokenKind::RParen)?;
            Some(self.source[span.start + 1..span.end - 1].trim().to_string())
        } else {
            None
        };
        Ok(Annotation { name, args })
    }

    // ========================================================================
    // Type declarations
    // ========================================================================

    fn type_kind(&self) -> Option<TypeKind> {
        match self.peek() {
            TokenKind::Keyword(Keyword::Class) => Some(TypeKind::Class),
            TokenKind::Keyword(Keyword::Interface) => Some(TypeKind::Interface),
            TokenKind::Keyword(Keyword::Enum) => Some(TypeKind::Enum),
            TokenKind::At if self.starts_annotation_type() => Some(TypeKind::Annotation),
            TokenKind::Ident(s) if s == "record" && matches!(self.peek_at(1), TokenKind::Ident(_)) => {
                Some(TypeKind::Record)
            }
            _ => None,
        }
    }

    fn type_declaration(&mut self, annotations: Vec<Annotation>, modifiers: Vec<String>) -> PResult<TypeDecl> {
        let Some(kind) = self.type_kind() else {
            return Err(self
                .error_expected("`class`, `interface`, `enum` or `@interface`")
                .with_hint("a compilation unit must declare a type after its imports"));
        };
        if kind == TypeKind::Annotation {
            self.advance();
        }
        self.advance();

        let name = self.expect_ident("type name")?;
        if self.check(&TokenKind::Lt) {
            self.skip_angles()?;
        }
        if kind == TypeKind::Record {
            self.skip_balanced(TokenKind::LParen, TokenKind::RParen)?;
        }

        let mut extends = Vec::new();
        let mut implements = Vec::new();
        loop {
            if self.check_kw(Keyword::Extends) {
                self.advance();
                extends = self.type_list()?;
            } else if self.check_kw(Keyword::Implements) {
                self.advance();
                implements = self.type_list()?;
            } else if self.check_ident("permits") {
                self.advance();
                self.type_list()?;
            } else {
                break;
            }
        }

        self.expect(TokenKind::LBrace, "`{` to open the type body")?;
        let enum_constants = if kind == TypeKind::Enum {
            self.enum_constants()?
        } else {
            Vec::new()
        };
        let members = self.members()?;
        self.expect(TokenKind::RBrace, "`}` to close the type body")?;

        Ok(TypeDecl {
            kind,
            name,
            annotations,
            modifiers,
            extends,
            implements,
            enum_constants,
            members,
        })
    }

    fn type_list(&mut self) -> PResult<Vec<String>> {
        let mut types = vec![self.type_ref()?];
        while self.check(&TokenKind::Comma) {
            self.advance();
            types.push(self.type_ref()?);
        }
        Ok(types)
    }

    fn enum_constants(&mut self) -> PResult<Vec<String>> {
        let mut constants = Vec::new();
        loop {
            match self.peek() {
                TokenKind::Semi => {
                    self.advance();
                    break;
                }
                TokenKind::RBrace => break,
                _ => {}
            }
            while self.check(&TokenKind::At) {
                self.annotation()?;
            }
            constants.push(self.expect_ident("enum constant")?);
            if self.check(&TokenKind::LParen) {
                self.skip_balanced(TokenKind::LParen, TokenKind::RParen)?;
            }
            if self.check(&TokenKind::LBrace) {
                self.skip_balanced(TokenKind::LBrace, TokenKind::RBrace)?;
            }
            match self.peek() {
                TokenKind::Comma => {
                    self.advance();
                }
                TokenKind::Semi => {
                    self.advance();
                    break;
                }
                TokenKind::RBrace => break,
                _ => return Err(self.error_expected("`,`, `;` or `}` after enum constant")),
            }
        }
        Ok(constants)
    }

    // ========================================================================
    // Members
    // ========================================================================

    fn members(&mut self) -> PResult<Vec<Spanned<Member>>> {
        let mut members = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            if self.is_at_end() {
                return Err(self.error_expected("`}`"));
            }
            if self.check(&TokenKind::Semi) {
                self.advance();
                continue;
            }
            let start = self.current_span();
            match self.member() {
                Ok(member) => members.push(Spanned::new(member, start.merge(self.previous_span()))),
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize_member();
                }
            }
        }
        Ok(members)
    }

    fn member(&mut self) -> PResult<Member> {
        let (annotations, modifiers) = self.modifiers()?;

        if self.check(&TokenKind::LBrace) {
            self.skip_balanced(TokenKind::LBrace, TokenKind::RBrace)?;
            return Ok(Member::Initializer {
                is_static: modifiers.iter().any(|m| m == "static"),
            });
        }

        if self.type_kind().is_some() {
            return self.type_declaration(annotations, modifiers).map(Member::Type);
        }

        if self.check(&TokenKind::Lt) {
            self.skip_angles()?;
        }

        if matches!(self.peek(), TokenKind::Ident(_)) && matches!(self.peek_at(1), TokenKind::LParen) {
            let name = self.expect_ident("constructor name")?;
            let method = self.method_rest(annotations, modifiers, None, name)?;
            return Ok(Member::Constructor(method));
        }

        // Compact record constructor.
        if matches!(self.peek(), TokenKind::Ident(_)) && matches!(self.peek_at(1), TokenKind::LBrace) {
            let name = self.expect_ident("constructor name")?;
            self.skip_balanced(TokenKind::LBrace, TokenKind::RBrace)?;
            return Ok(Member::Constructor(MethodDecl {
                annotations,
                modifiers,
                return_type: None,
                name,
                params: Vec::new(),
                has_body: true,
            }));
        }

        let ty = self.type_ref()?;
        let name = self.expect_ident("member name")?;

        if self.check(&TokenKind::LParen) {
            let method = self.method_rest(annotations, modifiers, Some(ty), name)?;
            return Ok(Member::Method(method));
        }

        let mut names = vec![name];
        loop {
            while self.check(&TokenKind::LBracket) {
                self.advance();
                self.expect(TokenKind::RBracket, "`]`")?;
            }
            if self.check(&TokenKind::Eq) {
                self.advance();
                self.skip_initializer()?;
            }
            match self.peek() {
                TokenKind::Comma => {
                    self.advance();
                    names.push(self.expect_ident("field name")?);
                }
                TokenKind::Semi => {
                    self.advance();
                    break;
                }
                _ => return Err(self.error_expected("`;` after field declaration")),
            }
        }

        Ok(Member::Field(FieldDecl {
            annotations,
            modifiers,
            ty,
            names,
        }))
    }

    fn method_rest(
        &mut self,
        annotations: Vec<Annotation>,
        modifiers: Vec<String>,
        return_type: Option<String>,
        name: String,
    ) -> PResult<MethodDecl> {
        let params = self.params()?;
        while self.check(&TokenKind::LBracket) {
            self.advance();
            self.expect(TokenKind::RBracket, "`]`")?;
        }
        if self.check_kw(Keyword::Throws) {
            self.advance();
            self.type_list()?;
        }
        if self.check_kw(Keyword::Default) {
            self.advance();
            self.skip_initializer()?;
        }

        let has_body = match self.peek() {
            TokenKind::LBrace => {
                self.skip_balanced(TokenKind::LBrace, TokenKind::RBrace)?;
                true
            }
            TokenKind::Semi => {
                self.advance();
                false
            }
            _ => return Err(self.error_expected("method body or `;`")),
        };

        Ok(MethodDecl {
            annotations,
            modifiers,
            return_type,
            name,
            params,
            has_body,
        })
    }

    fn params(&mut self) -> PResult<Vec<Param>> {
        self.expect(TokenKind::LParen, "`(`")?;
        let mut params = Vec::new();
        if self.check(&TokenKind::RParen) {
            self.advance();
            return Ok(params);
        }
        loop {
            self.modifiers()?;
            let ty = self.type_ref()?;
            let name = self.expect_ident("parameter name")?;
            while self.check(&TokenKind::LBracket) {
                self.advance();
                self.expect(TokenKind::RBracket, "`]`")?;
            }
            params.push(Param { ty, name });
            if self.check(&TokenKind::Comma) {
                self.advance();
                continue;
            }
            self.expect(TokenKind::RParen, "`,` or `)` in parameter list")?;
            return Ok(params);
        }
    }

    /// A type reference: `int`, `java.util.List<String>`, `String[]`, `Object...`.
    fn type_ref(&mut self) -> PResult<String> {
        while self.check(&TokenKind::At) {
            self.annotation()?;
        }
        let start = self.pos;
        self.expect_ident("type")?;
        loop {
            match self.peek() {
                TokenKind::Dot if matches!(self.peek_at(1), TokenKind::Ident(_)) => {
                    self.advance();
                    self.advance();
                }
                TokenKind::Lt => self.skip_angles()?,
                TokenKind::LBracket if matches!(self.peek_at(1), TokenKind::RBracket) => {
                    self.advance();
                    self.advance();
                }
                TokenKind::Ellipsis => {
                    self.advance();
                    break;
                }
                _ => break,
            }
        }
        Ok(self.text_since(start))
    }

    // ========================================================================
    // Skipping
    // ========================================================================

    /// Consume a balanced `open ... close` run and return its span.
    fn skip_balanced(&mut self, open: TokenKind, close: TokenKind) -> PResult<Span> {
        let start = self.expect(open.clone(), &open.describe())?;
        let mut depth = 1usize;
        while depth > 0 {
            if self.is_at_end() {
                return Err(SyntaxError::syntax(
                    format!("Unexpected end of input, expected {}", close.describe()),
                    start,
                ));
            }
            let kind = &self.advance().kind;
            if *kind == open {
                depth += 1;
            } else if *kind == close {
                depth -= 1;
            }
        }
        Ok(start.merge(self.previous_span()))
    }

    fn skip_angles(&mut self) -> PResult<()> {
        let start = self.expect(TokenKind::Lt, "`<`")?;
        let mut depth = 1usize;
        while depth > 0 {
            match self.peek() {
                TokenKind::Lt => depth += 1,
                TokenKind::Gt => depth -= 1,
                TokenKind::Eof | TokenKind::LBrace | TokenKind::Semi => {
                    return Err(SyntaxError::syntax("Unclosed type argument list", start));
                }
                _ => {}
            }
            self.advance();
        }
        Ok(())
    }

    /// Skip an expression up to the `,` or `;` that ends it.
    ///
    /// A comma only ends the initializer when what follows looks like another declarator
    /// (`name =`, `name,`, `name;`, `name[`), so `new HashMap<K, V>()` stays in one piece.
    fn skip_initializer(&mut self) -> PResult<()> {
        let start = self.current_span();
        let mut depth = 0usize;
        loop {
            match self.peek() {
                TokenKind::Eof => return Err(SyntaxError::syntax("Unterminated initializer", start)),
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => depth += 1,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    if depth == 0 {
                        return Err(self.error_expected("`;`"));
                    }
                    depth -= 1;
                }
                TokenKind::Semi if depth == 0 => return Ok(()),
                TokenKind::Comma if depth == 0 => {
                    let next_is_declarator = matches!(self.peek_at(1), TokenKind::Ident(_))
                        && matches!(
                            self.peek_at(2),
                            TokenKind::Eq | TokenKind::Comma | TokenKind::Semi | TokenKind::LBracket
                        );
                    if next_is_declarator {
                        return Ok(());
                    }
                }
                _ => {}
            }
            self.advance();
        }
    }

    // ========================================================================
    // Error recovery
    // ========================================================================

    fn skip_past_semi(&mut self) {
        while !self.is_at_end() {
            if matches!(self.advance().kind, TokenKind::Semi) {
                return;
            }
        }
    }

    /// Skip to the end of the broken member: past a `;` or a `{...}` block at member depth, or up to the
    /// `}` that closes the enclosing type.
    fn synchronize_member(&mut self) {
        let mut depth = 0usize;
        while !self.is_at_end() {
            match self.peek() {
                TokenKind::LBrace | TokenKind::LParen | TokenKind::LBracket => depth += 1,
                TokenKind::RParen | TokenKind::RBracket => depth = depth.saturating_sub(1),
                TokenKind::RBrace => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                    if depth == 0 {
                        self.advance();
                        return;
                    }
                }
                TokenKind::Semi if depth == 0 => {
                    self.advance();
                    return;
                }
                _ => {}
            }
            self.advance();
        }
    }

    fn synchronize_top_level(&mut self) {
        let mut depth = 0usize;
        while !self.is_at_end() {
            match self.peek() {
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.advance();
                        return;
                    }
                }
                _ => {}
            }
            self.advance();
        }
    }

    // ========================================================================
    // Structural checks
    // ========================================================================

    fn check_structure(&mut self, unit: &CompilationUnit) {
        if unit.types.is_empty() {
            self.errors.push(
                SyntaxError::structure("No type declaration found", self.current_span())
                    .with_hint("a compilation unit must declare at least one class, interface or enum"),
            );
            return;
        }

        let public: Vec<&Spanned<TypeDecl>> = unit.types.iter().filter(|t| t.node.is_public()).collect();
        if public.len() > 1 {
            self.errors.push(SyntaxError::structure(
                format!(
                    "More than one public top-level type (`{}` and `{}`)",
                    public[0].node.name, public[1].node.name
                ),
                public[1].span,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::java::lexer;

    fn parse_str(source: &str) -> Result<CompilationUnit, Vec<SyntaxError>> {
        let tokens = lexer::lex(source)?;
        Parser::new(source, &tokens).parse()
    }

    #[test]
    fn test_package_and_imports() {
        let unit = parse_str(
            "package com.acme;\nimport java.util.List;\nimport static org.junit.Assert.*;\nclass A {}",
        )
        .unwrap();
        assert_eq!(unit.package_name(), "com.acme");
        assert_eq!(unit.imports.len(), 2);
        assert!(unit.imports_path("java.util.List"));
        assert!(unit.imports[1].node.is_static);
        assert!(unit.imports[1].node.wildcard);
        assert_eq!(unit.imports[1].node.path, "org.junit.Assert");
    }

    #[test]
    fn test_default_package() {
        let unit = parse_str("public class Widget {}").unwrap();
        assert_eq!(unit.package_name(), "");
        assert_eq!(unit.qualified_name().as_deref(), Some("Widget"));
        assert_eq!(unit.logical_path().as_deref(), Some("Widget.java"));
    }

    #[test]
    fn test_fields_and_methods() {
        let source = r#"
package com.acme;

@RunWith(Arquillian.class)
public class WidgetTest {
    @Inject
    private Widget widget;

    private Map<String, List<String>> index = new HashMap<String, List<String>>(), other;

    @Deployment
    public static JavaArchive createDeployment() {
        return ShrinkWrap.create(JavaArchive.class, "test.jar")
            .addClass(Widget.class);
    }

    @Test
    public void testIsDeployed() throws Exception {
        Assert.assertNotNull(widget);
    }
}
"#;
        let unit = parse_str(source).unwrap();
        let ty = unit.primary_type().unwrap();
        assert_eq!(ty.name, "WidgetTest");
        assert!(ty.has_annotation("RunWith"));
        assert_eq!(ty.annotations[0].args.as_deref(), Some("Arquillian.class"));

        let fields: Vec<_> = ty.fields().collect();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].ty, "Widget");
        assert!(fields[0].has_annotation("Inject"));
        assert_eq!(fields[1].ty, "Map<String,List<String>>");
        assert_eq!(fields[1].names, vec!["index", "other"]);

        let deployment: Vec<_> = ty.annotated_methods("Deployment").collect();
        assert_eq!(deployment.len(), 1);
        assert!(deployment[0].is_static());
        assert_eq!(deployment[0].return_type.as_deref(), Some("JavaArchive"));
    }

    #[test]
    fn test_constructor_enum_and_nested_types() {
        let source = r#"
public class Outer<T extends Comparable<T>> extends Base implements Runnable, Serializable {
    static { init(); }
    public Outer(String name, int... counts) { }
    public <R> R map(java.util.function.Function<T, R> f) { return null; }
    enum Color { RED, GREEN("g") { }, BLUE; int code; }
    interface Listener { void fire(String[] args); }
    @interface Marker { String value() default ""; }
    public void run() {}
}
"#;
        let unit = parse_str(source).unwrap();
        let ty = unit.primary_type().unwrap();
        assert_eq!(ty.extends, vec!["Base"]);
        assert_eq!(ty.implements, vec!["Runnable", "Serializable"]);

        let kinds: Vec<&str> = ty
            .members
            .iter()
            .map(|m| match &m.node {
                Member::Initializer { .. } => "init",
                Member::Constructor(_) => "ctor",
                Member::Method(_) => "method",
                Member::Field(_) => "field",
                Member::Type(_) => "type",
            })
            .collect();
        assert_eq!(kinds, vec!["init", "ctor", "method", "type", "type", "type", "method"]);

        if let Member::Constructor(ctor) = &ty.members[1].node {
            assert_eq!(ctor.params.len(), 2);
            assert_eq!(ctor.params[1].ty, "int...");
        }
        if let Member::Type(color) = &ty.members[3].node {
            assert_eq!(color.enum_constants, vec!["RED", "GREEN", "BLUE"]);
            assert_eq!(color.fields().count(), 1);
        }
    }

    #[test]
    fn test_record_compact_constructor_and_non_sealed() {
        let source = r#"
package com.acme;

public sealed interface Shape permits Point, Square {}

record Point(int x, int y) implements Shape {
    public Point {
        if (x < 0) { throw new IllegalArgumentException(); }
    }
}

non-sealed class Square implements Shape {
    private int side;
}
"#;
        let unit = parse_str(source).unwrap();
        assert_eq!(unit.types.len(), 3);

        let point = &unit.types[1].node;
        assert_eq!(point.kind, TypeKind::Record);
        match &point.members[0].node {
            Member::Constructor(ctor) => {
                assert_eq!(ctor.name, "Point");
                assert!(ctor.params.is_empty());
                assert!(ctor.has_body);
            }
            other => panic!("Expected compact constructor, got {:?}", other),
        }

        let square = &unit.types[2].node;
        assert_eq!(square.modifiers, vec!["non-sealed"]);
        assert_eq!(square.fields().count(), 1);
    }

    #[test]
    fn test_missing_type_declaration() {
        let errs = parse_str("package com.acme;\nimport java.util.List;\n").unwrap_err();
        assert_eq!(errs.len(), 1);
        assert!(errs[0].message.contains("No type declaration"));
    }

    #[test]
    fn test_two_public_types_rejected() {
        let errs = parse_str("public class A {}\npublic class B {}").unwrap_err();
        assert!(errs[0].message.contains("More than one public top-level type"));
    }

    #[test]
    fn test_broken_member_does_not_hide_later_errors() {
        let source = "class A {\n  int = 3;\n  void ok() {}\n  String;\n}";
        let errs = parse_str(source).unwrap_err();
        assert_eq!(errs.len(), 2, "{:?}", errs);
    }

    #[test]
    fn test_missing_semicolon_after_package() {
        let errs = parse_str("package com.acme\nclass A {}").unwrap_err();
        assert!(errs[0].message.contains("`;` after package name"));
    }
}
