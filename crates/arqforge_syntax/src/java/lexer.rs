//! Lexer for Java source text.
//!
//! Handles identifiers, the keywords listed in [`super::tokens::Keyword`], numeric/string/char/text-block
//! literals, line and block comments, and punctuation. Brackets are tracked on a stack so an unbalanced
//! `(`/`[`/`{` is reported at lex time, before the parser has to guess.

use super::tokens::{Token, TokenKind, keyword_id};
use crate::ast::Span;
use crate::diagnostics::SyntaxError;

/// Lexer for Java source code.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    /// Open brackets awaiting their closing partner: (bracket char, offset)
    brackets: Vec<(char, usize)>,
    tokens: Vec<Token>,
    errors: Vec<SyntaxError>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            brackets: Vec::new(),
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source.
    ///
    /// The token stream always ends with an `Eof` token.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Vec<SyntaxError>> {
        while self.peek().is_some() {
            self.scan_token();
        }

        for (open, offset) in std::mem::take(&mut self.brackets) {
            self.errors.push(
                SyntaxError::lexical(format!("Unclosed `{}`", open), Span::new(offset, offset + 1))
                    .with_hint(format!("add the matching `{}`", closing_for(open))),
            );
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            Span::new(self.current_pos, self.current_pos),
        ));

        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].chars();
        iter.next();
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token::new(kind, Span::new(start, self.current_pos)));
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        let start = self.current_pos;
        let Some(c) = self.advance() else {
            return;
        };

        match c {
            c if c.is_whitespace() => {}
            '/' if self.peek() == Some('/') => self.skip_line_comment(),
            '/' if self.peek() == Some('*') => self.skip_block_comment(start),

            '(' => self.open_bracket('(', TokenKind::LParen, start),
            '[' => self.open_bracket('[', TokenKind::LBracket, start),
            '{' => self.open_bracket('{', TokenKind::LBrace, start),
            ')' => self.close_bracket(')', TokenKind::RParen, start),
            ']' => self.close_bracket(']', TokenKind::RBracket, start),
            '}' => self.close_bracket('}', TokenKind::RBrace, start),

            ';' => self.add_token(TokenKind::Semi, start),
            ',' => self.add_token(TokenKind::Comma, start),
            '@' => self.add_token(TokenKind::At, start),
            '<' => self.add_token(TokenKind::Lt, start),
            // `>>` stays two tokens so nested generic arguments close one level at a time
            '>' => self.add_token(TokenKind::Gt, start),
            '=' => self.add_token(TokenKind::Eq, start),
            '?' => self.add_token(TokenKind::Question, start),
            ':' => self.add_token(TokenKind::Colon, start),
            '.' => {
                if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.scan_number(start);
                } else if self.peek() == Some('.') && self.peek_next() == Some('.') {
                    self.advance();
                    self.advance();
                    self.add_token(TokenKind::Ellipsis, start);
                } else {
                    self.add_token(TokenKind::Dot, start);
                }
            }

            '"' => {
                if self.peek() == Some('"') && self.peek_next() == Some('"') {
                    self.advance();
                    self.advance();
                    self.scan_text_block(start);
                } else {
                    self.scan_quoted(start, '"');
                }
            }
            '\'' => self.scan_quoted(start, '\''),

            '0'..='9' => self.scan_number(start),

            _ if is_ident_start(c) => self.scan_identifier(start),

            '+' | '-' | '*' | '/' | '%' | '&' | '|' | '^' | '!' | '~' => self.add_token(TokenKind::Op(c), start),

            _ => {
                self.errors.push(SyntaxError::lexical(
                    format!("Unexpected character '{}'", c),
                    Span::new(start, self.current_pos),
                ));
            }
        }
    }

    // ========================================================================
    // Comments
    // ========================================================================

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn skip_block_comment(&mut self, start: usize) {
        self.advance(); // '*'
        loop {
            match self.advance() {
                Some('*') if self.match_char('/') => return,
                Some(_) => {}
                None => {
                    self.errors.push(SyntaxError::lexical(
                        "Unterminated block comment",
                        Span::new(start, self.current_pos),
                    ));
                    return;
                }
            }
        }
    }

    // ========================================================================
    // Brackets
    // ========================================================================

    fn open_bracket(&mut self, open: char, kind: TokenKind, start: usize) {
        self.brackets.push((open, start));
        self.add_token(kind, start);
    }

    fn close_bracket(&mut self, close: char, kind: TokenKind, start: usize) {
        match self.brackets.last() {
            Some(&(open, _)) if closing_for(open) == close => {
                self.brackets.pop();
            }
            Some(&(open, offset)) => {
                self.errors.push(
                    SyntaxError::lexical(
                        format!("Mismatched `{}`: expected `{}`", close, closing_for(open)),
                        Span::new(start, self.current_pos),
                    )
                    .with_hint(format!("`{}` opened at byte {}", open, offset)),
                );
                self.brackets.pop();
            }
            None => {
                self.errors.push(SyntaxError::lexical(
                    format!("Unmatched closing `{}`", close),
                    Span::new(start, self.current_pos),
                ));
            }
        }
        self.add_token(kind, start);
    }

    // ========================================================================
    // Literals and identifiers
    // ========================================================================

    fn scan_quoted(&mut self, start: usize, quote: char) {
        loop {
            match self.advance() {
                Some('\\') => {
                    self.advance();
                }
                Some(c) if c == quote => break,
                Some('\n') | None => {
                    self.errors.push(SyntaxError::lexical(
                        if quote == '"' {
                            "Unterminated string literal"
                        } else {
                            "Unterminated char literal"
                        },
                        Span::new(start, self.current_pos),
                    ));
                    return;
                }
                Some(_) => {}
            }
        }
        let text = self.source[start..self.current_pos].to_string();
        let kind = if quote == '"' {
            TokenKind::String(text)
        } else {
            TokenKind::Char(text)
        };
        self.add_token(kind, start);
    }

    fn scan_text_block(&mut self, start: usize) {
        loop {
            match self.advance() {
                Some('\\') => {
                    self.advance();
                }
                Some('"') if self.peek() == Some('"') && self.peek_next() == Some('"') => {
                    self.advance();
                    self.advance();
                    break;
                }
                Some(_) => {}
                None => {
                    self.errors.push(SyntaxError::lexical(
                        "Unterminated text block",
                        Span::new(start, self.current_pos),
                    ));
                    return;
                }
            }
        }
        let text = self.source[start..self.current_pos].to_string();
        self.add_token(TokenKind::String(text), start);
    }

    fn scan_number(&mut self, start: usize) {
        // Digits, hex/binary prefixes, underscores, exponents, suffixes: all alphanumerics plus '.' and
        // a sign directly after an exponent marker.
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
                let prev = c;
                self.advance();
                if matches!(prev, 'e' | 'E' | 'p' | 'P') && matches!(self.peek(), Some('+') | Some('-')) {
                    self.advance();
                }
            } else {
                break;
            }
        }
        let text = self.source[start..self.current_pos].to_string();
        self.add_token(TokenKind::Number(text), start);
    }

    fn scan_identifier(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        let spelling = &self.source[start..self.current_pos];
        if let Some(id) = keyword_id(spelling) {
            self.add_token(TokenKind::Keyword(id), start);
        } else {
            self.add_token(TokenKind::Ident(spelling.to_string()), start);
        }
    }
}

fn closing_for(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Tokenize Java source text.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<SyntaxError>> {
    Lexer::new(source).tokenize()
}
