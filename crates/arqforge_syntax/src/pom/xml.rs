//! Minimal XML element scanner.
//!
//! Enough XML for Maven POMs: elements, attributes (skipped), text, comments, CDATA, processing
//! instructions and a DOCTYPE. Every element keeps the byte span of the whole element and of its content so
//! callers can splice edits into the original text.

use crate::ast::Span;
use crate::diagnostics::SyntaxError;

/// An element and its children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub name: String,
    /// From the `<` of the start tag to the `>` of the end tag.
    pub span: Span,
    /// Between the start tag and the end tag. Empty (and equal to `span.end`) for `<x/>`.
    pub content: Span,
    /// Direct text content with entities decoded, concatenated across child elements.
    pub text: String,
    pub children: Vec<Element>,
    pub self_closing: bool,
}

impl Element {
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }

    /// Trimmed text of the first child called `name`.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(Element::trimmed_text)
    }

    /// Byte offset where the end tag starts (`</name>`).
    pub fn close_tag_start(&self) -> usize {
        self.content.end
    }
}

/// Decode the five predefined XML entities and numeric character references.
pub fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let Some(semi) = tail.find(';') else {
            out.push_str(tail);
            return out;
        };
        let entity = &tail[1..semi];
        let decoded = match entity {
            "lt" => Some('<'),
            "gt" => Some('>'),
            "amp" => Some('&'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => entity
                .strip_prefix("#x")
                .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                .and_then(char::from_u32),
        };
        match decoded {
            Some(c) => out.push(c),
            None => out.push_str(&tail[..=semi]),
        }
        rest = &tail[semi + 1..];
    }
    out.push_str(rest);
    out
}

/// Escape text for use as element content.
pub fn escape_text(raw: &str) -> String {
    raw.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

struct Scanner<'a> {
    src: &'a str,
    pos: usize,
    stack: Vec<Element>,
    root: Option<Element>,
    errors: Vec<SyntaxError>,
}

impl<'a> Scanner<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    /// Skip past `terminator`, or report `what` as unterminated and stop scanning.
    fn skip_until(&mut self, terminator: &str, what: &str) -> bool {
        match self.rest().find(terminator) {
            Some(i) => {
                self.pos += i + terminator.len();
                true
            }
            None => {
                self.errors.push(SyntaxError::lexical(
                    format!("Unterminated {}", what),
                    Span::new(self.pos, self.src.len()),
                ));
                self.pos = self.src.len();
                false
            }
        }
    }

    fn attach(&mut self, element: Element) {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(element);
        } else if self.root.is_some() {
            self.errors
                .push(SyntaxError::structure("More than one root element", element.span));
        } else {
            self.root = Some(element);
        }
    }

    fn scan(&mut self) {
        while self.pos < self.src.len() {
            let start = self.pos;
            let rest = self.rest();
            if rest.starts_with("<!--") {
                self.skip_until("-->", "comment");
            } else if rest.starts_with("<![CDATA[") {
                self.pos += "<![CDATA[".len();
                let body_start = self.pos;
                if self.skip_until("]]>", "CDATA section") {
                    let body = &self.src[body_start..self.pos - 3];
                    self.push_text(body.to_string(), start);
                }
            } else if rest.starts_with("<?") {
                self.skip_until("?>", "processing instruction");
            } else if rest.starts_with("<!") {
                self.skip_until(">", "declaration");
            } else if rest.starts_with("</") {
                self.end_tag(start);
            } else if rest.starts_with('<') {
                self.start_tag(start);
            } else {
                let len = rest.find('<').unwrap_or(rest.len());
                let raw = &rest[..len];
                self.pos += len;
                self.push_text(decode_entities(raw), start);
            }
        }
    }

    fn push_text(&mut self, text: String, start: usize) {
        match self.stack.last_mut() {
            Some(top) => top.text.push_str(&text),
            None if text.trim().is_empty() => {}
            None => self.errors.push(SyntaxError::structure(
                "Text outside the root element",
                Span::new(start, self.pos),
            )),
        }
    }

    fn tag_end(&self) -> Option<usize> {
        let bytes = self.src.as_bytes();
        let mut quote: Option<u8> = None;
        for (i, &b) in bytes.iter().enumerate().skip(self.pos) {
            match quote {
                Some(q) if b == q => quote = None,
                Some(_) => {}
                None if b == b'"' || b == b'\'' => quote = Some(b),
                None if b == b'>' => return Some(i),
                None => {}
            }
        }
        None
    }

    fn start_tag(&mut self, start: usize) {
        let Some(gt) = self.tag_end() else {
            self.errors.push(SyntaxError::lexical(
                "Unterminated start tag",
                Span::new(start, self.src.len()),
            ));
            self.pos = self.src.len();
            return;
        };
        let inner = &self.src[start + 1..gt];
        let self_closing = inner.ends_with('/');
        let name_len = inner
            .find(|c: char| c.is_whitespace() || c == '/')
            .unwrap_or(inner.len());
        let name = &inner[..name_len];
        self.pos = gt + 1;

        if name.is_empty() {
            self.errors
                .push(SyntaxError::syntax("Expected element name after `<`", Span::new(start, self.pos)));
            return;
        }

        let element = Element {
            name: name.to_string(),
            span: Span::new(start, self.pos),
            content: Span::new(self.pos, self.pos),
            self_closing,
            ..Element::default()
        };
        if self_closing {
            self.attach(element);
        } else {
            self.stack.push(element);
        }
    }

    fn end_tag(&mut self, start: usize) {
        let Some(gt) = self.rest().find('>').map(|i| self.pos + i) else {
            self.errors.push(SyntaxError::lexical(
                "Unterminated end tag",
                Span::new(start, self.src.len()),
            ));
            self.pos = self.src.len();
            return;
        };
        let name = self.src[start + 2..gt].trim();
        self.pos = gt + 1;
        let span = Span::new(start, self.pos);

        let Some(mut element) = self.stack.pop() else {
            self.errors
                .push(SyntaxError::structure(format!("Unexpected closing tag `</{}>`", name), span));
            return;
        };
        if element.name != name {
            self.errors.push(
                SyntaxError::structure(
                    format!("Mismatched closing tag: expected `</{}>`, found `</{}>`", element.name, name),
                    span,
                )
                .with_hint(format!("`<{}>` opened at byte {}", element.name, element.span.start)),
            );
        }
        element.content = Span::new(element.span.end, start);
        element.span = Span::new(element.span.start, self.pos);
        self.attach(element);
    }
}

/// Scan `source` into its root element.
pub fn parse_document(source: &str) -> Result<Element, Vec<SyntaxError>> {
    let mut scanner = Scanner {
        src: source,
        pos: 0,
        stack: Vec::new(),
        root: None,
        errors: Vec::new(),
    };
    scanner.scan();

    while let Some(open) = scanner.stack.pop() {
        scanner.errors.push(
            SyntaxError::structure(format!("Unclosed element `<{}>`", open.name), open.span)
                .with_hint(format!("add `</{}>`", open.name)),
        );
    }

    match scanner.root {
        Some(root) if scanner.errors.is_empty() => Ok(root),
        None if scanner.errors.is_empty() => Err(vec![SyntaxError::structure(
            "No root element",
            Span::new(0, source.len()),
        )]),
        _ => Err(scanner.errors),
    }
}
