//! The triple-format boundary.
//!
//! The document model only needs the [`TripleCodec`] trait: bytes in, triples
//! out, and back. [`NTriples`] implements it for W3C N-Triples, one triple per
//! line with absolute IRIs.

use std::fmt::Write as _;

use thiserror::Error;

use crate::types::{Literal, Term, Triple};

/// A syntax error in serialized triples.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("line {}: {}{}", .line, .message, subject_note(.subject))]
pub struct CodecError {
    /// 1-based line number.
    pub line: usize,
    /// Subject of the offending triple, when it parsed far enough to know.
    pub subject: Option<String>,
    pub message: String,
}

fn subject_note(subject: &Option<String>) -> String {
    subject
        .as_ref()
        .map(|s| format!(" (subject {s})"))
        .unwrap_or_default()
}

pub trait TripleCodec {
    /// Format name, for logs.
    fn name(&self) -> &'static str;

    fn parse(&self, input: &str) -> Result<Vec<Triple>, CodecError>;

    fn serialize(&self, triples: &[Triple]) -> String;
}

/// W3C N-Triples.
#[derive(Debug, Default, Clone, Copy)]
pub struct NTriples;

impl TripleCodec for NTriples {
    fn name(&self) -> &'static str {
        "n-triples"
    }

    fn parse(&self, input: &str) -> Result<Vec<Triple>, CodecError> {
        let mut triples = Vec::new();
        for (index, line) in input.lines().enumerate() {
            let mut cursor = Cursor {
                rest: line,
                line: index + 1,
                subject: None,
            };
            cursor.skip_ws();
            if cursor.rest.is_empty() || cursor.rest.starts_with('#') {
                continue;
            }
            triples.push(cursor.triple()?);
        }
        Ok(triples)
    }

    fn serialize(&self, triples: &[Triple]) -> String {
        let mut out = String::with_capacity(triples.len() * 96);
        for t in triples {
            write_term(&mut out, &t.subject);
            out.push_str(" <");
            push_iri(&mut out, &t.predicate);
            out.push_str("> ");
            write_term(&mut out, &t.object);
            out.push_str(" .\n");
        }
        out
    }
}

fn write_term(out: &mut String, term: &Term) {
    match term {
        Term::Iri(iri) => {
            out.push('<');
            push_iri(out, iri);
            out.push('>');
        }
        Term::Blank(label) => {
            out.push_str("_:");
            out.push_str(label);
        }
        Term::Literal(lit) => {
            out.push('"');
            for ch in lit.lexical.chars() {
                match ch {
                    '\\' => out.push_str("\\\\"),
                    '"' => out.push_str("\\\""),
                    '\n' => out.push_str("\\n"),
                    '\r' => out.push_str("\\r"),
                    c if (c as u32) < 0x20 || c == '\u{7f}' => push_u_escape(out, c),
                    c => out.push(c),
                }
            }
            out.push('"');
            if let Some(lang) = &lit.language {
                out.push('@');
                out.push_str(lang);
            } else if let Some(datatype) = &lit.datatype {
                out.push_str("^^<");
                push_iri(out, datatype);
                out.push('>');
            }
        }
    }
}

fn push_iri(out: &mut String, iri: &str) {
    for ch in iri.chars() {
        if (ch as u32) <= 0x20 || "<>\"{}|^`\\".contains(ch) {
            push_u_escape(out, ch);
        } else {
            out.push(ch);
        }
    }
}

fn push_u_escape(out: &mut String, ch: char) {
    let _ = write!(out, "\\u{:04X}", ch as u32);
}

struct Cursor<'a> {
    rest: &'a str,
    line: usize,
    subject: Option<String>,
}

impl Cursor<'_> {
    fn error(&self, message: impl Into<String>) -> CodecError {
        CodecError {
            line: self.line,
            subject: self.subject.clone(),
            message: message.into(),
        }
    }

    fn skip_ws(&mut self) {
        self.rest = self.rest.trim_start_matches([' ', '\t']);
    }

    fn eat(&mut self, prefix: &str) -> bool {
        match self.rest.strip_prefix(prefix) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn next_char(&mut self) -> Option<char> {
        let mut chars = self.rest.chars();
        let ch = chars.next()?;
        self.rest = chars.as_str();
        Some(ch)
    }

    fn triple(&mut self) -> Result<Triple, CodecError> {
        let subject = if self.rest.starts_with('<') {
            Term::Iri(self.iri()?)
        } else if self.rest.starts_with("_:") {
            Term::Blank(self.blank()?)
        } else {
            return Err(self.error("expected an IRI or blank node as subject"));
        };
        self.subject = Some(match &subject {
            Term::Iri(s) => s.clone(),
            Term::Blank(b) => format!("_:{b}"),
            Term::Literal(_) => String::new(),
        });
        self.skip_ws();
        if !self.rest.starts_with('<') {
            return Err(self.error("expected an IRI as predicate"));
        }
        let predicate = self.iri()?;
        self.skip_ws();
        let object = if self.rest.starts_with('<') {
            Term::Iri(self.iri()?)
        } else if self.rest.starts_with("_:") {
            Term::Blank(self.blank()?)
        } else if self.rest.starts_with('"') {
            Term::Literal(self.literal()?)
        } else {
            return Err(self.error("expected an IRI, blank node or literal as object"));
        };
        self.skip_ws();
        if !self.eat(".") {
            return Err(self.error("expected '.' at end of triple"));
        }
        self.skip_ws();
        if !(self.rest.is_empty() || self.rest.starts_with('#')) {
            return Err(self.error(format!("unexpected content after triple: {:?}", self.rest)));
        }
        Ok(Triple::new(subject, predicate, object))
    }

    fn iri(&mut self) -> Result<String, CodecError> {
        self.eat("<");
        let mut out = String::new();
        loop {
            match self.next_char() {
                None => return Err(self.error("unterminated IRI")),
                Some('>') => break,
                Some('\\') => match self.next_char() {
                    Some('u') => out.push(self.hex_escape(4)?),
                    Some('U') => out.push(self.hex_escape(8)?),
                    _ => return Err(self.error("only \\u and \\U escapes are allowed in IRIs")),
                },
                Some(c) if (c as u32) <= 0x20 || "<\"{}|^`".contains(c) => {
                    return Err(self.error(format!("character {c:?} is not allowed in an IRI")))
                }
                Some(c) => out.push(c),
            }
        }
        if out.is_empty() {
            return Err(self.error("empty IRI"));
        }
        Ok(out)
    }

    fn blank(&mut self) -> Result<String, CodecError> {
        self.eat("_:");
        let len = self
            .rest
            .find(|c: char| !(c.is_alphanumeric() || matches!(c, '_' | '-' | '.')))
            .unwrap_or(self.rest.len());
        // A label may contain '.' but not end with one; that dot ends the triple.
        let label = self.rest[..len].trim_end_matches('.');
        if label.is_empty() {
            return Err(self.error("empty blank node label"));
        }
        self.rest = &self.rest[label.len()..];
        Ok(label.to_owned())
    }

    fn literal(&mut self) -> Result<Literal, CodecError> {
        self.eat("\"");
        let mut lexical = String::new();
        loop {
            match self.next_char() {
                None => return Err(self.error("unterminated string literal")),
                Some('"') => break,
                Some('\\') => {
                    let escaped = match self.next_char() {
                        Some('t') => '\t',
                        Some('b') => '\u{8}',
                        Some('n') => '\n',
                        Some('r') => '\r',
                        Some('f') => '\u{c}',
                        Some('"') => '"',
                        Some('\'') => '\'',
                        Some('\\') => '\\',
                        Some('u') => self.hex_escape(4)?,
                        Some('U') => self.hex_escape(8)?,
                        other => {
                            return Err(self.error(format!("invalid escape \\{}", other.unwrap_or(' '))))
                        }
                    };
                    lexical.push(escaped);
                }
                Some(c) => lexical.push(c),
            }
        }
        if self.eat("^^") {
            if !self.rest.starts_with('<') {
                return Err(self.error("expected a datatype IRI after '^^'"));
            }
            let datatype = self.iri()?;
            return Ok(Literal::typed(lexical, datatype));
        }
        if self.eat("@") {
            let len = self
                .rest
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
                .unwrap_or(self.rest.len());
            let tag = &self.rest[..len];
            if tag.is_empty() || !tag.starts_with(|c: char| c.is_ascii_alphabetic()) {
                return Err(self.error("invalid language tag"));
            }
            self.rest = &self.rest[len..];
            return Ok(Literal::with_language(lexical, tag));
        }
        Ok(Literal::string(lexical))
    }

    fn hex_escape(&mut self, digits: usize) -> Result<char, CodecError> {
        let hex = self
            .rest
            .get(..digits)
            .ok_or_else(|| self.error("truncated unicode escape"))?;
        let code = u32::from_str_radix(hex, 16)
            .map_err(|_| self.error(format!("invalid unicode escape {hex:?}")))?;
        let ch = char::from_u32(code)
            .ok_or_else(|| self.error(format!("escape {hex} is not a unicode scalar value")))?;
        self.rest = &self.rest[digits..];
        Ok(ch)
    }
}
