//! Core value types shared by every layer of the engine.
//!
//! [`Uri`] is a validated absolute IRI, [`Literal`] an RDF literal, [`Value`]
//! one cell of a property's store, [`Bound`] an upper cardinality bound, and
//! [`Term`]/[`Triple`] the subject-predicate-object shape exchanged with a
//! [`TripleCodec`](crate::codec::TripleCodec).

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SbolError};
use crate::identified::Identified;
use crate::validation::check_uri;
use crate::vocab::{XSD_BOOLEAN, XSD_DATE_TIME, XSD_INTEGER};

/// An absolute URI naming an object, a predicate or a type.
///
/// Constructed through [`Uri::parse`], which rejects strings that are not
/// well-formed absolute URIs. Compares and hashes as its string form, so a
/// `HashMap<Uri, _>` can be queried with a plain `&str`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Uri(String);

impl Uri {
    /// Parse and validate an absolute URI.
    pub fn parse(s: impl Into<String>) -> Result<Self> {
        let s = s.into();
        check_uri(&s)?;
        Ok(Uri(s))
    }

    /// Wrap a string already known to be a valid URI (vocabulary constants,
    /// identities composed from validated parts).
    pub(crate) fn trusted(s: impl Into<String>) -> Self {
        Uri(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// The last non-empty path segment, e.g. `"foo"` for `http://x.org/foo/`.
    pub fn last_segment(&self) -> &str {
        self.0
            .trim_end_matches(['/', '#'])
            .rsplit(['/', '#'])
            .next()
            .unwrap_or("")
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Uri {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for Uri {
    type Err = SbolError;
    fn from_str(s: &str) -> Result<Self> {
        Uri::parse(s)
    }
}

impl TryFrom<String> for Uri {
    type Error = SbolError;
    fn try_from(s: String) -> Result<Self> {
        Uri::parse(s)
    }
}

impl From<Uri> for String {
    fn from(u: Uri) -> String {
        u.0
    }
}

impl PartialEq<str> for Uri {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Uri {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// An RDF literal: a lexical form with an optional datatype IRI or language tag.
///
/// A plain string literal has neither. The engine never rewrites a literal it
/// did not create, so `"5"` and `"5"^^xsd:integer` stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub lexical: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Literal {
    pub fn string(s: impl Into<String>) -> Self {
        Literal {
            lexical: s.into(),
            datatype: None,
            language: None,
        }
    }

    pub fn integer(i: i64) -> Self {
        Literal::typed(i.to_string(), XSD_INTEGER)
    }

    pub fn boolean(b: bool) -> Self {
        Literal::typed(b.to_string(), XSD_BOOLEAN)
    }

    pub fn date_time(s: impl Into<String>) -> Self {
        Literal::typed(s, XSD_DATE_TIME)
    }

    pub fn typed(lexical: impl Into<String>, datatype: impl Into<String>) -> Self {
        Literal {
            lexical: lexical.into(),
            datatype: Some(datatype.into()),
            language: None,
        }
    }

    pub fn with_language(lexical: impl Into<String>, language: impl Into<String>) -> Self {
        Literal {
            lexical: lexical.into(),
            datatype: None,
            language: Some(language.into()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.lexical
    }

    /// Interpret the lexical form as an integer, whatever the datatype.
    pub fn as_i64(&self) -> Option<i64> {
        self.lexical.trim().parse().ok()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lexical)
    }
}

/// One cell of a property's value store.
#[derive(Debug, Clone)]
pub enum Value {
    /// A literal value (names, descriptions, sequence elements, positions).
    Literal(Literal),
    /// A non-owning reference to another object by URI.
    Uri(Uri),
    /// A child object owned exclusively by the property holding this cell.
    Owned(Identified),
}

impl Value {
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Value::Literal(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_uri(&self) -> Option<&Uri> {
        match self {
            Value::Uri(u) => Some(u),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Identified> {
        match self {
            Value::Owned(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Identified> {
        match self {
            Value::Owned(o) => Some(o),
            _ => None,
        }
    }

    /// Short name of the cell kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Literal(_) => "literal",
            Value::Uri(_) => "reference",
            Value::Owned(_) => "owned object",
        }
    }

    /// Does this cell match a lookup key? Literals match their lexical form,
    /// references their URI, and owned objects their identity or display id.
    pub fn matches(&self, key: &str) -> bool {
        match self {
            Value::Literal(l) => l.lexical == key,
            Value::Uri(u) => u.as_str() == key,
            Value::Owned(o) => o.matches(key),
        }
    }
}

impl From<Literal> for Value {
    fn from(l: Literal) -> Self {
        Value::Literal(l)
    }
}

impl From<Uri> for Value {
    fn from(u: Uri) -> Self {
        Value::Uri(u)
    }
}

impl From<Identified> for Value {
    fn from(o: Identified) -> Self {
        Value::Owned(o)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Literal(Literal::string(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Literal(Literal::string(s))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Literal(Literal::integer(i))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Literal(Literal::boolean(b))
    }
}

/// Upper cardinality bound of a property: a finite count or `*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bound {
    Finite(usize),
    Unbounded,
}

impl Bound {
    /// Is a store of `n` values within this bound?
    pub fn allows(self, n: usize) -> bool {
        match self {
            Bound::Finite(max) => n <= max,
            Bound::Unbounded => true,
        }
    }
}

/// Formats as the bound's textual form: a number or `*`.
impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Finite(n) => write!(f, "{n}"),
            Bound::Unbounded => write!(f, "*"),
        }
    }
}

/// Parses `'*'` as unbounded and any decimal count as finite.
impl FromStr for Bound {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "*" => Ok(Bound::Unbounded),
            n => n
                .parse::<usize>()
                .map(Bound::Finite)
                .map_err(|_| format!("invalid cardinality bound {s:?}; expected a count or '*'")),
        }
    }
}

/// One position of a triple.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    Iri(String),
    Blank(String),
    Literal(Literal),
}

impl Term {
    pub fn iri(s: impl Into<String>) -> Self {
        Term::Iri(s.into())
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Term::Blank(_))
    }
}

/// A (subject, predicate, object) statement.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Triple {
    pub subject: Term,
    pub predicate: String,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: Term, predicate: impl Into<String>, object: Term) -> Self {
        Triple {
            subject,
            predicate: predicate.into(),
            object,
        }
    }
}

// --- tests -------------------------------------------------------------------
