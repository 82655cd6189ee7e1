//! The library-wide error type.
//!
//! Every fallible operation in this crate returns [`SbolError`]. Mutating
//! operations that fail leave the object graph exactly as it was before the
//! call.

use std::path::PathBuf;

use thiserror::Error;

use crate::codec::CodecError;
use crate::types::Bound;

/// Errors raised while building, mutating, reading or writing a document.
#[derive(Debug, Error)]
pub enum SbolError {
    #[error(
        "invalid display id {0:?}: must be non-empty, contain only ASCII letters, digits \
         or underscores, and must not start with a digit"
    )]
    InvalidDisplayId(String),

    #[error("invalid URI {uri:?}: {reason}")]
    InvalidUri { uri: String, reason: String },

    #[error(
        "cardinality of <{predicate}> on {identity} must be within [{lower}, {upper}], \
         operation would leave {attempted} value(s)"
    )]
    Cardinality {
        identity: String,
        predicate: String,
        lower: usize,
        upper: Bound,
        attempted: usize,
    },

    #[error("an object with identity {0} already exists")]
    DuplicateUri(String),

    #[error("{identity} is already owned by {owner}")]
    Ownership { identity: String, owner: String },

    #[error("rule {rule:?} rejected a value of <{predicate}> on {identity}: {reason}")]
    Validation {
        rule: String,
        identity: String,
        predicate: String,
        reason: String,
    },

    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("cannot rebuild {identity} from triples: {reason}")]
    Serialization { identity: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SbolError {
    pub(crate) fn invalid_uri(uri: impl Into<String>, reason: impl Into<String>) -> Self {
        SbolError::InvalidUri {
            uri: uri.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SbolError::Io {
            path: path.into(),
            source,
        }
    }

    /// The identifier of the failing validation rule, if this is a
    /// [`SbolError::Validation`].
    pub fn rule(&self) -> Option<&str> {
        match self {
            SbolError::Validation { rule, .. } => Some(rule),
            _ => None,
        }
    }
}

pub type Result<T, E = SbolError> = std::result::Result<T, E>;
