//! Syntax checks for display ids, versions and URIs, plus the pluggable
//! validation-rule interface attached to properties.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, SbolError};
use crate::identified::Identified;
use crate::types::Value;
use crate::vocab::{IUPAC_DNA, IUPAC_PROTEIN, IUPAC_RNA, SBOL_ENCODING};

/// Is `ch` an ASCII letter, ASCII digit or underscore?
///
/// Total over every `char`: non-ASCII letters, whitespace and control
/// characters all return `false`.
pub fn is_alphanumeric_or_underscore(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

pub fn is_not_alphanumeric_or_underscore(ch: char) -> bool {
    !is_alphanumeric_or_underscore(ch)
}

/// Check that `s` is a usable display id: non-empty, only `[A-Za-z0-9_]`, and
/// not starting with a digit.
pub fn validate_display_id(s: &str) -> Result<()> {
    let mut chars = s.chars();
    let valid = match chars.next() {
        Some(first) => {
            !first.is_ascii_digit()
                && is_alphanumeric_or_underscore(first)
                && chars.all(is_alphanumeric_or_underscore)
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(SbolError::InvalidDisplayId(s.to_owned()))
    }
}

/// Versions start with a digit and continue with letters, digits, `_`, `-` or `.`.
pub fn is_valid_version(s: &str) -> bool {
    VERSION_RE.is_match(s)
}

/// Is `s` a well-formed absolute URI (scheme, colon, no whitespace or
/// characters N-Triples forbids inside an IRI)?
pub fn is_valid_uri(s: &str) -> bool {
    URI_RE.is_match(s)
}

pub(crate) fn check_uri(s: &str) -> Result<()> {
    if s.is_empty() {
        return Err(SbolError::invalid_uri(s, "empty string"));
    }
    if !is_valid_uri(s) {
        return Err(SbolError::invalid_uri(
            s,
            "expected an absolute URI such as http://example.org/thing",
        ));
    }
    Ok(())
}

/// `^[0-9][A-Za-z0-9_.-]*$`
static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9][A-Za-z0-9_.\-]*$").expect("invalid version regex"));

/// `scheme ":" rest`, where rest excludes whitespace and `<>"{}|\^` and backtick.
static URI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[A-Za-z][A-Za-z0-9+.\-]*:[^\s<>"{}|\\^`]+$"#).expect("invalid URI regex")
});

// --- rules -------------------------------------------------------------------

/// The callable behind a [`ValidationRule`]: given the owning object, the
/// candidate value and the property's current values, accept or explain why not.
pub type RuleCheck = fn(&Identified, &Value, &[Value]) -> std::result::Result<(), String>;

/// A named predicate over (owner, candidate value, current store), attached to
/// a property when the property is constructed.
#[derive(Clone, Copy)]
pub struct ValidationRule {
    pub id: &'static str,
    pub check: RuleCheck,
}

impl ValidationRule {
    pub const fn new(id: &'static str, check: RuleCheck) -> Self {
        ValidationRule { id, check }
    }

    /// Run the rule, turning a rejection into [`SbolError::Validation`].
    pub fn apply(
        &self,
        owner: &Identified,
        predicate: &str,
        candidate: &Value,
        current: &[Value],
    ) -> Result<()> {
        (self.check)(owner, candidate, current).map_err(|reason| SbolError::Validation {
            rule: self.id.to_owned(),
            identity: owner.identity_str().to_owned(),
            predicate: predicate.to_owned(),
            reason,
        })
    }
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ValidationRule").field(&self.id).finish()
    }
}

pub const DISPLAY_ID_RULE: ValidationRule = ValidationRule::new("display-id", check_display_id);
pub const VERSION_RULE: ValidationRule = ValidationRule::new("version", check_version);
pub const SEQUENCE_ALPHABET_RULE: ValidationRule =
    ValidationRule::new("sequence-alphabet", check_sequence_alphabet);
pub const POSITIVE_POSITION_RULE: ValidationRule =
    ValidationRule::new("positive-position", check_positive_position);
pub const TIMESTAMP_RULE: ValidationRule = ValidationRule::new("timestamp", check_timestamp);

type RuleResult = std::result::Result<(), String>;

fn literal_of<'a>(v: &'a Value, what: &str) -> std::result::Result<&'a str, String> {
    v.as_literal()
        .map(|l| l.lexical.as_str())
        .ok_or_else(|| format!("{what} must be a literal, got {}", v.kind_name()))
}

fn check_display_id(_: &Identified, v: &Value, _: &[Value]) -> RuleResult {
    validate_display_id(literal_of(v, "display id")?).map_err(|e| e.to_string())
}

fn check_version(_: &Identified, v: &Value, _: &[Value]) -> RuleResult {
    let version = literal_of(v, "version")?;
    if is_valid_version(version) {
        Ok(())
    } else {
        Err(format!(
            "version {version:?} must start with a digit and contain only letters, digits, '_', '-' or '.'"
        ))
    }
}

// Only encodings with a known alphabet are checked.
fn check_sequence_alphabet(owner: &Identified, v: &Value, _: &[Value]) -> RuleResult {
    let elements = literal_of(v, "elements")?;
    let Some(encoding) = owner.reference(SBOL_ENCODING) else {
        return Ok(());
    };
    let alphabet = match encoding.as_str() {
        IUPAC_DNA => "ACGTURYSWKMBDHVN.-",
        IUPAC_RNA => "ACGURYSWKMBDHVN.-",
        IUPAC_PROTEIN => "ACDEFGHIKLMNPQRSTVWYBZXUO*-",
        _ => return Ok(()),
    };
    match elements
        .chars()
        .position(|c| !alphabet.contains(c.to_ascii_uppercase()))
    {
        Some(i) => Err(format!(
            "character at position {i} is not valid for encoding <{encoding}>"
        )),
        None => Ok(()),
    }
}

fn check_positive_position(_: &Identified, v: &Value, _: &[Value]) -> RuleResult {
    let position = literal_of(v, "position")?;
    match position.trim().parse::<i64>() {
        Ok(n) if n >= 1 => Ok(()),
        _ => Err(format!("position {position:?} must be an integer >= 1")),
    }
}

fn check_timestamp(_: &Identified, v: &Value, _: &[Value]) -> RuleResult {
    let ts = literal_of(v, "timestamp")?;
    chrono::DateTime::parse_from_rfc3339(ts)
        .map(|_| ())
        .map_err(|_| format!("{ts:?} is not an RFC 3339 date-time"))
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifier_letters_digits_underscore() {
        for ch in ['A', 'a', 'M', 'm', 'Z', 'z', '0', '3', '9', '_'] {
            assert!(is_alphanumeric_or_underscore(ch), "{ch:?}");
        }
    }

    #[test]
    fn classifier_rejects_everything_else() {
        for ch in ['$', '\n', '-', ' ', '\0', 'é', 'ß', '٣', '\u{7f}'] {
            assert!(!is_alphanumeric_or_underscore(ch), "{ch:?}");
            assert!(is_not_alphanumeric_or_underscore(ch), "{ch:?}");
        }
        assert!(!is_not_alphanumeric_or_underscore('A'));
    }

    #[test]
    fn display_id_accepts_valid() {
        for s in ["foo", "_x", "thing1", "A_b_9"] {
            assert!(validate_display_id(s).is_ok(), "{s}");
        }
    }

    #[test]
    fn display_id_rejects_invalid() {
        for s in ["", "1abc", "a-b", "a b", "ünï", "a/b"] {
            assert!(
                matches!(validate_display_id(s), Err(SbolError::InvalidDisplayId(_))),
                "{s}"
            );
        }
    }

    #[test]
    fn versions() {
        assert!(is_valid_version("1"));
        assert!(is_valid_version("1.0.2-alpha_3"));
        assert!(!is_valid_version("v1"));
        assert!(!is_valid_version(""));
        assert!(!is_valid_version("1 0"));
    }

    #[test]
    fn uris() {
        assert!(is_valid_uri("http://examples.org/foo/1"));
        assert!(is_valid_uri("urn:uuid:1234"));
        assert!(!is_valid_uri("examples.org/foo"));
        assert!(!is_valid_uri("http://exa mples.org"));
        assert!(!is_valid_uri("http://x.org/<a>"));
        assert!(check_uri("").is_err());
    }
}
