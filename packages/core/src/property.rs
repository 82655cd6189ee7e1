//! A typed, cardinality-bounded value store bound to one predicate.
//!
//! A [`Property`] lives inside its owning [`Identified`] object. Reads are
//! available directly on the property; every mutation goes through the owner
//! (see [`Identified::set`], [`Identified::add`], [`Identified::remove`] and the
//! owned-object methods) because validation rules need to see the owner.

use crate::error::{Result, SbolError};
use crate::identified::Identified;
use crate::kinds::{PropertySpec, ValueKind};
use crate::types::{Bound, Literal, Uri, Value};
use crate::validation::{check_uri, ValidationRule};

#[derive(Debug, Clone)]
pub struct Property {
    predicate: String,
    value_kind: ValueKind,
    lower: usize,
    upper: Bound,
    rules: Vec<ValidationRule>,
    values: Vec<Value>,
}

impl Property {
    pub fn new(predicate: impl Into<String>, value_kind: ValueKind, lower: usize, upper: Bound) -> Self {
        Property {
            predicate: predicate.into(),
            value_kind,
            lower,
            upper,
            rules: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn literal(predicate: impl Into<String>, lower: usize, upper: Bound) -> Self {
        Property::new(predicate, ValueKind::Literal, lower, upper)
    }

    pub fn reference(predicate: impl Into<String>, lower: usize, upper: Bound) -> Self {
        Property::new(predicate, ValueKind::Reference, lower, upper)
    }

    /// A generic 0..* annotation property accepting any kind of value.
    pub fn annotation(predicate: impl Into<String>) -> Self {
        Property::new(predicate, ValueKind::Any, 0, Bound::Unbounded)
    }

    pub fn owned(
        predicate: impl Into<String>,
        allowed: &'static [&'static crate::kinds::Kind],
        lower: usize,
        upper: Bound,
    ) -> Self {
        Property::new(predicate, ValueKind::Owned(allowed), lower, upper)
    }

    /// Attach a validation rule, run on every value this property accepts.
    pub fn with_rule(mut self, rule: ValidationRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub(crate) fn from_spec(spec: &PropertySpec) -> Self {
        Property {
            predicate: spec.predicate.to_owned(),
            value_kind: spec.value,
            lower: spec.lower,
            upper: spec.upper,
            rules: spec.rules.to_vec(),
            values: Vec::new(),
        }
    }

    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    pub fn value_kind(&self) -> ValueKind {
        self.value_kind
    }

    /// Can this property hold owned children?
    pub fn is_owned(&self) -> bool {
        matches!(self.value_kind, ValueKind::Owned(_) | ValueKind::Any)
    }

    pub fn lower(&self) -> usize {
        self.lower
    }

    pub fn upper(&self) -> Bound {
        self.upper
    }

    pub fn rules(&self) -> &[ValidationRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value at `index`.
    pub fn get(&self, index: usize) -> Result<&Value> {
        self.values.get(index).ok_or_else(|| {
            SbolError::NotFound(format!(
                "index {index} of <{}> (holds {} value(s))",
                self.predicate,
                self.values.len()
            ))
        })
    }

    pub fn first(&self) -> Option<&Value> {
        self.values.first()
    }

    /// All values in insertion order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// The value matching `key`: an owned object by identity or display id, a
    /// reference by URI, or a literal by lexical form.
    pub fn find(&self, key: &str) -> Option<&Value> {
        self.values.iter().find(|v| v.matches(key))
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.values.iter().position(|v| v.matches(key))
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.values.iter().filter_map(Value::as_literal)
    }

    pub fn references(&self) -> impl Iterator<Item = &Uri> {
        self.values.iter().filter_map(Value::as_uri)
    }

    pub fn objects(&self) -> impl Iterator<Item = &Identified> {
        self.values.iter().filter_map(Value::as_object)
    }

    pub(crate) fn objects_mut(&mut self) -> impl Iterator<Item = &mut Identified> {
        self.values.iter_mut().filter_map(Value::as_object_mut)
    }

    pub(crate) fn values_mut(&mut self) -> &mut Vec<Value> {
        &mut self.values
    }

    pub(crate) fn take_values(&mut self) -> Vec<Value> {
        std::mem::take(&mut self.values)
    }

    /// Would a store of `n` values respect the bounds?
    pub fn admits(&self, n: usize) -> bool {
        n >= self.lower && self.upper.allows(n)
    }

    pub(crate) fn check_size(&self, owner: &str, n: usize) -> Result<()> {
        if self.admits(n) {
            Ok(())
        } else {
            Err(SbolError::Cardinality {
                identity: owner.to_owned(),
                predicate: self.predicate.clone(),
                lower: self.lower,
                upper: self.upper,
                attempted: n,
            })
        }
    }

    /// Check that a candidate has the right cell kind for this property, that
    /// references are well-formed, and that owned objects have an allowed type.
    pub(crate) fn check_value_kind(&self, owner: &str, value: &Value) -> Result<()> {
        let reject = |reason: String| SbolError::Validation {
            rule: "value-kind".into(),
            identity: owner.to_owned(),
            predicate: self.predicate.clone(),
            reason,
        };
        match (&self.value_kind, value) {
            (ValueKind::Literal, Value::Literal(_)) => Ok(()),
            (ValueKind::Reference | ValueKind::Any, Value::Uri(u)) => check_uri(u.as_str()),
            (ValueKind::Any, _) => Ok(()),
            (ValueKind::Owned(allowed), Value::Owned(obj)) => {
                if allowed.is_empty() || allowed.iter().any(|k| k.type_uri == obj.type_uri().as_str()) {
                    Ok(())
                } else {
                    Err(SbolError::Validation {
                        rule: "allowed-kind".into(),
                        identity: owner.to_owned(),
                        predicate: self.predicate.clone(),
                        reason: format!(
                            "<{}> is not one of {}",
                            obj.type_uri(),
                            allowed.iter().map(|k| k.name).collect::<Vec<_>>().join(", ")
                        ),
                    })
                }
            }
            (expected, got) => Err(reject(format!(
                "expected {}, got {}",
                match expected {
                    ValueKind::Literal => "a literal",
                    ValueKind::Reference => "a reference",
                    ValueKind::Owned(_) => "an owned object",
                    ValueKind::Any => "any value",
                },
                got.kind_name()
            ))),
        }
    }
}
