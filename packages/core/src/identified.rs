//! The base graph node and its owned-object machinery.
//!
//! An [`Identified`] object carries a type URI, an identity (once resolved) and
//! an ordered list of [`Property`] stores. Children are held by value inside
//! the parent's owned-object properties, which makes ownership exclusive: a
//! child has exactly one parent for as long as it is embedded there.
//!
//! # Identity resolution
//!
//! | Situation | Identity |
//! |-----------|----------|
//! | known top-level kind, compliant config with a namespace | composed at construction |
//! | non-compliant config, full URI supplied | the URI as given |
//! | child inserted under a parent with a persistent identity | `parent persistent / displayId [/ version]` |
//! | child inserted under a parent without one | `parent identity / displayId` |
//! | top-level added to a document while still unresolved | composed from the document's config |
//!
//! Anything else stays unresolved until one of the rows above applies; its
//! descendants resolve with it.

use std::fmt;

use tracing::debug;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{Result, SbolError};
use crate::graph;
use crate::identity::{child_identity, top_level_identity};
use crate::kinds::{self, Kind, ValueKind};
use crate::property::Property;
use crate::types::{Bound, Literal, Triple, Uri, Value};
use crate::validation::{
    check_uri, is_valid_version, validate_display_id, DISPLAY_ID_RULE, VERSION_RULE,
};
use crate::vocab::{
    DCTERMS_DESCRIPTION, DCTERMS_TITLE, PROV_WAS_DERIVED_FROM, PROV_WAS_GENERATED_BY,
    SBOL_DISPLAY_ID, SBOL_PERSISTENT_IDENTITY, SBOL_VERSION,
};

/// Who holds an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Owner {
    /// Registered directly in the document with this id.
    Document(Uuid),
    /// Embedded in `predicate` of the object with identity `parent` (`None`
    /// while the parent itself is unresolved).
    Object {
        parent: Option<Uri>,
        predicate: String,
    },
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::Document(id) => write!(f, "document {id}"),
            Owner::Object {
                parent: Some(parent),
                predicate,
            } => write!(f, "<{predicate}> of {parent}"),
            Owner::Object {
                parent: None,
                predicate,
            } => write!(f, "<{predicate}> of an unresolved object"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Identified {
    kind: Option<&'static Kind>,
    type_uri: Uri,
    identity: Option<Uri>,
    owner: Option<Owner>,
    properties: Vec<Property>,
}

const IDENTITY_FIELDS: [&str; 3] = [SBOL_DISPLAY_ID, SBOL_PERSISTENT_IDENTITY, SBOL_VERSION];

fn base_properties() -> Vec<Property> {
    vec![
        Property::reference(SBOL_PERSISTENT_IDENTITY, 0, Bound::Finite(1)),
        Property::literal(SBOL_DISPLAY_ID, 0, Bound::Finite(1)).with_rule(DISPLAY_ID_RULE),
        Property::literal(SBOL_VERSION, 0, Bound::Finite(1)).with_rule(VERSION_RULE),
        Property::literal(DCTERMS_TITLE, 0, Bound::Finite(1)),
        Property::literal(DCTERMS_DESCRIPTION, 0, Bound::Finite(1)),
        Property::reference(PROV_WAS_DERIVED_FROM, 0, Bound::Unbounded),
        Property::reference(PROV_WAS_GENERATED_BY, 0, Bound::Unbounded),
    ]
}

impl Identified {
    /// An empty object of the given type: base properties plus the kind's
    /// property table, no values, no identity.
    pub(crate) fn bare(kind: Option<&'static Kind>, type_uri: Uri) -> Self {
        let mut properties = base_properties();
        if let Some(kind) = kind {
            properties.extend(kind.properties.iter().map(Property::from_spec));
        }
        Identified {
            kind,
            type_uri,
            identity: None,
            owner: None,
            properties,
        }
    }

    fn of_kind(kind: &'static Kind) -> Self {
        Identified::bare(Some(kind), Uri::trusted(kind.type_uri))
    }

    /// Construct an object of a catalog kind.
    ///
    /// Under a compliant config `id` is a display id and the version is the
    /// config's default; otherwise `id` may be a full URI, used unchanged, or
    /// a display id resolved later against a namespace or a parent.
    pub fn new(kind: &'static Kind, id: &str, config: &Config) -> Result<Self> {
        let version = if config.compliant_uris {
            config.version()
        } else {
            None
        };
        Identified::with_version(kind, id, version, config)
    }

    /// Like [`Identified::new`] with an explicit version.
    pub fn with_version(
        kind: &'static Kind,
        id: &str,
        version: Option<&str>,
        config: &Config,
    ) -> Result<Self> {
        let mut obj = Identified::of_kind(kind);
        obj.init(id, version, config, kind.top_level)?;
        debug!(kind = kind.name, id, identity = obj.identity_str(), "constructed object");
        Ok(obj)
    }

    /// Construct an object of an arbitrary type. Known type URIs get their
    /// catalog kind; anything else becomes a generic object carrying only the
    /// base properties plus whatever annotations are added to it.
    pub fn generic(type_uri: &str, id: &str, config: &Config) -> Result<Self> {
        if let Some(kind) = kinds::by_type_uri(type_uri) {
            return Identified::new(kind, id, config);
        }
        let mut obj = Identified::bare(None, Uri::parse(type_uri)?);
        let version = config.version().filter(|_| config.compliant_uris);
        obj.init(id, version, config, false)?;
        Ok(obj)
    }

    fn init(
        &mut self,
        id: &str,
        version: Option<&str>,
        config: &Config,
        resolve_now: bool,
    ) -> Result<()> {
        if config.compliant_uris {
            validate_display_id(id)?;
            self.put(SBOL_DISPLAY_ID, vec![Literal::string(id).into()]);
            if let Some(v) = version {
                check_version(v)?;
                self.put(SBOL_VERSION, vec![Literal::string(v).into()]);
            }
            if resolve_now {
                let type_name = self.type_name().to_owned();
                if let Some(composed) = top_level_identity(config, &type_name, id, version)? {
                    self.assign(composed.identity, Some(composed.persistent_identity));
                }
            }
        } else if validate_display_id(id).is_ok() {
            self.put(SBOL_DISPLAY_ID, vec![Literal::string(id).into()]);
        } else {
            self.identity = Some(Uri::parse(id)?);
        }
        Ok(())
    }

    // --- accessors -----------------------------------------------------------

    pub fn kind(&self) -> Option<&'static Kind> {
        self.kind
    }

    pub fn type_uri(&self) -> &Uri {
        &self.type_uri
    }

    /// The type name used as the type-path segment of typed URIs.
    pub fn type_name(&self) -> &str {
        match self.kind {
            Some(kind) => kind.name,
            None => self.type_uri.last_segment(),
        }
    }

    /// May this object live directly in a document?
    pub fn is_top_level(&self) -> bool {
        self.kind.map_or(true, |k| k.top_level)
    }

    pub fn identity(&self) -> Option<&Uri> {
        self.identity.as_ref()
    }

    /// The identity, or the display id while unresolved, for messages and logs.
    pub fn identity_str(&self) -> &str {
        match (&self.identity, self.display_id()) {
            (Some(uri), _) => uri.as_str(),
            (None, Some(display_id)) => display_id,
            (None, None) => "(unresolved)",
        }
    }

    pub fn display_id(&self) -> Option<&str> {
        self.literal(SBOL_DISPLAY_ID)
    }

    pub fn persistent_identity(&self) -> Option<&Uri> {
        self.reference(SBOL_PERSISTENT_IDENTITY)
    }

    pub fn version(&self) -> Option<&str> {
        self.literal(SBOL_VERSION)
    }

    pub fn name(&self) -> Option<&str> {
        self.literal(DCTERMS_TITLE)
    }

    pub fn set_name(&mut self, name: &str) -> Result<()> {
        self.set(DCTERMS_TITLE, [Literal::string(name)])
    }

    pub fn description(&self) -> Option<&str> {
        self.literal(DCTERMS_DESCRIPTION)
    }

    pub fn set_description(&mut self, description: &str) -> Result<()> {
        self.set(DCTERMS_DESCRIPTION, [Literal::string(description)])
    }

    pub fn owner(&self) -> Option<&Owner> {
        self.owner.as_ref()
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn property(&self, predicate: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.predicate() == predicate)
    }

    fn property_mut(&mut self, predicate: &str) -> Option<&mut Property> {
        self.properties
            .iter_mut()
            .find(|p| p.predicate() == predicate)
    }

    fn property_or_missing(&self, predicate: &str) -> Result<&Property> {
        self.property(predicate).ok_or_else(|| {
            SbolError::NotFound(format!(
                "{} ({}) has no property <{predicate}>",
                self.identity_str(),
                self.type_name()
            ))
        })
    }

    /// The first literal of `predicate`, as its lexical form.
    pub fn literal(&self, predicate: &str) -> Option<&str> {
        self.property(predicate)?.literals().next().map(Literal::as_str)
    }

    /// The first reference of `predicate`.
    pub fn reference(&self, predicate: &str) -> Option<&Uri> {
        self.property(predicate)?.references().next()
    }

    pub fn references<'a>(&'a self, predicate: &str) -> impl Iterator<Item = &'a Uri> + 'a {
        self.property(predicate).into_iter().flat_map(Property::references)
    }

    /// Does `key` name this object, by identity or display id?
    pub fn matches(&self, key: &str) -> bool {
        self.identity.as_ref().is_some_and(|u| u.as_str() == key)
            || self.display_id() == Some(key)
    }

    /// Identity comparison: both resolved and equal. Use `==` for content
    /// equality.
    pub fn same_identity(&self, other: &Identified) -> bool {
        matches!((&self.identity, &other.identity), (Some(a), Some(b)) if a == b)
    }

    // --- mutation ------------------------------------------------------------

    /// Replace every value of `predicate`.
    ///
    /// Fails if the new count is outside the property's bounds, a value has
    /// the wrong kind, a rule rejects a value, or an owned value already
    /// belongs somewhere else. Owned children previously held and not present
    /// in `values` are dropped.
    pub fn set<I, V>(&mut self, predicate: &str, values: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.guard_identity_fields(predicate)?;
        let prop = self.property_or_missing(predicate)?;
        prop.check_size(self.identity_str(), values.len())?;
        for value in &values {
            self.check_candidate(prop, value)?;
        }

        let mut prepared: Vec<Value> = Vec::with_capacity(values.len());
        for value in values {
            let value = match value {
                Value::Owned(child) => Value::Owned(self.adopt(predicate, child, true, &prepared)?),
                other => other,
            };
            prepared.push(value);
        }

        let identity = self.identity_str().to_owned();
        let prop = self
            .property_mut(predicate)
            .ok_or_else(|| SbolError::NotFound(predicate.to_owned()))?;
        let previous = std::mem::replace(prop.values_mut(), prepared);
        let dropped = previous
            .iter()
            .filter_map(Value::as_object)
            .filter(|old| !prop.objects().any(|new| same_slot(old, new)))
            .count();
        if dropped > 0 {
            debug!(identity = %identity, predicate, dropped, "detached owned objects");
        }
        Ok(())
    }

    /// Append one value, failing if the property is already at its upper bound.
    pub fn add(&mut self, predicate: &str, value: impl Into<Value>) -> Result<()> {
        self.insert(predicate, value.into()).map(|_| ())
    }

    /// Remove and return the value matching `key`.
    pub fn remove(&mut self, predicate: &str, key: &str) -> Result<Value> {
        self.guard_identity_fields(predicate)?;
        let prop = self.property_or_missing(predicate)?;
        let index = prop.position(key).ok_or_else(|| {
            SbolError::NotFound(format!("{key} in <{predicate}> of {}", self.identity_str()))
        })?;
        prop.check_size(self.identity_str(), prop.len() - 1)?;
        let prop = self
            .property_mut(predicate)
            .ok_or_else(|| SbolError::NotFound(predicate.to_owned()))?;
        let value = prop.values_mut().remove(index);
        Ok(match value {
            Value::Owned(child) => Value::Owned(child.into_detached()),
            other => other,
        })
    }

    /// Attach a value under an arbitrary predicate, creating a generic 0..*
    /// property for it on first use.
    pub fn annotate(&mut self, predicate: &str, value: impl Into<Value>) -> Result<()> {
        if self.property(predicate).is_none() {
            check_uri(predicate)?;
            self.properties.push(Property::annotation(predicate));
        }
        self.add(predicate, value)
    }

    /// Extend this object with an empty property of its own, e.g. an owned
    /// store with a finite bound. Fails if the predicate is already present.
    pub fn declare(&mut self, property: Property) -> Result<()> {
        check_uri(property.predicate())?;
        if self.property(property.predicate()).is_some() {
            return Err(SbolError::Validation {
                rule: "value-kind".into(),
                identity: self.identity_str().to_owned(),
                predicate: property.predicate().to_owned(),
                reason: "property already declared".into(),
            });
        }
        if !property.is_empty() {
            return Err(SbolError::Validation {
                rule: "value-kind".into(),
                identity: self.identity_str().to_owned(),
                predicate: property.predicate().to_owned(),
                reason: "a declared property must start empty".into(),
            });
        }
        self.properties.push(property);
        Ok(())
    }

    fn guard_identity_fields(&self, predicate: &str) -> Result<()> {
        if self.identity.is_some() && IDENTITY_FIELDS.contains(&predicate) {
            return Err(SbolError::Validation {
                rule: "immutable-identity".into(),
                identity: self.identity_str().to_owned(),
                predicate: predicate.to_owned(),
                reason: "identity fields cannot change once the identity is assigned".into(),
            });
        }
        Ok(())
    }

    fn check_candidate(&self, prop: &Property, value: &Value) -> Result<()> {
        prop.check_value_kind(self.identity_str(), value)?;
        for rule in prop.rules() {
            rule.apply(self, prop.predicate(), value, prop.values())?;
        }
        Ok(())
    }

    /// Validate and append one value; returns its index.
    fn insert(&mut self, predicate: &str, value: Value) -> Result<usize> {
        self.guard_identity_fields(predicate)?;
        let prop = self.property_or_missing(predicate)?;
        if !prop.upper().allows(prop.len() + 1) {
            return Err(SbolError::Cardinality {
                identity: self.identity_str().to_owned(),
                predicate: predicate.to_owned(),
                lower: prop.lower(),
                upper: prop.upper(),
                attempted: prop.len() + 1,
            });
        }
        self.check_candidate(prop, &value)?;
        let value = match value {
            Value::Owned(child) => {
                Value::Owned(self.adopt(predicate, child, false, prop.values())?)
            }
            other => other,
        };
        let prop = self
            .property_mut(predicate)
            .ok_or_else(|| SbolError::NotFound(predicate.to_owned()))?;
        prop.values_mut().push(value);
        Ok(prop.len() - 1)
    }

    /// Take `child` into `predicate`: check ownership, resolve its identity
    /// under this object and reject a clash with `siblings`.
    fn adopt(
        &self,
        predicate: &str,
        mut child: Identified,
        replacing: bool,
        siblings: &[Value],
    ) -> Result<Identified> {
        let expected = Owner::Object {
            parent: self.identity.clone(),
            predicate: predicate.to_owned(),
        };
        match &child.owner {
            None => {}
            Some(owner)
                if replacing
                    && *owner == expected
                    && self
                        .property(predicate)
                        .is_some_and(|p| p.objects().any(|c| same_slot(c, &child))) => {}
            Some(owner) => {
                return Err(SbolError::Ownership {
                    identity: child.identity_str().to_owned(),
                    owner: owner.to_string(),
                })
            }
        }
        if let Some(identity) = &self.identity {
            child.resolve_as_child(identity, self.persistent_identity())?;
        }
        if siblings
            .iter()
            .filter_map(Value::as_object)
            .any(|s| same_slot(s, &child))
        {
            return Err(SbolError::DuplicateUri(child.identity_str().to_owned()));
        }
        child.owner = Some(expected);
        Ok(child)
    }

    // --- identity resolution -------------------------------------------------

    fn put(&mut self, predicate: &str, values: Vec<Value>) {
        if let Some(prop) = self.property_mut(predicate) {
            *prop.values_mut() = values;
        }
    }

    fn assign(&mut self, identity: Uri, persistent: Option<Uri>) {
        if let Some(p) = persistent {
            self.put(SBOL_PERSISTENT_IDENTITY, vec![Value::Uri(p)]);
        }
        self.identity = Some(identity);
    }

    pub(crate) fn set_identity_unchecked(&mut self, identity: Uri) {
        self.identity = Some(identity);
    }

    pub(crate) fn set_owner(&mut self, owner: Option<Owner>) {
        self.owner = owner;
    }

    fn resolve_as_child(&mut self, parent: &Uri, parent_persistent: Option<&Uri>) -> Result<()> {
        if self.identity.is_none() {
            let display_id = self
                .display_id()
                .ok_or_else(|| {
                    SbolError::invalid_uri(
                        format!("{parent}/?"),
                        "child has neither an identity nor a display id",
                    )
                })?
                .to_owned();
            match parent_persistent {
                Some(pp) => {
                    let composed = child_identity(pp.as_str(), &display_id, self.version())?;
                    self.assign(composed.identity, Some(composed.persistent_identity));
                }
                None => {
                    let uri = Uri::parse(format!(
                        "{}/{display_id}",
                        parent.as_str().trim_end_matches('/')
                    ))?;
                    self.assign(uri, None);
                }
            }
        }
        self.resolve_descendants()
    }

    /// Resolve this object as a document member under `config`, then its subtree.
    pub(crate) fn resolve_top_level(&mut self, config: &Config) -> Result<()> {
        if self.identity.is_none() {
            let display_id = self
                .display_id()
                .ok_or_else(|| {
                    SbolError::invalid_uri("", "object has neither an identity nor a display id")
                })?
                .to_owned();
            let type_name = self.type_name().to_owned();
            match top_level_identity(config, &type_name, &display_id, self.version())? {
                Some(composed) => {
                    self.assign(composed.identity, Some(composed.persistent_identity))
                }
                None => {
                    let namespace = config.namespace().ok_or_else(|| {
                        SbolError::invalid_uri(
                            &display_id,
                            "no namespace configured to resolve a local id",
                        )
                    })?;
                    let uri = Uri::parse(format!(
                        "{}/{display_id}",
                        namespace.trim_end_matches('/')
                    ))?;
                    self.assign(uri, None);
                }
            }
        }
        self.resolve_descendants()
    }

    fn resolve_descendants(&mut self) -> Result<()> {
        let Some(identity) = self.identity.clone() else {
            return Ok(());
        };
        let persistent = self.persistent_identity().cloned();
        for prop in &mut self.properties {
            let predicate = prop.predicate().to_owned();
            for child in prop.objects_mut() {
                child.owner = Some(Owner::Object {
                    parent: Some(identity.clone()),
                    predicate: predicate.clone(),
                });
                child.resolve_as_child(&identity, persistent.as_ref())?;
            }
        }
        Ok(())
    }

    // --- owned objects -------------------------------------------------------

    /// The owned children held by `predicate`, in order.
    pub fn children<'a>(&'a self, predicate: &str) -> impl Iterator<Item = &'a Identified> + 'a {
        self.property(predicate).into_iter().flat_map(Property::objects)
    }

    /// The child of `predicate` matching `key` by identity or display id.
    pub fn child(&self, predicate: &str, key: &str) -> Option<&Identified> {
        self.children(predicate).find(|c| c.matches(key))
    }

    pub fn child_mut(&mut self, predicate: &str, key: &str) -> Option<&mut Identified> {
        self.property_mut(predicate)?
            .objects_mut()
            .find(|c| c.matches(key))
    }

    /// Create a child of the property's default (first allowed) kind.
    pub fn create(&mut self, predicate: &str, display_id: &str) -> Result<&mut Identified> {
        let kind = match self.property_or_missing(predicate)?.value_kind() {
            ValueKind::Owned(kinds) if !kinds.is_empty() => kinds[0],
            _ => {
                return Err(SbolError::Validation {
                    rule: "value-kind".into(),
                    identity: self.identity_str().to_owned(),
                    predicate: predicate.to_owned(),
                    reason: "not an owned-object property with a default kind".into(),
                })
            }
        };
        self.create_kind(predicate, kind, display_id)
    }

    /// Create a child of `kind` under `predicate`.
    ///
    /// Under a parent with a persistent identity `id` must be a display id.
    /// Otherwise `id` may also be a full URI. A child created from a display
    /// id takes the parent's version, if any.
    pub fn create_kind(
        &mut self,
        predicate: &str,
        kind: &'static Kind,
        id: &str,
    ) -> Result<&mut Identified> {
        let mut child = Identified::of_kind(kind);
        let compliant = self.persistent_identity().is_some();
        if compliant || validate_display_id(id).is_ok() {
            validate_display_id(id)?;
            child.put(SBOL_DISPLAY_ID, vec![Literal::string(id).into()]);
            if let Some(v) = self.version() {
                child.put(SBOL_VERSION, vec![Literal::string(v).into()]);
            }
        } else {
            child.identity = Some(Uri::parse(id)?);
        }
        let created = self.add_child(predicate, child)?;
        debug!(kind = kind.name, identity = created.identity_str(), "created child");
        Ok(created)
    }

    /// Insert an existing, unowned object as a child of `predicate`.
    pub fn add_child(&mut self, predicate: &str, child: Identified) -> Result<&mut Identified> {
        let index = self.insert(predicate, Value::Owned(child))?;
        self.property_mut(predicate)
            .and_then(|p| p.values_mut().get_mut(index))
            .and_then(Value::as_object_mut)
            .ok_or_else(|| SbolError::NotFound(format!("index {index} of <{predicate}>")))
    }

    /// Replace all children of `predicate`, fixing iteration order to `children`.
    pub fn set_children(&mut self, predicate: &str, children: Vec<Identified>) -> Result<()> {
        self.set(predicate, children)
    }

    /// Detach and return every child of `predicate`. Non-object values stay.
    pub fn take_children(&mut self, predicate: &str) -> Result<Vec<Identified>> {
        let prop = self.property_or_missing(predicate)?;
        let remaining = prop.values().iter().filter(|v| v.as_object().is_none()).count();
        prop.check_size(self.identity_str(), remaining)?;
        let prop = self
            .property_mut(predicate)
            .ok_or_else(|| SbolError::NotFound(predicate.to_owned()))?;
        let (taken, kept): (Vec<Value>, Vec<Value>) = prop
            .take_values()
            .into_iter()
            .partition(|v| v.as_object().is_some());
        *prop.values_mut() = kept;
        Ok(taken
            .into_iter()
            .filter_map(|v| match v {
                Value::Owned(child) => Some(child.into_detached()),
                _ => None,
            })
            .collect())
    }

    /// Remove and return the child of `predicate` matching `key`.
    pub fn remove_child(&mut self, predicate: &str, key: &str) -> Result<Identified> {
        let in_store = self
            .property(predicate)
            .and_then(|p| p.values().iter().find(|v| v.matches(key)))
            .is_some_and(|v| v.as_object().is_some());
        if !in_store {
            return Err(SbolError::NotFound(format!(
                "child {key} in <{predicate}> of {}",
                self.identity_str()
            )));
        }
        match self.remove(predicate, key)? {
            Value::Owned(child) => Ok(child),
            _ => Err(SbolError::NotFound(key.to_owned())),
        }
    }

    /// Reorder the values of `predicate` to follow `keys`, which must name
    /// every value exactly once.
    pub fn reorder(&mut self, predicate: &str, keys: &[&str]) -> Result<()> {
        let prop = self.property_or_missing(predicate)?;
        let mut order = Vec::with_capacity(keys.len());
        for key in keys {
            let index = prop.position(key).ok_or_else(|| {
                SbolError::NotFound(format!("{key} in <{predicate}> of {}", self.identity_str()))
            })?;
            if order.contains(&index) {
                return Err(self.reorder_error(predicate, format!("{key} named twice")));
            }
            order.push(index);
        }
        if order.len() != prop.len() {
            return Err(self.reorder_error(
                predicate,
                format!("{} key(s) given for {} value(s)", order.len(), prop.len()),
            ));
        }
        let prop = self
            .property_mut(predicate)
            .ok_or_else(|| SbolError::NotFound(predicate.to_owned()))?;
        let mut slots: Vec<Option<Value>> = prop.take_values().into_iter().map(Some).collect();
        *prop.values_mut() = order.into_iter().filter_map(|i| slots[i].take()).collect();
        Ok(())
    }

    fn reorder_error(&self, predicate: &str, reason: String) -> SbolError {
        SbolError::Validation {
            rule: "reorder".into(),
            identity: self.identity_str().to_owned(),
            predicate: predicate.to_owned(),
            reason,
        }
    }

    /// Release ownership, keeping identity and content.
    pub fn into_detached(mut self) -> Identified {
        self.owner = None;
        self
    }

    // --- traversal -----------------------------------------------------------

    /// Depth-first search of this object and its descendants for `key`.
    pub fn find(&self, key: &str) -> Option<&Identified> {
        if self.matches(key) {
            return Some(self);
        }
        self.properties
            .iter()
            .flat_map(Property::objects)
            .find_map(|child| child.find(key))
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut Identified> {
        if self.matches(key) {
            return Some(self);
        }
        self.properties
            .iter_mut()
            .flat_map(|p| p.objects_mut())
            .find_map(|child| child.find_mut(key))
    }

    /// Like [`Identified::find`] but matches identities only.
    pub fn find_identity(&self, uri: &str) -> Option<&Identified> {
        if self.identity.as_ref().is_some_and(|u| u.as_str() == uri) {
            return Some(self);
        }
        self.properties
            .iter()
            .flat_map(Property::objects)
            .find_map(|child| child.find_identity(uri))
    }

    pub fn find_identity_mut(&mut self, uri: &str) -> Option<&mut Identified> {
        if self.identity.as_ref().is_some_and(|u| u.as_str() == uri) {
            return Some(self);
        }
        self.properties
            .iter_mut()
            .flat_map(|p| p.objects_mut())
            .find_map(|child| child.find_identity_mut(uri))
    }

    /// Visit this object and every descendant, parents before children.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Identified)) {
        visit(self);
        for child in self.properties.iter().flat_map(Property::objects) {
            child.walk(visit);
        }
    }

    /// Number of objects in this subtree, this one included.
    pub fn count(&self) -> usize {
        let mut n = 0;
        self.walk(&mut |_| n += 1);
        n
    }

    /// The triples of this subtree: one type triple per object and one triple
    /// per property value.
    pub fn triples(&self) -> Vec<Triple> {
        graph::object_triples(self)
    }

    /// Append a value read from a triple: kind and upper bound are checked,
    /// rules are not (see [`crate::Document::validate`]). Unknown predicates
    /// get a generic property.
    pub(crate) fn push_read(&mut self, predicate: &str, value: Value) -> Result<()> {
        if self.property(predicate).is_none() {
            self.properties.push(Property::annotation(predicate));
        }
        let identity = self.identity_str().to_owned();
        let parent = self.identity.clone();
        let prop = self
            .property_mut(predicate)
            .ok_or_else(|| SbolError::NotFound(predicate.to_owned()))?;
        let serialization = |reason: String| SbolError::Serialization {
            identity: identity.clone(),
            reason,
        };
        prop.check_value_kind(&identity, &value)
            .map_err(|e| serialization(e.to_string()))?;
        if !prop.upper().allows(prop.len() + 1) {
            return Err(serialization(format!(
                "<{predicate}> holds more than {} value(s)",
                prop.upper()
            )));
        }
        let value = match value {
            Value::Owned(mut child) => {
                child.owner = Some(Owner::Object {
                    parent,
                    predicate: predicate.to_owned(),
                });
                Value::Owned(child)
            }
            other => other,
        };
        prop.values_mut().push(value);
        Ok(())
    }
}

fn check_version(v: &str) -> Result<()> {
    if is_valid_version(v) {
        Ok(())
    } else {
        Err(SbolError::invalid_uri(
            v,
            "version must start with a digit and contain only letters, digits, '_', '-' or '.'",
        ))
    }
}

/// Two children occupy the same slot when their identities are equal or, while
/// unresolved, their display ids are.
fn same_slot(a: &Identified, b: &Identified) -> bool {
    match (&a.identity, &b.identity) {
        (Some(x), Some(y)) => x == y,
        (None, None) => a.display_id().is_some() && a.display_id() == b.display_id(),
        _ => false,
    }
}

/// Graph-isomorphic equality over [`Identified::triples`].
impl PartialEq for Identified {
    fn eq(&self, other: &Self) -> bool {
        graph::isomorphic(&self.triples(), &other.triples())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::{COLLECTION, MODULE, MODULE_DEFINITION, RANGE, SEQUENCE, SEQUENCE_ANNOTATION};
    use crate::vocab::{
        SBOL_ELEMENTS, SBOL_ENCODING, SBOL_END, SBOL_LOCATIONS, SBOL_MEMBERS, SBOL_MODULES,
        SBOL_START, IUPAC_DNA,
    };

    fn md(id: &str) -> Identified {
        Identified::new(&MODULE_DEFINITION, id, &Config::default()).unwrap()
    }

    #[test]
    fn compliant_identity_at_construction() {
        let md = md("foo");
        assert_eq!(
            md.identity().unwrap().as_str(),
            "http://examples.org/ModuleDefinition/foo/1"
        );
        assert_eq!(
            md.persistent_identity().unwrap().as_str(),
            "http://examples.org/ModuleDefinition/foo"
        );
        assert_eq!(md.display_id(), Some("foo"));
        assert_eq!(md.version(), Some("1"));
        assert_eq!(md.type_uri().as_str(), crate::vocab::SBOL_MODULE_DEFINITION);
    }

    #[test]
    fn invalid_display_id_rejected() {
        let err = Identified::new(&MODULE_DEFINITION, "1foo", &Config::default()).unwrap_err();
        assert!(matches!(err, SbolError::InvalidDisplayId(_)));
    }

    #[test]
    fn open_world_keeps_supplied_uri() {
        let obj =
            Identified::new(&COLLECTION, "http://other.org/c#1", &Config::open_world()).unwrap();
        assert_eq!(obj.identity().unwrap().as_str(), "http://other.org/c#1");
        assert!(obj.persistent_identity().is_none());

        let pending = Identified::new(&COLLECTION, "local", &Config::open_world()).unwrap();
        assert!(pending.identity().is_none());
        assert_eq!(pending.identity_str(), "local");
    }

    #[test]
    fn nested_create_composes_child_identity() {
        let mut md = md("foo");
        let m = md.create(SBOL_MODULES, "bar").unwrap();
        assert_eq!(
            m.identity().unwrap().as_str(),
            "http://examples.org/ModuleDefinition/foo/bar/1"
        );
        assert_eq!(m.kind(), Some(&MODULE));
        assert_eq!(
            m.owner(),
            Some(&Owner::Object {
                parent: md_identity(),
                predicate: SBOL_MODULES.into()
            })
        );
    }

    fn md_identity() -> Option<Uri> {
        Some(Uri::parse("http://examples.org/ModuleDefinition/foo/1").unwrap())
    }

    #[test]
    fn lookup_by_uri_display_id_and_index_agree() {
        let mut md = md("foo");
        md.create(SBOL_MODULES, "bar").unwrap();
        let prop = md.property(SBOL_MODULES).unwrap();
        let by_uri = prop.find("http://examples.org/ModuleDefinition/foo/bar/1");
        let by_id = prop.find("bar");
        let by_index = prop.get(0).ok();
        assert!(by_uri.is_some());
        assert!(std::ptr::eq(by_uri.unwrap(), by_id.unwrap()));
        assert!(std::ptr::eq(by_id.unwrap(), by_index.unwrap()));
    }

    #[test]
    fn duplicate_child_rejected() {
        let mut md = md("foo");
        md.create(SBOL_MODULES, "bar").unwrap();
        let err = md.create(SBOL_MODULES, "bar").unwrap_err();
        assert!(matches!(err, SbolError::DuplicateUri(_)));
        assert_eq!(md.children(SBOL_MODULES).count(), 1);
    }

    #[test]
    fn reparenting_rejected() {
        let mut a = md("a");
        let mut b = md("b");
        let child = a.create(SBOL_MODULES, "m").unwrap().clone();
        let err = b.add_child(SBOL_MODULES, child).unwrap_err();
        assert!(matches!(err, SbolError::Ownership { .. }));
    }

    #[test]
    fn set_detaches_missing_children_and_fixes_order() {
        let mut md = md("foo");
        md.create(SBOL_MODULES, "m1").unwrap();
        md.create(SBOL_MODULES, "m2").unwrap();
        let m2 = md.child(SBOL_MODULES, "m2").unwrap().clone();
        md.set_children(SBOL_MODULES, vec![m2]).unwrap();
        assert!(md.child(SBOL_MODULES, "m1").is_none());
        assert_eq!(md.children(SBOL_MODULES).count(), 1);

        let m3 = Identified::new(&MODULE, "m3", &Config::default()).unwrap();
        let m2 = md.child(SBOL_MODULES, "m2").unwrap().clone();
        md.set_children(SBOL_MODULES, vec![m3, m2]).unwrap();
        let order: Vec<_> = md.children(SBOL_MODULES).map(|c| c.display_id().unwrap()).collect();
        assert_eq!(order, ["m3", "m2"]);
    }

    #[test]
    fn removed_child_is_detached_and_reusable() {
        let mut a = md("a");
        let mut b = md("b");
        a.create(SBOL_MODULES, "m").unwrap();
        let m = a.remove_child(SBOL_MODULES, "m").unwrap();
        assert!(m.owner().is_none());
        b.add_child(SBOL_MODULES, m).unwrap();
        assert_eq!(b.children(SBOL_MODULES).count(), 1);
        assert!(a.remove_child(SBOL_MODULES, "m").is_err());
    }

    #[test]
    fn cardinality_upper_bound() {
        let mut seq = Identified::new(&SEQUENCE, "s", &Config::default()).unwrap();
        seq.add(SBOL_ENCODING, Uri::parse(IUPAC_DNA).unwrap()).unwrap();
        let err = seq
            .add(SBOL_ENCODING, Uri::parse(IUPAC_DNA).unwrap())
            .unwrap_err();
        assert!(matches!(err, SbolError::Cardinality { attempted: 2, .. }));
        assert_eq!(seq.property(SBOL_ENCODING).unwrap().len(), 1);
    }

    #[test]
    fn lower_bound_enforced_on_shrink() {
        let mut sa = Identified::new(&SEQUENCE_ANNOTATION, "sa", &Config::default()).unwrap();
        sa.create(SBOL_LOCATIONS, "r").unwrap();
        let err = sa.remove(SBOL_LOCATIONS, "r").unwrap_err();
        assert!(matches!(err, SbolError::Cardinality { lower: 1, attempted: 0, .. }));
        assert!(sa.take_children(SBOL_LOCATIONS).is_err());
    }

    #[test]
    fn rules_run_on_set() {
        let mut seq = Identified::new(&SEQUENCE, "s", &Config::default()).unwrap();
        seq.set(SBOL_ENCODING, [Uri::parse(IUPAC_DNA).unwrap()]).unwrap();
        seq.set(SBOL_ELEMENTS, ["acgt"]).unwrap();
        let err = seq.set(SBOL_ELEMENTS, ["acgj"]).unwrap_err();
        assert_eq!(err.rule(), Some("sequence-alphabet"));
        assert_eq!(seq.literal(SBOL_ELEMENTS), Some("acgt"));
    }

    #[test]
    fn position_rule() {
        let mut r = Identified::new(&RANGE, "r", &Config::default()).unwrap();
        assert_eq!(
            r.set(SBOL_START, [Literal::integer(0)]).unwrap_err().rule(),
            Some("positive-position")
        );
        r.set(SBOL_START, [Literal::integer(1)]).unwrap();
        r.set(SBOL_END, [Literal::integer(10)]).unwrap();
    }

    #[test]
    fn identity_fields_are_immutable() {
        let mut md = md("foo");
        let err = md.set(SBOL_DISPLAY_ID, ["bar"]).unwrap_err();
        assert_eq!(err.rule(), Some("immutable-identity"));
        assert_eq!(md.display_id(), Some("foo"));
    }

    #[test]
    fn wrong_value_kind_rejected() {
        let mut c = Identified::new(&COLLECTION, "c", &Config::default()).unwrap();
        let err = c.add(SBOL_MEMBERS, "not a reference").unwrap_err();
        assert_eq!(err.rule(), Some("value-kind"));
        let err = c
            .add(SBOL_MEMBERS, Value::Uri(Uri::trusted("no scheme")))
            .unwrap_err();
        assert!(matches!(err, SbolError::InvalidUri { .. }));
    }

    #[test]
    fn disallowed_child_kind_rejected() {
        let mut md = md("foo");
        let seq = Identified::new(&SEQUENCE, "s", &Config::default()).unwrap();
        let err = md.add_child(SBOL_MODULES, seq).unwrap_err();
        assert_eq!(err.rule(), Some("allowed-kind"));
    }

    #[test]
    fn pending_children_resolve_with_parent() {
        let config = Config::open_world();
        let mut parent = Identified::new(&MODULE_DEFINITION, "md", &config).unwrap();
        parent.create(SBOL_MODULES, "m").unwrap();
        assert!(parent.child(SBOL_MODULES, "m").unwrap().identity().is_none());

        parent
            .resolve_top_level(&config.with_namespace("http://lab.example"))
            .unwrap();
        assert_eq!(parent.identity().unwrap().as_str(), "http://lab.example/md");
        let m = parent.child(SBOL_MODULES, "m").unwrap();
        assert_eq!(m.identity().unwrap().as_str(), "http://lab.example/md/m");
        assert_eq!(
            m.owner(),
            Some(&Owner::Object {
                parent: parent.identity().cloned(),
                predicate: SBOL_MODULES.into()
            })
        );
    }

    #[test]
    fn children_of_a_pending_parent_keep_its_version() {
        let config = Config::default().with_namespace("");
        let mut parent = Identified::new(&MODULE_DEFINITION, "foo", &config).unwrap();
        assert!(parent.identity().is_none());
        let bar = parent.create(SBOL_MODULES, "bar").unwrap();
        assert_eq!(bar.version(), Some("1"));

        parent.resolve_top_level(&Config::default()).unwrap();
        assert_eq!(
            parent.identity().unwrap().as_str(),
            "http://examples.org/ModuleDefinition/foo/1"
        );
        assert_eq!(
            parent.child(SBOL_MODULES, "bar").unwrap().identity().unwrap().as_str(),
            "http://examples.org/ModuleDefinition/foo/bar/1"
        );
    }

    #[test]
    fn generic_objects_use_the_catalog_when_they_can() {
        let known =
            Identified::generic(crate::vocab::SBOL_MODULE_DEFINITION, "foo", &Config::default())
                .unwrap();
        assert_eq!(known.kind().map(|k| k.name), Some("ModuleDefinition"));
        assert_eq!(known, md("foo"));

        let mut widget =
            Identified::generic("http://lab.example/ns#Widget", "w1", &Config::default()).unwrap();
        assert!(widget.kind().is_none());
        assert!(widget.is_top_level());
        assert_eq!(widget.type_name(), "Widget");
        assert_eq!(widget.version(), Some("1"));
        assert!(widget.identity().is_none());

        widget.resolve_top_level(&Config::default()).unwrap();
        assert_eq!(
            widget.identity().unwrap().as_str(),
            "http://examples.org/Widget/w1/1"
        );
        assert!(Identified::generic("not a uri", "w1", &Config::default()).is_err());
    }

    #[test]
    fn identity_search_ignores_display_ids() {
        let config = Config::open_world();
        let mut md = Identified::new(&MODULE_DEFINITION, "http://x.org/md", &config).unwrap();
        md.create(SBOL_MODULES, "http://x.org/m1").unwrap();
        let m2 = md.create(SBOL_MODULES, "http://x.org/m2").unwrap();
        m2.put(SBOL_DISPLAY_ID, vec![Literal::string("http://x.org/m1").into()]);

        assert_eq!(
            md.find_identity("http://x.org/m1").and_then(Identified::display_id),
            None
        );
        assert_eq!(
            md.find_identity("http://x.org/m2").and_then(Identified::display_id),
            Some("http://x.org/m1")
        );
        assert!(md.find_identity("m2").is_none());
        assert!(md.find_identity_mut("http://x.org/md").is_some());
    }

    #[test]
    fn reorder_permutes() {
        let mut md = md("foo");
        for id in ["a", "b", "c"] {
            md.create(SBOL_MODULES, id).unwrap();
        }
        md.reorder(SBOL_MODULES, &["c", "a", "b"]).unwrap();
        let order: Vec<_> = md.children(SBOL_MODULES).map(|c| c.display_id().unwrap()).collect();
        assert_eq!(order, ["c", "a", "b"]);
        assert!(md.reorder(SBOL_MODULES, &["a", "b"]).is_err());
        assert!(md.reorder(SBOL_MODULES, &["a", "a", "b"]).is_err());
    }

    #[test]
    fn annotations_and_find() {
        let mut md = md("foo");
        md.annotate("http://lab.example/ns#note", "hello").unwrap();
        assert_eq!(md.literal("http://lab.example/ns#note"), Some("hello"));
        assert!(md.annotate("no scheme", "x").is_err());

        let sa = md.create(SBOL_MODULES, "m").unwrap();
        sa.set_name("module m").unwrap();
        assert_eq!(md.find("m").unwrap().name(), Some("module m"));
        assert!(md.find("absent").is_none());
        assert_eq!(md.count(), 2);
    }

    #[test]
    fn content_equality_vs_identity() {
        let mut a = md("foo");
        let mut b = md("foo");
        assert_eq!(a, b);
        a.set_name("x").unwrap();
        assert_ne!(a, b);
        assert!(a.same_identity(&b));
        b.set_name("x").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn nested_create_on_non_owned_property_fails() {
        let mut md = md("foo");
        assert!(md.create(crate::vocab::SBOL_ROLES, "x").is_err());
        assert!(matches!(
            md.create("http://nope.org/p", "x"),
            Err(SbolError::NotFound(_))
        ));
    }
}
