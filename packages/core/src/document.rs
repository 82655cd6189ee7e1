//! The root container: one owned-object category per top-level type, a
//! registry of every identity it holds, and the read/write entry points.
//!
//! Objects inside a document are reached by shared reference through
//! [`Document::get`], [`Document::find`] and the category accessors. They are
//! changed through [`Document::modify`], which edits a copy of the owning
//! top-level object and swaps it in only when the registry stays consistent.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::codec::{NTriples, TripleCodec};
use crate::config::Config;
use crate::error::{Result, SbolError};
use crate::graph;
use crate::identified::{Identified, Owner};
use crate::identity::compliance_issue;
use crate::kinds::{self, Kind};
use crate::property::Property;
use crate::render;
use crate::types::{Bound, Literal, Term, Triple, Uri, Value};
use crate::validation::check_uri;
use crate::vocab::{DCTERMS_BIBLIOGRAPHIC_CITATION, DC_SUBJECT};

/// Category names, parallel to [`kinds::TOP_LEVEL`].
pub const CATEGORY_NAMES: [&str; 18] = [
    "designs",
    "builds",
    "tests",
    "analyses",
    "componentDefinitions",
    "moduleDefinitions",
    "models",
    "sequences",
    "collections",
    "activities",
    "plans",
    "agents",
    "attachments",
    "combinatorialDerivations",
    "implementations",
    "sampleRosters",
    "experiments",
    "experimentalData",
];

/// Category of top-level objects whose type is not in the catalog.
pub const ANNOTATIONS: &str = "annotations";

const ANNOTATION_INDEX: usize = CATEGORY_NAMES.len();

/// Blank-node label standing for the document in its own metadata triples.
const DOCUMENT_NODE: &str = "document";

/// One finding of [`Document::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub identity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicate: Option<String>,
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.predicate {
            Some(p) => write!(f, "{} <{}>: {}", self.identity, p, self.message),
            None => write!(f, "{}: {}", self.identity, self.message),
        }
    }
}

/// A top-level object ready to be committed, with every identity in its subtree.
struct Staged {
    category: usize,
    object: Identified,
    identities: Vec<Uri>,
}

/// Everything parsed from one source, not yet applied.
struct Loaded {
    staged: Vec<Staged>,
    extra: Vec<Triple>,
    citations: Vec<Uri>,
    keywords: Vec<Literal>,
}

#[derive(Debug)]
pub struct Document {
    id: Uuid,
    config: Config,
    categories: Vec<Property>,
    /// identity of every held object -> identity of its top-level root
    registry: HashMap<Uri, Uri>,
    /// triples read from a source that belong to no typed object
    extra: Vec<Triple>,
    citations: Property,
    keywords: Property,
}

impl Default for Document {
    fn default() -> Self {
        Document::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Document::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let mut categories: Vec<Property> = kinds::TOP_LEVEL
            .iter()
            .zip(CATEGORY_NAMES)
            .map(|(kind, name)| {
                Property::owned(name, std::slice::from_ref(kind), 0, Bound::Unbounded)
            })
            .collect();
        categories.push(Property::owned(ANNOTATIONS, &[], 0, Bound::Unbounded));
        Document {
            id: Uuid::now_v7(),
            config,
            categories,
            registry: HashMap::new(),
            extra: Vec::new(),
            citations: Property::reference(DCTERMS_BIBLIOGRAPHIC_CITATION, 0, Bound::Unbounded),
            keywords: Property::literal(DC_SUBJECT, 0, Bound::Unbounded),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Settings used for identities computed from now on.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    // --- document metadata ---------------------------------------------------

    /// Works cited by the document as a whole (`dcterms:bibliographicCitation`).
    pub fn citations(&self) -> &Property {
        &self.citations
    }

    /// Add a citation. Adding one already present changes nothing.
    pub fn add_citation(&mut self, uri: &str) -> Result<()> {
        let uri = Uri::parse(uri)?;
        self.push_citation(uri);
        Ok(())
    }

    /// Subject keywords of the document as a whole (`dc:subject`).
    pub fn keywords(&self) -> &Property {
        &self.keywords
    }

    pub fn add_keyword(&mut self, keyword: &str) {
        self.push_keyword(Literal::string(keyword));
    }

    fn push_citation(&mut self, uri: Uri) {
        if !self.citations.references().any(|u| *u == uri) {
            self.citations.values_mut().push(Value::Uri(uri));
        }
    }

    fn push_keyword(&mut self, keyword: Literal) {
        if !self.keywords.literals().any(|k| *k == keyword) {
            self.keywords.values_mut().push(Value::Literal(keyword));
        }
    }

    // --- registration --------------------------------------------------------

    /// Register one top-level object. See [`Document::add_all`].
    pub fn add(&mut self, object: Identified) -> Result<()> {
        self.add_all([object])
    }

    /// Register top-level objects, resolving any pending identities against
    /// this document's config.
    ///
    /// All or nothing: fails with [`SbolError::DuplicateUri`] if any identity
    /// in any subtree is already registered (or repeats within the batch) and
    /// with [`SbolError::Ownership`] for objects owned elsewhere. Re-adding an
    /// unchanged copy of an object already registered here is a no-op.
    pub fn add_all(&mut self, objects: impl IntoIterator<Item = Identified>) -> Result<()> {
        let mut staged = Vec::new();
        let mut batch: HashSet<Uri> = HashSet::new();
        for mut object in objects {
            let ours = matches!(object.owner(), Some(Owner::Document(id)) if *id == self.id);
            if ours {
                let registered = object
                    .identity()
                    .is_some_and(|uri| self.registry.contains_key(uri));
                if !registered {
                    // marker left over from before a clear, remove or read
                    object.set_owner(None);
                } else if self.is_registered_copy(&object) {
                    debug!(identity = object.identity_str(), "already registered");
                    continue;
                } else {
                    return Err(SbolError::DuplicateUri(object.identity_str().to_owned()));
                }
            } else if let Some(owner) = object.owner() {
                return Err(SbolError::Ownership {
                    identity: object.identity_str().to_owned(),
                    owner: owner.to_string(),
                });
            }
            let category = category_index(&object)?;
            object.resolve_top_level(&self.config)?;
            let identities = subtree_identities(&object)?;
            for id in &identities {
                if self.registry.contains_key(id) || !batch.insert(id.clone()) {
                    return Err(SbolError::DuplicateUri(id.to_string()));
                }
            }
            staged.push(Staged {
                category,
                object,
                identities,
            });
        }
        for s in staged {
            self.commit(s);
        }
        Ok(())
    }

    fn is_registered_copy(&self, object: &Identified) -> bool {
        object
            .identity()
            .and_then(|uri| self.top_level(uri.as_str()))
            .is_some_and(|registered| registered == object)
    }

    fn commit(&mut self, staged: Staged) {
        let Staged {
            category,
            mut object,
            identities,
        } = staged;
        let Some(root) = object.identity().cloned() else {
            return;
        };
        object.set_owner(Some(Owner::Document(self.id)));
        debug!(identity = %root, objects = identities.len(), "registered top-level object");
        for id in identities {
            self.registry.insert(id, root.clone());
        }
        self.categories[category]
            .values_mut()
            .push(Value::Owned(object));
    }

    /// Construct a top-level object of `kind` from this document's config and
    /// register it. Returns its identity.
    pub fn create(&mut self, kind: &'static Kind, display_id: &str) -> Result<Uri> {
        let mut object = Identified::new(kind, display_id, &self.config)?;
        category_index(&object)?;
        object.resolve_top_level(&self.config)?;
        let identity = object
            .identity()
            .cloned()
            .ok_or_else(|| SbolError::invalid_uri(display_id, "identity did not resolve"))?;
        self.add(object)?;
        Ok(identity)
    }

    /// Create a child of `predicate`'s default kind under the object `parent`
    /// (top-level or nested). Returns the child's identity.
    pub fn create_child(&mut self, parent: &str, predicate: &str, display_id: &str) -> Result<Uri> {
        self.modify(parent, |object| {
            let child = object.create(predicate, display_id)?;
            child
                .identity()
                .cloned()
                .ok_or_else(|| SbolError::invalid_uri(display_id, "identity did not resolve"))
        })
    }

    /// Apply `edit` to the object with identity `uri`.
    ///
    /// The edit runs on a copy of the owning top-level object. On success the
    /// copy replaces the original and its subtree is re-registered; if `edit`
    /// fails, or leaves an identity that another top-level object already
    /// holds, nothing changes.
    pub fn modify<T>(
        &mut self,
        uri: &str,
        edit: impl FnOnce(&mut Identified) -> Result<T>,
    ) -> Result<T> {
        let root = self
            .registry
            .get(uri)
            .cloned()
            .ok_or_else(|| SbolError::NotFound(uri.to_owned()))?;
        let (category, position) = self
            .locate(root.as_str())
            .ok_or_else(|| SbolError::NotFound(root.to_string()))?;
        let mut working = self.categories[category].values()[position]
            .as_object()
            .cloned()
            .ok_or_else(|| SbolError::NotFound(root.to_string()))?;

        let target = working
            .find_identity_mut(uri)
            .ok_or_else(|| SbolError::NotFound(uri.to_owned()))?;
        let out = edit(target)?;

        let identities = subtree_identities(&working)?;
        for id in &identities {
            if self.registry.get(id).is_some_and(|r| *r != root) {
                return Err(SbolError::DuplicateUri(id.to_string()));
            }
        }
        self.registry.retain(|_, r| *r != root);
        for id in identities {
            self.registry.insert(id, root.clone());
        }
        self.categories[category].values_mut()[position] = Value::Owned(working);
        debug!(identity = uri, root = %root, "modified object");
        Ok(out)
    }

    /// Unregister and return a top-level object and its subtree.
    pub fn remove(&mut self, uri: &str) -> Result<Identified> {
        let (category, position) = self.locate(uri).ok_or_else(|| {
            SbolError::NotFound(format!(
                "{uri} is not a top-level object of this document"
            ))
        })?;
        let value = self.categories[category].values_mut().remove(position);
        let Value::Owned(object) = value else {
            return Err(SbolError::NotFound(uri.to_owned()));
        };
        self.registry.retain(|_, r| r.as_str() != uri);
        debug!(identity = uri, "removed top-level object");
        Ok(object.into_detached())
    }

    /// Remove every object and every carried triple.
    pub fn clear(&mut self) {
        for category in &mut self.categories {
            category.values_mut().clear();
        }
        self.registry.clear();
        self.extra.clear();
        self.citations.values_mut().clear();
        self.keywords.values_mut().clear();
    }

    // --- lookup --------------------------------------------------------------

    fn locate(&self, uri: &str) -> Option<(usize, usize)> {
        self.categories.iter().enumerate().find_map(|(ci, category)| {
            category
                .values()
                .iter()
                .position(|v| v.as_object().and_then(Identified::identity).is_some_and(|i| i == uri))
                .map(|pos| (ci, pos))
        })
    }

    fn top_level(&self, uri: &str) -> Option<&Identified> {
        let (category, position) = self.locate(uri)?;
        self.categories[category].values()[position].as_object()
    }

    /// The registered object with identity `uri`, top-level or nested.
    ///
    /// `Ok(None)` when nothing is registered under a well-formed URI;
    /// [`SbolError::InvalidUri`] when `uri` is malformed.
    pub fn get(&self, uri: &str) -> Result<Option<&Identified>> {
        check_uri(uri)?;
        Ok(self
            .registry
            .get(uri)
            .and_then(|root| self.top_level(root.as_str()))
            .and_then(|root| root.find_identity(uri)))
    }

    /// Search every top-level subtree for an object whose identity or display
    /// id is `key`.
    pub fn find(&self, key: &str) -> Option<&Identified> {
        self.get_all().find_map(|object| object.find(key))
    }

    /// Every top-level object, in category order.
    pub fn get_all(&self) -> impl Iterator<Item = &Identified> {
        self.categories.iter().flat_map(Property::objects)
    }

    /// The top-level categories, the generic annotation category last.
    pub fn categories(&self) -> &[Property] {
        &self.categories
    }

    /// The category named `name` (e.g. `"moduleDefinitions"`).
    pub fn category(&self, name: &str) -> Option<&Property> {
        self.categories.iter().find(|c| c.predicate() == name)
    }

    /// Number of registered objects, nested ones and annotation objects included.
    pub fn size(&self) -> usize {
        self.registry.len()
    }

    pub fn len(&self) -> usize {
        self.size()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Triples read from a source that belong to no typed object.
    pub fn extra_triples(&self) -> &[Triple] {
        &self.extra
    }

    fn add_of_kind(&mut self, kind: &'static Kind, object: Identified) -> Result<()> {
        if object.type_uri().as_str() != kind.type_uri {
            return Err(SbolError::Validation {
                rule: "allowed-kind".into(),
                identity: object.identity_str().to_owned(),
                predicate: category_name(kind).to_owned(),
                reason: format!("expected a {}, got <{}>", kind.name, object.type_uri()),
            });
        }
        self.add(object)
    }

    fn get_of_kind(&self, kind: &'static Kind, uri: &str) -> Result<Option<&Identified>> {
        Ok(self
            .get(uri)?
            .filter(|o| o.type_uri().as_str() == kind.type_uri && o.is_top_level()))
    }

    fn of_kind(&self, kind: &'static Kind) -> impl Iterator<Item = &Identified> {
        let index = kinds::TOP_LEVEL
            .iter()
            .position(|k| k.type_uri == kind.type_uri)
            .unwrap_or(ANNOTATION_INDEX);
        self.categories[index].objects()
    }

    // --- serialization -------------------------------------------------------

    /// Every object's triples followed by the carried triples.
    pub fn triples(&self) -> Vec<Triple> {
        let mut out = Vec::new();
        let mut blanks = 0;
        for object in self.get_all() {
            graph::emit_into(object, &mut out, &mut blanks);
        }
        let node = Term::Blank(DOCUMENT_NODE.to_owned());
        for uri in self.citations.references() {
            out.push(Triple::new(
                node.clone(),
                DCTERMS_BIBLIOGRAPHIC_CITATION,
                Term::iri(uri.as_str()),
            ));
        }
        for keyword in self.keywords.literals() {
            out.push(Triple::new(node.clone(), DC_SUBJECT, Term::Literal(keyword.clone())));
        }
        out.extend(self.extra.iter().cloned());
        out
    }

    pub fn write_string(&self) -> String {
        self.write_string_with(&NTriples)
    }

    pub fn write_string_with(&self, codec: &impl TripleCodec) -> String {
        codec.serialize(&self.triples())
    }

    /// Serialize the whole document to `path` as N-Triples.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let triples = self.triples();
        std::fs::write(path, NTriples.serialize(&triples)).map_err(|e| SbolError::io(path, e))?;
        info!(
            path = %path.display(),
            triples = triples.len(),
            objects = self.size(),
            "wrote document"
        );
        Ok(())
    }

    /// Replace the contents of this document with `text`. On error the
    /// document is unchanged.
    pub fn read_string(&mut self, text: &str) -> Result<()> {
        self.read_string_with(&NTriples, text)
    }

    pub fn read_string_with(&mut self, codec: &impl TripleCodec, text: &str) -> Result<()> {
        let loaded = self.load(codec, text)?;
        self.clear();
        self.apply(loaded);
        info!(codec = codec.name(), objects = self.size(), carried = self.extra.len(), "read document");
        Ok(())
    }

    pub fn read(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| SbolError::io(path, e))?;
        self.read_string(&text)
    }

    /// Add the contents of `text` to this document, all or nothing. Fails with
    /// [`SbolError::DuplicateUri`] if any identity is already registered.
    pub fn append_string(&mut self, text: &str) -> Result<()> {
        self.append_string_with(&NTriples, text)
    }

    pub fn append_string_with(&mut self, codec: &impl TripleCodec, text: &str) -> Result<()> {
        let loaded = self.load(codec, text)?;
        if let Some(id) = loaded
            .staged
            .iter()
            .flat_map(|s| &s.identities)
            .find(|id| self.registry.contains_key(*id))
        {
            return Err(SbolError::DuplicateUri(id.to_string()));
        }
        let before = self.size();
        self.apply(loaded);
        info!(
            codec = codec.name(),
            added = self.size() - before,
            objects = self.size(),
            "appended document"
        );
        Ok(())
    }

    pub fn append(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| SbolError::io(path, e))?;
        self.append_string(&text)
    }

    fn load(&self, codec: &impl TripleCodec, text: &str) -> Result<Loaded> {
        let triples = codec.parse(text)?;
        debug!(codec = codec.name(), triples = triples.len(), "parsed triples");
        let (metadata, triples): (Vec<Triple>, Vec<Triple>) =
            triples.into_iter().partition(is_document_metadata);
        let mut citations = Vec::new();
        let mut keywords = Vec::new();
        for triple in metadata {
            match triple.object {
                Term::Iri(uri) => citations.push(Uri::parse(uri)?),
                Term::Literal(keyword) => keywords.push(keyword),
                Term::Blank(_) => {}
            }
        }
        let rebuilt = graph::rebuild(triples)?;
        let mut seen = HashSet::new();
        let mut staged = Vec::with_capacity(rebuilt.roots.len());
        for object in rebuilt.roots {
            let category = category_index(&object).map_err(|_| SbolError::Serialization {
                identity: object.identity_str().to_owned(),
                reason: format!("a {} must be owned by another object", object.type_name()),
            })?;
            let identities = subtree_identities(&object)?;
            if let Some(dup) = identities.iter().find(|id| !seen.insert((*id).clone())) {
                return Err(SbolError::DuplicateUri(dup.to_string()));
            }
            staged.push(Staged {
                category,
                object,
                identities,
            });
        }
        Ok(Loaded {
            staged,
            extra: rebuilt.extra,
            citations,
            keywords,
        })
    }

    fn apply(&mut self, loaded: Loaded) {
        for s in loaded.staged {
            self.commit(s);
        }
        self.extra.extend(loaded.extra);
        for uri in loaded.citations {
            self.push_citation(uri);
        }
        for keyword in loaded.keywords {
            self.push_keyword(keyword);
        }
    }

    // --- checks and rendering ------------------------------------------------

    /// Local checks: cardinality bounds, every property's rules against its
    /// stored values, and URI compliance of objects carrying a persistent
    /// identity.
    pub fn validate(&self) -> Vec<Issue> {
        let mut issues = Vec::new();
        for object in self.get_all() {
            validate_object(object, None, &mut issues);
        }
        issues
    }

    /// A grouped, human-readable summary. Same as the `Display` output.
    pub fn summary(&self) -> String {
        render::render_document(self)
    }
}

/// A citation or keyword triple about the document itself.
fn is_document_metadata(triple: &Triple) -> bool {
    let about_document = matches!(&triple.subject, Term::Blank(b) if b == DOCUMENT_NODE);
    about_document
        && matches!(
            (triple.predicate.as_str(), &triple.object),
            (DCTERMS_BIBLIOGRAPHIC_CITATION, Term::Iri(_)) | (DC_SUBJECT, Term::Literal(_))
        )
}

fn category_index(object: &Identified) -> Result<usize> {
    match object.kind() {
        None => Ok(ANNOTATION_INDEX),
        Some(kind) => kinds::TOP_LEVEL
            .iter()
            .position(|k| k.type_uri == kind.type_uri)
            .ok_or_else(|| SbolError::Validation {
                rule: "allowed-kind".into(),
                identity: object.identity_str().to_owned(),
                predicate: "document".into(),
                reason: format!("a {} cannot be a top-level object", kind.name),
            }),
    }
}

fn category_name(kind: &Kind) -> &'static str {
    kinds::TOP_LEVEL
        .iter()
        .position(|k| k.type_uri == kind.type_uri)
        .map_or(ANNOTATIONS, |i| CATEGORY_NAMES[i])
}

/// Every identity in `object`'s subtree; fails on an unresolved object or a
/// repeated identity.
fn subtree_identities(object: &Identified) -> Result<Vec<Uri>> {
    let mut out = Vec::new();
    let mut unresolved = None;
    object.walk(&mut |o| match o.identity() {
        Some(uri) => out.push(uri.clone()),
        None => unresolved = Some(o.identity_str().to_owned()),
    });
    if let Some(id) = unresolved {
        return Err(SbolError::invalid_uri(id, "object has no resolved identity"));
    }
    let mut seen = HashSet::new();
    if let Some(dup) = out.iter().find(|u| !seen.insert(*u)) {
        return Err(SbolError::DuplicateUri(dup.to_string()));
    }
    Ok(out)
}

fn validate_object(object: &Identified, parent_persistent: Option<&str>, issues: &mut Vec<Issue>) {
    let identity = object.identity_str();
    for prop in object.properties() {
        if !prop.admits(prop.len()) {
            issues.push(Issue {
                identity: identity.to_owned(),
                predicate: Some(prop.predicate().to_owned()),
                message: format!(
                    "holds {} value(s), expected between {} and {}",
                    prop.len(),
                    prop.lower(),
                    prop.upper()
                ),
            });
        }
        for (i, value) in prop.values().iter().enumerate() {
            let others: Vec<Value> = prop
                .values()
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, v)| v.clone())
                .collect();
            for rule in prop.rules() {
                if let Err(e) = rule.apply(object, prop.predicate(), value, &others) {
                    issues.push(Issue {
                        identity: identity.to_owned(),
                        predicate: Some(prop.predicate().to_owned()),
                        message: e.to_string(),
                    });
                }
            }
        }
    }
    if let (Some(uri), Some(persistent)) = (object.identity(), object.persistent_identity()) {
        if let Some(problem) = compliance_issue(
            uri.as_str(),
            Some(persistent.as_str()),
            object.display_id(),
            object.version(),
            parent_persistent,
        ) {
            issues.push(Issue {
                identity: identity.to_owned(),
                predicate: None,
                message: format!("not a compliant URI: {problem}"),
            });
        }
    }
    let persistent = object.persistent_identity().map(Uri::as_str);
    for prop in object.properties() {
        for child in prop.objects() {
            validate_object(child, persistent, issues);
        }
    }
}

/// Graph-isomorphic equality over [`Document::triples`].
impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        graph::isomorphic(&self.triples(), &other.triples())
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

macro_rules! category_accessors {
    ($($kind:ident => $add:ident, $get:ident, $all:ident;)*) => {
        impl Document {
            $(
                pub fn $add(&mut self, object: Identified) -> Result<()> {
                    self.add_of_kind(&kinds::$kind, object)
                }

                pub fn $get(&self, uri: &str) -> Result<Option<&Identified>> {
                    self.get_of_kind(&kinds::$kind, uri)
                }

                pub fn $all(&self) -> impl Iterator<Item = &Identified> {
                    self.of_kind(&kinds::$kind)
                }
            )*
        }
    };
}

category_accessors! {
    DESIGN => add_design, get_design, designs;
    BUILD => add_build, get_build, builds;
    TEST => add_test, get_test, tests;
    ANALYSIS => add_analysis, get_analysis, analyses;
    COMPONENT_DEFINITION => add_component_definition, get_component_definition, component_definitions;
    MODULE_DEFINITION => add_module_definition, get_module_definition, module_definitions;
    MODEL => add_model, get_model, models;
    SEQUENCE => add_sequence, get_sequence, sequences;
    COLLECTION => add_collection, get_collection, collections;
    ACTIVITY => add_activity, get_activity, activities;
    PLAN => add_plan, get_plan, plans;
    AGENT => add_agent, get_agent, agents;
    ATTACHMENT => add_attachment, get_attachment, attachments;
    COMBINATORIAL_DERIVATION => add_combinatorial_derivation, get_combinatorial_derivation, combinatorial_derivations;
    IMPLEMENTATION => add_implementation, get_implementation, implementations;
    SAMPLE_ROSTER => add_sample_roster, get_sample_roster, sample_rosters;
    EXPERIMENT => add_experiment, get_experiment, experiments;
    EXPERIMENTAL_DATA => add_experimental_data, get_experimental_data, experimental_data;
}
