//! The record-type catalog.
//!
//! A record type is nothing more than a [`Kind`]: a type URI, a type name used
//! as the type-path segment of generated URIs, a top-level flag, and a table of
//! [`PropertySpec`]s. [`Identified::new`](crate::Identified::new) instantiates
//! the table; the deserializer uses [`by_type_uri`] to map a type triple back
//! to its kind. Adding a record type means adding one more static here.

use std::fmt;

use crate::types::Bound::{self, Finite, Unbounded};
use crate::validation::{
    ValidationRule, POSITIVE_POSITION_RULE, SEQUENCE_ALPHABET_RULE, TIMESTAMP_RULE,
};
use crate::vocab::*;

/// What the cells of a property hold.
#[derive(Clone, Copy)]
pub enum ValueKind {
    Literal,
    Reference,
    /// Owned children of one of the listed kinds. An empty list accepts any
    /// type (generic annotation objects).
    Owned(&'static [&'static Kind]),
    /// Generic annotation store: accepts literals, references and owned
    /// objects of any type.
    Any,
}

impl fmt::Debug for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Literal => f.write_str("Literal"),
            ValueKind::Reference => f.write_str("Reference"),
            ValueKind::Owned(kinds) => f
                .debug_tuple("Owned")
                .field(&kinds.iter().map(|k| k.name).collect::<Vec<_>>())
                .finish(),
            ValueKind::Any => f.write_str("Any"),
        }
    }
}

/// One typed, bounded field of a record type.
#[derive(Debug, Clone, Copy)]
pub struct PropertySpec {
    pub predicate: &'static str,
    pub value: ValueKind,
    pub lower: usize,
    pub upper: Bound,
    pub rules: &'static [ValidationRule],
}

/// A record type.
pub struct Kind {
    /// Type name, also the type-path segment of typed URIs.
    pub name: &'static str,
    pub type_uri: &'static str,
    /// May live directly in a document.
    pub top_level: bool,
    pub properties: &'static [PropertySpec],
}

impl Kind {
    pub fn property(&self, predicate: &str) -> Option<&'static PropertySpec> {
        self.properties.iter().find(|p| p.predicate == predicate)
    }
}

impl fmt::Debug for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Kind")
            .field("name", &self.name)
            .field("type_uri", &self.type_uri)
            .finish()
    }
}

impl PartialEq for Kind {
    fn eq(&self, other: &Self) -> bool {
        self.type_uri == other.type_uri
    }
}

impl Eq for Kind {}

const fn literal(predicate: &'static str, lower: usize, upper: Bound) -> PropertySpec {
    PropertySpec {
        predicate,
        value: ValueKind::Literal,
        lower,
        upper,
        rules: &[],
    }
}

const fn checked(
    predicate: &'static str,
    lower: usize,
    upper: Bound,
    rules: &'static [ValidationRule],
) -> PropertySpec {
    PropertySpec {
        predicate,
        value: ValueKind::Literal,
        lower,
        upper,
        rules,
    }
}

const fn reference(predicate: &'static str, lower: usize, upper: Bound) -> PropertySpec {
    PropertySpec {
        predicate,
        value: ValueKind::Reference,
        lower,
        upper,
        rules: &[],
    }
}

const fn owned(predicate: &'static str, kinds: &'static [&'static Kind]) -> PropertySpec {
    PropertySpec {
        predicate,
        value: ValueKind::Owned(kinds),
        lower: 0,
        upper: Unbounded,
        rules: &[],
    }
}

static ELEMENTS_RULES: [ValidationRule; 1] = [SEQUENCE_ALPHABET_RULE];
static POSITION_RULES: [ValidationRule; 1] = [POSITIVE_POSITION_RULE];
static TIMESTAMP_RULES: [ValidationRule; 1] = [TIMESTAMP_RULE];

// --- structural --------------------------------------------------------------

pub static COMPONENT_DEFINITION: Kind = Kind {
    name: "ComponentDefinition",
    type_uri: SBOL_COMPONENT_DEFINITION,
    top_level: true,
    properties: &COMPONENT_DEFINITION_PROPERTIES,
};
static COMPONENT_DEFINITION_PROPERTIES: [PropertySpec; 5] = [
    reference(SBOL_TYPES, 1, Unbounded),
    reference(SBOL_ROLES, 0, Unbounded),
    reference(SBOL_SEQUENCES, 0, Unbounded),
    owned(SBOL_COMPONENTS, &COMPONENT_KINDS),
    owned(SBOL_SEQUENCE_ANNOTATIONS, &SEQUENCE_ANNOTATION_KINDS),
];

pub static COMPONENT: Kind = Kind {
    name: "Component",
    type_uri: SBOL_COMPONENT,
    top_level: false,
    properties: &COMPONENT_PROPERTIES,
};
static COMPONENT_KINDS: [&Kind; 1] = [&COMPONENT];
static COMPONENT_PROPERTIES: [PropertySpec; 4] = [
    reference(SBOL_DEFINITION, 1, Finite(1)),
    reference(SBOL_ACCESS, 1, Finite(1)),
    reference(SBOL_ROLES, 0, Unbounded),
    owned(SBOL_MAPS_TOS, &MAPS_TO_KINDS),
];

pub static SEQUENCE_ANNOTATION: Kind = Kind {
    name: "SequenceAnnotation",
    type_uri: SBOL_SEQUENCE_ANNOTATION,
    top_level: false,
    properties: &SEQUENCE_ANNOTATION_PROPERTIES,
};
static SEQUENCE_ANNOTATION_KINDS: [&Kind; 1] = [&SEQUENCE_ANNOTATION];
static SEQUENCE_ANNOTATION_PROPERTIES: [PropertySpec; 3] = [
    PropertySpec {
        predicate: SBOL_LOCATIONS,
        value: ValueKind::Owned(&LOCATION_KINDS),
        lower: 1,
        upper: Unbounded,
        rules: &[],
    },
    reference(SBOL_COMPONENTS, 0, Finite(1)),
    reference(SBOL_ROLES, 0, Unbounded),
];

static LOCATION_KINDS: [&Kind; 3] = [&RANGE, &CUT, &GENERIC_LOCATION];

pub static RANGE: Kind = Kind {
    name: "Range",
    type_uri: SBOL_RANGE,
    top_level: false,
    properties: &RANGE_PROPERTIES,
};
static RANGE_PROPERTIES: [PropertySpec; 3] = [
    checked(SBOL_START, 1, Finite(1), &POSITION_RULES),
    checked(SBOL_END, 1, Finite(1), &POSITION_RULES),
    reference(SBOL_ORIENTATION, 0, Finite(1)),
];

pub static CUT: Kind = Kind {
    name: "Cut",
    type_uri: SBOL_CUT,
    top_level: false,
    properties: &CUT_PROPERTIES,
};
static CUT_PROPERTIES: [PropertySpec; 2] = [
    literal(SBOL_AT, 1, Finite(1)),
    reference(SBOL_ORIENTATION, 0, Finite(1)),
];

pub static GENERIC_LOCATION: Kind = Kind {
    name: "GenericLocation",
    type_uri: SBOL_GENERIC_LOCATION,
    top_level: false,
    properties: &GENERIC_LOCATION_PROPERTIES,
};
static GENERIC_LOCATION_PROPERTIES: [PropertySpec; 1] =
    [reference(SBOL_ORIENTATION, 0, Finite(1))];

pub static SEQUENCE: Kind = Kind {
    name: "Sequence",
    type_uri: SBOL_SEQUENCE,
    top_level: true,
    properties: &SEQUENCE_PROPERTIES,
};
static SEQUENCE_PROPERTIES: [PropertySpec; 2] = [
    reference(SBOL_ENCODING, 1, Finite(1)),
    checked(SBOL_ELEMENTS, 1, Finite(1), &ELEMENTS_RULES),
];

// --- functional --------------------------------------------------------------

pub static MODULE_DEFINITION: Kind = Kind {
    name: "ModuleDefinition",
    type_uri: SBOL_MODULE_DEFINITION,
    top_level: true,
    properties: &MODULE_DEFINITION_PROPERTIES,
};
static MODULE_DEFINITION_PROPERTIES: [PropertySpec; 5] = [
    reference(SBOL_ROLES, 0, Unbounded),
    owned(SBOL_MODULES, &MODULE_KINDS),
    owned(SBOL_FUNCTIONAL_COMPONENTS, &FUNCTIONAL_COMPONENT_KINDS),
    owned(SBOL_INTERACTIONS, &INTERACTION_KINDS),
    reference(SBOL_MODELS, 0, Unbounded),
];

pub static MODULE: Kind = Kind {
    name: "Module",
    type_uri: SBOL_MODULE,
    top_level: false,
    properties: &MODULE_PROPERTIES,
};
static MODULE_KINDS: [&Kind; 1] = [&MODULE];
static MODULE_PROPERTIES: [PropertySpec; 2] = [
    reference(SBOL_DEFINITION, 1, Finite(1)),
    owned(SBOL_MAPS_TOS, &MAPS_TO_KINDS),
];

pub static MAPS_TO: Kind = Kind {
    name: "MapsTo",
    type_uri: SBOL_MAPS_TO,
    top_level: false,
    properties: &MAPS_TO_PROPERTIES,
};
static MAPS_TO_KINDS: [&Kind; 1] = [&MAPS_TO];
static MAPS_TO_PROPERTIES: [PropertySpec; 3] = [
    reference(SBOL_LOCAL, 1, Finite(1)),
    reference(SBOL_REMOTE, 1, Finite(1)),
    reference(SBOL_REFINEMENT, 1, Finite(1)),
];

pub static FUNCTIONAL_COMPONENT: Kind = Kind {
    name: "FunctionalComponent",
    type_uri: SBOL_FUNCTIONAL_COMPONENT,
    top_level: false,
    properties: &FUNCTIONAL_COMPONENT_PROPERTIES,
};
static FUNCTIONAL_COMPONENT_KINDS: [&Kind; 1] = [&FUNCTIONAL_COMPONENT];
static FUNCTIONAL_COMPONENT_PROPERTIES: [PropertySpec; 4] = [
    reference(SBOL_DEFINITION, 1, Finite(1)),
    reference(SBOL_ACCESS, 1, Finite(1)),
    reference(SBOL_DIRECTION, 1, Finite(1)),
    owned(SBOL_MAPS_TOS, &MAPS_TO_KINDS),
];

pub static INTERACTION: Kind = Kind {
    name: "Interaction",
    type_uri: SBOL_INTERACTION,
    top_level: false,
    properties: &INTERACTION_PROPERTIES,
};
static INTERACTION_KINDS: [&Kind; 1] = [&INTERACTION];
static INTERACTION_PROPERTIES: [PropertySpec; 2] = [
    reference(SBOL_TYPES, 1, Unbounded),
    owned(SBOL_PARTICIPATIONS, &PARTICIPATION_KINDS),
];

pub static PARTICIPATION: Kind = Kind {
    name: "Participation",
    type_uri: SBOL_PARTICIPATION,
    top_level: false,
    properties: &PARTICIPATION_PROPERTIES,
};
static PARTICIPATION_KINDS: [&Kind; 1] = [&PARTICIPATION];
static PARTICIPATION_PROPERTIES: [PropertySpec; 2] = [
    reference(SBOL_ROLES, 0, Unbounded),
    reference(SBOL_PARTICIPANT, 1, Finite(1)),
];

pub static MODEL: Kind = Kind {
    name: "Model",
    type_uri: SBOL_MODEL,
    top_level: true,
    properties: &MODEL_PROPERTIES,
};
static MODEL_PROPERTIES: [PropertySpec; 3] = [
    reference(SBOL_SOURCE, 1, Finite(1)),
    reference(SBOL_LANGUAGE, 1, Finite(1)),
    reference(SBOL_FRAMEWORK, 1, Finite(1)),
];

pub static COLLECTION: Kind = Kind {
    name: "Collection",
    type_uri: SBOL_COLLECTION,
    top_level: true,
    properties: &COLLECTION_PROPERTIES,
};
static COLLECTION_PROPERTIES: [PropertySpec; 1] = [reference(SBOL_MEMBERS, 0, Unbounded)];

pub static COMBINATORIAL_DERIVATION: Kind = Kind {
    name: "CombinatorialDerivation",
    type_uri: SBOL_COMBINATORIAL_DERIVATION,
    top_level: true,
    properties: &COMBINATORIAL_DERIVATION_PROPERTIES,
};
static COMBINATORIAL_DERIVATION_PROPERTIES: [PropertySpec; 3] = [
    reference(SBOL_TEMPLATE, 1, Finite(1)),
    reference(SBOL_STRATEGY, 0, Finite(1)),
    owned(SBOL_VARIABLE_COMPONENTS, &VARIABLE_COMPONENT_KINDS),
];

pub static VARIABLE_COMPONENT: Kind = Kind {
    name: "VariableComponent",
    type_uri: SBOL_VARIABLE_COMPONENT,
    top_level: false,
    properties: &VARIABLE_COMPONENT_PROPERTIES,
};
static VARIABLE_COMPONENT_KINDS: [&Kind; 1] = [&VARIABLE_COMPONENT];
static VARIABLE_COMPONENT_PROPERTIES: [PropertySpec; 3] = [
    reference(SBOL_VARIABLE, 1, Finite(1)),
    reference(SBOL_OPERATOR, 1, Finite(1)),
    reference(SBOL_VARIANTS, 0, Unbounded),
];

pub static ATTACHMENT: Kind = Kind {
    name: "Attachment",
    type_uri: SBOL_ATTACHMENT,
    top_level: true,
    properties: &ATTACHMENT_PROPERTIES,
};
static ATTACHMENT_PROPERTIES: [PropertySpec; 4] = [
    reference(SBOL_SOURCE, 1, Finite(1)),
    reference(SBOL_FORMAT, 0, Finite(1)),
    literal(SBOL_SIZE, 0, Finite(1)),
    literal(SBOL_HASH, 0, Finite(1)),
];

pub static IMPLEMENTATION: Kind = Kind {
    name: "Implementation",
    type_uri: SBOL_IMPLEMENTATION,
    top_level: true,
    properties: &IMPLEMENTATION_PROPERTIES,
};
static IMPLEMENTATION_PROPERTIES: [PropertySpec; 1] = [reference(SBOL_BUILT, 0, Finite(1))];

pub static EXPERIMENT: Kind = Kind {
    name: "Experiment",
    type_uri: SBOL_EXPERIMENT,
    top_level: true,
    properties: &EXPERIMENT_PROPERTIES,
};
static EXPERIMENT_PROPERTIES: [PropertySpec; 1] =
    [reference(SBOL_EXPERIMENTAL_DATA_PROP, 0, Unbounded)];

pub static EXPERIMENTAL_DATA: Kind = Kind {
    name: "ExperimentalData",
    type_uri: SBOL_EXPERIMENTAL_DATA,
    top_level: true,
    properties: &ATTACHMENT_REFS,
};
static ATTACHMENT_REFS: [PropertySpec; 1] = [reference(SBOL_ATTACHMENTS, 0, Unbounded)];

// --- provenance --------------------------------------------------------------

pub static ACTIVITY: Kind = Kind {
    name: "Activity",
    type_uri: PROV_ACTIVITY,
    top_level: true,
    properties: &ACTIVITY_PROPERTIES,
};
static ACTIVITY_PROPERTIES: [PropertySpec; 4] = [
    checked(PROV_STARTED_AT_TIME, 0, Finite(1), &TIMESTAMP_RULES),
    checked(PROV_ENDED_AT_TIME, 0, Finite(1), &TIMESTAMP_RULES),
    owned(PROV_QUALIFIED_USAGE, &USAGE_KINDS),
    owned(PROV_QUALIFIED_ASSOCIATION, &ASSOCIATION_KINDS),
];

pub static USAGE: Kind = Kind {
    name: "Usage",
    type_uri: PROV_USAGE,
    top_level: false,
    properties: &USAGE_PROPERTIES,
};
static USAGE_KINDS: [&Kind; 1] = [&USAGE];
static USAGE_PROPERTIES: [PropertySpec; 2] = [
    reference(PROV_ENTITY, 1, Finite(1)),
    reference(PROV_HAD_ROLE, 0, Unbounded),
];

pub static ASSOCIATION: Kind = Kind {
    name: "Association",
    type_uri: PROV_ASSOCIATION,
    top_level: false,
    properties: &ASSOCIATION_PROPERTIES,
};
static ASSOCIATION_KINDS: [&Kind; 1] = [&ASSOCIATION];
static ASSOCIATION_PROPERTIES: [PropertySpec; 3] = [
    reference(PROV_AGENT_PROP, 1, Finite(1)),
    reference(PROV_HAD_ROLE, 0, Unbounded),
    reference(PROV_HAD_PLAN, 0, Finite(1)),
];

pub static PLAN: Kind = Kind {
    name: "Plan",
    type_uri: PROV_PLAN,
    top_level: true,
    properties: &[],
};

pub static AGENT: Kind = Kind {
    name: "Agent",
    type_uri: PROV_AGENT,
    top_level: true,
    properties: &[],
};

// --- design-build-test-learn -------------------------------------------------

pub static DESIGN: Kind = Kind {
    name: "Design",
    type_uri: SYSBIO_DESIGN,
    top_level: true,
    properties: &STRUCTURE_FUNCTION,
};
pub static BUILD: Kind = Kind {
    name: "Build",
    type_uri: SYSBIO_BUILD,
    top_level: true,
    properties: &STRUCTURE_FUNCTION,
};
static STRUCTURE_FUNCTION: [PropertySpec; 2] = [
    reference(SYSBIO_STRUCTURE, 0, Finite(1)),
    reference(SYSBIO_FUNCTION, 0, Finite(1)),
];

pub static TEST: Kind = Kind {
    name: "Test",
    type_uri: SYSBIO_TEST,
    top_level: true,
    properties: &TEST_PROPERTIES,
};
static TEST_PROPERTIES: [PropertySpec; 2] = [
    reference(SYSBIO_SAMPLES, 0, Unbounded),
    reference(SBOL_ATTACHMENTS, 0, Unbounded),
];

pub static ANALYSIS: Kind = Kind {
    name: "Analysis",
    type_uri: SYSBIO_ANALYSIS,
    top_level: true,
    properties: &ATTACHMENT_REFS,
};

pub static SAMPLE_ROSTER: Kind = Kind {
    name: "SampleRoster",
    type_uri: SYSBIO_SAMPLE_ROSTER,
    top_level: true,
    properties: &SAMPLE_ROSTER_PROPERTIES,
};
static SAMPLE_ROSTER_PROPERTIES: [PropertySpec; 1] = [reference(SYSBIO_SAMPLES, 0, Unbounded)];

// --- registry ----------------------------------------------------------------

/// Top-level kinds in document category order.
pub static TOP_LEVEL: [&Kind; 18] = [
    &DESIGN,
    &BUILD,
    &TEST,
    &ANALYSIS,
    &COMPONENT_DEFINITION,
    &MODULE_DEFINITION,
    &MODEL,
    &SEQUENCE,
    &COLLECTION,
    &ACTIVITY,
    &PLAN,
    &AGENT,
    &ATTACHMENT,
    &COMBINATORIAL_DERIVATION,
    &IMPLEMENTATION,
    &SAMPLE_ROSTER,
    &EXPERIMENT,
    &EXPERIMENTAL_DATA,
];

static NESTED: [&Kind; 13] = [
    &MODULE,
    &MAPS_TO,
    &FUNCTIONAL_COMPONENT,
    &COMPONENT,
    &SEQUENCE_ANNOTATION,
    &RANGE,
    &CUT,
    &GENERIC_LOCATION,
    &INTERACTION,
    &PARTICIPATION,
    &USAGE,
    &ASSOCIATION,
    &VARIABLE_COMPONENT,
];

/// Every kind in the catalog.
pub fn all() -> impl Iterator<Item = &'static Kind> {
    TOP_LEVEL.iter().chain(NESTED.iter()).copied()
}

/// The kind whose type URI is `type_uri`.
pub fn by_type_uri(type_uri: &str) -> Option<&'static Kind> {
    all().find(|k| k.type_uri == type_uri)
}

/// The kind whose type name is `name` (e.g. `"ModuleDefinition"`).
pub fn by_name(name: &str) -> Option<&'static Kind> {
    all().find(|k| k.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn type_uris_are_unique() {
        let uris: HashSet<&str> = all().map(|k| k.type_uri).collect();
        assert_eq!(uris.len(), all().count());
    }

    #[test]
    fn lookup() {
        assert_eq!(by_type_uri(SBOL_MODULE_DEFINITION), Some(&MODULE_DEFINITION));
        assert_eq!(by_name("Module"), Some(&MODULE));
        assert!(by_type_uri("http://example.org/Unknown").is_none());
    }

    #[test]
    fn owned_targets_are_nested_kinds() {
        for kind in all() {
            for spec in kind.properties {
                if let ValueKind::Owned(targets) = spec.value {
                    assert!(!targets.is_empty(), "{}", spec.predicate);
                    for t in targets {
                        assert!(!t.top_level, "{} owns top-level {}", kind.name, t.name);
                    }
                }
            }
        }
    }

    #[test]
    fn module_definition_owns_modules() {
        let spec = MODULE_DEFINITION.property(SBOL_MODULES).unwrap();
        assert!(matches!(spec.value, ValueKind::Owned(k) if k[0] == &MODULE));
    }
}
