//! Namespace and term IRIs used by the record-type catalog and the serializer.

pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
pub const XSD_DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";

pub const SBOL: &str = "http://sbols.org/v2#";
pub const PROV: &str = "http://www.w3.org/ns/prov#";
pub const DCTERMS: &str = "http://purl.org/dc/terms/";
pub const SYSBIO: &str = "http://sys-bio.org#";
pub const DC: &str = "http://purl.org/dc/elements/1.1/";

// --- Identified -------------------------------------------------------------

pub const SBOL_DISPLAY_ID: &str = "http://sbols.org/v2#displayId";
pub const SBOL_PERSISTENT_IDENTITY: &str = "http://sbols.org/v2#persistentIdentity";
pub const SBOL_VERSION: &str = "http://sbols.org/v2#version";
pub const DCTERMS_TITLE: &str = "http://purl.org/dc/terms/title";
pub const DCTERMS_DESCRIPTION: &str = "http://purl.org/dc/terms/description";
pub const PROV_WAS_DERIVED_FROM: &str = "http://www.w3.org/ns/prov#wasDerivedFrom";
pub const PROV_WAS_GENERATED_BY: &str = "http://www.w3.org/ns/prov#wasGeneratedBy";

// --- Document metadata ------------------------------------------------------

pub const DCTERMS_BIBLIOGRAPHIC_CITATION: &str = "http://purl.org/dc/terms/bibliographicCitation";
pub const DC_SUBJECT: &str = "http://purl.org/dc/elements/1.1/subject";

// --- Type URIs --------------------------------------------------------------

pub const SBOL_COMPONENT_DEFINITION: &str = "http://sbols.org/v2#ComponentDefinition";
pub const SBOL_MODULE_DEFINITION: &str = "http://sbols.org/v2#ModuleDefinition";
pub const SBOL_MODEL: &str = "http://sbols.org/v2#Model";
pub const SBOL_SEQUENCE: &str = "http://sbols.org/v2#Sequence";
pub const SBOL_COLLECTION: &str = "http://sbols.org/v2#Collection";
pub const SBOL_ATTACHMENT: &str = "http://sbols.org/v2#Attachment";
pub const SBOL_COMBINATORIAL_DERIVATION: &str = "http://sbols.org/v2#CombinatorialDerivation";
pub const SBOL_IMPLEMENTATION: &str = "http://sbols.org/v2#Implementation";
pub const SBOL_EXPERIMENT: &str = "http://sbols.org/v2#Experiment";
pub const SBOL_EXPERIMENTAL_DATA: &str = "http://sbols.org/v2#ExperimentalData";
pub const SBOL_MODULE: &str = "http://sbols.org/v2#Module";
pub const SBOL_MAPS_TO: &str = "http://sbols.org/v2#MapsTo";
pub const SBOL_FUNCTIONAL_COMPONENT: &str = "http://sbols.org/v2#FunctionalComponent";
pub const SBOL_COMPONENT: &str = "http://sbols.org/v2#Component";
pub const SBOL_SEQUENCE_ANNOTATION: &str = "http://sbols.org/v2#SequenceAnnotation";
pub const SBOL_RANGE: &str = "http://sbols.org/v2#Range";
pub const SBOL_CUT: &str = "http://sbols.org/v2#Cut";
pub const SBOL_GENERIC_LOCATION: &str = "http://sbols.org/v2#GenericLocation";
pub const SBOL_INTERACTION: &str = "http://sbols.org/v2#Interaction";
pub const SBOL_PARTICIPATION: &str = "http://sbols.org/v2#Participation";
pub const SBOL_VARIABLE_COMPONENT: &str = "http://sbols.org/v2#VariableComponent";

pub const PROV_ACTIVITY: &str = "http://www.w3.org/ns/prov#Activity";
pub const PROV_PLAN: &str = "http://www.w3.org/ns/prov#Plan";
pub const PROV_AGENT: &str = "http://www.w3.org/ns/prov#Agent";
pub const PROV_USAGE: &str = "http://www.w3.org/ns/prov#Usage";
pub const PROV_ASSOCIATION: &str = "http://www.w3.org/ns/prov#Association";

pub const SYSBIO_DESIGN: &str = "http://sys-bio.org#Design";
pub const SYSBIO_BUILD: &str = "http://sys-bio.org#Build";
pub const SYSBIO_TEST: &str = "http://sys-bio.org#Test";
pub const SYSBIO_ANALYSIS: &str = "http://sys-bio.org#Analysis";
pub const SYSBIO_SAMPLE_ROSTER: &str = "http://sys-bio.org#SampleRoster";

// --- Property predicates ----------------------------------------------------

pub const SBOL_MODULES: &str = "http://sbols.org/v2#module";
pub const SBOL_FUNCTIONAL_COMPONENTS: &str = "http://sbols.org/v2#functionalComponent";
pub const SBOL_INTERACTIONS: &str = "http://sbols.org/v2#interaction";
pub const SBOL_MODELS: &str = "http://sbols.org/v2#model";
pub const SBOL_ROLES: &str = "http://sbols.org/v2#role";
pub const SBOL_TYPES: &str = "http://sbols.org/v2#type";
pub const SBOL_DEFINITION: &str = "http://sbols.org/v2#definition";
pub const SBOL_MAPS_TOS: &str = "http://sbols.org/v2#mapsTo";
pub const SBOL_LOCAL: &str = "http://sbols.org/v2#local";
pub const SBOL_REMOTE: &str = "http://sbols.org/v2#remote";
pub const SBOL_REFINEMENT: &str = "http://sbols.org/v2#refinement";
pub const SBOL_ACCESS: &str = "http://sbols.org/v2#access";
pub const SBOL_DIRECTION: &str = "http://sbols.org/v2#direction";
pub const SBOL_COMPONENTS: &str = "http://sbols.org/v2#component";
pub const SBOL_SEQUENCES: &str = "http://sbols.org/v2#sequence";
pub const SBOL_SEQUENCE_ANNOTATIONS: &str = "http://sbols.org/v2#sequenceAnnotation";
pub const SBOL_LOCATIONS: &str = "http://sbols.org/v2#location";
pub const SBOL_START: &str = "http://sbols.org/v2#start";
pub const SBOL_END: &str = "http://sbols.org/v2#end";
pub const SBOL_AT: &str = "http://sbols.org/v2#at";
pub const SBOL_ORIENTATION: &str = "http://sbols.org/v2#orientation";
pub const SBOL_PARTICIPATIONS: &str = "http://sbols.org/v2#participation";
pub const SBOL_PARTICIPANT: &str = "http://sbols.org/v2#participant";
pub const SBOL_ELEMENTS: &str = "http://sbols.org/v2#elements";
pub const SBOL_ENCODING: &str = "http://sbols.org/v2#encoding";
pub const SBOL_MEMBERS: &str = "http://sbols.org/v2#member";
pub const SBOL_SOURCE: &str = "http://sbols.org/v2#source";
pub const SBOL_LANGUAGE: &str = "http://sbols.org/v2#language";
pub const SBOL_FRAMEWORK: &str = "http://sbols.org/v2#framework";
pub const SBOL_ATTACHMENTS: &str = "http://sbols.org/v2#attachment";
pub const SBOL_FORMAT: &str = "http://sbols.org/v2#format";
pub const SBOL_SIZE: &str = "http://sbols.org/v2#size";
pub const SBOL_HASH: &str = "http://sbols.org/v2#hash";
pub const SBOL_BUILT: &str = "http://sbols.org/v2#built";
pub const SBOL_TEMPLATE: &str = "http://sbols.org/v2#template";
pub const SBOL_STRATEGY: &str = "http://sbols.org/v2#strategy";
pub const SBOL_VARIABLE_COMPONENTS: &str = "http://sbols.org/v2#variableComponent";
pub const SBOL_VARIABLE: &str = "http://sbols.org/v2#variable";
pub const SBOL_OPERATOR: &str = "http://sbols.org/v2#operator";
pub const SBOL_VARIANTS: &str = "http://sbols.org/v2#variant";
pub const SBOL_EXPERIMENTAL_DATA_PROP: &str = "http://sbols.org/v2#experimentalData";

pub const PROV_STARTED_AT_TIME: &str = "http://www.w3.org/ns/prov#startedAtTime";
pub const PROV_ENDED_AT_TIME: &str = "http://www.w3.org/ns/prov#endedAtTime";
pub const PROV_QUALIFIED_USAGE: &str = "http://www.w3.org/ns/prov#qualifiedUsage";
pub const PROV_QUALIFIED_ASSOCIATION: &str = "http://www.w3.org/ns/prov#qualifiedAssociation";
pub const PROV_ENTITY: &str = "http://www.w3.org/ns/prov#entity";
pub const PROV_HAD_ROLE: &str = "http://www.w3.org/ns/prov#hadRole";
pub const PROV_AGENT_PROP: &str = "http://www.w3.org/ns/prov#agent";
pub const PROV_HAD_PLAN: &str = "http://www.w3.org/ns/prov#hadPlan";

pub const SYSBIO_STRUCTURE: &str = "http://sys-bio.org#structure";
pub const SYSBIO_FUNCTION: &str = "http://sys-bio.org#function";
pub const SYSBIO_SAMPLES: &str = "http://sys-bio.org#samples";

// --- Sequence encodings -----------------------------------------------------

pub const IUPAC_DNA: &str = "http://www.chem.qmul.ac.uk/iubmb/misc/naseq.html";
pub const IUPAC_RNA: &str = "http://www.chem.qmul.ac.uk/iubmb/misc/naseq.html#rna";
pub const IUPAC_PROTEIN: &str = "http://www.chem.qmul.ac.uk/iupac/AminoAcid/";

