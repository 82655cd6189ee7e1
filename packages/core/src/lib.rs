//! A typed property-graph document model for SBOL.
//!
//! This crate provides compliant URI composition, cardinality-bounded typed
//! properties, exclusively owned child objects, a document registry, and a
//! lossless round trip through RDF triples. It is the foundation of the
//! `sbolg` CLI.
//!
//! # Crate layout
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`types`] | Core value types: [`Uri`], [`Literal`], [`Value`], [`Bound`], [`Term`], [`Triple`] |
//! | [`validation`] | Display id, version and URI syntax; pluggable [`ValidationRule`]s |
//! | [`identity`] | Compliant URI composition and checking |
//! | [`config`] | Identity-generation settings, from code or the environment |
//! | [`kinds`] | The record-type catalog |
//! | [`property`] | Typed, bounded value stores |
//! | [`identified`] | The base object, its owned children and traversal |
//! | [`document`] | The root container and registry, read/write entry points |
//! | [`graph`] | Objects to triples and back, graph-isomorphic equality |
//! | [`codec`] | The [`TripleCodec`] boundary and N-Triples |
//! | [`render`] | Human-readable text rendering of objects and documents |
//!
//! # Quick start
//!
//! ```rust,ignore
//! use sbol_graph::{kinds, vocab, Document};
//!
//! let mut doc = Document::new();
//! let md = doc.create(&kinds::MODULE_DEFINITION, "foo")?;
//! let bar = doc.create_child(md.as_str(), vocab::SBOL_MODULES, "bar")?;
//! assert_eq!(bar.as_str(), "http://examples.org/ModuleDefinition/foo/bar/1");
//!
//! doc.write("foo.nt")?;
//! ```

pub mod codec;
pub mod config;
pub mod document;
pub mod error;
pub mod graph;
pub mod identified;
pub mod identity;
pub mod kinds;
pub mod property;
pub mod render;
pub mod types;
pub mod validation;
pub mod vocab;

pub use codec::{CodecError, NTriples, TripleCodec};
pub use config::Config;
pub use document::{Document, Issue};
pub use error::{Result, SbolError};
pub use identified::{Identified, Owner};
pub use identity::{compose_uri, is_compliant, ComposedIdentity};
pub use kinds::{Kind, PropertySpec, ValueKind};
pub use property::Property;
pub use render::{render_document, render_object, summarize, DocumentSummary};
pub use types::{Bound, Literal, Term, Triple, Uri, Value};
pub use validation::{is_valid_uri, validate_display_id, ValidationRule};
