//! Human-readable text rendering of objects and documents.
//!
//! The output is stable plain text for terminals and logs. It is not a
//! serialization format; only the triple codecs are.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::document::Document;
use crate::identified::Identified;
use crate::property::Property;
use crate::types::Value;
use crate::vocab::{SBOL_DISPLAY_ID, SBOL_PERSISTENT_IDENTITY, SBOL_VERSION};

/// Render one object and its owned subtree as an indented tree.
///
/// ```text
/// ModuleDefinition http://examples.org/ModuleDefinition/foo/1
///   displayId: foo
///   version: 1
///   module:
///     Module http://examples.org/ModuleDefinition/foo/bar/1
///       definition: <http://examples.org/ModuleDefinition/bar/1>
///       displayId: bar
/// ```
pub fn render_object(object: &Identified) -> String {
    let mut out = String::new();
    write_object(&mut out, object, 0);
    out
}

fn write_object(out: &mut String, object: &Identified, depth: usize) {
    let pad = "  ".repeat(depth);
    out.push_str(&format!("{pad}{} {}\n", object.type_name(), object.identity_str()));
    for prop in object.properties() {
        if prop.is_empty() || prop.predicate() == SBOL_PERSISTENT_IDENTITY {
            continue;
        }
        let label = local_name(prop.predicate());
        if prop.objects().next().is_none() {
            let values: Vec<String> = prop.values().iter().map(show_value).collect();
            out.push_str(&format!("{pad}  {label}: {}\n", values.join(", ")));
            continue;
        }
        out.push_str(&format!("{pad}  {label}:\n"));
        for value in prop.values() {
            match value {
                Value::Owned(child) => write_object(out, child, depth + 2),
                other => out.push_str(&format!("{pad}    {}\n", show_value(other))),
            }
        }
    }
}

fn show_value(value: &Value) -> String {
    match value {
        Value::Literal(l) => l.lexical.clone(),
        Value::Uri(u) => format!("<{u}>"),
        Value::Owned(o) => o.identity_str().to_owned(),
    }
}

/// Counts behind [`render_document`], for machine-readable output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    /// Every registered object, nested ones included.
    pub objects: usize,
    pub top_level: usize,
    /// Non-empty categories only.
    pub categories: BTreeMap<String, usize>,
    pub carried_triples: usize,
}

pub fn summarize(doc: &Document) -> DocumentSummary {
    DocumentSummary {
        objects: doc.size(),
        top_level: doc.get_all().count(),
        categories: doc
            .categories()
            .iter()
            .filter(|c| !c.is_empty())
            .map(|c| (c.predicate().to_owned(), c.len()))
            .collect(),
        carried_triples: doc.extra_triples().len(),
    }
}

/// Render a [`Document`] as a summary grouped by category.
///
/// ```text
/// Document  3 objects
/// ───────────────────
///
/// moduleDefinitions (1)
///   foo  http://examples.org/ModuleDefinition/foo/1  +2 nested
/// ```
pub fn render_document(doc: &Document) -> String {
    let total = doc.size();
    let header = format!("Document  {} object{}", total, if total == 1 { "" } else { "s" });
    let rule = "─".repeat(header.chars().count());
    let mut out = format!("{header}\n{rule}\n");

    let keywords: Vec<&str> = doc.keywords().literals().map(|k| k.as_str()).collect();
    if !keywords.is_empty() {
        out.push_str(&format!("keywords: {}\n", keywords.join(", ")));
    }
    for citation in doc.citations().references() {
        out.push_str(&format!("cites: {citation}\n"));
    }

    for category in doc.categories().iter().filter(|c| !c.is_empty()) {
        write_category(&mut out, category);
    }

    let carried = doc.extra_triples().len();
    if carried > 0 {
        out.push_str(&format!("\n{carried} carried triple{}\n", if carried == 1 { "" } else { "s" }));
    }
    out
}

fn write_category(out: &mut String, category: &Property) {
    out.push('\n');
    out.push_str(&format!("{} ({})\n", category.predicate(), category.len()));
    for object in category.objects() {
        let name = object
            .display_id()
            .or_else(|| object.name())
            .unwrap_or("-");
        let nested = object.count() - 1;
        if nested > 0 {
            out.push_str(&format!("  {name}  {}  +{nested} nested\n", object.identity_str()));
        } else {
            out.push_str(&format!("  {name}  {}\n", object.identity_str()));
        }
    }
}

// --- helpers -----------------------------------------------------------------

/// The part of a predicate IRI after its last `#` or `/`.
fn local_name(predicate: &str) -> &str {
    match predicate {
        SBOL_DISPLAY_ID => "displayId",
        SBOL_VERSION => "version",
        p => p.rsplit(['#', '/']).next().filter(|s| !s.is_empty()).unwrap_or(p),
    }
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::MODULE_DEFINITION;
    use crate::vocab::SBOL_MODULES;

    fn sample() -> Document {
        let mut doc = Document::new();
        let md = doc.create(&MODULE_DEFINITION, "foo").unwrap();
        doc.create_child(md.as_str(), SBOL_MODULES, "bar").unwrap();
        doc
    }

    #[test]
    fn render_object_nests_children() {
        let doc = sample();
        let rendered = render_object(doc.find("foo").unwrap());
        assert!(rendered.starts_with("ModuleDefinition http://examples.org/ModuleDefinition/foo/1\n"));
        assert!(rendered.contains("\n  displayId: foo\n"));
        assert!(rendered.contains("\n  module:\n    Module http://examples.org/ModuleDefinition/foo/bar/1\n"));
    }

    #[test]
    fn render_document_groups_by_category() {
        let rendered = render_document(&sample());
        assert!(rendered.starts_with("Document  2 objects\n"));
        assert!(rendered.contains("moduleDefinitions (1)"));
        assert!(rendered.contains("+1 nested"));
        assert!(!rendered.contains("componentDefinitions"));
    }

    #[test]
    fn render_document_lists_keywords_and_citations() {
        let mut doc = sample();
        doc.add_keyword("toggle switch");
        doc.add_keyword("repressor");
        doc.add_citation("https://doi.org/10.1038/35002131").unwrap();
        let rendered = render_document(&doc);
        assert!(rendered.contains("\nkeywords: toggle switch, repressor\n"));
        assert!(rendered.contains("\ncites: https://doi.org/10.1038/35002131\n"));
    }

    #[test]
    fn summary_counts() {
        let summary = summarize(&sample());
        assert_eq!(summary.objects, 2);
        assert_eq!(summary.top_level, 1);
        assert_eq!(summary.categories.get("moduleDefinitions"), Some(&1));
        assert_eq!(summary.carried_triples, 0);
    }

    #[test]
    fn local_names() {
        assert_eq!(local_name("http://sbols.org/v2#mapsTo"), "mapsTo");
        assert_eq!(local_name("http://purl.org/dc/terms/title"), "title");
    }
}
