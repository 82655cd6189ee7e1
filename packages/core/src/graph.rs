//! Conversion between object trees and triples, and triple-graph equality.
//!
//! [`object_triples`] flattens an object and its owned subtree; [`rebuild`]
//! goes the other way, grouping triples by subject and re-nesting owned
//! children; [`isomorphic`] compares two triple sets up to blank-node
//! renaming.

use std::collections::hash_map::DefaultHasher;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::hash::{Hash, Hasher};

use tracing::warn;

use crate::error::{Result, SbolError};
use crate::identified::Identified;
use crate::kinds::{self, Kind, ValueKind};
use crate::types::{Term, Triple, Uri, Value};
use crate::vocab::RDF_TYPE;

/// The triples of `obj` and its owned subtree. Unresolved objects become blank
/// nodes.
pub fn object_triples(obj: &Identified) -> Vec<Triple> {
    let mut out = Vec::new();
    emit_into(obj, &mut out, &mut 0);
    out
}

pub(crate) fn emit_into(obj: &Identified, out: &mut Vec<Triple>, blanks: &mut usize) -> Term {
    let subject = match obj.identity() {
        Some(uri) => Term::iri(uri.as_str()),
        None => {
            *blanks += 1;
            Term::Blank(format!("detached{blanks}"))
        }
    };
    out.push(Triple::new(
        subject.clone(),
        RDF_TYPE,
        Term::iri(obj.type_uri().as_str()),
    ));
    for prop in obj.properties() {
        for value in prop.values() {
            let object = match value {
                Value::Literal(l) => Term::Literal(l.clone()),
                Value::Uri(u) => Term::iri(u.as_str()),
                Value::Owned(child) => emit_into(child, out, blanks),
            };
            out.push(Triple::new(subject.clone(), prop.predicate(), object));
        }
    }
    subject
}

// --- rebuild -----------------------------------------------------------------

/// Objects recovered from a triple set.
#[derive(Debug, Default)]
pub struct Rebuilt {
    /// Typed subjects not owned by another typed subject, in first-seen order.
    pub roots: Vec<Identified>,
    /// Triples that belong to no typed subject (blank or untyped subjects,
    /// blank-node objects), kept verbatim.
    pub extra: Vec<Triple>,
}

struct Node {
    kind: Option<&'static Kind>,
    type_uri: String,
}

struct Context {
    by_subject: HashMap<String, Vec<Triple>>,
    nodes: HashMap<String, Node>,
    /// child subject -> (parent subject, predicate)
    parent_of: HashMap<String, (String, String)>,
}

fn serialization(identity: &str, reason: impl Into<String>) -> SbolError {
    SbolError::Serialization {
        identity: identity.to_owned(),
        reason: reason.into(),
    }
}

/// Rebuild object trees from triples.
///
/// A subject with an `rdf:type` becomes an object of the matching catalog
/// kind, or a generic object for unknown types. An edge becomes ownership when
/// the parent's kind declares the predicate as owned, or when it is the only
/// edge into a generic object under a predicate the parent does not declare.
/// A child claimed by two owned edges is an [`SbolError::Ownership`] error.
pub fn rebuild(triples: Vec<Triple>) -> Result<Rebuilt> {
    let mut seen = HashSet::new();
    let mut order: Vec<String> = Vec::new();
    let mut by_subject: HashMap<String, Vec<Triple>> = HashMap::new();
    let mut extra = Vec::new();
    for t in triples {
        if !seen.insert(t.clone()) {
            continue;
        }
        match &t.subject {
            Term::Iri(s) => {
                if !by_subject.contains_key(s) {
                    order.push(s.clone());
                }
                by_subject.entry(s.clone()).or_default().push(t);
            }
            _ => extra.push(t),
        }
    }

    let mut nodes = HashMap::new();
    for subject in &order {
        let primary = {
            let types: Vec<&str> = by_subject[subject]
                .iter()
                .filter(|t| t.predicate == RDF_TYPE)
                .filter_map(|t| t.object.as_iri())
                .collect();
            types
                .iter()
                .copied()
                .find(|t| kinds::by_type_uri(t).is_some())
                .or_else(|| types.first().copied())
                .map(str::to_owned)
        };
        let Some(primary) = primary else {
            let untyped = by_subject.remove(subject).unwrap_or_default();
            warn!(subject = %subject, count = untyped.len(), "carrying triples of untyped subject verbatim");
            extra.extend(untyped);
            continue;
        };
        nodes.insert(
            subject.clone(),
            Node {
                kind: kinds::by_type_uri(&primary),
                type_uri: primary,
            },
        );
    }

    let parent_of = ownership_edges(&order, &by_subject, &nodes)?;
    let ctx = Context {
        by_subject,
        nodes,
        parent_of,
    };

    let mut roots = Vec::new();
    for subject in &order {
        if ctx.nodes.contains_key(subject) && !ctx.parent_of.contains_key(subject) {
            roots.push(build(subject, &ctx, &mut extra)?);
        }
    }
    Ok(Rebuilt { roots, extra })
}

fn ownership_edges(
    order: &[String],
    by_subject: &HashMap<String, Vec<Triple>>,
    nodes: &HashMap<String, Node>,
) -> Result<HashMap<String, (String, String)>> {
    let mut owned_in: HashMap<&str, Vec<(&str, &str)>> = HashMap::new();
    let mut generic_in: HashMap<&str, Vec<(&str, &str, bool)>> = HashMap::new();

    for subject in order {
        let (Some(node), Some(triples)) = (nodes.get(subject), by_subject.get(subject)) else {
            continue;
        };
        for t in triples {
            if t.predicate == RDF_TYPE {
                continue;
            }
            let Some(object) = t.object.as_iri() else {
                continue;
            };
            let Some(target) = nodes.get(object) else {
                continue;
            };
            let declared = node.kind.and_then(|k| k.property(&t.predicate));
            if declared.is_some_and(|p| matches!(p.value, ValueKind::Owned(_))) {
                owned_in
                    .entry(object)
                    .or_default()
                    .push((subject.as_str(), t.predicate.as_str()));
            } else if target.kind.is_none() {
                generic_in.entry(object).or_default().push((
                    subject.as_str(),
                    t.predicate.as_str(),
                    declared.is_none(),
                ));
            }
        }
    }

    let mut parent_of = HashMap::new();
    for (child, edges) in &owned_in {
        if let [(a, _), (b, _), ..] = edges.as_slice() {
            return Err(SbolError::Ownership {
                identity: (*child).to_owned(),
                owner: format!("both {a} and {b}"),
            });
        }
        let (parent, predicate) = edges[0];
        parent_of.insert((*child).to_owned(), (parent.to_owned(), predicate.to_owned()));
    }
    let mut annotation_edges = HashSet::new();
    for (child, edges) in &generic_in {
        if owned_in.contains_key(child) {
            continue;
        }
        if let [(parent, predicate, true)] = edges.as_slice() {
            parent_of.insert((*child).to_owned(), ((*parent).to_owned(), (*predicate).to_owned()));
            annotation_edges.insert((*child).to_owned());
        }
    }

    break_cycles(&mut parent_of, &annotation_edges)?;
    Ok(parent_of)
}

/// Cycles through annotation edges are broken by promoting their smallest
/// member to a root. A cycle made only of declared owned edges is an error.
fn break_cycles(
    parent_of: &mut HashMap<String, (String, String)>,
    annotation_edges: &HashSet<String>,
) -> Result<()> {
    let mut starts: Vec<String> = parent_of.keys().cloned().collect();
    starts.sort();
    for start in starts {
        let mut path: Vec<String> = Vec::new();
        let mut current = start;
        loop {
            if let Some(pos) = path.iter().position(|p| *p == current) {
                let cycle = &path[pos..];
                let promoted = cycle
                    .iter()
                    .filter(|c| annotation_edges.contains(*c))
                    .min()
                    .cloned();
                match promoted {
                    Some(node) => {
                        parent_of.remove(&node);
                    }
                    None => {
                        let first = cycle.iter().min().cloned().unwrap_or_default();
                        return Err(serialization(&first, "owned objects form a cycle"));
                    }
                }
                break;
            }
            let next = parent_of.get(&current).map(|(p, _)| p.clone());
            path.push(current);
            match next {
                Some(parent) => current = parent,
                None => break,
            }
        }
    }
    Ok(())
}

fn build(subject: &str, ctx: &Context, extra: &mut Vec<Triple>) -> Result<Identified> {
    let node = &ctx.nodes[subject];
    let type_uri =
        Uri::parse(node.type_uri.as_str()).map_err(|e| serialization(subject, e.to_string()))?;
    let mut obj = Identified::bare(node.kind, type_uri);
    obj.set_identity_unchecked(
        Uri::parse(subject).map_err(|e| serialization(subject, e.to_string()))?,
    );

    for t in ctx.by_subject.get(subject).into_iter().flatten() {
        if t.predicate == RDF_TYPE && t.object.as_iri() == Some(node.type_uri.as_str()) {
            continue;
        }
        let value = match &t.object {
            Term::Literal(l) => Value::Literal(l.clone()),
            Term::Iri(object) => {
                let owned_here = ctx
                    .parent_of
                    .get(object)
                    .is_some_and(|(p, pred)| p == subject && *pred == t.predicate);
                if owned_here {
                    Value::Owned(build(object, ctx, extra)?)
                } else {
                    Value::Uri(
                        Uri::parse(object.as_str())
                            .map_err(|e| serialization(subject, e.to_string()))?,
                    )
                }
            }
            Term::Blank(_) => {
                extra.push(t.clone());
                continue;
            }
        };
        obj.push_read(&t.predicate, value)?;
    }
    Ok(obj)
}

// --- isomorphism -------------------------------------------------------------

/// Are two triple sets equal up to a renaming of blank nodes?
///
/// Duplicates are ignored. Blank nodes are first partitioned by iterated
/// neighbourhood hashing, then matched by backtracking within each colour class.
pub fn isomorphic(a: &[Triple], b: &[Triple]) -> bool {
    let a: BTreeSet<&Triple> = a.iter().collect();
    let b: BTreeSet<&Triple> = b.iter().collect();
    if a.len() != b.len() {
        return false;
    }
    let (ground_a, blank_a): (Vec<&Triple>, Vec<&Triple>) =
        a.into_iter().partition(|t| !mentions_blank(t));
    let (ground_b, blank_b): (Vec<&Triple>, Vec<&Triple>) =
        b.into_iter().partition(|t| !mentions_blank(t));
    if ground_a != ground_b {
        return false;
    }
    if blank_a.is_empty() {
        return true;
    }

    let adj_a = adjacency(&blank_a);
    let adj_b = adjacency(&blank_b);
    if adj_a.len() != adj_b.len() {
        return false;
    }
    let nodes_a: Vec<&str> = adj_a.keys().copied().collect();
    let nodes_b: Vec<&str> = adj_b.keys().copied().collect();

    let mut colour_a: HashMap<&str, u64> = nodes_a.iter().map(|n| (*n, 0)).collect();
    let mut colour_b: HashMap<&str, u64> = nodes_b.iter().map(|n| (*n, 0)).collect();
    for _ in 0..=nodes_a.len() {
        let next_a = refine(&adj_a, &colour_a);
        let next_b = refine(&adj_b, &colour_b);
        let stable = classes(&next_a) == classes(&colour_a) && classes(&next_b) == classes(&colour_b);
        colour_a = next_a;
        colour_b = next_b;
        if stable {
            break;
        }
    }

    let mut hist_a: Vec<u64> = colour_a.values().copied().collect();
    let mut hist_b: Vec<u64> = colour_b.values().copied().collect();
    hist_a.sort_unstable();
    hist_b.sort_unstable();
    if hist_a != hist_b {
        return false;
    }

    let mut by_colour_b: HashMap<u64, Vec<&str>> = HashMap::new();
    for (node, colour) in &colour_b {
        by_colour_b.entry(*colour).or_default().push(*node);
    }
    let mut order = nodes_a;
    order.sort_by_key(|n| (by_colour_b.get(&colour_a[n]).map_or(0, Vec::len), *n));

    let mut matcher = Matcher {
        order,
        colour_a,
        by_colour_b,
        adj_a,
        target: blank_b.into_iter().cloned().collect(),
        mapping: HashMap::new(),
        used: HashSet::new(),
    };
    matcher.search(0)
}

fn mentions_blank(t: &Triple) -> bool {
    t.subject.is_blank() || t.object.is_blank()
}

fn adjacency<'a>(triples: &[&'a Triple]) -> HashMap<&'a str, Vec<&'a Triple>> {
    let mut adj: HashMap<&str, Vec<&Triple>> = HashMap::new();
    for &t in triples {
        if let Term::Blank(s) = &t.subject {
            adj.entry(s.as_str()).or_default().push(t);
        }
        if let Term::Blank(o) = &t.object {
            if t.subject != t.object {
                adj.entry(o.as_str()).or_default().push(t);
            }
        }
    }
    adj
}

fn refine<'a>(
    adj: &HashMap<&'a str, Vec<&'a Triple>>,
    colour: &HashMap<&'a str, u64>,
) -> HashMap<&'a str, u64> {
    adj.iter()
        .map(|(node, triples)| {
            let mut signatures: Vec<u64> = triples
                .iter()
                .map(|t| {
                    let mut h = DefaultHasher::new();
                    t.predicate.hash(&mut h);
                    position_key(&t.subject, node, colour).hash(&mut h);
                    position_key(&t.object, node, colour).hash(&mut h);
                    h.finish()
                })
                .collect();
            signatures.sort_unstable();
            let mut h = DefaultHasher::new();
            colour[node].hash(&mut h);
            signatures.hash(&mut h);
            (*node, h.finish())
        })
        .collect()
}

fn position_key(term: &Term, me: &str, colour: &HashMap<&str, u64>) -> (u8, u64) {
    match term {
        Term::Blank(b) if b == me => (0, 0),
        Term::Blank(b) => (1, colour.get(b.as_str()).copied().unwrap_or(0)),
        other => {
            let mut h = DefaultHasher::new();
            other.hash(&mut h);
            (2, h.finish())
        }
    }
}

fn classes(colour: &HashMap<&str, u64>) -> usize {
    colour.values().collect::<HashSet<_>>().len()
}

struct Matcher<'a> {
    order: Vec<&'a str>,
    colour_a: HashMap<&'a str, u64>,
    by_colour_b: HashMap<u64, Vec<&'a str>>,
    adj_a: HashMap<&'a str, Vec<&'a Triple>>,
    target: HashSet<Triple>,
    mapping: HashMap<&'a str, &'a str>,
    used: HashSet<&'a str>,
}

impl<'a> Matcher<'a> {
    fn search(&mut self, depth: usize) -> bool {
        let Some(&node) = self.order.get(depth) else {
            return true;
        };
        let candidates = self
            .by_colour_b
            .get(&self.colour_a[node])
            .cloned()
            .unwrap_or_default();
        for candidate in candidates {
            if self.used.contains(candidate) {
                continue;
            }
            self.mapping.insert(node, candidate);
            self.used.insert(candidate);
            if self.consistent(node) && self.search(depth + 1) {
                return true;
            }
            self.mapping.remove(node);
            self.used.remove(candidate);
        }
        false
    }

    /// Every triple of `node` whose blank nodes are all mapped lands in the target.
    fn consistent(&self, node: &str) -> bool {
        self.adj_a[node].iter().all(|t| match self.map_triple(t) {
            Some(mapped) => self.target.contains(&mapped),
            None => true,
        })
    }

    fn map_triple(&self, t: &Triple) -> Option<Triple> {
        Some(Triple {
            subject: self.map_term(&t.subject)?,
            predicate: t.predicate.clone(),
            object: self.map_term(&t.object)?,
        })
    }

    fn map_term(&self, term: &Term) -> Option<Term> {
        match term {
            Term::Blank(b) => self
                .mapping
                .get(b.as_str())
                .map(|m| Term::Blank((*m).to_owned())),
            other => Some(other.clone()),
        }
    }
}

// --- tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::{MODULE, MODULE_DEFINITION};
    use crate::types::Literal;
    use crate::vocab::{SBOL_DISPLAY_ID, SBOL_MODULES};
    use crate::Config;

    fn iri(s: &str) -> Term {
        Term::iri(s)
    }

    fn blank(s: &str) -> Term {
        Term::Blank(s.into())
    }

    fn lit(s: &str) -> Term {
        Term::Literal(Literal::string(s))
    }

    const P: &str = "http://x.org/p";
    const Q: &str = "http://x.org/q";

    #[test]
    fn order_and_duplicates_do_not_matter() {
        let a = vec![
            Triple::new(iri("http://x.org/a"), P, lit("1")),
            Triple::new(iri("http://x.org/a"), Q, iri("http://x.org/b")),
        ];
        let mut b = a.clone();
        b.reverse();
        b.push(a[0].clone());
        assert!(isomorphic(&a, &b));
    }

    #[test]
    fn blank_nodes_match_up_to_renaming() {
        let a = vec![
            Triple::new(blank("x"), P, lit("1")),
            Triple::new(blank("y"), P, lit("2")),
            Triple::new(blank("x"), Q, blank("y")),
        ];
        let b = vec![
            Triple::new(blank("m"), P, lit("2")),
            Triple::new(blank("n"), P, lit("1")),
            Triple::new(blank("n"), Q, blank("m")),
        ];
        assert!(isomorphic(&a, &b));

        let c = vec![
            Triple::new(blank("m"), P, lit("2")),
            Triple::new(blank("n"), P, lit("1")),
            Triple::new(blank("m"), Q, blank("n")),
        ];
        assert!(!isomorphic(&a, &c));
    }

    #[test]
    fn symmetric_blank_structures_need_backtracking() {
        // Two 2-cycles versus one 4-cycle: colour refinement cannot tell these
        // apart, the edge check can.
        let two_cycles = vec![
            Triple::new(blank("a"), P, blank("b")),
            Triple::new(blank("b"), P, blank("a")),
            Triple::new(blank("c"), P, blank("d")),
            Triple::new(blank("d"), P, blank("c")),
        ];
        let four_cycle = vec![
            Triple::new(blank("w"), P, blank("x")),
            Triple::new(blank("x"), P, blank("y")),
            Triple::new(blank("y"), P, blank("z")),
            Triple::new(blank("z"), P, blank("w")),
        ];
        assert!(!isomorphic(&two_cycles, &four_cycle));
        let renamed = vec![
            Triple::new(blank("q"), P, blank("r")),
            Triple::new(blank("s"), P, blank("t")),
            Triple::new(blank("r"), P, blank("q")),
            Triple::new(blank("t"), P, blank("s")),
        ];
        assert!(isomorphic(&two_cycles, &renamed));
    }

    #[test]
    fn object_round_trips_through_triples() {
        let mut md = Identified::new(&MODULE_DEFINITION, "foo", &Config::default()).unwrap();
        md.create(SBOL_MODULES, "bar").unwrap();
        md.annotate("http://lab.example/ns#note", "kept").unwrap();

        let rebuilt = rebuild(md.triples()).unwrap();
        assert!(rebuilt.extra.is_empty());
        assert_eq!(rebuilt.roots.len(), 1);
        let root = &rebuilt.roots[0];
        assert_eq!(root, &md);
        let child = root.child(SBOL_MODULES, "bar").unwrap();
        assert_eq!(child.kind(), Some(&MODULE));
        assert_eq!(
            root.literal("http://lab.example/ns#note"),
            Some("kept")
        );
    }

    #[test]
    fn untyped_and_blank_subjects_are_carried() {
        let triples = vec![
            Triple::new(iri("http://x.org/loose"), P, lit("v")),
            Triple::new(blank("b"), P, lit("w")),
        ];
        let rebuilt = rebuild(triples).unwrap();
        assert!(rebuilt.roots.is_empty());
        assert_eq!(rebuilt.extra.len(), 2);
    }

    #[test]
    fn generic_object_with_one_parent_nests() {
        let triples = vec![
            Triple::new(iri("http://x.org/md"), RDF_TYPE, iri(crate::vocab::SBOL_MODULE_DEFINITION)),
            Triple::new(iri("http://x.org/md"), P, iri("http://x.org/note")),
            Triple::new(iri("http://x.org/note"), RDF_TYPE, iri("http://x.org/Note")),
            Triple::new(iri("http://x.org/note"), SBOL_DISPLAY_ID, lit("note")),
        ];
        let rebuilt = rebuild(triples).unwrap();
        assert_eq!(rebuilt.roots.len(), 1);
        let note = rebuilt.roots[0].child(P, "note").unwrap();
        assert!(note.kind().is_none());
        assert_eq!(note.type_name(), "Note");
    }

    #[test]
    fn annotation_cycle_is_broken() {
        let triples = vec![
            Triple::new(iri("http://x.org/a"), RDF_TYPE, iri("http://x.org/T")),
            Triple::new(iri("http://x.org/b"), RDF_TYPE, iri("http://x.org/T")),
            Triple::new(iri("http://x.org/a"), P, iri("http://x.org/b")),
            Triple::new(iri("http://x.org/b"), P, iri("http://x.org/a")),
        ];
        let rebuilt = rebuild(triples.clone()).unwrap();
        assert_eq!(rebuilt.roots.len(), 1);
        assert_eq!(rebuilt.roots[0].count(), 2);
        let out: Vec<Triple> = rebuilt.roots.iter().flat_map(Identified::triples).collect();
        assert!(isomorphic(&out, &triples));
    }

    #[test]
    fn child_claimed_twice_is_an_ownership_error() {
        let md = iri(crate::vocab::SBOL_MODULE_DEFINITION);
        let triples = vec![
            Triple::new(iri("http://x.org/a"), RDF_TYPE, md.clone()),
            Triple::new(iri("http://x.org/b"), RDF_TYPE, md),
            Triple::new(iri("http://x.org/m"), RDF_TYPE, iri(crate::vocab::SBOL_MODULE)),
            Triple::new(iri("http://x.org/a"), SBOL_MODULES, iri("http://x.org/m")),
            Triple::new(iri("http://x.org/b"), SBOL_MODULES, iri("http://x.org/m")),
        ];
        assert!(matches!(rebuild(triples), Err(SbolError::Ownership { .. })));
    }

    #[test]
    fn owned_edge_to_untyped_subject_fails() {
        let triples = vec![
            Triple::new(iri("http://x.org/a"), RDF_TYPE, iri(crate::vocab::SBOL_MODULE_DEFINITION)),
            Triple::new(iri("http://x.org/a"), SBOL_MODULES, iri("http://x.org/m")),
        ];
        assert!(matches!(
            rebuild(triples),
            Err(SbolError::Serialization { .. })
        ));
    }
}
