use proptest::prelude::*;
use sbol_graph::kinds::{self, Kind, MODULE, MODULE_DEFINITION};
use sbol_graph::vocab::SBOL_MODULES;
use sbol_graph::{validate_display_id, Bound, Config, Document, Identified, Property, SbolError};

static ONLY_MODULES: [&Kind; 1] = [&MODULE];
const SLOTS: &str = "http://examples.org/terms#slot";

fn module_definition(id: &str) -> Identified {
    Identified::new(&MODULE_DEFINITION, id, &Config::default()).unwrap()
}

#[test]
fn nested_identity_composition() {
    let mut doc = Document::new();
    let md = doc.create(&MODULE_DEFINITION, "foo").unwrap();
    let m = doc.create_child(md.as_str(), SBOL_MODULES, "bar").unwrap();
    assert_eq!(md.as_str(), "http://examples.org/ModuleDefinition/foo/1");
    assert_eq!(m.as_str(), "http://examples.org/ModuleDefinition/foo/bar/1");
}

#[test]
fn children_built_before_the_document_keep_the_version() {
    let offline = Config::default().with_namespace("");
    let mut md = Identified::new(&MODULE_DEFINITION, "foo", &offline).unwrap();
    md.create(SBOL_MODULES, "bar").unwrap();

    let mut doc = Document::new();
    doc.add(md).unwrap();
    assert!(doc.get("http://examples.org/ModuleDefinition/foo/1").unwrap().is_some());
    let bar = doc.get("http://examples.org/ModuleDefinition/foo/bar/1").unwrap().unwrap();
    assert_eq!(bar.version(), Some("1"));
}

#[test]
fn namespace_comes_from_the_document_config() {
    let config = Config::default().with_namespace("http://lab.example/parts");
    let mut doc = Document::with_config(config);
    let md = doc.create(&MODULE_DEFINITION, "foo").unwrap();
    assert_eq!(md.as_str(), "http://lab.example/parts/ModuleDefinition/foo/1");
}

#[test]
fn lookup_by_identity_display_id_and_index_agree() {
    let mut md = module_definition("foo");
    let identity = md.create(SBOL_MODULES, "bar").unwrap().identity().cloned().unwrap();
    let modules = md.property(SBOL_MODULES).unwrap();
    let index = modules.position("bar").unwrap();

    let by_uri = modules.find(identity.as_str()).and_then(|v| v.as_object()).unwrap();
    let by_id = modules.find("bar").and_then(|v| v.as_object()).unwrap();
    let by_index = modules.get(index).unwrap().as_object().unwrap();
    assert!(std::ptr::eq(by_uri, by_id));
    assert!(std::ptr::eq(by_id, by_index));
}

#[test]
fn detach_on_reassign() {
    let mut doc = Document::new();
    let md = doc.create(&MODULE_DEFINITION, "foo").unwrap();
    let m1 = doc.create_child(md.as_str(), SBOL_MODULES, "m1").unwrap();
    let m2 = doc.create_child(md.as_str(), SBOL_MODULES, "m2").unwrap();

    doc.modify(md.as_str(), |md| {
        let kept: Vec<Identified> = md.child(SBOL_MODULES, "m2").cloned().into_iter().collect();
        md.set_children(SBOL_MODULES, kept)
    })
    .unwrap();

    let md = doc.get(md.as_str()).unwrap().unwrap();
    let modules = md.property(SBOL_MODULES).unwrap();
    assert!(modules.find(m1.as_str()).is_none());
    assert!(modules.find(m2.as_str()).is_some());
    assert!(doc.get(m1.as_str()).unwrap().is_none());
    assert!(doc.find("m1").is_none());
}

#[test]
fn duplicate_child_is_rejected() {
    let mut md = module_definition("foo");
    md.create(SBOL_MODULES, "bar").unwrap();
    let err = md.create(SBOL_MODULES, "bar").unwrap_err();
    assert!(matches!(err, SbolError::DuplicateUri(_)));
    assert_eq!(md.property(SBOL_MODULES).unwrap().len(), 1);
}

#[test]
fn create_then_count() {
    let mut doc = Document::new();
    let md = doc.create(&MODULE_DEFINITION, "thing1").unwrap();
    let len = |doc: &Document| {
        doc.get(md.as_str()).unwrap().unwrap().property(SBOL_MODULES).unwrap().len()
    };
    assert_eq!(len(&doc), 0);
    doc.create_child(md.as_str(), SBOL_MODULES, "thing2").unwrap();
    assert_eq!(len(&doc), 1);
}

#[test]
fn child_cannot_have_two_owners() {
    let mut first = module_definition("a");
    first.create(SBOL_MODULES, "shared").unwrap();
    let copy = first.child(SBOL_MODULES, "shared").unwrap().clone();

    let mut second = module_definition("b");
    assert!(matches!(
        second.add_child(SBOL_MODULES, copy),
        Err(SbolError::Ownership { .. })
    ));

    let taken = first.remove_child(SBOL_MODULES, "shared").unwrap();
    let identity = taken.identity().cloned();
    second.add_child(SBOL_MODULES, taken).unwrap();
    // identity is fixed once assigned, even across owners
    assert_eq!(second.child(SBOL_MODULES, "shared").unwrap().identity(), identity.as_ref());
    assert!(first.child(SBOL_MODULES, "shared").is_none());
}

#[test]
fn every_top_level_kind_has_a_category() {
    let mut doc = Document::new();
    for (i, kind) in kinds::TOP_LEVEL.iter().enumerate() {
        doc.create(kind, &format!("obj{i}")).unwrap();
    }
    assert_eq!(doc.size(), kinds::TOP_LEVEL.len());
    assert_eq!(doc.module_definitions().count(), 1);
    assert_eq!(doc.experimental_data().count(), 1);
    assert!(doc.categories().iter().take(kinds::TOP_LEVEL.len()).all(|c| c.len() == 1));
}

proptest! {
    #[test]
    fn valid_display_ids_are_accepted(id in "[A-Za-z_][A-Za-z0-9_]{0,24}") {
        prop_assert!(validate_display_id(&id).is_ok());
    }

    #[test]
    fn leading_digit_is_rejected(id in "[0-9][A-Za-z0-9_]{0,24}") {
        prop_assert!(matches!(validate_display_id(&id), Err(SbolError::InvalidDisplayId(_))));
    }

    #[test]
    fn foreign_characters_are_rejected(
        head in "[A-Za-z_][A-Za-z0-9_]{0,8}",
        bad in "[^A-Za-z0-9_]",
        tail in "[A-Za-z0-9_]{0,8}",
    ) {
        let id = format!("{head}{bad}{tail}");
        prop_assert!(validate_display_id(&id).is_err());
    }

    #[test]
    fn owned_property_saturates_at_its_upper_bound(upper in 1usize..6) {
        let mut md = module_definition("foo");
        md.declare(Property::owned(SLOTS, &ONLY_MODULES, 0, Bound::Finite(upper))).unwrap();
        for i in 0..upper {
            md.create(SLOTS, &format!("m{i}")).unwrap();
        }
        let err = md.create(SLOTS, "overflow").unwrap_err();
        let is_cardinality = matches!(err, SbolError::Cardinality { .. });
        prop_assert!(is_cardinality);
        prop_assert_eq!(md.property(SLOTS).unwrap().len(), upper);
    }
}
