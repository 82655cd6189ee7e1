use sbol_graph::kinds::{COMPONENT_DEFINITION, MODULE_DEFINITION, SEQUENCE};
use sbol_graph::vocab::{
    IUPAC_DNA, RDF_TYPE, SBOL_ELEMENTS, SBOL_ENCODING, SBOL_MAPS_TOS, SBOL_MODULES, SBOL_TYPES,
};
use sbol_graph::{Config, Document, Literal, NTriples, SbolError, TripleCodec, Uri};

const DNA_REGION: &str = "http://www.biopax.org/release/biopax-level3.owl#DnaRegion";

fn design() -> Document {
    let mut doc = Document::new();
    let md = doc.create(&MODULE_DEFINITION, "toggle").unwrap();
    let m = doc.create_child(md.as_str(), SBOL_MODULES, "sub").unwrap();
    doc.create_child(m.as_str(), SBOL_MAPS_TOS, "link").unwrap();

    let cd = doc.create(&COMPONENT_DEFINITION, "promoter").unwrap();
    doc.modify(cd.as_str(), |cd| {
        cd.set_name("pLac")?;
        cd.add(SBOL_TYPES, Uri::parse(DNA_REGION)?)?;
        cd.annotate("http://lab.example/terms#strength", Literal::integer(7))
    })
    .unwrap();

    let seq = doc.create(&SEQUENCE, "promoter_seq").unwrap();
    doc.modify(seq.as_str(), |seq| {
        seq.add(SBOL_ENCODING, Uri::parse(IUPAC_DNA)?)?;
        seq.add(SBOL_ELEMENTS, Literal::string("ttgacagctagc"))
    })
    .unwrap();
    doc
}

#[test]
fn write_then_read_is_isomorphic() {
    let doc = design();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("design.nt");
    doc.write(&path).unwrap();

    let mut again = Document::new();
    again.read(&path).unwrap();
    assert_eq!(again, doc);
    assert_eq!(again.size(), doc.size());
    assert_eq!(
        again.find("promoter").unwrap().name(),
        Some("pLac")
    );
    assert!(again
        .get("http://examples.org/ModuleDefinition/toggle/sub/link/1")
        .unwrap()
        .is_some());
}

#[test]
fn append_merges_and_rejects_overlap() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.nt");
    let second = dir.path().join("second.nt");
    design().write(&first).unwrap();

    let mut extra = Document::new();
    extra.create(&MODULE_DEFINITION, "reporter").unwrap();
    extra.write(&second).unwrap();

    let mut doc = Document::new();
    doc.read(&first).unwrap();
    let before = doc.size();
    doc.append(&second).unwrap();
    assert_eq!(doc.size(), before + 1);
    assert_eq!(doc.module_definitions().count(), 2);

    assert!(matches!(doc.append(&first), Err(SbolError::DuplicateUri(_))));
    assert_eq!(doc.size(), before + 1);
}

#[test]
fn reading_a_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut doc = Document::new();
    let err = doc.read(dir.path().join("absent.nt")).unwrap_err();
    assert!(matches!(err, SbolError::Io { .. }));
}

#[test]
fn codec_errors_name_the_line() {
    let mut doc = Document::new();
    let err = doc
        .read_string("<http://x.org/a> <http://x.org/p> <http://x.org/b> .\nnot a triple\n")
        .unwrap_err();
    match err {
        SbolError::Codec(e) => assert_eq!(e.line, 2),
        other => panic!("expected a codec error, got {other}"),
    }
}

#[test]
fn equality_ignores_triple_order() {
    let doc = design();
    let mut lines: Vec<String> = doc.write_string().lines().map(str::to_owned).collect();
    lines.reverse();
    let mut shuffled = Document::new();
    shuffled.read_string(&lines.join("\n")).unwrap();
    assert_eq!(shuffled, doc);

    let mut smaller = Document::new();
    smaller.read_string(&doc.write_string()).unwrap();
    smaller.remove("http://examples.org/Sequence/promoter_seq/1").unwrap();
    assert_ne!(smaller, doc);
}

#[test]
fn open_world_documents_keep_caller_uris() {
    let mut doc = Document::with_config(Config::open_world());
    let id = doc.create(&COMPONENT_DEFINITION, "http://parts.example/BBa_R0010").unwrap();
    assert_eq!(id.as_str(), "http://parts.example/BBa_R0010");
    let mut again = Document::with_config(Config::open_world());
    again.read_string(&doc.write_string()).unwrap();
    assert_eq!(again, doc);
}

#[test]
fn carried_triples_survive() {
    let text = format!(
        "<http://x.org/s> <{RDF_TYPE}> <http://x.org/Thing> .\n\
         <http://x.org/s> <http://x.org/tag> _:n .\n\
         _:n <http://x.org/label> \"note\" .\n"
    );
    let mut doc = Document::new();
    doc.read_string(&text).unwrap();
    let out = NTriples.parse(&doc.write_string()).unwrap();
    assert_eq!(out.len(), 3);

    let mut again = Document::new();
    again.read_string(&doc.write_string()).unwrap();
    assert_eq!(again, doc);
}
