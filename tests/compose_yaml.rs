use indoc::indoc;

use saphyr_composer::{
    compose_all_str, compose_str, compose_str_with_options, Composer, CoreResolver, Document, Error, FlowStyle,
    LiveEvents, NodeId, NodeKind, ScalarStyle, Tag,
};

fn single(yaml: &str) -> Document {
    compose_str(yaml)
        .expect("valid YAML")
        .expect("one document")
}

/// Value node for `key` in the root mapping.
fn value_of(doc: &Document, key: &str) -> NodeId {
    doc.root_node()
        .pairs()
        .expect("root is a mapping")
        .iter()
        .find(|(k, _)| doc[*k].as_scalar() == Some(key))
        .map(|(_, v)| *v)
        .unwrap_or_else(|| panic!("missing key {key}"))
}

#[test]
fn scalars_get_core_schema_tags() -> anyhow::Result<()> {
    let yaml = indoc! {r#"
        name: app
        port: 8080
        ratio: 0.75
        enabled: true
        missing: ~
        quoted: "8080"
    "#};
    let doc = compose_str(yaml)?.expect("one document");

    assert_eq!(doc.root_node().tag, Tag::MAP);
    assert!(doc.root_node().resolved);
    assert_eq!(doc[value_of(&doc, "name")].tag, Tag::STR);
    assert_eq!(doc[value_of(&doc, "port")].tag, Tag::INT);
    assert_eq!(doc[value_of(&doc, "ratio")].tag, Tag::FLOAT);
    assert_eq!(doc[value_of(&doc, "enabled")].tag, Tag::BOOL);
    assert_eq!(doc[value_of(&doc, "missing")].tag, Tag::NULL);

    let quoted = &doc[value_of(&doc, "quoted")];
    assert_eq!(quoted.tag, Tag::STR);
    assert!(quoted.resolved);
    assert!(matches!(
        quoted.data,
        saphyr_composer::NodeData::Scalar {
            style: ScalarStyle::DoubleQuoted,
            ..
        }
    ));
    Ok(())
}

#[test]
fn local_tags_are_kept() {
    let doc = single("color: !rgb ff0000\n");
    let value = &doc[value_of(&doc, "color")];
    assert_eq!(value.tag, "!rgb");
    assert!(!value.resolved);
    assert_eq!(value.as_scalar(), Some("ff0000"));
}

#[test]
fn aliases_share_the_anchored_node() {
    let yaml = indoc! {"
        defaults: &defaults
          retries: 3
        primary: *defaults
        backup: *defaults
    "};
    let doc = single(yaml);
    let defaults = value_of(&doc, "defaults");
    assert_eq!(value_of(&doc, "primary"), defaults);
    assert_eq!(value_of(&doc, "backup"), defaults);
    assert!(!doc[defaults].recursive);
    // root, three keys, the shared mapping and its one pair
    assert_eq!(doc.len(), 7);
}

#[test]
fn self_referencing_sequence() {
    let doc = single("&loop [*loop]\n");
    let root = doc.root();
    assert!(doc[root].recursive);
    assert_eq!(doc[root].children().unwrap(), &[root]);
    assert_eq!(doc[root].flow_style(), Some(FlowStyle::Flow));
}

#[test]
fn self_reference_through_a_child_mapping() {
    let yaml = indoc! {"
        king: &king
          name: Arthur
          crowned_by:
            name: Merlin
            pupil: *king
    "};
    let doc = single(yaml);
    assert!(!doc.root_node().recursive);

    let king = value_of(&doc, "king");
    assert!(doc[king].recursive);
    let (_, crowned_by) = doc[king].pairs().unwrap()[1];
    assert!(!doc[crowned_by].recursive);
    let (_, pupil) = doc[crowned_by].pairs().unwrap()[1];
    assert_eq!(pupil, king);

    assert_eq!(doc.walk().len(), doc.len());
}

#[test]
fn merge_keys_set_the_merged_flag() {
    let yaml = indoc! {"
        base: &base
          a: 1
        derived:
          <<: *base
          b: 2
    "};
    let doc = single(yaml);
    assert!(!doc.root_node().is_merged());
    assert!(!doc[value_of(&doc, "base")].is_merged());

    let derived = value_of(&doc, "derived");
    assert!(doc[derived].is_merged());
    let (merge_key, merged_from) = doc[derived].pairs().unwrap()[0];
    assert_eq!(doc[merge_key].tag, Tag::MERGE);
    assert_eq!(merged_from, value_of(&doc, "base"));
    // the composer leaves the merge to consumers
    assert_eq!(doc[derived].pairs().unwrap().len(), 2);
}

#[test]
fn mapping_order_follows_the_source() {
    let doc = single("c: 1\na: 2\nb: 3\n");
    let keys: Vec<_> = doc
        .root_node()
        .pairs()
        .unwrap()
        .iter()
        .map(|(k, _)| doc[*k].as_scalar().unwrap())
        .collect();
    assert_eq!(keys, vec!["c", "a", "b"]);
}

#[test]
fn complex_keys_are_nodes() {
    let doc = single("? [a, b]\n: pair\n");
    let (key, value) = doc.root_node().pairs().unwrap()[0];
    assert_eq!(doc[key].kind(), NodeKind::Sequence);
    assert_eq!(doc[value].as_scalar(), Some("pair"));
}

#[test]
fn block_and_flow_styles() {
    let doc = single("block:\n  - 1\nflow: {a: 1}\n");
    assert_eq!(doc.root_node().flow_style(), Some(FlowStyle::Block));
    assert_eq!(doc[value_of(&doc, "block")].flow_style(), Some(FlowStyle::Block));
    assert_eq!(doc[value_of(&doc, "flow")].flow_style(), Some(FlowStyle::Flow));

    for yaml in ["[a, b]: 1\n", "{a: 1}: x\n", "&m [k]: v\n"] {
        let doc = single(yaml);
        assert_eq!(doc.root_node().kind(), NodeKind::Mapping, "{yaml}");
        assert_eq!(doc.root_node().flow_style(), Some(FlowStyle::Block), "{yaml}");
        let (key, _) = doc.root_node().pairs().unwrap()[0];
        assert_eq!(doc[key].flow_style(), Some(FlowStyle::Flow), "{yaml}");
    }
}

#[test]
fn byte_ranges_slice_the_source() {
    let yaml = "city: Zürich\nzip: 8001\nflow: [a, b]\n";
    let doc = single(yaml);

    let city = &doc[value_of(&doc, "city")];
    assert_eq!(city.start.index(), Some(6));
    assert_eq!(city.start.byte_offset(), Some(6));
    assert_eq!(&yaml[city.byte_range().unwrap()], "Zürich");

    // "ü" is two bytes, so the byte offset runs one ahead of the character index.
    let zip = &doc[value_of(&doc, "zip")];
    assert_eq!(zip.start.index(), Some(18));
    assert_eq!(zip.start.byte_offset(), Some(19));
    assert_eq!(&yaml[zip.byte_range().unwrap()], "8001");

    let flow = &doc[value_of(&doc, "flow")];
    assert_eq!(&yaml[flow.byte_range().unwrap()], "[a, b]");
}

#[test]
fn marks_point_into_the_source() {
    let doc = single("first: 1\nsecond:\n  - x\n");
    let second = &doc[value_of(&doc, "second")];
    assert_eq!(second.start.line(), 3);
    assert_eq!(doc.root_node().start.line(), 1);
}

#[test]
fn empty_stream_has_no_document() {
    assert!(compose_str("").unwrap().is_none());
    assert!(compose_all_str("").unwrap().is_empty());
}

#[test]
fn multiple_documents_are_composed_in_order() {
    let yaml = "--- a\n--- b\n--- c\n";
    let docs = compose_all_str(yaml).unwrap();
    let values: Vec<_> = docs
        .iter()
        .map(|doc| doc.root_node().as_scalar().unwrap().to_string())
        .collect();
    assert_eq!(values, vec!["a", "b", "c"]);
    assert!(docs.iter().all(Document::explicit_start));
}

#[test]
fn single_document_api_rejects_two_documents() {
    let yaml = "name: A\n---\nname: B\n";
    match compose_str(yaml) {
        Err(Error::MultipleDocuments { first, second }) => {
            assert_eq!(first.line(), 1);
            assert_eq!(second.line(), 2);
        }
        other => panic!("expected MultipleDocuments, got {other:?}"),
    }
}

#[test]
fn anchors_are_scoped_to_their_document() {
    let yaml = indoc! {"
        ---
        item: &x first
        ---
        item: &x second
        copy: *x
    "};
    let docs = compose_all_str(yaml).unwrap();
    assert_eq!(docs.len(), 2);
    let second = &docs[1];
    let copy = value_of(second, "copy");
    assert_eq!(copy, value_of(second, "item"));
    assert_eq!(second[copy].as_scalar(), Some("second"));
}

#[test]
fn scan_errors_are_reported() {
    let err = compose_str("a: [1, 2\n").unwrap_err();
    assert!(matches!(err, Error::Scan { .. }), "{err:?}");
    assert!(err.location().is_some());
}

#[test]
fn budget_limits_nesting() {
    let options = saphyr_composer::options! {
        budget: saphyr_composer::budget! { max_depth: 3 },
    };
    assert!(compose_str_with_options("[[[1]]]", options.clone()).is_ok());
    let err = compose_str_with_options("[[[[1]]]]", options).unwrap_err();
    assert!(matches!(err, Error::Budget { .. }), "{err:?}");
}

#[test]
fn budget_limits_aliases() {
    let options = saphyr_composer::options! {
        budget: saphyr_composer::budget! { max_aliases: 2 },
    };
    let err = compose_str_with_options("- &a x\n- *a\n- *a\n- *a\n", options).unwrap_err();
    match err {
        Error::Budget { breach, location } => {
            assert_eq!(breach, saphyr_composer::BudgetBreach::Aliases { aliases: 3 });
            assert_eq!(location.line(), 4);
        }
        other => panic!("expected a budget error, got {other:?}"),
    }
}

#[test]
fn budget_limits_documents() {
    let options = saphyr_composer::options! {
        budget: saphyr_composer::budget! { max_documents: 1 },
    };
    let resolver = CoreResolver::from_options(&options);
    let mut composer = Composer::with_options(LiveEvents::new("--- 1\n--- 2\n"), resolver, options);
    assert!(composer.next_document().unwrap().is_some());
    assert!(matches!(composer.next_document(), Err(Error::Budget { .. })));
}

#[test]
fn strict_booleans_option_reaches_the_resolver() {
    let lenient = single("flag: yes\n");
    assert_eq!(lenient[value_of(&lenient, "flag")].tag, Tag::BOOL);

    let options = saphyr_composer::options! { strict_booleans: true };
    let strict = compose_str_with_options("flag: yes\n", options).unwrap().unwrap();
    assert_eq!(strict[value_of(&strict, "flag")].tag, Tag::STR);
}
