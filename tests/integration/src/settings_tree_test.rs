//! End-to-end resolution over a settings directory fixture

use std::path::PathBuf;

use corpus_core::CorpusRegistry;
use corpus_store::FsDocumentStore;
use pretty_assertions::assert_eq;
use serde_json::json;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn fixture_store() -> FsDocumentStore {
    let settings = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures/settings");
    FsDocumentStore::new(settings)
}

fn build_registry() -> CorpusRegistry {
    init_tracing();
    CorpusRegistry::build(&fixture_store()).expect("Fixture settings tree should build")
}

#[test]
fn discovers_every_corpus_regardless_of_format() {
    let registry = build_registry();

    assert_eq!(registry.corpus_ids(), ["fragelistor", "sagas", "vivill"]);
    assert!(registry.is_corpus("sagas"));
    assert!(!registry.is_corpus("default"), "templates are not corpora");
}

#[test]
fn three_level_inheritance_merges_oldest_first() {
    let registry = build_registry();
    let vivill = registry.config("vivill").expect("vivill is configured");
    let analyze = vivill.analyze_config.as_ref().unwrap();

    // word_attributes: template's pos before the corpus's own lemma.
    assert_eq!(
        analyze.word_attributes.as_ref().unwrap(),
        &vec![json!({"id": "pos"}), json!({"id": "lemma"})]
    );

    // text_attributes: grandparent, parent, child declaration order.
    let declared: Vec<&String> = analyze
        .text_attributes
        .as_ref()
        .unwrap()
        .iter()
        .flat_map(|entry| entry.keys())
        .collect();
    assert_eq!(declared, ["year", "author", "title"]);

    // Top-level keys from every level survive, child values winning.
    assert_eq!(vivill.rest["title"], json!("Valmanifest"));
    assert_eq!(vivill.rest["lang"], json!("swe"));
    assert_eq!(vivill.rest["corpus_description"]["eng"], json!("Default corpus"));
}

#[test]
fn per_corpus_text_attributes_strip_title() {
    let registry = build_registry();
    let by_corpora = registry.text_attributes_by_corpora();

    let vivill = &by_corpora["vivill"];
    assert_eq!(vivill.keys().collect::<Vec<_>>(), ["year", "author"]);
    assert_eq!(vivill["author"].name, Some("author".to_string()));

    // A corpus without text attributes is skipped, not failed.
    assert!(registry.is_corpus("fragelistor"));
    assert!(!by_corpora.contains_key("fragelistor"));
}

#[test]
fn global_aggregate_spans_corpora_and_injects_year_r() {
    let registry = build_registry();
    let aggregate = registry.global_text_attributes();

    assert!(aggregate.contains_key("author"));
    assert!(aggregate.contains_key("year"));
    assert!(!aggregate.contains_key("title"));

    let year_r = &aggregate["yearR"];
    assert_eq!(year_r.name, Some("yearR".to_string()));
    let translation = year_r.translation.as_ref().unwrap();
    assert_eq!(translation["swe"], "År");
    assert_eq!(translation["eng"], "Year");
}

#[test]
fn catalog_flags_are_served_from_the_registry() {
    let registry = build_registry();

    assert!(registry.is_ranked("pos").unwrap());
    assert!(!registry.is_ranked("lemma").unwrap());
    assert!(registry.is_ranked("msd").is_err());

    assert!(registry.is_object(&["text", "year_ref"]));
    assert!(!registry.is_object(&["text", "author_ref"]));

    assert!(registry.text_attribute("date").is_some());
    assert_eq!(registry.type_info()["date"]["kind"], json!("range"));
    assert_eq!(
        registry.struct_elem("paragraph"),
        Some(&json!({"nested": true}))
    );
}

#[test]
fn protected_flags_cover_every_corpus() {
    let registry = build_registry();
    let flags = registry.protected_flags();

    assert_eq!(flags["sagas"], true);
    assert_eq!(flags["vivill"], false);
    assert_eq!(flags["fragelistor"], false, "absent flag defaults to false");
}

#[test]
fn modes_load_in_both_identification_forms() {
    let registry = build_registry();
    let modes = registry.modes();

    assert_eq!(modes.keys().collect::<Vec<_>>(), ["default", "parallel"]);
    assert_eq!(modes["default"]["order"], json!(1));
    assert_eq!(modes["parallel"], json!({"order": 2}));
}

#[test]
fn resolution_is_deterministic_across_builds() {
    let first = build_registry();
    let second = build_registry();

    assert_eq!(first.corpus_ids(), second.corpus_ids());
    for id in first.corpus_ids() {
        assert_eq!(first.config(id), second.config(id));
    }
    assert_eq!(
        first.global_text_attributes().keys().collect::<Vec<_>>(),
        second.global_text_attributes().keys().collect::<Vec<_>>()
    );
}
