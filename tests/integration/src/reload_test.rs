//! Snapshot-swap reload against a mutable settings directory

use std::fs;
use std::path::Path;

use corpus_core::SharedRegistry;
use corpus_store::FsDocumentStore;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).expect("Failed to create fixture dir");
    fs::write(path, content).expect("Failed to write fixture file");
}

fn minimal_settings() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp dir");
    write(temp.path(), "attributes/types.yaml", "{}\n");
    write(temp.path(), "attributes/struct_elems.yaml", "{}\n");
    write(temp.path(), "corpora/first.yaml", "title: First corpus\n");
    temp
}

#[test]
fn reload_publishes_new_corpora_without_disturbing_held_snapshots() {
    let settings = minimal_settings();
    let store = FsDocumentStore::new(settings.path());

    let shared = SharedRegistry::build(&store).expect("Initial build should succeed");
    let before = shared.get();
    assert!(before.is_corpus("first"));
    assert!(!before.is_corpus("second"));

    write(
        settings.path(),
        "corpora/second.yaml",
        "title: Second corpus\nprotected: true\n",
    );
    shared.reload(&store).expect("Reload should succeed");

    // The snapshot taken before the reload is frozen.
    assert!(!before.is_corpus("second"));

    let after = shared.get();
    assert!(after.is_corpus("first"));
    assert!(after.is_corpus("second"));
    assert!(after.is_protected("second"));
}

#[test]
fn broken_edit_keeps_the_old_snapshot_published() {
    let settings = minimal_settings();
    let store = FsDocumentStore::new(settings.path());

    let shared = SharedRegistry::build(&store).expect("Initial build should succeed");

    // A corpus pointing at a template that does not exist cannot build.
    write(settings.path(), "corpora/broken.yaml", "parents: [ghost]\n");
    assert!(shared.reload(&store).is_err());

    let current = shared.get();
    assert!(current.is_corpus("first"));
    assert!(!current.is_corpus("broken"));
}
