//! Collection Store Integration Tests
//!
//! Ordering, removal and corrupt-data behaviour of persisted collections,
//! against both the in-memory and the file backend.

use std::sync::Arc;

use skoolify::domain::{ContentKind, FormInput, ItemId, Payload, SavedItem};
use skoolify::store::{CollectionStore, FileStore, KeyValueStore, MemoryStore};
use tempfile::TempDir;

fn plan(topic: &str) -> SavedItem {
    SavedItem::new(
        Payload::StudyPlan(format!("## {}", topic)),
        &FormInput::new(topic, "Grade 9"),
    )
}

#[test]
fn test_load_is_most_recent_first() {
    let store = CollectionStore::new(Arc::new(MemoryStore::new()));
    let key = ContentKind::StudyPlan.storage_key();

    let mut expected = Vec::new();
    for topic in ["Algebra", "Geometry", "Calculus", "Statistics"] {
        let item = plan(topic);
        expected.insert(0, item.id);
        store.append(key, item).unwrap();
    }

    let ids: Vec<ItemId> = store.load(key).iter().map(|item| item.id).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_remove_then_load_never_returns_item() {
    let store = CollectionStore::new(Arc::new(MemoryStore::new()));
    let key = ContentKind::StudyPlan.storage_key();

    let keep = plan("Keep");
    let drop = plan("Drop");
    store.append(key, keep.clone()).unwrap();
    store.append(key, drop.clone()).unwrap();

    let remaining = store.remove(key, &drop.id).unwrap();
    assert_eq!(remaining.len(), 1);

    let loaded = store.load(key);
    assert!(loaded.iter().all(|item| item.id != drop.id));
    assert_eq!(loaded[0].id, keep.id);

    // Removing again is a no-op
    assert_eq!(store.remove(key, &drop.id).unwrap().len(), 1);
}

#[test]
fn test_corrupt_data_loads_empty() {
    let backend = Arc::new(MemoryStore::new());
    let key = ContentKind::Note.storage_key();
    let store = CollectionStore::new(backend.clone());

    for garbage in ["", "not json", "{\"id\": 1}", "[{\"topic\": 5}]"] {
        backend.set(key, garbage).unwrap();
        assert!(store.load(key).is_empty(), "garbage {:?} should load empty", garbage);
    }
}

#[test]
fn test_collections_are_isolated_by_key() {
    let store = CollectionStore::new(Arc::new(MemoryStore::new()));

    store.append(ContentKind::Note.storage_key(), plan("x")).unwrap();

    assert_eq!(store.load(ContentKind::Note.storage_key()).len(), 1);
    assert!(store.load(ContentKind::QuizResult.storage_key()).is_empty());
}

#[test]
fn test_file_backend_persists_across_instances() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("store");
    let key = ContentKind::VideoCollection.storage_key();

    let item = SavedItem::new(
        Payload::VideoCollection(Vec::new()),
        &FormInput::new("Volcanoes", "Grade 6"),
    );

    CollectionStore::new(Arc::new(FileStore::new(&dir)))
        .append(key, item.clone())
        .unwrap();

    let reopened = CollectionStore::new(Arc::new(FileStore::new(&dir)));
    assert_eq!(reopened.load(key), vec![item]);
    assert!(dir.join(format!("{}.json", key)).exists());
}
