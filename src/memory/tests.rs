//! Tests for the memory store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use super::*;
use crate::embedding::{Embedder, FnEmbedder, TaskType};
use crate::errors::Error;
use crate::memory_types::RecallOptions;

const DIMS: usize = 8;

/// Keyword axes of the test embedder; the last axis is a constant bias so no
/// text embeds to the zero vector.
const TOPICS: [&str; 7] = ["coffee", "tea", "server", "backup", "garden", "dog", "music"];

fn topic_embedding(text: &str) -> Vec<f32> {
    let text = text.to_lowercase();
    let mut vec = vec![0.0f32; DIMS];
    for (axis, topic) in TOPICS.iter().enumerate() {
        vec[axis] = text.matches(topic).count() as f32;
    }
    vec[DIMS - 1] = 0.1;
    vec
}

fn create_test_store() -> (TempDir, MemoryStore) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("test.db");
    let embedder = FnEmbedder::new(DIMS, |text: &str, _: TaskType| Ok(topic_embedding(text)));
    let store = MemoryStore::open(&path, embedder).unwrap();
    (dir, store)
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|t| t.to_string()).collect()
}

#[test]
fn test_remember_round_trip() {
    let (_dir, store) = create_test_store();

    let stored = store
        .remember("u1", "Backup runs nightly at 02:00", &tags(&["ops", "backup", "ops"]))
        .unwrap();
    assert!(uuid::Uuid::parse_str(&stored.id).is_ok());
    assert_eq!(stored.created_at, stored.updated_at);

    let fetched = store.get("u1", &stored.id).unwrap().unwrap();
    assert_eq!(fetched, stored);
    assert_eq!(fetched.tags, vec!["ops", "backup", "ops"]);

    let listed = store.list_memories("u1", None, 100, 0).unwrap();
    assert_eq!(listed, vec![stored]);
}

#[test]
fn test_remember_rejects_empty_content() {
    let (_dir, store) = create_test_store();

    assert!(matches!(store.remember("u1", "", &[]), Err(Error::EmptyInput)));
    assert!(matches!(store.remember("u1", "  \n\t", &[]), Err(Error::EmptyInput)));
    assert_eq!(store.get_memory_count("u1").unwrap(), 0);
}

#[test]
fn test_remember_rejects_empty_user() {
    let (_dir, store) = create_test_store();

    assert!(matches!(
        store.remember("", "coffee", &[]),
        Err(Error::InvalidInput(_))
    ));
    assert!(store.get_all_users().unwrap().is_empty());
}

#[test]
fn test_failed_embedding_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let embedder = FnEmbedder::new(DIMS, |_: &str, _: TaskType| {
        Err(Error::Embedding("provider offline".to_string()))
    });
    let store = MemoryStore::open(&dir.path().join("test.db"), embedder).unwrap();

    let err = store.remember("u1", "Likes tea", &[]).unwrap_err();
    assert!(err.is_embedding_failure());
    assert_eq!(store.get_memory_count("u1").unwrap(), 0);

    let err = store.recall("u1", "tea", None, None).unwrap_err();
    assert!(err.is_embedding_failure());
}

#[test]
fn test_wrong_dimension_embedding_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let embedder = FnEmbedder::new(DIMS, |_: &str, _: TaskType| Ok(vec![1.0f32; DIMS - 1]));
    let store = MemoryStore::open(&dir.path().join("test.db"), embedder).unwrap();

    let err = store.remember("u1", "Likes tea", &[]).unwrap_err();
    assert!(matches!(err, Error::Embedding(_)));
    assert!(err.is_embedding_failure());
    assert_eq!(store.get_memory_count("u1").unwrap(), 0);

    let err = store.recall("u1", "tea", None, None).unwrap_err();
    assert!(err.is_embedding_failure());
}

#[test]
fn test_task_types_reach_embedder() {
    let seen: Arc<Mutex<Vec<TaskType>>> = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&seen);
    let embedder = FnEmbedder::new(DIMS, move |text: &str, task: TaskType| {
        recorder.lock().unwrap().push(task);
        Ok(topic_embedding(text))
    });
    let dir = TempDir::new().unwrap();
    let store = MemoryStore::open(&dir.path().join("test.db"), embedder).unwrap();

    store.remember("u1", "Prefers green tea", &[]).unwrap();
    store.recall("u1", "tea", None, None).unwrap();
    store.search_by_text("u1", "tea", 10).unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![TaskType::Document, TaskType::Query]);
}

#[test]
fn test_user_isolation() {
    let (_dir, store) = create_test_store();

    let private = store.remember("u1", "Likes coffee", &tags(&["a"])).unwrap();
    store.remember("u2", "Likes tea", &tags(&["a"])).unwrap();

    assert!(store.get("u2", &private.id).unwrap().is_none());
    assert!(
        store
            .recall("u2", "coffee", None, Some(-1.0))
            .unwrap()
            .iter()
            .all(|hit| hit.memory.user_id == "u2")
    );
    assert!(
        store
            .list_memories("u2", Some(tags(&["a"]).as_slice()), 100, 0)
            .unwrap()
            .iter()
            .all(|m| m.user_id == "u2")
    );
    assert!(store.search_by_text("u2", "coffee", 10).unwrap().is_empty());
    assert_eq!(store.get_memory_count("u2").unwrap(), 1);

    // A delete naming another user's memory is a no-op
    assert!(!store.forget("u2", &private.id).unwrap());
    assert!(!store.update_memory_tags("u2", &private.id, &tags(&["x"])).unwrap());
    assert_eq!(store.get("u1", &private.id).unwrap().unwrap().tags, vec!["a"]);
}

#[test]
fn test_recall_ordering_threshold_and_limit() {
    let (_dir, store) = create_test_store();

    store.remember("u1", "coffee coffee server", &[]).unwrap();
    store.remember("u1", "coffee", &[]).unwrap();
    store.remember("u1", "coffee and tea", &[]).unwrap();
    store.remember("u1", "garden party", &[]).unwrap();
    store.remember("u1", "coffee server backup", &[]).unwrap();

    let hits = store.recall("u1", "coffee", Some(3), Some(0.3)).unwrap();
    assert!(hits.len() <= 3);
    assert!(!hits.is_empty());
    assert_eq!(hits[0].memory.content, "coffee");
    for pair in hits.windows(2) {
        assert!(pair[0].similarity >= pair[1].similarity);
    }
    assert!(hits.iter().all(|hit| hit.similarity >= 0.3));
    assert!(hits.iter().all(|hit| hit.memory.content != "garden party"));
}

#[test]
fn test_recall_uses_store_defaults() {
    let (_dir, store) = create_test_store();
    for i in 0..8 {
        store.remember("u1", &format!("coffee note {i}"), &[]).unwrap();
    }
    store.remember("u1", "garden", &[]).unwrap();

    // Default limit is 5, default threshold 0.3 excludes "garden"
    let hits = store.recall("u1", "coffee", None, None).unwrap();
    assert_eq!(hits.len(), 5);

    let store = store.with_recall_options(RecallOptions {
        limit: 2,
        ..RecallOptions::default()
    });
    assert_eq!(store.recall("u1", "coffee", None, None).unwrap().len(), 2);
    assert_eq!(store.recall("u1", "coffee", Some(7), None).unwrap().len(), 7);
}

#[test]
fn test_recall_ties_keep_insertion_order() {
    let (_dir, store) = create_test_store();
    let first = store.remember("u1", "tea", &[]).unwrap();
    let second = store.remember("u1", "Tea", &[]).unwrap();
    let third = store.remember("u1", "TEA", &[]).unwrap();

    let ids: Vec<String> = store
        .recall("u1", "tea", None, None)
        .unwrap()
        .into_iter()
        .map(|hit| hit.memory.id)
        .collect();
    assert_eq!(ids, vec![first.id, second.id, third.id]);
}

#[test]
fn test_recall_validates_before_embedding() {
    let calls = Arc::new(Mutex::new(0usize));
    let counter = Arc::clone(&calls);
    let embedder = FnEmbedder::new(DIMS, move |text: &str, _: TaskType| {
        *counter.lock().unwrap() += 1;
        Ok(topic_embedding(text))
    });
    let dir = TempDir::new().unwrap();
    let store = MemoryStore::open(&dir.path().join("test.db"), embedder).unwrap();

    assert!(matches!(
        store.recall("u1", "tea", Some(0), None),
        Err(Error::Database(crate::sqlite::Error::InvalidLimit(_)))
    ));
    assert!(matches!(
        store.recall("u1", "tea", Some(10_001), None),
        Err(Error::Database(crate::sqlite::Error::InvalidLimit(_)))
    ));
    assert!(matches!(
        store.recall("u1", "tea", None, Some(1.5)),
        Err(Error::InvalidInput(_))
    ));
    assert!(matches!(
        store.recall("u1", "tea", None, Some(f64::NAN)),
        Err(Error::InvalidInput(_))
    ));
    assert!(matches!(store.recall("u1", "   ", None, None), Err(Error::EmptyInput)));

    assert_eq!(*calls.lock().unwrap(), 0);
}

#[test]
fn test_recall_scan_limit_prefers_recent() {
    let (_dir, store) = create_test_store();
    let store = store.with_recall_options(RecallOptions {
        scan_limit: 2,
        ..RecallOptions::default()
    });

    store.remember("u1", "coffee day 1", &[]).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(2));
    store.remember("u1", "coffee day 2", &[]).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(2));
    store.remember("u1", "coffee day 3", &[]).unwrap();

    let contents: Vec<String> = store
        .recall("u1", "coffee", Some(10), None)
        .unwrap()
        .into_iter()
        .map(|hit| hit.memory.content)
        .collect();
    assert_eq!(contents, vec!["coffee day 2", "coffee day 3"]);

    // Older memories stay reachable without embeddings
    assert_eq!(store.search_by_text("u1", "day 1", 10).unwrap().len(), 1);
}

#[test]
fn test_recall_skips_rows_without_embedding() {
    let (_dir, store) = create_test_store();
    let migrated = "2026-01-01T00:00:00.000000Z";
    store
        .db
        .insert_with_time("u1", "coffee without vector", &[], None, migrated, migrated)
        .unwrap();
    let embedded = store.remember("u1", "coffee with vector", &[]).unwrap();

    let hits = store.recall("u1", "coffee", None, Some(-1.0)).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].memory.id, embedded.id);
    assert_eq!(store.get_memory_count("u1").unwrap(), 2);
}

#[test]
fn test_forget_is_idempotent() {
    let (_dir, store) = create_test_store();
    let memory = store.remember("u1", "Dog is called Rex", &[]).unwrap();

    assert!(store.forget("u1", &memory.id).unwrap());
    assert!(!store.forget("u1", &memory.id).unwrap());
    assert!(store.get("u1", &memory.id).unwrap().is_none());
}

#[test]
fn test_forget_all_returns_count() {
    let (_dir, store) = create_test_store();
    for i in 0..4 {
        store.remember("u1", &format!("note {i}"), &[]).unwrap();
    }
    store.remember("u2", "keep me", &[]).unwrap();

    assert_eq!(store.forget_all("u1").unwrap(), 4);
    assert_eq!(store.get_memory_count("u1").unwrap(), 0);
    assert_eq!(store.forget_all("u1").unwrap(), 0);
    assert_eq!(store.get_memory_count("u2").unwrap(), 1);
}

#[test]
fn test_list_tag_filter_any_match() {
    let (_dir, store) = create_test_store();
    store.remember("u1", "only c", &tags(&["c"])).unwrap();
    let a_and_c = store.remember("u1", "a and c", &tags(&["a", "c"])).unwrap();
    let b = store.remember("u1", "just b", &tags(&["b"])).unwrap();
    store.remember("u1", "untagged", &[]).unwrap();

    let ids: Vec<String> = store
        .list_memories("u1", Some(tags(&["a", "b"]).as_slice()), 100, 0)
        .unwrap()
        .into_iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&a_and_c.id));
    assert!(ids.contains(&b.id));
}

#[test]
fn test_list_filter_before_pagination() {
    let (_dir, store) = create_test_store();
    for i in 0..6 {
        let tag = if i % 2 == 0 { "even" } else { "odd" };
        store.remember("u1", &format!("item {i}"), &tags(&[tag])).unwrap();
    }

    let even = tags(&["even"]);
    let first = store.list_memories("u1", Some(even.as_slice()), 2, 0).unwrap();
    let second = store.list_memories("u1", Some(even.as_slice()), 2, 2).unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(second.len(), 1);
    assert!(first.iter().chain(&second).all(|m| m.tags == even));
}

#[test]
fn test_list_invalid_limit() {
    let (_dir, store) = create_test_store();
    assert!(store.list_memories("u1", None, 0, 0).is_err());
    assert!(store.list_memories("u1", None, 10_001, 0).is_err());
}

#[test]
fn test_list_offset_past_end() {
    let (_dir, store) = create_test_store();
    store.remember("u1", "Garden hose in the shed", &[]).unwrap();

    assert!(store.list_memories("u1", None, 10, 1).unwrap().is_empty());
    assert!(store.list_memories("u1", None, 10, usize::MAX).unwrap().is_empty());
}

#[test]
fn test_update_tags_keeps_embedding() {
    let (_dir, store) = create_test_store();
    let memory = store.remember("u1", "Music server on port 8096", &tags(&["old"])).unwrap();
    let before = store.recall("u1", "music", None, None).unwrap();

    std::thread::sleep(std::time::Duration::from_millis(5));
    assert!(store.update_memory_tags("u1", &memory.id, &tags(&["media", "server"])).unwrap());

    let updated = store.get("u1", &memory.id).unwrap().unwrap();
    assert_eq!(updated.tags, vec!["media", "server"]);
    assert_eq!(updated.created_at, memory.created_at);
    assert!(updated.updated_at > memory.updated_at);

    let after = store.recall("u1", "music", None, None).unwrap();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].similarity, before[0].similarity);

    assert!(!store.update_memory_tags("u1", "missing-id", &[]).unwrap());
}

#[test]
fn test_concurrent_tag_updates_last_write_wins() {
    let (_dir, store) = create_test_store();
    let memory = store.remember("u1", "Backup server in the closet", &tags(&["start"])).unwrap();
    let writes: Vec<Vec<String>> = (0..8)
        .map(|i| vec![format!("writer-{i}"), format!("batch-{i}")])
        .collect();

    std::thread::sleep(std::time::Duration::from_millis(2));
    std::thread::scope(|scope| {
        for write in &writes {
            let store = &store;
            let id = memory.id.as_str();
            scope.spawn(move || {
                for _ in 0..10 {
                    assert!(store.update_memory_tags("u1", id, write).unwrap());
                }
            });
        }
    });

    let settled = store.get("u1", &memory.id).unwrap().unwrap();
    assert!(writes.contains(&settled.tags), "tags {:?} mix writes", settled.tags);
    assert!(settled.updated_at > memory.updated_at);
    assert_eq!(settled.created_at, memory.created_at);

    std::thread::sleep(std::time::Duration::from_millis(2));
    assert!(store.update_memory_tags("u1", &memory.id, &tags(&["final"])).unwrap());
    let last = store.get("u1", &memory.id).unwrap().unwrap();
    assert_eq!(last.tags, vec!["final"]);
    assert!(last.updated_at > settled.updated_at);
}

#[test]
fn test_search_by_text() {
    let (_dir, store) = create_test_store();
    store.remember("u1", "Backup drive is /dev/sdb", &[]).unwrap();
    store.remember("u1", "Router admin at 192.168.1.1", &[]).unwrap();

    let results = store.search_by_text("u1", "BACKUP", 10).unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].content.starts_with("Backup"));

    assert!(matches!(store.search_by_text("u1", "", 10), Err(Error::EmptyInput)));
    assert!(store.search_by_text("u1", "backup", 0).is_err());
}

#[test]
fn test_get_all_users_sorted() {
    let (_dir, store) = create_test_store();
    store.remember("zoe", "a", &[]).unwrap();
    store.remember("adam", "b", &[]).unwrap();
    store.remember("zoe", "c", &[]).unwrap();

    assert_eq!(store.get_all_users().unwrap(), vec!["adam", "zoe"]);
}

#[test]
fn test_coffee_scenario() {
    let (_dir, store) = create_test_store();

    let stored = store
        .remember("u1", "Likes dark roast coffee", &tags(&["preference"]))
        .unwrap();
    assert_eq!(stored.tags.len(), 1);

    let hits = store.recall("u1", "What coffee do I like?", Some(5), Some(0.3)).unwrap();
    assert_eq!(hits[0].memory.id, stored.id);
    assert!(hits[0].similarity > 0.3);

    let found = store.search_by_text("u1", "coffee", 10).unwrap();
    assert_eq!(found[0].id, stored.id);

    assert_eq!(store.forget_all("u1").unwrap(), 1);
    assert_eq!(store.get_memory_count("u1").unwrap(), 0);
}

#[test]
fn test_user_scope() {
    let (_dir, store) = create_test_store();
    let alice = store.for_user("alice");
    let bob = store.for_user("bob");

    let memory = alice.remember("Dog walker comes at noon", &tags(&["dog"])).unwrap();
    assert_eq!(memory.user_id, "alice");
    assert_eq!(alice.get_memory_count().unwrap(), 1);
    assert_eq!(bob.get_memory_count().unwrap(), 0);
    assert!(bob.get(&memory.id).unwrap().is_none());
    assert_eq!(alice.recall("dog", None, None).unwrap().len(), 1);
    assert_eq!(alice.search_by_text("noon", 10).unwrap().len(), 1);
    assert!(alice.update_memory_tags(&memory.id, &tags(&["pets"])).unwrap());
    assert_eq!(alice.list_memories(Some(tags(&["pets"]).as_slice()), 10, 0).unwrap().len(), 1);
    assert!(!bob.forget(&memory.id).unwrap());
    assert!(alice.forget(&memory.id).unwrap());
    assert_eq!(alice.forget_all().unwrap(), 0);
}

#[test]
fn test_concurrent_writers() {
    let (_dir, store) = create_test_store();

    std::thread::scope(|scope| {
        for worker in 0..4 {
            let store = &store;
            scope.spawn(move || {
                for i in 0..25 {
                    store
                        .remember("u1", &format!("worker {worker} note {i}"), &[])
                        .unwrap();
                }
            });
        }
    });

    assert_eq!(store.get_memory_count("u1").unwrap(), 100);
    let listed = store.list_memories("u1", None, 1000, 0).unwrap();
    let mut ids: Vec<&str> = listed.iter().map(|m| m.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 100);
}

#[test]
fn test_open_rejects_parent_dir_components() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/../escape.db");
    let embedder = FnEmbedder::new(DIMS, |text: &str, _: TaskType| Ok(topic_embedding(text)));

    assert!(matches!(
        MemoryStore::open(&path, embedder),
        Err(Error::Config(_))
    ));
}

#[test]
fn test_open_creates_parent_and_reopens() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a/b/memories.db");
    let make = || FnEmbedder::new(DIMS, |text: &str, _: TaskType| Ok(topic_embedding(text)));

    let id = {
        let store = MemoryStore::open(&path, make()).unwrap();
        assert_eq!(store.dimensions(), DIMS);
        store.remember("u1", "persisted", &[]).unwrap().id
    };

    let store = MemoryStore::open(&path, make()).unwrap();
    assert_eq!(store.get("u1", &id).unwrap().unwrap().content, "persisted");
}

#[test]
fn test_store_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<MemoryStore>();
}

fn failing_factory(
    calls: Arc<AtomicUsize>,
) -> impl Fn() -> Result<Box<dyn Embedder>, Error> + Send + Sync + 'static {
    move || {
        calls.fetch_add(1, Ordering::SeqCst);
        Err(Error::Embedding("model unavailable offline".to_string()))
    }
}

#[test]
fn test_lazy_store_serves_storage_without_embedder() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("test.db");
    let (kept, dropped) = {
        let embedder = FnEmbedder::new(DIMS, |text: &str, _: TaskType| Ok(topic_embedding(text)));
        let store = MemoryStore::open(&path, embedder).unwrap();
        let kept = store.remember("u1", "Backup job runs nightly", &tags(&["ops"])).unwrap();
        let dropped = store.remember("u1", "Old coffee grinder", &[]).unwrap();
        (kept, dropped)
    };

    let calls = Arc::new(AtomicUsize::new(0));
    let store = MemoryStore::open_lazy(&path, DIMS, failing_factory(Arc::clone(&calls))).unwrap();

    assert_eq!(store.list_memories("u1", None, 10, 0).unwrap().len(), 2);
    assert_eq!(store.search_by_text("u1", "nightly", 10).unwrap()[0].id, kept.id);
    assert_eq!(store.get("u1", &kept.id).unwrap().unwrap().content, kept.content);
    assert!(store.update_memory_tags("u1", &kept.id, &tags(&["cron"])).unwrap());
    assert!(store.forget("u1", &dropped.id).unwrap());
    assert_eq!(store.get_memory_count("u1").unwrap(), 1);
    assert_eq!(store.get_all_users().unwrap(), vec!["u1"]);
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let err = store.remember("u1", "New note", &[]).unwrap_err();
    assert!(err.is_embedding_failure());
    let err = store.recall("u1", "backup", None, None).unwrap_err();
    assert!(err.is_embedding_failure());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(store.get_memory_count("u1").unwrap(), 1);

    assert_eq!(store.forget_all("u1").unwrap(), 1);
}

#[test]
fn test_lazy_store_builds_embedder_once() {
    let dir = TempDir::new().unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let store = MemoryStore::open_lazy(&dir.path().join("test.db"), DIMS, move || {
        counter.fetch_add(1, Ordering::SeqCst);
        let embedder = FnEmbedder::new(DIMS, |text: &str, _: TaskType| Ok(topic_embedding(text)));
        Ok(Box::new(embedder) as Box<dyn Embedder>)
    })
    .unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    std::thread::scope(|scope| {
        for worker in 0..4 {
            let store = &store;
            scope.spawn(move || {
                store.remember("u1", &format!("tea note {worker}"), &[]).unwrap();
            });
        }
    });
    let hits = store.recall("u1", "tea", Some(10), None).unwrap();

    assert_eq!(hits.len(), 4);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_lazy_store_rejects_embedder_of_other_dimension() {
    let dir = TempDir::new().unwrap();
    let store = MemoryStore::open_lazy(&dir.path().join("test.db"), DIMS, || {
        let embedder = FnEmbedder::new(DIMS + 1, |_: &str, _: TaskType| Ok(vec![1.0f32; DIMS + 1]));
        Ok(Box::new(embedder) as Box<dyn Embedder>)
    })
    .unwrap();

    assert!(matches!(store.remember("u1", "tea", &[]), Err(Error::Config(_))));
    assert_eq!(store.get_memory_count("u1").unwrap(), 0);
}

#[test]
fn test_from_config_opens_without_api_key() {
    use crate::config::{Config, EmbeddingProvider};

    let dir = TempDir::new().unwrap();
    let config = Config {
        database_path: dir.path().join("memories.db"),
        embedding_provider: EmbeddingProvider::Gemini,
        google_api_key: None,
        ..Config::default()
    };

    let store = MemoryStore::from_config(&config).unwrap();
    assert_eq!(store.dimensions(), config.gemini_dimensions);
    assert_eq!(store.get_memory_count("u1").unwrap(), 0);
    assert!(store.list_memories("u1", None, 10, 0).unwrap().is_empty());
    assert!(!store.forget("u1", "missing-id").unwrap());

    assert!(matches!(store.remember("u1", "tea", &[]), Err(Error::Config(_))));
}
