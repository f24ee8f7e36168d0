//! Persistent backend tests. These need a reachable PostgreSQL server and
//! only run when `NOTES_TEST_PG_DSN` is set; otherwise they return early.
//!
//! Tests share one `notes` table, so assertions only look at the ids each
//! test created itself.

use notes_backend::{NoteDraft, NoteStore};

async fn store() -> Option<NoteStore> {
    let Ok(dsn) = std::env::var("NOTES_TEST_PG_DSN") else {
        eprintln!("NOTES_TEST_PG_DSN not set, skipping PostgreSQL test");
        return None;
    };

    Some(NoteStore::open(Some(&dsn)).await.unwrap())
}

#[tokio::test]
async fn test_add_then_get_round_trips() {
    let Some(store) = store().await else { return };
    assert_eq!(store.backend_kind().await, "postgres");

    let note = store.add(NoteDraft::new("pg title", "pg body")).await.unwrap();
    let fetched = store.get(note.id).await.unwrap().unwrap();

    assert!(note.id > 0);
    assert_eq!(fetched, note);
    assert_eq!(fetched.created_at, fetched.updated_at);
}

#[tokio::test]
async fn test_ids_are_distinct_and_listed_in_order() {
    let Some(store) = store().await else { return };

    let mut ids = Vec::new();
    for i in 0..3 {
        ids.push(store.add(NoteDraft::new(format!("n{i}"), "")).await.unwrap().id);
    }

    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));

    let listed: Vec<i64> = store
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|note| note.id)
        .collect();
    assert!(listed.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(ids.iter().all(|id| listed.contains(id)));
}

#[tokio::test]
async fn test_update_preserves_identity() {
    let Some(store) = store().await else { return };

    let note = store.add(NoteDraft::new("before", "x")).await.unwrap();
    let updated = store
        .update(note.id, NoteDraft::new("after", "y"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.id, note.id);
    assert_eq!(updated.title, "after");
    assert_eq!(updated.content, "y");
    assert_eq!(updated.created_at, note.created_at);
    assert!(updated.updated_at >= note.updated_at);
    assert_eq!(store.get(note.id).await.unwrap(), Some(updated));
}

#[tokio::test]
async fn test_delete_is_terminal() {
    let Some(store) = store().await else { return };

    let note = store.add(NoteDraft::new("doomed", "")).await.unwrap();

    assert!(store.delete(note.id).await.unwrap());
    assert_eq!(store.get(note.id).await.unwrap(), None);
    assert!(!store.delete(note.id).await.unwrap());
    assert_eq!(
        store.update(note.id, NoteDraft::new("t", "c")).await.unwrap(),
        None
    );
}

#[tokio::test]
async fn test_notes_survive_reopening_the_store() {
    let Some(store) = store().await else { return };
    let note = store.add(NoteDraft::new("durable", "")).await.unwrap();
    drop(store);

    let Some(reopened) = self::store().await else { return };

    assert_eq!(reopened.get(note.id).await.unwrap(), Some(note));
}
