//! Shared fixture for the integration tests.

#![allow(dead_code)]

use parley_db::Store;
use tempfile::TempDir;

/// Three messages in c1 at t=100/200/300, five in c2, none in c4.
pub const FIXTURE: &str = r#"{
  "users": [
    { "id": "u1", "name": "Ada" },
    { "id": "u2", "name": "Grace", "avatarUrl": "grace.png" },
    { "id": "u3", "name": "Alan" }
  ],
  "conversations": [
    { "id": "c1", "participantIds": ["u1", "u2"], "createdAt": "10" },
    { "id": "c2", "participantIds": ["u1", "u3"], "createdAt": "20" },
    { "id": "c3", "participantIds": ["u2", "u3"], "createdAt": "30" },
    { "id": "c4", "participantIds": ["u1"], "createdAt": "40" }
  ],
  "messages": [
    { "id": "m1", "text": "one", "sentById": "u1", "conversationId": "c1", "createdAt": "100" },
    { "id": "m2", "text": "two", "sentById": "u2", "conversationId": "c1", "createdAt": "200" },
    { "id": "m3", "text": "three", "sentById": "u1", "conversationId": "c1", "createdAt": "300" },
    { "id": "m4", "text": "a", "sentById": "u3", "conversationId": "c2", "createdAt": "150" },
    { "id": "m8", "text": "e", "sentById": "u3", "conversationId": "c2", "createdAt": "550" },
    { "id": "m6", "text": "c", "sentById": "u3", "conversationId": "c2", "createdAt": "350" },
    { "id": "m5", "text": "b", "sentById": "u1", "conversationId": "c2", "createdAt": "250" },
    { "id": "m7", "text": "d", "sentById": "u1", "conversationId": "c2", "createdAt": "450" }
  ]
}"#;

pub async fn fixture_store() -> (TempDir, Store) {
    store_with(FIXTURE).await
}

/// A store whose file starts out holding `contents`.
pub async fn store_with(contents: &str) -> (TempDir, Store) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, contents).unwrap();

    let store = Store::open(&path).await.unwrap();
    (dir, store)
}

pub fn ids<T: parley_types::models::Identified>(rows: &[T]) -> Vec<&str> {
    rows.iter().map(|r| r.id()).collect()
}
