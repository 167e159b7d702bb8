//! In-memory course store
//!
//! Used for no-persistence deployments and for tests. Contents are lost on
//! restart.

use super::{CourseStore, StoredCourse};
use crate::auth::UserId;
use crate::error::AppResult;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

/// Process-local course store
#[derive(Default)]
pub struct MemoryStore {
    courses: Mutex<Vec<StoredCourse>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CourseStore for MemoryStore {
    async fn save(&self, user_id: &UserId, course: Value) -> AppResult<StoredCourse> {
        let stored = StoredCourse::new(user_id, course);
        self.courses
            .lock()
            .expect("store mutex poisoned")
            .push(stored.clone());
        Ok(stored)
    }

    async fn list(&self, user_id: &UserId) -> AppResult<Vec<StoredCourse>> {
        let mut matching: Vec<StoredCourse> = self
            .courses
            .lock()
            .expect("store mutex poisoned")
            .iter()
            .filter(|c| c.user_id == user_id.as_str())
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_save_then_list_returns_record() {
        let store = MemoryStore::new();
        let user = UserId::new("alice");

        let stored = store
            .save(&user, json!({"courseTitle": "X"}))
            .await
            .unwrap();
        assert!(!stored.id.is_empty());

        let listed = store.list(&user).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].course["courseTitle"], "X");
    }

    #[tokio::test]
    async fn test_list_is_scoped_to_the_user() {
        let store = MemoryStore::new();
        store
            .save(&UserId::new("alice"), json!({"courseTitle": "A"}))
            .await
            .unwrap();
        store
            .save(&UserId::new("bob"), json!({"courseTitle": "B"}))
            .await
            .unwrap();

        let alice = store.list(&UserId::new("alice")).await.unwrap();
        assert_eq!(alice.len(), 1);
        assert_eq!(alice[0].course["courseTitle"], "A");

        let nobody = store.list(&UserId::new("carol")).await.unwrap();
        assert!(nobody.is_empty());
    }

    #[tokio::test]
    async fn test_list_orders_newest_first() {
        let store = MemoryStore::new();
        let user = UserId::new("alice");
        for title in ["first", "second", "third"] {
            store
                .save(&user, json!({"courseTitle": title}))
                .await
                .unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        let listed = store.list(&user).await.unwrap();
        let titles: Vec<&str> = listed
            .iter()
            .map(|c| c.course["courseTitle"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["third", "second", "first"]);
    }
}
