//! Course persistence behind a common interface
//!
//! Handlers only see the [`CourseStore`] trait; the backend (file-per-course
//! or in-memory) is chosen from configuration. Stored courses are owned by
//! the user who created them and are never mutated after creation; listing
//! is an equality query on `userId`, newest first.

use crate::auth::UserId;
use crate::error::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// A persisted course: the generated payload plus ownership metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredCourse {
    pub id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// The course payload as submitted (courseTitle, modules, ...)
    #[serde(flatten)]
    pub course: Value,
}

impl StoredCourse {
    /// Stamp a submitted payload with ownership and creation metadata
    pub fn new(user_id: &UserId, course: Value) -> Self {
        let now = Utc::now();
        Self {
            id: generate_course_id(now),
            user_id: user_id.as_str().to_string(),
            created_at: now,
            updated_at: now,
            course,
        }
    }
}

/// Identifier derived from the creation timestamp plus a short random suffix
///
/// The suffix disambiguates saves landing on the same millisecond.
fn generate_course_id(now: DateTime<Utc>) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("course_{}_{}", now.timestamp_millis(), &suffix[..8])
}

/// Create-and-list contract over a "courses" collection
#[async_trait]
pub trait CourseStore: Send + Sync {
    /// Persist a course payload for the user, returning the stored record
    async fn save(&self, user_id: &UserId, course: Value) -> AppResult<StoredCourse>;

    /// All courses where `userId` equals the caller's id, newest first
    async fn list(&self, user_id: &UserId) -> AppResult<Vec<StoredCourse>>;
}
