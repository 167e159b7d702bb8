//! File-backed course store
//!
//! The local fallback when no hosted document store is configured: one
//! pretty-printed JSON file per saved course under a data directory, named
//! after the course id. Listing reads every `.json` file, filters on the
//! stored `userId`, and sorts by the stored `createdAt` field.

use super::{CourseStore, StoredCourse};
use crate::auth::UserId;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// One-file-per-course JSON store
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Open (and create if missing) the data directory
    pub fn new(data_dir: impl AsRef<Path>) -> AppResult<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir).map_err(|e| {
            AppError::Storage(format!(
                "failed to create data directory {}: {}",
                data_dir.display(),
                e
            ))
        })?;
        Ok(Self { data_dir })
    }

    fn course_path(&self, id: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", id))
    }
}

#[async_trait]
impl CourseStore for FileStore {
    async fn save(&self, user_id: &UserId, course: Value) -> AppResult<StoredCourse> {
        let stored = StoredCourse::new(user_id, course);
        let path = self.course_path(&stored.id);
        let body = serde_json::to_vec_pretty(&stored)
            .map_err(|e| AppError::Storage(format!("failed to serialize course: {}", e)))?;

        tokio::fs::write(&path, body).await.map_err(|e| {
            AppError::Storage(format!("failed to write {}: {}", path.display(), e))
        })?;

        tracing::info!(course_id = %stored.id, path = %path.display(), "Course saved");
        Ok(stored)
    }

    async fn list(&self, user_id: &UserId) -> AppResult<Vec<StoredCourse>> {
        let mut dir = tokio::fs::read_dir(&self.data_dir).await.map_err(|e| {
            AppError::Storage(format!(
                "failed to read data directory {}: {}",
                self.data_dir.display(),
                e
            ))
        })?;

        let mut courses = Vec::new();
        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|e| AppError::Storage(format!("failed to read directory entry: {}", e)))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let raw = tokio::fs::read_to_string(&path).await.map_err(|e| {
                AppError::Storage(format!("failed to read {}: {}", path.display(), e))
            })?;
            // A file that does not parse as a stored course is skipped, not
            // fatal: the directory may hold unrelated JSON.
            match serde_json::from_str::<StoredCourse>(&raw) {
                Ok(course) if course.user_id == user_id.as_str() => courses.push(course),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unparseable course file");
                }
            }
        }

        courses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(courses)
    }
}
