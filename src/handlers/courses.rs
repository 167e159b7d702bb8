//! Course persistence endpoints (save and list)
//!
//! Both endpoints authenticate the bearer token from the Authorization
//! header before touching the store. The save/list pipeline shares no state
//! with generation.

use crate::auth::{UserId, bearer_token};
use crate::error::{AppError, AppResult};
use crate::handlers::AppState;
use crate::middleware::RequestId;
use crate::storage::StoredCourse;
use axum::{Extension, Json, extract::State, http::HeaderMap};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Response body for a successful save
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    pub success: bool,
    pub message: &'static str,
    pub course_id: String,
    pub saved_at: DateTime<Utc>,
}

/// Response body for a course listing
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub courses: Vec<StoredCourse>,
}

/// Authenticate the request from its Authorization header
async fn authenticate(state: &AppState, headers: &HeaderMap) -> AppResult<UserId> {
    let token = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token);
    state.verifier().authenticate(token).await
}

/// POST /api/save-course handler
pub async fn save_handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    headers: HeaderMap,
    Json(course): Json<Value>,
) -> AppResult<Json<SaveResponse>> {
    let user_id = authenticate(&state, &headers).await?;

    let title = course
        .get("courseTitle")
        .and_then(Value::as_str)
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Invalid course data: courseTitle is required".to_string()))?;

    tracing::info!(
        request_id = %request_id,
        user_id = %user_id,
        course_title = title,
        "Received course save request"
    );

    let stored = state.store().save(&user_id, course).await?;
    state.metrics().course_saved();

    Ok(Json(SaveResponse {
        success: true,
        message: "Course saved successfully",
        course_id: stored.id,
        saved_at: stored.created_at,
    }))
}

/// GET /api/courses handler
pub async fn list_handler(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    headers: HeaderMap,
) -> AppResult<Json<ListResponse>> {
    let user_id = authenticate(&state, &headers).await?;

    let courses = state.store().list(&user_id).await?;
    tracing::debug!(
        request_id = %request_id,
        user_id = %user_id,
        count = courses.len(),
        "Listed saved courses"
    );

    Ok(Json(ListResponse { courses }))
}
