//! Problem log HTTP handlers.
//!
//! All endpoints operate on the authenticated user's collection only.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use grindlog_core::{
    CreateProblemRequest, Difficulty, Platform, Problem, ProblemStatus, UpdateProblemRequest,
};

use crate::auth::RequireAuth;
use crate::{ok, ApiError, AppState, Envelope};

/// Request body for logging a problem.
///
/// Required fields are `Option` here so their absence maps to 400 with a
/// named field instead of a generic body-rejection status.
#[derive(Debug, Deserialize)]
pub struct CreateProblemBody {
    pub title: Option<String>,
    pub platform: Option<Platform>,
    pub url: Option<String>,
    pub status: Option<ProblemStatus>,
    pub difficulty: Option<Difficulty>,
    pub tags: Option<Vec<String>>,
    pub solved_at: Option<DateTime<Utc>>,
}

impl CreateProblemBody {
    fn into_request(self) -> Result<CreateProblemRequest, ApiError> {
        let title = require_text(self.title, "title")?;
        let url = require_text(self.url, "url")?;
        let platform = self
            .platform
            .ok_or_else(|| missing_field("platform"))?;

        Ok(CreateProblemRequest {
            title,
            platform,
            url,
            status: self.status,
            difficulty: self.difficulty,
            tags: self.tags,
            solved_at: self.solved_at,
        })
    }
}

fn missing_field(name: &str) -> ApiError {
    ApiError::BadRequest(format!("Missing required field: {}", name))
}

fn require_text(value: Option<String>, name: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(missing_field(name)),
    }
}

/// List the caller's problems, most recently touched first.
///
/// # Returns
/// - 200 OK with the full problem list
/// - 401 Unauthorized without a valid token
pub async fn list_problems(
    State(state): State<AppState>,
    auth: RequireAuth,
) -> Result<Json<Envelope<Vec<Problem>>>, ApiError> {
    let problems = state.store.problems.list(&auth.user.id).await?;
    Ok(ok(problems))
}

/// Log a new problem.
///
/// # Returns
/// - 201 Created with the stored record
/// - 400 Bad Request if title, platform, or url is missing/empty
/// - 401 Unauthorized without a valid token
pub async fn create_problem(
    State(state): State<AppState>,
    auth: RequireAuth,
    Json(body): Json<CreateProblemBody>,
) -> Result<(StatusCode, Json<Envelope<Problem>>), ApiError> {
    let req = body.into_request()?;
    let problem = state.store.problems.create(&auth.user.id, req).await?;
    Ok((StatusCode::CREATED, ok(problem)))
}

/// Partially update a problem (shallow field merge).
///
/// # Returns
/// - 200 OK with the updated record
/// - 404 Not Found if the id is unknown
/// - 401 Unauthorized without a valid token
pub async fn update_problem(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProblemRequest>,
) -> Result<Json<Envelope<Problem>>, ApiError> {
    let problem = state.store.problems.update(&auth.user.id, id, req).await?;
    Ok(ok(problem))
}

/// Delete a problem.
///
/// # Returns
/// - 200 OK with a confirmation message
/// - 404 Not Found if the id is unknown
/// - 401 Unauthorized without a valid token
pub async fn delete_problem(
    State(state): State<AppState>,
    auth: RequireAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<serde_json::Value>>, ApiError> {
    state.store.problems.delete(&auth.user.id, id).await?;
    Ok(ok(serde_json::json!({ "message": "Problem deleted" })))
}
